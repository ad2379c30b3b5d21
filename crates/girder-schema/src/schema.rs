//! The schema facade.
//!
//! Entry points construct a [`Blueprint`], run the caller's declaration
//! routine against it, compile through the configured dialect, and execute
//! the result, unless the configuration is a dry run or the compilation is
//! a no-op.

use girder_core::dialect::{DialectRenderer, MySqlDialect, PostgresDialect};
use girder_core::Blueprint;
use tracing::{debug, info};

use crate::config::SchemaConfig;
use crate::connection::SchemaConnection;
use crate::error::{Result, SchemaError};

/// Resolves an engine name to its dialect renderer.
///
/// # Errors
///
/// Returns [`SchemaError::UnknownEngine`] when no renderer is registered
/// for the engine.
pub fn dialect_for(engine: &str) -> Result<Box<dyn DialectRenderer>> {
    match engine.to_ascii_lowercase().as_str() {
        "mysql" => Ok(Box::new(MySqlDialect::new())),
        "postgres" | "postgresql" => Ok(Box::new(PostgresDialect::new())),
        other => Err(SchemaError::UnknownEngine(other.to_string())),
    }
}

/// The outcome of one schema operation: the compiled SQL, and the affected
/// row count when the statement was actually executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledResult {
    /// The rendered statement; empty for a no-op alteration.
    pub sql: String,
    /// Rows affected by execution; `None` in dry-run mode or for no-ops.
    pub rows_affected: Option<u64>,
}

/// Table-schema entry points over one connection, one dialect, and one
/// configuration.
pub struct Schema<C> {
    connection: C,
    dialect: Box<dyn DialectRenderer>,
    config: SchemaConfig,
}

impl<C: SchemaConnection> Schema<C> {
    /// Creates a facade, resolving the dialect from the configured engine.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownEngine`] for unregistered engines.
    pub fn new(connection: C, config: SchemaConfig) -> Result<Self> {
        let dialect = dialect_for(&config.engine)?;
        Ok(Self {
            connection,
            dialect,
            config,
        })
    }

    /// Creates a facade with an explicit dialect renderer.
    pub fn with_dialect(
        connection: C,
        dialect: Box<dyn DialectRenderer>,
        config: SchemaConfig,
    ) -> Self {
        Self {
            connection,
            dialect,
            config,
        }
    }

    /// Returns the underlying connection.
    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Creates a new table from the declaration routine.
    pub async fn create<F>(&self, table: &str, declare: F) -> Result<CompiledResult>
    where
        F: FnOnce(&mut Blueprint),
    {
        info!(table = %table, "creating table");
        let mut blueprint = Blueprint::create(table);
        declare(&mut blueprint);
        let sql = blueprint.compile(self.dialect.as_ref(), &[]);
        self.run(sql).await
    }

    /// Alters an existing table from the declaration routine.
    ///
    /// The live column list is fetched first so the compiler can classify
    /// each declared column as added or modified.
    pub async fn alter<F>(&self, table: &str, declare: F) -> Result<CompiledResult>
    where
        F: FnOnce(&mut Blueprint),
    {
        info!(table = %table, "altering table");
        let mut blueprint = Blueprint::alter(table);
        declare(&mut blueprint);
        let existing: Vec<String> = self
            .connection
            .list_columns(table)
            .await?
            .into_iter()
            .map(|col| col.name)
            .collect();
        let sql = blueprint.compile(self.dialect.as_ref(), &existing);
        self.run(sql).await
    }

    /// Renames a table.
    pub async fn rename(&self, from: &str, to: &str) -> Result<CompiledResult> {
        info!(from = %from, to = %to, "renaming table");
        let mut blueprint = Blueprint::create(from);
        blueprint.rename_table(from, to);
        let sql = blueprint.compile(self.dialect.as_ref(), &[]);
        self.run(sql).await
    }

    /// Drops a table.
    pub async fn drop(&self, table: &str) -> Result<CompiledResult> {
        info!(table = %table, "dropping table");
        let mut blueprint = Blueprint::create(table);
        blueprint.drop_table();
        let sql = blueprint.compile(self.dialect.as_ref(), &[]);
        self.run(sql).await
    }

    /// Drops a table if it exists.
    pub async fn drop_if_exists(&self, table: &str) -> Result<CompiledResult> {
        info!(table = %table, "dropping table if it exists");
        let mut blueprint = Blueprint::create(table);
        blueprint.drop_table_if_exists();
        let sql = blueprint.compile(self.dialect.as_ref(), &[]);
        self.run(sql).await
    }

    /// Returns whether the table exists.
    pub async fn table_exists(&self, table: &str) -> Result<bool> {
        let tables = self.connection.list_tables().await?;
        Ok(tables.iter().any(|name| name == table))
    }

    /// Returns whether the table has the given column.
    pub async fn column_exists(&self, table: &str, column: &str) -> Result<bool> {
        let columns = self.connection.list_columns(table).await?;
        Ok(columns.iter().any(|col| col.name == column))
    }

    /// Executes compiled SQL unless it is empty or execution is disabled.
    async fn run(&self, sql: String) -> Result<CompiledResult> {
        if sql.is_empty() {
            debug!("nothing to do");
            return Ok(CompiledResult {
                sql,
                rows_affected: None,
            });
        }

        debug!(sql = %sql, "compiled schema statement");

        if !self.config.execute {
            return Ok(CompiledResult {
                sql,
                rows_affected: None,
            });
        }

        let rows = self.connection.execute(&sql).await?;
        Ok(CompiledResult {
            sql,
            rows_affected: Some(rows),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::connection::LiveColumn;

    /// In-memory connection with a fixed schema snapshot.
    #[derive(Debug, Default)]
    struct MockConnection {
        columns: HashMap<String, Vec<LiveColumn>>,
        tables: Vec<String>,
        executed: Mutex<Vec<String>>,
    }

    impl MockConnection {
        fn with_columns(table: &str, names: &[&str]) -> Self {
            let columns: Vec<LiveColumn> = names
                .iter()
                .map(|name| LiveColumn {
                    name: (*name).to_string(),
                    data_type: "varchar(255)".to_string(),
                })
                .collect();
            Self {
                columns: HashMap::from([(table.to_string(), columns)]),
                tables: vec![table.to_string()],
                executed: Mutex::new(Vec::new()),
            }
        }

        fn executed(&self) -> Vec<String> {
            self.executed.lock().expect("lock poisoned").clone()
        }
    }

    impl SchemaConnection for MockConnection {
        async fn list_columns(
            &self,
            table: &str,
        ) -> std::result::Result<Vec<LiveColumn>, sqlx::Error> {
            Ok(self.columns.get(table).cloned().unwrap_or_default())
        }

        async fn list_tables(&self) -> std::result::Result<Vec<String>, sqlx::Error> {
            Ok(self.tables.clone())
        }

        async fn execute(&self, sql: &str) -> std::result::Result<u64, sqlx::Error> {
            self.executed
                .lock()
                .expect("lock poisoned")
                .push(sql.to_string());
            Ok(0)
        }
    }

    fn dry_schema(connection: MockConnection) -> Schema<MockConnection> {
        Schema::new(connection, SchemaConfig::default().dry_run()).expect("mysql is registered")
    }

    #[tokio::test]
    async fn create_compiles_the_whole_table() {
        let schema = dry_schema(MockConnection::default());
        let result = schema
            .create("users", |t| {
                t.increments("id");
                t.string("name", 100);
                t.timestamp("created_at");
                t.timestamp("updated_at");
            })
            .await
            .unwrap();

        assert_eq!(
            result.sql,
            "create table `users` (`id` int unsigned auto_increment primary key, \
             `name` varchar(100), `created_at` timestamp, `updated_at` timestamp) \
             add primary key (`id`)"
        );
        assert_eq!(result.rows_affected, None);
    }

    #[tokio::test]
    async fn alter_uses_the_live_snapshot() {
        let schema = dry_schema(MockConnection::with_columns("users", &["a", "b"]));
        let result = schema
            .alter("users", |t| {
                t.integer("a");
                t.string("c", 255);
            })
            .await
            .unwrap();

        assert_eq!(
            result.sql,
            "alter table `users` (change `a``a` int, add `c` varchar(255))"
        );
    }

    #[tokio::test]
    async fn dry_run_never_executes() {
        let schema = dry_schema(MockConnection::default());
        let result = schema.drop("users").await.unwrap();

        assert_eq!(result.sql, "drop table `users`");
        assert_eq!(result.rows_affected, None);
        assert!(schema.connection().executed().is_empty());
    }

    #[tokio::test]
    async fn execution_reports_affected_rows() {
        let schema =
            Schema::new(MockConnection::default(), SchemaConfig::default()).unwrap();
        let result = schema.drop_if_exists("users").await.unwrap();

        assert_eq!(result.sql, "drop table if exists `users`");
        assert_eq!(result.rows_affected, Some(0));
        assert_eq!(schema.connection().executed(), [result.sql.clone()]);
    }

    #[tokio::test]
    async fn noop_alter_skips_execution() {
        let schema =
            Schema::new(MockConnection::default(), SchemaConfig::default()).unwrap();
        let result = schema.alter("users", |_| {}).await.unwrap();

        assert_eq!(result.sql, "");
        assert_eq!(result.rows_affected, None);
        assert!(schema.connection().executed().is_empty());
    }

    #[tokio::test]
    async fn rename_compiles_a_single_statement() {
        let schema = dry_schema(MockConnection::default());
        let result = schema.rename("old", "new").await.unwrap();
        assert_eq!(result.sql, "rename table `old` to `new`");
    }

    #[tokio::test]
    async fn existence_checks_hit_the_listing() {
        let schema = dry_schema(MockConnection::with_columns("users", &["id", "email"]));

        assert!(schema.table_exists("users").await.unwrap());
        assert!(!schema.table_exists("missing").await.unwrap());
        assert!(schema.column_exists("users", "email").await.unwrap());
        assert!(!schema.column_exists("users", "phone").await.unwrap());
    }

    #[test]
    fn unknown_engine_is_a_configuration_error() {
        let err = Schema::new(
            MockConnection::default(),
            SchemaConfig::default().engine("oracle"),
        )
        .err()
        .expect("oracle is not registered");
        assert!(matches!(err, SchemaError::UnknownEngine(engine) if engine == "oracle"));
    }

    #[tokio::test]
    async fn postgres_engine_resolves_from_config() {
        let schema = Schema::new(
            MockConnection::default(),
            SchemaConfig::default().engine("postgres").dry_run(),
        )
        .unwrap();

        let result = schema
            .create("users", |t| {
                t.increments("id");
            })
            .await
            .unwrap();
        assert!(result.sql.starts_with("create table \"users\""));
    }
}
