//! Database connection interface.
//!
//! The compiler never talks to the database directly; it needs exactly two
//! things from a connection: an ordered listing of the live schema (to
//! classify ALTER columns and answer existence checks) and statement
//! execution. [`SchemaConnection`] captures that contract, and an
//! implementation over [`sqlx::MySqlPool`] is provided.

use sqlx::MySqlPool;

/// Metadata for one live column, in table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveColumn {
    /// Column name.
    pub name: String,
    /// Engine-reported column type.
    pub data_type: String,
}

/// Live-schema listing and statement execution.
///
/// Both calls are fallible I/O round-trips; failures surface unchanged and
/// are never retried here.
#[allow(async_fn_in_trait)]
pub trait SchemaConnection {
    /// Lists the columns of a table, in ordinal order.
    async fn list_columns(&self, table: &str) -> Result<Vec<LiveColumn>, sqlx::Error>;

    /// Lists the table names of the current database.
    async fn list_tables(&self) -> Result<Vec<String>, sqlx::Error>;

    /// Executes a statement, returning the affected row count.
    async fn execute(&self, sql: &str) -> Result<u64, sqlx::Error>;
}

impl SchemaConnection for MySqlPool {
    async fn list_columns(&self, table: &str) -> Result<Vec<LiveColumn>, sqlx::Error> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT column_name, column_type FROM information_schema.columns \
             WHERE table_schema = database() AND table_name = ? \
             ORDER BY ordinal_position",
        )
        .bind(table)
        .fetch_all(self)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(name, data_type)| LiveColumn { name, data_type })
            .collect())
    }

    async fn list_tables(&self) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT table_name FROM information_schema.tables \
             WHERE table_schema = database() ORDER BY table_name",
        )
        .fetch_all(self)
        .await?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn execute(&self, sql: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(sql).execute(self).await?;
        Ok(result.rows_affected())
    }
}
