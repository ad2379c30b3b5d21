//! PostgreSQL dialect.

use super::DialectRenderer;
use crate::column::{ColumnSpec, ColumnType};

/// PostgreSQL renderer.
///
/// Differences from MySQL worth knowing:
/// - auto-incrementing integers become `serial`, with `primary key` emitted
///   as a separate modifier rather than MySQL's inline
///   `auto_increment primary key` shortcut;
/// - there is no unsigned modifier;
/// - enumerations render as `text` with a membership check;
/// - column comments are separate `comment on column` statements and are not
///   emitted inline.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DialectRenderer for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn column_type(&self, col: &ColumnSpec) -> String {
        match &col.ty {
            ColumnType::Char { max_length } => format!("char({max_length})"),
            ColumnType::String { max_length } => format!("varchar({max_length})"),
            ColumnType::Text => "text".to_string(),
            ColumnType::Integer => {
                if col.auto_increment {
                    "serial".to_string()
                } else {
                    "integer".to_string()
                }
            }
            ColumnType::Float { total, places } | ColumnType::Double { total, places } => {
                if *total > 0 && *places > 0 {
                    format!("numeric({total},{places})")
                } else {
                    "double precision".to_string()
                }
            }
            ColumnType::Decimal { total, places } => format!("numeric({total},{places})"),
            ColumnType::Boolean => "boolean".to_string(),
            ColumnType::Enum { allowed } => {
                let values = allowed
                    .iter()
                    .map(|v| self.quote_literal(v))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "text check ({} in ({values}))",
                    self.quote_identifier(&col.name)
                )
            }
            ColumnType::Date => "date".to_string(),
            ColumnType::Datetime | ColumnType::Timestamp => "timestamp".to_string(),
            ColumnType::Time => "time".to_string(),
            ColumnType::Binary => "bytea".to_string(),
            ColumnType::Custom(raw) => raw.clone(),
        }
    }

    fn column_modifiers(&self, col: &ColumnSpec) -> String {
        let mut sql = String::new();
        if let Some(nullable) = col.nullable {
            sql.push_str(if nullable { " null" } else { " not null" });
        }
        if let Some(default) = col.default.as_deref().filter(|v| !v.is_empty()) {
            sql.push_str(" default ");
            sql.push_str(&self.quote_literal(default));
        }
        if col.auto_increment {
            // serial carries the increment; only the key is declared here.
            sql.push_str(" primary key");
        }
        sql
    }

    fn drop_foreign_key(&self, table: &str, name: &str) -> String {
        format!(
            "alter table {} drop constraint {}",
            self.quote_table(table),
            self.quote_identifier(name)
        )
    }

    fn drop_primary(&self, table: &str) -> String {
        format!(
            "drop constraint {}",
            self.quote_identifier(&format!("{table}_pkey"))
        )
    }

    fn rename_table(&self, from: &str, to: &str) -> String {
        format!(
            "alter table {} rename to {}",
            self.quote_table(from),
            self.quote_table(to)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Blueprint;

    #[test]
    fn serial_replaces_auto_increment_integers() {
        let mut bp = Blueprint::create("users");
        bp.increments("id");

        let sql = bp.compile(&PostgresDialect::new(), &[]);
        assert_eq!(
            sql,
            "create table \"users\" (\"id\" serial primary key) add primary key (\"id\")"
        );
    }

    #[test]
    fn plain_integer_stays_integer() {
        let d = PostgresDialect::new();
        let col = ColumnSpec::new("n", ColumnType::Integer);
        assert_eq!(d.column_type(&col), "integer");
    }

    #[test]
    fn enum_renders_as_checked_text() {
        let d = PostgresDialect::new();
        let col = ColumnSpec::new(
            "status",
            ColumnType::Enum {
                allowed: vec!["a".into(), "b".into()],
            },
        );
        assert_eq!(
            d.column_type(&col),
            "text check (\"status\" in ('a', 'b'))"
        );
    }

    #[test]
    fn unsigned_is_ignored() {
        let d = PostgresDialect::new();
        let mut col = ColumnSpec::new("n", ColumnType::Integer);
        col.unsigned = true;
        assert_eq!(d.column_modifiers(&col), "");
    }

    #[test]
    fn not_null_keeps_its_leading_space() {
        let d = PostgresDialect::new();
        let mut col = ColumnSpec::new("n", ColumnType::Integer);
        col.nullable = Some(false);
        assert_eq!(d.column_modifiers(&col), " not null");
    }

    #[test]
    fn table_level_statements() {
        let d = PostgresDialect::new();
        assert_eq!(
            d.rename_table("old", "new"),
            "alter table \"old\" rename to \"new\""
        );
        assert_eq!(
            d.drop_foreign_key("posts", "posts_user_id"),
            "alter table \"posts\" drop constraint \"posts_user_id\""
        );
        assert_eq!(d.drop_primary("users"), "drop constraint \"users_pkey\"");
    }
}
