//! MySQL dialect.
//!
//! The reference renderer. Fragment text is kept byte-stable: modifier
//! ordering is fixed (unsigned, nullability, default, auto-increment,
//! comment), each sub-fragment owns its leading space, and auto-increment
//! implies an inline `primary key`. Engines without that shortcut emit a
//! separate primary-key constraint instead.

use super::DialectRenderer;
use crate::column::{ColumnSpec, ColumnType};

/// MySQL renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DialectRenderer for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_char(&self) -> char {
        '`'
    }

    fn column_type(&self, col: &ColumnSpec) -> String {
        match &col.ty {
            ColumnType::Char { max_length } => format!("char({max_length})"),
            ColumnType::String { max_length } => format!("varchar({max_length})"),
            ColumnType::Text => "text".to_string(),
            ColumnType::Integer => "int".to_string(),
            ColumnType::Float { total, places } | ColumnType::Double { total, places } => {
                if *total > 0 && *places > 0 {
                    format!("double({total},{places})")
                } else {
                    "double".to_string()
                }
            }
            ColumnType::Decimal { total, places } => format!("decimal({total},{places})"),
            ColumnType::Boolean => "tinyint(1)".to_string(),
            ColumnType::Enum { allowed } => {
                let values = allowed
                    .iter()
                    .map(|v| self.quote_literal(v))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("enum({values})")
            }
            ColumnType::Date => "date".to_string(),
            ColumnType::Datetime => "datetime".to_string(),
            ColumnType::Time => "time".to_string(),
            ColumnType::Timestamp => {
                if col.nullable == Some(true) {
                    "timestamp default 0".to_string()
                } else {
                    "timestamp".to_string()
                }
            }
            ColumnType::Binary => "blob".to_string(),
            ColumnType::Custom(raw) => raw.clone(),
        }
    }

    fn column_modifiers(&self, col: &ColumnSpec) -> String {
        let mut sql = String::new();
        if col.unsigned {
            sql.push_str(" unsigned");
        }
        if let Some(nullable) = col.nullable {
            sql.push_str(if nullable { " null" } else { "not null" });
        }
        if let Some(default) = col.default.as_deref().filter(|v| !v.is_empty()) {
            sql.push_str(" default ");
            sql.push_str(&self.quote_literal(default));
        }
        if col.auto_increment {
            sql.push_str(" auto_increment primary key");
        }
        if let Some(comment) = col.comment.as_deref().filter(|v| !v.is_empty()) {
            sql.push_str(" comment ");
            sql.push_str(&self.quote_literal(comment));
        }
        sql
    }

    fn drop_foreign_key(&self, table: &str, name: &str) -> String {
        format!(
            "alter table {} drop foreign key {}",
            self.quote_table(table),
            self.quote_identifier(name)
        )
    }

    fn drop_primary(&self, _table: &str) -> String {
        "drop primary key".to_string()
    }

    fn rename_table(&self, from: &str, to: &str) -> String {
        format!(
            "rename table {} to {}",
            self.quote_table(from),
            self.quote_table(to)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{ForeignKeyAction, ForeignKeySpec};

    fn column(name: &str, ty: ColumnType) -> ColumnSpec {
        ColumnSpec::new(name, ty)
    }

    #[test]
    fn type_table() {
        let d = MySqlDialect::new();
        let cases = [
            (ColumnType::Char { max_length: 4 }, "char(4)"),
            (ColumnType::String { max_length: 255 }, "varchar(255)"),
            (ColumnType::Text, "text"),
            (ColumnType::Integer, "int"),
            (ColumnType::Boolean, "tinyint(1)"),
            (ColumnType::Date, "date"),
            (ColumnType::Datetime, "datetime"),
            (ColumnType::Time, "time"),
            (ColumnType::Binary, "blob"),
            (
                ColumnType::Decimal {
                    total: 8,
                    places: 2,
                },
                "decimal(8,2)",
            ),
            (ColumnType::Custom("mediumint".into()), "mediumint"),
        ];
        for (ty, expected) in cases {
            assert_eq!(d.column_type(&column("c", ty)), expected);
        }
    }

    #[test]
    fn float_and_double_need_both_parts() {
        let d = MySqlDialect::new();
        assert_eq!(
            d.column_type(&column(
                "c",
                ColumnType::Double {
                    total: 10,
                    places: 4
                }
            )),
            "double(10,4)"
        );
        assert_eq!(
            d.column_type(&column(
                "c",
                ColumnType::Double {
                    total: 10,
                    places: 0
                }
            )),
            "double"
        );
        assert_eq!(
            d.column_type(&column(
                "c",
                ColumnType::Float {
                    total: 8,
                    places: 2
                }
            )),
            "double(8,2)"
        );
    }

    #[test]
    fn nullable_timestamp_defaults_to_zero() {
        let d = MySqlDialect::new();
        let mut col = column("created_at", ColumnType::Timestamp);
        assert_eq!(d.column_type(&col), "timestamp");
        col.nullable = Some(true);
        assert_eq!(d.column_type(&col), "timestamp default 0");
    }

    #[test]
    fn enum_values_are_quoted_in_order() {
        let d = MySqlDialect::new();
        let col = column(
            "status",
            ColumnType::Enum {
                allowed: vec!["a".into(), "b".into(), "c".into()],
            },
        );
        assert_eq!(d.column_type(&col), "enum('a', 'b', 'c')");
    }

    #[test]
    fn modifier_order_is_fixed() {
        let d = MySqlDialect::new();
        let mut col = column("n", ColumnType::Integer);
        col.unsigned = true;
        col.nullable = Some(true);
        col.default = Some("0".into());
        col.comment = Some("counter".into());
        assert_eq!(
            d.column_modifiers(&col),
            " unsigned null default '0' comment 'counter'"
        );
    }

    #[test]
    fn auto_increment_implies_inline_primary_key() {
        let d = MySqlDialect::new();
        let mut col = column("id", ColumnType::Integer);
        col.auto_increment = true;
        assert_eq!(d.column_modifiers(&col), " auto_increment primary key");
    }

    #[test]
    fn explicit_not_null_has_no_leading_space() {
        let d = MySqlDialect::new();
        let mut col = column("n", ColumnType::Integer);
        col.nullable = Some(false);
        assert_eq!(d.column_modifiers(&col), "not null");
    }

    #[test]
    fn empty_default_and_comment_are_omitted() {
        let d = MySqlDialect::new();
        let mut col = column("n", ColumnType::Integer);
        col.default = Some(String::new());
        col.comment = Some(String::new());
        assert_eq!(d.column_modifiers(&col), "");
    }

    #[test]
    fn foreign_key_fragment_names_the_constraint_after_table_and_column() {
        let d = MySqlDialect::new();
        let mut fk = ForeignKeySpec::new("user_id");
        fk.references = Some("id".into());
        fk.on = Some("users".into());
        fk.on_delete = ForeignKeyAction::Cascade;
        assert_eq!(
            d.add_foreign_key("posts", &fk),
            "add constraint `posts_user_id` foreign key (`user_id`) references `users`(`id`) \
             on delete cascade on update no action"
        );
    }

    #[test]
    fn literal_quoting_doubles_single_quotes() {
        let d = MySqlDialect::new();
        assert_eq!(d.quote_literal("it's"), "'it''s'");
    }

    #[test]
    fn identifier_quoting_doubles_backticks() {
        let d = MySqlDialect::new();
        assert_eq!(d.quote_identifier("we`ird"), "`we``ird`");
    }

    #[test]
    fn table_level_statements() {
        let d = MySqlDialect::new();
        assert_eq!(d.rename_table("old", "new"), "rename table `old` to `new`");
        assert_eq!(d.drop_table("users"), "drop table `users`");
        assert_eq!(
            d.drop_table_if_exists("users"),
            "drop table if exists `users`"
        );
        assert_eq!(
            d.drop_foreign_key("posts", "posts_user_id"),
            "alter table `posts` drop foreign key `posts_user_id`"
        );
        assert_eq!(d.drop_index("key_users_email_index"), "drop index `key_users_email_index`");
        assert_eq!(d.drop_primary("users"), "drop primary key");
    }
}
