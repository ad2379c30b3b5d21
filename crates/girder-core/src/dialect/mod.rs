//! Dialect-specific DDL rendering.
//!
//! Each database engine renders column types, modifiers, and constraint
//! fragments differently. A [`Blueprint`](crate::Blueprint) stays
//! engine-agnostic and delegates every emitted fragment to a
//! [`DialectRenderer`] at compile time. Renderers are stateless: every
//! method is a pure function of its inputs.

mod mysql;
mod postgres;

pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;

use crate::column::ColumnSpec;
use crate::constraint::ForeignKeySpec;

/// Renders blueprint fragments into engine-specific SQL.
pub trait DialectRenderer: Send + Sync {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character.
    fn quote_char(&self) -> char {
        '"'
    }

    /// Quotes an identifier, doubling embedded quote characters.
    fn quote_identifier(&self, name: &str) -> String {
        let q = self.quote_char();
        let doubled = format!("{q}{q}");
        format!("{q}{}{q}", name.replace(q, &doubled))
    }

    /// Quotes a table name.
    fn quote_table(&self, name: &str) -> String {
        self.quote_identifier(name)
    }

    /// Quotes a literal value, doubling embedded single quotes.
    fn quote_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// Quotes and comma-joins a column list.
    fn quote_columns(&self, columns: &[String]) -> String {
        columns
            .iter()
            .map(|c| self.quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Renders the type fragment for a column.
    fn column_type(&self, col: &ColumnSpec) -> String;

    /// Renders the modifier fragment for a column.
    ///
    /// Modifier sub-fragments concatenate with no separator; each one owns
    /// its leading space.
    fn column_modifiers(&self, col: &ColumnSpec) -> String;

    /// Renders an `add constraint ... foreign key` fragment.
    ///
    /// The constraint is named `<table>_<local column>`.
    fn add_foreign_key(&self, table: &str, fk: &ForeignKeySpec) -> String {
        let name = format!("{}_{}", table, fk.column);
        format!(
            "add constraint {} foreign key ({}) references {}({}) on delete {} on update {}",
            self.quote_identifier(&name),
            self.quote_identifier(&fk.column),
            self.quote_table(fk.on.as_deref().unwrap_or_default()),
            self.quote_identifier(fk.references.as_deref().unwrap_or_default()),
            fk.on_delete.as_sql(),
            fk.on_update.as_sql(),
        )
    }

    /// Renders an `add primary key` fragment.
    fn add_primary(&self, columns: &[String]) -> String {
        format!("add primary key ({})", self.quote_columns(columns))
    }

    /// Renders an `add constraint ... unique` fragment.
    fn add_unique(&self, name: &str, columns: &[String]) -> String {
        format!(
            "add constraint {} unique ({})",
            self.quote_identifier(name),
            self.quote_columns(columns)
        )
    }

    /// Renders an `add index` fragment.
    fn add_index(&self, name: &str, columns: &[String]) -> String {
        format!(
            "add index {} ({})",
            self.quote_identifier(name),
            self.quote_columns(columns)
        )
    }

    /// Renders the fragment that drops the foreign key on a column.
    fn drop_foreign_key(&self, table: &str, name: &str) -> String;

    /// Renders the fragment that drops an index by name.
    fn drop_index(&self, name: &str) -> String {
        format!("drop index {}", self.quote_identifier(name))
    }

    /// Renders the fragment that drops the primary key.
    fn drop_primary(&self, table: &str) -> String;

    /// Renders a table rename statement.
    fn rename_table(&self, from: &str, to: &str) -> String;

    /// Renders a table drop statement.
    fn drop_table(&self, table: &str) -> String {
        format!("drop table {}", self.quote_table(table))
    }

    /// Renders a guarded table drop statement.
    fn drop_table_if_exists(&self, table: &str) -> String {
        format!("drop table if exists {}", self.quote_table(table))
    }
}
