//! Table-scoped schema blueprints.
//!
//! A [`Blueprint`] accumulates column declarations, index/constraint
//! commands, and foreign key relationships for a single table, then compiles
//! them into one DDL statement through a [`DialectRenderer`].
//!
//! Declaration methods hand back lightweight handles ([`ColumnRef`],
//! [`ForeignKeyRef`]) so modifier calls always address the entry they were
//! created for:
//!
//! ```rust
//! use girder_core::Blueprint;
//! use girder_core::dialect::MySqlDialect;
//!
//! let mut table = Blueprint::create("users");
//! table.increments("id");
//! table.string("email", 255).nullable();
//! table.timestamps();
//!
//! let sql = table.compile(&MySqlDialect::new(), &[]);
//! assert!(sql.starts_with("create table `users`"));
//! ```

use crate::column::{AlterAction, ColumnSpec, ColumnType, IndexFlag};
use crate::constraint::{Command, DropKind, ForeignKeyAction, ForeignKeySpec, IndexKind};
use crate::dialect::DialectRenderer;
use crate::error::DeclarationError;

/// Whether the blueprint creates a new table or alters an existing one.
///
/// Fixed at construction; there are no other temporal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlueprintMode {
    /// Emit a `CREATE TABLE` statement; every column is fresh.
    Create,
    /// Emit an `ALTER TABLE` statement; columns are classified add/modify
    /// against the live table.
    Alter,
}

/// Table-level statement that bypasses column and constraint compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SingleStatement {
    RenameTable { from: String, to: String },
    DropTable,
    DropTableIfExists,
}

/// Accumulator for one table's schema declarations.
#[derive(Debug, Clone)]
pub struct Blueprint {
    table: String,
    mode: BlueprintMode,
    columns: Vec<ColumnSpec>,
    foreign_keys: Vec<ForeignKeySpec>,
    commands: Vec<Command>,
    single_statement: Option<SingleStatement>,
}

impl Blueprint {
    /// Creates a blueprint in CREATE mode.
    #[must_use]
    pub fn create(table: impl Into<String>) -> Self {
        Self::new(table, BlueprintMode::Create)
    }

    /// Creates a blueprint in ALTER mode.
    #[must_use]
    pub fn alter(table: impl Into<String>) -> Self {
        Self::new(table, BlueprintMode::Alter)
    }

    fn new(table: impl Into<String>, mode: BlueprintMode) -> Self {
        Self {
            table: table.into(),
            mode,
            columns: Vec::new(),
            foreign_keys: Vec::new(),
            commands: Vec::new(),
            single_statement: None,
        }
    }

    /// Returns the table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the operation mode.
    #[must_use]
    pub fn mode(&self) -> BlueprintMode {
        self.mode
    }

    /// Returns the declared columns, in order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    // =========================================================================
    // Column declarations
    // =========================================================================

    fn add_column(&mut self, name: &str, ty: ColumnType) -> ColumnRef<'_> {
        self.columns.push(ColumnSpec::new(name, ty));
        let index = self.columns.len() - 1;
        ColumnRef {
            blueprint: self,
            index,
        }
    }

    /// Declares a boolean column.
    pub fn boolean(&mut self, name: &str) -> ColumnRef<'_> {
        self.add_column(name, ColumnType::Boolean)
    }

    /// Declares a variable-length string column.
    pub fn string(&mut self, name: &str, max_length: u32) -> ColumnRef<'_> {
        self.add_column(name, ColumnType::String { max_length })
    }

    /// Declares an integer column.
    pub fn integer(&mut self, name: &str) -> ColumnRef<'_> {
        self.add_column(name, ColumnType::Integer)
    }

    /// Declares a text column.
    pub fn text(&mut self, name: &str) -> ColumnRef<'_> {
        self.add_column(name, ColumnType::Text)
    }

    /// Declares a fixed-length character column.
    pub fn char(&mut self, name: &str, max_length: u32) -> ColumnRef<'_> {
        self.add_column(name, ColumnType::Char { max_length })
    }

    /// Declares a float column with the conventional 8,2 sizing.
    pub fn float(&mut self, name: &str) -> ColumnRef<'_> {
        self.add_column(
            name,
            ColumnType::Float {
                total: 8,
                places: 2,
            },
        )
    }

    /// Declares a double column without explicit sizing.
    pub fn double(&mut self, name: &str) -> ColumnRef<'_> {
        self.add_column(
            name,
            ColumnType::Double {
                total: 0,
                places: 0,
            },
        )
    }

    /// Declares a double column with explicit total digits and places.
    pub fn double_sized(&mut self, name: &str, total: u32, places: u32) -> ColumnRef<'_> {
        self.add_column(name, ColumnType::Double { total, places })
    }

    /// Declares a decimal column.
    pub fn decimal(&mut self, name: &str, total: u32, places: u32) -> ColumnRef<'_> {
        self.add_column(name, ColumnType::Decimal { total, places })
    }

    /// Declares an enum column over an ordered set of allowed values.
    pub fn enumeration(&mut self, name: &str, allowed: &[&str]) -> ColumnRef<'_> {
        let allowed = allowed.iter().map(ToString::to_string).collect();
        self.add_column(name, ColumnType::Enum { allowed })
    }

    /// Declares a date column.
    pub fn date(&mut self, name: &str) -> ColumnRef<'_> {
        self.add_column(name, ColumnType::Date)
    }

    /// Declares a datetime column.
    pub fn datetime(&mut self, name: &str) -> ColumnRef<'_> {
        self.add_column(name, ColumnType::Datetime)
    }

    /// Declares a time column.
    pub fn time(&mut self, name: &str) -> ColumnRef<'_> {
        self.add_column(name, ColumnType::Time)
    }

    /// Declares a timestamp column.
    pub fn timestamp(&mut self, name: &str) -> ColumnRef<'_> {
        self.add_column(name, ColumnType::Timestamp)
    }

    /// Declares a binary column.
    pub fn binary(&mut self, name: &str) -> ColumnRef<'_> {
        self.add_column(name, ColumnType::Binary)
    }

    /// Declares a column with a raw type token the renderer passes through
    /// verbatim.
    pub fn custom(&mut self, name: &str, raw_type: &str) -> ColumnRef<'_> {
        self.add_column(name, ColumnType::Custom(raw_type.to_string()))
    }

    /// Declares an unsigned auto-incrementing primary-key integer column.
    pub fn increments(&mut self, name: &str) -> ColumnRef<'_> {
        self.integer(name).auto_increment().unsigned().primary()
    }

    /// Declares the conventional `created_at`/`updated_at` timestamp pair.
    pub fn timestamps(&mut self) -> &mut Self {
        self.timestamp("created_at");
        self.timestamp("updated_at");
        self
    }

    // =========================================================================
    // Indexes and constraints
    // =========================================================================

    fn index_command(
        &mut self,
        kind: IndexKind,
        columns: &[&str],
        name: Option<String>,
    ) -> &mut Self {
        let columns: Vec<String> = columns.iter().map(ToString::to_string).collect();
        let name = name.unwrap_or_else(|| derive_index_name(&self.table, &columns, kind));
        self.commands.push(Command::Index {
            kind,
            name,
            columns,
        });
        self
    }

    /// Registers a primary key over the given columns.
    pub fn primary(&mut self, columns: &[&str]) -> &mut Self {
        self.index_command(IndexKind::Primary, columns, None)
    }

    /// Registers a named primary key over the given columns.
    pub fn primary_named(&mut self, name: impl Into<String>, columns: &[&str]) -> &mut Self {
        self.index_command(IndexKind::Primary, columns, Some(name.into()))
    }

    /// Registers a unique key over the given columns.
    pub fn unique(&mut self, columns: &[&str]) -> &mut Self {
        self.index_command(IndexKind::Unique, columns, None)
    }

    /// Registers a named unique key over the given columns.
    pub fn unique_named(&mut self, name: impl Into<String>, columns: &[&str]) -> &mut Self {
        self.index_command(IndexKind::Unique, columns, Some(name.into()))
    }

    /// Registers a plain index over the given columns.
    pub fn index(&mut self, columns: &[&str]) -> &mut Self {
        self.index_command(IndexKind::Index, columns, None)
    }

    /// Registers a named plain index over the given columns.
    pub fn index_named(&mut self, name: impl Into<String>, columns: &[&str]) -> &mut Self {
        self.index_command(IndexKind::Index, columns, Some(name.into()))
    }

    /// Starts a foreign key on the given local column.
    ///
    /// A table holds at most one foreign key per local column; declaring the
    /// same column again resets the earlier entry.
    pub fn foreign(&mut self, column: &str) -> ForeignKeyRef<'_> {
        let index = match self.foreign_keys.iter().position(|fk| fk.column == column) {
            Some(pos) => {
                self.foreign_keys[pos] = ForeignKeySpec::new(column);
                pos
            }
            None => {
                self.foreign_keys.push(ForeignKeySpec::new(column));
                self.foreign_keys.len() - 1
            }
        };
        ForeignKeyRef {
            blueprint: self,
            index,
        }
    }

    // =========================================================================
    // Drops and renames
    // =========================================================================

    fn push_drop(&mut self, kind: DropKind, columns: &[&str]) -> &mut Self {
        self.commands.push(Command::Drop {
            kind,
            columns: columns.iter().map(ToString::to_string).collect(),
        });
        self
    }

    /// Requests a drop of the given target kind.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::InvalidDropTarget`] for kinds outside
    /// `{column, index, primary, unique, foreign}`.
    pub fn drop(&mut self, kind: &str, columns: &[&str]) -> Result<&mut Self, DeclarationError> {
        let kind = kind
            .parse::<DropKind>()
            .map_err(|()| DeclarationError::InvalidDropTarget(kind.to_string()))?;
        Ok(self.push_drop(kind, columns))
    }

    /// Drops a column.
    pub fn drop_column(&mut self, column: &str) -> &mut Self {
        self.push_drop(DropKind::Column, &[column])
    }

    /// Drops a plain index by name.
    pub fn drop_index(&mut self, name: &str) -> &mut Self {
        self.push_drop(DropKind::Index, &[name])
    }

    /// Drops a unique key by name.
    pub fn drop_unique(&mut self, name: &str) -> &mut Self {
        self.push_drop(DropKind::Unique, &[name])
    }

    /// Drops the primary key.
    pub fn drop_primary(&mut self) -> &mut Self {
        self.push_drop(DropKind::Primary, &[])
    }

    /// Drops the foreign key on the given local column.
    pub fn drop_foreign(&mut self, column: &str) -> &mut Self {
        self.push_drop(DropKind::Foreign, &[column])
    }

    /// Records a rename placeholder.
    ///
    /// No dispatch arm consumes it, so a blueprint holding only renames
    /// compiles to an empty statement.
    pub fn rename(&mut self, from: &str, to: &str) -> &mut Self {
        self.commands.push(Command::Rename {
            from: from.to_string(),
            to: to.to_string(),
        });
        self
    }

    // =========================================================================
    // Table-level single statements
    // =========================================================================

    /// Replaces compilation output with a table rename.
    pub fn rename_table(&mut self, from: &str, to: &str) -> &mut Self {
        self.single_statement = Some(SingleStatement::RenameTable {
            from: from.to_string(),
            to: to.to_string(),
        });
        self
    }

    /// Replaces compilation output with a table drop.
    pub fn drop_table(&mut self) -> &mut Self {
        self.single_statement = Some(SingleStatement::DropTable);
        self
    }

    /// Replaces compilation output with a guarded table drop.
    pub fn drop_table_if_exists(&mut self) -> &mut Self {
        self.single_statement = Some(SingleStatement::DropTableIfExists);
        self
    }

    // =========================================================================
    // Compilation
    // =========================================================================

    /// Compiles the accumulated declarations into one SQL statement.
    ///
    /// `existing` is the ordered list of live column names, used in ALTER
    /// mode to classify each declared column as add or modify; CREATE mode
    /// ignores it. The output is deterministic for a given declaration
    /// sequence and snapshot. A no-op ALTER compiles to an empty string.
    ///
    /// A pending table-level statement ([`Self::rename_table`],
    /// [`Self::drop_table`], [`Self::drop_table_if_exists`]) short-circuits
    /// everything else.
    #[must_use]
    pub fn compile(&mut self, dialect: &dyn DialectRenderer, existing: &[String]) -> String {
        if let Some(single) = &self.single_statement {
            return match single {
                SingleStatement::RenameTable { from, to } => dialect.rename_table(from, to),
                SingleStatement::DropTable => dialect.drop_table(&self.table),
                SingleStatement::DropTableIfExists => dialect.drop_table_if_exists(&self.table),
            };
        }

        // Tables are never created empty.
        if self.mode == BlueprintMode::Create && self.columns.is_empty() {
            self.increments("id");
        }

        self.normalize_inline_indexes();

        match self.mode {
            BlueprintMode::Alter => self.compile_alter(dialect, existing),
            BlueprintMode::Create => self.compile_create(dialect),
        }
    }

    /// Converts inline index flags into buffered index commands.
    ///
    /// Flags are checked in priority order primary > unique > index and only
    /// the first match per column is honored.
    fn normalize_inline_indexes(&mut self) {
        let mut pending = Vec::new();
        for col in &self.columns {
            for (kind, flag) in [
                (IndexKind::Primary, &col.primary),
                (IndexKind::Unique, &col.unique),
                (IndexKind::Index, &col.index),
            ] {
                match flag {
                    Some(IndexFlag::Auto) => {
                        pending.push((kind, col.name.clone(), None));
                        break;
                    }
                    Some(IndexFlag::Named(name)) => {
                        pending.push((kind, col.name.clone(), Some(name.clone())));
                        break;
                    }
                    None => {}
                }
            }
        }
        for (kind, column, name) in pending {
            self.index_command(kind, &[column.as_str()], name);
        }
    }

    fn compile_alter(&mut self, dialect: &dyn DialectRenderer, existing: &[String]) -> String {
        for col in &mut self.columns {
            col.alter_action = Some(if existing.iter().any(|name| *name == col.name) {
                AlterAction::Modify
            } else {
                AlterAction::Add
            });
        }

        let columns = self.column_fragments(dialect);
        let constraints = self.constraint_fragments(dialect);

        // Nothing to do is a valid result, not an error.
        if columns.is_empty() && constraints.is_empty() {
            return String::new();
        }

        let mut sql = format!("alter table {}", dialect.quote_table(&self.table));
        if !columns.is_empty() {
            sql.push_str(" (");
            sql.push_str(&columns.join(", "));
            sql.push(')');
        }
        if !constraints.is_empty() {
            sql.push(' ');
            sql.push_str(&constraints.join(" "));
        }
        sql
    }

    fn compile_create(&mut self, dialect: &dyn DialectRenderer) -> String {
        let columns = self.column_fragments(dialect);
        let constraints = self.constraint_fragments(dialect);

        let mut sql = format!(
            "create table {} ({})",
            dialect.quote_table(&self.table),
            columns.join(", ")
        );
        if !constraints.is_empty() {
            sql.push(' ');
            sql.push_str(&constraints.join(" "));
        }
        sql
    }

    /// Renders one fragment per declared column, then one `drop` fragment
    /// per column named in a drop-column command.
    fn column_fragments(&self, dialect: &dyn DialectRenderer) -> Vec<String> {
        let alter = self.mode == BlueprintMode::Alter;
        let mut fragments = Vec::new();

        for col in &self.columns {
            let mut sql = String::new();
            if alter {
                match col.alter_action {
                    Some(AlterAction::Add) => sql.push_str("add "),
                    // CHANGE repeats the old name ahead of the definition.
                    Some(AlterAction::Modify) => {
                        sql.push_str("change ");
                        sql.push_str(&dialect.quote_identifier(&col.name));
                    }
                    None => {}
                }
            }
            sql.push_str(&dialect.quote_identifier(&col.name));
            sql.push(' ');
            sql.push_str(&dialect.column_type(col));
            sql.push_str(&dialect.column_modifiers(col));
            if alter {
                if let Some(after) = &col.after {
                    sql.push_str(" after ");
                    sql.push_str(&dialect.quote_identifier(after));
                }
            }
            fragments.push(sql);
        }

        for command in &self.commands {
            if let Command::Drop {
                kind: DropKind::Column,
                columns,
            } = command
            {
                for column in columns {
                    fragments.push(format!("drop {}", dialect.quote_identifier(column)));
                }
            }
        }

        fragments
    }

    /// Renders foreign keys first, then the buffered commands in order.
    fn constraint_fragments(&self, dialect: &dyn DialectRenderer) -> Vec<String> {
        let mut fragments = Vec::new();

        for fk in &self.foreign_keys {
            fragments.push(dialect.add_foreign_key(&self.table, fk));
        }

        for command in &self.commands {
            match command {
                Command::Drop {
                    kind: DropKind::Foreign,
                    columns,
                } => {
                    for column in columns {
                        fragments.push(dialect.drop_foreign_key(&self.table, column));
                    }
                }
                Command::Drop {
                    kind: DropKind::Index | DropKind::Unique,
                    columns,
                } => {
                    for name in columns {
                        fragments.push(dialect.drop_index(name));
                    }
                }
                Command::Drop {
                    kind: DropKind::Primary,
                    ..
                } => fragments.push(dialect.drop_primary(&self.table)),
                // Dropped columns render inside the column list.
                Command::Drop {
                    kind: DropKind::Column,
                    ..
                } => {}
                Command::Index {
                    kind: IndexKind::Primary,
                    columns,
                    ..
                } => fragments.push(dialect.add_primary(columns)),
                Command::Index {
                    kind: IndexKind::Unique,
                    name,
                    columns,
                } => fragments.push(dialect.add_unique(name, columns)),
                Command::Index {
                    kind: IndexKind::Index,
                    name,
                    columns,
                } => fragments.push(dialect.add_index(name, columns)),
                // No DDL counterpart; skipped.
                Command::Rename { .. } => {}
            }
        }

        fragments
    }
}

/// Derives a deterministic index name from table, columns, and kind.
fn derive_index_name(table: &str, columns: &[String], kind: IndexKind) -> String {
    format!("key_{}_{}_{}", table, columns.join("_"), kind.as_str())
        .to_lowercase()
        .replace(['-', '.'], "_")
}

// =============================================================================
// Declaration handles
// =============================================================================

/// Handle to a just-declared column.
///
/// Modifier calls address this column regardless of what else is declared on
/// the blueprint afterwards.
#[derive(Debug)]
pub struct ColumnRef<'a> {
    blueprint: &'a mut Blueprint,
    index: usize,
}

impl ColumnRef<'_> {
    fn spec(&mut self) -> &mut ColumnSpec {
        &mut self.blueprint.columns[self.index]
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.blueprint.columns[self.index].name
    }

    /// Marks the column nullable.
    pub fn nullable(mut self) -> Self {
        self.spec().nullable = Some(true);
        self
    }

    /// Marks the column unsigned.
    pub fn unsigned(mut self) -> Self {
        self.spec().unsigned = true;
        self
    }

    /// Marks the column auto-incrementing.
    pub fn auto_increment(mut self) -> Self {
        self.spec().auto_increment = true;
        self
    }

    /// Sets the default value, rendered as a quoted literal when non-empty.
    pub fn default_to(mut self, value: impl Into<String>) -> Self {
        self.spec().default = Some(value.into());
        self
    }

    /// Sets the column comment.
    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.spec().comment = Some(text.into());
        self
    }

    /// Flags the column as a primary key with a derived index name.
    pub fn primary(mut self) -> Self {
        self.spec().primary = Some(IndexFlag::Auto);
        self
    }

    /// Flags the column as a primary key under the given index name.
    pub fn primary_named(mut self, name: impl Into<String>) -> Self {
        self.spec().primary = Some(IndexFlag::Named(name.into()));
        self
    }

    /// Flags the column as unique with a derived index name.
    pub fn unique(mut self) -> Self {
        self.spec().unique = Some(IndexFlag::Auto);
        self
    }

    /// Flags the column as unique under the given index name.
    pub fn unique_named(mut self, name: impl Into<String>) -> Self {
        self.spec().unique = Some(IndexFlag::Named(name.into()));
        self
    }

    /// Flags the column for a plain index with a derived name.
    pub fn index(mut self) -> Self {
        self.spec().index = Some(IndexFlag::Auto);
        self
    }

    /// Flags the column for a plain index under the given name.
    pub fn index_named(mut self, name: impl Into<String>) -> Self {
        self.spec().index = Some(IndexFlag::Named(name.into()));
        self
    }

    /// Positions the column after the named one.
    ///
    /// In ALTER mode the hint is rendered as ` after <reference>`; in CREATE
    /// mode the column physically moves to the slot behind the reference.
    /// An unknown reference leaves the order unchanged.
    pub fn after(self, reference: &str) -> Self {
        let Self { blueprint, index } = self;
        match blueprint.mode {
            BlueprintMode::Alter => {
                blueprint.columns[index].after = Some(reference.to_string());
                Self { blueprint, index }
            }
            BlueprintMode::Create => {
                match blueprint.columns.iter().position(|c| c.name == reference) {
                    Some(pos) if pos != index => {
                        let col = blueprint.columns.remove(index);
                        let dest = if pos < index { pos + 1 } else { pos };
                        blueprint.columns.insert(dest, col);
                        Self {
                            blueprint,
                            index: dest,
                        }
                    }
                    _ => Self { blueprint, index },
                }
            }
        }
    }
}

/// Handle to a foreign key under declaration.
#[derive(Debug)]
pub struct ForeignKeyRef<'a> {
    blueprint: &'a mut Blueprint,
    index: usize,
}

impl ForeignKeyRef<'_> {
    fn spec(&mut self) -> &mut ForeignKeySpec {
        &mut self.blueprint.foreign_keys[self.index]
    }

    /// Sets the referenced column on the target table.
    pub fn references(mut self, column: &str) -> Self {
        self.spec().references = Some(column.to_string());
        self
    }

    /// Sets the target table.
    pub fn on(mut self, table: &str) -> Self {
        self.spec().on = Some(table.to_string());
        self
    }

    /// Sets the on-delete action; unknown actions fall back to `no action`.
    pub fn on_delete(mut self, action: &str) -> Self {
        self.spec().on_delete = ForeignKeyAction::parse_lenient(action);
        self
    }

    /// Sets the on-update action; unknown actions fall back to `no action`.
    pub fn on_update(mut self, action: &str) -> Self {
        self.spec().on_update = ForeignKeyAction::parse_lenient(action);
        self
    }
}
