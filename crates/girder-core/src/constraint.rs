//! Constraint specifications and buffered commands.

use std::str::FromStr;

/// Foreign key referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForeignKeyAction {
    /// No action.
    #[default]
    NoAction,
    /// Restrict deletion/update.
    Restrict,
    /// Cascade the operation.
    Cascade,
    /// Set to NULL.
    SetNull,
    /// Set to the default value.
    SetDefault,
}

impl ForeignKeyAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "no action",
            Self::Restrict => "restrict",
            Self::Cascade => "cascade",
            Self::SetNull => "set null",
            Self::SetDefault => "set default",
        }
    }

    /// Parses an action leniently, falling back to `no action` for anything
    /// outside the allowed set.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for ForeignKeyAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "no action" => Ok(Self::NoAction),
            "restrict" => Ok(Self::Restrict),
            "cascade" => Ok(Self::Cascade),
            "set null" => Ok(Self::SetNull),
            "set default" => Ok(Self::SetDefault),
            _ => Err(()),
        }
    }
}

/// A foreign key relationship, keyed by its local column.
///
/// A blueprint holds at most one spec per local column; redeclaring the same
/// column resets the entry in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeySpec {
    /// Local column name.
    pub column: String,
    /// Referenced column on the target table.
    pub references: Option<String>,
    /// Target table.
    pub on: Option<String>,
    /// Action on delete.
    pub on_delete: ForeignKeyAction,
    /// Action on update.
    pub on_update: ForeignKeyAction,
}

impl ForeignKeySpec {
    /// Creates a spec for the given local column with default actions.
    #[must_use]
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            references: None,
            on: None,
            on_delete: ForeignKeyAction::NoAction,
            on_update: ForeignKeyAction::NoAction,
        }
    }
}

/// Index kinds a blueprint can register, in inline-flag priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// Primary key.
    Primary,
    /// Unique key.
    Unique,
    /// Plain index.
    Index,
}

impl IndexKind {
    /// Returns the suffix used in derived index names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Unique => "unique",
            Self::Index => "index",
        }
    }
}

/// Targets that can be dropped from a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropKind {
    /// A column.
    Column,
    /// A plain index.
    Index,
    /// The primary key.
    Primary,
    /// A unique key.
    Unique,
    /// A foreign key.
    Foreign,
}

impl FromStr for DropKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "column" => Ok(Self::Column),
            "index" => Ok(Self::Index),
            "primary" => Ok(Self::Primary),
            "unique" => Ok(Self::Unique),
            "foreign" => Ok(Self::Foreign),
            _ => Err(()),
        }
    }
}

/// A buffered schema command, processed by name dispatch during compilation.
///
/// Commands with no DDL counterpart (currently [`Command::Rename`]) are
/// skipped silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Drop the named targets.
    Drop {
        /// What kind of target is dropped.
        kind: DropKind,
        /// Target names (columns, or index names for index-like kinds).
        columns: Vec<String>,
    },
    /// Add an index of the given kind.
    Index {
        /// Index kind.
        kind: IndexKind,
        /// Index name (ignored for primary keys).
        name: String,
        /// Indexed columns, in order.
        columns: Vec<String>,
    },
    /// Rename placeholder; no dispatch arm consumes it.
    Rename {
        /// Current name.
        from: String,
        /// New name.
        to: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_round_trips_allowed_values() {
        for (s, action) in [
            ("cascade", ForeignKeyAction::Cascade),
            ("restrict", ForeignKeyAction::Restrict),
            ("set null", ForeignKeyAction::SetNull),
            ("set default", ForeignKeyAction::SetDefault),
            ("no action", ForeignKeyAction::NoAction),
        ] {
            assert_eq!(ForeignKeyAction::parse_lenient(s), action);
            assert_eq!(action.as_sql(), s);
        }
    }

    #[test]
    fn unknown_action_falls_back_to_no_action() {
        assert_eq!(
            ForeignKeyAction::parse_lenient("invalid_value"),
            ForeignKeyAction::NoAction
        );
        assert_eq!(
            ForeignKeyAction::parse_lenient(""),
            ForeignKeyAction::NoAction
        );
    }

    #[test]
    fn action_parse_is_case_insensitive() {
        assert_eq!(
            ForeignKeyAction::parse_lenient("CASCADE"),
            ForeignKeyAction::Cascade
        );
    }

    #[test]
    fn drop_kind_rejects_unknown_targets() {
        assert!("table".parse::<DropKind>().is_err());
        assert_eq!("foreign".parse::<DropKind>(), Ok(DropKind::Foreign));
    }
}
