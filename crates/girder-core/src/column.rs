//! Column specifications.
//!
//! A [`ColumnSpec`] is the immutable description of a single column that a
//! [`Blueprint`](crate::Blueprint) accumulates: its semantic type, the
//! modifier set, inline index flags, and (in ALTER mode) the add/modify
//! classification decided against the live table.

/// Semantic column type, with type parameters carried in the variant.
///
/// Dialect renderers map each variant to engine-specific SQL; unknown types
/// pass through [`ColumnType::Custom`] verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    /// Boolean flag.
    Boolean,
    /// Variable-length string with a maximum length.
    String {
        /// Maximum character length.
        max_length: u32,
    },
    /// Plain integer.
    Integer,
    /// Unbounded text.
    Text,
    /// Fixed-length character string.
    Char {
        /// Character length.
        max_length: u32,
    },
    /// Single-precision floating point. A zero part means "unset".
    Float {
        /// Total digit count.
        total: u32,
        /// Digits after the decimal point.
        places: u32,
    },
    /// Double-precision floating point. A zero part means "unset".
    Double {
        /// Total digit count.
        total: u32,
        /// Digits after the decimal point.
        places: u32,
    },
    /// Exact decimal.
    Decimal {
        /// Total digit count.
        total: u32,
        /// Digits after the decimal point.
        places: u32,
    },
    /// Enumeration over a fixed, ordered set of string values.
    Enum {
        /// Allowed values, in declaration order.
        allowed: Vec<String>,
    },
    /// Calendar date.
    Date,
    /// Date and time.
    Datetime,
    /// Time of day.
    Time,
    /// Timestamp.
    Timestamp,
    /// Binary blob.
    Binary,
    /// Raw type token, passed through to the renderer verbatim.
    Custom(String),
}

/// Inline index flag on a column: auto-derived or explicitly named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexFlag {
    /// Derive the index name from table, column, and kind.
    Auto,
    /// Use the given index name.
    Named(String),
}

/// How a column participates in an ALTER statement.
///
/// Assigned during compilation by comparing declared column names against
/// the live table; never set in CREATE mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlterAction {
    /// The column does not exist yet and is added.
    Add,
    /// The column exists and is modified in place.
    Modify,
}

/// A fully declared column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column name.
    pub name: String,
    /// Semantic type.
    pub ty: ColumnType,
    /// Whether the column is unsigned.
    pub unsigned: bool,
    /// Tri-state nullability: unset, explicitly null, explicitly not null.
    pub nullable: Option<bool>,
    /// Default value, rendered as a quoted literal when non-empty.
    pub default: Option<String>,
    /// Whether the column auto-increments.
    pub auto_increment: bool,
    /// Column comment.
    pub comment: Option<String>,
    /// Ordering hint: place this column after the named one.
    pub after: Option<String>,
    /// Inline primary-key flag.
    pub primary: Option<IndexFlag>,
    /// Inline unique-key flag.
    pub unique: Option<IndexFlag>,
    /// Inline plain-index flag.
    pub index: Option<IndexFlag>,
    /// ALTER classification, populated during compilation.
    pub alter_action: Option<AlterAction>,
}

impl ColumnSpec {
    /// Creates a column spec with no modifiers set.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
            unsigned: false,
            nullable: None,
            default: None,
            auto_increment: false,
            comment: None,
            after: None,
            primary: None,
            unique: None,
            index: None,
            alter_action: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_column_has_no_modifiers() {
        let col = ColumnSpec::new("age", ColumnType::Integer);
        assert_eq!(col.name, "age");
        assert_eq!(col.ty, ColumnType::Integer);
        assert!(!col.unsigned);
        assert_eq!(col.nullable, None);
        assert_eq!(col.default, None);
        assert!(!col.auto_increment);
        assert_eq!(col.alter_action, None);
    }

    #[test]
    fn enum_type_preserves_declaration_order() {
        let ty = ColumnType::Enum {
            allowed: vec!["a".into(), "b".into(), "c".into()],
        };
        match ty {
            ColumnType::Enum { allowed } => assert_eq!(allowed, ["a", "b", "c"]),
            _ => unreachable!(),
        }
    }
}
