//! # girder-core
//!
//! Fluent, table-scoped schema blueprints compiled into dialect-specific
//! DDL.
//!
//! A [`Blueprint`] collects column declarations, index and constraint
//! commands, and foreign keys through a chaining API, then renders them into
//! a single `CREATE TABLE` or `ALTER TABLE` statement via a pluggable
//! [`DialectRenderer`](dialect::DialectRenderer). The compiler only produces
//! SQL text; fetching live schema state and executing statements belong to
//! the `girder-schema` facade.
//!
//! ```rust
//! use girder_core::Blueprint;
//! use girder_core::dialect::MySqlDialect;
//!
//! let mut table = Blueprint::create("users");
//! table.increments("id");
//! table.string("email", 255).unique();
//! table.timestamps();
//!
//! let sql = table.compile(&MySqlDialect::new(), &[]);
//! assert!(sql.contains("`email` varchar(255)"));
//! ```
//!
//! In ALTER mode the compiler classifies every declared column against an
//! ordered snapshot of the live column names (existing columns are modified,
//! new ones added), and an alteration with nothing to do compiles to an
//! empty string rather than an invalid statement.

mod blueprint;
mod column;
mod constraint;
pub mod dialect;
mod error;

pub use blueprint::{Blueprint, BlueprintMode, ColumnRef, ForeignKeyRef};
pub use column::{AlterAction, ColumnSpec, ColumnType, IndexFlag};
pub use constraint::{Command, DropKind, ForeignKeyAction, ForeignKeySpec, IndexKind};
pub use dialect::{DialectRenderer, MySqlDialect, PostgresDialect};
pub use error::DeclarationError;
