//! # girder-schema
//!
//! Schema facade over the `girder-core` blueprint compiler: it wires a
//! blueprint to a live database connection and a dialect renderer, executes
//! the compiled DDL, and answers table/column existence checks.
//!
//! ```rust,ignore
//! use girder_schema::prelude::*;
//!
//! let pool = sqlx::MySqlPool::connect(&database_url).await?;
//! let schema = Schema::new(pool, SchemaConfig::default())?;
//!
//! schema
//!     .create("users", |t| {
//!         t.increments("id");
//!         t.string("email", 255).unique();
//!         t.timestamps();
//!     })
//!     .await?;
//!
//! schema
//!     .alter("users", |t| {
//!         t.string("phone", 32).nullable().after("email");
//!         t.drop_column("legacy");
//!     })
//!     .await?;
//! ```
//!
//! Set [`SchemaConfig::dry_run`] to compile statements without executing
//! them; the rendered SQL always comes back in the
//! [`CompiledResult`](crate::schema::CompiledResult).

pub mod config;
pub mod connection;
pub mod error;
pub mod schema;

pub use config::SchemaConfig;
pub use connection::{LiveColumn, SchemaConnection};
pub use error::{Result, SchemaError};
pub use schema::{dialect_for, CompiledResult, Schema};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::SchemaConfig;
    pub use crate::connection::{LiveColumn, SchemaConnection};
    pub use crate::error::{Result, SchemaError};
    pub use crate::schema::{CompiledResult, Schema};
    pub use girder_core::dialect::{DialectRenderer, MySqlDialect, PostgresDialect};
    pub use girder_core::{Blueprint, BlueprintMode};
}
