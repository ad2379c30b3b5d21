//! Error types for the schema facade.

use girder_core::DeclarationError;

/// Errors that can occur while building or applying a schema change.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The blueprint declaration itself was invalid; nothing was compiled.
    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    /// No dialect renderer is registered for the configured engine.
    #[error("no dialect renderer registered for engine '{0}'")]
    UnknownEngine(String),

    /// Database error, surfaced unchanged from the connection.
    #[error("database error: {0}")]
    Query(#[from] sqlx::Error),
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
