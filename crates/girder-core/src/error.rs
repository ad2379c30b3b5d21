//! Declaration-time errors.

/// Errors raised while declaring a blueprint.
///
/// Declaration errors fail fast: a blueprint that produced one is never
/// compiled, so no partial SQL escapes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeclarationError {
    /// A drop was requested for a target kind outside
    /// `{column, index, primary, unique, foreign}`.
    #[error("type '{0}' not allowed to be dropped")]
    InvalidDropTarget(String),
}
