//! Facade configuration.

use serde::{Deserialize, Serialize};

/// Configuration handed to the [`Schema`](crate::Schema) constructor.
///
/// This is explicit per-facade state, not process-global: two facades with
/// different configurations can coexist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Database engine the dialect registry resolves (`mysql`, `postgres`).
    pub engine: String,
    /// When false, statements are compiled and returned but never executed.
    pub execute: bool,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            engine: "mysql".to_string(),
            execute: true,
        }
    }
}

impl SchemaConfig {
    /// Sets the engine name.
    #[must_use]
    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    /// Disables execution; compiled SQL is only returned.
    #[must_use]
    pub fn dry_run(mut self) -> Self {
        self.execute = false;
        self
    }
}
