//! Migrator error types.

use crate::config::ConfigError;
use crate::templates::TemplateError;
use crate::tracker::TrackerError;

/// Errors that stop a move.
#[derive(Debug, thiserror::Error)]
pub enum MoveError {
    /// The migrator was not configured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A tracker request failed. Fatal to the whole run.
    #[error(transparent)]
    Transport(#[from] TrackerError),

    /// A body template failed to render.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl MoveError {
    /// Returns true if the error was raised before any tracker call.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
