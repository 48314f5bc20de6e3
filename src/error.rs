//! Error types.

use thiserror::Error;

/// Errors raised while configuring reveal triggers and animations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RevealError {
    /// Threshold was outside `[0, 1]` or not a number.
    #[error("threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f32),

    /// Root margin expression could not be parsed.
    #[error("invalid root margin {input:?}: {reason}")]
    InvalidMargin {
        /// The rejected expression.
        input: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// Animation variant name is not one of the seven presets.
    #[error("unknown animation variant {0:?}")]
    UnknownVariant(String),
}

/// Errors raised by the terminal stage and its actors.
#[derive(Debug, Error)]
pub enum StageError {
    /// Terminal I/O failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// An actor thread could not be spawned.
    #[error("failed to spawn {name} thread: {source}")]
    Spawn {
        /// Thread name.
        name: &'static str,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// An actor hung up its channel unexpectedly.
    #[error("{0} channel disconnected")]
    Disconnected(&'static str),

    /// Invalid reveal configuration.
    #[error(transparent)]
    Reveal(#[from] RevealError),
}

/// Result alias for stage operations.
pub type Result<T, E = StageError> = std::result::Result<T, E>;
