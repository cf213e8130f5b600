/// Convenience result type used across scrollcue.
pub type ScrollcueResult<T> = Result<T, ScrollcueError>;

/// Top-level error taxonomy used by controller and configuration APIs.
///
/// Runtime degradations (missing host capability, rejected playback, an empty
/// target set) are reported as values, never as errors.
#[derive(thiserror::Error, Debug)]
pub enum ScrollcueError {
    /// Invalid registration input (duplicate ids, double registration).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid option values (margins, thresholds, delays).
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollcueError {
    /// Build a [`ScrollcueError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollcueError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ScrollcueError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Reason a media handle refused to start playback.
///
/// Autoplay policies reject `play()` routinely; controllers treat this as a
/// deferral rather than a failure.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackError {
    /// The platform's autoplay policy refused the request.
    #[error("playback not allowed: {0}")]
    NotAllowed(String),

    /// The request was interrupted (for example by a concurrent `pause`).
    #[error("playback aborted: {0}")]
    Aborted(String),

    /// The element has no playable source yet.
    #[error("no playable source")]
    NoSource,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
