/// Convenience result type used across scrollreel.
pub type ScrollreelResult<T> = Result<T, ScrollreelError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Runtime robustness issues (missing targets, unready layout) are never surfaced through this
/// type; they degrade to no-ops and are logged. Errors are reserved for invalid input data and
/// API misuse.
#[derive(thiserror::Error, Debug)]
pub enum ScrollreelError {
    /// Invalid user-provided page, section or timeline data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while binding or driving animation timelines.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollreelError {
    /// Build a [`ScrollreelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollreelError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ScrollreelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
