/// Convenience result type used across the crate.
pub type ConfettiResult<T> = Result<T, ConfettiError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Bursts are best-effort: content that cannot be drawn degrades to an empty sprite instead of
/// surfacing here. Errors are reserved for structurally invalid inputs.
#[derive(thiserror::Error, Debug)]
pub enum ConfettiError {
    /// Invalid caller-provided data or a lifecycle call made in the wrong state.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while validating or sampling keyframes and timelines.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while rasterizing sprites or compositing frames.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConfettiError {
    /// Build a [`ConfettiError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ConfettiError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ConfettiError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ConfettiError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
