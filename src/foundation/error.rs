/// Convenience result type used across paperfold.
pub type SceneResult<T> = Result<T, SceneError>;

/// Top-level error taxonomy used by scene APIs.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Invalid user-provided configuration or document data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A fold/flight or navigation command that is not valid in the current phase.
    #[error("transition error: {0}")]
    Transition(String),

    /// Failures while turning an external document into pages.
    #[error("ingestion error: {0}")]
    Ingestion(String),

    /// Errors raised by an audio sink.
    #[error("audio error: {0}")]
    Audio(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneError::Transition`] value.
    pub fn transition(msg: impl Into<String>) -> Self {
        Self::Transition(msg.into())
    }

    /// Build a [`SceneError::Ingestion`] value.
    pub fn ingestion(msg: impl Into<String>) -> Self {
        Self::Ingestion(msg.into())
    }

    /// Build a [`SceneError::Audio`] value.
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Build a [`SceneError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
