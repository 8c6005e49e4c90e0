/// Convenience result type used across algoviz.
pub type VizResult<T> = Result<T, VizError>;

/// Top-level error taxonomy used by generator and configuration APIs.
///
/// The playback controller never returns these once it holds a sequence; misuse there is a no-op.
#[derive(thiserror::Error, Debug)]
pub enum VizError {
    /// Malformed or out-of-contract input (unsorted binary-search array, empty value, zero speed).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Input above a visualizer's configured ceiling, or a full linear structure.
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// An operation that cannot be applied to the current state (underflow, bad index).
    #[error("operation error: {0}")]
    Operation(String),

    /// Errors when serializing or deserializing requests, sequences or configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VizError {
    /// Build a [`VizError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`VizError::LimitExceeded`] value.
    pub fn limit_exceeded(msg: impl Into<String>) -> Self {
        Self::LimitExceeded(msg.into())
    }

    /// Build a [`VizError::Operation`] value.
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    /// Build a [`VizError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for VizError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
