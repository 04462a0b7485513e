/// Convenience result type used across the crate.
pub type ShimmerResult<T> = Result<T, ShimmerError>;

/// Top-level error taxonomy used by the generator and its hosts.
#[derive(thiserror::Error, Debug)]
pub enum ShimmerError {
    /// The current selection cannot be turned into a shimmer.
    #[error("selection error: {0}")]
    Selection(String),

    /// A font could not be loaded or applied.
    #[error("font error: {0}")]
    Font(String),

    /// The host rejected a scene operation (missing node, wrong node kind, ...).
    #[error("host error: {0}")]
    Host(String),

    /// Invalid user-provided configuration or document data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShimmerError {
    /// Build a [`ShimmerError::Selection`] value.
    pub fn selection(msg: impl Into<String>) -> Self {
        Self::Selection(msg.into())
    }

    /// Build a [`ShimmerError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`ShimmerError::Host`] value.
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }

    /// Build a [`ShimmerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShimmerError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ShimmerError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
