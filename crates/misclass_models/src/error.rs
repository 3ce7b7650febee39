//! Error types for misclass_models.

use thiserror::Error;

/// Result type alias using [`ModelError`].
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while loading or running a model.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Invalid model definition.
    #[error("Invalid model config: {0}")]
    Config(String),

    /// Input or weight shapes do not fit the model.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Core error.
    #[error("Core error: {0}")]
    CoreError(#[from] misclass_core::CoreError),
}
