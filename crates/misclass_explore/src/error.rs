//! Error types for misclass_explore.

use thiserror::Error;

/// Result type alias using [`ExploreError`].
pub type Result<T> = std::result::Result<T, ExploreError>;

/// Errors that end an exploration session.
///
/// Invalid menu input is never one of them: it is re-prompted.
#[derive(Error, Debug)]
pub enum ExploreError {
    /// Console or renderer output failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The renderer could not draw the request.
    #[error("Render error: {0}")]
    Render(String),

    /// Example lookup failed.
    #[error("Data error: {0}")]
    DataError(#[from] misclass_data::DataError),

    /// Core error.
    #[error("Core error: {0}")]
    CoreError(#[from] misclass_core::CoreError),
}
