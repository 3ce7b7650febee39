//! Error types for misclass_core.

use thiserror::Error;

use crate::{Axis, Label};

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;

/// Structural errors raised while deriving error statistics.
///
/// All of them abort the analysis before any report is shown.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A true or predicted value is absent from the canonical label set.
    #[error("Unknown label {label}: not part of the canonical label set")]
    UnknownLabel {
        /// The offending label.
        label: Label,
    },

    /// Parallel arrays of differing lengths.
    #[error("Length mismatch between {what}: {left} vs {right}")]
    LengthMismatch {
        /// Description of the compared arrays.
        what: String,
        /// Length of the first array.
        left: usize,
        /// Length of the second array.
        right: usize,
    },

    /// A label with zero true and false occurrences on the given axis.
    #[error("Accuracy undefined for label {label} on the {axis} axis: label never occurs")]
    DivisionByZeroLabel {
        /// The label whose denominator is zero.
        label: Label,
        /// The axis of the report framing.
        axis: Axis,
    },

    /// The canonical label set contains the same label twice.
    #[error("Duplicate label {label} in label set")]
    DuplicateLabel {
        /// The repeated label.
        label: Label,
    },

    /// Invalid input value.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
