//! Selection of the example split under observation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The data split whose predictions are analysed.
///
/// Parsing is strict: only `train` and `test` (any case) are accepted.
///
/// # Example
///
/// ```rust
/// use misclass_core::Split;
///
/// let split: Split = "test".parse().unwrap();
/// assert!(split.is_test());
/// assert!("yes".parse::<Split>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    /// Training split.
    #[default]
    Train,
    /// Test split.
    Test,
}

impl Split {
    /// Check if this is the training split.
    #[must_use]
    pub const fn is_train(&self) -> bool {
        matches!(self, Split::Train)
    }

    /// Check if this is the test split.
    #[must_use]
    pub const fn is_test(&self) -> bool {
        matches!(self, Split::Test)
    }

    /// Human readable name used in titles, e.g. `Training Set`.
    #[must_use]
    pub const fn set_name(&self) -> &'static str {
        match self {
            Split::Train => "Training Set",
            Split::Test => "Test Set",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Split::Train => f.write_str("train"),
            Split::Test => f.write_str("test"),
        }
    }
}

impl FromStr for Split {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "train" => Ok(Split::Train),
            "test" => Ok(Split::Test),
            other => Err(CoreError::InvalidInput(format!(
                "unknown split '{}', expected 'train' or 'test'",
                other
            ))),
        }
    }
}
