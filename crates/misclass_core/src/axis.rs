//! Which label is held fixed when bucketing errors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The label axis of an error bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Buckets keyed by the model's prediction.
    Predicted,
    /// Buckets keyed by the ground-truth label.
    True,
}

impl Axis {
    /// The opposite axis.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Axis::Predicted => Axis::True,
            Axis::True => Axis::Predicted,
        }
    }

    /// Capitalized name used in menus and titles.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Axis::Predicted => "Predicted",
            Axis::True => "True",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Predicted => f.write_str("predicted"),
            Axis::True => f.write_str("true"),
        }
    }
}

impl FromStr for Axis {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "predicted" | "pred" => Ok(Axis::Predicted),
            "true" | "target" => Ok(Axis::True),
            other => Err(CoreError::InvalidInput(format!(
                "unknown axis '{}', expected 'predicted' or 'true'",
                other
            ))),
        }
    }
}
