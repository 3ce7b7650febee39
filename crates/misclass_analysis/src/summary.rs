//! Overall error count summary.

use std::fmt;

use serde::{Deserialize, Serialize};

use misclass_core::{ensure_same_len, Label, Result};

/// Number of misclassified examples over the observed split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorSummary {
    /// Misclassified examples.
    pub num_errors: usize,
    /// Examples observed.
    pub total: usize,
}

impl ErrorSummary {
    /// Count positions where the prediction differs from the true label.
    pub fn from_labels(true_labels: &[Label], predicted_labels: &[Label]) -> Result<Self> {
        ensure_same_len("true/predicted labels", true_labels.len(), predicted_labels.len())?;
        let num_errors = true_labels
            .iter()
            .zip(predicted_labels)
            .filter(|(t, p)| t != p)
            .count();
        Ok(Self {
            num_errors,
            total: true_labels.len(),
        })
    }

    /// Fraction of correctly classified examples, `None` for an empty split.
    #[must_use]
    pub fn accuracy(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(1.0 - self.num_errors as f64 / self.total as f64)
        }
    }
}

impl fmt::Display for ErrorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Results: {} errors from {} examples (Accuracy: ",
            self.num_errors, self.total
        )?;
        match self.accuracy() {
            Some(acc) => write!(f, "{:?})", acc),
            None => f.write_str("undefined)"),
        }
    }
}
