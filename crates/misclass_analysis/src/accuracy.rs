//! Per-label accuracy in the two error framings.
//!
//! For a label at position `i`, the true count is the diagonal cell and the
//! false count is the size of the label's error bucket on the framing's axis:
//!
//! - "confused by another value": bucket keyed by true label
//! - "mistakenly chosen": bucket keyed by predicted label

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use misclass_core::{Axis, CoreError, Label, Result};

use crate::confusion::ConfusionMatrix;
use crate::errors::ErrorIndex;

/// What to do with a label whose accuracy denominator is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AbsentLabelPolicy {
    /// Abort with [`CoreError::DivisionByZeroLabel`].
    #[default]
    Fail,
    /// Leave the label out of the framing.
    Skip,
    /// Keep the label with an undefined accuracy.
    Undefined,
}

impl FromStr for AbsentLabelPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fail" => Ok(AbsentLabelPolicy::Fail),
            "skip" => Ok(AbsentLabelPolicy::Skip),
            "undefined" => Ok(AbsentLabelPolicy::Undefined),
            other => Err(CoreError::InvalidInput(format!(
                "unknown absent label policy '{}', expected fail, skip or undefined",
                other
            ))),
        }
    }
}

/// Accuracy of one label in one framing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyEntry {
    /// The label.
    pub label: Label,
    /// Misclassified examples in the label's bucket.
    pub false_count: usize,
    /// Correctly classified examples of the label.
    pub true_count: usize,
    /// `true_count / (true_count + false_count)`, `None` when undefined.
    pub accuracy: Option<f64>,
}

impl fmt::Display for AccuracyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "    Label {}: {:>3} mistakes, {:>5} right answers => Accuracy: ",
            self.label, self.false_count, self.true_count
        )?;
        match self.accuracy {
            Some(acc) => write!(f, "{:?}", acc),
            None => f.write_str("undefined"),
        }
    }
}

/// Per-label accuracy in both framings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    /// Labels that were confused by another value (keyed by true label).
    pub confused: Vec<AccuracyEntry>,
    /// Labels that were mistakenly chosen (keyed by predicted label).
    pub mistaken: Vec<AccuracyEntry>,
}

impl AccuracyReport {
    /// Entries of the framing keyed by `axis`.
    #[must_use]
    pub fn framing(&self, axis: Axis) -> &[AccuracyEntry] {
        match axis {
            Axis::True => &self.confused,
            Axis::Predicted => &self.mistaken,
        }
    }

    /// Console lines of the report, headers included.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.confused.len() + self.mistaken.len() + 2);
        lines.push("Labels that were confused by another value:".to_string());
        lines.extend(self.confused.iter().map(ToString::to_string));
        lines.push("Labels that were mistakenly chosen:".to_string());
        lines.extend(self.mistaken.iter().map(ToString::to_string));
        lines
    }
}

/// Derive per-label accuracy from the confusion matrix and error buckets.
///
/// Accuracy for an empty dataset is only defined under
/// [`AbsentLabelPolicy::Skip`] or [`AbsentLabelPolicy::Undefined`].
///
/// # Errors
///
/// - [`CoreError::LengthMismatch`] if the matrix and buckets use different label sets
/// - [`CoreError::DivisionByZeroLabel`] for a never-occurring label under [`AbsentLabelPolicy::Fail`]
pub fn accuracy_report(
    cm: &ConfusionMatrix,
    errors: &ErrorIndex,
    policy: AbsentLabelPolicy,
) -> Result<AccuracyReport> {
    if cm.labels() != errors.labels() {
        return Err(CoreError::LengthMismatch {
            what: "confusion matrix/error index label sets".to_string(),
            left: cm.n_classes(),
            right: errors.labels().len(),
        });
    }

    Ok(AccuracyReport {
        confused: framing(cm, errors, Axis::True, policy)?,
        mistaken: framing(cm, errors, Axis::Predicted, policy)?,
    })
}

fn framing(
    cm: &ConfusionMatrix,
    errors: &ErrorIndex,
    axis: Axis,
    policy: AbsentLabelPolicy,
) -> Result<Vec<AccuracyEntry>> {
    let mut entries = Vec::with_capacity(cm.n_classes());

    for (i, (label, bucket)) in errors.iter(axis).enumerate() {
        let true_count = cm.diagonal(i);
        let false_count = bucket.len();
        let denominator = true_count + false_count;

        let accuracy = if denominator == 0 {
            match policy {
                AbsentLabelPolicy::Fail => {
                    return Err(CoreError::DivisionByZeroLabel { label, axis });
                }
                AbsentLabelPolicy::Skip => {
                    tracing::warn!("Skipping label {} on the {} axis: never occurs", label, axis);
                    continue;
                }
                AbsentLabelPolicy::Undefined => {
                    tracing::warn!("Accuracy undefined for label {} on the {} axis", label, axis);
                    None
                }
            }
        } else {
            Some(true_count as f64 / denominator as f64)
        };

        entries.push(AccuracyEntry {
            label,
            false_count,
            true_count,
            accuracy,
        });
    }

    Ok(entries)
}
