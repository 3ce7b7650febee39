//! Buckets of misclassified examples.

use serde::{Deserialize, Serialize};

use misclass_core::{ensure_same_len, Axis, Label, LabelSet, Result};

/// Misclassified example indices grouped by true and by predicted label.
///
/// Every label of the canonical set owns a bucket on both axes, empty when the
/// label has no errors. An index appears in exactly one bucket per axis, and
/// only if its prediction differs from its true label. Buckets keep ascending
/// index order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorIndex {
    labels: LabelSet,
    len: usize,
    by_true: Vec<Vec<usize>>,
    by_predicted: Vec<Vec<usize>>,
}

impl ErrorIndex {
    /// Scan the labels once and bucket every misclassified position.
    ///
    /// # Errors
    ///
    /// - [`misclass_core::CoreError::LengthMismatch`] if the sequences differ in length
    /// - [`misclass_core::CoreError::UnknownLabel`] if a misclassified value is not in `labels`
    pub fn build(
        true_labels: &[Label],
        predicted_labels: &[Label],
        labels: &LabelSet,
    ) -> Result<Self> {
        ensure_same_len("true/predicted labels", true_labels.len(), predicted_labels.len())?;

        let mut by_true = vec![Vec::new(); labels.len()];
        let mut by_predicted = vec![Vec::new(); labels.len()];

        for (idx, (&target, &pred)) in true_labels.iter().zip(predicted_labels).enumerate() {
            if target == pred {
                continue;
            }
            by_true[labels.position(target)?].push(idx);
            by_predicted[labels.position(pred)?].push(idx);
        }

        Ok(Self {
            labels: labels.clone(),
            len: true_labels.len(),
            by_true,
            by_predicted,
        })
    }

    /// The canonical label order of the buckets.
    #[must_use]
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Number of examples scanned, misclassified or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no examples were scanned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bucket of `label` on `axis`.
    ///
    /// # Errors
    ///
    /// Returns [`misclass_core::CoreError::UnknownLabel`] if the label is not in the set.
    pub fn bucket(&self, axis: Axis, label: Label) -> Result<&[usize]> {
        let pos = self.labels.position(label)?;
        Ok(&self.family(axis)[pos])
    }

    /// Bucket at canonical position `pos` on `axis`.
    #[must_use]
    pub fn bucket_at(&self, axis: Axis, pos: usize) -> Option<&[usize]> {
        self.family(axis).get(pos).map(Vec::as_slice)
    }

    /// Buckets keyed by true label, in canonical order.
    pub fn by_true(&self) -> impl Iterator<Item = (Label, &[usize])> + '_ {
        self.iter(Axis::True)
    }

    /// Buckets keyed by predicted label, in canonical order.
    pub fn by_predicted(&self) -> impl Iterator<Item = (Label, &[usize])> + '_ {
        self.iter(Axis::Predicted)
    }

    /// Buckets of one axis, in canonical order.
    pub fn iter(&self, axis: Axis) -> impl Iterator<Item = (Label, &[usize])> + '_ {
        self.labels
            .iter()
            .zip(self.family(axis).iter().map(Vec::as_slice))
    }

    /// Total number of misclassified examples.
    #[must_use]
    pub fn num_errors(&self) -> usize {
        self.by_true.iter().map(Vec::len).sum()
    }

    fn family(&self, axis: Axis) -> &[Vec<usize>] {
        match axis {
            Axis::True => &self.by_true,
            Axis::Predicted => &self.by_predicted,
        }
    }
}
