//! Confusion matrix computation.

use serde::{Deserialize, Serialize};

use misclass_core::{ensure_same_len, Label, LabelSet, Result};

/// Confusion matrix for classification evaluation.
///
/// Cell `(i, j)` counts examples whose true label is `labels[i]` and whose
/// predicted label is `labels[j]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    /// The matrix values (row = true, col = pred).
    matrix: Vec<Vec<usize>>,
    /// Canonical label order of rows and columns.
    labels: LabelSet,
}

impl ConfusionMatrix {
    /// Create an all-zero matrix for the given labels.
    pub fn new(labels: LabelSet) -> Self {
        let n = labels.len();
        Self {
            matrix: vec![vec![0; n]; n],
            labels,
        }
    }

    /// Record one example by canonical positions.
    fn add(&mut self, true_pos: usize, pred_pos: usize) {
        self.matrix[true_pos][pred_pos] += 1;
    }

    /// Number of classes (L).
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// The canonical label order.
    #[must_use]
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Raw rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<usize>] {
        &self.matrix
    }

    /// Count at row `i` (true) and column `j` (predicted).
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> usize {
        self.matrix[i][j]
    }

    /// Correct predictions for the label at position `i`.
    #[must_use]
    pub fn diagonal(&self, i: usize) -> usize {
        self.matrix[i][i]
    }

    /// Number of examples whose true label is at position `i`.
    #[must_use]
    pub fn row_sum(&self, i: usize) -> usize {
        self.matrix[i].iter().sum()
    }

    /// Number of examples predicted as the label at position `j`.
    #[must_use]
    pub fn column_sum(&self, j: usize) -> usize {
        self.matrix.iter().map(|row| row[j]).sum()
    }

    /// Total number of examples.
    #[must_use]
    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }

    /// Number of correctly classified examples.
    #[must_use]
    pub fn correct(&self) -> usize {
        (0..self.n_classes()).map(|i| self.matrix[i][i]).sum()
    }

    /// Get accuracy.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.correct() as f64 / total as f64
        }
    }

    /// Normalize the matrix (row-wise, shows recall).
    #[must_use]
    pub fn normalize(&self) -> Vec<Vec<f64>> {
        self.matrix
            .iter()
            .map(|row| {
                let sum: usize = row.iter().sum();
                if sum == 0 {
                    vec![0.0; row.len()]
                } else {
                    row.iter().map(|&v| v as f64 / sum as f64).collect()
                }
            })
            .collect()
    }

    /// Get a text representation.
    #[must_use]
    pub fn to_string_table(&self) -> String {
        let mut s = String::new();

        s.push_str("  true\\pred");
        for label in self.labels.iter() {
            s.push_str(&format!("{:>8}", label));
        }
        s.push('\n');

        for (i, label) in self.labels.iter().enumerate() {
            s.push_str(&format!("{:>10} ", label));
            for count in &self.matrix[i] {
                s.push_str(&format!("{:>8}", count));
            }
            s.push('\n');
        }

        s
    }
}

/// Compute the confusion matrix of `true_labels` against `predicted_labels`.
///
/// Both sequences may be empty, which yields an all-zero matrix.
///
/// # Errors
///
/// - [`misclass_core::CoreError::LengthMismatch`] if the sequences differ in length
/// - [`misclass_core::CoreError::UnknownLabel`] if a value is not in `labels`
pub fn confusion_matrix(
    true_labels: &[Label],
    predicted_labels: &[Label],
    labels: &LabelSet,
) -> Result<ConfusionMatrix> {
    ensure_same_len("true/predicted labels", true_labels.len(), predicted_labels.len())?;

    let mut cm = ConfusionMatrix::new(labels.clone());
    for (&target, &pred) in true_labels.iter().zip(predicted_labels) {
        cm.add(labels.position(target)?, labels.position(pred)?);
    }
    Ok(cm)
}
