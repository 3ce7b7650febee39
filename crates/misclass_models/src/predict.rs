//! Probability outputs and their conversion to labels.

use ndarray::{Array2, ArrayView2};

use misclass_core::{Label, LabelSet};

use crate::error::{ModelError, Result};

/// A trained model producing class probabilities.
pub trait Classifier {
    /// Number of output classes (L).
    fn n_classes(&self) -> usize;

    /// Predict probabilities for `x` of shape `[count, features]`.
    ///
    /// Returns a matrix of shape `[count, L]`.
    fn predict(&self, x: ArrayView2<'_, f32>) -> Result<Array2<f32>>;
}

/// Convert a probability matrix into labels by arg-max over each row.
///
/// Column `j` corresponds to `labels[j]`. The first maximum wins on ties.
///
/// # Errors
///
/// Returns [`ModelError::ShapeMismatch`] if the width differs from the number of labels.
pub fn argmax_labels(probs: ArrayView2<'_, f32>, labels: &LabelSet) -> Result<Vec<Label>> {
    if probs.ncols() != labels.len() {
        return Err(ModelError::ShapeMismatch(format!(
            "model outputs {} classes but the dataset has {} labels",
            probs.ncols(),
            labels.len()
        )));
    }

    probs
        .rows()
        .into_iter()
        .map(|row| {
            if row.is_empty() {
                return Err(ModelError::ShapeMismatch(
                    "cannot take arg-max of an empty row".to_string(),
                ));
            }
            let mut best = 0;
            for (j, &p) in row.iter().enumerate() {
                if p > row[best] {
                    best = j;
                }
            }
            labels.get(best).ok_or_else(|| {
                ModelError::ShapeMismatch(format!("no label at output column {}", best))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn label_set(values: &[i64]) -> LabelSet {
        LabelSet::new(values.iter().copied().map(Label).collect()).unwrap()
    }

    #[test]
    fn test_argmax_labels() {
        let probs = array![[0.1, 0.7, 0.2], [0.5, 0.2, 0.3], [0.0, 0.1, 0.9]];
        let labels = argmax_labels(probs.view(), &label_set(&[4, 5, 6])).unwrap();
        assert_eq!(labels, vec![Label(5), Label(4), Label(6)]);
    }

    #[test]
    fn test_argmax_first_max_wins() {
        let probs = array![[0.4, 0.4, 0.2]];
        let labels = argmax_labels(probs.view(), &label_set(&[0, 1, 2])).unwrap();
        assert_eq!(labels, vec![Label(0)]);
    }

    #[test]
    fn test_argmax_width_mismatch() {
        let probs = array![[0.5, 0.5]];
        let err = argmax_labels(probs.view(), &label_set(&[0, 1, 2])).unwrap_err();
        assert!(matches!(err, ModelError::ShapeMismatch(_)));
    }

    #[test]
    fn test_argmax_no_rows() {
        let probs = Array2::<f32>::zeros((0, 3));
        assert!(argmax_labels(probs.view(), &label_set(&[0, 1, 2])).unwrap().is_empty());
    }
}
