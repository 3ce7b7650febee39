//! Turning raw splits into model-ready inputs.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use misclass_core::LabelSet;

use crate::dataset::{LabeledSplit, RawDataset};
use crate::error::{DataError, Result};

/// Options for [`DatasetFormatter::format`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    /// One-hot encode targets; otherwise targets are an `(N, 1)` column of label values.
    pub to_categorical: bool,
    /// If set to `n`, use only the first `1/n` of every split.
    pub data_reduction: Option<usize>,
    /// Return the canonical label set.
    pub return_labels: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            to_categorical: true,
            data_reduction: None,
            return_labels: true,
        }
    }
}

/// One split in model-ready form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedSplit {
    /// Flattened, normalized inputs `(N, H * W)`.
    pub x: Array2<f32>,
    /// Targets, one-hot `(N, L)` or a label column `(N, 1)`.
    pub y: Array2<f32>,
}

impl FormattedSplit {
    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    /// Check if the split is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.nrows() == 0
    }
}

/// Output of a [`DatasetFormatter`].
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedDataset {
    /// Training split.
    pub train: FormattedSplit,
    /// Test split.
    pub test: FormattedSplit,
    /// Shape of one input example as stored, e.g. `[28, 28]`.
    pub input_shape: Vec<usize>,
    /// Canonical label order, when requested.
    pub labels: Option<LabelSet>,
}

impl FormattedDataset {
    /// The canonical label set.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidInput`] if labels were not requested.
    pub fn labels(&self) -> Result<&LabelSet> {
        self.labels.as_ref().ok_or_else(|| {
            DataError::InvalidInput("formatted dataset carries no label set".to_string())
        })
    }
}

/// Reshapes and normalizes raw splits and derives the canonical label set.
pub trait DatasetFormatter {
    /// Format both splits of `raw`.
    fn format(&self, raw: &RawDataset, options: &FormatOptions) -> Result<FormattedDataset>;
}

/// Flattens each example, scales values into `[0, 1]` and sorts labels ascending.
///
/// The scale is the largest value over both splits when it exceeds 1
/// (e.g. 255 for 8-bit images); data already in `[0, 1]` is left unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFormatter;

impl StandardFormatter {
    fn format_split(
        split: &LabeledSplit,
        labels: &LabelSet,
        scale: f32,
        to_categorical: bool,
    ) -> Result<FormattedSplit> {
        let data = split.examples().data();
        let (n, h, w) = data.dim();

        let x = data
            .to_owned()
            .into_shape((n, h * w))
            .map_err(|e| DataError::InvalidShape(e.to_string()))?
            .mapv(|v| v / scale);

        let y = if to_categorical {
            let mut y = Array2::<f32>::zeros((n, labels.len()));
            for (row, pos) in labels.positions_of(split.labels())?.into_iter().enumerate() {
                y[[row, pos]] = 1.0;
            }
            y
        } else {
            Array2::from_shape_fn((n, 1), |(row, _)| split.labels()[row].value() as f32)
        };

        Ok(FormattedSplit { x, y })
    }
}

impl DatasetFormatter for StandardFormatter {
    fn format(&self, raw: &RawDataset, options: &FormatOptions) -> Result<FormattedDataset> {
        let raw = raw.reduced(options.data_reduction)?;

        if raw.train.examples().example_shape() != raw.test.examples().example_shape()
            && !raw.train.is_empty()
            && !raw.test.is_empty()
        {
            return Err(DataError::InvalidShape(format!(
                "training examples are {:?} but test examples are {:?}",
                raw.train.examples().example_shape(),
                raw.test.examples().example_shape()
            )));
        }

        let labels = LabelSet::from_observed([raw.train.labels(), raw.test.labels()]);

        let max = raw
            .train
            .examples()
            .data()
            .iter()
            .chain(raw.test.examples().data().iter())
            .fold(0.0f32, |acc, &v| acc.max(v.abs()));
        let scale = if max > 1.0 { max } else { 1.0 };

        let train = Self::format_split(&raw.train, &labels, scale, options.to_categorical)?;
        let test = Self::format_split(&raw.test, &labels, scale, options.to_categorical)?;

        let reference = if raw.train.is_empty() { &raw.test } else { &raw.train };
        let (h, w) = reference.examples().example_shape();

        tracing::debug!(
            "Formatted {} training and {} test examples, {} labels, scale {}",
            train.len(),
            test.len(),
            labels.len(),
            scale
        );

        Ok(FormattedDataset {
            train,
            test,
            input_shape: vec![h, w],
            labels: options.return_labels.then_some(labels),
        })
    }
}
