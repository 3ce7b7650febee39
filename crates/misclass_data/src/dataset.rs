//! Example and label containers.

use ndarray::{s, Array3, ArrayView2, Axis};

use misclass_core::{ensure_same_len, Label, Split};

use crate::error::{DataError, Result};

/// A stack of 2D examples (e.g. grayscale images).
///
/// Stores data in the `(N, H, W)` format:
/// - `N`: Number of examples
/// - `H`: Rows
/// - `W`: Columns
#[derive(Debug, Clone, PartialEq)]
pub struct Examples {
    data: Array3<f32>,
}

impl Examples {
    /// Wrap an `(N, H, W)` array.
    #[must_use]
    pub fn new(data: Array3<f32>) -> Self {
        Self { data }
    }

    /// Create an empty set of `h × w` examples.
    #[must_use]
    pub fn empty(h: usize, w: usize) -> Self {
        Self {
            data: Array3::zeros((0, h, w)),
        }
    }

    /// Get the number of examples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.shape()[0]
    }

    /// Check if there are no examples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shape of one example as `(H, W)`.
    #[must_use]
    pub fn example_shape(&self) -> (usize, usize) {
        let s = self.data.shape();
        (s[1], s[2])
    }

    /// Get a reference to the underlying array.
    #[must_use]
    pub fn data(&self) -> &Array3<f32> {
        &self.data
    }

    /// View of the example at `index`.
    pub fn get(&self, index: usize) -> Result<ArrayView2<'_, f32>> {
        if index >= self.len() {
            return Err(DataError::InvalidInput(format!(
                "example index {} out of bounds for {} examples",
                index,
                self.len()
            )));
        }
        Ok(self.data.index_axis(Axis(0), index))
    }

    /// Keep only the first `n` examples.
    #[must_use]
    pub fn truncated(&self, n: usize) -> Self {
        let n = n.min(self.len());
        Self {
            data: self.data.slice(s![..n, .., ..]).to_owned(),
        }
    }
}

/// Examples with their true labels, as parallel arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSplit {
    examples: Examples,
    labels: Vec<Label>,
}

impl LabeledSplit {
    /// Pair examples with labels.
    ///
    /// # Errors
    ///
    /// Returns a length mismatch if the arrays are not parallel.
    pub fn new(examples: Examples, labels: Vec<Label>) -> Result<Self> {
        ensure_same_len("examples/labels", examples.len(), labels.len())?;
        Ok(Self { examples, labels })
    }

    /// Number of labeled examples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the split is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The examples.
    #[must_use]
    pub fn examples(&self) -> &Examples {
        &self.examples
    }

    /// The true labels.
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Keep only the first `len / reduction` rows.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidInput`] if `reduction` is zero.
    pub fn reduced(&self, reduction: usize) -> Result<Self> {
        if reduction == 0 {
            return Err(DataError::InvalidInput(
                "data reduction factor must be at least 1".to_string(),
            ));
        }
        let n = self.len() / reduction;
        Ok(Self {
            examples: self.examples.truncated(n),
            labels: self.labels[..n].to_vec(),
        })
    }
}

/// Training and test splits as produced by a [`DatasetProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawDataset {
    /// Training split.
    pub train: LabeledSplit,
    /// Test split.
    pub test: LabeledSplit,
}

impl RawDataset {
    /// Create a dataset from its two splits.
    #[must_use]
    pub fn new(train: LabeledSplit, test: LabeledSplit) -> Self {
        Self { train, test }
    }

    /// The split selected by `split`.
    #[must_use]
    pub fn split(&self, split: Split) -> &LabeledSplit {
        match split {
            Split::Train => &self.train,
            Split::Test => &self.test,
        }
    }

    /// Apply [`LabeledSplit::reduced`] to both splits when `reduction` is set.
    pub fn reduced(&self, reduction: Option<usize>) -> Result<Self> {
        match reduction {
            Some(n) => Ok(Self {
                train: self.train.reduced(n)?,
                test: self.test.reduced(n)?,
            }),
            None => Ok(self.clone()),
        }
    }
}

/// Produces the raw training and test splits.
///
/// Any `Fn() -> Result<RawDataset>` closure is a provider.
pub trait DatasetProvider {
    /// Load both splits.
    fn load(&self) -> Result<RawDataset>;
}

impl<F> DatasetProvider for F
where
    F: Fn() -> Result<RawDataset>,
{
    fn load(&self) -> Result<RawDataset> {
        self()
    }
}
