//! Class labels and the canonical label order.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Identifier of one of the L classes.
///
/// Labels order by value; the menu and matrix order comes from [`LabelSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(pub i64);

impl Label {
    /// Get the raw label value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for Label {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<i64>()
            .map(Label)
            .map_err(|_| CoreError::InvalidInput(format!("'{}' is not a label", s)))
    }
}

/// The canonical ordered label set.
///
/// Fixes the index-to-label mapping used for confusion matrix rows/columns
/// and for menu numbering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Label>", into = "Vec<Label>")]
pub struct LabelSet {
    labels: Vec<Label>,
    #[serde(skip)]
    positions: HashMap<Label, usize>,
}

impl LabelSet {
    /// Create a label set, keeping the given order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateLabel`] if a label appears twice.
    pub fn new(labels: Vec<Label>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(labels.len());
        for (i, &label) in labels.iter().enumerate() {
            if positions.insert(label, i).is_some() {
                return Err(CoreError::DuplicateLabel { label });
            }
        }
        Ok(Self { labels, positions })
    }

    /// Build the sorted set of distinct labels found in the given sequences.
    pub fn from_observed<'a, I>(sequences: I) -> Self
    where
        I: IntoIterator<Item = &'a [Label]>,
    {
        let mut labels: Vec<Label> = sequences.into_iter().flatten().copied().collect();
        labels.sort_unstable();
        labels.dedup();
        let positions = labels.iter().enumerate().map(|(i, &l)| (l, i)).collect();
        Self { labels, positions }
    }

    /// Number of labels (L).
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Position of `label` in the canonical order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownLabel`] if the label is not in the set.
    pub fn position(&self, label: Label) -> Result<usize> {
        self.positions
            .get(&label)
            .copied()
            .ok_or(CoreError::UnknownLabel { label })
    }

    /// Check membership.
    #[must_use]
    pub fn contains(&self, label: Label) -> bool {
        self.positions.contains_key(&label)
    }

    /// Label at position `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Label> {
        self.labels.get(index).copied()
    }

    /// Iterate labels in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Label> + '_ {
        self.labels.iter().copied()
    }

    /// Labels as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Label] {
        &self.labels
    }

    /// Map every label of `values` to its canonical position.
    ///
    /// # Errors
    ///
    /// Fails on the first label that is not in the set.
    pub fn positions_of(&self, values: &[Label]) -> Result<Vec<usize>> {
        values.iter().map(|&l| self.position(l)).collect()
    }
}

impl TryFrom<Vec<Label>> for LabelSet {
    type Error = CoreError;

    fn try_from(labels: Vec<Label>) -> Result<Self> {
        Self::new(labels)
    }
}

impl From<LabelSet> for Vec<Label> {
    fn from(set: LabelSet) -> Self {
        set.labels
    }
}
