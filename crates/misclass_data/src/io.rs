//! Reading labeled examples from NumPy `.npz` archives.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use ndarray::{Array2, Array3, Ix1, Ix3, OwnedRepr};
use ndarray_npy::NpzReader;

use misclass_core::Label;

use crate::dataset::{DatasetProvider, Examples, LabeledSplit, RawDataset};
use crate::error::{DataError, Result};

/// Loads the four Keras-style arrays `x_train`, `y_train`, `x_test`, `y_test`
/// from a single `.npz` archive (the layout of `mnist.npz`).
#[derive(Debug, Clone)]
pub struct NpzDatasetProvider {
    path: PathBuf,
}

impl NpzDatasetProvider {
    /// Create a provider for the archive at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the archive.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetProvider for NpzDatasetProvider {
    fn load(&self) -> Result<RawDataset> {
        let file = File::open(&self.path)?;
        let mut npz = NpzReader::new(file)
            .map_err(|e| DataError::FormatError(format!("Failed to read npz file: {}", e)))?;

        let train = LabeledSplit::new(
            Examples::new(read_examples(&mut npz, "x_train")?),
            read_labels(&mut npz, "y_train")?,
        )?;
        let test = LabeledSplit::new(
            Examples::new(read_examples(&mut npz, "x_test")?),
            read_labels(&mut npz, "y_test")?,
        )?;

        tracing::debug!(
            "Loaded {:?}: {} training and {} test examples",
            self.path,
            train.len(),
            test.len()
        );

        Ok(RawDataset::new(train, test))
    }
}

/// Find the archive entry for `name`, with or without the `.npy` suffix.
fn entry_name<R: Read + Seek>(npz: &mut NpzReader<R>, name: &str) -> Result<String> {
    let names = npz
        .names()
        .map_err(|e| DataError::FormatError(format!("Failed to list npz entries: {}", e)))?;
    let with_suffix = format!("{}.npy", name);
    names
        .into_iter()
        .find(|n| n == name || *n == with_suffix)
        .ok_or_else(|| DataError::FormatError(format!("Array '{}' not found in npz", name)))
}

/// Read an `(N, H, W)` example array stored as `u8`, `f32` or `f64`.
pub fn read_examples<R: Read + Seek>(npz: &mut NpzReader<R>, name: &str) -> Result<Array3<f32>> {
    let entry = entry_name(npz, name)?;

    if let Ok(arr) = npz.by_name::<OwnedRepr<u8>, Ix3>(&entry) {
        return Ok(arr.mapv(f32::from));
    }
    if let Ok(arr) = npz.by_name::<OwnedRepr<f32>, Ix3>(&entry) {
        return Ok(arr);
    }
    let arr: Array3<f64> = npz.by_name(&entry).map_err(|e| {
        DataError::FormatError(format!(
            "Failed to read '{}' as a 3D u8/f32/f64 array: {}",
            name, e
        ))
    })?;
    Ok(arr.mapv(|x| x as f32))
}

/// Read a label vector stored as `u8`, `i32` or `i64`, flat or as an `(N, 1)` column.
pub fn read_labels<R: Read + Seek>(npz: &mut NpzReader<R>, name: &str) -> Result<Vec<Label>> {
    let entry = entry_name(npz, name)?;

    if let Ok(arr) = npz.by_name::<OwnedRepr<u8>, Ix1>(&entry) {
        return Ok(arr.iter().map(|&v| Label(i64::from(v))).collect());
    }
    if let Ok(arr) = npz.by_name::<OwnedRepr<i32>, Ix1>(&entry) {
        return Ok(arr.iter().map(|&v| Label(i64::from(v))).collect());
    }
    if let Ok(arr) = npz.by_name::<OwnedRepr<i64>, Ix1>(&entry) {
        return Ok(arr.iter().map(|&v| Label(v)).collect());
    }

    let column: Array2<i64> = npz.by_name(&entry).map_err(|e| {
        DataError::FormatError(format!(
            "Failed to read '{}' as a u8/i32/i64 label vector: {}",
            name, e
        ))
    })?;
    if column.ncols() != 1 {
        return Err(DataError::InvalidShape(format!(
            "labels '{}' must have shape (N,) or (N, 1), got {:?}",
            name,
            column.shape()
        )));
    }
    Ok(column.iter().map(|&v| Label(v)).collect())
}
