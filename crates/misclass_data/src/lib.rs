//! # misclass_data
//!
//! Labeled example sets for misclass.
//!
//! This crate provides:
//! - [`Examples`] and [`LabeledSplit`] for parallel example/label arrays
//! - [`RawDataset`] holding the training and test splits
//! - [`DatasetProvider`] and the npz-backed [`NpzDatasetProvider`]
//! - [`DatasetFormatter`] and [`StandardFormatter`] for model-ready inputs
//!
//! ## Example
//!
//! ```rust,ignore
//! use misclass_data::{DatasetFormatter, DatasetProvider, FormatOptions, NpzDatasetProvider, StandardFormatter};
//!
//! let raw = NpzDatasetProvider::new("mnist.npz").load()?;
//! let formatted = StandardFormatter::default().format(&raw, &FormatOptions::default())?;
//! println!("{} classes", formatted.labels()?.len());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod dataset;
mod error;
mod format;
mod io;

pub use dataset::{DatasetProvider, Examples, LabeledSplit, RawDataset};
pub use error::{DataError, Result};
pub use format::{DatasetFormatter, FormatOptions, FormattedDataset, FormattedSplit, StandardFormatter};
pub use io::{read_examples, read_labels, NpzDatasetProvider};
