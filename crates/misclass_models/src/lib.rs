//! # misclass_models
//!
//! Trained classifiers for misclass.
//!
//! This crate provides:
//! - [`Classifier`] for anything producing class probabilities
//! - [`ModelLoader`] and [`JsonModelLoader`] for reading a model folder
//! - [`DenseModel`], a feed-forward network stored as JSON
//! - [`argmax_labels`] to turn probabilities into predicted labels
//!
//! ## Model folder layout
//!
//! ```text
//! model/
//! ├── model.json    # architecture: input_dim and layers (units, activation)
//! └── weights.json  # one {kernel, bias} entry per layer
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod dense;
mod error;
mod loader;
mod predict;

pub use dense::{Activation, DenseLayerConfig, DenseLayerWeights, DenseModel, DenseModelConfig};
pub use error::{ModelError, Result};
pub use loader::{save_model, JsonModelLoader, ModelLoader, MODEL_FILE, WEIGHTS_FILE};
pub use predict::{argmax_labels, Classifier};
