//! # misclass
//!
//! Inspect where a trained classifier goes wrong.
//!
//! misclass loads a labeled dataset and a trained model, predicts labels for
//! one split, and then helps a human look at the mistakes:
//!
//! - **Analysis**: confusion matrix, error buckets, per-label accuracy
//! - **Data**: npz datasets and the model-ready formatter
//! - **Models**: JSON dense classifiers and argmax decoding
//! - **Explore**: the interactive menu over error buckets and its renderers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use misclass::prelude::*;
//!
//! let config = ObserveConfig {
//!     folder: "models/mnist".into(),
//!     split: Split::Test,
//!     ..ObserveConfig::default()
//! };
//! observe_results(
//!     &NpzDatasetProvider::new("mnist.npz"),
//!     &StandardFormatter,
//!     &JsonModelLoader,
//!     TextRenderer::stdout(),
//!     BufReadInput::stdin(),
//!     std::io::stdout(),
//!     &config,
//! )?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod observe;

pub use misclass_analysis as analysis;
pub use misclass_core as core;
pub use misclass_data as data;
pub use misclass_explore as explore;
pub use misclass_models as models;

pub use observe::{observe_results, ObserveConfig};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use misclass::prelude::*;
/// ```
pub mod prelude {
    pub use crate::observe::{observe_results, ObserveConfig};

    // Core types
    pub use misclass_core::{Axis, ConfusionPlotOptions, DisplayMode, Label, LabelSet, Split};

    // Data
    pub use misclass_data::{
        DatasetFormatter, DatasetProvider, Examples, FormatOptions, LabeledSplit,
        NpzDatasetProvider, RawDataset, StandardFormatter,
    };

    // Models
    pub use misclass_models::{argmax_labels, Classifier, JsonModelLoader, ModelLoader};

    // Analysis
    pub use misclass_analysis::{
        accuracy_report, confusion_matrix, AbsentLabelPolicy, ConfusionMatrix, ErrorIndex,
        ErrorSummary,
    };

    // Explore
    pub use misclass_explore::{
        BufReadInput, Explorer, InputSource, Renderer, ScriptedInput, TextRenderer,
    };
}
