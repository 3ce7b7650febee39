//! # misclass_analysis
//!
//! Error-analysis statistics for a trained classifier.
//!
//! This crate provides:
//! - Confusion matrix construction over a canonical label set
//! - Error buckets of misclassified examples, by true and by predicted label
//! - Per-label accuracy in both framings
//! - The overall error summary line

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod accuracy;
mod confusion;
mod errors;
mod summary;

pub use accuracy::{accuracy_report, AbsentLabelPolicy, AccuracyEntry, AccuracyReport};
pub use confusion::{confusion_matrix, ConfusionMatrix};
pub use errors::ErrorIndex;
pub use summary::ErrorSummary;
