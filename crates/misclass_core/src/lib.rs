//! # misclass_core
//!
//! Core types shared by every misclass crate.
//!
//! This crate provides:
//! - [`Label`] and the canonical ordered [`LabelSet`]
//! - [`Axis`] for choosing which label is held fixed when bucketing errors
//! - [`Split`] for selecting the training or test examples
//! - [`DisplayMode`] and [`ConfusionPlotOptions`] for confusion matrix rendering
//! - Error types and common utilities
//!
//! ## Example
//!
//! ```rust
//! use misclass_core::{Label, LabelSet};
//!
//! let labels = LabelSet::new(vec![Label(0), Label(1), Label(2)]).unwrap();
//! assert_eq!(labels.position(Label(2)).unwrap(), 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod axis;
mod display;
mod error;
mod label;
mod split;

pub use axis::Axis;
pub use display::{ConfusionPlotOptions, DisplayMode};
pub use error::{CoreError, Result};
pub use label::{Label, LabelSet};
pub use split::Split;

/// Check that two parallel sequences have the same length.
///
/// `what` names the pair in the resulting [`CoreError::LengthMismatch`].
pub fn ensure_same_len(what: &str, left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(CoreError::LengthMismatch {
            what: what.to_string(),
            left,
            right,
        });
    }
    Ok(())
}
