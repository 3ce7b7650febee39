//! The drawing collaborator.

use misclass_analysis::ConfusionMatrix;
use misclass_core::{ConfusionPlotOptions, Label};
use misclass_data::Examples;

use crate::error::Result;

/// Draws confusion matrices and example sets.
///
/// Calls are synchronous; a call returns once the drawing is shown.
pub trait Renderer {
    /// Draw the confusion matrix counts using the given display policy.
    fn render_confusion_matrix(
        &mut self,
        cm: &ConfusionMatrix,
        title: &str,
        options: &ConfusionPlotOptions,
    ) -> Result<()>;

    /// Draw `examples[indices]` in the given order, each annotated with the
    /// matching entry of `labels`.
    fn render_images(
        &mut self,
        examples: &Examples,
        indices: &[usize],
        labels: &[Label],
        title: &str,
    ) -> Result<()>;

    /// Draw the example set in index order with true and predicted
    /// labels, optionally restricted to misclassified examples.
    fn render_sweep(
        &mut self,
        examples: &Examples,
        true_labels: &[Label],
        predicted_labels: &[Label],
        errors_only: bool,
    ) -> Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render_confusion_matrix(
        &mut self,
        cm: &ConfusionMatrix,
        title: &str,
        options: &ConfusionPlotOptions,
    ) -> Result<()> {
        (**self).render_confusion_matrix(cm, title, options)
    }

    fn render_images(
        &mut self,
        examples: &Examples,
        indices: &[usize],
        labels: &[Label],
        title: &str,
    ) -> Result<()> {
        (**self).render_images(examples, indices, labels, title)
    }

    fn render_sweep(
        &mut self,
        examples: &Examples,
        true_labels: &[Label],
        predicted_labels: &[Label],
        errors_only: bool,
    ) -> Result<()> {
        (**self).render_sweep(examples, true_labels, predicted_labels, errors_only)
    }
}
