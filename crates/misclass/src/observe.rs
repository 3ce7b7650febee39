//! End-to-end pipeline: load, predict, report, then explore.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use misclass_analysis::{accuracy_report, confusion_matrix, AbsentLabelPolicy, ErrorIndex, ErrorSummary};
use misclass_core::{ensure_same_len, DisplayMode, Split};
use misclass_data::{DatasetFormatter, DatasetProvider, FormatOptions};
use misclass_explore::{ErrorView, Explorer, InputSource, Renderer};
use misclass_models::{argmax_labels, ModelLoader};

/// Settings of one [`observe_results`] run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserveConfig {
    /// Folder holding the trained model.
    pub folder: PathBuf,
    /// Confusion matrix display mode.
    pub mode: DisplayMode,
    /// Split to analyze.
    pub split: Split,
    /// Formatter options.
    pub format: FormatOptions,
    /// Handling of labels that are never true nor predicted.
    pub absent_labels: AbsentLabelPolicy,
    /// Cap on images drawn per render call.
    ///
    /// Not read by [`observe_results`]; it is applied by whoever builds the
    /// renderer, e.g. `TextRenderer::with_max_images`.
    pub max_images: usize,
}

impl Default for ObserveConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("."),
            mode: DisplayMode::default(),
            split: Split::default(),
            format: FormatOptions::default(),
            absent_labels: AbsentLabelPolicy::default(),
            max_images: 64,
        }
    }
}

/// Print a progress line to `out` and mirror it to the log.
fn announce<W: Write>(out: &mut W, message: &str) -> Result<()> {
    tracing::info!("{}", message);
    writeln!(out, "{}", message)?;
    Ok(())
}

/// Run the full misclassification analysis for `config.split`.
///
/// Progress, the error summary and the accuracy report go to `out`; the
/// confusion matrix and example images go to `renderer`. Afterwards an
/// [`Explorer`] session reads menu choices from `input` until the user exits
/// or the input ends.
///
/// # Errors
///
/// Fails if a collaborator fails, if predictions do not line up with the
/// examples, or if a label is unknown or has no accuracy under
/// `config.absent_labels`. All of these abort before the report is printed.
pub fn observe_results<P, F, L, R, I, W>(
    provider: &P,
    formatter: &F,
    loader: &L,
    mut renderer: R,
    input: I,
    mut out: W,
    config: &ObserveConfig,
) -> Result<()>
where
    P: DatasetProvider + ?Sized,
    F: DatasetFormatter + ?Sized,
    L: ModelLoader + ?Sized,
    R: Renderer,
    I: InputSource,
    W: Write,
{
    announce(&mut out, "Loading training and test sets ...")?;
    let raw = provider
        .load()
        .context("Failed to load training and test sets")?
        .reduced(config.format.data_reduction)
        .context("Failed to reduce training and test sets")?;

    announce(&mut out, "Reshaping training and test sets ...")?;
    // `raw` is already reduced; the formatter must not reduce again.
    let options = FormatOptions {
        data_reduction: None,
        return_labels: true,
        ..config.format.clone()
    };
    let formatted = formatter
        .format(&raw, &options)
        .context("Failed to format training and test sets")?;
    let labels = formatted.labels()?;
    tracing::debug!("Input shape {:?}, {} labels", formatted.input_shape, labels.len());

    announce(&mut out, &format!("Loading model from {} ...", config.folder.display()))?;
    let model = loader
        .load(&config.folder)
        .with_context(|| format!("Failed to load model from {}", config.folder.display()))?;

    announce(&mut out, "Calculating predicted labels ...")?;
    let split = raw.split(config.split);
    let inputs = match config.split {
        Split::Train => &formatted.train,
        Split::Test => &formatted.test,
    };
    let probs = model.predict(inputs.x.view()).context("Failed to predict labels")?;
    let predicted = argmax_labels(probs.view(), labels).context("Failed to decode predictions")?;
    let true_labels = split.labels();
    ensure_same_len("true/predicted labels", true_labels.len(), predicted.len())?;
    ensure_same_len("examples/true labels", split.examples().len(), true_labels.len())?;

    // Structural errors must surface before any report output.
    let summary = ErrorSummary::from_labels(true_labels, &predicted)?;
    let cm = confusion_matrix(true_labels, &predicted, labels)?;
    let errors = ErrorIndex::build(true_labels, &predicted, labels)?;
    let report = accuracy_report(&cm, &errors, config.absent_labels)?;
    let view = ErrorView::new(split.examples(), true_labels, &predicted, &errors)?;

    writeln!(out, "{}", summary)?;
    tracing::info!("{}", summary);

    announce(&mut out, "Drawing confusion matrix ...")?;
    renderer
        .render_confusion_matrix(
            &cm,
            &format!("Confusion Matrix ({})", config.split.set_name()),
            &config.mode.plot_options(),
        )
        .context("Failed to draw confusion matrix")?;

    announce(&mut out, "Counting misclassified examples ...")?;
    for line in report.to_lines() {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;

    let mut explorer = Explorer::new(view, input, &mut out, renderer);
    explorer.run().context("Explorer session failed")?;
    tracing::info!(
        "Explorer finished after {} invalid inputs",
        explorer.invalid_inputs()
    );
    Ok(())
}
