//! Menu state machine for browsing error buckets.
//!
//! ```text
//! TopMenu ──1──▶ AxisChosen(Predicted) ──▶ LabelFilterMenu(Predicted) ──k──▶ ViewingBucket
//!    │   ──2──▶ AxisChosen(True)      ──▶ LabelFilterMenu(True)              │
//!    │                                         ▲   │0                         │
//!    │                                         │   ▼                          │
//!    │                                         │ TopMenu                      │
//!    │                                         └──────────────────────────────┘
//!    └──0──▶ Exit ──q──▶ Finished
//!              └─other─▶ UnsortedSweep ──▶ Finished
//! ```

use std::io::Write;

use misclass_analysis::ErrorIndex;
use misclass_core::{ensure_same_len, Axis, Label};
use misclass_data::Examples;

use crate::error::Result;
use crate::input::InputSource;
use crate::renderer::Renderer;

/// Position in the explorer's menu flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorerState {
    /// Choose the axis to filter by, or exit.
    TopMenu,
    /// An axis was picked; moves to its label menu without input.
    AxisChosen(Axis),
    /// Choose a label on the axis, or go back.
    LabelFilterMenu(Axis),
    /// Render the bucket of a label, then return to the label menu.
    ViewingBucket(Axis, Label),
    /// Offer the unsorted sweep before leaving.
    Exit,
    /// Render every misclassified example in index order.
    UnsortedSweep,
    /// The session is over.
    Finished,
}

/// Read-only data browsed by an [`Explorer`].
#[derive(Debug, Clone, Copy)]
pub struct ErrorView<'a> {
    examples: &'a Examples,
    true_labels: &'a [Label],
    predicted_labels: &'a [Label],
    errors: &'a ErrorIndex,
}

impl<'a> ErrorView<'a> {
    /// Bundle the parallel example/label arrays with their error buckets.
    ///
    /// # Errors
    ///
    /// Returns a length mismatch if the three arrays are not parallel or if
    /// `errors` was built over a different number of examples.
    pub fn new(
        examples: &'a Examples,
        true_labels: &'a [Label],
        predicted_labels: &'a [Label],
        errors: &'a ErrorIndex,
    ) -> Result<Self> {
        ensure_same_len("examples/true labels", examples.len(), true_labels.len())?;
        ensure_same_len("true/predicted labels", true_labels.len(), predicted_labels.len())?;
        ensure_same_len("error index/true labels", errors.len(), true_labels.len())?;
        Ok(Self {
            examples,
            true_labels,
            predicted_labels,
            errors,
        })
    }

    /// Labels of the axis opposite to `axis`.
    fn other_labels(&self, axis: Axis) -> &'a [Label] {
        match axis {
            Axis::Predicted => self.true_labels,
            Axis::True => self.predicted_labels,
        }
    }
}

/// Indices of the bucket of `label` on `axis`, stably sorted by the other
/// axis' label, together with those sorted other-axis labels.
///
/// # Errors
///
/// Returns an unknown label error if `label` is not in the canonical set.
pub fn bucket_view(view: &ErrorView<'_>, axis: Axis, label: Label) -> Result<(Vec<usize>, Vec<Label>)> {
    let other = view.other_labels(axis);
    let mut indices = view.errors.bucket(axis, label)?.to_vec();
    indices.sort_by_key(|&i| other[i]);
    let overlay = indices.iter().map(|&i| other[i]).collect();
    Ok((indices, overlay))
}

/// Interactive console session over the error buckets.
///
/// Input comes from an [`InputSource`], menus and prompts go to `out`, and
/// drawing is delegated to a [`Renderer`]. Invalid menu input is counted and
/// re-prompted; it never advances the state.
pub struct Explorer<'a, I, W, R> {
    view: ErrorView<'a>,
    input: I,
    out: W,
    renderer: R,
    state: ExplorerState,
    invalid_inputs: usize,
}

impl<'a, I, W, R> Explorer<'a, I, W, R>
where
    I: InputSource,
    W: Write,
    R: Renderer,
{
    /// Create an explorer positioned at [`ExplorerState::TopMenu`].
    pub fn new(view: ErrorView<'a>, input: I, out: W, renderer: R) -> Self {
        Self {
            view,
            input,
            out,
            renderer,
            state: ExplorerState::TopMenu,
            invalid_inputs: 0,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ExplorerState {
        self.state
    }

    /// Number of rejected menu inputs so far.
    #[must_use]
    pub fn invalid_inputs(&self) -> usize {
        self.invalid_inputs
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Split the explorer into its output sink and renderer.
    pub fn into_parts(self) -> (W, R) {
        (self.out, self.renderer)
    }

    /// Step until the session is [`ExplorerState::Finished`].
    pub fn run(&mut self) -> Result<()> {
        while self.state != ExplorerState::Finished {
            self.step()?;
        }
        Ok(())
    }

    /// Perform one transition and return the new state.
    pub fn step(&mut self) -> Result<ExplorerState> {
        let next = match self.state {
            ExplorerState::TopMenu => self.top_menu()?,
            ExplorerState::AxisChosen(axis) => {
                writeln!(self.out, "Filtering by: {} Values\n", axis.title())?;
                ExplorerState::LabelFilterMenu(axis)
            }
            ExplorerState::LabelFilterMenu(axis) => self.label_menu(axis)?,
            ExplorerState::ViewingBucket(axis, label) => {
                self.view_bucket(axis, label)?;
                ExplorerState::LabelFilterMenu(axis)
            }
            ExplorerState::Exit => self.sweep_prompt()?,
            ExplorerState::UnsortedSweep => {
                self.sweep()?;
                ExplorerState::Finished
            }
            ExplorerState::Finished => ExplorerState::Finished,
        };

        tracing::debug!("Explorer: {:?} -> {:?}", self.state, next);
        self.state = next;
        Ok(next)
    }

    fn top_menu(&mut self) -> Result<ExplorerState> {
        writeln!(self.out, "Welcome to the misclassified images viewer!")?;
        writeln!(self.out, "Use the number keys + ENTER to select the best option.")?;
        writeln!(self.out, "Do you want to filter by predicted value or true value?")?;
        writeln!(self.out, "0. Exit\n1. Filter by predicted values\n2. Filter by true values")?;

        Ok(match self.read_choice(2)? {
            None => ExplorerState::Finished,
            Some(0) => ExplorerState::Exit,
            Some(1) => ExplorerState::AxisChosen(Axis::Predicted),
            Some(_) => ExplorerState::AxisChosen(Axis::True),
        })
    }

    fn label_menu(&mut self, axis: Axis) -> Result<ExplorerState> {
        let errors = self.view.errors;
        let labels = errors.labels();

        writeln!(self.out, "Select the label you want to filter.")?;
        writeln!(self.out, "0. Back")?;
        for (i, label) in labels.iter().enumerate() {
            writeln!(self.out, "{}. Label {}", i + 1, label)?;
        }

        Ok(match self.read_choice(labels.len())? {
            None => ExplorerState::Finished,
            Some(0) => ExplorerState::TopMenu,
            Some(k) => match labels.get(k - 1) {
                Some(label) => ExplorerState::ViewingBucket(axis, label),
                None => ExplorerState::LabelFilterMenu(axis),
            },
        })
    }

    fn view_bucket(&mut self, axis: Axis, label: Label) -> Result<()> {
        writeln!(
            self.out,
            "Plotting misclassified examples for the {} label {}\n",
            axis, label
        )?;

        let (indices, overlay) = bucket_view(&self.view, axis, label)?;
        let title = format!("{} label: {}", axis.title(), label);
        self.renderer
            .render_images(self.view.examples, &indices, &overlay, &title)
    }

    fn sweep_prompt(&mut self) -> Result<ExplorerState> {
        write!(
            self.out,
            "Press ENTER to see all the misclassified examples unsorted one by one, or q to exit. "
        )?;
        self.out.flush()?;

        Ok(match self.input.read_line()? {
            None => ExplorerState::Finished,
            Some(text) if text.starts_with(|c: char| c == 'q' || c == 'Q') => ExplorerState::Finished,
            Some(_) => ExplorerState::UnsortedSweep,
        })
    }

    fn sweep(&mut self) -> Result<()> {
        writeln!(self.out, "Plotting incorrectly classified images ...")?;
        self.renderer.render_sweep(
            self.view.examples,
            self.view.true_labels,
            self.view.predicted_labels,
            true,
        )
    }

    /// Prompt until the input is an integer in `0..=max`; `None` on end of input.
    fn read_choice(&mut self, max: usize) -> Result<Option<usize>> {
        loop {
            write!(self.out, ">> ")?;
            self.out.flush()?;

            let Some(line) = self.input.read_line()? else {
                return Ok(None);
            };
            match line.trim().parse::<usize>() {
                Ok(n) if n <= max => return Ok(Some(n)),
                _ => {
                    self.invalid_inputs += 1;
                    tracing::debug!("Rejected menu input {:?} (valid: 0..={})", line, max);
                }
            }
        }
    }
}
