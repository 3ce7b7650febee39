//! # misclass_explore
//!
//! Interactive exploration of misclassified examples.
//!
//! This crate provides:
//! - [`Explorer`], the menu state machine driving a console session
//! - [`InputSource`] with [`BufReadInput`] (stdin) and [`ScriptedInput`]
//! - [`Renderer`], the drawing collaborator, and the terminal [`TextRenderer`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use misclass_explore::{BufReadInput, ErrorView, Explorer, TextRenderer};
//!
//! let view = ErrorView::new(&examples, &true_labels, &predicted, &errors)?;
//! let mut explorer = Explorer::new(view, BufReadInput::stdin(), std::io::stdout(), TextRenderer::stdout());
//! explorer.run()?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod explorer;
mod input;
mod renderer;
mod text;

pub use error::{ExploreError, Result};
pub use explorer::{bucket_view, ErrorView, Explorer, ExplorerState};
pub use input::{BufReadInput, InputSource, ScriptedInput};
pub use renderer::Renderer;
pub use text::{cell_intensity, TextRenderer};
