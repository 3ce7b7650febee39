//! misclass CLI: evaluate a trained model and browse its mistakes.

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use misclass::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "misclass")]
#[command(author, version)]
#[command(about = "Inspect misclassified examples of a trained classifier")]
#[command(long_about = "misclass: confusion matrix, per-label accuracy and an interactive viewer
for the examples a trained model gets wrong.

EXAMPLES:
  # Analyze the training set with the model in ./model
  misclass model

  # Test set, confusion matrix colored per row
  misclass model 1 test

  # Use a quarter of the data from another archive
  misclass model 0 train --dataset data/digits.npz --data-reduction 4

The model folder must contain model.json and weights.json.")]
struct Cli {
    /// Folder holding model.json and weights.json
    #[arg(default_value = ".", value_name = "FOLDER")]
    folder: PathBuf,

    /// Display mode: 0 for linear, anything else for compressed per-row colors
    #[arg(default_value_t = 0, value_name = "MODE", allow_negative_numbers = true)]
    mode: i64,

    /// Split to analyze: train or test
    #[arg(default_value_t = Split::Train, value_name = "SPLIT")]
    split: Split,

    /// npz archive with x_train, y_train, x_test and y_test
    #[arg(long, default_value = "mnist.npz", value_name = "PATH")]
    dataset: PathBuf,

    /// Use only the first 1/N of every split
    #[arg(long, value_name = "N")]
    data_reduction: Option<usize>,

    /// Keep targets as a label column instead of one-hot vectors
    #[arg(long)]
    no_categorical: bool,

    /// Labels that never occur: fail, skip or undefined
    #[arg(long, default_value = "fail", value_name = "POLICY")]
    absent_labels: AbsentLabelPolicy,

    /// Maximum number of images drawn at once
    #[arg(long, default_value = "64", value_name = "N")]
    max_images: usize,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> ObserveConfig {
        ObserveConfig {
            folder: self.folder.clone(),
            mode: DisplayMode::from_code(self.mode),
            split: self.split,
            format: FormatOptions {
                to_categorical: !self.no_categorical,
                data_reduction: self.data_reduction,
                return_labels: true,
            },
            absent_labels: self.absent_labels,
            max_images: self.max_images,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::filter::LevelFilter::from_level(log_level))
        .init();

    let config = cli.config();
    tracing::debug!(
        "Configuration: {}",
        serde_json::to_string(&config).context("Failed to serialize configuration")?
    );

    let renderer = TextRenderer::stdout().with_max_images(config.max_images);
    observe_results(
        &NpzDatasetProvider::new(cli.dataset.clone()),
        &StandardFormatter,
        &JsonModelLoader,
        renderer,
        BufReadInput::stdin(),
        io::stdout(),
        &config,
    )
    .with_context(|| format!("Failed to observe results of {}", config.folder.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["misclass"]).unwrap();
        assert_eq!(cli.dataset, PathBuf::from("mnist.npz"));
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.config(), ObserveConfig::default());
    }

    #[test]
    fn test_positionals() {
        let cli = Cli::try_parse_from(["misclass", "models/mnist", "1", "test"]).unwrap();
        let config = cli.config();

        assert_eq!(config.folder, PathBuf::from("models/mnist"));
        assert_eq!(config.mode, DisplayMode::Compressed);
        assert_eq!(config.split, Split::Test);
    }

    #[test]
    fn test_negative_mode_is_compressed() {
        let cli = Cli::try_parse_from(["misclass", ".", "-1"]).unwrap();
        assert_eq!(cli.config().mode, DisplayMode::Compressed);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "misclass",
            "--data-reduction",
            "4",
            "--no-categorical",
            "--absent-labels",
            "undefined",
            "--max-images",
            "16",
            "-vv",
        ])
        .unwrap();
        let config = cli.config();

        assert_eq!(config.format.data_reduction, Some(4));
        assert!(!config.format.to_categorical);
        assert_eq!(config.absent_labels, AbsentLabelPolicy::Undefined);
        assert_eq!(config.max_images, 16);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Cli::try_parse_from(["misclass", ".", "zero"]).is_err());
        assert!(Cli::try_parse_from(["misclass", ".", "0", "yes"]).is_err());
        assert!(Cli::try_parse_from(["misclass", "--absent-labels", "ignore"]).is_err());
    }
}
