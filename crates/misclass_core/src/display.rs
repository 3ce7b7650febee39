//! Confusion matrix display policy.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How the confusion matrix should be colored.
///
/// This only affects rendering; the counts are identical in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Linear scale with the diagonal suppressed, emphasising confusions.
    #[default]
    Linear,
    /// Capped scale with the diagonal shown, colored relative to each row.
    Compressed,
}

impl DisplayMode {
    /// Map the numeric CLI mode: `0` is linear, anything else compressed.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        if code == 0 {
            DisplayMode::Linear
        } else {
            DisplayMode::Compressed
        }
    }

    /// Rendering parameters for this mode.
    #[must_use]
    pub const fn plot_options(self) -> ConfusionPlotOptions {
        match self {
            DisplayMode::Linear => ConfusionPlotOptions {
                ignore_diagonal: true,
                max_scale_factor: 1.0,
                color_by_row: false,
            },
            DisplayMode::Compressed => ConfusionPlotOptions {
                ignore_diagonal: false,
                max_scale_factor: 100.0,
                color_by_row: true,
            },
        }
    }
}

impl FromStr for DisplayMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(DisplayMode::Linear),
            "compressed" => Ok(DisplayMode::Compressed),
            other => other
                .parse::<i64>()
                .map(DisplayMode::from_code)
                .map_err(|_| CoreError::InvalidInput(format!("unknown display mode '{}'", other))),
        }
    }
}

/// Parameters handed to the renderer together with the raw counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfusionPlotOptions {
    /// Leave the diagonal out of the color scale.
    pub ignore_diagonal: bool,
    /// Scale compression factor; values reaching `max / factor` saturate.
    pub max_scale_factor: f32,
    /// Normalize colors per row instead of over the whole matrix.
    pub color_by_row: bool,
}

impl Default for ConfusionPlotOptions {
    fn default() -> Self {
        DisplayMode::default().plot_options()
    }
}
