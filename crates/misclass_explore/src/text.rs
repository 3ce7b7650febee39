//! Terminal renderer drawing with ASCII shades.

use std::io::{self, Stdout, Write};

use ndarray::ArrayView2;

use misclass_analysis::ConfusionMatrix;
use misclass_core::{ensure_same_len, ConfusionPlotOptions, Label};
use misclass_data::Examples;

use crate::error::Result;
use crate::renderer::Renderer;

/// Shades from empty to saturated.
const SHADES: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

fn shade(intensity: f32) -> char {
    let top = SHADES.len() - 1;
    let idx = (intensity.clamp(0.0, 1.0) * top as f32).round() as usize;
    SHADES[idx.min(top)]
}

/// Color intensity in `[0, 1]` of cell `(i, j)` under `options`.
///
/// The reference is the largest counted value of row `i` (`color_by_row`) or
/// of the whole matrix. With `ignore_diagonal`, diagonal cells are left out of
/// the reference and get no intensity (`None`). Values at or above
/// `reference / max_scale_factor` saturate.
#[must_use]
pub fn cell_intensity(
    cm: &ConfusionMatrix,
    i: usize,
    j: usize,
    options: &ConfusionPlotOptions,
) -> Option<f32> {
    if options.ignore_diagonal && i == j {
        return None;
    }

    let n = cm.n_classes();
    let counted = |r: usize, c: usize| !(options.ignore_diagonal && r == c);
    let reference = if options.color_by_row {
        (0..n)
            .filter(|&c| counted(i, c))
            .map(|c| cm.get(i, c))
            .max()
            .unwrap_or(0)
    } else {
        (0..n)
            .flat_map(|r| (0..n).map(move |c| (r, c)))
            .filter(|&(r, c)| counted(r, c))
            .map(|(r, c)| cm.get(r, c))
            .max()
            .unwrap_or(0)
    };

    if reference == 0 {
        return Some(0.0);
    }
    Some((cm.get(i, j) as f32 * options.max_scale_factor / reference as f32).min(1.0))
}

/// Draws to any [`Write`] sink using text only.
#[derive(Debug)]
pub struct TextRenderer<W> {
    out: W,
    max_images: usize,
    columns: usize,
}

impl TextRenderer<Stdout> {
    /// Render to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TextRenderer<W> {
    /// Render to `out`, showing at most 64 images per call, 4 per band.
    pub fn new(out: W) -> Self {
        Self {
            out,
            max_images: 64,
            columns: 4,
        }
    }

    /// Set the maximum number of images drawn per call.
    #[must_use]
    pub fn with_max_images(mut self, max_images: usize) -> Self {
        self.max_images = max_images;
        self
    }

    /// Set the number of images drawn side by side.
    #[must_use]
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    /// Recover the output sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Draw `(index, caption)` items as bands of images.
    fn draw_grid(&mut self, examples: &Examples, items: &[(usize, String)]) -> Result<()> {
        if items.is_empty() {
            writeln!(self.out, "(no examples)")?;
            return Ok(());
        }

        let shown = items.len().min(self.max_images);
        let (h, w) = examples.example_shape();

        for band in items[..shown].chunks(self.columns) {
            let images = band
                .iter()
                .map(|(idx, _)| examples.get(*idx))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            let widths: Vec<usize> = band
                .iter()
                .map(|(_, caption)| caption.chars().count().max(w))
                .collect();

            let captions: Vec<String> = band
                .iter()
                .zip(&widths)
                .map(|((_, caption), &width)| format!("{:<width$}", caption, width = width))
                .collect();
            writeln!(self.out, "{}", captions.join("  ").trim_end())?;

            for r in 0..h {
                let rows: Vec<String> = images
                    .iter()
                    .zip(&widths)
                    .map(|(image, &width)| format!("{:<width$}", image_row(image, r), width = width))
                    .collect();
                writeln!(self.out, "{}", rows.join("  ").trim_end())?;
            }
            writeln!(self.out)?;
        }

        if shown < items.len() {
            writeln!(self.out, "... {} more not shown", items.len() - shown)?;
        }
        Ok(())
    }
}

/// One text row of an image, shaded relative to the image's own maximum.
fn image_row(image: &ArrayView2<'_, f32>, r: usize) -> String {
    let max = image.fold(0.0f32, |m, &v| m.max(v));
    image
        .row(r)
        .iter()
        .map(|&v| if max > 0.0 { shade(v / max) } else { ' ' })
        .collect()
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render_confusion_matrix(
        &mut self,
        cm: &ConfusionMatrix,
        title: &str,
        options: &ConfusionPlotOptions,
    ) -> Result<()> {
        writeln!(self.out, "{}", title)?;

        let mut header = String::from("  true\\pred");
        for label in cm.labels().iter() {
            header.push_str(&format!("{:>8}", label));
        }
        writeln!(self.out, "{}", header)?;

        for (i, label) in cm.labels().iter().enumerate() {
            let mut line = format!("{:>10} ", label);
            for j in 0..cm.n_classes() {
                let mark = cell_intensity(cm, i, j, options).map_or(' ', shade);
                line.push_str(&format!("{:>7}{}", cm.get(i, j), mark));
            }
            writeln!(self.out, "{}", line.trim_end())?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    fn render_images(
        &mut self,
        examples: &Examples,
        indices: &[usize],
        labels: &[Label],
        title: &str,
    ) -> Result<()> {
        ensure_same_len("indices/labels", indices.len(), labels.len())?;

        writeln!(self.out, "=== {} ({} examples) ===", title, indices.len())?;
        let items: Vec<(usize, String)> = indices
            .iter()
            .zip(labels)
            .map(|(&idx, label)| (idx, format!("#{} [{}]", idx, label)))
            .collect();
        self.draw_grid(examples, &items)?;
        self.out.flush()?;
        Ok(())
    }

    fn render_sweep(
        &mut self,
        examples: &Examples,
        true_labels: &[Label],
        predicted_labels: &[Label],
        errors_only: bool,
    ) -> Result<()> {
        ensure_same_len("examples/true labels", examples.len(), true_labels.len())?;
        ensure_same_len("true/predicted labels", true_labels.len(), predicted_labels.len())?;

        let items: Vec<(usize, String)> = true_labels
            .iter()
            .zip(predicted_labels)
            .enumerate()
            .filter(|(_, (t, p))| !errors_only || t != p)
            .map(|(idx, (t, p))| (idx, format!("#{} {} / Predicted label {}", idx, t, p)))
            .collect();

        writeln!(
            self.out,
            "=== {} ({} examples) ===",
            if errors_only { "Incorrectly classified examples" } else { "All examples" },
            items.len()
        )?;
        self.draw_grid(examples, &items)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use misclass_analysis::confusion_matrix;
    use misclass_core::{DisplayMode, LabelSet};
    use ndarray::Array3;

    fn labels(values: &[i64]) -> Vec<Label> {
        values.iter().copied().map(Label).collect()
    }

    fn matrix() -> ConfusionMatrix {
        // rows: [[90, 10, 0], [1, 50, 0], [0, 0, 0]]
        let set = LabelSet::new(labels(&[0, 1, 2])).unwrap();
        let mut truth = Vec::new();
        let mut pred = Vec::new();
        for (t, p, n) in [(0, 0, 90), (0, 1, 10), (1, 0, 1), (1, 1, 50)] {
            truth.extend(std::iter::repeat(Label(t)).take(n));
            pred.extend(std::iter::repeat(Label(p)).take(n));
        }
        confusion_matrix(&truth, &pred, &set).unwrap()
    }

    fn to_string(renderer: TextRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_linear_mode_ignores_diagonal() {
        let cm = matrix();
        let options = DisplayMode::Linear.plot_options();

        assert_eq!(cell_intensity(&cm, 0, 0, &options), None);
        assert_eq!(cell_intensity(&cm, 0, 1, &options), Some(1.0));
        assert!((cell_intensity(&cm, 1, 0, &options).unwrap() - 0.1).abs() < 1e-6);
        assert_eq!(cell_intensity(&cm, 2, 2, &options), None);
    }

    #[test]
    fn test_compressed_mode_is_row_relative_and_capped() {
        let cm = matrix();
        let options = DisplayMode::Compressed.plot_options();

        assert_eq!(cell_intensity(&cm, 0, 0, &options), Some(1.0));
        // 10 * 100 / 90 saturates
        assert_eq!(cell_intensity(&cm, 0, 1, &options), Some(1.0));
        assert_eq!(cell_intensity(&cm, 0, 2, &options), Some(0.0));
        // 1 * 100 / 50 saturates too
        assert_eq!(cell_intensity(&cm, 1, 0, &options), Some(1.0));
        // empty row
        assert_eq!(cell_intensity(&cm, 2, 2, &options), Some(0.0));
    }

    #[test]
    fn test_render_confusion_matrix() {
        let mut renderer = TextRenderer::new(Vec::new());
        renderer
            .render_confusion_matrix(&matrix(), "Confusion Matrix (Test Set)", &DisplayMode::Linear.plot_options())
            .unwrap();
        let text = to_string(renderer);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Confusion Matrix (Test Set)");
        assert!(lines[1].starts_with("  true\\pred"));
        assert!(lines[2].contains("90 "));
        assert!(lines[2].contains("10@"));
    }

    #[test]
    fn test_render_images_in_given_order() {
        let mut data = Array3::<f32>::zeros((3, 2, 3));
        data[[2, 0, 0]] = 1.0;
        let examples = Examples::new(data);

        let mut renderer = TextRenderer::new(Vec::new());
        renderer
            .render_images(&examples, &[2, 0], &labels(&[7, 8]), "True label: 1")
            .unwrap();
        let text = to_string(renderer);

        assert!(text.starts_with("=== True label: 1 (2 examples) ==="));
        let caption_line = text.lines().nth(1).unwrap();
        assert!(caption_line.find("#2 [7]").unwrap() < caption_line.find("#0 [8]").unwrap());
        assert!(text.lines().nth(2).unwrap().starts_with('@'));
    }

    #[test]
    fn test_render_images_respects_cap() {
        let examples = Examples::new(Array3::zeros((5, 1, 1)));
        let mut renderer = TextRenderer::new(Vec::new()).with_max_images(2).with_columns(1);
        renderer
            .render_images(&examples, &[0, 1, 2, 3, 4], &labels(&[0, 0, 0, 0, 0]), "cap")
            .unwrap();
        let text = to_string(renderer);

        assert_eq!(text.matches("#").count(), 2);
        assert!(text.contains("... 3 more not shown"));
    }

    #[test]
    fn test_render_sweep_errors_only() {
        let examples = Examples::new(Array3::zeros((4, 1, 1)));
        let mut renderer = TextRenderer::new(Vec::new());
        renderer
            .render_sweep(&examples, &labels(&[0, 1, 2, 0]), &labels(&[0, 2, 2, 1]), true)
            .unwrap();
        let text = to_string(renderer);

        assert!(text.contains("(2 examples)"));
        assert!(text.contains("#1 1 / Predicted label 2"));
        assert!(text.contains("#3 0 / Predicted label 1"));
        assert!(!text.contains("#0 "));
    }

    #[test]
    fn test_render_empty_bucket() {
        let examples = Examples::new(Array3::zeros((1, 1, 1)));
        let mut renderer = TextRenderer::new(Vec::new());
        renderer.render_images(&examples, &[], &[], "empty").unwrap();
        assert!(to_string(renderer).contains("(no examples)"));
    }

    #[test]
    fn test_render_rejects_bad_index() {
        let examples = Examples::new(Array3::zeros((1, 1, 1)));
        let mut renderer = TextRenderer::new(Vec::new());
        assert!(renderer.render_images(&examples, &[3], &labels(&[0]), "bad").is_err());
    }
}
