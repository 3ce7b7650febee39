//! Integration tests for the observe pipeline.
//!
//! These tests drive `observe_results` end to end with in-memory
//! collaborators and synthetic data.

use std::path::Path;

use ndarray::{Array2, Array3, ArrayView2};

use misclass::analysis::{AbsentLabelPolicy, ConfusionMatrix};
use misclass::core::{ConfusionPlotOptions, DisplayMode, Label, LabelSet, Split};
use misclass::data::{
    DatasetFormatter, Examples, FormatOptions, FormattedDataset, LabeledSplit, RawDataset,
    StandardFormatter,
};
use misclass::explore::{Renderer, ScriptedInput};
use misclass::models::{Classifier, ModelLoader};
use misclass::{observe_results, ObserveConfig};

/// Classifier reading its answer from the first pixel: class index `k` is
/// stored as `k / 10`.
struct PixelClassifier {
    n_classes: usize,
}

impl Classifier for PixelClassifier {
    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict(&self, x: ArrayView2<'_, f32>) -> misclass::models::Result<Array2<f32>> {
        let mut probs = Array2::zeros((x.nrows(), self.n_classes));
        for (row, example) in x.outer_iter().enumerate() {
            let class = (example[0] * 10.0).round() as usize;
            probs[[row, class.min(self.n_classes - 1)]] = 1.0;
        }
        Ok(probs)
    }
}

struct PixelLoader {
    n_classes: usize,
}

impl ModelLoader for PixelLoader {
    fn load(&self, _folder: &Path) -> misclass::models::Result<Box<dyn Classifier>> {
        Ok(Box::new(PixelClassifier {
            n_classes: self.n_classes,
        }))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Matrix {
        rows: Vec<Vec<usize>>,
        title: String,
        options: ConfusionPlotOptions,
    },
    Images {
        indices: Vec<usize>,
        labels: Vec<Label>,
        title: String,
    },
    Sweep {
        count: usize,
    },
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl Renderer for Recorder {
    fn render_confusion_matrix(
        &mut self,
        cm: &ConfusionMatrix,
        title: &str,
        options: &ConfusionPlotOptions,
    ) -> misclass::explore::Result<()> {
        self.calls.push(Call::Matrix {
            rows: cm.rows().to_vec(),
            title: title.to_string(),
            options: *options,
        });
        Ok(())
    }

    fn render_images(
        &mut self,
        _examples: &Examples,
        indices: &[usize],
        labels: &[Label],
        title: &str,
    ) -> misclass::explore::Result<()> {
        self.calls.push(Call::Images {
            indices: indices.to_vec(),
            labels: labels.to_vec(),
            title: title.to_string(),
        });
        Ok(())
    }

    fn render_sweep(
        &mut self,
        examples: &Examples,
        true_labels: &[Label],
        predicted_labels: &[Label],
        errors_only: bool,
    ) -> misclass::explore::Result<()> {
        assert_eq!(examples.len(), true_labels.len());
        let count = true_labels
            .iter()
            .zip(predicted_labels)
            .filter(|(t, p)| !errors_only || t != p)
            .count();
        self.calls.push(Call::Sweep { count });
        Ok(())
    }
}

fn labels(values: &[i64]) -> Vec<Label> {
    values.iter().copied().map(Label).collect()
}

/// A split whose examples encode `predicted` in their first pixel.
fn split(true_labels: &[i64], predicted: &[usize]) -> LabeledSplit {
    let mut data = Array3::<f32>::zeros((predicted.len(), 2, 2));
    for (i, &p) in predicted.iter().enumerate() {
        data[[i, 0, 0]] = p as f32 / 10.0;
    }
    LabeledSplit::new(Examples::new(data), labels(true_labels)).unwrap()
}

/// Training split of the worked example: true [0,1,2,0], predicted [0,2,2,1].
fn worked_example() -> RawDataset {
    RawDataset::new(split(&[0, 1, 2, 0], &[0, 2, 2, 1]), split(&[1, 2], &[1, 1]))
}

fn run(
    dataset: RawDataset,
    script: &[&str],
    config: &ObserveConfig,
) -> (anyhow::Result<()>, String, Vec<Call>) {
    let provider = move || -> misclass::data::Result<RawDataset> { Ok(dataset.clone()) };
    let mut recorder = Recorder::default();
    let mut out = Vec::new();
    let result = observe_results(
        &provider,
        &StandardFormatter,
        &PixelLoader { n_classes: 3 },
        &mut recorder,
        ScriptedInput::new(script.iter().copied()),
        &mut out,
        config,
    );
    (result, String::from_utf8(out).unwrap(), recorder.calls)
}

#[test]
fn test_pipeline_output_order() {
    let (result, out, calls) = run(worked_example(), &["0", "q"], &ObserveConfig::default());
    result.unwrap();

    let steps = [
        "Loading training and test sets ...",
        "Reshaping training and test sets ...",
        "Loading model from . ...",
        "Calculating predicted labels ...",
        "Results: 2 errors from 4 examples (Accuracy: 0.5)",
        "Drawing confusion matrix ...",
        "Counting misclassified examples ...",
        "Labels that were confused by another value:",
        "    Label 0:   1 mistakes,     1 right answers => Accuracy: 0.5",
        "Labels that were mistakenly chosen:",
        "    Label 2:   1 mistakes,     1 right answers => Accuracy: 0.5",
        "Welcome to the misclassified images viewer!",
    ];
    let mut last = 0;
    for step in steps {
        let pos = out[last..]
            .find(step)
            .unwrap_or_else(|| panic!("missing or out of order: {:?}\n{}", step, out));
        last += pos + step.len();
    }

    assert_eq!(
        calls,
        vec![Call::Matrix {
            rows: vec![vec![1, 0, 0], vec![0, 0, 1], vec![0, 0, 1]],
            title: "Confusion Matrix (Training Set)".to_string(),
            options: DisplayMode::Linear.plot_options(),
        }]
    );
}

#[test]
fn test_pipeline_browse_then_decline_sweep() {
    let (result, _, calls) = run(
        worked_example(),
        &["1", "1", "0", "0", "q"],
        &ObserveConfig::default(),
    );
    result.unwrap();

    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[1],
        Call::Images {
            indices: vec![3],
            labels: labels(&[0]),
            title: "Predicted label: 1".to_string(),
        }
    );
}

#[test]
fn test_pipeline_sweep_on_test_split() {
    let config = ObserveConfig {
        split: Split::Test,
        mode: DisplayMode::Compressed,
        absent_labels: AbsentLabelPolicy::Undefined,
        ..ObserveConfig::default()
    };
    let (result, out, calls) = run(worked_example(), &["0", ""], &config);
    result.unwrap();

    assert!(out.contains("Results: 1 errors from 2 examples (Accuracy: 0.5)"));
    assert!(out.contains("    Label 0:   0 mistakes,     0 right answers => Accuracy: undefined"));
    assert!(out.contains("Plotting incorrectly classified images ..."));
    assert_eq!(
        calls,
        vec![
            Call::Matrix {
                rows: vec![vec![0, 0, 0], vec![0, 1, 0], vec![0, 1, 0]],
                title: "Confusion Matrix (Test Set)".to_string(),
                options: DisplayMode::Compressed.plot_options(),
            },
            Call::Sweep { count: 1 },
        ]
    );
}

#[test]
fn test_pipeline_absent_label_fails_before_report() {
    // Label 0 never occurs in the test split.
    let config = ObserveConfig {
        split: Split::Test,
        ..ObserveConfig::default()
    };
    let (result, out, calls) = run(worked_example(), &[], &config);

    let err = result.unwrap_err();
    assert!(err.to_string().contains("label 0"), "{}", err);
    assert!(!out.contains("Results:"), "{}", out);
    assert!(!out.contains("Drawing confusion matrix ..."));
    assert!(!out.contains("Labels that were confused by another value:"));
    assert!(calls.is_empty(), "{:?}", calls);
}

/// Formats like [`StandardFormatter`] but forgets the largest label.
struct TruncatingFormatter;

impl DatasetFormatter for TruncatingFormatter {
    fn format(
        &self,
        raw: &RawDataset,
        options: &FormatOptions,
    ) -> misclass::data::Result<FormattedDataset> {
        let mut formatted = StandardFormatter.format(raw, options)?;
        let labels = formatted.labels()?.as_slice();
        let kept = labels[..labels.len() - 1].to_vec();
        formatted.labels = Some(LabelSet::new(kept)?);
        Ok(formatted)
    }
}

#[test]
fn test_pipeline_unknown_label_fails_before_report() {
    // True label 2 is missing from the formatter's label set.
    let dataset = RawDataset::new(split(&[0, 1, 2], &[0, 1, 1]), split(&[0], &[0]));
    let provider = move || -> misclass::data::Result<RawDataset> { Ok(dataset.clone()) };
    let mut recorder = Recorder::default();
    let mut out = Vec::new();
    let result = observe_results(
        &provider,
        &TruncatingFormatter,
        &PixelLoader { n_classes: 2 },
        &mut recorder,
        ScriptedInput::default(),
        &mut out,
        &ObserveConfig::default(),
    );

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Unknown label 2"), "{}", err);
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Calculating predicted labels ..."));
    assert!(!out.contains("Results:"), "{}", out);
    assert!(recorder.calls.is_empty());
}

#[test]
fn test_pipeline_absent_label_skip() {
    let config = ObserveConfig {
        split: Split::Test,
        absent_labels: AbsentLabelPolicy::Skip,
        ..ObserveConfig::default()
    };
    let (result, out, _) = run(worked_example(), &[], &config);
    result.unwrap();

    assert!(out.contains("Labels that were confused by another value:"));
    assert!(!out.contains("    Label 0:"));
}

#[test]
fn test_pipeline_model_width_mismatch() {
    // Four model outputs for three known labels.
    let dataset = RawDataset::new(split(&[0, 1, 2], &[0, 1, 2]), split(&[0], &[0]));
    let provider = move || -> misclass::data::Result<RawDataset> { Ok(dataset.clone()) };
    let result = observe_results(
        &provider,
        &StandardFormatter,
        &PixelLoader { n_classes: 4 },
        Recorder::default(),
        ScriptedInput::default(),
        Vec::new(),
        &ObserveConfig::default(),
    );
    assert!(result.is_err());
}

#[test]
fn test_pipeline_data_reduction() {
    let dataset = RawDataset::new(
        split(&[0, 1, 2, 0, 1, 2], &[0, 2, 2, 0, 0, 0]),
        split(&[1, 2], &[1, 1]),
    );
    let mut config = ObserveConfig {
        absent_labels: AbsentLabelPolicy::Undefined,
        ..ObserveConfig::default()
    };
    config.format.data_reduction = Some(2);
    let (result, out, calls) = run(dataset, &[], &config);
    result.unwrap();

    assert!(out.contains("Results: 1 errors from 3 examples"));
    match &calls[0] {
        Call::Matrix { rows, .. } => {
            assert_eq!(rows, &vec![vec![1, 0, 0], vec![0, 0, 1], vec![0, 0, 1]]);
        }
        other => panic!("unexpected call {:?}", other),
    }
}

#[test]
fn test_pipeline_synthetic_data() {
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let n_samples = 200;

    let mut true_labels = Vec::with_capacity(n_samples);
    let mut predicted = Vec::with_capacity(n_samples);
    for _ in 0..n_samples {
        let t = rng.gen_range(0..3usize);
        // Roughly 70% right answers.
        let p = if rng.gen::<f32>() < 0.7 { t } else { rng.gen_range(0..3usize) };
        true_labels.push(t as i64);
        predicted.push(p);
    }
    let expected_errors = true_labels
        .iter()
        .zip(&predicted)
        .filter(|(t, p)| **t as usize != **p)
        .count();

    let dataset = RawDataset::new(split(&true_labels, &predicted), split(&[0, 1, 2], &[0, 1, 2]));
    let (result, out, calls) = run(dataset, &["2", "1", "0", "0", ""], &ObserveConfig::default());
    result.unwrap();

    assert!(out.contains(&format!("Results: {} errors from {} examples", expected_errors, n_samples)));

    match &calls[0] {
        Call::Matrix { rows, .. } => {
            assert_eq!(rows.iter().flatten().sum::<usize>(), n_samples);
            for (i, row) in rows.iter().enumerate() {
                let count = true_labels.iter().filter(|&&t| t == i as i64).count();
                assert_eq!(row.iter().sum::<usize>(), count);
            }
        }
        other => panic!("unexpected call {:?}", other),
    }

    // True label 0 bucket, sorted by predicted label.
    match &calls[1] {
        Call::Images { indices, labels, title } => {
            assert_eq!(title, "True label: 0");
            assert!(labels.windows(2).all(|w| w[0] <= w[1]));
            for (&i, label) in indices.iter().zip(labels) {
                assert_eq!(true_labels[i], 0);
                assert_eq!(Label(predicted[i] as i64), *label);
                assert_ne!(predicted[i], 0);
            }
        }
        other => panic!("unexpected call {:?}", other),
    }

    assert_eq!(calls[2], Call::Sweep { count: expected_errors });
}
