//! Reading and writing model folders.
//!
//! A model folder holds the architecture in [`MODEL_FILE`] and the trained
//! parameters in [`WEIGHTS_FILE`].
//!
//! # Example
//!
//! ```rust,ignore
//! use misclass_models::{JsonModelLoader, ModelLoader};
//!
//! let model = JsonModelLoader.load("runs/mnist".as_ref())?;
//! let probs = model.predict(x.view())?;
//! ```

use std::fs;
use std::path::Path;

use crate::dense::{DenseLayerWeights, DenseModel, DenseModelConfig};
use crate::error::{ModelError, Result};
use crate::predict::Classifier;

/// Architecture file name inside a model folder.
pub const MODEL_FILE: &str = "model.json";

/// Weights file name inside a model folder.
pub const WEIGHTS_FILE: &str = "weights.json";

/// Loads a trained classifier from a folder.
pub trait ModelLoader {
    /// Load the model stored in `folder`.
    fn load(&self, folder: &Path) -> Result<Box<dyn Classifier>>;
}

/// Loads [`DenseModel`]s from `model.json` + `weights.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonModelLoader;

impl JsonModelLoader {
    /// Load the concrete dense model stored in `folder`.
    pub fn load_dense(&self, folder: &Path) -> Result<DenseModel> {
        let model_path = folder.join(MODEL_FILE);
        if !model_path.exists() {
            return Err(ModelError::Config(format!(
                "model definition not found at {:?}",
                model_path
            )));
        }
        let weights_path = folder.join(WEIGHTS_FILE);
        if !weights_path.exists() {
            return Err(ModelError::Config(format!(
                "model weights not found at {:?}",
                weights_path
            )));
        }

        let config: DenseModelConfig = serde_json::from_str(&fs::read_to_string(&model_path)?)?;
        let weights: Vec<DenseLayerWeights> =
            serde_json::from_str(&fs::read_to_string(&weights_path)?)?;

        tracing::debug!(
            "Loaded model from {:?}: {} inputs, {} layers, {} classes",
            folder,
            config.input_dim,
            config.layers.len(),
            config.n_classes()
        );

        DenseModel::new(config, weights)
    }
}

impl ModelLoader for JsonModelLoader {
    fn load(&self, folder: &Path) -> Result<Box<dyn Classifier>> {
        Ok(Box::new(self.load_dense(folder)?))
    }
}

/// Write `model` into `folder` so that [`JsonModelLoader`] can read it back.
///
/// The folder is created if needed.
pub fn save_model(model: &DenseModel, folder: &Path) -> Result<()> {
    fs::create_dir_all(folder)?;
    fs::write(
        folder.join(MODEL_FILE),
        serde_json::to_string_pretty(model.config())?,
    )?;
    fs::write(
        folder.join(WEIGHTS_FILE),
        serde_json::to_string(&model.weights())?,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::{Activation, DenseLayerConfig};
    use ndarray::array;

    fn model() -> DenseModel {
        let config = DenseModelConfig {
            input_dim: 2,
            layers: vec![DenseLayerConfig {
                units: 3,
                activation: Activation::Softmax,
            }],
        };
        let weights = vec![DenseLayerWeights {
            kernel: vec![vec![1.0, 0.0, -1.0], vec![0.0, 1.0, -1.0]],
            bias: vec![0.0, 0.0, 0.0],
        }];
        DenseModel::new(config, weights).unwrap()
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("run");
        save_model(&model(), &folder).unwrap();

        let loaded = JsonModelLoader.load(&folder).unwrap();
        assert_eq!(loaded.n_classes(), 3);

        let probs = loaded.predict(array![[1.0, 0.0]].view()).unwrap();
        assert_eq!(probs.dim(), (1, 3));
        assert!(probs[[0, 0]] > probs[[0, 1]]);
    }

    #[test]
    fn test_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonModelLoader.load_dense(dir.path()).unwrap_err();
        assert!(err.to_string().contains(MODEL_FILE));

        fs::write(
            dir.path().join(MODEL_FILE),
            r#"{"input_dim": 2, "layers": [{"units": 2}]}"#,
        )
        .unwrap();
        let err = JsonModelLoader.load_dense(dir.path()).unwrap_err();
        assert!(err.to_string().contains(WEIGHTS_FILE));
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MODEL_FILE), "layers: [").unwrap();
        fs::write(dir.path().join(WEIGHTS_FILE), "[]").unwrap();
        assert!(matches!(
            JsonModelLoader.load(dir.path()),
            Err(ModelError::Json(_))
        ));
    }
}
