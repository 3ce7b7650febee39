//! Feed-forward network defined by a JSON architecture and JSON weights.

use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::predict::Classifier;

/// Activation applied after a dense layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// Identity.
    #[default]
    Linear,
    /// max(0, x).
    Relu,
    /// Logistic sigmoid.
    Sigmoid,
    /// Hyperbolic tangent.
    Tanh,
    /// Row-wise softmax.
    Softmax,
}

impl Activation {
    fn apply(self, z: &mut Array2<f32>) {
        match self {
            Activation::Linear => {}
            Activation::Relu => z.mapv_inplace(|v| v.max(0.0)),
            Activation::Sigmoid => z.mapv_inplace(|v| 1.0 / (1.0 + (-v).exp())),
            Activation::Tanh => z.mapv_inplace(f32::tanh),
            Activation::Softmax => {
                for mut row in z.axis_iter_mut(Axis(0)) {
                    let max = row.fold(f32::NEG_INFINITY, |m, &v| m.max(v));
                    row.mapv_inplace(|v| (v - max).exp());
                    let sum = row.sum();
                    if sum > 0.0 {
                        row.mapv_inplace(|v| v / sum);
                    }
                }
            }
        }
    }
}

/// Architecture of one dense layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayerConfig {
    /// Output units.
    pub units: usize,
    /// Activation after the affine map.
    #[serde(default)]
    pub activation: Activation,
}

/// Architecture of a [`DenseModel`] (`model.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseModelConfig {
    /// Number of input features.
    pub input_dim: usize,
    /// Layers from input to output.
    pub layers: Vec<DenseLayerConfig>,
}

impl DenseModelConfig {
    /// Number of output classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.layers.last().map_or(0, |l| l.units)
    }
}

/// Parameters of one dense layer (an entry of `weights.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayerWeights {
    /// Kernel as `input rows × units columns`.
    pub kernel: Vec<Vec<f32>>,
    /// Bias, one per unit.
    pub bias: Vec<f32>,
}

#[derive(Debug, Clone)]
struct DenseLayer {
    kernel: Array2<f32>,
    bias: Array1<f32>,
    activation: Activation,
}

/// A feed-forward network of dense layers.
#[derive(Debug, Clone)]
pub struct DenseModel {
    config: DenseModelConfig,
    layers: Vec<DenseLayer>,
}

impl DenseModel {
    /// Assemble a model from its architecture and weights.
    ///
    /// # Errors
    ///
    /// - [`ModelError::Config`] for an empty architecture or a layer count mismatch
    /// - [`ModelError::ShapeMismatch`] if a kernel or bias has the wrong size
    pub fn new(config: DenseModelConfig, weights: Vec<DenseLayerWeights>) -> Result<Self> {
        if config.layers.is_empty() {
            return Err(ModelError::Config("model has no layers".to_string()));
        }
        if config.layers.len() != weights.len() {
            return Err(ModelError::Config(format!(
                "architecture has {} layers but {} weight entries were given",
                config.layers.len(),
                weights.len()
            )));
        }

        let mut layers = Vec::with_capacity(weights.len());
        let mut fan_in = config.input_dim;

        for (i, (layer, w)) in config.layers.iter().zip(weights).enumerate() {
            if w.kernel.len() != fan_in || w.kernel.iter().any(|row| row.len() != layer.units) {
                return Err(ModelError::ShapeMismatch(format!(
                    "layer {} kernel must be {} x {}",
                    i, fan_in, layer.units
                )));
            }
            if w.bias.len() != layer.units {
                return Err(ModelError::ShapeMismatch(format!(
                    "layer {} bias has {} values, expected {}",
                    i,
                    w.bias.len(),
                    layer.units
                )));
            }

            let flat: Vec<f32> = w.kernel.into_iter().flatten().collect();
            let kernel = Array2::from_shape_vec((fan_in, layer.units), flat)
                .map_err(|e| ModelError::ShapeMismatch(e.to_string()))?;

            layers.push(DenseLayer {
                kernel,
                bias: Array1::from(w.bias),
                activation: layer.activation,
            });
            fan_in = layer.units;
        }

        Ok(Self { config, layers })
    }

    /// The architecture.
    #[must_use]
    pub fn config(&self) -> &DenseModelConfig {
        &self.config
    }

    /// Current parameters in `weights.json` form.
    #[must_use]
    pub fn weights(&self) -> Vec<DenseLayerWeights> {
        self.layers
            .iter()
            .map(|l| DenseLayerWeights {
                kernel: l.kernel.rows().into_iter().map(|r| r.to_vec()).collect(),
                bias: l.bias.to_vec(),
            })
            .collect()
    }
}

impl Classifier for DenseModel {
    fn n_classes(&self) -> usize {
        self.config.n_classes()
    }

    fn predict(&self, x: ArrayView2<'_, f32>) -> Result<Array2<f32>> {
        if x.ncols() != self.config.input_dim {
            return Err(ModelError::ShapeMismatch(format!(
                "model expects {} input features, got {}",
                self.config.input_dim,
                x.ncols()
            )));
        }

        let mut h = x.to_owned();
        for layer in &self.layers {
            let mut z = h.dot(&layer.kernel) + &layer.bias;
            layer.activation.apply(&mut z);
            h = z;
        }
        Ok(h)
    }
}
