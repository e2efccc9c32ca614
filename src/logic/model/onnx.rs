//! ONNX Classifier - ONNX Runtime Integration
//!
//! Runs an ONNX model exported from the training notebook
//! (probability output as a float tensor, one row per input).

use std::path::Path;

use ndarray::Array2;
use parking_lot::Mutex;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Value;

use super::classifier::Classifier;
use crate::error::{BundleError, InferenceError};

pub struct OnnxClassifier {
    /// Running a session needs exclusive access
    session: Mutex<Session>,
    output_name: String,
    feature_count: usize,
    class_count: usize,
    model_path: String,
}

impl OnnxClassifier {
    /// Load an ONNX model file.
    ///
    /// `output` names the probability tensor; when absent the last graph
    /// output is used (the label output comes first in sklearn exports).
    pub fn load(
        model_path: &Path,
        output: Option<&str>,
        feature_count: usize,
        class_count: usize,
    ) -> Result<Self, BundleError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(BundleError::Onnx(format!("Model not found: {}", model_path.display())));
        }

        let session = Session::builder()
            .map_err(|e| BundleError::Onnx(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| BundleError::Onnx(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| BundleError::Onnx(format!("Failed to load model: {}", e)))?;

        let output_name = match output {
            Some(name) => {
                if !session.outputs.iter().any(|o| o.name == name) {
                    return Err(BundleError::Onnx(format!("Model has no output named '{}'", name)));
                }
                name.to_string()
            }
            None => session
                .outputs
                .last()
                .map(|o| o.name.clone())
                .ok_or_else(|| BundleError::Onnx("No output defined".to_string()))?,
        };

        log::info!("ONNX model loaded successfully (output: {})", output_name);

        Ok(Self {
            session: Mutex::new(session),
            output_name,
            feature_count,
            class_count,
            model_path: model_path.display().to_string(),
        })
    }
}

impl Classifier for OnnxClassifier {
    fn name(&self) -> &str {
        "onnx"
    }

    fn feature_count(&self) -> usize {
        self.feature_count
    }

    fn class_count(&self) -> usize {
        self.class_count
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if features.len() != self.feature_count {
            return Err(InferenceError::ShapeMismatch {
                expected: self.feature_count,
                actual: features.len(),
            });
        }

        let input_data: Vec<f32> = features.iter().map(|&x| x as f32).collect();
        let input_array = Array2::<f32>::from_shape_vec((1, self.feature_count), input_data)
            .map_err(|e| InferenceError::Backend(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError::Backend(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError::Backend(format!("{}: inference failed: {}", self.model_path, e)))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| InferenceError::Backend("No output".to_string()))?;

        let output_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::Backend(format!("Extract error: {}", e)))?;

        let data = output_tensor.1;

        if data.len() < self.class_count {
            return Err(InferenceError::Backend(format!(
                "Expected {} class probabilities, got {}",
                self.class_count,
                data.len()
            )));
        }

        Ok(data[..self.class_count].iter().map(|&p| p as f64).collect())
    }
}
