//! Classifier capability
//!
//! Any backend that yields a per-class probability distribution for one
//! input row. Which class is "default" is decided by the bundle, not here.

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// Index of the default-risk class in the classifier's output.
/// Resolved once from the bundle manifest and shared by scorer and ranker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositiveClass(pub usize);

impl PositiveClass {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Default for PositiveClass {
    fn default() -> Self {
        PositiveClass(1)
    }
}

/// Classifier backends (logistic, ONNX, ...)
pub trait Classifier: Send + Sync {
    /// Backend name for logs and results
    fn name(&self) -> &str;

    /// Number of input features expected
    fn feature_count(&self) -> usize;

    /// Number of classes in the output distribution
    fn class_count(&self) -> usize;

    /// Per-class probabilities for one input row, in class-index order
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError>;
}
