//! Logistic Classifier - native backend
//!
//! Standardized logistic regression exported as JSON weights:
//! `z = intercept + Σ coef_i · (x_i − mean_i) / scale_i`, `p = σ(z)`.
//! Output is `[1 − p, p]`, i.e. class 1 is default.

use serde::{Deserialize, Serialize};

use super::classifier::Classifier;
use crate::error::InferenceError;

/// Weight for one feature (standardization + coefficient)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeight {
    pub name: String,
    pub mean: f64,
    pub scale: f64,
    pub coef: f64,
}

/// Weights file layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticWeights {
    pub intercept: f64,
    pub features: Vec<FeatureWeight>,
}

impl LogisticWeights {
    /// Check that the weights line up with a schema, in order
    pub fn validate<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<(), String> {
        let names: Vec<&str> = names.into_iter().collect();

        if names.len() != self.features.len() {
            return Err(format!(
                "weights cover {} features, schema has {}",
                self.features.len(),
                names.len()
            ));
        }

        for (i, (weight, name)) in self.features.iter().zip(&names).enumerate() {
            if weight.name != *name {
                return Err(format!(
                    "weight #{} is for '{}', schema expects '{}'",
                    i, weight.name, name
                ));
            }
            if weight.scale <= 0.0 || !weight.scale.is_finite() {
                return Err(format!("scale for '{}' must be positive", weight.name));
            }
            if !weight.mean.is_finite() || !weight.coef.is_finite() {
                return Err(format!("weight for '{}' is not finite", weight.name));
            }
        }

        if !self.intercept.is_finite() {
            return Err("intercept is not finite".to_string());
        }

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct LogisticClassifier {
    weights: LogisticWeights,
}

impl LogisticClassifier {
    pub fn new(weights: LogisticWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &LogisticWeights {
        &self.weights
    }

    /// Per-feature log-odds contributions relative to the training mean
    pub fn contributions(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError> {
        self.check_shape(features)?;
        Ok(self
            .weights
            .features
            .iter()
            .zip(features)
            .map(|(w, x)| w.coef * (x - w.mean) / w.scale)
            .collect())
    }

    /// Log-odds of the default class
    pub fn log_odds(&self, features: &[f64]) -> Result<f64, InferenceError> {
        let contributions = self.contributions(features)?;
        Ok(self.weights.intercept + contributions.iter().sum::<f64>())
    }

    fn check_shape(&self, features: &[f64]) -> Result<(), InferenceError> {
        if features.len() != self.weights.features.len() {
            return Err(InferenceError::ShapeMismatch {
                expected: self.weights.features.len(),
                actual: features.len(),
            });
        }
        Ok(())
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LogisticClassifier {
    fn name(&self) -> &str {
        "logistic"
    }

    fn feature_count(&self) -> usize {
        self.weights.features.len()
    }

    fn class_count(&self) -> usize {
        2
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError> {
        let z = self.log_odds(features)?;
        if !z.is_finite() {
            return Err(InferenceError::Backend(format!("log-odds overflow: {}", z)));
        }
        let p = sigmoid(z);
        Ok(vec![1.0 - p, p])
    }
}
