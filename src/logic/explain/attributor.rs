//! Attributor capability
//!
//! Produces signed per-feature scores for one vector, one list per class.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::AttributionError;
use crate::logic::features::FeatureVector;
use crate::logic::model::logistic::LogisticClassifier;

/// Raw attributor output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    /// Fingerprint of the vector that was attributed
    pub vector_fingerprint: u32,
    /// `per_class[class][feature]`
    pub per_class: Vec<Vec<f64>>,
}

impl Attribution {
    pub fn for_vector(vector: &FeatureVector, per_class: Vec<Vec<f64>>) -> Self {
        Self {
            vector_fingerprint: vector.fingerprint(),
            per_class,
        }
    }
}

pub trait Attributor: Send + Sync {
    fn name(&self) -> &str;

    fn attribute(&self, vector: &FeatureVector) -> Result<Attribution, AttributionError>;
}

/// Exact additive attribution for the logistic backend.
///
/// Class 1 gets `coef · (x − mean) / scale` per feature (log-odds units,
/// relative to the training mean); class 0 gets the negation.
pub struct LinearAttributor {
    model: Arc<LogisticClassifier>,
}

impl LinearAttributor {
    pub fn new(model: Arc<LogisticClassifier>) -> Self {
        Self { model }
    }
}

impl Attributor for LinearAttributor {
    fn name(&self) -> &str {
        "linear"
    }

    fn attribute(&self, vector: &FeatureVector) -> Result<Attribution, AttributionError> {
        let positive = self
            .model
            .contributions(vector.as_slice())
            .map_err(|e| AttributionError::Backend(e.to_string()))?;
        let negative = positive.iter().map(|phi| -phi).collect();

        Ok(Attribution::for_vector(vector, vec![negative, positive]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::logistic::{FeatureWeight, LogisticWeights};

    #[test]
    fn test_linear_attribution_classes_are_mirrored() {
        let model = Arc::new(LogisticClassifier::new(LogisticWeights {
            intercept: -1.0,
            features: vec![
                FeatureWeight { name: "A".to_string(), mean: 0.0, scale: 1.0, coef: 2.0 },
                FeatureWeight { name: "B".to_string(), mean: 5.0, scale: 5.0, coef: 1.0 },
            ],
        }));
        let attributor = LinearAttributor::new(model);
        let vector = FeatureVector::new(1, vec![1.0, 0.0]);

        let attribution = attributor.attribute(&vector).unwrap();
        assert_eq!(attribution.vector_fingerprint, vector.fingerprint());
        assert_eq!(attribution.per_class[1], vec![2.0, -1.0]);
        assert_eq!(attribution.per_class[0], vec![-2.0, 1.0]);
    }

    #[test]
    fn test_linear_attribution_shape_error() {
        let model = Arc::new(LogisticClassifier::new(LogisticWeights {
            intercept: 0.0,
            features: vec![FeatureWeight { name: "A".to_string(), mean: 0.0, scale: 1.0, coef: 1.0 }],
        }));
        let attributor = LinearAttributor::new(model);
        let vector = FeatureVector::new(1, vec![1.0, 2.0]);

        assert!(matches!(attributor.attribute(&vector), Err(AttributionError::Backend(_))));
    }
}
