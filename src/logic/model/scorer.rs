//! Risk Scorer
//!
//! Feature vector → classifier → positive-class probability → verdict.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::classifier::{Classifier, PositiveClass};
use super::threshold::{Verdict, RISK_THRESHOLD};
use crate::error::InferenceError;
use crate::logic::features::FeatureVector;

/// Score output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Probability of default (0.0 - 1.0)
    pub probability: f64,
    pub verdict: Verdict,
    pub threshold: f64,
    /// Class index the probability was read from
    pub positive_class: PositiveClass,
    /// Fingerprint of the scored vector
    pub vector_fingerprint: u32,
    /// Backend name ("logistic", "onnx", ...)
    pub method: String,
    pub inference_time_us: u64,
}

/// Score one vector. No retries: a classifier failure is returned as is.
pub fn score(
    vector: &FeatureVector,
    classifier: &dyn Classifier,
    positive: PositiveClass,
) -> Result<ScoreResult, InferenceError> {
    let start_time = Instant::now();

    if vector.len() != classifier.feature_count() {
        return Err(InferenceError::ShapeMismatch {
            expected: classifier.feature_count(),
            actual: vector.len(),
        });
    }

    let distribution = classifier.predict_proba(vector.as_slice())?;

    if distribution.len() != classifier.class_count() {
        return Err(InferenceError::Backend(format!(
            "{} returned {} class probabilities, declared {}",
            classifier.name(),
            distribution.len(),
            classifier.class_count()
        )));
    }

    let probability = *distribution
        .get(positive.index())
        .ok_or(InferenceError::ClassIndexOutOfRange {
            index: positive.index(),
            classes: distribution.len(),
        })?;

    if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
        return Err(InferenceError::InvalidProbability(probability));
    }

    let result = ScoreResult {
        probability,
        verdict: Verdict::from_probability(probability),
        threshold: RISK_THRESHOLD,
        positive_class: positive,
        vector_fingerprint: vector.fingerprint(),
        method: classifier.name().to_string(),
        inference_time_us: start_time.elapsed().as_micros() as u64,
    };

    log::debug!(
        "Scored vector {:08x} with {}: p={:.4} ({})",
        result.vector_fingerprint,
        result.method,
        result.probability,
        result.verdict
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed distribution and counts calls
    struct FixedClassifier {
        distribution: Vec<f64>,
        calls: AtomicUsize,
    }

    impl FixedClassifier {
        fn new(distribution: Vec<f64>) -> Self {
            Self { distribution, calls: AtomicUsize::new(0) }
        }
    }

    impl Classifier for FixedClassifier {
        fn name(&self) -> &str {
            "fixed"
        }
        fn feature_count(&self) -> usize {
            2
        }
        fn class_count(&self) -> usize {
            self.distribution.len()
        }
        fn predict_proba(&self, _features: &[f64]) -> Result<Vec<f64>, InferenceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.distribution.clone())
        }
    }

    struct FailingClassifier;

    impl Classifier for FailingClassifier {
        fn name(&self) -> &str {
            "failing"
        }
        fn feature_count(&self) -> usize {
            2
        }
        fn class_count(&self) -> usize {
            2
        }
        fn predict_proba(&self, _features: &[f64]) -> Result<Vec<f64>, InferenceError> {
            Err(InferenceError::Backend("unsupported value range".to_string()))
        }
    }

    fn vector() -> FeatureVector {
        FeatureVector::new(1, vec![1.0, 2.0])
    }

    #[test]
    fn test_selects_positive_class_not_index_zero() {
        let c = FixedClassifier::new(vec![0.8, 0.2]);
        let result = score(&vector(), &c, PositiveClass(1)).unwrap();
        assert_eq!(result.probability, 0.2);
        assert_eq!(result.verdict, Verdict::LowRisk);
        assert_eq!(result.positive_class, PositiveClass(1));
    }

    #[test]
    fn test_selects_class_zero_when_configured() {
        let c = FixedClassifier::new(vec![0.8, 0.2]);
        let result = score(&vector(), &c, PositiveClass(0)).unwrap();
        assert_eq!(result.probability, 0.8);
        assert_eq!(result.verdict, Verdict::HighRisk);
        assert_eq!(result.positive_class, PositiveClass(0));
    }

    #[test]
    fn test_threshold_boundary() {
        let exactly = FixedClassifier::new(vec![0.5, 0.5]);
        let just_below = FixedClassifier::new(vec![0.500001, 0.499999]);

        assert_eq!(score(&vector(), &exactly, PositiveClass(1)).unwrap().verdict, Verdict::HighRisk);
        assert_eq!(score(&vector(), &just_below, PositiveClass(1)).unwrap().verdict, Verdict::LowRisk);
    }

    #[test]
    fn test_deterministic() {
        let c = FixedClassifier::new(vec![0.3, 0.7]);
        let a = score(&vector(), &c, PositiveClass(1)).unwrap();
        let b = score(&vector(), &c, PositiveClass(1)).unwrap();
        assert_eq!(a.probability, b.probability);
        assert_eq!(a.verdict, b.verdict);
        assert_eq!(a.vector_fingerprint, b.vector_fingerprint);
    }

    #[test]
    fn test_length_checked_before_inference() {
        let c = FixedClassifier::new(vec![0.3, 0.7]);
        let short = FeatureVector::new(1, vec![1.0]);

        let err = score(&short, &c, PositiveClass(1)).unwrap_err();
        assert_eq!(err, InferenceError::ShapeMismatch { expected: 2, actual: 1 });
        assert_eq!(c.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_class_index_out_of_range() {
        let c = FixedClassifier::new(vec![1.0]);
        let err = score(&vector(), &c, PositiveClass(1)).unwrap_err();
        assert_eq!(err, InferenceError::ClassIndexOutOfRange { index: 1, classes: 1 });
    }

    #[test]
    fn test_invalid_probability() {
        let c = FixedClassifier::new(vec![-0.2, 1.2]);
        assert!(matches!(
            score(&vector(), &c, PositiveClass(1)),
            Err(InferenceError::InvalidProbability(_))
        ));
    }

    /// Declares two classes, returns one
    struct TruncatingClassifier;

    impl Classifier for TruncatingClassifier {
        fn name(&self) -> &str {
            "truncating"
        }
        fn feature_count(&self) -> usize {
            2
        }
        fn class_count(&self) -> usize {
            2
        }
        fn predict_proba(&self, _features: &[f64]) -> Result<Vec<f64>, InferenceError> {
            Ok(vec![0.9])
        }
    }

    #[test]
    fn test_rejects_undeclared_class_count() {
        let err = score(&vector(), &TruncatingClassifier, PositiveClass(0)).unwrap_err();
        assert!(matches!(&err, InferenceError::Backend(msg) if msg.contains("returned 1")));
    }

    #[test]
    fn test_backend_error_surfaces() {
        let err = score(&vector(), &FailingClassifier, PositiveClass(1)).unwrap_err();
        assert!(matches!(err, InferenceError::Backend(_)));
    }
}
