//! Model Module - Classifier backends & scoring
//!
//! Inference only ever sees an assembled FeatureVector.
//! Backend is chosen by the bundle manifest.

pub mod bundle;
pub mod classifier;
pub mod logistic;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod scorer;
pub mod threshold;

// Re-export common types
pub use bundle::{BundleMetadata, ModelBundle};
pub use classifier::{Classifier, PositiveClass};
pub use scorer::{score, ScoreResult};
pub use threshold::{Verdict, RISK_THRESHOLD};
