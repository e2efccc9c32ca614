//! Error handling

use thiserror::Error;

pub type RiskResult<T> = Result<T, RiskError>;

/// Input assembly faults (user-correctable)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssemblyError {
    #[error("Missing value for feature '{feature}'")]
    MissingFeature { feature: String },

    #[error("Value '{value}' for feature '{feature}' is not a number")]
    TypeCoercion { feature: String, value: String },

    #[error("Unknown category '{label}' for feature '{feature}'")]
    UnknownCategory { feature: String, label: String },

    #[error("Feature '{feature}' was supplied more than once")]
    ConflictingInputs { feature: String },
}

impl AssemblyError {
    /// Name of the offending feature
    pub fn feature(&self) -> &str {
        match self {
            AssemblyError::MissingFeature { feature }
            | AssemblyError::TypeCoercion { feature, .. }
            | AssemblyError::UnknownCategory { feature, .. }
            | AssemblyError::ConflictingInputs { feature } => feature,
        }
    }
}

/// Classifier faults (not user-correctable)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("Classifier expects {expected} features, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Positive class index {index} is out of range for {classes} classes")]
    ClassIndexOutOfRange { index: usize, classes: usize },

    #[error("Classifier returned an invalid probability: {0}")]
    InvalidProbability(f64),

    #[error("Classifier backend failed: {0}")]
    Backend(String),
}

/// Explanation-only faults (degrade gracefully)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttributionError {
    #[error("Attributor returned {actual} scores for {expected} features")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Attribution does not belong to the scored vector (expected {expected:08x}, got {actual:08x})")]
    VectorMismatch { expected: u32, actual: u32 },

    #[error("Vector was assembled for layout {actual:08x}, schema is {expected:08x}")]
    LayoutMismatch { expected: u32, actual: u32 },

    #[error("Attributor has no output for class index {index} ({classes} classes)")]
    ClassIndexOutOfRange { index: usize, classes: usize },

    #[error("Attribution score for feature '{feature}' is not finite")]
    NonFiniteScore { feature: String },

    #[error("Attributor backend failed: {0}")]
    Backend(String),
}

/// Model bundle loading / validation faults
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("Failed to read bundle artifact '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse bundle artifact '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid model bundle: {0}")]
    Invalid(String),

    #[error(transparent)]
    Layout(#[from] crate::logic::features::LayoutMismatchError),

    #[error("Failed to load ONNX model: {0}")]
    Onnx(String),
}

/// Top-level error for one assessment
#[derive(Debug, Error)]
pub enum RiskError {
    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Attribution(#[from] AttributionError),

    #[error(transparent)]
    Bundle(#[from] BundleError),
}

impl RiskError {
    /// Message safe to show to the person filling in the form.
    /// Input faults are shown verbatim; everything else is generic.
    pub fn user_message(&self) -> String {
        match self {
            RiskError::Assembly(e) => e.to_string(),
            RiskError::Inference(e) => {
                log::error!("Inference error: {}", e);
                "Unable to compute a risk score for this profile".to_string()
            }
            RiskError::Attribution(e) => {
                log::warn!("Attribution error: {}", e);
                "Explanation is not available for this profile".to_string()
            }
            RiskError::Bundle(e) => {
                log::error!("Model bundle error: {}", e);
                "Risk model is not available".to_string()
            }
        }
    }

    /// Whether the user can fix this by editing their inputs
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, RiskError::Assembly(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assembly_error_names_feature() {
        let err = AssemblyError::MissingFeature { feature: "AGE".to_string() };
        assert_eq!(err.feature(), "AGE");
        assert!(err.to_string().contains("AGE"));
    }

    #[test]
    fn test_user_message_verbatim_for_input_errors() {
        let err: RiskError = AssemblyError::TypeCoercion {
            feature: "LIMIT_BAL".to_string(),
            value: "banyak".to_string(),
        }
        .into();
        assert!(err.is_user_correctable());
        assert!(err.user_message().contains("LIMIT_BAL"));
    }

    #[test]
    fn test_user_message_generic_for_inference_errors() {
        let err: RiskError = InferenceError::Backend("tensor shape [1, 22]".to_string()).into();
        assert!(!err.is_user_correctable());
        assert!(!err.user_message().contains("tensor"));
    }
}
