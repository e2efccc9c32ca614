//! Model Bundle - versioned artifacts loaded once per process
//!
//! A bundle directory holds:
//! - `manifest.json` - schema, positive class, backend + attributor choice
//! - the classifier artifact (logistic weights JSON or an ONNX model)
//! - the enumeration tables the classifier was trained with
//!
//! Everything is validated together at load time; nothing is re-derived
//! per request.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::classifier::{Classifier, PositiveClass};
use super::logistic::{LogisticClassifier, LogisticWeights};
use crate::constants::MANIFEST_FILE;
use crate::error::BundleError;
use crate::logic::categories::EnumerationTables;
use crate::logic::explain::{Attributor, LinearAttributor};
use crate::logic::features::{FeatureSchema, FeatureSpec, LayoutInfo};

// ============================================================================
// MANIFEST
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierSpec {
    Logistic {
        weights: String,
    },
    Onnx {
        model: String,
        #[serde(default)]
        output: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttributorSpec {
    Linear,
}

/// `manifest.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub version: String,
    pub layout_version: u8,
    /// Expected CRC32 of the layout; checked when present
    #[serde(default)]
    pub layout_hash: Option<u32>,
    pub positive_class_index: usize,
    #[serde(default = "default_class_count")]
    pub class_count: usize,
    pub features: Vec<FeatureSpec>,
    pub classifier: ClassifierSpec,
    #[serde(default)]
    pub attributor: Option<AttributorSpec>,
    pub enumerations: String,
    pub enumerations_version: String,
}

fn default_class_count() -> usize {
    2
}

// ============================================================================
// BUNDLE
// ============================================================================

/// Bundle metadata for logs and the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleMetadata {
    pub name: String,
    pub version: String,
    /// Directory path or `<built-in>`
    pub source: String,
    pub classifier: String,
    pub attributor: Option<String>,
    pub positive_class: PositiveClass,
    pub enumerations_version: String,
    pub layout: LayoutInfo,
    pub loaded_at: DateTime<Utc>,
}

pub struct ModelBundle {
    metadata: BundleMetadata,
    schema: FeatureSchema,
    tables: EnumerationTables,
    positive: PositiveClass,
    classifier: Arc<dyn Classifier>,
    attributor: Option<Arc<dyn Attributor>>,
}

impl fmt::Debug for ModelBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelBundle")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

const BUILT_IN: &str = "<built-in>";

const REFERENCE_MANIFEST: &str = include_str!("../../../models/reference/manifest.json");
const REFERENCE_WEIGHTS: &str = include_str!("../../../models/reference/logistic.json");
const REFERENCE_ENUMERATIONS: &str = include_str!("../../../models/reference/enumerations.json");

impl ModelBundle {
    /// Load a bundle directory
    pub fn load(dir: &Path) -> Result<Self, BundleError> {
        log::info!("Loading model bundle from: {}", dir.display());

        let manifest: Manifest = parse(&read(&dir.join(MANIFEST_FILE))?, MANIFEST_FILE)?;
        let source = dir.display().to_string();

        Self::build(manifest, source, |file| read(&dir.join(file)), Some(dir))
    }

    /// Built-in reference bundle (logistic backend + linear attributor)
    pub fn reference() -> Result<Self, BundleError> {
        let manifest: Manifest = parse(REFERENCE_MANIFEST, MANIFEST_FILE)?;

        Self::build(
            manifest,
            BUILT_IN.to_string(),
            |file| match file {
                "logistic.json" => Ok(REFERENCE_WEIGHTS.to_string()),
                "enumerations.json" => Ok(REFERENCE_ENUMERATIONS.to_string()),
                other => Err(BundleError::Invalid(format!("built-in bundle has no artifact '{}'", other))),
            },
            None,
        )
    }

    fn build(
        manifest: Manifest,
        source: String,
        read_artifact: impl Fn(&str) -> Result<String, BundleError>,
        dir: Option<&Path>,
    ) -> Result<Self, BundleError> {
        let schema = FeatureSchema::new(manifest.layout_version, manifest.features.clone())
            .map_err(BundleError::Invalid)?;

        if let Some(expected) = manifest.layout_hash {
            schema.validate(manifest.layout_version, expected)?;
        }

        let tables: EnumerationTables = parse(&read_artifact(manifest.enumerations.as_str())?, &manifest.enumerations)?;
        validate_tables(&manifest, &schema, &tables)?;

        if manifest.positive_class_index >= manifest.class_count {
            return Err(BundleError::Invalid(format!(
                "positive class index {} is out of range for {} classes",
                manifest.positive_class_index, manifest.class_count
            )));
        }
        let positive = PositiveClass(manifest.positive_class_index);

        if let (Some(AttributorSpec::Linear), ClassifierSpec::Onnx { .. }) = (&manifest.attributor, &manifest.classifier) {
            return Err(BundleError::Invalid(
                "linear attributor requires the logistic backend".to_string(),
            ));
        }

        let (classifier, logistic): (Arc<dyn Classifier>, Option<Arc<LogisticClassifier>>) =
            match &manifest.classifier {
                ClassifierSpec::Logistic { weights } => {
                    if manifest.class_count != 2 {
                        return Err(BundleError::Invalid("logistic backend has exactly 2 classes".to_string()));
                    }
                    let weights: LogisticWeights = parse(&read_artifact(weights.as_str())?, weights)?;
                    weights.validate(schema.names()).map_err(BundleError::Invalid)?;
                    let model = Arc::new(LogisticClassifier::new(weights));
                    let classifier: Arc<dyn Classifier> = model.clone();
                    (classifier, Some(model))
                }
                ClassifierSpec::Onnx { model, output } => {
                    let dir = dir.ok_or_else(|| {
                        BundleError::Invalid("ONNX backend needs a bundle directory".to_string())
                    })?;
                    (load_onnx(&dir.join(model), output.as_deref(), schema.len(), manifest.class_count)?, None)
                }
            };

        let attributor: Option<Arc<dyn Attributor>> = match (&manifest.attributor, logistic) {
            (None, _) => None,
            (Some(AttributorSpec::Linear), Some(model)) => {
                let linear: Arc<dyn Attributor> = Arc::new(LinearAttributor::new(model));
                Some(linear)
            }
            (Some(AttributorSpec::Linear), None) => {
                return Err(BundleError::Invalid(
                    "linear attributor requires the logistic backend".to_string(),
                ))
            }
        };

        let metadata = BundleMetadata {
            name: manifest.name.clone(),
            version: manifest.version.clone(),
            source,
            classifier: classifier.name().to_string(),
            attributor: attributor.as_ref().map(|a| a.name().to_string()),
            positive_class: positive,
            enumerations_version: tables.version.clone(),
            layout: schema.info(),
            loaded_at: Utc::now(),
        };

        log::info!(
            "Model bundle '{}' v{} ready: {} features, backend={}, attributor={}",
            metadata.name,
            metadata.version,
            schema.len(),
            metadata.classifier,
            metadata.attributor.as_deref().unwrap_or("none")
        );

        Ok(Self {
            metadata,
            schema,
            tables,
            positive,
            classifier,
            attributor,
        })
    }

    /// Replace (or remove) the attributor, e.g. for hosts that ship their own
    pub fn with_attributor(mut self, attributor: Option<Arc<dyn Attributor>>) -> Self {
        self.metadata.attributor = attributor.as_ref().map(|a| a.name().to_string());
        self.attributor = attributor;
        self
    }

    /// Swap the classifier backend. Drops the attributor, which explained the old one.
    pub fn with_classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.metadata.classifier = classifier.name().to_string();
        self.metadata.attributor = None;
        self.classifier = classifier;
        self.attributor = None;
        self
    }

    pub fn metadata(&self) -> &BundleMetadata {
        &self.metadata
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn tables(&self) -> &EnumerationTables {
        &self.tables
    }

    pub fn positive_class(&self) -> PositiveClass {
        self.positive
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn attributor(&self) -> Option<&dyn Attributor> {
        self.attributor.as_deref()
    }
}

fn validate_tables(manifest: &Manifest, schema: &FeatureSchema, tables: &EnumerationTables) -> Result<(), BundleError> {
    if tables.version != manifest.enumerations_version {
        return Err(BundleError::Invalid(format!(
            "enumeration tables are version '{}', model expects '{}'",
            tables.version, manifest.enumerations_version
        )));
    }

    tables.validate().map_err(BundleError::Invalid)?;

    for spec in schema.features() {
        if let Some(table) = &spec.table {
            if tables.table(table).is_none() {
                return Err(BundleError::Invalid(format!(
                    "feature '{}' refers to missing enumeration table '{}'",
                    spec.name, table
                )));
            }
        }
    }

    Ok(())
}

#[cfg(feature = "onnx")]
fn load_onnx(
    path: &Path,
    output: Option<&str>,
    feature_count: usize,
    class_count: usize,
) -> Result<Arc<dyn Classifier>, BundleError> {
    let model = super::onnx::OnnxClassifier::load(path, output, feature_count, class_count)?;
    Ok(Arc::new(model))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(
    path: &Path,
    _output: Option<&str>,
    _feature_count: usize,
    _class_count: usize,
) -> Result<Arc<dyn Classifier>, BundleError> {
    Err(BundleError::Onnx(format!(
        "{}: built without the `onnx` feature",
        path.display()
    )))
}

fn read(path: &Path) -> Result<String, BundleError> {
    std::fs::read_to_string(path).map_err(|source| BundleError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn parse<T: serde::de::DeserializeOwned>(content: &str, path: &str) -> Result<T, BundleError> {
    serde_json::from_str(content).map_err(|source| BundleError::Parse {
        path: path.to_string(),
        source,
    })
}
