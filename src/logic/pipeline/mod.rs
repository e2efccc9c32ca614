//! Risk Pipeline - Assembler → Scorer → Ranker
//!
//! One call per submitted form. Assembly and inference faults abort the
//! assessment; an attribution fault only costs the explanation.

use serde::{Deserialize, Serialize};

use crate::error::RiskError;
use crate::logic::categories::resolve_inputs;
use crate::logic::config::RiskConfig;
use crate::logic::explain::{explain, CurrencyFormat, ExplanationSet, SentenceRenderer};
use crate::logic::features::{assemble, FeatureVector, RawInputs};
use crate::logic::model::{score, ModelBundle, ScoreResult};

/// Explanation outcome for one assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Explanation {
    Ready(ExplanationSet),
    /// Attribution failed; the score is still valid
    Unavailable { reason: String },
    /// Explanations disabled or no attributor in the bundle
    Skipped { reason: String },
}

impl Explanation {
    pub fn ready(&self) -> Option<&ExplanationSet> {
        match self {
            Explanation::Ready(set) => Some(set),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub score: ScoreResult,
    pub explanation: Explanation,
}

pub struct RiskPipeline {
    bundle: ModelBundle,
    currency: CurrencyFormat,
    explain_enabled: bool,
}

impl RiskPipeline {
    pub fn new(bundle: ModelBundle, config: &RiskConfig) -> Self {
        Self {
            bundle,
            currency: config.currency.clone(),
            explain_enabled: config.explain_enabled,
        }
    }

    /// Load the configured bundle and build a pipeline around it
    pub fn from_config(config: &RiskConfig) -> Result<Self, RiskError> {
        let bundle = config.load_bundle()?;
        Ok(Self::new(bundle, config))
    }

    pub fn bundle(&self) -> &ModelBundle {
        &self.bundle
    }

    /// Resolve labels and assemble the ordered vector
    pub fn assemble(&self, raw: &RawInputs) -> Result<FeatureVector, RiskError> {
        let resolved = resolve_inputs(raw, self.bundle.schema(), self.bundle.tables())?;
        Ok(assemble(&resolved, self.bundle.schema())?)
    }

    /// Score one submission and explain it when possible
    pub fn assess(&self, raw: &RawInputs) -> Result<Assessment, RiskError> {
        let vector = self.assemble(raw)?;

        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Assembled vector: {}", vector.to_log_entry(self.bundle.schema()));
        }

        let score = score(&vector, self.bundle.classifier(), self.bundle.positive_class())?;

        log::debug!(
            "Assessment: p={:.4} verdict={} backend={} fp={:08x}",
            score.probability,
            score.verdict,
            score.method,
            score.vector_fingerprint
        );

        let explanation = self.explain(&vector, &score);

        Ok(Assessment { score, explanation })
    }

    fn explain(&self, vector: &FeatureVector, score: &ScoreResult) -> Explanation {
        if !self.explain_enabled {
            return Explanation::Skipped {
                reason: "explanations are disabled".to_string(),
            };
        }

        let Some(attributor) = self.bundle.attributor() else {
            return Explanation::Skipped {
                reason: "model bundle has no attributor".to_string(),
            };
        };

        let renderer = SentenceRenderer::new(self.bundle.schema(), self.bundle.tables(), &self.currency);

        match explain(vector, score, attributor, self.bundle.schema(), &renderer) {
            Ok(set) => Explanation::Ready(set),
            Err(e) => {
                log::warn!("Attribution failed, returning score without explanation: {}", e);
                Explanation::Unavailable { reason: e.to_string() }
            }
        }
    }
}
