use std::cmp::Ordering;

use super::attributor::Attributor;
use super::render::{SentenceRenderer, NO_DOMINANT_FALLER, NO_DOMINANT_RISER};
use super::types::{AttributionEntry, ExplanationSection, ExplanationSet, Factor};
use crate::constants::MAX_FACTORS;
use crate::error::AttributionError;
use crate::logic::features::{FeatureSchema, FeatureVector};
use crate::logic::model::ScoreResult;

/// Explain an already-scored vector.
///
/// The attribution must come from the same vector the score was computed
/// for, and is read at the class index recorded in the score.
pub fn explain(
    vector: &FeatureVector,
    score: &ScoreResult,
    attributor: &dyn Attributor,
    schema: &FeatureSchema,
    renderer: &SentenceRenderer<'_>,
) -> Result<ExplanationSet, AttributionError> {
    let fingerprint = vector.fingerprint();

    if fingerprint != score.vector_fingerprint {
        return Err(AttributionError::VectorMismatch {
            expected: score.vector_fingerprint,
            actual: fingerprint,
        });
    }

    if vector.layout_hash() != schema.layout_hash() {
        return Err(AttributionError::LayoutMismatch {
            expected: schema.layout_hash(),
            actual: vector.layout_hash(),
        });
    }

    if vector.len() != schema.len() {
        return Err(AttributionError::LengthMismatch {
            expected: schema.len(),
            actual: vector.len(),
        });
    }

    let attribution = attributor.attribute(vector)?;

    if attribution.vector_fingerprint != fingerprint {
        return Err(AttributionError::VectorMismatch {
            expected: fingerprint,
            actual: attribution.vector_fingerprint,
        });
    }

    let index = score.positive_class.index();
    let scores = attribution
        .per_class
        .get(index)
        .ok_or(AttributionError::ClassIndexOutOfRange {
            index,
            classes: attribution.per_class.len(),
        })?;

    if scores.len() != schema.len() {
        return Err(AttributionError::LengthMismatch {
            expected: schema.len(),
            actual: scores.len(),
        });
    }

    let entries = schema
        .names()
        .zip(scores.iter())
        .zip(vector.as_slice().iter())
        .map(|((feature, &signed_score), &raw_value)| {
            if !signed_score.is_finite() {
                return Err(AttributionError::NonFiniteScore {
                    feature: feature.to_string(),
                });
            }
            Ok(AttributionEntry {
                feature: feature.to_string(),
                signed_score,
                raw_value,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let (risers, fallers) = rank_entries(entries, MAX_FACTORS);

    Ok(ExplanationSet {
        risers: section(risers, renderer, NO_DOMINANT_RISER),
        fallers: section(fallers, renderer, NO_DOMINANT_FALLER),
        attributor: attributor.name().to_string(),
    })
}

/// Split into (risers, fallers), each capped at `limit`.
///
/// Risers: positive scores, largest first. Fallers: negative scores, most
/// negative first. Ties go to the lexically smaller feature name. Zero
/// scores are dropped.
pub fn rank_entries(
    entries: Vec<AttributionEntry>,
    limit: usize,
) -> (Vec<AttributionEntry>, Vec<AttributionEntry>) {
    let (mut risers, mut fallers): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .filter(|e| e.signed_score != 0.0)
        .partition(|e| e.signed_score > 0.0);

    risers.sort_by(|a, b| by_score_then_name(b.signed_score, a.signed_score, &a.feature, &b.feature));
    fallers.sort_by(|a, b| by_score_then_name(a.signed_score, b.signed_score, &a.feature, &b.feature));

    risers.truncate(limit);
    fallers.truncate(limit);

    (risers, fallers)
}

fn by_score_then_name(left: f64, right: f64, left_name: &str, right_name: &str) -> Ordering {
    left.total_cmp(&right).then_with(|| left_name.cmp(right_name))
}

fn section(entries: Vec<AttributionEntry>, renderer: &SentenceRenderer<'_>, fallback: &str) -> ExplanationSection {
    let factors: Vec<Factor> = entries
        .into_iter()
        .map(|entry| {
            let sentence = renderer.render(&entry.feature, entry.signed_score, entry.raw_value);
            Factor { entry, sentence }
        })
        .collect();

    let lines = if factors.is_empty() {
        vec![fallback.to_string()]
    } else {
        factors.iter().map(|f| f.sentence.clone()).collect()
    };

    ExplanationSection { factors, lines }
}
