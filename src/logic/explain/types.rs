use serde::{Deserialize, Serialize};

/// One feature's attribution for the scored vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionEntry {
    pub feature: String,
    pub signed_score: f64, // > 0 pushes towards default
    pub raw_value: f64,
}

/// Ranked entry with its rendered sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    #[serde(flatten)]
    pub entry: AttributionEntry,
    pub sentence: String,
}

/// One side of the explanation (risers or fallers)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationSection {
    pub factors: Vec<Factor>,
    /// Sentences ready to display; the fixed fallback when `factors` is empty
    pub lines: Vec<String>,
}

impl ExplanationSection {
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.factors.iter().any(|f| f.entry.feature == feature)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationSet {
    /// Risk-increasing factors, largest first
    pub risers: ExplanationSection,
    /// Risk-decreasing factors, most negative first
    pub fallers: ExplanationSection,
    pub attributor: String,
}
