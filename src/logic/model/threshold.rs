//! Decision Threshold
//!
//! One fixed threshold turns the default probability into a verdict.
//! Every verdict in the crate goes through `Verdict::from_probability`.

use serde::{Deserialize, Serialize};

/// At or above this probability = HIGH_RISK
pub const RISK_THRESHOLD: f64 = 0.5;

/// Risk verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    HighRisk,
    LowRisk,
}

impl Verdict {
    pub fn from_probability(probability: f64) -> Self {
        if probability >= RISK_THRESHOLD {
            Verdict::HighRisk
        } else {
            Verdict::LowRisk
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::HighRisk => "HIGH_RISK",
            Verdict::LowRisk => "LOW_RISK",
        }
    }

    /// Label shown to the applicant
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::HighRisk => "Berisiko Tinggi",
            Verdict::LowRisk => "Risiko Rendah",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_is_inclusive() {
        assert_eq!(Verdict::from_probability(0.5), Verdict::HighRisk);
        assert_eq!(Verdict::from_probability(0.499999), Verdict::LowRisk);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(Verdict::from_probability(0.0), Verdict::LowRisk);
        assert_eq!(Verdict::from_probability(1.0), Verdict::HighRisk);
    }

    #[test]
    fn test_serialized_name() {
        let json = serde_json::to_string(&Verdict::HighRisk).unwrap();
        assert_eq!(json, "\"HIGH_RISK\"");
        assert_eq!(Verdict::LowRisk.to_string(), "LOW_RISK");
    }
}
