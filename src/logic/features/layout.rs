//! Feature Layout - Ordered Feature Schema
//!
//! **CRITICAL: the schema order is the classifier's training order**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → bump the layout version in the bundle manifest
//! 2. Change order → bump the layout version
//! 3. Remove feature → bump the layout version
//!
//! The layout hash covers the version and every name in order, so a
//! classifier, weights file or enumeration table built for another layout is
//! rejected at load time instead of silently scoring shifted columns.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE KIND
// ============================================================================

/// How a feature is presented back to the user in explanations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Currency amount (limit, bill, payment)
    Monetary,
    /// Repayment status code (-2..=9)
    Delinquency,
    /// Coded category (sex, education, marital status)
    Categorical,
    /// Plain number (age)
    Numeric,
}

impl FeatureKind {
    /// Kinds whose values are codes from an enumeration table
    pub fn is_coded(&self) -> bool {
        matches!(self, FeatureKind::Delinquency | FeatureKind::Categorical)
    }
}

/// Catalog entry for one feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub name: String,
    /// UI-facing label
    pub label: String,
    pub kind: FeatureKind,
    /// Enumeration table for coded kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
}

// ============================================================================
// FEATURE SCHEMA
// ============================================================================

/// Ordered, immutable feature schema (+ catalog metadata).
/// Only constructed through `new`, which computes the layout hash.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureSchema {
    /// Layout version, bumped on any add/remove/reorder
    pub version: u8,
    features: Vec<FeatureSpec>,
    hash: u32,
}

impl FeatureSchema {
    /// Build a schema; names must be unique and non-empty
    pub fn new(version: u8, features: Vec<FeatureSpec>) -> Result<Self, String> {
        if features.is_empty() {
            return Err("feature schema is empty".to_string());
        }

        for (i, spec) in features.iter().enumerate() {
            if spec.name.trim().is_empty() {
                return Err(format!("feature #{} has an empty name", i));
            }
            if features[..i].iter().any(|other| other.name == spec.name) {
                return Err(format!("feature '{}' is listed twice", spec.name));
            }
            if spec.kind.is_coded() && spec.table.is_none() {
                return Err(format!("feature '{}' is coded but names no enumeration table", spec.name));
            }
        }

        let hash = compute_layout_hash(version, features.iter().map(|f| f.name.as_str()));

        Ok(Self { version, features, hash })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// CRC32 of version + names
    pub fn layout_hash(&self) -> u32 {
        self.hash
    }

    /// Feature names in schema order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|f| f.name.as_str())
    }

    pub fn features(&self) -> &[FeatureSpec] {
        &self.features
    }

    /// Get feature index by name (O(n) but features are few)
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.features.iter().position(|f| f.name == name)
    }

    pub fn spec(&self, name: &str) -> Option<&FeatureSpec> {
        self.features.iter().find(|f| f.name == name)
    }

    /// Resolve a UI-facing key to a canonical feature name.
    /// Names win over labels; matching ignores case and surrounding spaces.
    pub fn resolve_key(&self, key: &str) -> Option<&str> {
        let key = key.trim();

        if let Some(spec) = self.features.iter().find(|f| f.name == key) {
            return Some(spec.name.as_str());
        }

        self.features
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(key))
            .or_else(|| self.features.iter().find(|f| f.label.trim().eq_ignore_ascii_case(key)))
            .map(|f| f.name.as_str())
    }

    /// Check an externally declared version/hash against this schema
    pub fn validate(&self, version: u8, hash: u32) -> Result<(), LayoutMismatchError> {
        if version != self.version || hash != self.hash {
            return Err(LayoutMismatchError {
                expected_version: self.version,
                expected_hash: self.hash,
                actual_version: version,
                actual_hash: hash,
            });
        }
        Ok(())
    }

    pub fn info(&self) -> LayoutInfo {
        LayoutInfo {
            version: self.version,
            hash: self.hash,
            feature_count: self.len(),
            feature_names: self.names().map(str::to_string).collect(),
        }
    }
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of a feature layout
pub fn compute_layout_hash<'a>(version: u8, names: impl IntoIterator<Item = &'a str>) -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[version]);

    for name in names {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when feature layout doesn't match expected
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Feature layout mismatch: expected v{} (hash: {:08x}), got v{} (hash: {:08x})",
            self.expected_version,
            self.expected_hash,
            self.actual_version,
            self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, label: &str, kind: FeatureKind) -> FeatureSpec {
        FeatureSpec {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            table: if kind.is_coded() { Some("t".to_string()) } else { None },
        }
    }

    fn schema() -> FeatureSchema {
        FeatureSchema::new(
            1,
            vec![
                spec("LIMIT_BAL", "Limit kredit", FeatureKind::Monetary),
                spec("AGE", "Usia", FeatureKind::Numeric),
                spec("PAY_0", "Status pembayaran (Sep)", FeatureKind::Delinquency),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_layout_hash_consistency() {
        let a = schema();
        let b = schema();
        assert_eq!(a.layout_hash(), b.layout_hash());
        assert_ne!(a.layout_hash(), 0);
    }

    #[test]
    fn test_layout_hash_is_order_sensitive() {
        let forward = compute_layout_hash(1, ["A", "B"]);
        let reversed = compute_layout_hash(1, ["B", "A"]);
        let bumped = compute_layout_hash(2, ["A", "B"]);
        assert_ne!(forward, reversed);
        assert_ne!(forward, bumped);
    }

    #[test]
    fn test_separator_prevents_concatenation_collisions() {
        assert_ne!(compute_layout_hash(1, ["AB", "C"]), compute_layout_hash(1, ["A", "BC"]));
    }

    #[test]
    fn test_reject_duplicate_names() {
        let result = FeatureSchema::new(
            1,
            vec![
                spec("AGE", "Age", FeatureKind::Numeric),
                spec("AGE", "Age again", FeatureKind::Numeric),
            ],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_reject_coded_feature_without_table() {
        let mut pay = spec("PAY_0", "Status", FeatureKind::Delinquency);
        pay.table = None;
        assert!(FeatureSchema::new(1, vec![pay]).is_err());
    }

    #[test]
    fn test_validate_layout() {
        let s = schema();
        assert!(s.validate(1, s.layout_hash()).is_ok());
        assert!(s.validate(2, s.layout_hash()).is_err());
        assert!(s.validate(1, s.layout_hash().wrapping_add(1)).is_err());
    }

    #[test]
    fn test_resolve_key() {
        let s = schema();
        assert_eq!(s.resolve_key("LIMIT_BAL"), Some("LIMIT_BAL"));
        assert_eq!(s.resolve_key("limit_bal"), Some("LIMIT_BAL"));
        assert_eq!(s.resolve_key("  limit kredit "), Some("LIMIT_BAL"));
        assert_eq!(s.resolve_key("nonexistent"), None);
    }

    #[test]
    fn test_index_of() {
        let s = schema();
        assert_eq!(s.index_of("LIMIT_BAL"), Some(0));
        assert_eq!(s.index_of("PAY_0"), Some(2));
        assert_eq!(s.index_of("PAY_2"), None);
    }
}
