//! Feature Vector - Core data structure for classifier input
//!
//! **Layout-tagged, immutable feature vector**
//!
//! Built only by the assembler, one per request. Carries the layout hash of
//! the schema it was built against and exposes a fingerprint so that a score
//! and an attribution can be checked against the exact same point.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use super::layout::FeatureSchema;

// ============================================================================
// FEATURE VECTOR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// CRC32 hash of the feature layout (for mismatch detection)
    layout_hash: u32,
    /// Feature values in schema order
    values: Vec<f64>,
}

impl FeatureVector {
    pub(crate) fn new(layout_hash: u32, values: Vec<f64>) -> Self {
        Self { layout_hash, values }
    }

    pub fn layout_hash(&self) -> u32 {
        self.layout_hash
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, schema: &FeatureSchema, name: &str) -> Option<f64> {
        schema.index_of(name).and_then(|i| self.get(i))
    }

    /// CRC32 over the layout hash and the exact bit pattern of every value
    pub fn fingerprint(&self) -> u32 {
        let mut hasher = Hasher::new();
        hasher.update(&self.layout_hash.to_le_bytes());
        for value in &self.values {
            hasher.update(&value.to_bits().to_le_bytes());
        }
        hasher.finalize()
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self, schema: &FeatureSchema) -> serde_json::Value {
        serde_json::json!({
            "layout_hash": self.layout_hash,
            "fingerprint": self.fingerprint(),
            "named_values": schema.names()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<std::collections::BTreeMap<_, _>>(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable() {
        let a = FeatureVector::new(7, vec![1.0, 2.0, 3.0]);
        let b = FeatureVector::new(7, vec![1.0, 2.0, 3.0]);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_fingerprint_tracks_values_and_layout() {
        let base = FeatureVector::new(7, vec![1.0, 2.0, 3.0]);
        let changed_value = FeatureVector::new(7, vec![1.0, 2.0, 3.000001]);
        let changed_layout = FeatureVector::new(8, vec![1.0, 2.0, 3.0]);
        assert_ne!(base.fingerprint(), changed_value.fingerprint());
        assert_ne!(base.fingerprint(), changed_layout.fingerprint());
    }

    #[test]
    fn test_fingerprint_distinguishes_signed_zero() {
        let pos = FeatureVector::new(1, vec![0.0]);
        let neg = FeatureVector::new(1, vec![-0.0]);
        assert_ne!(pos.fingerprint(), neg.fingerprint());
    }

    #[test]
    fn test_get() {
        let v = FeatureVector::new(1, vec![10.0, -2.0]);
        assert_eq!(v.get(1), Some(-2.0));
        assert_eq!(v.get(2), None);
        assert_eq!(v.len(), 2);
    }
}
