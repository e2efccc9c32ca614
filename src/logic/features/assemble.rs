//! Feature Vector Assembler
//!
//! Orders and coerces already-resolved inputs into the schema layout.
//! Label → code mapping is NOT done here (see `logic::categories`).

use super::inputs::{RawInputs, RawValue};
use super::layout::FeatureSchema;
use super::vector::FeatureVector;
use crate::error::AssemblyError;

/// Assemble a feature vector in schema order.
///
/// Extra keys in `raw` are ignored. Fails on the first schema feature (in
/// schema order) that is missing or cannot be coerced to a finite number.
pub fn assemble(raw: &RawInputs, schema: &FeatureSchema) -> Result<FeatureVector, AssemblyError> {
    let values = schema
        .names()
        .map(|name| {
            let value = raw.get(name).ok_or_else(|| AssemblyError::MissingFeature {
                feature: name.to_string(),
            })?;
            coerce(name, value)
        })
        .collect::<Result<Vec<f64>, _>>()?;

    Ok(FeatureVector::new(schema.layout_hash(), values))
}

fn coerce(feature: &str, value: &RawValue) -> Result<f64, AssemblyError> {
    let number = match value {
        RawValue::Code(code) => *code as f64,
        RawValue::Number(n) => *n,
        RawValue::Text(text) => text.trim().parse::<f64>().map_err(|_| coercion_error(feature, value))?,
    };

    if !number.is_finite() {
        return Err(coercion_error(feature, value));
    }

    Ok(number)
}

fn coercion_error(feature: &str, value: &RawValue) -> AssemblyError {
    AssemblyError::TypeCoercion {
        feature: feature.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::layout::{FeatureKind, FeatureSpec};

    fn schema(names: &[&str]) -> FeatureSchema {
        FeatureSchema::new(
            1,
            names
                .iter()
                .map(|n| FeatureSpec {
                    name: n.to_string(),
                    label: n.to_lowercase(),
                    kind: FeatureKind::Numeric,
                    table: None,
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_output_follows_schema_order() {
        let s = schema(&["AGE", "LIMIT_BAL", "PAY_0"]);
        let raw = RawInputs::new()
            .with("PAY_0", 2i64)
            .with("LIMIT_BAL", 50000.0)
            .with("AGE", "41");

        let v = assemble(&raw, &s).unwrap();
        assert_eq!(v.as_slice(), &[41.0, 50000.0, 2.0]);
        assert_eq!(v.layout_hash(), s.layout_hash());
    }

    #[test]
    fn test_extra_keys_ignored() {
        let s = schema(&["AGE"]);
        let raw = RawInputs::new().with("AGE", 30i64).with("NICKNAME", "budi");

        let v = assemble(&raw, &s).unwrap();
        assert_eq!(v.len(), 1);
        assert_eq!(v.get(0), Some(30.0));
    }

    #[test]
    fn test_missing_feature_named() {
        let s = schema(&["LIMIT_BAL", "AGE"]);
        let raw = RawInputs::new().with("LIMIT_BAL", 1000.0);

        let err = assemble(&raw, &s).unwrap_err();
        assert_eq!(err, AssemblyError::MissingFeature { feature: "AGE".to_string() });
    }

    #[test]
    fn test_non_numeric_text_rejected() {
        let s = schema(&["LIMIT_BAL"]);
        let raw = RawInputs::new().with("LIMIT_BAL", "dua puluh ribu");

        match assemble(&raw, &s) {
            Err(AssemblyError::TypeCoercion { feature, value }) => {
                assert_eq!(feature, "LIMIT_BAL");
                assert_eq!(value, "dua puluh ribu");
            }
            other => panic!("Expected TypeCoercion, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        let s = schema(&["AGE"]);
        let nan = RawInputs::new().with("AGE", f64::NAN);
        let inf_text = RawInputs::new().with("AGE", "inf");

        assert!(matches!(assemble(&nan, &s), Err(AssemblyError::TypeCoercion { .. })));
        assert!(matches!(assemble(&inf_text, &s), Err(AssemblyError::TypeCoercion { .. })));
    }

    #[test]
    fn test_sign_and_magnitude_preserved() {
        let s = schema(&["PAY_0", "BILL_AMT1"]);
        let raw = RawInputs::new().with("PAY_0", -2i64).with("BILL_AMT1", -165580.25);

        let v = assemble(&raw, &s).unwrap();
        assert_eq!(v.as_slice(), &[-2.0, -165580.25]);
    }

    #[test]
    fn test_idempotent() {
        let s = schema(&["A", "B", "C"]);
        let raw = RawInputs::new().with("A", 0.1).with("B", " 0.2 ").with("C", 3i64);

        let first = assemble(&raw, &s).unwrap();
        let second = assemble(&raw, &s).unwrap();

        let bits = |v: &FeatureVector| v.as_slice().iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&first), bits(&second));
        assert_eq!(first.fingerprint(), second.fingerprint());
    }
}
