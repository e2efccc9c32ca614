//! Label Resolver
//!
//! UI keys → canonical feature names, category labels → integer codes.
//! Runs before assembly; the assembler never sees labels.

use super::tables::EnumerationTables;
use crate::error::AssemblyError;
use crate::logic::features::{FeatureSchema, RawInputs, RawValue};

/// Resolve UI-facing keys and category labels.
///
/// Keys that match no feature are passed through unchanged so the assembler
/// can ignore them. Two keys landing on the same feature is an error rather
/// than a silent overwrite.
pub fn resolve_inputs(
    raw: &RawInputs,
    schema: &FeatureSchema,
    tables: &EnumerationTables,
) -> Result<RawInputs, AssemblyError> {
    let mut resolved = RawInputs::new();

    for (key, value) in raw.iter() {
        let name = schema.resolve_key(key).unwrap_or(key);

        if resolved.contains(name) {
            return Err(AssemblyError::ConflictingInputs {
                feature: name.to_string(),
            });
        }

        let table = schema
            .spec(name)
            .and_then(|spec| spec.table.as_deref())
            .and_then(|t| tables.table(t));

        let value = match (table, value) {
            (Some(table), RawValue::Text(label)) => match table.code_for(label) {
                Some(code) => RawValue::Code(code),
                None => match label.trim().parse::<i64>() {
                    Ok(code) => RawValue::Code(code),
                    Err(_) => {
                        return Err(AssemblyError::UnknownCategory {
                            feature: name.to_string(),
                            label: label.clone(),
                        })
                    }
                },
            },
            _ => value.clone(),
        };

        resolved.insert(name, value);
    }

    Ok(resolved)
}
