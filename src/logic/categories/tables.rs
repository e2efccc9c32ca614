//! Enumeration Tables
//!
//! Label ↔ code mappings for the coded features. These are part of the
//! classifier's training contract, so they are versioned and loaded with the
//! model bundle, never hard-coded in the form layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One label/code pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub label: String,
    pub code: i64,
}

/// Label ↔ code table for one categorical feature family
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable {
    entries: Vec<CategoryEntry>,
}

impl CategoryTable {
    pub fn new(entries: Vec<CategoryEntry>) -> Self {
        Self { entries }
    }

    /// Exact label match first, then case-insensitive
    pub fn code_for(&self, label: &str) -> Option<i64> {
        let label = label.trim();
        self.entries
            .iter()
            .find(|e| e.label == label)
            .or_else(|| self.entries.iter().find(|e| e.label.to_lowercase() == label.to_lowercase()))
            .map(|e| e.code)
    }

    pub fn label_for(&self, code: i64) -> Option<&str> {
        self.entries.iter().find(|e| e.code == code).map(|e| e.label.as_str())
    }

    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    fn validate(&self, name: &str) -> Result<(), String> {
        if self.entries.is_empty() {
            return Err(format!("enumeration table '{}' is empty", name));
        }
        for (i, entry) in self.entries.iter().enumerate() {
            let earlier = &self.entries[..i];
            if earlier.iter().any(|e| e.label.to_lowercase() == entry.label.to_lowercase()) {
                return Err(format!("table '{}' lists label '{}' twice", name, entry.label));
            }
            if earlier.iter().any(|e| e.code == entry.code) {
                return Err(format!("table '{}' lists code {} twice", name, entry.code));
            }
        }
        Ok(())
    }
}

/// Versioned set of enumeration tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumerationTables {
    /// Must equal the bundle manifest's `enumerations_version`
    pub version: String,
    tables: BTreeMap<String, CategoryTable>,
}

impl EnumerationTables {
    pub fn new(version: impl Into<String>, tables: BTreeMap<String, CategoryTable>) -> Self {
        Self {
            version: version.into(),
            tables,
        }
    }

    pub fn table(&self, name: &str) -> Option<&CategoryTable> {
        self.tables.get(name)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Labels must be unique per table (ignoring case), codes too
    pub fn validate(&self) -> Result<(), String> {
        for (name, table) in &self.tables {
            table.validate(name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sex() -> CategoryTable {
        CategoryTable::new(vec![
            CategoryEntry { label: "Laki-laki".to_string(), code: 1 },
            CategoryEntry { label: "Perempuan".to_string(), code: 2 },
        ])
    }

    #[test]
    fn test_code_for_label() {
        let table = sex();
        assert_eq!(table.code_for("Laki-laki"), Some(1));
        assert_eq!(table.code_for(" perempuan "), Some(2));
        assert_eq!(table.code_for("Unknown"), None);
    }

    #[test]
    fn test_label_for_code() {
        let table = sex();
        assert_eq!(table.label_for(2), Some("Perempuan"));
        assert_eq!(table.label_for(3), None);
    }

    #[test]
    fn test_validate_rejects_duplicate_codes() {
        let mut tables = BTreeMap::new();
        tables.insert(
            "education".to_string(),
            CategoryTable::new(vec![
                CategoryEntry { label: "SMA".to_string(), code: 2 },
                CategoryEntry { label: "Sarjana".to_string(), code: 2 },
            ]),
        );
        let enums = EnumerationTables::new("test/1", tables);
        assert!(enums.validate().is_err());
    }

    #[test]
    fn test_deserialize() {
        let json = r#"{
            "version": "test/1",
            "tables": { "sex": [ {"label": "Laki-laki", "code": 1}, {"label": "Perempuan", "code": 2} ] }
        }"#;
        let enums: EnumerationTables = serde_json::from_str(json).unwrap();
        assert_eq!(enums.version, "test/1");
        assert_eq!(enums.table("sex"), Some(&sex()));
        assert!(enums.validate().is_ok());
    }
}
