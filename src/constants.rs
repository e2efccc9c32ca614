//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Decision constants that are part of the model contract live next to the
//! code that applies them (`logic::model::threshold`).

/// Default currency symbol used when rendering monetary features
pub const DEFAULT_CURRENCY_SYMBOL: &str = "NT$";

/// Default thousands separator for monetary features
pub const DEFAULT_CURRENCY_SEPARATOR: char = ',';

/// Default decimal separator for monetary features
pub const DEFAULT_DECIMAL_SEPARATOR: char = '.';

/// Maximum number of factors listed per explanation section
pub const MAX_FACTORS: usize = 5;

/// Name of the bundle manifest inside a model directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Credit Risk Core";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get model bundle directory from environment (None = built-in reference bundle)
pub fn get_model_dir() -> Option<String> {
    std::env::var("RISK_MODEL_DIR")
        .ok()
        .filter(|s| !s.trim().is_empty())
}

/// Get currency symbol from environment or use default
pub fn get_currency_symbol() -> String {
    std::env::var("RISK_CURRENCY_SYMBOL")
        .unwrap_or_else(|_| DEFAULT_CURRENCY_SYMBOL.to_string())
}

/// Get thousands separator from environment or use default
pub fn get_currency_separator() -> char {
    std::env::var("RISK_CURRENCY_SEPARATOR")
        .ok()
        .and_then(|s| s.chars().next())
        .unwrap_or(DEFAULT_CURRENCY_SEPARATOR)
}

/// Get decimal separator from environment; never the same as `thousands`
pub fn get_currency_decimal_separator(thousands: char) -> char {
    std::env::var("RISK_CURRENCY_DECIMAL_SEPARATOR")
        .ok()
        .and_then(|s| s.chars().next())
        .filter(|&c| c != thousands)
        .unwrap_or_else(|| decimal_separator_for(thousands))
}

/// `.` unless that is already the thousands separator
pub fn decimal_separator_for(thousands: char) -> char {
    if thousands == DEFAULT_DECIMAL_SEPARATOR {
        ','
    } else {
        DEFAULT_DECIMAL_SEPARATOR
    }
}

/// Check if explanations are enabled (kill-switch)
pub fn is_explain_enabled() -> bool {
    std::env::var("RISK_EXPLAIN_ENABLED")
        .map(|s| s.to_lowercase() != "false" && s != "0")
        .unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_separator_differs_from_grouping() {
        assert_eq!(decimal_separator_for(','), '.');
        assert_eq!(decimal_separator_for('.'), ',');
        assert_eq!(decimal_separator_for(' '), '.');
    }
}
