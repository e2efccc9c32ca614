//! Configuration module

use std::path::PathBuf;

use crate::constants;
use crate::error::BundleError;
use crate::logic::explain::CurrencyFormat;
use crate::logic::model::ModelBundle;

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct RiskConfig {
    /// Bundle directory; None = built-in reference bundle
    pub model_dir: Option<PathBuf>,

    /// Kill-switch for the explanation stage
    pub explain_enabled: bool,

    /// Currency used for monetary features in explanations
    pub currency: CurrencyFormat,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            explain_enabled: true,
            currency: CurrencyFormat::default(),
        }
    }
}

impl RiskConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let thousands_separator = constants::get_currency_separator();

        Self {
            model_dir: constants::get_model_dir().map(PathBuf::from),
            explain_enabled: constants::is_explain_enabled(),
            currency: CurrencyFormat {
                symbol: constants::get_currency_symbol(),
                thousands_separator,
                decimal_separator: constants::get_currency_decimal_separator(thousands_separator),
                ..CurrencyFormat::default()
            },
        }
    }

    /// Load the configured bundle (once per process)
    pub fn load_bundle(&self) -> Result<ModelBundle, BundleError> {
        match &self.model_dir {
            Some(dir) => ModelBundle::load(dir),
            None => {
                log::info!("RISK_MODEL_DIR not set - using built-in reference bundle");
                ModelBundle::reference()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RiskConfig::default();
        assert!(config.model_dir.is_none());
        assert!(config.explain_enabled);
        assert_eq!(config.currency.symbol, "NT$");
    }

    #[test]
    fn test_default_loads_reference_bundle() {
        let bundle = RiskConfig::default().load_bundle().unwrap();
        assert_eq!(bundle.metadata().source, "<built-in>");
    }

    #[test]
    fn test_missing_model_dir() {
        let config = RiskConfig {
            model_dir: Some(PathBuf::from("/nonexistent/credit-risk-bundle")),
            ..Default::default()
        };
        assert!(matches!(config.load_bundle(), Err(BundleError::Io { .. })));
    }
}
