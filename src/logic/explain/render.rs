//! Sentence templates for attribution entries

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CURRENCY_SEPARATOR, DEFAULT_CURRENCY_SYMBOL, DEFAULT_DECIMAL_SEPARATOR};
use crate::logic::categories::EnumerationTables;
use crate::logic::features::{FeatureKind, FeatureSchema};

/// Shown instead of an empty risers section
pub const NO_DOMINANT_RISER: &str = "Tidak ada faktor dominan yang meningkatkan risiko gagal bayar.";

/// Shown instead of an empty fallers section
pub const NO_DOMINANT_FALLER: &str = "Tidak ada faktor dominan yang menurunkan risiko gagal bayar.";

// ============================================================================
// CURRENCY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub thousands_separator: char,
    /// Must differ from `thousands_separator` when `decimals > 0`
    pub decimal_separator: char,
    pub decimals: usize,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            thousands_separator: DEFAULT_CURRENCY_SEPARATOR,
            decimal_separator: DEFAULT_DECIMAL_SEPARATOR,
            decimals: 0,
        }
    }
}

impl CurrencyFormat {
    /// `NT$ 1,234,567` / `-NT$ 1,200`
    pub fn format(&self, amount: f64) -> String {
        let fixed = format!("{:.*}", self.decimals, amount.abs());
        let (whole, fraction) = match fixed.split_once('.') {
            Some((w, f)) => (w, Some(f)),
            None => (fixed.as_str(), None),
        };

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(digit);
        }

        // Rounding can turn a tiny negative into zero; don't print "-NT$ 0"
        let negative = amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
        let sign = if negative { "-" } else { "" };

        match fraction {
            Some(f) => format!("{}{} {}{}{}", sign, self.symbol, grouped, self.decimal_separator, f),
            None => format!("{}{} {}", sign, self.symbol, grouped),
        }
    }
}

// ============================================================================
// SENTENCES
// ============================================================================

/// Renders one sentence per attribution entry
pub struct SentenceRenderer<'a> {
    schema: &'a FeatureSchema,
    tables: &'a EnumerationTables,
    currency: &'a CurrencyFormat,
}

impl<'a> SentenceRenderer<'a> {
    pub fn new(schema: &'a FeatureSchema, tables: &'a EnumerationTables, currency: &'a CurrencyFormat) -> Self {
        Self { schema, tables, currency }
    }

    pub fn render(&self, feature: &str, signed_score: f64, raw_value: f64) -> String {
        let direction = if signed_score > 0.0 { "meningkatkan" } else { "menurunkan" };

        let Some(spec) = self.schema.spec(feature) else {
            return format!("{} {} {} risiko gagal bayar.", feature, format_number(raw_value), direction);
        };

        match spec.kind {
            FeatureKind::Monetary => format!(
                "{} sebesar {} {} risiko gagal bayar.",
                spec.label,
                self.currency.format(raw_value),
                direction
            ),
            FeatureKind::Delinquency | FeatureKind::Categorical => format!(
                "{} \"{}\" {} risiko gagal bayar.",
                spec.label,
                self.category_label(spec.table.as_deref(), raw_value),
                direction
            ),
            FeatureKind::Numeric => format!(
                "{} {} {} risiko gagal bayar.",
                spec.label,
                format_number(raw_value),
                direction
            ),
        }
    }

    /// Same table as input resolution, so the wording matches the form
    fn category_label(&self, table: Option<&str>, code: f64) -> String {
        let label = if code.fract() == 0.0 {
            table
                .and_then(|t| self.tables.table(t))
                .and_then(|t| t.label_for(code as i64))
        } else {
            None
        };

        match label {
            Some(l) => l.to_string(),
            None => format!("kode {}", format_number(code)),
        }
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let s = format!("{:.2}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::bundle::ModelBundle;

    #[test]
    fn test_currency_grouping() {
        let c = CurrencyFormat::default();
        assert_eq!(c.format(0.0), "NT$ 0");
        assert_eq!(c.format(999.0), "NT$ 999");
        assert_eq!(c.format(20000.0), "NT$ 20,000");
        assert_eq!(c.format(1234567.4), "NT$ 1,234,567");
        assert_eq!(c.format(-1200.0), "-NT$ 1,200");
        assert_eq!(c.format(-0.2), "NT$ 0");
    }

    #[test]
    fn test_currency_custom_format() {
        let c = CurrencyFormat {
            symbol: "Rp".to_string(),
            thousands_separator: '.',
            decimal_separator: ',',
            decimals: 2,
        };
        assert_eq!(c.format(1500000.5), "Rp 1.500.000,50");
        assert_eq!(c.format(-1234.567), "-Rp 1.234,57");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(30.0), "30");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(1.5), "1.5");
    }

    #[test]
    fn test_render_by_kind() {
        let bundle = ModelBundle::reference().unwrap();
        let currency = CurrencyFormat::default();
        let r = SentenceRenderer::new(bundle.schema(), bundle.tables(), &currency);

        assert_eq!(
            r.render("LIMIT_BAL", -0.4, 500000.0),
            "Limit kredit sebesar NT$ 500,000 menurunkan risiko gagal bayar."
        );
        assert_eq!(
            r.render("PAY_0", 1.75, 3.0),
            "Status pembayaran (Sep) \"Telat 3 bulan\" meningkatkan risiko gagal bayar."
        );
        assert_eq!(
            r.render("SEX", 0.1, 1.0),
            "Jenis kelamin \"Laki-laki\" meningkatkan risiko gagal bayar."
        );
        assert_eq!(r.render("AGE", 0.02, 40.0), "Usia 40 meningkatkan risiko gagal bayar.");
    }

    #[test]
    fn test_render_unknown_code() {
        let bundle = ModelBundle::reference().unwrap();
        let currency = CurrencyFormat::default();
        let r = SentenceRenderer::new(bundle.schema(), bundle.tables(), &currency);

        assert_eq!(
            r.render("EDUCATION", -0.1, 6.0),
            "Pendidikan \"kode 6\" menurunkan risiko gagal bayar."
        );
    }
}
