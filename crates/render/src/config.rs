//! Static shop configuration injected into the renderers.
//!
//! Every field has a default so partial profiles deserialize.

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Currency {
    /// Glyph printed next to amounts, e.g. `"€"`.
    pub symbol: String,
    /// ISO 4217 code used when the glyph cannot be rendered, e.g. `"EUR"`.
    pub code: String,
}

impl Default for Currency {
    fn default() -> Self {
        Self {
            symbol: "€".to_string(),
            code: "EUR".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankDetails {
    pub account_holder: String,
    pub bank_name: String,
    pub iban: String,
    pub bic: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopProfile {
    pub name: String,
    pub address_lines: Vec<String>,
    pub phone: String,
    pub tax_id: String,
    pub vat_id: String,
    pub bank: BankDetails,
    /// Reference to the logo asset. Documents reserve space for it; the
    /// renderer does not load it.
    pub logo: Option<String>,
    pub currency: Currency,
}

impl Default for ShopProfile {
    fn default() -> Self {
        Self {
            name: "Supermarket".to_string(),
            address_lines: Vec::new(),
            phone: String::new(),
            tax_id: String::new(),
            vat_id: String::new(),
            bank: BankDetails::default(),
            logo: None,
            currency: Currency::default(),
        }
    }
}

impl ShopProfile {
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Options for PDF export.
#[derive(Debug, Clone, Default)]
pub struct PdfOptions {
    /// TrueType font with full Unicode coverage. Without one (or when it fails
    /// to load) the builtin Helvetica is used and text is reduced to Latin-1.
    pub unicode_font: Option<Vec<u8>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_profile_fills_defaults() {
        let profile = ShopProfile::from_json(
            r#"{"name": "SR Markt", "bank": {"iban": "DE02 1203 0000 0000 2020 51"}}"#,
        )
        .unwrap();
        assert_eq!(profile.name, "SR Markt");
        assert_eq!(profile.bank.iban, "DE02 1203 0000 0000 2020 51");
        assert_eq!(profile.bank.bic, "");
        assert_eq!(profile.currency, Currency::default());
        assert!(profile.logo.is_none());
    }

    #[test]
    fn malformed_profile_is_a_config_error() {
        assert!(matches!(
            ShopProfile::from_json("[1, 2]"),
            Err(RenderError::Config(_))
        ));
    }
}
