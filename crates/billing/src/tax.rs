use core::str::FromStr;

use serde::{Deserialize, Serialize};

use tillbook_core::{BillingError, ValueObject, format_quantity};

/// Selectable tax rate. Exactly one is active per invoice.
///
/// The percentage behind each rate is jurisdictional configuration, see
/// [`TaxPolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxRate {
    Zero,
    #[default]
    Standard,
    Elevated,
}

impl TaxRate {
    pub const ALL: [TaxRate; 3] = [TaxRate::Zero, TaxRate::Standard, TaxRate::Elevated];

    pub fn as_str(self) -> &'static str {
        match self {
            TaxRate::Zero => "zero",
            TaxRate::Standard => "standard",
            TaxRate::Elevated => "elevated",
        }
    }
}

impl FromStr for TaxRate {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" => Ok(TaxRate::Zero),
            "standard" => Ok(TaxRate::Standard),
            "elevated" => Ok(TaxRate::Elevated),
            other => Err(BillingError::validation(format!("unknown tax rate: {other}"))),
        }
    }
}

impl ValueObject for TaxRate {}

/// Percentages behind each [`TaxRate`] (defaults: 0 %, 7 %, 19 %).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxPolicy {
    pub zero_percent: f64,
    pub standard_percent: f64,
    pub elevated_percent: f64,
}

impl Default for TaxPolicy {
    fn default() -> Self {
        Self {
            zero_percent: 0.0,
            standard_percent: 7.0,
            elevated_percent: 19.0,
        }
    }
}

impl TaxPolicy {
    pub fn percent(&self, rate: TaxRate) -> f64 {
        match rate {
            TaxRate::Zero => self.zero_percent,
            TaxRate::Standard => self.standard_percent,
            TaxRate::Elevated => self.elevated_percent,
        }
    }

    pub fn multiplier(&self, rate: TaxRate) -> f64 {
        self.percent(rate) / 100.0
    }

    /// Tax owed on `subtotal` at `rate`. Pure and total.
    pub fn apply(&self, rate: TaxRate, subtotal: f64) -> f64 {
        subtotal * self.multiplier(rate)
    }

    /// Display label, e.g. `"7%"`.
    pub fn label(&self, rate: TaxRate) -> String {
        format!("{}%", format_quantity(self.percent(rate)))
    }

    /// Reverse of [`TaxPolicy::label`], for shells that offer the labels as choices.
    pub fn rate_for_label(&self, label: &str) -> Option<TaxRate> {
        let label = label.trim();
        TaxRate::ALL.into_iter().find(|rate| self.label(*rate) == label)
    }
}
