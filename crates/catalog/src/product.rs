use serde::{Deserialize, Serialize};

use tillbook_core::{BillingError, Entity, ValueObject};

/// Catalog key. Matched exactly: no trimming, no case folding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Barcode(String);

impl Barcode {
    /// Validate a scanned or typed barcode. Only the empty string is rejected.
    pub fn parse(raw: impl Into<String>) -> Result<Self, BillingError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(BillingError::validation("barcode must not be empty"));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Barcode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Barcode {
    type Error = BillingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Barcode> for String {
    fn from(value: Barcode) -> Self {
        value.0
    }
}

impl ValueObject for Barcode {}

/// Catalog entry as fetched from the store.
///
/// Immutable once fetched; line items copy the fields they need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    name: String,
    category: String,
    barcode: Barcode,
    unit_price: f64,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        barcode: Barcode,
        unit_price: f64,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            barcode,
            unit_price,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn barcode(&self) -> &Barcode {
        &self.barcode
    }

    /// Price per unit, in currency units (not cents).
    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }
}

impl Entity for Product {
    type Id = Barcode;

    fn id(&self) -> &Self::Id {
        &self.barcode
    }
}
