use core::str::FromStr;

use serde::{Deserialize, Serialize};

use tillbook_catalog::{Barcode, Product};
use tillbook_core::{BillingError, parse_decimal};

/// Name given to lines entered by hand.
pub const PLACEHOLDER_NAME: &str = "Enter Product Name";
/// Category given to lines entered by hand.
pub const PLACEHOLDER_CATEGORY: &str = "General";
/// Barcode shown on hand-entered lines that were not scanned.
pub const NO_BARCODE: &str = "-";

/// A quantity or unit price as the operator left it.
///
/// Input that does not parse as a non-negative number is kept verbatim so it
/// can be shown and corrected; it contributes nothing to the subtotal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum NumericEntry {
    Parsed(f64),
    Unparsed(String),
}

impl NumericEntry {
    pub fn parse(raw: &str) -> Self {
        match parse_decimal(raw) {
            Ok(value) => NumericEntry::Parsed(value),
            Err(_) => NumericEntry::Unparsed(raw.to_string()),
        }
    }

    /// The value usable in arithmetic: parsed, finite and non-negative.
    pub fn value(&self) -> Option<f64> {
        match self {
            NumericEntry::Parsed(v) if v.is_finite() && *v >= 0.0 => Some(*v),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.value().is_some()
    }
}

impl From<f64> for NumericEntry {
    fn from(value: f64) -> Self {
        NumericEntry::Parsed(value)
    }
}

/// Editable column of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineField {
    Name,
    Quantity,
    UnitPrice,
    Barcode,
    Category,
}

impl FromStr for LineField {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(LineField::Name),
            "quantity" | "qty" => Ok(LineField::Quantity),
            "unit_price" | "price" => Ok(LineField::UnitPrice),
            "barcode" => Ok(LineField::Barcode),
            "category" => Ok(LineField::Category),
            other => Err(BillingError::validation(format!("unknown line field: {other}"))),
        }
    }
}

/// One row of an invoice.
///
/// `subtotal` is derived from `quantity` and `unit_price` and refreshed on
/// every edit; it is never set directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    name: String,
    quantity: NumericEntry,
    unit_price: NumericEntry,
    barcode: String,
    category: String,
    subtotal: f64,
}

impl LineItem {
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<NumericEntry>,
        unit_price: impl Into<NumericEntry>,
        barcode: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let mut item = Self {
            name: name.into(),
            quantity: quantity.into(),
            unit_price: unit_price.into(),
            barcode: barcode.into(),
            category: category.into(),
            subtotal: 0.0,
        };
        item.recompute();
        item
    }

    /// Copy a catalog product into a new line with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        Self::new(
            product.name(),
            1.0,
            product.unit_price(),
            product.barcode().as_str(),
            product.category(),
        )
    }

    /// Manual line for a scanned barcode the catalog does not know.
    pub fn placeholder(barcode: &Barcode) -> Self {
        Self::new(PLACEHOLDER_NAME, 1.0, 0.0, barcode.as_str(), PLACEHOLDER_CATEGORY)
    }

    /// Manual line added without any scan.
    pub fn blank() -> Self {
        Self::new(PLACEHOLDER_NAME, 1.0, 0.0, NO_BARCODE, PLACEHOLDER_CATEGORY)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> &NumericEntry {
        &self.quantity
    }

    pub fn unit_price(&self) -> &NumericEntry {
        &self.unit_price
    }

    pub fn barcode(&self) -> &str {
        &self.barcode
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn subtotal(&self) -> f64 {
        self.subtotal
    }

    /// Both numeric columns hold usable values.
    pub fn is_valid(&self) -> bool {
        self.quantity.is_valid() && self.unit_price.is_valid()
    }

    /// Overwrite one column with operator input.
    ///
    /// Numeric columns that fail to parse keep the raw text; the returned error
    /// is informational and the line is still updated.
    pub(crate) fn set(&mut self, field: LineField, value: &str) -> Option<BillingError> {
        let mut rejected = None;
        match field {
            LineField::Name => self.name = value.to_string(),
            LineField::Barcode => self.barcode = value.to_string(),
            LineField::Category => self.category = value.to_string(),
            LineField::Quantity | LineField::UnitPrice => {
                let entry = NumericEntry::parse(value);
                if !entry.is_valid() {
                    rejected = Some(BillingError::invalid_numeric(value));
                }
                if field == LineField::Quantity {
                    self.quantity = entry;
                } else {
                    self.unit_price = entry;
                }
            }
        }
        self.recompute();
        rejected
    }

    /// Refresh the derived subtotal from the current inputs.
    pub(crate) fn recompute(&mut self) -> f64 {
        self.subtotal = match (self.quantity.value(), self.unit_price.value()) {
            (Some(q), Some(p)) if (q * p).is_finite() => q * p,
            _ => 0.0,
        };
        self.subtotal
    }
}
