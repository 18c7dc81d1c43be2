use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tillbook_core::BillingError;

use crate::line_item::LineItem;
use crate::numbering::InvoiceNumber;
use crate::tax::TaxRate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    #[default]
    Retail,
    Wholesale,
}

impl core::fmt::Display for OrderType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            OrderType::Retail => "Retail",
            OrderType::Wholesale => "Wholesale",
        })
    }
}

impl FromStr for OrderType {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retail" => Ok(OrderType::Retail),
            "wholesale" => Ok(OrderType::Wholesale),
            other => Err(BillingError::validation(format!("unknown order type: {other}"))),
        }
    }
}

/// Customer header fields, stored as typed by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// Read-only snapshot of one billing transaction, ready to render.
///
/// `subtotal`, `tax_amount` and `total` are unrounded and always taken from the
/// same recomputation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub customer: Customer,
    pub order_type: OrderType,
    pub date: NaiveDate,
    pub invoice_number: InvoiceNumber,
    pub tax_rate: TaxRate,
    pub tax_percent: f64,
    pub lines: Vec<LineItem>,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
}

impl Invoice {
    /// Tax label for display, e.g. `"7%"`.
    pub fn tax_label(&self) -> String {
        format!("{}%", tillbook_core::format_quantity(self.tax_percent))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
