//! Import of product price lists exported from a spreadsheet.
//!
//! Exports carry the columns `Name`, `Category`, `Barcode` and `Sale price`.
//! Prices are often written with a decimal comma (`"4,99"`) and barcodes may
//! come through as numbers; both are normalized here.

use serde::Deserialize;
use thiserror::Error;

use tillbook_core::parse_decimal;

use crate::catalog::InMemoryCatalog;
use crate::product::{Barcode, Product};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("malformed price list: {0}")]
    Json(#[from] serde_json::Error),
}

/// A spreadsheet cell: text or a number, depending on how the column was typed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Integer(u64),
    Float(f64),
}

impl Cell {
    fn text(&self) -> Option<String> {
        let text = match self {
            Cell::Text(s) => s.trim().to_string(),
            Cell::Integer(n) => n.to_string(),
            Cell::Float(f) if f.fract() == 0.0 && *f >= 0.0 => format!("{f:.0}"),
            Cell::Float(f) => f.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }

    fn amount(&self) -> Option<f64> {
        match self {
            Cell::Text(s) => parse_decimal(s).ok(),
            Cell::Integer(n) => Some(*n as f64),
            Cell::Float(f) if f.is_finite() && *f >= 0.0 => Some(*f),
            Cell::Float(_) => None,
        }
    }
}

/// One row of the exported sheet. Any column may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CatalogRecord {
    #[serde(rename = "Name", default)]
    pub name: Option<Cell>,
    #[serde(rename = "Category", default)]
    pub category: Option<Cell>,
    #[serde(rename = "Barcode", default)]
    pub barcode: Option<Cell>,
    #[serde(rename = "Sale price", default)]
    pub sale_price: Option<Cell>,
}

/// Counts of what happened to each imported row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub inserted: usize,
    pub skipped_incomplete: usize,
    pub skipped_duplicate: usize,
    pub skipped_invalid_price: usize,
}

impl InMemoryCatalog {
    /// Load rows into the catalog. Existing barcodes are never overwritten.
    pub fn import_records<I>(&mut self, records: I) -> ImportReport
    where
        I: IntoIterator<Item = CatalogRecord>,
    {
        let mut report = ImportReport::default();

        for record in records {
            let fields = (
                record.name.as_ref().and_then(Cell::text),
                record.category.as_ref().and_then(Cell::text),
                record.barcode.as_ref().and_then(Cell::text),
                record.sale_price.as_ref(),
            );
            let (Some(name), Some(category), Some(barcode), Some(price)) = fields else {
                report.skipped_incomplete += 1;
                continue;
            };

            let Some(unit_price) = price.amount() else {
                tracing::warn!(barcode = %barcode, price = ?price, "skipping row with unreadable price");
                report.skipped_invalid_price += 1;
                continue;
            };

            let Ok(barcode) = Barcode::parse(barcode) else {
                report.skipped_incomplete += 1;
                continue;
            };

            if self.insert(Product::new(name, category, barcode, unit_price)) {
                report.inserted += 1;
            } else {
                report.skipped_duplicate += 1;
            }
        }

        tracing::info!(
            inserted = report.inserted,
            skipped_incomplete = report.skipped_incomplete,
            skipped_duplicate = report.skipped_duplicate,
            skipped_invalid_price = report.skipped_invalid_price,
            "price list imported"
        );
        report
    }

    /// Parse a JSON array of sheet rows into a fresh catalog.
    pub fn from_json(json: &str) -> Result<(Self, ImportReport), ImportError> {
        let records: Vec<CatalogRecord> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        let report = catalog.import_records(records);
        Ok((catalog, report))
    }
}
