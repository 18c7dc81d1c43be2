//! Order files replayed by the shell.
//!
//! ```json
//! {
//!   "date": "2025-03-07",
//!   "sequence": "7",
//!   "customer": {"name": "Ada", "phone": "", "address": ""},
//!   "order_type": "wholesale",
//!   "tax_rate": "standard",
//!   "items": [
//!     {"barcode": "4011", "quantity": "2"},
//!     {"name": "Flowers", "price": "1,80"}
//!   ]
//! }
//! ```

use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;

use tillbook_billing::{
    Customer, Invoice, InvoiceSession, LineField, OrderType, ScanOutcome, TaxRate,
};
use tillbook_catalog::{CatalogAdapter, ProductCatalog};

/// One operator action. With a barcode it is a scan, without one a manual
/// line; the remaining fields are typed into the row afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OrderItem {
    pub barcode: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<String>,
    pub price: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderFile {
    /// Invoice date; today's local date when absent.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub sequence: Option<String>,
    #[serde(default)]
    pub customer: Customer,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default)]
    pub tax_rate: TaxRate,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl OrderFile {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Open a session on the order's date.
    pub fn session(&self) -> InvoiceSession {
        match self.date {
            Some(date) => InvoiceSession::new(date),
            None => InvoiceSession::today(),
        }
    }

    /// Apply the header fields and every item to `session`, returning the final
    /// snapshot.
    pub fn replay<C: ProductCatalog>(
        &self,
        session: &mut InvoiceSession,
        scanner: &CatalogAdapter<C>,
    ) -> anyhow::Result<Invoice> {
        if let Some(date) = self.date {
            session.set_date(date);
        }
        if let Some(sequence) = &self.sequence {
            session.set_sequence(sequence.as_str());
        }
        session.set_customer_name(self.customer.name.as_str());
        session.set_phone(self.customer.phone.as_str());
        session.set_address(self.customer.address.as_str());
        session.set_order_type(self.order_type);
        let mut invoice = session.set_tax_rate(self.tax_rate);

        for (index, item) in self.items.iter().enumerate() {
            let row = match &item.barcode {
                Some(barcode) => match session.scan(barcode, scanner) {
                    ScanOutcome::Added { row, .. } => Some(row),
                    ScanOutcome::NotFound(barcode) => Some(session.add_placeholder(&barcode).0),
                    ScanOutcome::Ignored => None,
                },
                None => Some(session.add_blank().0),
            };
            let Some(row) = row else {
                tracing::warn!(item = index, "empty barcode skipped");
                continue;
            };

            let edits = [
                (LineField::Name, &item.name),
                (LineField::Category, &item.category),
                (LineField::Quantity, &item.quantity),
                (LineField::UnitPrice, &item.price),
            ];
            for (field, value) in edits {
                if let Some(value) = value {
                    session
                        .update_line(row, field, value)
                        .with_context(|| format!("item {index}: editing {field:?}"))?;
                }
            }
            invoice = session.snapshot();
        }
        Ok(invoice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tillbook_catalog::{Barcode, InMemoryCatalog, Product};

    fn scanner() -> CatalogAdapter<InMemoryCatalog> {
        let barcode = |raw: &str| Barcode::parse(raw).unwrap();
        let catalog: InMemoryCatalog = [
            Product::new("Apple", "Fruit", barcode("4011"), 0.5),
            Product::new("Bread", "Bakery", barcode("17"), 2.2),
        ]
        .into_iter()
        .collect();
        CatalogAdapter::new(catalog)
    }

    fn replay(json: &str) -> Invoice {
        let order = OrderFile::from_json(json).unwrap();
        let mut session = order.session();
        order.replay(&mut session, &scanner()).unwrap()
    }

    #[test]
    fn scans_and_edits_reach_the_invoice() {
        let invoice = replay(
            r#"{
                "date": "2025-03-07",
                "sequence": "7",
                "customer": {"name": "Ada"},
                "order_type": "wholesale",
                "items": [
                    {"barcode": "4011", "quantity": "2"},
                    {"barcode": "17"}
                ]
            }"#,
        );
        assert_eq!(invoice.invoice_number.as_str(), "SR-20250307-007");
        assert_eq!(invoice.customer.name, "Ada");
        assert_eq!(invoice.order_type, OrderType::Wholesale);
        assert_eq!(invoice.lines.len(), 2);
        assert!((invoice.total - 3.424).abs() < 1e-9);
    }

    #[test]
    fn unknown_barcodes_and_manual_lines_become_editable_rows() {
        let invoice = replay(
            r#"{
                "date": "2025-03-07",
                "tax_rate": "zero",
                "items": [
                    {"barcode": "9999", "name": "Flowers", "price": "1,80"},
                    {"name": "Bag", "price": "0.10", "quantity": "3"},
                    {"barcode": ""}
                ]
            }"#,
        );
        assert_eq!(invoice.lines.len(), 2);
        assert_eq!(invoice.lines[0].name(), "Flowers");
        assert_eq!(invoice.lines[0].barcode(), "9999");
        assert_eq!(invoice.lines[1].barcode(), "-");
        assert!((invoice.subtotal - 2.1).abs() < 1e-9);
        assert_eq!(invoice.tax_amount, 0.0);
    }

    #[test]
    fn malformed_order_is_rejected() {
        assert!(OrderFile::from_json(r#"{"items": {}}"#).is_err());
        assert!(OrderFile::from_json(r#"{"date": "07.03.2025"}"#).is_err());
    }

    #[test]
    fn missing_date_falls_back_to_today() {
        let order = OrderFile::from_json(r#"{"items": [{"barcode": "17"}]}"#).unwrap();
        assert_eq!(order.date, None);

        let today = chrono::Local::now().date_naive();
        let mut session = order.session();
        let invoice = order.replay(&mut session, &scanner()).unwrap();
        // A run straddling midnight may see the next day.
        assert!(invoice.date == today || invoice.date == today.succ_opt().unwrap());
        assert_eq!(invoice.lines.len(), 1);
    }
}
