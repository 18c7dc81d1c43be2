//! One open billing transaction.
//!
//! The session is a plain value owned by the shell. Every mutation recomputes
//! the ledger synchronously and hands back a fresh [`Invoice`] snapshot.

use chrono::NaiveDate;

use tillbook_catalog::{Barcode, CatalogAdapter, Lookup, ProductCatalog};
use tillbook_core::{AggregateRoot, BillingResult, SessionId};

use crate::invoice::{Customer, Invoice, OrderType};
use crate::ledger::Ledger;
use crate::line_item::{LineField, LineItem};
use crate::numbering::InvoiceNumber;
use crate::tax::{TaxPolicy, TaxRate};

/// Sequence used until the operator enters one.
pub const DEFAULT_SEQUENCE: &str = "001";

/// Result of feeding raw scanner input to a session.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// Empty input; nothing happened.
    Ignored,
    /// The product was found and appended with quantity 1.
    Added { row: usize, invoice: Invoice },
    /// Unknown barcode. The caller decides between discarding the scan and
    /// calling [`InvoiceSession::add_placeholder`].
    NotFound(Barcode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceSession {
    id: SessionId,
    customer: Customer,
    order_type: OrderType,
    date: NaiveDate,
    sequence: String,
    ledger: Ledger,
    version: u64,
}

impl InvoiceSession {
    /// Start a session dated `date` with Standard tax and sequence `"001"`.
    pub fn new(date: NaiveDate) -> Self {
        Self::with_policy(date, TaxPolicy::default())
    }

    pub fn with_policy(date: NaiveDate, policy: TaxPolicy) -> Self {
        let session = Self {
            id: SessionId::new(),
            customer: Customer::default(),
            order_type: OrderType::default(),
            date,
            sequence: DEFAULT_SEQUENCE.to_string(),
            ledger: Ledger::new(policy, TaxRate::default()),
            version: 0,
        };
        tracing::debug!(session = %session.id, %date, "invoice session started");
        session
    }

    /// Start a session dated with the local calendar day.
    pub fn today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn invoice_number(&self) -> InvoiceNumber {
        InvoiceNumber::format(self.date, &self.sequence)
    }

    /// Side-effect free projection of the current state.
    pub fn snapshot(&self) -> Invoice {
        let totals = self.ledger.totals();
        let rate = self.ledger.tax_rate();
        Invoice {
            customer: self.customer.clone(),
            order_type: self.order_type,
            date: self.date,
            invoice_number: self.invoice_number(),
            tax_rate: rate,
            tax_percent: self.ledger.policy().percent(rate),
            lines: self.ledger.rows().to_vec(),
            subtotal: totals.subtotal,
            tax_amount: totals.tax_amount,
            total: totals.total,
        }
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) -> Invoice {
        self.customer.name = name.into();
        self.applied("customer_name")
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) -> Invoice {
        self.customer.phone = phone.into();
        self.applied("phone")
    }

    pub fn set_address(&mut self, address: impl Into<String>) -> Invoice {
        self.customer.address = address.into();
        self.applied("address")
    }

    pub fn set_order_type(&mut self, order_type: OrderType) -> Invoice {
        self.order_type = order_type;
        self.applied("order_type")
    }

    pub fn set_date(&mut self, date: NaiveDate) -> Invoice {
        self.date = date;
        self.applied("date")
    }

    pub fn set_sequence(&mut self, sequence: impl Into<String>) -> Invoice {
        self.sequence = sequence.into();
        self.applied("sequence")
    }

    pub fn set_tax_rate(&mut self, rate: TaxRate) -> Invoice {
        self.ledger.set_tax_rate(rate);
        self.applied("tax_rate")
    }

    /// Append a line; returns its row index with the refreshed invoice.
    pub fn add_line(&mut self, item: LineItem) -> (usize, Invoice) {
        let row = self.ledger.add(item);
        (row, self.applied("add_line"))
    }

    /// Look up raw scanner input and append the product when found.
    pub fn scan<C: ProductCatalog>(
        &mut self,
        raw: &str,
        catalog: &CatalogAdapter<C>,
    ) -> ScanOutcome {
        match catalog.lookup(raw) {
            None => ScanOutcome::Ignored,
            Some(Lookup::Found(product)) => {
                let (row, invoice) = self.add_line(LineItem::from_product(&product));
                ScanOutcome::Added { row, invoice }
            }
            Some(Lookup::NotFound(barcode)) => {
                tracing::warn!(session = %self.id, barcode = %barcode, "no product with barcode");
                ScanOutcome::NotFound(barcode)
            }
        }
    }

    /// Manual line for an unknown scanned barcode.
    pub fn add_placeholder(&mut self, barcode: &Barcode) -> (usize, Invoice) {
        self.add_line(LineItem::placeholder(barcode))
    }

    /// Manual line without a barcode.
    pub fn add_blank(&mut self) -> (usize, Invoice) {
        self.add_line(LineItem::blank())
    }

    /// Edit one column of a row. An out-of-range row leaves the session untouched.
    pub fn update_line(&mut self, row: usize, field: LineField, value: &str) -> BillingResult<Invoice> {
        self.ledger.update(row, field, value)?;
        Ok(self.applied("update_line"))
    }

    /// Remove the selected row; `None` when nothing was removed.
    pub fn remove_line(&mut self, row: Option<usize>) -> Option<Invoice> {
        self.ledger
            .remove(row)
            .then(|| self.applied("remove_line"))
    }

    fn applied(&mut self, mutation: &'static str) -> Invoice {
        self.version += 1;
        tracing::debug!(session = %self.id, version = self.version, mutation, "session mutated");
        self.snapshot()
    }
}

impl AggregateRoot for InvoiceSession {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tillbook_catalog::{InMemoryCatalog, Product};
    use tillbook_core::{BillingError, format_amount};

    fn march_7() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    fn catalog() -> CatalogAdapter<InMemoryCatalog> {
        CatalogAdapter::new(
            [
                Product::new("Apple", "Fruit", Barcode::parse("4011").unwrap(), 0.5),
                Product::new("Bread", "Bakery", Barcode::parse("17").unwrap(), 2.2),
            ]
            .into_iter()
            .collect(),
        )
    }

    #[test]
    fn new_session_defaults() {
        let invoice = InvoiceSession::new(march_7()).snapshot();
        assert_eq!(invoice.invoice_number.as_str(), "SR-20250307-001");
        assert_eq!(invoice.tax_rate, TaxRate::Standard);
        assert_eq!(invoice.order_type, OrderType::Retail);
        assert!(invoice.is_empty());
        assert_eq!(invoice.total, 0.0);
    }

    #[test]
    fn scan_workflow_produces_expected_totals() {
        let catalog = catalog();
        let mut session = InvoiceSession::new(march_7());

        let ScanOutcome::Added { row, .. } = session.scan("4011", &catalog) else {
            panic!("apple should be found");
        };
        session.update_line(row, LineField::Quantity, "2").unwrap();
        let ScanOutcome::Added { invoice, .. } = session.scan("17", &catalog) else {
            panic!("bread should be found");
        };

        assert_eq!(format_amount(invoice.subtotal), "3.20");
        assert_eq!(format_amount(invoice.tax_amount), "0.22");
        assert_eq!(format_amount(invoice.total), "3.42");
        assert_eq!(invoice.tax_label(), "7%");
    }

    #[test]
    fn unknown_barcode_then_placeholder_leaves_totals_unchanged() {
        let catalog = CatalogAdapter::new(InMemoryCatalog::new());
        let mut session = InvoiceSession::new(march_7());
        session.add_line(LineItem::new("Apple", 2.0, 0.5, "4011", "Fruit"));
        let before = session.snapshot();

        let ScanOutcome::NotFound(barcode) = session.scan("0000000000", &catalog) else {
            panic!("empty catalog must not find anything");
        };
        let (row, invoice) = session.add_placeholder(&barcode);

        assert_eq!(invoice.lines[row].barcode(), "0000000000");
        assert_eq!(format_amount(invoice.lines[row].subtotal()), "0.00");
        assert_eq!(invoice.total, before.total);
    }

    #[test]
    fn empty_scan_is_ignored() {
        let mut session = InvoiceSession::new(march_7());
        assert_eq!(session.scan("", &catalog()), ScanOutcome::Ignored);
        assert_eq!(session.version(), 0);
    }

    #[test]
    fn snapshot_is_idempotent() {
        let mut session = InvoiceSession::new(march_7());
        session.set_customer_name("Ada");
        session.add_line(LineItem::new("Apple", 2.0, 0.5, "4011", "Fruit"));
        let version = session.version();

        assert_eq!(session.snapshot(), session.snapshot());
        assert_eq!(session.version(), version);
    }

    #[test]
    fn header_fields_flow_into_the_snapshot() {
        let mut session = InvoiceSession::new(march_7());
        session.set_customer_name("Ada Lovelace");
        session.set_phone("+49 30 1234");
        session.set_address("Main St 1");
        session.set_order_type(OrderType::Wholesale);
        let invoice = session.set_sequence("7");

        assert_eq!(invoice.customer.name, "Ada Lovelace");
        assert_eq!(invoice.customer.phone, "+49 30 1234");
        assert_eq!(invoice.customer.address, "Main St 1");
        assert_eq!(invoice.order_type, OrderType::Wholesale);
        assert_eq!(invoice.invoice_number.as_str(), "SR-20250307-007");

        let invoice = session.set_date(NaiveDate::from_ymd_opt(2025, 12, 24).unwrap());
        assert_eq!(invoice.invoice_number.as_str(), "SR-20251224-007");
    }

    #[test]
    fn rate_change_recomputes_without_touching_lines() {
        let mut session = InvoiceSession::new(march_7());
        let (_, before) = session.add_line(LineItem::new("Wine", 1.0, 10.0, "99", "Drinks"));
        let after = session.set_tax_rate(TaxRate::Elevated);

        assert_eq!(before.lines, after.lines);
        assert_eq!(after.tax_amount, 10.0 * 0.19);
        assert_eq!(after.total, after.subtotal + after.tax_amount);
        assert_eq!(after.tax_label(), "19%");
    }

    #[test]
    fn rejected_mutations_do_not_bump_the_version() {
        let mut session = InvoiceSession::new(march_7());
        assert_eq!(
            session.update_line(0, LineField::Name, "x"),
            Err(BillingError::OutOfRange { row: 0, len: 0 })
        );
        assert_eq!(session.remove_line(Some(0)), None);
        assert_eq!(session.remove_line(None), None);
        assert_eq!(session.version(), 0);

        session.add_blank();
        assert!(session.remove_line(Some(0)).is_some());
        assert_eq!(session.version(), 2);
    }
}
