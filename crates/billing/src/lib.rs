//! Billing module: line-item ledger, tax policy, invoice numbering and the
//! invoice session that ties them together.
//!
//! Everything here is deterministic, synchronous domain logic (no IO, no
//! rendering). Every mutation recomputes totals before returning.

pub mod invoice;
pub mod ledger;
pub mod line_item;
pub mod numbering;
pub mod session;
pub mod tax;

pub use invoice::{Customer, Invoice, OrderType};
pub use ledger::{Ledger, Totals};
pub use line_item::{LineField, LineItem, NumericEntry};
pub use numbering::InvoiceNumber;
pub use session::{InvoiceSession, ScanOutcome};
pub use tax::{TaxPolicy, TaxRate};
