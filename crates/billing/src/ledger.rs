//! Ordered line-item ledger and its totals.
//!
//! Totals are recomputed with a full pass over the rows after every mutation.

use serde::{Deserialize, Serialize};

use tillbook_core::{BillingError, BillingResult};

use crate::line_item::{LineField, LineItem};
use crate::tax::{TaxPolicy, TaxRate};

/// Unrounded invoice totals. Always computed together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
}

/// Line items of one invoice session, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    lines: Vec<LineItem>,
    policy: TaxPolicy,
    rate: TaxRate,
    totals: Totals,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(TaxPolicy::default(), TaxRate::default())
    }
}

impl Ledger {
    pub fn new(policy: TaxPolicy, rate: TaxRate) -> Self {
        Self {
            lines: Vec::new(),
            policy,
            rate,
            totals: Totals::default(),
        }
    }

    /// Append a line. Returns its row index.
    pub fn add(&mut self, item: LineItem) -> usize {
        self.lines.push(item);
        self.recompute();
        self.lines.len() - 1
    }

    /// Overwrite one column of an existing row.
    ///
    /// Fails with [`BillingError::OutOfRange`] (ledger untouched) for a bad
    /// row. Unparsable numeric input is not an error: the raw text is kept and
    /// the row's subtotal becomes zero.
    pub fn update(&mut self, row: usize, field: LineField, value: &str) -> BillingResult<()> {
        let len = self.lines.len();
        let line = self
            .lines
            .get_mut(row)
            .ok_or_else(|| BillingError::out_of_range(row, len))?;

        if let Some(rejected) = line.set(field, value) {
            tracing::warn!(row, field = ?field, error = %rejected, "line value kept as text");
        }
        self.recompute();
        Ok(())
    }

    /// Remove the selected row. No selection or a bad index is a no-op.
    pub fn remove(&mut self, row: Option<usize>) -> bool {
        match row {
            Some(row) if row < self.lines.len() => {
                self.lines.remove(row);
                self.recompute();
                true
            }
            _ => false,
        }
    }

    /// Switch the active tax rate. Lines are not touched.
    pub fn set_tax_rate(&mut self, rate: TaxRate) {
        self.rate = rate;
        self.recompute();
    }

    pub fn rows(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.rate
    }

    pub fn policy(&self) -> &TaxPolicy {
        &self.policy
    }

    fn recompute(&mut self) {
        let mut subtotal = 0.0;
        for line in &mut self.lines {
            subtotal += line.recompute();
        }
        let tax_amount = self.policy.apply(self.rate, subtotal);
        self.totals = Totals {
            subtotal,
            tax_amount,
            total: subtotal + tax_amount,
        };
        tracing::debug!(
            rows = self.lines.len(),
            subtotal,
            tax_amount,
            total = self.totals.total,
            "ledger recomputed"
        );
    }
}
