//! Invoice numbers: `SR-<yyyyMMdd>-<sequence>`.
//!
//! The sequence is free operator text. No uniqueness is enforced here; two
//! sessions given the same date and sequence produce the same number.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tillbook_core::{BillingError, BillingResult, ValueObject};

const PREFIX: &str = "SR";
const DATE_FORMAT: &str = "%Y%m%d";
const SEQUENCE_WIDTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
    /// Deterministic: the same inputs always yield the same number.
    ///
    /// Short sequences are zero-padded to three characters; longer ones are
    /// kept whole.
    pub fn format(date: NaiveDate, sequence: &str) -> Self {
        let sequence = sequence.trim();
        Self(format!(
            "{PREFIX}-{}-{sequence:0>width$}",
            date.format(DATE_FORMAT),
            width = SEQUENCE_WIDTH
        ))
    }

    /// Split a number back into its date and (padded) sequence.
    pub fn parse(number: &str) -> BillingResult<(NaiveDate, String)> {
        let invalid = || BillingError::validation(format!("not an invoice number: {number:?}"));

        let rest = number
            .strip_prefix(PREFIX)
            .and_then(|rest| rest.strip_prefix('-'))
            .ok_or_else(invalid)?;
        let (date, sequence) = rest.split_once('-').ok_or_else(invalid)?;
        if date.len() != 8 || sequence.is_empty() {
            return Err(invalid());
        }
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| invalid())?;
        Ok((date, sequence.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ValueObject for InvoiceNumber {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_date_and_padded_sequence() {
        let number = InvoiceNumber::format(date(2025, 3, 7), "7");
        assert_eq!(number.as_str(), "SR-20250307-007");
    }

    #[test]
    fn short_sequences_pad_to_the_same_number() {
        let d = date(2025, 3, 7);
        assert_eq!(InvoiceNumber::format(d, "1"), InvoiceNumber::format(d, "001"));
        assert_eq!(InvoiceNumber::format(d, " 1 "), InvoiceNumber::format(d, "001"));
    }

    #[test]
    fn long_sequences_are_not_truncated() {
        let number = InvoiceNumber::format(date(2025, 3, 7), "1234");
        assert_eq!(number.as_str(), "SR-20250307-1234");
    }

    #[test]
    fn empty_sequence_is_all_zeros() {
        let number = InvoiceNumber::format(date(2024, 12, 31), "");
        assert_eq!(number.as_str(), "SR-20241231-000");
    }

    #[test]
    fn parse_reverses_format() {
        let d = date(2025, 3, 7);
        let number = InvoiceNumber::format(d, "42");
        assert_eq!(InvoiceNumber::parse(number.as_str()).unwrap(), (d, "042".to_string()));
    }

    #[test]
    fn parse_rejects_foreign_numbers() {
        for raw in ["", "SR-", "SR-2025030-001", "XX-20250307-001", "SR-20251307-001", "SR-20250307-"] {
            assert!(InvoiceNumber::parse(raw).is_err(), "{raw:?} should not parse");
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: formatting is idempotent and parse recovers the inputs.
            #[test]
            fn format_parse_round_trip(
                days in 0i64..20_000,
                sequence in "[0-9A-Za-z]{1,6}"
            ) {
                let d = date(1990, 1, 1) + chrono::Duration::days(days);
                let first = InvoiceNumber::format(d, &sequence);
                let second = InvoiceNumber::format(d, &sequence);
                prop_assert_eq!(&first, &second);

                let (parsed_date, parsed_sequence) = InvoiceNumber::parse(first.as_str()).unwrap();
                prop_assert_eq!(parsed_date, d);
                prop_assert_eq!(parsed_sequence, format!("{sequence:0>3}"));
            }
        }
    }
}
