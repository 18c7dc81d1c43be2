//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. Tax rates, barcodes and invoice numbers are value
//! objects, while an invoice session is an aggregate with an identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct InvoiceNumber(String);
///
/// impl ValueObject for InvoiceNumber {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
