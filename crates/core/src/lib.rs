//! `tillbook-core`: shared building blocks for the billing engine.
//!
//! This crate contains **pure domain** primitives (no IO, no rendering).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod numeric;
pub mod value_object;

pub use aggregate::AggregateRoot;
pub use entity::Entity;
pub use error::{BillingError, BillingResult};
pub use id::SessionId;
pub use numeric::{format_amount, format_quantity, parse_decimal};
pub use value_object::ValueObject;
