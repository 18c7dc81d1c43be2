//! Aggregate root trait for stateful engine objects.

/// Aggregate root marker + minimal interface.
///
/// Intentionally small: an aggregate exposes an identity and a revision
/// counter, and keeps its own invariants behind its mutation methods.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Monotonically increasing revision of the aggregate's state.
    ///
    /// Incremented once per applied mutation; rejected mutations leave it
    /// unchanged.
    fn version(&self) -> u64;
}
