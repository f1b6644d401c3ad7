//! Entity trait: identity + continuity across planning cycles.

/// Entity marker + minimal interface.
///
/// An inventory item keeps its identity while its stock, prices and history
/// change between runs; predictions and traces are keyed by that identity.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
