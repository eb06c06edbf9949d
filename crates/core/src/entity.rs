//! Entity trait: identity that persists across state changes.

/// Entity marker + minimal interface.
///
/// An entity is defined by its identifier, not its current field values: two
/// snapshots with the same id are the same entity at different points in time.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
