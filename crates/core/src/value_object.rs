//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// A value object carries no identity: it is defined entirely by its field
/// values, and two instances with equal fields are interchangeable. Treat
/// them as immutable: to "change" one, build a new value.
///
/// Contrast with [`crate::Entity`], where the identifier is what matters and
/// the field values are expected to change over the entity's lifetime.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
