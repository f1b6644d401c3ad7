//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity** and are **immutable**: a sales velocity
/// or a scenario is defined entirely by its numbers. To "change" one, build a
/// new value; never mutate a value that has already been handed out.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct SalesVelocity { daily: f64 }
///
/// impl ValueObject for SalesVelocity {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
