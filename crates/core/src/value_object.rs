//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and defined entirely by their attribute
/// values: a `ModuleSetting` or a class extensions chain with the same
/// contents is the same value, wherever it lives. "Modifying" one means
/// building a new value.
///
/// The bounds keep value objects cheap to copy, comparable by value and
/// debuggable in logs and tests.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
