//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values, e.g. a
/// normalised money amount or the key/value config of a list association.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
