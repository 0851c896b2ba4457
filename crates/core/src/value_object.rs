//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. A sales record is one: once appended it never changes,
//! and two records with the same fields are indistinguishable.

/// Marker trait for value objects.
///
/// ## Value Object vs Keyed Row
///
/// - **Value Object**: No identity (two value objects with same values are equal)
/// - **Keyed row**: Has identity (an inventory row keeps its key while its quantity changes)
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct StockKey {
///     product: String,
///     category: String,
/// }
///
/// impl ValueObject for StockKey {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
