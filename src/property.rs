//! Typed field wrappers for property-attributed failures.
//!
//! # Architecture
//!
//! Property and value failures carry two kinds of extra data with opposite
//! comparison rules, and this module encodes the rules in distinct types so
//! they cannot be confused at compile time:
//!
//! - [`SenderRef`]: a back reference to the object the failure is about,
//!   compared by **identity**, never owned.
//! - [`PropertyValue`]: a read-only snapshot of a property value, compared by
//!   **value equality**, never by identity.
//!
//! # Ownership Model
//!
//! A `SenderRef` deliberately does not keep the sender alive. A failure
//! outlives the call that raised it and frequently crosses layers the sender
//! has no business visiting; retaining the sender would also expose a
//! partially constructed object when the failure is raised from a
//! constructor. The reference is therefore reduced to an identity token
//! (address plus type name) at construction time, and the failure raised
//! during construction of the sender simply omits it.

use std::any;
use std::borrow::Cow;
use std::fmt;

// ============================================================================
// Sender Identity
// ============================================================================

/// Non-owning identity token for the object a property failure is about.
///
/// Two `SenderRef`s are equal exactly when they were taken from the same
/// object: the same address with the same static type. This is the identity
/// comparison the [`like`](crate::Failure::like) protocol requires for
/// senders, without holding a borrow across the failure's lifetime.
///
/// # Caveats
///
/// The token is only meaningful while the sender is alive and has not moved.
/// That matches the intended lifecycle: a failure is raised at the point of
/// detection and consumed once at a boundary, within the dynamic extent of
/// the operation on the sender. Comparing tokens taken across allocations
/// that happen to reuse an address is out of contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SenderRef {
    addr: usize,
    type_name: &'static str,
}

impl SenderRef {
    /// Capture the identity of `sender` without taking ownership.
    #[inline]
    pub fn of<T: ?Sized>(sender: &T) -> Self {
        Self {
            addr: sender as *const T as *const () as usize,
            type_name: any::type_name::<T>(),
        }
    }

    /// The static type name of the sender, for reports.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Display for SenderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:#x}", self.type_name, self.addr)
    }
}

// ============================================================================
// Property Value Snapshots
// ============================================================================

/// Rendering callback for [`PropertyValue::Opaque`] snapshots.
///
/// Allowed to fail; [`Display`](fmt::Display) on the owning failure degrades
/// to the raw message instead of propagating the error.
pub type OpaqueRender = fn() -> Result<String, fmt::Error>;

/// A point-in-time snapshot of a property value.
///
/// Snapshots are read-only and compared by value equality, with `Absent`
/// standing in for "no value" on either side of a comparison. They exist so
/// a value failure can report "could not change `Age` from `5` to `-1`"
/// long after the property itself has moved on.
///
/// # Variants
///
/// The common primitive shapes are inline. Anything else goes through
/// `Opaque`, which carries a stable equality key plus a rendering callback;
/// equality uses the key only, and rendering is allowed to fail (the owning
/// failure's `Display` then falls back to its raw message).
///
/// # Float Equality
///
/// `Float` compares by bit pattern, so `NaN` snapshots are equal to
/// themselves and comparison stays a proper equivalence relation.
#[derive(Debug, Clone)]
pub enum PropertyValue {
    /// No value (the property was unset, or the failure side has no value).
    Absent,
    /// Boolean snapshot.
    Bool(bool),
    /// Integer snapshot.
    Int(i64),
    /// Floating-point snapshot, compared by bit pattern.
    Float(f64),
    /// Text snapshot.
    Text(Cow<'static, str>),
    /// Snapshot of a value with no inline representation.
    Opaque {
        /// Stable identity of the snapshot; the sole input to equality.
        key: Cow<'static, str>,
        /// Lazy textual rendering, allowed to fail.
        render: OpaqueRender,
    },
}

impl PropertyValue {
    /// Build a text snapshot.
    #[inline]
    pub fn text(value: impl Into<Cow<'static, str>>) -> Self {
        Self::Text(value.into())
    }

    /// Build an opaque snapshot from an equality key and a renderer.
    #[inline]
    pub fn opaque(key: impl Into<Cow<'static, str>>, render: OpaqueRender) -> Self {
        Self::Opaque {
            key: key.into(),
            render,
        }
    }

    /// Whether this snapshot is `Absent`.
    #[inline]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Render the snapshot, surfacing `Opaque` renderer failures to the
    /// caller instead of panicking the way `ToString` would.
    pub fn try_render(&self) -> Result<String, fmt::Error> {
        match self {
            Self::Absent => Ok(String::from("null")),
            Self::Bool(b) => Ok(b.to_string()),
            Self::Int(i) => Ok(i.to_string()),
            Self::Float(x) => Ok(x.to_string()),
            Self::Text(s) => Ok(s.clone().into_owned()),
            Self::Opaque { render, .. } => render(),
        }
    }
}

impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Absent, Self::Absent) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Opaque { key: a, .. }, Self::Opaque { key: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Eq for PropertyValue {}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&'static str> for PropertyValue {
    fn from(value: &'static str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(Cow::Owned(value))
    }
}

impl<T> From<Option<T>> for PropertyValue
where
    T: Into<PropertyValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

impl fmt::Display for PropertyValue {
    /// Renders the snapshot; an `Opaque` renderer failure surfaces as a
    /// formatting error. Failure rendering paths that must not propagate
    /// formatting errors use [`try_render`](Self::try_render) and fall back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::Opaque { render, .. } => f.write_str(&render()?),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_ref_identity_same_object() {
        let owner = String::from("owner");
        assert_eq!(SenderRef::of(&owner), SenderRef::of(&owner));
    }

    #[test]
    fn sender_ref_identity_distinct_objects() {
        let a = String::from("a");
        let b = String::from("b");
        assert_ne!(SenderRef::of(&a), SenderRef::of(&b));
    }

    #[test]
    fn sender_ref_distinguishes_types_at_same_address() {
        // A struct and its first field share an address; the type name
        // keeps their identities apart.
        struct Wrapper {
            inner: u64,
        }
        let w = Wrapper { inner: 7 };
        assert_ne!(SenderRef::of(&w), SenderRef::of(&w.inner));
    }

    #[test]
    fn sender_ref_display_names_the_type() {
        let x = 42u32;
        let shown = SenderRef::of(&x).to_string();
        assert!(shown.contains("u32"));
        assert!(shown.contains("0x"));
    }

    #[test]
    fn value_equality_is_by_value_not_identity() {
        assert_eq!(PropertyValue::Int(5), PropertyValue::Int(5));
        assert_eq!(PropertyValue::text("Age"), PropertyValue::text("Age".to_string()));
        assert_ne!(PropertyValue::Int(5), PropertyValue::Int(6));
    }

    #[test]
    fn absent_equals_absent_only() {
        assert_eq!(PropertyValue::Absent, PropertyValue::Absent);
        assert_ne!(PropertyValue::Absent, PropertyValue::Int(0));
        assert_ne!(PropertyValue::Absent, PropertyValue::text(""));
    }

    #[test]
    fn float_nan_equals_itself() {
        assert_eq!(PropertyValue::Float(f64::NAN), PropertyValue::Float(f64::NAN));
        assert_ne!(PropertyValue::Float(0.0), PropertyValue::Float(-0.0));
    }

    #[test]
    fn opaque_equality_uses_key_only() {
        fn render_a() -> Result<String, fmt::Error> {
            Ok(String::from("a"))
        }
        fn render_b() -> Result<String, fmt::Error> {
            Ok(String::from("b"))
        }
        assert_eq!(
            PropertyValue::opaque("k", render_a),
            PropertyValue::opaque("k", render_b)
        );
        assert_ne!(
            PropertyValue::opaque("k1", render_a),
            PropertyValue::opaque("k2", render_a)
        );
    }

    #[test]
    fn try_render_reports_opaque_failure() {
        fn failing() -> Result<String, fmt::Error> {
            Err(fmt::Error)
        }
        let v = PropertyValue::opaque("broken", failing);
        assert!(v.try_render().is_err());
        assert_eq!(PropertyValue::Int(10).try_render().unwrap(), "10");
        assert_eq!(PropertyValue::Absent.try_render().unwrap(), "null");
    }

    #[test]
    fn from_option_maps_none_to_absent() {
        assert_eq!(PropertyValue::from(None::<i64>), PropertyValue::Absent);
        assert_eq!(PropertyValue::from(Some(3i64)), PropertyValue::Int(3));
    }
}
