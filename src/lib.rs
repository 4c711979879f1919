//! # Failure Taxonomy
//!
//! A shared vocabulary of failure kinds with structural comparison and
//! aggregation.
//!
//! ## Design Philosophy
//!
//! 1. **Failures are classified, not invented**: a closed taxonomy of kinds
//!    with fixed audience and retry semantics, shared across unrelated
//!    applications
//! 2. **Structural equality, not identity**: independently constructed
//!    failures describing the same logical problem compare equal through the
//!    [`like`](Failure::like) relation
//! 3. **Aggregation is flat**: a [`CompoundFailure`] absorbs nested
//!    compounds element by element and de-duplicates by `like`, so consumers
//!    always see a depth-1 set
//! 4. **Messages are immutable**: fixed at construction, with a per-kind
//!    default policy that distinguishes "no idea why" from "here is the
//!    underlying cause"
//! 5. **Rendering never fails twice**: `Display` degrades to the raw message
//!    rather than propagating a secondary formatting failure
//!
//! ## The Two Branches (and a Third Rail)
//!
//! - **Fault branch** ([`FailureKind::is_fault`]): undefined program state.
//!   Never caught by intermediate code; exactly one top-level boundary
//!   handler logs it and terminates the execution context.
//! - **Semantic branch** ([`FailureKind::is_semantic`]): expected,
//!   recoverable outcomes the caller reasons about, and the only kinds a
//!   [`CompoundFailure`] will aggregate. A caller that decides an occurrence
//!   is actually a bug wraps it into a fault with the original as cause.
//! - **Security** ([`FailureKind::Security`]): a refusal outcome for the
//!   authorization layer, never silently swallowed.
//!
//! ## Quick Start
//!
//! ```rust
//! use failure_taxonomy::{CompoundFailure, Failure, SenderRef, MANDATORY_MESSAGE};
//!
//! struct Person {
//!     age: i64,
//!     name: Option<String>,
//! }
//!
//! fn validate(person: &Person) -> Result<(), Failure> {
//!     let mut problems = CompoundFailure::new();
//!     if person.age < 0 {
//!         problems.add_element(Failure::value(
//!             Some(SenderRef::of(person)),
//!             "Age",
//!             person.age,
//!             -1i64,
//!             MANDATORY_MESSAGE,
//!         ))?;
//!     }
//!     if person.name.is_none() {
//!         problems.add_element(Failure::mandatory(Some(SenderRef::of(person)), "Name"))?;
//!     }
//!     problems.close()?;
//!     if problems.is_empty() {
//!         Ok(())
//!     } else {
//!         Err(problems.into_failure())
//!     }
//! }
//!
//! let nobody = Person { age: -3, name: None };
//! let failure = validate(&nobody).unwrap_err();
//! assert!(failure.kind().is_semantic());
//! assert_eq!(failure.elements().map(<[Failure]>::len), Some(2));
//! ```
//!
//! ## Comparing Failures
//!
//! ```rust
//! use failure_taxonomy::Failure;
//!
//! let a = Failure::illegal_operation("account is frozen");
//! let b = Failure::illegal_operation("account is frozen");
//! let c = Failure::semantic("account is frozen");
//!
//! assert!(a.like(&b));  // same kind, same message, same (absent) cause
//! assert!(!a.like(&c)); // kind comparison is strict, never covariant
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::ptr;
use std::result;
use std::sync::Arc;

pub mod compound;
pub mod convenience;
pub mod property;
pub mod report;
pub mod taxonomy;

pub use compound::*;
pub use property::*;
pub use report::*;
pub use taxonomy::*;

/// Type alias for Results whose error is a [`Failure`].
pub type Result<T> = result::Result<T, Failure>;

/// Message constant for "the property is mandatory but was not filled out".
///
/// Using the same constant across applications keeps compound failures
/// de-duplicating correctly and keeps end-user message translation tables
/// small.
pub const MANDATORY_MESSAGE: &str = "MANDATORY";

// ============================================================================
// Variant Payloads
// ============================================================================

/// Payload of a property failure: which property of which sender.
#[derive(Debug, Clone)]
pub(crate) struct PropertyDetail {
    pub(crate) sender: Option<SenderRef>,
    /// `None` means the failure could not be attributed to one property.
    pub(crate) property_name: Option<Cow<'static, str>>,
}

impl PropertyDetail {
    fn matches(&self, other: &Self) -> bool {
        // Sender by identity, name by exact match (both-None is a match).
        self.sender == other.sender && self.property_name == other.property_name
    }
}

/// Payload of a value failure: the property fields plus old/new snapshots.
#[derive(Debug, Clone)]
pub(crate) struct ValueDetail {
    pub(crate) property: PropertyDetail,
    pub(crate) old_value: PropertyValue,
    pub(crate) new_value: PropertyValue,
}

impl ValueDetail {
    fn matches(&self, other: &Self) -> bool {
        self.property.matches(&other.property)
            && self.old_value == other.old_value
            && self.new_value == other.new_value
    }
}

/// Variant payload per taxonomy leaf.
///
/// Kinds without structured fields share the unit variants; the three kinds
/// with extra data carry explicit typed payloads. There is deliberately no
/// per-instance data bag: every field has a name and a type.
#[derive(Debug, Clone)]
pub(crate) enum FailureDetail {
    Fault,
    External,
    NoLongerSupported,
    Programming,
    Immutable,
    Semantic,
    IllegalOperation,
    Security,
    Property(PropertyDetail),
    Value(ValueDetail),
    Compound(Vec<Failure>),
}

// ============================================================================
// Failure (Primary Type)
// ============================================================================

/// A failure record: one kind from the taxonomy, a message, an optional
/// cause, and kind-specific fields.
///
/// # Key Properties
///
/// - The message is fixed at construction; [`message`](Self::message)
///   resolves the per-kind default policy when none was given
/// - The cause is immutable history, owned by reference and compared by
///   identity, surfaced through [`std::error::Error::source`]
/// - [`like`](Self::like) compares failures structurally, so reconstructed
///   or test-synthesized failures can be matched without shared identity
/// - `Display` renders a best-effort human-readable form and degrades to the
///   raw message when a value snapshot cannot be rendered
///
/// # Design Rationale - Per-Kind Constructors
///
/// We provide constructors like [`programming`](Self::programming) and
/// [`security`](Self::security) even though [`new`](Self::new) plus a
/// [`FailureKind`] would do. This is intentional:
///
/// 1. **Ergonomics**: `Failure::programming("...")` reads like the sentence
///    it is
/// 2. **Grep-ability**: engineers can search for `::programming(` to find
///    every deliberate unreachable-branch marker
/// 3. **Payload safety**: the kinds with structured fields
///    ([`property`](Self::property), [`value`](Self::value)) get signatures
///    that demand those fields instead of accepting an empty payload
#[must_use = "failures should be raised, aggregated, or handled"]
#[derive(Debug, Clone)]
pub struct Failure {
    pub(crate) detail: FailureDetail,
    message: Option<Cow<'static, str>>,
    cause: Option<Arc<dyn Error + Send + Sync>>,
}

impl Failure {
    #[inline]
    fn from_detail(detail: FailureDetail) -> Self {
        Self {
            detail,
            message: None,
            cause: None,
        }
    }

    fn empty_detail(kind: FailureKind) -> FailureDetail {
        match kind {
            FailureKind::Fault => FailureDetail::Fault,
            FailureKind::External => FailureDetail::External,
            FailureKind::NoLongerSupported => FailureDetail::NoLongerSupported,
            FailureKind::Programming => FailureDetail::Programming,
            FailureKind::Immutable => FailureDetail::Immutable,
            FailureKind::Semantic => FailureDetail::Semantic,
            FailureKind::IllegalOperation => FailureDetail::IllegalOperation,
            FailureKind::Security => FailureDetail::Security,
            FailureKind::Property => FailureDetail::Property(PropertyDetail {
                sender: None,
                property_name: None,
            }),
            FailureKind::Value => FailureDetail::Value(ValueDetail {
                property: PropertyDetail {
                    sender: None,
                    property_name: None,
                },
                old_value: PropertyValue::Absent,
                new_value: PropertyValue::Absent,
            }),
            FailureKind::Compound => FailureDetail::Compound(Vec::new()),
        }
    }

    /// Create a failure of `kind` with the kind's default message and no
    /// structured fields.
    #[inline]
    pub fn new(kind: FailureKind) -> Self {
        Self::from_detail(Self::empty_detail(kind))
    }

    /// Create a failure of `kind` with an explicit message.
    #[inline]
    pub fn with_message(kind: FailureKind, message: impl Into<Cow<'static, str>>) -> Self {
        let mut failure = Self::new(kind);
        failure.message = Some(message.into());
        failure
    }

    /// Attach a causing error. The cause is immutable history; it is never
    /// replaced once a failure has been raised.
    ///
    /// If the failure was constructed without an explicit message, the
    /// resolved default switches to the kind's caused-message constant.
    #[inline]
    pub fn caused_by<E>(self, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.caused_by_shared(Arc::new(cause))
    }

    /// Attach an already-shared causing error.
    ///
    /// Use this when several failures must report the *same* cause object:
    /// [`like`](Self::like) compares causes by identity, so only clones of
    /// one `Arc` count as the same cause.
    #[inline]
    pub fn caused_by_shared(mut self, cause: Arc<dyn Error + Send + Sync>) -> Self {
        self.cause = Some(cause);
        self
    }

    // Per-kind constructors. See "Design Rationale - Per-Kind Constructors"
    // above for why these exist despite apparent redundancy with `new`.

    /// Create a plain fault.
    #[inline]
    pub fn fault(message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_message(FailureKind::Fault, message)
    }

    /// Create an external fault (system precondition violation).
    #[inline]
    pub fn external(message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_message(FailureKind::External, message)
    }

    /// Create a fault signaling an operation dropped in a later API version.
    #[inline]
    pub fn no_longer_supported(message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_message(FailureKind::NoLongerSupported, message)
    }

    /// Create a programming fault (a branch believed unreachable was
    /// reached).
    #[inline]
    pub fn programming(message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_message(FailureKind::Programming, message)
    }

    /// Create an immutability violation (a mutating operation on an
    /// instance flagged immutable).
    #[inline]
    pub fn immutable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_message(FailureKind::Immutable, message)
    }

    /// Create a plain semantic failure.
    #[inline]
    pub fn semantic(message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_message(FailureKind::Semantic, message)
    }

    /// Create an illegal-operation failure (forbidden in the current state).
    #[inline]
    pub fn illegal_operation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_message(FailureKind::IllegalOperation, message)
    }

    /// Create a security refusal.
    #[inline]
    pub fn security(message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_message(FailureKind::Security, message)
    }

    /// Create a property failure attributed to one named property of one
    /// sender.
    ///
    /// `sender` must be `None` when the failure is raised during
    /// construction of the sender; a reference to a partially built object
    /// must never be captured.
    #[inline]
    pub fn property(
        sender: Option<SenderRef>,
        property_name: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        let mut failure = Self::from_detail(FailureDetail::Property(PropertyDetail {
            sender,
            property_name: Some(property_name.into()),
        }));
        failure.message = Some(message.into());
        failure
    }

    /// Create a property failure that cannot be attributed to a specific
    /// property of the sender.
    #[inline]
    pub fn property_unattributed(
        sender: Option<SenderRef>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        let mut failure = Self::from_detail(FailureDetail::Property(PropertyDetail {
            sender,
            property_name: None,
        }));
        failure.message = Some(message.into());
        failure
    }

    /// Create a property failure with the [`MANDATORY_MESSAGE`] message.
    #[inline]
    pub fn mandatory(
        sender: Option<SenderRef>,
        property_name: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::property(sender, property_name, MANDATORY_MESSAGE)
    }

    /// Create a value failure: a property failure that additionally reports
    /// the old and refused new value as read-only snapshots.
    ///
    /// The property name is required here: a value failure without a
    /// property to attribute the values to has nothing to report.
    #[inline]
    pub fn value(
        sender: Option<SenderRef>,
        property_name: impl Into<Cow<'static, str>>,
        old_value: impl Into<PropertyValue>,
        new_value: impl Into<PropertyValue>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        let mut failure = Self::from_detail(FailureDetail::Value(ValueDetail {
            property: PropertyDetail {
                sender,
                property_name: Some(property_name.into()),
            },
            old_value: old_value.into(),
            new_value: new_value.into(),
        }));
        failure.message = Some(message.into());
        failure
    }

    pub(crate) fn compound_from_elements(
        elements: Vec<Failure>,
        message: Option<Cow<'static, str>>,
    ) -> Self {
        Self {
            detail: FailureDetail::Compound(elements),
            message,
            cause: None,
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// The kind tag of this failure.
    #[inline]
    pub fn kind(&self) -> FailureKind {
        match &self.detail {
            FailureDetail::Fault => FailureKind::Fault,
            FailureDetail::External => FailureKind::External,
            FailureDetail::NoLongerSupported => FailureKind::NoLongerSupported,
            FailureDetail::Programming => FailureKind::Programming,
            FailureDetail::Immutable => FailureKind::Immutable,
            FailureDetail::Semantic => FailureKind::Semantic,
            FailureDetail::IllegalOperation => FailureKind::IllegalOperation,
            FailureDetail::Security => FailureKind::Security,
            FailureDetail::Property(_) => FailureKind::Property,
            FailureDetail::Value(_) => FailureKind::Value,
            FailureDetail::Compound(_) => FailureKind::Compound,
        }
    }

    /// The taxonomy branch of this failure.
    #[inline]
    pub fn class(&self) -> FailureClass {
        self.kind().class()
    }

    /// Who is expected to act on this failure.
    #[inline]
    pub fn audience(&self) -> Audience {
        self.kind().audience()
    }

    /// The message, with the per-kind default policy applied: an explicit
    /// message wins; otherwise the kind's caused-message constant when a
    /// cause is present, else the kind's default constant.
    #[inline]
    pub fn message(&self) -> &str {
        match &self.message {
            Some(message) => message.as_ref(),
            None if self.cause.is_some() => self.kind().caused_message(),
            None => self.kind().default_message(),
        }
    }

    /// The causing error, if any.
    #[inline]
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// The sender, for property and value failures.
    #[inline]
    pub fn sender(&self) -> Option<SenderRef> {
        match &self.detail {
            FailureDetail::Property(p) => p.sender,
            FailureDetail::Value(v) => v.property.sender,
            _ => None,
        }
    }

    /// The property name, for property and value failures that could be
    /// attributed to one property.
    #[inline]
    pub fn property_name(&self) -> Option<&str> {
        match &self.detail {
            FailureDetail::Property(p) => p.property_name.as_deref(),
            FailureDetail::Value(v) => v.property.property_name.as_deref(),
            _ => None,
        }
    }

    /// The old-value snapshot, for value failures.
    #[inline]
    pub fn old_value(&self) -> Option<&PropertyValue> {
        match &self.detail {
            FailureDetail::Value(v) => Some(&v.old_value),
            _ => None,
        }
    }

    /// The refused new-value snapshot, for value failures.
    #[inline]
    pub fn new_value(&self) -> Option<&PropertyValue> {
        match &self.detail {
            FailureDetail::Value(v) => Some(&v.new_value),
            _ => None,
        }
    }

    /// The aggregated elements, for compound failures. Always flat.
    #[inline]
    pub fn elements(&self) -> Option<&[Failure]> {
        match &self.detail {
            FailureDetail::Compound(elements) => Some(elements),
            _ => None,
        }
    }

    /// A borrowed structured view for boundary handlers. See
    /// [`FailureReport`].
    #[inline]
    pub fn report(&self) -> FailureReport<'_> {
        FailureReport::new(self)
    }

    // ------------------------------------------------------------------------
    // Structural Equality
    // ------------------------------------------------------------------------

    /// Structural equality: does `other` describe the same logical problem?
    ///
    /// The relation exists because failures are frequently reconstructed,
    /// for instance across a process boundary or synthesized in tests, so
    /// identity comparison is useless. The contract:
    ///
    /// - the same object is always like itself
    /// - differing kinds are never alike (strict, not covariant)
    /// - otherwise the resolved [`message`](Self::message) must match and
    ///   the causes must be the *same object* (identity, not equivalence)
    /// - kind-specific fields extend the comparison: property name and
    ///   sender identity for property failures, old/new value equality for
    ///   value failures, and bijective element matching for compounds
    ///
    /// Compound matching is order-independent and implemented as a pairwise
    /// scan: `like` is not consistent with any field hash (a compound's
    /// likeness depends on its elements' likeness), so a hash-keyed set
    /// comparison would be wrong.
    ///
    /// The implementation is one symmetric pattern match, so
    /// `a.like(b) == b.like(a)` holds for every pair of kinds; the property
    /// suite verifies this anyway.
    pub fn like(&self, other: &Failure) -> bool {
        if ptr::eq(self, other) {
            return true;
        }
        if self.kind() != other.kind() {
            return false;
        }
        if self.message() != other.message() {
            return false;
        }
        if !same_cause(self.cause.as_ref(), other.cause.as_ref()) {
            return false;
        }
        match (&self.detail, &other.detail) {
            (FailureDetail::Property(a), FailureDetail::Property(b)) => a.matches(b),
            (FailureDetail::Value(a), FailureDetail::Value(b)) => a.matches(b),
            (FailureDetail::Compound(a), FailureDetail::Compound(b)) => elements_alike(a, b),
            _ => true,
        }
    }
}

/// Cause comparison for `like`: identity, not equivalence. Two failures are
/// only alike when they share the exact same causing error object.
fn same_cause(
    a: Option<&Arc<dyn Error + Send + Sync>>,
    b: Option<&Arc<dyn Error + Send + Sync>>,
) -> bool {
    match (a, b) {
        (None, None) => true,
        // addr_eq ignores vtable metadata, which can differ between
        // otherwise-identical trait object pointers.
        (Some(a), Some(b)) => ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
        _ => false,
    }
}

/// Bijective `like` matching over two element sequences.
///
/// O(n²) by necessity: the relation is not hashable, and compounds are small
/// (one element per failed validation rule).
pub(crate) fn elements_alike(a: &[Failure], b: &[Failure]) -> bool {
    a.len() == b.len()
        && a.iter().all(|x| b.iter().any(|y| x.like(y)))
        && b.iter().all(|x| a.iter().any(|y| x.like(y)))
}

impl fmt::Display for Failure {
    /// Best-effort human-readable rendering.
    ///
    /// Property failures render as `Fault {message} for {property}.`, value
    /// failures additionally report the old and new snapshots, and compound
    /// failures render one element per line. If a value snapshot cannot be
    /// rendered, the output degrades to the raw message; a secondary
    /// formatting failure never escapes this impl.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            FailureDetail::Property(p) => match p.property_name.as_deref() {
                Some(name) => write!(f, "Fault {} for {}.", self.message(), name),
                None => write!(f, "Fault {}.", self.message()),
            },
            FailureDetail::Value(v) => {
                match (v.old_value.try_render(), v.new_value.try_render()) {
                    (Ok(old), Ok(new)) => match v.property.property_name.as_deref() {
                        Some(name) => write!(
                            f,
                            "Fault {} for {} old {} new {}.",
                            self.message(),
                            name,
                            old,
                            new
                        ),
                        None => write!(f, "Fault {} old {} new {}.", self.message(), old, new),
                    },
                    // Snapshot rendering failed; degrade to the raw message.
                    _ => f.write_str(self.message()),
                }
            }
            FailureDetail::Compound(elements) => {
                if elements.is_empty() {
                    f.write_str(self.message())
                } else {
                    for element in elements {
                        writeln!(f, "{element}")?;
                    }
                    Ok(())
                }
            }
            _ => f.write_str(self.message()),
        }
    }
}

impl Error for Failure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| cause.as_ref() as &(dyn Error + 'static))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    // ========================================================================
    // Default-Message Policy Tests
    // ========================================================================

    #[test]
    fn default_message_policy_without_cause() {
        let failure = Failure::new(FailureKind::Programming);
        assert_eq!(
            failure.message(),
            "Could not continue due to an unspecified programming error."
        );
    }

    #[test]
    fn default_message_policy_with_cause() {
        let failure = Failure::new(FailureKind::Programming)
            .caused_by(io::Error::from(io::ErrorKind::UnexpectedEof));
        assert_eq!(
            failure.message(),
            "An exception occurred, which appears to be of a programming nature."
        );
    }

    #[test]
    fn explicit_message_wins_over_defaults() {
        let failure = Failure::programming("off the map")
            .caused_by(io::Error::from(io::ErrorKind::UnexpectedEof));
        assert_eq!(failure.message(), "off the map");
    }

    // ========================================================================
    // Likeness Tests
    // ========================================================================

    #[test]
    fn like_is_reflexive() {
        let failure = Failure::semantic("too many hats");
        assert!(failure.like(&failure));
    }

    #[test]
    fn like_is_strict_about_kind() {
        // An immutability violation is a refined programming fault, but the
        // relation is not covariant.
        let a = Failure::with_message(FailureKind::Programming, "same words");
        let b = Failure::with_message(FailureKind::Immutable, "same words");
        assert!(!a.like(&b));
        assert!(!b.like(&a));
    }

    #[test]
    fn like_compares_resolved_messages() {
        // Both resolve to the same default constant.
        let a = Failure::new(FailureKind::External);
        let b = Failure::new(FailureKind::External);
        assert!(a.like(&b));

        let c = Failure::external("disk full");
        assert!(!a.like(&c));
    }

    #[test]
    fn like_compares_cause_by_identity() {
        let shared: Arc<dyn Error + Send + Sync> =
            Arc::new(io::Error::from(io::ErrorKind::NotFound));

        let a = Failure::external("disk gone").caused_by_shared(Arc::clone(&shared));
        let b = Failure::external("disk gone").caused_by_shared(Arc::clone(&shared));
        assert!(a.like(&b));

        // An equivalent but distinct cause object is not the same cause.
        let c = Failure::external("disk gone").caused_by(io::Error::from(io::ErrorKind::NotFound));
        assert!(!a.like(&c));

        let d = Failure::external("disk gone");
        assert!(!a.like(&d));
        assert!(!d.like(&a));
    }

    #[test]
    fn value_failure_likeness_is_field_by_field() {
        let person = String::from("person");
        let sender = Some(SenderRef::of(&person));
        let a = Failure::value(sender, "Age", 5i64, 10i64, MANDATORY_MESSAGE);

        let same = Failure::value(sender, "Age", 5i64, 10i64, MANDATORY_MESSAGE);
        assert!(a.like(&same));

        let other_name = Failure::value(sender, "Name", 5i64, 10i64, MANDATORY_MESSAGE);
        let other_old = Failure::value(sender, "Age", 6i64, 10i64, MANDATORY_MESSAGE);
        let other_new = Failure::value(sender, "Age", 5i64, 11i64, MANDATORY_MESSAGE);
        let other_message = Failure::value(sender, "Age", 5i64, 10i64, "different");
        assert!(!a.like(&other_name));
        assert!(!a.like(&other_old));
        assert!(!a.like(&other_new));
        assert!(!a.like(&other_message));

        let somebody_else = String::from("somebody else");
        let other_sender = Failure::value(
            Some(SenderRef::of(&somebody_else)),
            "Age",
            5i64,
            10i64,
            MANDATORY_MESSAGE,
        );
        assert!(!a.like(&other_sender));
    }

    #[test]
    fn property_name_both_none_is_a_match() {
        let owner = String::from("owner");
        let sender = Some(SenderRef::of(&owner));
        let a = Failure::property_unattributed(sender, "broken invariant");
        let b = Failure::property_unattributed(sender, "broken invariant");
        assert!(a.like(&b));

        let named = Failure::property(sender, "Age", "broken invariant");
        assert!(!a.like(&named));
    }

    // ========================================================================
    // Display Tests
    // ========================================================================

    #[test]
    fn display_property_failure() {
        let owner = String::from("owner");
        let failure = Failure::mandatory(Some(SenderRef::of(&owner)), "Name");
        assert_eq!(failure.to_string(), "Fault MANDATORY for Name.");
    }

    #[test]
    fn display_value_failure() {
        let owner = String::from("owner");
        let failure = Failure::value(
            Some(SenderRef::of(&owner)),
            "Age",
            5i64,
            -1i64,
            MANDATORY_MESSAGE,
        );
        assert_eq!(failure.to_string(), "Fault MANDATORY for Age old 5 new -1.");
    }

    #[test]
    fn display_falls_back_when_snapshot_rendering_fails() {
        fn failing() -> std::result::Result<String, fmt::Error> {
            Err(fmt::Error)
        }
        let owner = String::from("owner");
        let failure = Failure::value(
            Some(SenderRef::of(&owner)),
            "Age",
            PropertyValue::opaque("old", failing),
            1i64,
            "raw message",
        );
        assert_eq!(failure.to_string(), "raw message");
    }

    #[test]
    fn display_plain_kinds_use_message() {
        assert_eq!(Failure::security("not yours").to_string(), "not yours");
        assert_eq!(
            Failure::new(FailureKind::Fault).to_string(),
            "Could not continue due to an unspecified error."
        );
    }

    // ========================================================================
    // Error Trait Tests
    // ========================================================================

    #[test]
    fn source_exposes_the_cause() {
        let failure = Failure::external("no network")
            .caused_by(io::Error::new(io::ErrorKind::Other, "network unreachable"));
        let source = failure.source().expect("cause should be the source");
        assert!(source.to_string().contains("unreachable"));

        assert!(Failure::external("no network").source().is_none());
    }

    #[test]
    fn semantic_failure_can_be_escalated_to_a_fault() {
        // The caller decided the occurrence is actually a bug: wrap it,
        // keeping the original as cause.
        let semantic = Failure::illegal_operation("refund on settled invoice");
        let fault = Failure::new(FailureKind::Programming).caused_by(semantic);
        assert!(fault.kind().is_fault());
        assert_eq!(
            fault.message(),
            "An exception occurred, which appears to be of a programming nature."
        );
        assert!(fault.source().is_some());
    }

    #[test]
    fn accessors_are_kind_gated() {
        let plain = Failure::semantic("plain");
        assert!(plain.sender().is_none());
        assert!(plain.property_name().is_none());
        assert!(plain.old_value().is_none());
        assert!(plain.elements().is_none());

        let owner = String::from("owner");
        let value = Failure::value(Some(SenderRef::of(&owner)), "Age", 1i64, 2i64, "m");
        assert_eq!(value.property_name(), Some("Age"));
        assert_eq!(value.old_value(), Some(&PropertyValue::Int(1)));
        assert_eq!(value.new_value(), Some(&PropertyValue::Int(2)));
    }
}
