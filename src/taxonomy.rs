//! The frozen failure taxonomy - kinds, branches, audiences, default messages.
//!
//! This module is the identity layer of the crate. Every failure carries
//! exactly one [`FailureKind`], and the kind alone determines:
//!
//! - which **branch** of the taxonomy it belongs to ([`FailureClass`])
//! - who is expected to act on it ([`Audience`])
//! - the default message used when the constructor received none
//!
//! # Taxonomy Structure
//!
//! - **Fault branch** (unrecoverable, execution context must terminate):
//!   `Fault`, `External`, `NoLongerSupported`, `Programming`, `Immutable`
//! - **Semantic branch** (expected, recoverable, caller reasons about it):
//!   `Semantic`, `Property`, `Value`, `IllegalOperation`, `Compound`
//! - **Security** (refusal outcome, surfaced to an authorization layer):
//!   `Security`
//!
//! # Governance
//!
//! The taxonomy is closed. `FailureKind` is a plain `Copy` enum with no
//! payload and no constructor escape hatch, so the set of kinds is frozen at
//! compile time; applications share the vocabulary instead of extending it.
//! Shared default-message logic is a lookup table keyed by kind, not
//! constructor chaining.
//!
//! # Copy Semantics
//!
//! `FailureKind`, `FailureClass` and `Audience` are small metadata enums and
//! are `Copy` by design. Classification data carries no governance risk from
//! duplication; handlers can extract and propagate it cheaply by value.

use std::fmt;

// ============================================================================
// Failure Kind (Primary Identity Tag)
// ============================================================================

/// The closed set of failure kinds, one case per taxonomy leaf.
///
/// A kind is strict identity for the [`like`](crate::Failure::like) relation:
/// two failures of different kinds are never alike, even when one kind is
/// conceptually a refinement of the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Undefined program state; the enclosing execution context must stop.
    Fault,
    /// A fault caused by an external system precondition violation
    /// (disk full, network down). Audience is the administrator.
    External,
    /// A fault signaling that an API member from an earlier version is no
    /// longer supported in the running version.
    NoLongerSupported,
    /// A fault reached via code assumed unreachable. Audience is the
    /// developer; the message should be as descriptive as possible.
    Programming,
    /// A programming fault raised when a mutating operation is attempted on
    /// an instance flagged immutable.
    Immutable,
    /// The nominal effect of an operation could not be reached because it
    /// would violate semantic invariants. Recoverable in principle.
    Semantic,
    /// A semantic failure attributable to one named property of one sender.
    Property,
    /// A property failure that additionally carries old/new value snapshots.
    Value,
    /// Refusal to perform an operation because it is forbidden in the
    /// current state (not a malformed input).
    IllegalOperation,
    /// An aggregate of simultaneous semantic failures, flattened to depth 1.
    Compound,
    /// Refusal to perform an operation for security reasons. Orthogonal to
    /// the fault and semantic branches.
    Security,
}

/// The three branches of the taxonomy, each with fixed retry semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureClass {
    /// Unrecoverable. Propagates uncaught to exactly one top-level boundary
    /// handler, which logs at the highest severity and terminates the
    /// execution context.
    Fault,
    /// Expected, recoverable. Calling code is meant to reason about and
    /// catch these deliberately.
    Semantic,
    /// A refusal outcome. Surfaced to an authorization layer, never
    /// silently swallowed.
    Security,
}

/// Who is expected to act on a failure of a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Audience {
    /// Operations staff watching the top-level boundary handler.
    Operator,
    /// Whoever is responsible for system configuration and infrastructure.
    Administrator,
    /// The authors of the code that raised the failure.
    Developer,
    /// The immediate caller, which is expected to handle the outcome.
    Caller,
    /// Security staff reviewing refusals.
    SecurityReviewer,
}

impl FailureKind {
    /// The taxonomy branch this kind belongs to.
    #[inline]
    pub const fn class(self) -> FailureClass {
        match self {
            Self::Fault
            | Self::External
            | Self::NoLongerSupported
            | Self::Programming
            | Self::Immutable => FailureClass::Fault,
            Self::Semantic
            | Self::Property
            | Self::Value
            | Self::IllegalOperation
            | Self::Compound => FailureClass::Semantic,
            Self::Security => FailureClass::Security,
        }
    }

    /// Whether this kind is in the fault branch (unrecoverable).
    #[inline]
    pub const fn is_fault(self) -> bool {
        matches!(self.class(), FailureClass::Fault)
    }

    /// Whether this kind is in the semantic branch (recoverable in principle).
    #[inline]
    pub const fn is_semantic(self) -> bool {
        matches!(self.class(), FailureClass::Semantic)
    }

    /// The intended audience for failures of this kind.
    #[inline]
    pub const fn audience(self) -> Audience {
        match self {
            Self::Fault => Audience::Operator,
            Self::External | Self::NoLongerSupported => Audience::Administrator,
            Self::Programming | Self::Immutable => Audience::Developer,
            Self::Semantic
            | Self::Property
            | Self::Value
            | Self::IllegalOperation
            | Self::Compound => Audience::Caller,
            Self::Security => Audience::SecurityReviewer,
        }
    }

    /// Human-readable kind name for reports. Zero-allocation.
    #[inline]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Fault => "fault",
            Self::External => "external fault",
            Self::NoLongerSupported => "no-longer-supported fault",
            Self::Programming => "programming fault",
            Self::Immutable => "immutability violation",
            Self::Semantic => "semantic failure",
            Self::Property => "property failure",
            Self::Value => "value failure",
            Self::IllegalOperation => "illegal operation",
            Self::Compound => "compound semantic failure",
            Self::Security => "security refusal",
        }
    }

    /// The message used when a failure of this kind is constructed with
    /// neither a message nor a cause.
    #[inline]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::Fault => "Could not continue due to an unspecified error.",
            Self::External => "Could not continue due to an unspecified external error.",
            Self::NoLongerSupported => "The requested operation is no longer supported.",
            Self::Programming | Self::Immutable => {
                "Could not continue due to an unspecified programming error."
            }
            Self::Semantic => {
                "The nominal effect could not be reached without violating semantics."
            }
            Self::Property => "A property of the sender violates its semantics.",
            Self::Value => "A property of the sender could not be changed to the requested value.",
            Self::IllegalOperation => "The operation is not allowed in the current state.",
            Self::Compound => "Multiple semantic failures occurred.",
            Self::Security => "The operation was refused for security reasons.",
        }
    }

    /// The message used when a failure of this kind is constructed with a
    /// cause but no message. Distinguishes "no idea why" from "here is the
    /// underlying cause".
    #[inline]
    pub const fn caused_message(self) -> &'static str {
        match self {
            Self::Fault => "An exception occurred that left the program in an undefined state.",
            Self::External => "An exception occurred, which appears to be of an external nature.",
            Self::NoLongerSupported => {
                "An exception occurred in an operation that is no longer supported."
            }
            Self::Programming | Self::Immutable => {
                "An exception occurred, which appears to be of a programming nature."
            }
            Self::Semantic | Self::Property | Self::Value | Self::IllegalOperation => {
                "An exception occurred, which appears to be of a semantic nature."
            }
            Self::Compound => "An exception occurred while aggregating semantic failures.",
            Self::Security => "An exception occurred, which appears to be security-related.",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// All kinds, in taxonomy order. Used by governance tests and by callers
/// that need to enumerate the vocabulary (documentation generators, etc.).
pub const ALL_KINDS: [FailureKind; 11] = [
    FailureKind::Fault,
    FailureKind::External,
    FailureKind::NoLongerSupported,
    FailureKind::Programming,
    FailureKind::Immutable,
    FailureKind::Semantic,
    FailureKind::Property,
    FailureKind::Value,
    FailureKind::IllegalOperation,
    FailureKind::Compound,
    FailureKind::Security,
];

// ============================================================================
// Tests
// ============================================================================
