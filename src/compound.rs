//! Aggregation of simultaneous semantic failures.
//!
//! # Purpose
//!
//! Validation wants to report *everything* that is wrong in one pass, not
//! fail on the first broken rule. [`CompoundFailure`] collects semantic
//! failures while a validation routine runs, then seals the set before it is
//! raised, so downstream code can rely on the collection never changing
//! underneath it.
//!
//! # State Machine
//!
//! ```text
//! Open ──close()──▶ Closed
//!   │                  │
//!   │ add_element ok   │ add_element / close → programming fault
//! ```
//!
//! `Open` is the initial state and `Closed` is terminal; there is no
//! reopening. Misuse of the state machine is a bug in the calling code, so
//! both misuse paths report a [`FailureKind::Programming`] failure rather
//! than a semantic one.
//!
//! # Invariants
//!
//! - The aggregate is always flat: adding a compound absorbs its elements
//!   one by one, so depth never exceeds 1.
//! - No two elements are [`like`](Failure::like) each other: adding a
//!   duplicate is a silent no-op.
//! - Only semantic-branch elements are accepted; faults must propagate
//!   alone.
//!
//! # Concurrency
//!
//! The aggregate is a single-owner value with no internal locking. It is
//! `Send` and `Sync` through its field types; sharing one instance across
//! threads mid-validation is the caller's synchronization problem.

use std::borrow::Cow;

use smallvec::SmallVec;

use crate::taxonomy::FailureKind;
use crate::{elements_alike, Failure, FailureDetail};

/// Inline capacity for the element vector. Most validation compounds hold a
/// handful of elements, one per failed rule.
const INLINE_ELEMENTS: usize = 4;

// ============================================================================
// Aggregate State
// ============================================================================

/// Lifecycle state of a [`CompoundFailure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AggregateState {
    /// Accepting elements.
    Open,
    /// Sealed. Terminal; mutation attempts are programming faults.
    Closed,
}

// ============================================================================
// Compound Failure (Aggregate Builder)
// ============================================================================

/// An open→closed aggregate of simultaneous semantic failures.
///
/// Collect with [`add_element`](Self::add_element), seal with
/// [`close`](Self::close), then convert into an immutable [`Failure`] with
/// [`into_failure`](Self::into_failure) for raising.
///
/// # Example
///
/// ```rust
/// use failure_taxonomy::{CompoundFailure, Failure};
///
/// let mut problems = CompoundFailure::new();
/// problems.add_element(Failure::semantic("quota exceeded"))?;
/// problems.add_element(Failure::semantic("quota exceeded"))?; // no-op
/// problems.close()?;
///
/// assert_eq!(problems.count(), 1);
/// assert!(problems.is_closed());
/// # Ok::<(), failure_taxonomy::Failure>(())
/// ```
#[derive(Debug, Clone)]
pub struct CompoundFailure {
    state: AggregateState,
    message: Option<Cow<'static, str>>,
    elements: SmallVec<[Failure; INLINE_ELEMENTS]>,
}

impl CompoundFailure {
    /// Create an empty, open aggregate with the default compound message.
    #[inline]
    pub fn new() -> Self {
        Self {
            state: AggregateState::Open,
            message: None,
            elements: SmallVec::new(),
        }
    }

    /// Create an empty, open aggregate with an explicit message.
    #[inline]
    pub fn with_message(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            state: AggregateState::Open,
            message: Some(message.into()),
            elements: SmallVec::new(),
        }
    }

    /// Whether the aggregate has been sealed.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state == AggregateState::Closed
    }

    /// Whether the aggregate holds no elements. Valid in either state.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The number of distinct elements. Stable under duplicate additions.
    #[inline]
    pub fn count(&self) -> usize {
        self.elements.len()
    }

    /// The resolved message (explicit, or the compound kind's default).
    #[inline]
    pub fn message(&self) -> &str {
        self.message
            .as_deref()
            .unwrap_or_else(|| FailureKind::Compound.default_message())
    }

    /// A point-in-time snapshot of the elements, not a live view: the
    /// aggregate can keep changing after the call without affecting the
    /// returned copy.
    pub fn elements(&self) -> Vec<Failure> {
        self.elements.to_vec()
    }

    /// Whether some element is [`like`](Failure::like) `candidate`.
    pub fn contains_element(&self, candidate: &Failure) -> bool {
        self.elements.iter().any(|e| e.like(candidate))
    }

    /// Add a semantic failure to the aggregate.
    ///
    /// A compound element is absorbed one child at a time, so the aggregate
    /// stays flat; an element already [`like`](Failure::like) a present one
    /// is silently dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`FailureKind::Programming`] failure when the aggregate is
    /// already closed, or when `element` is not in the semantic branch.
    pub fn add_element(&mut self, element: Failure) -> crate::Result<()> {
        if self.is_closed() {
            return Err(Failure::programming(
                "attempted to add an element to a closed compound failure",
            ));
        }
        if !element.kind().is_semantic() {
            return Err(Failure::programming(
                "only semantic failures can be aggregated; faults must propagate alone",
            ));
        }
        self.absorb(element);
        Ok(())
    }

    /// Flattening insert. A compound element contributes its children (its
    /// own message is aggregate metadata, not a failure, and is dropped);
    /// anything else lands directly, subject to de-duplication.
    fn absorb(&mut self, element: Failure) {
        match element.detail {
            FailureDetail::Compound(children) => {
                for child in children {
                    self.absorb(child);
                }
            }
            _ => {
                if !self.contains_element(&element) {
                    self.elements.push(element);
                }
            }
        }
    }

    /// Seal the aggregate. Terminal.
    ///
    /// # Errors
    ///
    /// Returns a [`FailureKind::Programming`] failure when already closed.
    pub fn close(&mut self) -> crate::Result<()> {
        if self.is_closed() {
            return Err(Failure::programming(
                "attempted to close an already closed compound failure",
            ));
        }
        self.state = AggregateState::Closed;
        Ok(())
    }

    /// Structural equality against another aggregate: same resolved message
    /// and bijectively [`like`](Failure::like) elements, independent of
    /// insertion order and of open/closed state.
    pub fn like(&self, other: &CompoundFailure) -> bool {
        self.message() == other.message() && elements_alike(&self.elements, &other.elements)
    }

    /// Convert into an immutable [`Failure`] with compound payload, for
    /// raising or propagation.
    ///
    /// Raising an *empty* compound is a caller error this method does not
    /// check: decide emptiness with [`is_empty`](Self::is_empty) before
    /// raising. Conversion is allowed in either state; closing first is the
    /// expected discipline, not an enforced one.
    pub fn into_failure(self) -> Failure {
        Failure::compound_from_elements(self.elements.into_vec(), self.message)
    }
}

impl Default for CompoundFailure {
    fn default() -> Self {
        Self::new()
    }
}

impl From<CompoundFailure> for Failure {
    fn from(compound: CompoundFailure) -> Self {
        compound.into_failure()
    }
}

// ============================================================================
// Tests
// ============================================================================
