//! Structured failure view for boundary handlers.
//!
//! A failure crosses many layers untouched and is consumed exactly once, at
//! a boundary: the top-level fault handler, the request handler that maps
//! semantic failures to responses, the authorization layer that records
//! refusals. [`FailureReport`] is the view those consumers take.
//!
//! # Properties
//!
//! - Borrows from the [`Failure`] with an explicit lifetime, so it cannot
//!   outlive the failure it describes
//! - [`write_to`](FailureReport::write_to) writes into any [`fmt::Write`]
//!   sink without allocating for the borrowed fields
//! - Every field is truncated to a fixed bound, so a hostile or buggy
//!   message cannot blow up the handler's log
//! - The cause chain is walked to a fixed depth, so a cyclic or degenerate
//!   chain cannot hang the handler

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use crate::property::SenderRef;
use crate::taxonomy::{Audience, FailureClass, FailureKind};
use crate::{Failure, FailureDetail};

/// Maximum length for any individual field in formatted output.
const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Truncation indicator appended to truncated strings.
const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Maximum number of causes walked by [`FailureReport::write_to`].
const MAX_CAUSE_DEPTH: usize = 8;

/// Structured view of a [`Failure`] with borrowed data.
///
/// The lifetime parameter ties the report to the failure that created it;
/// consume it immediately and let it go.
///
/// # Example
///
/// ```rust
/// use failure_taxonomy::Failure;
///
/// let failure = Failure::illegal_operation("account is frozen");
/// let mut line = String::new();
/// failure.report().write_to(&mut line).unwrap();
/// assert!(line.contains("illegal operation"));
/// ```
#[derive(Debug)]
pub struct FailureReport<'a> {
    failure: &'a Failure,
}

impl<'a> FailureReport<'a> {
    #[inline]
    pub(crate) fn new(failure: &'a Failure) -> Self {
        Self { failure }
    }

    /// The kind tag of the reported failure.
    #[inline]
    pub fn kind(&self) -> FailureKind {
        self.failure.kind()
    }

    /// The taxonomy branch of the reported failure.
    #[inline]
    pub fn class(&self) -> FailureClass {
        self.failure.class()
    }

    /// Who should act on the reported failure.
    #[inline]
    pub fn audience(&self) -> Audience {
        self.failure.audience()
    }

    /// The resolved message, untruncated. Truncation is applied only by
    /// [`write_to`](Self::write_to); structured consumers get the raw field
    /// and apply their own policies.
    #[inline]
    pub fn message(&self) -> &'a str {
        self.failure.message()
    }

    /// The sender identity, for property and value failures.
    #[inline]
    pub fn sender(&self) -> Option<SenderRef> {
        self.failure.sender()
    }

    /// The property name, for property and value failures.
    #[inline]
    pub fn property_name(&self) -> Option<&'a str> {
        self.failure.property_name()
    }

    /// The number of aggregated elements, for compound failures.
    #[inline]
    pub fn element_count(&self) -> Option<usize> {
        self.failure.elements().map(<[Failure]>::len)
    }

    /// Write one structured line to `f` without allocating for borrowed
    /// fields.
    ///
    /// Fields are truncated to a fixed bound and the cause chain is capped
    /// at a fixed depth; a marker makes either cut visible to operators.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(
            f,
            "[{}] audience={:?} '{}'",
            self.kind().display_name(),
            self.audience(),
            truncate_with_indicator(self.message())
        )?;

        match &self.failure.detail {
            FailureDetail::Property(p) => {
                if let Some(name) = p.property_name.as_deref() {
                    write!(f, " property='{}'", truncate_with_indicator(name))?;
                }
                if let Some(sender) = p.sender {
                    write!(f, " sender='{sender}'")?;
                }
            }
            FailureDetail::Value(v) => {
                if let Some(name) = v.property.property_name.as_deref() {
                    write!(f, " property='{}'", truncate_with_indicator(name))?;
                }
                if let Some(sender) = v.property.sender {
                    write!(f, " sender='{sender}'")?;
                }
                match v.old_value.try_render() {
                    Ok(old) => write!(f, " old='{}'", truncate_with_indicator(&old))?,
                    Err(_) => f.write_str(" old=<unrenderable>")?,
                }
                match v.new_value.try_render() {
                    Ok(new) => write!(f, " new='{}'", truncate_with_indicator(&new))?,
                    Err(_) => f.write_str(" new=<unrenderable>")?,
                }
            }
            FailureDetail::Compound(elements) => {
                write!(f, " elements={}", elements.len())?;
            }
            _ => {}
        }

        let mut depth = 0;
        let mut source = self.failure.source();
        while let Some(cause) = source {
            if depth == MAX_CAUSE_DEPTH {
                f.write_str(" caused-by=...[CHAIN TRUNCATED]")?;
                break;
            }
            write!(f, " caused-by='{cause}'")?;
            depth += 1;
            source = cause.source();
        }

        Ok(())
    }
}

/// Truncate a field for display, keeping the cut visible.
///
/// Returns a `Cow<str>` to avoid allocation when no truncation is needed.
fn truncate_with_indicator(s: &str) -> Cow<'_, str> {
    if s.len() <= MAX_FIELD_OUTPUT_LEN {
        return Cow::Borrowed(s);
    }

    let max_content_len = MAX_FIELD_OUTPUT_LEN.saturating_sub(TRUNCATION_INDICATOR.len());

    // Back off to the nearest UTF-8 character boundary.
    let mut idx = max_content_len;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    if idx == 0 {
        return Cow::Borrowed(TRUNCATION_INDICATOR);
    }

    let mut result = String::with_capacity(idx + TRUNCATION_INDICATOR.len());
    result.push_str(&s[..idx]);
    result.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(result)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CompoundFailure, SenderRef, MANDATORY_MESSAGE};
    use std::io;

    fn render(failure: &Failure) -> String {
        let mut line = String::new();
        failure.report().write_to(&mut line).unwrap();
        line
    }

    // ========================================================================
    // Line Format Tests
    // ========================================================================

    #[test]
    fn plain_failure_line() {
        let line = render(&Failure::security("token expired"));
        assert!(line.starts_with("[security refusal]"));
        assert!(line.contains("audience=SecurityReviewer"));
        assert!(line.contains("'token expired'"));
    }

    #[test]
    fn property_failure_line_names_property_and_sender() {
        let owner = String::from("owner");
        let failure = Failure::mandatory(Some(SenderRef::of(&owner)), "Name");
        let line = render(&failure);
        assert!(line.contains("property='Name'"));
        assert!(line.contains(MANDATORY_MESSAGE));
        assert!(line.contains("sender='"));
        assert!(line.contains("String@0x"));
    }

    #[test]
    fn value_failure_line_reports_snapshots() {
        let owner = String::from("owner");
        let failure = Failure::value(Some(SenderRef::of(&owner)), "Age", 5i64, -1i64, "m");
        let line = render(&failure);
        assert!(line.contains("old='5'"));
        assert!(line.contains("new='-1'"));
    }

    #[test]
    fn unrenderable_snapshot_is_marked_not_fatal() {
        fn failing() -> Result<String, fmt::Error> {
            Err(fmt::Error)
        }
        let owner = String::from("owner");
        let failure = Failure::value(
            Some(SenderRef::of(&owner)),
            "Age",
            crate::PropertyValue::opaque("old", failing),
            1i64,
            "m",
        );
        let line = render(&failure);
        assert!(line.contains("old=<unrenderable>"));
        assert!(line.contains("new='1'"));
    }

    #[test]
    fn compound_failure_line_counts_elements() {
        let mut compound = CompoundFailure::new();
        compound.add_element(Failure::semantic("a")).unwrap();
        compound.add_element(Failure::semantic("b")).unwrap();
        let line = render(&compound.into_failure());
        assert!(line.contains("elements=2"));
    }

    // ========================================================================
    // Cause Chain Tests
    // ========================================================================

    #[test]
    fn cause_chain_is_walked() {
        let root = io::Error::from(io::ErrorKind::NotFound);
        let middle = Failure::external("mount lost").caused_by(root);
        let top = Failure::new(crate::FailureKind::Fault).caused_by(middle);

        let line = render(&top);
        assert!(line.contains("caused-by='mount lost'"));
        assert!(line.matches("caused-by=").count() >= 2);
    }

    #[test]
    fn cause_chain_depth_is_capped() {
        let mut failure = Failure::semantic("root");
        for _ in 0..(MAX_CAUSE_DEPTH + 3) {
            failure = Failure::semantic("wrapped").caused_by(failure);
        }
        let line = render(&failure);
        assert!(line.contains("[CHAIN TRUNCATED]"));
        assert_eq!(line.matches("caused-by='").count(), MAX_CAUSE_DEPTH);
    }

    // ========================================================================
    // Truncation Tests
    // ========================================================================

    #[test]
    fn long_message_is_truncated_with_indicator() {
        let message = "a".repeat(MAX_FIELD_OUTPUT_LEN + 100);
        let line = render(&Failure::semantic(message));
        assert!(line.contains(TRUNCATION_INDICATOR));
        assert!(line.len() < MAX_FIELD_OUTPUT_LEN + 200);
    }

    #[test]
    fn truncation_respects_utf8_boundaries() {
        let message = "й".repeat(MAX_FIELD_OUTPUT_LEN);
        let line = render(&Failure::semantic(message));
        assert!(std::str::from_utf8(line.as_bytes()).is_ok());
        assert!(line.contains(TRUNCATION_INDICATOR));
    }

    #[test]
    fn short_fields_are_borrowed_unchanged() {
        let truncated = truncate_with_indicator("short");
        assert!(matches!(truncated, Cow::Borrowed(_)));
        assert_eq!(truncated, "short");

        let exactly = "a".repeat(MAX_FIELD_OUTPUT_LEN);
        assert!(matches!(truncate_with_indicator(&exactly), Cow::Borrowed(_)));
    }

    // ========================================================================
    // Accessor Tests
    // ========================================================================

    #[test]
    fn accessors_mirror_the_failure() {
        let owner = String::from("owner");
        let failure = Failure::mandatory(Some(SenderRef::of(&owner)), "Name");
        let report = failure.report();
        assert_eq!(report.kind(), crate::FailureKind::Property);
        assert_eq!(report.class(), FailureClass::Semantic);
        assert_eq!(report.audience(), Audience::Caller);
        assert_eq!(report.message(), MANDATORY_MESSAGE);
        assert_eq!(report.property_name(), Some("Name"));
        assert_eq!(report.element_count(), None);
    }
}
