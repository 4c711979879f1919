//! Convenience macros for creating failures with format strings.
//!
//! # Rules
//!
//! 1. **Format strings MUST be string literals** - the compiler checks the
//!    arguments, and the failure site stays greppable
//! 2. **Plain literals skip the allocation** - a message without arguments
//!    expands to a borrowed `&'static str`, never a `format!` call
//!
//! # Usage
//!
//! ```rust
//! use failure_taxonomy::{illegal_operation_failure, semantic_failure};
//!
//! let account = "ACC-1042";
//! let err = illegal_operation_failure!("cannot refund settled invoice {}", account);
//! assert_eq!(err.message(), "cannot refund settled invoice ACC-1042");
//!
//! // No arguments: no allocation.
//! let err = semantic_failure!("quota exceeded");
//! ```
//!
//! The macros cover the commonly constructed kinds. Property and
//! value failures carry structured fields and keep their explicit
//! constructors ([`Failure::property`](crate::Failure::property),
//! [`Failure::value`](crate::Failure::value)); hiding those fields behind a
//! format string would defeat the point of having them typed.

// ============================================================================
// Failure Creation Macros
// ============================================================================

/// Create a [`FailureKind::Semantic`](crate::FailureKind::Semantic) failure
/// from a format string.
#[macro_export]
macro_rules! semantic_failure {
    ($msg:literal $(,)?) => {
        $crate::Failure::semantic($msg)
    };
    ($fmt:literal, $($arg:tt)+) => {
        $crate::Failure::semantic(format!($fmt, $($arg)+))
    };
}

/// Create a
/// [`FailureKind::IllegalOperation`](crate::FailureKind::IllegalOperation)
/// failure from a format string.
#[macro_export]
macro_rules! illegal_operation_failure {
    ($msg:literal $(,)?) => {
        $crate::Failure::illegal_operation($msg)
    };
    ($fmt:literal, $($arg:tt)+) => {
        $crate::Failure::illegal_operation(format!($fmt, $($arg)+))
    };
}

/// Create a [`FailureKind::Programming`](crate::FailureKind::Programming)
/// fault from a format string. Make the message as descriptive as the
/// surrounding code allows; its audience is a developer staring at a log.
#[macro_export]
macro_rules! programming_failure {
    ($msg:literal $(,)?) => {
        $crate::Failure::programming($msg)
    };
    ($fmt:literal, $($arg:tt)+) => {
        $crate::Failure::programming(format!($fmt, $($arg)+))
    };
}

/// Create a [`FailureKind::External`](crate::FailureKind::External) fault
/// from a format string.
#[macro_export]
macro_rules! external_failure {
    ($msg:literal $(,)?) => {
        $crate::Failure::external($msg)
    };
    ($fmt:literal, $($arg:tt)+) => {
        $crate::Failure::external(format!($fmt, $($arg)+))
    };
}

/// Create a [`FailureKind::Fault`](crate::FailureKind::Fault) failure from
/// a format string.
#[macro_export]
macro_rules! fault_failure {
    ($msg:literal $(,)?) => {
        $crate::Failure::fault($msg)
    };
    ($fmt:literal, $($arg:tt)+) => {
        $crate::Failure::fault(format!($fmt, $($arg)+))
    };
}

/// Create a [`FailureKind::Immutable`](crate::FailureKind::Immutable) fault
/// from a format string.
#[macro_export]
macro_rules! immutable_failure {
    ($msg:literal $(,)?) => {
        $crate::Failure::immutable($msg)
    };
    ($fmt:literal, $($arg:tt)+) => {
        $crate::Failure::immutable(format!($fmt, $($arg)+))
    };
}

/// Create a [`FailureKind::Security`](crate::FailureKind::Security) refusal
/// from a format string.
#[macro_export]
macro_rules! security_failure {
    ($msg:literal $(,)?) => {
        $crate::Failure::security($msg)
    };
    ($fmt:literal, $($arg:tt)+) => {
        $crate::Failure::security(format!($fmt, $($arg)+))
    };
}

/// Create a mandatory-property failure for `$sender` and `$name`.
///
/// Shorthand for [`Failure::mandatory`](crate::Failure::mandatory) at sites
/// that check several mandatory properties in a row.
#[macro_export]
macro_rules! mandatory_failure {
    ($sender:expr, $name:expr $(,)?) => {
        $crate::Failure::mandatory($sender, $name)
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::{FailureKind, SenderRef, MANDATORY_MESSAGE};

    #[test]
    fn plain_literal_forms_compile_for_every_kind() {
        assert_eq!(semantic_failure!("s").kind(), FailureKind::Semantic);
        assert_eq!(
            illegal_operation_failure!("i").kind(),
            FailureKind::IllegalOperation
        );
        assert_eq!(programming_failure!("p").kind(), FailureKind::Programming);
        assert_eq!(external_failure!("e").kind(), FailureKind::External);
        assert_eq!(fault_failure!("f").kind(), FailureKind::Fault);
        assert_eq!(immutable_failure!("m").kind(), FailureKind::Immutable);
        assert_eq!(security_failure!("x").kind(), FailureKind::Security);
    }

    #[test]
    fn format_forms_interpolate() {
        let invoice = "INV-7";
        let err = illegal_operation_failure!("cannot refund {} twice", invoice);
        assert_eq!(err.message(), "cannot refund INV-7 twice");

        let branch = 3;
        let err = programming_failure!("unreachable branch {} in dispatcher", branch);
        assert_eq!(err.message(), "unreachable branch 3 in dispatcher");
    }

    #[test]
    fn macros_accept_trailing_comma() {
        let _a = semantic_failure!("broken",);
        let _b = external_failure!("disk {} is full", "sda1",);
    }

    #[test]
    fn mandatory_macro_uses_the_constant() {
        let owner = String::from("owner");
        let err = mandatory_failure!(Some(SenderRef::of(&owner)), "Name");
        assert_eq!(err.kind(), FailureKind::Property);
        assert_eq!(err.message(), MANDATORY_MESSAGE);
        assert_eq!(err.property_name(), Some("Name"));
    }

    #[test]
    fn formatted_failures_compare_like_handwritten_ones() {
        let formatted = semantic_failure!("value {} too large", 9);
        let handwritten = crate::Failure::semantic("value 9 too large");
        assert!(formatted.like(&handwritten));
    }
}
