//! # Validation Errors
//!
//! Structured validation errors for domain-primitive newtypes, built with
//! `thiserror`. Each variant names the identifier kind that failed so
//! operators can diagnose bad upstream data without inspecting payloads.

use thiserror::Error;

/// Validation errors for domain primitive newtypes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// An externally-owned identifier was empty after trimming.
    #[error("{kind} identifier must not be empty")]
    EmptyIdentifier {
        /// The identifier kind (e.g., "order", "participant").
        kind: &'static str,
    },

    /// An externally-owned identifier exceeded the length bound.
    #[error("{kind} identifier must not exceed {max} characters, got {len}")]
    IdentifierTooLong {
        /// The identifier kind.
        kind: &'static str,
        /// Maximum permitted length.
        max: usize,
        /// Actual length of the rejected value.
        len: usize,
    },
}
