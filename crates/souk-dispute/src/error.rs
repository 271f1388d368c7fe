//! # Dispute Error Types
//!
//! Structured error hierarchy for the dispute workflow. Every variant
//! carries diagnostic context: the dispute involved, the state at the time
//! of failure, and the reason for rejection. State-machine violations are
//! detected and rejected before any mutation is attempted — a failed
//! operation leaves the dispute untouched.

use thiserror::Error;

/// Errors arising from dispute workflow operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DisputeError {
    /// Attempted state transition is not valid from the current status.
    #[error("invalid dispute transition from {from} to {to}: {reason}")]
    InvalidTransition {
        /// The current status name.
        from: String,
        /// The attempted target status name.
        to: String,
        /// Human-readable reason for the rejection.
        reason: String,
    },

    /// Message or automation mutation attempted on a resolved dispute.
    #[error("dispute {dispute_id} is resolved ({status}); no further messages or automatic actions are permitted")]
    DisputeResolved {
        /// The dispute identifier.
        dispute_id: String,
        /// The terminal status name.
        status: String,
    },

    /// `resolve` called on a dispute that already reached a terminal status.
    #[error("dispute {dispute_id} was already resolved as {status}")]
    AlreadyResolved {
        /// The dispute identifier.
        dispute_id: String,
        /// The terminal status name.
        status: String,
    },

    /// `resolve` called without a decision message.
    #[error("a resolution requires a non-empty decision message")]
    MissingResolutionMessage,

    /// A dispute message carried neither text nor an image.
    #[error("a dispute message must carry text or an image")]
    EmptyMessage,

    /// Response-window configuration is not monotonic by priority.
    #[error("response windows must satisfy urgent <= normal <= low, got {urgent_mins}m/{normal_mins}m/{low_mins}m")]
    InvalidSlaWindows {
        /// Configured urgent window in minutes.
        urgent_mins: i64,
        /// Configured normal window in minutes.
        normal_mins: i64,
        /// Configured low window in minutes.
        low_mins: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_display() {
        let err = DisputeError::InvalidTransition {
            from: "RESOLVED_BUYER".to_string(),
            to: "UNDER_REVIEW".to_string(),
            reason: "resolution is irreversible".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("RESOLVED_BUYER"));
        assert!(msg.contains("UNDER_REVIEW"));
        assert!(msg.contains("irreversible"));
    }

    #[test]
    fn dispute_resolved_display() {
        let err = DisputeError::DisputeResolved {
            dispute_id: "ord-1001".to_string(),
            status: "RESOLVED_SELLER".to_string(),
        };
        assert!(format!("{err}").contains("ord-1001"));
        assert!(format!("{err}").contains("RESOLVED_SELLER"));
    }

    #[test]
    fn already_resolved_display() {
        let err = DisputeError::AlreadyResolved {
            dispute_id: "ord-2".to_string(),
            status: "RESOLVED_BUYER".to_string(),
        };
        assert!(format!("{err}").contains("ord-2"));
    }

    #[test]
    fn missing_resolution_message_display() {
        let msg = format!("{}", DisputeError::MissingResolutionMessage);
        assert!(msg.contains("non-empty"));
    }

    #[test]
    fn invalid_sla_windows_display() {
        let err = DisputeError::InvalidSlaWindows {
            urgent_mins: 1440,
            normal_mins: 240,
            low_mins: 4320,
        };
        let msg = format!("{err}");
        assert!(msg.contains("1440"));
        assert!(msg.contains("240"));
    }

    #[test]
    fn all_variants_are_debug() {
        let err = DisputeError::EmptyMessage;
        assert!(!format!("{err:?}").is_empty());
    }
}
