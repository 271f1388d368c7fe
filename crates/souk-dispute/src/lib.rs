//! # souk-dispute — Dispute Resolution Workflow
//!
//! The dispute domain for the Souk marketplace admin backend:
//!
//! - **Dispute** ([`dispute`]): the dispute aggregate and its lifecycle
//!   state machine — intake, triage, messaging, arbitrator resolution, and
//!   the automatic-action hooks the escalation engine drives.
//!
//! - **Messages & notes** ([`message`]): the append-only conversation
//!   thread and the arbitrator-only internal note trail.
//!
//! - **Automation audit** ([`audit`]): system-generated audit entries
//!   recording every automatic action.
//!
//! - **Response deadlines** ([`sla`]): pure deadline computation and breach
//!   detection, parameterized by priority-keyed response windows.
//!
//! - **Decision table** ([`policy`]): which automatic action follows a
//!   missed deadline, and after what grace period.
//!
//! - **Errors** ([`error`]): structured error hierarchy; violations are
//!   rejected before any mutation is applied.

pub mod audit;
pub mod dispute;
pub mod error;
pub mod message;
pub mod policy;
pub mod sla;

// Re-export primary types for ergonomic imports.

pub use audit::{AutomationEventKind, AutomationLogEntry};
pub use dispute::{
    AutoAction, Dispute, DisputePriority, DisputeStatus, EscalationTier, PendingAutoAction,
    ResolutionOutcome, RESOLUTION_PREFIX,
};
pub use error::DisputeError;
pub use message::{DisputeMessage, InternalNote};
pub use policy::AutoActionPolicy;
pub use sla::SlaPolicy;
