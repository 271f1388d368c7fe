//! # souk-automation — SLA Escalation Engine
//!
//! The time-based half of the dispute workflow. A periodic sweep scans all
//! non-terminal disputes and, per dispute, commits at most one mutation:
//!
//! 1. a scheduled automatic action whose deadline has passed **fires**
//!    (escalation, or automatic resolution), or
//! 2. a missed response deadline with no action pending is **recorded** —
//!    the breach counter increments once and an automatic action is
//!    scheduled per the decision table.
//!
//! Every mutation runs inside the store's atomic `try_update`, so a sweep
//! tick racing an arbitrator's resolution can never fire an automatic
//! action on an already-resolved dispute. Failures are isolated per
//! dispute: one bad record is logged and retried next sweep, never aborting
//! the batch.
//!
//! All decision functions take `now` explicitly; the background task
//! ([`task::SweepTask`]) is the only place the wall clock is read.

pub mod engine;
pub mod task;

pub use engine::{SweepEngine, SweepReport};
pub use task::SweepTask;
