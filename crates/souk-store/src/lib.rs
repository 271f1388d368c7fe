//! # souk-store — Authoritative Dispute Store
//!
//! The single source of truth for dispute records. All state transitions
//! are committed through [`DisputeStore::try_update`], which runs the
//! caller's validate-and-mutate closure under one write lock — transitions
//! on a single dispute are linearized, and check-then-act races between the
//! sweep engine and arbitrator requests are impossible.
//!
//! Reporting ([`report`]) is derived on read from the live snapshot, so the
//! summary a dashboard sees is never stale.

pub mod report;
pub mod store;

pub use report::{DisputesReport, PriorityBreakdown};
pub use store::{DisputeFilter, DisputeStore};
