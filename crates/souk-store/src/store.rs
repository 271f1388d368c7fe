//! # Dispute Store
//!
//! Thread-safe, cloneable in-memory store of dispute records, keyed by the
//! disputed order's identifier (one dispute per order).
//!
//! All operations are synchronous (the RwLock is `parking_lot`, not
//! `tokio::sync`) because the lock is never held across `.await` points.
//! `parking_lot::RwLock` is non-poisonable — a panicking writer does not
//! permanently corrupt the store.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use souk_core::OrderId;
use souk_dispute::{Dispute, DisputePriority, DisputeStatus};

/// Filter for listing disputes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisputeFilter {
    /// Keep only disputes with this status.
    pub status: Option<DisputeStatus>,
    /// Keep only disputes with this priority.
    pub priority: Option<DisputePriority>,
}

impl DisputeFilter {
    /// Whether a dispute matches this filter.
    pub fn matches(&self, dispute: &Dispute) -> bool {
        self.status.map_or(true, |s| dispute.status == s)
            && self.priority.map_or(true, |p| dispute.priority == p)
    }
}

/// Thread-safe in-memory dispute store.
#[derive(Debug)]
pub struct DisputeStore {
    data: Arc<RwLock<HashMap<OrderId, Dispute>>>,
}

impl Clone for DisputeStore {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl DisputeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a dispute keyed by its order identifier, returning the
    /// previous record if one existed.
    pub fn insert(&self, dispute: Dispute) -> Option<Dispute> {
        self.data.write().insert(dispute.id().clone(), dispute)
    }

    /// Retrieve a dispute by identifier.
    pub fn get(&self, id: &OrderId) -> Option<Dispute> {
        self.data.read().get(id).cloned()
    }

    /// List disputes matching the filter, most recently opened first.
    pub fn list(&self, filter: &DisputeFilter) -> Vec<Dispute> {
        let mut matched: Vec<Dispute> = self
            .data
            .read()
            .values()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched
    }

    /// Identifiers of all stored disputes.
    ///
    /// Used by the sweep engine to iterate without holding the store lock
    /// across per-dispute work.
    pub fn ids(&self) -> Vec<OrderId> {
        self.data.read().keys().cloned().collect()
    }

    /// Atomically read-validate-update a dispute.
    ///
    /// The closure receives a `&mut Dispute` and may inspect the current
    /// state, validate preconditions, mutate the record, and return `Ok(R)`
    /// or `Err(E)`. The entire operation runs under a single write lock,
    /// eliminating check-then-act races between readers and updaters.
    ///
    /// Returns `None` if the dispute doesn't exist, or `Some(result)` with
    /// the closure's `Result`.
    pub fn try_update<R, E>(
        &self,
        id: &OrderId,
        f: impl FnOnce(&mut Dispute) -> Result<R, E>,
    ) -> Option<Result<R, E>> {
        self.data.write().get_mut(id).map(f)
    }

    /// Remove a dispute (explicit administrative deletion only; the
    /// workflow itself never deletes — resolved disputes persist as audit
    /// records).
    pub fn remove(&self, id: &OrderId) -> Option<Dispute> {
        self.data.write().remove(id)
    }

    /// Check if a dispute exists.
    pub fn contains(&self, id: &OrderId) -> bool {
        self.data.read().contains_key(id)
    }

    /// Number of stored disputes.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Derive the dispute summary report from the current snapshot.
    ///
    /// Computed on read: the staleness window is zero by construction.
    pub fn report(&self) -> crate::report::DisputesReport {
        crate::report::DisputesReport::compute(self.data.read().values())
    }
}

impl Default for DisputeStore {
    fn default() -> Self {
        Self::new()
    }
}
