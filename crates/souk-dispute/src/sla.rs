//! # Response-Deadline Policy
//!
//! Pure computation of arbitrator response deadlines and breach detection.
//! No side effects: every function takes `now` explicitly so tests can
//! simulate time passage deterministically.
//!
//! Window durations are deployment configuration, not constants baked into
//! call sites. The one contract the type enforces is monotonic ordering by
//! priority: a higher-priority dispute never gets a longer window.

use chrono::{DateTime, Duration, Utc};

use crate::dispute::{Dispute, DisputePriority};
use crate::error::DisputeError;

/// Response-window policy keyed by dispute priority.
///
/// Construction validates `urgent <= normal <= low`. Defaults are 4h / 24h /
/// 72h; override per deployment via [`SlaPolicy::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlaPolicy {
    urgent_window: Duration,
    normal_window: Duration,
    low_window: Duration,
}

impl SlaPolicy {
    /// Create a policy from per-priority response windows.
    ///
    /// # Errors
    ///
    /// Returns [`DisputeError::InvalidSlaWindows`] unless
    /// `urgent <= normal <= low`.
    pub fn new(
        urgent_window: Duration,
        normal_window: Duration,
        low_window: Duration,
    ) -> Result<Self, DisputeError> {
        if urgent_window > normal_window || normal_window > low_window {
            return Err(DisputeError::InvalidSlaWindows {
                urgent_mins: urgent_window.num_minutes(),
                normal_mins: normal_window.num_minutes(),
                low_mins: low_window.num_minutes(),
            });
        }
        Ok(Self {
            urgent_window,
            normal_window,
            low_window,
        })
    }

    /// The response window for a given priority.
    pub fn response_window(&self, priority: DisputePriority) -> Duration {
        match priority {
            DisputePriority::Urgent => self.urgent_window,
            DisputePriority::Normal => self.normal_window,
            DisputePriority::Low => self.low_window,
        }
    }

    /// The deadline for the next arbitrator response, counted from `now`.
    pub fn due_after(&self, priority: DisputePriority, now: DateTime<Utc>) -> DateTime<Utc> {
        now + self.response_window(priority)
    }

    /// Whether the dispute's response deadline has been missed.
    ///
    /// True iff a deadline is set, lies in the past, and the dispute has not
    /// reached a terminal status.
    pub fn is_breached(&self, dispute: &Dispute, now: DateTime<Utc>) -> bool {
        if dispute.status.is_terminal() {
            return false;
        }
        dispute.response_sla_due_at.is_some_and(|due| due < now)
    }

    /// Time remaining until the response deadline, if one is active.
    ///
    /// Negative when the deadline has already passed; callers distinguish
    /// breach via [`SlaPolicy::is_breached`].
    pub fn remaining(&self, dispute: &Dispute, now: DateTime<Utc>) -> Option<Duration> {
        dispute.response_sla_due_at.map(|due| due - now)
    }
}

impl Default for SlaPolicy {
    fn default() -> Self {
        Self {
            urgent_window: Duration::hours(4),
            normal_window: Duration::hours(24),
            low_window: Duration::hours(72),
        }
    }
}
