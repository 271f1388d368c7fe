//! # Automatic-Action Decision Table
//!
//! Chooses which automatic action follows a missed response deadline, and
//! how long the grace period is before that action fires. Both are
//! deployment configuration: the defaults here escalate until the
//! supervisor tier is reached, then resolve in the buyer's favor.

use chrono::{DateTime, Duration, Utc};

use crate::dispute::{AutoAction, Dispute, DisputePriority, EscalationTier};

/// Decision table mapping a breached dispute to its automatic response.
///
/// Tiers below [`EscalationTier::Supervisor`] escalate. At the supervisor
/// tier there is no level left to escalate to, so the configured
/// `supervisor_action` applies — [`AutoAction::Refund`] by default (a missed
/// supervisor deadline is treated as the platform failing the complainant).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoActionPolicy {
    supervisor_action: AutoAction,
    urgent_grace: Duration,
    normal_grace: Duration,
    low_grace: Duration,
}

impl AutoActionPolicy {
    /// Override the action taken when a supervisor-tier deadline is missed.
    ///
    /// [`AutoAction::Refund`] and [`AutoAction::Release`] resolve the
    /// dispute; configuring [`AutoAction::Escalate`] here degenerates to a
    /// deadline reset at the capped tier.
    pub fn with_supervisor_action(mut self, action: AutoAction) -> Self {
        self.supervisor_action = action;
        self
    }

    /// Override the per-priority grace windows between breach detection and
    /// the automatic action firing.
    pub fn with_grace_windows(
        mut self,
        urgent: Duration,
        normal: Duration,
        low: Duration,
    ) -> Self {
        self.urgent_grace = urgent;
        self.normal_grace = normal;
        self.low_grace = low;
        self
    }

    /// The automatic action for a dispute whose deadline was missed.
    pub fn action_for(&self, dispute: &Dispute) -> AutoAction {
        if dispute.assigned_tier < EscalationTier::Supervisor {
            AutoAction::Escalate
        } else {
            self.supervisor_action
        }
    }

    /// The grace period before a scheduled action fires, by priority.
    pub fn grace_window(&self, priority: DisputePriority) -> Duration {
        match priority {
            DisputePriority::Urgent => self.urgent_grace,
            DisputePriority::Normal => self.normal_grace,
            DisputePriority::Low => self.low_grace,
        }
    }

    /// The firing deadline for an action scheduled at `now`.
    pub fn fire_at(&self, priority: DisputePriority, now: DateTime<Utc>) -> DateTime<Utc> {
        now + self.grace_window(priority)
    }
}

impl Default for AutoActionPolicy {
    fn default() -> Self {
        Self {
            supervisor_action: AutoAction::Refund,
            urgent_grace: Duration::hours(1),
            normal_grace: Duration::hours(4),
            low_grace: Duration::hours(12),
        }
    }
}
