//! # Dispute Reporting
//!
//! Read-only summary statistics derived from the dispute store, consumed by
//! admin dashboards. The report is recomputed from the live snapshot on
//! every read.
//!
//! Empty-store convention: every count is zero and
//! `average_resolution_hours` is `0.0` — never `NaN` or `null`.

use serde::{Deserialize, Serialize};

use souk_dispute::{AutomationEventKind, Dispute, DisputePriority, DisputeStatus};

/// Dispute counts broken down by priority, across all lifecycle statuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBreakdown {
    /// Disputes at `LOW` priority.
    pub low: usize,
    /// Disputes at `NORMAL` priority.
    pub normal: usize,
    /// Disputes at `URGENT` priority.
    pub urgent: usize,
}

/// Summary statistics over the dispute store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisputesReport {
    /// Disputes currently `OPEN`.
    pub open: usize,
    /// Disputes currently `UNDER_REVIEW`.
    pub under_review: usize,
    /// Disputes resolved in favor of the buyer.
    pub resolved_buyer: usize,
    /// Disputes resolved in favor of the seller.
    pub resolved_seller: usize,
    /// Mean hours from open to resolution over all resolved disputes;
    /// `0.0` when none are resolved.
    pub average_resolution_hours: f64,
    /// Total missed response deadlines across all disputes.
    pub sla_breaches: u64,
    /// Counts by priority across all disputes.
    pub priority_breakdown: PriorityBreakdown,
    /// Total automatic actions executed (escalations and automatic
    /// resolutions; scheduled-but-preempted actions are not counted).
    pub auto_actions_executed: usize,
}

impl DisputesReport {
    /// Compute the report over a snapshot of disputes.
    pub fn compute<'a>(disputes: impl Iterator<Item = &'a Dispute>) -> Self {
        let mut report = Self::default();
        let mut resolution_hours_total = 0.0_f64;
        let mut resolved_count = 0usize;

        for dispute in disputes {
            match dispute.status {
                DisputeStatus::Open => report.open += 1,
                DisputeStatus::UnderReview => report.under_review += 1,
                DisputeStatus::ResolvedBuyer => report.resolved_buyer += 1,
                DisputeStatus::ResolvedSeller => report.resolved_seller += 1,
            }
            match dispute.priority {
                DisputePriority::Low => report.priority_breakdown.low += 1,
                DisputePriority::Normal => report.priority_breakdown.normal += 1,
                DisputePriority::Urgent => report.priority_breakdown.urgent += 1,
            }
            report.sla_breaches += u64::from(dispute.sla_breach_count);
            report.auto_actions_executed += dispute
                .automation_log
                .iter()
                .filter(|e| e.kind == AutomationEventKind::ActionExecuted)
                .count();
            if let Some(resolved_at) = dispute.resolved_at {
                let elapsed = resolved_at - dispute.created_at;
                resolution_hours_total += elapsed.num_seconds() as f64 / 3600.0;
                resolved_count += 1;
            }
        }

        if resolved_count > 0 {
            report.average_resolution_hours = resolution_hours_total / resolved_count as f64;
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use souk_core::{OrderId, OrderLine, OrderSummary, Participant, ParticipantId};
    use souk_dispute::{AutoAction, ResolutionOutcome, SlaPolicy};

    fn sample_dispute(order_id: &str, opened_at: chrono::DateTime<Utc>) -> Dispute {
        let order = OrderSummary {
            id: OrderId::new(order_id).unwrap(),
            customer: Participant::new(ParticipantId::new("buyer-1").unwrap(), "Ayesha"),
            seller: Participant::new(ParticipantId::new("seller-1").unwrap(), "Tarek"),
            lines: vec![OrderLine {
                title: "Ceramic vase".to_string(),
                quantity: 2,
                unit_price_minor: 40_00,
            }],
            total_minor: 80_00,
            currency: "USD".to_string(),
        };
        Dispute::open(order, &SlaPolicy::default(), opened_at)
    }

    fn arbitrator() -> Participant {
        Participant::new(ParticipantId::new("staff-7").unwrap(), "Noor")
    }

    fn system() -> Participant {
        Participant::new(
            ParticipantId::new("souk-automation").unwrap(),
            "Souk arbitration desk",
        )
    }

    #[test]
    fn empty_snapshot_yields_all_zeros() {
        let report = DisputesReport::compute(std::iter::empty());
        assert_eq!(report, DisputesReport::default());
        assert_eq!(report.average_resolution_hours, 0.0);
    }

    #[test]
    fn counts_by_status() {
        let now = Utc::now();
        let open = sample_dispute("ord-1", now);
        let mut reviewing = sample_dispute("ord-2", now);
        reviewing.begin_review(&SlaPolicy::default(), now).unwrap();
        let mut buyer_won = sample_dispute("ord-3", now);
        buyer_won
            .resolve(ResolutionOutcome::Buyer, "Refund issued", &arbitrator(), now)
            .unwrap();
        let mut seller_won = sample_dispute("ord-4", now);
        seller_won
            .resolve(ResolutionOutcome::Seller, "Delivered as described", &arbitrator(), now)
            .unwrap();

        let disputes = [open, reviewing, buyer_won, seller_won];
        let report = DisputesReport::compute(disputes.iter());
        assert_eq!(report.open, 1);
        assert_eq!(report.under_review, 1);
        assert_eq!(report.resolved_buyer, 1);
        assert_eq!(report.resolved_seller, 1);
    }

    #[test]
    fn priority_breakdown_covers_all_disputes() {
        let now = Utc::now();
        let normal = sample_dispute("ord-1", now);
        let mut urgent = sample_dispute("ord-2", now);
        urgent
            .triage(DisputePriority::Urgent, urgent.assigned_tier, now)
            .unwrap();
        let mut low = sample_dispute("ord-3", now);
        low.triage(DisputePriority::Low, low.assigned_tier, now)
            .unwrap();

        let disputes = [normal, urgent, low];
        let report = DisputesReport::compute(disputes.iter());
        assert_eq!(
            report.priority_breakdown,
            PriorityBreakdown {
                low: 1,
                normal: 1,
                urgent: 1,
            }
        );
    }

    #[test]
    fn sla_breaches_sum_across_disputes() {
        let now = Utc::now();
        let mut a = sample_dispute("ord-1", now);
        a.record_breach(AutoAction::Escalate, now + Duration::hours(4), now)
            .unwrap();
        a.fire_auto_action(&SlaPolicy::default(), &system(), now + Duration::hours(4));
        a.record_breach(AutoAction::Escalate, now + Duration::hours(30), now)
            .unwrap();
        let mut b = sample_dispute("ord-2", now);
        b.record_breach(AutoAction::Escalate, now + Duration::hours(4), now)
            .unwrap();

        let disputes = [a, b];
        let report = DisputesReport::compute(disputes.iter());
        assert_eq!(report.sla_breaches, 3);
    }

    #[test]
    fn auto_actions_counts_executions_not_schedules() {
        let now = Utc::now();
        let mut a = sample_dispute("ord-1", now);
        // Scheduled but never fired: not counted.
        a.record_breach(AutoAction::Escalate, now + Duration::hours(4), now)
            .unwrap();
        let mut b = sample_dispute("ord-2", now);
        b.record_breach(AutoAction::Refund, now + Duration::hours(4), now)
            .unwrap();
        b.fire_auto_action(&SlaPolicy::default(), &system(), now + Duration::hours(4));

        let disputes = [a, b];
        let report = DisputesReport::compute(disputes.iter());
        assert_eq!(report.auto_actions_executed, 1);
    }

    #[test]
    fn average_resolution_hours_over_resolved_only() {
        let opened = Utc::now();
        let mut fast = sample_dispute("ord-1", opened);
        fast.resolve(
            ResolutionOutcome::Buyer,
            "Refund issued",
            &arbitrator(),
            opened + Duration::hours(2),
        )
        .unwrap();
        let mut slow = sample_dispute("ord-2", opened);
        slow.resolve(
            ResolutionOutcome::Seller,
            "Delivered as described",
            &arbitrator(),
            opened + Duration::hours(10),
        )
        .unwrap();
        // Still open: excluded from the average.
        let open = sample_dispute("ord-3", opened);

        let disputes = [fast, slow, open];
        let report = DisputesReport::compute(disputes.iter());
        assert!((report.average_resolution_hours - 6.0).abs() < 1e-9);
    }

    #[test]
    fn report_serializes_to_json() {
        let report = DisputesReport::default();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["open"], 0);
        assert_eq!(json["average_resolution_hours"], 0.0);
        assert_eq!(json["priority_breakdown"]["normal"], 0);
    }
}
