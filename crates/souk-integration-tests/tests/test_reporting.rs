//! Reporting aggregation over mixed human- and automation-driven history.

mod common;

use chrono::{Duration, Utc};
use common::{arbitrator, dispute_opened_at, engine};
use souk_core::OrderId;
use souk_dispute::{DisputePriority, EscalationTier, ResolutionOutcome};
use souk_store::{DisputeStore, PriorityBreakdown};

#[test]
fn empty_store_reports_zeros_and_zero_average() {
    let report = DisputeStore::new().report();
    assert_eq!(report.open, 0);
    assert_eq!(report.under_review, 0);
    assert_eq!(report.resolved_buyer, 0);
    assert_eq!(report.resolved_seller, 0);
    assert_eq!(report.sla_breaches, 0);
    assert_eq!(report.auto_actions_executed, 0);
    assert_eq!(report.average_resolution_hours, 0.0);
    assert_eq!(report.priority_breakdown, PriorityBreakdown::default());
}

#[test]
fn report_combines_human_and_automatic_outcomes() {
    let store = DisputeStore::new();
    let opened = Utc::now() - Duration::hours(40);

    // Human-resolved dispute, 8 hours to resolution.
    store.insert(dispute_opened_at("ord-human", opened));
    let human_id = OrderId::new("ord-human").unwrap();
    store
        .try_update(&human_id, |d| {
            d.resolve(
                ResolutionOutcome::Seller,
                "Delivered as described.",
                &arbitrator(),
                opened + Duration::hours(8),
            )
        })
        .unwrap()
        .unwrap();

    // Automation-resolved dispute at supervisor tier.
    let mut unattended = dispute_opened_at("ord-auto", opened);
    unattended.assigned_tier = EscalationTier::Supervisor;
    unattended
        .triage(DisputePriority::Urgent, EscalationTier::Supervisor, opened)
        .unwrap();
    store.insert(unattended);
    let engine = engine();
    let breach_time = Utc::now();
    engine.run_sweep(&store, breach_time);
    engine.run_sweep(&store, breach_time + Duration::hours(2));

    // Still-open dispute.
    store.insert(dispute_opened_at("ord-open", Utc::now()));

    let report = store.report();
    assert_eq!(report.open, 1);
    assert_eq!(report.resolved_buyer, 1);
    assert_eq!(report.resolved_seller, 1);
    assert_eq!(report.sla_breaches, 1);
    assert_eq!(report.auto_actions_executed, 1);
    assert_eq!(
        report.priority_breakdown,
        PriorityBreakdown {
            low: 0,
            normal: 2,
            urgent: 1,
        }
    );
    // Two resolved disputes contribute to the average.
    assert!(report.average_resolution_hours > 0.0);
}

#[test]
fn report_recomputes_on_every_read() {
    let store = DisputeStore::new();
    assert_eq!(store.report().open, 0);

    store.insert(dispute_opened_at("ord-1", Utc::now()));
    assert_eq!(store.report().open, 1);

    let id = OrderId::new("ord-1").unwrap();
    store
        .try_update(&id, |d| {
            d.resolve(
                ResolutionOutcome::Buyer,
                "Refund issued.",
                &arbitrator(),
                Utc::now(),
            )
        })
        .unwrap()
        .unwrap();
    let report = store.report();
    assert_eq!(report.open, 0);
    assert_eq!(report.resolved_buyer, 1);
}
