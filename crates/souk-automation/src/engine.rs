//! # Sweep Engine
//!
//! Evaluates every stored dispute against the response-deadline policy and
//! the automatic-action decision table, committing at most one mutation per
//! dispute per sweep.

use chrono::{DateTime, Utc};

use souk_core::Participant;
use souk_dispute::{AutoAction, AutoActionPolicy, DisputeError, SlaPolicy};
use souk_store::DisputeStore;

/// What a single sweep did to a single dispute.
enum SweepOutcome {
    /// Nothing due; dispute untouched.
    Idle,
    /// A missed deadline was recorded and an action scheduled.
    BreachRecorded(AutoAction),
    /// A scheduled action fired.
    Fired(AutoAction),
}

/// Counters summarizing one sweep over the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Disputes examined.
    pub scanned: usize,
    /// Missed deadlines recorded (actions newly scheduled).
    pub breaches_recorded: usize,
    /// Scheduled actions that fired.
    pub actions_fired: usize,
    /// Disputes whose evaluation failed; retried next sweep.
    pub errors: usize,
}

/// The escalation engine. Stateless between sweeps — all state lives on the
/// dispute records themselves.
#[derive(Debug, Clone)]
pub struct SweepEngine {
    sla: SlaPolicy,
    actions: AutoActionPolicy,
    system: Participant,
}

impl SweepEngine {
    /// Create an engine from deadline policy, decision table, and the
    /// platform identity automatic messages are posted under.
    pub fn new(sla: SlaPolicy, actions: AutoActionPolicy, system: Participant) -> Self {
        Self {
            sla,
            actions,
            system,
        }
    }

    /// Sweep the store once at the given instant.
    ///
    /// Safe to run concurrently with arbitrator mutations and with other
    /// sweeps: every per-dispute evaluation re-checks terminal status and
    /// pending-action state inside the store's write lock immediately
    /// before committing.
    pub fn run_sweep(&self, store: &DisputeStore, now: DateTime<Utc>) -> SweepReport {
        let mut report = SweepReport::default();

        for id in store.ids() {
            let result = store.try_update(&id, |dispute| -> Result<SweepOutcome, DisputeError> {
                if dispute.status.is_terminal() {
                    return Ok(SweepOutcome::Idle);
                }
                if let Some(action) = dispute.fire_auto_action(&self.sla, &self.system, now) {
                    return Ok(SweepOutcome::Fired(action));
                }
                if dispute.pending_auto_action.is_none() && self.sla.is_breached(dispute, now) {
                    let action = self.actions.action_for(dispute);
                    let fire_at = self.actions.fire_at(dispute.priority, now);
                    dispute.record_breach(action, fire_at, now)?;
                    return Ok(SweepOutcome::BreachRecorded(action));
                }
                Ok(SweepOutcome::Idle)
            });

            match result {
                // Removed between listing and evaluation; nothing to do.
                None => continue,
                Some(Ok(outcome)) => {
                    report.scanned += 1;
                    match outcome {
                        SweepOutcome::Idle => {}
                        SweepOutcome::BreachRecorded(action) => {
                            report.breaches_recorded += 1;
                            tracing::info!(
                                dispute = %id,
                                action = %action,
                                "response deadline missed; automatic action scheduled"
                            );
                        }
                        SweepOutcome::Fired(action) => {
                            report.actions_fired += 1;
                            tracing::info!(
                                dispute = %id,
                                action = %action,
                                "automatic action executed"
                            );
                        }
                    }
                }
                Some(Err(e)) => {
                    report.scanned += 1;
                    report.errors += 1;
                    tracing::warn!(
                        dispute = %id,
                        error = %e,
                        "sweep evaluation failed; will retry next sweep"
                    );
                }
            }
        }

        report
    }
}
