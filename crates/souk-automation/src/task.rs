//! # Periodic Sweep Task
//!
//! Runs the sweep engine on a fixed interval as a background tokio task.
//! Started once at process init, stopped as a unit on shutdown — each
//! per-dispute mutation inside a sweep is independently atomic, so stopping
//! mid-sweep carries no partial-state risk.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use souk_store::DisputeStore;

use crate::engine::SweepEngine;

/// Handle to the running background sweep.
#[derive(Debug)]
pub struct SweepTask {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl SweepTask {
    /// Spawn the periodic sweep on the current tokio runtime.
    ///
    /// Each tick evaluates the whole store at the wall-clock instant of the
    /// tick. Ticks missed while a sweep runs long are delayed, not bursted.
    pub fn spawn(engine: SweepEngine, store: DisputeStore, interval: Duration) -> Self {
        let (shutdown, mut stop_rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            tracing::info!(interval_secs = interval.as_secs_f64(), "dispute sweep started");
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let report = engine.run_sweep(&store, Utc::now());
                        if report.breaches_recorded > 0 || report.actions_fired > 0 || report.errors > 0 {
                            tracing::info!(
                                scanned = report.scanned,
                                breaches = report.breaches_recorded,
                                fired = report.actions_fired,
                                errors = report.errors,
                                "dispute sweep committed changes"
                            );
                        } else {
                            tracing::debug!(scanned = report.scanned, "dispute sweep idle");
                        }
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            tracing::info!("dispute sweep stopped");
        });
        Self { shutdown, handle }
    }

    /// Signal the sweep to stop and wait for the task to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }

    /// Whether the background task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
