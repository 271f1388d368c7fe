//! # Backend Persistence Reconciliation
//!
//! The two-phase commit at the service boundary: apply the transition to
//! the local store, submit it to the marketplace backend under the version
//! it was based on, then reconcile with the backend's canonical response.
//! On persistence failure the local store is rolled back to the
//! pre-transition snapshot — optimistic local state never silently
//! diverges from the durable record.

use souk_backend_client::DisputeEnvelope;
use souk_core::OrderId;
use souk_dispute::Dispute;

use crate::error::AppError;
use crate::state::AppState;

/// Persist a locally-committed transition, rolling back on failure.
///
/// `before` is the dispute as it stood before the local mutation. When no
/// backend client is configured the service runs local-only and this is a
/// no-op.
///
/// # Errors
///
/// - [`AppError::Conflict`] when the backend rejected a stale version; the
///   local record is restored and the caller should refetch and replay.
/// - [`AppError::Upstream`] when the backend is unreachable; the local
///   record is restored and the operation can be retried manually.
pub async fn persist_or_rollback(
    state: &AppState,
    id: &OrderId,
    before: Dispute,
) -> Result<(), AppError> {
    let client = match &state.backend {
        Some(client) => client,
        None => return Ok(()),
    };
    let dispute = match state.disputes.get(id) {
        Some(dispute) => dispute,
        // Deleted concurrently; nothing to persist.
        None => return Ok(()),
    };

    let envelope = DisputeEnvelope {
        version: state.version_of(id),
        dispute,
    };
    match client.persist_dispute(&envelope).await {
        Ok(canonical) => {
            // The backend's response is the new canonical state.
            state.set_version(canonical.dispute.id(), canonical.version);
            state.disputes.insert(canonical.dispute);
            Ok(())
        }
        Err(err) => {
            tracing::warn!(
                dispute = %id,
                error = %err,
                "durable write failed; rolling back local transition"
            );
            state.disputes.insert(before);
            Err(err.into())
        }
    }
}
