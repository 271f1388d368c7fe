//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers via
//! the `State` extractor.
//!
//! ## Architecture
//!
//! The arbitration service owns the in-memory dispute store and the
//! escalation policies. Durable persistence lives on the marketplace
//! backend, reached through `souk-backend-client`; the `versions` ledger
//! tracks the backend's optimistic-concurrency counter per dispute so that
//! every write is submitted under the version it was based on.
//!
//! The authenticated arbitrator identity is not ambient state: mutation
//! requests carry the acting staff member explicitly, keeping the workflow
//! testable without any session machinery.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use souk_backend_client::BackendClient;
use souk_core::{OrderId, Participant, ParticipantId};
use souk_dispute::{AutoActionPolicy, SlaPolicy};
use souk_store::DisputeStore;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Seconds between background sweep ticks.
    pub sweep_interval_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            sweep_interval_secs: 60,
        }
    }
}

/// Shared application state accessible to all route handlers.
///
/// Clone-friendly: every field is either `Copy`-ish configuration or an
/// `Arc`-backed handle sharing the underlying data.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Authoritative dispute store.
    pub disputes: DisputeStore,
    /// Response-deadline policy.
    pub sla: Arc<SlaPolicy>,
    /// Automatic-action decision table.
    pub auto_actions: Arc<AutoActionPolicy>,
    /// The platform identity automatic messages are posted under.
    pub system_identity: Participant,
    /// Marketplace backend client. `None` runs the service in local-only
    /// mode (tests, development); persistence endpoints then skip the
    /// durable write.
    pub backend: Option<BackendClient>,
    /// Backend version counter per dispute (optimistic concurrency).
    versions: Arc<RwLock<HashMap<OrderId, u64>>>,
    /// Application configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Create state with default policies and no backend client.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None)
    }

    /// Create state with the given configuration and optional backend client.
    pub fn with_config(config: AppConfig, backend: Option<BackendClient>) -> Self {
        Self {
            disputes: DisputeStore::new(),
            sla: Arc::new(SlaPolicy::default()),
            auto_actions: Arc::new(AutoActionPolicy::default()),
            system_identity: default_system_identity(),
            backend,
            versions: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// The last backend version observed for a dispute (0 if never synced).
    pub fn version_of(&self, id: &OrderId) -> u64 {
        self.versions.read().get(id).copied().unwrap_or(0)
    }

    /// Record the backend version for a dispute after a successful sync.
    pub fn set_version(&self, id: &OrderId, version: u64) {
        self.versions.write().insert(id.clone(), version);
    }

    /// Forget the version entry for a removed dispute.
    pub fn clear_version(&self, id: &OrderId) {
        self.versions.write().remove(id);
    }

    /// Hydrate the in-memory store from the backend.
    ///
    /// Called once on startup when a backend client is configured. Loads
    /// every persisted dispute so reads stay fast and synchronous.
    pub async fn hydrate_from_backend(&self) -> Result<usize, souk_backend_client::BackendApiError> {
        let client = match &self.backend {
            Some(client) => client,
            None => return Ok(0),
        };
        let envelopes = client.fetch_disputes(None, None).await?;
        let count = envelopes.len();
        for envelope in envelopes {
            self.set_version(envelope.dispute.id(), envelope.version);
            self.disputes.insert(envelope.dispute);
        }
        tracing::info!(disputes = count, "hydrated dispute store from backend");
        Ok(count)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// The platform identity used for automatically posted messages.
///
/// The identifier is reserved and never collides with marketplace
/// participants, so its derived role is always arbitrator.
fn default_system_identity() -> Participant {
    Participant::new(
        ParticipantId::new("souk-automation")
            .unwrap_or_else(|_| unreachable!("static identifier is valid")),
        "Souk arbitration desk",
    )
}
