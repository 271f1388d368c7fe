//! Wire types exchanged with the marketplace backend.

use serde::{Deserialize, Serialize};

use souk_dispute::Dispute;

/// A dispute as persisted by the backend, carrying the backend's version
/// counter for optimistic concurrency control.
///
/// The version is owned by the backend: it increments on every accepted
/// write, and a `PUT` submitting a stale version is rejected with a
/// conflict. The arbitration service never fabricates versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisputeEnvelope {
    /// Backend-owned version counter.
    pub version: u64,
    /// The dispute record.
    pub dispute: Dispute,
}

/// A canned resolution text supplied by the content-management side of the
/// admin console. Read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionTemplate {
    /// Template identifier.
    pub id: String,
    /// Short title shown in the template picker.
    pub title: String,
    /// Full message body the arbitrator can send or edit.
    pub body: String,
}
