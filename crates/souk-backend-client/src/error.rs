//! Backend API error types.
//!
//! Distinguishes the three failure classes callers handle differently:
//! transport failures (retry manually after rollback), version conflicts
//! (refetch and replay the transition, never blind-overwrite), and
//! everything else (surface as-is).

use thiserror::Error;

use crate::config::ConfigError;

/// Errors from the marketplace backend client.
#[derive(Error, Debug)]
pub enum BackendApiError {
    /// Client configuration was invalid.
    #[error("backend client configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Transport-level failure (connection refused, timeout) that survived
    /// the retry budget. Local optimistic state should be rolled back and
    /// the operation surfaced for manual retry.
    #[error("backend unreachable at {endpoint}: {source}")]
    Unavailable {
        /// The endpoint that failed.
        endpoint: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The backend rejected a write because the record changed since it was
    /// fetched. The caller must refetch and replay the transition.
    #[error("concurrent modification of dispute {dispute_id}: version {submitted} is stale")]
    Conflict {
        /// The dispute whose write was rejected.
        dispute_id: String,
        /// The stale version that was submitted.
        submitted: u64,
    },

    /// The backend has no record with the given identifier.
    #[error("dispute {dispute_id} not found on the backend")]
    NotFound {
        /// The missing dispute identifier.
        dispute_id: String,
    },

    /// The backend returned an unexpected status code.
    #[error("backend returned {status} from {endpoint}: {message}")]
    Api {
        /// The endpoint that failed.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("failed to decode backend response from {endpoint}: {source}")]
    Decode {
        /// The endpoint whose response failed to decode.
        endpoint: String,
        /// The underlying decode error.
        #[source]
        source: reqwest::Error,
    },
}

impl BackendApiError {
    /// Whether this error indicates a version conflict the caller should
    /// resolve by refetching and replaying.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Whether this error indicates the backend was unreachable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
