//! # souk-backend-client — Typed Client for the Marketplace Backend
//!
//! The arbitration service is a thin layer over the marketplace backend,
//! which owns durable dispute storage, balances, and escrow execution. This
//! crate is the only authorized path to it:
//!
//! - **Reads**: [`BackendClient::fetch_dispute`] /
//!   [`BackendClient::fetch_disputes`] return disputes in their persisted,
//!   versioned form.
//! - **Writes**: [`BackendClient::persist_dispute`] submits a locally
//!   committed transition under the version it was based on. A stale
//!   version yields [`BackendApiError::Conflict`]; the caller refetches and
//!   replays.
//! - **Templates**: [`BackendClient::fetch_resolution_templates`] returns
//!   the read-only canned resolution catalogue.
//!
//! Transport failures are retried with exponential backoff; response errors
//! are not.

pub mod client;
pub mod config;
pub mod error;
pub(crate) mod retry;
pub mod types;

pub use client::BackendClient;
pub use config::{BackendApiConfig, ConfigError};
pub use error::BackendApiError;
pub use types::{DisputeEnvelope, ResolutionTemplate};
