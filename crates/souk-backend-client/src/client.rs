//! The backend HTTP client.
//!
//! All dispute persistence flows through the marketplace backend — this
//! client is the only authorized path to it from the arbitration service.
//! Writes are version-guarded: the backend rejects a `PUT` carrying a stale
//! version with `409 Conflict`, and the caller must refetch and replay the
//! transition rather than overwrite.

use url::Url;

use souk_core::OrderId;
use souk_dispute::{DisputePriority, DisputeStatus};

use crate::config::{BackendApiConfig, ConfigError};
use crate::error::BackendApiError;
use crate::retry::retry_send;
use crate::types::{DisputeEnvelope, ResolutionTemplate};

/// Maximum response-body length echoed back in [`BackendApiError::Api`].
const MAX_ERROR_BODY: usize = 512;

/// Typed client for the marketplace backend's admin API.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BackendApiError::Config`] if the bearer token cannot be
    /// encoded as a header value or the HTTP client cannot be built.
    pub fn new(config: BackendApiConfig) -> Result<Self, BackendApiError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = &config.api_token {
            let value = reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ConfigError::InvalidToken)?;
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| BackendApiError::Unavailable {
                endpoint: "client_init".to_string(),
                source: e,
            })?;
        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ConfigError::InvalidUrl(path.to_string(), e.to_string()).into())
    }

    /// Fetch one dispute in its persisted (versioned) form.
    pub async fn fetch_dispute(&self, id: &OrderId) -> Result<DisputeEnvelope, BackendApiError> {
        let url = self.endpoint(&format!("admin/api/v1/disputes/{id}"))?;
        let resp = retry_send(|| self.http.get(url.clone()).send())
            .await
            .map_err(|e| BackendApiError::Unavailable {
                endpoint: url.to_string(),
                source: e,
            })?;
        match resp.status().as_u16() {
            404 => Err(BackendApiError::NotFound {
                dispute_id: id.to_string(),
            }),
            _ => decode(url, resp).await,
        }
    }

    /// Fetch disputes matching the optional status/priority filter.
    pub async fn fetch_disputes(
        &self,
        status: Option<DisputeStatus>,
        priority: Option<DisputePriority>,
    ) -> Result<Vec<DisputeEnvelope>, BackendApiError> {
        let mut url = self.endpoint("admin/api/v1/disputes")?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(status) = status {
                query.append_pair("status", status.as_str());
            }
            if let Some(priority) = priority {
                query.append_pair("priority", priority.as_str());
            }
        }
        let resp = retry_send(|| self.http.get(url.clone()).send())
            .await
            .map_err(|e| BackendApiError::Unavailable {
                endpoint: url.to_string(),
                source: e,
            })?;
        decode(url, resp).await
    }

    /// Persist a locally-committed transition.
    ///
    /// The submitted envelope carries the version the mutation was based
    /// on. On success the backend's canonical record (with the incremented
    /// version) is returned and becomes the local truth.
    ///
    /// # Errors
    ///
    /// Returns [`BackendApiError::Conflict`] when the version is stale —
    /// refetch and replay, never blind-overwrite.
    pub async fn persist_dispute(
        &self,
        envelope: &DisputeEnvelope,
    ) -> Result<DisputeEnvelope, BackendApiError> {
        let id = envelope.dispute.id().clone();
        let url = self.endpoint(&format!("admin/api/v1/disputes/{id}"))?;
        let resp = retry_send(|| self.http.put(url.clone()).json(envelope).send())
            .await
            .map_err(|e| BackendApiError::Unavailable {
                endpoint: url.to_string(),
                source: e,
            })?;
        match resp.status().as_u16() {
            409 => Err(BackendApiError::Conflict {
                dispute_id: id.to_string(),
                submitted: envelope.version,
            }),
            404 => Err(BackendApiError::NotFound {
                dispute_id: id.to_string(),
            }),
            _ => decode(url, resp).await,
        }
    }

    /// Fetch the canned resolution texts available for a dispute.
    pub async fn fetch_resolution_templates(
        &self,
        id: &OrderId,
    ) -> Result<Vec<ResolutionTemplate>, BackendApiError> {
        let url = self.endpoint(&format!("admin/api/v1/disputes/{id}/resolution-templates"))?;
        let resp = retry_send(|| self.http.get(url.clone()).send())
            .await
            .map_err(|e| BackendApiError::Unavailable {
                endpoint: url.to_string(),
                source: e,
            })?;
        decode(url, resp).await
    }
}

/// Decode a success response, or surface the status and (truncated) body.
async fn decode<T: serde::de::DeserializeOwned>(
    url: Url,
    resp: reqwest::Response,
) -> Result<T, BackendApiError> {
    let status = resp.status();
    if !status.is_success() {
        let mut message = resp.text().await.unwrap_or_default();
        message.truncate(MAX_ERROR_BODY);
        return Err(BackendApiError::Api {
            endpoint: url.to_string(),
            status: status.as_u16(),
            message,
        });
    }
    resp.json::<T>().await.map_err(|e| BackendApiError::Decode {
        endpoint: url.to_string(),
        source: e,
    })
}
