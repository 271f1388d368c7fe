//! # Dispute Lifecycle Routes
//!
//! HTTP surface for the dispute workflow: intake, review moves, triage,
//! messaging, internal notes, resolution, and the resolution-template
//! proxy. Every mutation commits locally through the store's atomic
//! `try_update`, then persists to the marketplace backend (when configured)
//! with rollback on failure.
//!
//! The acting staff member is an explicit request parameter, never ambient
//! session state.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use souk_backend_client::ResolutionTemplate;
use souk_core::{OrderId, OrderLine, OrderSummary, Participant, ParticipantId};
use souk_dispute::{
    Dispute, DisputeMessage, DisputePriority, DisputeStatus, EscalationTier, ResolutionOutcome,
};
use souk_store::DisputeFilter;

use crate::error::AppError;
use crate::persistence::persist_or_rollback;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Request to register a dispute over an order (order-escalation ingest).
#[derive(Debug, Deserialize, ToSchema)]
pub struct OpenDisputeRequest {
    /// The disputed order's identifier.
    pub order_id: String,
    /// Buyer identifier.
    pub buyer_id: String,
    /// Buyer display name.
    pub buyer_name: String,
    /// Seller identifier.
    pub seller_id: String,
    /// Seller display name.
    pub seller_name: String,
    /// Order line items.
    pub lines: Vec<OrderLineRequest>,
    /// Order total in minor currency units.
    pub total_minor: i64,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// A line item within an ingest request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderLineRequest {
    /// Listing title.
    pub title: String,
    /// Quantity purchased.
    pub quantity: u32,
    /// Unit price in minor currency units.
    pub unit_price_minor: i64,
}

/// List query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Filter by status name (e.g., `OPEN`).
    pub status: Option<String>,
    /// Filter by priority name (e.g., `URGENT`).
    pub priority: Option<String>,
}

/// Triage request: priority and tier assignment.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TriageRequest {
    /// New priority (`LOW`, `NORMAL`, `URGENT`).
    pub priority: String,
    /// New escalation tier (`LEVEL1`, `LEVEL2`, `SUPERVISOR`).
    pub tier: String,
}

/// Message post request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PostMessageRequest {
    /// Sender identifier (buyer, seller, or staff).
    pub sender_id: String,
    /// Sender display name.
    pub sender_name: String,
    /// Sender avatar URL, if any.
    pub sender_avatar: Option<String>,
    /// Message text. At least one of text/image is required.
    pub text: Option<String>,
    /// Attached image URL.
    pub image_url: Option<String>,
}

/// Internal note request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddNoteRequest {
    /// The staff member writing the note.
    pub author_id: String,
    /// Note text.
    pub text: String,
}

/// Resolution request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ResolveRequest {
    /// Terminal status: `RESOLVED_BUYER` or `RESOLVED_SELLER`.
    pub resolution: String,
    /// The binding decision message shown to both parties. Required.
    pub message: String,
    /// The resolving arbitrator's identifier.
    pub arbitrator_id: String,
    /// The resolving arbitrator's display name.
    pub arbitrator_name: String,
}

/// Dispute summary in list responses and mutation acknowledgements.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DisputeSummary {
    /// Dispute identifier (the disputed order's identifier).
    pub id: String,
    /// Current status name.
    pub status: String,
    /// Current priority name.
    pub priority: String,
    /// Current escalation tier name.
    pub assigned_tier: String,
    /// Buyer display name.
    pub buyer_name: String,
    /// Seller display name.
    pub seller_name: String,
    /// Order total in minor currency units.
    pub total_minor: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Number of conversation messages.
    pub message_count: usize,
    /// Number of internal notes.
    pub note_count: usize,
    /// Number of automation audit entries.
    pub automation_entries: usize,
    /// Next response deadline (RFC 3339), if a clock is running.
    pub response_sla_due_at: Option<String>,
    /// Missed response deadlines so far.
    pub sla_breach_count: u32,
    /// Scheduled automatic action name, if one is pending.
    pub pending_auto_action: Option<String>,
    /// When the pending action fires (RFC 3339).
    pub pending_auto_action_at: Option<String>,
    /// When the dispute was opened (RFC 3339).
    pub created_at: String,
    /// When the dispute was last mutated (RFC 3339).
    pub updated_at: String,
    /// When the dispute was resolved (RFC 3339), if terminal.
    pub resolved_at: Option<String>,
    /// Status names reachable from the current status.
    pub valid_transitions: Vec<String>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the dispute lifecycle router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/disputes", post(open_dispute).get(list_disputes))
        .route(
            "/v1/disputes/{id}",
            get(get_dispute).delete(delete_dispute),
        )
        .route("/v1/disputes/{id}/begin-review", post(begin_review))
        .route("/v1/disputes/{id}/reopen", post(reopen))
        .route("/v1/disputes/{id}/triage", post(triage))
        .route("/v1/disputes/{id}/messages", post(post_message))
        .route("/v1/disputes/{id}/notes", post(add_note))
        .route("/v1/disputes/{id}/resolve", post(resolve))
        .route(
            "/v1/disputes/{id}/resolution-templates",
            get(resolution_templates),
        )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_status(s: &str) -> Result<DisputeStatus, AppError> {
    match s {
        "OPEN" => Ok(DisputeStatus::Open),
        "UNDER_REVIEW" => Ok(DisputeStatus::UnderReview),
        "RESOLVED_BUYER" => Ok(DisputeStatus::ResolvedBuyer),
        "RESOLVED_SELLER" => Ok(DisputeStatus::ResolvedSeller),
        other => Err(AppError::Validation(format!("unknown status: '{other}'"))),
    }
}

fn parse_priority(s: &str) -> Result<DisputePriority, AppError> {
    match s {
        "LOW" => Ok(DisputePriority::Low),
        "NORMAL" => Ok(DisputePriority::Normal),
        "URGENT" => Ok(DisputePriority::Urgent),
        other => Err(AppError::Validation(format!("unknown priority: '{other}'"))),
    }
}

fn parse_tier(s: &str) -> Result<EscalationTier, AppError> {
    match s {
        "LEVEL1" => Ok(EscalationTier::Level1),
        "LEVEL2" => Ok(EscalationTier::Level2),
        "SUPERVISOR" => Ok(EscalationTier::Supervisor),
        other => Err(AppError::Validation(format!("unknown tier: '{other}'"))),
    }
}

fn parse_resolution(s: &str) -> Result<ResolutionOutcome, AppError> {
    match s {
        "RESOLVED_BUYER" => Ok(ResolutionOutcome::Buyer),
        "RESOLVED_SELLER" => Ok(ResolutionOutcome::Seller),
        other => Err(AppError::Validation(format!(
            "resolution must be RESOLVED_BUYER or RESOLVED_SELLER, got '{other}'"
        ))),
    }
}

fn dispute_to_summary(d: &Dispute) -> DisputeSummary {
    DisputeSummary {
        id: d.id().to_string(),
        status: d.status.as_str().to_string(),
        priority: d.priority.as_str().to_string(),
        assigned_tier: d.assigned_tier.as_str().to_string(),
        buyer_name: d.buyer.name.clone(),
        seller_name: d.seller.name.clone(),
        total_minor: d.order.total_minor,
        currency: d.order.currency.clone(),
        message_count: d.messages.len(),
        note_count: d.internal_notes.len(),
        automation_entries: d.automation_log.len(),
        response_sla_due_at: d.response_sla_due_at.map(|t| t.to_rfc3339()),
        sla_breach_count: d.sla_breach_count,
        pending_auto_action: d.pending_auto_action.map(|p| p.action.as_str().to_string()),
        pending_auto_action_at: d.pending_auto_action.map(|p| p.fire_at.to_rfc3339()),
        created_at: d.created_at.to_rfc3339(),
        updated_at: d.updated_at.to_rfc3339(),
        resolved_at: d.resolved_at.map(|t| t.to_rfc3339()),
        valid_transitions: d
            .status
            .valid_transitions()
            .iter()
            .map(|s| s.as_str().to_string())
            .collect(),
    }
}

/// Fetch the pre-mutation snapshot, or 404.
fn snapshot(state: &AppState, id: &OrderId) -> Result<Dispute, AppError> {
    state
        .disputes
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("dispute {id} not found")))
}

/// Commit a workflow transition and persist it, rolling back on failure.
async fn commit<R>(
    state: &AppState,
    id: &OrderId,
    f: impl FnOnce(&mut Dispute) -> Result<R, souk_dispute::DisputeError>,
) -> Result<DisputeSummary, AppError> {
    let before = snapshot(state, id)?;
    match state.disputes.try_update(id, f) {
        Some(Ok(_)) => {
            persist_or_rollback(state, id, before).await?;
            Ok(dispute_to_summary(&snapshot(state, id)?))
        }
        Some(Err(e)) => Err(e.into()),
        None => Err(AppError::NotFound(format!("dispute {id} not found"))),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /v1/disputes — Register a dispute over an order.
#[utoipa::path(
    post,
    path = "/v1/disputes",
    request_body = OpenDisputeRequest,
    responses(
        (status = 201, description = "Dispute opened", body = DisputeSummary),
        (status = 409, description = "A dispute already exists for this order"),
        (status = 422, description = "Validation error"),
    ),
    tag = "disputes"
)]
async fn open_dispute(
    State(state): State<AppState>,
    Json(req): Json<OpenDisputeRequest>,
) -> Result<(axum::http::StatusCode, Json<DisputeSummary>), AppError> {
    let order_id = OrderId::new(&req.order_id)?;
    if state.disputes.contains(&order_id) {
        return Err(AppError::Conflict(format!(
            "a dispute already exists for order {order_id}"
        )));
    }
    if req.buyer_name.trim().is_empty() {
        return Err(AppError::Validation("buyer_name must not be empty".into()));
    }
    if req.seller_name.trim().is_empty() {
        return Err(AppError::Validation("seller_name must not be empty".into()));
    }
    if req.currency.trim().is_empty() {
        return Err(AppError::Validation("currency must not be empty".into()));
    }

    let order = OrderSummary {
        id: order_id.clone(),
        customer: Participant::new(ParticipantId::new(&req.buyer_id)?, req.buyer_name.clone()),
        seller: Participant::new(ParticipantId::new(&req.seller_id)?, req.seller_name.clone()),
        lines: req
            .lines
            .iter()
            .map(|l| OrderLine {
                title: l.title.clone(),
                quantity: l.quantity,
                unit_price_minor: l.unit_price_minor,
            })
            .collect(),
        total_minor: req.total_minor,
        currency: req.currency.clone(),
    };

    let dispute = Dispute::open(order, &state.sla, chrono::Utc::now());
    let mut summary = dispute_to_summary(&dispute);
    state.disputes.insert(dispute.clone());

    // Durably record the new dispute; undo the local insert if that fails.
    if let Some(client) = &state.backend {
        let envelope = souk_backend_client::DisputeEnvelope {
            version: 0,
            dispute,
        };
        match client.persist_dispute(&envelope).await {
            Ok(canonical) => {
                state.set_version(canonical.dispute.id(), canonical.version);
                summary = dispute_to_summary(&canonical.dispute);
                state.disputes.insert(canonical.dispute);
            }
            Err(e) => {
                state.disputes.remove(&order_id);
                state.clear_version(&order_id);
                return Err(e.into());
            }
        }
    }

    Ok((axum::http::StatusCode::CREATED, Json(summary)))
}

/// GET /v1/disputes — List disputes, most recently opened first.
#[utoipa::path(
    get,
    path = "/v1/disputes",
    responses(
        (status = 200, description = "Disputes matching the filter", body = Vec<DisputeSummary>),
        (status = 422, description = "Unknown status or priority name"),
    ),
    tag = "disputes"
)]
async fn list_disputes(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<DisputeSummary>>, AppError> {
    let filter = DisputeFilter {
        status: query.status.as_deref().map(parse_status).transpose()?,
        priority: query.priority.as_deref().map(parse_priority).transpose()?,
    };
    let summaries = state
        .disputes
        .list(&filter)
        .iter()
        .map(dispute_to_summary)
        .collect();
    Ok(Json(summaries))
}

/// GET /v1/disputes/{id} — Full dispute record, thread included.
#[utoipa::path(
    get,
    path = "/v1/disputes/{id}",
    params(("id" = String, Path, description = "Dispute (order) identifier")),
    responses(
        (status = 200, description = "Full dispute record"),
        (status = 404, description = "Dispute not found"),
    ),
    tag = "disputes"
)]
async fn get_dispute(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Dispute>, AppError> {
    let id = OrderId::new(id)?;
    Ok(Json(snapshot(&state, &id)?))
}

/// DELETE /v1/disputes/{id} — Explicit administrative deletion.
#[utoipa::path(
    delete,
    path = "/v1/disputes/{id}",
    params(("id" = String, Path, description = "Dispute (order) identifier")),
    responses(
        (status = 204, description = "Dispute deleted"),
        (status = 404, description = "Dispute not found"),
    ),
    tag = "disputes"
)]
async fn delete_dispute(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<axum::http::StatusCode, AppError> {
    let id = OrderId::new(id)?;
    state
        .disputes
        .remove(&id)
        .ok_or_else(|| AppError::NotFound(format!("dispute {id} not found")))?;
    state.clear_version(&id);
    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// POST /v1/disputes/{id}/begin-review — OPEN → UNDER_REVIEW.
#[utoipa::path(
    post,
    path = "/v1/disputes/{id}/begin-review",
    params(("id" = String, Path, description = "Dispute (order) identifier")),
    responses(
        (status = 200, description = "Now under review", body = DisputeSummary),
        (status = 404, description = "Not found"),
        (status = 409, description = "Invalid transition"),
    ),
    tag = "disputes"
)]
async fn begin_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DisputeSummary>, AppError> {
    let id = OrderId::new(id)?;
    let now = chrono::Utc::now();
    let sla = state.sla.clone();
    let summary = commit(&state, &id, |d| d.begin_review(&sla, now)).await?;
    Ok(Json(summary))
}

/// POST /v1/disputes/{id}/reopen — UNDER_REVIEW → OPEN.
#[utoipa::path(
    post,
    path = "/v1/disputes/{id}/reopen",
    params(("id" = String, Path, description = "Dispute (order) identifier")),
    responses(
        (status = 200, description = "Back to open", body = DisputeSummary),
        (status = 404, description = "Not found"),
        (status = 409, description = "Invalid transition"),
    ),
    tag = "disputes"
)]
async fn reopen(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DisputeSummary>, AppError> {
    let id = OrderId::new(id)?;
    let now = chrono::Utc::now();
    let sla = state.sla.clone();
    let summary = commit(&state, &id, |d| d.reopen(&sla, now)).await?;
    Ok(Json(summary))
}

/// POST /v1/disputes/{id}/triage — Assign priority and tier.
#[utoipa::path(
    post,
    path = "/v1/disputes/{id}/triage",
    params(("id" = String, Path, description = "Dispute (order) identifier")),
    request_body = TriageRequest,
    responses(
        (status = 200, description = "Triage applied", body = DisputeSummary),
        (status = 404, description = "Not found"),
        (status = 409, description = "Dispute already resolved"),
        (status = 422, description = "Unknown priority or tier"),
    ),
    tag = "disputes"
)]
async fn triage(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<TriageRequest>,
) -> Result<Json<DisputeSummary>, AppError> {
    let id = OrderId::new(id)?;
    let priority = parse_priority(&req.priority)?;
    let tier = parse_tier(&req.tier)?;
    let now = chrono::Utc::now();
    let summary = commit(&state, &id, |d| d.triage(priority, tier, now)).await?;
    Ok(Json(summary))
}

/// POST /v1/disputes/{id}/messages — Append to the conversation thread.
#[utoipa::path(
    post,
    path = "/v1/disputes/{id}/messages",
    params(("id" = String, Path, description = "Dispute (order) identifier")),
    request_body = PostMessageRequest,
    responses(
        (status = 200, description = "Message appended", body = DisputeSummary),
        (status = 404, description = "Not found"),
        (status = 409, description = "Dispute already resolved"),
        (status = 422, description = "Message carries no content"),
    ),
    tag = "disputes"
)]
async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<PostMessageRequest>,
) -> Result<Json<DisputeSummary>, AppError> {
    let id = OrderId::new(id)?;
    let now = chrono::Utc::now();
    let message = DisputeMessage::new(
        ParticipantId::new(&req.sender_id)?,
        req.sender_name.clone(),
        req.sender_avatar.clone(),
        req.text.clone(),
        req.image_url.clone(),
        now,
    )?;
    let sla = state.sla.clone();
    let summary = commit(&state, &id, |d| d.post_message(message, &sla, now)).await?;
    Ok(Json(summary))
}

/// POST /v1/disputes/{id}/notes — Append an internal note.
#[utoipa::path(
    post,
    path = "/v1/disputes/{id}/notes",
    params(("id" = String, Path, description = "Dispute (order) identifier")),
    request_body = AddNoteRequest,
    responses(
        (status = 200, description = "Note appended", body = DisputeSummary),
        (status = 404, description = "Not found"),
    ),
    tag = "disputes"
)]
async fn add_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AddNoteRequest>,
) -> Result<Json<DisputeSummary>, AppError> {
    let id = OrderId::new(id)?;
    let author = ParticipantId::new(&req.author_id)?;
    let now = chrono::Utc::now();
    let summary = commit(&state, &id, |d| {
        d.add_note(author, req.text.clone(), now);
        Ok::<(), souk_dispute::DisputeError>(())
    })
    .await?;
    Ok(Json(summary))
}

/// POST /v1/disputes/{id}/resolve — Terminal resolution.
#[utoipa::path(
    post,
    path = "/v1/disputes/{id}/resolve",
    params(("id" = String, Path, description = "Dispute (order) identifier")),
    request_body = ResolveRequest,
    responses(
        (status = 200, description = "Dispute resolved", body = DisputeSummary),
        (status = 404, description = "Not found"),
        (status = 409, description = "Already resolved"),
        (status = 422, description = "Missing decision message or unknown resolution"),
    ),
    tag = "disputes"
)]
async fn resolve(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ResolveRequest>,
) -> Result<Json<DisputeSummary>, AppError> {
    let id = OrderId::new(id)?;
    let outcome = parse_resolution(&req.resolution)?;
    let arbitrator = Participant::new(
        ParticipantId::new(&req.arbitrator_id)?,
        req.arbitrator_name.clone(),
    );
    let now = chrono::Utc::now();
    let summary = commit(&state, &id, |d| {
        d.resolve(outcome, &req.message, &arbitrator, now)
    })
    .await?;
    Ok(Json(summary))
}

/// GET /v1/disputes/{id}/resolution-templates — Canned resolution texts.
#[utoipa::path(
    get,
    path = "/v1/disputes/{id}/resolution-templates",
    params(("id" = String, Path, description = "Dispute (order) identifier")),
    responses(
        (status = 200, description = "Template catalogue"),
        (status = 404, description = "Not found"),
        (status = 503, description = "Backend client not configured"),
    ),
    tag = "disputes"
)]
async fn resolution_templates(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ResolutionTemplate>>, AppError> {
    let id = OrderId::new(id)?;
    // 404 before 503: a missing dispute is the more specific answer.
    snapshot(&state, &id)?;
    let client = state.backend.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("backend client not configured; templates unavailable".into())
    })?;
    let templates = client.fetch_resolution_templates(&id).await?;
    Ok(Json(templates))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app(state: AppState) -> Router<()> {
        router().with_state(state)
    }

    async fn body_json<T: serde::de::DeserializeOwned>(resp: axum::response::Response) -> T {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn open_dispute_body() -> serde_json::Value {
        serde_json::json!({
            "order_id": "ord-1001",
            "buyer_id": "buyer-1",
            "buyer_name": "Ayesha",
            "seller_id": "seller-1",
            "seller_name": "Tarek",
            "lines": [{
                "title": "Vintage camera",
                "quantity": 1,
                "unit_price_minor": 14500
            }],
            "total_minor": 14500,
            "currency": "USD"
        })
    }

    async fn post_json(
        app: Router<()>,
        uri: &str,
        body: &serde_json::Value,
    ) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn open_sample(state: &AppState) -> DisputeSummary {
        let response = post_json(test_app(state.clone()), "/v1/disputes", &open_dispute_body()).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    #[tokio::test]
    async fn open_dispute_starts_open_with_defaults() {
        let state = AppState::new();
        let summary = open_sample(&state).await;
        assert_eq!(summary.id, "ord-1001");
        assert_eq!(summary.status, "OPEN");
        assert_eq!(summary.priority, "NORMAL");
        assert_eq!(summary.assigned_tier, "LEVEL1");
        assert_eq!(summary.sla_breach_count, 0);
        assert!(summary.response_sla_due_at.is_some());
        assert!(summary.pending_auto_action.is_none());
    }

    #[tokio::test]
    async fn opening_twice_for_the_same_order_conflicts() {
        let state = AppState::new();
        open_sample(&state).await;
        let response = post_json(test_app(state.clone()), "/v1/disputes", &open_dispute_body()).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn full_review_and_resolution_via_api() {
        let state = AppState::new();
        open_sample(&state).await;

        // Begin review.
        let response = post_json(
            test_app(state.clone()),
            "/v1/disputes/ord-1001/begin-review",
            &serde_json::json!({}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let summary: DisputeSummary = body_json(response).await;
        assert_eq!(summary.status, "UNDER_REVIEW");

        // Triage to urgent / level 2.
        let response = post_json(
            test_app(state.clone()),
            "/v1/disputes/ord-1001/triage",
            &serde_json::json!({"priority": "URGENT", "tier": "LEVEL2"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let summary: DisputeSummary = body_json(response).await;
        assert_eq!(summary.priority, "URGENT");
        assert_eq!(summary.assigned_tier, "LEVEL2");

        // Arbitrator message.
        let response = post_json(
            test_app(state.clone()),
            "/v1/disputes/ord-1001/messages",
            &serde_json::json!({
                "sender_id": "staff-7",
                "sender_name": "Noor",
                "text": "Reviewing the delivery records now."
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let summary: DisputeSummary = body_json(response).await;
        assert_eq!(summary.message_count, 1);

        // Resolve for the buyer.
        let response = post_json(
            test_app(state.clone()),
            "/v1/disputes/ord-1001/resolve",
            &serde_json::json!({
                "resolution": "RESOLVED_BUYER",
                "message": "Refund issued",
                "arbitrator_id": "staff-7",
                "arbitrator_name": "Noor"
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let summary: DisputeSummary = body_json(response).await;
        assert_eq!(summary.status, "RESOLVED_BUYER");
        assert_eq!(summary.message_count, 2);
        assert!(summary.response_sla_due_at.is_none());
        assert!(summary.resolved_at.is_some());
        assert!(summary.valid_transitions.is_empty());
    }

    #[tokio::test]
    async fn resolve_with_empty_message_is_422() {
        let state = AppState::new();
        open_sample(&state).await;
        let response = post_json(
            test_app(state.clone()),
            "/v1/disputes/ord-1001/resolve",
            &serde_json::json!({
                "resolution": "RESOLVED_SELLER",
                "message": "",
                "arbitrator_id": "staff-7",
                "arbitrator_name": "Noor"
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        // The dispute is untouched.
        let dispute = state
            .disputes
            .get(&OrderId::new("ord-1001").unwrap())
            .unwrap();
        assert_eq!(dispute.status, DisputeStatus::Open);
        assert!(dispute.messages.is_empty());
    }

    #[tokio::test]
    async fn message_on_resolved_dispute_is_409() {
        let state = AppState::new();
        open_sample(&state).await;
        post_json(
            test_app(state.clone()),
            "/v1/disputes/ord-1001/resolve",
            &serde_json::json!({
                "resolution": "RESOLVED_BUYER",
                "message": "Refund issued",
                "arbitrator_id": "staff-7",
                "arbitrator_name": "Noor"
            }),
        )
        .await;

        let response = post_json(
            test_app(state.clone()),
            "/v1/disputes/ord-1001/messages",
            &serde_json::json!({
                "sender_id": "buyer-1",
                "sender_name": "Ayesha",
                "text": "One more thing..."
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn message_without_content_is_422() {
        let state = AppState::new();
        open_sample(&state).await;
        let response = post_json(
            test_app(state.clone()),
            "/v1/disputes/ord-1001/messages",
            &serde_json::json!({
                "sender_id": "buyer-1",
                "sender_name": "Ayesha"
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn notes_allowed_after_resolution() {
        let state = AppState::new();
        open_sample(&state).await;
        post_json(
            test_app(state.clone()),
            "/v1/disputes/ord-1001/resolve",
            &serde_json::json!({
                "resolution": "RESOLVED_SELLER",
                "message": "Delivered as described",
                "arbitrator_id": "staff-7",
                "arbitrator_name": "Noor"
            }),
        )
        .await;

        let response = post_json(
            test_app(state.clone()),
            "/v1/disputes/ord-1001/notes",
            &serde_json::json!({
                "author_id": "staff-7",
                "text": "Buyer has a history of chargebacks."
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let summary: DisputeSummary = body_json(response).await;
        assert_eq!(summary.note_count, 1);
    }

    #[tokio::test]
    async fn get_returns_full_record_with_thread() {
        let state = AppState::new();
        open_sample(&state).await;
        post_json(
            test_app(state.clone()),
            "/v1/disputes/ord-1001/messages",
            &serde_json::json!({
                "sender_id": "buyer-1",
                "sender_name": "Ayesha",
                "text": "The lens is cracked."
            }),
        )
        .await;

        let response = test_app(state.clone())
            .oneshot(
                Request::builder()
                    .uri("/v1/disputes/ord-1001")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let dispute: serde_json::Value = body_json(response).await;
        assert_eq!(dispute["status"], "OPEN");
        assert_eq!(dispute["messages"][0]["text"], "The lens is cracked.");
    }

    #[tokio::test]
    async fn get_unknown_dispute_is_404() {
        let state = AppState::new();
        let response = test_app(state)
            .oneshot(
                Request::builder()
                    .uri("/v1/disputes/ord-missing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_filters_by_status_and_priority() {
        let state = AppState::new();
        open_sample(&state).await;
        post_json(
            test_app(state.clone()),
            "/v1/disputes/ord-1001/triage",
            &serde_json::json!({"priority": "URGENT", "tier": "LEVEL1"}),
        )
        .await;

        let response = test_app(state.clone())
            .oneshot(
                Request::builder()
                    .uri("/v1/disputes?status=OPEN&priority=URGENT")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let list: Vec<DisputeSummary> = body_json(response).await;
        assert_eq!(list.len(), 1);

        let response = test_app(state.clone())
            .oneshot(
                Request::builder()
                    .uri("/v1/disputes?status=RESOLVED_BUYER")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let list: Vec<DisputeSummary> = body_json(response).await;
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn list_rejects_unknown_status() {
        let state = AppState::new();
        let response = test_app(state)
            .oneshot(
                Request::builder()
                    .uri("/v1/disputes?status=LIMBO")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn triage_with_unknown_tier_is_422() {
        let state = AppState::new();
        open_sample(&state).await;
        let response = post_json(
            test_app(state.clone()),
            "/v1/disputes/ord-1001/triage",
            &serde_json::json!({"priority": "NORMAL", "tier": "LEVEL9"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let state = AppState::new();
        open_sample(&state).await;
        let response = test_app(state.clone())
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/v1/disputes/ord-1001")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(state.disputes.is_empty());
    }

    #[tokio::test]
    async fn templates_without_backend_is_503() {
        let state = AppState::new();
        open_sample(&state).await;
        let response = test_app(state.clone())
            .oneshot(
                Request::builder()
                    .uri("/v1/disputes/ord-1001/resolution-templates")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn router_builds_successfully() {
        let _router = router();
    }
}
