//! # Reporting Routes
//!
//! Read-only summary statistics for admin dashboards, derived from the
//! dispute store on every request.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use souk_store::DisputesReport;

use crate::state::AppState;

/// Build the reporting router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/reports/disputes", get(disputes_report))
}

/// GET /v1/reports/disputes — Summary statistics over all disputes.
#[utoipa::path(
    get,
    path = "/v1/reports/disputes",
    responses(
        (status = 200, description = "Dispute summary report"),
    ),
    tag = "reports"
)]
async fn disputes_report(State(state): State<AppState>) -> Json<DisputesReport> {
    Json(state.disputes.report())
}
