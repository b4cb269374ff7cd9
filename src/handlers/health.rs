use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::instrument;

use crate::models::health::HealthResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    operation_id = "health",
    summary = "Liveness and database connectivity probe",
    responses(
        (status = 200, description = "API up, database reachable", body = HealthResponse),
        (status = 500, description = "API up, database unreachable", body = HealthResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.db.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                message: "DinnersReady API is running",
                database: "connected",
                timestamp: now,
            }),
        ),
        Err(e) => {
            tracing::error!("Health check database ping failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: "error",
                    message: "DinnersReady API is running but database connection failed",
                    database: "disconnected",
                    timestamp: now,
                }),
            )
        }
    }
}
