use chrono::{DateTime, Utc};
use serde::Serialize;

/// Response for `GET /api/health`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    /// `ok` or `error`.
    #[schema(example = "ok")]
    pub status: &'static str,
    #[schema(example = "DinnersReady API is running")]
    pub message: &'static str,
    /// `connected` or `disconnected`.
    #[schema(example = "connected")]
    pub database: &'static str,
    pub timestamp: DateTime<Utc>,
}
