/// Health check API routes
use crate::{config::LimitSettings, state::AppState};
use axum::{extract::State, Json};
use serde::Serialize;
use sortvis_core::AlgorithmId;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Number of algorithms `/api/sort` accepts
    pub algorithms: usize,
    /// Request limits this instance enforces
    pub limits: LimitSettings,
}

/// GET /api/health - Liveness plus the limits clients must respect
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        algorithms: AlgorithmId::ALL.len(),
        limits: state.limits,
    })
}
