/// Random input array API routes
use crate::{error::Result, state::AppState};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use sortvis_steps::{random_array as draw_array, RandomArraySpec};

#[derive(Debug, Deserialize)]
pub struct RandomArrayParams {
    #[serde(default = "default_size")]
    pub size: usize,

    #[serde(default = "default_min_val")]
    pub min_val: u32,

    #[serde(default = "default_max_val")]
    pub max_val: u32,
}

#[derive(Debug, Serialize)]
pub struct RandomArrayResponse {
    pub array: Vec<u32>,
}

fn default_size() -> usize {
    10
}

fn default_min_val() -> u32 {
    1
}

fn default_max_val() -> u32 {
    100
}

/// GET /api/random-array - Draw a uniformly random input array
pub async fn random_array(
    State(state): State<AppState>,
    Query(params): Query<RandomArrayParams>,
) -> Result<Json<RandomArrayResponse>> {
    state.limits.check_len(params.size)?;
    state.limits.check_value(params.max_val)?;

    let spec = RandomArraySpec::new(params.size, params.min_val, params.max_val);
    let array = draw_array(spec)?;

    tracing::debug!(size = array.len(), "Generated random array");

    Ok(Json(RandomArrayResponse { array }))
}
