/// Step trace API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, Json};
use serde::Deserialize;
use sortvis_core::{SortRequest, StepRecord};

#[derive(Debug, Deserialize)]
pub struct SortBody {
    pub array: Vec<i64>,
    pub algorithm: String,
}

/// POST /api/sort - Generate the full step trace for an array
pub async fn sort(
    State(state): State<AppState>,
    Json(body): Json<SortBody>,
) -> Result<Json<Vec<StepRecord>>> {
    let request = SortRequest::parse(&body.array, &body.algorithm)?;
    state.limits.check_array(&request.array)?;

    let algorithm = request.algorithm;
    let len = request.len();

    let sequence = tokio::task::spawn_blocking(move || sortvis_steps::generate_for(&request))
        .await
        .map_err(|e| ServerError::Internal(format!("step generation task failed: {}", e)))??;

    tracing::info!(
        algorithm = algorithm.as_str(),
        len,
        steps = sequence.len(),
        "Generated step trace"
    );

    Ok(Json(sequence.into_records()))
}
