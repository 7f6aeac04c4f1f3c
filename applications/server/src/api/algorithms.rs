/// Algorithm catalog API routes
use axum::Json;
use sortvis_core::{AlgorithmDescriptor, AlgorithmId};

/// GET /api/algorithms - List supported algorithms with complexity notes
pub async fn list_algorithms() -> Json<Vec<AlgorithmDescriptor>> {
    Json(AlgorithmId::ALL.iter().map(AlgorithmId::descriptor).collect())
}
