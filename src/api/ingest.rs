//! Corpus ingestion endpoint handler

use axum::extract::State;
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::{ApiError, IngestRequest, IngestResponse, Json};

/// POST /ingest
pub async fn ingest(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    let source_uri = request.source_uri.trim();
    if source_uri.is_empty() {
        return Err(ApiError::bad_request("source_uri is required").with_param("source_uri"));
    }

    let receipt = state.ingestion.ingest(source_uri, &request.options).await?;

    info!(
        job_id = %receipt.job_id,
        inserted = receipt.inserted,
        source_uri = source_uri,
        "Ingestion completed"
    );

    Ok(Json(IngestResponse::from(receipt)))
}
