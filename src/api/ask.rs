//! Question-answering endpoint handler

use axum::extract::State;
use tracing::info;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::types::{ApiError, AskRequest, AskResponse, Json};

/// POST /ask
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(ApiError::bad_request("query is required").with_param("query"));
    }

    let request_id = Uuid::new_v4().to_string();
    info!(
        request_id = %request_id,
        query_len = query.len(),
        "Processing ask request"
    );

    let outcome = state.ask_pipeline.answer(query).await?;

    info!(
        request_id = %request_id,
        gate_passed = outcome.verdict.pass,
        sources = outcome.contexts.len(),
        web_sources = outcome.web_evidence.len(),
        "Ask request completed"
    );

    Ok(Json(AskResponse::from(outcome)))
}
