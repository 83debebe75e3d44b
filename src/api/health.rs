//! Liveness and readiness endpoints

use axum::extract::State;
use axum::response::IntoResponse;
use serde::Serialize;
use tracing::warn;

use crate::api::types::Json;

use super::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
}

/// GET /healthz - liveness, 200 whenever the process serves requests
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// GET /readyz - readiness, probes the vector store.
///
/// A failed probe reports `ready: false` but still returns 200; the
/// body carries the signal, not the status code.
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let ready = match state.vector_store.health_check().await {
        Ok(()) => true,
        Err(e) => {
            warn!(
                backend = state.vector_store.backend_name(),
                error = %e,
                "Readiness probe failed"
            );
            false
        }
    };

    Json(ReadyResponse { ready })
}
