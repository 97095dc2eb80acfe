use crate::SharedState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use tracing::warn;

pub async fn health_check(State(state): State<SharedState>) -> (StatusCode, Json<Value>) {
    let (status, storage) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    (
        status,
        Json(json!({
            "status": if status.is_success() { "healthy" } else { "degraded" },
            "service": "tourdesk-backend",
            "version": env!("CARGO_PKG_VERSION"),
            "storage": storage,
        })),
    )
}
