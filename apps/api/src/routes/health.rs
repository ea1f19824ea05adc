use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns the service version and whether the AI strategy is active.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let ai_configured = state.selector.has_primary();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "skillsheet-api",
        "aiConfigured": ai_configured,
        "aiModel": ai_configured.then(|| state.config.llm.model.clone())
    }))
}
