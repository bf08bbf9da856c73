use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Static readiness message for load balancers and smoke checks.
pub async fn home_handler() -> Json<Value> {
    Json(json!({
        "message": "TalentFlow Screening API is running"
    }))
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": "0.1.0",
        "service": "screening-api"
    }))
}
