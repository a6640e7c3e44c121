use axum::response::Json;
use serde_json::{json, Value};

/// Liveness probe; does not touch the remote service
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
