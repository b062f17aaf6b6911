use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "VOD catalog API", "status": "running" }))
}

pub async fn health_check() -> StatusCode {
    StatusCode::OK
}
