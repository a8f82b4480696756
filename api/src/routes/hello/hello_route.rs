use axum::Json;
use serde_json::{Value, json};

/// GET /api/hello: liveness probe. Touches neither the corpus nor the models.
pub async fn hello() -> Json<Value> {
    Json(json!({ "hello": "world" }))
}
