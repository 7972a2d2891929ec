//! Root and health-probe handlers.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::{ApiError, AppState};

/// The template's example root endpoint.
pub async fn root() -> Json<Value> {
    Json(json!({ "Hello": "World" }))
}

/// Liveness probe: reports healthy only when the database answers.
/// Container orchestration gates traffic on this route.
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    db::ping(&state.pool).await?;
    Ok(Json(json!({ "status": "ok" })))
}
