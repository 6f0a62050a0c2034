use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::Result;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct GreetParams {
    name: Option<String>,
}

/// GET /api/proxy-greet
/// Pass-through to the users service greeting endpoint. Upstream failure
/// surfaces to the caller; this path is not breaker-gated.
pub async fn proxy_greet(
    State(state): State<AppState>,
    Query(params): Query<GreetParams>,
) -> Result<Json<Value>> {
    let name = params.name.as_deref().unwrap_or("world");
    let data = state.users.greet(name).await?;

    Ok(Json(json!({ "service_b": true, "data": data })))
}
