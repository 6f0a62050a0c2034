use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use super::AppState;

/// GET /health
///
/// Liveness probe: always 200. Database reachability and the breaker state
/// are reported in the body; the booking path degrades instead of dying
/// when a collaborator struggles, so the probe must not flap with it.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let mut response = json!({
        "status": "ok",
        "database": {
            "connected": false,
            "table_exists": false,
        },
        "circuit_breaker": {
            "users_service": state.users.circuit_state().to_string(),
        }
    });

    match state.bookings.health_check().await {
        Ok((connected, table_exists)) => {
            response["database"]["connected"] = json!(connected);
            response["database"]["table_exists"] = json!(table_exists);

            if !table_exists {
                response["status"] = json!("degraded");
                response["database"]["error"] =
                    json!("Bookings table does not exist. Please run migrations.");
            }
        }
        Err(e) => {
            response["status"] = json!("degraded");
            response["database"]["error"] = json!(format!("Database error: {}", e));
        }
    }

    (StatusCode::OK, Json(response))
}
