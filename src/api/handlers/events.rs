use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::api::models::{OrderEvent, PaymentEvent, ORDER_CREATED, PAYMENT_SUCCESS};
use crate::error::Result;

use super::AppState;

/// POST /order
/// Forward a raw order message to the orders queue.
pub async fn send_order(
    State(state): State<AppState>,
    Json(order): Json<OrderEvent>,
) -> Result<Json<Value>> {
    state.publisher.publish_order(&order).await?;

    Ok(Json(json!({ "status": "Message sent" })))
}

/// POST /order/create
/// Announce an order under the `order.created` routing key.
pub async fn order_created(
    State(state): State<AppState>,
    Json(order): Json<OrderEvent>,
) -> Result<Json<Value>> {
    state.publisher.publish(ORDER_CREATED, &order).await?;

    Ok(Json(json!({ "event": ORDER_CREATED, "status": "published" })))
}

/// POST /payment/success
/// Announce a successful payment under the `payment.success` routing key.
pub async fn payment_success(
    State(state): State<AppState>,
    Json(payment): Json<PaymentEvent>,
) -> Result<Json<Value>> {
    state.publisher.publish(PAYMENT_SUCCESS, &payment).await?;

    Ok(Json(json!({ "event": PAYMENT_SUCCESS, "status": "published" })))
}
