use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{bookings, events, health, proxy, AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Bookings CRUD
        .route(
            "/api/bookings",
            post(bookings::create_booking).get(bookings::list_bookings),
        )
        .route(
            "/api/bookings/{booking_id}",
            get(bookings::get_booking)
                .put(bookings::update_booking)
                .delete(bookings::delete_booking),
        )
        // Event publication
        .route("/order", post(events::send_order))
        .route("/order/create", post(events::order_created))
        .route("/payment/success", post(events::payment_success))
        // Users service pass-through
        .route("/api/proxy-greet", get(proxy::proxy_greet))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
