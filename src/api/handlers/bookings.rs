use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::models::{Booking, BookingCreate, ListParams};
use crate::error::Result;

use super::AppState;

/// POST /api/bookings
/// Create a booking after validating the referenced user.
pub async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<BookingCreate>,
) -> Result<(StatusCode, Json<Booking>)> {
    let booking = state.bookings.create(payload).await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /api/bookings
/// List bookings ordered by ascending id.
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Booking>>> {
    let bookings = state.bookings.list(params.limit(), params.offset()).await?;

    Ok(Json(bookings))
}

/// GET /api/bookings/{booking_id}
pub async fn get_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
) -> Result<Json<Booking>> {
    let booking = state.bookings.get(booking_id).await?;

    Ok(Json(booking))
}

/// PUT /api/bookings/{booking_id}
/// Full-row update.
pub async fn update_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
    Json(payload): Json<BookingCreate>,
) -> Result<Json<Booking>> {
    let booking = state.bookings.update(booking_id, payload).await?;

    Ok(Json(booking))
}

/// DELETE /api/bookings/{booking_id}
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
) -> Result<StatusCode> {
    state.bookings.delete(booking_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
