use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use waypoint_shared::{Booking, CreateBookingRequest};

use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/trips/{id}/bookings", post(book_item).get(get_trip_bookings))
        .route("/bookings/{id}", get(get_booking))
}

/// `POST /trips/{id}/bookings` with `{"type", "reference_id", "total_price"}`.
pub async fn book_item(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    ApiJson(req): ApiJson<CreateBookingRequest>,
) -> ApiResult<(StatusCode, Json<Booking>)> {
    let booking = state.planner.book_item(&trip_id, req).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn get_trip_bookings(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> ApiResult<Json<Vec<Booking>>> {
    Ok(Json(state.planner.get_trip_bookings(&trip_id).await?))
}

pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Booking>> {
    Ok(Json(state.planner.get_booking(&id).await?))
}
