use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use waypoint_shared::{Hotel, NewHotel};

use crate::error::{ApiJson, ApiQuery, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct HotelQuery {
    pub location: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hotels", post(create_hotel).get(list_hotels))
        .route("/hotels/{id}", get(get_hotel))
}

pub async fn create_hotel(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewHotel>,
) -> ApiResult<(StatusCode, Json<Hotel>)> {
    let hotel = state.planner.create_hotel(req).await?;
    Ok((StatusCode::CREATED, Json(hotel)))
}

pub async fn list_hotels(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<HotelQuery>,
) -> ApiResult<Json<Vec<Hotel>>> {
    let hotels = state.planner.list_hotels(query.location.as_deref()).await?;
    Ok(Json(hotels))
}

pub async fn get_hotel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Hotel>> {
    Ok(Json(state.planner.get_hotel(&id).await?))
}
