use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use waypoint_shared::{CreateTripRequest, Trip, TripSearchParams, UpdateTripRequest};

use crate::error::{ApiJson, ApiQuery, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/trips", post(create_trip).get(list_trips))
        .route("/trips/search", get(search_trips))
        .route(
            "/trips/{id}",
            get(get_trip).put(update_trip).delete(delete_trip),
        )
}

pub async fn create_trip(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateTripRequest>,
) -> ApiResult<(StatusCode, Json<Trip>)> {
    let trip = state.planner.create_trip(req).await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

pub async fn list_trips(State(state): State<AppState>) -> ApiResult<Json<Vec<Trip>>> {
    Ok(Json(state.planner.list_trips().await?))
}

/// `GET /trips/search?destination=&start_date=YYYY-MM-DD&end_date=YYYY-MM-DD`
pub async fn search_trips(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<TripSearchParams>,
) -> ApiResult<Json<Vec<Trip>>> {
    Ok(Json(state.planner.search_trips(params).await?))
}

pub async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Trip>> {
    Ok(Json(state.planner.get_trip(&id).await?))
}

pub async fn update_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateTripRequest>,
) -> ApiResult<Json<Trip>> {
    Ok(Json(state.planner.update_trip(&id, req).await?))
}

pub async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.planner.delete_trip(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
