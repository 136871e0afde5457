use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use waypoint_shared::{Flight, NewFlight};

use crate::error::{ApiJson, ApiQuery, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct FlightQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/flights", post(create_flight).get(list_flights))
        .route("/flights/{id}", get(get_flight))
}

pub async fn create_flight(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewFlight>,
) -> ApiResult<(StatusCode, Json<Flight>)> {
    let flight = state.planner.create_flight(req).await?;
    Ok((StatusCode::CREATED, Json(flight)))
}

pub async fn list_flights(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<FlightQuery>,
) -> ApiResult<Json<Vec<Flight>>> {
    let flights = state
        .planner
        .list_flights(query.origin.as_deref(), query.destination.as_deref())
        .await?;
    Ok(Json(flights))
}

pub async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Flight>> {
    Ok(Json(state.planner.get_flight(&id).await?))
}
