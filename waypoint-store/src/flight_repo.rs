use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use waypoint_core::repository::FlightRepository;
use waypoint_core::{EntityKind, StoreError, StoreResult};
use waypoint_shared::{Flight, NewFlight};

use crate::{contains_pattern, db_error};

const FLIGHT_COLUMNS: &str = "id, airline, origin, destination, departure_time, arrival_time, \
                              price, seats_available, created_at, updated_at";

pub struct PostgresFlightRepository {
    pool: PgPool,
}

impl PostgresFlightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FlightRow {
    id: Uuid,
    airline: String,
    origin: String,
    destination: String,
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
    price: f64,
    seats_available: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            id: row.id,
            airline: row.airline,
            origin: row.origin,
            destination: row.destination,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            price: row.price,
            seats_available: row.seats_available,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl FlightRepository for PostgresFlightRepository {
    async fn create_flight(&self, flight: &NewFlight) -> StoreResult<Flight> {
        let sql = format!(
            "INSERT INTO flights (airline, origin, destination, departure_time, arrival_time, price, seats_available) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {FLIGHT_COLUMNS}"
        );
        let row: FlightRow = sqlx::query_as(&sql)
            .bind(&flight.airline)
            .bind(&flight.origin)
            .bind(&flight.destination)
            .bind(flight.departure_time)
            .bind(flight.arrival_time)
            .bind(flight.price)
            .bind(flight.seats_available)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("insert flight"))?;
        Ok(row.into())
    }

    async fn get_flight(&self, id: Uuid) -> StoreResult<Flight> {
        let sql = format!("SELECT {FLIGHT_COLUMNS} FROM flights WHERE id = $1");
        let row: Option<FlightRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("select flight"))?;
        row.map(Flight::from).ok_or(StoreError::NotFound {
            entity: EntityKind::Flight,
            id,
        })
    }

    async fn list_flights(
        &self,
        origin: Option<&str>,
        destination: Option<&str>,
    ) -> StoreResult<Vec<Flight>> {
        let sql = format!(
            "SELECT {FLIGHT_COLUMNS} FROM flights \
             WHERE ($1::TEXT IS NULL OR origin ILIKE $1) \
               AND ($2::TEXT IS NULL OR destination ILIKE $2) \
             ORDER BY departure_time ASC"
        );
        let rows: Vec<FlightRow> = sqlx::query_as(&sql)
            .bind(origin.map(contains_pattern))
            .bind(destination.map(contains_pattern))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("select flights"))?;
        Ok(rows.into_iter().map(Flight::from).collect())
    }
}
