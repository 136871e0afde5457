use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use waypoint_core::repository::HotelRepository;
use waypoint_core::{EntityKind, StoreError, StoreResult};
use waypoint_shared::{Hotel, NewHotel};

use crate::{contains_pattern, db_error};

const HOTEL_COLUMNS: &str = "id, name, location, price_per_night, rating, available_from, \
                             available_to, created_at, updated_at";

pub struct PostgresHotelRepository {
    pool: PgPool,
}

impl PostgresHotelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct HotelRow {
    id: Uuid,
    name: String,
    location: String,
    price_per_night: f64,
    rating: f64,
    available_from: DateTime<Utc>,
    available_to: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<HotelRow> for Hotel {
    fn from(row: HotelRow) -> Self {
        Hotel {
            id: row.id,
            name: row.name,
            location: row.location,
            price_per_night: row.price_per_night,
            rating: row.rating,
            available_from: row.available_from,
            available_to: row.available_to,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl HotelRepository for PostgresHotelRepository {
    async fn create_hotel(&self, hotel: &NewHotel) -> StoreResult<Hotel> {
        let sql = format!(
            "INSERT INTO hotels (name, location, price_per_night, rating, available_from, available_to) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {HOTEL_COLUMNS}"
        );
        let row: HotelRow = sqlx::query_as(&sql)
            .bind(&hotel.name)
            .bind(&hotel.location)
            .bind(hotel.price_per_night)
            .bind(hotel.rating)
            .bind(hotel.available_from)
            .bind(hotel.available_to)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("insert hotel"))?;
        Ok(row.into())
    }

    async fn get_hotel(&self, id: Uuid) -> StoreResult<Hotel> {
        let sql = format!("SELECT {HOTEL_COLUMNS} FROM hotels WHERE id = $1");
        let row: Option<HotelRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("select hotel"))?;
        row.map(Hotel::from).ok_or(StoreError::NotFound {
            entity: EntityKind::Hotel,
            id,
        })
    }

    async fn list_hotels(&self, location: Option<&str>) -> StoreResult<Vec<Hotel>> {
        let sql = format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels \
             WHERE ($1::TEXT IS NULL OR location ILIKE $1) \
             ORDER BY rating DESC"
        );
        let rows: Vec<HotelRow> = sqlx::query_as(&sql)
            .bind(location.map(contains_pattern))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("select hotels"))?;
        Ok(rows.into_iter().map(Hotel::from).collect())
    }
}
