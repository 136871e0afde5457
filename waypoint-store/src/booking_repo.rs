use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use waypoint_core::repository::BookingRepository;
use waypoint_core::{EntityKind, StoreError, StoreResult};
use waypoint_shared::{Booking, NewBooking};

use crate::db_error;

const BOOKING_COLUMNS: &str =
    r#"id, trip_id, "type", reference_id, status, total_price, created_at, updated_at"#;

pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    trip_id: Uuid,
    #[sqlx(rename = "type")]
    booking_type: String,
    reference_id: Uuid,
    status: String,
    total_price: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = StoreError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let corrupt = |e: waypoint_shared::UnknownVariant| StoreError::Corrupt {
            entity: EntityKind::Booking,
            reason: format!("booking {}: {}", row.id, e),
        };
        let booking_type = row.booking_type.parse().map_err(corrupt)?;
        let status = row.status.parse().map_err(corrupt)?;
        Ok(Booking {
            id: row.id,
            trip_id: row.trip_id,
            booking_type,
            reference_id: row.reference_id,
            status,
            total_price: row.total_price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn create_booking(&self, booking: &NewBooking) -> StoreResult<Booking> {
        let sql = format!(
            r#"INSERT INTO bookings (trip_id, "type", reference_id, status, total_price)
               VALUES ($1, $2, $3, $4, $5) RETURNING {BOOKING_COLUMNS}"#
        );
        let row: BookingRow = sqlx::query_as(&sql)
            .bind(booking.trip_id)
            .bind(booking.target.kind().as_str())
            .bind(booking.target.reference_id())
            .bind(booking.status.as_str())
            .bind(booking.total_price)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("insert booking"))?;
        row.try_into()
    }

    async fn get_booking(&self, id: Uuid) -> StoreResult<Booking> {
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1");
        let row: Option<BookingRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("select booking"))?;
        row.ok_or(StoreError::NotFound {
            entity: EntityKind::Booking,
            id,
        })?
        .try_into()
    }

    async fn list_trip_bookings(&self, trip_id: Uuid) -> StoreResult<Vec<Booking>> {
        let sql = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE trip_id = $1 ORDER BY created_at DESC"
        );
        let rows: Vec<BookingRow> = sqlx::query_as(&sql)
            .bind(trip_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("select trip bookings"))?;
        rows.into_iter().map(Booking::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_shared::{BookingStatus, BookingType};

    fn row(kind: &str, status: &str) -> BookingRow {
        let now = Utc::now();
        BookingRow {
            id: Uuid::new_v4(),
            trip_id: Uuid::new_v4(),
            booking_type: kind.to_string(),
            reference_id: Uuid::new_v4(),
            status: status.to_string(),
            total_price: 99.5,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_row_converts_to_booking() {
        let booking = Booking::try_from(row("flight", "confirmed")).unwrap();
        assert_eq!(booking.booking_type, BookingType::Flight);
        assert_eq!(booking.status, BookingStatus::Confirmed);
    }

    #[test]
    fn test_unknown_type_or_status_is_corrupt() {
        for (kind, status) in [("cruise", "pending"), ("hotel", "refunded")] {
            let err = Booking::try_from(row(kind, status)).unwrap_err();
            assert!(matches!(
                err,
                StoreError::Corrupt {
                    entity: EntityKind::Booking,
                    ..
                }
            ));
        }
    }
}
