use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use waypoint_core::repository::TripRepository;
use waypoint_core::{EntityKind, StoreError, StoreResult};
use waypoint_shared::{NewTrip, Trip, TripChanges, TripSearchParams};

use crate::{contains_pattern, db_error};

const TRIP_COLUMNS: &str =
    "id, user_id, title, destination, start_date, end_date, status, created_at, updated_at";

pub struct PostgresTripRepository {
    pool: PgPool,
}

impl PostgresTripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TripRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    destination: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TripRow> for Trip {
    type Error = StoreError;

    fn try_from(row: TripRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(|e| StoreError::Corrupt {
            entity: EntityKind::Trip,
            reason: format!("trip {}: {}", row.id, e),
        })?;
        Ok(Trip {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            destination: row.destination,
            start_date: row.start_date,
            end_date: row.end_date,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_trips(rows: Vec<TripRow>) -> StoreResult<Vec<Trip>> {
    rows.into_iter().map(Trip::try_from).collect()
}

#[async_trait]
impl TripRepository for PostgresTripRepository {
    async fn create_trip(&self, trip: &NewTrip) -> StoreResult<Trip> {
        let sql = format!(
            "INSERT INTO trips (user_id, title, destination, start_date, end_date, status) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {TRIP_COLUMNS}"
        );
        let row: TripRow = sqlx::query_as(&sql)
            .bind(trip.user_id)
            .bind(&trip.title)
            .bind(&trip.destination)
            .bind(trip.start_date)
            .bind(trip.end_date)
            .bind(trip.status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("insert trip"))?;
        row.try_into()
    }

    async fn get_trip(&self, id: Uuid) -> StoreResult<Trip> {
        let sql = format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = $1");
        let row: Option<TripRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("select trip"))?;
        row.ok_or(StoreError::NotFound {
            entity: EntityKind::Trip,
            id,
        })?
        .try_into()
    }

    async fn list_trips(&self) -> StoreResult<Vec<Trip>> {
        let sql = format!("SELECT {TRIP_COLUMNS} FROM trips ORDER BY created_at DESC");
        let rows: Vec<TripRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("select trips"))?;
        into_trips(rows)
    }

    async fn update_trip(&self, id: Uuid, changes: &TripChanges) -> StoreResult<Trip> {
        // Single statement: no window between the existence check and the write.
        let sql = format!(
            "UPDATE trips SET \
                title = COALESCE($2, title), \
                destination = COALESCE($3, destination), \
                start_date = COALESCE($4, start_date), \
                end_date = COALESCE($5, end_date), \
                status = COALESCE($6, status), \
                updated_at = $7 \
             WHERE id = $1 RETURNING {TRIP_COLUMNS}"
        );
        let row: Option<TripRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(changes.title.as_deref())
            .bind(changes.destination.as_deref())
            .bind(changes.start_date)
            .bind(changes.end_date)
            .bind(changes.status.map(|s| s.as_str()))
            .bind(changes.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("update trip"))?;
        row.ok_or(StoreError::NotFound {
            entity: EntityKind::Trip,
            id,
        })?
        .try_into()
    }

    async fn delete_trip(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("delete trip"))?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: EntityKind::Trip,
                id,
            });
        }
        Ok(())
    }

    async fn search_trips(&self, params: &TripSearchParams) -> StoreResult<Vec<Trip>> {
        let sql = format!(
            "SELECT {TRIP_COLUMNS} FROM trips \
             WHERE ($1::TEXT IS NULL OR destination ILIKE $1) \
               AND ($2::TIMESTAMPTZ IS NULL OR start_date >= $2) \
               AND ($3::TIMESTAMPTZ IS NULL OR end_date < $3) \
             ORDER BY start_date ASC"
        );
        let rows: Vec<TripRow> = sqlx::query_as(&sql)
            .bind(params.destination_fragment().map(contains_pattern))
            .bind(params.starts_from())
            .bind(params.ends_before())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("search trips"))?;
        into_trips(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_shared::TripStatus;

    fn row(status: &str) -> TripRow {
        let now = Utc::now();
        TripRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Spring in Kyoto".to_string(),
            destination: "Kyoto".to_string(),
            start_date: now,
            end_date: now,
            status: status.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_row_converts_known_status() {
        let trip = Trip::try_from(row("confirmed")).unwrap();
        assert_eq!(trip.status, TripStatus::Confirmed);
    }

    #[test]
    fn test_row_with_unknown_status_is_corrupt() {
        let err = Trip::try_from(row("archived")).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Corrupt {
                entity: EntityKind::Trip,
                ..
            }
        ));
    }
}
