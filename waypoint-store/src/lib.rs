pub mod app_config;
pub mod booking_repo;
pub mod database;
pub mod flight_repo;
pub mod hotel_repo;
pub mod trip_repo;

use std::sync::Arc;

use sqlx::PgPool;
use waypoint_core::{PlanningService, StoreError};

pub use app_config::{Config, StorageBackend};
pub use booking_repo::PostgresBookingRepository;
pub use database::DbClient;
pub use flight_repo::PostgresFlightRepository;
pub use hotel_repo::PostgresHotelRepository;
pub use trip_repo::PostgresTripRepository;

/// Wires every Postgres repository into a planning service sharing one pool.
pub fn planning_service(pool: PgPool) -> PlanningService {
    PlanningService::new(
        Arc::new(PostgresTripRepository::new(pool.clone())),
        Arc::new(PostgresHotelRepository::new(pool.clone())),
        Arc::new(PostgresFlightRepository::new(pool.clone())),
        Arc::new(PostgresBookingRepository::new(pool)),
    )
}

/// Wraps a driver error with the statement that produced it.
pub(crate) fn db_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> StoreError {
    move |err| StoreError::backend(operation, err)
}

/// `%fragment%` for ILIKE, with the wildcard characters in `fragment`
/// matched literally.
pub(crate) fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
