//! The planning service: input validation and cross-entity consistency
//! checks that run before anything reaches the storage gateway.

mod bookings;
mod flights;
mod hotels;
mod trips;

use std::sync::Arc;

use uuid::Uuid;

use crate::repository::{BookingRepository, FlightRepository, HotelRepository, TravelStore, TripRepository};
use crate::{CoreResult, EntityKind, PlanningError};

/// Stateless facade over the storage gateway. Cheap to clone and safe to
/// share across concurrent requests.
#[derive(Clone)]
pub struct PlanningService {
    trips: Arc<dyn TripRepository>,
    hotels: Arc<dyn HotelRepository>,
    flights: Arc<dyn FlightRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl PlanningService {
    pub fn new(
        trips: Arc<dyn TripRepository>,
        hotels: Arc<dyn HotelRepository>,
        flights: Arc<dyn FlightRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            trips,
            hotels,
            flights,
            bookings,
        }
    }

    /// Build the service on a single store that serves every entity.
    pub fn with_store<S>(store: Arc<S>) -> Self
    where
        S: TravelStore + 'static,
    {
        Self {
            trips: store.clone(),
            hotels: store.clone(),
            flights: store.clone(),
            bookings: store,
        }
    }
}

/// Parses a caller-supplied id, rejecting blank or malformed values before
/// any storage call.
fn parse_id(operation: &'static str, entity: EntityKind, raw: &str) -> CoreResult<Uuid> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(PlanningError::invalid(
            operation,
            format!("{} id must not be empty", entity),
        ));
    }
    Uuid::parse_str(raw).map_err(|_| {
        PlanningError::invalid(operation, format!("{} id {:?} is not a valid UUID", entity, raw))
    })
}

/// Blank filter text means "no filter".
fn filter_text(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use chrono::{DateTime, Duration, Utc};
    use uuid::Uuid;
    use waypoint_shared::{CreateTripRequest, NewFlight, NewHotel};

    use super::PlanningService;
    use crate::InMemoryStore;

    pub fn service() -> PlanningService {
        PlanningService::with_store(Arc::new(InMemoryStore::new()))
    }

    pub fn days_from_now(days: i64) -> DateTime<Utc> {
        Utc::now() + Duration::days(days)
    }

    pub fn trip_request(destination: &str, start_in_days: i64, length_days: i64) -> CreateTripRequest {
        let start = days_from_now(start_in_days);
        CreateTripRequest {
            user_id: Uuid::new_v4(),
            title: format!("Trip to {}", destination),
            destination: destination.to_string(),
            start_date: start,
            end_date: start + Duration::days(length_days),
        }
    }

    pub fn hotel(location: &str, price_per_night: f64, rating: f64) -> NewHotel {
        NewHotel {
            name: format!("Grand {}", location),
            location: location.to_string(),
            price_per_night,
            rating,
            available_from: days_from_now(0),
            available_to: days_from_now(90),
        }
    }

    pub fn flight(origin: &str, destination: &str, departs_in_days: i64) -> NewFlight {
        let departure = days_from_now(departs_in_days);
        NewFlight {
            airline: "Altair Air".to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure_time: departure,
            arrival_time: departure + Duration::hours(2),
            price: 180.0,
            seats_available: 42,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_rejects_blank_and_malformed() {
        let err = parse_id("get trip", EntityKind::Trip, "  ").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "get trip: trip id must not be empty");

        let err = parse_id("get trip", EntityKind::Trip, "not-a-uuid").unwrap_err();
        assert!(err.is_validation());

        let id = Uuid::new_v4();
        assert_eq!(parse_id("get trip", EntityKind::Trip, &id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_filter_text_treats_blank_as_absent() {
        assert_eq!(filter_text(Some("  ")), None);
        assert_eq!(filter_text(Some(" paris ")), Some("paris"));
        assert_eq!(filter_text(None), None);
    }
}
