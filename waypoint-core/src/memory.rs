use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;
use waypoint_shared::{
    Booking, Flight, Hotel, NewBooking, NewFlight, NewHotel, NewTrip, Trip, TripChanges,
    TripSearchParams,
};

use crate::repository::{BookingRepository, FlightRepository, HotelRepository, TripRepository};
use crate::{EntityKind, StoreError, StoreResult};

/// In-memory storage gateway. Rows are kept in insertion order so ties on
/// the sort keys resolve the same way on every call.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    trips: Vec<Trip>,
    hotels: Vec<Hotel>,
    flights: Vec<Flight>,
    bookings: Vec<Booking>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn missing(entity: EntityKind, id: Uuid) -> StoreError {
    StoreError::NotFound { entity, id }
}

/// Newest first; among equal timestamps the later insert wins.
fn newest_first<T: Clone>(rows: &[T], created_at: impl Fn(&T) -> chrono::DateTime<Utc>) -> Vec<T> {
    let mut out: Vec<T> = rows.iter().rev().cloned().collect();
    out.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    out
}

#[async_trait]
impl TripRepository for InMemoryStore {
    async fn create_trip(&self, trip: &NewTrip) -> StoreResult<Trip> {
        let now = Utc::now();
        let row = Trip {
            id: Uuid::new_v4(),
            user_id: trip.user_id,
            title: trip.title.clone(),
            destination: trip.destination.clone(),
            start_date: trip.start_date,
            end_date: trip.end_date,
            status: trip.status,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.trips.push(row.clone());
        Ok(row)
    }

    async fn get_trip(&self, id: Uuid) -> StoreResult<Trip> {
        self.tables
            .read()
            .await
            .trips
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| missing(EntityKind::Trip, id))
    }

    async fn list_trips(&self) -> StoreResult<Vec<Trip>> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.trips, |t| t.created_at))
    }

    async fn update_trip(&self, id: Uuid, changes: &TripChanges) -> StoreResult<Trip> {
        let mut tables = self.tables.write().await;
        let trip = tables
            .trips
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| missing(EntityKind::Trip, id))?;
        changes.apply_to(trip);
        Ok(trip.clone())
    }

    async fn delete_trip(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.trips.len();
        tables.trips.retain(|t| t.id != id);
        if tables.trips.len() == before {
            return Err(missing(EntityKind::Trip, id));
        }
        // Same effect as ON DELETE CASCADE on bookings.trip_id
        tables.bookings.retain(|b| b.trip_id != id);
        Ok(())
    }

    async fn search_trips(&self, params: &TripSearchParams) -> StoreResult<Vec<Trip>> {
        let destination = params.destination_fragment();
        let starts_from = params.starts_from();
        let ends_before = params.ends_before();

        let tables = self.tables.read().await;
        let mut trips: Vec<Trip> = tables
            .trips
            .iter()
            .filter(|t| destination.map_or(true, |d| contains_ignore_case(&t.destination, d)))
            .filter(|t| starts_from.map_or(true, |from| t.start_date >= from))
            .filter(|t| ends_before.map_or(true, |before| t.end_date < before))
            .cloned()
            .collect();
        trips.sort_by_key(|t| t.start_date);
        Ok(trips)
    }
}

#[async_trait]
impl HotelRepository for InMemoryStore {
    async fn create_hotel(&self, hotel: &NewHotel) -> StoreResult<Hotel> {
        let now = Utc::now();
        let row = Hotel {
            id: Uuid::new_v4(),
            name: hotel.name.clone(),
            location: hotel.location.clone(),
            price_per_night: hotel.price_per_night,
            rating: hotel.rating,
            available_from: hotel.available_from,
            available_to: hotel.available_to,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.hotels.push(row.clone());
        Ok(row)
    }

    async fn get_hotel(&self, id: Uuid) -> StoreResult<Hotel> {
        self.tables
            .read()
            .await
            .hotels
            .iter()
            .find(|h| h.id == id)
            .cloned()
            .ok_or_else(|| missing(EntityKind::Hotel, id))
    }

    async fn list_hotels(&self, location: Option<&str>) -> StoreResult<Vec<Hotel>> {
        let tables = self.tables.read().await;
        let mut hotels: Vec<Hotel> = tables
            .hotels
            .iter()
            .filter(|h| location.map_or(true, |l| contains_ignore_case(&h.location, l)))
            .cloned()
            .collect();
        hotels.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        Ok(hotels)
    }
}

#[async_trait]
impl FlightRepository for InMemoryStore {
    async fn create_flight(&self, flight: &NewFlight) -> StoreResult<Flight> {
        let now = Utc::now();
        let row = Flight {
            id: Uuid::new_v4(),
            airline: flight.airline.clone(),
            origin: flight.origin.clone(),
            destination: flight.destination.clone(),
            departure_time: flight.departure_time,
            arrival_time: flight.arrival_time,
            price: flight.price,
            seats_available: flight.seats_available,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.flights.push(row.clone());
        Ok(row)
    }

    async fn get_flight(&self, id: Uuid) -> StoreResult<Flight> {
        self.tables
            .read()
            .await
            .flights
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| missing(EntityKind::Flight, id))
    }

    async fn list_flights(
        &self,
        origin: Option<&str>,
        destination: Option<&str>,
    ) -> StoreResult<Vec<Flight>> {
        let tables = self.tables.read().await;
        let mut flights: Vec<Flight> = tables
            .flights
            .iter()
            .filter(|f| origin.map_or(true, |o| contains_ignore_case(&f.origin, o)))
            .filter(|f| destination.map_or(true, |d| contains_ignore_case(&f.destination, d)))
            .cloned()
            .collect();
        flights.sort_by_key(|f| f.departure_time);
        Ok(flights)
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn create_booking(&self, booking: &NewBooking) -> StoreResult<Booking> {
        let mut tables = self.tables.write().await;
        // bookings.trip_id is a real foreign key
        if !tables.trips.iter().any(|t| t.id == booking.trip_id) {
            return Err(StoreError::backend(
                "insert booking",
                format!("foreign key violation: trip {} does not exist", booking.trip_id),
            ));
        }

        let now = Utc::now();
        let row = Booking {
            id: Uuid::new_v4(),
            trip_id: booking.trip_id,
            booking_type: booking.target.kind(),
            reference_id: booking.target.reference_id(),
            status: booking.status,
            total_price: booking.total_price,
            created_at: now,
            updated_at: now,
        };
        tables.bookings.push(row.clone());
        Ok(row)
    }

    async fn get_booking(&self, id: Uuid) -> StoreResult<Booking> {
        self.tables
            .read()
            .await
            .bookings
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| missing(EntityKind::Booking, id))
    }

    async fn list_trip_bookings(&self, trip_id: Uuid) -> StoreResult<Vec<Booking>> {
        let tables = self.tables.read().await;
        let rows: Vec<Booking> = tables
            .bookings
            .iter()
            .filter(|b| b.trip_id == trip_id)
            .cloned()
            .collect();
        Ok(newest_first(&rows, |b| b.created_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use waypoint_shared::{BookingStatus, BookingTarget, TripStatus};

    fn new_trip(destination: &str, start_in_days: i64) -> NewTrip {
        let start = Utc::now() + Duration::days(start_in_days);
        NewTrip {
            user_id: Uuid::new_v4(),
            title: format!("Visit {}", destination),
            destination: destination.to_string(),
            start_date: start,
            end_date: start + Duration::days(3),
            status: TripStatus::Planning,
        }
    }

    #[tokio::test]
    async fn test_delete_trip_cascades_to_bookings() {
        let store = InMemoryStore::new();
        let trip = store.create_trip(&new_trip("Lisbon", 5)).await.unwrap();
        let booking = store
            .create_booking(&NewBooking {
                trip_id: trip.id,
                target: BookingTarget::Hotel(Uuid::new_v4()),
                status: BookingStatus::Pending,
                total_price: 120.0,
            })
            .await
            .unwrap();

        store.delete_trip(trip.id).await.unwrap();

        assert!(matches!(
            store.get_booking(booking.id).await,
            Err(StoreError::NotFound { entity: EntityKind::Booking, .. })
        ));
        assert!(matches!(
            store.delete_trip(trip.id).await,
            Err(StoreError::NotFound { entity: EntityKind::Trip, .. })
        ));
    }

    #[tokio::test]
    async fn test_booking_requires_existing_trip_row() {
        let store = InMemoryStore::new();
        let result = store
            .create_booking(&NewBooking {
                trip_id: Uuid::new_v4(),
                target: BookingTarget::Flight(Uuid::new_v4()),
                status: BookingStatus::Pending,
                total_price: 80.0,
            })
            .await;
        assert!(matches!(result, Err(StoreError::Backend { operation: "insert booking", .. })));
    }

    #[tokio::test]
    async fn test_list_trips_newest_first() {
        let store = InMemoryStore::new();
        let first = store.create_trip(&new_trip("Oslo", 1)).await.unwrap();
        let second = store.create_trip(&new_trip("Rome", 2)).await.unwrap();

        let ids: Vec<Uuid> = store.list_trips().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}
