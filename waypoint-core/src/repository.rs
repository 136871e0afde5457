//! Storage gateway ports. Lookups by id return [`crate::StoreError::NotFound`]
//! when no row matches; list and search calls return an empty `Vec` instead.

use async_trait::async_trait;
use uuid::Uuid;
use waypoint_shared::{
    Booking, Flight, Hotel, NewBooking, NewFlight, NewHotel, NewTrip, Trip, TripChanges,
    TripSearchParams,
};

use crate::StoreResult;

/// Repository trait for trip data access
#[async_trait]
pub trait TripRepository: Send + Sync {
    async fn create_trip(&self, trip: &NewTrip) -> StoreResult<Trip>;

    async fn get_trip(&self, id: Uuid) -> StoreResult<Trip>;

    /// Most recently created first.
    async fn list_trips(&self) -> StoreResult<Vec<Trip>>;

    /// Applies `changes` to the row with `id` in one conditional write.
    async fn update_trip(&self, id: Uuid, changes: &TripChanges) -> StoreResult<Trip>;

    /// Removes the trip and, by cascade, its bookings.
    async fn delete_trip(&self, id: Uuid) -> StoreResult<()>;

    /// Ordered by start date ascending.
    async fn search_trips(&self, params: &TripSearchParams) -> StoreResult<Vec<Trip>>;
}

/// Repository trait for hotel data access
#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn create_hotel(&self, hotel: &NewHotel) -> StoreResult<Hotel>;

    async fn get_hotel(&self, id: Uuid) -> StoreResult<Hotel>;

    /// Ordered by rating descending; `location` is a case-insensitive fragment.
    async fn list_hotels(&self, location: Option<&str>) -> StoreResult<Vec<Hotel>>;
}

/// Repository trait for flight data access
#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn create_flight(&self, flight: &NewFlight) -> StoreResult<Flight>;

    async fn get_flight(&self, id: Uuid) -> StoreResult<Flight>;

    /// Ordered by departure time ascending.
    async fn list_flights(
        &self,
        origin: Option<&str>,
        destination: Option<&str>,
    ) -> StoreResult<Vec<Flight>>;
}

/// Repository trait for booking data access
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create_booking(&self, booking: &NewBooking) -> StoreResult<Booking>;

    async fn get_booking(&self, id: Uuid) -> StoreResult<Booking>;

    /// Most recently created first; empty when the trip has no bookings.
    async fn list_trip_bookings(&self, trip_id: Uuid) -> StoreResult<Vec<Booking>>;
}

/// Everything the planning service needs from one backing store.
pub trait TravelStore:
    TripRepository + HotelRepository + FlightRepository + BookingRepository
{
}

impl<T> TravelStore for T where
    T: TripRepository + HotelRepository + FlightRepository + BookingRepository
{
}
