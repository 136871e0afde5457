use tracing::{info, warn};
use waypoint_shared::{Booking, BookingStatus, BookingTarget, CreateBookingRequest, NewBooking};

use super::{parse_id, PlanningService};
use crate::{CoreResult, EntityKind, PlanningError};

impl PlanningService {
    /// Books a hotel or flight into a trip.
    ///
    /// Both sides of the link are checked before the booking row is written:
    /// the trip first, then the referenced item, chosen by the booking type.
    /// Activities are part of the type vocabulary but cannot be booked yet.
    pub async fn book_item(&self, trip_id: &str, req: CreateBookingRequest) -> CoreResult<Booking> {
        const OP: &str = "book item";

        let trip_id = parse_id(OP, EntityKind::Trip, trip_id)?;
        if req.total_price.is_nan() || req.total_price <= 0.0 {
            return Err(PlanningError::invalid(OP, "total_price must be greater than 0"));
        }

        self.trips
            .get_trip(trip_id)
            .await
            .map_err(PlanningError::from_store(OP))?;

        let target = req.target().map_err(|unknown| {
            PlanningError::invalid(OP, format!("unsupported booking type {:?}", unknown.value))
        })?;
        self.verify_target(OP, target).await?;

        let booking = NewBooking {
            trip_id,
            target,
            status: BookingStatus::Pending,
            total_price: req.total_price,
        };
        let created = self
            .bookings
            .create_booking(&booking)
            .await
            .map_err(PlanningError::from_store(OP))?;
        info!(
            booking_id = %created.id,
            trip_id = %trip_id,
            kind = %created.booking_type,
            reference_id = %created.reference_id,
            "booking created"
        );
        Ok(created)
    }

    pub async fn get_booking(&self, id: &str) -> CoreResult<Booking> {
        const OP: &str = "get booking";
        let id = parse_id(OP, EntityKind::Booking, id)?;
        self.bookings.get_booking(id).await.map_err(PlanningError::from_store(OP))
    }

    /// Bookings for a trip, newest first. An unknown trip is reported as
    /// not-found rather than as an empty list.
    pub async fn get_trip_bookings(&self, trip_id: &str) -> CoreResult<Vec<Booking>> {
        const OP: &str = "get trip bookings";
        let trip_id = parse_id(OP, EntityKind::Trip, trip_id)?;

        self.trips
            .get_trip(trip_id)
            .await
            .map_err(PlanningError::from_store(OP))?;

        self.bookings
            .list_trip_bookings(trip_id)
            .await
            .map_err(PlanningError::from_store(OP))
    }

    async fn verify_target(&self, operation: &'static str, target: BookingTarget) -> CoreResult<()> {
        let lookup = match target {
            BookingTarget::Hotel(id) => self.hotels.get_hotel(id).await.map(|_| ()),
            BookingTarget::Flight(id) => self.flights.get_flight(id).await.map(|_| ()),
            BookingTarget::Activity(id) => {
                warn!(reference_id = %id, "activity booking requested but not supported");
                return Err(PlanningError::invalid(
                    operation,
                    format!("unsupported booking type {:?}", EntityKind::Activity.as_str()),
                ));
            }
        };
        lookup.map_err(PlanningError::from_store(operation))
    }
}
