pub mod activity;
pub mod booking;
pub mod flight;
pub mod hotel;
pub mod trip;

pub use activity::Activity;
pub use booking::{Booking, BookingStatus, BookingTarget, BookingType, CreateBookingRequest, NewBooking};
pub use flight::{Flight, NewFlight};
pub use hotel::{Hotel, NewHotel};
pub use trip::{CreateTripRequest, NewTrip, Trip, TripChanges, TripSearchParams, TripStatus, UpdateTripRequest};

/// Returned when stored or submitted text does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}
