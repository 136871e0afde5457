pub mod models;

pub use models::{
    Activity, Booking, BookingStatus, BookingTarget, BookingType, CreateBookingRequest,
    CreateTripRequest, Flight, Hotel, NewBooking, NewFlight, NewHotel, NewTrip, Trip,
    TripChanges, TripSearchParams, TripStatus, UnknownVariant, UpdateTripRequest,
};
