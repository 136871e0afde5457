use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UnknownVariant;

/// What kind of item a booking's `reference_id` points at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingType {
    Hotel,
    Flight,
    Activity,
}

impl BookingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingType::Hotel => "hotel",
            BookingType::Flight => "flight",
            BookingType::Activity => "activity",
        }
    }
}

impl fmt::Display for BookingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hotel" => Ok(BookingType::Hotel),
            "flight" => Ok(BookingType::Flight),
            "activity" => Ok(BookingType::Activity),
            other => Err(UnknownVariant::new("booking type", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(UnknownVariant::new("booking status", other)),
        }
    }
}

/// The item a booking points at, resolved from its `(type, reference_id)` pair.
///
/// The store keeps no foreign key for this link, so the planning service
/// checks existence by dispatching on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingTarget {
    Hotel(Uuid),
    Flight(Uuid),
    Activity(Uuid),
}

impl BookingTarget {
    pub fn new(kind: BookingType, reference_id: Uuid) -> Self {
        match kind {
            BookingType::Hotel => BookingTarget::Hotel(reference_id),
            BookingType::Flight => BookingTarget::Flight(reference_id),
            BookingType::Activity => BookingTarget::Activity(reference_id),
        }
    }

    pub fn kind(&self) -> BookingType {
        match self {
            BookingTarget::Hotel(_) => BookingType::Hotel,
            BookingTarget::Flight(_) => BookingType::Flight,
            BookingTarget::Activity(_) => BookingType::Activity,
        }
    }

    pub fn reference_id(&self) -> Uuid {
        match self {
            BookingTarget::Hotel(id) | BookingTarget::Flight(id) | BookingTarget::Activity(id) => *id,
        }
    }
}

/// Links a trip to a hotel, flight or activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub trip_id: Uuid,
    #[serde(rename = "type")]
    pub booking_type: BookingType,
    pub reference_id: Uuid,
    pub status: BookingStatus,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn target(&self) -> BookingTarget {
        BookingTarget::new(self.booking_type, self.reference_id)
    }
}

/// Payload for `POST /trips/{id}/bookings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    /// Kept as text so an unknown type is reported by the service after the
    /// trip lookup rather than failing body decoding.
    #[serde(rename = "type")]
    pub booking_type: String,
    pub reference_id: Uuid,
    pub total_price: f64,
}

impl CreateBookingRequest {
    pub fn target(&self) -> Result<BookingTarget, UnknownVariant> {
        let kind = self.booking_type.parse()?;
        Ok(BookingTarget::new(kind, self.reference_id))
    }
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub trip_id: Uuid,
    pub target: BookingTarget,
    pub status: BookingStatus,
    pub total_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_request_deserialization() {
        let reference_id = Uuid::new_v4();
        let json = format!(
            r#"{{"type": "hotel", "reference_id": "{}", "total_price": 250.0}}"#,
            reference_id
        );
        let req: CreateBookingRequest = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(req.target().unwrap(), BookingTarget::Hotel(reference_id));
        assert_eq!(req.total_price, 250.0);
    }

    #[test]
    fn test_unknown_booking_type_decodes_but_has_no_target() {
        let json = format!(
            r#"{{"type": "cruise", "reference_id": "{}", "total_price": 10.0}}"#,
            Uuid::new_v4()
        );
        let req: CreateBookingRequest = serde_json::from_str(&json).unwrap();
        let err = req.target().unwrap_err();
        assert_eq!(err.value, "cruise");
        assert!("cruise".parse::<BookingType>().is_err());
    }

    #[test]
    fn test_target_exposes_kind_and_reference() {
        let id = Uuid::new_v4();
        let target = BookingTarget::new(BookingType::Activity, id);
        assert_eq!(target.kind(), BookingType::Activity);
        assert_eq!(target.reference_id(), id);
    }
}
