use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UnknownVariant;

/// Trip lifecycle state. Any value may replace any other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Planning,
    Confirmed,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Planning => "planning",
            TripStatus::Confirmed => "confirmed",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TripStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planning" => Ok(TripStatus::Planning),
            "confirmed" => Ok(TripStatus::Confirmed),
            "completed" => Ok(TripStatus::Completed),
            "cancelled" => Ok(TripStatus::Cancelled),
            other => Err(UnknownVariant::new("trip status", other)),
        }
    }
}

/// A top-level itinerary owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub destination: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: TripStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /trips`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTripRequest {
    pub user_id: Uuid,
    pub title: String,
    pub destination: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// A validated trip ready to be inserted. The store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewTrip {
    pub user_id: Uuid,
    pub title: String,
    pub destination: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: TripStatus,
}

/// Partial update payload. Absent (or null) fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTripRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<TripStatus>,
}

impl UpdateTripRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.destination.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.status.is_none()
    }

    /// Stamp the requested changes with the time they are applied.
    pub fn into_changes(self, updated_at: DateTime<Utc>) -> TripChanges {
        TripChanges {
            title: self.title,
            destination: self.destination,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            updated_at,
        }
    }
}

/// Field changes handed to the storage layer in a single conditional update.
#[derive(Debug, Clone)]
pub struct TripChanges {
    pub title: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<TripStatus>,
    pub updated_at: DateTime<Utc>,
}

impl TripChanges {
    pub fn apply_to(&self, trip: &mut Trip) {
        if let Some(title) = &self.title {
            trip.title = title.clone();
        }
        if let Some(destination) = &self.destination {
            trip.destination = destination.clone();
        }
        if let Some(start_date) = self.start_date {
            trip.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            trip.end_date = end_date;
        }
        if let Some(status) = self.status {
            trip.status = status;
        }
        trip.updated_at = self.updated_at;
    }
}

/// Filter for `GET /trips/search`. Dates are calendar days (`YYYY-MM-DD`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripSearchParams {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl TripSearchParams {
    /// Trips must start at or after this instant.
    pub fn starts_from(&self) -> Option<DateTime<Utc>> {
        self.start_date
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .map(|midnight| midnight.and_utc())
    }

    /// Trips must end strictly before this instant: midnight after the
    /// requested end day, so the whole day is included.
    pub fn ends_before(&self) -> Option<DateTime<Utc>> {
        self.end_date
            .and_then(|day| day.checked_add_days(Days::new(1)))
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .map(|midnight| midnight.and_utc())
    }

    /// Destination fragment with blank input treated as absent.
    pub fn destination_fragment(&self) -> Option<&str> {
        self.destination
            .as_deref()
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_round_trips_through_text() {
        for status in [
            TripStatus::Planning,
            TripStatus::Confirmed,
            TripStatus::Completed,
            TripStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<TripStatus>().unwrap(), status);
        }
        assert!("archived".parse::<TripStatus>().is_err());
    }

    #[test]
    fn test_update_request_ignores_null_fields() {
        let req: UpdateTripRequest =
            serde_json::from_str(r#"{"title": null, "status": "confirmed"}"#).unwrap();
        assert!(req.title.is_none());
        assert_eq!(req.status, Some(TripStatus::Confirmed));
        assert!(!req.is_empty());

        let empty: UpdateTripRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_search_bounds_cover_whole_days() {
        let params = TripSearchParams {
            destination: Some("  ".to_string()),
            start_date: NaiveDate::from_ymd_opt(2030, 6, 1),
            end_date: NaiveDate::from_ymd_opt(2030, 6, 10),
        };
        assert_eq!(
            params.starts_from(),
            Some(Utc.with_ymd_and_hms(2030, 6, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            params.ends_before(),
            Some(Utc.with_ymd_and_hms(2030, 6, 11, 0, 0, 0).unwrap())
        );
        assert_eq!(params.destination_fragment(), None);
    }
}
