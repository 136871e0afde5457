use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An accommodation option that trips can book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hotel {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub price_per_night: f64,
    pub rating: f64,
    pub available_from: DateTime<Utc>,
    pub available_to: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /hotels`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHotel {
    pub name: String,
    pub location: String,
    pub price_per_night: f64,
    #[serde(default)]
    pub rating: f64,
    pub available_from: DateTime<Utc>,
    pub available_to: DateTime<Utc>,
}
