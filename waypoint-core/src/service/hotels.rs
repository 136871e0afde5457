use tracing::info;
use waypoint_shared::{Hotel, NewHotel};

use super::{filter_text, parse_id, PlanningService};
use crate::{CoreResult, EntityKind, PlanningError};

const MAX_RATING: f64 = 5.0;

impl PlanningService {
    pub async fn create_hotel(&self, hotel: NewHotel) -> CoreResult<Hotel> {
        const OP: &str = "create hotel";

        if hotel.price_per_night.is_nan() || hotel.price_per_night <= 0.0 {
            return Err(PlanningError::invalid(OP, "price_per_night must be greater than 0"));
        }
        if !(0.0..=MAX_RATING).contains(&hotel.rating) {
            return Err(PlanningError::invalid(
                OP,
                format!("rating must be between 0 and 5, got {:.2}", hotel.rating),
            ));
        }

        let created = self
            .hotels
            .create_hotel(&hotel)
            .await
            .map_err(PlanningError::from_store(OP))?;
        info!(hotel_id = %created.id, location = %created.location, "hotel created");
        Ok(created)
    }

    pub async fn get_hotel(&self, id: &str) -> CoreResult<Hotel> {
        const OP: &str = "get hotel";
        let id = parse_id(OP, EntityKind::Hotel, id)?;
        self.hotels.get_hotel(id).await.map_err(PlanningError::from_store(OP))
    }

    /// Hotels by rating, best first, optionally narrowed to a location fragment.
    pub async fn list_hotels(&self, location: Option<&str>) -> CoreResult<Vec<Hotel>> {
        self.hotels
            .list_hotels(filter_text(location))
            .await
            .map_err(PlanningError::from_store("list hotels"))
    }
}
