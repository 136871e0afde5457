use tracing::info;
use waypoint_shared::{Flight, NewFlight};

use super::{filter_text, parse_id, PlanningService};
use crate::{CoreResult, EntityKind, PlanningError};

impl PlanningService {
    pub async fn create_flight(&self, flight: NewFlight) -> CoreResult<Flight> {
        const OP: &str = "create flight";

        if flight.arrival_time <= flight.departure_time {
            return Err(PlanningError::invalid(OP, "arrival_time must be after departure_time"));
        }
        if flight.origin == flight.destination {
            return Err(PlanningError::invalid(OP, "origin and destination must be different"));
        }
        if flight.seats_available < 0 {
            return Err(PlanningError::invalid(
                OP,
                format!("seats_available must be >= 0, got {}", flight.seats_available),
            ));
        }

        let created = self
            .flights
            .create_flight(&flight)
            .await
            .map_err(PlanningError::from_store(OP))?;
        info!(
            flight_id = %created.id,
            route = %format!("{}-{}", created.origin, created.destination),
            "flight created"
        );
        Ok(created)
    }

    pub async fn get_flight(&self, id: &str) -> CoreResult<Flight> {
        const OP: &str = "get flight";
        let id = parse_id(OP, EntityKind::Flight, id)?;
        self.flights.get_flight(id).await.map_err(PlanningError::from_store(OP))
    }

    /// Flights by departure time; origin and destination filter independently.
    pub async fn list_flights(
        &self,
        origin: Option<&str>,
        destination: Option<&str>,
    ) -> CoreResult<Vec<Flight>> {
        self.flights
            .list_flights(filter_text(origin), filter_text(destination))
            .await
            .map_err(PlanningError::from_store("list flights"))
    }
}
