use chrono::{DateTime, NaiveTime, Utc};
use tracing::{debug, info};
use waypoint_shared::{CreateTripRequest, NewTrip, Trip, TripSearchParams, TripStatus, UpdateTripRequest};

use super::{parse_id, PlanningService};
use crate::{CoreResult, EntityKind, PlanningError};

/// Midnight UTC at the start of the current day.
fn start_of_today() -> DateTime<Utc> {
    Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc()
}

impl PlanningService {
    /// Creates a trip in the `planning` state after checking its date range.
    pub async fn create_trip(&self, req: CreateTripRequest) -> CoreResult<Trip> {
        const OP: &str = "create trip";

        if req.user_id.is_nil() {
            return Err(PlanningError::invalid(OP, "user_id is required"));
        }
        if req.title.trim().is_empty() {
            return Err(PlanningError::invalid(OP, "title is required"));
        }
        if req.destination.trim().is_empty() {
            return Err(PlanningError::invalid(OP, "destination is required"));
        }
        if req.end_date <= req.start_date {
            return Err(PlanningError::invalid(OP, "end_date must be after start_date"));
        }
        if req.start_date < start_of_today() {
            return Err(PlanningError::invalid(OP, "start_date cannot be in the past"));
        }

        let trip = NewTrip {
            user_id: req.user_id,
            title: req.title,
            destination: req.destination,
            start_date: req.start_date,
            end_date: req.end_date,
            status: TripStatus::Planning,
        };

        let created = self
            .trips
            .create_trip(&trip)
            .await
            .map_err(PlanningError::from_store(OP))?;
        info!(trip_id = %created.id, destination = %created.destination, "trip created");
        Ok(created)
    }

    pub async fn get_trip(&self, id: &str) -> CoreResult<Trip> {
        const OP: &str = "get trip";
        let id = parse_id(OP, EntityKind::Trip, id)?;
        self.trips.get_trip(id).await.map_err(PlanningError::from_store(OP))
    }

    /// All trips, most recently created first.
    pub async fn list_trips(&self) -> CoreResult<Vec<Trip>> {
        self.trips
            .list_trips()
            .await
            .map_err(PlanningError::from_store("list trips"))
    }

    /// Applies only the fields present in `req`. An empty request is a no-op
    /// that returns the stored trip untouched.
    pub async fn update_trip(&self, id: &str, req: UpdateTripRequest) -> CoreResult<Trip> {
        const OP: &str = "update trip";
        let id = parse_id(OP, EntityKind::Trip, id)?;

        if req.is_empty() {
            debug!(trip_id = %id, "update with no fields, returning current trip");
            return self.trips.get_trip(id).await.map_err(PlanningError::from_store(OP));
        }

        let changes = req.into_changes(Utc::now());
        let updated = self
            .trips
            .update_trip(id, &changes)
            .await
            .map_err(PlanningError::from_store(OP))?;
        debug!(trip_id = %id, status = %updated.status, "trip updated");
        Ok(updated)
    }

    /// Deletes a trip; its bookings go with it.
    pub async fn delete_trip(&self, id: &str) -> CoreResult<()> {
        const OP: &str = "delete trip";
        let id = parse_id(OP, EntityKind::Trip, id)?;
        self.trips
            .delete_trip(id)
            .await
            .map_err(PlanningError::from_store(OP))?;
        info!(trip_id = %id, "trip deleted");
        Ok(())
    }

    pub async fn search_trips(&self, params: TripSearchParams) -> CoreResult<Vec<Trip>> {
        self.trips
            .search_trips(&params)
            .await
            .map_err(PlanningError::from_store("search trips"))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;
    use crate::service::test_support::{days_from_now, service, trip_request};

    #[tokio::test]
    async fn test_create_trip_starts_in_planning() {
        let svc = service();
        let trip = svc.create_trip(trip_request("Kyoto", 10, 7)).await.unwrap();

        assert_eq!(trip.status, TripStatus::Planning);
        assert_eq!(trip.destination, "Kyoto");
        assert_eq!(trip.created_at, trip.updated_at);
        assert_eq!(svc.get_trip(&trip.id.to_string()).await.unwrap(), trip);
    }

    #[tokio::test]
    async fn test_create_trip_rejects_bad_date_order() {
        let svc = service();

        let mut same_day = trip_request("Kyoto", 10, 0);
        same_day.end_date = same_day.start_date;
        let err = svc.create_trip(same_day).await.unwrap_err();
        assert!(err.is_validation());

        let backwards = trip_request("Kyoto", 10, -2);
        assert!(svc.create_trip(backwards).await.unwrap_err().is_validation());
        assert!(svc.list_trips().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_trip_requires_user_title_and_destination() {
        let svc = service();

        let mut blank_title = trip_request("Kyoto", 10, 7);
        blank_title.title = "   ".to_string();
        let err = svc.create_trip(blank_title).await.unwrap_err();
        assert_eq!(err.to_string(), "create trip: title is required");

        let blank_destination = trip_request("", 10, 7);
        let err = svc.create_trip(blank_destination).await.unwrap_err();
        assert_eq!(err.to_string(), "create trip: destination is required");

        let mut no_user = trip_request("Kyoto", 10, 7);
        no_user.user_id = Uuid::nil();
        assert!(svc.create_trip(no_user).await.unwrap_err().is_validation());

        assert!(svc.list_trips().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_trip_rejects_past_start() {
        let svc = service();
        let err = svc.create_trip(trip_request("Kyoto", -2, 5)).await.unwrap_err();
        assert_eq!(err.to_string(), "create trip: start_date cannot be in the past");
    }

    #[tokio::test]
    async fn test_create_trip_accepts_start_earlier_today() {
        let svc = service();
        let mut req = trip_request("Kyoto", 0, 3);
        req.start_date = start_of_today();
        assert!(svc.create_trip(req).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_trip_errors() {
        let svc = service();
        assert!(svc.get_trip("").await.unwrap_err().is_validation());

        let err = svc.get_trip(&Uuid::new_v4().to_string()).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.missing_entity(), Some(EntityKind::Trip));
    }

    #[tokio::test]
    async fn test_get_trip_is_repeatable() {
        let svc = service();
        let trip = svc.create_trip(trip_request("Quito", 3, 4)).await.unwrap();
        let id = trip.id.to_string();
        assert_eq!(svc.get_trip(&id).await.unwrap(), svc.get_trip(&id).await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_update_returns_trip_unchanged() {
        let svc = service();
        let trip = svc.create_trip(trip_request("Lima", 3, 4)).await.unwrap();

        let same = svc
            .update_trip(&trip.id.to_string(), UpdateTripRequest::default())
            .await
            .unwrap();
        assert_eq!(same, trip);
    }

    #[tokio::test]
    async fn test_status_only_update_touches_status_and_timestamp() {
        let svc = service();
        let trip = svc.create_trip(trip_request("Lima", 3, 4)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let updated = svc
            .update_trip(
                &trip.id.to_string(),
                UpdateTripRequest {
                    status: Some(TripStatus::Confirmed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, TripStatus::Confirmed);
        assert_eq!(updated.title, trip.title);
        assert_eq!(updated.destination, trip.destination);
        assert_eq!(updated.start_date, trip.start_date);
        assert_eq!(updated.end_date, trip.end_date);
        assert_eq!(updated.created_at, trip.created_at);
        assert!(updated.updated_at > trip.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_trip_is_not_found() {
        let svc = service();
        let err = svc
            .update_trip(
                &Uuid::new_v4().to_string(),
                UpdateTripRequest {
                    title: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        // The no-op path still checks existence.
        let err = svc
            .update_trip(&Uuid::new_v4().to_string(), UpdateTripRequest::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_trip() {
        let svc = service();
        let trip = svc.create_trip(trip_request("Cairo", 2, 2)).await.unwrap();
        let id = trip.id.to_string();

        svc.delete_trip(&id).await.unwrap();
        assert!(svc.get_trip(&id).await.unwrap_err().is_not_found());
        assert!(svc.delete_trip(&id).await.unwrap_err().is_not_found());
        assert!(svc.delete_trip("").await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_search_by_destination_is_case_insensitive_and_ordered() {
        let svc = service();
        let late = svc.create_trip(trip_request("Paris, France", 20, 3)).await.unwrap();
        let early = svc.create_trip(trip_request("PARIS", 5, 3)).await.unwrap();
        svc.create_trip(trip_request("Berlin", 1, 3)).await.unwrap();

        let found = svc
            .search_trips(TripSearchParams {
                destination: Some("Paris".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let ids: Vec<Uuid> = found.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![early.id, late.id]);
    }

    #[tokio::test]
    async fn test_search_by_date_window() {
        let svc = service();
        let inside = svc.create_trip(trip_request("Oslo", 10, 2)).await.unwrap();
        svc.create_trip(trip_request("Oslo", 2, 2)).await.unwrap();
        svc.create_trip(trip_request("Oslo", 10, 30)).await.unwrap();

        let day = |d: DateTime<Utc>| -> NaiveDate { d.date_naive() };
        let found = svc
            .search_trips(TripSearchParams {
                destination: None,
                start_date: Some(day(days_from_now(9))),
                end_date: Some(day(inside.end_date)),
            })
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, inside.id);
    }

    #[tokio::test]
    async fn test_search_without_filters_returns_everything() {
        let svc = service();
        svc.create_trip(trip_request("Oslo", 4, 2)).await.unwrap();
        svc.create_trip(trip_request("Rome", 1, 2)).await.unwrap();

        let found = svc.search_trips(TripSearchParams::default()).await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found[0].start_date <= found[1].start_date);
    }
}
