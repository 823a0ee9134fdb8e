//! Trips service: catalog fetch, weekly grid, daily lists and transitions

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::TripState,
        trip::{
            CreateRecurringTrip, RecurringTrip, TransitionAck, TransitionRequest, TravelEstimate,
            TripOccurrence, UpdateRecurringTrip,
        },
    },
    repository::Repository,
    services::schedule_grid::{DecodePolicy, WeeklyGrid},
};

/// Source of recurring trip definitions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripCatalog: Send + Sync {
    /// One driver's current-week trips, or every active trip when `None`
    async fn recurring_trips(&self, driver_id: Option<i32>) -> AppResult<Vec<RecurringTrip>>;
}

#[async_trait]
impl TripCatalog for Repository {
    async fn recurring_trips(&self, driver_id: Option<i32>) -> AppResult<Vec<RecurringTrip>> {
        match driver_id {
            Some(id) => Ok(self.trips_driver_week(id).await?.trips),
            None => self.trips_list_active().await,
        }
    }
}

fn check_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> AppResult<()> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => {
            Err(AppError::Validation("end date is before start date".to_string()))
        }
        _ => Ok(()),
    }
}

#[derive(Clone)]
pub struct TripsService {
    repository: Repository,
    catalog: Arc<dyn TripCatalog>,
    policy: DecodePolicy,
}

impl TripsService {
    pub fn new(repository: Repository, catalog: Arc<dyn TripCatalog>, policy: DecodePolicy) -> Self {
        Self {
            repository,
            catalog,
            policy,
        }
    }

    pub fn policy(&self) -> DecodePolicy {
        self.policy
    }

    /// Fetch the trip catalog and pivot it into the weekly grid
    pub async fn weekly_grid(&self, driver_id: Option<i32>) -> AppResult<WeeklyGrid> {
        let trips = self.catalog.recurring_trips(driver_id).await?;
        tracing::debug!(driver_id = ?driver_id, count = trips.len(), "Fetched recurring trips");
        WeeklyGrid::build(&trips, self.policy)
    }

    // ---- Recurring trips ----

    pub async fn list(&self) -> AppResult<Vec<RecurringTrip>> {
        self.repository.trips_list().await
    }

    pub async fn list_active(&self) -> AppResult<Vec<RecurringTrip>> {
        self.repository.trips_list_active().await
    }

    pub async fn get(&self, id: i32) -> AppResult<RecurringTrip> {
        self.repository.trips_get(id).await
    }

    pub async fn by_schedule(&self, schedule_id: i32) -> AppResult<Vec<RecurringTrip>> {
        self.repository.trips_by_schedule(schedule_id).await
    }

    pub async fn by_patient(&self, patient_id: i32) -> AppResult<Vec<RecurringTrip>> {
        self.repository.trips_by_patient(patient_id).await
    }

    pub async fn create(&self, data: &CreateRecurringTrip) -> AppResult<RecurringTrip> {
        data.validate()?;
        check_date_range(Some(data.start_date), data.end_date)?;
        self.repository.trips_create(data).await
    }

    /// Only a range given in full is checked; a lone date is left to the server
    pub async fn update(&self, id: i32, data: &UpdateRecurringTrip) -> AppResult<RecurringTrip> {
        data.validate()?;
        check_date_range(data.start_date, data.end_date)?;
        self.repository.trips_update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.trips_delete(id).await
    }

    // ---- Occurrences ----

    pub async fn driver_day(
        &self,
        driver_id: i32,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<TripOccurrence>> {
        self.repository.trips_driver_day(driver_id, date).await
    }

    pub async fn admin_day(
        &self,
        date: Option<NaiveDate>,
        state: Option<TripState>,
    ) -> AppResult<Vec<TripOccurrence>> {
        self.repository.trips_admin_day(date, state).await
    }

    pub async fn state(&self, id: i32, date: Option<NaiveDate>) -> AppResult<TripState> {
        self.repository.trips_state(id, date).await
    }

    // ---- Transitions ----
    // Legality is decided by the server; callers reload to observe the result.

    pub async fn start(&self, id: i32) -> AppResult<TransitionAck> {
        let request = self.transition(None)?;
        self.repository.trips_start(id, &request).await
    }

    pub async fn finish(&self, id: i32) -> AppResult<TransitionAck> {
        let request = self.transition(None)?;
        self.repository.trips_finish(id, &request).await
    }

    pub async fn cancel(&self, id: i32, reason: &str) -> AppResult<TransitionAck> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AppError::Validation("a cancellation reason is required".to_string()));
        }
        let request = self.transition(Some(reason.to_string()))?;
        self.repository.trips_cancel(id, &request).await
    }

    fn transition(&self, reason: Option<String>) -> AppResult<TransitionRequest> {
        let session = self.repository.session().require()?;
        Ok(TransitionRequest {
            user_id: session.id,
            reason,
        })
    }

    pub async fn travel_estimate(&self, id: i32) -> AppResult<TravelEstimate> {
        let estimate = self.repository.trips_travel_estimate(id).await?;
        if !estimate.success {
            let message = estimate
                .error
                .unwrap_or_else(|| "travel time unavailable".to_string());
            return Err(AppError::BadRequest(message));
        }
        Ok(estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::ApiConfig,
        models::trip::{WeekdaySet, WireTime},
        services::session::SessionStore,
    };
    use chrono::NaiveTime;
    use mockall::predicate::eq;

    fn repository() -> Repository {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
        };
        Repository::new(&config, SessionStore::in_memory()).unwrap()
    }

    fn trip(id: i32, time: &str, weekdays: &str) -> RecurringTrip {
        RecurringTrip {
            id,
            schedule_id: Some(3),
            patient_id: 40,
            driver_id: Some(2),
            origin_address: "Av. Colón 1200".into(),
            destination_address: "Hospital Privado".into(),
            scheduled_time: WireTime::Text(time.into()),
            weekdays: weekdays.into(),
            start_date: None,
            end_date: None,
            active: true,
            notes: None,
            current_state: None,
            patient_name: None,
            driver_name: None,
            patient_phone: None,
            driver_phone: None,
            wheelchair: None,
        }
    }

    fn service(catalog: MockTripCatalog, policy: DecodePolicy) -> TripsService {
        TripsService::new(repository(), Arc::new(catalog), policy)
    }

    #[tokio::test]
    async fn test_weekly_grid_from_catalog() {
        let mut catalog = MockTripCatalog::new();
        catalog
            .expect_recurring_trips()
            .with(eq(Some(2)))
            .times(1)
            .returning(|_| Ok(vec![trip(1, "09:00", "1,3"), trip(2, "09:00", "3")]));

        let grid = service(catalog, DecodePolicy::Lenient)
            .weekly_grid(Some(2))
            .await
            .unwrap();

        assert_eq!(grid.cell("09:00", 1).map(|t| t.id), Some(1));
        assert_eq!(grid.cell("09:00", 3).map(|t| t.id), Some(2));
        assert_eq!(grid.collisions().len(), 1);
    }

    #[test]
    fn test_empty_catalog_gives_empty_grid() {
        let mut catalog = MockTripCatalog::new();
        catalog.expect_recurring_trips().returning(|_| Ok(Vec::new()));

        let trips = service(catalog, DecodePolicy::Strict);
        let grid = tokio_test::block_on(trips.weekly_grid(None)).unwrap();
        assert!(grid.is_empty());
        assert!(grid.trips_for_weekday(1).is_empty());
    }

    #[tokio::test]
    async fn test_weekly_grid_propagates_fetch_errors() {
        let mut catalog = MockTripCatalog::new();
        catalog
            .expect_recurring_trips()
            .returning(|_| Err(AppError::Authentication("Credenciales inválidas".into())));

        let result = service(catalog, DecodePolicy::Lenient).weekly_grid(None).await;
        assert!(matches!(result, Err(AppError::Authentication(_))));
    }

    #[tokio::test]
    async fn test_strict_policy_surfaces_bad_data() {
        let mut catalog = MockTripCatalog::new();
        catalog
            .expect_recurring_trips()
            .returning(|_| Ok(vec![trip(1, "9 o'clock", "1")]));

        let result = service(catalog, DecodePolicy::Strict).weekly_grid(None).await;
        assert!(matches!(result, Err(AppError::Decode(_))));
    }

    #[tokio::test]
    async fn test_transitions_need_a_session() {
        let trips = service(MockTripCatalog::new(), DecodePolicy::Lenient);
        assert!(matches!(trips.start(7).await, Err(AppError::Authentication(_))));
        assert!(matches!(trips.finish(7).await, Err(AppError::Authentication(_))));
        assert!(matches!(
            trips.cancel(7, "patient hospitalized").await,
            Err(AppError::Authentication(_))
        ));
    }

    #[tokio::test]
    async fn test_cancel_requires_reason() {
        let trips = service(MockTripCatalog::new(), DecodePolicy::Lenient);
        assert!(matches!(trips.cancel(7, "   ").await, Err(AppError::Validation(_))));
    }

    fn new_trip() -> CreateRecurringTrip {
        CreateRecurringTrip {
            schedule_id: 3,
            patient_id: 40,
            origin_address: "Av. Colón 1200".into(),
            destination_address: "Hospital Privado".into(),
            scheduled_time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            weekdays: "1,3,5".parse().unwrap(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            end_date: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_refuses_end_before_start() {
        let trips = service(MockTripCatalog::new(), DecodePolicy::Lenient);
        let data = CreateRecurringTrip {
            end_date: NaiveDate::from_ymd_opt(2025, 5, 30),
            ..new_trip()
        };

        match trips.create(&data).await {
            Err(AppError::Validation(message)) => assert!(message.contains("end date")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_validates_fields_before_sending() {
        let trips = service(MockTripCatalog::new(), DecodePolicy::Lenient);

        let no_origin = CreateRecurringTrip {
            origin_address: String::new(),
            ..new_trip()
        };
        assert!(matches!(trips.create(&no_origin).await, Err(AppError::Validation(_))));

        let no_days = CreateRecurringTrip {
            weekdays: WeekdaySet::default(),
            ..new_trip()
        };
        assert!(matches!(trips.create(&no_days).await, Err(AppError::Validation(_))));

        // Same start and end day passes the local checks and reaches the network
        let one_day = CreateRecurringTrip {
            end_date: NaiveDate::from_ymd_opt(2025, 6, 2),
            ..new_trip()
        };
        assert!(matches!(trips.create(&one_day).await, Err(AppError::Transport(_))));
    }

    #[tokio::test]
    async fn test_update_checks_a_full_date_range() {
        let trips = service(MockTripCatalog::new(), DecodePolicy::Lenient);

        let reversed = UpdateRecurringTrip {
            start_date: NaiveDate::from_ymd_opt(2025, 6, 2),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 1),
            ..Default::default()
        };
        assert!(matches!(trips.update(7, &reversed).await, Err(AppError::Validation(_))));

        let blank_destination = UpdateRecurringTrip {
            destination_address: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            trips.update(7, &blank_destination).await,
            Err(AppError::Validation(_))
        ));

        let end_only = UpdateRecurringTrip {
            end_date: NaiveDate::from_ymd_opt(2025, 6, 1),
            ..Default::default()
        };
        assert!(matches!(trips.update(7, &end_only).await, Err(AppError::Transport(_))));
    }
}
