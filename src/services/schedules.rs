//! Driver schedules (agendas) service

use crate::{
    error::{AppError, AppResult},
    models::{
        driver::Driver,
        schedule::{CreateSchedule, Schedule},
    },
    repository::Repository,
    services::filters::drivers_without_schedule,
};

/// A driver holds at most one active schedule
fn ensure_no_active_schedule(schedules: &[Schedule], driver_id: i32) -> AppResult<()> {
    if schedules.iter().any(|s| s.active && s.driver_id == driver_id) {
        return Err(AppError::Conflict(format!(
            "driver {} already has an active schedule",
            driver_id
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct SchedulesService {
    repository: Repository,
}

impl SchedulesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Schedule>> {
        self.repository.schedules_list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Schedule> {
        self.repository.schedules_get(id).await
    }

    pub async fn by_driver(&self, driver_id: i32) -> AppResult<Schedule> {
        self.repository.schedules_by_driver(driver_id).await
    }

    /// Create a schedule for a driver that has none yet
    pub async fn create(&self, driver_id: i32) -> AppResult<Schedule> {
        let schedules = self.repository.schedules_list().await?;
        ensure_no_active_schedule(&schedules, driver_id)?;
        self.repository
            .schedules_create(&CreateSchedule { driver_id })
            .await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.schedules_delete(id).await
    }

    /// Drivers offered when creating a schedule
    pub async fn assignable_drivers(&self) -> AppResult<Vec<Driver>> {
        let drivers = self.repository.drivers_list().await?;
        let schedules = self.repository.schedules_list().await?;
        Ok(drivers_without_schedule(&drivers, &schedules)
            .into_iter()
            .cloned()
            .collect())
    }
}
