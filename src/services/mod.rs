//! Business logic services

pub mod auth;
pub mod dashboard;
pub mod drivers;
pub mod filters;
pub mod history;
pub mod insurance;
pub mod patients;
pub mod schedule_grid;
pub mod schedules;
pub mod session;
pub mod stats;
pub mod trips;
pub mod users;

use std::sync::Arc;

use crate::{config::ScheduleConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub session: session::SessionStore,
    pub auth: auth::AuthService,
    pub trips: trips::TripsService,
    pub schedules: schedules::SchedulesService,
    pub drivers: drivers::DriversService,
    pub patients: patients::PatientsService,
    pub insurance: insurance::InsuranceService,
    pub users: users::UsersService,
    pub history: history::HistoryService,
    pub dashboard: dashboard::DashboardService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, schedule: &ScheduleConfig) -> Self {
        let session = repository.session().clone();
        Self {
            auth: auth::AuthService::new(repository.clone(), session.clone()),
            trips: trips::TripsService::new(
                repository.clone(),
                Arc::new(repository.clone()),
                schedule.decode_policy,
            ),
            schedules: schedules::SchedulesService::new(repository.clone()),
            drivers: drivers::DriversService::new(repository.clone()),
            patients: patients::PatientsService::new(repository.clone()),
            insurance: insurance::InsuranceService::new(repository.clone()),
            users: users::UsersService::new(repository.clone()),
            history: history::HistoryService::new(repository.clone()),
            dashboard: dashboard::DashboardService::new(repository),
            session,
        }
    }
}
