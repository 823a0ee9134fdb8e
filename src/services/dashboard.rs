//! Admin dashboard service

use chrono::NaiveDate;

use crate::{
    error::AppResult,
    models::{
        dashboard::{DriverTripsReport, GlobalStatistics},
        enums::Period,
    },
    repository::Repository,
};

/// Everything the dashboard page shows for one period
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub period: Period,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub global: GlobalStatistics,
    pub by_driver: DriverTripsReport,
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Repository,
}

impl DashboardService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn global(&self, period: Period) -> AppResult<GlobalStatistics> {
        self.repository.dashboard_global(period).await
    }

    pub async fn trips_by_driver(&self, period: Period) -> AppResult<DriverTripsReport> {
        self.repository.dashboard_trips_by_driver(period).await
    }

    /// Both aggregates, fetched concurrently
    pub async fn snapshot(&self, period: Period, today: NaiveDate) -> AppResult<DashboardSnapshot> {
        let (global, by_driver) = tokio::try_join!(self.global(period), self.trips_by_driver(period))?;
        let (from, to) = period.date_range(today);
        Ok(DashboardSnapshot {
            period,
            from,
            to,
            global,
            by_driver,
        })
    }
}
