//! Admin dashboard aggregates on Repository

use super::Repository;
use crate::{
    error::AppResult,
    models::{
        dashboard::{DriverTripsReport, GlobalStatistics},
        enums::Period,
    },
};

impl Repository {
    pub async fn dashboard_global(&self, period: Period) -> AppResult<GlobalStatistics> {
        self.get_query("/admin/estadisticas-globales", &[("periodo", period.as_wire())])
            .await
    }

    pub async fn dashboard_trips_by_driver(&self, period: Period) -> AppResult<DriverTripsReport> {
        self.get_query("/admin/traslados-por-chofer", &[("periodo", period.as_wire())])
            .await
    }
}
