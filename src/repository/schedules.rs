//! Driver schedules (agendas) on Repository

use super::Repository;
use crate::{
    error::AppResult,
    models::schedule::{CreateSchedule, Schedule},
};

impl Repository {
    pub async fn schedules_list(&self) -> AppResult<Vec<Schedule>> {
        self.get("/agendas").await
    }

    pub async fn schedules_get(&self, id: i32) -> AppResult<Schedule> {
        self.get(&format!("/agendas/{}", id)).await
    }

    pub async fn schedules_by_driver(&self, driver_id: i32) -> AppResult<Schedule> {
        self.get(&format!("/agendas/by-chofer/{}", driver_id)).await
    }

    /// Create a schedule for a driver; fails if the driver already has one
    pub async fn schedules_create(&self, data: &CreateSchedule) -> AppResult<Schedule> {
        self.post("/agendas", data).await
    }

    /// Soft delete; refused while the schedule still has active trips
    pub async fn schedules_delete(&self, id: i32) -> AppResult<()> {
        self.delete(&format!("/agendas/{}", id)).await
    }
}
