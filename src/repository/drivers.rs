//! Drivers domain methods on Repository

use super::Repository;
use crate::{
    error::AppResult,
    models::{
        driver::{AvailableUser, CreateDriver, Driver, DriverStatistics, UpdateDriver},
        enums::Period,
    },
};

impl Repository {
    pub async fn drivers_list(&self) -> AppResult<Vec<Driver>> {
        self.get("/choferes").await
    }

    pub async fn drivers_get(&self, id: i32) -> AppResult<Driver> {
        self.get(&format!("/choferes/{}", id)).await
    }

    /// Driver record linked to a user account
    pub async fn drivers_by_user(&self, user_id: i32) -> AppResult<Driver> {
        self.get(&format!("/choferes/by-usuario/{}", user_id)).await
    }

    pub async fn drivers_create(&self, data: &CreateDriver) -> AppResult<Driver> {
        self.post("/choferes", data).await
    }

    pub async fn drivers_update(&self, id: i32, data: &UpdateDriver) -> AppResult<Driver> {
        self.put(&format!("/choferes/{}", id), data).await
    }

    pub async fn drivers_delete(&self, id: i32) -> AppResult<()> {
        self.delete(&format!("/choferes/{}", id)).await
    }

    pub async fn drivers_toggle_active(&self, id: i32) -> AppResult<()> {
        self.toggle(&format!("/choferes/{}/estado", id)).await
    }

    /// User accounts not yet linked to any driver
    pub async fn drivers_available_users(&self) -> AppResult<Vec<AvailableUser>> {
        self.get("/choferes/usuarios-disponibles").await
    }

    pub async fn drivers_statistics(&self, id: i32, period: Period) -> AppResult<DriverStatistics> {
        self.get_query(
            &format!("/choferes/{}/estadisticas", id),
            &[("periodo", period.as_wire())],
        )
        .await
    }
}
