//! Insurance providers (obras sociales) on Repository

use super::Repository;
use crate::{
    error::AppResult,
    models::insurance::{CreateInsuranceProvider, InsuranceProvider, UpdateInsuranceProvider},
};

impl Repository {
    pub async fn insurance_list(&self) -> AppResult<Vec<InsuranceProvider>> {
        self.get("/obras-sociales").await
    }

    pub async fn insurance_list_active(&self) -> AppResult<Vec<InsuranceProvider>> {
        self.get("/obras-sociales/activas").await
    }

    pub async fn insurance_get(&self, id: i32) -> AppResult<InsuranceProvider> {
        self.get(&format!("/obras-sociales/{}", id)).await
    }

    pub async fn insurance_create(&self, data: &CreateInsuranceProvider) -> AppResult<InsuranceProvider> {
        self.post("/obras-sociales", data).await
    }

    pub async fn insurance_update(
        &self,
        id: i32,
        data: &UpdateInsuranceProvider,
    ) -> AppResult<InsuranceProvider> {
        self.put(&format!("/obras-sociales/{}", id), data).await
    }

    /// Refused while patients still reference the provider
    pub async fn insurance_delete(&self, id: i32) -> AppResult<()> {
        self.delete(&format!("/obras-sociales/{}", id)).await
    }

    pub async fn insurance_toggle_active(&self, id: i32) -> AppResult<()> {
        self.toggle(&format!("/obras-sociales/{}/estado", id)).await
    }
}
