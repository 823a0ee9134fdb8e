//! Insurance providers service

use validator::Validate;

use crate::{
    error::AppResult,
    models::insurance::{CreateInsuranceProvider, InsuranceProvider, UpdateInsuranceProvider},
    repository::Repository,
};

#[derive(Clone)]
pub struct InsuranceService {
    repository: Repository,
}

impl InsuranceService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<InsuranceProvider>> {
        self.repository.insurance_list().await
    }

    pub async fn list_active(&self) -> AppResult<Vec<InsuranceProvider>> {
        self.repository.insurance_list_active().await
    }

    pub async fn get(&self, id: i32) -> AppResult<InsuranceProvider> {
        self.repository.insurance_get(id).await
    }

    pub async fn create(&self, data: &CreateInsuranceProvider) -> AppResult<InsuranceProvider> {
        data.validate()?;
        self.repository.insurance_create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateInsuranceProvider) -> AppResult<InsuranceProvider> {
        data.validate()?;
        self.repository.insurance_update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.insurance_delete(id).await
    }

    pub async fn toggle_active(&self, id: i32) -> AppResult<()> {
        self.repository.insurance_toggle_active(id).await
    }
}
