//! Patients service

use validator::Validate;

use crate::{
    error::AppResult,
    models::patient::{CreatePatient, Patient, UpdatePatient},
    repository::Repository,
};

#[derive(Clone)]
pub struct PatientsService {
    repository: Repository,
}

impl PatientsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Patient>> {
        self.repository.patients_list().await
    }

    pub async fn list_active(&self) -> AppResult<Vec<Patient>> {
        self.repository.patients_list_active().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Patient> {
        self.repository.patients_get(id).await
    }

    pub async fn create(&self, data: &CreatePatient) -> AppResult<Patient> {
        data.validate()?;
        self.repository.patients_create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdatePatient) -> AppResult<Patient> {
        data.validate()?;
        self.repository.patients_update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.patients_delete(id).await
    }

    pub async fn toggle_active(&self, id: i32) -> AppResult<()> {
        self.repository.patients_toggle_active(id).await
    }
}
