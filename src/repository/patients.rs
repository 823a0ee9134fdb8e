//! Patients domain methods on Repository

use super::Repository;
use crate::{
    error::AppResult,
    models::patient::{CreatePatient, Patient, UpdatePatient},
};

impl Repository {
    pub async fn patients_list(&self) -> AppResult<Vec<Patient>> {
        self.get("/pacientes").await
    }

    pub async fn patients_list_active(&self) -> AppResult<Vec<Patient>> {
        self.get("/pacientes/activos").await
    }

    pub async fn patients_get(&self, id: i32) -> AppResult<Patient> {
        self.get(&format!("/pacientes/{}", id)).await
    }

    pub async fn patients_create(&self, data: &CreatePatient) -> AppResult<Patient> {
        self.post("/pacientes", data).await
    }

    pub async fn patients_update(&self, id: i32, data: &UpdatePatient) -> AppResult<Patient> {
        self.put(&format!("/pacientes/{}", id), data).await
    }

    pub async fn patients_delete(&self, id: i32) -> AppResult<()> {
        self.delete(&format!("/pacientes/{}", id)).await
    }

    pub async fn patients_toggle_active(&self, id: i32) -> AppResult<()> {
        self.toggle(&format!("/pacientes/{}/estado", id)).await
    }
}
