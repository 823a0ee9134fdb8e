//! Patient models

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i32,
    #[serde(rename = "nombre", default)]
    pub first_name: String,
    #[serde(rename = "apellido", default)]
    pub last_name: String,
    #[serde(default)]
    pub dni: String,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    #[serde(rename = "ciudad", default)]
    pub city: Option<String>,
    #[serde(rename = "idObraSocial", default)]
    pub insurance_provider_id: Option<i32>,
    #[serde(rename = "sillaRueda", default)]
    pub wheelchair: bool,
    #[serde(rename = "activo", default)]
    pub active: bool,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Create patient request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreatePatient {
    #[serde(rename = "nombre")]
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    #[serde(rename = "apellido")]
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    #[validate(length(min = 7, max = 10, message = "DNI must have 7 to 10 characters"))]
    pub dni: String,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "invalid email address"))]
    pub email: Option<String>,
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "ciudad", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "idObraSocial")]
    pub insurance_provider_id: Option<i32>,
    #[serde(rename = "sillaRueda")]
    pub wheelchair: bool,
    #[serde(rename = "activo")]
    pub active: bool,
}

/// Update patient request
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdatePatient {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: Option<String>,
    #[serde(rename = "apellido", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 7, max = 10, message = "DNI must have 7 to 10 characters"))]
    pub dni: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "invalid email address"))]
    pub email: Option<String>,
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "ciudad", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "idObraSocial", skip_serializing_if = "Option::is_none")]
    pub insurance_provider_id: Option<i32>,
    #[serde(rename = "sillaRueda", skip_serializing_if = "Option::is_none")]
    pub wheelchair: Option<bool>,
    #[serde(rename = "activo", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
