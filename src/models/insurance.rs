//! Insurance provider (obra social) models

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceProvider {
    pub id: i32,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "activo", default)]
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateInsuranceProvider {
    #[serde(rename = "descripcion")]
    #[validate(length(min = 3, message = "description must have at least 3 characters"))]
    pub description: String,
    #[serde(rename = "activo")]
    pub active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateInsuranceProvider {
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, message = "description must have at least 3 characters"))]
    pub description: Option<String>,
    #[serde(rename = "activo", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
