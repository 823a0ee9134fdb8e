//! Driver models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A driver record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: i32,
    #[serde(rename = "idUsuario", default)]
    pub user_id: Option<i32>,
    #[serde(rename = "nombre", default)]
    pub first_name: String,
    #[serde(rename = "apellido", default)]
    pub last_name: String,
    #[serde(default)]
    pub dni: String,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    #[serde(rename = "fechaVencimientoLicencia", default)]
    pub license_expiry: Option<NaiveDate>,
    #[serde(rename = "fechaContratacion", default)]
    pub hired_on: Option<NaiveDate>,
    /// Absent on older records; treated as active
    #[serde(rename = "activo", default)]
    pub active: Option<bool>,
}

impl Driver {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    pub fn is_active(&self) -> bool {
        self.active != Some(false)
    }

    /// License already expired as of `today`
    pub fn license_expired(&self, today: NaiveDate) -> bool {
        self.license_expiry.map(|d| d < today).unwrap_or(false)
    }

    /// License expires after `today` but within `warning_days`
    pub fn license_expiring(&self, today: NaiveDate, warning_days: i64) -> bool {
        self.license_expiry
            .map(|d| {
                let remaining = (d - today).num_days();
                remaining > 0 && remaining <= warning_days
            })
            .unwrap_or(false)
    }
}

/// Create driver request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateDriver {
    #[serde(rename = "idUsuario")]
    pub user_id: i32,
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
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "fechaVencimientoLicencia")]
    pub license_expiry: NaiveDate,
    #[serde(rename = "fechaContratacion", skip_serializing_if = "Option::is_none")]
    pub hired_on: Option<NaiveDate>,
}

/// Update driver request
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateDriver {
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
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "fechaVencimientoLicencia", skip_serializing_if = "Option::is_none")]
    pub license_expiry: Option<NaiveDate>,
    #[serde(rename = "fechaContratacion", skip_serializing_if = "Option::is_none")]
    pub hired_on: Option<NaiveDate>,
    #[serde(rename = "activo", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// User account that can still be linked to a new driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableUser {
    pub id: i32,
    #[serde(rename = "usuario")]
    pub username: String,
    #[serde(rename = "rol", default)]
    pub role: Option<String>,
}

/// Per-driver statistics for a period.
///
/// The wire names are historical: `trasladosSemana` carries completed trips
/// and `trasladosMes` cancelled ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriverStatistics {
    #[serde(rename = "trasladosHoy", default)]
    pub total: i64,
    #[serde(rename = "trasladosSemana", default)]
    pub completed: i64,
    #[serde(rename = "trasladosMes", default)]
    pub cancelled: i64,
    #[serde(rename = "conSillaRuedas", default)]
    pub with_wheelchair: i64,
    #[serde(rename = "sinSillaRuedas", default)]
    pub without_wheelchair: i64,
    #[serde(rename = "trasladosPorDia", default)]
    pub per_day: Vec<DailyTripCount>,
}

impl DriverStatistics {
    /// Completed share of all trips, in percent
    pub fn success_rate(&self) -> f64 {
        percentage(self.completed, self.total)
    }

    pub fn cancellation_rate(&self) -> f64 {
        percentage(self.cancelled, self.total)
    }
}

fn percentage(part: i64, total: i64) -> f64 {
    if total <= 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyTripCount {
    #[serde(rename = "dia")]
    pub day: String,
    #[serde(rename = "cantidad", default)]
    pub count: i64,
    #[serde(default)]
    pub total: Option<i64>,
    #[serde(rename = "finalizados", default)]
    pub completed: Option<i64>,
    #[serde(rename = "cancelados", default)]
    pub cancelled: Option<i64>,
    #[serde(rename = "pendientes", default)]
    pub pending: Option<i64>,
}
