//! Driver schedule (agenda) models

use serde::{Deserialize, Serialize};

/// A driver's schedule: the container their recurring trips hang from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: i32,
    #[serde(rename = "idChofer")]
    pub driver_id: i32,
    #[serde(rename = "activo", default)]
    pub active: bool,
    #[serde(rename = "fechaCreacion", default)]
    pub created_at: Option<String>,
    #[serde(rename = "nombreChofer", default)]
    pub driver_first_name: String,
    #[serde(rename = "apellidoChofer", default)]
    pub driver_last_name: String,
    #[serde(rename = "dniChofer", default)]
    pub driver_dni: Option<String>,
}

impl Schedule {
    pub fn driver_full_name(&self) -> String {
        format!("{} {}", self.driver_first_name, self.driver_last_name)
            .trim()
            .to_string()
    }
}

/// Create schedule request
#[derive(Debug, Clone, Serialize)]
pub struct CreateSchedule {
    #[serde(rename = "idChofer")]
    pub driver_id: i32,
}
