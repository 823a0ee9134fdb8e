//! Admin dashboard aggregates computed by the remote service

use serde::{Deserialize, Serialize};

/// System-wide totals for a period
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalStatistics {
    #[serde(rename = "totalChoferes", default)]
    pub total_drivers: u64,
    #[serde(rename = "choferesActivos", default)]
    pub active_drivers: u64,
    #[serde(rename = "totalPacientes", default)]
    pub total_patients: u64,
    #[serde(rename = "pacientesActivos", default)]
    pub active_patients: u64,
    #[serde(rename = "totalObrasSociales", default)]
    pub total_insurance_providers: u64,
    #[serde(rename = "obrasSocialesActivas", default)]
    pub active_insurance_providers: u64,
    #[serde(rename = "trasladosHoy", default)]
    pub trips_today: u64,
    #[serde(rename = "trasladosFinalizados", default)]
    pub trips_completed: u64,
    #[serde(rename = "periodo", default)]
    pub period: String,
    #[serde(rename = "fechaInicio", default)]
    pub from: Option<String>,
    #[serde(rename = "fechaFin", default)]
    pub to: Option<String>,
}

/// Trips per driver for a period
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriverTripsReport {
    #[serde(rename = "estadisticasChoferes", default)]
    pub drivers: Vec<DriverTripSummary>,
    #[serde(rename = "periodo", default)]
    pub period: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriverTripSummary {
    #[serde(rename = "idChofer")]
    pub driver_id: i32,
    #[serde(rename = "nombreCompleto", default)]
    pub full_name: String,
    #[serde(rename = "finalizados", default)]
    pub completed: u64,
    #[serde(rename = "cancelados", default)]
    pub cancelled: u64,
    #[serde(rename = "conSilla", default)]
    pub with_wheelchair: u64,
    #[serde(rename = "sinSilla", default)]
    pub without_wheelchair: u64,
}
