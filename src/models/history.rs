//! Trip history (state change log) models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};

use crate::models::{enums::TripState, trip::WireTime};

/// Filters for the history listing; `None` fields are not sent
#[derive(Debug, Clone, Default, Serialize)]
pub struct HistoryQuery {
    #[serde(rename = "fechaInicio", skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(rename = "fechaFin", skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(rename = "choferId", skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<i32>,
    #[serde(rename = "pacienteId", skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<i32>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub state: Option<TripState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// One page of history entries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryPage {
    #[serde(default)]
    pub content: Vec<TripHistoryEntry>,
    #[serde(rename = "totalElements", default)]
    pub total_elements: u64,
    #[serde(rename = "totalPages", default)]
    pub total_pages: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
}

/// A recorded state change of one trip on one day
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripHistoryEntry {
    pub id: i64,
    #[serde(rename = "trasladoId", default)]
    pub trip_id: i64,
    #[serde(rename = "fechaTraslado", default)]
    pub trip_date: String,
    #[serde(rename = "fechaHoraCambio", default)]
    pub changed_at: String,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(rename = "estado", default)]
    pub state: Option<TripState>,
    #[serde(rename = "motivo", default)]
    pub reason: Option<String>,
    #[serde(rename = "traslado", default)]
    pub trip: HistoryTrip,
}

impl TripHistoryEntry {
    pub fn patient_name(&self) -> String {
        self.trip.patient.full_name()
    }

    pub fn driver_name(&self) -> String {
        self.trip.schedule.driver.full_name()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryTrip {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "horaProgramada", default)]
    pub scheduled_time: WireTime,
    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,
    #[serde(rename = "activo", default)]
    pub active: bool,
    #[serde(rename = "diasSemana", default)]
    pub weekdays: Option<String>,
    #[serde(rename = "paciente", default)]
    pub patient: HistoryPerson,
    #[serde(rename = "agenda", default)]
    pub schedule: HistorySchedule,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistorySchedule {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "chofer", default)]
    pub driver: HistoryPerson,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryPerson {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "nombre", default)]
    pub first_name: String,
    #[serde(rename = "apellido", default)]
    pub last_name: String,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "sillaRueda", default)]
    pub wheelchair: Option<bool>,
}

impl HistoryPerson {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Per-state totals of the history for a date range
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryStatistics {
    #[serde(default)]
    pub total: u64,
    #[serde(rename = "pendientes", default)]
    pub scheduled: u64,
    #[serde(rename = "iniciados", default)]
    pub in_progress: u64,
    #[serde(rename = "finalizados", default)]
    pub completed: u64,
    #[serde(rename = "cancelados", default)]
    pub cancelled: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_history_page_deserialize() {
        let page: HistoryPage = serde_json::from_value(json!({
            "content": [{
                "id": 1,
                "trasladoId": 12,
                "fechaTraslado": "2025-05-26",
                "fechaHoraCambio": "2025-05-26T08:31:02",
                "estado": "FINALIZADO",
                "motivo": null,
                "traslado": {
                    "id": 12,
                    "horaProgramada": [8, 30],
                    "activo": true,
                    "diasSemana": "1,3,5",
                    "paciente": {"id": 40, "nombre": "Ana", "apellido": "Pérez"},
                    "agenda": {"id": 3, "chofer": {"id": 2, "nombre": "Juan", "apellido": "Gómez"}}
                }
            }, {
                "id": 2,
                "trasladoId": 13,
                "estado": ""
            }],
            "totalElements": 2,
            "totalPages": 1,
            "size": 20,
            "number": 0,
            "first": true,
            "last": true
        }))
        .unwrap();

        assert_eq!(page.content.len(), 2);
        assert_eq!(page.content[0].state, Some(TripState::Completed));
        assert_eq!(page.content[0].patient_name(), "Ana Pérez");
        assert_eq!(page.content[0].driver_name(), "Juan Gómez");
        assert_eq!(page.content[0].trip.scheduled_time.canonical().unwrap(), "08:30");
        assert_eq!(page.content[1].state, None);
    }

    #[test]
    fn test_query_serializes_only_present_filters() {
        let query = HistoryQuery {
            driver_id: Some(2),
            state: Some(TripState::Cancelled),
            ..Default::default()
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value, json!({"choferId": 2, "estado": "CANCELADO"}));
    }
}
