//! Trips domain methods on Repository (recurring trips, daily occurrences,
//! state transitions)

use chrono::NaiveDate;

use super::Repository;
use crate::{
    error::AppResult,
    models::{
        enums::TripState,
        trip::{
            CreateRecurringTrip, RecurringTrip, TransitionAck, TransitionRequest, TravelEstimate,
            TripOccurrence, UpdateRecurringTrip, WeeklyAgenda,
        },
    },
};

/// `?fecha=` query, omitted when no date is given (server uses today)
#[derive(serde::Serialize)]
struct DayQuery {
    #[serde(rename = "fecha", skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDate>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    state: Option<TripState>,
}

impl Repository {
    // ---- Recurring trips ----

    pub async fn trips_list(&self) -> AppResult<Vec<RecurringTrip>> {
        self.get("/traslados").await
    }

    /// Only trips whose active flag is set
    pub async fn trips_list_active(&self) -> AppResult<Vec<RecurringTrip>> {
        self.get("/traslados/activos").await
    }

    pub async fn trips_get(&self, id: i32) -> AppResult<RecurringTrip> {
        self.get(&format!("/traslados/{}", id)).await
    }

    pub async fn trips_by_schedule(&self, schedule_id: i32) -> AppResult<Vec<RecurringTrip>> {
        self.get(&format!("/traslados/by-agenda/{}", schedule_id)).await
    }

    pub async fn trips_by_patient(&self, patient_id: i32) -> AppResult<Vec<RecurringTrip>> {
        self.get(&format!("/traslados/by-paciente/{}", patient_id)).await
    }

    pub async fn trips_create(&self, data: &CreateRecurringTrip) -> AppResult<RecurringTrip> {
        self.post("/traslados", data).await
    }

    pub async fn trips_update(&self, id: i32, data: &UpdateRecurringTrip) -> AppResult<RecurringTrip> {
        self.put(&format!("/traslados/{}", id), data).await
    }

    /// Soft delete (clears the active flag server-side)
    pub async fn trips_delete(&self, id: i32) -> AppResult<()> {
        self.delete(&format!("/traslados/{}", id)).await
    }

    /// Current week's recurring trips of one driver
    pub async fn trips_driver_week(&self, driver_id: i32) -> AppResult<WeeklyAgenda> {
        self.get(&format!("/traslados/chofer/{}/semana", driver_id)).await
    }

    // ---- Daily occurrences ----

    pub async fn trips_driver_day(
        &self,
        driver_id: i32,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<TripOccurrence>> {
        let query = DayQuery { date, state: None };
        self.get_query(&format!("/traslados/chofer/{}/dia", driver_id), &query)
            .await
    }

    /// Every occurrence of a day, optionally narrowed to one state
    pub async fn trips_admin_day(
        &self,
        date: Option<NaiveDate>,
        state: Option<TripState>,
    ) -> AppResult<Vec<TripOccurrence>> {
        self.get_query("/traslados/admin/dia", &DayQuery { date, state })
            .await
    }

    pub async fn trips_state(&self, id: i32, date: Option<NaiveDate>) -> AppResult<TripState> {
        let query = DayQuery { date, state: None };
        self.get_query(&format!("/traslados/{}/estado", id), &query).await
    }

    // ---- State transitions ----

    pub async fn trips_start(&self, id: i32, request: &TransitionRequest) -> AppResult<TransitionAck> {
        self.post(&format!("/traslados/{}/iniciar", id), request).await
    }

    pub async fn trips_finish(&self, id: i32, request: &TransitionRequest) -> AppResult<TransitionAck> {
        self.post(&format!("/traslados/{}/finalizar", id), request).await
    }

    pub async fn trips_cancel(&self, id: i32, request: &TransitionRequest) -> AppResult<TransitionAck> {
        self.post(&format!("/traslados/{}/cancelar", id), request).await
    }

    /// Live travel time between the trip's origin and destination
    pub async fn trips_travel_estimate(&self, id: i32) -> AppResult<TravelEstimate> {
        self.post(&format!("/traslados/{}/calcular-tiempo", id), &serde_json::json!({}))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_query_omits_missing_values() {
        let empty = DayQuery { date: None, state: None };
        assert_eq!(serde_json::to_value(&empty).unwrap(), serde_json::json!({}));

        let full = DayQuery {
            date: NaiveDate::from_ymd_opt(2025, 6, 2),
            state: Some(TripState::InProgress),
        };
        assert_eq!(
            serde_json::to_value(&full).unwrap(),
            serde_json::json!({"fecha": "2025-06-02", "estado": "INICIADO"})
        );
    }
}
