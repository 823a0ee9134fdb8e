//! Trip history on Repository

use chrono::NaiveDate;

use super::Repository;
use crate::{
    error::AppResult,
    models::history::{HistoryPage, HistoryQuery, HistoryStatistics},
};

#[derive(serde::Serialize)]
struct RangeQuery {
    #[serde(rename = "fechaInicio", skip_serializing_if = "Option::is_none")]
    from: Option<NaiveDate>,
    #[serde(rename = "fechaFin", skip_serializing_if = "Option::is_none")]
    to: Option<NaiveDate>,
}

impl Repository {
    /// One page of state changes matching `query`
    pub async fn history_list(&self, query: &HistoryQuery) -> AppResult<HistoryPage> {
        self.get_query("/historico-traslados", query).await
    }

    /// Per-state totals; the server defaults to the last month
    pub async fn history_statistics(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<HistoryStatistics> {
        self.get_query("/historico-traslados/estadisticas", &RangeQuery { from, to })
            .await
    }
}
