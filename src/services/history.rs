//! Trip history service

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::history::{HistoryPage, HistoryQuery, HistoryStatistics},
    repository::Repository,
};

/// Page size used when the caller does not pick one
pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Clone)]
pub struct HistoryService {
    repository: Repository,
}

impl HistoryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &HistoryQuery) -> AppResult<HistoryPage> {
        check_range(query.from, query.to)?;
        let mut query = query.clone();
        query.page.get_or_insert(0);
        query.size.get_or_insert(DEFAULT_PAGE_SIZE);
        self.repository.history_list(&query).await
    }

    pub async fn statistics(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<HistoryStatistics> {
        check_range(from, to)?;
        self.repository.history_statistics(from, to).await
    }
}

fn check_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> AppResult<()> {
    match (from, to) {
        (Some(from), Some(to)) if to < from => Err(AppError::Validation(format!(
            "date range ends ({}) before it starts ({})",
            to, from
        ))),
        _ => Ok(()),
    }
}
