//! Administrator screens

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::{
    console::{render, ListFilter},
    error::AppResult,
    models::{enums::{Period, TripState}, history::HistoryQuery},
    services::{
        filters::{filter_by_state, matches_text, DriverFilter, TripFilter},
        stats,
    },
    Console,
};

/// Every occurrence of a day; the state filter narrows the table, not the counts
pub async fn day(
    console: &Console,
    date: Option<NaiveDate>,
    state: Option<TripState>,
) -> AppResult<String> {
    let trips = console.services.trips.admin_day(date, None).await?;
    let counts = stats::TripStateCounts::from_occurrences(&trips);
    let shown: Vec<_> = filter_by_state(&trips, state).into_iter().cloned().collect();
    Ok(render::occurrences(&shown, &counts))
}

pub async fn trips(console: &Console, filter: &TripFilter) -> AppResult<String> {
    let services = &console.services;
    let (trips, patients, schedules) = tokio::try_join!(
        services.trips.list(),
        services.patients.list(),
        services.schedules.list(),
    )?;

    let patient_names: HashMap<i32, String> =
        patients.iter().map(|p| (p.id, p.full_name())).collect();
    let driver_names: HashMap<i32, String> = schedules
        .iter()
        .map(|s| (s.id, s.driver_full_name()))
        .collect();

    let patient_name = |id: i32| {
        patient_names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("patient {}", id))
    };
    let driver_name = |schedule_id: Option<i32>| {
        schedule_id
            .and_then(|id| driver_names.get(&id).cloned())
            .unwrap_or_else(|| "-".to_string())
    };

    let shown = filter.apply(&trips, &patient_name, &driver_name);
    let counts = stats::trip_counts(&trips);
    Ok(render::recurring_trips(&shown, &counts, patient_name, driver_name))
}

pub async fn drivers(console: &Console, filter: &DriverFilter, today: NaiveDate) -> AppResult<String> {
    let warning_days = console.config.schedule.license_warning_days;
    let drivers = console.services.drivers.list().await?;
    let summary = stats::driver_summary(&drivers, today, warning_days);
    let shown = filter.apply(&drivers, today, warning_days);
    Ok(render::drivers(&shown, &summary, today, warning_days))
}

pub async fn patients(console: &Console, filter: &ListFilter) -> AppResult<String> {
    let services = &console.services;
    let (patients, providers) =
        tokio::try_join!(services.patients.list(), services.insurance.list())?;

    let provider_names: HashMap<i32, String> = providers
        .iter()
        .map(|p| (p.id, p.description.clone()))
        .collect();

    let shown: Vec<_> = patients
        .iter()
        .filter(|p| filter.activity.accepts(p.active))
        .filter(|p| matches_text(&p.full_name(), &filter.text) || matches_text(&p.dni, &filter.text))
        .collect();
    let summary = stats::patient_summary(&patients);

    Ok(render::patients(&shown, &summary, |id| {
        id.and_then(|id| provider_names.get(&id).cloned())
            .unwrap_or_else(|| "-".to_string())
    }))
}

pub async fn insurance(console: &Console, filter: &ListFilter) -> AppResult<String> {
    let providers = console.services.insurance.list().await?;
    let shown: Vec<_> = providers
        .iter()
        .filter(|p| filter.activity.accepts(p.active))
        .filter(|p| matches_text(&p.description, &filter.text))
        .collect();
    Ok(render::insurance(&shown, &stats::insurance_counts(&providers)))
}

pub async fn users(console: &Console, filter: &ListFilter) -> AppResult<String> {
    let users = console.services.users.list().await?;
    let shown: Vec<_> = users
        .iter()
        .filter(|u| filter.activity.accepts(u.active))
        .filter(|u| matches_text(&u.username, &filter.text))
        .collect();
    Ok(render::users(&shown, &stats::user_summary(&users)))
}

pub async fn schedules(console: &Console, filter: &ListFilter) -> AppResult<String> {
    let services = &console.services;
    let (schedules, assignable) =
        tokio::try_join!(services.schedules.list(), services.schedules.assignable_drivers())?;

    let shown: Vec<_> = schedules
        .iter()
        .filter(|s| filter.activity.accepts(s.active))
        .filter(|s| matches_text(&s.driver_full_name(), &filter.text))
        .collect();
    Ok(render::schedules(&shown, &stats::schedule_counts(&schedules), &assignable))
}

pub async fn history(console: &Console, query: &HistoryQuery) -> AppResult<String> {
    let page = console.services.history.list(query).await?;
    Ok(render::history(&page))
}

pub async fn dashboard(console: &Console, period: Period, today: NaiveDate) -> AppResult<String> {
    let snapshot = console.services.dashboard.snapshot(period, today).await?;
    Ok(render::dashboard(&snapshot))
}
