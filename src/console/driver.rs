//! Driver screens: weekly agenda, daily trips and state transitions

use chrono::NaiveDate;

use crate::{
    console::render,
    error::AppResult,
    models::trip::TransitionAck,
    services::stats::TripStateCounts,
    Console,
};

/// Explicit driver id, or the logged-in driver's own record
async fn resolve_driver(console: &Console, driver_id: Option<i32>) -> AppResult<i32> {
    match driver_id {
        Some(id) => Ok(id),
        None => Ok(console.services.auth.current_driver().await?.id),
    }
}

pub async fn agenda(console: &Console, driver_id: Option<i32>) -> AppResult<String> {
    let driver_id = resolve_driver(console, driver_id).await?;
    let grid = console.services.trips.weekly_grid(Some(driver_id)).await?;
    Ok(render::weekly_grid(&grid))
}

pub async fn agenda_day(console: &Console, weekday: u8, driver_id: Option<i32>) -> AppResult<String> {
    let driver_id = resolve_driver(console, driver_id).await?;
    let grid = console.services.trips.weekly_grid(Some(driver_id)).await?;
    Ok(render::weekday(&grid, weekday))
}

pub async fn my_trips(console: &Console, date: Option<NaiveDate>) -> AppResult<String> {
    let driver = console.services.auth.current_driver().await?;
    let trips = console.services.trips.driver_day(driver.id, date).await?;
    let counts = TripStateCounts::from_occurrences(&trips);
    Ok(render::occurrences(&trips, &counts))
}

fn acknowledge(ack: TransitionAck, fallback: String) -> String {
    ack.message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(fallback)
}

pub async fn start(console: &Console, trip_id: i32) -> AppResult<String> {
    let ack = console.services.trips.start(trip_id).await?;
    Ok(acknowledge(ack, format!("Trip #{} started", trip_id)))
}

pub async fn finish(console: &Console, trip_id: i32) -> AppResult<String> {
    let ack = console.services.trips.finish(trip_id).await?;
    Ok(acknowledge(ack, format!("Trip #{} finished", trip_id)))
}

pub async fn cancel(console: &Console, trip_id: i32, reason: &str) -> AppResult<String> {
    let ack = console.services.trips.cancel(trip_id, reason).await?;
    Ok(acknowledge(ack, format!("Trip #{} cancelled", trip_id)))
}

pub async fn travel_time(console: &Console, trip_id: i32) -> AppResult<String> {
    let estimate = console.services.trips.travel_estimate(trip_id).await?;
    Ok(render::travel_estimate(trip_id, &estimate))
}
