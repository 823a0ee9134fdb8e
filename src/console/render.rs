//! Plain-text rendering of console output

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::{
    models::{
        driver::{AvailableUser, Driver, DriverStatistics},
        enums::Period,
        history::HistoryPage,
        insurance::InsuranceProvider,
        patient::Patient,
        schedule::Schedule,
        trip::{RecurringTrip, TravelEstimate, TripOccurrence},
        user::{Session, User},
    },
    services::{
        dashboard::DashboardSnapshot,
        schedule_grid::{WeeklyGrid, SENTINEL_TIME, WEEKDAY_LABELS},
        stats::{ActiveCounts, DriverSummary, PatientSummary, TripStateCounts, UserSummary},
    },
};

/// Column-aligned text table
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) -> &mut Self {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let columns = self.headers.len();
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(columns) {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let line = |cells: &[String]| -> String {
            let padded: Vec<String> = (0..columns)
                .map(|i| {
                    let cell = cells.get(i).map(String::as_str).unwrap_or("");
                    let pad = widths[i].saturating_sub(cell.chars().count());
                    format!("{}{}", cell, " ".repeat(pad))
                })
                .collect();
            padded.join("  ").trim_end().to_string()
        };

        let mut out = line(&self.headers);
        out.push('\n');
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&rule.join("  "));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&line(row));
        }
        out
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn active_label(active: bool) -> &'static str {
    if active {
        "active"
    } else {
        "inactive"
    }
}

fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

fn date_or_dash(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

fn time_of(trip_time: &crate::models::trip::WireTime) -> String {
    trip_time.lenient_key(SENTINEL_TIME)
}

fn active_line(label: &str, counts: &ActiveCounts) -> String {
    format!(
        "{}: {} total, {} active, {} inactive",
        label, counts.total, counts.active, counts.inactive
    )
}

fn trip_cell(trip: &RecurringTrip) -> String {
    match trip.patient_name.as_deref() {
        Some(name) if !name.is_empty() => format!("#{} {}", trip.id, name),
        _ => format!("#{} patient {}", trip.id, trip.patient_id),
    }
}

/// Time of a recurring trip as the grid keys it
pub fn trip_time(trip: &RecurringTrip) -> String {
    time_of(&trip.scheduled_time)
}

pub fn session(session: &Session) -> String {
    format!("{} ({}), user id {}", session.username, session.role, session.id)
}

/// Weekly grid; collided cells carry a `!`
pub fn weekly_grid(grid: &WeeklyGrid) -> String {
    if grid.is_empty() {
        return "No recurring trips this week".to_string();
    }

    let mut table = Table::new(std::iter::once("Time").chain(WEEKDAY_LABELS.iter().copied()));
    for (time, row) in grid.rows() {
        let mut cells = vec![time.to_string()];
        for (index, slot) in row.iter().enumerate() {
            let weekday = index as u8 + 1;
            let mut cell = slot.as_ref().map(trip_cell).unwrap_or_default();
            if grid.is_collided(time, weekday) {
                cell.push_str(" !");
            }
            cells.push(cell);
        }
        table.row(cells);
    }

    let mut out = table.render();
    if !grid.collisions().is_empty() {
        out.push_str("\n\n! Collisions (later trip shown):");
        for c in grid.collisions() {
            let _ = write!(
                out,
                "\n  {} {}: trip #{} hides trip #{}",
                WEEKDAY_LABELS[usize::from(c.weekday - 1)],
                c.time,
                c.winner_id,
                c.displaced_id
            );
        }
    }
    out
}

/// One weekday of the grid as a list
pub fn weekday(grid: &WeeklyGrid, weekday: u8) -> String {
    let label = WEEKDAY_LABELS
        .get(usize::from(weekday.saturating_sub(1)))
        .copied()
        .unwrap_or("?");
    let entries = grid.trips_for_weekday(weekday);
    if entries.is_empty() {
        return format!("{}: no trips", label);
    }

    let mut table = Table::new(["Time", "Trip", "Patient", "From", "To"]);
    for (time, trip) in entries {
        let mut time = time.to_string();
        if grid.is_collided(&time, weekday) {
            time.push_str(" !");
        }
        table.row([
            time,
            format!("#{}", trip.id),
            or_dash(trip.patient_name.as_deref()),
            trip.origin_address.clone(),
            trip.destination_address.clone(),
        ]);
    }
    format!("{}\n{}", label, table.render())
}

pub fn state_counts(counts: &TripStateCounts) -> String {
    let parts: Vec<String> = counts
        .iter()
        .map(|(state, count)| format!("{} {}", state, count))
        .collect();
    format!("{} trips: {}", counts.total(), parts.join(", "))
}

pub fn occurrences(trips: &[TripOccurrence], counts: &TripStateCounts) -> String {
    if trips.is_empty() {
        return "No trips for this day".to_string();
    }

    let mut table = Table::new([
        "Time", "Trip", "Patient", "Driver", "From", "To", "State", "Chair", "Actions",
    ]);
    for trip in trips {
        let mut actions = Vec::new();
        if trip.can_start {
            actions.push("start");
        }
        if trip.can_finish {
            actions.push("finish");
        }
        table.row([
            time_of(&trip.scheduled_time),
            format!("#{}", trip.trip_id),
            trip.patient_name.clone(),
            or_dash(trip.driver_name.as_deref()),
            trip.origin_address.clone(),
            trip.destination_address.clone(),
            trip.current_state.to_string(),
            yes_no(trip.wheelchair).to_string(),
            actions.join(","),
        ]);
    }
    format!("{}\n\n{}", table.render(), state_counts(counts))
}

pub fn recurring_trips<P, D>(
    trips: &[&RecurringTrip],
    counts: &ActiveCounts,
    patient_name: P,
    driver_name: D,
) -> String
where
    P: Fn(i32) -> String,
    D: Fn(Option<i32>) -> String,
{
    let mut table = Table::new(["Trip", "Time", "Days", "Patient", "Driver", "From", "To", "Status"]);
    for trip in trips {
        table.row([
            format!("#{}", trip.id),
            time_of(&trip.scheduled_time),
            trip.weekday_decode().days.to_string(),
            patient_name(trip.patient_id),
            driver_name(trip.schedule_id),
            trip.origin_address.clone(),
            trip.destination_address.clone(),
            active_label(trip.active).to_string(),
        ]);
    }
    format!("{}\n\n{}", table.render(), active_line("Trips", counts))
}

pub fn drivers(drivers: &[&Driver], summary: &DriverSummary, today: NaiveDate, warning_days: i64) -> String {
    let mut table = Table::new(["ID", "Name", "DNI", "Phone", "License", "Status"]);
    for driver in drivers {
        let mut license = date_or_dash(driver.license_expiry);
        if driver.license_expired(today) {
            license.push_str(" (expired)");
        } else if driver.license_expiring(today, warning_days) {
            license.push_str(" (expiring)");
        }
        table.row([
            driver.id.to_string(),
            driver.full_name(),
            driver.dni.clone(),
            or_dash(driver.phone.as_deref()),
            license,
            active_label(driver.is_active()).to_string(),
        ]);
    }
    format!(
        "{}\n\n{}; licenses expired {}, expiring {}",
        table.render(),
        active_line("Drivers", &summary.counts),
        summary.license_expired,
        summary.license_expiring
    )
}

pub fn patients<I>(patients: &[&Patient], summary: &PatientSummary, insurance_name: I) -> String
where
    I: Fn(Option<i32>) -> String,
{
    let mut table = Table::new(["ID", "Name", "DNI", "Phone", "Insurance", "Chair", "Status"]);
    for patient in patients {
        table.row([
            patient.id.to_string(),
            patient.full_name(),
            patient.dni.clone(),
            or_dash(patient.phone.as_deref()),
            insurance_name(patient.insurance_provider_id),
            yes_no(patient.wheelchair).to_string(),
            active_label(patient.active).to_string(),
        ]);
    }
    format!(
        "{}\n\n{}; wheelchair {}, with insurance {}",
        table.render(),
        active_line("Patients", &summary.counts),
        summary.wheelchair,
        summary.with_insurance
    )
}

pub fn insurance(providers: &[&InsuranceProvider], counts: &ActiveCounts) -> String {
    let mut table = Table::new(["ID", "Description", "Status"]);
    for provider in providers {
        table.row([
            provider.id.to_string(),
            provider.description.clone(),
            active_label(provider.active).to_string(),
        ]);
    }
    format!("{}\n\n{}", table.render(), active_line("Insurance providers", counts))
}

pub fn users(users: &[&User], summary: &UserSummary) -> String {
    let mut table = Table::new(["ID", "Username", "Role", "Status", "Created"]);
    for user in users {
        table.row([
            user.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            user.username.clone(),
            user.role.to_string(),
            active_label(user.active).to_string(),
            or_dash(user.created_at.as_deref()),
        ]);
    }
    format!(
        "{}\n\n{}; administrators {}, drivers {}",
        table.render(),
        active_line("Users", &summary.counts),
        summary.administrators,
        summary.drivers
    )
}

pub fn schedules(schedules: &[&Schedule], counts: &ActiveCounts, assignable: &[Driver]) -> String {
    let mut table = Table::new(["ID", "Driver", "DNI", "Created", "Status"]);
    for schedule in schedules {
        table.row([
            schedule.id.to_string(),
            schedule.driver_full_name(),
            or_dash(schedule.driver_dni.as_deref()),
            or_dash(schedule.created_at.as_deref()),
            active_label(schedule.active).to_string(),
        ]);
    }
    let free: Vec<String> = assignable
        .iter()
        .map(|d| format!("#{} {}", d.id, d.full_name()))
        .collect();
    format!(
        "{}\n\n{}\nDrivers without schedule: {}",
        table.render(),
        active_line("Schedules", counts),
        if free.is_empty() { "none".to_string() } else { free.join(", ") }
    )
}

pub fn history(page: &HistoryPage) -> String {
    let mut table = Table::new(["Changed at", "Date", "Trip", "Patient", "Driver", "State", "Reason"]);
    for entry in &page.content {
        table.row([
            entry.changed_at.clone(),
            entry.trip_date.clone(),
            format!("#{}", entry.trip_id),
            entry.patient_name(),
            entry.driver_name(),
            entry
                .state
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            or_dash(entry.reason.as_deref()),
        ]);
    }
    format!(
        "{}\n\nPage {} of {} ({} entries)",
        table.render(),
        page.number + 1,
        page.total_pages.max(1),
        page.total_elements
    )
}

pub fn dashboard(snapshot: &DashboardSnapshot) -> String {
    let g = &snapshot.global;
    let mut out = format!(
        "{} ({} to {})\n\
         Drivers: {} ({} active)\n\
         Patients: {} ({} active)\n\
         Insurance providers: {} ({} active)\n\
         Trips today: {}, completed: {}\n",
        snapshot.period,
        snapshot.from,
        snapshot.to,
        g.total_drivers,
        g.active_drivers,
        g.total_patients,
        g.active_patients,
        g.total_insurance_providers,
        g.active_insurance_providers,
        g.trips_today,
        g.trips_completed,
    );

    let mut table = Table::new(["Driver", "Completed", "Cancelled", "Chair", "No chair"]);
    for d in &snapshot.by_driver.drivers {
        table.row([
            d.full_name.clone(),
            d.completed.to_string(),
            d.cancelled.to_string(),
            d.with_wheelchair.to_string(),
            d.without_wheelchair.to_string(),
        ]);
    }
    if table.is_empty() {
        out.push_str("\nNo trips per driver for this period");
    } else {
        out.push('\n');
        out.push_str(&table.render());
    }
    out
}

pub fn available_users(users: &[AvailableUser]) -> String {
    if users.is_empty() {
        return "No user accounts are free to link to a new driver".to_string();
    }
    let mut table = Table::new(["ID", "Username", "Role"]);
    for user in users {
        table.row([user.id.to_string(), user.username.clone(), or_dash(user.role.as_deref())]);
    }
    table.render()
}

pub fn driver_statistics(driver_id: i32, period: Period, stats: &DriverStatistics) -> String {
    let mut out = format!(
        "Driver #{}, {}\n\
         Trips: {}, completed: {} ({:.1}%), cancelled: {} ({:.1}%)\n\
         With wheelchair: {}, without: {}",
        driver_id,
        period,
        stats.total,
        stats.completed,
        stats.success_rate(),
        stats.cancelled,
        stats.cancellation_rate(),
        stats.with_wheelchair,
        stats.without_wheelchair,
    );

    let mut table = Table::new(["Day", "Trips"]);
    for day in &stats.per_day {
        table.row([day.day.clone(), day.total.unwrap_or(day.count).to_string()]);
    }
    if !table.is_empty() {
        out.push_str("\n\n");
        out.push_str(&table.render());
    }
    out
}

pub fn travel_estimate(trip_id: i32, estimate: &TravelEstimate) -> String {
    format!(
        "Trip #{}: {} ({}), traffic {}, updated {}",
        trip_id,
        or_dash(estimate.duration_text.as_deref().or(estimate.duration.as_deref())),
        or_dash(estimate.distance_text.as_deref().or(estimate.distance.as_deref())),
        or_dash(estimate.traffic.as_deref()),
        or_dash(estimate.updated_at.as_deref()),
    )
}
