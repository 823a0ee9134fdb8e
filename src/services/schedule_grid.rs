//! Weekly grid: the time × weekday pivot of a driver's recurring trips.
//!
//! Rows are keyed by canonical `HH:MM` time and hold seven cells, Monday
//! first. Two trips landing on the same cell keep input order
//! (the later one wins) and the collision is recorded.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::trip::RecurringTrip,
};

/// Column labels, Monday first
pub const WEEKDAY_LABELS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Time key used in lenient mode when a trip's time is neither decodable
/// nor a non-blank string
pub const SENTINEL_TIME: &str = "00:00";

/// How the builder treats malformed trip data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Raw text or sentinel time, drop bad weekday tokens, log a warning
    #[default]
    Lenient,
    /// First malformed field fails the whole build
    Strict,
}

impl std::str::FromStr for DecodePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(DecodePolicy::Lenient),
            "strict" => Ok(DecodePolicy::Strict),
            _ => Err(format!("Invalid decode policy: {}", s)),
        }
    }
}

/// Two trips claiming the same cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub time: String,
    /// 1 = Monday ... 7 = Sunday
    pub weekday: u8,
    pub displaced_id: i32,
    pub winner_id: i32,
}

pub type GridRow = [Option<RecurringTrip>; 7];

#[derive(Debug, Clone, Default)]
pub struct WeeklyGrid {
    rows: BTreeMap<String, GridRow>,
    collisions: Vec<Collision>,
}

impl WeeklyGrid {
    /// Pivot `trips` into the grid.
    ///
    /// In lenient mode this never fails; in strict mode the first trip with an
    /// undecodable time or weekday list (or no weekday at all) is an error.
    pub fn build(trips: &[RecurringTrip], policy: DecodePolicy) -> AppResult<Self> {
        let mut grid = WeeklyGrid::default();

        for trip in trips {
            let time = match trip.scheduled_time.canonical() {
                Ok(time) => time,
                Err(e) if policy == DecodePolicy::Strict => {
                    return Err(AppError::Decode(format!("trip {}: {}", trip.id, e)))
                }
                Err(e) => {
                    let key = trip.scheduled_time.lenient_key(SENTINEL_TIME);
                    tracing::warn!(trip_id = trip.id, "Undecodable time, keyed as {:?}: {}", key, e);
                    key
                }
            };

            let decoded = trip.weekday_decode();
            if !decoded.rejected.is_empty() {
                if policy == DecodePolicy::Strict {
                    return Err(AppError::Decode(format!(
                        "trip {}: invalid weekday token(s) {:?}",
                        trip.id, decoded.rejected
                    )));
                }
                tracing::warn!(trip_id = trip.id, rejected = ?decoded.rejected, "Ignoring weekday tokens");
            }
            if decoded.days.is_empty() && policy == DecodePolicy::Strict {
                return Err(AppError::Decode(format!("trip {}: no weekdays", trip.id)));
            }

            let row = grid.rows.entry(time.clone()).or_default();
            for day in decoded.days.iter() {
                let cell = &mut row[usize::from(day - 1)];
                if let Some(previous) = cell.replace(trip.clone()) {
                    tracing::warn!(
                        time = %time,
                        weekday = day,
                        displaced = previous.id,
                        winner = trip.id,
                        "Schedule collision"
                    );
                    grid.collisions.push(Collision {
                        time: time.clone(),
                        weekday: day,
                        displaced_id: previous.id,
                        winner_id: trip.id,
                    });
                }
            }
        }

        // A trip with no usable weekday leaves an empty row behind
        grid.rows.retain(|_, row| row.iter().any(Option::is_some));

        tracing::debug!(
            trips = trips.len(),
            rows = grid.rows.len(),
            collisions = grid.collisions.len(),
            "Weekly grid built"
        );
        Ok(grid)
    }

    /// Rows in ascending time order
    pub fn rows(&self) -> impl Iterator<Item = (&str, &GridRow)> {
        self.rows.iter().map(|(time, row)| (time.as_str(), row))
    }

    pub fn row(&self, time: &str) -> Option<&GridRow> {
        self.rows.get(time)
    }

    /// Occupant of one cell; `weekday` is 1..=7
    pub fn cell(&self, time: &str, weekday: u8) -> Option<&RecurringTrip> {
        if !(1..=7).contains(&weekday) {
            return None;
        }
        self.rows
            .get(time)
            .and_then(|row| row[usize::from(weekday - 1)].as_ref())
    }

    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    pub fn is_collided(&self, time: &str, weekday: u8) -> bool {
        self.collisions
            .iter()
            .any(|c| c.weekday == weekday && c.time == time)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of occupied cells
    pub fn occupied(&self) -> usize {
        self.rows
            .values()
            .map(|row| row.iter().filter(|c| c.is_some()).count())
            .sum()
    }

    /// Every occupied cell of one weekday, ascending by time
    pub fn trips_for_weekday(&self, weekday: u8) -> Vec<(&str, &RecurringTrip)> {
        if !(1..=7).contains(&weekday) {
            return Vec::new();
        }
        let index = usize::from(weekday - 1);
        self.rows
            .iter()
            .filter_map(|(time, row)| row[index].as_ref().map(|trip| (time.as_str(), trip)))
            .collect()
    }
}
