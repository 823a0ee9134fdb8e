//! Shared domain enums (wire values as sent by the transport service)

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TripState
// ---------------------------------------------------------------------------

/// Lifecycle state of a trip occurrence. Transitions are decided server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TripState {
    #[serde(rename = "PENDIENTE")]
    Scheduled,
    #[serde(rename = "INICIADO")]
    InProgress,
    #[serde(rename = "FINALIZADO")]
    Completed,
    #[serde(rename = "CANCELADO")]
    Cancelled,
}

impl TripState {
    pub const ALL: [TripState; 4] = [
        TripState::Scheduled,
        TripState::InProgress,
        TripState::Completed,
        TripState::Cancelled,
    ];

    /// Value used on the wire and in query strings
    pub fn as_wire(&self) -> &'static str {
        match self {
            TripState::Scheduled => "PENDIENTE",
            TripState::InProgress => "INICIADO",
            TripState::Completed => "FINALIZADO",
            TripState::Cancelled => "CANCELADO",
        }
    }
}

impl std::fmt::Display for TripState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TripState::Scheduled => "Scheduled",
            TripState::InProgress => "In progress",
            TripState::Completed => "Completed",
            TripState::Cancelled => "Cancelled",
        };
        write!(f, "{}", label)
    }
}

impl std::str::FromStr for TripState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pendiente" | "scheduled" | "pending" => Ok(TripState::Scheduled),
            "iniciado" | "in_progress" | "in-progress" | "started" => Ok(TripState::InProgress),
            "finalizado" | "completed" | "finished" => Ok(TripState::Completed),
            "cancelado" | "cancelled" | "canceled" => Ok(TripState::Cancelled),
            _ => Err(format!("Invalid trip state: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Role claim returned at login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMINISTRADOR")]
    Administrator,
    #[serde(rename = "CHOFER")]
    Driver,
}

impl Role {
    pub fn as_wire(&self) -> &'static str {
        match self {
            Role::Administrator => "ADMINISTRADOR",
            Role::Driver => "CHOFER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Administrator => write!(f, "Administrator"),
            Role::Driver => write!(f, "Driver"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "administrador" | "administrator" | "admin" => Ok(Role::Administrator),
            "chofer" | "driver" => Ok(Role::Driver),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// Period
// ---------------------------------------------------------------------------

/// Reporting period used by the dashboard aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "hoy")]
    Today,
    #[default]
    #[serde(rename = "semana")]
    Week,
    #[serde(rename = "mes")]
    Month,
    #[serde(rename = "año")]
    Year,
}

impl Period {
    pub fn as_wire(&self) -> &'static str {
        match self {
            Period::Today => "hoy",
            Period::Week => "semana",
            Period::Month => "mes",
            Period::Year => "año",
        }
    }

    /// Inclusive date range covered by the period, relative to `today`.
    /// Weeks run Monday to Sunday.
    pub fn date_range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Period::Today => (today, today),
            Period::Week => {
                let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
                (monday, monday + Duration::days(6))
            }
            Period::Month => {
                let first = today.with_day(1).unwrap_or(today);
                let next_month = if today.month() == 12 {
                    NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
                };
                let last = next_month
                    .and_then(|d| d.pred_opt())
                    .unwrap_or(today);
                (first, last)
            }
            Period::Year => {
                let first = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
                let last = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
                (first, last)
            }
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Period::Today => "Today",
            Period::Week => "This week",
            Period::Month => "This month",
            Period::Year => "This year",
        };
        write!(f, "{}", label)
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hoy" | "today" | "day" => Ok(Period::Today),
            "semana" | "week" => Ok(Period::Week),
            "mes" | "month" => Ok(Period::Month),
            "año" | "ano" | "year" => Ok(Period::Year),
            _ => Err(format!("Invalid period: {}", s)),
        }
    }
}
