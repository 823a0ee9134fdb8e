//! List filters used by the admin listings
//!
//! Predicates compose by conjunction. A selected foreign key takes
//! precedence over free-text search on the same column.

use std::collections::HashSet;

use chrono::NaiveDate;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::models::{
    driver::Driver,
    enums::TripState,
    schedule::Schedule,
    trip::{RecurringTrip, TripOccurrence},
};

/// Lowercase, decompose and drop combining marks ("Gómez" -> "gomez")
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Accent- and case-insensitive substring match; an empty needle matches
pub fn matches_text(haystack: &str, needle: &str) -> bool {
    let needle = fold(needle.trim());
    needle.is_empty() || fold(haystack).contains(&needle)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActivityFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl ActivityFilter {
    pub fn accepts(&self, active: bool) -> bool {
        match self {
            ActivityFilter::All => true,
            ActivityFilter::Active => active,
            ActivityFilter::Inactive => !active,
        }
    }
}

impl std::str::FromStr for ActivityFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "todos" => Ok(ActivityFilter::All),
            "active" | "activos" => Ok(ActivityFilter::Active),
            "inactive" | "inactivos" => Ok(ActivityFilter::Inactive),
            _ => Err(format!("Invalid activity filter: {}", s)),
        }
    }
}

/// Column selection: nothing, a picked id, or free text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Any,
    Id(i32),
    Text(String),
}

impl Selection {
    /// Numeric input selects an id, anything else searches text
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            Selection::Any
        } else if let Ok(id) = raw.parse::<i32>() {
            Selection::Id(id)
        } else {
            Selection::Text(raw.to_string())
        }
    }

    /// `name` is only evaluated for a text selection
    pub fn accepts(&self, id: Option<i32>, name: impl FnOnce() -> String) -> bool {
        match self {
            Selection::Any => true,
            Selection::Id(selected) => id == Some(*selected),
            Selection::Text(text) => matches_text(&name(), text),
        }
    }
}

/// Admin recurring-trip listing filter
#[derive(Debug, Clone, Default)]
pub struct TripFilter {
    pub activity: ActivityFilter,
    pub patient: Selection,
    /// Selected schedule id, or driver name text
    pub schedule: Selection,
}

impl TripFilter {
    /// Names come from lookups since trips only carry ids
    pub fn apply<'a, P, D>(
        &self,
        trips: &'a [RecurringTrip],
        patient_name: P,
        driver_name: D,
    ) -> Vec<&'a RecurringTrip>
    where
        P: Fn(i32) -> String,
        D: Fn(Option<i32>) -> String,
    {
        trips
            .iter()
            .filter(|t| self.activity.accepts(t.active))
            .filter(|t| self.patient.accepts(Some(t.patient_id), || patient_name(t.patient_id)))
            .filter(|t| self.schedule.accepts(t.schedule_id, || driver_name(t.schedule_id)))
            .collect()
    }
}

/// Daily occurrences in one state (all when `None`)
pub fn filter_by_state(trips: &[TripOccurrence], state: Option<TripState>) -> Vec<&TripOccurrence> {
    trips
        .iter()
        .filter(|t| state.map_or(true, |s| t.current_state == s))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LicenseFilter {
    #[default]
    Any,
    Expired,
    Expiring,
}

/// Admin driver listing filter
#[derive(Debug, Clone, Default)]
pub struct DriverFilter {
    pub activity: ActivityFilter,
    pub license: LicenseFilter,
    /// Matched against full name and DNI
    pub text: String,
}

impl DriverFilter {
    pub fn apply<'a>(
        &self,
        drivers: &'a [Driver],
        today: NaiveDate,
        warning_days: i64,
    ) -> Vec<&'a Driver> {
        drivers
            .iter()
            .filter(|d| self.activity.accepts(d.is_active()))
            .filter(|d| match self.license {
                LicenseFilter::Any => true,
                LicenseFilter::Expired => d.license_expired(today),
                LicenseFilter::Expiring => d.license_expiring(today, warning_days),
            })
            .filter(|d| matches_text(&d.full_name(), &self.text) || matches_text(&d.dni, &self.text))
            .collect()
    }
}

/// Drivers that can receive a new schedule: active and without an active one
pub fn drivers_without_schedule<'a>(drivers: &'a [Driver], schedules: &[Schedule]) -> Vec<&'a Driver> {
    let taken: HashSet<i32> = schedules
        .iter()
        .filter(|s| s.active)
        .map(|s| s.driver_id)
        .collect();
    drivers
        .iter()
        .filter(|d| d.is_active() && !taken.contains(&d.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trip::WireTime;

    fn trip(id: i32, patient_id: i32, schedule_id: i32, active: bool) -> RecurringTrip {
        RecurringTrip {
            id,
            schedule_id: Some(schedule_id),
            patient_id,
            driver_id: None,
            origin_address: "A".into(),
            destination_address: "B".into(),
            scheduled_time: WireTime::Text("08:00".into()),
            weekdays: "1".into(),
            start_date: None,
            end_date: None,
            active,
            notes: None,
            current_state: None,
            patient_name: None,
            driver_name: None,
            patient_phone: None,
            driver_phone: None,
            wheelchair: None,
        }
    }

    fn driver(id: i32, name: &str, active: Option<bool>) -> Driver {
        Driver {
            id,
            user_id: None,
            first_name: name.into(),
            last_name: "Pérez".into(),
            dni: format!("3000000{}", id),
            phone: None,
            address: None,
            license_expiry: None,
            hired_on: None,
            active,
        }
    }

    fn patient_name(id: i32) -> String {
        match id {
            1 => "José Núñez".into(),
            _ => "María López".into(),
        }
    }

    fn driver_name(schedule_id: Option<i32>) -> String {
        match schedule_id {
            Some(10) => "Ramón Díaz".into(),
            _ => "Lucía Fernández".into(),
        }
    }

    #[test]
    fn test_fold_and_match() {
        assert_eq!(fold("Gómez ÑANDÚ"), "gomez nandu");
        assert!(matches_text("José Núñez", "nunez"));
        assert!(matches_text("Jose Nunez", "NÚÑ"));
        assert!(matches_text("anything", "  "));
        assert!(!matches_text("María", "mario"));
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!(Selection::parse(""), Selection::Any);
        assert_eq!(Selection::parse(" 12 "), Selection::Id(12));
        assert_eq!(Selection::parse("ramon"), Selection::Text("ramon".into()));
    }

    #[test]
    fn test_trip_filter_composition() {
        let trips = vec![
            trip(1, 1, 10, true),
            trip(2, 2, 10, false),
            trip(3, 1, 11, true),
            trip(4, 2, 11, true),
        ];

        let ids = |filter: &TripFilter| -> Vec<i32> {
            filter
                .apply(&trips, patient_name, driver_name)
                .iter()
                .map(|t| t.id)
                .collect()
        };

        assert_eq!(ids(&TripFilter::default()), vec![1, 2, 3, 4]);
        assert_eq!(
            ids(&TripFilter { activity: ActivityFilter::Inactive, ..Default::default() }),
            vec![2]
        );
        assert_eq!(
            ids(&TripFilter {
                patient: Selection::Text("nunez".into()),
                schedule: Selection::Text("ramon".into()),
                ..Default::default()
            }),
            vec![1]
        );
        assert_eq!(
            ids(&TripFilter {
                activity: ActivityFilter::Active,
                patient: Selection::Id(2),
                ..Default::default()
            }),
            vec![4]
        );
        assert_eq!(
            ids(&TripFilter { schedule: Selection::Id(11), ..Default::default() }),
            vec![3, 4]
        );
    }

    #[test]
    fn test_filter_by_state() {
        let occurrence = |id, state| TripOccurrence {
            trip_id: id,
            patient_id: 1,
            driver_id: None,
            patient_name: String::new(),
            driver_name: None,
            origin_address: String::new(),
            destination_address: String::new(),
            scheduled_time: WireTime::default(),
            current_state: state,
            wheelchair: false,
            patient_phone: None,
            driver_phone: None,
            can_start: false,
            can_finish: false,
            scheduled_date: None,
            notes: None,
        };
        let trips = vec![
            occurrence(1, TripState::Scheduled),
            occurrence(2, TripState::Completed),
            occurrence(3, TripState::Scheduled),
        ];

        assert_eq!(filter_by_state(&trips, None).len(), 3);
        let scheduled: Vec<i32> = filter_by_state(&trips, Some(TripState::Scheduled))
            .iter()
            .map(|t| t.trip_id)
            .collect();
        assert_eq!(scheduled, vec![1, 3]);
    }

    #[test]
    fn test_driver_filter() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut expiring = driver(2, "Lucía", Some(true));
        expiring.license_expiry = NaiveDate::from_ymd_opt(2025, 6, 10);
        let drivers = vec![driver(1, "Ramón", None), expiring, driver(3, "Raúl", Some(false))];

        let filter = DriverFilter { text: "ra".into(), ..Default::default() };
        assert_eq!(filter.apply(&drivers, today, 30).len(), 2);

        let filter = DriverFilter {
            activity: ActivityFilter::Active,
            text: "ra".into(),
            ..Default::default()
        };
        assert_eq!(filter.apply(&drivers, today, 30)[0].id, 1);

        let filter = DriverFilter { license: LicenseFilter::Expiring, ..Default::default() };
        assert_eq!(filter.apply(&drivers, today, 30)[0].id, 2);

        let filter = DriverFilter { text: "30000003".into(), ..Default::default() };
        assert_eq!(filter.apply(&drivers, today, 30)[0].id, 3);
    }

    #[test]
    fn test_drivers_without_schedule() {
        let drivers = vec![
            driver(1, "Ramón", Some(true)),
            driver(2, "Lucía", None),
            driver(3, "Raúl", Some(false)),
            driver(4, "Ana", Some(true)),
        ];
        let schedule = |id, driver_id, active| Schedule {
            id,
            driver_id,
            active,
            created_at: None,
            driver_first_name: String::new(),
            driver_last_name: String::new(),
            driver_dni: None,
        };
        let schedules = vec![schedule(10, 1, true), schedule(11, 4, false)];

        let free: Vec<i32> = drivers_without_schedule(&drivers, &schedules)
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(free, vec![2, 4]);
    }
}
