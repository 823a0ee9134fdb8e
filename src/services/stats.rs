//! Statistics derived from already-fetched lists
//!
//! Everything here is a one-pass count over an in-memory slice, recomputed
//! on every call. Categories are mutually exclusive, so each summary's
//! buckets add up to its `total`.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{
    driver::Driver,
    enums::{Role, TripState},
    insurance::InsuranceProvider,
    patient::Patient,
    schedule::Schedule,
    trip::{RecurringTrip, TripOccurrence},
    user::User,
};

/// Count items per key in one pass
pub fn count_by<T, K, F>(items: &[T], key: F) -> BTreeMap<K, usize>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(key(item)).or_insert(0) += 1;
    }
    counts
}

/// Active / inactive split of a soft-deletable list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveCounts {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

impl ActiveCounts {
    pub fn from_items<T>(items: &[T], is_active: impl Fn(&T) -> bool) -> Self {
        let active = items.iter().filter(|i| is_active(i)).count();
        Self {
            total: items.len(),
            active,
            inactive: items.len() - active,
        }
    }
}

/// Occurrences per lifecycle state; every state is always present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TripStateCounts {
    pub scheduled: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl TripStateCounts {
    pub fn from_states(states: impl IntoIterator<Item = TripState>) -> Self {
        let mut counts = Self::default();
        for state in states {
            *counts.slot(state) += 1;
        }
        counts
    }

    pub fn from_occurrences(trips: &[TripOccurrence]) -> Self {
        Self::from_states(trips.iter().map(|t| t.current_state))
    }

    fn slot(&mut self, state: TripState) -> &mut usize {
        match state {
            TripState::Scheduled => &mut self.scheduled,
            TripState::InProgress => &mut self.in_progress,
            TripState::Completed => &mut self.completed,
            TripState::Cancelled => &mut self.cancelled,
        }
    }

    pub fn get(&self, state: TripState) -> usize {
        match state {
            TripState::Scheduled => self.scheduled,
            TripState::InProgress => self.in_progress,
            TripState::Completed => self.completed,
            TripState::Cancelled => self.cancelled,
        }
    }

    pub fn total(&self) -> usize {
        self.scheduled + self.in_progress + self.completed + self.cancelled
    }

    /// `(state, count)` in lifecycle order
    pub fn iter(&self) -> impl Iterator<Item = (TripState, usize)> + '_ {
        TripState::ALL.iter().map(move |s| (*s, self.get(*s)))
    }
}

pub fn schedule_counts(schedules: &[Schedule]) -> ActiveCounts {
    ActiveCounts::from_items(schedules, |s| s.active)
}

pub fn insurance_counts(providers: &[InsuranceProvider]) -> ActiveCounts {
    ActiveCounts::from_items(providers, |p| p.active)
}

pub fn trip_counts(trips: &[RecurringTrip]) -> ActiveCounts {
    ActiveCounts::from_items(trips, |t| t.active)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatientSummary {
    pub counts: ActiveCounts,
    pub wheelchair: usize,
    pub with_insurance: usize,
}

pub fn patient_summary(patients: &[Patient]) -> PatientSummary {
    PatientSummary {
        counts: ActiveCounts::from_items(patients, |p| p.active),
        wheelchair: patients.iter().filter(|p| p.wheelchair).count(),
        with_insurance: patients
            .iter()
            .filter(|p| p.insurance_provider_id.is_some())
            .count(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserSummary {
    pub counts: ActiveCounts,
    pub administrators: usize,
    pub drivers: usize,
}

pub fn user_summary(users: &[User]) -> UserSummary {
    let roles = count_by(users, |u| u.role == Role::Administrator);
    UserSummary {
        counts: ActiveCounts::from_items(users, |u| u.active),
        administrators: roles.get(&true).copied().unwrap_or(0),
        drivers: roles.get(&false).copied().unwrap_or(0),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverSummary {
    pub counts: ActiveCounts,
    pub license_expired: usize,
    pub license_expiring: usize,
}

/// Driver totals; license windows are evaluated against `today`
pub fn driver_summary(drivers: &[Driver], today: NaiveDate, warning_days: i64) -> DriverSummary {
    DriverSummary {
        counts: ActiveCounts::from_items(drivers, Driver::is_active),
        license_expired: drivers.iter().filter(|d| d.license_expired(today)).count(),
        license_expiring: drivers
            .iter()
            .filter(|d| d.license_expiring(today, warning_days))
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trip::WireTime;

    fn occurrence(id: i32, state: TripState) -> TripOccurrence {
        TripOccurrence {
            trip_id: id,
            patient_id: 1,
            driver_id: Some(1),
            patient_name: "Ana Pérez".into(),
            driver_name: None,
            origin_address: "A".into(),
            destination_address: "B".into(),
            scheduled_time: WireTime::Text("08:00".into()),
            current_state: state,
            wheelchair: false,
            patient_phone: None,
            driver_phone: None,
            can_start: false,
            can_finish: false,
            scheduled_date: None,
            notes: None,
        }
    }

    fn driver(id: i32, active: Option<bool>, expiry: Option<NaiveDate>) -> Driver {
        Driver {
            id,
            user_id: None,
            first_name: "Juan".into(),
            last_name: "Gómez".into(),
            dni: "30111222".into(),
            phone: None,
            address: None,
            license_expiry: expiry,
            hired_on: None,
            active,
        }
    }

    #[test]
    fn test_count_by() {
        let words = ["a", "bb", "cc", "ddd"];
        let counts = count_by(&words, |w| w.len());
        assert_eq!(counts.get(&1), Some(&1));
        assert_eq!(counts.get(&2), Some(&2));
        assert_eq!(counts.values().sum::<usize>(), words.len());
    }

    #[test]
    fn test_state_counts_cover_every_state() {
        let trips = vec![
            occurrence(1, TripState::Scheduled),
            occurrence(2, TripState::Scheduled),
            occurrence(3, TripState::Completed),
            occurrence(4, TripState::Cancelled),
        ];
        let counts = TripStateCounts::from_occurrences(&trips);

        assert_eq!(counts.scheduled, 2);
        assert_eq!(counts.in_progress, 0);
        assert_eq!(counts.total(), trips.len());
        assert_eq!(counts.iter().count(), 4);
        assert_eq!(TripStateCounts::from_occurrences(&[]).total(), 0);
    }

    #[test]
    fn test_counts_sum_to_total() {
        for size in 0..20usize {
            let flags: Vec<bool> = (0..size).map(|i| i % 3 == 0).collect();
            let counts = ActiveCounts::from_items(&flags, |f| *f);
            assert_eq!(counts.active + counts.inactive, counts.total);
            assert_eq!(counts.total, size);

            let states: Vec<TripState> = (0..size).map(|i| TripState::ALL[i % 4]).collect();
            assert_eq!(TripStateCounts::from_states(states).total(), size);
        }
    }

    #[test]
    fn test_driver_summary() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let drivers = vec![
            driver(1, None, NaiveDate::from_ymd_opt(2025, 5, 1)),
            driver(2, Some(true), NaiveDate::from_ymd_opt(2025, 6, 15)),
            driver(3, Some(false), NaiveDate::from_ymd_opt(2026, 1, 1)),
            driver(4, Some(true), None),
        ];
        let summary = driver_summary(&drivers, today, 30);

        assert_eq!(summary.counts, ActiveCounts { total: 4, active: 3, inactive: 1 });
        assert_eq!(summary.license_expired, 1);
        assert_eq!(summary.license_expiring, 1);
    }

    #[test]
    fn test_user_summary() {
        let user = |role, active| User {
            id: Some(1),
            username: "u".into(),
            role,
            active,
            created_at: None,
            modified_at: None,
        };
        let users = vec![
            user(Role::Administrator, true),
            user(Role::Driver, true),
            user(Role::Driver, false),
        ];
        let summary = user_summary(&users);
        assert_eq!(summary.administrators, 1);
        assert_eq!(summary.drivers, 2);
        assert_eq!(summary.counts.inactive, 1);
        assert_eq!(summary.administrators + summary.drivers, summary.counts.total);
    }
}
