//! Admin forms: build create/update requests from command arguments.
//!
//! Field rules (lengths, email, weekdays) are checked by the services through
//! `validator`; this module only turns text into typed values.

use chrono::NaiveTime;

use crate::{
    console::args::Args,
    error::{AppError, AppResult},
    models::{
        driver::{CreateDriver, UpdateDriver},
        insurance::{CreateInsuranceProvider, UpdateInsuranceProvider},
        patient::{CreatePatient, UpdatePatient},
        trip::{CreateRecurringTrip, UpdateRecurringTrip, WireTime},
        user::{CreateUser, ResetPassword, UpdateUser},
    },
};

fn text(args: &Args, name: &str) -> Option<String> {
    args.value(name).map(str::to_string)
}

fn time(args: &Args, name: &str) -> AppResult<Option<NaiveTime>> {
    args.value(name)
        .map(|raw| {
            WireTime::Text(raw.to_string())
                .to_time()
                .map_err(|_| AppError::Validation(format!("invalid --{} {}: expected HH:MM", name, raw)))
        })
        .transpose()
}

/// Edits with no field to change are refused before any request
fn require_changes(args: &Args) -> AppResult<()> {
    if args.has_flags() {
        Ok(())
    } else {
        Err(AppError::Validation("nothing to change".to_string()))
    }
}

/// `<user-id> <first-name> <last-name> <dni> --license D [--phone] [--address] [--hired D]`
pub fn create_driver(args: &Args) -> AppResult<CreateDriver> {
    Ok(CreateDriver {
        user_id: args.required_parsed(0, "user-id")?,
        first_name: args.required(1, "first-name")?.to_string(),
        last_name: args.required(2, "last-name")?.to_string(),
        dni: args.required(3, "dni")?.to_string(),
        phone: text(args, "phone"),
        address: text(args, "address"),
        license_expiry: args.required_flag("license")?,
        hired_on: args.parsed("hired")?,
    })
}

pub fn update_driver(args: &Args) -> AppResult<(i32, UpdateDriver)> {
    let id = args.required_parsed(0, "driver-id")?;
    require_changes(args)?;
    Ok((
        id,
        UpdateDriver {
            first_name: text(args, "first-name"),
            last_name: text(args, "last-name"),
            dni: text(args, "dni"),
            phone: text(args, "phone"),
            address: text(args, "address"),
            license_expiry: args.parsed("license")?,
            hired_on: args.parsed("hired")?,
            active: args.toggled("active"),
        },
    ))
}

/// `<first-name> <last-name> <dni> [--phone] [--email] [--address] [--city] [--insurance ID] [--wheelchair]`
pub fn create_patient(args: &Args) -> AppResult<CreatePatient> {
    Ok(CreatePatient {
        first_name: args.required(0, "first-name")?.to_string(),
        last_name: args.required(1, "last-name")?.to_string(),
        dni: args.required(2, "dni")?.to_string(),
        phone: text(args, "phone"),
        email: text(args, "email"),
        address: text(args, "address"),
        city: text(args, "city"),
        insurance_provider_id: args.parsed("insurance")?,
        wheelchair: args.switch("wheelchair"),
        active: args.toggled("active").unwrap_or(true),
    })
}

pub fn update_patient(args: &Args) -> AppResult<(i32, UpdatePatient)> {
    let id = args.required_parsed(0, "patient-id")?;
    require_changes(args)?;
    Ok((
        id,
        UpdatePatient {
            first_name: text(args, "first-name"),
            last_name: text(args, "last-name"),
            dni: text(args, "dni"),
            phone: text(args, "phone"),
            email: text(args, "email"),
            address: text(args, "address"),
            city: text(args, "city"),
            insurance_provider_id: args.parsed("insurance")?,
            wheelchair: args.toggled("wheelchair"),
            active: args.toggled("active"),
        },
    ))
}

/// `<description...>`
pub fn create_insurance(args: &Args) -> AppResult<CreateInsuranceProvider> {
    args.required(0, "description")?;
    Ok(CreateInsuranceProvider {
        description: args.positionals().join(" "),
        active: args.toggled("active").unwrap_or(true),
    })
}

pub fn update_insurance(args: &Args) -> AppResult<(i32, UpdateInsuranceProvider)> {
    let id = args.required_parsed(0, "insurance-id")?;
    require_changes(args)?;
    Ok((
        id,
        UpdateInsuranceProvider {
            description: text(args, "description"),
            active: args.toggled("active"),
        },
    ))
}

/// `<username> <password> <role>`
pub fn create_user(args: &Args) -> AppResult<CreateUser> {
    Ok(CreateUser {
        username: args.required(0, "username")?.to_string(),
        password: args.required(1, "password")?.to_string(),
        role: args.required_parsed(2, "role")?,
        active: args.toggled("active"),
    })
}

pub fn update_user(args: &Args) -> AppResult<(i32, UpdateUser)> {
    let id = args.required_parsed(0, "user-id")?;
    require_changes(args)?;
    Ok((
        id,
        UpdateUser {
            username: text(args, "username"),
            role: args.parsed("role")?,
            active: args.toggled("active"),
        },
    ))
}

/// `<user-id> <new-password>`
pub fn reset_password(args: &Args) -> AppResult<(i32, ResetPassword)> {
    Ok((
        args.required_parsed(0, "user-id")?,
        ResetPassword {
            password: args.required(1, "new-password")?.to_string(),
        },
    ))
}

/// `<schedule-id> <patient-id> --time HH:MM --days 1,3,5 --from D --origin A --destination B [--to D] [--notes]`
pub fn create_trip(args: &Args) -> AppResult<CreateRecurringTrip> {
    Ok(CreateRecurringTrip {
        schedule_id: args.required_parsed(0, "schedule-id")?,
        patient_id: args.required_parsed(1, "patient-id")?,
        origin_address: args.required_flag("origin")?,
        destination_address: args.required_flag("destination")?,
        scheduled_time: time(args, "time")?
            .ok_or_else(|| AppError::Validation("missing --time".to_string()))?,
        weekdays: args.required_flag("days")?,
        start_date: args.required_flag("from")?,
        end_date: args.parsed("to")?,
        notes: text(args, "notes"),
    })
}

pub fn update_trip(args: &Args) -> AppResult<(i32, UpdateRecurringTrip)> {
    let id = args.required_parsed(0, "trip-id")?;
    require_changes(args)?;
    Ok((
        id,
        UpdateRecurringTrip {
            schedule_id: args.parsed("schedule")?,
            patient_id: args.parsed("patient")?,
            origin_address: text(args, "origin"),
            destination_address: text(args, "destination"),
            scheduled_time: time(args, "time")?,
            weekdays: args.parsed("days")?,
            start_date: args.parsed("from")?,
            end_date: args.parsed("to")?,
            notes: text(args, "notes"),
            active: args.toggled("active"),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::Role;
    use chrono::NaiveDate;

    fn args(line: &[&str]) -> Args {
        Args::parse(line).unwrap()
    }

    #[test]
    fn test_create_trip_form() {
        let trip = create_trip(&args(&[
            "3", "40", "--time", "8:30", "--days", "5,1,3", "--from", "2025-06-02",
            "--origin", "Av. Colón 1200", "--destination", "Hospital Privado",
        ]))
        .unwrap();

        assert_eq!(trip.schedule_id, 3);
        assert_eq!(trip.patient_id, 40);
        assert_eq!(trip.scheduled_time, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert_eq!(trip.weekdays.to_string(), "1,3,5");
        assert_eq!(trip.start_date, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        assert_eq!(trip.end_date, None);
        assert_eq!(trip.origin_address, "Av. Colón 1200");
    }

    #[test]
    fn test_create_trip_form_errors() {
        let base = ["3", "40", "--days", "1", "--from", "2025-06-02", "--origin", "A", "--destination", "B"];
        assert!(create_trip(&args(&base)).is_err());

        let mut bad_time = base.to_vec();
        bad_time.extend(["--time", "25:00"]);
        assert!(matches!(create_trip(&args(&bad_time)), Err(AppError::Validation(_))));

        let mut bad_days = base.to_vec();
        bad_days.extend(["--time", "08:00"]);
        bad_days[3] = "1,x";
        assert!(matches!(create_trip(&args(&bad_days)), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_edits_need_a_field() {
        assert!(matches!(update_trip(&args(&["7"])), Err(AppError::Validation(_))));
        assert!(matches!(update_patient(&args(&["7"])), Err(AppError::Validation(_))));
        assert!(matches!(update_driver(&args(&["7"])), Err(AppError::Validation(_))));

        let (id, data) = update_patient(&args(&["7", "--wheelchair=false", "--city", "Córdoba"])).unwrap();
        assert_eq!(id, 7);
        assert_eq!(data.wheelchair, Some(false));
        assert_eq!(data.city.as_deref(), Some("Córdoba"));
        assert_eq!(data.active, None);
    }

    #[test]
    fn test_patient_and_insurance_defaults() {
        let patient = create_patient(&args(&["Ana", "Pérez", "30111222", "--wheelchair"])).unwrap();
        assert!(patient.wheelchair);
        assert!(patient.active);

        let provider = create_insurance(&args(&["OSDE", "Binario", "--active=false"])).unwrap();
        assert_eq!(provider.description, "OSDE Binario");
        assert!(!provider.active);
    }

    #[test]
    fn test_user_forms() {
        let user = create_user(&args(&["mlopez", "secreto123", "chofer"])).unwrap();
        assert_eq!(user.role, Role::Driver);
        assert!(create_user(&args(&["mlopez", "secreto123", "pilot"])).is_err());

        let (id, data) = reset_password(&args(&["4", "nuevaClave1"])).unwrap();
        assert_eq!(id, 4);
        assert_eq!(data.password, "nuevaClave1");
    }

    #[test]
    fn test_driver_form_requires_license() {
        assert!(create_driver(&args(&["10", "Juan", "Gómez", "30111222"])).is_err());
        let driver = create_driver(&args(&["10", "Juan", "Gómez", "30111222", "--license", "2026-01-31"])).unwrap();
        assert_eq!(driver.license_expiry, NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
    }
}
