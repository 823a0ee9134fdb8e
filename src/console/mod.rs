//! Console commands: parsing, guards and dispatch
//!
//! Each command mirrors one screen of the transport console. Guards are a
//! navigation convenience; the remote service enforces access itself.

pub mod admin;
pub mod args;
pub mod auth;
pub mod driver;
pub mod forms;
pub mod manage;
pub mod render;

use std::{fmt, str::FromStr};

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult, Operation},
    models::{
        driver::{CreateDriver, UpdateDriver},
        enums::{Period, Role, TripState},
        history::HistoryQuery,
        insurance::{CreateInsuranceProvider, UpdateInsuranceProvider},
        patient::{CreatePatient, UpdatePatient},
        trip::{CreateRecurringTrip, UpdateRecurringTrip},
        user::{CreateUser, ResetPassword, UpdateUser},
    },
    services::{
        filters::{ActivityFilter, DriverFilter, LicenseFilter, Selection, TripFilter},
        session::RouteGuard,
    },
    Console,
};
use args::Args;

const DRIVER_ONLY: &[Role] = &[Role::Driver];
const ADMIN_ONLY: &[Role] = &[Role::Administrator];
const ANY_ROLE: &[Role] = &[Role::Administrator, Role::Driver];

pub const USAGE: &str = "\
Usage: darconnect <command> [args]

Session
  login <user> <password>
  logout
  whoami

Driver
  agenda [--driver ID]                 weekly grid
  agenda-day <1-7> [--driver ID]       one weekday of the grid
  my-trips [--date YYYY-MM-DD]         today's trips and state counts
  start <trip-id>
  finish <trip-id>
  cancel <trip-id> <reason>
  travel-time <trip-id>

Administrator
  day [--date D] [--state S]
  trips [--active|--inactive] [--patient ID|TEXT] [--schedule ID|TEXT]
  drivers [TEXT] [--active|--inactive] [--expired|--expiring]
  patients [TEXT] [--active|--inactive]
  insurance [TEXT] [--active|--inactive]
  users [TEXT] [--active|--inactive]
  schedules [TEXT] [--active|--inactive]
  history [--from D] [--to D] [--driver ID] [--patient ID] [--state S] [--page N] [--size N]
  dashboard [--period hoy|semana|mes|año]
  reports [--driver ID] [--period P]   driver statistics (own when no --driver)

Administrator records
  driver-add <user-id> <first> <last> <dni> --license D [--phone T] [--address T] [--hired D]
  driver-edit <id> [--first-name T] [--last-name T] [--dni T] [--phone T] [--address T]
              [--license D] [--hired D] [--active=true|false]
  available-users                      accounts free to link to a new driver
  patient-add <first> <last> <dni> [--phone T] [--email T] [--address T] [--city T]
              [--insurance ID] [--wheelchair]
  patient-edit <id> [same options] [--wheelchair=true|false] [--active=true|false]
  insurance-add <description>
  insurance-edit <id> [--description T] [--active=true|false]
  user-add <username> <password> <role> [--active=true|false]
  user-edit <id> [--username T] [--role R] [--active=true|false]
  password <user-id> <new-password>
  schedule-create <driver-id>
  trip-add <schedule-id> <patient-id> --time HH:MM --days 1,3,5 --from D
           --origin T --destination T [--to D] [--notes T]
  trip-edit <id> [--schedule ID] [--patient ID] [--time HH:MM] [--days L] [--from D]
            [--to D] [--origin T] [--destination T] [--notes T] [--active=true|false]
  toggle <driver|patient|insurance|user> <id>
  delete <driver|patient|insurance|user|schedule|trip> <id>";

/// Record kinds the toggle and delete commands act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Driver,
    Patient,
    Insurance,
    User,
    Schedule,
    Trip,
}

impl Resource {
    /// Schedules and trips are removed, never switched off
    pub fn has_toggle(&self) -> bool {
        !matches!(self, Resource::Schedule | Resource::Trip)
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "driver" | "chofer" => Ok(Resource::Driver),
            "patient" | "paciente" => Ok(Resource::Patient),
            "insurance" | "obra-social" => Ok(Resource::Insurance),
            "user" | "usuario" => Ok(Resource::User),
            "schedule" | "agenda" => Ok(Resource::Schedule),
            "trip" | "traslado" => Ok(Resource::Trip),
            other => Err(format!("unknown record kind '{}'", other)),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Driver => "driver",
            Resource::Patient => "patient",
            Resource::Insurance => "insurance provider",
            Resource::User => "user",
            Resource::Schedule => "schedule",
            Resource::Trip => "trip",
        };
        write!(f, "{}", name)
    }
}

/// Text search plus active flag, shared by the simple admin listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub activity: ActivityFilter,
    pub text: String,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help,
    Login { username: String, password: String },
    Logout,
    WhoAmI,
    Agenda { driver_id: Option<i32> },
    AgendaDay { weekday: u8, driver_id: Option<i32> },
    MyTrips { date: Option<NaiveDate> },
    Start { trip_id: i32 },
    Finish { trip_id: i32 },
    Cancel { trip_id: i32, reason: String },
    TravelTime { trip_id: i32 },
    Day { date: Option<NaiveDate>, state: Option<TripState> },
    Trips(TripFilter),
    Drivers(DriverFilter),
    Patients(ListFilter),
    Insurance(ListFilter),
    Users(ListFilter),
    Schedules(ListFilter),
    History(HistoryQuery),
    Dashboard { period: Period },
    Reports { driver_id: Option<i32>, period: Period },
    DriverAdd(CreateDriver),
    DriverEdit { id: i32, data: UpdateDriver },
    AvailableUsers,
    PatientAdd(CreatePatient),
    PatientEdit { id: i32, data: UpdatePatient },
    InsuranceAdd(CreateInsuranceProvider),
    InsuranceEdit { id: i32, data: UpdateInsuranceProvider },
    UserAdd(CreateUser),
    UserEdit { id: i32, data: UpdateUser },
    Password { user_id: i32, data: ResetPassword },
    ScheduleCreate { driver_id: i32 },
    TripAdd(CreateRecurringTrip),
    TripEdit { id: i32, data: UpdateRecurringTrip },
    Toggle { resource: Resource, id: i32 },
    Delete { resource: Resource, id: i32 },
}

impl Command {
    /// Parse `<command> [args]` (program name already stripped)
    pub fn parse<S: AsRef<str>>(argv: &[S]) -> AppResult<Self> {
        let Some((name, rest)) = argv.split_first() else {
            return Ok(Command::Help);
        };
        let name = name.as_ref();
        let args = Args::parse(rest)?;

        let unknown = args.unknown_flags(known_flags(name));
        if !unknown.is_empty() {
            return Err(AppError::Validation(format!(
                "unknown option(s) for {}: --{}",
                name,
                unknown.join(", --")
            )));
        }

        let command = match name {
            "help" | "--help" | "-h" => Command::Help,
            "login" => Command::Login {
                username: args.required(0, "user")?.to_string(),
                password: args.required(1, "password")?.to_string(),
            },
            "logout" => Command::Logout,
            "whoami" => Command::WhoAmI,
            "agenda" => Command::Agenda {
                driver_id: args.parsed("driver")?,
            },
            "agenda-day" => {
                let weekday: u8 = args.required_parsed(0, "weekday")?;
                if !(1..=7).contains(&weekday) {
                    return Err(AppError::Validation(format!(
                        "weekday must be 1 (Monday) to 7 (Sunday), got {}",
                        weekday
                    )));
                }
                Command::AgendaDay {
                    weekday,
                    driver_id: args.parsed("driver")?,
                }
            }
            "my-trips" => Command::MyTrips {
                date: args.parsed("date")?,
            },
            "start" => Command::Start {
                trip_id: args.required_parsed(0, "trip-id")?,
            },
            "finish" => Command::Finish {
                trip_id: args.required_parsed(0, "trip-id")?,
            },
            "cancel" => {
                let trip_id = args.required_parsed(0, "trip-id")?;
                args.required(1, "reason")?;
                Command::Cancel {
                    trip_id,
                    reason: args.positionals()[1..].join(" "),
                }
            }
            "travel-time" => Command::TravelTime {
                trip_id: args.required_parsed(0, "trip-id")?,
            },
            "day" => Command::Day {
                date: args.parsed("date")?,
                state: args.parsed("state")?,
            },
            "trips" => Command::Trips(TripFilter {
                activity: activity(&args)?,
                patient: Selection::parse(args.value("patient").unwrap_or("")),
                schedule: Selection::parse(args.value("schedule").unwrap_or("")),
            }),
            "drivers" => {
                let license = match (args.switch("expired"), args.switch("expiring")) {
                    (true, true) => {
                        return Err(AppError::Validation(
                            "--expired and --expiring are exclusive".to_string(),
                        ))
                    }
                    (true, false) => LicenseFilter::Expired,
                    (false, true) => LicenseFilter::Expiring,
                    (false, false) => LicenseFilter::Any,
                };
                Command::Drivers(DriverFilter {
                    activity: activity(&args)?,
                    license,
                    text: args.positionals().join(" "),
                })
            }
            "patients" => Command::Patients(list_filter(&args)?),
            "insurance" => Command::Insurance(list_filter(&args)?),
            "users" => Command::Users(list_filter(&args)?),
            "schedules" => Command::Schedules(list_filter(&args)?),
            "history" => Command::History(HistoryQuery {
                from: args.parsed("from")?,
                to: args.parsed("to")?,
                driver_id: args.parsed("driver")?,
                patient_id: args.parsed("patient")?,
                state: args.parsed("state")?,
                page: args.parsed("page")?,
                size: args.parsed("size")?,
            }),
            "dashboard" => Command::Dashboard {
                period: args.parsed("period")?.unwrap_or_default(),
            },
            "reports" => Command::Reports {
                driver_id: args.parsed("driver")?,
                period: args.parsed("period")?.unwrap_or_default(),
            },
            "driver-add" => Command::DriverAdd(forms::create_driver(&args)?),
            "driver-edit" => {
                let (id, data) = forms::update_driver(&args)?;
                Command::DriverEdit { id, data }
            }
            "available-users" => Command::AvailableUsers,
            "patient-add" => Command::PatientAdd(forms::create_patient(&args)?),
            "patient-edit" => {
                let (id, data) = forms::update_patient(&args)?;
                Command::PatientEdit { id, data }
            }
            "insurance-add" => Command::InsuranceAdd(forms::create_insurance(&args)?),
            "insurance-edit" => {
                let (id, data) = forms::update_insurance(&args)?;
                Command::InsuranceEdit { id, data }
            }
            "user-add" => Command::UserAdd(forms::create_user(&args)?),
            "user-edit" => {
                let (id, data) = forms::update_user(&args)?;
                Command::UserEdit { id, data }
            }
            "password" => {
                let (user_id, data) = forms::reset_password(&args)?;
                Command::Password { user_id, data }
            }
            "schedule-create" => Command::ScheduleCreate {
                driver_id: args.required_parsed(0, "driver-id")?,
            },
            "trip-add" => Command::TripAdd(forms::create_trip(&args)?),
            "trip-edit" => {
                let (id, data) = forms::update_trip(&args)?;
                Command::TripEdit { id, data }
            }
            "toggle" => {
                let resource: Resource = args.required_parsed(0, "record")?;
                if !resource.has_toggle() {
                    return Err(AppError::Validation(format!(
                        "{} records have no status toggle; use delete",
                        resource
                    )));
                }
                Command::Toggle {
                    resource,
                    id: args.required_parsed(1, "id")?,
                }
            }
            "delete" => Command::Delete {
                resource: args.required_parsed(0, "record")?,
                id: args.required_parsed(1, "id")?,
            },
            other => {
                return Err(AppError::Validation(format!(
                    "unknown command '{}' (try 'darconnect help')",
                    other
                )))
            }
        };

        Ok(command)
    }

    /// Who may run the command
    pub fn guard(&self) -> RouteGuard {
        match self {
            Command::Help | Command::Login { .. } => RouteGuard::PUBLIC,
            Command::Logout | Command::WhoAmI => RouteGuard::authenticated(),
            Command::Agenda { driver_id: Some(_) }
            | Command::AgendaDay { driver_id: Some(_), .. }
            | Command::TravelTime { .. }
            | Command::Reports { driver_id: Some(_), .. } => RouteGuard::roles(ANY_ROLE),
            Command::Agenda { driver_id: None }
            | Command::AgendaDay { driver_id: None, .. }
            | Command::MyTrips { .. }
            | Command::Start { .. }
            | Command::Finish { .. }
            | Command::Cancel { .. }
            | Command::Reports { driver_id: None, .. } => RouteGuard::roles(DRIVER_ONLY),
            Command::Day { .. }
            | Command::Trips(_)
            | Command::Drivers(_)
            | Command::Patients(_)
            | Command::Insurance(_)
            | Command::Users(_)
            | Command::Schedules(_)
            | Command::History(_)
            | Command::Dashboard { .. }
            | Command::DriverAdd(_)
            | Command::DriverEdit { .. }
            | Command::AvailableUsers
            | Command::PatientAdd(_)
            | Command::PatientEdit { .. }
            | Command::InsuranceAdd(_)
            | Command::InsuranceEdit { .. }
            | Command::UserAdd(_)
            | Command::UserEdit { .. }
            | Command::Password { .. }
            | Command::ScheduleCreate { .. }
            | Command::TripAdd(_)
            | Command::TripEdit { .. }
            | Command::Toggle { .. }
            | Command::Delete { .. } => RouteGuard::roles(ADMIN_ONLY),
        }
    }

    /// Operation name used in failure messages
    pub fn label(&self) -> &'static str {
        match self {
            Command::Help => "Help",
            Command::Login { .. } => "Login",
            Command::Logout => "Logout",
            Command::WhoAmI => "Session lookup",
            Command::Agenda { .. } => "Loading the weekly agenda",
            Command::AgendaDay { .. } => "Loading the day's agenda",
            Command::MyTrips { .. } => "Loading today's trips",
            Command::Start { .. } => "Starting the trip",
            Command::Finish { .. } => "Finishing the trip",
            Command::Cancel { .. } => "Cancelling the trip",
            Command::TravelTime { .. } => "Travel time estimate",
            Command::Day { .. } => "Loading the day's trips",
            Command::Trips(_) => "Loading trips",
            Command::Drivers(_) => "Loading drivers",
            Command::Patients(_) => "Loading patients",
            Command::Insurance(_) => "Loading insurance providers",
            Command::Users(_) => "Loading users",
            Command::Schedules(_) => "Loading schedules",
            Command::History(_) => "Loading trip history",
            Command::Dashboard { .. } => "Loading the dashboard",
            Command::Reports { .. } => "Loading driver statistics",
            Command::DriverAdd(_) => "Creating the driver",
            Command::DriverEdit { .. } => "Updating the driver",
            Command::AvailableUsers => "Loading available users",
            Command::PatientAdd(_) => "Creating the patient",
            Command::PatientEdit { .. } => "Updating the patient",
            Command::InsuranceAdd(_) => "Creating the insurance provider",
            Command::InsuranceEdit { .. } => "Updating the insurance provider",
            Command::UserAdd(_) => "Creating the user",
            Command::UserEdit { .. } => "Updating the user",
            Command::Password { .. } => "Changing the password",
            Command::ScheduleCreate { .. } => "Creating the schedule",
            Command::TripAdd(_) => "Creating the trip",
            Command::TripEdit { .. } => "Updating the trip",
            Command::Toggle { resource, .. } => match resource {
                Resource::Driver => "Changing the driver's status",
                Resource::Patient => "Changing the patient's status",
                Resource::Insurance => "Changing the insurance provider's status",
                Resource::User => "Changing the user's status",
                Resource::Schedule | Resource::Trip => "Changing the status",
            },
            Command::Delete { resource, .. } => match resource {
                Resource::Driver => "Deleting the driver",
                Resource::Patient => "Deleting the patient",
                Resource::Insurance => "Deleting the insurance provider",
                Resource::User => "Deleting the user",
                Resource::Schedule => "Deactivating the schedule",
                Resource::Trip => "Deleting the trip",
            },
        }
    }

    /// Which server refusals get a dedicated explanation
    pub fn operation(&self) -> Operation {
        match self {
            Command::TripAdd(_) | Command::TripEdit { .. } => Operation::SaveTrip,
            Command::ScheduleCreate { .. } => Operation::CreateSchedule,
            Command::Delete {
                resource: Resource::Schedule,
                ..
            } => Operation::DeleteSchedule,
            Command::InsuranceAdd(_) | Command::InsuranceEdit { .. } => Operation::SaveInsurance,
            Command::Delete {
                resource: Resource::Insurance,
                ..
            } => Operation::DeleteInsurance,
            _ => Operation::Other,
        }
    }
}

/// Options each command accepts
fn known_flags(command: &str) -> &'static [&'static str] {
    match command {
        "agenda" | "agenda-day" => &["driver"],
        "my-trips" => &["date"],
        "day" => &["date", "state"],
        "trips" => &["active", "inactive", "patient", "schedule"],
        "drivers" => &["active", "inactive", "expired", "expiring"],
        "patients" | "insurance" | "users" | "schedules" => &["active", "inactive"],
        "history" => &["from", "to", "driver", "patient", "state", "page", "size"],
        "dashboard" => &["period"],
        "reports" => &["driver", "period"],
        "driver-add" => &["license", "phone", "address", "hired"],
        "driver-edit" => &[
            "first-name", "last-name", "dni", "phone", "address", "license", "hired", "active",
        ],
        "patient-add" => &["phone", "email", "address", "city", "insurance", "wheelchair", "active"],
        "patient-edit" => &[
            "first-name", "last-name", "dni", "phone", "email", "address", "city", "insurance",
            "wheelchair", "active",
        ],
        "insurance-add" => &["active"],
        "insurance-edit" => &["description", "active"],
        "user-add" => &["active"],
        "user-edit" => &["username", "role", "active"],
        "trip-add" => &["time", "days", "from", "to", "origin", "destination", "notes"],
        "trip-edit" => &[
            "schedule", "patient", "time", "days", "from", "to", "origin", "destination", "notes",
            "active",
        ],
        _ => &[],
    }
}

fn activity(args: &Args) -> AppResult<ActivityFilter> {
    match (args.switch("active"), args.switch("inactive")) {
        (true, true) => Err(AppError::Validation(
            "--active and --inactive are exclusive".to_string(),
        )),
        (true, false) => Ok(ActivityFilter::Active),
        (false, true) => Ok(ActivityFilter::Inactive),
        (false, false) => Ok(ActivityFilter::All),
    }
}

fn list_filter(args: &Args) -> AppResult<ListFilter> {
    Ok(ListFilter {
        activity: activity(args)?,
        text: args.positionals().join(" "),
    })
}

impl Console {
    /// Check the command's guard, then run it
    pub async fn execute(&self, command: Command) -> AppResult<String> {
        command.guard().check(&self.services.session)?;
        let today = chrono::Local::now().date_naive();
        tracing::debug!(command = command.label(), "Running command");

        match command {
            Command::Help => Ok(USAGE.to_string()),
            Command::Login { username, password } => auth::login(self, &username, &password).await,
            Command::Logout => auth::logout(self),
            Command::WhoAmI => auth::whoami(self).await,
            Command::Agenda { driver_id } => driver::agenda(self, driver_id).await,
            Command::AgendaDay { weekday, driver_id } => {
                driver::agenda_day(self, weekday, driver_id).await
            }
            Command::MyTrips { date } => driver::my_trips(self, date).await,
            Command::Start { trip_id } => driver::start(self, trip_id).await,
            Command::Finish { trip_id } => driver::finish(self, trip_id).await,
            Command::Cancel { trip_id, reason } => driver::cancel(self, trip_id, &reason).await,
            Command::TravelTime { trip_id } => driver::travel_time(self, trip_id).await,
            Command::Day { date, state } => admin::day(self, date, state).await,
            Command::Trips(filter) => admin::trips(self, &filter).await,
            Command::Drivers(filter) => admin::drivers(self, &filter, today).await,
            Command::Patients(filter) => admin::patients(self, &filter).await,
            Command::Insurance(filter) => admin::insurance(self, &filter).await,
            Command::Users(filter) => admin::users(self, &filter).await,
            Command::Schedules(filter) => admin::schedules(self, &filter).await,
            Command::History(query) => admin::history(self, &query).await,
            Command::Dashboard { period } => admin::dashboard(self, period, today).await,
            Command::Reports { driver_id, period } => manage::reports(self, driver_id, period).await,
            Command::DriverAdd(data) => manage::driver_add(self, &data).await,
            Command::DriverEdit { id, data } => manage::driver_edit(self, id, &data).await,
            Command::AvailableUsers => manage::available_users(self).await,
            Command::PatientAdd(data) => manage::patient_add(self, &data).await,
            Command::PatientEdit { id, data } => manage::patient_edit(self, id, &data).await,
            Command::InsuranceAdd(data) => manage::insurance_add(self, &data).await,
            Command::InsuranceEdit { id, data } => manage::insurance_edit(self, id, &data).await,
            Command::UserAdd(data) => manage::user_add(self, &data).await,
            Command::UserEdit { id, data } => manage::user_edit(self, id, &data).await,
            Command::Password { user_id, data } => manage::password(self, user_id, &data).await,
            Command::ScheduleCreate { driver_id } => manage::schedule_create(self, driver_id).await,
            Command::TripAdd(data) => manage::trip_add(self, &data).await,
            Command::TripEdit { id, data } => manage::trip_edit(self, id, &data).await,
            Command::Toggle { resource, id } => manage::toggle(self, resource, id).await,
            Command::Delete { resource, id } => manage::delete(self, resource, id).await,
        }
    }
}
