//! Administrator write commands: create, edit, toggle and delete records

use crate::{
    console::{render, Resource},
    error::{AppError, AppResult},
    models::{
        driver::{CreateDriver, UpdateDriver},
        enums::Period,
        insurance::{CreateInsuranceProvider, UpdateInsuranceProvider},
        patient::{CreatePatient, UpdatePatient},
        trip::{CreateRecurringTrip, UpdateRecurringTrip},
        user::{CreateUser, ResetPassword, UpdateUser},
    },
    Console,
};

pub async fn driver_add(console: &Console, data: &CreateDriver) -> AppResult<String> {
    let driver = console.services.drivers.create(data).await?;
    Ok(format!("Driver #{} {} created", driver.id, driver.full_name()))
}

pub async fn driver_edit(console: &Console, id: i32, data: &UpdateDriver) -> AppResult<String> {
    let driver = console.services.drivers.update(id, data).await?;
    Ok(format!("Driver #{} {} updated", driver.id, driver.full_name()))
}

pub async fn available_users(console: &Console) -> AppResult<String> {
    let users = console.services.drivers.available_users().await?;
    Ok(render::available_users(&users))
}

pub async fn patient_add(console: &Console, data: &CreatePatient) -> AppResult<String> {
    let patient = console.services.patients.create(data).await?;
    Ok(format!("Patient #{} {} created", patient.id, patient.full_name()))
}

pub async fn patient_edit(console: &Console, id: i32, data: &UpdatePatient) -> AppResult<String> {
    let patient = console.services.patients.update(id, data).await?;
    Ok(format!("Patient #{} {} updated", patient.id, patient.full_name()))
}

pub async fn insurance_add(console: &Console, data: &CreateInsuranceProvider) -> AppResult<String> {
    let provider = console.services.insurance.create(data).await?;
    Ok(format!("Insurance provider #{} {} created", provider.id, provider.description))
}

pub async fn insurance_edit(
    console: &Console,
    id: i32,
    data: &UpdateInsuranceProvider,
) -> AppResult<String> {
    let provider = console.services.insurance.update(id, data).await?;
    Ok(format!("Insurance provider #{} {} updated", provider.id, provider.description))
}

pub async fn user_add(console: &Console, data: &CreateUser) -> AppResult<String> {
    let user = console.services.users.create(data).await?;
    let id = user.id.map(|id| format!("#{} ", id)).unwrap_or_default();
    Ok(format!("User {}{} ({}) created", id, user.username, user.role))
}

pub async fn user_edit(console: &Console, id: i32, data: &UpdateUser) -> AppResult<String> {
    let user = console.services.users.update(id, data).await?;
    Ok(format!("User #{} {} updated", id, user.username))
}

pub async fn password(console: &Console, user_id: i32, data: &ResetPassword) -> AppResult<String> {
    console.services.users.reset_password(user_id, data).await?;
    Ok(format!("Password of user #{} changed", user_id))
}

pub async fn schedule_create(console: &Console, driver_id: i32) -> AppResult<String> {
    let schedule = console.services.schedules.create(driver_id).await?;
    Ok(format!(
        "Schedule #{} created for {}",
        schedule.id,
        schedule.driver_full_name()
    ))
}

pub async fn trip_add(console: &Console, data: &CreateRecurringTrip) -> AppResult<String> {
    let trip = console.services.trips.create(data).await?;
    Ok(format!(
        "Trip #{} created: {} on {}",
        trip.id,
        render::trip_time(&trip),
        trip.weekdays
    ))
}

pub async fn trip_edit(console: &Console, id: i32, data: &UpdateRecurringTrip) -> AppResult<String> {
    let trip = console.services.trips.update(id, data).await?;
    Ok(format!(
        "Trip #{} updated: {} on {}",
        trip.id,
        render::trip_time(&trip),
        trip.weekdays
    ))
}

/// Flip the active flag; the server decides the new value
pub async fn toggle(console: &Console, resource: Resource, id: i32) -> AppResult<String> {
    let services = &console.services;
    match resource {
        Resource::Driver => services.drivers.toggle_active(id).await?,
        Resource::Patient => services.patients.toggle_active(id).await?,
        Resource::Insurance => services.insurance.toggle_active(id).await?,
        Resource::User => services.users.toggle_active(id).await?,
        Resource::Schedule | Resource::Trip => {
            return Err(AppError::Validation(format!(
                "{} records have no status toggle; use delete",
                resource
            )))
        }
    }
    Ok(format!("Status of {} #{} changed", resource, id))
}

pub async fn delete(console: &Console, resource: Resource, id: i32) -> AppResult<String> {
    let services = &console.services;
    match resource {
        Resource::Driver => services.drivers.delete(id).await?,
        Resource::Patient => services.patients.delete(id).await?,
        Resource::Insurance => services.insurance.delete(id).await?,
        Resource::User => services.users.delete(id).await?,
        Resource::Schedule => services.schedules.delete(id).await?,
        Resource::Trip => services.trips.delete(id).await?,
    }
    Ok(format!("Removed {} #{}", resource, id))
}

/// Driver statistics page; the logged-in driver's own unless `driver_id` is given
pub async fn reports(console: &Console, driver_id: Option<i32>, period: Period) -> AppResult<String> {
    let driver_id = match driver_id {
        Some(id) => id,
        None => console.services.auth.current_driver().await?.id,
    };
    let stats = console.services.drivers.statistics(driver_id, period).await?;
    Ok(render::driver_statistics(driver_id, period, &stats))
}
