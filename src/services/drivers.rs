//! Drivers service

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        driver::{AvailableUser, CreateDriver, Driver, DriverStatistics, UpdateDriver},
        enums::Period,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct DriversService {
    repository: Repository,
}

impl DriversService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Driver>> {
        self.repository.drivers_list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Driver> {
        self.repository.drivers_get(id).await
    }

    pub async fn by_user(&self, user_id: i32) -> AppResult<Driver> {
        self.repository.drivers_by_user(user_id).await
    }

    pub async fn create(&self, data: &CreateDriver) -> AppResult<Driver> {
        data.validate()?;
        self.repository.drivers_create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateDriver) -> AppResult<Driver> {
        data.validate()?;
        self.repository.drivers_update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.drivers_delete(id).await
    }

    pub async fn toggle_active(&self, id: i32) -> AppResult<()> {
        self.repository.drivers_toggle_active(id).await
    }

    /// Accounts that can still be linked to a new driver
    pub async fn available_users(&self) -> AppResult<Vec<AvailableUser>> {
        self.repository.drivers_available_users().await
    }

    pub async fn statistics(&self, id: i32, period: Period) -> AppResult<DriverStatistics> {
        self.repository.drivers_statistics(id, period).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ApiConfig, error::AppError, services::session::SessionStore};
    use chrono::NaiveDate;

    fn service() -> DriversService {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
        };
        DriversService::new(Repository::new(&config, SessionStore::in_memory()).unwrap())
    }
    fn new_driver() -> CreateDriver {
        CreateDriver {
            user_id: 10,
            first_name: "Juan".into(),
            last_name: "Gómez".into(),
            dni: "30111222".into(),
            phone: None,
            address: None,
            license_expiry: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            hired_on: None,
        }
    }

    #[tokio::test]
    async fn test_create_validates_before_sending() {
        let drivers = service();

        for data in [
            CreateDriver { dni: "123".into(), ..new_driver() },
            CreateDriver { dni: "12345678901".into(), ..new_driver() },
            CreateDriver { first_name: String::new(), ..new_driver() },
            CreateDriver { last_name: String::new(), ..new_driver() },
        ] {
            assert!(
                matches!(drivers.create(&data).await, Err(AppError::Validation(_))),
                "expected a validation error for {:?}",
                data
            );
        }

        assert!(matches!(drivers.create(&new_driver()).await, Err(AppError::Transport(_))));
    }

    #[tokio::test]
    async fn test_update_validates_given_fields() {
        let data = UpdateDriver {
            dni: Some("99".into()),
            ..Default::default()
        };
        match service().update(2, &data).await {
            Err(AppError::Validation(message)) => assert!(message.contains("DNI")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
