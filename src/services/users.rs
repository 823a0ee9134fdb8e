//! User accounts service

use validator::Validate;

use crate::{
    error::AppResult,
    models::user::{CreateUser, ResetPassword, UpdateUser, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.repository.users_list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<User> {
        self.repository.users_get(id).await
    }

    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        data.validate()?;
        self.repository.users_create(data).await
    }

    /// Profile fields only; see [`UsersService::reset_password`]
    pub async fn update(&self, id: i32, data: &UpdateUser) -> AppResult<User> {
        data.validate()?;
        self.repository.users_update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.users_delete(id).await
    }

    pub async fn toggle_active(&self, id: i32) -> AppResult<()> {
        self.repository.users_toggle_active(id).await
    }

    pub async fn reset_password(&self, id: i32, data: &ResetPassword) -> AppResult<()> {
        data.validate()?;
        self.repository.users_reset_password(id, data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::ApiConfig, error::AppError, models::enums::Role, services::session::SessionStore,
    };

    fn service() -> UsersService {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
        };
        UsersService::new(Repository::new(&config, SessionStore::in_memory()).unwrap())
    }
    #[tokio::test]
    async fn test_create_validates_before_sending() {
        let users = service();

        let short_name = CreateUser {
            username: "ml".into(),
            password: "secreto123".into(),
            role: Role::Driver,
            active: None,
        };
        assert!(matches!(users.create(&short_name).await, Err(AppError::Validation(_))));

        let short_password = CreateUser {
            username: "mlopez".into(),
            password: "corta".into(),
            role: Role::Driver,
            active: None,
        };
        match users.create(&short_password).await {
            Err(AppError::Validation(message)) => assert!(message.contains("password")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_and_reset_validate() {
        let users = service();

        let rename = UpdateUser {
            username: Some("x".into()),
            ..Default::default()
        };
        assert!(matches!(users.update(4, &rename).await, Err(AppError::Validation(_))));

        let weak = ResetPassword {
            password: "1234567".into(),
        };
        assert!(matches!(users.reset_password(4, &weak).await, Err(AppError::Validation(_))));

        let strong = ResetPassword {
            password: "12345678".into(),
        };
        assert!(matches!(users.reset_password(4, &strong).await, Err(AppError::Transport(_))));
    }
}
