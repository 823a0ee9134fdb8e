//! Login, logout and "who am I" lookups

use crate::{
    error::{AppError, AppResult},
    models::{
        driver::Driver,
        enums::Role,
        user::{LoginRequest, Session},
    },
    repository::Repository,
    services::session::SessionStore,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    session: SessionStore,
}

impl AuthService {
    pub fn new(repository: Repository, session: SessionStore) -> Self {
        Self { repository, session }
    }

    /// Authenticate and record the session
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AppError::Validation("username and password are required".to_string()));
        }

        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let session = self.repository.auth_login(&request).await?;
        self.session.set(session.clone())?;
        Ok(session)
    }

    /// Forget the session; the server keeps no state to revoke
    pub fn logout(&self) -> AppResult<()> {
        self.session.clear()
    }

    pub fn current(&self) -> Option<Session> {
        self.session.current()
    }

    /// Driver record of the logged-in driver account
    pub async fn current_driver(&self) -> AppResult<Driver> {
        let session = self.session.require()?;
        if session.role != Role::Driver {
            return Err(AppError::Authorization(
                "only driver accounts have a driver record".to_string(),
            ));
        }
        self.repository.drivers_by_user(session.id).await
    }
}
