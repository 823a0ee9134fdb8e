//! Authentication endpoint

use super::Repository;
use crate::{
    error::AppResult,
    models::user::{LoginRequest, Session},
};

impl Repository {
    /// Exchange credentials for a session record (id, username, role, token)
    pub async fn auth_login(&self, request: &LoginRequest) -> AppResult<Session> {
        self.post("/auth/login", request).await
    }
}
