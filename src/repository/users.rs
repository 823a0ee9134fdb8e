//! User accounts on Repository

use super::Repository;
use crate::{
    error::AppResult,
    models::user::{CreateUser, ResetPassword, UpdateUser, User},
};

impl Repository {
    pub async fn users_list(&self) -> AppResult<Vec<User>> {
        self.get("/usuario").await
    }

    pub async fn users_get(&self, id: i32) -> AppResult<User> {
        self.get(&format!("/usuario/{}", id)).await
    }

    pub async fn users_create(&self, data: &CreateUser) -> AppResult<User> {
        self.post("/usuario", data).await
    }

    pub async fn users_update(&self, id: i32, data: &UpdateUser) -> AppResult<User> {
        self.put(&format!("/usuario/{}", id), data).await
    }

    pub async fn users_delete(&self, id: i32) -> AppResult<()> {
        self.delete(&format!("/usuario/{}", id)).await
    }

    pub async fn users_toggle_active(&self, id: i32) -> AppResult<()> {
        self.toggle(&format!("/usuario/{}/estado", id)).await
    }

    pub async fn users_reset_password(&self, id: i32, data: &ResetPassword) -> AppResult<()> {
        self.put_unit(&format!("/usuario/{}/password", id), data).await
    }
}
