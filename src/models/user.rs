//! User accounts and login session

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::enums::Role;

/// A console user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(rename = "usuario")]
    pub username: String,
    #[serde(rename = "rol")]
    pub role: Role,
    #[serde(rename = "activo", default)]
    pub active: bool,
    #[serde(rename = "fechaCreacion", default)]
    pub created_at: Option<String>,
    #[serde(rename = "fechaModificacion", default)]
    pub modified_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateUser {
    #[serde(rename = "usuario")]
    #[validate(length(min = 3, message = "username must have at least 3 characters"))]
    pub username: String,
    #[validate(length(min = 8, message = "password must have at least 8 characters"))]
    pub password: String,
    #[serde(rename = "rol")]
    pub role: Role,
    #[serde(rename = "activo", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Update user request; the password is changed separately
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateUser {
    #[serde(rename = "usuario", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, message = "username must have at least 3 characters"))]
    pub username: Option<String>,
    #[serde(rename = "rol", skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(rename = "activo", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct ResetPassword {
    #[validate(length(min = 8, message = "password must have at least 8 characters"))]
    pub password: String,
}

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response, kept as the current session record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// User account ID (not the driver ID)
    pub id: i32,
    pub username: String,
    pub role: Role,
    pub token: String,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Administrator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_login_response() {
        let session: Session = serde_json::from_str(
            r#"{"id": 4, "username": "mlopez", "role": "CHOFER", "token": "token-simulado-1"}"#,
        )
        .unwrap();
        assert_eq!(session.role, Role::Driver);
        assert!(!session.is_admin());
    }

    #[test]
    fn test_password_length_validation() {
        let request = CreateUser {
            username: "mlopez".into(),
            password: "short".into(),
            role: Role::Driver,
            active: None,
        };
        assert!(request.validate().is_err());

        let reset = ResetPassword {
            password: "long-enough".into(),
        };
        assert!(reset.validate().is_ok());
    }
}
