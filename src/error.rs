//! Error types for the DarConnect console

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Remote API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error body shapes returned by the remote service
#[derive(Debug, Deserialize)]
struct RemoteErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Write operations whose 400 responses get a tailored explanation.
///
/// Each kind only recognizes its own keywords, so a message about another
/// entity falls through to the server text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Operation {
    #[default]
    Other,
    SaveTrip,
    CreateSchedule,
    DeleteSchedule,
    SaveInsurance,
    DeleteInsurance,
}

impl Operation {
    fn tailored(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Operation::Other => &[],
            Operation::SaveTrip => &[(
                "conflicto",
                "A trip already exists at the same time and weekday for this schedule",
            )],
            Operation::CreateSchedule => &[(
                "chofer",
                "The selected driver is not available or already has an active schedule",
            )],
            Operation::DeleteSchedule => &[(
                "traslados",
                "The schedule cannot be deactivated while it has pending trips",
            )],
            Operation::SaveInsurance => &[(
                "descripción",
                "An insurance provider with that description already exists",
            )],
            Operation::DeleteInsurance => &[(
                "pacientes",
                "The insurance provider cannot be deleted while patients are assigned to it",
            )],
        }
    }
}

impl AppError {
    /// Build an error from a non-success response of the remote service.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<RemoteErrorBody>(body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unexpected response")
                    .to_string()
            });

        match status {
            StatusCode::UNAUTHORIZED => AppError::Authentication(message),
            StatusCode::FORBIDDEN => AppError::Authorization(message),
            StatusCode::NOT_FOUND => AppError::NotFound(message),
            StatusCode::BAD_REQUEST => AppError::BadRequest(message),
            StatusCode::CONFLICT => AppError::Conflict(message),
            _ => AppError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Text supplied by the server (or by local validation), if any
    fn detail(&self) -> Option<&str> {
        match self {
            AppError::Authentication(msg)
            | AppError::Authorization(msg)
            | AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::Decode(msg)
            | AppError::Session(msg) => Some(msg.as_str()),
            AppError::Api { message, .. } => Some(message.as_str()),
            AppError::Transport(_) | AppError::Io(_) | AppError::Internal(_) => None,
        }
    }

    /// User-facing alert text for a failed operation.
    ///
    /// Every failure is reported as "{label} failed"; the server message is
    /// substituted when present, and a 400 response matching one of the
    /// operation's keywords gets a tailored text.
    pub fn user_message(&self, label: &str, operation: Operation) -> String {
        if let AppError::BadRequest(msg) = self {
            let lowered = msg.to_lowercase();
            if let Some((_, tailored)) = operation
                .tailored()
                .iter()
                .find(|(keyword, _)| lowered.contains(keyword))
            {
                return format!("{} failed: {}", label, tailored);
            }
        }

        match self.detail() {
            Some(detail) if !detail.is_empty() => format!("{} failed: {}", label, detail),
            _ => format!("{} failed", label),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let reasons: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                format!("{}: {}", field, reasons.join(", "))
            })
            .collect();
        fields.sort();
        AppError::Validation(fields.join("; "))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Decode(e.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
