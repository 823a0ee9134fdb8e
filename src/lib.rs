//! DarConnect console
//!
//! Command-line console for a patient-transport coordination service.
//! Administrators manage drivers, patients, insurance providers, schedules
//! and trips; drivers view their weekly agenda and act on their daily trips.
//! All data is owned by the remote REST service.

use std::sync::Arc;

pub mod config;
pub mod console;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::Repository;
use services::{session::SessionStore, Services};

/// Console state shared by every command handler
#[derive(Clone)]
pub struct Console {
    pub config: Arc<AppConfig>,
    pub services: Arc<Services>,
}

impl Console {
    /// Wire the session store, HTTP repository and services from config
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let session = SessionStore::new(config.session.path());
        let repository = Repository::new(&config.api, session)?;
        let services = Services::new(repository, &config.schedule);
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }

    /// Restore a session persisted by an earlier invocation
    pub fn hydrate(&self) -> AppResult<()> {
        if let Some(session) = self.services.session.hydrate()? {
            tracing::debug!(user = %session.username, "Using persisted session");
        }
        Ok(())
    }
}
