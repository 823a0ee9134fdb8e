//! Current-user session store and navigation guards.
//!
//! One writer (login / logout), many readers. Readers either take a snapshot
//! with [`SessionStore::current`] or follow changes through a
//! [`tokio::sync::watch`] receiver from [`SessionStore::subscribe`].

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::sync::watch;

use crate::{
    error::{AppError, AppResult},
    models::{enums::Role, user::Session},
};

struct SessionInner {
    tx: watch::Sender<Option<Session>>,
    file: Option<PathBuf>,
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

impl SessionStore {
    /// Create an empty store persisting to `file` (if any)
    pub fn new(file: Option<PathBuf>) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            inner: Arc::new(SessionInner { tx, file }),
        }
    }

    /// Store that never touches the filesystem
    pub fn in_memory() -> Self {
        Self::new(None)
    }

    pub fn file(&self) -> Option<&Path> {
        self.inner.file.as_deref()
    }

    /// Load the persisted session record, if there is one.
    /// A corrupt record is discarded and reported as no session.
    pub fn hydrate(&self) -> AppResult<Option<Session>> {
        let Some(path) = self.file() else {
            return Ok(self.current());
        };

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => {
                tracing::debug!(user = %session.username, role = %session.role, "Session restored");
                self.inner.tx.send_replace(Some(session.clone()));
                Ok(Some(session))
            }
            Err(e) => {
                tracing::warn!("Discarding unreadable session record {}: {}", path.display(), e);
                remove_if_exists(path)?;
                Ok(None)
            }
        }
    }

    /// Record a new session (login) and persist it
    pub fn set(&self, session: Session) -> AppResult<()> {
        if let Some(path) = self.file() {
            let raw = serde_json::to_string_pretty(&session)
                .map_err(|e| AppError::Session(format!("Failed to encode session: {}", e)))?;
            fs::write(path, raw)?;
        }
        tracing::info!(user = %session.username, role = %session.role, "Logged in");
        self.inner.tx.send_replace(Some(session));
        Ok(())
    }

    /// Drop the current session (logout)
    pub fn clear(&self) -> AppResult<()> {
        if let Some(path) = self.file() {
            remove_if_exists(path)?;
        }
        if self.inner.tx.send_replace(None).is_some() {
            tracing::info!("Logged out");
        }
        Ok(())
    }

    pub fn current(&self) -> Option<Session> {
        self.inner.tx.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.tx.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn role(&self) -> Option<Role> {
        self.inner.tx.borrow().as_ref().map(|s| s.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.tx.borrow().is_some()
    }

    /// Session or an authentication error
    pub fn require(&self) -> AppResult<Session> {
        self.current()
            .ok_or_else(|| AppError::Authentication("Not logged in".to_string()))
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.inner.tx.subscribe()
    }
}

fn remove_if_exists(path: &Path) -> AppResult<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Presence check plus optional role allow-list for a console command.
/// Client-side convenience only; the remote service enforces access.
#[derive(Debug, Clone, Copy)]
pub struct RouteGuard {
    roles: Option<&'static [Role]>,
}

impl RouteGuard {
    /// No session needed
    pub const PUBLIC: RouteGuard = RouteGuard { roles: Some(&[]) };

    pub const fn authenticated() -> Self {
        Self { roles: None }
    }

    pub const fn roles(roles: &'static [Role]) -> Self {
        Self { roles: Some(roles) }
    }

    pub fn is_public(&self) -> bool {
        matches!(self.roles, Some(roles) if roles.is_empty())
    }

    /// Current session if the guard lets it through
    pub fn check(&self, store: &SessionStore) -> AppResult<Option<Session>> {
        if self.is_public() {
            return Ok(store.current());
        }

        let session = store.require()?;
        if let Some(roles) = self.roles {
            if !roles.contains(&session.role) {
                return Err(AppError::Authorization(format!(
                    "{} accounts cannot use this command",
                    session.role
                )));
            }
        }
        Ok(Some(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session {
            id: 4,
            username: "mlopez".into(),
            role,
            token: "token-simulado-1".into(),
        }
    }

    #[test]
    fn test_in_memory_lifecycle() {
        let store = SessionStore::in_memory();
        assert!(!store.is_authenticated());

        store.set(session(Role::Driver)).unwrap();
        assert_eq!(store.token().as_deref(), Some("token-simulado-1"));
        assert_eq!(store.role(), Some(Role::Driver));

        store.clear().unwrap();
        assert!(store.current().is_none());
        assert!(matches!(store.require(), Err(AppError::Authentication(_))));
    }

    #[test]
    fn test_persist_and_hydrate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let writer = SessionStore::new(Some(path.clone()));
        writer.set(session(Role::Administrator)).unwrap();
        assert!(path.exists());

        let reader = SessionStore::new(Some(path.clone()));
        assert!(reader.current().is_none());
        let restored = reader.hydrate().unwrap();
        assert_eq!(restored, Some(session(Role::Administrator)));
        assert!(reader.is_authenticated());

        reader.clear().unwrap();
        assert!(!path.exists());
        assert_eq!(SessionStore::new(Some(path)).hydrate().unwrap(), None);
    }

    #[test]
    fn test_corrupt_record_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = SessionStore::new(Some(path.clone()));
        assert_eq!(store.hydrate().unwrap(), None);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = SessionStore::in_memory();
        let mut rx = store.subscribe();

        store.set(session(Role::Driver)).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().map(|s| s.id), Some(4));

        store.clear().unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }

    #[test]
    fn test_route_guard() {
        let store = SessionStore::in_memory();
        let admin_only = RouteGuard::roles(&[Role::Administrator]);

        assert!(matches!(admin_only.check(&store), Err(AppError::Authentication(_))));
        assert!(RouteGuard::PUBLIC.check(&store).unwrap().is_none());

        store.set(session(Role::Driver)).unwrap();
        assert!(matches!(admin_only.check(&store), Err(AppError::Authorization(_))));
        assert!(RouteGuard::authenticated().check(&store).unwrap().is_some());
        assert!(RouteGuard::roles(&[Role::Driver, Role::Administrator])
            .check(&store)
            .is_ok());
    }
}
