use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;
use tracing::{debug, warn};

use shared_models::auth::{Session, SessionUser};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(#[from] io::Error),

    #[error("Session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// JSON file holding the session between runs.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(session)?)?;
        debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Shared capability handed to every view: read the current user and token, log in or out.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    current: Arc<RwLock<Option<Session>>>,
    store: Option<SessionStore>,
}

impl SessionHandle {
    /// Session that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Session backed by `store`, restored from it if a previous login was saved.
    pub fn with_store(store: SessionStore) -> Self {
        let restored = match store.load() {
            Ok(session) => session,
            Err(e) => {
                warn!("Discarding unreadable session at {}: {}", store.path().display(), e);
                None
            }
        };

        Self {
            current: Arc::new(RwLock::new(restored)),
            store: Some(store),
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.current().map(|session| session.user)
    }

    pub fn token(&self) -> Option<String> {
        self.current().map(|session| session.token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn login(&self, session: Session) -> Result<(), SessionError> {
        if let Some(store) = &self.store {
            store.save(&session)?;
        }
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        Ok(())
    }

    pub fn logout(&self) -> Result<(), SessionError> {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
        if let Some(store) = &self.store {
            store.clear()?;
        }
        Ok(())
    }
}
