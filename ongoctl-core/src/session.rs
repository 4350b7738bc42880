//! Explicit session context for the HTTP collaborator.
//!
//! The bearer token lives in a `SessionStore` handed to `ApiClient` at
//! construction, never in ambient global state. The store is file-backed
//! (`~/.ongoctl/session.json`) so independent invocations share one session,
//! and it is cleared in place when the backend answers 401.

use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ApiError;

/// Persisted session: the bearer token plus whatever identity the
/// backend handed out at login time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}

impl Session {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user: None,
        }
    }
}

/// File-backed session storage with an in-memory view.
///
/// An ephemeral store (no path) covers `--token` overrides and tests;
/// clearing it only drops the in-memory session.
#[derive(Debug)]
pub struct SessionStore {
    path: Option<PathBuf>,
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Open the store at `path`, loading an existing session if present.
    /// A missing file is an empty session, not an error.
    pub fn open(path: PathBuf) -> Result<Self, ApiError> {
        let current = match fs::read_to_string(&path) {
            Ok(raw) => Some(
                serde_json::from_str(&raw)
                    .map_err(|err| ApiError::decode(path.display().to_string(), err))?,
            ),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => return Err(ApiError::storage(path, err)),
        };

        Ok(Self {
            path: Some(path),
            current: RwLock::new(current),
        })
    }

    /// In-memory store with no persistence.
    pub fn ephemeral(session: Option<Session>) -> Self {
        Self {
            path: None,
            current: RwLock::new(session),
        }
    }

    /// Default session path: ~/.ongoctl/session.json
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ongoctl")
            .join("session.json")
    }

    /// Current bearer token, if a session is active.
    pub fn token(&self) -> Option<String> {
        self.current
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|s| s.token.clone()))
    }

    /// Replace the session and persist it.
    pub fn save(&self, session: Session) -> Result<(), ApiError> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|err| ApiError::storage(parent, err))?;
            }
            let raw = serde_json::to_string_pretty(&session)
                .map_err(|err| ApiError::decode(path.display().to_string(), err))?;
            fs::write(path, raw).map_err(|err| ApiError::storage(path.clone(), err))?;
        }

        if let Ok(mut guard) = self.current.write() {
            *guard = Some(session);
        }
        Ok(())
    }

    /// Drop the session from memory and disk. Called on 401.
    ///
    /// Best-effort on the disk side: a failed unlink is logged, not fatal,
    /// since the in-memory session is already gone.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.current.write() {
            *guard = None;
        }

        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => warn!(path = %path.display(), error = %err, "failed to remove session file"),
            }
        }
    }
}
