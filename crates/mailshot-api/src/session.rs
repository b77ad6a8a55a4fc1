//! Session context holding the authentication token
//!
//! A `Session` is created once at startup and shared (it is cheap to clone)
//! between the `ApiClient`, which reads the token before every request, and
//! the login/logout actions, which are the only writers. When constructed
//! with [`Session::persisted`] the token survives restarts in a small JSON
//! file.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    token: Option<String>,
}

/// Shared, optionally persisted, authentication state
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
    store: Option<PathBuf>,
}

impl Session {
    /// A session that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// A session backed by a file, loading any token saved there
    pub fn persisted(path: impl Into<PathBuf>) -> crate::Result<Self> {
        let path = path.into();
        let token = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| {
                ApiError::Session(format!("Failed to read session file {:?}: {}", path, e))
            })?;
            match serde_json::from_str::<StoredSession>(&content) {
                Ok(stored) => stored.token,
                Err(e) => {
                    tracing::warn!(
                        "Ignoring unreadable session file {:?}, starting anonymous: {}",
                        path,
                        e
                    );
                    None
                }
            }
        } else {
            None
        };
        tracing::debug!(
            "Loaded session from {:?} (authenticated={})",
            path,
            token.is_some()
        );
        Ok(Self {
            token: Arc::new(RwLock::new(token)),
            store: Some(path),
        })
    }

    /// Current token
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Store a freshly obtained token
    pub fn login(&self, token: impl Into<String>) -> crate::Result<()> {
        let token = token.into();
        self.persist(Some(&token))?;
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token);
        tracing::info!("Session started");
        Ok(())
    }

    /// Forget the token
    pub fn logout(&self) -> crate::Result<()> {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        if let Some(path) = &self.store {
            if path.exists() {
                std::fs::remove_file(path).map_err(|e| {
                    ApiError::Session(format!("Failed to remove session file {:?}: {}", path, e))
                })?;
            }
        }
        tracing::info!("Session ended");
        Ok(())
    }

    fn persist(&self, token: Option<&str>) -> crate::Result<()> {
        let Some(path) = &self.store else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&StoredSession {
            token: token.map(str::to_string),
        })?;
        std::fs::write(path, content).map_err(|e| {
            ApiError::Session(format!("Failed to write session file {:?}: {}", path, e))
        })
    }
}
