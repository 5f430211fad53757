use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use client::{Session, SessionError};
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: String,
    saved_at: DateTime<Utc>,
}

/// The bearer token of the signed-in user, persisted as TOML.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        match &config.file {
            Some(path) => Ok(Self::new(path)),
            None => Self::default_path()
                .map(Self::new)
                .context("No config directory on this system; set session.file"),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fellowship").join("session.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let stored = StoredSession {
            token: session.token().to_string(),
            saved_at: Utc::now(),
        };
        let mut file = open_private(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        file.write_all(toml::to_string(&stored)?.as_bytes())
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// The stored session, or `None` when there is none or it can no longer be used.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let stored: StoredSession = match toml::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file: {}", e);
                return Ok(None);
            }
        };
        match Session::from_token(stored.token) {
            Ok(session) => Ok(Some(session)),
            Err(SessionError::Expired) => {
                tracing::info!("Stored session has expired");
                Ok(None)
            }
            Err(e) => {
                tracing::warn!("Ignoring stored session: {}", e);
                Ok(None)
            }
        }
    }

    /// Returns whether a session file was removed.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", self.path.display())),
        }
    }
}

/// Truncate or create `path` readable by the owner only. The mode is set at
/// creation and re-applied to a file that already existed.
#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
