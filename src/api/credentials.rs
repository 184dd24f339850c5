//! # Credential Store
//!
//! The bearer token is an explicit capability handed to the API client,
//! never looked up ambiently. Each request asks the store for the token at
//! call time, so a login or logout is visible to the very next request.
//!
//! The file-backed store keeps the token in a small JSON document keyed by
//! the fixed name `token`:
//!
//! ```text
//! ~/.tourdesk/session.json
//! { "token": "eyJhbGciOi..." }
//! ```
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`). The token is not
//! encrypted and carries no expiry.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Fixed key under which the token is persisted.
pub const TOKEN_KEY: &str = "token";

/// Read/write access to the persisted bearer credential.
pub trait CredentialStore: Send + Sync {
    /// Returns the stored token, if any.
    fn token(&self) -> Option<String>;

    /// Persists a new token, replacing any previous one.
    fn store(&self, token: &str) -> io::Result<()>;

    /// Removes the stored token.
    fn clear(&self) -> io::Result<()>;
}

#[derive(Serialize, Deserialize, Default, Debug)]
struct SessionFile {
    #[serde(rename = "token", default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// Token persisted to a JSON file on disk.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns `~/.tourdesk/session.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".tourdesk").join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Option<SessionFile> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Failed to read session file {}: {}", self.path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&contents) {
            Ok(file) => Some(file),
            Err(e) => {
                warn!("Ignoring malformed session file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn write(&self, file: &SessionFile) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(file).map_err(io::Error::other)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)
    }
}

impl CredentialStore for FileCredentialStore {
    fn token(&self) -> Option<String> {
        self.read()
            .and_then(|f| f.token)
            .filter(|t| !t.is_empty())
    }

    fn store(&self, token: &str) -> io::Result<()> {
        debug!("Persisting {} to {}", TOKEN_KEY, self.path.display());
        self.write(&SessionFile {
            token: Some(token.to_string()),
        })
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Token held in memory only. Used by tests and headless one-shot commands.
#[derive(Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn token(&self) -> Option<String> {
        self.token.lock().ok().and_then(|t| t.clone())
    }

    fn store(&self, token: &str) -> io::Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| io::Error::other("credential lock poisoned"))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| io::Error::other("credential lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("session.json"));

        assert_eq!(store.token(), None);
        store.store("abc123").unwrap();
        assert_eq!(store.token().as_deref(), Some("abc123"));

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"token\""));

        store.clear().unwrap();
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_file_store_clear_when_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested").join("session.json"));
        assert!(store.clear().is_ok());
    }

    #[test]
    fn test_file_store_ignores_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();
        let store = FileCredentialStore::new(path);
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_empty_token_counts_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"token": ""}"#).unwrap();
        assert_eq!(FileCredentialStore::new(path).token(), None);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryCredentialStore::new();
        assert!(store.token().is_none());
        store.store("t").unwrap();
        assert_eq!(store.token().as_deref(), Some("t"));
        store.clear().unwrap();
        assert!(store.token().is_none());
    }
}
