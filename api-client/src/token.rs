//! Persisted bearer token.
//!
//! The token lives under a fixed key so every command of the client sees the
//! same session until it is cleared on logout.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::{Map, Value};

use common::errors::{AppError, AppResult};

/// Key the token is stored under.
pub const TOKEN_KEY: &str = "authToken";

/// A bearer token issued by the login endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wraps a token; blank input is not a token.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// Returns the raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Storage for the session token.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, if any.
    fn load(&self) -> AppResult<Option<AuthToken>>;

    /// Replaces the stored token.
    fn save(&self, token: &AuthToken) -> AppResult<()>;

    /// Removes the stored token. Succeeds when nothing was stored.
    fn clear(&self) -> AppResult<()>;

    /// Whether a token is currently stored.
    fn is_authenticated(&self) -> bool {
        matches!(self.load(), Ok(Some(_)))
    }
}

/// Token store backed by a small JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the token file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> AppResult<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(store_error(&self.path, e)),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&raw).map_err(|e| store_error(&self.path, e))
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| store_error(parent, e))?;
        }
        let raw = serde_json::to_string_pretty(entries).map_err(|e| store_error(&self.path, e))?;
        fs::write(&self.path, raw).map_err(|e| store_error(&self.path, e))?;
        restrict_permissions(&self.path)
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> AppResult<Option<AuthToken>> {
        let entries = self.read_entries()?;
        Ok(entries
            .get(TOKEN_KEY)
            .and_then(Value::as_str)
            .and_then(AuthToken::new))
    }

    fn save(&self, token: &AuthToken) -> AppResult<()> {
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(TOKEN_KEY.to_string(), Value::String(token.as_str().to_string()));
        self.write_entries(&entries)?;
        tracing::debug!(path = %self.path.display(), "token stored");
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            // A corrupt file holds no usable token; drop it entirely.
            Err(_) => {
                return match fs::remove_file(&self.path) {
                    Ok(()) => Ok(()),
                    Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                    Err(e) => Err(store_error(&self.path, e)),
                };
            }
        };
        if entries.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }
        self.write_entries(&entries)?;
        tracing::debug!(path = %self.path.display(), "token cleared");
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> AppResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| store_error(path, e))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> AppResult<()> {
    Ok(())
}

fn store_error(path: &Path, err: impl std::fmt::Display) -> AppError {
    AppError::TokenStore(format!("{}: {}", path.display(), err))
}

/// Process-local token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<AuthToken>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `token`.
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(AuthToken::new(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> AppResult<Option<AuthToken>> {
        Ok(self.token.lock().clone())
    }

    fn save(&self, token: &AuthToken) -> AppResult<()> {
        *self.token.lock() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        *self.token.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token_is_rejected() {
        assert!(AuthToken::new("").is_none());
        assert!(AuthToken::new("   ").is_none());
        assert_eq!(AuthToken::new("t").unwrap().as_str(), "t");
    }

    #[test]
    fn test_debug_hides_secret() {
        let token = AuthToken::new("super-secret").unwrap();
        assert!(!format!("{:?}", token).contains("super-secret"));
    }

    #[test]
    fn test_file_store_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("token.json"));

        assert!(store.load().unwrap().is_none());
        assert!(!store.is_authenticated());

        store.save(&AuthToken::new("abc").unwrap()).unwrap();
        assert_eq!(store.load().unwrap().unwrap().as_str(), "abc");

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[TOKEN_KEY], "abc");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_clear_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token.json"));
        assert!(store.clear().is_ok());
    }

    #[test]
    fn test_file_store_clear_removes_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileTokenStore::new(&path);
        assert!(store.load().is_err());
        store.clear().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::with_token("abc");
        assert!(store.is_authenticated());
        store.clear().unwrap();
        assert!(!store.is_authenticated());
    }
}
