//! Local credential storage for the API key.
//!
//! A flat string key-value store. The file-backed store keeps a JSON object
//! in `credentials.json` under the data directory: no encryption, no
//! expiry, same trust level as browser local storage.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info};

/// Key under which the API key is stored.
pub const API_KEY_NAME: &str = "musicbank_api_key";

/// File name of the JSON store inside the data directory.
pub const CREDENTIALS_FILE: &str = "credentials.json";

/// Errors from credential storage.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("credential store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("API key cannot be empty")]
    Empty,
}

/// String key-value storage.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CredentialError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CredentialError>;
    fn remove(&self, key: &str) -> Result<(), CredentialError>;
}

/// Read the saved API key. Empty stored values count as absent.
pub fn load_api_key(store: &dyn CredentialStore) -> Result<Option<String>, CredentialError> {
    Ok(store.get(API_KEY_NAME)?.filter(|k| !k.trim().is_empty()))
}

/// Trim and save the API key. Rejects empty input.
pub fn save_api_key(store: &dyn CredentialStore, key: &str) -> Result<(), CredentialError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(CredentialError::Empty);
    }
    store.set(API_KEY_NAME, key)?;
    info!(length = key.len(), "API key saved");
    Ok(())
}

/// Pick the key for a one-shot command: an explicit value, then the
/// environment, then the store. Blank candidates are skipped.
pub fn resolve_api_key(
    explicit: Option<&str>,
    env: Option<&str>,
    store: &dyn CredentialStore,
) -> Result<Option<String>, CredentialError> {
    let given = [explicit, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|k| !k.is_empty());
    match given {
        Some(key) => Ok(Some(key.to_string())),
        None => load_api_key(store),
    }
}

/// Forget the saved API key.
pub fn clear_api_key(store: &dyn CredentialStore) -> Result<(), CredentialError> {
    store.remove(API_KEY_NAME)
}

/// Show only the first and last few characters of a key.
pub fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(chars.len() - 8))
}

/// JSON-file-backed store. Every write rewrites the whole file.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileCredentialStore {
    /// Store at `<data_dir>/credentials.json`. The file is created lazily.
    pub fn open(data_dir: &Path) -> Self {
        Self::at(data_dir.join(CREDENTIALS_FILE))
    }

    /// Store at an explicit file path.
    pub fn at(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, CredentialError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "credential store written");
        Ok(())
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        // the guarded value is (), so a poisoned lock carries no bad state
        self.lock.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, CredentialError> {
        let _guard = self.guard();
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CredentialError> {
        let _guard = self.guard();
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<(), CredentialError> {
        let _guard = self.guard();
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, CredentialError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CredentialError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CredentialError> {
        self.entries().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::open(dir.path());
        assert_eq!(store.get(API_KEY_NAME).unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn persists_across_instances() {
        let dir = TempDir::new().unwrap();
        save_api_key(&FileCredentialStore::open(dir.path()), "  AIza-secret ").unwrap();

        let reopened = FileCredentialStore::open(dir.path());
        assert_eq!(load_api_key(&reopened).unwrap(), Some("AIza-secret".into()));
    }

    #[test]
    fn creates_missing_data_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileCredentialStore::open(&nested);
        store.set("k", "v").unwrap();
        assert!(nested.join(CREDENTIALS_FILE).is_file());
    }

    #[test]
    fn other_keys_survive_writes() {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::open(dir.path());
        store.set("other", "x").unwrap();
        save_api_key(&store, "key").unwrap();
        clear_api_key(&store).unwrap();
        assert_eq!(store.get("other").unwrap(), Some("x".into()));
        assert_eq!(load_api_key(&store).unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CREDENTIALS_FILE), "{not json").unwrap();
        let store = FileCredentialStore::open(dir.path());
        assert!(matches!(store.get(API_KEY_NAME), Err(CredentialError::Corrupt(_))));
    }

    #[test]
    fn empty_key_rejected() {
        let store = MemoryCredentialStore::new();
        assert!(matches!(save_api_key(&store, "   "), Err(CredentialError::Empty)));
        assert_eq!(store.get(API_KEY_NAME).unwrap(), None);
    }

    #[test]
    fn blank_stored_value_is_absent() {
        let store = MemoryCredentialStore::new();
        store.set(API_KEY_NAME, "").unwrap();
        assert_eq!(load_api_key(&store).unwrap(), None);
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::open(dir.path());
        store.remove(API_KEY_NAME).unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn resolve_prefers_explicit_then_env_then_store() {
        let store = MemoryCredentialStore::new();
        save_api_key(&store, "stored").unwrap();

        let pick = |explicit, env| resolve_api_key(explicit, env, &store).unwrap();
        assert_eq!(pick(Some("flag"), Some("env")), Some("flag".into()));
        assert_eq!(pick(None, Some(" env ")), Some("env".into()));
        assert_eq!(pick(Some("  "), None), Some("stored".into()));
        assert_eq!(pick(None, None), Some("stored".into()));
    }

    #[test]
    fn resolve_with_nothing_anywhere() {
        let store = MemoryCredentialStore::new();
        assert_eq!(resolve_api_key(None, Some(""), &store).unwrap(), None);
    }

    #[test]
    fn mask_hides_middle() {
        assert_eq!(mask("AIzaSyABCDEFGH1234"), "AIza**********1234");
        assert_eq!(mask("short"), "*****");
        assert_eq!(mask(""), "");
    }
}
