use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

use super::types::UserProfile;

/// Key the profile document is stored under.
pub const PROFILE_KEY: &str = "userProfile";

/// Persistence seam for the user profile.
///
/// `load` returns `Ok(None)` when nothing has been stored yet and an error
/// when an entry exists but cannot be decoded.
pub trait ProfileStore {
    fn load(&self) -> Result<Option<UserProfile>>;
    fn save(&self, profile: &UserProfile) -> Result<()>;
}

/// Stores the profile inside a JSON document on disk, under [`PROFILE_KEY`].
///
/// Other top-level keys in the document are preserved on save.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Option<Map<String, Value>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let doc: Map<String, Value> = serde_json::from_str(&content)
            .with_context(|| format!("{} is not a JSON object", self.path.display()))?;
        Ok(Some(doc))
    }
}

impl ProfileStore for JsonFileStore {
    fn load(&self) -> Result<Option<UserProfile>> {
        let Some(mut doc) = self.read_document()? else {
            return Ok(None);
        };
        let Some(entry) = doc.remove(PROFILE_KEY) else {
            return Ok(None);
        };
        let profile = serde_json::from_value(entry)
            .with_context(|| format!("invalid `{PROFILE_KEY}` entry"))?;
        Ok(Some(profile))
    }

    fn save(&self, profile: &UserProfile) -> Result<()> {
        // An unreadable document is replaced rather than blocking the save.
        let mut doc = self.read_document().ok().flatten().unwrap_or_default();
        doc.insert(PROFILE_KEY.to_string(), serde_json::to_value(profile)?);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(&doc)?)?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;

        debug!(path = %self.path.display(), routes = profile.routes.len(), "Profile saved");
        Ok(())
    }
}

/// In-memory store holding the raw JSON entry, for tests and previews.
#[derive(Default)]
pub struct MemoryStore {
    entry: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with an arbitrary raw entry, which need not be valid JSON.
    pub fn with_raw(raw: &str) -> Self {
        Self {
            entry: Mutex::new(Some(raw.to_string())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.entry.lock().ok().and_then(|entry| entry.clone())
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self) -> Result<Option<UserProfile>> {
        let Some(raw) = self.raw() else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, profile: &UserProfile) -> Result<()> {
        let raw = serde_json::to_string(profile)?;
        let mut entry = self
            .entry
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        *entry = Some(raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::types::default_profile;

    #[test]
    fn test_file_store_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("profile.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/profile.json"));

        let mut profile = default_profile();
        profile.name = "Sita".into();
        store.save(&profile).unwrap();

        assert_eq!(store.load().unwrap(), Some(profile));
        assert!(!dir.path().join("nested/profile.json.tmp").exists());
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.load().unwrap().is_none());
        store.save(&default_profile()).unwrap();

        let doc: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["theme"], "dark");
        assert_eq!(doc[PROFILE_KEY]["name"], "Guest User");
    }

    #[test]
    fn test_file_store_corrupt_entry_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, r#"{"userProfile":{"name":42}}"#).unwrap();

        assert!(JsonFileStore::new(&path).load().is_err());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&default_profile()).unwrap();
        assert_eq!(store.load().unwrap(), Some(default_profile()));
    }

    #[test]
    fn test_memory_store_garbage_is_error() {
        assert!(MemoryStore::with_raw("{not json").load().is_err());
    }
}
