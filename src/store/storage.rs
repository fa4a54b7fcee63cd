use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::AppResult;

/// Keys of the preference storage schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Favorites,
    UserRatings,
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKey::Favorites => write!(f, "favorites"),
            StorageKey::UserRatings => write!(f, "userRatings"),
        }
    }
}

/// String key-value storage holding serialized preference records
pub trait KeyValueStorage {
    fn get_item(&self, key: StorageKey) -> AppResult<Option<String>>;

    fn set_item(&mut self, key: StorageKey, value: String) -> AppResult<()>;

    fn remove_item(&mut self, key: StorageKey) -> AppResult<()>;
}

/// Storage that lives only as long as the value
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: StorageKey) -> AppResult<Option<String>> {
        Ok(self.items.get(&key.to_string()).cloned())
    }

    fn set_item(&mut self, key: StorageKey, value: String) -> AppResult<()> {
        self.items.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_item(&mut self, key: StorageKey) -> AppResult<()> {
        self.items.remove(&key.to_string());
        Ok(())
    }
}

/// Storage persisted as a single JSON object file.
///
/// The file is read once on open and rewritten whole on every change. A
/// missing or unreadable file is an empty storage; unreadable contents are
/// replaced on the next write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStorage {
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        let items = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(
                    error = %e,
                    path = %path.display(),
                    "Discarding unreadable preference storage"
                );
                BTreeMap::new()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), keys = items.len(), "Opened preference storage");

        Ok(Self { path, items })
    }

    fn flush(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.items)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: StorageKey) -> AppResult<Option<String>> {
        Ok(self.items.get(&key.to_string()).cloned())
    }

    fn set_item(&mut self, key: StorageKey, value: String) -> AppResult<()> {
        self.items.insert(key.to_string(), value);
        self.flush()
    }

    fn remove_item(&mut self, key: StorageKey) -> AppResult<()> {
        if self.items.remove(&key.to_string()).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_display() {
        assert_eq!(format!("{}", StorageKey::Favorites), "favorites");
        assert_eq!(format!("{}", StorageKey::UserRatings), "userRatings");
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item(StorageKey::Favorites).unwrap(), None);

        storage
            .set_item(StorageKey::Favorites, "[]".to_string())
            .unwrap();
        assert_eq!(
            storage.get_item(StorageKey::Favorites).unwrap().as_deref(),
            Some("[]")
        );

        storage.remove_item(StorageKey::Favorites).unwrap();
        assert_eq!(storage.get_item(StorageKey::Favorites).unwrap(), None);
    }

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("prefs.json")).unwrap();
        assert_eq!(storage.get_item(StorageKey::UserRatings).unwrap(), None);
    }

    #[test]
    fn test_file_storage_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut storage = FileStorage::open(&path).unwrap();
        storage
            .set_item(StorageKey::UserRatings, r#"[{"movieId":1,"rating":9}]"#.to_string())
            .unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(
            reopened.get_item(StorageKey::UserRatings).unwrap().as_deref(),
            Some(r#"[{"movieId":1,"rating":9}]"#)
        );
    }

    #[test]
    fn test_file_storage_corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"favorites": "[]""#).unwrap();

        let mut storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get_item(StorageKey::Favorites).unwrap(), None);

        storage
            .set_item(StorageKey::Favorites, "[]".to_string())
            .unwrap();
        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(
            reopened.get_item(StorageKey::Favorites).unwrap().as_deref(),
            Some("[]")
        );
    }
}
