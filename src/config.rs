//! Persistence of destinations, destination lists and sessions.
//!
//! All user state lives as pretty-printed JSON under a fixed directory in
//! the user's home (`~/.mediasort`):
//!
//! - `destinations.json` — the active [`Destination`] list
//! - `destination-lists.json` — named, reusable destination lists
//! - `sessions/<key>.json` — one in-progress classification session per
//!   source directory, keyed by a filesystem-safe transform of the source
//!   path
//!
//! The base directory is injectable so tests can point the store at a
//! temporary location.

use crate::destination::Destination;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while loading or saving persisted state.
#[derive(Debug)]
pub enum ConfigError {
    /// The HOME environment variable is not set, so no config directory
    /// can be derived.
    NoHomeDirectory,
    /// A file or directory could not be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A persisted file is not valid JSON for its expected shape.
    InvalidFormat { path: PathBuf, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoHomeDirectory => {
                write!(f, "Cannot locate home directory (HOME is not set)")
            }
            Self::Io { path, source } => {
                write!(f, "IO error for {}: {}", path.display(), source)
            }
            Self::InvalidFormat { path, reason } => {
                write!(f, "Invalid config file {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result type for persistence operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// An in-progress classification session for one source directory.
///
/// Saved whenever the user pauses classifying, so a later run can resume
/// from `current_index` with the same destinations and decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// The source directory being classified.
    pub source_path: String,
    /// The destination list in effect when the session was saved.
    #[serde(default)]
    pub destinations: Vec<Destination>,
    /// Decisions made so far: source file path → destination label.
    #[serde(default)]
    pub classifications: BTreeMap<String, String>,
    /// Index of the next file to classify.
    #[serde(default)]
    pub current_index: usize,
    /// Epoch milliseconds of the last save.
    pub last_saved: i64,
}

impl SessionState {
    /// Creates an empty session for a source directory, stamped now.
    pub fn new(source_path: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            destinations: Vec::new(),
            classifications: BTreeMap::new(),
            current_index: 0,
            last_saved: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Filesystem-backed store for destinations and sessions.
pub struct ConfigStore {
    base_dir: PathBuf,
}

impl ConfigStore {
    /// Opens the store at its default location, `~/.mediasort`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHomeDirectory`] when HOME is not set.
    pub fn new() -> ConfigResult<Self> {
        let home = std::env::var("HOME").map_err(|_| ConfigError::NoHomeDirectory)?;
        Ok(Self::with_base_dir(PathBuf::from(home).join(".mediasort")))
    }

    /// Opens the store at an explicit base directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    fn destinations_path(&self) -> PathBuf {
        self.base_dir.join("destinations.json")
    }

    fn destination_lists_path(&self) -> PathBuf {
        self.base_dir.join("destination-lists.json")
    }

    /// Returns the session file path for a source directory. Every
    /// character of the source path that is not ASCII alphanumeric maps
    /// to `_`.
    fn session_path(&self, source_path: &str) -> PathBuf {
        let safe_name: String = source_path
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.base_dir
            .join("sessions")
            .join(format!("{}.json", safe_name))
    }

    /// Loads the configured destination list. A missing file yields an
    /// empty list.
    pub fn load_destinations(&self) -> ConfigResult<Vec<Destination>> {
        read_json_or(&self.destinations_path(), Vec::new)
    }

    /// Saves the destination list, creating the config directory if
    /// needed.
    pub fn save_destinations(&self, destinations: &[Destination]) -> ConfigResult<()> {
        write_json(&self.destinations_path(), &destinations)
    }

    /// Loads the named destination lists. A missing file yields an empty
    /// map.
    pub fn load_destination_lists(&self) -> ConfigResult<HashMap<String, Vec<Destination>>> {
        read_json_or(&self.destination_lists_path(), HashMap::new)
    }

    /// Saves the named destination lists.
    pub fn save_destination_lists(
        &self,
        lists: &HashMap<String, Vec<Destination>>,
    ) -> ConfigResult<()> {
        write_json(&self.destination_lists_path(), lists)
    }

    /// Loads the session for a source directory, or `None` when no
    /// session has been saved for it.
    pub fn load_session(&self, source_path: &str) -> ConfigResult<Option<SessionState>> {
        let path = self.session_path(source_path);
        if !path.exists() {
            return Ok(None);
        }
        read_json(&path).map(Some)
    }

    /// Saves a session, keyed by its source path.
    pub fn save_session(&self, session: &SessionState) -> ConfigResult<()> {
        write_json(&self.session_path(&session.source_path), session)
    }

    /// Deletes the session for a source directory, if one exists.
    pub fn delete_session(&self, source_path: &str) -> ConfigResult<()> {
        let path = self.session_path(source_path);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| ConfigError::Io { path, source: e })?;
        }
        Ok(())
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> ConfigResult<T> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn read_json_or<T: for<'de> Deserialize<'de>>(
    path: &Path,
    default: impl FnOnce() -> T,
) -> ConfigResult<T> {
    if !path.exists() {
        return Ok(default());
    }
    read_json(path)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> ConfigResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|e| ConfigError::InvalidFormat {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    fs::write(path, json).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, ConfigStore) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = ConfigStore::with_base_dir(temp_dir.path().join("config"));
        (temp_dir, store)
    }

    #[test]
    fn test_missing_destinations_file_yields_empty_list() {
        let (_temp, store) = store();
        let destinations = store.load_destinations().expect("Load failed");
        assert!(destinations.is_empty());
    }

    #[test]
    fn test_destinations_round_trip() {
        let (_temp, store) = store();
        let destinations = vec![
            Destination::new("Vacation", "v", "/media/vacation"),
            Destination::new("Family", "f", "/media/family"),
        ];
        store.save_destinations(&destinations).expect("Save failed");
        let loaded = store.load_destinations().expect("Load failed");
        assert_eq!(loaded, destinations);
    }

    #[test]
    fn test_destination_lists_round_trip() {
        let (_temp, store) = store();
        let mut lists = HashMap::new();
        lists.insert(
            "travel".to_string(),
            vec![Destination::new("Trips", "t", "/media/trips")],
        );
        store.save_destination_lists(&lists).expect("Save failed");
        let loaded = store.load_destination_lists().expect("Load failed");
        assert_eq!(loaded, lists);
    }

    #[test]
    fn test_session_round_trip() {
        let (_temp, store) = store();
        let mut session = SessionState::new("/media/incoming");
        session
            .classifications
            .insert("/media/incoming/a.jpg".to_string(), "Vacation".to_string());
        session.current_index = 1;

        store.save_session(&session).expect("Save failed");
        let loaded = store
            .load_session("/media/incoming")
            .expect("Load failed")
            .expect("Session should exist");
        assert_eq!(loaded, session);
    }

    #[test]
    fn test_missing_session_is_none() {
        let (_temp, store) = store();
        assert!(
            store
                .load_session("/media/unknown")
                .expect("Load failed")
                .is_none()
        );
    }

    #[test]
    fn test_delete_session() {
        let (_temp, store) = store();
        let session = SessionState::new("/media/incoming");
        store.save_session(&session).expect("Save failed");

        store
            .delete_session("/media/incoming")
            .expect("Delete failed");
        assert!(
            store
                .load_session("/media/incoming")
                .expect("Load failed")
                .is_none()
        );
        // Deleting again is a no-op.
        store
            .delete_session("/media/incoming")
            .expect("Delete failed");
    }

    #[test]
    fn test_session_key_is_filesystem_safe() {
        let (_temp, store) = store();
        let path = store.session_path("/media/my photos/2024");
        let name = path
            .file_name()
            .expect("Session file should have a name")
            .to_string_lossy()
            .to_string();
        assert_eq!(name, "_media_my_photos_2024.json");
    }

    #[test]
    fn test_session_json_uses_camel_case_keys() {
        let session = SessionState::new("/media/incoming");
        let json = serde_json::to_string(&session).expect("Failed to serialize");
        assert!(json.contains("\"sourcePath\""));
        assert!(json.contains("\"currentIndex\""));
        assert!(json.contains("\"lastSaved\""));
    }

    #[test]
    fn test_corrupt_session_file_is_an_error() {
        let (_temp, store) = store();
        let session = SessionState::new("/media/incoming");
        store.save_session(&session).expect("Save failed");

        let path = store.session_path("/media/incoming");
        fs::write(&path, "{ not json").expect("Failed to corrupt file");
        assert!(matches!(
            store.load_session("/media/incoming"),
            Err(ConfigError::InvalidFormat { .. })
        ));
    }
}
