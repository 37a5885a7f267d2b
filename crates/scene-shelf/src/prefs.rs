//! Preference store: where the shelf's lists survive editor restarts.
//!
//! The store is a pluggable key/value surface so hosts with their own
//! settings machinery can supply a backend. The shipped default keeps one
//! pretty-printed JSON object file under `~/.scene_shelf/`.
//!
//! The whole shelf persists as a single record ([`SavedShelf`]) under one
//! key ([`SHELF_PREFS_KEY`]): written on every list mutation (resource
//! change detection) and once more when the panel closes, read back on
//! startup with records for vanished files pruned out.

use bevy::prelude::*;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::build_list::BuildScenes;
use crate::shelf::{SceneRecord, SceneShelf};

/// The single key the shelf stores its record under.
pub const SHELF_PREFS_KEY: &str = "sceneShelf.lists";

// ============================================================================
// Errors
// ============================================================================

pub type PrefsResult<T> = Result<T, PrefsError>;

/// Preference store errors. Systems log these and carry on: a broken
/// store degrades to an empty shelf, never a crashed editor.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PrefsError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for PrefsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PrefsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

// ============================================================================
// Backend Trait
// ============================================================================

/// Pluggable host preference store. Values are JSON so the default file
/// backend stays readable; hosts can map them onto whatever storage they
/// already have.
pub trait PreferenceBackend: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> PrefsResult<Option<Value>>;

    /// Store `value` under `key`.
    fn set(&self, key: &str, value: Value) -> PrefsResult<()>;

    /// Remove `key` if present.
    fn remove(&self, key: &str) -> PrefsResult<()>;
}

// ============================================================================
// JSON File Backend (default)
// ============================================================================

/// Default backend: one JSON object file mapping key → value.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Backend at an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The default store location, `~/.scene_shelf/preferences.json`.
    /// `None` when no home directory can be determined.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".scene_shelf").join("preferences.json"))
    }

    fn read_map(&self) -> PrefsResult<serde_json::Map<String, Value>> {
        if !self.path.exists() {
            return Ok(serde_json::Map::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_map(&self, map: &serde_json::Map<String, Value>) -> PrefsResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl PreferenceBackend for JsonFileBackend {
    fn get(&self, key: &str) -> PrefsResult<Option<Value>> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> PrefsResult<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value);
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> PrefsResult<()> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

// ============================================================================
// Memory Backend (tests / headless hosts)
// ============================================================================

/// HashMap-backed store for tests and hosts without a home directory.
#[derive(Default)]
pub struct MemoryBackend {
    values: RwLock<HashMap<String, Value>>,
}

impl PreferenceBackend for MemoryBackend {
    fn get(&self, key: &str) -> PrefsResult<Option<Value>> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> PrefsResult<()> {
        self.values.write().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> PrefsResult<()> {
        self.values.write().remove(key);
        Ok(())
    }
}

// ============================================================================
// Typed Resource
// ============================================================================

/// Typed view over the host preference store.
#[derive(Resource, Clone)]
pub struct Preferences {
    backend: Arc<dyn PreferenceBackend>,
}

impl Preferences {
    pub fn new(backend: Arc<dyn PreferenceBackend>) -> Self {
        Self { backend }
    }

    /// Read and deserialize the value under `key`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> PrefsResult<Option<T>> {
        match self.backend.get(key)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Serialize and store `value` under `key`.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> PrefsResult<()> {
        self.backend.set(key, serde_json::to_value(value)?)
    }
}

// ============================================================================
// Persisted Record
// ============================================================================

/// The single record persisted under [`SHELF_PREFS_KEY`]: all three lists.
/// The build-list snapshot is informational — the host's build settings
/// overwrite it on the next render pass after load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedShelf {
    #[serde(default)]
    pub recent: Vec<SceneRecord>,

    #[serde(default)]
    pub favorites: Vec<SceneRecord>,

    #[serde(default)]
    pub build_list: Vec<SceneRecord>,
}

// ============================================================================
// Systems
// ============================================================================

/// Startup: read the persisted record, then drop entries whose files no
/// longer exist. A missing or unreadable record means an empty shelf, not
/// an error.
pub fn load_shelf(prefs: Res<Preferences>, mut shelf: ResMut<SceneShelf>) {
    let saved = match prefs.get::<SavedShelf>(SHELF_PREFS_KEY) {
        Ok(Some(saved)) => saved,
        Ok(None) => {
            info!("No saved scene shelf; starting empty");
            return;
        }
        Err(e) => {
            warn!("⚠ Failed to load scene shelf ({e}); starting empty");
            return;
        }
    };

    shelf.recent.replace(saved.recent);
    shelf.favorites.replace(saved.favorites);

    let dropped = shelf.recent.prune_missing() + shelf.favorites.prune_missing();
    if dropped > 0 {
        info!("🧹 Pruned {dropped} shelf entries with missing scene files");
    }
    info!(
        "✅ Loaded scene shelf: {} recent, {} favorites",
        shelf.recent.len(),
        shelf.favorites.len()
    );
}

/// Save on any list mutation, via resource change detection (the same
/// pattern the editor uses for its settings file).
pub fn autosave_shelf(
    shelf: Res<SceneShelf>,
    build: Res<BuildScenes>,
    prefs: Res<Preferences>,
) {
    if shelf.is_changed() && !shelf.is_added() {
        save_shelf(&shelf, &build, &prefs);
    }
}

/// Serialize the three lists under the single preference key.
pub(crate) fn save_shelf(shelf: &SceneShelf, build: &BuildScenes, prefs: &Preferences) {
    let saved = SavedShelf {
        recent: shelf.recent.entries().to_vec(),
        favorites: shelf.favorites.entries().to_vec(),
        build_list: crate::build_list::snapshot_records(build),
    };

    match prefs.set(SHELF_PREFS_KEY, &saved) {
        Ok(()) => debug!("💾 Saved scene shelf"),
        Err(e) => error!("❌ Failed to save scene shelf: {e}"),
    }
}

// ============================================================================
// Tests
// ============================================================================
