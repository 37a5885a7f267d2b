//! Scene record lists: Recent and Favorites.
//!
//! The shelf keeps two bounded, ordered lists of scene records. Recent has
//! move-to-front-on-open semantics; Favorites only reorders on an explicit
//! add. List identity is the scene's path: no list ever holds two records
//! for the same path.

use bevy::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Maximum entries kept in the Recent list.
pub const RECENT_CAP: usize = 30;

/// Maximum entries kept in the Favorites list.
pub const FAVORITES_CAP: usize = 10;

// ============================================================================
// Scene Records
// ============================================================================

/// A single scene row: a display name plus the path that identifies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneRecord {
    /// Build-settings enable flag. Records created by open or favorite
    /// actions are always enabled; only build-list snapshots carry `false`.
    #[serde(default = "enabled_default")]
    pub enabled: bool,

    /// Name shown in the panel (usually the file stem)
    pub display_name: String,

    /// Path to the scene file; the record's identity
    pub path: String,

    /// When the scene was last opened through the editor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_opened: Option<DateTime<Utc>>,
}

fn enabled_default() -> bool {
    true
}

impl SceneRecord {
    /// Create an enabled record with an explicit display name.
    pub fn new(display_name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            enabled: true,
            display_name: display_name.into(),
            path: path.into(),
            last_opened: None,
        }
    }

    /// Create a record from a path, deriving the display name from the
    /// file stem.
    pub fn from_path(path: &Path) -> Self {
        let display_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Self::new(display_name, path.to_string_lossy().to_string())
    }
}

// ============================================================================
// Bounded Recency List
// ============================================================================

/// Bounded, ordered list of scene records. The front is the most recent.
#[derive(Debug, Clone, PartialEq)]
pub struct RecencyList {
    entries: Vec<SceneRecord>,
    cap: usize,
}

impl RecencyList {
    /// Create an empty list that never grows past `cap` entries.
    pub fn with_cap(cap: usize) -> Self {
        Self {
            entries: Vec::new(),
            cap,
        }
    }

    /// Move-to-front-or-insert. Removes any existing entry for the same
    /// path, inserts `record` at the front, and drops the tail beyond the
    /// cap. Repeated inserts of one path keep it at the front without
    /// duplicating.
    pub fn insert_front(&mut self, record: SceneRecord) {
        self.entries.retain(|r| r.path != record.path);
        self.entries.insert(0, record);
        self.entries.truncate(self.cap);
    }

    /// Remove the entry at `index`. Out-of-range indices are a no-op.
    pub fn remove_at(&mut self, index: usize) {
        if index < self.entries.len() {
            self.entries.remove(index);
        }
    }

    /// Remove the entry for `path` if present. Returns whether one was
    /// removed.
    pub fn remove_path(&mut self, path: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|r| r.path != path);
        self.entries.len() != before
    }

    /// Whether a record for `path` is in the list.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|r| r.path == path)
    }

    /// Drop every record whose path no longer resolves to a file on disk,
    /// preserving the order of the survivors. Returns how many were
    /// dropped. Called once when the persisted shelf is loaded.
    pub fn prune_missing(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|r| {
            let exists = Path::new(&r.path).exists();
            if !exists {
                warn!("🧹 Dropping scene with missing file: {}", r.path);
            }
            exists
        });
        before - self.entries.len()
    }

    /// Replace the contents from a persisted snapshot. Duplicate paths are
    /// collapsed (first occurrence wins) and the result is re-capped.
    pub fn replace(&mut self, records: Vec<SceneRecord>) {
        self.entries.clear();
        for record in records {
            if !self.contains(&record.path) {
                self.entries.push(record);
            }
        }
        self.entries.truncate(self.cap);
    }

    /// The records in order, front first.
    pub fn entries(&self) -> &[SceneRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The list's capacity.
    pub fn cap(&self) -> usize {
        self.cap
    }
}

// ============================================================================
// Shelf Resource
// ============================================================================

/// The panel's two user-maintained lists. The build list is not stored
/// here — it is host-owned state mirrored in
/// [`BuildScenes`](crate::build_list::BuildScenes) and re-read every
/// render pass.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SceneShelf {
    pub recent: RecencyList,
    pub favorites: RecencyList,
}

impl Default for SceneShelf {
    fn default() -> Self {
        Self {
            recent: RecencyList::with_cap(RECENT_CAP),
            favorites: RecencyList::with_cap(FAVORITES_CAP),
        }
    }
}

impl SceneShelf {
    /// Record that the host opened a scene: move-to-front in Recent with a
    /// fresh `last_opened` stamp. Favorites are left untouched — opening a
    /// favorited scene does not reorder Favorites.
    pub fn record_opened(&mut self, display_name: &str, path: &str) {
        let mut record = SceneRecord::new(display_name, path);
        record.last_opened = Some(Utc::now());
        self.recent.insert_front(record);
    }

    /// Pin a scene to Favorites. An explicit re-add moves an existing
    /// favorite to the front.
    pub fn add_favorite(&mut self, display_name: &str, path: &str) {
        self.favorites.insert_front(SceneRecord::new(display_name, path));
    }
}

// ============================================================================
// Host Messages
// ============================================================================

/// Host → shelf: the document manager opened a scene (by any means — the
/// panel, a file dialog, a command-line flag). The shelf folds these into
/// the Recent list.
#[derive(Message, Clone, Debug)]
pub struct SceneOpened {
    pub display_name: String,
    pub path: PathBuf,
}

impl SceneOpened {
    /// Build the message from a path, deriving the display name from the
    /// file stem.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display_name = SceneRecord::from_path(&path).display_name;
        Self { display_name, path }
    }
}

/// Shelf → host: the user clicked a row. The host's file event handler
/// performs the actual open; the panel never loads scenes itself.
#[derive(Message, Clone, Debug)]
pub struct OpenSceneRequest {
    pub path: PathBuf,
}

/// Folds host open notifications into the Recent list.
pub fn record_opened_scenes(
    mut opened: MessageReader<SceneOpened>,
    mut shelf: ResMut<SceneShelf>,
) {
    for message in opened.read() {
        shelf.record_opened(&message.display_name, &message.path.to_string_lossy());
        info!("📌 Recorded recent scene: {}", message.display_name);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_list(cap: usize, paths: &[&str]) -> RecencyList {
        let mut list = RecencyList::with_cap(cap);
        // Insert in reverse so paths[0] ends up at the front
        for path in paths.iter().rev() {
            list.insert_front(SceneRecord::from_path(Path::new(path)));
        }
        list
    }

    fn paths(list: &RecencyList) -> Vec<&str> {
        list.entries().iter().map(|r| r.path.as_str()).collect()
    }

    #[test]
    fn test_open_same_path_twice_keeps_single_entry_at_front() {
        let mut shelf = SceneShelf::default();
        shelf.record_opened("Lobby", "/proj/lobby.scn");
        shelf.record_opened("Arena", "/proj/arena.scn");
        shelf.record_opened("Lobby", "/proj/lobby.scn");

        assert_eq!(
            paths(&shelf.recent),
            vec!["/proj/lobby.scn", "/proj/arena.scn"]
        );
    }

    #[test]
    fn test_recent_cap_evicts_least_recent_tail() {
        let mut shelf = SceneShelf::default();
        for i in 0..(RECENT_CAP + 5) {
            shelf.record_opened(&format!("Scene{i}"), &format!("/proj/s{i}.scn"));
        }

        assert_eq!(shelf.recent.len(), RECENT_CAP);
        // Most recent open is at the front
        assert_eq!(
            shelf.recent.entries()[0].path,
            format!("/proj/s{}.scn", RECENT_CAP + 4)
        );
        // The five oldest opens fell off the tail
        assert!(!shelf.recent.contains("/proj/s0.scn"));
        assert!(!shelf.recent.contains("/proj/s4.scn"));
        assert!(shelf.recent.contains("/proj/s5.scn"));
    }

    #[test]
    fn test_favorites_cap() {
        let mut shelf = SceneShelf::default();
        for i in 0..(FAVORITES_CAP + 3) {
            shelf.add_favorite(&format!("Scene{i}"), &format!("/proj/f{i}.scn"));
        }

        assert_eq!(shelf.favorites.len(), FAVORITES_CAP);
        assert_eq!(
            shelf.favorites.entries()[0].path,
            format!("/proj/f{}.scn", FAVORITES_CAP + 2)
        );
    }

    #[test]
    fn test_opening_a_favorite_does_not_reorder_favorites() {
        let mut shelf = SceneShelf::default();
        shelf.add_favorite("Lobby", "/proj/lobby.scn");
        shelf.add_favorite("Arena", "/proj/arena.scn");
        let before = shelf.favorites.clone();

        shelf.record_opened("Lobby", "/proj/lobby.scn");

        assert_eq!(shelf.favorites, before);
        assert_eq!(shelf.recent.entries()[0].path, "/proj/lobby.scn");
    }

    #[test]
    fn test_explicit_re_add_moves_favorite_to_front() {
        let mut shelf = SceneShelf::default();
        shelf.add_favorite("Lobby", "/proj/lobby.scn");
        shelf.add_favorite("Arena", "/proj/arena.scn");
        shelf.add_favorite("Lobby", "/proj/lobby.scn");

        assert_eq!(
            paths(&shelf.favorites),
            vec!["/proj/lobby.scn", "/proj/arena.scn"]
        );
        assert_eq!(shelf.favorites.len(), 2);
    }

    #[test]
    fn test_remove_at_out_of_range_is_noop() {
        let mut list = make_list(5, &["/a.scn", "/b.scn"]);
        list.remove_at(2);
        list.remove_at(usize::MAX);
        assert_eq!(paths(&list), vec!["/a.scn", "/b.scn"]);
    }

    #[test]
    fn test_remove_at_removes_exactly_that_entry() {
        let mut list = make_list(5, &["/a.scn", "/b.scn", "/c.scn"]);
        list.remove_at(1);
        assert_eq!(paths(&list), vec!["/a.scn", "/c.scn"]);
    }

    #[test]
    fn test_remove_path() {
        let mut list = make_list(5, &["/a.scn", "/b.scn"]);
        assert!(list.remove_path("/b.scn"));
        assert!(!list.remove_path("/b.scn"));
        assert_eq!(paths(&list), vec!["/a.scn"]);
    }

    #[test]
    fn test_prune_missing_keeps_survivor_order() {
        let dir = tempfile::tempdir().unwrap();
        let kept_a = dir.path().join("a.scn");
        let kept_c = dir.path().join("c.scn");
        std::fs::write(&kept_a, b"scene").unwrap();
        std::fs::write(&kept_c, b"scene").unwrap();

        let missing_b = dir.path().join("b.scn");
        let missing_d = dir.path().join("d.scn");

        let mut list = RecencyList::with_cap(10);
        list.replace(
            [&kept_a, &missing_b, &kept_c, &missing_d]
                .into_iter()
                .map(|p| SceneRecord::from_path(p))
                .collect(),
        );

        let dropped = list.prune_missing();

        assert_eq!(dropped, 2);
        assert_eq!(
            paths(&list),
            vec![
                kept_a.to_string_lossy().as_ref(),
                kept_c.to_string_lossy().as_ref()
            ]
        );
    }

    #[test]
    fn test_replace_collapses_duplicates_and_recaps() {
        let mut list = RecencyList::with_cap(2);
        list.replace(vec![
            SceneRecord::new("A", "/a.scn"),
            SceneRecord::new("A again", "/a.scn"),
            SceneRecord::new("B", "/b.scn"),
            SceneRecord::new("C", "/c.scn"),
        ]);

        assert_eq!(paths(&list), vec!["/a.scn", "/b.scn"]);
        assert_eq!(list.entries()[0].display_name, "A");
    }

    #[test]
    fn test_record_from_path_uses_file_stem() {
        let record = SceneRecord::from_path(Path::new("/proj/levels/Boss Arena.scn"));
        assert_eq!(record.display_name, "Boss Arena");
        assert!(record.enabled);
    }
}
