//! Mirror of the host's build settings: the ordered scene list a build
//! would ship, with per-entry enable flags.
//!
//! The host owns [`BuildScenes`] and keeps it in sync with its build
//! settings; the panel only derives display rows from it — every render
//! pass, truncated to [`BUILD_CAP`]. Enabled entries are labeled with
//! their build index, which counts enabled entries only.

use bevy::prelude::*;
use std::path::Path;

use crate::shelf::SceneRecord;

/// Maximum build entries shown in the panel.
pub const BUILD_CAP: usize = 30;

/// One entry of the host's build settings, in build order.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSceneEntry {
    pub enabled: bool,
    pub path: String,
}

impl BuildSceneEntry {
    pub fn new(enabled: bool, path: impl Into<String>) -> Self {
        Self {
            enabled,
            path: path.into(),
        }
    }
}

/// Host-authoritative ordered scene list. Resynchronized by the host;
/// read-only from the panel's side.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct BuildScenes {
    pub scenes: Vec<BuildSceneEntry>,
}

/// A display row derived from a build entry.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildRow {
    pub enabled: bool,
    pub label: String,
    pub path: String,
}

/// Derive the panel rows from the host build list. Enabled entries get a
/// zero-based build index that skips disabled entries; disabled entries
/// keep their spot but carry no index and render dimmed.
pub fn build_rows(build: &BuildScenes) -> Vec<BuildRow> {
    let mut rows = Vec::with_capacity(build.scenes.len().min(BUILD_CAP));
    let mut build_index = 0usize;

    for entry in build.scenes.iter().take(BUILD_CAP) {
        let stem = scene_stem(&entry.path);
        let label = if entry.enabled {
            let label = format!("{build_index}  {stem}");
            build_index += 1;
            label
        } else {
            stem
        };
        rows.push(BuildRow {
            enabled: entry.enabled,
            label,
            path: entry.path.clone(),
        });
    }

    rows
}

/// Snapshot the build list as scene records for the persisted blob.
pub(crate) fn snapshot_records(build: &BuildScenes) -> Vec<SceneRecord> {
    build
        .scenes
        .iter()
        .take(BUILD_CAP)
        .map(|entry| SceneRecord {
            enabled: entry.enabled,
            display_name: scene_stem(&entry.path),
            path: entry.path.clone(),
            last_opened: None,
        })
        .collect()
}

/// File stem of a scene path, falling back to the full path.
fn scene_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_build(entries: &[(bool, &str)]) -> BuildScenes {
        BuildScenes {
            scenes: entries
                .iter()
                .map(|(enabled, path)| BuildSceneEntry::new(*enabled, *path))
                .collect(),
        }
    }

    #[test]
    fn test_build_index_skips_disabled_entries() {
        let build = make_build(&[
            (true, "/proj/lobby.scn"),
            (false, "/proj/debug_room.scn"),
            (true, "/proj/arena.scn"),
            (true, "/proj/boss.scn"),
        ]);

        let rows = build_rows(&build);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].label, "0  lobby");
        assert_eq!(rows[1].label, "debug_room");
        assert!(!rows[1].enabled);
        assert_eq!(rows[2].label, "1  arena");
        assert_eq!(rows[3].label, "2  boss");
    }

    #[test]
    fn test_rows_truncate_to_cap() {
        let paths: Vec<String> = (0..BUILD_CAP + 10)
            .map(|i| format!("/proj/s{i}.scn"))
            .collect();
        let build = BuildScenes {
            scenes: paths
                .iter()
                .map(|p| BuildSceneEntry::new(true, p.clone()))
                .collect(),
        };

        let rows = build_rows(&build);

        assert_eq!(rows.len(), BUILD_CAP);
        assert_eq!(rows.last().unwrap().label, format!("{}  s{}", BUILD_CAP - 1, BUILD_CAP - 1));
    }

    #[test]
    fn test_snapshot_records_carry_enable_flags() {
        let build = make_build(&[(true, "/proj/lobby.scn"), (false, "/proj/debug_room.scn")]);

        let records = snapshot_records(&build);

        assert_eq!(records.len(), 2);
        assert!(records[0].enabled);
        assert_eq!(records[0].display_name, "lobby");
        assert!(!records[1].enabled);
        assert_eq!(records[1].path, "/proj/debug_room.scn");
    }

    #[test]
    fn test_empty_build_list_yields_no_rows() {
        assert!(build_rows(&BuildScenes::default()).is_empty());
    }
}
