//! # Scene Shelf
//!
//! Quick-open Scenes panel for Bevy-based editors: three bounded lists —
//! Recent (30), Favorites (10), and the host's Build List (30) — rendered
//! as clickable rows in a bevy_egui window.
//!
//! The panel is deliberately thin. It never loads a scene and never owns a
//! window: opening is delegated to the host's document management through
//! [`OpenSceneRequest`] messages, the build list mirrors the host's build
//! settings, and persistence is one record under a single key in a
//! host-pluggable preference store.
//!
//! ## Host integration
//!
//! ```rust,ignore
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(SceneShelfPlugin::default())
//!     .add_systems(Update, (handle_open_requests, sync_build_scenes))
//!     .run();
//!
//! /// The host's document manager performs the actual open, then reports
//! /// back so the shelf can record it.
//! fn handle_open_requests(
//!     mut requests: MessageReader<OpenSceneRequest>,
//!     mut opened: MessageWriter<SceneOpened>,
//! ) {
//!     for request in requests.read() {
//!         // ... load the scene through the editor's own machinery ...
//!         opened.write(SceneOpened::from_path(&request.path));
//!     }
//! }
//! ```
//!
//! Hosts with their own settings store plug it in via
//! [`SceneShelfPlugin::backend`]; everyone else gets a pretty-printed JSON
//! file under `~/.scene_shelf/`.

pub mod build_list;
pub mod prefs;
pub mod shelf;
pub mod ui;

// Re-exports for convenience
pub use build_list::{BuildRow, BuildSceneEntry, BuildScenes, BUILD_CAP};
pub use prefs::{
    JsonFileBackend, MemoryBackend, PreferenceBackend, Preferences, PrefsError, SavedShelf,
    SHELF_PREFS_KEY,
};
pub use shelf::{
    OpenSceneRequest, RecencyList, SceneOpened, SceneRecord, SceneShelf, FAVORITES_CAP,
    RECENT_CAP,
};
pub use ui::ShelfUiState;

use bevy::prelude::*;
use bevy_egui::{EguiPlugin, EguiPrimaryContextPass};
use std::path::PathBuf;
use std::sync::Arc;

/// The Scenes panel plugin.
#[derive(Default)]
pub struct SceneShelfPlugin {
    /// Custom preference backend. `None` selects the JSON file store.
    pub backend: Option<Arc<dyn PreferenceBackend>>,

    /// Override path for the default JSON file store (ignored when
    /// `backend` is set).
    pub prefs_path: Option<PathBuf>,
}

impl Plugin for SceneShelfPlugin {
    fn build(&self, app: &mut App) {
        // Only add EguiPlugin if the host hasn't already
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin::default());
        }

        let backend: Arc<dyn PreferenceBackend> = match (&self.backend, &self.prefs_path) {
            (Some(backend), _) => backend.clone(),
            (None, Some(path)) => Arc::new(JsonFileBackend::at(path.clone())),
            (None, None) => match JsonFileBackend::default_path() {
                Some(path) => Arc::new(JsonFileBackend::at(path)),
                None => {
                    warn!("⚠ No home directory; the scene shelf will not persist");
                    Arc::new(MemoryBackend::default())
                }
            },
        };

        app.insert_resource(Preferences::new(backend))
            .init_resource::<SceneShelf>()
            .init_resource::<BuildScenes>()
            .init_resource::<ShelfUiState>()
            .add_message::<SceneOpened>()
            .add_message::<OpenSceneRequest>()
            .add_systems(Startup, prefs::load_shelf)
            .add_systems(
                Update,
                (shelf::record_opened_scenes, prefs::autosave_shelf).chain(),
            )
            .add_systems(Update, ui::toggle_shelf_panel)
            .add_systems(EguiPrimaryContextPass, ui::draw_shelf_panel);
    }
}
