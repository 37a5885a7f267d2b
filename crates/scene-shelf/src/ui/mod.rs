//! Panel UI: the egui window with the three scene sections.

mod shelf_panel;

pub use shelf_panel::draw_shelf_panel;

use bevy::prelude::*;

/// Open/closed state of the Scenes window. `was_open` tracks the
/// open→closed edge so the panel can flush one final save on close.
#[derive(Resource)]
pub struct ShelfUiState {
    pub open: bool,
    pub(crate) was_open: bool,
}

impl Default for ShelfUiState {
    fn default() -> Self {
        Self {
            open: true,
            was_open: true,
        }
    }
}

/// F7 toggles the panel. The window's own close button works too.
pub fn toggle_shelf_panel(
    keys: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<ShelfUiState>,
) {
    if keys.just_pressed(KeyCode::F7) {
        state.open = !state.open;
    }
}
