//! The Scenes window: Recent, Favorites, and Build List sections of
//! clickable rows. Clicking a row never loads anything here — it writes an
//! [`OpenSceneRequest`] for the host's file event handler.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use std::path::PathBuf;

use super::ShelfUiState;
use crate::build_list::{build_rows, BuildScenes, BUILD_CAP};
use crate::prefs::{self, Preferences};
use crate::shelf::{OpenSceneRequest, SceneRecord, SceneShelf};

/// Render the Scenes window. Runs in `EguiPrimaryContextPass`.
pub fn draw_shelf_panel(
    mut contexts: EguiContexts,
    mut state: ResMut<ShelfUiState>,
    mut shelf: ResMut<SceneShelf>,
    build: Res<BuildScenes>,
    prefs: Res<Preferences>,
    mut open_requests: MessageWriter<OpenSceneRequest>,
) {
    if !state.open {
        // Closing edge: flush one final save even if no list changed
        if state.was_open {
            state.was_open = false;
            prefs::save_shelf(&shelf, &build, &prefs);
        }
        return;
    }
    state.was_open = true;

    let Ok(ctx) = contexts.ctx_mut() else { return };

    let mut open = state.open;
    egui::Window::new("🗂 Scenes")
        .open(&mut open)
        .default_width(320.0)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                draw_recent_section(ui, &mut shelf, &mut open_requests);
                ui.add_space(4.0);
                draw_favorites_section(ui, &mut shelf, &mut open_requests);
                ui.add_space(4.0);
                draw_build_section(ui, &build, &mut open_requests);
            });
        });

    if state.open != open {
        state.open = open;
    }
}

// ============================================================================
// Recent
// ============================================================================

fn draw_recent_section(
    ui: &mut egui::Ui,
    shelf: &mut SceneShelf,
    open_requests: &mut MessageWriter<OpenSceneRequest>,
) {
    let title = format!("Recent ({}/{})", shelf.recent.len(), shelf.recent.cap());

    egui::CollapsingHeader::new(title)
        .id_salt("shelf_recent")
        .default_open(true)
        .show(ui, |ui| {
            let mut remove: Option<usize> = None;
            let mut toggle_pin: Option<SceneRecord> = None;

            for (index, record) in shelf.recent.entries().iter().enumerate() {
                let pinned = shelf.favorites.contains(&record.path);
                ui.horizontal(|ui| {
                    if ui
                        .selectable_label(false, format!("🎬 {}", record.display_name))
                        .on_hover_text(hover_text(record))
                        .clicked()
                    {
                        open_requests.write(OpenSceneRequest {
                            path: PathBuf::from(&record.path),
                        });
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✖").on_hover_text("Remove from Recent").clicked() {
                            remove = Some(index);
                        }

                        let (icon, tip) = if pinned {
                            ("★", "Remove from Favorites")
                        } else {
                            ("☆", "Add to Favorites")
                        };
                        if ui.small_button(icon).on_hover_text(tip).clicked() {
                            toggle_pin = Some(record.clone());
                        }
                    });
                });
            }

            if shelf.recent.is_empty() {
                ui.weak("Scenes you open will show up here.");
            }

            if let Some(index) = remove {
                shelf.recent.remove_at(index);
            }
            if let Some(record) = toggle_pin {
                if shelf.favorites.contains(&record.path) {
                    shelf.favorites.remove_path(&record.path);
                } else {
                    shelf.add_favorite(&record.display_name, &record.path);
                }
            }
        });
}

// ============================================================================
// Favorites
// ============================================================================

fn draw_favorites_section(
    ui: &mut egui::Ui,
    shelf: &mut SceneShelf,
    open_requests: &mut MessageWriter<OpenSceneRequest>,
) {
    let title = format!(
        "Favorites ({}/{})",
        shelf.favorites.len(),
        shelf.favorites.cap()
    );

    egui::CollapsingHeader::new(title)
        .id_salt("shelf_favorites")
        .default_open(true)
        .show(ui, |ui| {
            let mut remove: Option<usize> = None;

            for (index, record) in shelf.favorites.entries().iter().enumerate() {
                ui.horizontal(|ui| {
                    if ui
                        .selectable_label(false, format!("★ {}", record.display_name))
                        .on_hover_text(hover_text(record))
                        .clicked()
                    {
                        open_requests.write(OpenSceneRequest {
                            path: PathBuf::from(&record.path),
                        });
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✖").on_hover_text("Remove from Favorites").clicked() {
                            remove = Some(index);
                        }
                    });
                });
            }

            if shelf.favorites.is_empty() {
                ui.weak("Pin scenes here for one-click access.");
            }

            if let Some(index) = remove {
                shelf.favorites.remove_at(index);
            }

            if ui.button("➕ Add…").on_hover_text("Favorite a scene file").clicked() {
                if let Some(path) = pick_scene_file() {
                    let record = SceneRecord::from_path(&path);
                    shelf.add_favorite(&record.display_name, &record.path);
                    info!("★ Favorited scene: {}", record.display_name);
                }
            }
        });
}

// ============================================================================
// Build List
// ============================================================================

fn draw_build_section(
    ui: &mut egui::Ui,
    build: &BuildScenes,
    open_requests: &mut MessageWriter<OpenSceneRequest>,
) {
    // Re-derived from the host's build settings every pass
    let rows = build_rows(build);
    let title = format!("Build List ({}/{})", rows.len(), BUILD_CAP);

    egui::CollapsingHeader::new(title)
        .id_salt("shelf_build")
        .default_open(false)
        .show(ui, |ui| {
            for row in &rows {
                let text = if row.enabled {
                    egui::RichText::new(&row.label)
                } else {
                    egui::RichText::new(&row.label).weak()
                };

                if ui
                    .selectable_label(false, text)
                    .on_hover_text(&row.path)
                    .clicked()
                {
                    open_requests.write(OpenSceneRequest {
                        path: PathBuf::from(&row.path),
                    });
                }
            }

            if rows.is_empty() {
                ui.weak("No scenes in the host build list.");
            }
        });
}

// ============================================================================
// Helpers
// ============================================================================

/// Native picker for favoriting a scene file directly.
fn pick_scene_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Scene Files", &["scn", "ron"])
        .add_filter("All Files", &["*"])
        .set_title("Add Scene to Favorites")
        .pick_file()
}

fn hover_text(record: &SceneRecord) -> String {
    match &record.last_opened {
        Some(when) => format!(
            "{}\nLast opened: {}",
            record.path,
            when.format("%Y-%m-%d %H:%M UTC")
        ),
        None => record.path.clone(),
    }
}
