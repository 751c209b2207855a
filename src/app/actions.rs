#[cfg(test)]
#[path = "actions_test.rs"]
mod actions_test;

use std::path::Path;

use tracing::{error, info};

use crate::model::{ElementPatch, Point, Tool};
use crate::persistence;
use crate::settings;
use crate::snap;

use super::EditorApp;
use super::command_palette::{CommandContext, CommandId};

impl EditorApp {
    pub(super) fn command_context(&self) -> CommandContext {
        CommandContext {
            selected_len: self.store.selected_ids().len(),
            has_undo: self.store.can_undo(),
            has_redo: self.store.can_redo(),
            has_guides: !self.store.guides().is_empty(),
        }
    }

    pub(super) fn execute(&mut self, id: CommandId) {
        match id {
            CommandId::ToolSelect => self.store.set_active_tool(Tool::Select),
            CommandId::ToolMeasure => self.store.set_active_tool(Tool::Measure),
            CommandId::ToggleGrid => {
                self.store.toggle_grid();
                self.persist_settings();
            }
            CommandId::ToggleSnap => {
                self.store.toggle_snap();
                self.persist_settings();
            }
            CommandId::Undo => self.store.undo(),
            CommandId::Redo => self.store.redo(),
            CommandId::Duplicate => {
                let copies = self.store.duplicate_selection();
                self.status = Some(format!("Duplicated {} element(s)", copies.len()));
            }
            CommandId::Delete => self.store.delete_selection(),
            CommandId::ToggleLock => self.toggle_lock(),
            CommandId::ClearSelection => self.store.clear_selection(),
            CommandId::ZoomIn => self.zoom_at_center(1.0),
            CommandId::ZoomOut => self.zoom_at_center(-1.0),
            CommandId::ResetView => self.store.reset_view(),
            CommandId::ClearGuides => self.store.clear_guides(),
            CommandId::Save => self.save(),
            CommandId::SaveAs => self.save_as_dialog(),
            CommandId::Open => self.open_dialog(),
            CommandId::ClearLayout => {
                self.gesture = None;
                self.store.clear_layout();
                self.status = Some("Layout cleared".to_string());
            }
            CommandId::Help => self.show_help = true,
            CommandId::Add(element_type) => self.add_at_view_center(element_type),
        }
    }

    fn toggle_lock(&mut self) {
        let Some(element) = self.store.selected_element() else {
            return;
        };
        let id = element.id.clone();
        if element.is_locked {
            self.store.unlock_element(&id);
        } else {
            self.store.lock_element(&id);
        }
    }

    fn zoom_at_center(&mut self, steps: f64) {
        let anchor = Point::new(
            f64::from(self.canvas_size.x) * 0.5,
            f64::from(self.canvas_size.y) * 0.5,
        );
        self.store.zoom_by(steps, anchor);
    }

    /// Arrow-key handling. Moves the single selected element by one step as
    /// one commit; with nothing selected the view pans instead. With snap on
    /// the step is one grid pitch so the result stays on the grid.
    pub(super) fn nudge(&mut self, dx: f64, dy: f64, fast: bool) {
        let grid = *self.store.grid();
        let step = if fast {
            self.settings.nudge_step_fast
        } else {
            self.settings.nudge_step
        };
        if self.store.selected_ids().is_empty() {
            let scale = self.store.viewport().scale;
            self.store
                .pan_by(Point::new(-dx * step * scale, -dy * step * scale));
            return;
        }
        let Some(element) = self.store.selected_element().filter(|e| !e.is_locked) else {
            return;
        };
        let step = if grid.snap { grid.size } else { step };
        let to = snap::resolve_move(element.x + dx * step, element.y + dy * step, &grid);
        let id = element.id.clone();
        self.store.update_element(&id, ElementPatch::position(to.x, to.y));
    }

    pub(super) fn save(&mut self) {
        let layout = persistence::save(&self.store);
        match self.repository.store(&self.venue, &layout) {
            Ok(()) => {
                info!(venue = %self.venue, elements = layout.elements.len(), "venue layout saved");
                self.status = Some(format!(
                    "Saved {} element(s) for {}",
                    layout.elements.len(),
                    self.venue
                ));
                self.saved_elements = layout.elements;
            }
            Err(e) => {
                error!(venue = %self.venue, error = %e, "save failed");
                self.status = Some(format!("Save failed: {e}"));
            }
        }
    }

    pub(super) fn save_as_dialog(&mut self) {
        let file_name = Path::new(&self.settings.export_path)
            .file_name()
            .map_or_else(|| "layout.json".to_string(), |n| n.to_string_lossy().into_owned());
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(file_name)
            .add_filter("JSON", &["json"])
            .save_file()
        else {
            return;
        };
        let layout = persistence::save(&self.store);
        match persistence::write_file(&path, &layout) {
            Ok(()) => {
                self.settings.export_path = path.display().to_string();
                self.status = Some(format!("Saved {}", path.display()));
                self.persist_settings();
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "save as failed");
                self.status = Some(format!("Save failed: {e}"));
            }
        }
    }

    /// Load a layout file into the editor. The venue copy is untouched until
    /// the next save.
    pub(super) fn open_dialog(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        else {
            return;
        };
        match persistence::read_file(&path) {
            Ok(layout) => {
                self.gesture = None;
                let count = layout.elements.len();
                persistence::restore(&mut self.store, layout);
                self.status = Some(format!("Loaded {count} element(s) from {}", path.display()));
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "open failed");
                self.status = Some(format!("Open failed: {e}"));
            }
        }
    }

    pub(super) fn persist_settings(&mut self) {
        self.settings.remember_grid(self.store.grid());
        if let Err(e) = settings::save_settings(&self.settings_path, &self.settings) {
            error!(path = %self.settings_path.display(), error = %e, "settings save failed");
            self.status = Some(format!("Settings save failed: {e}"));
        }
    }
}
