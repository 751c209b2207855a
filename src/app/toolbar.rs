use eframe::egui;

use crate::catalog;
use crate::model::{ElementType, Point, Tool};

use super::EditorApp;
use super::command_palette::CommandId;
use super::viewport::visible_center;

pub(super) fn tool_button(ui: &mut egui::Ui, label: &str, tool: Tool, selected: Tool) -> bool {
    ui.selectable_label(selected == tool, label).clicked()
}

impl EditorApp {
    /// One row of discrete commands. Returns the command the user clicked.
    pub(super) fn toolbar_ui(&mut self, ui: &mut egui::Ui) -> Option<CommandId> {
        let mut command = None;
        let tool = self.store.active_tool();
        ui.horizontal(|ui| {
            if tool_button(ui, "⬉ Select", Tool::Select, tool) {
                command = Some(CommandId::ToolSelect);
            }
            if tool_button(ui, "📏 Measure", Tool::Measure, tool) {
                command = Some(CommandId::ToolMeasure);
            }
            ui.separator();

            let grid = *self.store.grid();
            if ui.selectable_label(grid.enabled, "▦ Grid").clicked() {
                command = Some(CommandId::ToggleGrid);
            }
            if ui.selectable_label(grid.snap, "🧲 Snap").clicked() {
                command = Some(CommandId::ToggleSnap);
            }
            ui.separator();

            if ui
                .add_enabled(self.store.can_undo(), egui::Button::new("⟲ Undo"))
                .clicked()
            {
                command = Some(CommandId::Undo);
            }
            if ui
                .add_enabled(self.store.can_redo(), egui::Button::new("⟳ Redo"))
                .clicked()
            {
                command = Some(CommandId::Redo);
            }
            ui.separator();

            let has_selection = !self.store.selected_ids().is_empty();
            if ui
                .add_enabled(has_selection, egui::Button::new("Duplicate"))
                .clicked()
            {
                command = Some(CommandId::Duplicate);
            }
            if ui
                .add_enabled(has_selection, egui::Button::new("Delete"))
                .clicked()
            {
                command = Some(CommandId::Delete);
            }
            ui.separator();

            if ui.button("−").on_hover_text("Zoom out").clicked() {
                command = Some(CommandId::ZoomOut);
            }
            if ui.button("+").on_hover_text("Zoom in").clicked() {
                command = Some(CommandId::ZoomIn);
            }
            if ui.button("Reset view").clicked() {
                command = Some(CommandId::ResetView);
            }
        });
        command
    }

    pub(super) fn palette_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Elements");
        ui.separator();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for template in catalog::templates() {
                let label = format!("{} {}", template.icon, template.name);
                let hint = format!(
                    "{} × {}{}",
                    template.default_width,
                    template.default_height,
                    template
                        .default_capacity
                        .map(|c| format!(", {c} seats"))
                        .unwrap_or_default()
                );
                if ui
                    .add_sized([ui.available_width(), 24.0], egui::Button::new(label))
                    .on_hover_text(hint)
                    .clicked()
                {
                    self.add_at_view_center(template.element_type);
                }
            }
        });
    }

    /// Add `element_type` centered in the visible part of the canvas.
    pub(super) fn add_at_view_center(&mut self, element_type: ElementType) {
        let template = catalog::lookup(element_type);
        let center = visible_center(self.store.viewport(), self.canvas_size);
        let id = self.store.add_element(
            element_type,
            Point::new(
                center.x - template.default_width * 0.5,
                center.y - template.default_height * 0.5,
            ),
        );
        self.status = Some(format!("Added {} ({id})", template.name));
    }
}
