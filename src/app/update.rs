use eframe::egui;

use crate::catalog;
use crate::model::{ElementType, GuideOrientation, Tool};

use super::EditorApp;
use super::command_palette::{CommandId, CommandPalette};
use super::help::draw_help_window;

const ARROWS: [(egui::Key, f64, f64); 4] = [
    (egui::Key::ArrowLeft, -1.0, 0.0),
    (egui::Key::ArrowRight, 1.0, 0.0),
    (egui::Key::ArrowUp, 0.0, -1.0),
    (egui::Key::ArrowDown, 0.0, 1.0),
];

fn menu_item(
    ui: &mut egui::Ui,
    label: &str,
    enabled: bool,
    id: CommandId,
    out: &mut Vec<CommandId>,
) {
    if ui.add_enabled(enabled, egui::Button::new(label)).clicked() {
        out.push(id);
        ui.close_menu();
    }
}

impl EditorApp {
    /// Keyboard shortcuts for this frame. Commands are collected while the
    /// input lock is held and run afterwards.
    fn shortcuts(&mut self, ctx: &egui::Context) -> (Vec<CommandId>, Vec<(f64, f64, bool)>) {
        let skip = ctx.wants_keyboard_input() || self.command_palette.open;
        let palette_open = self.command_palette.open;
        let mut commands = Vec::new();
        let mut nudges = Vec::new();
        let mut open_palette = false;

        ctx.input_mut(|i| {
            if !palette_open
                && i.consume_key(egui::Modifiers::COMMAND | egui::Modifiers::SHIFT, egui::Key::P)
            {
                open_palette = true;
            }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::S) {
                commands.push(CommandId::Save);
            }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::O) {
                commands.push(CommandId::Open);
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::F1) {
                commands.push(CommandId::Help);
            }
            if skip {
                return;
            }
            if i.consume_key(egui::Modifiers::COMMAND | egui::Modifiers::SHIFT, egui::Key::Z)
                || i.consume_key(egui::Modifiers::COMMAND, egui::Key::Y)
            {
                commands.push(CommandId::Redo);
            } else if i.consume_key(egui::Modifiers::COMMAND, egui::Key::Z) {
                commands.push(CommandId::Undo);
            }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::D) {
                commands.push(CommandId::Duplicate);
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Delete)
                || i.consume_key(egui::Modifiers::NONE, egui::Key::Backspace)
            {
                commands.push(CommandId::Delete);
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Escape) {
                commands.push(CommandId::ClearSelection);
            }
            let plain = [
                (egui::Key::G, CommandId::ToggleGrid),
                (egui::Key::S, CommandId::ToggleSnap),
                (egui::Key::V, CommandId::ToolSelect),
                (egui::Key::M, CommandId::ToolMeasure),
                (egui::Key::Num0, CommandId::ResetView),
            ];
            for (key, id) in plain {
                if i.consume_key(egui::Modifiers::NONE, key) {
                    commands.push(id);
                }
            }
            let fast = i.modifiers.shift;
            for (key, dx, dy) in ARROWS {
                if i.consume_key(egui::Modifiers::NONE, key)
                    || i.consume_key(egui::Modifiers::SHIFT, key)
                {
                    nudges.push((dx, dy, fast));
                }
            }
        });

        if open_palette {
            self.command_palette.open();
        }
        (commands, nudges)
    }

    fn menu_bar(&mut self, ui: &mut egui::Ui) -> Vec<CommandId> {
        let cx = self.command_context();
        let mut out = Vec::new();
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                ui.label(format!("Venue: {}", self.venue));
                ui.separator();
                menu_item(ui, "Save (⌘S)", true, CommandId::Save, &mut out);
                menu_item(ui, "Save As...", true, CommandId::SaveAs, &mut out);
                menu_item(ui, "Open... (⌘O)", true, CommandId::Open, &mut out);
                ui.separator();
                menu_item(ui, "Clear Layout", true, CommandId::ClearLayout, &mut out);
            });
            ui.menu_button("Edit", |ui| {
                menu_item(ui, "Undo (⌘Z)", cx.has_undo, CommandId::Undo, &mut out);
                menu_item(ui, "Redo (⌘⇧Z)", cx.has_redo, CommandId::Redo, &mut out);
                let history = self.store.history();
                ui.weak(format!(
                    "{} undo / {} redo steps",
                    history.undo_depth(),
                    history.redo_depth()
                ));
                ui.separator();
                let has_selection = cx.selected_len > 0;
                menu_item(ui, "Duplicate (⌘D)", has_selection, CommandId::Duplicate, &mut out);
                menu_item(ui, "Delete (Del)", has_selection, CommandId::Delete, &mut out);
                menu_item(ui, "Lock / Unlock", cx.selected_len == 1, CommandId::ToggleLock, &mut out);
                menu_item(ui, "Clear Selection (Esc)", has_selection, CommandId::ClearSelection, &mut out);
            });
            ui.menu_button("Insert", |ui| {
                for t in ElementType::ALL {
                    let template = catalog::lookup(t);
                    let label = format!("{} {}", template.icon, template.name);
                    menu_item(ui, &label, true, CommandId::Add(t), &mut out);
                }
            });
            ui.menu_button("View", |ui| {
                menu_item(ui, "Zoom In", true, CommandId::ZoomIn, &mut out);
                menu_item(ui, "Zoom Out", true, CommandId::ZoomOut, &mut out);
                menu_item(ui, "Reset View (0)", true, CommandId::ResetView, &mut out);
                ui.separator();
                ui.label("Grid");
                let grid = *self.store.grid();
                let mut enabled = grid.enabled;
                if ui.checkbox(&mut enabled, "Show Grid (G)").changed() {
                    out.push(CommandId::ToggleGrid);
                }
                let mut snap = grid.snap;
                if ui.checkbox(&mut snap, "Snap to Grid (S)").changed() {
                    out.push(CommandId::ToggleSnap);
                }
                ui.horizontal(|ui| {
                    ui.label("Size:");
                    let mut size = grid.size;
                    if ui
                        .add(egui::DragValue::new(&mut size).range(4.0..=200.0).speed(1.0))
                        .changed()
                    {
                        self.store.set_grid_size(size);
                        self.persist_settings();
                    }
                });
                ui.horizontal(|ui| {
                    ui.label("Subdivisions:");
                    let mut subdivisions = grid.subdivisions;
                    if ui
                        .add(egui::DragValue::new(&mut subdivisions).range(1..=10))
                        .changed()
                    {
                        self.store.set_subdivisions(subdivisions);
                        self.persist_settings();
                    }
                });
                ui.separator();
                if ui.checkbox(&mut self.settings.show_rulers, "Rulers").changed() {
                    self.persist_settings();
                }
                ui.label("Guides");
                let guides: Vec<_> = self.store.guides().to_vec();
                if guides.is_empty() {
                    ui.weak("Click a ruler to add one");
                }
                for guide in guides {
                    ui.horizontal(|ui| {
                        let axis = match guide.orientation {
                            GuideOrientation::Horizontal => "y",
                            GuideOrientation::Vertical => "x",
                        };
                        ui.label(format!("{axis} = {:.0}", guide.position));
                        if ui.small_button("✖").clicked() {
                            self.store.remove_guide(guide.id);
                        }
                    });
                }
                menu_item(ui, "Clear Guides", cx.has_guides, CommandId::ClearGuides, &mut out);
            });
            ui.menu_button("Tools", |ui| {
                menu_item(ui, "Select (V)", true, CommandId::ToolSelect, &mut out);
                menu_item(ui, "Measure (M)", true, CommandId::ToolMeasure, &mut out);
            });
            ui.menu_button("Help", |ui| {
                menu_item(ui, "Shortcuts (F1)", true, CommandId::Help, &mut out);
                if ui.button("Command Palette (⌘⇧P)").clicked() {
                    self.command_palette.open();
                    ui.close_menu();
                }
            });
        });
        out
    }

    fn status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            match &self.status {
                Some(status) => ui.label(status),
                None => ui.label("Ready"),
            };
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("Zoom: {:.0}%", self.store.viewport().scale * 100.0));
                ui.separator();
                ui.label(format!("Elements: {}", self.store.elements().len()));
                ui.separator();
                ui.label(format!("Selected: {}", self.store.selected_ids().len()));
                ui.separator();
                let tool = match self.store.active_tool() {
                    Tool::Select => "Select",
                    Tool::Measure => "Measure",
                };
                ui.label(tool);
                ui.separator();
                if self.is_dirty() {
                    ui.colored_label(egui::Color32::from_rgb(234, 179, 8), "● unsaved");
                } else {
                    ui.weak("saved");
                }
                ui.label(self.venue.as_str());
            });
        });
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (mut commands, nudges) = self.shortcuts(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            commands.extend(self.menu_bar(ui));
        });
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            commands.extend(self.toolbar_ui(ui));
        });
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.status_bar(ui);
        });
        egui::SidePanel::left("palette")
            .resizable(true)
            .default_width(160.0)
            .show(ctx, |ui| self.palette_ui(ui));
        egui::SidePanel::right("properties")
            .resizable(true)
            .min_width(220.0)
            .show(ctx, |ui| self.properties_ui(ui));
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.surface_ui(ui));

        if let Some(id) = self.command_palette.ui(ctx, self.command_context()) {
            commands.push(id);
        }
        draw_help_window(ctx, &mut self.show_help);

        let ran = !commands.is_empty() || !nudges.is_empty();
        for id in commands {
            if CommandPalette::is_enabled(self.command_context(), id) {
                self.execute(id);
            }
        }
        for (dx, dy, fast) in nudges {
            self.nudge(dx, dy, fast);
        }
        if ran {
            ctx.request_repaint();
        }
    }
}
