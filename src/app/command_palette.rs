#[cfg(test)]
#[path = "command_palette_test.rs"]
mod command_palette_test;

use eframe::egui;
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::model::ElementType;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum CommandId {
    ToolSelect,
    ToolMeasure,
    ToggleGrid,
    ToggleSnap,
    Undo,
    Redo,
    Duplicate,
    Delete,
    ToggleLock,
    ClearSelection,
    ZoomIn,
    ZoomOut,
    ResetView,
    ClearGuides,
    Save,
    SaveAs,
    Open,
    ClearLayout,
    Help,
    Add(ElementType),
}

pub(super) struct CommandSpec {
    pub id: CommandId,
    pub name: &'static str,
    pub search: &'static str,
}

const COMMANDS: &[CommandSpec] = &[
    CommandSpec { id: CommandId::ToolSelect, name: "Tool: Select", search: "select tool v" },
    CommandSpec { id: CommandId::ToolMeasure, name: "Tool: Measure", search: "measure distance ruler tool m" },
    CommandSpec { id: CommandId::ToggleGrid, name: "Grid: Toggle grid", search: "grid show hide toggle g" },
    CommandSpec { id: CommandId::ToggleSnap, name: "Grid: Toggle snap", search: "grid snap toggle s" },
    CommandSpec { id: CommandId::Undo, name: "Edit: Undo", search: "undo" },
    CommandSpec { id: CommandId::Redo, name: "Edit: Redo", search: "redo" },
    CommandSpec { id: CommandId::Duplicate, name: "Edit: Duplicate", search: "duplicate clone copy" },
    CommandSpec { id: CommandId::Delete, name: "Edit: Delete", search: "delete remove" },
    CommandSpec { id: CommandId::ToggleLock, name: "Edit: Lock / Unlock", search: "lock unlock toggle" },
    CommandSpec { id: CommandId::ClearSelection, name: "Edit: Clear selection", search: "deselect clear selection none" },
    CommandSpec { id: CommandId::ZoomIn, name: "View: Zoom in", search: "zoom in" },
    CommandSpec { id: CommandId::ZoomOut, name: "View: Zoom out", search: "zoom out" },
    CommandSpec { id: CommandId::ResetView, name: "View: Reset view", search: "reset view zoom pan 0" },
    CommandSpec { id: CommandId::ClearGuides, name: "View: Clear guides", search: "guides clear remove" },
    CommandSpec { id: CommandId::Save, name: "File: Save", search: "save venue" },
    CommandSpec { id: CommandId::SaveAs, name: "File: Save as", search: "save as export file json" },
    CommandSpec { id: CommandId::Open, name: "File: Open", search: "open load import file json" },
    CommandSpec { id: CommandId::ClearLayout, name: "File: Clear layout", search: "clear new empty layout" },
    CommandSpec { id: CommandId::Help, name: "Help: Shortcuts", search: "help shortcuts keys f1" },
    CommandSpec { id: CommandId::Add(ElementType::Table), name: "Add: Table", search: "add table seating" },
    CommandSpec { id: CommandId::Add(ElementType::Booth), name: "Add: Booth", search: "add booth seating" },
    CommandSpec { id: CommandId::Add(ElementType::Bar), name: "Add: Bar", search: "add bar drinks" },
    CommandSpec { id: CommandId::Add(ElementType::Stage), name: "Add: Stage", search: "add stage dj" },
    CommandSpec { id: CommandId::Add(ElementType::DanceFloor), name: "Add: Dance Floor", search: "add dance floor" },
    CommandSpec { id: CommandId::Add(ElementType::Entrance), name: "Add: Entrance", search: "add entrance door" },
    CommandSpec { id: CommandId::Add(ElementType::Exit), name: "Add: Exit", search: "add exit door" },
    CommandSpec { id: CommandId::Add(ElementType::Service), name: "Add: Service Area", search: "add service area" },
    CommandSpec { id: CommandId::Add(ElementType::VipArea), name: "Add: VIP Area", search: "add vip area" },
    CommandSpec { id: CommandId::Add(ElementType::Custom), name: "Add: Custom", search: "add custom element" },
];

#[derive(Default)]
pub(super) struct CommandPalette {
    pub open: bool,
    pub query: String,
    pub selected: usize,
    request_focus: bool,
}

#[derive(Clone, Copy)]
pub(super) struct CommandContext {
    pub selected_len: usize,
    pub has_undo: bool,
    pub has_redo: bool,
    pub has_guides: bool,
}

impl CommandPalette {
    pub fn open(&mut self) {
        self.open = true;
        self.query.clear();
        self.selected = 0;
        self.request_focus = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.selected = 0;
        self.request_focus = false;
    }

    pub(super) fn is_enabled(cx: CommandContext, id: CommandId) -> bool {
        match id {
            CommandId::Undo => cx.has_undo,
            CommandId::Redo => cx.has_redo,
            CommandId::Duplicate | CommandId::Delete | CommandId::ClearSelection => cx.selected_len > 0,
            CommandId::ToggleLock => cx.selected_len == 1,
            CommandId::ClearGuides => cx.has_guides,
            _ => true,
        }
    }

    fn filtered(&self) -> Vec<(&'static CommandSpec, i64)> {
        filter_commands(&self.query)
    }

    pub fn ui(&mut self, ctx: &egui::Context, cx: CommandContext) -> Option<CommandId> {
        if !self.open {
            return None;
        }
        let matches = self.filtered();
        if self.selected >= matches.len() {
            self.selected = matches.len().saturating_sub(1);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.close();
            return None;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowDown)) && !matches.is_empty() {
            self.selected = (self.selected + 1).min(matches.len() - 1);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowUp)) && !matches.is_empty() {
            self.selected = self.selected.saturating_sub(1);
        }
        let mut run_selected = ctx.input(|i| i.key_pressed(egui::Key::Enter));

        let screen = ctx.content_rect();
        let width = 480.0;
        let height = 320.0;
        let pos = egui::pos2(screen.center().x - width * 0.5, screen.top() + 48.0);
        egui::Area::new(egui::Id::new("command_palette"))
            .fixed_pos(pos)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                let frame = egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(20, 20, 20, 240))
                    .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(90, 160, 255)))
                    .inner_margin(10.0)
                    .corner_radius(egui::CornerRadius::same(8));
                frame.show(ui, |ui| {
                    ui.set_min_size(egui::vec2(width, height));
                    let resp = ui.add(
                        egui::TextEdit::singleline(&mut self.query)
                            .desired_width(f32::INFINITY)
                            .hint_text("Search commands"),
                    );
                    if self.request_focus {
                        resp.request_focus();
                        self.request_focus = false;
                    }
                    ui.separator();
                    egui::ScrollArea::vertical().max_height(height - 64.0).show(ui, |ui| {
                        for (idx, (spec, _score)) in matches.iter().take(24).enumerate() {
                            let enabled = CommandPalette::is_enabled(cx, spec.id);
                            let resp = ui.add_enabled(
                                enabled,
                                egui::Button::new(spec.name).selected(idx == self.selected),
                            );
                            if resp.clicked() {
                                self.selected = idx;
                                run_selected = true;
                            }
                        }
                    });
                });
            });

        if run_selected {
            if let Some((spec, _)) = matches.get(self.selected) {
                if CommandPalette::is_enabled(cx, spec.id) {
                    let cmd = spec.id;
                    self.close();
                    return Some(cmd);
                }
            }
        }
        None
    }
}

/// Commands matching `query`, best first. An empty query lists everything
/// in declaration order.
pub(super) fn filter_commands(query: &str) -> Vec<(&'static CommandSpec, i64)> {
    let q = query.trim();
    if q.is_empty() {
        return COMMANDS.iter().map(|c| (c, 0)).collect();
    }
    let matcher = SkimMatcherV2::default();
    let mut out: Vec<_> = COMMANDS
        .iter()
        .filter_map(|c| matcher.fuzzy_match(c.search, q).map(|score| (c, score)))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.name.cmp(b.0.name)));
    out
}
