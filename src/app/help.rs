use eframe::egui;

pub(super) fn draw_help_window(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("Help & Shortcuts")
        .open(open)
        .resizable(true)
        .default_width(520.0)
        .default_height(460.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Keyboard Shortcuts");
                ui.separator();

                ui.label("General");
                help_row(ui, "⌘⇧P", "Open command palette");
                help_row(ui, "⌘S", "Save venue layout");
                help_row(ui, "⌘O", "Open layout file");
                help_row(ui, "⌘Z", "Undo");
                help_row(ui, "⌘⇧Z / ⌘Y", "Redo");
                help_row(ui, "F1", "This window");

                ui.add_space(10.0);
                ui.label("Selection & Editing");
                help_row(ui, "Click", "Select element");
                help_row(ui, "Shift/⌘ + click", "Add to selection");
                help_row(ui, "Escape", "Clear selection");
                help_row(ui, "⌘D", "Duplicate selection");
                help_row(ui, "Delete / Backspace", "Delete selection");
                help_row(ui, "Arrow keys", "Nudge element or pan canvas");
                help_row(ui, "Shift + Arrow keys", "Nudge faster");

                ui.add_space(10.0);
                ui.label("Tools & View");
                help_row(ui, "V", "Select tool");
                help_row(ui, "M", "Measure tool");
                help_row(ui, "G", "Toggle grid");
                help_row(ui, "S", "Toggle snap to grid");
                help_row(ui, "0", "Reset view");
                help_row(ui, "Scroll / pinch", "Zoom at pointer");
                help_row(ui, "Drag empty canvas", "Pan (select tool)");
                help_row(ui, "Click ruler", "Add a guide");

                ui.add_space(20.0);
                ui.heading("Snapping");
                ui.separator();
                ui.label("With snap on, moves and resizes land on the grid when you let go.");
                ui.label("Rotation snaps to 15° steps.");

                ui.add_space(20.0);
                ui.heading("Settings");
                ui.separator();
                ui.label("Defaults are read from settings.toml:");
                ui.add_space(5.0);
                ui.code(r#"data_dir = "layouts"
grid_size = 20.0
snap_to_grid = true
grid_subdivisions = 2
history_limit = 200"#);
            });
        });
}

fn help_row(ui: &mut egui::Ui, shortcut: &str, description: &str) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [130.0, 16.0],
            egui::Label::new(egui::RichText::new(shortcut).monospace().strong()),
        );
        ui.label(description);
    });
}
