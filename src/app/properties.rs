//! Properties panel for the single selected element.
//!
//! The panel keeps no draft state: every frame it reads the element from the
//! store, and each edited field becomes one `update_element` patch.

use eframe::egui;

use crate::catalog::{self, ElementTemplate};
use crate::model::{
    BarProps, Color, ElementKind, ElementPatch, LayoutElement, ServiceSide,
    StageProps, StageType,
};

use super::EditorApp;

const MAX_EXTENT: f64 = 100_000.0;
const MAX_CAPACITY: u32 = 999;

fn color_row(ui: &mut egui::Ui, color: &mut Color, text: &str) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        let presets = [
            Color::rgb(59, 130, 246),
            Color::rgb(139, 92, 246),
            Color::rgb(234, 179, 8),
            Color::rgb(236, 72, 153),
            Color::rgb(34, 197, 94),
            Color::rgb(239, 68, 68),
        ];
        for c in presets {
            let swatch = egui::Color32::from_rgb(c.r, c.g, c.b);
            if ui
                .add_sized([18.0, 18.0], egui::Button::new("").fill(swatch))
                .clicked()
            {
                // Presets keep the current translucency.
                *color = Color::rgba(c.r, c.g, c.b, color.a);
                changed = true;
            }
        }
        let mut arr = [color.r, color.g, color.b, color.a];
        if ui.color_edit_button_srgba_unmultiplied(&mut arr).changed() {
            *color = Color::rgba(arr[0], arr[1], arr[2], arr[3]);
            changed = true;
        }
        ui.monospace(text);
    });
    changed
}

fn kind_editor(ui: &mut egui::Ui, kind: ElementKind) -> Option<ElementKind> {
    match kind {
        ElementKind::Bar(props) => {
            let mut side = props.service_side.unwrap_or_default();
            let before = side;
            ui.horizontal(|ui| {
                ui.label("Service side:");
                egui::ComboBox::from_id_salt("service_side")
                    .selected_text(side.label())
                    .show_ui(ui, |ui| {
                        for option in ServiceSide::ALL {
                            ui.selectable_value(&mut side, option, option.label());
                        }
                    });
            });
            (side != before).then_some(
                ElementKind::Bar(BarProps {
                    service_side: Some(side),
                }),
            )
        }
        ElementKind::Stage(props) => {
            let mut stage = props.stage_type.unwrap_or_default();
            let before = stage;
            ui.horizontal(|ui| {
                ui.label("Stage type:");
                egui::ComboBox::from_id_salt("stage_type")
                    .selected_text(stage.label())
                    .show_ui(ui, |ui| {
                        for option in StageType::ALL {
                            ui.selectable_value(&mut stage, option, option.label());
                        }
                    });
            });
            (stage != before).then_some(ElementKind::Stage(StageProps {
                stage_type: Some(stage),
            }))
        }
        _ => None,
    }
}

fn element_editor(
    ui: &mut egui::Ui,
    element: &LayoutElement,
    template: &ElementTemplate,
) -> Option<ElementPatch> {
    let mut patch = ElementPatch::default();
    let mut dirty = false;

    ui.horizontal(|ui| {
        ui.label("Name:");
        let mut name = element.name.clone();
        if ui.text_edit_singleline(&mut name).changed() {
            patch.name = Some(name);
            dirty = true;
        }
    });

    ui.separator();
    ui.label("Position");
    ui.horizontal(|ui| {
        let (mut x, mut y) = (element.x, element.y);
        ui.label("X:");
        if ui.add(egui::DragValue::new(&mut x).speed(1.0)).changed() {
            patch.x = Some(x);
            dirty = true;
        }
        ui.label("Y:");
        if ui.add(egui::DragValue::new(&mut y).speed(1.0)).changed() {
            patch.y = Some(y);
            dirty = true;
        }
    });

    ui.label("Size");
    ui.horizontal(|ui| {
        let (mut w, mut h) = (element.width, element.height);
        ui.label("W:");
        if ui
            .add_enabled(
                template.allow_resize,
                egui::DragValue::new(&mut w)
                    .range(template.min_width..=MAX_EXTENT)
                    .speed(1.0),
            )
            .changed()
        {
            patch.width = Some(w.max(template.min_width));
            dirty = true;
        }
        ui.label("H:");
        if ui
            .add_enabled(
                template.allow_resize,
                egui::DragValue::new(&mut h)
                    .range(template.min_height..=MAX_EXTENT)
                    .speed(1.0),
            )
            .changed()
        {
            patch.height = Some(h.max(template.min_height));
            dirty = true;
        }
    });

    if template.allow_rotate {
        ui.horizontal(|ui| {
            let mut rotation = element.rotation;
            ui.label("Rotation:");
            if ui
                .add(
                    egui::DragValue::new(&mut rotation)
                        .range(0.0..=360.0)
                        .speed(1.0)
                        .suffix("°"),
                )
                .changed()
            {
                patch.rotation = Some(rotation);
                dirty = true;
            }
        });
    }

    if element.element_type().is_seating() {
        ui.horizontal(|ui| {
            let mut capacity = element.capacity.unwrap_or(1);
            ui.label("Capacity:");
            if ui
                .add(egui::DragValue::new(&mut capacity).range(1..=MAX_CAPACITY))
                .changed()
            {
                patch.capacity = Some(capacity);
                dirty = true;
            }
            ui.label("seats");
        });
    }

    if let Some(kind) = kind_editor(ui, element.kind) {
        patch.kind = Some(kind);
        dirty = true;
    }

    ui.separator();
    let current = element.style.clone().unwrap_or_else(|| template.default_style());
    let mut fill = current.fill.color_or(template.style.fill);
    let mut stroke = current.stroke.color_or(template.style.stroke);
    ui.label("Fill");
    let fill_changed = color_row(ui, &mut fill, current.fill.as_str());
    ui.label("Stroke");
    let stroke_changed = color_row(ui, &mut stroke, current.stroke.as_str());
    let mut opacity = current.opacity.unwrap_or(1.0);
    let opacity_changed = ui
        .add(egui::Slider::new(&mut opacity, 0.0..=1.0).text("Opacity"))
        .changed();
    if fill_changed || stroke_changed || opacity_changed {
        // Untouched colors keep their original text.
        let mut style = current;
        if fill_changed {
            style.fill = fill.into();
        }
        if stroke_changed {
            style.stroke = stroke.into();
        }
        if opacity_changed {
            style.opacity = Some(opacity);
        }
        patch.style = Some(style);
        dirty = true;
    }
    let is_default = element
        .style
        .as_ref()
        .is_none_or(|s| *s == template.default_style());
    if ui
        .add_enabled(!is_default, egui::Button::new("Reset to template colors"))
        .clicked()
    {
        patch.style = Some(template.default_style());
        dirty = true;
    }

    if !element.extra_props.is_empty() {
        ui.separator();
        ui.collapsing("Custom properties", |ui| {
            for (key, value) in &element.extra_props {
                ui.horizontal(|ui| {
                    ui.monospace(key);
                    ui.label(value.to_string());
                });
            }
        });
    }

    dirty.then_some(patch)
}

impl EditorApp {
    pub(super) fn properties_ui(&mut self, ui: &mut egui::Ui) {
        let selected = self.store.selected_ids().len();
        let Some(element) = self.store.selected_element().cloned() else {
            ui.heading("Properties");
            ui.separator();
            if selected > 1 {
                ui.label(format!("{selected} elements selected"));
            } else {
                ui.weak("Select an element to edit its properties.");
            }
            return;
        };
        let template = catalog::lookup(element.element_type());

        ui.heading(format!("{} Properties", template.name));
        ui.separator();
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.add_enabled_ui(!element.is_locked, |ui| {
                if let Some(patch) = element_editor(ui, &element, template) {
                    self.store.update_element(&element.id, patch);
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                if element.is_locked {
                    if ui.button("🔓 Unlock").clicked() {
                        self.store.unlock_element(&element.id);
                    }
                } else if ui.button("🔒 Lock").clicked() {
                    self.store.lock_element(&element.id);
                }
                if ui.button("Duplicate").clicked() {
                    self.store.duplicate_element(&element.id);
                }
                if ui.button("Delete").clicked() {
                    self.store.delete_element(&element.id);
                }
            });
        });
    }
}
