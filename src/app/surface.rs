//! The layout canvas: element drawing, hit testing and pointer wiring.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use eframe::egui;

use crate::catalog;
use crate::model::{Color, ElementId, GuideOrientation, LayoutElement, Point, Tool, ViewportState};
use crate::snap::Placement;
use crate::store::LayoutStore;

use super::EditorApp;
use super::gesture::{Gesture, Handle};
use super::render::{
    RULER_SIZE, draw_background, draw_guides, draw_measure, draw_rotated_text, draw_rulers,
};
use super::viewport::{canvas_point, pinch_steps, screen_pos, wheel_steps, world_to_pos};

/// Side of a resize handle square in screen pixels.
const HANDLE_SIZE: f64 = 10.0;
/// Distance of the rotate handle above the element's top edge, in pixels.
const ROTATE_OFFSET: f64 = 24.0;
const HIT_SLOP: f64 = 2.0;

const SELECTION_COLOR: egui::Color32 = egui::Color32::from_rgb(90, 160, 255);
const HOVER_COLOR: egui::Color32 = egui::Color32::from_rgba_premultiplied(45, 80, 128, 128);
const LOCKED_OPACITY: f32 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub(super) enum Pick {
    Handle(ElementId, Handle),
    Rotate(ElementId),
    Element(ElementId),
    Empty,
}

/// The single selected element when it can take resize or rotate handles.
fn transform_target(store: &LayoutStore) -> Option<&LayoutElement> {
    store.selected_element().filter(|e| !e.is_locked)
}

/// Handle centers in canvas-relative screen pixels.
pub(super) fn handle_points(placement: &Placement, viewport: &ViewportState) -> [(Handle, Point); 8] {
    Handle::ALL.map(|h| {
        let local = h.local_position(placement.width, placement.height);
        (h, viewport.world_to_screen(placement.local_to_world(local)))
    })
}

pub(super) fn rotate_handle_point(placement: &Placement, viewport: &ViewportState) -> Point {
    let local = Point::new(placement.width * 0.5, -ROTATE_OFFSET / viewport.scale);
    viewport.world_to_screen(placement.local_to_world(local))
}

/// Hit test at a canvas-relative screen point. Handles of the transform
/// target win over elements; among elements the last drawn (topmost) wins.
pub(super) fn pick(store: &LayoutStore, screen: Point) -> Pick {
    let viewport = store.viewport();
    if let Some(element) = transform_target(store) {
        let template = catalog::lookup(element.element_type());
        let placement = element.placement();
        if template.allow_resize {
            let reach = HANDLE_SIZE * 0.5 + HIT_SLOP;
            for (handle, p) in handle_points(&placement, viewport) {
                if (p.x - screen.x).abs() <= reach && (p.y - screen.y).abs() <= reach {
                    return Pick::Handle(element.id.clone(), handle);
                }
            }
        }
        if template.allow_rotate {
            let p = rotate_handle_point(&placement, viewport);
            if (p.x - screen.x).hypot(p.y - screen.y) <= HANDLE_SIZE * 0.5 + HIT_SLOP {
                return Pick::Rotate(element.id.clone());
            }
        }
    }
    let world = viewport.screen_to_world(screen);
    store
        .elements()
        .iter()
        .rev()
        .find(|e| e.contains(world))
        .map_or(Pick::Empty, |e| Pick::Element(e.id.clone()))
}

/// Guide orientation for a click on the rulers, if the point is on one.
/// The top ruler places vertical guides and the left one horizontal guides.
pub(super) fn ruler_hit(screen: Point) -> Option<GuideOrientation> {
    let band = f64::from(RULER_SIZE);
    match (screen.x < band, screen.y < band) {
        (false, true) => Some(GuideOrientation::Vertical),
        (true, false) => Some(GuideOrientation::Horizontal),
        _ => None,
    }
}

fn color32(c: Color, opacity: f32) -> egui::Color32 {
    let a = (f32::from(c.a) * opacity.clamp(0.0, 1.0)).round() as u8;
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, a)
}

impl EditorApp {
    pub(super) fn surface_ui(&mut self, ui: &mut egui::Ui) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        let origin = rect.min;
        self.canvas_size = rect.size();
        let ctx = ui.ctx().clone();

        let (scroll, zoom_delta, hover_pos, modifiers) = ctx.input(|i| {
            (i.raw_scroll_delta.y, i.zoom_delta(), i.pointer.hover_pos(), i.modifiers)
        });
        let hover_pos = hover_pos.filter(|p| rect.contains(*p));

        if let Some(pos) = hover_pos {
            let steps = if (zoom_delta - 1.0).abs() > f32::EPSILON {
                pinch_steps(zoom_delta)
            } else {
                wheel_steps(scroll)
            };
            if steps != 0.0 {
                self.store.zoom_by(steps, canvas_point(origin, pos));
            }
        }

        if self.gesture.is_none() {
            let hovered = hover_pos.and_then(|pos| match pick(&self.store, canvas_point(origin, pos)) {
                Pick::Element(id) => Some(id),
                _ => None,
            });
            if hovered.as_ref() != self.store.hovered_id() {
                self.store.set_hovered(hovered);
            }
        }

        let additive = modifiers.shift || modifiers.command;
        if response.drag_started() {
            let press = ctx
                .input(|i| i.pointer.press_origin())
                .or_else(|| response.interact_pointer_pos());
            if let Some(pos) = press {
                self.begin_gesture(canvas_point(origin, pos), additive);
            }
        }
        if response.dragged() {
            if let (Some(gesture), Some(pos)) = (self.gesture.as_mut(), response.interact_pointer_pos()) {
                let screen = canvas_point(origin, pos);
                gesture.update(self.store.viewport().screen_to_world(screen), screen);
                if let Some(position) = gesture.pan_position() {
                    self.store.set_position(position);
                }
            }
        }
        if response.drag_stopped() {
            if let Some(gesture) = self.gesture.take() {
                gesture.finish(&mut self.store);
            }
        }
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.click(canvas_point(origin, pos), additive);
            }
        }

        let painter = ui.painter_at(rect);
        let viewport = *self.store.viewport();
        draw_background(&painter, rect, self.store.grid(), &viewport);
        draw_guides(&painter, rect, self.store.guides(), &viewport);
        for element in self.store.elements() {
            let placement = self
                .gesture
                .as_ref()
                .and_then(|g| g.live_placement(&element.id))
                .unwrap_or_else(|| element.placement());
            self.draw_element(&painter, origin, element, &placement);
        }
        if let Some(element) = transform_target(&self.store) {
            let placement = self
                .gesture
                .as_ref()
                .and_then(|g| g.live_placement(&element.id))
                .unwrap_or_else(|| element.placement());
            draw_handles(&painter, origin, element, &placement, &viewport);
        }
        if let Some((from, to)) = self.gesture.as_ref().and_then(Gesture::measure_line) {
            draw_measure(&painter, origin, &viewport, from, to);
        }
        if self.settings.show_rulers {
            draw_rulers(&painter, rect, &viewport);
        }

        if self.gesture.is_some() {
            ctx.request_repaint();
        }
    }

    fn begin_gesture(&mut self, screen: Point, additive: bool) {
        if self.settings.show_rulers && ruler_hit(screen).is_some() {
            return;
        }
        let world = self.store.viewport().screen_to_world(screen);
        self.gesture = match self.store.active_tool() {
            Tool::Measure => Some(Gesture::measure(world)),
            Tool::Select => match pick(&self.store, screen) {
                Pick::Handle(id, handle) => Gesture::resize(&self.store, &id, handle, world),
                Pick::Rotate(id) => Gesture::rotate(&self.store, &id, world),
                Pick::Element(id) => {
                    if additive {
                        self.store.extend_selection(&id);
                    } else if !self.store.is_selected(&id) {
                        self.store.select_only(&id);
                    }
                    Gesture::drag(&self.store, &id, world)
                }
                Pick::Empty => Some(Gesture::pan(&self.store, screen)),
            },
        };
    }

    fn click(&mut self, screen: Point, additive: bool) {
        if self.settings.show_rulers {
            if let Some(orientation) = ruler_hit(screen) {
                let world = self.store.viewport().screen_to_world(screen);
                let position = match orientation {
                    GuideOrientation::Vertical => world.x,
                    GuideOrientation::Horizontal => world.y,
                };
                self.store.add_guide(orientation, position);
                return;
            }
        }
        match pick(&self.store, screen) {
            Pick::Element(id) if additive => self.store.extend_selection(&id),
            Pick::Element(id) => self.store.select_only(&id),
            Pick::Handle(..) | Pick::Rotate(_) => {}
            Pick::Empty => {
                if !additive {
                    self.store.clear_selection();
                }
            }
        }
    }

    fn draw_element(
        &self,
        painter: &egui::Painter,
        origin: egui::Pos2,
        element: &LayoutElement,
        placement: &Placement,
    ) {
        let viewport = self.store.viewport();
        let template = catalog::lookup(element.element_type());
        let (fill, stroke, opacity) = match &element.style {
            Some(style) => (
                style.fill.color_or(template.style.fill),
                style.stroke.color_or(template.style.stroke),
                style.opacity,
            ),
            None => (template.style.fill, template.style.stroke, None),
        };
        let mut opacity = opacity.unwrap_or(1.0);
        if element.is_locked {
            opacity *= LOCKED_OPACITY;
        }

        let points: Vec<egui::Pos2> = placement
            .corners()
            .iter()
            .map(|c| world_to_pos(origin, viewport, *c))
            .collect();
        painter.add(egui::Shape::convex_polygon(
            points.clone(),
            color32(fill, opacity),
            egui::Stroke::new(2.0, color32(stroke, opacity)),
        ));

        let selected = self.store.is_selected(&element.id);
        if selected {
            painter.add(egui::Shape::closed_line(
                points,
                egui::Stroke::new(1.5, SELECTION_COLOR),
            ));
        } else if self.store.hovered_id() == Some(&element.id) {
            painter.add(egui::Shape::closed_line(points, egui::Stroke::new(3.0, HOVER_COLOR)));
        }

        let (scale, angle) = (viewport.scale as f32, placement.rotation.to_radians() as f32);
        let center = world_to_pos(origin, viewport, placement.center());
        let text_color = painter.ctx().style().visuals.strong_text_color();
        let text_color = color32(
            Color::rgba(text_color.r(), text_color.g(), text_color.b(), 255),
            if element.is_locked { LOCKED_OPACITY } else { 1.0 },
        );
        let font_size = (12.0 * scale).clamp(6.0, 32.0);
        let label = match element.capacity {
            Some(capacity) => format!("{}\n{capacity} seats", element.name),
            None => element.name.clone(),
        };
        if font_size >= 7.0 {
            draw_rotated_text(painter, center, &label, font_size, text_color, angle);
        }
        if element.is_locked {
            let corner = world_to_pos(origin, viewport, placement.local_to_world(Point::new(
                placement.width - 8.0 / viewport.scale,
                8.0 / viewport.scale,
            )));
            draw_rotated_text(painter, corner, "🔒", 10.0, text_color, angle);
        }
    }
}

fn draw_handles(
    painter: &egui::Painter,
    origin: egui::Pos2,
    element: &LayoutElement,
    placement: &Placement,
    viewport: &ViewportState,
) {
    let template = catalog::lookup(element.element_type());
    let fill = egui::Color32::from_rgb(250, 250, 250);
    let stroke = egui::Stroke::new(1.0, SELECTION_COLOR);
    let size = HANDLE_SIZE as f32;

    if template.allow_resize {
        for (_, p) in handle_points(placement, viewport) {
            let r = egui::Rect::from_center_size(screen_pos(origin, p), egui::vec2(size, size));
            painter.rect_filled(r, 1.0, fill);
            painter.rect_stroke(r, 1.0, stroke, egui::StrokeKind::Middle);
        }
    }
    if template.allow_rotate {
        let top = world_to_pos(
            origin,
            viewport,
            placement.local_to_world(Point::new(placement.width * 0.5, 0.0)),
        );
        let p = rotate_handle_point(placement, viewport);
        let knob = screen_pos(origin, p);
        painter.line_segment([top, knob], stroke);
        painter.circle_filled(knob, size * 0.5, fill);
        painter.circle_stroke(knob, size * 0.5, stroke);
    }
}
