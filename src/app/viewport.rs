//! Canvas coordinate plumbing between egui screen positions and the store's
//! viewport. Store coordinates are relative to the canvas rect's top-left.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use eframe::egui;

use crate::model::{Point, ViewportState};

pub(super) fn canvas_point(origin: egui::Pos2, pos: egui::Pos2) -> Point {
    Point::new(f64::from(pos.x - origin.x), f64::from(pos.y - origin.y))
}

pub(super) fn screen_pos(origin: egui::Pos2, canvas: Point) -> egui::Pos2 {
    egui::pos2(origin.x + canvas.x as f32, origin.y + canvas.y as f32)
}

pub(super) fn world_to_pos(origin: egui::Pos2, viewport: &ViewportState, world: Point) -> egui::Pos2 {
    screen_pos(origin, viewport.world_to_screen(world))
}

pub(super) fn pos_to_world(origin: egui::Pos2, viewport: &ViewportState, pos: egui::Pos2) -> Point {
    viewport.screen_to_world(canvas_point(origin, pos))
}

/// Discrete zoom steps for one frame of wheel input. Scrolling up zooms in.
pub(super) fn wheel_steps(scroll_y: f32) -> f64 {
    if scroll_y > 0.0 {
        1.0
    } else if scroll_y < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Zoom steps equivalent to a pinch factor (`> 1` zooms in).
pub(super) fn pinch_steps(zoom_delta: f32) -> f64 {
    let delta = f64::from(zoom_delta);
    if !delta.is_finite() || delta <= 0.0 || (delta - 1.0).abs() < 1e-6 {
        return 0.0;
    }
    delta.ln() / crate::store::ZOOM_STEP.ln()
}

/// World point at the middle of a canvas of `size` screen pixels.
pub(super) fn visible_center(viewport: &ViewportState, size: egui::Vec2) -> Point {
    viewport.screen_to_world(Point::new(f64::from(size.x) * 0.5, f64::from(size.y) * 0.5))
}

pub(super) fn screen_len(viewport: &ViewportState, world_len: f64) -> f32 {
    (world_len * viewport.scale) as f32
}
