#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use eframe::egui;

use crate::model::{GridConfig, GuideOrientation, LayoutGuide, Point, ViewportState};

use super::viewport::{pos_to_world, screen_len, world_to_pos};

pub(super) const RULER_SIZE: f32 = 20.0;
const RULER_MAJOR: f64 = 100.0;
const RULER_MINOR: f64 = 20.0;
const MIN_LINE_SPACING: f32 = 6.0;
const MAX_LINES: usize = 2_000;

const GUIDE_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 180, 255);
const MEASURE_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 160, 40);

pub(super) fn draw_background(
    painter: &egui::Painter,
    rect: egui::Rect,
    grid: &GridConfig,
    viewport: &ViewportState,
) {
    let bg = painter.ctx().style().visuals.extreme_bg_color;
    painter.rect_filled(rect, 0.0, bg);
    if !grid.enabled {
        return;
    }
    let subdivisions = f64::from(grid.subdivisions.max(1));
    if subdivisions > 1.0 {
        draw_grid_lines(
            painter,
            rect,
            viewport,
            grid.size / subdivisions,
            egui::Stroke::new(1.0, egui::Color32::from_gray(45)),
        );
    }
    draw_grid_lines(
        painter,
        rect,
        viewport,
        grid.size,
        egui::Stroke::new(1.0, egui::Color32::from_gray(70)),
    );
}

/// Multiples of `step` from `from` to `to`, counted by index so a far-off
/// origin where `x + step == x` still ends. At most `MAX_LINES` values.
pub(super) fn line_positions(from: f64, to: f64, step: f64) -> impl Iterator<Item = f64> {
    let first = (from / step).floor();
    let span = (to / step).floor() - first + 1.0;
    let count = if span.is_finite() && span > 0.0 {
        (span as usize).min(MAX_LINES)
    } else {
        0
    };
    (0..count).map(move |i| (first + i as f64) * step)
}

/// Lines every `spacing` canvas units, skipped when they would be too dense
/// to read.
fn draw_grid_lines(
    painter: &egui::Painter,
    rect: egui::Rect,
    viewport: &ViewportState,
    spacing: f64,
    stroke: egui::Stroke,
) {
    if !spacing.is_finite() || spacing <= 0.0 || screen_len(viewport, spacing) < MIN_LINE_SPACING {
        return;
    }
    let origin = rect.min;
    let top_left = pos_to_world(origin, viewport, rect.min);
    let bottom_right = pos_to_world(origin, viewport, rect.max);

    for x in line_positions(top_left.x, bottom_right.x, spacing) {
        let sx = world_to_pos(origin, viewport, Point::new(x, 0.0)).x;
        painter.line_segment(
            [egui::pos2(sx, rect.min.y), egui::pos2(sx, rect.max.y)],
            stroke,
        );
    }
    for y in line_positions(top_left.y, bottom_right.y, spacing) {
        let sy = world_to_pos(origin, viewport, Point::new(0.0, y)).y;
        painter.line_segment(
            [egui::pos2(rect.min.x, sy), egui::pos2(rect.max.x, sy)],
            stroke,
        );
    }
}

pub(super) fn draw_guides(
    painter: &egui::Painter,
    rect: egui::Rect,
    guides: &[LayoutGuide],
    viewport: &ViewportState,
) {
    let origin = rect.min;
    for guide in guides {
        let color = guide.color.map_or(GUIDE_COLOR, |c| {
            egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
        });
        let stroke = egui::Stroke::new(1.0, color);
        let (a, b) = match guide.orientation {
            GuideOrientation::Vertical => {
                let x = world_to_pos(origin, viewport, Point::new(guide.position, 0.0)).x;
                (egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y))
            }
            GuideOrientation::Horizontal => {
                let y = world_to_pos(origin, viewport, Point::new(0.0, guide.position)).y;
                (egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y))
            }
        };
        draw_dashed_line(painter, a, b, stroke, 8.0, 6.0);
    }
}

pub(super) fn draw_rulers(painter: &egui::Painter, rect: egui::Rect, viewport: &ViewportState) {
    let visuals = painter.ctx().style().visuals.clone();
    let fill = visuals.panel_fill;
    let tick = egui::Stroke::new(1.0, visuals.weak_text_color());
    let text_color = visuals.text_color();
    let font = egui::FontId::monospace(9.0);
    let origin = rect.min;

    let top = egui::Rect::from_min_max(rect.min, egui::pos2(rect.max.x, rect.min.y + RULER_SIZE));
    let left = egui::Rect::from_min_max(rect.min, egui::pos2(rect.min.x + RULER_SIZE, rect.max.y));
    painter.rect_filled(top, 0.0, fill);
    painter.rect_filled(left, 0.0, fill);

    let show_minor = screen_len(viewport, RULER_MINOR) >= 4.0;
    let show_labels = screen_len(viewport, RULER_MAJOR) >= 36.0;
    let step = if show_minor { RULER_MINOR } else { RULER_MAJOR };
    if screen_len(viewport, step) < 2.0 {
        return;
    }
    let top_left = pos_to_world(origin, viewport, rect.min);
    let bottom_right = pos_to_world(origin, viewport, rect.max);

    for x in line_positions(top_left.x, bottom_right.x, step) {
        let sx = world_to_pos(origin, viewport, Point::new(x, 0.0)).x;
        let major = is_multiple(x, RULER_MAJOR);
        let len = if major { RULER_SIZE * 0.6 } else { RULER_SIZE * 0.3 };
        if sx > top.min.x + RULER_SIZE {
            painter.line_segment([egui::pos2(sx, top.max.y - len), egui::pos2(sx, top.max.y)], tick);
            if major && show_labels {
                painter.text(
                    egui::pos2(sx + 2.0, top.min.y + 1.0),
                    egui::Align2::LEFT_TOP,
                    format!("{x:.0}"),
                    font.clone(),
                    text_color,
                );
            }
        }
    }

    for y in line_positions(top_left.y, bottom_right.y, step) {
        let sy = world_to_pos(origin, viewport, Point::new(0.0, y)).y;
        let major = is_multiple(y, RULER_MAJOR);
        let len = if major { RULER_SIZE * 0.6 } else { RULER_SIZE * 0.3 };
        if sy > left.min.y + RULER_SIZE {
            painter.line_segment([egui::pos2(left.max.x - len, sy), egui::pos2(left.max.x, sy)], tick);
            if major && show_labels {
                painter.text(
                    egui::pos2(left.min.x + 1.0, sy + 2.0),
                    egui::Align2::LEFT_TOP,
                    format!("{y:.0}"),
                    font.clone(),
                    text_color,
                );
            }
        }
    }
}

fn is_multiple(v: f64, of: f64) -> bool {
    let r = (v / of).round() * of;
    (v - r).abs() < 1e-6
}

pub(super) fn draw_measure(
    painter: &egui::Painter,
    origin: egui::Pos2,
    viewport: &ViewportState,
    from: Point,
    to: Point,
) {
    let a = world_to_pos(origin, viewport, from);
    let b = world_to_pos(origin, viewport, to);
    let stroke = egui::Stroke::new(1.5, MEASURE_COLOR);
    painter.line_segment([a, b], stroke);
    painter.circle_filled(a, 3.0, MEASURE_COLOR);
    painter.circle_filled(b, 3.0, MEASURE_COLOR);
    let length = (to.x - from.x).hypot(to.y - from.y);
    let mid = a + (b - a) * 0.5;
    painter.text(
        mid + egui::vec2(6.0, -6.0),
        egui::Align2::LEFT_BOTTOM,
        format!("{length:.1}"),
        egui::FontId::proportional(12.0),
        MEASURE_COLOR,
    );
}

/// Text centered on `center`, turned by `rotation` radians.
pub(super) fn draw_rotated_text(
    painter: &egui::Painter,
    center: egui::Pos2,
    text: &str,
    font_size: f32,
    color: egui::Color32,
    rotation: f32,
) {
    let font_id = egui::FontId::proportional(font_size);
    let galley = painter.layout_no_wrap(text.to_string(), font_id, color);
    let size = galley.size();
    let offset = egui::vec2(-size.x * 0.5, -size.y * 0.5);
    if rotation.abs() <= f32::EPSILON {
        painter.galley(center + offset, galley, color);
        return;
    }
    let rotated = egui::emath::Rot2::from_angle(rotation) * offset;
    let mut shape = egui::epaint::TextShape::new(center + rotated, galley, color);
    shape.angle = rotation;
    painter.add(shape);
}

pub(super) fn draw_dashed_line(
    painter: &egui::Painter,
    a: egui::Pos2,
    b: egui::Pos2,
    stroke: egui::Stroke,
    dash_len: f32,
    gap_len: f32,
) {
    let v = b - a;
    let len = v.length();
    if len <= f32::EPSILON {
        return;
    }
    let dir = v / len;
    let mut pos = 0.0;
    let mut drawing = true;
    while pos < len {
        let seg_len = if drawing { dash_len } else { gap_len };
        let next_pos = (pos + seg_len).min(len);
        if drawing {
            painter.line_segment([a + dir * pos, a + dir * next_pos], stroke);
        }
        pos = next_pos;
        drawing = !drawing;
    }
}
