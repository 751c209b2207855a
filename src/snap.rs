//! Geometry and snapping.
//!
//! Pure functions over element placements. Snapping is applied when a
//! gesture commits, never while it is in flight; the gesture code keeps
//! the raw pointer-driven placement and only calls `resolve_*` on release.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use crate::catalog::ElementTemplate;
use crate::model::{ElementPatch, GridConfig, Point};

pub const ROTATION_STEP_DEG: f64 = 15.0;

/// `round(v / grid) * grid`. Returns `v` untouched for a degenerate grid.
pub fn snap_value(v: f64, grid: f64) -> f64 {
    if !grid.is_finite() || grid <= 0.0 {
        return v;
    }
    let snapped = (v / grid).round() * grid;
    // Avoid -0.0 leaking into saved layouts.
    if snapped == 0.0 { 0.0 } else { snapped }
}

pub fn normalize_rotation(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 || wrapped == 0.0 { 0.0 } else { wrapped }
}

/// Nearest multiple of [`ROTATION_STEP_DEG`], wrapped into `[0, 360)`.
pub fn snap_rotation(deg: f64) -> f64 {
    normalize_rotation(snap_value(deg, ROTATION_STEP_DEG))
}

/// Position, size and rotation of an element's rectangle.
///
/// `(x, y)` is the origin of the element's local frame; the frame is rotated
/// clockwise by `rotation` degrees around that origin, so the rectangle spans
/// local `[0, width] x [0, height]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

impl Placement {
    fn sin_cos(&self) -> (f64, f64) {
        self.rotation.to_radians().sin_cos()
    }

    pub fn local_to_world(&self, local: Point) -> Point {
        let (sin, cos) = self.sin_cos();
        Point {
            x: self.x + local.x * cos - local.y * sin,
            y: self.y + local.x * sin + local.y * cos,
        }
    }

    pub fn world_to_local(&self, world: Point) -> Point {
        let (sin, cos) = self.sin_cos();
        let dx = world.x - self.x;
        let dy = world.y - self.y;
        Point {
            x: dx * cos + dy * sin,
            y: -dx * sin + dy * cos,
        }
    }

    pub fn center(&self) -> Point {
        self.local_to_world(Point::new(self.width * 0.5, self.height * 0.5))
    }

    /// Whether `world` is inside the rotated rectangle (edges inclusive).
    pub fn contains(&self, world: Point) -> bool {
        let local = self.world_to_local(world);
        local.x >= 0.0 && local.y >= 0.0 && local.x <= self.width && local.y <= self.height
    }

    /// Corners in drawing order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.local_to_world(Point::new(0.0, 0.0)),
            self.local_to_world(Point::new(self.width, 0.0)),
            self.local_to_world(Point::new(self.width, self.height)),
            self.local_to_world(Point::new(0.0, self.height)),
        ]
    }

    /// Same rectangle turned to `rotation` about its center.
    pub fn rotated_about_center(&self, rotation: f64) -> Placement {
        let center = self.center();
        let mut out = Placement { rotation, ..*self };
        let offset = out.local_to_world(Point::new(self.width * 0.5, self.height * 0.5));
        out.x += center.x - offset.x;
        out.y += center.y - offset.y;
        out
    }

    pub fn to_patch(&self) -> ElementPatch {
        ElementPatch {
            x: Some(self.x),
            y: Some(self.y),
            width: Some(self.width),
            height: Some(self.height),
            rotation: Some(self.rotation),
            ..Default::default()
        }
    }
}

/// Committed origin for a drag that was released at `(x, y)`.
pub fn resolve_move(x: f64, y: f64, grid: &GridConfig) -> Point {
    if grid.snap {
        Point::new(snap_value(x, grid.size), snap_value(y, grid.size))
    } else {
        Point::new(x, y)
    }
}

/// Committed placement for a resize. All fields are quantized together and
/// then clamped to the template minimums.
pub fn resolve_transform(
    proposed: Placement,
    template: &ElementTemplate,
    grid: &GridConfig,
) -> Placement {
    let mut out = proposed;
    if grid.snap {
        out.x = snap_value(out.x, grid.size);
        out.y = snap_value(out.y, grid.size);
        out.width = snap_value(out.width, grid.size);
        out.height = snap_value(out.height, grid.size);
        out.rotation = snap_rotation(out.rotation);
    }
    out.width = out.width.max(template.min_width);
    out.height = out.height.max(template.min_height);
    out.rotation = normalize_rotation(out.rotation);
    out
}

/// Committed placement for a rotation gesture. The center stays put.
pub fn resolve_rotation(start: Placement, rotation: f64, grid: &GridConfig) -> Placement {
    let rotation = if grid.snap {
        snap_rotation(rotation)
    } else {
        normalize_rotation(rotation)
    };
    start.rotated_about_center(rotation)
}
