//! Pointer gestures on the canvas.
//!
//! A gesture keeps the element's starting placement and a live placement
//! that follows the pointer. Nothing reaches the store until `finish`, which
//! resolves snapping and minimums and issues a single `update_element`.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use tracing::debug;

use crate::catalog::{self, ElementTemplate};
use crate::model::{ElementId, ElementPatch, Point};
use crate::snap::{self, Placement};
use crate::store::LayoutStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Handle {
    Nw,
    N,
    Ne,
    W,
    E,
    Sw,
    S,
    Se,
}

impl Handle {
    pub(super) const ALL: [Handle; 8] = [
        Handle::Nw,
        Handle::N,
        Handle::Ne,
        Handle::W,
        Handle::E,
        Handle::Sw,
        Handle::S,
        Handle::Se,
    ];

    pub(super) fn local_position(self, width: f64, height: f64) -> Point {
        let (fx, fy) = match self {
            Handle::Nw => (0.0, 0.0),
            Handle::N => (0.5, 0.0),
            Handle::Ne => (1.0, 0.0),
            Handle::W => (0.0, 0.5),
            Handle::E => (1.0, 0.5),
            Handle::Sw => (0.0, 1.0),
            Handle::S => (0.5, 1.0),
            Handle::Se => (1.0, 1.0),
        };
        Point::new(width * fx, height * fy)
    }

    fn moves_left(self) -> bool {
        matches!(self, Handle::Nw | Handle::W | Handle::Sw)
    }

    fn moves_right(self) -> bool {
        matches!(self, Handle::Ne | Handle::E | Handle::Se)
    }

    fn moves_top(self) -> bool {
        matches!(self, Handle::Nw | Handle::N | Handle::Ne)
    }

    fn moves_bottom(self) -> bool {
        matches!(self, Handle::Sw | Handle::S | Handle::Se)
    }
}

#[derive(Clone, Debug)]
pub(super) enum Gesture {
    Drag {
        id: ElementId,
        start: Placement,
        grab: Point,
        live: Placement,
    },
    Resize {
        id: ElementId,
        handle: Handle,
        template: &'static ElementTemplate,
        start: Placement,
        grab: Point,
        live: Placement,
    },
    Rotate {
        id: ElementId,
        start: Placement,
        start_angle: f64,
        live: Placement,
    },
    Pan {
        grab_screen: Point,
        start_position: Point,
        position: Point,
    },
    Measure {
        from: Point,
        to: Point,
    },
}

fn pointer_angle(center: Point, pointer: Point) -> f64 {
    (pointer.y - center.y).atan2(pointer.x - center.x).to_degrees()
}

impl Gesture {
    /// Start moving `id`. Locked or missing elements cannot be dragged.
    pub(super) fn drag(store: &LayoutStore, id: &ElementId, pointer_world: Point) -> Option<Self> {
        let element = store.element(id).filter(|e| !e.is_locked)?;
        let start = element.placement();
        Some(Gesture::Drag {
            id: id.clone(),
            start,
            grab: pointer_world,
            live: start,
        })
    }

    pub(super) fn resize(
        store: &LayoutStore,
        id: &ElementId,
        handle: Handle,
        pointer_world: Point,
    ) -> Option<Self> {
        let element = store.element(id).filter(|e| !e.is_locked)?;
        let template = catalog::lookup(element.element_type());
        if !template.allow_resize {
            return None;
        }
        let start = element.placement();
        Some(Gesture::Resize {
            id: id.clone(),
            handle,
            template,
            start,
            grab: pointer_world,
            live: start,
        })
    }

    pub(super) fn rotate(store: &LayoutStore, id: &ElementId, pointer_world: Point) -> Option<Self> {
        let element = store.element(id).filter(|e| !e.is_locked)?;
        if !catalog::lookup(element.element_type()).allow_rotate {
            return None;
        }
        let start = element.placement();
        Some(Gesture::Rotate {
            id: id.clone(),
            start,
            start_angle: pointer_angle(start.center(), pointer_world),
            live: start,
        })
    }

    pub(super) fn pan(store: &LayoutStore, pointer_screen: Point) -> Self {
        let position = store.viewport().position;
        Gesture::Pan {
            grab_screen: pointer_screen,
            start_position: position,
            position,
        }
    }

    pub(super) fn measure(pointer_world: Point) -> Self {
        Gesture::Measure {
            from: pointer_world,
            to: pointer_world,
        }
    }

    pub(super) fn update(&mut self, pointer_world: Point, pointer_screen: Point) {
        match self {
            Gesture::Drag {
                start, grab, live, ..
            } => {
                live.x = start.x + (pointer_world.x - grab.x);
                live.y = start.y + (pointer_world.y - grab.y);
            }
            Gesture::Resize {
                handle,
                template,
                start,
                grab,
                live,
                ..
            } => {
                *live = resized(*start, *handle, *template, *grab, pointer_world);
            }
            Gesture::Rotate {
                start,
                start_angle,
                live,
                ..
            } => {
                let angle = pointer_angle(start.center(), pointer_world);
                *live = start.rotated_about_center(start.rotation + (angle - *start_angle));
            }
            Gesture::Pan {
                grab_screen,
                start_position,
                position,
            } => {
                position.x = start_position.x + (pointer_screen.x - grab_screen.x);
                position.y = start_position.y + (pointer_screen.y - grab_screen.y);
            }
            Gesture::Measure { to, .. } => *to = pointer_world,
        }
    }

    /// Uncommitted placement of `id`, if this gesture is transforming it.
    pub(super) fn live_placement(&self, id: &ElementId) -> Option<Placement> {
        match self {
            Gesture::Drag { id: target, live, .. }
            | Gesture::Resize { id: target, live, .. }
            | Gesture::Rotate { id: target, live, .. }
                if target == id =>
            {
                Some(*live)
            }
            _ => None,
        }
    }

    pub(super) fn pan_position(&self) -> Option<Point> {
        match self {
            Gesture::Pan { position, .. } => Some(*position),
            _ => None,
        }
    }

    pub(super) fn measure_line(&self) -> Option<(Point, Point)> {
        match self {
            Gesture::Measure { from, to } => Some((*from, *to)),
            _ => None,
        }
    }

    /// Commit the gesture. Element gestures issue at most one
    /// `update_element`; an unchanged result commits nothing.
    pub(super) fn finish(self, store: &mut LayoutStore) {
        let grid = *store.grid();
        match self {
            Gesture::Drag { id, start, live, .. } => {
                if live == start {
                    return;
                }
                let to = snap::resolve_move(live.x, live.y, &grid);
                if to.x == start.x && to.y == start.y {
                    return;
                }
                debug!(id = %id, x = to.x, y = to.y, "drag commit");
                store.update_element(&id, ElementPatch::position(to.x, to.y));
            }
            Gesture::Resize {
                id,
                template,
                start,
                live,
                ..
            } => {
                if live == start {
                    return;
                }
                let resolved = snap::resolve_transform(live, template, &grid);
                if resolved == start {
                    return;
                }
                debug!(id = %id, width = resolved.width, height = resolved.height, "resize commit");
                store.update_element(&id, resolved.to_patch());
            }
            Gesture::Rotate { id, start, live, .. } => {
                if live == start {
                    return;
                }
                let resolved = snap::resolve_rotation(start, live.rotation, &grid);
                if resolved == start {
                    return;
                }
                debug!(id = %id, rotation = resolved.rotation, "rotate commit");
                store.update_element(&id, resolved.to_patch());
            }
            Gesture::Pan { position, .. } => store.set_position(position),
            Gesture::Measure { .. } => {}
        }
    }
}

/// Placement after dragging `handle` from `grab` to `pointer`. The side
/// opposite the handle stays fixed; sizes never drop below the template
/// minimums.
fn resized(
    start: Placement,
    handle: Handle,
    template: &ElementTemplate,
    grab: Point,
    pointer: Point,
) -> Placement {
    let from = start.world_to_local(grab);
    let to = start.world_to_local(pointer);
    let (dx, dy) = (to.x - from.x, to.y - from.y);

    let (mut left, mut top, mut right, mut bottom) = (0.0, 0.0, start.width, start.height);
    if handle.moves_left() {
        left = (left + dx).min(right - template.min_width);
    }
    if handle.moves_right() {
        right = (right + dx).max(left + template.min_width);
    }
    if handle.moves_top() {
        top = (top + dy).min(bottom - template.min_height);
    }
    if handle.moves_bottom() {
        bottom = (bottom + dy).max(top + template.min_height);
    }

    let origin = start.local_to_world(Point::new(left, top));
    Placement {
        x: origin.x,
        y: origin.y,
        width: right - left,
        height: bottom - top,
        rotation: start.rotation,
    }
}
