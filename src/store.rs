//! Layout store: the single owner of editor state.
//!
//! Every element mutation goes through here and lands in the history as one
//! entry. Selection, hover, grid, viewport, guides and the active tool are
//! view state and are never historied. All operations are total: unknown
//! ids are logged and ignored.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::catalog;
use crate::history::{self, History};
use crate::model::{
    ElementId, ElementKind, ElementPatch, ElementType, GridConfig, GuideOrientation,
    LayoutElement, LayoutGuide, MAX_SCALE, MIN_SCALE, Point, Tool, ViewportState,
};
use crate::snap::normalize_rotation;

pub const DUPLICATE_OFFSET: f64 = 20.0;

pub const ZOOM_STEP: f64 = 1.1;

#[derive(Debug, Clone)]
pub struct LayoutStore {
    history: History<Vec<LayoutElement>>,
    selected_ids: Vec<ElementId>,
    hovered_id: Option<ElementId>,
    grid: GridConfig,
    initial_grid: GridConfig,
    viewport: ViewportState,
    guides: Vec<LayoutGuide>,
    next_guide_id: u64,
    active_tool: Tool,
}

impl Default for LayoutStore {
    fn default() -> Self {
        Self::new(GridConfig::default(), history::DEFAULT_LIMIT)
    }
}

impl LayoutStore {
    /// Empty store. `clear_layout` returns to this state.
    pub fn new(grid: GridConfig, history_limit: usize) -> Self {
        let grid = sanitize_grid(grid, GridConfig::default());
        Self {
            history: History::new(Vec::new(), history_limit),
            selected_ids: Vec::new(),
            hovered_id: None,
            grid,
            initial_grid: grid,
            viewport: ViewportState::default(),
            guides: Vec::new(),
            next_guide_id: 1,
            active_tool: Tool::Select,
        }
    }

    // --- queries ---

    pub fn elements(&self) -> &[LayoutElement] {
        self.history.present()
    }

    pub fn element(&self, id: &ElementId) -> Option<&LayoutElement> {
        self.elements().iter().find(|e| &e.id == id)
    }

    pub fn selected_ids(&self) -> &[ElementId] {
        &self.selected_ids
    }

    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.selected_ids.contains(id)
    }

    /// The selected element, only when exactly one is selected.
    pub fn selected_element(&self) -> Option<&LayoutElement> {
        match self.selected_ids.as_slice() {
            [only] => self.element(only),
            _ => None,
        }
    }

    pub fn hovered_id(&self) -> Option<&ElementId> {
        self.hovered_id.as_ref()
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn active_tool(&self) -> Tool {
        self.active_tool
    }

    pub fn guides(&self) -> &[LayoutGuide] {
        &self.guides
    }

    pub fn history(&self) -> &History<Vec<LayoutElement>> {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- element mutations ---

    /// Place a new `element_type` with its frame origin at `position`.
    /// The new element becomes the only selection.
    pub fn add_element(&mut self, element_type: ElementType, position: Point) -> ElementId {
        let template = catalog::lookup(element_type);
        let mut elements = self.elements().to_vec();
        let id = fresh_id(&elements);
        let element = LayoutElement {
            id: id.clone(),
            kind: ElementKind::for_type(element_type),
            name: format!("{} {}", template.name, elements.len() + 1),
            x: position.x,
            y: position.y,
            width: template.default_width,
            height: template.default_height,
            rotation: 0.0,
            capacity: template.default_capacity,
            is_locked: false,
            style: Some(template.default_style()),
            extra_props: Default::default(),
            extra_fields: Default::default(),
        };
        debug!(id = %id, ?element_type, x = position.x, y = position.y, "add element");
        elements.push(element);
        self.history.record(elements);
        self.selected_ids = vec![id.clone()];
        id
    }

    /// Merge `patch` into element `id`, then enforce the element invariants.
    pub fn update_element(&mut self, id: &ElementId, patch: ElementPatch) {
        let mut elements = self.elements().to_vec();
        let Some(element) = elements.iter_mut().find(|e| &e.id == id) else {
            warn!(id = %id, "update for unknown element ignored");
            return;
        };
        apply_patch(element, patch);
        debug!(id = %id, "update element");
        self.history.record(elements);
    }

    pub fn delete_element(&mut self, id: &ElementId) {
        let mut elements = self.elements().to_vec();
        let before = elements.len();
        elements.retain(|e| &e.id != id);
        if elements.len() == before {
            warn!(id = %id, "delete for unknown element ignored");
            return;
        }
        debug!(id = %id, "delete element");
        self.history.record(elements);
        self.forget(id);
    }

    /// Copy element `id` with a fresh id and offset position. The copy
    /// becomes the only selection.
    pub fn duplicate_element(&mut self, id: &ElementId) -> Option<ElementId> {
        let mut elements = self.elements().to_vec();
        let Some(copy) = duplicate_of(&elements, id) else {
            warn!(id = %id, "duplicate of unknown element ignored");
            return None;
        };
        let copy_id = copy.id.clone();
        debug!(source = %id, copy = %copy_id, "duplicate element");
        elements.push(copy);
        self.history.record(elements);
        self.selected_ids = vec![copy_id.clone()];
        Some(copy_id)
    }

    /// Duplicate every selected element as one history entry and select
    /// the copies.
    pub fn duplicate_selection(&mut self) -> Vec<ElementId> {
        let mut elements = self.elements().to_vec();
        let mut copies = Vec::new();
        for id in &self.selected_ids {
            if let Some(copy) = duplicate_of(&elements, id) {
                copies.push(copy.id.clone());
                elements.push(copy);
            }
        }
        if copies.is_empty() {
            return copies;
        }
        debug!(count = copies.len(), "duplicate selection");
        self.history.record(elements);
        self.selected_ids = copies.clone();
        copies
    }

    /// Delete every selected element as one history entry.
    pub fn delete_selection(&mut self) {
        if self.selected_ids.is_empty() {
            return;
        }
        let mut elements = self.elements().to_vec();
        let before = elements.len();
        elements.retain(|e| !self.selected_ids.contains(&e.id));
        if elements.len() != before {
            debug!(count = before - elements.len(), "delete selection");
            self.history.record(elements);
        }
        if self
            .hovered_id
            .as_ref()
            .is_some_and(|h| self.selected_ids.contains(h))
        {
            self.hovered_id = None;
        }
        self.selected_ids.clear();
    }

    pub fn lock_element(&mut self, id: &ElementId) {
        self.set_locked(id, true);
    }

    pub fn unlock_element(&mut self, id: &ElementId) {
        self.set_locked(id, false);
    }

    fn set_locked(&mut self, id: &ElementId, locked: bool) {
        let mut elements = self.elements().to_vec();
        let Some(element) = elements.iter_mut().find(|e| &e.id == id) else {
            warn!(id = %id, locked, "lock change for unknown element ignored");
            return;
        };
        element.is_locked = locked;
        debug!(id = %id, locked, "set locked");
        self.history.record(elements);
    }

    /// Replace the whole element list and start a fresh history. Later
    /// elements that repeat an earlier id get a fresh one.
    pub fn load_layout(&mut self, mut elements: Vec<LayoutElement>) {
        let mut seen = HashSet::new();
        for i in 0..elements.len() {
            if seen.insert(elements[i].id.clone()) {
                continue;
            }
            let id = fresh_id(&elements);
            warn!(from = %elements[i].id, to = %id, "duplicate id in loaded layout replaced");
            seen.insert(id.clone());
            elements[i].id = id;
        }
        debug!(count = elements.len(), "load layout");
        self.history.reset(elements);
        self.selected_ids.clear();
        self.hovered_id = None;
    }

    pub fn clear_layout(&mut self) {
        debug!("clear layout");
        self.history.reset(Vec::new());
        self.selected_ids.clear();
        self.hovered_id = None;
        self.grid = self.initial_grid;
        self.viewport = ViewportState::default();
        self.guides.clear();
        self.next_guide_id = 1;
        self.active_tool = Tool::Select;
    }

    pub fn undo(&mut self) {
        if self.history.undo() {
            debug!("undo");
            self.purge_dangling();
        }
    }

    pub fn redo(&mut self) {
        if self.history.redo() {
            debug!("redo");
            self.purge_dangling();
        }
    }

    // --- selection ---

    /// Replace the selection. Unknown ids are dropped, duplicates collapsed.
    pub fn set_selected_ids(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        let mut selected: Vec<ElementId> = Vec::new();
        for id in ids {
            if self.element(&id).is_none() {
                warn!(id = %id, "selection of unknown element ignored");
                continue;
            }
            if !selected.contains(&id) {
                selected.push(id);
            }
        }
        self.selected_ids = selected;
    }

    pub fn select_only(&mut self, id: &ElementId) {
        self.set_selected_ids([id.clone()]);
    }

    pub fn extend_selection(&mut self, id: &ElementId) {
        if self.element(id).is_none() || self.selected_ids.contains(id) {
            return;
        }
        self.selected_ids.push(id.clone());
    }

    pub fn clear_selection(&mut self) {
        self.selected_ids.clear();
    }

    pub fn set_hovered(&mut self, id: Option<ElementId>) {
        self.hovered_id = id.filter(|id| self.element(id).is_some());
    }

    // --- grid ---

    pub fn toggle_grid(&mut self) {
        self.grid.enabled = !self.grid.enabled;
        debug!(enabled = self.grid.enabled, "toggle grid");
    }

    pub fn toggle_snap(&mut self) {
        self.grid.snap = !self.grid.snap;
        debug!(snap = self.grid.snap, "toggle snap");
    }

    pub fn set_grid_size(&mut self, size: f64) {
        if !size.is_finite() || size <= 0.0 {
            warn!(size, "invalid grid size ignored");
            return;
        }
        self.grid.size = size;
    }

    pub fn set_subdivisions(&mut self, subdivisions: u32) {
        self.grid.subdivisions = subdivisions.max(1);
    }

    /// Replace the grid configuration wholesale, keeping the current size if
    /// the new one is unusable.
    pub fn set_grid(&mut self, grid: GridConfig) {
        self.grid = sanitize_grid(grid, self.grid);
    }

    // --- viewport ---

    pub fn set_scale(&mut self, scale: f64) {
        if !scale.is_finite() {
            warn!(scale, "invalid viewport scale ignored");
            return;
        }
        self.viewport.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
    }

    pub fn set_position(&mut self, position: Point) {
        if !position.x.is_finite() || !position.y.is_finite() {
            warn!(x = position.x, y = position.y, "invalid viewport position ignored");
            return;
        }
        self.viewport.position = position;
    }

    pub fn pan_by(&mut self, delta: Point) {
        let p = self.viewport.position;
        self.set_position(Point::new(p.x + delta.x, p.y + delta.y));
    }

    /// Zoom by `ZOOM_STEP^steps`, keeping the world point under
    /// `anchor_screen` where it is.
    pub fn zoom_by(&mut self, steps: f64, anchor_screen: Point) {
        let before = self.viewport.screen_to_world(anchor_screen);
        self.set_scale(self.viewport.scale * ZOOM_STEP.powf(steps));
        let scale = self.viewport.scale;
        self.set_position(Point::new(
            anchor_screen.x - before.x * scale,
            anchor_screen.y - before.y * scale,
        ));
    }

    pub fn reset_view(&mut self) {
        self.viewport = ViewportState::default();
    }

    pub fn set_viewport(&mut self, viewport: ViewportState) {
        self.reset_view();
        self.set_scale(viewport.scale);
        self.set_position(viewport.position);
        self.viewport.rotation = normalize_rotation(viewport.rotation);
    }

    // --- tools and guides ---

    pub fn set_active_tool(&mut self, tool: Tool) {
        self.active_tool = tool;
    }

    pub fn add_guide(&mut self, orientation: GuideOrientation, position: f64) -> u64 {
        let id = self.next_guide_id;
        self.next_guide_id += 1;
        self.guides.push(LayoutGuide {
            id,
            orientation,
            position,
            color: None,
        });
        id
    }

    pub fn remove_guide(&mut self, id: u64) {
        self.guides.retain(|g| g.id != id);
    }

    pub fn clear_guides(&mut self) {
        self.guides.clear();
    }

    // --- internals ---

    fn forget(&mut self, id: &ElementId) {
        self.selected_ids.retain(|s| s != id);
        if self.hovered_id.as_ref() == Some(id) {
            self.hovered_id = None;
        }
    }

    fn purge_dangling(&mut self) {
        let elements = self.history.present();
        self.selected_ids
            .retain(|id| elements.iter().any(|e| &e.id == id));
        if self
            .hovered_id
            .as_ref()
            .is_some_and(|h| !elements.iter().any(|e| &e.id == h))
        {
            self.hovered_id = None;
        }
    }
}

fn fresh_id(elements: &[LayoutElement]) -> ElementId {
    loop {
        let id = ElementId::generate();
        if !elements.iter().any(|e| e.id == id) {
            return id;
        }
    }
}

fn duplicate_of(elements: &[LayoutElement], id: &ElementId) -> Option<LayoutElement> {
    let source = elements.iter().find(|e| &e.id == id)?;
    let mut copy = source.clone();
    copy.id = fresh_id(elements);
    copy.name = format!("{} (Copy)", source.name);
    copy.x += DUPLICATE_OFFSET;
    copy.y += DUPLICATE_OFFSET;
    Some(copy)
}

fn sanitize_grid(mut grid: GridConfig, fallback: GridConfig) -> GridConfig {
    if !grid.size.is_finite() || grid.size <= 0.0 {
        warn!(size = grid.size, "invalid grid size replaced");
        grid.size = fallback.size;
    }
    grid.subdivisions = grid.subdivisions.max(1);
    grid
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn apply_patch(element: &mut LayoutElement, patch: ElementPatch) {
    let template = catalog::lookup(element.element_type());
    if let Some(name) = patch.name {
        element.name = name;
    }
    if let Some(x) = finite(patch.x) {
        element.x = x;
    }
    if let Some(y) = finite(patch.y) {
        element.y = y;
    }
    if let Some(width) = finite(patch.width) {
        element.width = width;
    }
    if let Some(height) = finite(patch.height) {
        element.height = height;
    }
    if let Some(rotation) = patch.rotation {
        element.rotation = rotation;
    }
    if let Some(capacity) = patch.capacity {
        element.capacity = Some(capacity);
    }
    if let Some(locked) = patch.is_locked {
        element.is_locked = locked;
    }
    if let Some(style) = patch.style {
        element.style = Some(style);
    }
    if let Some(kind) = patch.kind {
        if kind.element_type() == element.element_type() {
            element.kind = kind;
        } else {
            warn!(
                id = %element.id,
                from = ?element.element_type(),
                to = ?kind.element_type(),
                "element type change ignored"
            );
        }
    }

    element.width = element.width.max(template.min_width);
    element.height = element.height.max(template.min_height);
    element.rotation = normalize_rotation(element.rotation);
    element.capacity = if element.element_type().is_seating() {
        element.capacity.map(|c| c.max(1))
    } else {
        None
    };
}
