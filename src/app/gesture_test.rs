use super::*;
use crate::model::ElementType;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn store_with_table(at: Point) -> (LayoutStore, ElementId) {
    let mut store = LayoutStore::default();
    let id = store.add_element(ElementType::Table, at);
    (store, id)
}

fn unsnapped(store: &mut LayoutStore) {
    if store.grid().snap {
        store.toggle_snap();
    }
}

// --- drag ---

#[test]
fn drag_commit_snaps_to_grid() {
    let (mut store, id) = store_with_table(Point::new(0.0, 0.0));
    assert!(store.grid().snap);
    assert_eq!(store.grid().size, 20.0);

    let mut g = Gesture::drag(&store, &id, Point::new(10.0, 10.0)).unwrap();
    g.update(Point::new(63.0, 57.0), Point::default());
    g.finish(&mut store);

    let table = store.element(&id).unwrap();
    assert_eq!((table.x, table.y), (60.0, 40.0));
}

#[test]
fn drag_without_snap_keeps_raw_position() {
    let (mut store, id) = store_with_table(Point::new(0.0, 0.0));
    unsnapped(&mut store);

    let mut g = Gesture::drag(&store, &id, Point::new(0.0, 0.0)).unwrap();
    g.update(Point::new(53.0, 47.0), Point::default());
    g.finish(&mut store);

    let table = store.element(&id).unwrap();
    assert_eq!((table.x, table.y), (53.0, 47.0));
}

#[test]
fn drag_updates_do_not_touch_store_until_finish() {
    let (mut store, id) = store_with_table(Point::new(0.0, 0.0));
    let depth = store.history().undo_depth();

    let mut g = Gesture::drag(&store, &id, Point::new(0.0, 0.0)).unwrap();
    for step in 1..=30 {
        g.update(Point::new(f64::from(step) * 3.0, 0.0), Point::default());
    }
    assert_eq!(store.element(&id).unwrap().x, 0.0);
    assert_eq!(g.live_placement(&id).unwrap().x, 90.0);

    g.finish(&mut store);
    assert_eq!(store.history().undo_depth(), depth + 1);
    assert_eq!(store.element(&id).unwrap().x, 100.0);
}

#[test]
fn drag_back_to_start_commits_nothing() {
    let (mut store, id) = store_with_table(Point::new(40.0, 40.0));
    let depth = store.history().undo_depth();

    let mut g = Gesture::drag(&store, &id, Point::new(50.0, 50.0)).unwrap();
    g.update(Point::new(52.0, 49.0), Point::default());
    g.finish(&mut store);

    assert_eq!(store.history().undo_depth(), depth);
}

#[test]
fn locked_elements_do_not_start_transforms() {
    let (mut store, id) = store_with_table(Point::new(0.0, 0.0));
    store.lock_element(&id);
    let p = Point::new(10.0, 10.0);
    assert!(Gesture::drag(&store, &id, p).is_none());
    assert!(Gesture::resize(&store, &id, Handle::Se, p).is_none());
    assert!(Gesture::rotate(&store, &id, p).is_none());
}

#[test]
fn missing_element_does_not_start_a_gesture() {
    let store = LayoutStore::default();
    assert!(Gesture::drag(&store, &ElementId::from("ghost"), Point::default()).is_none());
}

// --- resize ---

#[test]
fn resize_se_grows_and_snaps_on_commit() {
    let (mut store, id) = store_with_table(Point::new(0.0, 0.0));
    let mut g = Gesture::resize(&store, &id, Handle::Se, Point::new(80.0, 80.0)).unwrap();
    g.update(Point::new(113.0, 97.0), Point::default());

    let live = g.live_placement(&id).unwrap();
    assert_eq!((live.width, live.height), (113.0, 97.0));

    g.finish(&mut store);
    let table = store.element(&id).unwrap();
    assert_eq!((table.width, table.height), (120.0, 100.0));
    assert_eq!((table.x, table.y), (0.0, 0.0));
}

#[test]
fn resize_west_keeps_right_edge() {
    let (mut store, id) = store_with_table(Point::new(100.0, 100.0));
    unsnapped(&mut store);

    let mut g = Gesture::resize(&store, &id, Handle::W, Point::new(100.0, 140.0)).unwrap();
    g.update(Point::new(70.0, 140.0), Point::default());
    g.finish(&mut store);

    let table = store.element(&id).unwrap();
    assert_eq!(table.x, 70.0);
    assert_eq!(table.width, 110.0);
    assert_eq!(table.x + table.width, 180.0);
    assert_eq!(table.height, 80.0);
}

#[test]
fn resize_clamps_to_template_minimum_against_anchor() {
    let (mut store, id) = store_with_table(Point::new(0.0, 0.0));
    unsnapped(&mut store);

    let mut g = Gesture::resize(&store, &id, Handle::Nw, Point::new(0.0, 0.0)).unwrap();
    g.update(Point::new(500.0, 500.0), Point::default());
    g.finish(&mut store);

    let table = store.element(&id).unwrap();
    assert_eq!((table.width, table.height), (40.0, 40.0));
    assert_eq!((table.x, table.y), (40.0, 40.0));
}

#[test]
fn resize_of_rotated_element_works_in_local_frame() {
    let (mut store, id) = store_with_table(Point::new(0.0, 0.0));
    unsnapped(&mut store);
    store.update_element(
        &id,
        ElementPatch {
            rotation: Some(90.0),
            ..Default::default()
        },
    );

    // Local +x points down the screen after a quarter turn.
    let mut g = Gesture::resize(&store, &id, Handle::E, Point::new(0.0, 80.0)).unwrap();
    g.update(Point::new(0.0, 100.0), Point::default());
    g.finish(&mut store);

    let table = store.element(&id).unwrap();
    assert!(approx_eq(table.width, 100.0));
    assert!(approx_eq(table.height, 80.0));
}

// --- rotate ---

#[test]
fn rotate_snaps_to_step_about_center() {
    let (mut store, id) = store_with_table(Point::new(0.0, 0.0));
    let center = store.element(&id).unwrap().placement().center();

    // Grab to the right of center, release below-right at ~37 degrees.
    let mut g = Gesture::rotate(&store, &id, Point::new(center.x + 100.0, center.y)).unwrap();
    let angle = 37.0_f64.to_radians();
    g.update(
        Point::new(center.x + 100.0 * angle.cos(), center.y + 100.0 * angle.sin()),
        Point::default(),
    );
    g.finish(&mut store);

    let table = store.element(&id).unwrap();
    assert!(approx_eq(table.rotation, 30.0));
    let after = table.placement().center();
    assert!(approx_eq(after.x, center.x));
    assert!(approx_eq(after.y, center.y));
}

#[test]
fn rotate_without_snap_is_free() {
    let (mut store, id) = store_with_table(Point::new(0.0, 0.0));
    unsnapped(&mut store);
    let center = store.element(&id).unwrap().placement().center();

    let mut g = Gesture::rotate(&store, &id, Point::new(center.x + 50.0, center.y)).unwrap();
    g.update(Point::new(center.x, center.y - 50.0), Point::default());
    g.finish(&mut store);

    assert!(approx_eq(store.element(&id).unwrap().rotation, 270.0));
}

// --- pan / measure ---

#[test]
fn pan_moves_viewport_without_history() {
    let (mut store, _) = store_with_table(Point::new(0.0, 0.0));
    let depth = store.history().undo_depth();

    let mut g = Gesture::pan(&store, Point::new(100.0, 100.0));
    g.update(Point::default(), Point::new(130.0, 80.0));
    assert_eq!(g.pan_position(), Some(Point::new(30.0, -20.0)));
    g.finish(&mut store);

    assert_eq!(store.viewport().position, Point::new(30.0, -20.0));
    assert_eq!(store.history().undo_depth(), depth);
}

#[test]
fn measure_reports_line_and_commits_nothing() {
    let (mut store, _) = store_with_table(Point::new(0.0, 0.0));
    let before = store.elements().to_vec();

    let mut g = Gesture::measure(Point::new(0.0, 0.0));
    g.update(Point::new(30.0, 40.0), Point::default());
    assert_eq!(g.measure_line(), Some((Point::new(0.0, 0.0), Point::new(30.0, 40.0))));
    g.finish(&mut store);

    assert_eq!(store.elements(), before.as_slice());
}

#[test]
fn live_placement_only_for_target() {
    let (store, id) = store_with_table(Point::new(0.0, 0.0));
    let g = Gesture::drag(&store, &id, Point::default()).unwrap();
    assert!(g.live_placement(&id).is_some());
    assert!(g.live_placement(&ElementId::from("other")).is_none());
}

#[test]
fn handle_positions_cover_frame() {
    assert_eq!(Handle::Nw.local_position(80.0, 40.0), Point::new(0.0, 0.0));
    assert_eq!(Handle::S.local_position(80.0, 40.0), Point::new(40.0, 40.0));
    assert_eq!(Handle::E.local_position(80.0, 40.0), Point::new(80.0, 20.0));
}
