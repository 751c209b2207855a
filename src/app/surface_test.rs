use super::*;
use crate::model::ElementType;

fn store_with_table() -> (LayoutStore, ElementId) {
    let mut store = LayoutStore::default();
    let id = store.add_element(ElementType::Table, Point::new(100.0, 100.0));
    (store, id)
}

// --- elements ---

#[test]
fn pick_finds_element_under_point() {
    let (store, id) = store_with_table();
    assert_eq!(pick(&store, Point::new(140.0, 140.0)), Pick::Element(id));
    assert_eq!(pick(&store, Point::new(500.0, 500.0)), Pick::Empty);
}

#[test]
fn topmost_element_wins() {
    let (mut store, _) = store_with_table();
    let upper = store.add_element(ElementType::Booth, Point::new(120.0, 120.0));
    store.clear_selection();
    assert_eq!(pick(&store, Point::new(150.0, 150.0)), Pick::Element(upper));
}

// --- handles ---

#[test]
fn selected_element_exposes_resize_handles() {
    let (store, id) = store_with_table();
    assert_eq!(pick(&store, Point::new(182.0, 182.0)), Pick::Handle(id.clone(), Handle::Se));
    assert_eq!(pick(&store, Point::new(140.0, 99.0)), Pick::Handle(id, Handle::N));
}

#[test]
fn rotate_handle_sits_above_top_center() {
    let (store, id) = store_with_table();
    assert_eq!(pick(&store, Point::new(140.0, 76.0)), Pick::Rotate(id));
}

#[test]
fn locked_element_has_no_handles() {
    let (mut store, id) = store_with_table();
    store.lock_element(&id);
    assert_eq!(pick(&store, Point::new(182.0, 182.0)), Pick::Empty);
    assert_eq!(pick(&store, Point::new(140.0, 76.0)), Pick::Empty);
    assert_eq!(pick(&store, Point::new(178.0, 178.0)), Pick::Element(id));
}

#[test]
fn multi_selection_has_no_handles() {
    let (mut store, first) = store_with_table();
    let second = store.add_element(ElementType::Table, Point::new(300.0, 300.0));
    store.set_selected_ids([first, second]);
    assert_eq!(pick(&store, Point::new(182.0, 182.0)), Pick::Empty);
}

#[test]
fn handles_follow_zoom() {
    let (mut store, id) = store_with_table();
    store.set_scale(2.0);
    assert_eq!(pick(&store, Point::new(360.0, 360.0)), Pick::Handle(id.clone(), Handle::Se));
    // Rotate handle keeps its pixel offset: world (140, 88) at 2x.
    assert_eq!(pick(&store, Point::new(280.0, 176.0)), Pick::Rotate(id));
}

#[test]
fn handle_points_track_rotation() {
    let (mut store, id) = store_with_table();
    store.update_element(
        &id,
        crate::model::ElementPatch {
            rotation: Some(90.0),
            ..Default::default()
        },
    );
    let placement = store.element(&id).unwrap().placement();
    let points = handle_points(&placement, store.viewport());
    let (handle, se) = points[7];
    assert_eq!(handle, Handle::Se);
    assert!((se.x - 20.0).abs() < 1e-9);
    assert!((se.y - 180.0).abs() < 1e-9);
}

// --- rulers ---

#[test]
fn ruler_bands_map_to_guide_orientation() {
    assert_eq!(ruler_hit(Point::new(100.0, 5.0)), Some(GuideOrientation::Vertical));
    assert_eq!(ruler_hit(Point::new(5.0, 100.0)), Some(GuideOrientation::Horizontal));
    assert_eq!(ruler_hit(Point::new(5.0, 5.0)), None);
    assert_eq!(ruler_hit(Point::new(100.0, 100.0)), None);
}
