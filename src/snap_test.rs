use super::*;
use crate::catalog;
use crate::model::ElementType;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn snapping_grid() -> GridConfig {
    GridConfig {
        size: 20.0,
        snap: true,
        ..GridConfig::default()
    }
}

fn free_grid() -> GridConfig {
    GridConfig {
        snap: false,
        ..GridConfig::default()
    }
}

// --- snap_value ---

#[test]
fn snap_value_rounds_to_nearest_multiple() {
    assert_eq!(snap_value(53.0, 20.0), 60.0);
    assert_eq!(snap_value(47.0, 20.0), 40.0);
    assert_eq!(snap_value(50.0, 20.0), 60.0);
    assert_eq!(snap_value(-9.0, 20.0), 0.0);
    assert_eq!(snap_value(-11.0, 20.0), -20.0);
}

#[test]
fn snap_value_is_idempotent() {
    for v in [-73.5, -0.2, 0.0, 13.0, 99.9, 1234.5] {
        let once = snap_value(v, 20.0);
        assert_eq!(snap_value(once, 20.0), once);
    }
}

#[test]
fn snap_value_never_returns_negative_zero() {
    let snapped = snap_value(-4.0, 20.0);
    assert!(snapped.is_sign_positive());
}

#[test]
fn snap_value_ignores_degenerate_grid() {
    assert_eq!(snap_value(13.0, 0.0), 13.0);
    assert_eq!(snap_value(13.0, -5.0), 13.0);
    assert_eq!(snap_value(13.0, f64::NAN), 13.0);
}

// --- rotation ---

#[test]
fn normalize_rotation_wraps_into_range() {
    assert_eq!(normalize_rotation(0.0), 0.0);
    assert_eq!(normalize_rotation(360.0), 0.0);
    assert_eq!(normalize_rotation(370.0), 10.0);
    assert_eq!(normalize_rotation(-90.0), 270.0);
    assert_eq!(normalize_rotation(720.0), 0.0);
    assert_eq!(normalize_rotation(f64::INFINITY), 0.0);
}

#[test]
fn snap_rotation_uses_fixed_step() {
    assert_eq!(snap_rotation(7.0), 0.0);
    assert_eq!(snap_rotation(8.0), 15.0);
    assert_eq!(snap_rotation(44.0), 45.0);
    assert_eq!(snap_rotation(355.0), 0.0);
    assert_eq!(snap_rotation(-20.0), 345.0);
}

// --- Placement ---

#[test]
fn unrotated_placement_contains_its_rect() {
    let p = Placement {
        x: 10.0,
        y: 20.0,
        width: 80.0,
        height: 40.0,
        rotation: 0.0,
    };
    assert!(p.contains(Point::new(10.0, 20.0)));
    assert!(p.contains(Point::new(50.0, 40.0)));
    assert!(p.contains(Point::new(90.0, 60.0)));
    assert!(!p.contains(Point::new(91.0, 40.0)));
    assert!(!p.contains(Point::new(50.0, 19.0)));
}

#[test]
fn rotated_placement_turns_clockwise_about_origin() {
    let p = Placement {
        x: 0.0,
        y: 0.0,
        width: 100.0,
        height: 20.0,
        rotation: 90.0,
    };
    // Local +x maps to world +y under a clockwise quarter turn (y down).
    assert!(point_approx_eq(p.local_to_world(Point::new(100.0, 0.0)), Point::new(0.0, 100.0)));
    assert!(p.contains(Point::new(-10.0, 50.0)));
    assert!(!p.contains(Point::new(50.0, 10.0)));
}

#[test]
fn world_to_local_inverts_local_to_world() {
    let p = Placement {
        x: 30.0,
        y: -12.0,
        width: 60.0,
        height: 40.0,
        rotation: 33.0,
    };
    let local = Point::new(17.0, 29.0);
    let back = p.world_to_local(p.local_to_world(local));
    assert!(point_approx_eq(back, local));
}

#[test]
fn corners_of_unrotated_placement() {
    let p = Placement {
        x: 0.0,
        y: 0.0,
        width: 10.0,
        height: 5.0,
        rotation: 0.0,
    };
    let c = p.corners();
    assert!(point_approx_eq(c[0], Point::new(0.0, 0.0)));
    assert!(point_approx_eq(c[1], Point::new(10.0, 0.0)));
    assert!(point_approx_eq(c[2], Point::new(10.0, 5.0)));
    assert!(point_approx_eq(c[3], Point::new(0.0, 5.0)));
}

#[test]
fn rotated_about_center_keeps_center() {
    let p = Placement {
        x: 100.0,
        y: 100.0,
        width: 80.0,
        height: 40.0,
        rotation: 0.0,
    };
    let turned = p.rotated_about_center(90.0);
    assert!(point_approx_eq(turned.center(), p.center()));
    assert_eq!(turned.rotation, 90.0);
    assert_eq!(turned.width, 80.0);
}

#[test]
fn to_patch_carries_every_geometric_field() {
    let p = Placement {
        x: 1.0,
        y: 2.0,
        width: 3.0,
        height: 4.0,
        rotation: 5.0,
    };
    let patch = p.to_patch();
    assert_eq!(patch.x, Some(1.0));
    assert_eq!(patch.y, Some(2.0));
    assert_eq!(patch.width, Some(3.0));
    assert_eq!(patch.height, Some(4.0));
    assert_eq!(patch.rotation, Some(5.0));
    assert!(patch.name.is_none());
}

// --- resolve_* ---

#[test]
fn resolve_move_snaps_drop_position() {
    let p = resolve_move(53.0, 47.0, &snapping_grid());
    assert_eq!(p, Point::new(60.0, 40.0));
}

#[test]
fn resolve_move_passes_through_without_snap() {
    let p = resolve_move(53.0, 47.0, &free_grid());
    assert_eq!(p, Point::new(53.0, 47.0));
}

#[test]
fn resolve_transform_quantizes_all_fields_together() {
    let template = catalog::lookup(ElementType::Table);
    let proposed = Placement {
        x: 11.0,
        y: 29.0,
        width: 93.0,
        height: 107.0,
        rotation: 22.0,
    };
    let out = resolve_transform(proposed, template, &snapping_grid());
    assert_eq!(out.x, 20.0);
    assert_eq!(out.y, 20.0);
    assert_eq!(out.width, 100.0);
    assert_eq!(out.height, 100.0);
    assert_eq!(out.rotation, 15.0);
}

#[test]
fn resolve_transform_clamps_to_template_minimums() {
    let template = catalog::lookup(ElementType::Bar);
    let proposed = Placement {
        x: 0.0,
        y: 0.0,
        width: 12.0,
        height: 3.0,
        rotation: 0.0,
    };
    let out = resolve_transform(proposed, template, &free_grid());
    assert_eq!(out.width, template.min_width);
    assert_eq!(out.height, template.min_height);
}

#[test]
fn resolve_transform_wraps_rotation_without_snap() {
    let template = catalog::lookup(ElementType::Stage);
    let proposed = Placement {
        x: 0.0,
        y: 0.0,
        width: 200.0,
        height: 150.0,
        rotation: -30.0,
    };
    let out = resolve_transform(proposed, template, &free_grid());
    assert_eq!(out.rotation, 330.0);
}

#[test]
fn resolve_rotation_snaps_and_keeps_center() {
    let start = Placement {
        x: 100.0,
        y: 100.0,
        width: 80.0,
        height: 80.0,
        rotation: 0.0,
    };
    let out = resolve_rotation(start, 37.0, &snapping_grid());
    assert_eq!(out.rotation, 30.0);
    assert!(point_approx_eq(out.center(), start.center()));
}

#[test]
fn resolve_rotation_without_snap_only_wraps() {
    let start = Placement {
        x: 0.0,
        y: 0.0,
        width: 40.0,
        height: 40.0,
        rotation: 0.0,
    };
    let out = resolve_rotation(start, 397.0, &free_grid());
    assert!(approx_eq(out.rotation, 37.0));
}
