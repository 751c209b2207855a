use super::*;

fn zoomed() -> ViewportState {
    ViewportState {
        scale: 2.0,
        position: Point::new(10.0, 20.0),
        rotation: 0.0,
    }
}

#[test]
fn world_and_pos_round_trip() {
    let origin = egui::pos2(100.0, 50.0);
    let viewport = zoomed();
    let pos = world_to_pos(origin, &viewport, Point::new(5.0, 5.0));
    assert_eq!(pos, egui::pos2(120.0, 80.0));
    assert_eq!(pos_to_world(origin, &viewport, pos), Point::new(5.0, 5.0));
}

#[test]
fn canvas_point_is_relative_to_origin() {
    let p = canvas_point(egui::pos2(100.0, 50.0), egui::pos2(130.0, 45.0));
    assert_eq!(p, Point::new(30.0, -5.0));
}

#[test]
fn wheel_steps_follow_scroll_sign() {
    assert_eq!(wheel_steps(12.0), 1.0);
    assert_eq!(wheel_steps(-0.5), -1.0);
    assert_eq!(wheel_steps(0.0), 0.0);
}

#[test]
fn pinch_steps_match_zoom_factor() {
    assert!((pinch_steps(1.1) - 1.0).abs() < 1e-6);
    assert!((pinch_steps(1.0 / 1.1) + 1.0).abs() < 1e-6);
    assert_eq!(pinch_steps(1.0), 0.0);
    assert_eq!(pinch_steps(0.0), 0.0);
}

#[test]
fn visible_center_accounts_for_pan_and_zoom() {
    let c = visible_center(&zoomed(), egui::vec2(200.0, 100.0));
    assert_eq!(c, Point::new(45.0, 15.0));
}

#[test]
fn screen_len_scales() {
    assert_eq!(screen_len(&zoomed(), 20.0), 40.0);
}
