use super::*;

// --- line_positions ---

#[test]
fn line_positions_cover_visible_range() {
    let xs: Vec<f64> = line_positions(-15.0, 45.0, 20.0).collect();
    assert_eq!(xs, [-20.0, 0.0, 20.0, 40.0]);
}

#[test]
fn line_positions_far_from_origin_terminate() {
    let xs: Vec<f64> = line_positions(-1e18, -1e18 + 800.0, 20.0).collect();
    assert!(!xs.is_empty());
    assert!(xs.len() <= MAX_LINES);
    assert!(xs.iter().all(|x| x.is_finite()));
}

#[test]
fn line_positions_are_capped() {
    assert_eq!(line_positions(0.0, 1e12, 1.0).count(), MAX_LINES);
}

#[test]
fn line_positions_empty_for_degenerate_input() {
    assert_eq!(line_positions(50.0, 0.0, 20.0).count(), 0);
    assert_eq!(line_positions(f64::NAN, 10.0, 20.0).count(), 0);
    assert_eq!(line_positions(0.0, f64::INFINITY, 20.0).count(), 0);
}

// --- grid drawing ---

#[test]
fn grid_draw_finishes_with_far_off_viewport() {
    let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 600.0));
    let viewport = ViewportState {
        scale: 1.0,
        position: Point::new(-1e18, 0.0),
        rotation: 0.0,
    };
    let ctx = egui::Context::default();
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        let painter = egui::Painter::new(ctx.clone(), egui::LayerId::background(), rect);
        draw_background(&painter, rect, &GridConfig::default(), &viewport);
        draw_rulers(&painter, rect, &viewport);
    });
}
