use super::*;

#[test]
fn every_type_has_a_matching_template() {
    for t in ElementType::ALL {
        assert_eq!(lookup(t).element_type, t);
    }
}

#[test]
fn table_defaults() {
    let table = lookup(ElementType::Table);
    assert_eq!(table.name, "Table");
    assert_eq!((table.default_width, table.default_height), (80.0, 80.0));
    assert_eq!((table.min_width, table.min_height), (40.0, 40.0));
    assert_eq!(table.default_capacity, Some(4));
    assert!(table.allow_resize);
    assert!(table.allow_rotate);
}

#[test]
fn booth_seats_six() {
    assert_eq!(lookup(ElementType::Booth).default_capacity, Some(6));
}

#[test]
fn only_seating_types_carry_capacity() {
    for template in templates() {
        assert_eq!(
            template.default_capacity.is_some(),
            template.element_type.is_seating(),
            "{}",
            template.name
        );
    }
}

#[test]
fn defaults_respect_minimums() {
    for template in templates() {
        assert!(template.default_width >= template.min_width, "{}", template.name);
        assert!(template.default_height >= template.min_height, "{}", template.name);
        assert!(template.min_width > 0.0 && template.min_height > 0.0);
    }
}

#[test]
fn templates_follow_palette_order() {
    let order: Vec<ElementType> = templates().map(|t| t.element_type).collect();
    assert_eq!(order, ElementType::ALL);
}

#[test]
fn default_style_is_translucent_tint() {
    let style = lookup(ElementType::Table).default_style();
    assert_eq!(style.fill.color(), Some(Color::rgba(147, 51, 234, 51)));
    assert_eq!(style.stroke.color(), Some(Color::rgba(147, 51, 234, 128)));
    assert_eq!(style.fill.as_str(), "rgba(147, 51, 234, 0.2)");
    assert_eq!(style.stroke.as_str(), "rgba(147, 51, 234, 0.5)");
    assert!(style.opacity.is_none());
}
