//! Element catalog: the immutable per-type defaults and capability flags.
//!
//! `lookup` is total over [`ElementType`]; every type has exactly one
//! template, so there is no "unknown type" path at runtime.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use crate::model::{Color, ElementStyle, ElementType};

/// Default look of an element type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TemplateStyle {
    pub fill: Color,
    pub stroke: Color,
}

/// Type-level defaults for newly placed elements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementTemplate {
    pub element_type: ElementType,
    pub name: &'static str,
    pub icon: &'static str,
    pub default_width: f64,
    pub default_height: f64,
    pub min_width: f64,
    pub min_height: f64,
    pub default_capacity: Option<u32>,
    pub allow_resize: bool,
    pub allow_rotate: bool,
    pub style: TemplateStyle,
}

impl ElementTemplate {
    /// The template style as an element-level style override.
    pub fn default_style(&self) -> ElementStyle {
        ElementStyle {
            fill: self.style.fill.into(),
            stroke: self.style.stroke.into(),
            opacity: None,
        }
    }
}

// Fills are the accent color at 20% alpha, strokes at 50%.
const fn tinted(r: u8, g: u8, b: u8) -> TemplateStyle {
    TemplateStyle {
        fill: Color::rgba(r, g, b, 51),
        stroke: Color::rgba(r, g, b, 128),
    }
}

static TABLE: ElementTemplate = ElementTemplate {
    element_type: ElementType::Table,
    name: "Table",
    icon: "🪑",
    default_width: 80.0,
    default_height: 80.0,
    min_width: 40.0,
    min_height: 40.0,
    default_capacity: Some(4),
    allow_resize: true,
    allow_rotate: true,
    style: tinted(147, 51, 234),
};

static BOOTH: ElementTemplate = ElementTemplate {
    element_type: ElementType::Booth,
    name: "Booth",
    icon: "🛋",
    default_width: 120.0,
    default_height: 100.0,
    min_width: 60.0,
    min_height: 60.0,
    default_capacity: Some(6),
    allow_resize: true,
    allow_rotate: true,
    style: tinted(59, 130, 246),
};

static BAR: ElementTemplate = ElementTemplate {
    element_type: ElementType::Bar,
    name: "Bar",
    icon: "🍸",
    default_width: 200.0,
    default_height: 60.0,
    min_width: 100.0,
    min_height: 40.0,
    default_capacity: None,
    allow_resize: true,
    allow_rotate: true,
    style: tinted(234, 179, 8),
};

static STAGE: ElementTemplate = ElementTemplate {
    element_type: ElementType::Stage,
    name: "Stage",
    icon: "🎭",
    default_width: 200.0,
    default_height: 150.0,
    min_width: 100.0,
    min_height: 100.0,
    default_capacity: None,
    allow_resize: true,
    allow_rotate: true,
    style: tinted(236, 72, 153),
};

static DANCE_FLOOR: ElementTemplate = ElementTemplate {
    element_type: ElementType::DanceFloor,
    name: "Dance Floor",
    icon: "💃",
    default_width: 200.0,
    default_height: 200.0,
    min_width: 100.0,
    min_height: 100.0,
    default_capacity: None,
    allow_resize: true,
    allow_rotate: true,
    style: tinted(244, 63, 94),
};

static ENTRANCE: ElementTemplate = ElementTemplate {
    element_type: ElementType::Entrance,
    name: "Entrance",
    icon: "🚪",
    default_width: 60.0,
    default_height: 20.0,
    min_width: 40.0,
    min_height: 20.0,
    default_capacity: None,
    allow_resize: true,
    allow_rotate: true,
    style: tinted(34, 197, 94),
};

static EXIT: ElementTemplate = ElementTemplate {
    element_type: ElementType::Exit,
    name: "Exit",
    icon: "🏃",
    default_width: 60.0,
    default_height: 20.0,
    min_width: 40.0,
    min_height: 20.0,
    default_capacity: None,
    allow_resize: true,
    allow_rotate: true,
    style: tinted(239, 68, 68),
};

static SERVICE: ElementTemplate = ElementTemplate {
    element_type: ElementType::Service,
    name: "Service",
    icon: "🛎",
    default_width: 100.0,
    default_height: 60.0,
    min_width: 40.0,
    min_height: 40.0,
    default_capacity: None,
    allow_resize: true,
    allow_rotate: true,
    style: tinted(100, 116, 139),
};

static VIP_AREA: ElementTemplate = ElementTemplate {
    element_type: ElementType::VipArea,
    name: "VIP Area",
    icon: "👑",
    default_width: 200.0,
    default_height: 200.0,
    min_width: 100.0,
    min_height: 100.0,
    default_capacity: None,
    allow_resize: true,
    allow_rotate: true,
    style: tinted(168, 85, 247),
};

static CUSTOM: ElementTemplate = ElementTemplate {
    element_type: ElementType::Custom,
    name: "Custom",
    icon: "✏",
    default_width: 100.0,
    default_height: 100.0,
    min_width: 20.0,
    min_height: 20.0,
    default_capacity: None,
    allow_resize: true,
    allow_rotate: true,
    style: tinted(156, 163, 175),
};

/// The template for `element_type`.
pub fn lookup(element_type: ElementType) -> &'static ElementTemplate {
    match element_type {
        ElementType::Table => &TABLE,
        ElementType::Booth => &BOOTH,
        ElementType::Bar => &BAR,
        ElementType::Stage => &STAGE,
        ElementType::DanceFloor => &DANCE_FLOOR,
        ElementType::Entrance => &ENTRANCE,
        ElementType::Exit => &EXIT,
        ElementType::Service => &SERVICE,
        ElementType::VipArea => &VIP_AREA,
        ElementType::Custom => &CUSTOM,
    }
}

/// All templates in palette order.
pub fn templates() -> impl Iterator<Item = &'static ElementTemplate> {
    ElementType::ALL.into_iter().map(lookup)
}
