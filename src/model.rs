//! Layout data model: placed elements, their typed properties, and the grid
//! and viewport configuration that travel with a saved layout.
//!
//! Elements are strongly typed in memory (`ElementKind` carries the
//! per-type properties) but serialize to the flat wire shape the venue
//! backend stores: `{id, type, name, x, y, ..., customProps}`. Unknown
//! `customProps` keys survive a decode/encode cycle untouched.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::snap::Placement;

pub const MIN_SCALE: f64 = 0.1;

pub const MAX_SCALE: f64 = 5.0;

const SERVICE_SIDE_KEY: &str = "serviceSide";
const STAGE_TYPE_KEY: &str = "stageType";

/// A point in canvas (world) units, or in canvas-relative screen pixels.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementType {
    Table,
    Booth,
    Bar,
    Stage,
    DanceFloor,
    Entrance,
    Exit,
    Service,
    VipArea,
    Custom,
}

impl ElementType {
    pub const ALL: [ElementType; 10] = [
        ElementType::Table,
        ElementType::Booth,
        ElementType::Bar,
        ElementType::Stage,
        ElementType::DanceFloor,
        ElementType::Entrance,
        ElementType::Exit,
        ElementType::Service,
        ElementType::VipArea,
        ElementType::Custom,
    ];

    pub fn is_seating(self) -> bool {
        matches!(self, Self::Table | Self::Booth)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceSide {
    #[default]
    Front,
    Back,
    Left,
    Right,
    All,
}

impl ServiceSide {
    pub const ALL: [ServiceSide; 5] = [
        ServiceSide::Front,
        ServiceSide::Back,
        ServiceSide::Left,
        ServiceSide::Right,
        ServiceSide::All,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
            Self::Left => "left",
            Self::Right => "right",
            Self::All => "all",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Front => "Front",
            Self::Back => "Back",
            Self::Left => "Left",
            Self::Right => "Right",
            Self::All => "All Sides",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageType {
    #[default]
    Main,
    Dj,
    Performance,
}

impl StageType {
    pub const ALL: [StageType; 3] = [StageType::Main, StageType::Dj, StageType::Performance];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Dj => "dj",
            Self::Performance => "performance",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Main => "Main Stage",
            Self::Dj => "DJ Booth",
            Self::Performance => "Performance Area",
        }
    }
}

/// Bar-specific properties. `None` means "not set"; the editor shows the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BarProps {
    pub service_side: Option<ServiceSide>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageProps {
    pub stage_type: Option<StageType>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Table,
    Booth,
    Bar(BarProps),
    Stage(StageProps),
    DanceFloor,
    Entrance,
    Exit,
    Service,
    VipArea,
    Custom,
}

impl ElementKind {
    pub fn for_type(element_type: ElementType) -> Self {
        match element_type {
            ElementType::Table => Self::Table,
            ElementType::Booth => Self::Booth,
            ElementType::Bar => Self::Bar(BarProps::default()),
            ElementType::Stage => Self::Stage(StageProps::default()),
            ElementType::DanceFloor => Self::DanceFloor,
            ElementType::Entrance => Self::Entrance,
            ElementType::Exit => Self::Exit,
            ElementType::Service => Self::Service,
            ElementType::VipArea => Self::VipArea,
            ElementType::Custom => Self::Custom,
        }
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Table => ElementType::Table,
            Self::Booth => ElementType::Booth,
            Self::Bar(_) => ElementType::Bar,
            Self::Stage(_) => ElementType::Stage,
            Self::DanceFloor => ElementType::DanceFloor,
            Self::Entrance => ElementType::Entrance,
            Self::Exit => ElementType::Exit,
            Self::Service => ElementType::Service,
            Self::VipArea => ElementType::VipArea,
            Self::Custom => ElementType::Custom,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized color {0:?}")]
pub struct ColorParseError(String);

/// An sRGB color with straight (unmultiplied) alpha.
///
/// Parses `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and
/// `rgba(r, g, b, a)`. Displays as `#rrggbb` when opaque, `rgba(...)` otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            return write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b);
        }
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha_text(self.a))
    }
}

/// Shortest of two or three decimals that reads back as the same byte.
fn alpha_text(a: u8) -> String {
    let unit = f64::from(a) / 255.0;
    let short = format!("{unit:.2}");
    let text = match short.parse::<f64>() {
        Ok(v) if unit_to_u8(v) == a => short,
        _ => format!("{unit:.3}"),
    };
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() { "0".to_string() } else { text.to_string() }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let t = s.trim();
        if let Some(hex) = t.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(err);
        }
        let lower = t.to_ascii_lowercase();
        let (body, has_alpha) = if let Some(rest) = lower.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = lower.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(err());
        };
        let body = body.strip_suffix(')').ok_or_else(err)?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(err());
        }
        let channel = |p: &str| p.parse::<u8>().map_err(|_| err());
        let r = channel(parts[0])?;
        let g = channel(parts[1])?;
        let b = channel(parts[2])?;
        let a = if has_alpha {
            let alpha: f64 = parts[3].parse().map_err(|_| err())?;
            if !(0.0..=1.0).contains(&alpha) {
                return Err(err());
            }
            unit_to_u8(alpha)
        } else {
            255
        };
        Ok(Self { r, g, b, a })
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map(|v| v * 17);
    let parsed = match hex.len() {
        3 => (nibble(0), nibble(1), nibble(2), Ok(255)),
        6 => (byte(0), byte(2), byte(4), Ok(255)),
        8 => (byte(0), byte(2), byte(4), byte(6)),
        _ => return None,
    };
    match parsed {
        (Ok(r), Ok(g), Ok(b), Ok(a)) => Some(Color { r, g, b, a }),
        _ => None,
    }
}

fn unit_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// A style color exactly as written in layout data.
///
/// The source text is what gets written back, so colors this editor cannot
/// parse (named CSS colors, `hsl(...)`) still round-trip. `color()` is `None`
/// for those and rendering falls back to the template color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct StyleColor {
    source: String,
    color: Option<Color>,
}

impl StyleColor {
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn color_or(&self, fallback: Color) -> Color {
        self.color().unwrap_or(fallback)
    }
}

impl From<String> for StyleColor {
    fn from(source: String) -> Self {
        let color = match source.parse::<Color>() {
            Ok(color) => Some(color),
            Err(_) => None,
        };
        Self { source, color }
    }
}

impl From<&str> for StyleColor {
    fn from(source: &str) -> Self {
        Self::from(source.to_string())
    }
}

impl From<Color> for StyleColor {
    fn from(color: Color) -> Self {
        Self {
            source: color.to_string(),
            color: Some(color),
        }
    }
}

impl From<StyleColor> for String {
    fn from(value: StyleColor) -> Self {
        value.source
    }
}

impl fmt::Display for StyleColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Per-element style override. Absent means "use the template's style".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    pub fill: StyleColor,
    pub stroke: StyleColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireElement", into = "WireElement")]
pub struct LayoutElement {
    pub id: ElementId,
    pub kind: ElementKind,
    pub name: String,
    /// Origin of the element's (rotated) frame in canvas units.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise rotation in degrees around `(x, y)`.
    pub rotation: f64,
    pub capacity: Option<u32>,
    pub is_locked: bool,
    pub style: Option<ElementStyle>,
    /// `customProps` keys that have no typed home on `kind`.
    pub extra_props: BTreeMap<String, serde_json::Value>,
    /// Top-level keys this editor does not model (`minWidth`, `isReserved`, ...).
    pub extra_fields: BTreeMap<String, serde_json::Value>,
}

impl LayoutElement {
    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    pub fn placement(&self) -> Placement {
        Placement {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            rotation: self.rotation,
        }
    }

    pub fn contains(&self, world: Point) -> bool {
        self.placement().contains(world)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireElement {
    id: ElementId,
    #[serde(rename = "type")]
    element_type: ElementType,
    #[serde(default)]
    name: String,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    width: f64,
    height: f64,
    #[serde(default)]
    rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "is_false")]
    is_locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    style: Option<ElementStyle>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    custom_props: BTreeMap<String, serde_json::Value>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// Move `key` out of `props` if it decodes as `T`; leave it in place otherwise.
fn take_typed<T: serde::de::DeserializeOwned>(
    props: &mut BTreeMap<String, serde_json::Value>,
    key: &str,
) -> Option<T> {
    let value = props.get(key)?;
    match serde_json::from_value::<T>(value.clone()) {
        Ok(typed) => {
            props.remove(key);
            Some(typed)
        }
        Err(_) => None,
    }
}

impl From<WireElement> for LayoutElement {
    fn from(wire: WireElement) -> Self {
        let mut extra = wire.custom_props;
        let kind = match wire.element_type {
            ElementType::Bar => ElementKind::Bar(BarProps {
                service_side: take_typed(&mut extra, SERVICE_SIDE_KEY),
            }),
            ElementType::Stage => ElementKind::Stage(StageProps {
                stage_type: take_typed(&mut extra, STAGE_TYPE_KEY),
            }),
            other => ElementKind::for_type(other),
        };
        Self {
            id: wire.id,
            kind,
            name: wire.name,
            x: wire.x,
            y: wire.y,
            width: wire.width,
            height: wire.height,
            rotation: wire.rotation,
            capacity: wire.capacity,
            is_locked: wire.is_locked,
            style: wire.style,
            extra_props: extra,
            extra_fields: wire.extra,
        }
    }
}

impl From<LayoutElement> for WireElement {
    fn from(element: LayoutElement) -> Self {
        let element_type = element.element_type();
        let mut custom_props = element.extra_props;
        match element.kind {
            ElementKind::Bar(BarProps {
                service_side: Some(side),
            }) => {
                custom_props.insert(SERVICE_SIDE_KEY.to_string(), side.as_str().into());
            }
            ElementKind::Stage(StageProps {
                stage_type: Some(stage),
            }) => {
                custom_props.insert(STAGE_TYPE_KEY.to_string(), stage.as_str().into());
            }
            _ => {}
        }
        Self {
            id: element.id,
            element_type,
            name: element.name,
            x: element.x,
            y: element.y,
            width: element.width,
            height: element.height,
            rotation: element.rotation,
            capacity: element.capacity,
            is_locked: element.is_locked,
            style: element.style,
            custom_props,
            extra: element.extra_fields,
        }
    }
}

/// Sparse update for an element. Only present fields are applied.
///
/// `kind` is applied only when it names the element's own type; an element
/// never changes type after creation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementPatch {
    pub name: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub capacity: Option<u32>,
    pub is_locked: Option<bool>,
    pub style: Option<ElementStyle>,
    pub kind: Option<ElementKind>,
}

impl ElementPatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }
}

/// Grid configuration. `size` is the major pitch and the snap quantum.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub size: f64,
    pub enabled: bool,
    pub snap: bool,
    pub subdivisions: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 20.0,
            enabled: true,
            snap: true,
            subdivisions: 2,
        }
    }
}

/// Pan/zoom state of the canvas.
///
/// `position` is the screen offset of the world origin, so
/// `screen = world * scale + position`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportState {
    pub scale: f64,
    pub position: Point,
    pub rotation: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            position: Point::default(),
            rotation: 0.0,
        }
    }
}

impl ViewportState {
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.position.x) / self.scale,
            y: (screen.y - self.position.y) / self.scale,
        }
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale + self.position.x,
            y: world.y * self.scale + self.position.y,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Select,
    Measure,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideOrientation {
    Horizontal,
    Vertical,
}

/// A session-only alignment line. Horizontal guides sit at `y = position`,
/// vertical ones at `x = position`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutGuide {
    pub id: u64,
    pub orientation: GuideOrientation,
    pub position: f64,
    pub color: Option<Color>,
}
