//! Shape model: wall segments, filled rectangles and filled polygons.

mod line;
mod polygon;
mod rectangle;

pub use line::Line;
pub use polygon::Polygon;
pub use rectangle::Rectangle;

use kurbo::{Affine, BezPath, Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a shape.
pub type ShapeId = Uuid;

/// Outer border stroke width for walls, in pixels.
pub const WALL_BORDER_WIDTH: f64 = 10.0;
/// Inner fill stroke width for walls, in pixels.
pub const WALL_FILL_WIDTH: f64 = 8.0;
/// Wall border color.
pub const WALL_BORDER_COLOR: SerializableColor = SerializableColor::rgb8(0x00, 0x00, 0x00);
/// Wall inner fill color.
pub const WALL_FILL_COLOR: SerializableColor = SerializableColor::rgb8(0x8E, 0x91, 0x96);
/// Default fill for yellow room shapes.
pub const YELLOW_FILL_COLOR: SerializableColor = SerializableColor::rgb8(0xFF, 0xFB, 0xCC);
/// Default fill for green room shapes.
pub const GREEN_FILL_COLOR: SerializableColor = SerializableColor::rgb8(0xC9, 0xE5, 0xD1);

/// RGBA8 color that can cross serde boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    /// Opaque color from RGB components.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with the given alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Behavior shared by every shape variant.
pub trait ShapeTrait {
    /// Stable unique id.
    fn id(&self) -> ShapeId;

    /// Axis-aligned bounding box.
    fn bounds(&self) -> Rect;

    /// Whether `point` hits the shape. `tolerance` widens stroke-based
    /// shapes; filled shapes test containment.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Path describing the shape's geometry.
    fn to_path(&self) -> BezPath;

    /// Apply an affine transform to every defining point.
    fn transform(&mut self, affine: Affine);
}

/// A drawable floor-plan shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Shape {
    Line(Line),
    Rectangle(Rectangle),
    Polygon(Polygon),
}

impl Shape {
    /// Stable unique id of the underlying shape.
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Line(line) => line.id(),
            Shape::Rectangle(rect) => rect.id(),
            Shape::Polygon(poly) => poly.id(),
        }
    }

    /// Axis-aligned bounding box.
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Line(line) => line.bounds(),
            Shape::Rectangle(rect) => rect.bounds(),
            Shape::Polygon(poly) => poly.bounds(),
        }
    }

    /// Hit test against the underlying shape.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Shape::Line(line) => line.hit_test(point, tolerance),
            Shape::Rectangle(rect) => rect.hit_test(point, tolerance),
            Shape::Polygon(poly) => poly.hit_test(point, tolerance),
        }
    }

    /// Path describing the shape's geometry.
    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Line(line) => line.to_path(),
            Shape::Rectangle(rect) => rect.to_path(),
            Shape::Polygon(poly) => poly.to_path(),
        }
    }

    /// Apply an affine transform to every defining point.
    pub fn transform(&mut self, affine: Affine) {
        match self {
            Shape::Line(line) => line.transform(affine),
            Shape::Rectangle(rect) => rect.transform(affine),
            Shape::Polygon(poly) => poly.transform(affine),
        }
    }

    /// Whether this shape is a wall segment.
    pub fn is_wall(&self) -> bool {
        matches!(self, Shape::Line(_))
    }

    /// Whether this shape has a filled interior (rectangle or polygon).
    pub fn is_area(&self) -> bool {
        !self.is_wall()
    }
}
