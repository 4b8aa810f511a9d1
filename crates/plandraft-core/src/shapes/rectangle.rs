//! Filled rectangle shape.

use super::{SerializableColor, ShapeId, ShapeTrait};
use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned filled rectangle stored as two opposite corners.
///
/// The corners arrive in gesture order and may be unnormalized (negative
/// width or height); consumers normalize through [`Rectangle::rect`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Corner where the gesture started.
    pub start: Point,
    /// Opposite corner.
    pub end: Point,
    /// Interior fill color.
    pub fill_color: SerializableColor,
}

impl Rectangle {
    /// Create a rectangle from two opposite corners.
    pub fn new(start: Point, end: Point, fill_color: SerializableColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            fill_color,
        }
    }

    /// Normalized bounds (min/max corners).
    pub fn rect(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.rect().inflate(tolerance, tolerance).contains(point)
    }

    fn to_path(&self) -> BezPath {
        self.rect().to_path(0.1)
    }

    fn transform(&mut self, affine: Affine) {
        self.start = affine * self.start;
        self.end = affine * self.end;
    }
}
