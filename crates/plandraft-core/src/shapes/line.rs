//! Wall segment shape.

use super::{
    SerializableColor, ShapeId, ShapeTrait, WALL_BORDER_COLOR, WALL_FILL_COLOR, WALL_FILL_WIDTH,
};
use crate::geometry;
use kurbo::{Affine, BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight wall segment between two points.
///
/// Committed walls always carry the fixed wall styling so they read as
/// structural geometry no matter which fill palette is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ShapeId,
    /// First endpoint.
    pub start: Point,
    /// Second endpoint.
    pub end: Point,
    /// Inner stroke color.
    pub stroke_color: SerializableColor,
    /// Outer border color.
    pub border_color: SerializableColor,
    /// Inner stroke width.
    pub line_width: f64,
}

impl Line {
    /// Create a wall segment with the standard wall styling.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            stroke_color: WALL_FILL_COLOR,
            border_color: WALL_BORDER_COLOR,
            line_width: WALL_FILL_WIDTH,
        }
    }

    /// Segment length.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Midpoint of the segment.
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let nearest = geometry::project_onto_segment(point, self.start, self.end);
        point.distance(nearest) <= tolerance
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.end);
        path
    }

    fn transform(&mut self, affine: Affine) {
        self.start = affine * self.start;
        self.end = affine * self.end;
    }
}
