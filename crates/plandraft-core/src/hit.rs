//! Hit-testing for selection.

use crate::shapes::{Shape, ShapeId};
use kurbo::Point;

/// Pointer distance within which a wall counts as hit.
pub const LINE_HIT_TOLERANCE: f64 = 10.0;

/// Find the shape under `point`.
///
/// Filled shapes are tested before walls so a wall running under a room
/// fill cannot steal the click; within each group the first shape in paint
/// order wins.
pub fn shape_at_point(shapes: &[Shape], point: Point) -> Option<ShapeId> {
    if let Some(shape) = shapes
        .iter()
        .find(|shape| shape.is_area() && shape.hit_test(point, 0.0))
    {
        return Some(shape.id());
    }
    shapes
        .iter()
        .find(|shape| shape.is_wall() && shape.hit_test(point, LINE_HIT_TOLERANCE))
        .map(Shape::id)
}
