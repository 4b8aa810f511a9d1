//! Filled polygon shape.

use super::{SerializableColor, ShapeId, ShapeTrait};
use crate::geometry;
use kurbo::{Affine, BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A closed filled polygon over an ordered vertex ring.
///
/// The last vertex implicitly connects back to the first. Commit rules
/// guarantee at least three vertices for stored polygons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polygon {
    pub(crate) id: ShapeId,
    /// Ordered vertex ring.
    pub points: Vec<Point>,
    /// Interior fill color.
    pub fill_color: SerializableColor,
}

impl Polygon {
    /// Create a polygon from an ordered vertex ring.
    pub fn new(points: Vec<Point>, fill_color: SerializableColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            fill_color,
        }
    }
}

impl ShapeTrait for Polygon {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let Some(&first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .fold(Rect::from_points(first, first), |r, &p| r.union_pt(p))
    }

    fn hit_test(&self, point: Point, _tolerance: f64) -> bool {
        geometry::point_in_polygon(point, &self.points)
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        if let Some((&first, rest)) = self.points.split_first() {
            path.move_to(first);
            for &p in rest {
                path.line_to(p);
            }
            path.close_path();
        }
        path
    }

    fn transform(&mut self, affine: Affine) {
        for p in &mut self.points {
            *p = affine * *p;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::GREEN_FILL_COLOR;

    fn triangle() -> Polygon {
        Polygon::new(
            vec![
                Point::new(0.0, 0.0),
                Point::new(40.0, 0.0),
                Point::new(0.0, 40.0),
            ],
            GREEN_FILL_COLOR,
        )
    }

    #[test]
    fn test_bounds() {
        assert_eq!(triangle().bounds(), Rect::new(0.0, 0.0, 40.0, 40.0));
    }

    #[test]
    fn test_hit_test_even_odd() {
        let tri = triangle();
        assert!(tri.hit_test(Point::new(10.0, 10.0), 0.0));
        assert!(!tri.hit_test(Point::new(30.0, 30.0), 0.0));
    }

    #[test]
    fn test_transform_keeps_congruence() {
        let mut tri = triangle();
        let before = tri.points.clone();
        tri.transform(Affine::translate((12.5, -7.0)));
        for (old, new) in before.iter().zip(&tri.points) {
            assert!((new.x - old.x - 12.5).abs() < 1e-9);
            assert!((new.y - old.y + 7.0).abs() < 1e-9);
        }
        // Pairwise distances unchanged.
        for i in 0..before.len() {
            for j in i + 1..before.len() {
                let d0 = before[i].distance(before[j]);
                let d1 = tri.points[i].distance(tri.points[j]);
                assert!((d0 - d1).abs() < 1e-9);
            }
        }
    }
}
