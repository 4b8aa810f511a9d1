//! Perpendicular wall-extension snapping.
//!
//! For every wall endpoint, the line perpendicular to the wall through that
//! endpoint is intersected with the infinite line from the anchor through
//! the pointer. A hit close enough to the pointer becomes a snap candidate,
//! unless another wall crosses the anchor-to-hit path.

use crate::geometry;
use crate::shapes::Shape;
use kurbo::{Point, Vec2};

/// Half-length of the perpendicular guide used for intersection.
const EXTENSION_REACH: f64 = 1000.0;

/// Walls with an endpoint this close to the anchor never count as occluders.
const ANCHOR_EXCLUSION: f64 = 5.0;

/// Visual guide emitted when an extension hit is found.
///
/// `start` is the wall endpoint the guide extends from, `end` the
/// intersection on the pointer ray. A blocked guide marks a hit that was
/// discarded because another wall crosses the anchor-to-hit path; it is
/// drawn as a hint but does not move the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtensionLine {
    /// Wall endpoint the extension originates at.
    pub start: Point,
    /// Intersection of the perpendicular with the pointer ray.
    pub end: Point,
    /// Whether the anchor-to-hit path is crossed by another wall.
    pub blocked: bool,
}

struct ExtensionHit {
    source: Point,
    point: Point,
    distance: f64,
    wall: usize,
    blocked: bool,
}

/// Find the best extension hit for a pointer ray anchored at `anchor`.
///
/// Returns the nearest unblocked hit, or the nearest blocked one (marked as
/// such) when every candidate is occluded, or `None` when no perpendicular
/// intersects within `threshold` of the pointer.
pub(super) fn find_extension_snap(
    candidate: Point,
    anchor: Point,
    shapes: &[Shape],
    threshold: f64,
) -> Option<ExtensionLine> {
    let walls: Vec<(Point, Point)> = shapes
        .iter()
        .filter_map(|shape| match shape {
            Shape::Line(line) => Some((line.start, line.end)),
            _ => None,
        })
        .collect();

    let mut hits = Vec::new();
    for (index, &(start, end)) in walls.iter().enumerate() {
        let direction = end - start;
        let length = direction.hypot();
        if length < geometry::PARALLEL_EPSILON {
            continue;
        }
        let unit = direction / length;
        let perp = Vec2::new(-unit.y, unit.x) * EXTENSION_REACH;
        for source in [start, end] {
            let Some(point) =
                geometry::line_intersection(anchor, candidate, source - perp, source + perp)
            else {
                continue;
            };
            let distance = point.distance(candidate);
            if distance < threshold {
                hits.push(ExtensionHit {
                    source,
                    point,
                    distance,
                    wall: index,
                    blocked: false,
                });
            }
        }
    }
    if hits.is_empty() {
        return None;
    }

    // A hit is occluded when any other wall crosses the anchor-to-hit path.
    // Walls already attached at the anchor always cross trivially and are
    // skipped.
    for hit in &mut hits {
        hit.blocked = walls.iter().enumerate().any(|(other, &(ws, we))| {
            other != hit.wall
                && ws.distance(anchor) >= ANCHOR_EXCLUSION
                && we.distance(anchor) >= ANCHOR_EXCLUSION
                && geometry::segments_intersect(anchor, hit.point, ws, we)
        });
    }

    if let Some(best) = hits
        .iter()
        .filter(|hit| !hit.blocked)
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
    {
        return Some(ExtensionLine {
            start: best.source,
            end: best.point,
            blocked: false,
        });
    }
    let nearest = hits
        .iter()
        .min_by(|a, b| a.distance.total_cmp(&b.distance))?;
    Some(ExtensionLine {
        start: nearest.source,
        end: nearest.point,
        blocked: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Line;

    fn wall(x0: f64, y0: f64, x1: f64, y1: f64) -> Shape {
        Shape::Line(Line::new(Point::new(x0, y0), Point::new(x1, y1)))
    }

    #[test]
    fn test_extension_hit_geometry() {
        // Horizontal wall; the perpendicular through (100, 0) is the
        // vertical x = 100. The anchor ray crosses it at (100, 17.5).
        let shapes = vec![wall(0.0, 0.0, 100.0, 0.0)];
        let hit = find_extension_snap(
            Point::new(90.0, 30.0),
            Point::new(50.0, 80.0),
            &shapes,
            30.0,
        )
        .unwrap();
        assert!(!hit.blocked);
        assert_eq!(hit.start, Point::new(100.0, 0.0));
        assert!((hit.end.x - 100.0).abs() < 1e-9);
        assert!((hit.end.y - 17.5).abs() < 1e-9);
    }

    #[test]
    fn test_extension_requires_threshold() {
        let shapes = vec![wall(0.0, 0.0, 100.0, 0.0)];
        let hit = find_extension_snap(
            Point::new(55.0, 70.0),
            Point::new(50.0, 80.0),
            &shapes,
            30.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_extension_nearest_hit_wins() {
        // Both walls produce a hit on the ray; the one from (85, -10) lands
        // closer to the pointer.
        let shapes = vec![wall(0.0, 0.0, 100.0, 0.0), wall(85.0, -10.0, 20.0, -10.0)];
        let hit = find_extension_snap(
            Point::new(90.0, 30.0),
            Point::new(50.0, 80.0),
            &shapes,
            30.0,
        )
        .unwrap();
        assert!(!hit.blocked);
        assert_eq!(hit.start, Point::new(85.0, -10.0));
        assert!((hit.end.x - 85.0).abs() < 1e-9);
        assert!((hit.end.y - 36.25).abs() < 1e-9);
    }

    #[test]
    fn test_extension_blocked_by_crossing_wall() {
        // The vertical wall at x = 60 cuts the anchor-to-hit path while
        // producing no in-threshold hit of its own.
        let shapes = vec![wall(0.0, 0.0, 100.0, 0.0), wall(60.0, 70.0, 60.0, -100.0)];
        let hit = find_extension_snap(
            Point::new(90.0, 30.0),
            Point::new(50.0, 80.0),
            &shapes,
            30.0,
        )
        .unwrap();
        assert!(hit.blocked);
        assert_eq!(hit.start, Point::new(100.0, 0.0));
        assert!((hit.end.y - 17.5).abs() < 1e-9);
    }

    #[test]
    fn test_extension_walls_at_anchor_never_block() {
        // A wall chained at the anchor crosses the path trivially; it must
        // not occlude the hit.
        let shapes = vec![wall(0.0, 0.0, 100.0, 0.0), wall(50.0, 80.0, 50.0, 200.0)];
        let hit = find_extension_snap(
            Point::new(90.0, 30.0),
            Point::new(50.0, 80.0),
            &shapes,
            30.0,
        )
        .unwrap();
        assert!(!hit.blocked);
        assert_eq!(hit.start, Point::new(100.0, 0.0));
    }

    #[test]
    fn test_extension_ignores_non_walls() {
        use crate::shapes::{Polygon, YELLOW_FILL_COLOR};
        let shapes = vec![Shape::Polygon(Polygon::new(
            vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(0.0, 100.0),
            ],
            YELLOW_FILL_COLOR,
        ))];
        let hit = find_extension_snap(
            Point::new(90.0, 30.0),
            Point::new(50.0, 80.0),
            &shapes,
            30.0,
        );
        assert!(hit.is_none());
    }
}
