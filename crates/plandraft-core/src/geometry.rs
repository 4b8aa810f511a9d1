//! Plane geometry kernel shared by snapping, hit testing and the renderer.
//!
//! All coordinates are canvas-local pixels. Functions here are pure and never
//! panic; degenerate inputs fall back to a defined result instead.

use kurbo::Point;

/// Determinant magnitude below which two lines are treated as parallel.
pub const PARALLEL_EPSILON: f64 = 0.001;

/// Absorbs float error when testing a computed intersection against a
/// segment's bounding box.
const BOUNDS_EPSILON: f64 = 1e-9;

/// Intersect the infinite lines through `(p1, p2)` and `(p3, p4)`.
///
/// Returns `None` when the lines are parallel or near-parallel. The result is
/// not required to lie within either segment; callers that need containment
/// use [`segments_intersect`] instead.
pub fn line_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    let d1 = p2 - p1;
    let d2 = p4 - p3;
    let denom = d1.cross(d2);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = (p3 - p1).cross(d2) / denom;
    Some(p1 + d1 * t)
}

/// Whether segment `(a1, a2)` crosses segment `(b1, b2)`.
///
/// Same solve as [`line_intersection`], but the computed point must lie
/// inside both segments' bounding boxes.
pub fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    match line_intersection(a1, a2, b1, b2) {
        Some(p) => within_bounds(p, a1, a2) && within_bounds(p, b1, b2),
        None => false,
    }
}

fn within_bounds(p: Point, a: Point, b: Point) -> bool {
    p.x >= a.x.min(b.x) - BOUNDS_EPSILON
        && p.x <= a.x.max(b.x) + BOUNDS_EPSILON
        && p.y >= a.y.min(b.y) - BOUNDS_EPSILON
        && p.y <= a.y.max(b.y) + BOUNDS_EPSILON
}

/// Project `point` onto the segment `(seg_start, seg_end)`, clamping the
/// parameter to `[0, 1]`. A zero-length segment projects to `seg_start`.
pub fn project_onto_segment(point: Point, seg_start: Point, seg_end: Point) -> Point {
    let seg = seg_end - seg_start;
    let len_sq = seg.hypot2();
    if len_sq == 0.0 {
        return seg_start;
    }
    let t = ((point - seg_start).dot(seg) / len_sq).clamp(0.0, 1.0);
    seg_start + seg * t
}

/// Even-odd ray-casting containment test over a closed vertex ring.
///
/// Fewer than three vertices never contain a point.
pub fn point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (pi, pj) = (vertices[i], vertices[j]);
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}
