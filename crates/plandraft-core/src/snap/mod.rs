//! Snap resolution for pointer positions during drawing.
//!
//! A candidate pointer position runs through a fixed chain of rules:
//! wall-extension snapping, projection onto nearby walls, endpoint
//! snapping, and 45-degree angle locking from the anchor. Each stage sees
//! the candidate produced by the stages before it; endpoint snapping
//! overrides the earlier stages outright. The resolver is pure: the same
//! inputs always produce the same result.

mod angle;
mod extension;

pub use extension::ExtensionLine;

use crate::geometry;
use crate::shapes::Shape;
use kurbo::Point;

/// Default pointer distance for endpoint and wall-projection snapping.
pub const SNAP_DISTANCE: f64 = 10.0;

/// Default distance between the pointer and a wall-extension intersection.
pub const EXTENSION_THRESHOLD: f64 = 30.0;

/// How far an angle lock may move the pointer and still be accepted.
pub const ANGLE_ACCEPT_DISTANCE: f64 = 20.0;

/// Acceptance distance for an angle lock on top of an extension hit.
pub const ANGLE_ACCEPT_NEAR_EXTENSION: f64 = 5.0;

/// Which snap rules are active, and their distance thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapSettings {
    /// Pull candidates onto wall endpoints and polygon vertices.
    pub snap_to_endpoints: bool,
    /// Project candidates onto nearby wall segments.
    pub snap_to_lines: bool,
    /// Lock anchored directions onto 45-degree rays.
    pub snap_to_angle: bool,
    /// Snap to perpendicular extensions of wall endpoints.
    pub snap_to_extensions: bool,
    /// Pointer distance for endpoint and line snapping.
    pub snap_distance: f64,
    /// Pointer distance for extension hits.
    pub extension_threshold: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            snap_to_endpoints: true,
            snap_to_lines: true,
            snap_to_angle: true,
            snap_to_extensions: true,
            snap_distance: SNAP_DISTANCE,
            extension_threshold: EXTENSION_THRESHOLD,
        }
    }
}

/// Outcome of running the snap chain.
#[derive(Debug, Clone, Copy)]
pub struct SnapResult {
    /// The possibly-adjusted pointer position.
    pub point: Point,
    /// Extension guide to draw, when one was found this round.
    pub extension: Option<ExtensionLine>,
}

impl SnapResult {
    /// A result that leaves the candidate untouched.
    pub fn unsnapped(point: Point) -> Self {
        Self {
            point,
            extension: None,
        }
    }
}

/// Run the snap chain on a candidate pointer position.
///
/// `anchor` is the fixed end of the segment being drawn, when there is one;
/// extension and angle snapping only apply while anchored and not dragging.
/// A blocked extension hit moves nothing but is still surfaced as a guide.
pub fn resolve(
    candidate: Point,
    anchor: Option<Point>,
    shapes: &[Shape],
    is_dragging: bool,
    settings: &SnapSettings,
) -> SnapResult {
    let mut point = candidate;
    let mut guide = None;
    let mut extension_snapped = false;

    if settings.snap_to_extensions && !is_dragging {
        if let Some(anchor) = anchor {
            if let Some(hit) =
                extension::find_extension_snap(candidate, anchor, shapes, settings.extension_threshold)
            {
                if !hit.blocked {
                    point = hit.end;
                    extension_snapped = true;
                }
                guide = Some(hit);
            }
        }
    }

    if !extension_snapped && settings.snap_to_lines {
        if let Some(projected) = nearest_line_projection(point, shapes, settings.snap_distance) {
            point = projected;
        }
    }

    if settings.snap_to_endpoints {
        if let Some(endpoint) = nearest_endpoint(point, shapes, settings.snap_distance) {
            point = endpoint;
        }
    }

    if settings.snap_to_angle && !is_dragging {
        if let Some(anchor) = anchor {
            if let Some(locked) = angle::snap_to_angle_grid(anchor, point) {
                let deviation = locked.distance(point);
                if deviation < ANGLE_ACCEPT_DISTANCE
                    || (extension_snapped && deviation < ANGLE_ACCEPT_NEAR_EXTENSION)
                {
                    point = locked;
                }
            }
        }
    }

    SnapResult {
        point,
        extension: guide,
    }
}

/// Nearest wall endpoint or polygon vertex within `max_distance`.
fn nearest_endpoint(point: Point, shapes: &[Shape], max_distance: f64) -> Option<Point> {
    let mut best = None;
    let mut best_distance = max_distance;
    let mut consider = |target: Point, best: &mut Option<Point>, best_distance: &mut f64| {
        let distance = point.distance(target);
        if distance < *best_distance {
            *best_distance = distance;
            *best = Some(target);
        }
    };
    for shape in shapes {
        match shape {
            Shape::Line(line) => {
                consider(line.start, &mut best, &mut best_distance);
                consider(line.end, &mut best, &mut best_distance);
            }
            Shape::Polygon(polygon) => {
                for &vertex in &polygon.points {
                    consider(vertex, &mut best, &mut best_distance);
                }
            }
            Shape::Rectangle(_) => {}
        }
    }
    best
}

/// Nearest projection of `point` onto any wall segment within `max_distance`.
fn nearest_line_projection(point: Point, shapes: &[Shape], max_distance: f64) -> Option<Point> {
    let mut best = None;
    let mut best_distance = max_distance;
    for shape in shapes {
        let Shape::Line(line) = shape else { continue };
        let projected = geometry::project_onto_segment(point, line.start, line.end);
        let distance = point.distance(projected);
        if distance < best_distance {
            best_distance = distance;
            best = Some(projected);
        }
    }
    best
}
