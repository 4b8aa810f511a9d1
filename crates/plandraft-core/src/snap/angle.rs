//! 45-degree angle locking for anchored drawing.

use kurbo::{Point, Vec2};

/// Spacing of the angle grid in degrees.
const ANGLE_INCREMENT: f64 = 45.0;

/// How close to a grid direction the pointer must be, in degrees.
const ANGLE_WINDOW: f64 = 5.0;

/// Lock the anchor-to-candidate direction onto the nearest 45-degree ray.
///
/// Returns the candidate rotated onto the ray at its original distance, or
/// `None` when the direction is not within `ANGLE_WINDOW` of a ray. The
/// caller decides whether the locked point is close enough to accept.
pub(super) fn snap_to_angle_grid(anchor: Point, candidate: Point) -> Option<Point> {
    let delta = candidate - anchor;
    let distance = delta.hypot();
    if distance < 0.001 {
        return None;
    }

    let angle = delta.y.atan2(delta.x).to_degrees();
    let angle_diff = (((angle % ANGLE_INCREMENT) - ANGLE_INCREMENT) % ANGLE_INCREMENT).abs();
    if angle_diff >= ANGLE_WINDOW && angle_diff <= ANGLE_INCREMENT - ANGLE_WINDOW {
        return None;
    }

    let locked = (angle / ANGLE_INCREMENT).round() * ANGLE_INCREMENT;
    Some(anchor + Vec2::from_angle(locked.to_radians()) * distance)
}
