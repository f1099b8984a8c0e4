//! Collision detection for the ball and blocks
//!
//! Both tests are discrete: they look at the current positions only. A ball
//! moving more than its diameter in one frame can pass a thin block.

use glam::Vec2;

use super::geometry::{Aabb, Side, classify};

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Face of the box that was struck
    pub side: Side,
    /// Vector from the moving shape's center to the closest point on the box.
    /// Its per-axis magnitude is what remains of the gap; the penetration on
    /// that axis is `extent - |difference|`.
    pub difference: Vec2,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            side: Side::Up,
            difference: Vec2::ZERO,
        }
    }
}

/// Check collision between a circle and a box
///
/// `center` is the circle center (for the ball: position + radius on both axes).
pub fn circle_box_collision(center: Vec2, radius: f32, aabb: &Aabb) -> CollisionResult {
    let closest = aabb.closest_point(center);
    let difference = closest - center;

    if difference.length() < radius {
        CollisionResult {
            hit: true,
            side: classify(difference),
            difference,
        }
    } else {
        CollisionResult::miss()
    }
}

/// Check collision between two boxes
///
/// `hit` is plain interval overlap (touching counts). `side` and `difference`
/// are computed from `one`'s center toward the closest point of `two`, so a
/// hit with `side == Up` means `one` is resting on top of `two`.
pub fn box_box_collision(one: &Aabb, two: &Aabb) -> CollisionResult {
    let closest = two.closest_point(one.center());
    let difference = closest - one.center();

    CollisionResult {
        hit: one.overlaps(two),
        side: classify(difference),
        difference,
    }
}
