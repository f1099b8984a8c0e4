//! Axis-aligned boxes and compass classification
//!
//! Screen space: x grows right, y grows down. A [`Side`] always names the face
//! of the box that was struck, seen from the box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Face of a block struck by a collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Top face (the ball landed on the block)
    Up,
    /// Right face
    Right,
    /// Bottom face (the ball hit the block from underneath)
    Down,
    /// Left face
    Left,
    /// No face dominates: the contact vector is zero or points nowhere useful,
    /// which means the ball center is on or inside the box
    Embedded,
}

/// Compass unit vectors, tested in this order. Each points from the ball
/// center toward the closest point on the box, so `Up` is +y (box below the
/// ball) and `Right` is -x (box to the left of the ball).
const COMPASS: [(Side, Vec2); 4] = [
    (Side::Up, Vec2::new(0.0, 1.0)),
    (Side::Right, Vec2::new(-1.0, 0.0)),
    (Side::Down, Vec2::new(0.0, -1.0)),
    (Side::Left, Vec2::new(1.0, 0.0)),
];

/// Classify a contact vector (ball center → closest box point) into the struck face
///
/// Picks the compass direction with the largest positive dot product against
/// the normalized input. Exact ties go to the earlier entry in
/// Up, Right, Down, Left order. A zero or non-finite vector has no positive
/// dot product and yields [`Side::Embedded`].
pub fn classify(target: Vec2) -> Side {
    let dir = target.normalize_or_zero();
    let mut max = 0.0;
    let mut best = Side::Embedded;
    for (side, axis) in COMPASS {
        let dot = dir.dot(axis);
        if dot > max {
            max = dot;
            best = side;
        }
    }
    best
}

/// An axis-aligned box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size / 2.0
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.half_extents()
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Interval overlap on both axes; touching edges count as overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let overlap_x = self.max().x >= other.min.x && other.max().x >= self.min.x;
        let overlap_y = self.max().y >= other.min.y && other.max().y >= self.min.y;
        overlap_x && overlap_y
    }

    /// Point of the box closest to `p` (p itself when inside)
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        let half = self.half_extents();
        let center = self.center();
        center + (p - center).clamp(-half, half)
    }
}
