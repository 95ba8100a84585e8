use super::vector::NormalizeOrZero;
use super::{Pnt2f, Pnt3f, Vec2f, Vec3f};
use cgmath::prelude::*;

/// An oriented half-space `{ p | normal . p <= distance }`; `normal` points out of the solid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3f,
    pub distance: f32,
}

impl Plane {
    pub fn new(normal: Vec3f, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Vertical plane through `point` facing along `normal`. The normal is normalized first and
    /// the distance measured along it, so a zero normal yields a zero plane rather than NaNs.
    pub fn vertical(normal: Vec2f, point: Pnt2f) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal: normal.extend(0.0),
            distance: normal.dot(point.to_vec()),
        }
    }

    /// Horizontal plane at `height` facing up (`0 0 1`) or down (`0 0 -1`).
    pub fn horizontal(facing_up: bool, height: f32) -> Self {
        if facing_up {
            Self::new(Vec3f::unit_z(), height)
        } else {
            Self::new(-Vec3f::unit_z(), -height)
        }
    }

    pub fn normalized(self) -> Self {
        let magnitude = self.normal.magnitude();
        if magnitude == 0.0 {
            self
        } else {
            Self {
                normal: self.normal / magnitude,
                distance: self.distance / magnitude,
            }
        }
    }

    /// Positive outside the half-space, negative inside.
    pub fn signed_distance(&self, point: Pnt3f) -> f32 {
        self.normal.dot(point.to_vec()) - self.distance
    }

    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            distance: -self.distance,
        }
    }
}
