use super::Vec2f;
use cgmath::{vec2, BaseFloat, InnerSpace};
use num_traits::Zero;

pub trait NormalizeOrZero: InnerSpace
where
    Self::Scalar: BaseFloat,
{
    /// Like `normalize`, but a zero vector is returned unchanged instead of turning into NaNs.
    #[inline]
    fn normalize_or_zero(self) -> Self {
        let magnitude = self.magnitude();
        if magnitude == Self::Scalar::zero() {
            self
        } else {
            self / magnitude
        }
    }
}

impl<VectorT> NormalizeOrZero for VectorT
where
    VectorT: InnerSpace,
    VectorT::Scalar: BaseFloat,
{
}

/// Rotates a 2D vector by -90 degrees, i.e. towards its right-hand side.
#[inline]
pub fn perp_cw(v: Vec2f) -> Vec2f {
    vec2(v.y, -v.x)
}
