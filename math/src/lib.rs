mod plane;
mod vector;

pub use self::plane::Plane;
pub use self::vector::{perp_cw, NormalizeOrZero};

pub use cgmath::prelude;
pub use cgmath::{vec2, vec3};

pub type Vec2f = cgmath::Vector2<f32>;
pub type Vec3f = cgmath::Vector3<f32>;
pub type Pnt2f = cgmath::Point2<f32>;
pub type Pnt3f = cgmath::Point3<f32>;
