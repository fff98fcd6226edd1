//! # gallery_math - Gallery Math Helpers
//!
//! Thin layer over `glam` with the primitives the gallery simulation needs:
//! - Rays for aim queries
//! - Axis-aligned boxes and movement rectangles
//! - Ray intersection tests
//! - Euler transforms and easing curves

pub mod bounds;
pub mod intersect;
pub mod ray;
pub mod transform;

pub use glam::{Vec2, Vec3};

pub use bounds::*;
pub use intersect::*;
pub use ray::*;
pub use transform::*;

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const TAU: f32 = PI * 2.0;
    pub const FRAC_PI_2: f32 = PI / 2.0;
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Convert degrees to radians
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * consts::DEG_TO_RAD
}

/// Cubic ease-out: `1 - (1 - t)^3`, with `t` clamped to [0, 1]
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

pub mod prelude {
    pub use crate::bounds::{Aabb, Rect};
    pub use crate::intersect::{ray_aabb, ray_aabb_hit, RayHit};
    pub use crate::ray::Ray;
    pub use crate::transform::Transform;
    pub use crate::{ease_out_cubic, radians};
    pub use glam::{Vec2, Vec3};
}
