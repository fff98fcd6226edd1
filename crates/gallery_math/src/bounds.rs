//! Bounding volumes: boxes for hit geometry, rectangles for movement limits

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create from center and half-extents
    #[inline]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }
}

/// Axis-aligned rectangle on the ground (XZ) plane
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Rect {
    pub const fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// Min <= max on both axes
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_z <= self.max_z
    }

    /// Clamp a ground-plane point (x, z) into the rectangle
    #[inline]
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.min_x, self.max_x),
            point.y.clamp(self.min_z, self.max_z),
        )
    }

    /// Clamp the x/z components of a world position, leaving y untouched
    pub fn clamp_position(&self, position: Vec3) -> Vec3 {
        let clamped = self.clamp(Vec2::new(position.x, position.z));
        Vec3::new(clamped.x, position.y, clamped.y)
    }

    #[inline]
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_center() {
        let aabb = Aabb::from_center_half_extents(Vec3::new(1.0, 2.0, 3.0), Vec3::splat(0.5));
        assert_eq!(aabb.min, Vec3::new(0.5, 1.5, 2.5));
        assert_eq!(aabb.max, Vec3::new(1.5, 2.5, 3.5));
    }

    #[test]
    fn test_rect_clamp_position() {
        let rect = Rect::new(-5.0, 5.0, -2.0, 8.0);
        let clamped = rect.clamp_position(Vec3::new(10.0, 1.6, -7.0));
        assert_eq!(clamped, Vec3::new(5.0, 1.6, -2.0));
        assert!(rect.contains(0.0, 0.0));
        assert!(!rect.contains(0.0, 9.0));
    }

    #[test]
    fn test_rect_validity() {
        assert!(Rect::new(0.0, 0.0, 0.0, 0.0).is_valid());
        assert!(!Rect::new(1.0, 0.0, 0.0, 1.0).is_valid());
    }
}
