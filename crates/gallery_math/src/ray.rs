//! 3D ray used for aim queries

use glam::Vec3;

/// 3D ray for intersection testing
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Ray origin point
    pub origin: Vec3,
    /// Ray direction (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray with normalized direction
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Get a point at distance t along the ray
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Inverse direction, used by the slab test
    #[inline]
    pub fn inverse_direction(&self) -> Vec3 {
        self.direction.recip()
    }

    /// Check if the ray direction is valid (non-zero length)
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.direction.length_squared() > 1e-10
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_direction_normalized() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0));
        assert!((ray.direction.length() - 1.0).abs() < 0.001);
        assert!(ray.is_valid());
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -5.0));
        let point = ray.at(3.0);
        assert!((point.z + 3.0).abs() < 0.001);
    }

    #[test]
    fn test_zero_direction_is_invalid() {
        let ray = Ray::new(Vec3::ONE, Vec3::ZERO);
        assert!(!ray.is_valid());
    }
}
