//! First-person camera derived from player yaw, pitch and position

use gallery_math::{Ray, Transform, Vec3};
use serde::{Deserialize, Serialize};

/// Camera pose handed to the renderer and used for aiming.
///
/// Yaw 0 looks down -Z; positive yaw turns right (towards +X) and positive
/// pitch looks up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraTransform {
    /// Eye position
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraTransform {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
        }
    }

    /// Unit view direction
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    /// View direction projected on the ground plane
    pub fn flat_forward(&self) -> Vec3 {
        flat_forward(self.yaw)
    }

    /// Ground-plane right vector
    pub fn right(&self) -> Vec3 {
        right(self.yaw)
    }

    /// Ray from the eye along the view direction
    pub fn aim_ray(&self) -> Ray {
        Ray::new(self.position, self.forward())
    }

    /// Euler transform (pitch about X, yaw about Y)
    pub fn transform(&self) -> Transform {
        Transform::from_position(self.position).with_rotation(Vec3::new(self.pitch, -self.yaw, 0.0))
    }
}

pub(crate) fn flat_forward(yaw: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    Vec3::new(sin_yaw, 0.0, -cos_yaw)
}

pub(crate) fn right(yaw: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    Vec3::new(cos_yaw, 0.0, sin_yaw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use gallery_math::consts;

    #[test]
    fn test_forward_at_rest() {
        let camera = CameraTransform::new(Vec3::new(0.0, 1.0, 0.0), 0.0, 0.0);
        assert_relative_eq!(camera.forward().z, -1.0);
        assert_relative_eq!(camera.right().x, 1.0);

        let ray = camera.aim_ray();
        assert_eq!(ray.origin, Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(ray.direction.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_yaw_turns_right() {
        let camera = CameraTransform::new(Vec3::ZERO, consts::FRAC_PI_2, 0.0);
        let forward = camera.forward();
        assert_relative_eq!(forward.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(forward.z, 0.0, epsilon = 1e-6);
        assert_relative_eq!(camera.right().z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_pitch_up() {
        let camera = CameraTransform::new(Vec3::ZERO, 0.0, 0.5);
        assert_relative_eq!(camera.forward().y, 0.5_f32.sin(), epsilon = 1e-6);
        assert_relative_eq!(camera.flat_forward().y, 0.0);
        assert_relative_eq!(camera.forward().length(), 1.0, epsilon = 1e-6);
    }
}
