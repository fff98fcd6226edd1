//! Ray intersection tests (AABB slab method)

use crate::bounds::Aabb;
use crate::ray::Ray;
use glam::Vec3;

/// Distance and point of a ray intersection
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub point: Vec3,
}

/// Ray-AABB intersection using the slab method
///
/// Returns the distance along the ray to the first intersection in front of
/// the origin, or None if the ray misses.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv_dir = ray.inverse_direction();

    let t1 = (aabb.min - ray.origin) * inv_dir;
    let t2 = (aabb.max - ray.origin) * inv_dir;

    // Axis-parallel rays produce inf * 0 = NaN; min/max on f32 drop NaN operands.
    let near = t1.min(t2);
    let far = t1.max(t2);
    let tmin = near.x.max(near.y).max(near.z);
    let tmax = far.x.min(far.y).min(far.z);

    if tmax < 0.0 || tmin > tmax {
        None
    } else {
        Some(if tmin < 0.0 { tmax } else { tmin })
    }
}

/// Ray-AABB intersection returning the hit point as well
pub fn ray_aabb_hit(ray: &Ray, aabb: &Aabb) -> Option<RayHit> {
    let distance = ray_aabb(ray, aabb)?;
    Some(RayHit {
        distance,
        point: ray.at(distance),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ray_aabb_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let aabb = Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, -10.0), Vec3::splat(1.0));
        let t = ray_aabb(&ray, &aabb).expect("ray should hit");
        assert_relative_eq!(t, 9.0);
    }

    #[test]
    fn test_ray_aabb_miss_and_behind() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let beside = Aabb::from_center_half_extents(Vec3::new(5.0, 0.0, -10.0), Vec3::splat(1.0));
        assert!(ray_aabb(&ray, &beside).is_none());

        let behind = Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, 10.0), Vec3::splat(1.0));
        assert!(ray_aabb(&ray, &behind).is_none());
    }

    #[test]
    fn test_ray_inside_aabb_hits_far_face() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let aabb = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(2.0));
        assert_relative_eq!(ray_aabb(&ray, &aabb).unwrap(), 2.0);
    }

    #[test]
    fn test_ray_aabb_hit_point() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z);
        let aabb = Aabb::from_center_half_extents(Vec3::new(0.0, 1.0, -6.0), Vec3::splat(0.5));
        let hit = ray_aabb_hit(&ray, &aabb).unwrap();
        assert_relative_eq!(hit.point.z, -5.5);
    }
}
