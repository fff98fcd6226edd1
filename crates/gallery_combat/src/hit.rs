//! Ray-based hit resolution

use gallery_math::{ray_aabb_hit, Ray, Vec3};
use serde::{Deserialize, Serialize};

use crate::target::{Target, TargetId};

/// Nearest intersection of an aim ray with a visible target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitResult {
    pub target: TargetId,
    pub distance: f32,
    pub point: Vec3,
}

/// Result of applying a hit to the struck target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotOutcome {
    pub hit: HitResult,
    /// True only for the hit that took the target's last point of health
    pub eliminated: bool,
}

/// Cast `ray` against every visible target and return the nearest hit.
///
/// Hidden targets are skipped. Equal distances resolve to the target that
/// comes first in iteration order.
pub fn raycast_targets<'a, I>(ray: &Ray, targets: I, half_extents: Vec3) -> Option<HitResult>
where
    I: IntoIterator<Item = &'a Target>,
{
    if !ray.is_valid() {
        return None;
    }

    let mut nearest: Option<HitResult> = None;
    for target in targets {
        if !target.is_visible() {
            continue;
        }

        let Some(hit) = ray_aabb_hit(ray, &target.hit_bounds(half_extents)) else {
            continue;
        };

        if nearest.map_or(true, |best| hit.distance < best.distance) {
            nearest = Some(HitResult {
                target: target.id(),
                distance: hit.distance,
                point: hit.point,
            });
        }
    }
    nearest
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use gallery_layout::{Layout, TargetConfig};

    const HALF: Vec3 = Vec3::new(0.5, 0.5, 0.1);

    fn target(id: u32, position: Vec3) -> Target {
        let config = TargetConfig::new(
            "hit",
            Layout::Linear {
                count: 1,
                base_position: Vec3::ZERO,
                spacing: 1.0,
            },
        );
        Target::new(TargetId(id), position, &config)
    }

    fn forward() -> Ray {
        Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z)
    }

    #[test]
    fn test_nearest_target_wins() {
        let targets = vec![
            target(0, Vec3::new(0.0, 1.0, -10.0)),
            target(1, Vec3::new(0.0, 1.0, -5.0)),
            target(2, Vec3::new(3.0, 1.0, -2.0)),
        ];

        let hit = raycast_targets(&forward(), &targets, HALF);
        let hit = hit.map(|h| (h.target, h.distance));
        assert_eq!(hit.map(|h| h.0), Some(TargetId(1)));
        assert_relative_eq!(hit.map_or(0.0, |h| h.1), 4.9, epsilon = 1e-5);
    }

    #[test]
    fn test_hidden_targets_are_skipped() {
        let mut near = target(0, Vec3::new(0.0, 1.0, -3.0));
        near.apply_hit();
        near.update(10.0);
        assert!(!near.is_visible());

        let targets = vec![near, target(1, Vec3::new(0.0, 1.0, -8.0))];
        let hit = raycast_targets(&forward(), &targets, HALF);
        assert_eq!(hit.map(|h| h.target), Some(TargetId(1)));
    }

    #[test]
    fn test_eliminated_but_visible_still_blocks() {
        let mut near = target(0, Vec3::new(0.0, 1.0, -3.0));
        near.apply_hit();

        let targets = vec![near, target(1, Vec3::new(0.0, 1.0, -8.0))];
        let hit = raycast_targets(&forward(), &targets, HALF);
        assert_eq!(hit.map(|h| h.target), Some(TargetId(0)));
    }

    #[test]
    fn test_miss_and_degenerate_ray() {
        let targets = vec![target(0, Vec3::new(5.0, 1.0, -5.0))];
        assert!(raycast_targets(&forward(), &targets, HALF).is_none());

        let degenerate = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert!(raycast_targets(&degenerate, &targets, HALF).is_none());
    }

    #[test]
    fn test_target_behind_origin_is_missed() {
        let targets = vec![target(0, Vec3::new(0.0, 1.0, 5.0))];
        assert!(raycast_targets(&forward(), &targets, HALF).is_none());
    }

    #[test]
    fn test_equal_distance_prefers_first() {
        let targets = vec![
            target(3, Vec3::new(-0.25, 1.0, -4.0)),
            target(7, Vec3::new(0.25, 1.0, -4.0)),
        ];
        let hit = raycast_targets(&forward(), &targets, HALF);
        assert_eq!(hit.map(|h| h.target), Some(TargetId(3)));
    }
}
