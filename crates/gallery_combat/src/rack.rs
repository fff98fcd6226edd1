//! Owned collection of live targets

use gallery_layout::TargetConfig;
use gallery_math::{Ray, Vec3};

use crate::hit::{raycast_targets, HitResult, ShotOutcome};
use crate::target::{Target, TargetId};

/// Every target of the current arrangement, indexed by [`TargetId`]
#[derive(Debug, Clone)]
pub struct TargetRack {
    targets: Vec<Target>,
    /// Unscaled model half extents used for hit boxes
    hitbox_half_extents: Vec3,
}

impl TargetRack {
    pub fn new(hitbox_half_extents: Vec3) -> Self {
        Self {
            targets: Vec::new(),
            hitbox_half_extents,
        }
    }

    /// Replace every target with one per generated position
    pub fn spawn(&mut self, config: &TargetConfig, positions: &[Vec3]) {
        self.targets = positions
            .iter()
            .enumerate()
            .map(|(index, &position)| Target::new(TargetId(index as u32), position, config))
            .collect();

        log::debug!(
            "target rack rebuilt: {} x '{}' (hp {})",
            self.targets.len(),
            config.name,
            config.hp
        );
    }

    /// Advance every target, returning the ids hidden this frame
    pub fn update(&mut self, delta_time: f32) -> Vec<TargetId> {
        self.targets
            .iter_mut()
            .filter_map(|target| target.update(delta_time).then(|| target.id()))
            .collect()
    }

    /// Put every target back to its spawn state
    pub fn reset_all(&mut self) {
        for target in &mut self.targets {
            target.reset();
        }
    }

    /// Nearest visible target along the ray
    pub fn raycast(&self, ray: &Ray) -> Option<HitResult> {
        raycast_targets(ray, &self.targets, self.hitbox_half_extents)
    }

    /// Raycast and apply one hit to the struck target
    pub fn resolve_shot(&mut self, ray: &Ray) -> Option<ShotOutcome> {
        let hit = self.raycast(ray)?;
        let target = self.targets.get_mut(hit.target.0 as usize)?;
        let eliminated = target.apply_hit();
        Some(ShotOutcome { hit, eliminated })
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.get(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Targets not yet eliminated
    pub fn live_count(&self) -> usize {
        self.targets.iter().filter(|t| !t.is_eliminated()).count()
    }

    pub fn eliminated_count(&self) -> usize {
        self.targets.iter().filter(|t| t.is_eliminated()).count()
    }

    pub fn visible_count(&self) -> usize {
        self.targets.iter().filter(|t| t.is_visible()).count()
    }

    pub fn hitbox_half_extents(&self) -> Vec3 {
        self.hitbox_half_extents
    }
}
