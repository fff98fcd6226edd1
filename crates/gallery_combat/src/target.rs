//! Target entity and its per-frame animator

use gallery_layout::{MovementConfig, TargetConfig};
use gallery_math::{ease_out_cubic, Aabb, Transform, Vec3};
use serde::{Deserialize, Serialize};

/// Stable index of a target within its rack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u32);

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "target#{}", self.0)
    }
}

/// Fall-and-hide animation played once a target is eliminated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EliminationAnimation {
    pub is_animating: bool,
    /// Linear progress in [0, 1]
    pub progress: f32,
    pub elapsed: f32,
    pub duration: f32,
    pub start_rotation: Vec3,
    pub target_rotation: Vec3,
}

impl EliminationAnimation {
    /// Unarmed animation
    pub fn new(duration: f32) -> Self {
        Self {
            is_animating: false,
            progress: 0.0,
            elapsed: 0.0,
            duration,
            start_rotation: Vec3::ZERO,
            target_rotation: Vec3::ZERO,
        }
    }

    /// Start animating from `from` to `from + fall`
    pub fn arm(&mut self, from: Vec3, fall: Vec3) {
        self.is_animating = true;
        self.progress = 0.0;
        self.elapsed = 0.0;
        self.start_rotation = from;
        self.target_rotation = from + fall;
    }

    /// Advance by `delta_time`, returning the rotation for this frame.
    ///
    /// The returned flag is true on the frame the animation completes; the
    /// rotation is then exactly `target_rotation`.
    pub fn advance(&mut self, delta_time: f32) -> (Vec3, bool) {
        self.elapsed += delta_time;
        let t = if self.duration > 0.0 {
            (self.elapsed / self.duration).min(1.0)
        } else {
            1.0
        };
        self.progress = t;

        if t >= 1.0 {
            self.is_animating = false;
            return (self.target_rotation, true);
        }

        let eased = ease_out_cubic(t);
        (
            self.start_rotation.lerp(self.target_rotation, eased),
            false,
        )
    }
}

/// Oscillating movement state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetMotion {
    pub config: MovementConfig,
    pub start_position: Vec3,
    pub elapsed_time: f32,
}

impl TargetMotion {
    pub fn new(config: MovementConfig, start_position: Vec3) -> Self {
        Self {
            config,
            start_position,
            elapsed_time: 0.0,
        }
    }

    /// Advance time and return the new position
    pub fn advance(&mut self, delta_time: f32) -> Vec3 {
        self.elapsed_time += delta_time;
        self.position_at(self.elapsed_time)
    }

    /// `start + amplitude * sin(time * speed)` on the configured axes
    pub fn position_at(&self, time: f32) -> Vec3 {
        let offset = self.config.amplitude * (time * self.config.speed).sin();
        self.start_position + self.config.axis.offset(offset)
    }
}

/// A single target
#[derive(Debug, Clone)]
pub struct Target {
    id: TargetId,
    transform: Transform,
    /// Transform at layout-generation time
    home: Transform,
    hp: u32,
    max_hp: u32,
    eliminated: bool,
    visible: bool,
    elimination: EliminationAnimation,
    fall_rotation: Vec3,
    motion: Option<TargetMotion>,
}

impl Target {
    /// Create a target at a generated position
    pub fn new(id: TargetId, position: Vec3, config: &TargetConfig) -> Self {
        let home = Transform::from_position(position).with_uniform_scale(config.scale);
        let hp = config.hp.max(1);
        Self {
            id,
            transform: home,
            home,
            hp,
            max_hp: hp,
            eliminated: false,
            visible: true,
            elimination: EliminationAnimation::new(config.elimination.duration),
            fall_rotation: config.elimination.fall_rotation,
            motion: config
                .effective_movement()
                .map(|movement| TargetMotion::new(movement, position)),
        }
    }

    /// Apply one hit.
    ///
    /// Returns true only on the hit that eliminates the target. Hitting a
    /// target that is already eliminated is a no-op.
    pub fn apply_hit(&mut self) -> bool {
        if self.eliminated || self.hp == 0 {
            return false;
        }

        self.hp -= 1;
        if self.hp > 0 {
            return false;
        }

        self.eliminated = true;
        self.elimination.arm(self.transform.rotation, self.fall_rotation);
        log::debug!("{} eliminated", self.id);
        true
    }

    /// Advance movement and the elimination animation.
    ///
    /// Returns true on the frame the target becomes hidden.
    pub fn update(&mut self, delta_time: f32) -> bool {
        if !self.eliminated {
            if let Some(motion) = self.motion.as_mut() {
                self.transform.position = motion.advance(delta_time);
            }
            return false;
        }

        if !self.elimination.is_animating {
            return false;
        }

        let (rotation, finished) = self.elimination.advance(delta_time);
        self.transform.rotation = rotation;
        if finished {
            self.visible = false;
        }
        finished
    }

    /// Restore health, visibility, animation and position to spawn values
    pub fn reset(&mut self) {
        self.transform = self.home;
        self.hp = self.max_hp;
        self.eliminated = false;
        self.visible = true;
        self.elimination = EliminationAnimation::new(self.elimination.duration);
        if let Some(motion) = self.motion.as_mut() {
            motion.elapsed_time = 0.0;
        }
    }

    /// World-space hit box for an unscaled model half extent
    pub fn hit_bounds(&self, half_extents: Vec3) -> Aabb {
        Aabb::from_center_half_extents(self.transform.position, half_extents * self.transform.scale)
    }

    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn home(&self) -> &Transform {
        &self.home
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn elimination(&self) -> &EliminationAnimation {
        &self.elimination
    }

    pub fn motion(&self) -> Option<&TargetMotion> {
        self.motion.as_ref()
    }
}
