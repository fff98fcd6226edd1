//! Gallery Combat - Targets, Hits and the Weapon
//!
//! # Features
//!
//! - Target entity with integer health and a one-way elimination latch
//! - Time-based fall-and-hide elimination animation with cubic ease-out
//! - Oscillating target movement
//! - Nearest-hit ray resolution against visible targets
//! - Deploy / Idle / Fire / Reload weapon state machine driven by clip time
//!
//! # Example
//!
//! ```ignore
//! use gallery_combat::prelude::*;
//!
//! let mut rack = TargetRack::new(Vec3::new(0.5, 0.5, 0.1));
//! rack.spawn(&config, &positions);
//!
//! let mut weapon = Weapon::new(WeaponClips::default(), 8);
//! if weapon.try_fire() {
//!     if let Some(outcome) = rack.resolve_shot(&aim_ray) {
//!         // outcome.eliminated is true exactly once per target
//!     }
//! }
//! ```

pub mod hit;
pub mod rack;
pub mod target;
pub mod weapon;

pub mod prelude {
    pub use crate::hit::{raycast_targets, HitResult, ShotOutcome};
    pub use crate::rack::TargetRack;
    pub use crate::target::{EliminationAnimation, Target, TargetId, TargetMotion};
    pub use crate::weapon::{
        ClipRange, Weapon, WeaponAction, WeaponClips, WeaponSnapshot, WeaponTransition,
    };
    pub use gallery_math::{Ray, Vec3};
}

pub use prelude::*;
