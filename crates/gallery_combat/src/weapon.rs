//! Weapon state machine
//!
//! The weapon cycles `Deploy -> Idle <-> Fire -> (Idle | Reload) -> Idle`.
//! Transitions only happen when the current clip finishes playing; callers
//! drive time through [`Weapon::update`] and request shots through
//! [`Weapon::try_fire`].

use serde::{Deserialize, Serialize};

/// Action the weapon is currently playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponAction {
    Deploy,
    Idle,
    Fire,
    Reload,
}

impl WeaponAction {
    /// Idle loops; every other action plays once and holds its last frame
    pub fn is_looping(self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl std::fmt::Display for WeaponAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Deploy => "deploy",
            Self::Idle => "idle",
            Self::Fire => "fire",
            Self::Reload => "reload",
        };
        f.write_str(name)
    }
}

/// Inclusive frame bounds of a sub-clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipRange {
    pub start_frame: u32,
    pub end_frame: u32,
}

impl ClipRange {
    pub const fn new(start_frame: u32, end_frame: u32) -> Self {
        Self {
            start_frame,
            end_frame,
        }
    }

    /// Number of frames between start and end
    pub fn frame_span(&self) -> u32 {
        self.end_frame.saturating_sub(self.start_frame)
    }
}

/// Sub-clip table for the weapon's single animation track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponClips {
    /// Frames per second shared by every sub-clip
    pub frame_rate: f32,
    pub deploy: ClipRange,
    pub idle: ClipRange,
    pub fire: ClipRange,
    pub reload: ClipRange,
}

impl Default for WeaponClips {
    fn default() -> Self {
        Self {
            frame_rate: 30.0,
            deploy: ClipRange::new(0, 20),
            idle: ClipRange::new(21, 80),
            fire: ClipRange::new(81, 90),
            reload: ClipRange::new(91, 150),
        }
    }
}

impl WeaponClips {
    /// Frame bounds for an action
    pub fn clip(&self, action: WeaponAction) -> ClipRange {
        match action {
            WeaponAction::Deploy => self.deploy,
            WeaponAction::Idle => self.idle,
            WeaponAction::Fire => self.fire,
            WeaponAction::Reload => self.reload,
        }
    }

    /// Playback length of an action in seconds
    pub fn duration(&self, action: WeaponAction) -> f32 {
        if self.frame_rate <= 0.0 {
            return 0.0;
        }
        self.clip(action).frame_span() as f32 / self.frame_rate
    }
}

/// What happens when a one-shot action finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponTransition {
    pub next: WeaponAction,
    pub can_fire: bool,
    /// Refill the magazine to capacity
    pub refill: bool,
}

impl WeaponTransition {
    /// Transition taken when `finished` completes with `mag_ammo` rounds left.
    ///
    /// Looping actions never finish and yield `None`.
    pub fn after(finished: WeaponAction, mag_ammo: u32) -> Option<Self> {
        let transition = match finished {
            WeaponAction::Idle => return None,
            WeaponAction::Deploy => Self {
                next: WeaponAction::Idle,
                can_fire: true,
                refill: false,
            },
            WeaponAction::Fire if mag_ammo > 0 => Self {
                next: WeaponAction::Idle,
                can_fire: true,
                refill: false,
            },
            WeaponAction::Fire => Self {
                next: WeaponAction::Reload,
                can_fire: false,
                refill: false,
            },
            WeaponAction::Reload => Self {
                next: WeaponAction::Idle,
                can_fire: true,
                refill: true,
            },
        };
        Some(transition)
    }
}

/// Ammo captured when the weapon first becomes ready
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponSnapshot {
    pub mag_ammo: u32,
}

/// Player weapon
#[derive(Debug, Clone)]
pub struct Weapon {
    clips: WeaponClips,
    max_ammo: u32,
    mag_ammo: u32,
    can_fire: bool,
    enabled: bool,
    current: WeaponAction,
    clip_time: f32,
}

impl Weapon {
    /// Create a weapon with a full magazine, starting its deploy clip
    pub fn new(clips: WeaponClips, max_ammo: u32) -> Self {
        Self {
            clips,
            max_ammo,
            mag_ammo: max_ammo,
            can_fire: false,
            enabled: true,
            current: WeaponAction::Deploy,
            clip_time: 0.0,
        }
    }

    /// Restart the deploy clip from its first frame
    pub fn deploy(&mut self) {
        self.can_fire = false;
        self.current = WeaponAction::Deploy;
        self.clip_time = 0.0;
    }

    /// Start playing an action.
    ///
    /// Requesting the action that is already playing and not yet finished
    /// does nothing and returns false.
    pub fn play(&mut self, action: WeaponAction) -> bool {
        if action == self.current && !self.is_finished() {
            return false;
        }
        self.current = action;
        self.clip_time = 0.0;
        true
    }

    /// Fire one round if the weapon is ready.
    ///
    /// Consumes a round, blocks further shots until the fire clip completes
    /// and starts the fire clip. Returns false with no state change otherwise.
    pub fn try_fire(&mut self) -> bool {
        if !self.enabled || !self.is_ready() {
            return false;
        }

        self.mag_ammo -= 1;
        self.can_fire = false;
        self.play(WeaponAction::Fire);
        true
    }

    /// Advance the current clip.
    ///
    /// Returns the action that finished this frame, after the follow-up action
    /// has started. At most one transition happens per call.
    pub fn update(&mut self, delta_time: f32) -> Option<WeaponAction> {
        let duration = self.clips.duration(self.current);
        self.clip_time += delta_time.max(0.0);

        if self.current.is_looping() {
            if duration > 0.0 {
                self.clip_time %= duration;
            } else {
                self.clip_time = 0.0;
            }
            return None;
        }

        if self.clip_time < duration {
            return None;
        }

        // Hold the last frame until the next action starts
        self.clip_time = duration;
        let finished = self.current;
        let transition = WeaponTransition::after(finished, self.mag_ammo)?;

        if transition.refill {
            self.mag_ammo = self.max_ammo;
        }
        self.can_fire = transition.can_fire;
        self.play(transition.next);

        log::trace!(
            "weapon {} -> {} (ammo {}/{})",
            finished,
            transition.next,
            self.mag_ammo,
            self.max_ammo
        );
        Some(finished)
    }

    /// Allow or block firing regardless of animation state
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// `can_fire && mag_ammo > 0`
    pub fn is_ready(&self) -> bool {
        self.can_fire && self.mag_ammo > 0
    }

    pub fn can_fire(&self) -> bool {
        self.can_fire
    }

    pub fn mag_ammo(&self) -> u32 {
        self.mag_ammo
    }

    pub fn max_ammo(&self) -> u32 {
        self.max_ammo
    }

    pub fn current_action(&self) -> WeaponAction {
        self.current
    }

    pub fn clips(&self) -> &WeaponClips {
        &self.clips
    }

    /// Seconds into the current clip
    pub fn clip_time(&self) -> f32 {
        self.clip_time
    }

    /// Whether a one-shot clip has reached its final frame
    pub fn is_finished(&self) -> bool {
        !self.current.is_looping() && self.clip_time >= self.clips.duration(self.current)
    }

    /// Absolute frame index in the animation track
    pub fn current_frame(&self) -> u32 {
        let clip = self.clips.clip(self.current);
        let offset = (self.clip_time * self.clips.frame_rate).floor().max(0.0) as u32;
        (clip.start_frame + offset).min(clip.end_frame)
    }

    pub fn snapshot(&self) -> WeaponSnapshot {
        WeaponSnapshot {
            mag_ammo: self.mag_ammo,
        }
    }

    /// Restore ammo from a snapshot, re-enable and restart the deploy clip
    pub fn restore(&mut self, snapshot: WeaponSnapshot) {
        self.mag_ammo = snapshot.mag_ammo.min(self.max_ammo);
        self.enabled = true;
        self.deploy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// 10 fps: deploy 0.5s, idle 1s, fire 0.2s, reload 1s
    fn clips() -> WeaponClips {
        WeaponClips {
            frame_rate: 10.0,
            deploy: ClipRange::new(0, 5),
            idle: ClipRange::new(5, 15),
            fire: ClipRange::new(15, 17),
            reload: ClipRange::new(17, 27),
        }
    }

    fn ready_weapon(max_ammo: u32) -> Weapon {
        let mut weapon = Weapon::new(clips(), max_ammo);
        assert_eq!(weapon.update(0.6), Some(WeaponAction::Deploy));
        weapon
    }

    #[test]
    fn test_deploy_then_idle() {
        let mut weapon = Weapon::new(clips(), 3);
        assert_eq!(weapon.current_action(), WeaponAction::Deploy);
        assert!(!weapon.try_fire());
        assert_eq!(weapon.mag_ammo(), 3);

        assert_eq!(weapon.update(0.25), None);
        assert!(!weapon.is_ready());

        assert_eq!(weapon.update(0.25), Some(WeaponAction::Deploy));
        assert_eq!(weapon.current_action(), WeaponAction::Idle);
        assert!(weapon.is_ready());
    }

    #[test]
    fn test_fire_cycle_returns_to_idle() {
        let mut weapon = ready_weapon(3);

        assert!(weapon.try_fire());
        assert_eq!(weapon.mag_ammo(), 2);
        assert_eq!(weapon.current_action(), WeaponAction::Fire);

        // Rapid double fire is ignored
        assert!(!weapon.try_fire());
        assert_eq!(weapon.mag_ammo(), 2);

        assert_eq!(weapon.update(0.25), Some(WeaponAction::Fire));
        assert_eq!(weapon.current_action(), WeaponAction::Idle);
        assert!(weapon.is_ready());
    }

    #[test]
    fn test_empty_magazine_reloads() {
        let mut weapon = ready_weapon(1);

        assert!(weapon.try_fire());
        assert_eq!(weapon.mag_ammo(), 0);
        assert_eq!(weapon.update(0.25), Some(WeaponAction::Fire));
        assert_eq!(weapon.current_action(), WeaponAction::Reload);
        assert!(!weapon.can_fire());
        assert!(!weapon.try_fire());
        assert_eq!(weapon.mag_ammo(), 0);

        assert_eq!(weapon.update(0.5), None);
        assert_eq!(weapon.update(0.6), Some(WeaponAction::Reload));
        assert_eq!(weapon.current_action(), WeaponAction::Idle);
        assert_eq!(weapon.mag_ammo(), 1);
        assert!(weapon.is_ready());
    }

    #[test]
    fn test_single_transition_per_update() {
        let mut weapon = ready_weapon(1);
        weapon.try_fire();

        // Long enough to finish both fire and reload, but only fire completes
        assert_eq!(weapon.update(5.0), Some(WeaponAction::Fire));
        assert_eq!(weapon.current_action(), WeaponAction::Reload);
        assert_eq!(weapon.mag_ammo(), 0);
    }

    #[test]
    fn test_play_same_action_is_noop() {
        let mut weapon = Weapon::new(clips(), 3);
        weapon.update(0.3);
        assert!(!weapon.play(WeaponAction::Deploy));
        assert_relative_eq!(weapon.clip_time(), 0.3);

        assert!(weapon.play(WeaponAction::Reload));
        assert_relative_eq!(weapon.clip_time(), 0.0);
    }

    #[test]
    fn test_idle_loops() {
        let mut weapon = ready_weapon(3);
        for _ in 0..30 {
            assert_eq!(weapon.update(0.1), None);
        }
        assert_eq!(weapon.current_action(), WeaponAction::Idle);
        assert!(weapon.clip_time() < 1.0);
    }

    #[test]
    fn test_disabled_weapon_rejects_fire() {
        let mut weapon = ready_weapon(3);
        weapon.set_enabled(false);
        assert!(!weapon.try_fire());
        assert_eq!(weapon.mag_ammo(), 3);
        assert_eq!(weapon.current_action(), WeaponAction::Idle);
    }

    #[test]
    fn test_restore_restarts_deploy() {
        let mut weapon = ready_weapon(4);
        let snapshot = weapon.snapshot();

        weapon.try_fire();
        weapon.update(0.25);
        weapon.try_fire();
        weapon.set_enabled(false);
        assert_eq!(weapon.mag_ammo(), 2);

        weapon.restore(snapshot);
        assert_eq!(weapon.mag_ammo(), 4);
        assert!(weapon.is_enabled());
        assert_eq!(weapon.current_action(), WeaponAction::Deploy);
        assert!(!weapon.is_ready());
    }

    #[test]
    fn test_current_frame_clamps() {
        let mut weapon = Weapon::new(clips(), 1);
        assert_eq!(weapon.current_frame(), 0);
        weapon.update(0.25);
        assert_eq!(weapon.current_frame(), 2);
    }

    #[test]
    fn test_transition_table() {
        assert_eq!(WeaponTransition::after(WeaponAction::Idle, 3), None);
        assert_eq!(
            WeaponTransition::after(WeaponAction::Fire, 0).map(|t| t.next),
            Some(WeaponAction::Reload)
        );
        let reload = WeaponTransition::after(WeaponAction::Reload, 0);
        assert!(reload.map_or(false, |t| t.refill && t.can_fire));
    }

    #[test]
    fn test_default_clip_durations() {
        let clips = WeaponClips::default();
        assert_relative_eq!(clips.duration(WeaponAction::Fire), 9.0 / 30.0);
        assert!(clips.duration(WeaponAction::Reload) > clips.duration(WeaponAction::Fire));
    }
}
