//! Frame orchestrator
//!
//! [`Session`] owns the target rack, the weapon and the session state. Each
//! call to [`Session::frame`] runs one fixed-order tick, after applying any
//! queued play-again request:
//!
//! 1. advance the weapon clip
//! 2. advance target elimination and movement
//! 3. render
//! 4. run due timers (game-over overlay)
//! 5. integrate rotation, then position (skipped after game over)
//! 6. fire and resolve the shot (skipped after game over)
//! 7. deliver queued notifications

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gallery_combat::{HitResult, TargetId, TargetRack, Weapon, WeaponAction};
use gallery_event::{EventBus, Priority, SubscriberId};
use gallery_layout::{generate_seeded, presets, TargetConfig};
use gallery_math::{consts, Vec2, Vec3};

use crate::assets::AssetLibrary;
use crate::camera::{self, CameraTransform};
use crate::collaborators::{FrameInput, InputSource, Renderer, SceneView};
use crate::config::SessionConfig;
use crate::error::Result;
use crate::events::{
    AmmoChanged, GameOver, GameOverOverlay, HitMarker, KillCountChanged, PlayAgainRequested,
    ShotFired, TargetConfigChanged,
};
use crate::scheduler::Scheduler;
use crate::snapshot::{SessionSnapshot, TargetSnapshot};
use crate::state::{kill_target, DeploySnapshot, GamePhase, SessionState};

/// What happened during one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    /// Delta after clamping
    pub delta_time: f32,
    pub phase: GamePhase,
    pub kill_count: u32,
    /// A play-again reset ran at the start of this frame
    pub reset: bool,
    /// A round was fired
    pub shot: bool,
    pub hit: Option<HitResult>,
    /// Target eliminated by this frame's shot
    pub eliminated: Option<TargetId>,
    /// Targets whose elimination animation finished this frame
    pub hidden: Vec<TargetId>,
    /// The win condition was met this frame
    pub game_over: bool,
    /// Notifications delivered at the end of the frame
    pub events_delivered: usize,
}

impl FrameReport {
    fn new(frame: u64, delta_time: f32) -> Self {
        Self {
            frame,
            delta_time,
            phase: GamePhase::Playing,
            kill_count: 0,
            reset: false,
            shot: false,
            hit: None,
            eliminated: None,
            hidden: Vec::new(),
            game_over: false,
            events_delivered: 0,
        }
    }
}

/// One shooting-gallery session
pub struct Session {
    config: SessionConfig,
    target_config: TargetConfig,
    bus: Arc<EventBus>,
    rack: TargetRack,
    weapon: Weapon,
    state: SessionState,
    scheduler: Scheduler,
    /// Construction-time pose, used if play-again arrives before deploy completes
    initial: DeploySnapshot,
    deploy_snapshot: Option<DeploySnapshot>,
    play_again_requested: Arc<AtomicBool>,
    play_again_subscription: SubscriberId,
    frame: u64,
}

impl Session {
    /// Build a session for `target_config`.
    ///
    /// Fails if either config is invalid or a named model is not in `assets`.
    pub fn new(
        config: SessionConfig,
        target_config: TargetConfig,
        assets: &AssetLibrary,
        bus: Arc<EventBus>,
    ) -> Result<Self> {
        config.validate()?;
        target_config.validate()?;
        let weapon_model = assets.weapon(&config.weapon_asset)?;
        let target_model = assets.target(&config.target_asset)?;

        let mut rack = TargetRack::new(target_model.half_extents);
        rack.spawn(&target_config, &generate_seeded(&target_config, config.seed));
        let weapon = Weapon::new(weapon_model.clips, weapon_model.max_ammo);

        let position = config.movement_bounds.clamp_position(config.spawn_position);
        let state = SessionState::new(
            position,
            config.initial_yaw,
            config.initial_pitch,
            kill_target(rack.len(), config.kill_count_to_win),
        );
        let initial = DeploySnapshot {
            position,
            yaw: config.initial_yaw,
            pitch: config.initial_pitch,
            weapon: weapon.snapshot(),
        };

        let play_again_requested = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&play_again_requested);
        let play_again_subscription = bus.subscribe_with_priority::<PlayAgainRequested, _>(
            move |_| flag.store(true, Ordering::SeqCst),
            Priority::FIRST,
        );

        let session = Self {
            config,
            target_config,
            bus,
            rack,
            weapon,
            state,
            scheduler: Scheduler::new(),
            initial,
            deploy_snapshot: None,
            play_again_requested,
            play_again_subscription,
            frame: 0,
        };

        log::info!(
            "session started: '{}' with {} targets, win at {} kills",
            session.target_config.name,
            session.rack.len(),
            session.state.kill_target
        );
        session.publish_config_changed();
        session.publish_kill_count();
        session.publish_ammo();
        Ok(session)
    }

    /// Build a session for the preset named in `config`
    pub fn from_config(config: SessionConfig, assets: &AssetLibrary, bus: Arc<EventBus>) -> Result<Self> {
        let target_config = config.target_config();
        Self::new(config, target_config, assets, bus)
    }

    /// Poll `input` and run one frame
    pub fn step(
        &mut self,
        delta_time: f32,
        input: &mut dyn InputSource,
        renderer: &mut dyn Renderer,
    ) -> FrameReport {
        let frame_input = input.poll(&self.scene(), delta_time);
        self.frame(delta_time, &frame_input, renderer)
    }

    /// Run one frame
    pub fn frame(
        &mut self,
        delta_time: f32,
        input: &FrameInput,
        renderer: &mut dyn Renderer,
    ) -> FrameReport {
        let delta_time = if delta_time.is_finite() {
            delta_time.clamp(0.0, self.config.max_delta)
        } else {
            0.0
        };
        self.frame += 1;
        let mut report = FrameReport::new(self.frame, delta_time);

        // Requests queued since the last frame apply before any input
        self.bus.process_type::<PlayAgainRequested>();
        if self.play_again_requested.swap(false, Ordering::SeqCst) {
            self.play_again();
            report.reset = true;
        }

        self.update_weapon(delta_time);
        report.hidden = self.rack.update(delta_time);

        let camera = self.camera();
        renderer.render(&self.scene(), &camera);

        self.scheduler.advance(delta_time, &self.bus);

        if self.state.phase.accepts_gameplay_input() {
            let input = input.sanitized();
            self.integrate_rotation(input.rotation, delta_time);
            self.integrate_position(input.movement, delta_time);
            if input.fire {
                self.fire(&mut report);
            }
        }

        report.phase = self.state.phase;
        report.kill_count = self.state.kill_count;
        report.events_delivered = self.bus.process();
        report
    }

    /// Reset to the pose and ammo recorded after the first deploy.
    ///
    /// Kill count and shot statistics go to zero, every target returns to
    /// its spawn state and the weapon redeploys.
    pub fn play_again(&mut self) {
        self.play_again_requested.store(false, Ordering::SeqCst);
        let snapshot = self.deploy_snapshot.unwrap_or(self.initial);

        self.state.restore(&snapshot);
        self.rack.reset_all();
        self.weapon.restore(snapshot.weapon);
        self.scheduler.clear();

        log::info!("play again: {} targets reset", self.rack.len());
        self.publish_kill_count();
        self.publish_ammo();
    }

    /// Replace every target with a freshly generated arrangement.
    ///
    /// Starts a new round: counters reset and firing is re-enabled. The player
    /// keeps their current pose.
    pub fn reconfigure(&mut self, target_config: TargetConfig) -> Result<()> {
        target_config.validate()?;

        let positions = generate_seeded(&target_config, self.config.seed);
        self.rack.spawn(&target_config, &positions);
        self.target_config = target_config;

        self.state.reset_round();
        self.state.kill_target = kill_target(self.rack.len(), self.config.kill_count_to_win);
        self.weapon.set_enabled(true);
        self.scheduler.clear();

        log::info!(
            "reconfigured to '{}': {} targets, win at {} kills",
            self.target_config.name,
            self.rack.len(),
            self.state.kill_target
        );
        self.publish_config_changed();
        self.publish_kill_count();
        Ok(())
    }

    /// Reconfigure from a preset name; unknown names use the default preset
    pub fn reconfigure_preset(&mut self, name: &str) -> Result<()> {
        self.reconfigure(presets::preset(name))
    }

    fn update_weapon(&mut self, delta_time: f32) {
        match self.weapon.update(delta_time) {
            Some(WeaponAction::Deploy) if self.deploy_snapshot.is_none() => {
                self.deploy_snapshot = Some(DeploySnapshot {
                    position: self.state.position,
                    yaw: self.state.yaw,
                    pitch: self.state.pitch,
                    weapon: self.weapon.snapshot(),
                });
                log::debug!("deploy snapshot recorded at frame {}", self.frame);
            }
            Some(WeaponAction::Reload) => self.publish_ammo(),
            _ => {}
        }
    }

    fn integrate_rotation(&mut self, rotation: Vec2, delta_time: f32) {
        let step = self.config.rotation_speed * delta_time;
        let max_pitch = self.config.max_pitch;

        self.state.yaw = wrap_angle(self.state.yaw + rotation.x * step);
        self.state.pitch = (self.state.pitch + rotation.y * step).clamp(-max_pitch, max_pitch);
    }

    fn integrate_position(&mut self, movement: Vec2, delta_time: f32) {
        if movement == Vec2::ZERO {
            return;
        }
        let yaw = self.state.yaw;
        let direction = camera::right(yaw) * movement.x + camera::flat_forward(yaw) * movement.y;
        let next = self.state.position + direction * (self.config.move_speed * delta_time);
        self.state.position = self.config.movement_bounds.clamp_position(next);
    }

    fn fire(&mut self, report: &mut FrameReport) {
        if !self.weapon.try_fire() {
            return;
        }
        report.shot = true;
        self.state.shots_fired += 1;
        self.publish_ammo();

        let ray = self.camera().aim_ray();
        let outcome = self.rack.resolve_shot(&ray);
        self.bus.publish(ShotFired {
            hit: outcome.is_some(),
        });
        let Some(outcome) = outcome else {
            return;
        };

        report.hit = Some(outcome.hit);
        self.state.hits += 1;
        self.bus.publish(HitMarker {
            target: outcome.hit.target,
            eliminated: outcome.eliminated,
        });

        if !outcome.eliminated {
            return;
        }
        report.eliminated = Some(outcome.hit.target);
        self.state.kill_count += 1;
        self.publish_kill_count();

        if self.state.win_reached() {
            self.enter_game_over();
            report.game_over = true;
        }
    }

    fn enter_game_over(&mut self) {
        self.state.phase = GamePhase::GameOver;
        self.weapon.set_enabled(false);

        log::info!(
            "game over: {} kills, {}/{} shots hit",
            self.state.kill_count,
            self.state.hits,
            self.state.shots_fired
        );
        self.bus.publish(GameOver {
            kill_count: self.state.kill_count,
            shots_fired: self.state.shots_fired,
            hits: self.state.hits,
        });
        self.scheduler.schedule_event(
            self.config.game_over_delay,
            GameOverOverlay {
                kill_count: self.state.kill_count,
            },
        );
    }

    fn publish_kill_count(&self) {
        self.bus.publish(KillCountChanged {
            kill_count: self.state.kill_count,
            kill_target: self.state.kill_target,
        });
    }

    fn publish_ammo(&self) {
        self.bus.publish(AmmoChanged {
            mag_ammo: self.weapon.mag_ammo(),
            max_ammo: self.weapon.max_ammo(),
        });
    }

    fn publish_config_changed(&self) {
        self.bus.publish(TargetConfigChanged {
            count: self.rack.len(),
            name: self.target_config.name.clone(),
        });
    }

    /// Current camera pose
    pub fn camera(&self) -> CameraTransform {
        CameraTransform::new(
            self.state.position + Vec3::Y * self.config.eye_height,
            self.state.yaw,
            self.state.pitch,
        )
    }

    /// Read-only view for collaborators
    pub fn scene(&self) -> SceneView<'_> {
        SceneView {
            targets: &self.rack,
            weapon: &self.weapon,
            state: &self.state,
            camera: self.camera(),
        }
    }

    /// Serializable copy of the UI-facing state
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            frame: self.frame,
            phase: self.state.phase,
            config_name: self.target_config.name.clone(),
            kill_count: self.state.kill_count,
            kill_target: self.state.kill_target,
            shots_fired: self.state.shots_fired,
            hits: self.state.hits,
            mag_ammo: self.weapon.mag_ammo(),
            max_ammo: self.weapon.max_ammo(),
            weapon_action: self.weapon.current_action(),
            camera: self.camera(),
            targets: TargetSnapshot::collect(&self.rack),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn target_config(&self) -> &TargetConfig {
        &self.target_config
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn rack(&self) -> &TargetRack {
        &self.rack
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn kill_count(&self) -> u32 {
        self.state.kill_count
    }

    pub fn kill_target(&self) -> u32 {
        self.state.kill_target
    }

    /// Frames run so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Pose recorded when the first deploy finished
    pub fn deploy_snapshot(&self) -> Option<&DeploySnapshot> {
        self.deploy_snapshot.as_ref()
    }

    /// Timers still waiting to fire
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_count()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.play_again_subscription);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("target_config", &self.target_config.name)
            .field("targets", &self.rack.len())
            .field("state", &self.state)
            .field("weapon", &self.weapon.current_action())
            .field("frame", &self.frame)
            .finish()
    }
}

/// Keep yaw in `[-pi, pi]` without touching values already inside it
fn wrap_angle(angle: f32) -> f32 {
    if angle.abs() <= consts::PI {
        angle
    } else {
        (angle + consts::PI).rem_euclid(consts::TAU) - consts::PI
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::NullRenderer;
    use gallery_layout::Layout;

    fn single_target() -> TargetConfig {
        TargetConfig::new(
            "single",
            Layout::Linear {
                count: 1,
                base_position: Vec3::new(0.0, 1.0, -10.0),
                spacing: 1.0,
            },
        )
    }

    fn session() -> Session {
        Session::new(
            SessionConfig::default(),
            single_target(),
            &AssetLibrary::builtin(),
            EventBus::shared(),
        )
        .unwrap()
    }

    #[test]
    fn test_wrap_angle() {
        assert_eq!(wrap_angle(0.5), 0.5);
        assert!((wrap_angle(consts::PI + 0.5) - (-consts::PI + 0.5)).abs() < 1e-5);
        assert!((wrap_angle(-consts::TAU - 0.25) - (-0.25)).abs() < 1e-5);
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut session = session();
        let report = session.frame(5.0, &FrameInput::idle(), &mut NullRenderer);
        assert_eq!(report.delta_time, 0.1);

        let report = session.frame(f32::NAN, &FrameInput::idle(), &mut NullRenderer);
        assert_eq!(report.delta_time, 0.0);

        let report = session.frame(-1.0, &FrameInput::idle(), &mut NullRenderer);
        assert_eq!(report.delta_time, 0.0);
    }

    #[test]
    fn test_fire_before_deploy_is_ignored() {
        let mut session = session();
        let report = session.frame(0.016, &FrameInput::fire(), &mut NullRenderer);
        assert!(!report.shot);
        assert_eq!(session.state().shots_fired, 0);
        assert_eq!(session.weapon().mag_ammo(), session.weapon().max_ammo());
    }

    #[test]
    fn test_deploy_snapshot_recorded_once() {
        let mut session = session();
        assert!(session.deploy_snapshot().is_none());
        for _ in 0..10 {
            session.frame(0.1, &FrameInput::idle(), &mut NullRenderer);
        }
        let recorded = session.deploy_snapshot().copied();
        assert!(recorded.is_some());

        session.play_again();
        for _ in 0..10 {
            session.frame(0.1, &FrameInput::idle(), &mut NullRenderer);
        }
        assert_eq!(session.deploy_snapshot().copied(), recorded);
    }

    #[test]
    fn test_movement_is_clamped_to_bounds() {
        let mut session = session();
        let forward = FrameInput::idle().with_movement(Vec2::new(0.0, 1.0));
        for _ in 0..200 {
            session.frame(0.1, &forward, &mut NullRenderer);
        }
        assert_eq!(session.state().position.z, session.config().movement_bounds.min_z);
        assert_eq!(session.state().position.x, 0.0);
    }

    #[test]
    fn test_camera_at_eye_height() {
        let session = session();
        assert_eq!(session.camera().position, Vec3::new(0.0, 1.0, 0.0));
    }
}
