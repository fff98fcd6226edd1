//! Closed-loop input source that clears the board on its own

use gallery_combat::{Target, TargetId};
use gallery_math::{consts, Vec2, Vec3};
use gallery_session::{FrameInput, InputSource, SceneView};

/// Turns towards the closest live target and fires once lined up
#[derive(Debug, Clone)]
pub struct Autopilot {
    rotation_speed: f32,
    /// Angular error (radians) below which the shot is taken
    tolerance: f32,
    current: Option<TargetId>,
}

impl Autopilot {
    /// `rotation_speed` must match the session's so rotation input is not overshot
    pub fn new(rotation_speed: f32) -> Self {
        Self {
            rotation_speed,
            tolerance: 0.01,
            current: None,
        }
    }

    /// Target currently being tracked
    pub fn current(&self) -> Option<TargetId> {
        self.current
    }

    fn choose(&mut self, scene: &SceneView<'_>) -> Option<(TargetId, Vec3)> {
        if let Some(target) = self
            .current
            .and_then(|id| scene.targets.get(id))
            .filter(|t| is_live(t))
        {
            return Some((target.id(), target.position()));
        }

        let camera = scene.camera;
        let forward = camera.forward();
        let best = scene
            .targets
            .iter()
            .filter(|t| is_live(t))
            .map(|t| {
                let dir = (t.position() - camera.position).normalize_or_zero();
                (t, forward.angle_between(dir))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(t, _)| (t.id(), t.position()));

        self.current = best.map(|(id, _)| id);
        if let Some(id) = self.current {
            log::debug!("autopilot tracking {}", id);
        }
        best
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, scene: &SceneView<'_>, delta_time: f32) -> FrameInput {
        if scene.state.is_game_over() {
            self.current = None;
            return FrameInput::idle();
        }
        let Some((id, point)) = self.choose(scene) else {
            return FrameInput::idle();
        };

        let camera = scene.camera;
        let (yaw, pitch) = look_angles(camera.position, point);
        let yaw_error = wrap_angle(yaw - camera.yaw);
        let pitch_error = pitch - camera.pitch;

        let step = (self.rotation_speed * delta_time).max(f32::EPSILON);
        let rotation = Vec2::new(yaw_error / step, pitch_error / step).clamp(Vec2::NEG_ONE, Vec2::ONE);

        let aligned = yaw_error.abs() < self.tolerance && pitch_error.abs() < self.tolerance;
        let hit = scene.targets.raycast(&camera.aim_ray());
        let clear_shot = hit.map_or(false, |hit| hit.target == id);

        // A live target in the way becomes the new target; a falling one is waited out
        if aligned && !clear_shot {
            if let Some(blocker) = hit.and_then(|hit| scene.targets.get(hit.target)) {
                if is_live(blocker) {
                    log::debug!("autopilot switching to blocking {}", blocker.id());
                    self.current = Some(blocker.id());
                }
            }
        }

        FrameInput::idle()
            .with_rotation(rotation)
            .with_fire(aligned && clear_shot && scene.weapon.is_ready())
    }
}

fn is_live(target: &Target) -> bool {
    !target.is_eliminated() && target.is_visible()
}

/// Yaw and pitch that look from `eye` at `point`
fn look_angles(eye: Vec3, point: Vec3) -> (f32, f32) {
    let d = point - eye;
    let yaw = d.x.atan2(-d.z);
    let pitch = d.y.atan2((d.x * d.x + d.z * d.z).sqrt());
    (yaw, pitch)
}

fn wrap_angle(angle: f32) -> f32 {
    (angle + consts::PI).rem_euclid(consts::TAU) - consts::PI
}
