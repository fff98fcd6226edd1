//! Boundaries to the input device and the renderer

use std::collections::VecDeque;

use gallery_combat::{TargetRack, Weapon};
use gallery_math::Vec2;
use serde::{Deserialize, Serialize};

use crate::camera::CameraTransform;
use crate::state::SessionState;

/// One frame of player input.
///
/// Both vectors are expected in `[-1, 1]`; the session clamps anything
/// outside that range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// x strafes right, y moves forward
    pub movement: Vec2,
    /// x turns right, y looks up
    pub rotation: Vec2,
    /// Fire button held this frame
    pub fire: bool,
}

impl FrameInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn fire() -> Self {
        Self {
            fire: true,
            ..Self::default()
        }
    }

    pub fn with_movement(mut self, movement: Vec2) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec2) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_fire(mut self, fire: bool) -> Self {
        self.fire = fire;
        self
    }

    /// Clamp both vectors into `[-1, 1]`; non-finite components become 0
    pub fn sanitized(self) -> Self {
        Self {
            movement: sanitize(self.movement),
            rotation: sanitize(self.rotation),
            fire: self.fire,
        }
    }
}

fn sanitize(v: Vec2) -> Vec2 {
    let component = |c: f32| if c.is_finite() { c.clamp(-1.0, 1.0) } else { 0.0 };
    Vec2::new(component(v.x), component(v.y))
}

/// Read-only view of the world handed to collaborators
#[derive(Debug, Clone, Copy)]
pub struct SceneView<'a> {
    pub targets: &'a TargetRack,
    pub weapon: &'a Weapon,
    pub state: &'a SessionState,
    pub camera: CameraTransform,
}

/// Produces one [`FrameInput`] per frame
pub trait InputSource {
    fn poll(&mut self, scene: &SceneView<'_>, delta_time: f32) -> FrameInput;
}

/// Draws a frame. Called exactly once per frame and must not block.
pub trait Renderer {
    fn render(&mut self, scene: &SceneView<'_>, camera: &CameraTransform);
}

/// Renderer that draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _scene: &SceneView<'_>, _camera: &CameraTransform) {}
}

/// Replays a fixed sequence of inputs, then idles
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    frames: VecDeque<FrameInput>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = FrameInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Append `count` copies of `input`
    pub fn repeat(mut self, input: FrameInput, count: usize) -> Self {
        self.frames.extend(std::iter::repeat(input).take(count));
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _scene: &SceneView<'_>, _delta_time: f32) -> FrameInput {
        self.frames.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_clamps() {
        let input = FrameInput::idle()
            .with_movement(Vec2::new(3.0, f32::NAN))
            .with_rotation(Vec2::new(-0.5, -7.0))
            .sanitized();
        assert_eq!(input.movement, Vec2::new(1.0, 0.0));
        assert_eq!(input.rotation, Vec2::new(-0.5, -1.0));
    }

    #[test]
    fn test_scripted_input_drains() {
        let mut script = ScriptedInput::new([FrameInput::fire()]).repeat(FrameInput::idle(), 2);
        assert_eq!(script.remaining(), 3);

        let rack = TargetRack::new(gallery_math::Vec3::ONE);
        let weapon = Weapon::new(Default::default(), 1);
        let state = SessionState::new(gallery_math::Vec3::ZERO, 0.0, 0.0, 1);
        let scene = SceneView {
            targets: &rack,
            weapon: &weapon,
            state: &state,
            camera: CameraTransform::new(gallery_math::Vec3::ZERO, 0.0, 0.0),
        };

        assert!(script.poll(&scene, 0.016).fire);
        assert!(!script.poll(&scene, 0.016).fire);
        script.poll(&scene, 0.016);
        assert_eq!(script.poll(&scene, 0.016), FrameInput::idle());
    }
}
