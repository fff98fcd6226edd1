//! Text renderer for headless runs

use gallery_session::{CameraTransform, Renderer, SceneView};

/// Logs a one-line frame summary every `every` frames
#[derive(Debug, Clone)]
pub struct LogRenderer {
    every: u64,
    frames: u64,
}

impl LogRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
        }
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, scene: &SceneView<'_>, camera: &CameraTransform) {
        self.frames += 1;
        if self.frames % self.every != 0 {
            return;
        }

        log::debug!(
            "frame {}: yaw {:.2} pitch {:.2} at ({:.1}, {:.1}) | {} {}/{} | targets {}/{} visible | kills {}/{}",
            self.frames,
            camera.yaw,
            camera.pitch,
            camera.position.x,
            camera.position.z,
            scene.weapon.current_action(),
            scene.weapon.mag_ammo(),
            scene.weapon.max_ammo(),
            scene.targets.visible_count(),
            scene.targets.len(),
            scene.state.kill_count,
            scene.state.kill_target,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_session::{AssetLibrary, EventBus, FrameInput, Session, SessionConfig};

    #[test]
    fn test_counts_rendered_frames() {
        let mut session = Session::from_config(
            SessionConfig::default(),
            &AssetLibrary::builtin(),
            EventBus::shared(),
        )
        .unwrap();
        let mut renderer = LogRenderer::new(0);
        for _ in 0..5 {
            session.frame(1.0 / 60.0, &FrameInput::idle(), &mut renderer);
        }
        assert_eq!(renderer.frames, 5);
        assert_eq!(renderer.every, 1);
    }
}
