//! Session phase and player state

use gallery_combat::WeaponSnapshot;
use gallery_math::Vec3;
use serde::{Deserialize, Serialize};

/// Session phases
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Accepting input
    #[default]
    Playing,
    /// Win condition met; input frozen until play-again
    GameOver,
}

impl GamePhase {
    /// Check if movement, rotation and firing input should be processed
    pub fn accepts_gameplay_input(&self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// Player pose and weapon ammo recorded when the weapon first became ready
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeploySnapshot {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub weapon: WeaponSnapshot,
}

/// Mutable per-session state owned by the orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: GamePhase,
    pub kill_count: u32,
    /// Kills needed to win: `min(target count, kill_count_to_win)`
    pub kill_target: u32,
    pub shots_fired: u32,
    pub hits: u32,
    /// Player foot position
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl SessionState {
    pub fn new(position: Vec3, yaw: f32, pitch: f32, kill_target: u32) -> Self {
        Self {
            phase: GamePhase::Playing,
            kill_count: 0,
            kill_target,
            shots_fired: 0,
            hits: 0,
            position,
            yaw,
            pitch,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Kill target reached
    pub fn win_reached(&self) -> bool {
        self.kill_count >= self.kill_target
    }

    /// Fraction of fired rounds that hit, 0 before the first shot
    pub fn accuracy(&self) -> f32 {
        if self.shots_fired == 0 {
            0.0
        } else {
            self.hits as f32 / self.shots_fired as f32
        }
    }

    /// Zero the counters and return to playing
    pub fn reset_round(&mut self) {
        self.phase = GamePhase::Playing;
        self.kill_count = 0;
        self.shots_fired = 0;
        self.hits = 0;
    }

    /// Full reset to a recorded pose
    pub fn restore(&mut self, snapshot: &DeploySnapshot) {
        self.reset_round();
        self.position = snapshot.position;
        self.yaw = snapshot.yaw;
        self.pitch = snapshot.pitch;
    }
}

/// Kills needed to end a round with `target_count` targets
pub fn kill_target(target_count: usize, kill_count_to_win: Option<u32>) -> u32 {
    let count = u32::try_from(target_count).unwrap_or(u32::MAX);
    kill_count_to_win.map_or(count, |cap| cap.min(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kill_target() {
        assert_eq!(kill_target(12, Some(10)), 10);
        assert_eq!(kill_target(5, Some(10)), 5);
        assert_eq!(kill_target(7, None), 7);
    }

    #[test]
    fn test_accuracy() {
        let mut state = SessionState::new(Vec3::ZERO, 0.0, 0.0, 3);
        assert_eq!(state.accuracy(), 0.0);
        state.shots_fired = 4;
        state.hits = 3;
        assert_eq!(state.accuracy(), 0.75);
    }

    #[test]
    fn test_restore() {
        let mut state = SessionState::new(Vec3::ZERO, 0.0, 0.0, 3);
        state.kill_count = 3;
        state.phase = GamePhase::GameOver;
        state.position = Vec3::new(4.0, 0.0, 1.0);
        assert!(state.win_reached());

        let snapshot = DeploySnapshot {
            position: Vec3::new(1.0, 0.0, 0.0),
            yaw: 0.25,
            pitch: -0.1,
            weapon: WeaponSnapshot { mag_ammo: 8 },
        };
        state.restore(&snapshot);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.kill_count, 0);
        assert_eq!(state.position, snapshot.position);
        assert_eq!(state.yaw, 0.25);
        assert!(!state.win_reached());
    }
}
