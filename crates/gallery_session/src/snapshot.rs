//! Serializable read-only view of a session

use gallery_combat::{TargetId, TargetRack, WeaponAction};
use gallery_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::CameraTransform;
use crate::state::GamePhase;

/// One target as seen by the UI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSnapshot {
    pub id: TargetId,
    pub position: Vec3,
    pub rotation: Vec3,
    pub hp: u32,
    pub visible: bool,
    pub eliminated: bool,
}

impl TargetSnapshot {
    pub fn collect(rack: &TargetRack) -> Vec<Self> {
        rack.iter()
            .map(|target| Self {
                id: target.id(),
                position: target.position(),
                rotation: target.transform().rotation,
                hp: target.hp(),
                visible: target.is_visible(),
                eliminated: target.is_eliminated(),
            })
            .collect()
    }
}

/// Everything a HUD needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub frame: u64,
    pub phase: GamePhase,
    pub config_name: String,
    pub kill_count: u32,
    pub kill_target: u32,
    pub shots_fired: u32,
    pub hits: u32,
    pub mag_ammo: u32,
    pub max_ammo: u32,
    pub weapon_action: WeaponAction,
    pub camera: CameraTransform,
    pub targets: Vec<TargetSnapshot>,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
