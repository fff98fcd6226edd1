//! Notifications published on the session's event bus
//!
//! All events are fire-and-forget. They are queued while a frame runs and
//! delivered at the end of [`Session::frame`](crate::Session::frame).

use gallery_combat::TargetId;
use serde::{Deserialize, Serialize};

/// Kill count changed (also published with 0 on reset)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillCountChanged {
    pub kill_count: u32,
    /// Kills needed to win
    pub kill_target: u32,
}

/// Win condition met
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOver {
    pub kill_count: u32,
    pub shots_fired: u32,
    pub hits: u32,
}

/// Delayed follow-up to [`GameOver`]: show the overlay now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverOverlay {
    pub kill_count: u32,
}

/// A shot struck a target; flash the hit marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitMarker {
    pub target: TargetId,
    pub eliminated: bool,
}

/// Every fired round, hit or miss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotFired {
    pub hit: bool,
}

/// Targets were regenerated from a new config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfigChanged {
    pub count: usize,
    pub name: String,
}

/// Request a full reset; handled at the start of the next frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayAgainRequested;

/// Magazine contents changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmoChanged {
    pub mag_ammo: u32,
    pub max_ammo: u32,
}
