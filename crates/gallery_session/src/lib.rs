//! Gallery Session - The Frame Orchestrator
//!
//! Ties player input, the weapon, the target rack and the win condition
//! together into one fixed-order tick per frame, and reports what happened to
//! the UI through an injected [`EventBus`](gallery_event::EventBus).
//!
//! # Example
//!
//! ```ignore
//! use gallery_session::prelude::*;
//!
//! let bus = EventBus::shared();
//! bus.subscribe::<GameOver, _>(|event| println!("{} kills", event.kill_count));
//!
//! let assets = AssetLibrary::builtin();
//! let mut session = Session::from_config(SessionConfig::default(), &assets, bus)?;
//!
//! while !session.is_game_over() {
//!     session.step(1.0 / 60.0, &mut input, &mut renderer);
//! }
//! ```

pub mod assets;
pub mod camera;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod events;
pub mod scheduler;
pub mod session;
pub mod snapshot;
pub mod state;

pub mod prelude {
    pub use crate::assets::{
        Asset, AssetLibrary, TargetModel, WeaponModel, DEFAULT_TARGET_ASSET, DEFAULT_WEAPON_ASSET,
    };
    pub use crate::camera::CameraTransform;
    pub use crate::collaborators::{
        FrameInput, InputSource, NullRenderer, Renderer, SceneView, ScriptedInput,
    };
    pub use crate::config::SessionConfig;
    pub use crate::error::{AssetError, Result, SessionError};
    pub use crate::events::{
        AmmoChanged, GameOver, GameOverOverlay, HitMarker, KillCountChanged, PlayAgainRequested,
        ShotFired, TargetConfigChanged,
    };
    pub use crate::scheduler::Scheduler;
    pub use crate::session::{FrameReport, Session};
    pub use crate::snapshot::{SessionSnapshot, TargetSnapshot};
    pub use crate::state::{DeploySnapshot, GamePhase, SessionState};
    pub use gallery_event::{EventBus, Priority, SubscriberId};
}

pub use prelude::*;
