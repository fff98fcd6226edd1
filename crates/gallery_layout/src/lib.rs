//! Gallery Layout - Target Arrangements
//!
//! Turns a [`TargetConfig`] into the ordered list of positions the session
//! spawns its targets at.
//!
//! # Example
//!
//! ```ignore
//! use gallery_layout::prelude::*;
//!
//! let config = presets::preset("grid");
//! let positions = generate_seeded(&config, 7);
//! assert_eq!(positions.len(), config.effective_count());
//! ```

pub mod config;
pub mod error;
pub mod generate;
pub mod presets;

pub mod prelude {
    pub use crate::config::{
        EliminationConfig, Layout, LayoutKind, MovementAxis, MovementConfig, ScatterBounds,
        TargetConfig,
    };
    pub use crate::error::{LayoutError, Result};
    pub use crate::generate::{generate, generate_seeded, MAX_PLACEMENT_ATTEMPTS};
    pub use crate::presets;
}

pub use prelude::*;
