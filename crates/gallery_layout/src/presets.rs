//! Named target presets
//!
//! Unknown names resolve to [`DEFAULT_PRESET`] instead of failing.

use gallery_math::Vec3;

use crate::config::{Layout, MovementAxis, MovementConfig, ScatterBounds, TargetConfig};

/// Preset used when a name is not recognised
pub const DEFAULT_PRESET: &str = "linear";

/// Every built-in preset name
pub const PRESET_NAMES: [&str; 7] = [
    "linear",
    "circular",
    "grid",
    "v_formation",
    "scattered",
    "pyramid",
    "moving",
];

/// Height of a target's center above the floor
const TARGET_HEIGHT: f32 = 1.0;

/// Look up a preset by name
pub fn lookup(name: &str) -> Option<TargetConfig> {
    let config = match name {
        "linear" => TargetConfig::new(
            name,
            Layout::Linear {
                count: 10,
                base_position: Vec3::new(-9.0, TARGET_HEIGHT, -15.0),
                spacing: 2.0,
            },
        ),
        "circular" => TargetConfig::new(
            name,
            Layout::Circular {
                count: 8,
                center: Vec3::new(0.0, TARGET_HEIGHT, -18.0),
                radius: 6.0,
                start_angle: 0.0,
            },
        ),
        "grid" => TargetConfig::new(
            name,
            Layout::Grid {
                rows: 3,
                cols: 4,
                base_position: Vec3::new(-4.5, TARGET_HEIGHT, -12.0),
                spacing_x: 3.0,
                spacing_z: -3.0,
            },
        ),
        "v_formation" => TargetConfig::new(
            name,
            Layout::VFormation {
                count: 7,
                base_position: Vec3::new(0.0, TARGET_HEIGHT, -12.0),
                spacing: 2.5,
                angle_degrees: -30.0,
            },
        ),
        "scattered" => TargetConfig::new(
            name,
            Layout::Scattered {
                count: 8,
                bounds: ScatterBounds {
                    min_x: -10.0,
                    max_x: 10.0,
                    min_z: -22.0,
                    max_z: -10.0,
                    y: TARGET_HEIGHT,
                },
                min_distance: 3.0,
            },
        ),
        "pyramid" => TargetConfig::new(
            name,
            Layout::Pyramid {
                base_count: 5,
                rows: 3,
                base_position: Vec3::new(0.0, TARGET_HEIGHT, -12.0),
                spacing_x: 2.5,
                spacing_z: -2.5,
            },
        ),
        "moving" => TargetConfig::new(
            name,
            Layout::Moving {
                count: 6,
                base_position: Vec3::new(-6.25, TARGET_HEIGHT, -16.0),
                spacing: 2.5,
            },
        )
        .with_hp(2)
        .with_movement(MovementConfig {
            enabled: true,
            amplitude: 2.0,
            speed: 1.2,
            axis: MovementAxis::X,
        }),
        _ => return None,
    };
    Some(config)
}

/// Resolve a preset by name, falling back to the default preset
pub fn preset(name: &str) -> TargetConfig {
    lookup(name).unwrap_or_else(|| {
        log::warn!("Unknown target preset '{}', using '{}'", name, DEFAULT_PRESET);
        default_preset()
    })
}

/// The default preset
pub fn default_preset() -> TargetConfig {
    match lookup(DEFAULT_PRESET) {
        Some(config) => config,
        None => TargetConfig::new(
            DEFAULT_PRESET,
            Layout::Linear {
                count: 10,
                base_position: Vec3::new(-9.0, TARGET_HEIGHT, -15.0),
                spacing: 2.0,
            },
        ),
    }
}
