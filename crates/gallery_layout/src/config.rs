//! Target configuration
//!
//! A [`TargetConfig`] fully describes one target arrangement: the layout
//! geometry, per-target health and scale, optional oscillating movement and
//! the elimination animation parameters. The effective target count is always
//! derived from the config itself.

use gallery_math::{consts, Rect, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Rectangle on the ground plane used by the scattered layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
    /// Height every scattered target is placed at
    pub y: f32,
}

impl ScatterBounds {
    /// Ground-plane footprint
    pub fn area(&self) -> Rect {
        Rect::new(self.min_x, self.max_x, self.min_z, self.max_z)
    }
}

/// Geometric arrangement algorithm, carrying only the parameters it uses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layout {
    /// A row along +X
    Linear {
        count: usize,
        base_position: Vec3,
        spacing: f32,
    },
    /// Evenly spaced on a circle in the XZ plane
    Circular {
        count: usize,
        center: Vec3,
        radius: f32,
        /// Angle of the first target, radians
        #[serde(default)]
        start_angle: f32,
    },
    /// `rows` x `cols` grid, rows advancing along +Z
    Grid {
        rows: usize,
        cols: usize,
        base_position: Vec3,
        spacing_x: f32,
        spacing_z: f32,
    },
    /// Center target plus alternating left/right wings
    VFormation {
        count: usize,
        base_position: Vec3,
        spacing: f32,
        /// Wing angle from the lateral (X) axis, degrees
        angle_degrees: f32,
    },
    /// Rejection-sampled inside a rectangle
    Scattered {
        count: usize,
        bounds: ScatterBounds,
        min_distance: f32,
    },
    /// Rows shrinking by one target each, centered on the base X
    Pyramid {
        base_count: usize,
        rows: usize,
        base_position: Vec3,
        spacing_x: f32,
        spacing_z: f32,
    },
    /// Linear positions; motion is applied by the animator
    Moving {
        count: usize,
        base_position: Vec3,
        spacing: f32,
    },
}

/// Fieldless mirror of [`Layout`], for display and matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    Linear,
    Circular,
    Grid,
    VFormation,
    Scattered,
    Pyramid,
    Moving,
}

impl std::fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Linear => "linear",
            Self::Circular => "circular",
            Self::Grid => "grid",
            Self::VFormation => "v_formation",
            Self::Scattered => "scattered",
            Self::Pyramid => "pyramid",
            Self::Moving => "moving",
        };
        f.write_str(name)
    }
}

impl Layout {
    pub fn kind(&self) -> LayoutKind {
        match self {
            Self::Linear { .. } => LayoutKind::Linear,
            Self::Circular { .. } => LayoutKind::Circular,
            Self::Grid { .. } => LayoutKind::Grid,
            Self::VFormation { .. } => LayoutKind::VFormation,
            Self::Scattered { .. } => LayoutKind::Scattered,
            Self::Pyramid { .. } => LayoutKind::Pyramid,
            Self::Moving { .. } => LayoutKind::Moving,
        }
    }

    /// Number of targets this layout produces
    pub fn effective_count(&self) -> usize {
        match *self {
            Self::Linear { count, .. }
            | Self::Circular { count, .. }
            | Self::VFormation { count, .. }
            | Self::Scattered { count, .. }
            | Self::Moving { count, .. } => count,
            Self::Grid { rows, cols, .. } => rows * cols,
            Self::Pyramid {
                base_count, rows, ..
            } => (0..pyramid_rows(base_count, rows))
                .map(|r| base_count - r)
                .sum(),
        }
    }
}

/// Rows actually produced by a pyramid; a row never has fewer than one target
pub(crate) fn pyramid_rows(base_count: usize, rows: usize) -> usize {
    rows.min(base_count)
}

/// Axis (or axes) a moving target oscillates along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementAxis {
    #[default]
    X,
    Z,
    Both,
}

impl MovementAxis {
    /// Displacement vector for a signed offset along this axis
    pub fn offset(self, amount: f32) -> Vec3 {
        match self {
            Self::X => Vec3::new(amount, 0.0, 0.0),
            Self::Z => Vec3::new(0.0, 0.0, amount),
            Self::Both => Vec3::new(amount, 0.0, amount),
        }
    }
}

/// Oscillating movement: `start + amplitude * sin(time * speed)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementConfig {
    pub enabled: bool,
    pub amplitude: f32,
    /// Angular speed, radians per second
    pub speed: f32,
    #[serde(default)]
    pub axis: MovementAxis,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            amplitude: 2.0,
            speed: 1.5,
            axis: MovementAxis::X,
        }
    }
}

/// Elimination animation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EliminationConfig {
    /// Seconds from hit to hidden
    pub duration: f32,
    /// Rotation added to the current orientation (radians, XYZ)
    pub fall_rotation: Vec3,
}

impl Default for EliminationConfig {
    fn default() -> Self {
        Self {
            duration: 1.0,
            fall_rotation: Vec3::new(-consts::FRAC_PI_2, 0.0, 0.0),
        }
    }
}

fn default_scale() -> f32 {
    1.0
}

fn default_hp() -> u32 {
    1
}

/// Complete description of a target arrangement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Display name (preset name for built-in configs)
    pub name: String,
    pub layout: Layout,
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Hits needed to eliminate one target
    #[serde(default = "default_hp")]
    pub hp: u32,
    #[serde(default)]
    pub movement: Option<MovementConfig>,
    #[serde(default)]
    pub elimination: EliminationConfig,
}

impl TargetConfig {
    /// Create a config with unit scale and one hit point
    pub fn new(name: impl Into<String>, layout: Layout) -> Self {
        Self {
            name: name.into(),
            layout,
            scale: default_scale(),
            hp: default_hp(),
            movement: None,
            elimination: EliminationConfig::default(),
        }
    }

    /// Parse a config from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_movement(mut self, movement: MovementConfig) -> Self {
        self.movement = Some(movement);
        self
    }

    pub fn with_elimination(mut self, elimination: EliminationConfig) -> Self {
        self.elimination = elimination;
        self
    }

    /// Number of targets this config produces
    pub fn effective_count(&self) -> usize {
        self.layout.effective_count()
    }

    /// Movement applied to every target, if any.
    ///
    /// The moving layout falls back to the default movement when none is given.
    pub fn effective_movement(&self) -> Option<MovementConfig> {
        match self.movement {
            Some(movement) if movement.enabled => Some(movement),
            Some(_) => None,
            None if self.layout.kind() == LayoutKind::Moving => Some(MovementConfig::default()),
            None => None,
        }
    }

    /// Check every constraint the generator and animator rely on
    pub fn validate(&self) -> Result<()> {
        if self.hp == 0 {
            return invalid("hp must be at least 1");
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return invalid(format!("scale must be positive, got {}", self.scale));
        }
        if !(self.elimination.duration.is_finite() && self.elimination.duration >= 0.0) {
            return invalid("elimination duration must be a non-negative number");
        }
        if let Some(movement) = &self.movement {
            if !(movement.amplitude.is_finite() && movement.speed.is_finite()) {
                return invalid("movement amplitude and speed must be finite");
            }
        }

        match &self.layout {
            Layout::Linear { count, spacing, .. } | Layout::Moving { count, spacing, .. } => {
                require_count(*count)?;
                require_finite("spacing", *spacing)
            }
            Layout::Circular {
                count,
                radius,
                start_angle,
                ..
            } => {
                require_count(*count)?;
                require_finite("start_angle", *start_angle)?;
                if !(radius.is_finite() && *radius >= 0.0) {
                    return invalid(format!("radius must be non-negative, got {}", radius));
                }
                Ok(())
            }
            Layout::Grid {
                rows,
                cols,
                spacing_x,
                spacing_z,
                ..
            } => {
                if *rows == 0 || *cols == 0 {
                    return invalid(format!("grid must have rows and cols, got {}x{}", rows, cols));
                }
                require_finite("spacing_x", *spacing_x)?;
                require_finite("spacing_z", *spacing_z)
            }
            Layout::VFormation {
                count,
                spacing,
                angle_degrees,
                ..
            } => {
                require_count(*count)?;
                require_finite("spacing", *spacing)?;
                require_finite("angle_degrees", *angle_degrees)
            }
            Layout::Scattered {
                count,
                bounds,
                min_distance,
            } => {
                require_count(*count)?;
                if !bounds.area().is_valid() {
                    return invalid("scatter bounds are inverted");
                }
                if !(min_distance.is_finite() && *min_distance >= 0.0) {
                    return invalid("min_distance must be non-negative");
                }
                Ok(())
            }
            Layout::Pyramid {
                base_count,
                rows,
                spacing_x,
                spacing_z,
                ..
            } => {
                if *base_count == 0 || *rows == 0 {
                    return invalid("pyramid needs a base count and at least one row");
                }
                require_finite("spacing_x", *spacing_x)?;
                require_finite("spacing_z", *spacing_z)
            }
        }
    }
}

fn invalid(message: impl Into<String>) -> Result<()> {
    Err(LayoutError::InvalidConfig(message.into()))
}

fn require_count(count: usize) -> Result<()> {
    if count == 0 {
        return invalid("count must be at least 1");
    }
    Ok(())
}

fn require_finite(field: &str, value: f32) -> Result<()> {
    if !value.is_finite() {
        return invalid(format!("{} must be finite", field));
    }
    Ok(())
}
