//! Loaded model registry
//!
//! The session never loads files itself; a loader registers decoded models
//! here by name and the session resolves the names from its config. A name
//! that was never registered is a hard error.

use std::collections::HashMap;

use gallery_combat::WeaponClips;
use gallery_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// Name of the built-in weapon model
pub const DEFAULT_WEAPON_ASSET: &str = "blaster";

/// Name of the built-in target model
pub const DEFAULT_TARGET_ASSET: &str = "target_board";

/// Weapon model: animation sub-clips and magazine size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponModel {
    pub clips: WeaponClips,
    pub max_ammo: u32,
}

impl Default for WeaponModel {
    fn default() -> Self {
        Self {
            clips: WeaponClips::default(),
            max_ammo: 8,
        }
    }
}

/// Target model: unscaled hit box half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetModel {
    pub half_extents: Vec3,
}

impl Default for TargetModel {
    fn default() -> Self {
        Self {
            half_extents: Vec3::new(0.6, 0.6, 0.1),
        }
    }
}

/// A registered model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Asset {
    Weapon(WeaponModel),
    Target(TargetModel),
}

impl Asset {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Weapon(_) => "weapon",
            Self::Target(_) => "target",
        }
    }
}

/// Models available to a session, keyed by name
#[derive(Debug, Clone, Default)]
pub struct AssetLibrary {
    assets: HashMap<String, Asset>,
}

impl AssetLibrary {
    /// Empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Library holding the default weapon and target models
    pub fn builtin() -> Self {
        let mut library = Self::new();
        library.insert_weapon(DEFAULT_WEAPON_ASSET, WeaponModel::default());
        library.insert_target(DEFAULT_TARGET_ASSET, TargetModel::default());
        library
    }

    pub fn insert_weapon(&mut self, name: impl Into<String>, model: WeaponModel) {
        self.assets.insert(name.into(), Asset::Weapon(model));
    }

    pub fn insert_target(&mut self, name: impl Into<String>, model: TargetModel) {
        self.assets.insert(name.into(), Asset::Target(model));
    }

    /// Remove a model, returning it if it was registered
    pub fn remove(&mut self, name: &str) -> Option<Asset> {
        self.assets.remove(name)
    }

    pub fn get(&self, name: &str) -> Result<&Asset, AssetError> {
        self.assets
            .get(name)
            .ok_or_else(|| AssetError::Missing(name.to_string()))
    }

    pub fn weapon(&self, name: &str) -> Result<&WeaponModel, AssetError> {
        match self.get(name)? {
            Asset::Weapon(model) => Ok(model),
            _ => Err(AssetError::WrongKind {
                name: name.to_string(),
                expected: "weapon",
            }),
        }
    }

    pub fn target(&self, name: &str) -> Result<&TargetModel, AssetError> {
        match self.get(name)? {
            Asset::Target(model) => Ok(model),
            _ => Err(AssetError::WrongKind {
                name: name.to_string(),
                expected: "target",
            }),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.assets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_models() {
        let library = AssetLibrary::builtin();
        assert_eq!(library.len(), 2);
        assert_eq!(library.weapon(DEFAULT_WEAPON_ASSET).map(|w| w.max_ammo).ok(), Some(8));
        assert!(library.target(DEFAULT_TARGET_ASSET).is_ok());
    }

    #[test]
    fn test_missing_asset() {
        let library = AssetLibrary::new();
        match library.weapon("rifle") {
            Err(AssetError::Missing(name)) => assert_eq!(name, "rifle"),
            other => panic!("expected missing asset, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_kind() {
        let library = AssetLibrary::builtin();
        assert!(matches!(
            library.target(DEFAULT_WEAPON_ASSET),
            Err(AssetError::WrongKind { expected: "target", .. })
        ));
        assert_eq!(
            library.get(DEFAULT_TARGET_ASSET).map(Asset::kind_name).ok(),
            Some("target")
        );
    }
}
