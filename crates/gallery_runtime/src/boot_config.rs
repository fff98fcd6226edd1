//! Boot Configuration
//!
//! # Configuration Sources (later sources win)
//!
//! 1. Config file: `gallery.toml` in the working directory, or the path in
//!    `GALLERY_CONFIG`
//! 2. Environment variables: `GALLERY_PRESET`, `GALLERY_SEED`,
//!    `GALLERY_FRAMES`, `GALLERY_ROUNDS`, `GALLERY_DEBUG`
//! 3. First positional argument: preset name
//!
//! # Example Config File
//!
//! ```toml
//! frames = 7200
//! frame_rate = 60
//! rounds = 2
//!
//! [session]
//! preset = "grid"
//! kill_count_to_win = 10
//! game_over_delay = 1.0
//! ```

use gallery_session::SessionConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default config file name
pub const CONFIG_FILE: &str = "gallery.toml";

/// Boot configuration errors
#[derive(Debug, Error)]
pub enum BootError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse boot config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid boot config: {0}")]
    Invalid(String),
}

/// Complete boot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    /// Frame budget before the runner gives up
    pub frames: u64,
    /// Simulated frames per second
    pub frame_rate: u32,
    /// Rounds to play; each game-over overlay requests play-again until done
    pub rounds: u32,
    /// Renderer logs a line every this many frames
    pub log_every: u64,
    /// Enable debug logging
    pub debug: bool,
    pub session: SessionConfig,
    /// Where each override came from, logged once the logger is up
    #[serde(skip)]
    pub sources: Vec<String>,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            frames: 60 * 60 * 5,
            frame_rate: 60,
            rounds: 1,
            log_every: 120,
            debug: false,
            session: SessionConfig::default(),
            sources: Vec::new(),
        }
    }
}

impl BootConfig {
    /// Load from file, environment and command line.
    ///
    /// A missing config file is not an error; a malformed one is.
    pub fn load() -> Result<Self, BootError> {
        let path = std::env::var("GALLERY_CONFIG").unwrap_or_else(|_| CONFIG_FILE.to_string());
        let file = match std::fs::read_to_string(&path) {
            Ok(content) => Some((path, content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(source) => return Err(BootError::Io { path, source }),
        };

        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_sources(file, |key| std::env::var(key).ok(), &args)
    }

    /// Merge the three sources. `env` looks up one environment variable.
    pub fn from_sources<F>(
        file: Option<(String, String)>,
        env: F,
        args: &[String],
    ) -> Result<Self, BootError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match file {
            Some((path, content)) => {
                let mut config = Self::from_toml(&content)?;
                config.sources.push(format!("config file {}", path));
                config
            }
            None => Self::default(),
        };

        if let Some(preset) = env("GALLERY_PRESET").filter(|p| !p.is_empty()) {
            config.sources.push(format!("preset from env: {}", preset));
            config.session.preset = preset;
        }

        if let Some(seed) = env("GALLERY_SEED") {
            config.session.seed = parse_env("GALLERY_SEED", &seed)?;
            config.sources.push(format!("seed from env: {}", config.session.seed));
        }

        if let Some(frames) = env("GALLERY_FRAMES") {
            config.frames = parse_env("GALLERY_FRAMES", &frames)?;
            config.sources.push(format!("frame budget from env: {}", config.frames));
        }

        if let Some(rounds) = env("GALLERY_ROUNDS") {
            config.rounds = parse_env("GALLERY_ROUNDS", &rounds)?;
            config.sources.push(format!("rounds from env: {}", config.rounds));
        }

        if env("GALLERY_DEBUG").map_or(false, |v| v == "1" || v == "true") {
            config.debug = true;
        }

        // First non-flag argument is the preset name
        if let Some(preset) = args.iter().find(|arg| !arg.starts_with("--")) {
            config.sources.push(format!("preset from args: {}", preset));
            config.session.preset = preset.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml(content: &str) -> Result<Self, BootError> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<(), BootError> {
        if self.frame_rate == 0 {
            return Err(BootError::Invalid("frame_rate must be positive".into()));
        }
        if self.rounds == 0 {
            return Err(BootError::Invalid("rounds must be at least 1".into()));
        }
        self.session
            .validate()
            .map_err(|err| BootError::Invalid(err.to_string()))
    }

    /// Fixed frame delta in seconds
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.frame_rate as f32
    }

    /// Log where settings came from and the effective values
    pub fn log_summary(&self) {
        for source in &self.sources {
            log::info!("Boot: {}", source);
        }
        log::info!(
            "Boot: preset '{}', seed {}, {} round(s), {} frame budget at {} fps",
            self.session.preset,
            self.session.seed,
            self.rounds,
            self.frames,
            self.frame_rate
        );
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, BootError> {
    value
        .trim()
        .parse()
        .map_err(|_| BootError::Invalid(format!("{} is not a valid number: {:?}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = BootConfig::from_sources(None, env(&[]), &[]).unwrap();
        assert_eq!(config.session.preset, "linear");
        assert_eq!(config.rounds, 1);
        assert!(config.sources.is_empty());
        assert!((config.frame_delta() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_toml_file() {
        let toml = r#"
            frames = 100
            rounds = 3

            [session]
            preset = "grid"
            kill_count_to_win = 10
            game_over_delay = 0.5
        "#;
        let config = BootConfig::from_sources(
            Some(("gallery.toml".into(), toml.into())),
            env(&[]),
            &[],
        )
        .unwrap();
        assert_eq!(config.frames, 100);
        assert_eq!(config.rounds, 3);
        assert_eq!(config.frame_rate, 60);
        assert_eq!(config.session.preset, "grid");
        assert_eq!(config.session.kill_count_to_win, Some(10));
        assert_eq!(config.session.game_over_delay, 0.5);
        assert_eq!(config.sources.len(), 1);
    }

    #[test]
    fn test_env_then_args_override() {
        let file = Some(("gallery.toml".into(), "[session]\npreset = \"grid\"\n".into()));
        let config = BootConfig::from_sources(
            file,
            env(&[("GALLERY_PRESET", "pyramid"), ("GALLERY_SEED", "7"), ("GALLERY_DEBUG", "1")]),
            &["--verbose".to_string(), "moving".to_string()],
        )
        .unwrap();
        assert_eq!(config.session.preset, "moving");
        assert_eq!(config.session.seed, 7);
        assert!(config.debug);
    }

    #[test]
    fn test_bad_values() {
        let result = BootConfig::from_sources(None, env(&[("GALLERY_FRAMES", "lots")]), &[]);
        assert!(matches!(result, Err(BootError::Invalid(_))));

        let result = BootConfig::from_sources(
            Some(("gallery.toml".into(), "frames = [".into())),
            env(&[]),
            &[],
        );
        assert!(matches!(result, Err(BootError::Toml(_))));

        let result = BootConfig::from_sources(None, env(&[("GALLERY_ROUNDS", "0")]), &[]);
        assert!(matches!(result, Err(BootError::Invalid(_))));

        let result = BootConfig::from_sources(
            Some(("gallery.toml".into(), "[session]\ninitial_pitch = nan\n".into())),
            env(&[]),
            &[],
        );
        assert!(matches!(result, Err(BootError::Invalid(_))));
    }
}
