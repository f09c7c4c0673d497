//! User preferences.
//!
//! Preferences are layered from lowest to highest priority: the defaults
//! embedded in `default.yaml`, an optional user file, and `CUBEVIEW_*`
//! environment variables (nested keys are separated by `__`, as in
//! `CUBEVIEW_ANIMATION__SPEED=80`).

#[macro_use]
extern crate lazy_static;

use std::path::Path;

use serde::{Deserialize, Serialize};

mod animation;
mod playback;

pub use animation::*;
pub use playback::*;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");
const ENV_PREFIX: &str = "CUBEVIEW";

lazy_static! {
    /// Preferences embedded in the binary.
    pub static ref DEFAULT_PREFS: Preferences = serde_norway::from_str(DEFAULT_PREFS_STR)
        .unwrap_or_else(|e| {
            log::error!("Error parsing default preferences: {e}");
            Preferences::default()
        });
}

/// All user preferences.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Preferences {
    /// Turn animation preferences.
    #[serde(default)]
    pub animation: AnimationPreferences,
    /// Solution playback and scramble preferences.
    #[serde(default)]
    pub playback: PlaybackPreferences,
}
impl Preferences {
    /// Loads preferences, layering `user_file` (if any) and environment
    /// variables over the defaults. If loading fails, a warning is logged and
    /// the default preferences are returned.
    pub fn load(user_file: Option<&Path>) -> Self {
        lazy_static::initialize(&DEFAULT_PREFS);

        Self::try_load(user_file).unwrap_or_else(|e| {
            log::warn!("Error loading preferences: {e}");
            DEFAULT_PREFS.clone()
        })
    }

    /// Loads preferences, layering `user_file` (if any) and environment
    /// variables over the defaults.
    pub fn try_load(user_file: Option<&Path>) -> eyre::Result<Self> {
        let mut config = default_config();
        if let Some(path) = user_file {
            log::debug!("Loading user preferences from {}", path.display());
            config = config.add_source(config::File::from(path).format(PREFS_FILE_FORMAT));
        }
        finish(config)
    }

    /// Loads preferences from a YAML string layered over the defaults.
    pub fn from_yaml_str(yaml: &str) -> eyre::Result<Self> {
        finish(default_config().add_source(config::File::from_str(yaml, PREFS_FILE_FORMAT)))
    }

    /// Serializes the preferences to YAML.
    pub fn to_yaml_string(&self) -> eyre::Result<String> {
        Ok(serde_norway::to_string(self)?)
    }

    /// Returns the delay between the end of one turn and the start of the
    /// next during autoplay.
    pub fn move_delay(&self) -> std::time::Duration {
        self.playback.move_delay(self.animation.divider())
    }

    fn sanitized(mut self) -> Self {
        let speed = self.animation.speed;
        if !SPEED_RANGE.contains(&speed) {
            log::warn!(
                "Animation speed {speed} is out of range {}..={}; clamping",
                SPEED_RANGE.start(),
                SPEED_RANGE.end(),
            );
            self.animation.speed = speed.clamp(*SPEED_RANGE.start(), *SPEED_RANGE.end());
        }
        self
    }
}

fn default_config() -> config::ConfigBuilder<config::builder::DefaultState> {
    config::Config::builder().add_source(config::File::from_str(
        DEFAULT_PREFS_STR,
        PREFS_FILE_FORMAT,
    ))
}

fn finish(config: config::ConfigBuilder<config::builder::DefaultState>) -> eyre::Result<Preferences> {
    let env = config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true);
    let prefs: Preferences = config.add_source(env).build()?.try_deserialize()?;
    Ok(prefs.sanitized())
}
