//! Centralized controller options with TOML preset support.
//!
//! Play head tuning, frame catalog layout, preload sizes and key bindings
//! are consolidated here. Options serialize to/from TOML so a deployment can
//! ship a preset next to its frames.

mod catalog;
mod keybindings;
mod playback;
mod preload;

use std::path::Path;

pub use catalog::{CatalogOptions, FrameTemplate};
pub use keybindings::KeybindingOptions;
pub use playback::PlaybackOptions;
pub use preload::PreloadOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ScrubError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[playback]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Inertia, input gains and autoplay.
    pub playback: PlaybackOptions,
    /// Frame count, base path candidates and naming template.
    pub catalog: CatalogOptions,
    /// Initial batch and look-ahead window sizes.
    pub preload: PreloadOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the tunable options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, ScrubError> {
        let opts: Self = toml::from_str(content)
            .map_err(|e| ScrubError::OptionsParse(e.to_string()))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ScrubError> {
        let content = std::fs::read_to_string(path).map_err(ScrubError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ScrubError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ScrubError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ScrubError::Io)?;
        }
        std::fs::write(path, content).map_err(ScrubError::Io)
    }

    /// Reject values the play head or preloader cannot work with.
    pub fn validate(&self) -> Result<(), ScrubError> {
        let friction = self.playback.friction;
        if !(friction > 0.0 && friction < 1.0) {
            return Err(ScrubError::InvalidOptions(format!(
                "playback.friction must be in (0, 1), got {friction}"
            )));
        }
        if !self.playback.auto_play_speed.is_finite()
            || self.playback.auto_play_speed <= 0.0
        {
            return Err(ScrubError::InvalidOptions(
                "playback.auto_play_speed must be positive".into(),
            ));
        }
        let gains = [
            ("sensitivity", self.playback.sensitivity),
            ("key_impulse", self.playback.key_impulse),
            ("drag_gain", self.playback.drag_gain),
            ("rest_velocity", self.playback.rest_velocity),
        ];
        for (name, value) in gains {
            if !value.is_finite() || value < 0.0 {
                return Err(ScrubError::InvalidOptions(format!(
                    "playback.{name} must be finite and not negative, got {value}"
                )));
            }
        }
        if self.catalog.base_paths.is_empty() {
            return Err(ScrubError::InvalidOptions(
                "catalog.base_paths must list at least one candidate".into(),
            ));
        }
        if self.catalog.template.pad_width == 0 {
            return Err(ScrubError::InvalidOptions(
                "catalog.template.pad_width must be at least 1".into(),
            ));
        }
        if self.preload.window == 0 {
            return Err(ScrubError::InvalidOptions(
                "preload.window must be at least 1".into(),
            ));
        }
        let mut keys: Vec<&str> = self
            .keybindings
            .bindings
            .values()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        if let Some(pair) = keys.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(ScrubError::InvalidOptions(format!(
                "keybindings: key {:?} is bound to more than one action",
                pair[0]
            )));
        }
        Ok(())
    }
}
