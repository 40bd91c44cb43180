//! Configuration file support for glyphfall.
//!
//! The config file is optional TOML. Every key overrides one field of the
//! chosen [`Preset`]; anything left out keeps the preset's value.
//!
//! ```toml
//! preset = "classic"
//! drops_per_column = 3
//! base_color = "#0F0"
//!
//! [flash]
//! enabled = true
//! words = ["WAKE UP", "KNOCK KNOCK"]
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use color_eyre::eyre::{Result, WrapErr, bail};
use directories::ProjectDirs;
use glyphfall_core::{FlashSettings, MAX_CELL_SIZE, Preset, RainSettings, Rgb};
use log::{info, warn};
use serde::Deserialize;

/// Name of the config file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Top-level config file contents.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub preset: Option<Preset>,
    /// Glyph cell size in pixels.
    pub cell_size: Option<u32>,
    pub base_interval_ms: Option<u64>,
    pub fast_interval_ms: Option<u64>,
    pub drops_per_column: Option<usize>,
    pub trail_opacity: Option<f32>,
    pub highlight_probability: Option<f64>,
    pub reset_probability: Option<f64>,
    pub base_color: Option<Rgb>,
    pub highlight_color: Option<Rgb>,
    pub font_family: Option<String>,
    /// Replaces the whole glyph alphabet.
    pub alphabet: Option<String>,
    pub bold_toggle: Option<bool>,
    pub speed_toggle: Option<bool>,
    /// Fixed RNG seed for a reproducible rain.
    pub seed: Option<u64>,
    pub flash: Option<FlashConfig>,
}

/// The `[flash]` table.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlashConfig {
    pub enabled: Option<bool>,
    pub words: Option<Vec<String>>,
    pub opacity: Option<f32>,
    pub spawn_probability: Option<f64>,
    pub color: Option<Rgb>,
}

/// Directories used by glyphfall, if the platform has a home directory.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "glyphfall")
}

impl Config {
    /// Default location of the config file.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load the config.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// tried and a missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            Some(path) => {
                info!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                warn!("could not determine config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&text)
            .wrap_err_with(|| format!("invalid config file {}", path.display()))?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).wrap_err("failed to parse TOML")
    }

    /// The preset this config builds on.
    pub fn preset(&self) -> Preset {
        self.preset.unwrap_or_default()
    }

    /// Resolve the config into renderer settings.
    pub fn settings(&self) -> Result<RainSettings> {
        let mut settings = self.preset().settings();

        if let Some(cell_size) = self.cell_size {
            if cell_size == 0 {
                bail!("cell_size must be at least 1 pixel");
            }
            if cell_size > MAX_CELL_SIZE {
                bail!("cell_size must be at most {MAX_CELL_SIZE} pixels");
            }
            settings.cell_size = cell_size;
        }
        if let Some(ms) = self.base_interval_ms {
            settings.base_interval = interval("base_interval_ms", ms)?;
        }
        if let Some(ms) = self.fast_interval_ms {
            settings.fast_interval = Some(interval("fast_interval_ms", ms)?);
        }
        if let Some(drops) = self.drops_per_column {
            settings.drops_per_column = drops;
        }
        if let Some(opacity) = self.trail_opacity {
            settings.trail_opacity = finite("trail_opacity", opacity.into())? as f32;
        }
        if let Some(p) = self.highlight_probability {
            settings.highlight_probability = finite("highlight_probability", p)?;
        }
        if let Some(p) = self.reset_probability {
            settings.reset_probability = finite("reset_probability", p)?;
        }
        if let Some(color) = self.base_color {
            settings.base_color = color;
        }
        if let Some(color) = self.highlight_color {
            settings.highlight_color = color;
        }
        if let Some(family) = &self.font_family {
            settings.font_family = family.clone();
        }
        if let Some(alphabet) = &self.alphabet {
            if alphabet.is_empty() {
                bail!("alphabet must contain at least one glyph");
            }
            settings.alphabet = alphabet.chars().collect();
        }
        if let Some(toggle) = self.bold_toggle {
            settings.bold_toggle = toggle;
        }
        if let Some(toggle) = self.speed_toggle {
            settings.speed_toggle = toggle;
        }
        if settings.speed_toggle && settings.fast_interval.is_none() {
            warn!("speed_toggle is set but no fast_interval_ms is configured");
        }
        if let Some(flash) = &self.flash {
            settings.flash = flash.merge(settings.flash.take())?;
        }

        Ok(settings.normalized())
    }
}

impl FlashConfig {
    /// Layer this table over the preset's flash settings.
    fn merge(&self, base: Option<FlashSettings>) -> Result<Option<FlashSettings>> {
        let flash = match (self.enabled, base) {
            (Some(false), _) => None,
            (_, Some(base)) => Some(base),
            // Turning flashers on for a preset without them borrows the
            // flash preset's defaults
            (Some(true), None) => Preset::Flash.settings().flash,
            (None, None) => {
                warn!("[flash] settings ignored: flashers are off for this preset");
                None
            }
        };
        let Some(mut flash) = flash else {
            return Ok(None);
        };

        if let Some(words) = &self.words {
            flash.words = words.clone();
        }
        if let Some(opacity) = self.opacity {
            flash.opacity = finite("flash.opacity", opacity.into())? as f32;
        }
        if let Some(p) = self.spawn_probability {
            flash.spawn_probability = finite("flash.spawn_probability", p)?;
        }
        if let Some(color) = self.color {
            flash.color = color;
        }
        Ok(Some(flash))
    }
}

/// Reject `nan` and `inf`, which TOML accepts as floats. Finite values are
/// clamped later by [`RainSettings::normalized`].
fn finite(key: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        bail!("{key} must be a finite number, got {value}");
    }
    Ok(value)
}

fn interval(key: &str, ms: u64) -> Result<Duration> {
    if ms == 0 {
        bail!("{key} must be greater than zero");
    }
    Ok(Duration::from_millis(ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_flash_preset() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.settings().unwrap(), Preset::Flash.settings());
    }

    #[test]
    fn test_preset_overrides() {
        let config = Config::from_toml(
            r##"
            preset = "classic"
            cell_size = 16
            drops_per_column = 3
            fast_interval_ms = 10
            base_color = "#00AA00"
            seed = 99
            "##,
        )
        .unwrap();

        assert_eq!(config.seed, Some(99));
        let settings = config.settings().unwrap();
        assert_eq!(settings.cell_size, 16);
        assert_eq!(settings.drops_per_column, 3);
        assert_eq!(settings.fast_interval, Some(Duration::from_millis(10)));
        assert_eq!(settings.base_color, Rgb::new(0, 0xAA, 0));
        assert!(settings.bold_toggle);
        assert!(settings.flash.is_none());
    }

    #[test]
    fn test_flash_table() {
        let config = Config::from_toml(
            r#"
            [flash]
            words = ["HELLO", ""]
            opacity = 0.6
            "#,
        )
        .unwrap();
        let flash = config.settings().unwrap().flash.unwrap();
        assert_eq!(flash.words, vec!["HELLO".to_string()]);
        assert_eq!(flash.opacity, 0.6);
        assert_eq!(flash.spawn_probability, 0.0075);
    }

    #[test]
    fn test_flash_enable_and_disable() {
        let on = Config::from_toml("preset = \"classic\"\n[flash]\nenabled = true\n").unwrap();
        assert!(on.settings().unwrap().flash.is_some());

        let off = Config::from_toml("[flash]\nenabled = false\n").unwrap();
        assert!(off.settings().unwrap().flash.is_none());

        let ignored = Config::from_toml("preset = \"classic\"\n[flash]\nopacity = 0.5\n").unwrap();
        assert!(ignored.settings().unwrap().flash.is_none());
    }

    #[test]
    fn test_custom_alphabet() {
        let config = Config::from_toml("alphabet = \"01\"").unwrap();
        assert_eq!(config.settings().unwrap().alphabet, vec!['0', '1']);

        let empty = Config::from_toml("alphabet = \"\"").unwrap();
        assert!(empty.settings().is_err());
    }

    #[test]
    fn test_probabilities_clamped() {
        let config = Config::from_toml("highlight_probability = 2.5\nreset_probability = -1.0").unwrap();
        let settings = config.settings().unwrap();
        assert_eq!(settings.highlight_probability, 1.0);
        assert_eq!(settings.reset_probability, 0.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Config::from_toml("base_color = \"green\"").is_err());
        assert!(Config::from_toml("preset = \"neon\"").is_err());
        assert!(Config::from_toml("unknown_key = 1").is_err());
        assert!(Config::from_toml("cell_size = 0").unwrap().settings().is_err());
        assert!(Config::from_toml("base_interval_ms = 0").unwrap().settings().is_err());
        assert!(Config::from_toml("cell_size = 400000000").unwrap().settings().is_err());
    }

    #[test]
    fn test_non_finite_numbers_rejected() {
        for text in [
            "highlight_probability = nan",
            "reset_probability = inf",
            "trail_opacity = -inf",
            "[flash]\nspawn_probability = nan",
            "[flash]\nopacity = nan",
        ] {
            let config = Config::from_toml(text).unwrap();
            assert!(config.settings().is_err(), "{text} should be rejected");
        }
    }

    #[test]
    fn test_largest_cell_size_accepted() {
        let config = Config::from_toml(&format!("cell_size = {MAX_CELL_SIZE}")).unwrap();
        assert_eq!(config.settings().unwrap().cell_size, MAX_CELL_SIZE);
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("glyphfall-test-{}.toml", std::process::id()));
        fs::write(&path, "drops_per_column = 7\n").unwrap();
        let config = Config::load(Some(path.as_path())).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.drops_per_column, Some(7));

        assert!(Config::load(Some(path.as_path())).is_err());
    }
}
