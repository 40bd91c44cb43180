//! Renderer parameters and the built-in presets.

use std::{fmt, str::FromStr, time::Duration};

use serde::Deserialize;

use crate::{Rgb, TickSpeed, chars};

/// Flasher opacity bounds.
pub const MIN_FLASH_OPACITY: f32 = 0.02;
pub const MAX_FLASH_OPACITY: f32 = 1.0;

/// Largest accepted glyph cell, in pixels.
pub const MAX_CELL_SIZE: u32 = 4096;

/// Parameters for the word flasher overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct FlashSettings {
    /// Words a flasher may spell out. Empty words are dropped.
    pub words: Vec<String>,
    /// Starting opacity, adjustable at runtime.
    pub opacity: f32,
    /// Chance per column per tick that an idle column spawns a flasher.
    pub spawn_probability: f64,
    pub color: Rgb,
}

/// Everything the rain renderer needs to know.
#[derive(Debug, Clone, PartialEq)]
pub struct RainSettings {
    /// Side length of one glyph cell, in pixels.
    pub cell_size: u32,
    pub base_interval: Duration,
    /// Alternative interval reachable with the speed toggle.
    pub fast_interval: Option<Duration>,
    /// Number of concurrent drops in each column.
    pub drops_per_column: usize,
    pub alphabet: Vec<char>,
    /// Opacity of the black overlay painted every tick.
    pub trail_opacity: f32,
    /// Chance that a glyph is drawn in the highlight color.
    pub highlight_probability: f64,
    /// Chance per tick that a drop below the bottom edge restarts at the top.
    pub reset_probability: f64,
    pub base_color: Rgb,
    pub highlight_color: Rgb,
    pub font_family: String,
    /// Whether `f` toggles bold glyphs.
    pub bold_toggle: bool,
    /// Whether `s` toggles the fast interval.
    pub speed_toggle: bool,
    /// Word flashers, when enabled.
    pub flash: Option<FlashSettings>,
}

impl RainSettings {
    /// Interval for the given tick speed. Falls back to the base interval
    /// when no fast interval is configured.
    pub fn interval(&self, speed: TickSpeed) -> Duration {
        match (speed, self.fast_interval) {
            (TickSpeed::Fast, Some(fast)) => fast,
            _ => self.base_interval,
        }
    }

    /// Clamp every numeric parameter into its valid range. NaN becomes
    /// the lower bound.
    pub fn normalized(mut self) -> Self {
        self.cell_size = self.cell_size.clamp(1, MAX_CELL_SIZE);
        self.trail_opacity = unit_f32(self.trail_opacity, 0.0);
        self.highlight_probability = unit_f64(self.highlight_probability);
        self.reset_probability = unit_f64(self.reset_probability);
        if self.alphabet.is_empty() {
            self.alphabet = chars::default_alphabet();
        }
        if let Some(flash) = self.flash.as_mut() {
            flash.words.retain(|w| !w.is_empty());
            flash.opacity = unit_f32(flash.opacity, MIN_FLASH_OPACITY);
            flash.spawn_probability = unit_f64(flash.spawn_probability);
        }
        self
    }
}

fn unit_f32(value: f32, min: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, 1.0)
    }
}

fn unit_f64(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

impl Default for RainSettings {
    fn default() -> Self {
        Preset::default().settings()
    }
}

/// A named starting point for [`RainSettings`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Dense rain with drifting words.
    #[default]
    Flash,
    /// Sparser rain with bold and speed toggles and no words.
    Classic,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Flash, Preset::Classic];

    /// Build the settings this preset stands for.
    pub fn settings(self) -> RainSettings {
        let common = RainSettings {
            cell_size: 12,
            base_interval: Duration::from_millis(50),
            fast_interval: None,
            drops_per_column: 4,
            alphabet: chars::default_alphabet(),
            trail_opacity: 0.12,
            highlight_probability: 0.03,
            reset_probability: 0.005,
            base_color: Rgb::RAIN_GREEN,
            highlight_color: Rgb::PALE_GREEN,
            font_family: "monospace".to_string(),
            bold_toggle: false,
            speed_toggle: false,
            flash: None,
        };

        match self {
            Preset::Flash => RainSettings {
                flash: Some(FlashSettings {
                    words: vec!["JSON SUBDOMAIN".to_string()],
                    opacity: 0.45,
                    spawn_probability: 0.0075,
                    color: Rgb::PALE_GREEN,
                }),
                ..common
            },
            Preset::Classic => RainSettings {
                drops_per_column: 2,
                fast_interval: Some(Duration::from_millis(25)),
                bold_toggle: true,
                speed_toggle: true,
                ..common
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Flash => "flash",
            Preset::Classic => "classic",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown preset '{s}' (expected flash or classic)"))
    }
}
