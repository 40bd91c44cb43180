//! Core types shared by the glyphfall crates.
//!
//! The renderer never talks to a terminal or a window directly. It draws
//! through the [`Surface`] trait and drives its timer through the
//! [`Scheduler`] trait, so both can be swapped out in tests.

pub mod chars;
mod color;
mod input;
mod schedule;
mod settings;
mod surface;

pub use color::{ParseColorError, Rgb};
pub use input::{Command, Key};
pub use schedule::{Scheduler, TickSpeed};
pub use settings::{
    FlashSettings, MAX_CELL_SIZE, MAX_FLASH_OPACITY, MIN_FLASH_OPACITY, Preset, RainSettings,
};
pub use surface::{FontSpec, FontWeight, Surface, TextBaseline};
