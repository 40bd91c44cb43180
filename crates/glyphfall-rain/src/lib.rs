//! Digital rain rendering for glyphfall.
//!
//! [`RainRenderer`] owns every drop and flasher and paints them onto any
//! [`Surface`](glyphfall_core::Surface). It holds no timers of its own;
//! the frontend calls [`RainRenderer::tick`] whenever its
//! [`Scheduler`](glyphfall_core::Scheduler) fires.

mod drops;
mod flasher;
mod renderer;
mod rng;

pub use drops::DropColumn;
pub use flasher::{FlashFrame, Flasher};
pub use renderer::{FLASH_OPACITY_STEP, RainRenderer};
pub use rng::RainRng;
