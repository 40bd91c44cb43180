//! Rain renderer state management.

use glyphfall_core::{
    Command, FontSpec, FontWeight, Key, MAX_FLASH_OPACITY, MIN_FLASH_OPACITY, RainSettings, Rgb,
    Scheduler, Surface, TextBaseline, TickSpeed,
};
use log::{debug, info};
use rand::Rng;

use crate::{
    RainRng,
    drops::{self, DropColumn},
    flasher::Flasher,
};

/// Amount one `[` or `]` press changes flasher opacity by.
pub const FLASH_OPACITY_STEP: f32 = 0.03;

/// Digital rain state.
///
/// All drop and flasher state is derived from the last size passed to
/// [`resize`](Self::resize); a resize throws it away and starts over.
#[derive(Debug)]
pub struct RainRenderer<R = RainRng> {
    settings: RainSettings,
    rng: R,
    /// Surface width in pixels.
    width: u32,
    /// Surface height in pixels.
    height: u32,
    /// Drop rows, one entry per column.
    columns: Vec<DropColumn>,
    /// Active flasher per column.
    flashers: Vec<Option<Flasher>>,
    paused: bool,
    weight: FontWeight,
    speed: TickSpeed,
    flash_opacity: f32,
}

impl<R: Rng> RainRenderer<R> {
    /// Create a renderer with no surface size yet. Call
    /// [`resize`](Self::resize) before the first tick.
    pub fn new(settings: RainSettings, rng: R) -> Self {
        let settings = settings.normalized();
        let flash_opacity = settings
            .flash
            .as_ref()
            .map_or(MAX_FLASH_OPACITY, |f| f.opacity);

        Self {
            settings,
            rng,
            width: 0,
            height: 0,
            columns: Vec::new(),
            flashers: Vec::new(),
            paused: false,
            weight: FontWeight::Normal,
            speed: TickSpeed::Base,
            flash_opacity,
        }
    }

    pub fn settings(&self) -> &RainSettings {
        &self.settings
    }

    /// Number of glyph columns across the surface.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of whole glyph rows that fit on the surface.
    pub fn max_rows(&self) -> u32 {
        self.height / self.settings.cell_size
    }

    pub fn columns(&self) -> &[DropColumn] {
        &self.columns
    }

    pub fn flashers(&self) -> &[Option<Flasher>] {
        &self.flashers
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn speed(&self) -> TickSpeed {
        self.speed
    }

    pub fn flash_opacity(&self) -> f32 {
        self.flash_opacity
    }

    /// The tick interval currently in effect.
    pub fn interval(&self) -> std::time::Duration {
        self.settings.interval(self.speed)
    }

    /// Rebuild the grid for a new surface size.
    ///
    /// Every drop is placed at a fresh random row and all flashers are
    /// dropped, since old column indices no longer mean anything.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;

        let column_count = (width / self.settings.cell_size) as usize;
        self.columns = drops::init_columns(
            column_count,
            self.settings.drops_per_column,
            self.max_rows(),
            &mut self.rng,
        );
        self.flashers = vec![None; column_count];

        info!(
            "resized to {width}x{height}px: {column_count} columns, {} rows",
            self.max_rows()
        );
    }

    /// Start the timer at the current interval.
    pub fn start<S: Scheduler + ?Sized>(&self, scheduler: &mut S) {
        scheduler.schedule(self.interval());
    }

    /// Paint one frame and advance every drop and flasher.
    ///
    /// Does nothing at all while paused.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if self.paused {
            return;
        }

        let cell = self.settings.cell_size;
        let cell_px = cell as f32;

        // Fade the previous frames instead of erasing them
        surface.fill_rect(
            0.0,
            0.0,
            self.width as f32,
            self.height as f32,
            Rgb::BLACK,
            self.settings.trail_opacity,
        );
        surface.set_font(&self.font());
        surface.set_text_baseline(TextBaseline::Top);

        let mut utf8 = [0u8; 4];
        let alphabet = &self.settings.alphabet;
        for (x, column) in self.columns.iter_mut().enumerate() {
            for row in &mut column.rows {
                let glyph = alphabet[self.rng.gen_range(0..alphabet.len())];
                let color = if self.rng.gen_bool(self.settings.highlight_probability) {
                    self.settings.highlight_color
                } else {
                    self.settings.base_color
                };
                surface.draw_text(
                    glyph.encode_utf8(&mut utf8),
                    x as f32 * cell_px,
                    *row as f32 * cell_px,
                    color,
                    1.0,
                );

                drops::advance(
                    row,
                    cell,
                    self.height,
                    self.settings.reset_probability,
                    &mut self.rng,
                );
            }
        }

        self.tick_flashers(surface);
    }

    /// Spawn, draw and advance word flashers. Drawn after the rain so the
    /// words sit on top.
    fn tick_flashers<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let max_rows = self.max_rows();
        let cell_px = self.settings.cell_size as f32;
        let Some(flash) = &self.settings.flash else {
            return;
        };

        for (x, slot) in self.flashers.iter_mut().enumerate() {
            if slot.is_none() && self.rng.gen_bool(flash.spawn_probability) {
                *slot = Flasher::spawn(&flash.words, max_rows, &mut self.rng);
                if let Some(flasher) = slot.as_ref() {
                    debug!(
                        "flasher '{}' spawned in column {x} at row {}",
                        flasher.word(),
                        flasher.start_row()
                    );
                }
            }
        }

        let mut utf8 = [0u8; 4];
        for (x, slot) in self.flashers.iter_mut().enumerate() {
            let Some(flasher) = slot.as_mut() else {
                continue;
            };

            let frame = flasher.advance(max_rows);
            if let Some((letter, row)) = frame.glyph {
                surface.draw_text(
                    letter.encode_utf8(&mut utf8),
                    x as f32 * cell_px,
                    row as f32 * cell_px,
                    flash.color,
                    self.flash_opacity,
                );
            }
            if !frame.alive {
                *slot = None;
            }
        }
    }

    /// Font used for every glyph, sized to one cell.
    pub fn font(&self) -> FontSpec {
        FontSpec {
            family: self.settings.font_family.clone(),
            size: self.settings.cell_size as f32,
            weight: self.weight,
        }
    }

    /// Handle a key press. Returns `true` when the key did something.
    pub fn handle_key<S, T>(&mut self, key: Key, surface: &mut S, scheduler: &mut T) -> bool
    where
        S: Surface + ?Sized,
        T: Scheduler + ?Sized,
    {
        Command::from_key(key).is_some_and(|command| self.apply(command, surface, scheduler))
    }

    /// Run a command. Commands the current settings don't enable are
    /// ignored and return `false`.
    pub fn apply<S, T>(&mut self, command: Command, surface: &mut S, scheduler: &mut T) -> bool
    where
        S: Surface + ?Sized,
        T: Scheduler + ?Sized,
    {
        match command {
            Command::TogglePause => {
                self.toggle_pause();
                true
            }
            Command::DimFlash => self.adjust_flash_opacity(-FLASH_OPACITY_STEP),
            Command::BrightenFlash => self.adjust_flash_opacity(FLASH_OPACITY_STEP),
            Command::ToggleBold => self.toggle_bold(),
            Command::ToggleSpeed => self.toggle_speed(scheduler),
            Command::Reset => {
                self.reset(surface);
                true
            }
        }
    }

    /// Freeze or resume. The timer keeps running; ticks become no-ops.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!("{}", if self.paused { "paused" } else { "resumed" });
    }

    /// Nudge flasher opacity by `delta`, rounded to hundredths and kept
    /// within `[MIN_FLASH_OPACITY, MAX_FLASH_OPACITY]`.
    pub fn adjust_flash_opacity(&mut self, delta: f32) -> bool {
        if self.settings.flash.is_none() {
            return false;
        }
        let next = ((self.flash_opacity + delta) * 100.0).round() / 100.0;
        self.flash_opacity = next.clamp(MIN_FLASH_OPACITY, MAX_FLASH_OPACITY);
        debug!("flash opacity {:.2}", self.flash_opacity);
        true
    }

    /// Switch glyphs between normal and bold weight.
    pub fn toggle_bold(&mut self) -> bool {
        if !self.settings.bold_toggle {
            return false;
        }
        self.weight = self.weight.toggle();
        info!("glyph weight {:?}", self.weight);
        true
    }

    /// Switch between base and fast ticks and reschedule the timer.
    pub fn toggle_speed<T: Scheduler + ?Sized>(&mut self, scheduler: &mut T) -> bool {
        if !self.settings.speed_toggle || self.settings.fast_interval.is_none() {
            return false;
        }
        self.speed = self.speed.toggle();
        scheduler.cancel();
        scheduler.schedule(self.interval());
        info!("tick interval {:?}", self.interval());
        true
    }

    /// Re-seed every drop for the current size and wipe the surface.
    pub fn reset<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.columns = drops::init_columns(
            self.columns.len(),
            self.settings.drops_per_column,
            self.max_rows(),
            &mut self.rng,
        );
        self.flashers.iter_mut().for_each(|slot| *slot = None);
        surface.clear_rect(0.0, 0.0, self.width as f32, self.height as f32);
        info!("rain reset");
    }
}
