//! Word flashers: a short word revealed one letter per tick down a column.

use rand::{Rng, seq::SliceRandom};

/// Minimum height, in rows, of the band a flasher may start in.
const MIN_START_BAND: u32 = 5;

/// Rows a flasher may travel past the bottom edge before it is dropped.
const OFFSCREEN_MARGIN: u32 = 2;

/// An active word flasher in one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flasher {
    word: Vec<char>,
    step: usize,
    start_row: u32,
}

/// The outcome of advancing a flasher by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashFrame {
    /// Letter to draw and the row to draw it on, when it is on screen.
    pub glyph: Option<(char, u32)>,
    /// Whether the flasher survives into the next tick.
    pub alive: bool,
}

impl Flasher {
    pub fn new(word: &str, start_row: u32) -> Self {
        Self {
            word: word.chars().collect(),
            step: 0,
            start_row,
        }
    }

    /// Pick a random word and a start row within the top third of the
    /// screen (at least [`MIN_START_BAND`] rows tall).
    ///
    /// Returns `None` when there is no non-empty word to show.
    pub fn spawn<R: Rng + ?Sized>(words: &[String], max_rows: u32, rng: &mut R) -> Option<Self> {
        let word = words.choose(rng)?;
        if word.is_empty() {
            return None;
        }
        let band = MIN_START_BAND.max(max_rows / 3);
        Some(Self::new(word, rng.gen_range(0..band)))
    }

    pub fn word(&self) -> String {
        self.word.iter().collect()
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn start_row(&self) -> u32 {
        self.start_row
    }

    /// Reveal the next letter.
    ///
    /// The flasher dies once its last letter is shown or once it has moved
    /// [`OFFSCREEN_MARGIN`] rows past the bottom, whichever comes first.
    pub fn advance(&mut self, max_rows: u32) -> FlashFrame {
        let Some(&letter) = self.word.get(self.step) else {
            return FlashFrame {
                glyph: None,
                alive: false,
            };
        };

        let row = self.start_row.saturating_add(self.step as u32);
        let glyph = (row < max_rows).then_some((letter, row));

        self.step += 1;
        let bottom = self.start_row.saturating_add(self.step as u32);
        let alive = self.step < self.word.len() && bottom < max_rows + OFFSCREEN_MARGIN;

        FlashFrame { glyph, alive }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RainRng;

    #[test]
    fn test_reveals_one_letter_per_tick() {
        let mut flasher = Flasher::new("RUN", 2);

        let frame = flasher.advance(10);
        assert_eq!(frame.glyph, Some(('R', 2)));
        assert!(frame.alive);

        let frame = flasher.advance(10);
        assert_eq!(frame.glyph, Some(('U', 3)));
        assert!(frame.alive);

        let frame = flasher.advance(10);
        assert_eq!(frame.glyph, Some(('N', 4)));
        assert!(!frame.alive);
    }

    #[test]
    fn test_dies_past_bottom_margin() {
        let mut flasher = Flasher::new("FOLLOW THE WHITE RABBIT", 4);
        let mut ticks = 0;
        loop {
            let frame = flasher.advance(10);
            ticks += 1;
            if let Some((_, row)) = frame.glyph {
                assert!(row < 10);
            }
            if !frame.alive {
                break;
            }
        }
        // 4 + step reaches 10 + 2 after 8 ticks
        assert_eq!(ticks, 8);
    }

    #[test]
    fn test_offscreen_letters_not_drawn() {
        let mut flasher = Flasher::new("ABCDEF", 9);
        assert_eq!(flasher.advance(10).glyph, Some(('A', 9)));

        let frame = flasher.advance(10);
        assert_eq!(frame.glyph, None);
        assert!(frame.alive);

        let frame = flasher.advance(10);
        assert_eq!(frame.glyph, None);
        assert!(!frame.alive);
    }

    #[test]
    fn test_multibyte_word() {
        let mut flasher = Flasher::new("ネオ", 0);
        assert_eq!(flasher.advance(10).glyph, Some(('ネ', 0)));
        assert_eq!(flasher.advance(10).glyph, Some(('オ', 1)));
    }

    #[test]
    fn test_spawn_start_band() {
        let mut rng = RainRng::from_seed_u64(3);
        let words = vec!["WAKE UP".to_string()];
        for _ in 0..200 {
            let flasher = Flasher::spawn(&words, 30, &mut rng).expect("word available");
            assert!(flasher.start_row() < 10);
            assert_eq!(flasher.step(), 0);
        }
        for _ in 0..200 {
            let flasher = Flasher::spawn(&words, 6, &mut rng).expect("word available");
            assert!(flasher.start_row() < 5);
        }
    }

    #[test]
    fn test_spawn_without_words() {
        let mut rng = RainRng::from_seed_u64(3);
        assert!(Flasher::spawn(&[], 30, &mut rng).is_none());
        assert!(Flasher::spawn(&[String::new()], 30, &mut rng).is_none());
    }
}
