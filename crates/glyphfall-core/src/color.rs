//! RGB colors and hex parsing.

use std::{fmt, str::FromStr};

use serde::Deserialize;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// Classic rain green (`#0F0`).
    pub const RAIN_GREEN: Rgb = Rgb::new(0, 255, 0);
    /// Pale green used for highlighted glyphs (`#B7FFB7`).
    pub const PALE_GREEN: Rgb = Rgb::new(183, 255, 183);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    MissingHash,
    BadLength(usize),
    BadDigit(char),
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::MissingHash => write!(f, "color must start with '#'"),
            ParseColorError::BadLength(n) => {
                write!(f, "expected 3 or 6 hex digits, found {n}")
            }
            ParseColorError::BadDigit(c) => write!(f, "invalid hex digit '{c}'"),
        }
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse `#RGB` or `#RRGGBB`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().strip_prefix('#').ok_or(ParseColorError::MissingHash)?;

        let digits = hex
            .chars()
            .map(|c| {
                c.to_digit(16)
                    .map(|d| d as u8)
                    .ok_or(ParseColorError::BadDigit(c))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        match digits.as_slice() {
            // Short form repeats each nibble: #0F0 -> #00FF00
            [r, g, b] => Ok(Rgb::new(r * 17, g * 17, b * 17)),
            [r1, r2, g1, g2, b1, b2] => Ok(Rgb::new(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2)),
            other => Err(ParseColorError::BadLength(other.len())),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
