//! Key bindings.

/// A discrete key press delivered by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
}

/// An action the renderer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Freeze or resume the animation.
    TogglePause,
    /// Lower flasher opacity by one step.
    DimFlash,
    /// Raise flasher opacity by one step.
    BrightenFlash,
    /// Switch glyphs between normal and bold weight.
    ToggleBold,
    /// Switch between the base and fast tick interval.
    ToggleSpeed,
    /// Re-seed every drop and wipe the surface.
    Reset,
}

impl Command {
    /// Map a key press to its command, if it is bound.
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Char(' ') => Some(Command::TogglePause),
            Key::Char('[') => Some(Command::DimFlash),
            Key::Char(']') => Some(Command::BrightenFlash),
            Key::Char('f' | 'F') => Some(Command::ToggleBold),
            Key::Char('s' | 'S') => Some(Command::ToggleSpeed),
            Key::Char('q' | 'Q') | Key::Escape => Some(Command::Reset),
            Key::Char(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(Command::from_key(Key::Char(' ')), Some(Command::TogglePause));
        assert_eq!(Command::from_key(Key::Char('[')), Some(Command::DimFlash));
        assert_eq!(Command::from_key(Key::Char(']')), Some(Command::BrightenFlash));
        assert_eq!(Command::from_key(Key::Char('F')), Some(Command::ToggleBold));
        assert_eq!(Command::from_key(Key::Char('s')), Some(Command::ToggleSpeed));
        assert_eq!(Command::from_key(Key::Char('Q')), Some(Command::Reset));
        assert_eq!(Command::from_key(Key::Escape), Some(Command::Reset));
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(Command::from_key(Key::Char('x')), None);
        assert_eq!(Command::from_key(Key::Char('1')), None);
    }
}
