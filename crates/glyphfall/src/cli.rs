//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use glyphfall_config::Config;
use glyphfall_core::Preset;

/// Digital rain for your terminal.
///
/// Keys: space pauses, [ and ] dim or brighten words, f toggles bold,
/// s toggles speed, q or Esc restarts the rain, Ctrl-C quits.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Preset to start from: flash or classic
    #[arg(short, long)]
    pub preset: Option<Preset>,

    /// Config file to load instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed for a reproducible rain
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of drops falling in each column
    #[arg(short, long)]
    pub drops: Option<usize>,
}

impl Cli {
    /// Apply command-line overrides on top of the config file.
    pub fn apply(&self, config: &mut Config) {
        if let Some(preset) = self.preset {
            config.preset = Some(preset);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(drops) = self.drops {
            config.drops_per_column = Some(drops);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from(["glyphfall", "--preset", "classic", "--seed", "7", "-d", "3"])
            .unwrap();
        assert_eq!(cli.preset, Some(Preset::Classic));
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.drops, Some(3));
    }

    #[test]
    fn test_bad_preset_rejected() {
        assert!(Cli::try_parse_from(["glyphfall", "--preset", "neon"]).is_err());
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from(["glyphfall", "-p", "classic", "--seed", "1"]).unwrap();
        let mut config = Config::from_toml("preset = \"flash\"\nseed = 5\ndrops_per_column = 6").unwrap();
        cli.apply(&mut config);

        assert_eq!(config.preset, Some(Preset::Classic));
        assert_eq!(config.seed, Some(1));
        assert_eq!(config.drops_per_column, Some(6));
    }
}
