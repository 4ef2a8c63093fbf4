use clap::Parser;
use std::path::PathBuf;

use crate::constants::MAX_PLAYER_LIVES;

#[derive(Parser, Debug)]
#[command(name = "star-invaders")]
#[command(about = "Hold the line against sweeping rows of invaders")]
pub struct Cli {
    /// Seed for the random stream; the same seed replays the same spawns and volleys
    #[arg(long)]
    pub seed: Option<u64>,
    /// Run without sound effects
    #[arg(long)]
    pub mute: bool,
    /// Where to write the log (the terminal is taken by the game)
    #[arg(long, default_value = "invaders.log")]
    pub log_file: PathBuf,
    /// Spare ships at the start of a game
    #[arg(long, default_value_t = MAX_PLAYER_LIVES, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub lives: u8,
}

/// Runtime settings handed to the app
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub seed: Option<u64>,
    pub sound: bool,
    pub lives: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            sound: true,
            lives: MAX_PLAYER_LIVES,
        }
    }
}

impl From<&Cli> for Settings {
    fn from(cli: &Cli) -> Self {
        Self {
            seed: cli.seed,
            sound: !cli.mute,
            lives: cli.lives,
        }
    }
}
