//! Command-line argument parsing.

use clap::Parser;

use crate::params::Mood;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "CubeStream")]
#[command(about = "Rotating wireframe cube with particles and a procedural chiptune", long_about = None)]
pub struct Args {
    /// Mood preset: arcade (default), mystical
    #[arg(long, value_name = "MOOD", default_value = "arcade")]
    pub mood: String,
}

impl Args {
    /// Parse mood preset from command-line arguments
    pub fn parse_mood(&self) -> Mood {
        match self.mood.to_lowercase().as_str() {
            "arcade" => Mood::Arcade,
            "mystical" => Mood::Mystical,
            other => {
                log::warn!("Unknown mood '{}', using arcade", other);
                Mood::Arcade
            }
        }
    }
}
