//! Command-line interface.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use maze_bot::{BotConfig, ConfigError};
use maze_core::{MapGen, MapGenConfig, World, load_map};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Parser)]
#[command(name = "maze-explorer")]
#[command(version)]
#[command(about = "Watch an automated player solve a grid maze")]
#[command(long_about = None)]
pub struct Cli {
    /// Map file: a size header line, then rows of `.` `#` `s` `e`
    #[arg(required_unless_present = "random_seed")]
    pub map: Option<PathBuf>,

    /// Generate a random map from this seed instead of loading a file
    #[arg(long, conflicts_with = "map")]
    pub random_seed: Option<u64>,

    /// Side length of a generated map
    #[arg(long, default_value_t = 16, requires = "random_seed")]
    pub size: i32,

    /// Wall probability of a generated map, in [0, 1]
    #[arg(long, default_value_t = 0.25, requires = "random_seed")]
    pub density: f64,

    /// Search algorithm driving the player
    #[arg(long, default_value = "Astar")]
    pub algo: String,

    /// Pause between replayed moves, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub delay_ms: u64,

    /// Print every event as a JSON line instead of the final board
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn bot_config(&self) -> Result<BotConfig, ConfigError> {
        Ok(BotConfig::for_algorithm(&self.algo)?
            .with_step_delay(Duration::from_millis(self.delay_ms)))
    }

    pub fn load_world(&self) -> anyhow::Result<World> {
        if let Some(seed) = self.random_seed {
            let config = MapGenConfig {
                size: self.size,
                wall_density: self.density,
            };
            return MapGen::new(StdRng::seed_from_u64(seed))
                .generate(&config)
                .with_context(|| format!("generating a map from seed {seed}"));
        }
        let path = self
            .map
            .as_ref()
            .context("either a map file or --random-seed is required")?;
        load_map(path).with_context(|| format!("loading map {}", path.display()))
    }
}
