//! Automated maze player.
//!
//! A [`Bot`] runs as its own task next to the presentation task that owns
//! the screen. It waits on a [`ReadyGate`], searches the world, replays the
//! path it found one paced move at a time, and reports everything as a
//! stream of [`BotEvent`]s. The player's position is published through a
//! [`PlayerHandle`] that other tasks read by snapshot only.

mod bot;
pub mod config;
pub mod events;
mod executor;
mod gate;
mod player;

pub use bot::{Bot, BotHandle};
pub use config::{Algorithm, BotConfig, ConfigError};
pub use events::{BotEvent, ChannelSink, EventSink, RunOutcome};
pub use executor::{MoveExecutor, Replay};
pub use gate::ReadyGate;
pub use player::{PlayerHandle, PlayerState};
