//! maze-explorer: load or generate a maze, then watch the automated player
//! search it and walk the path it found.

mod board;
mod cli;

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::mpsc;

use anyhow::{Context as _, anyhow};
use clap::Parser;
use log::{debug, info, warn};
use maze_bot::{Bot, BotEvent};
use tracing_subscriber::EnvFilter;

use board::Board;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = cli.bot_config()?;
    let world = Arc::new(cli.load_world()?);
    info!(
        "loaded {}x{} maze with {} walls",
        world.size(),
        world.size(),
        world.wall_count()
    );

    let (tx, rx) = mpsc::channel();
    let handle = Bot::new(Arc::clone(&world), config)
        .spawn(tx)
        .context("spawning the automation thread")?;

    let mut board = Board::new(world);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    handle.ready();
    for event in rx.iter() {
        if cli.json {
            serde_json::to_writer(&mut out, &event)?;
            writeln!(out)?;
        }
        if let BotEvent::Step { to, score, .. } = &event {
            // The shared position is committed after the step delay.
            let committed = handle.player();
            debug!(
                "stepping to {to} (score {score}), committed at {} (score {})",
                committed.pos, committed.score
            );
        }
        if board.update(&event) {
            break;
        }
    }

    let player = handle.player();
    let outcome = handle
        .join()
        .map_err(|_| anyhow!("automation thread panicked"))?;
    info!("outcome: {outcome:?}");
    if board.outcome() != Some(outcome) {
        warn!("event stream ended without reporting {outcome:?}");
    }
    if (player.pos, player.score) != (board.player(), board.score()) {
        warn!(
            "board shows {} after {} moves, player is at {} after {}",
            board.player(),
            board.score(),
            player.pos,
            player.score
        );
    }

    if !cli.json {
        writeln!(out, "{}", board.draw())?;
    }
    out.flush()?;
    Ok(())
}
