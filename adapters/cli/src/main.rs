#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Station Siege headlessly with an autopilot.

mod autopilot;
mod config;
mod logging;
mod session;

use std::{
    path::PathBuf,
    thread,
    time::Instant,
};

use anyhow::Result;
use clap::Parser;
use station_siege_core::GamePhase;
use station_siege_world::{query, LevelCatalogue};

use crate::{autopilot::Autopilot, config::RunConfig, session::Session};

/// Headless Station Siege runner driven by a scripted player.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Args {
    /// Number of frames to simulate
    #[arg(long)]
    pub(crate) frames: Option<u32>,
    /// Seed for the spawn director
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Simulated milliseconds per frame
    #[arg(long)]
    pub(crate) frame_millis: Option<u64>,
    /// Pace frames against the wall clock instead of running flat out
    #[arg(long)]
    pub(crate) realtime: bool,
    /// Start a new campaign whenever the game ends
    #[arg(long)]
    pub(crate) restart_on_game_over: bool,
    /// TOML file with run settings; flags override its values
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,
    /// Enable verbose logging
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

/// Entry point for the Station Siege command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);
    let config = RunConfig::resolve(&args)?;

    let mut session = Session::new(&config, LevelCatalogue::builtin());
    let mut autopilot = Autopilot::new(config.mouse_sensitivity, config.restart_on_game_over);
    println!("{}", query::welcome_banner(session.world()));
    session.boot();

    let frame = config.frame_duration();
    let mut last_frame = Instant::now();
    for _ in 0..config.frames {
        let world = session.world();
        if query::phase(world) == GamePhase::GameOver && !config.restart_on_game_over {
            break;
        }

        let input = autopilot.next_input(
            &query::snapshot(world),
            query::grid(world),
            query::clock(world),
        );
        let elapsed = if config.realtime {
            let spent = last_frame.elapsed();
            if spent < frame {
                thread::sleep(frame - spent);
            }
            let elapsed = last_frame.elapsed();
            last_frame = Instant::now();
            elapsed
        } else {
            frame
        };
        session.frame(&input, elapsed);
    }

    print_summary(&session);
    Ok(())
}

fn print_summary(session: &Session) {
    let world = session.world();
    let stats = session.stats();
    let outcome = query::outcome(world)
        .map_or_else(|| "undecided".to_owned(), |outcome| format!("{outcome:?}"));

    println!(
        "phase {:?}, outcome {outcome}, level {}/{}",
        query::phase(world),
        query::level(world),
        query::level_count(world)
    );
    println!(
        "score {}, points available {}, simulated {:.1}s over {} frames",
        query::score(world),
        query::points_available(world),
        query::clock(world).as_secs_f32(),
        stats.frames
    );
    println!(
        "games {}, levels cleared {}, systems repaired {}, upgrades {}",
        stats.games_started, stats.levels_cleared, stats.systems_repaired, stats.upgrades_purchased
    );
    println!(
        "enemies spawned {} (skipped {}), killed {}, shots {} (refused {}), powerups {}, damage taken {}",
        stats.enemies_spawned,
        session.abandoned_spawns(),
        stats.enemies_killed,
        stats.shots_fired,
        stats.shots_rejected,
        stats.powerups_collected,
        stats.damage_taken
    );
}
