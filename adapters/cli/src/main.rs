#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Maze Chase experience.
//!
//! The adapter owns everything the core deliberately does not: argument
//! parsing, terminal rendering, the score record on disk, and the pacing of
//! the scripted demonstration ticks. All game behaviour flows through world
//! commands and queries.

mod score_record;
mod session_code;

use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Parser;
use maze_chase_core::{CellCoord, Command, DifficultyTier, LevelPhase, MazeGrid};
use maze_chase_system_bootstrap::{Bootstrap, LevelOverview};
use maze_chase_system_pursuit::Pursuit;
use maze_chase_world::{self as world, query, World};
use rand::RngCore;

use score_record::ScoreRecord;
use session_code::SessionCode;

/// Command-line options accepted by the Maze Chase adapter.
#[derive(Debug, Parser)]
#[command(name = "maze-chase", about = "Runs a scripted Maze Chase session")]
struct Args {
    /// Difficulty tier for the session (easy or hard).
    #[arg(long, default_value = "easy", value_parser = parse_tier)]
    tier: DifficultyTier,

    /// Session seed; a random seed is drawn when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Shared session code to replay instead of tier and seed.
    #[arg(long)]
    session: Option<String>,

    /// Number of simulated one-second ticks to run.
    #[arg(long, default_value_t = 3)]
    ticks: u32,

    /// Overlay the enemy's route on the rendered maze.
    #[arg(long)]
    trail: bool,

    /// File storing the two-line score record.
    #[arg(long, default_value = "scores.txt")]
    score_file: PathBuf,
}

fn parse_tier(value: &str) -> Result<DifficultyTier, String> {
    match value {
        "easy" => Ok(DifficultyTier::Easy),
        "hard" => Ok(DifficultyTier::Hard),
        other => Err(format!("unknown tier '{other}', expected easy or hard")),
    }
}

/// Entry point for the Maze Chase command-line interface.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (tier, seed) = match &args.session {
        Some(code) => {
            let session = SessionCode::decode(code).context("could not decode session code")?;
            (session.tier, session.seed)
        }
        None => (
            args.tier,
            args.seed.unwrap_or_else(|| rand::thread_rng().next_u64()),
        ),
    };

    let mut world = World::new();
    let bootstrap = Bootstrap::default();
    let mut pursuit = Pursuit::default();

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureSession { tier, seed },
        &mut events,
    );

    println!(
        "{} ({:?} tier, seed {seed:#018x})",
        bootstrap.welcome_banner(&world),
        query::tier(&world)
    );
    render_level(&bootstrap, &world, args.trail);

    for _ in 0..args.ticks {
        let mut tick_events = Vec::new();
        world::apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(1),
            },
            &mut tick_events,
        );

        let route = query::pursuit_route(&world);
        let enemy = query::enemy_cell(&world);
        let mut commands = Vec::new();
        pursuit.handle(&tick_events, enemy, &route, &mut commands);
        for command in commands {
            world::apply(&mut world, command, &mut tick_events);
        }

        if query::phase(&world) != LevelPhase::Active {
            break;
        }
    }

    match query::phase(&world) {
        LevelPhase::Active => {
            println!(
                "time remaining: {:.1}s of {:.1}s",
                query::time_remaining(&world).as_secs_f64(),
                query::time_budget(&world).as_secs_f64()
            );
            render_level(&bootstrap, &world, args.trail);
        }
        LevelPhase::Cleared => println!("level cleared"),
        LevelPhase::Failed => {
            println!("the chase ended; the enemy's remaining route:");
            render_level(&bootstrap, &world, true);
        }
    }

    let next_wins = query::wins(&world) + 1;
    let preview = maze_chase_system_progression::grid_size(tier, next_wins);
    println!(
        "next milestone: {}x{} grid with {} pickups",
        preview.get(),
        preview.get(),
        maze_chase_system_progression::pickup_count(next_wins)
    );

    let record = ScoreRecord::read(&args.score_file).unwrap_or_default();
    let banked = record.bank(query::score(&world));
    banked
        .write(&args.score_file)
        .with_context(|| format!("could not persist {}", args.score_file.display()))?;
    println!("score {} (top {})", banked.current, banked.top);

    let share = SessionCode {
        grid_size: maze_chase_system_progression::grid_size(tier, 0).get(),
        tier,
        seed,
    };
    println!("session code: {}", share.encode());

    Ok(())
}

fn render_level(bootstrap: &Bootstrap, world: &World, trail: bool) {
    let maze = bootstrap.maze(world);
    let overview = bootstrap.level_overview(world);
    let route = query::pursuit_route(world);
    let size = maze.size().get();

    for row in 0..size {
        let mut line = String::with_capacity(size as usize);
        for column in 0..size {
            let cell = CellCoord::new(column, row);
            line.push(glyph_for(cell, &overview, maze, trail, &route));
        }
        println!("{line}");
    }
    println!(
        "level {} | score {} | losses {} | cell size {}px",
        overview.wins, overview.score, overview.losses, overview.cell_size
    );
}

fn glyph_for(
    cell: CellCoord,
    overview: &LevelOverview,
    maze: &MazeGrid,
    trail: bool,
    route: &[CellCoord],
) -> char {
    if cell == overview.player {
        '@'
    } else if cell == overview.goal {
        'G'
    } else if cell == overview.enemy {
        'E'
    } else if overview.pickups.contains(&cell) {
        '*'
    } else if trail && route.contains(&cell) {
        '~'
    } else if maze.is_open(cell) {
        '.'
    } else {
        '#'
    }
}
