use dungeon_core::{
    Direction, DungeonConfig, GridMover, MoveOutcome, MoverConfig, SvgTileLayer, WallColliders,
    create_dungeon, draw_dungeon, place_actor, render_svg, session_rng,
};

use std::path::PathBuf;

use clap::Parser;
use svg::save as save_as_svg;
use tracing::{Level, event};

#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct Args {
    /// Number of columns in the map
    #[arg(long, default_value_t = 50)]
    width: u32,

    /// Number of rows in the map
    #[arg(long, default_value_t = 50)]
    height: u32,

    /// Smallest room side
    #[arg(long, default_value_t = 5)]
    min_room_size: u32,

    /// Largest room side
    #[arg(long, default_value_t = 10)]
    max_room_size: u32,

    /// Seed for a reproducible dungeon
    #[arg(short, long)]
    seed: Option<u64>,

    /// Seconds a single step takes
    #[arg(long, default_value_t = 0.2)]
    move_duration: f32,

    /// Simulated frame time in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    tick: f32,

    /// Steps to walk after spawning, e.g. east,east,south-west
    #[arg(short, long, value_enum, value_delimiter = ',')]
    moves: Vec<Direction>,

    /// Write the rendered map as SVG instead of printing it
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

// Upper bound on frames spent on one step, in case the mover never lands.
const MAX_TICKS_PER_MOVE: u32 = 10_000;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    if !(args.tick.is_finite() && args.tick > 0.0) {
        anyhow::bail!("tick must be a positive number of seconds, got {}", args.tick);
    }

    let mut rng = session_rng(args.seed);

    let config = DungeonConfig::new(
        args.width,
        args.height,
        args.min_room_size,
        args.max_room_size,
    );
    let dungeon = create_dungeon(config, &mut rng)?;

    event!(
        Level::INFO,
        "Generated {} rooms from {} leaves in {} split rounds ({} degenerate, {} oversized)",
        dungeon.rooms.len(),
        dungeon.report.leaves.len(),
        dungeon.report.split_rounds,
        dungeon.report.degenerate_leaves.len(),
        dungeon.report.oversized_leaves
    );

    let mut floor_layer = SvgTileLayer::floor();
    let mut wall_layer = SvgTileLayer::wall();
    draw_dungeon(&dungeon.grid, &mut floor_layer, &mut wall_layer);

    let mover_config = MoverConfig {
        move_duration: args.move_duration,
        ..Default::default()
    };
    let mut mover = GridMover::with_obstacles(
        mover_config,
        Box::new(WallColliders::from_grid(&dungeon.grid)),
    )?;

    let actor = match place_actor(&dungeon, Some(&mut mover), &mut rng) {
        Ok(spawn) => {
            event!(Level::INFO, "Actor spawned at {}", spawn);
            walk(&mut mover, &args.moves, args.tick);
            Some(mover.position())
        }
        Err(err) => {
            event!(Level::WARN, "Skipping walk: {}", err);
            None
        }
    };

    match args.output {
        Some(path) => {
            let document = render_svg(&dungeon.grid, &[&floor_layer, &wall_layer], actor);

            println!("Saving map as SVG to: {}", path.display());
            save_as_svg(&path, &document)?;
        }
        None => print!("{}", dungeon.grid),
    }

    Ok(())
}

fn walk(mover: &mut GridMover, moves: &[Direction], tick: f32) {
    for direction in moves {
        match mover.request_move(direction.to_vector()) {
            MoveOutcome::Started { .. } => {
                let mut ticks = 0;
                while !mover.tick(tick) && ticks < MAX_TICKS_PER_MOVE {
                    ticks += 1;
                }

                event!(
                    Level::INFO,
                    "Moved {} to {} in {} frames",
                    direction,
                    mover.position(),
                    ticks + 1
                );
            }
            MoveOutcome::Blocked { target } => {
                event!(Level::INFO, "Move {} blocked at {}", direction, target);
            }
            outcome => {
                event!(Level::WARN, "Move {} not started: {:?}", direction, outcome);
            }
        }
    }
}
