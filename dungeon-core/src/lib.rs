mod algos;
mod constants;
mod error;
mod grid;
mod types;

use tracing::{Level, span};

pub use algos::{
    Dungeon, DungeonConfig, DungeonGenerator, GenerationReport, GridMover, MoveOutcome,
    MoveState, MoverConfig, ObstacleQuery, SvgTileLayer, TileLayer, WallColliders, draw_dungeon,
    place_actor, render_svg,
};
pub use error::{ConfigError, SpawnError};
pub use grid::CellGrid;
pub use types::{Cell, CellKind, Corridor, Direction, Rect, Room, Vector2};

pub use rand::rngs::StdRng;

/// Random source for one session. Passing a seed makes every draw
/// reproducible.
pub fn session_rng(seed: Option<u64>) -> StdRng {
    algos::RngHandler::from_seed(seed)
}

/// Validates `config` and generates one dungeon from `rng`.
pub fn create_dungeon(
    config: DungeonConfig,
    rng: &mut impl rand::Rng,
) -> Result<Dungeon, ConfigError> {
    let span = span!(Level::DEBUG, "create_dungeon");
    let _guard = span.enter();

    let generator = DungeonGenerator::new(config)?;

    Ok(generator.generate_with(rng))
}
