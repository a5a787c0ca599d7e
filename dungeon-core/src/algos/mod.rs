mod dungeon_generator;
mod grid_mover;
mod obstacles;
mod placement;
mod tile_drawer;

pub use dungeon_generator::{Dungeon, DungeonConfig, DungeonGenerator, GenerationReport};
pub use grid_mover::{GridMover, MoveOutcome, MoveState, MoverConfig};
pub use obstacles::{ObstacleQuery, WallColliders};
pub use placement::place_actor;
pub use tile_drawer::{SvgTileLayer, TileLayer, draw_dungeon, render_svg};

use rand::{SeedableRng, rngs::StdRng};

pub(crate) struct RngHandler;

impl RngHandler {
    pub fn rng() -> impl rand::Rng {
        rand::rng()
    }

    /// A reproducible source when a seed is given, a freshly seeded one
    /// otherwise.
    pub fn from_seed(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}
