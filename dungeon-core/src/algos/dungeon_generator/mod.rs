use crate::{
    algos::RngHandler,
    error::{ConfigError, SpawnError},
    grid::CellGrid,
    types::{Cell, Corridor, Rect, Room},
};

use rand::Rng;
use serde::Serialize;
use tracing::event;

mod bsp;
mod builder_config;
mod carve_corridors;
mod derive_walls;
mod place_rooms;

pub use builder_config::DungeonConfig;

/// What happened during a generation run besides the resulting layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GenerationReport {
    pub leaves: Vec<Rect>,
    pub split_rounds: u32,
    // Leaves still above the split threshold once splitting stopped.
    pub oversized_leaves: usize,
    // Leaves too small to hold a room of the configured size.
    pub degenerate_leaves: Vec<Rect>,
    pub wall_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dungeon {
    pub grid: CellGrid,
    // In placement order; corridors join each room to the one before it.
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
    pub report: GenerationReport,
}

impl Dungeon {
    pub fn is_floor(&self, col: i32, row: i32) -> bool {
        self.grid.is_floor(col, row)
    }

    pub fn is_wall(&self, col: i32, row: i32) -> bool {
        self.grid.is_wall(col, row)
    }

    /// A random floor cell inside a random room.
    pub fn pick_spawn_point(&self, rng: &mut impl Rng) -> Result<Cell, SpawnError> {
        if self.rooms.is_empty() {
            return Err(SpawnError::NoRooms);
        }

        let room = &self.rooms[rng.random_range(0..self.rooms.len())];

        Ok(room.random_floor_position(rng))
    }
}

pub struct DungeonGenerator {
    config: DungeonConfig,
}

impl DungeonGenerator {
    pub fn new(config: DungeonConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(DungeonGenerator { config })
    }

    pub fn generate(&self) -> Dungeon {
        self.generate_with(&mut RngHandler::rng())
    }

    pub fn generate_with(&self, rng: &mut impl Rng) -> Dungeon {
        let build_start = std::time::Instant::now();

        let partitions = bsp::BinarySpacePartitioning::generate_leaves(&self.config, rng);

        let mut grid = CellGrid::new(self.config.map_width, self.config.map_height);

        let (rooms, degenerate_leaves) =
            Self::place_rooms(&mut grid, &partitions.leaves, &self.config, rng);

        let rooms_time = std::time::Instant::now();
        event!(
            tracing::Level::DEBUG,
            "Placed {} rooms in {} leaves in {:.2}ms",
            rooms.len(),
            partitions.leaves.len(),
            rooms_time.duration_since(build_start).as_millis()
        );

        let corridors = Self::carve_corridors(&mut grid, &rooms, rng);

        let wall_count = Self::derive_walls(&mut grid);

        let build_time = std::time::Instant::now();
        event!(
            tracing::Level::DEBUG,
            "Built dungeon with {} rooms, {} corridors and {} walls in {:.2}ms total",
            rooms.len(),
            corridors.len(),
            wall_count,
            build_time.duration_since(build_start).as_millis()
        );

        if rooms.is_empty() {
            event!(
                tracing::Level::WARN,
                "No rooms fit in any of the {} leaves",
                partitions.leaves.len()
            );
        }

        Dungeon {
            grid,
            rooms,
            corridors,
            report: GenerationReport {
                leaves: partitions.leaves,
                split_rounds: partitions.rounds,
                oversized_leaves: partitions.oversized,
                degenerate_leaves,
                wall_count,
            },
        }
    }
}
