use crate::types::Direction;

pub(crate) const DEFAULT_MAP_WIDTH: u32 = 50;
pub(crate) const DEFAULT_MAP_HEIGHT: u32 = 50;

pub(crate) const DEFAULT_MIN_ROOM_SIZE: u32 = 5;
pub(crate) const DEFAULT_MAX_ROOM_SIZE: u32 = 10;

// A leaf is split while either side exceeds max_room_size * this factor.
pub(crate) const LEAF_SPLIT_FACTOR: f32 = 1.5;
// Aspect ratio at which the split axis stops being random.
pub(crate) const ASPECT_RATIO_CUTOFF: f32 = 1.25;
pub(crate) const MAX_SPLIT_ROUNDS: u32 = 10;

// Minimum gap between a room and the border of its leaf.
pub(crate) const ROOM_LEAF_MARGIN: u32 = 1;

pub(crate) const DEFAULT_MOVE_DURATION: f32 = 0.2;
pub(crate) const DEFAULT_OBSTACLE_RADIUS: f32 = 0.1;
// Fraction of move_duration left over at which a move counts as landed.
pub(crate) const LANDING_TOLERANCE: f32 = 1e-4;

pub(crate) const TILE_SIZE: u32 = 16;
pub(crate) const CANVAS_MARGIN: u32 = 32;

pub(crate) const DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];
