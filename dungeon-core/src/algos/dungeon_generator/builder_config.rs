use crate::{
    constants::{
        ASPECT_RATIO_CUTOFF, DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH, DEFAULT_MAX_ROOM_SIZE,
        DEFAULT_MIN_ROOM_SIZE, LEAF_SPLIT_FACTOR, MAX_SPLIT_ROUNDS,
    },
    error::ConfigError,
};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DungeonConfig {
    pub map_width: u32,
    pub map_height: u32,
    // Lower bound for both room sides. Also the smallest offset at which
    // a leaf may be split.
    pub min_room_size: u32,
    // Upper bound for both room sides. Leaves wider or taller than
    // max_room_size * split_factor get split.
    pub max_room_size: u32,
    pub split_factor: f32,
    // The width to height (or height to width) ratio at which the split
    // axis is forced instead of rolled.
    pub aspect_ratio_cutoff: f32,
    // Hard cap on split rounds, reached or not.
    pub max_split_rounds: u32,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        DungeonConfig {
            map_width: DEFAULT_MAP_WIDTH,
            map_height: DEFAULT_MAP_HEIGHT,
            min_room_size: DEFAULT_MIN_ROOM_SIZE,
            max_room_size: DEFAULT_MAX_ROOM_SIZE,
            split_factor: LEAF_SPLIT_FACTOR,
            aspect_ratio_cutoff: ASPECT_RATIO_CUTOFF,
            max_split_rounds: MAX_SPLIT_ROUNDS,
        }
    }
}

impl DungeonConfig {
    pub fn new(map_width: u32, map_height: u32, min_room_size: u32, max_room_size: u32) -> Self {
        DungeonConfig {
            map_width,
            map_height,
            min_room_size,
            max_room_size,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map_width == 0 || self.map_height == 0 {
            return Err(ConfigError::EmptyMap {
                width: self.map_width,
                height: self.map_height,
            });
        }

        if self.min_room_size == 0 || self.max_room_size == 0 {
            return Err(ConfigError::ZeroRoomSize);
        }

        if self.min_room_size > self.max_room_size {
            return Err(ConfigError::InvertedRoomSize {
                min: self.min_room_size,
                max: self.max_room_size,
            });
        }

        if !(self.split_factor.is_finite() && self.split_factor > 0.0) {
            return Err(ConfigError::InvalidSplitFactor(self.split_factor));
        }

        if !(self.aspect_ratio_cutoff.is_finite() && self.aspect_ratio_cutoff >= 1.0) {
            return Err(ConfigError::InvalidAspectRatioCutoff(
                self.aspect_ratio_cutoff,
            ));
        }

        if self.max_split_rounds == 0 {
            return Err(ConfigError::ZeroSplitRounds);
        }

        Ok(())
    }

    /// Leaves with a side longer than this are split.
    pub fn split_threshold(&self) -> f32 {
        self.max_room_size as f32 * self.split_factor
    }
}
