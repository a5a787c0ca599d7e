use thiserror::Error;

/// Rejected generator settings. Raised before any generation work starts.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("map dimensions must be greater than zero, got [{width}x{height}]")]
    EmptyMap { width: u32, height: u32 },
    #[error("room sizes must be greater than zero")]
    ZeroRoomSize,
    #[error("min room size {min} is greater than max room size {max}")]
    InvertedRoomSize { min: u32, max: u32 },
    #[error("split factor must be a positive number, got {0}")]
    InvalidSplitFactor(f32),
    #[error("aspect ratio cutoff must be a finite ratio of at least 1, got {0}")]
    InvalidAspectRatioCutoff(f32),
    #[error("at least one split round is required")]
    ZeroSplitRounds,
    #[error("move duration must be a positive number of seconds, got {0}")]
    InvalidMoveDuration(f32),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error("no rooms available to spawn in")]
    NoRooms,
    #[error("no actor to place")]
    MissingActor,
}
