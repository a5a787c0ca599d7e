use super::ObstacleQuery;
use crate::{
    constants::{DEFAULT_MOVE_DURATION, DEFAULT_OBSTACLE_RADIUS, LANDING_TOLERANCE},
    error::ConfigError,
    types::Vector2,
};

use serde::Serialize;
use tracing::event;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoverConfig {
    // Seconds spent sliding between two cells.
    pub move_duration: f32,
    // Radius of the disk probed at the destination before moving.
    pub obstacle_radius: f32,
}

impl Default for MoverConfig {
    fn default() -> Self {
        MoverConfig {
            move_duration: DEFAULT_MOVE_DURATION,
            obstacle_radius: DEFAULT_OBSTACLE_RADIUS,
        }
    }
}

impl MoverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.move_duration.is_finite() && self.move_duration > 0.0) {
            return Err(ConfigError::InvalidMoveDuration(self.move_duration));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveState {
    Idle,
    Moving {
        start: Vector2,
        end: Vector2,
        elapsed: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    Started { target: Vector2 },
    Blocked { target: Vector2 },
    // A move is already in flight; the request was dropped.
    Busy,
    NoInput,
    NoObstacleBackend,
}

/// Moves an actor one cell at a time, sliding between cells over
/// `move_duration` as `tick` is called.
pub struct GridMover {
    config: MoverConfig,
    position: Vector2,
    target: Vector2,
    state: MoveState,
    obstacles: Option<Box<dyn ObstacleQuery>>,
}

impl GridMover {
    pub fn new(config: MoverConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(GridMover {
            config,
            position: Vector2::ZERO,
            target: Vector2::ZERO,
            state: MoveState::Idle,
            obstacles: None,
        })
    }

    pub fn with_obstacles(
        config: MoverConfig,
        obstacles: Box<dyn ObstacleQuery>,
    ) -> Result<Self, ConfigError> {
        let mut mover = Self::new(config)?;
        mover.attach_obstacles(obstacles);

        Ok(mover)
    }

    pub fn attach_obstacles(&mut self, obstacles: Box<dyn ObstacleQuery>) {
        self.obstacles = Some(obstacles);
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn target(&self) -> Vector2 {
        self.target
    }

    pub fn state(&self) -> MoveState {
        self.state
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.state, MoveState::Moving { .. })
    }

    /// Places the actor on the nearest cell to `position` without checking
    /// for obstacles. Any move in flight is dropped.
    pub fn set_position(&mut self, position: Vector2) {
        self.position = position.rounded();
        self.target = self.position;
        self.state = MoveState::Idle;

        event!(tracing::Level::DEBUG, "Actor placed at {}", self.position);
    }

    /// Starts a one-cell move along `direction`, which does not need to be
    /// normalized. Diagonal input moves along the diagonal.
    pub fn request_move(&mut self, direction: Vector2) -> MoveOutcome {
        if self.is_moving() {
            return MoveOutcome::Busy;
        }

        let Some(step) = direction.normalized() else {
            return MoveOutcome::NoInput;
        };

        let Some(obstacles) = self.obstacles.as_ref() else {
            event!(
                tracing::Level::WARN,
                "Move request {} skipped, no obstacle backend attached",
                direction
            );
            return MoveOutcome::NoObstacleBackend;
        };

        let target = self.position + step;

        if obstacles.is_blocked(target, self.config.obstacle_radius) {
            event!(tracing::Level::DEBUG, "Target position blocked: {}", target);
            return MoveOutcome::Blocked { target };
        }

        event!(tracing::Level::DEBUG, "Moving to: {}", target);

        self.target = target;
        self.state = MoveState::Moving {
            start: self.position,
            end: target,
            elapsed: 0.0,
        };

        MoveOutcome::Started { target }
    }

    /// Advances a move in flight by `dt` seconds. Returns `true` on the tick
    /// the actor lands on its target cell.
    pub fn tick(&mut self, dt: f32) -> bool {
        let MoveState::Moving {
            start,
            end,
            elapsed,
        } = self.state
        else {
            return false;
        };

        let elapsed = elapsed + dt.max(0.0);

        // Frame times rarely sum to the duration exactly in f32.
        let remaining = self.config.move_duration - elapsed;
        if remaining <= self.config.move_duration * LANDING_TOLERANCE {
            self.position = end.rounded();
            self.target = self.position;
            self.state = MoveState::Idle;

            return true;
        }

        self.position = start.lerp(&end, elapsed / self.config.move_duration);
        self.state = MoveState::Moving {
            start,
            end,
            elapsed,
        };

        false
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::{Cell, Direction};

    use std::collections::HashSet;

    struct BlockedCells(HashSet<Cell>);

    impl ObstacleQuery for BlockedCells {
        fn is_blocked(&self, point: Vector2, _radius: f32) -> bool {
            self.0.contains(&Cell::from_rounded(point))
        }
    }

    fn mover_at(col: i32, row: i32, blocked: &[Cell]) -> GridMover {
        let obstacles = BlockedCells(blocked.iter().copied().collect());
        let mut mover =
            GridMover::with_obstacles(MoverConfig::default(), Box::new(obstacles)).unwrap();
        mover.set_position(Vector2::new(col as f32, row as f32));

        mover
    }

    #[test]
    fn test_move_completes_after_duration() {
        let mut mover = mover_at(3, 3, &[]);

        let outcome = mover.request_move(Vector2::new(1.0, 0.0));
        assert_eq!(
            outcome,
            MoveOutcome::Started {
                target: Vector2::new(4.0, 3.0)
            }
        );
        assert!(mover.is_moving());

        assert!(!mover.tick(0.1));
        assert!(mover.is_moving());
        assert!((mover.position().x - 3.5).abs() < 1e-5);
        assert_eq!(mover.position().y, 3.0);

        assert!(mover.tick(0.1));
        assert_eq!(mover.state(), MoveState::Idle);
        assert_eq!(mover.position(), Vector2::new(4.0, 3.0));
        assert_eq!(mover.target(), mover.position());
    }

    #[test]
    fn test_even_frames_summing_to_duration_land() {
        for frames in [2, 3, 4, 5, 6, 8, 10, 12, 20] {
            let mut mover = mover_at(3, 3, &[]);
            let dt = MoverConfig::default().move_duration / frames as f32;

            mover.request_move(Vector2::new(0.0, 1.0));
            let landed = (0..frames).map(|_| mover.tick(dt)).collect::<Vec<_>>();

            assert_eq!(landed.iter().filter(|landed| **landed).count(), 1);
            assert!(landed[frames - 1], "{} frames did not land", frames);
            assert_eq!(mover.state(), MoveState::Idle);
            assert_eq!(mover.position(), Vector2::new(3.0, 4.0));
            assert!(matches!(
                mover.request_move(Vector2::new(1.0, 0.0)),
                MoveOutcome::Started { .. }
            ));
        }
    }

    #[test]
    fn test_unnormalized_input_moves_one_cell() {
        let mut mover = mover_at(3, 3, &[]);

        mover.request_move(Vector2::new(0.0, -7.0));
        mover.tick(1.0);

        assert_eq!(mover.position(), Vector2::new(3.0, 2.0));
    }

    #[test]
    fn test_diagonal_move_snaps_to_diagonal_cell() {
        let mut mover = mover_at(3, 3, &[]);

        let outcome = mover.request_move(Direction::SouthEast.to_vector());
        let MoveOutcome::Started { target } = outcome else {
            panic!("diagonal move did not start: {:?}", outcome);
        };
        assert!((target.x - (3.0 + std::f32::consts::FRAC_1_SQRT_2)).abs() < 1e-5);

        mover.tick(0.25);

        assert_eq!(mover.position(), Vector2::new(4.0, 4.0));
        assert!(mover.position().is_integral());
    }

    #[test]
    fn test_blocked_move_changes_nothing() {
        let mut mover = mover_at(3, 3, &[Cell::new(4, 3)]);

        let outcome = mover.request_move(Vector2::new(1.0, 0.0));

        assert_eq!(
            outcome,
            MoveOutcome::Blocked {
                target: Vector2::new(4.0, 3.0)
            }
        );
        assert_eq!(mover.state(), MoveState::Idle);
        assert_eq!(mover.position(), Vector2::new(3.0, 3.0));
        assert_eq!(mover.target(), Vector2::new(3.0, 3.0));
    }

    #[test]
    fn test_request_while_moving_is_dropped() {
        let mut mover = mover_at(3, 3, &[]);

        mover.request_move(Vector2::new(1.0, 0.0));
        mover.tick(0.05);

        let position = mover.position();
        let target = mover.target();
        let state = mover.state();

        assert_eq!(mover.request_move(Vector2::new(0.0, 1.0)), MoveOutcome::Busy);
        assert_eq!(mover.position(), position);
        assert_eq!(mover.target(), target);
        assert_eq!(mover.state(), state);
    }

    #[test]
    fn test_zero_input_is_ignored() {
        let mut mover = mover_at(3, 3, &[]);

        assert_eq!(mover.request_move(Vector2::ZERO), MoveOutcome::NoInput);
        assert!(!mover.is_moving());
    }

    #[test]
    fn test_missing_obstacle_backend_skips_move() {
        let mut mover = GridMover::new(MoverConfig::default()).unwrap();
        mover.set_position(Vector2::new(1.0, 1.0));

        assert_eq!(
            mover.request_move(Vector2::new(1.0, 0.0)),
            MoveOutcome::NoObstacleBackend
        );
        assert_eq!(mover.position(), Vector2::new(1.0, 1.0));
        assert!(!mover.is_moving());
    }

    #[test]
    fn test_set_position_snaps_and_cancels_move() {
        let mut mover = mover_at(3, 3, &[]);
        mover.request_move(Vector2::new(1.0, 0.0));
        mover.tick(0.1);

        mover.set_position(Vector2::new(7.4, 1.6));

        assert_eq!(mover.position(), Vector2::new(7.0, 2.0));
        assert_eq!(mover.target(), Vector2::new(7.0, 2.0));
        assert_eq!(mover.state(), MoveState::Idle);
    }

    #[test]
    fn test_tick_while_idle_does_nothing() {
        let mut mover = mover_at(2, 2, &[]);

        assert!(!mover.tick(1.0));
        assert_eq!(mover.position(), Vector2::new(2.0, 2.0));
    }

    #[test]
    fn test_invalid_move_duration() {
        let config = MoverConfig {
            move_duration: 0.0,
            ..Default::default()
        };

        assert!(matches!(
            GridMover::new(config),
            Err(ConfigError::InvalidMoveDuration(_))
        ));
    }
}
