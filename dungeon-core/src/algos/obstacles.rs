use crate::{
    grid::CellGrid,
    types::{Cell, CellKind, Rect, Vector2},
};

use std::collections::HashSet;

/// Spatial query used by the mover to decide whether a spot is free.
pub trait ObstacleQuery {
    /// Whether any obstacle overlaps the disk of `radius` around `point`.
    fn is_blocked(&self, point: Vector2, radius: f32) -> bool;
}

/// Unit-square colliders for every wall cell of a generated grid, each
/// centered on its cell coordinate. Floor cells carry no collider, and
/// anything off the map counts as blocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallColliders {
    bounds: Rect,
    walls: HashSet<Cell>,
}

impl WallColliders {
    pub fn from_grid(grid: &CellGrid) -> Self {
        let walls = grid
            .iter()
            .filter(|(_, kind)| *kind == CellKind::Wall)
            .map(|(cell, _)| cell)
            .collect();

        WallColliders {
            bounds: grid.bounds(),
            walls,
        }
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    // Squared distance from `point` to the unit square around `cell`.
    fn distance_sq_to(cell: Cell, point: Vector2) -> f32 {
        let closest_x = point.x.clamp(cell.col as f32 - 0.5, cell.col as f32 + 0.5);
        let closest_y = point.y.clamp(cell.row as f32 - 0.5, cell.row as f32 + 0.5);

        (point.x - closest_x).powi(2) + (point.y - closest_y).powi(2)
    }
}

impl ObstacleQuery for WallColliders {
    fn is_blocked(&self, point: Vector2, radius: f32) -> bool {
        if !self.bounds.contains(Cell::from_rounded(point)) {
            return true;
        }

        let radius = radius.max(0.0);

        let min_col = (point.x - radius - 0.5).ceil() as i32;
        let max_col = (point.x + radius + 0.5).floor() as i32;
        let min_row = (point.y - radius - 0.5).ceil() as i32;
        let max_row = (point.y + radius + 0.5).floor() as i32;

        (min_row..=max_row).any(|row| {
            (min_col..=max_col).any(|col| {
                let cell = Cell::new(col, row);
                self.walls.contains(&cell) && Self::distance_sq_to(cell, point) <= radius.powi(2)
            })
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn corridor_grid() -> CellGrid {
        // A horizontal corridor at row 1 fenced by walls.
        let mut grid = CellGrid::new(6, 3);
        for col in 0..6 {
            grid.set(Cell::new(col, 0), CellKind::Wall);
            grid.set(Cell::new(col, 2), CellKind::Wall);
        }
        for col in 1..5 {
            grid.set(Cell::new(col, 1), CellKind::Floor);
        }
        grid.set(Cell::new(0, 1), CellKind::Wall);
        grid.set(Cell::new(5, 1), CellKind::Wall);

        grid
    }

    #[test]
    fn test_from_grid_collects_walls() {
        let colliders = WallColliders::from_grid(&corridor_grid());

        assert_eq!(colliders.len(), 14);
        assert!(!colliders.is_empty());
    }

    #[test]
    fn test_floor_is_free_and_walls_block() {
        let colliders = WallColliders::from_grid(&corridor_grid());

        assert!(!colliders.is_blocked(Vector2::new(2.0, 1.0), 0.1));
        assert!(!colliders.is_blocked(Vector2::new(4.0, 1.0), 0.1));
        assert!(colliders.is_blocked(Vector2::new(5.0, 1.0), 0.1));
        assert!(colliders.is_blocked(Vector2::new(2.0, 0.0), 0.1));
    }

    #[test]
    fn test_radius_reaches_into_neighbouring_wall() {
        let colliders = WallColliders::from_grid(&corridor_grid());

        // 0.45 from the wall square above.
        let point = Vector2::new(2.0, 0.95);

        assert!(!colliders.is_blocked(point, 0.1));
        assert!(colliders.is_blocked(point, 0.5));
    }

    #[test]
    fn test_off_map_is_blocked() {
        let colliders = WallColliders::from_grid(&CellGrid::new(4, 4));

        assert!(colliders.is_empty());
        assert!(!colliders.is_blocked(Vector2::new(0.0, 0.0), 0.1));
        assert!(colliders.is_blocked(Vector2::new(-1.0, 0.0), 0.1));
        assert!(colliders.is_blocked(Vector2::new(2.0, 4.0), 0.1));
    }
}
