use super::DungeonGenerator;
use crate::{constants::DIRECTIONS, grid::CellGrid, types::CellKind};

use rayon::prelude::*;

impl DungeonGenerator {
    /// Promotes every empty cell touching a floor cell (diagonals included)
    /// to a wall. Floor cells are never modified, so the outcome depends only
    /// on the floor set and a second pass finds nothing new.
    ///
    /// Returns the number of walls added by this pass.
    pub(crate) fn derive_walls(grid: &mut CellGrid) -> usize {
        let snapshot: &CellGrid = grid;

        let new_walls = snapshot
            .raw_cells()
            .par_iter()
            .enumerate()
            .filter(|(_, kind)| **kind == CellKind::Empty)
            .map(|(idx, _)| snapshot.cell_at(idx))
            .filter(|cell| {
                DIRECTIONS.iter().any(|direction| {
                    snapshot.kind_at(cell.offset_by(*direction)) == Some(CellKind::Floor)
                })
            })
            .collect::<Vec<_>>();

        for cell in new_walls.iter() {
            grid.set(*cell, CellKind::Wall);
        }

        new_walls.len()
    }
}
