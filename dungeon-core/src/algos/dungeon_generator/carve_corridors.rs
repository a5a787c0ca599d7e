use super::DungeonGenerator;
use crate::{
    grid::CellGrid,
    types::{Cell, CellKind, Corridor, Room},
};

use rand::Rng;
use tracing::event;

impl DungeonGenerator {
    /// Joins every room to the one placed before it with an L-shaped
    /// corridor between their centers.
    pub(super) fn carve_corridors(
        grid: &mut CellGrid,
        rooms: &[Room],
        rng: &mut impl Rng,
    ) -> Vec<Corridor> {
        let mut corridors = Vec::with_capacity(rooms.len().saturating_sub(1));
        let mut skipped_cells = 0_usize;

        for pair in rooms.windows(2) {
            let corridor = Self::roll_corridor(pair[0].center_cell(), pair[1].center_cell(), rng);

            for cell in corridor.cells() {
                if !grid.set(cell, CellKind::Floor) {
                    skipped_cells += 1;
                }
            }

            corridors.push(corridor);
        }

        if skipped_cells > 0 {
            event!(
                tracing::Level::DEBUG,
                "Skipped {} corridor cells outside the map",
                skipped_cells
            );
        }

        corridors
    }

    // Either run along the previous room's row first and turn at the
    // current room's column, or the other way around.
    fn roll_corridor(from: Cell, to: Cell, rng: &mut impl Rng) -> Corridor {
        let corner = if rng.random_bool(0.5) {
            Cell::new(to.col, from.row)
        } else {
            Cell::new(from.col, to.row)
        };

        Corridor {
            start: from,
            corner,
            end: to,
        }
    }
}
