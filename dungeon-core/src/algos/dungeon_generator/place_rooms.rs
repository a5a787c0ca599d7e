use super::{DungeonConfig, DungeonGenerator};
use crate::{
    constants::ROOM_LEAF_MARGIN,
    grid::CellGrid,
    types::{CellKind, Rect, Room},
};

use rand::Rng;
use tracing::event;

impl DungeonGenerator {
    /// Carves one room per leaf. Leaves that cannot fit a room of at least
    /// `min_room_size` inside their margin are skipped and returned
    /// separately.
    pub(super) fn place_rooms(
        grid: &mut CellGrid,
        leaves: &[Rect],
        config: &DungeonConfig,
        rng: &mut impl Rng,
    ) -> (Vec<Room>, Vec<Rect>) {
        let mut rooms = Vec::with_capacity(leaves.len());
        let mut degenerate_leaves = Vec::new();

        for leaf in leaves.iter().copied() {
            match Self::roll_room_rect(leaf, config, rng) {
                Some(room_rect) => {
                    grid.fill_rect(&room_rect, CellKind::Floor);
                    rooms.push(Room::new(room_rect, leaf));
                }
                None => {
                    event!(
                        tracing::Level::DEBUG,
                        "Leaf [{}] is too small for a room of size {}",
                        leaf,
                        config.min_room_size
                    );
                    degenerate_leaves.push(leaf);
                }
            }
        }

        if !degenerate_leaves.is_empty() {
            event!(
                tracing::Level::WARN,
                "Skipped {} degenerate leaves",
                degenerate_leaves.len()
            );
        }

        (rooms, degenerate_leaves)
    }

    fn roll_room_rect(leaf: Rect, config: &DungeonConfig, rng: &mut impl Rng) -> Option<Rect> {
        let width = Self::roll_room_side(leaf.width, config, rng)?;
        let height = Self::roll_room_side(leaf.height, config, rng)?;

        // Both sides leave room for the margin, so these ranges are never empty.
        let margin = ROOM_LEAF_MARGIN as i32;
        let x = rng.random_range(leaf.left() + margin..=leaf.right() - width as i32 - margin);
        let y = rng.random_range(leaf.top() + margin..=leaf.bottom() - height as i32 - margin);

        Some(Rect::new(x, y, width, height))
    }

    fn roll_room_side(leaf_side: u32, config: &DungeonConfig, rng: &mut impl Rng) -> Option<u32> {
        let available = leaf_side.checked_sub(2 * ROOM_LEAF_MARGIN)?;
        let max_side = config.max_room_size.min(available);

        if max_side < config.min_room_size {
            return None;
        }

        Some(rng.random_range(config.min_room_size..=max_side))
    }
}
