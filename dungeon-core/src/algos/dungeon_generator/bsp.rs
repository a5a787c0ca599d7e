use super::DungeonConfig;
use crate::types::{Rect, SplitAxis};

use rand::Rng;
use tracing::event;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Partitions {
    pub leaves: Vec<Rect>,
    pub rounds: u32,
    // Leaves still over the split threshold when splitting stopped, either
    // because the round cap was hit or because they were too short to cut.
    pub oversized: usize,
}

pub(crate) struct BinarySpacePartitioning;

impl BinarySpacePartitioning {
    pub fn generate_leaves(config: &DungeonConfig, rng: &mut impl Rng) -> Partitions {
        let initial_rect = Rect::new(0, 0, config.map_width, config.map_height);
        let threshold = config.split_threshold();

        event!(
            tracing::Level::DEBUG,
            "Splitting initial rect [{}] with threshold [{:.1}]",
            initial_rect,
            threshold
        );

        let mut leaves = vec![initial_rect];
        let mut rounds = 0;
        let mut split = true;

        while split && rounds < config.max_split_rounds {
            split = false;

            let mut next_leaves = Vec::with_capacity(leaves.len() * 2);

            for leaf in leaves {
                if !Self::is_oversized(&leaf, threshold) {
                    next_leaves.push(leaf);
                    continue;
                }

                let axis = Self::choose_axis(&leaf, config.aspect_ratio_cutoff, rng);

                let halves = Self::split_leaf(leaf, axis, config.min_room_size, rng)
                    .or_else(|| {
                        let fallback = Self::other_axis(axis);
                        if leaf.dimension(fallback) as f32 > threshold {
                            Self::split_leaf(leaf, fallback, config.min_room_size, rng)
                        } else {
                            None
                        }
                    });

                match halves {
                    Some((leaf_a, leaf_b)) => {
                        next_leaves.push(leaf_a);
                        next_leaves.push(leaf_b);
                        split = true;
                    }
                    None => {
                        event!(
                            tracing::Level::DEBUG,
                            "Leaf [{}] is too short to split",
                            leaf
                        );
                        next_leaves.push(leaf);
                    }
                }
            }

            leaves = next_leaves;
            rounds += 1;
        }

        let oversized = leaves
            .iter()
            .filter(|leaf| Self::is_oversized(leaf, threshold))
            .count();

        if oversized > 0 {
            event!(
                tracing::Level::WARN,
                "Stopped splitting after {} rounds with {} oversized leaves",
                rounds,
                oversized
            );
        }

        event!(
            tracing::Level::DEBUG,
            "Generated {} leaves in {} rounds",
            leaves.len(),
            rounds
        );

        Partitions {
            leaves,
            rounds,
            oversized,
        }
    }

    fn is_oversized(leaf: &Rect, threshold: f32) -> bool {
        leaf.width as f32 > threshold || leaf.height as f32 > threshold
    }

    // Wide leaves are cut across their width and tall ones across their
    // height; only leaves close to square get a random axis.
    fn choose_axis(leaf: &Rect, aspect_cutoff: f32, rng: &mut impl Rng) -> SplitAxis {
        let width_factor = leaf.width as f32 / leaf.height as f32;
        let height_factor = leaf.height as f32 / leaf.width as f32;

        if width_factor >= aspect_cutoff {
            SplitAxis::Vertical
        } else if height_factor >= aspect_cutoff {
            SplitAxis::Horizontal
        } else if rng.random_bool(0.5) {
            SplitAxis::Horizontal
        } else {
            SplitAxis::Vertical
        }
    }

    fn other_axis(axis: SplitAxis) -> SplitAxis {
        match axis {
            SplitAxis::Horizontal => SplitAxis::Vertical,
            SplitAxis::Vertical => SplitAxis::Horizontal,
        }
    }

    /// Cuts `leaf` at a random offset in `[min_size, dim - min_size]`.
    /// Returns `None` when that range is empty.
    fn split_leaf(
        leaf: Rect,
        axis: SplitAxis,
        min_size: u32,
        rng: &mut impl Rng,
    ) -> Option<(Rect, Rect)> {
        let dimension = leaf.dimension(axis);

        let max_offset = dimension.checked_sub(min_size)?;
        if max_offset < min_size {
            return None;
        }

        let offset = rng.random_range(min_size..=max_offset);

        leaf.try_split_at(axis, offset).ok()
    }
}
