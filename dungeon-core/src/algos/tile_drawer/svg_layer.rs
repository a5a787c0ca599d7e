use super::TileLayer;
use crate::{
    constants::{CANVAS_MARGIN, TILE_SIZE},
    types::{Cell, CellKind, Vector2},
};

use svg::node::element::{Group, Rectangle};

const FLOOR_COLOR: &str = "#c0c0c0";
const WALL_COLOR: &str = "#004bff";

const TILE_GAP: u32 = 1;

/// Collects tiles for one layer and turns them into an SVG group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgTileLayer {
    fill: &'static str,
    tiles: Vec<Cell>,
}

impl SvgTileLayer {
    pub fn new(fill: &'static str) -> Self {
        SvgTileLayer {
            fill,
            tiles: Vec::new(),
        }
    }

    pub fn floor() -> Self {
        Self::new(FLOOR_COLOR)
    }

    pub fn wall() -> Self {
        Self::new(WALL_COLOR)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub(super) fn to_group(&self) -> Group {
        self.tiles
            .iter()
            .fold(Group::new().set("fill", self.fill), |group, cell| {
                let rect = Rectangle::new()
                    .set("x", cell.col * TILE_SIZE as i32 + (CANVAS_MARGIN / 2) as i32)
                    .set("y", cell.row * TILE_SIZE as i32 + (CANVAS_MARGIN / 2) as i32)
                    .set("width", TILE_SIZE - TILE_GAP)
                    .set("height", TILE_SIZE - TILE_GAP);

                group.add(rect)
            })
    }
}

impl TileLayer for SvgTileLayer {
    fn clear_all(&mut self) {
        self.tiles.clear();
    }

    fn set_tile(&mut self, cell: Cell, _kind: CellKind) {
        self.tiles.push(cell);
    }
}

// Center of the tile a grid position maps to, in canvas units.
pub(super) fn to_canvas(position: Vector2) -> (f32, f32) {
    let tile = TILE_SIZE as f32;
    let offset = (CANVAS_MARGIN / 2) as f32 + tile / 2.0;

    (position.x * tile + offset, position.y * tile + offset)
}
