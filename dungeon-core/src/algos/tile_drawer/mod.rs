use crate::{
    constants::{CANVAS_MARGIN, TILE_SIZE},
    grid::CellGrid,
    types::{Cell, CellKind, Vector2},
};

use svg::{Document, node::element::Circle};
use tracing::event;

mod svg_layer;

pub use svg_layer::SvgTileLayer;

const ACTOR_COLOR: &str = "#f8f800";

/// A single tile layer of whatever ends up drawing the map.
pub trait TileLayer {
    fn clear_all(&mut self);
    fn set_tile(&mut self, cell: Cell, kind: CellKind);
}

/// Clears both layers, then pushes every floor cell to `floor_layer` and
/// every wall cell to `wall_layer`.
pub fn draw_dungeon(
    grid: &CellGrid,
    floor_layer: &mut impl TileLayer,
    wall_layer: &mut impl TileLayer,
) {
    floor_layer.clear_all();
    wall_layer.clear_all();

    let mut floor_count = 0_usize;
    let mut wall_count = 0_usize;

    for (cell, kind) in grid.iter() {
        match kind {
            CellKind::Floor => {
                floor_layer.set_tile(cell, kind);
                floor_count += 1;
            }
            CellKind::Wall => {
                wall_layer.set_tile(cell, kind);
                wall_count += 1;
            }
            CellKind::Empty => {}
        }
    }

    event!(
        tracing::Level::DEBUG,
        "Drew {} floor tiles and {} wall tiles",
        floor_count,
        wall_count
    );
}

/// Stacks the given layers, first one at the bottom, into a single SVG
/// document and marks the actor position if there is one.
pub fn render_svg(grid: &CellGrid, layers: &[&SvgTileLayer], actor: Option<Vector2>) -> Document {
    let mut document = Document::new()
        .set("width", grid.width() * TILE_SIZE + CANVAS_MARGIN)
        .set("height", grid.height() * TILE_SIZE + CANVAS_MARGIN)
        .set("style", "background-color:#000000");

    for layer in layers {
        document = document.add(layer.to_group());
    }

    if let Some(position) = actor {
        let (cx, cy) = svg_layer::to_canvas(position);

        let marker = Circle::new()
            .set("cx", cx)
            .set("cy", cy)
            .set("r", TILE_SIZE as f32 / 3.0)
            .set("fill", ACTOR_COLOR);

        document = document.add(marker);
    }

    document
}
