use crate::types::{Cell, CellKind, Rect};

use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Fixed-size map of cell states, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellGrid {
    width: u32,
    height: u32,
    cells: Vec<CellKind>,
}

impl CellGrid {
    pub fn new(width: u32, height: u32) -> Self {
        CellGrid {
            width,
            height,
            cells: vec![CellKind::Empty; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.col >= 0
            && cell.row >= 0
            && (cell.col as u32) < self.width
            && (cell.row as u32) < self.height
    }

    fn index_of(&self, cell: Cell) -> Option<usize> {
        if self.in_bounds(cell) {
            Some(cell.row as usize * self.width as usize + cell.col as usize)
        } else {
            None
        }
    }

    pub(crate) fn cell_at(&self, idx: usize) -> Cell {
        let width = self.width as usize;
        Cell::new((idx % width) as i32, (idx / width) as i32)
    }

    pub fn get(&self, col: i32, row: i32) -> Option<CellKind> {
        self.index_of(Cell::new(col, row)).map(|idx| self.cells[idx])
    }

    pub fn kind_at(&self, cell: Cell) -> Option<CellKind> {
        self.index_of(cell).map(|idx| self.cells[idx])
    }

    pub fn is_floor(&self, col: i32, row: i32) -> bool {
        self.get(col, row) == Some(CellKind::Floor)
    }

    pub fn is_wall(&self, col: i32, row: i32) -> bool {
        self.get(col, row) == Some(CellKind::Wall)
    }

    /// Writes `kind` at `cell`. Cells outside the grid are skipped and
    /// `false` is returned.
    pub(crate) fn set(&mut self, cell: Cell, kind: CellKind) -> bool {
        match self.index_of(cell) {
            Some(idx) => {
                self.cells[idx] = kind;
                true
            }
            None => false,
        }
    }

    pub(crate) fn fill_rect(&mut self, rect: &Rect, kind: CellKind) {
        for cell in rect.cells() {
            self.set(cell, kind);
        }
    }

    pub(crate) fn raw_cells(&self) -> &[CellKind] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, CellKind)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, kind)| (self.cell_at(idx), *kind))
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|cell| **cell == kind).count()
    }
}

// Renders the grid as text: '.' for floor, '#' for wall, ' ' for empty.
impl Display for CellGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.width.max(1) as usize) {
            let line = row
                .iter()
                .map(|kind| match kind {
                    CellKind::Empty => ' ',
                    CellKind::Floor => '.',
                    CellKind::Wall => '#',
                })
                .collect::<String>();

            writeln!(f, "{}", line.trim_end())?;
        }

        Ok(())
    }
}
