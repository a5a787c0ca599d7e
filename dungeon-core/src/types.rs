use std::{
    fmt::{Display, Formatter},
    ops::Add,
};

use anyhow::Result;
use derive_more::From;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Vector2 { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x.powi(2) + self.y.powi(2)).sqrt()
    }

    /// Returns the vector scaled to unit length, or `None` for a zero vector.
    pub fn normalized(&self) -> Option<Vector2> {
        let length = self.length();

        if length == 0.0 || !length.is_finite() {
            return None;
        }

        Some(Vector2 {
            x: self.x / length,
            y: self.y / length,
        })
    }

    pub fn lerp(&self, to: &Vector2, t: f32) -> Vector2 {
        let t = t.clamp(0.0, 1.0);

        Vector2 {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }

    /// Snaps both coordinates to the nearest integer.
    pub fn rounded(&self) -> Vector2 {
        Vector2 {
            x: self.x.round(),
            y: self.y.round(),
        }
    }

    pub fn is_integral(&self) -> bool {
        self.x.fract() == 0.0 && self.y.fract() == 0.0
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x + other.x, self.y + other.y)
    }
}

impl Display for Vector2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<Cell> for Vector2 {
    fn from(cell: Cell) -> Self {
        Vector2::new(cell.col as f32, cell.row as f32)
    }
}

/// A grid coordinate. Signed so that corridor endpoints and neighbour
/// offsets can step outside the map before being bounds-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, From, Serialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self {
        Cell { col, row }
    }

    pub fn offset_by(&self, direction: Direction) -> Cell {
        let (d_col, d_row) = direction.offset();

        Cell {
            col: self.col + d_col,
            row: self.row + d_row,
        }
    }

    /// Truncates a point to the cell it falls in, the same way room centers
    /// become corridor endpoints.
    pub fn from_truncated(point: Vector2) -> Cell {
        Cell {
            col: point.x as i32,
            row: point.y as i32,
        }
    }

    /// Nearest cell to a point.
    pub fn from_rounded(point: Vector2) -> Cell {
        Cell {
            col: point.x.round() as i32,
            row: point.y.round() as i32,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

impl From<Cell> for (i32, i32) {
    fn from(cell: Cell) -> Self {
        (cell.col, cell.row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SplitAxis {
    // Cuts along a row, producing an upper and a lower rect.
    Horizontal,
    // Cuts along a column, producing a left and a right rect.
    Vertical,
}

impl Display for SplitAxis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitAxis::Horizontal => write!(f, "horizontal"),
            SplitAxis::Vertical => write!(f, "vertical"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rect {
    pub origin: Cell,
    pub width: u32,
    pub height: u32,
}

impl Display for Rect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({},{}):[{}x{}]",
            self.origin.col, self.origin.row, self.width, self.height
        )
    }
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Rect {
            origin: Cell { col: x, row: y },
            width,
            height,
        }
    }

    pub fn left(&self) -> i32 {
        self.origin.col
    }

    pub fn top(&self) -> i32 {
        self.origin.row
    }

    // Exclusive
    pub fn right(&self) -> i32 {
        self.origin.col + self.width as i32
    }

    // Exclusive
    pub fn bottom(&self) -> i32 {
        self.origin.row + self.height as i32
    }

    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    pub(crate) fn dimension(&self, axis: SplitAxis) -> u32 {
        match axis {
            SplitAxis::Horizontal => self.height,
            SplitAxis::Vertical => self.width,
        }
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(
            self.origin.col as f32 + self.width as f32 / 2.0,
            self.origin.row as f32 + self.height as f32 / 2.0,
        )
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.col >= self.left()
            && cell.col < self.right()
            && cell.row >= self.top()
            && cell.row < self.bottom()
    }

    /// Whether `other` fits inside this rect leaving at least `margin`
    /// cells free on every side.
    pub fn contains_rect_with_margin(&self, other: &Rect, margin: u32) -> bool {
        let margin = margin as i32;

        other.left() >= self.left() + margin
            && other.top() >= self.top() + margin
            && other.right() <= self.right() - margin
            && other.bottom() <= self.bottom() - margin
    }

    pub(crate) fn try_split_at(self, axis: SplitAxis, at: u32) -> Result<(Rect, Rect)> {
        match axis {
            SplitAxis::Horizontal => {
                if self.height < 2 || at >= self.height || at == 0 {
                    return Err(anyhow::anyhow!("Invalid split {}-{}", self.height, at));
                }

                let up = Rect {
                    origin: self.origin,
                    width: self.width,
                    height: at,
                };

                let down = Rect {
                    origin: Cell {
                        col: self.origin.col,
                        row: self.origin.row + at as i32,
                    },
                    width: self.width,
                    height: self.height - at,
                };

                Ok((up, down))
            }
            SplitAxis::Vertical => {
                if self.width < 2 || at >= self.width || at == 0 {
                    return Err(anyhow::anyhow!("Invalid split {}-{}", self.width, at));
                }

                let left = Rect {
                    origin: self.origin,
                    width: at,
                    height: self.height,
                };

                let right = Rect {
                    origin: Cell {
                        col: self.origin.col + at as i32,
                        row: self.origin.row,
                    },
                    width: self.width - at,
                    height: self.height,
                };

                Ok((left, right))
            }
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.top()..self.bottom())
            .flat_map(move |row| (self.left()..self.right()).map(move |col| Cell { col, row }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum CellKind {
    #[default]
    Empty,
    Floor,
    Wall,
}

impl Display for CellKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CellKind::Empty => write!(f, "empty"),
            CellKind::Floor => write!(f, "floor"),
            CellKind::Wall => write!(f, "wall"),
        }
    }
}

/// Compass directions on the grid. Rows grow southwards.
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// The raw, unnormalized input vector for this direction.
    pub fn to_vector(&self) -> Vector2 {
        let (x, y) = self.offset();
        Vector2::new(x as f32, y as f32)
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::NorthEast => "north-east",
            Direction::East => "east",
            Direction::SouthEast => "south-east",
            Direction::South => "south",
            Direction::SouthWest => "south-west",
            Direction::West => "west",
            Direction::NorthWest => "north-west",
        };

        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Room {
    pub rect: Rect,
    pub center: Vector2,
    // The BSP leaf this room was carved from.
    pub leaf: Rect,
}

impl Room {
    pub fn new(rect: Rect, leaf: Rect) -> Self {
        Room {
            rect,
            center: rect.center(),
            leaf,
        }
    }

    /// The center truncated to a grid cell, used as a corridor endpoint.
    pub fn center_cell(&self) -> Cell {
        Cell::from_truncated(self.center)
    }

    /// A random cell of the room, kept off the room's border when the room
    /// is wide enough to have an interior on that axis.
    pub fn random_floor_position(&self, rng: &mut impl Rng) -> Cell {
        let col = Self::random_interior(rng, self.rect.left(), self.rect.right());
        let row = Self::random_interior(rng, self.rect.top(), self.rect.bottom());

        Cell { col, row }
    }

    fn random_interior(rng: &mut impl Rng, start: i32, end: i32) -> i32 {
        if end - start >= 3 {
            rng.random_range(start + 1..end - 1)
        } else {
            rng.random_range(start..end)
        }
    }
}

impl Display for Room {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}", self.rect, self.center)
    }
}

/// An L-shaped corridor: one straight stroke from `start` to `corner`,
/// then another from `corner` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Corridor {
    pub start: Cell,
    pub corner: Cell,
    pub end: Cell,
}

impl Corridor {
    /// Every cell touched by both strokes, endpoints included. The corner
    /// is yielded twice.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        Self::stroke(self.start, self.corner).chain(Self::stroke(self.corner, self.end))
    }

    fn stroke(from: Cell, to: Cell) -> impl Iterator<Item = Cell> {
        let (min_row, max_row) = (from.row.min(to.row), from.row.max(to.row));

        (from.col.min(to.col)..=from.col.max(to.col))
            .flat_map(move |col| (min_row..=max_row).map(move |row| Cell { col, row }))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_try_split_horizontal() {
        let rect = Rect::new(0, 3, 4, 5);

        let (up, down) = rect.try_split_at(SplitAxis::Horizontal, 3).unwrap();

        assert_eq!(up, Rect::new(0, 3, 4, 3));
        assert_eq!(down, Rect::new(0, 6, 4, 2));
    }

    #[test]
    fn test_try_split_vertical() {
        let rect = Rect::new(2, 0, 10, 4);

        let (left, right) = rect.try_split_at(SplitAxis::Vertical, 4).unwrap();

        assert_eq!(left, Rect::new(2, 0, 4, 4));
        assert_eq!(right, Rect::new(6, 0, 6, 4));
    }

    #[test]
    fn test_try_split_fails_with_invalid_index() {
        let rect = Rect::new(0, 0, 4, 4);

        assert!(rect.try_split_at(SplitAxis::Vertical, 0).is_err());
        assert!(rect.try_split_at(SplitAxis::Vertical, 4).is_err());
        assert!(rect.try_split_at(SplitAxis::Horizontal, 5).is_err());
        assert!(Rect::new(0, 0, 1, 1)
            .try_split_at(SplitAxis::Horizontal, 1)
            .is_err());
    }

    #[test]
    fn test_rect_contains_rect_with_margin() {
        let leaf = Rect::new(0, 0, 10, 10);

        assert!(leaf.contains_rect_with_margin(&Rect::new(1, 1, 8, 8), 1));
        assert!(!leaf.contains_rect_with_margin(&Rect::new(0, 1, 8, 8), 1));
        assert!(!leaf.contains_rect_with_margin(&Rect::new(1, 1, 9, 8), 1));
        assert!(leaf.contains_rect_with_margin(&Rect::new(0, 0, 10, 10), 0));
    }

    #[test]
    fn test_rect_cells() {
        let rect = Rect::new(1, 2, 3, 2);
        let cells = rect.cells().collect::<Vec<_>>();

        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Cell::new(1, 2));
        assert_eq!(cells[5], Cell::new(3, 3));
        assert!(cells.iter().all(|cell| rect.contains(*cell)));
    }

    #[test]
    fn test_room_center_is_fractional_and_truncates() {
        let room = Room::new(Rect::new(3, 4, 5, 7), Rect::new(0, 0, 20, 20));

        assert_eq!(room.center, Vector2::new(5.5, 7.5));
        assert_eq!(room.center_cell(), Cell::new(5, 7));
    }

    #[test]
    fn test_room_random_floor_position_stays_inside() {
        let mut rng = StdRng::seed_from_u64(7);

        let room = Room::new(Rect::new(2, 2, 5, 6), Rect::new(0, 0, 12, 12));
        for _ in 0..200 {
            let cell = room.random_floor_position(&mut rng);
            assert!(Rect::new(3, 3, 3, 4).contains(cell), "{} off interior", cell);
        }

        let thin_room = Room::new(Rect::new(4, 4, 1, 2), Rect::new(0, 0, 12, 12));
        for _ in 0..50 {
            assert!(thin_room.rect.contains(thin_room.random_floor_position(&mut rng)));
        }
    }

    #[test]
    fn test_vector_normalized() {
        assert_eq!(Vector2::ZERO.normalized(), None);
        assert_eq!(Vector2::new(3.0, 0.0).normalized(), Some(Vector2::new(1.0, 0.0)));

        let diagonal = Direction::NorthEast.to_vector().normalized().unwrap();
        assert!((diagonal.length() - 1.0).abs() < 1e-6);
        assert!(diagonal.x > 0.0 && diagonal.y < 0.0);
    }

    #[test]
    fn test_vector_lerp_and_round() {
        let from = Vector2::new(1.0, 1.0);
        let to = Vector2::new(2.0, 3.0);

        assert_eq!(from.lerp(&to, 0.5), Vector2::new(1.5, 2.0));
        assert_eq!(from.lerp(&to, 2.0), to);
        assert_eq!(Vector2::new(1.707, 0.293).rounded(), Vector2::new(2.0, 0.0));
        assert!(Vector2::new(4.0, -2.0).is_integral());
        assert!(!Vector2::new(4.5, -2.0).is_integral());
    }

    #[test]
    fn test_cell_from_tuple() {
        let cell: Cell = (3, -1).into();
        assert_eq!(cell, Cell::new(3, -1));
        assert_eq!(<(i32, i32)>::from(cell), (3, -1));
    }

    #[test]
    fn test_corridor_cells_follow_both_strokes() {
        let corridor = Corridor {
            start: Cell::new(1, 1),
            corner: Cell::new(4, 1),
            end: Cell::new(4, 3),
        };

        let cells = corridor.cells().collect::<Vec<_>>();

        assert_eq!(cells.len(), 7);
        for col in 1..=4 {
            assert!(cells.contains(&Cell::new(col, 1)));
        }
        assert!(cells.contains(&Cell::new(4, 2)));
        assert!(cells.contains(&Cell::new(4, 3)));
        assert!(!cells.contains(&Cell::new(1, 3)));
    }

    #[test]
    fn test_corridor_cells_with_reversed_endpoints() {
        let corridor = Corridor {
            start: Cell::new(6, 5),
            corner: Cell::new(6, 2),
            end: Cell::new(3, 2),
        };

        let cells = corridor.cells().collect::<Vec<_>>();

        assert_eq!(cells.len(), 8);
        assert!(cells.contains(&Cell::new(6, 5)));
        assert!(cells.contains(&Cell::new(3, 2)));
    }
}
