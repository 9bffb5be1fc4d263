//! The mutable grid of cell kinds that a level is played on.
//!
//! The board is a torus: walking off one edge enters from the opposite edge,
//! so every integer position maps on to exactly one cell.
use std::fmt;

use crate::level::LevelGrid;
use crate::types::{
    CellKind, CellQueryableBoard, CellSettableBoard, EmptyCellGettableBoard, Position,
    SizeDeterminableBoard,
};

/// wrapper type for an index in to the board's cell storage
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct CellIndex(pub usize);

impl CellIndex {
    /// makes a new cell index from an on-board position, needs to know the width of the board
    pub fn new(pos: Position, width: u32) -> Self {
        debug_assert!(pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < width);
        Self(pos.y as usize * width as usize + pos.x as usize)
    }

    /// converts a cellindex to a position
    pub fn into_position(self, width: u32) -> Position {
        let y = (self.0 / width as usize) as i32;
        let x = (self.0 % width as usize) as i32;
        Position { x, y }
    }

    /// get a usize from a CellIndex
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

/// A fixed size grid of [`CellKind`]s
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u32,
    height: u32,
    cells: Vec<CellKind>,
}

impl Board {
    /// Builds a board of the given size with every cell empty. Zero sized
    /// dimensions are bumped to one so that wrapping is always defined.
    pub fn empty(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Board {
            width,
            height,
            cells: vec![CellKind::Empty; (width * height) as usize],
        }
    }

    /// copies a parsed level on to a fresh board
    pub fn from_grid(grid: &LevelGrid) -> Self {
        let mut board = Board::empty(grid.width() as u32, grid.height() as u32);
        for (pos, kind) in grid.cells() {
            board.set_cell(pos, kind);
        }
        board
    }

    fn index_of(&self, pos: Position) -> CellIndex {
        CellIndex::new(self.wrap(pos), self.width)
    }

    /// the position of the apple, if there is one. With more than one apple
    /// on the board the first in row major order is returned.
    pub fn apple_position(&self) -> Option<Position> {
        self.positions_of(CellKind::Apple).next()
    }

    /// every position holding the given kind, in row major order
    pub fn positions_of(&self, kind: CellKind) -> impl Iterator<Item = Position> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == kind)
            .map(move |(i, _)| CellIndex(i).into_position(width))
    }

    /// total number of cells
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// True when `a` and `b` are orthogonal neighbours, counting neighbours
    /// across the wrapped edges.
    pub fn are_adjacent(&self, a: Position, b: Position) -> bool {
        let a = self.wrap(a);
        let b = self.wrap(b);
        let dx = (a.x - b.x).rem_euclid(self.width as i32);
        let dy = (a.y - b.y).rem_euclid(self.height as i32);
        let near_x = dx != 0 && (dx == 1 || dx == self.width as i32 - 1);
        let near_y = dy != 0 && (dy == 1 || dy == self.height as i32 - 1);
        (dx == 0 && near_y) || (dy == 0 && near_x)
    }
}

impl SizeDeterminableBoard for Board {
    fn get_width(&self) -> u32 {
        self.width
    }

    fn get_height(&self) -> u32 {
        self.height
    }
}

impl CellQueryableBoard for Board {
    fn cell_at(&self, pos: Position) -> CellKind {
        self.cells[self.index_of(pos).as_usize()]
    }

    fn wrap(&self, pos: Position) -> Position {
        Position {
            x: pos.x.rem_euclid(self.width as i32),
            y: pos.y.rem_euclid(self.height as i32),
        }
    }
}

impl CellSettableBoard for Board {
    fn set_cell(&mut self, pos: Position, kind: CellKind) {
        let idx = self.index_of(pos);
        self.cells[idx.as_usize()] = kind;
    }
}

impl EmptyCellGettableBoard for Board {
    fn get_empty_cells(&self) -> Box<dyn Iterator<Item = Position> + '_> {
        Box::new(self.positions_of(CellKind::Empty))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = self.cell_at(Position::new(x as i32, y as i32));
                write!(f, "{}", cell.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Board {
        let grid = LevelGrid::parse(include_str!("../../fixtures/corridor.txt")).unwrap();
        Board::from_grid(&grid)
    }

    #[test]
    fn test_from_grid_round_trips_through_display() {
        let board = fixture();
        assert_eq!(board.to_string(), include_str!("../../fixtures/corridor.txt"));
        assert_eq!(board.get_width(), 6);
        assert_eq!(board.get_height(), 4);
    }

    #[test]
    fn test_wrap_on_every_edge() {
        let board = fixture();
        assert_eq!(board.wrap(Position::new(6, 2)), Position::new(0, 2));
        assert_eq!(board.wrap(Position::new(-1, 2)), Position::new(5, 2));
        assert_eq!(board.wrap(Position::new(3, 4)), Position::new(3, 0));
        assert_eq!(board.wrap(Position::new(3, -1)), Position::new(3, 3));
        assert_eq!(board.wrap(Position::new(-13, 9)), Position::new(5, 1));
    }

    #[test]
    fn test_cell_lookup_wraps() {
        let board = fixture();
        assert_eq!(board.cell_at(Position::new(0, 1)), CellKind::Wall);
        assert_eq!(board.cell_at(Position::new(6, 1)), CellKind::Wall);
        assert_eq!(board.cell_at(Position::new(-1, 1)), CellKind::Empty);
        assert!(!board.is_passable(Position::new(0, -1)));
        assert!(board.is_passable(Position::new(1, -1)));
    }

    #[test]
    fn test_set_cell_and_apple_position() {
        let mut board = fixture();
        assert_eq!(board.apple_position(), None);
        board.set_cell(Position::new(8, 0), CellKind::Apple);
        assert_eq!(board.apple_position(), Some(Position::new(2, 0)));
        board.set_cell(Position::new(2, 0), CellKind::Empty);
        assert_eq!(board.apple_position(), None);
    }

    #[test]
    fn test_empty_cells() {
        let board = fixture();
        assert_eq!(board.get_empty_cells().count(), board.area() - 8);
        assert_eq!(board.get_empty_cells().next(), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_adjacency_across_edges() {
        let board = fixture();
        assert!(board.are_adjacent(Position::new(0, 0), Position::new(5, 0)));
        assert!(board.are_adjacent(Position::new(2, 0), Position::new(2, 3)));
        assert!(board.are_adjacent(Position::new(2, 1), Position::new(2, 2)));
        assert!(!board.are_adjacent(Position::new(0, 0), Position::new(1, 1)));
        assert!(!board.are_adjacent(Position::new(0, 0), Position::new(0, 0)));
    }
}
