//! various types that are shared by every part of the game
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::time::Duration;

/// A vector with which to do positional math
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector {
    /// x offset, positive is towards the right
    pub x: i64,
    /// y offset, positive is towards the bottom row
    pub y: i64,
}

/// A cell on the board. `x` is the column and `y` is the row, rows are counted
/// from the top of the level file.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    #[allow(missing_docs)]
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
}

impl Position {
    /// build a new position
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// offset this position by a vector, no wrapping is applied
    pub fn add_vec(&self, v: Vector) -> Position {
        Position {
            x: (self.x as i64 + v.x) as i32,
            y: (self.y as i64 + v.y) as i32,
        }
    }

    #[allow(missing_docs)]
    pub fn to_vector(self) -> Vector {
        Vector {
            x: self.x as i64,
            y: self.y as i64,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Represents the heading of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Down,
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

impl Direction {
    /// convert this direction to a unit vector. Up points at the previous row.
    pub fn to_vector(self) -> Vector {
        match self {
            Direction::Left => Vector { x: -1, y: 0 },
            Direction::Right => Vector { x: 1, y: 0 },
            Direction::Up => Vector { x: 0, y: -1 },
            Direction::Down => Vector { x: 0, y: 1 },
        }
    }

    /// create a Direction from a unit vector, anything else is `None`
    pub fn from_vector(vector: Vector) -> Option<Self> {
        match vector {
            Vector { x: -1, y: 0 } => Some(Self::Left),
            Vector { x: 1, y: 0 } => Some(Self::Right),
            Vector { x: 0, y: -1 } => Some(Self::Up),
            Vector { x: 0, y: 1 } => Some(Self::Down),
            _ => None,
        }
    }

    /// returns all four directions
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// the direction pointing the other way
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// checks if a given direction is not opposite this direction. e.g. Up is not opposite to Left, but is opposite to Down
    pub fn is_not_opposite(&self, other: &Direction) -> bool {
        self.opposite() != *other
    }

    /// true for Left and Right
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// The difficulty tier. Each tier has its own tick rate, its own ten level
/// files and its own block of the score ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[allow(missing_docs)]
    Easy,
    #[allow(missing_docs)]
    Normal,
    #[allow(missing_docs)]
    Hard,
}

impl Difficulty {
    /// the 1-based rank used in level file names and ledger addressing
    pub fn rank(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
        }
    }

    /// inverse of [`Difficulty::rank`]
    pub fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Normal),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    #[allow(missing_docs)]
    pub fn all() -> [Difficulty; 3] {
        [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard]
    }

    /// ticks per second when nothing overrides it in the config
    pub fn default_tick_rate(self) -> u32 {
        match self {
            Difficulty::Easy => 6,
            Difficulty::Normal => 9,
            Difficulty::Hard => 14,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Normal => write!(f, "normal"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// What a board cell holds. Snake segments are not cells, they live in the
/// snake state and are overlaid on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    #[allow(missing_docs)]
    Empty,
    #[allow(missing_docs)]
    Wall,
    #[allow(missing_docs)]
    Apple,
}

impl CellKind {
    /// the level file character for this cell
    pub fn as_char(self) -> char {
        match self {
            CellKind::Empty => '.',
            CellKind::Wall => '#',
            CellKind::Apple => '@',
        }
    }

    /// parses a level file character
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(CellKind::Empty),
            '#' => Some(CellKind::Wall),
            '@' => Some(CellKind::Apple),
            _ => None,
        }
    }
}

/// A sound the shell should play, emitted alongside state changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// a menu button was pressed
    Click,
    /// start the looping menu track
    MenuMusic,
    /// start the looping in game track
    GameMusic,
    /// stop whatever track is looping
    StopMusic,
    /// an apple was eaten
    Eat,
    /// the game ended, won or lost
    GameOver,
}

/// a board for which the size can be determined
pub trait SizeDeterminableBoard {
    #[allow(missing_docs)]
    fn get_width(&self) -> u32;
    #[allow(missing_docs)]
    fn get_height(&self) -> u32;
}

/// A board whose cells can be read. Every integer position is valid, positions
/// outside the board are wrapped before lookup.
pub trait CellQueryableBoard: SizeDeterminableBoard {
    /// what is at this position
    fn cell_at(&self, pos: Position) -> CellKind;

    /// false only for walls
    fn is_passable(&self, pos: Position) -> bool {
        self.cell_at(pos) != CellKind::Wall
    }

    /// maps any position on to the board toroidally
    fn wrap(&self, pos: Position) -> Position;
}

/// A board whose cells can be overwritten
pub trait CellSettableBoard: CellQueryableBoard {
    /// replace the content of a cell, the position is wrapped first
    fn set_cell(&mut self, pos: Position, kind: CellKind);
}

/// A board which can enumerate its empty cells, in row major order
pub trait EmptyCellGettableBoard {
    #[allow(missing_docs)]
    fn get_empty_cells(&self) -> Box<dyn Iterator<Item = Position> + '_>;
}

/// Instruments to be used with simulation
pub trait SimulatorInstruments: std::fmt::Debug {
    #[allow(missing_docs)]
    fn observe_simulation(&self, duration: Duration);
}

/// Instruments that throw every observation away
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInstruments;

impl SimulatorInstruments for NoopInstruments {
    fn observe_simulation(&self, _duration: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_vector() {
        for d in Direction::all() {
            assert_eq!(Direction::from_vector(d.to_vector()), Some(d));
        }
        assert_eq!(Direction::from_vector(Vector { x: 1, y: 1 }), None);
    }

    #[test]
    fn test_opposites() {
        assert!(!Direction::Up.is_not_opposite(&Direction::Down));
        assert!(!Direction::Left.is_not_opposite(&Direction::Right));
        assert!(Direction::Up.is_not_opposite(&Direction::Left));
        assert!(Direction::Up.is_not_opposite(&Direction::Up));
    }

    #[test]
    fn test_difficulty_rank_round_trips() {
        for d in Difficulty::all() {
            assert_eq!(Difficulty::from_rank(d.rank()), Some(d));
        }
        assert_eq!(Difficulty::from_rank(0), None);
        assert_eq!(Difficulty::from_rank(4), None);
    }

    #[test]
    fn test_cell_chars() {
        for c in ['.', '#', '@'] {
            assert_eq!(CellKind::from_char(c).map(CellKind::as_char), Some(c));
        }
        assert_eq!(CellKind::from_char('x'), None);
    }
}
