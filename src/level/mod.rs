//! Level files: a rectangular grid of `.` (empty), `#` (wall) and `@` (apple)
//! characters, one row per line.
mod bundled;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::types::{CellKind, Difficulty, Position};

pub use bundled::BundledLevels;

/// number of levels authored for every difficulty
pub const LEVELS_PER_DIFFICULTY: u8 = 10;

/// Everything that can go wrong while fetching or parsing a level
#[derive(Debug, Error)]
pub enum LevelError {
    /// the backing resource for a level does not exist
    #[error("level resource `{path}` was not found")]
    ResourceNotFound {
        #[allow(missing_docs)]
        path: PathBuf,
    },
    /// the backing resource exists but could not be read
    #[error("failed to read level resource `{path}`")]
    Io {
        #[allow(missing_docs)]
        path: PathBuf,
        #[allow(missing_docs)]
        #[source]
        source: io::Error,
    },
    /// the level has no rows at all
    #[error("level has no rows")]
    Empty,
    /// a character that is not part of the level alphabet
    #[error("unknown cell `{ch}` at row {row}, column {column}")]
    UnknownCell {
        #[allow(missing_docs)]
        ch: char,
        #[allow(missing_docs)]
        row: usize,
        #[allow(missing_docs)]
        column: usize,
    },
    /// the starting snake would be placed on a wall or off the board
    #[error("starting cell {position} is not free")]
    BlockedStart {
        #[allow(missing_docs)]
        position: Position,
    },
}

/// Identifies one pre-authored level: a difficulty tier and a 0-based index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelId {
    difficulty: Difficulty,
    index: u8,
}

impl LevelId {
    /// `None` when the index is outside `0..LEVELS_PER_DIFFICULTY`
    pub fn new(difficulty: Difficulty, index: u8) -> Option<Self> {
        if index < LEVELS_PER_DIFFICULTY {
            Some(LevelId { difficulty, index })
        } else {
            None
        }
    }

    /// level 1 of a tier, where level select starts
    pub fn first(difficulty: Difficulty) -> Self {
        LevelId {
            difficulty,
            index: 0,
        }
    }

    #[allow(missing_docs)]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// 0-based index inside the difficulty tier
    pub fn index(&self) -> u8 {
        self.index
    }

    /// 1-based level number, as shown to the player and used by the ledger
    pub fn number(&self) -> u8 {
        self.index + 1
    }

    /// the following level of the same tier, wrapping from the last to the first
    pub fn next(self) -> Self {
        LevelId {
            index: (self.index + 1) % LEVELS_PER_DIFFICULTY,
            ..self
        }
    }

    /// the preceding level of the same tier, wrapping from the first to the last
    pub fn previous(self) -> Self {
        LevelId {
            index: (self.index + LEVELS_PER_DIFFICULTY - 1) % LEVELS_PER_DIFFICULTY,
            ..self
        }
    }

    /// the resource name, `level{rank}_{index}.txt`
    pub fn file_name(&self) -> String {
        format!("level{}_{}.txt", self.difficulty.rank(), self.index)
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.difficulty, self.number())
    }
}

/// A parsed level, every row has the same width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelGrid {
    rows: Vec<Vec<CellKind>>,
    width: usize,
}

impl LevelGrid {
    /// Parses a level. Each line is trimmed and then right padded with empty
    /// cells up to the width of the longest line.
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let mut rows = Vec::new();
        for (row, line) in text.lines().enumerate() {
            let cells = line
                .trim()
                .chars()
                .enumerate()
                .map(|(column, ch)| {
                    CellKind::from_char(ch).ok_or(LevelError::UnknownCell { ch, row, column })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(cells);
        }

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if rows.is_empty() || width == 0 {
            return Err(LevelError::Empty);
        }
        for row in rows.iter_mut() {
            row.resize(width, CellKind::Empty);
        }

        Ok(LevelGrid { rows, width })
    }

    #[allow(missing_docs)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[allow(missing_docs)]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// the rows, top to bottom
    pub fn rows(&self) -> &[Vec<CellKind>] {
        &self.rows
    }

    /// every cell with its position, in row major order. The level select
    /// screen draws its preview from this.
    pub fn cells(&self) -> impl Iterator<Item = (Position, CellKind)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, kind)| (Position::new(x as i32, y as i32), *kind))
        })
    }
}

impl fmt::Display for LevelGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows.iter() {
            for cell in row.iter() {
                write!(f, "{}", cell.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Somewhere levels can be loaded from
pub trait LevelSource: fmt::Debug {
    /// fetch and parse the given level
    fn load(&self, id: LevelId) -> Result<LevelGrid, LevelError>;
}

/// Loads `level{rank}_{index}.txt` files from a directory on disk
#[derive(Debug, Clone)]
pub struct LevelDirectory {
    root: PathBuf,
}

impl LevelDirectory {
    #[allow(missing_docs)]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LevelDirectory { root: root.into() }
    }

    #[allow(missing_docs)]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl LevelSource for LevelDirectory {
    fn load(&self, id: LevelId) -> Result<LevelGrid, LevelError> {
        let path = self.root.join(id.file_name());
        debug!(level = %id, path = %path.display(), "loading level");
        let text = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                LevelError::ResourceNotFound { path: path.clone() }
            } else {
                LevelError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        LevelGrid::parse(&text)
    }
}
