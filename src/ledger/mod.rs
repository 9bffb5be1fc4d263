//! Best scores per level, kept in a flat text file.
//!
//! The file has eleven lines per difficulty. Line 0 of each block is a
//! heading, lines 1 to 10 hold `"<level> level: <score>"` for that
//! difficulty's ten levels. A level's line is found with
//! [`Ledger::slot_index`].
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, warn};

use crate::level::LEVELS_PER_DIFFICULTY;
use crate::types::Difficulty;

/// lines per difficulty block, heading included
pub const SLOTS_PER_DIFFICULTY: usize = LEVELS_PER_DIFFICULTY as usize + 1;

/// lines in a complete ledger
pub const LEDGER_LINES: usize = SLOTS_PER_DIFFICULTY * 3;

/// Errors from reading or updating the ledger
#[derive(Debug, Error)]
pub enum LedgerError {
    /// the level number is outside `1..=LEVELS_PER_DIFFICULTY`
    #[error("there is no level {level} in a difficulty")]
    UnknownLevel {
        #[allow(missing_docs)]
        level: u8,
    },
    /// the ledger is shorter than the slot being addressed
    #[error("ledger has no line {slot}")]
    MissingSlot {
        #[allow(missing_docs)]
        slot: usize,
    },
    /// the line exists but holds no score after its colon
    #[error("ledger line {slot} holds no score: {line:?}")]
    MalformedSlot {
        #[allow(missing_docs)]
        slot: usize,
        #[allow(missing_docs)]
        line: String,
    },
    #[allow(missing_docs)]
    #[error("ledger file error: {0}")]
    Io(#[from] io::Error),
}

/// The score ledger, optionally backed by a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    lines: Vec<String>,
    path: Option<PathBuf>,
}

impl Ledger {
    /// A complete in-memory ledger with every score at zero
    pub fn blank() -> Self {
        let mut lines = Vec::with_capacity(LEDGER_LINES);
        for difficulty in Difficulty::all().iter() {
            lines.push(format!("{} difficulty", difficulty));
            for level in 1..=LEVELS_PER_DIFFICULTY {
                lines.push(score_line(level, 0));
            }
        }
        Ledger { lines, path: None }
    }

    /// Reads a ledger from text. Lines are kept as they are apart from
    /// trailing whitespace; bad lines only surface when addressed.
    pub fn parse(text: &str) -> Self {
        Ledger {
            lines: text.lines().map(|l| l.trim_end().to_owned()).collect(),
            path: None,
        }
    }

    /// Opens the ledger file at `path`. A missing file gives a blank ledger,
    /// which is written out on the first improved score.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let path = path.as_ref();
        let mut ledger = match fs::read_to_string(path) {
            Ok(text) => Ledger::parse(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "no ledger file, starting a blank one");
                Ledger::blank()
            }
            Err(e) => return Err(e.into()),
        };
        ledger.path = Some(path.to_owned());
        Ok(ledger)
    }

    /// the file backing this ledger, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Writes every line back to the backing file. Does nothing for an
    /// in-memory ledger.
    pub fn save(&self) -> Result<(), LedgerError> {
        if let Some(path) = &self.path {
            fs::write(path, self.to_string())?;
            debug!(path = %path.display(), "saved ledger");
        }
        Ok(())
    }

    /// The line holding the best score of `level` (1 to 10) in `difficulty`
    pub fn slot_index(difficulty: Difficulty, level: u8) -> Result<usize, LedgerError> {
        if !(1..=LEVELS_PER_DIFFICULTY).contains(&level) {
            return Err(LedgerError::UnknownLevel { level });
        }
        let rank = difficulty.rank() as usize;
        Ok(level as usize + rank - 1 + (rank - 1) * 10)
    }

    /// the best score recorded for a level
    pub fn read_best(&self, difficulty: Difficulty, level: u8) -> Result<u32, LedgerError> {
        let slot = Ledger::slot_index(difficulty, level)?;
        self.score_at(slot)
    }

    /// Records `score` if it beats the stored best. Returns whether the
    /// ledger changed. A file backed ledger is re-read first and rewritten
    /// in full when the score improves.
    pub fn write_best(
        &mut self,
        difficulty: Difficulty,
        level: u8,
        score: u32,
    ) -> Result<bool, LedgerError> {
        let slot = Ledger::slot_index(difficulty, level)?;
        self.refresh()?;
        if self.score_at(slot)? >= score {
            return Ok(false);
        }
        self.lines[slot] = score_line(level, score);
        self.save()?;
        Ok(true)
    }

    /// the three difficulty blocks in order, for the stats screen
    pub fn blocks(&self) -> [(Difficulty, &[String]); 3] {
        let [easy, normal, hard] = Difficulty::all();
        [
            (easy, self.block(easy)),
            (normal, self.block(normal)),
            (hard, self.block(hard)),
        ]
    }

    /// the lines of one difficulty block, possibly short for a truncated file
    pub fn block(&self, difficulty: Difficulty) -> &[String] {
        let start = (difficulty.rank() as usize - 1) * SLOTS_PER_DIFFICULTY;
        let end = (start + SLOTS_PER_DIFFICULTY).min(self.lines.len());
        self.lines.get(start..end).unwrap_or(&[])
    }

    fn refresh(&mut self) -> Result<(), LedgerError> {
        if let Some(path) = &self.path {
            match fs::read_to_string(path) {
                Ok(text) => self.lines = Ledger::parse(&text).lines,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    fn score_at(&self, slot: usize) -> Result<u32, LedgerError> {
        let line = self
            .lines
            .get(slot)
            .ok_or(LedgerError::MissingSlot { slot })?;
        line.split(':')
            .nth(1)
            .and_then(|s| s.trim().parse().ok())
            .ok_or_else(|| LedgerError::MalformedSlot {
                slot,
                line: line.clone(),
            })
    }
}

fn score_line(level: u8, score: u32) -> String {
    format!("{} level: {}", level, score)
}

impl fmt::Display for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.lines.iter().join("\n"))
    }
}
