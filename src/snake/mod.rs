//! The snake: its body, heading, score and the per tick state machine.
use std::collections::VecDeque;

use fxhash::FxHashSet;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::board::Board;
use crate::spawner;
use crate::types::{CellKind, CellQueryableBoard, CellSettableBoard, Direction, Position};

/// Problems with a snake body handed to [`SnakeState::new`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnakeError {
    /// a snake needs at least one segment
    #[error("a snake needs at least one segment")]
    EmptyBody,
    /// two segments share a cell
    #[error("segment {0} appears more than once")]
    DuplicateSegment(Position),
    /// consecutive segments share neither a row nor a column, so no wrap of
    /// the board can make them touch
    #[error("segments {0} and {1} are not connected")]
    Disconnected(Position, Position),
}

/// Why a snake died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeathCause {
    /// the head moved on to a wall cell
    WallCollision,
    /// the head moved on to a cell occupied by the body, tail included
    SelfCollision,
}

/// Where the snake is in its life. Anything but `Alive` is terminal until the
/// level is restarted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnakeStatus {
    #[allow(missing_docs)]
    Alive,
    #[allow(missing_docs)]
    Dead(DeathCause),
    /// the board filled up and no apple could be placed
    Won,
}

/// The result of a single [`SnakeState::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    #[allow(missing_docs)]
    Continue,
    #[allow(missing_docs)]
    GameOver(DeathCause),
    #[allow(missing_docs)]
    Win,
}

impl Outcome {
    /// true for `GameOver` and `Win`
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Continue)
    }
}

impl From<SnakeStatus> for Outcome {
    fn from(status: SnakeStatus) -> Self {
        match status {
            SnakeStatus::Alive => Outcome::Continue,
            SnakeStatus::Dead(cause) => Outcome::GameOver(cause),
            SnakeStatus::Won => Outcome::Win,
        }
    }
}

/// Precomputed result of stepping the head one cell, before anything is mutated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// the head cannot enter the candidate cell
    Blocked(DeathCause),
    /// the candidate cell is free and holds no apple
    Move(Position),
    /// the candidate cell holds an apple
    Eat(Position),
}

/// The snake. Segments are stored tail first, so the head is the last element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnakeState {
    body: VecDeque<Position>,
    direction: Direction,
    score: u32,
    status: SnakeStatus,
}

impl SnakeState {
    /// Builds a live snake from its segments ordered tail to head
    pub fn new(
        body: impl IntoIterator<Item = Position>,
        direction: Direction,
    ) -> Result<Self, SnakeError> {
        let body: VecDeque<Position> = body.into_iter().collect();
        if body.is_empty() {
            return Err(SnakeError::EmptyBody);
        }
        let mut seen = FxHashSet::default();
        for segment in body.iter() {
            if !seen.insert(*segment) {
                return Err(SnakeError::DuplicateSegment(*segment));
            }
        }
        for (a, b) in body.iter().zip(body.iter().skip(1)) {
            if a.x != b.x && a.y != b.y {
                return Err(SnakeError::Disconnected(*a, *b));
            }
        }

        Ok(SnakeState {
            body,
            direction,
            score: 0,
            status: SnakeStatus::Alive,
        })
    }

    /// The snake every level starts with: two segments in the top left
    /// corner, heading right.
    pub fn starting() -> Self {
        SnakeState {
            body: VecDeque::from(vec![Position::new(0, 0), Position::new(1, 0)]),
            direction: Direction::Right,
            score: 0,
            status: SnakeStatus::Alive,
        }
    }

    /// segments from tail to head
    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    /// the most recently added segment
    pub fn head(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// the oldest segment
    pub fn tail(&self) -> Position {
        self.body[0]
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// always false, a snake has at least one segment
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[allow(missing_docs)]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// apples eaten in this life
    pub fn score(&self) -> u32 {
        self.score
    }

    #[allow(missing_docs)]
    pub fn status(&self) -> SnakeStatus {
        self.status
    }

    #[allow(missing_docs)]
    pub fn is_alive(&self) -> bool {
        self.status == SnakeStatus::Alive
    }

    /// is any segment on this (already wrapped) position
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Changes heading, unless the new heading is the exact reverse of the
    /// current one. Returns whether the heading was accepted.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.direction.is_not_opposite(&direction) {
            self.direction = direction;
            true
        } else {
            debug!(current = %self.direction, requested = %direction, "ignoring reversal");
            false
        }
    }

    /// Works out where the head would go in `direction` without changing
    /// anything. A cell the tail currently occupies counts as body.
    pub fn step(&self, direction: Direction, board: &Board) -> Step {
        let candidate = board.wrap(self.head().add_vec(direction.to_vector()));
        match board.cell_at(candidate) {
            CellKind::Wall => Step::Blocked(DeathCause::WallCollision),
            _ if self.occupies(candidate) => Step::Blocked(DeathCause::SelfCollision),
            CellKind::Apple => Step::Eat(candidate),
            CellKind::Empty => Step::Move(candidate),
        }
    }

    /// Runs one tick heading in `direction`. Reversals are not filtered here,
    /// see [`SnakeState::turn`]. Once the snake is dead or has won this does
    /// nothing and keeps returning the terminal outcome.
    #[instrument(level = "trace", skip_all)]
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        direction: Direction,
        board: &mut Board,
        rng: &mut R,
    ) -> Outcome {
        if !self.is_alive() {
            return self.status.into();
        }
        self.direction = direction;

        match self.step(direction, board) {
            Step::Blocked(cause) => {
                info!(?cause, head = %self.head(), score = self.score, "game over");
                self.status = SnakeStatus::Dead(cause);
            }
            Step::Move(candidate) => {
                self.body.push_back(candidate);
                self.body.pop_front();
            }
            Step::Eat(candidate) => {
                self.body.push_back(candidate);
                self.score += 1;
                board.set_cell(candidate, CellKind::Empty);
                if !spawner::spawn(board, self, rng) {
                    info!(score = self.score, length = self.len(), "board is full");
                    self.status = SnakeStatus::Won;
                }
            }
        }

        self.status.into()
    }
}
