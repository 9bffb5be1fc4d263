//! Apple placement.
//!
//! A free cell is an empty board cell that no snake segment covers. Apples are
//! placed uniformly at random among the free cells using whatever random
//! source the caller hands in, so a seeded rng gives a reproducible game.
use fxhash::FxHashSet;
use rand::prelude::IteratorRandom;
use rand::Rng;
use tracing::debug;

use crate::board::Board;
use crate::snake::SnakeState;
use crate::types::{CellKind, CellSettableBoard, EmptyCellGettableBoard, Position};

/// the free cells in row major order
pub fn free_cells<'a>(
    board: &'a Board,
    snake: &SnakeState,
) -> impl Iterator<Item = Position> + 'a {
    let occupied: FxHashSet<Position> = snake.body().iter().copied().collect();
    board
        .get_empty_cells()
        .filter(move |pos| !occupied.contains(pos))
}

/// Places one apple on a random free cell. Returns false, leaving the board
/// untouched, when there is no free cell left.
pub fn spawn<R: Rng + ?Sized>(board: &mut Board, snake: &SnakeState, rng: &mut R) -> bool {
    let chosen = free_cells(board, snake).choose(rng);
    match chosen {
        Some(pos) => {
            debug!(apple = %pos, "spawned apple");
            board.set_cell(pos, CellKind::Apple);
            true
        }
        None => false,
    }
}

/// Makes sure a level starts with exactly one apple. An apple authored in the
/// level file is kept unless the snake sits on it; otherwise a random one is
/// spawned. Returns false when the board has no room for an apple at all.
pub fn ensure_apple<R: Rng + ?Sized>(board: &mut Board, snake: &SnakeState, rng: &mut R) -> bool {
    let authored: Vec<Position> = board.positions_of(CellKind::Apple).collect();
    let mut keep = None;
    for pos in authored {
        if keep.is_none() && !snake.occupies(pos) {
            keep = Some(pos);
        } else {
            board.set_cell(pos, CellKind::Empty);
        }
    }

    keep.is_some() || spawn(board, snake, rng)
}
