//! Derives which sprite to draw on every cell from the board and the snake.
//!
//! This is a pure read-only pass, run once per frame after the simulation has
//! advanced. Snake segments pick their sprite from the direction towards
//! their neighbours. Neighbours that sit across a wrapped edge are treated as
//! adjacent, so a body running through the right edge still draws as a
//! straight line instead of a long jump back to column zero.
use std::fmt;

use tracing::instrument;

use crate::board::Board;
use crate::snake::SnakeState;
use crate::types::{CellKind, CellQueryableBoard, Direction, Position, SizeDeterminableBoard};

/// side of one frame on the snake sprite sheet, in pixels
pub const SHEET_FRAME_SIZE: u32 = 50;

/// The background sprite of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileSprite {
    #[allow(missing_docs)]
    Floor,
    #[allow(missing_docs)]
    Wall,
}

/// A body segment that turns a corner, named after the two sides it joins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bend {
    #[allow(missing_docs)]
    UpLeft,
    #[allow(missing_docs)]
    UpRight,
    #[allow(missing_docs)]
    DownLeft,
    #[allow(missing_docs)]
    DownRight,
}

impl Bend {
    /// the bend joining a vertical and a horizontal side, `None` when both
    /// sides lie on the same axis
    pub fn joining(a: Direction, b: Direction) -> Option<Bend> {
        let (vertical, horizontal) = if a.is_horizontal() { (b, a) } else { (a, b) };
        match (vertical, horizontal) {
            (Direction::Up, Direction::Left) => Some(Bend::UpLeft),
            (Direction::Up, Direction::Right) => Some(Bend::UpRight),
            (Direction::Down, Direction::Left) => Some(Bend::DownLeft),
            (Direction::Down, Direction::Right) => Some(Bend::DownRight),
            _ => None,
        }
    }
}

/// Every shape a snake segment can be drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnakeSprite {
    /// the head, facing the direction of travel
    Head(Direction),
    /// the tail end, pointing away from the rest of the body
    Tail(Direction),
    /// body joining left and right
    Horizontal,
    /// body joining up and down
    Vertical,
    #[allow(missing_docs)]
    Bend(Bend),
}

impl SnakeSprite {
    /// The pixel origin of this sprite on a snake sprite sheet. Sheets are five
    /// frames wide and four high.
    pub fn sheet_frame(&self) -> (u32, u32) {
        let (column, row) = match self {
            SnakeSprite::Bend(Bend::DownRight) => (0, 0),
            SnakeSprite::Bend(Bend::UpRight) => (0, 1),
            SnakeSprite::Bend(Bend::DownLeft) => (2, 0),
            SnakeSprite::Bend(Bend::UpLeft) => (2, 2),
            SnakeSprite::Horizontal => (1, 0),
            SnakeSprite::Vertical => (2, 1),
            SnakeSprite::Head(Direction::Up) => (3, 0),
            SnakeSprite::Head(Direction::Right) => (4, 0),
            SnakeSprite::Head(Direction::Left) => (3, 1),
            SnakeSprite::Head(Direction::Down) => (4, 1),
            SnakeSprite::Tail(Direction::Down) => (3, 2),
            SnakeSprite::Tail(Direction::Left) => (4, 2),
            SnakeSprite::Tail(Direction::Right) => (3, 3),
            SnakeSprite::Tail(Direction::Up) => (4, 3),
        };
        (column * SHEET_FRAME_SIZE, row * SHEET_FRAME_SIZE)
    }

    fn glyph(&self) -> char {
        match self {
            SnakeSprite::Head(Direction::Up) => '^',
            SnakeSprite::Head(Direction::Down) => 'v',
            SnakeSprite::Head(Direction::Left) => '<',
            SnakeSprite::Head(Direction::Right) => '>',
            SnakeSprite::Tail(Direction::Up) => '╵',
            SnakeSprite::Tail(Direction::Down) => '╷',
            SnakeSprite::Tail(Direction::Left) => '╴',
            SnakeSprite::Tail(Direction::Right) => '╶',
            SnakeSprite::Horizontal => '─',
            SnakeSprite::Vertical => '│',
            SnakeSprite::Bend(Bend::UpLeft) => '┘',
            SnakeSprite::Bend(Bend::UpRight) => '└',
            SnakeSprite::Bend(Bend::DownLeft) => '┐',
            SnakeSprite::Bend(Bend::DownRight) => '┌',
        }
    }
}

/// a snake segment together with the sprite chosen for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacedSegment {
    #[allow(missing_docs)]
    pub position: Position,
    #[allow(missing_docs)]
    pub sprite: SnakeSprite,
}

/// Everything the shell needs to draw one frame of the playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    width: u32,
    height: u32,
    tiles: Vec<TileSprite>,
    apple: Option<Position>,
    segments: Vec<PlacedSegment>,
}

impl Layout {
    #[allow(missing_docs)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[allow(missing_docs)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// background sprites in row major order
    pub fn tiles(&self) -> &[TileSprite] {
        &self.tiles
    }

    /// the background sprite of a cell, the position is wrapped
    pub fn tile_at(&self, pos: Position) -> TileSprite {
        let x = pos.x.rem_euclid(self.width as i32) as usize;
        let y = pos.y.rem_euclid(self.height as i32) as usize;
        self.tiles[y * self.width as usize + x]
    }

    /// where the apple is drawn, on top of a floor tile
    pub fn apple(&self) -> Option<Position> {
        self.apple
    }

    /// snake segments from tail to head
    pub fn segments(&self) -> &[PlacedSegment] {
        &self.segments
    }

    /// the snake sprite covering a cell, if any
    pub fn segment_at(&self, pos: Position) -> Option<SnakeSprite> {
        self.segments
            .iter()
            .find(|s| s.position == pos)
            .map(|s| s.sprite)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let pos = Position::new(x, y);
                let glyph = if let Some(sprite) = self.segment_at(pos) {
                    sprite.glyph()
                } else if self.apple == Some(pos) {
                    '@'
                } else {
                    match self.tile_at(pos) {
                        TileSprite::Floor => '.',
                        TileSprite::Wall => '#',
                    }
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The direction from `from` towards `to` on a `width` x `height` torus, taking
/// the shorter way round on each axis. `None` when both positions are the
/// same cell.
pub fn neighbor_direction(
    from: Position,
    to: Position,
    width: u32,
    height: u32,
) -> Option<Direction> {
    let horizontal = match shortest_delta(to.x - from.x, width) {
        0 => None,
        d if d > 0 => Some(Direction::Right),
        _ => Some(Direction::Left),
    };
    let vertical = match shortest_delta(to.y - from.y, height) {
        0 => None,
        d if d > 0 => Some(Direction::Down),
        _ => Some(Direction::Up),
    };
    horizontal.or(vertical)
}

/// the signed step along one axis of length `size` that covers `delta`
/// with the fewest cells
fn shortest_delta(delta: i32, size: u32) -> i32 {
    let size = size.max(1) as i32;
    let d = delta.rem_euclid(size);
    if d * 2 <= size {
        d
    } else {
        d - size
    }
}

/// The sprite for a segment with neighbours in directions `a` and `b`
pub fn body_sprite(a: Option<Direction>, b: Option<Direction>) -> SnakeSprite {
    match (a, b) {
        (Some(a), Some(b)) => match Bend::joining(a, b) {
            Some(bend) => SnakeSprite::Bend(bend),
            None => straight(a),
        },
        (Some(d), None) | (None, Some(d)) => straight(d),
        (None, None) => SnakeSprite::Horizontal,
    }
}

fn straight(d: Direction) -> SnakeSprite {
    if d.is_horizontal() {
        SnakeSprite::Horizontal
    } else {
        SnakeSprite::Vertical
    }
}

/// Lays out the whole playfield for one frame
#[instrument(level = "trace", skip_all)]
pub fn render(board: &Board, snake: &SnakeState) -> Layout {
    let width = board.get_width();
    let height = board.get_height();

    let mut tiles = Vec::with_capacity(board.area());
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            tiles.push(match board.cell_at(Position::new(x, y)) {
                CellKind::Wall => TileSprite::Wall,
                CellKind::Empty | CellKind::Apple => TileSprite::Floor,
            });
        }
    }

    let body = snake.body();
    let last = body.len() - 1;
    // segments that do not touch on this board have no side to join
    let towards = |i: usize, j: usize| {
        if board.are_adjacent(body[i], body[j]) {
            neighbor_direction(body[i], body[j], width, height)
        } else {
            None
        }
    };

    let segments = body
        .iter()
        .enumerate()
        .map(|(i, position)| {
            let sprite = if i == last {
                SnakeSprite::Head(snake.direction())
            } else if i == 0 {
                let tip = towards(0, 1).map(Direction::opposite);
                SnakeSprite::Tail(tip.unwrap_or_else(|| snake.direction().opposite()))
            } else {
                body_sprite(towards(i, i - 1), towards(i, i + 1))
            };
            PlacedSegment {
                position: *position,
                sprite,
            }
        })
        .collect();

    Layout {
        width,
        height,
        tiles,
        apple: board.apple_position(),
        segments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelGrid;

    fn board(text: &str) -> Board {
        Board::from_grid(&LevelGrid::parse(text).unwrap())
    }

    fn snake(body: &[(i32, i32)], direction: Direction) -> SnakeState {
        SnakeState::new(body.iter().map(|(x, y)| Position::new(*x, *y)), direction).unwrap()
    }

    #[test]
    fn test_straight_horizontal_run() {
        let b = board(".....\n.....");
        let s = snake(&[(1, 0), (2, 0), (3, 0)], Direction::Right);
        let layout = render(&b, &s);
        assert_eq!(layout.segment_at(Position::new(1, 0)), Some(SnakeSprite::Tail(Direction::Left)));
        assert_eq!(layout.segment_at(Position::new(2, 0)), Some(SnakeSprite::Horizontal));
        assert_eq!(layout.segment_at(Position::new(3, 0)), Some(SnakeSprite::Head(Direction::Right)));
    }

    #[test]
    fn test_straight_vertical_run() {
        let b = board("..\n..\n..");
        let s = snake(&[(1, 2), (1, 1), (1, 0)], Direction::Up);
        assert_eq!(render(&b, &s).to_string(), ".^\n.│\n.╷\n");
    }

    #[test]
    fn test_every_bend() {
        let b = board("...\n...\n...");
        // right then down: the turning cell joins left and down
        let layout = render(&b, &snake(&[(0, 0), (1, 0), (1, 1)], Direction::Down));
        assert_eq!(layout.segment_at(Position::new(1, 0)), Some(SnakeSprite::Bend(Bend::DownLeft)));

        // down then right: joins up and right
        let layout = render(&b, &snake(&[(0, 0), (0, 1), (1, 1)], Direction::Right));
        assert_eq!(layout.segment_at(Position::new(0, 1)), Some(SnakeSprite::Bend(Bend::UpRight)));

        // left then up: joins right and up
        let layout = render(&b, &snake(&[(2, 1), (1, 1), (1, 0)], Direction::Up));
        assert_eq!(layout.segment_at(Position::new(1, 1)), Some(SnakeSprite::Bend(Bend::UpRight)));

        // up then left: joins down and left
        let layout = render(&b, &snake(&[(1, 2), (1, 1), (0, 1)], Direction::Left));
        assert_eq!(layout.segment_at(Position::new(1, 1)), Some(SnakeSprite::Bend(Bend::DownLeft)));

        // right then up: joins left and up
        let layout = render(&b, &snake(&[(0, 1), (1, 1), (1, 0)], Direction::Up));
        assert_eq!(layout.segment_at(Position::new(1, 1)), Some(SnakeSprite::Bend(Bend::UpLeft)));

        // up then right: joins down and right
        let layout = render(&b, &snake(&[(0, 2), (0, 1), (1, 1)], Direction::Right));
        assert_eq!(layout.segment_at(Position::new(0, 1)), Some(SnakeSprite::Bend(Bend::DownRight)));
    }

    #[test]
    fn test_bend_does_not_depend_on_travel_direction() {
        let b = board("...\n...\n...");
        let forward = render(&b, &snake(&[(0, 0), (1, 0), (1, 1)], Direction::Down));
        let backward = render(&b, &snake(&[(1, 1), (1, 0), (0, 0)], Direction::Left));
        assert_eq!(
            forward.segment_at(Position::new(1, 0)),
            backward.segment_at(Position::new(1, 0))
        );
    }

    #[test]
    fn test_body_across_the_right_edge_stays_straight() {
        let b = board("....");
        let s = snake(&[(2, 0), (3, 0), (0, 0)], Direction::Right);
        assert_eq!(render(&b, &s).to_string(), ">.╴─\n");
    }

    #[test]
    fn test_tail_across_edges() {
        let b = board("...\n...\n...");
        // tail on the top row, next segment wrapped to the bottom row
        let s = snake(&[(1, 0), (1, 2), (1, 1)], Direction::Up);
        let layout = render(&b, &s);
        assert_eq!(layout.segment_at(Position::new(1, 0)), Some(SnakeSprite::Tail(Direction::Down)));
        assert_eq!(layout.segment_at(Position::new(1, 2)), Some(SnakeSprite::Vertical));

        // tail on the left column, next segment wrapped to the right column
        let s = snake(&[(0, 1), (2, 1), (1, 1)], Direction::Left);
        let layout = render(&b, &s);
        assert_eq!(layout.segment_at(Position::new(0, 1)), Some(SnakeSprite::Tail(Direction::Right)));
    }

    #[test]
    fn test_bend_across_the_bottom_edge() {
        let b = board("...\n...\n...");
        let s = snake(&[(0, 1), (0, 0), (1, 0)], Direction::Right);
        let layout = render(&b, &s);
        assert_eq!(layout.segment_at(Position::new(0, 0)), Some(SnakeSprite::Bend(Bend::DownRight)));

        // same turn, but the body comes up through the bottom edge
        let s = snake(&[(0, 2), (0, 0), (1, 0)], Direction::Right);
        let layout = render(&b, &s);
        assert_eq!(layout.segment_at(Position::new(0, 0)), Some(SnakeSprite::Bend(Bend::UpRight)));
    }

    #[test]
    fn test_segments_apart_on_the_board_fall_back() {
        let b = board("......");
        let s = snake(&[(0, 0), (3, 0)], Direction::Right);
        let layout = render(&b, &s);
        assert_eq!(layout.segment_at(Position::new(0, 0)), Some(SnakeSprite::Tail(Direction::Left)));
        assert_eq!(layout.segment_at(Position::new(3, 0)), Some(SnakeSprite::Head(Direction::Right)));

        let s = snake(&[(0, 0), (2, 0), (3, 0)], Direction::Right);
        let layout = render(&b, &s);
        assert_eq!(layout.segment_at(Position::new(2, 0)), Some(SnakeSprite::Horizontal));
    }

    #[test]
    fn test_neighbor_direction_takes_the_short_way() {
        let east = Position::new(5, 0);
        let west = Position::new(0, 0);
        assert_eq!(neighbor_direction(east, west, 6, 1), Some(Direction::Right));
        assert_eq!(neighbor_direction(west, east, 6, 1), Some(Direction::Left));
        assert_eq!(neighbor_direction(west, Position::new(0, 1), 1, 3), Some(Direction::Down));
        assert_eq!(neighbor_direction(west, west, 6, 1), None);
    }

    #[test]
    fn test_single_segment_is_a_head() {
        let b = board("...");
        let layout = render(&b, &snake(&[(1, 0)], Direction::Left));
        assert_eq!(layout.segments().len(), 1);
        assert_eq!(layout.segment_at(Position::new(1, 0)), Some(SnakeSprite::Head(Direction::Left)));
    }

    #[test]
    fn test_tiles_and_apple() {
        let b = board("#.@\n...");
        let layout = render(&b, &snake(&[(0, 1), (1, 1)], Direction::Right));
        assert_eq!(layout.tile_at(Position::new(0, 0)), TileSprite::Wall);
        assert_eq!(layout.tile_at(Position::new(2, 0)), TileSprite::Floor);
        assert_eq!(layout.apple(), Some(Position::new(2, 0)));
        assert_eq!(layout.to_string(), "#.@\n╴>.\n");
    }

    #[test]
    fn test_body_sprite_is_total() {
        let options = [
            None,
            Some(Direction::Up),
            Some(Direction::Down),
            Some(Direction::Left),
            Some(Direction::Right),
        ];
        for a in options.iter() {
            for b in options.iter() {
                let sprite = body_sprite(*a, *b);
                assert_eq!(sprite, body_sprite(*b, *a));
                assert!(!matches!(sprite, SnakeSprite::Head(_) | SnakeSprite::Tail(_)));
            }
        }
    }

    #[test]
    fn test_sheet_frames_are_distinct() {
        let mut sprites = vec![
            SnakeSprite::Horizontal,
            SnakeSprite::Vertical,
            SnakeSprite::Bend(Bend::UpLeft),
            SnakeSprite::Bend(Bend::UpRight),
            SnakeSprite::Bend(Bend::DownLeft),
            SnakeSprite::Bend(Bend::DownRight),
        ];
        for d in Direction::all().iter() {
            sprites.push(SnakeSprite::Head(*d));
            sprites.push(SnakeSprite::Tail(*d));
        }
        let mut frames: Vec<(u32, u32)> = sprites.iter().map(SnakeSprite::sheet_frame).collect();
        frames.sort_unstable();
        frames.dedup();
        assert_eq!(frames.len(), 14);
        assert!(frames.iter().all(|(x, y)| *x < 5 * SHEET_FRAME_SIZE && *y < 4 * SHEET_FRAME_SIZE));
    }
}
