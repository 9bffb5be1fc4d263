//! Things drawn on the playfield, and the short lived effects on top of it.
//!
//! Everything here is a closed set of [`SceneEntity`] variants. The static
//! ones come straight from a [`Layout`] each frame; particles and the end of
//! game banner are owned by a [`Scene`] for the lifetime of one session and
//! are advanced once per tick.
use rand::Rng;

use crate::layout::{Layout, SnakeSprite, TileSprite};
use crate::types::Position;

/// side of a board cell on screen, in pixels
pub const TILE_SIZE: i32 = 25;
/// the playfield is square, the window adds a status strip below it
pub const PLAYFIELD_SIZE: i32 = 750;
#[allow(missing_docs)]
pub const WINDOW_WIDTH: i32 = 750;
#[allow(missing_docs)]
pub const WINDOW_HEIGHT: i32 = 800;
/// particles thrown when an apple is eaten
pub const EAT_PARTICLES: usize = 10;
/// particles thrown when the head hits a wall
pub const WALL_PARTICLES: usize = 20;
/// pixels the banner slides per tick
pub const BANNER_SPEED: i32 = 50;

/// An RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[allow(missing_docs)]
pub const EAT_COLOUR: Rgb = Rgb(240, 0, 0);
#[allow(missing_docs)]
pub const WALL_HIT_COLOUR: Rgb = Rgb(0, 0, 0);

/// A small square flung out of a cell that fades after a few ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// pixel position of the top left corner
    pub x: f32,
    #[allow(missing_docs)]
    pub y: f32,
    /// pixels per tick
    pub velocity: (f32, f32),
    /// side of the square in pixels
    pub side: u32,
    /// ticks left to live
    pub lifetime: u32,
    #[allow(missing_docs)]
    pub colour: Rgb,
}

impl Particle {
    /// A particle centred on `cell` with a random size, lifetime and velocity
    pub fn new<R: Rng + ?Sized>(cell: Position, colour: Rgb, rng: &mut R) -> Self {
        let side = rng.gen_range(3..=9);
        let centre_x = (cell.x * TILE_SIZE + TILE_SIZE / 2) as f32;
        let centre_y = (cell.y * TILE_SIZE + TILE_SIZE / 2) as f32;
        Particle {
            x: centre_x - side as f32 / 2.0,
            y: centre_y - side as f32 / 2.0,
            velocity: (rng.gen_range(-1.0..2.0), rng.gen_range(-1.0..2.0)),
            side,
            lifetime: rng.gen_range(5..=15),
            colour,
        }
    }

    /// `count` new particles from the same cell
    pub fn burst<R: Rng + ?Sized>(
        cell: Position,
        count: usize,
        colour: Rgb,
        rng: &mut R,
    ) -> Vec<Particle> {
        (0..count).map(|_| Particle::new(cell, colour, rng)).collect()
    }

    /// Moves and ages the particle. False once it has expired or touched the
    /// playfield border.
    pub fn tick(&mut self) -> bool {
        self.x += self.velocity.0;
        self.y += self.velocity.1;
        self.lifetime = self.lifetime.saturating_sub(1);
        if self.lifetime == 0 {
            return false;
        }
        let limit = PLAYFIELD_SIZE as f32;
        let side = self.side as f32;
        self.x > 0.0 && self.y > 0.0 && self.x + side < limit && self.y + side < limit
    }
}

/// what the end of game banner announces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BannerKind {
    #[allow(missing_docs)]
    GameOver,
    #[allow(missing_docs)]
    Win,
}

/// A full window image that slides in from the left when the game ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Banner {
    #[allow(missing_docs)]
    pub kind: BannerKind,
    /// left edge in pixels, starts one window width off screen
    pub x: i32,
}

impl Banner {
    #[allow(missing_docs)]
    pub fn new(kind: BannerKind) -> Self {
        Banner {
            kind,
            x: -WINDOW_WIDTH,
        }
    }

    /// slides right until it covers the window, then stays put
    pub fn tick(&mut self) -> bool {
        if self.x < 0 {
            self.x = (self.x + BANNER_SPEED).min(0);
        }
        true
    }

    /// true once the banner has stopped moving
    pub fn settled(&self) -> bool {
        self.x >= 0
    }
}

/// Everything that can be drawn on the playfield
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEntity {
    #[allow(missing_docs)]
    Tile(TileSprite, Position),
    #[allow(missing_docs)]
    SnakeSegment(SnakeSprite, Position),
    #[allow(missing_docs)]
    Apple(Position),
    #[allow(missing_docs)]
    Particle(Particle),
    #[allow(missing_docs)]
    Banner(Banner),
}

impl SceneEntity {
    /// Advances the entity by one tick. False when it should be removed.
    pub fn tick(&mut self) -> bool {
        match self {
            SceneEntity::Tile(..) | SceneEntity::SnakeSegment(..) | SceneEntity::Apple(_) => true,
            SceneEntity::Particle(p) => p.tick(),
            SceneEntity::Banner(b) => b.tick(),
        }
    }

    /// Pixel position of the top left corner of the entity
    pub fn origin(&self) -> (i32, i32) {
        match self {
            SceneEntity::Tile(_, pos)
            | SceneEntity::SnakeSegment(_, pos)
            | SceneEntity::Apple(pos) => (pos.x * TILE_SIZE, pos.y * TILE_SIZE),
            SceneEntity::Particle(p) => (p.x as i32, p.y as i32),
            SceneEntity::Banner(b) => (b.x, 0),
        }
    }
}

/// The transient entities of one game session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    transients: Vec<SceneEntity>,
}

impl Scene {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Scene::default()
    }

    /// adds particles to the scene
    pub fn add_particles(&mut self, particles: impl IntoIterator<Item = Particle>) {
        self.transients
            .extend(particles.into_iter().map(SceneEntity::Particle));
    }

    /// Adds the end of game banner. There is only ever one.
    pub fn add_banner(&mut self, kind: BannerKind) {
        if !self.has_banner() {
            self.transients.push(SceneEntity::Banner(Banner::new(kind)));
        }
    }

    #[allow(missing_docs)]
    pub fn has_banner(&self) -> bool {
        self.transients
            .iter()
            .any(|e| matches!(e, SceneEntity::Banner(_)))
    }

    /// ticks every transient and drops the expired ones
    pub fn tick(&mut self) {
        let mut kept = Vec::with_capacity(self.transients.len());
        for mut entity in self.transients.drain(..) {
            if entity.tick() {
                kept.push(entity);
            }
        }
        self.transients = kept;
    }

    /// removes every transient
    pub fn clear(&mut self) {
        self.transients.clear();
    }

    #[allow(missing_docs)]
    pub fn transients(&self) -> &[SceneEntity] {
        &self.transients
    }

    /// everything to draw this frame, see [`compose`]
    pub fn draw_list(&self, layout: &Layout) -> Vec<SceneEntity> {
        compose(layout, &self.transients)
    }
}

/// Everything to draw for one frame, back to front: tiles, the apple, the
/// snake, particles and finally the banner.
pub fn compose(layout: &Layout, transients: &[SceneEntity]) -> Vec<SceneEntity> {
    let mut entities =
        Vec::with_capacity(layout.tiles().len() + layout.segments().len() + transients.len() + 1);
    for y in 0..layout.height() as i32 {
        for x in 0..layout.width() as i32 {
            let pos = Position::new(x, y);
            entities.push(SceneEntity::Tile(layout.tile_at(pos), pos));
        }
    }
    entities.extend(layout.apple().map(SceneEntity::Apple));
    entities.extend(
        layout
            .segments()
            .iter()
            .map(|s| SceneEntity::SnakeSegment(s.sprite, s.position)),
    );
    entities.extend(
        transients
            .iter()
            .filter(|e| matches!(e, SceneEntity::Particle(_)))
            .cloned(),
    );
    entities.extend(
        transients
            .iter()
            .filter(|e| matches!(e, SceneEntity::Banner(_)))
            .cloned(),
    );
    entities
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::board::Board;
    use crate::layout::render;
    use crate::level::LevelGrid;
    use crate::snake::SnakeState;

    #[test]
    fn test_particles_start_in_range() {
        let mut rng = SmallRng::seed_from_u64(3);
        for p in Particle::burst(Position::new(10, 10), 200, EAT_COLOUR, &mut rng) {
            assert!((3..=9).contains(&p.side));
            assert!((5..=15).contains(&p.lifetime));
            assert!(p.velocity.0 >= -1.0 && p.velocity.0 < 2.0);
            assert!(p.velocity.1 >= -1.0 && p.velocity.1 < 2.0);
            assert_eq!(p.colour, EAT_COLOUR);
        }
    }

    #[test]
    fn test_particle_expires_with_its_lifetime() {
        let mut p = Particle {
            x: 300.0,
            y: 300.0,
            velocity: (1.0, 1.0),
            side: 5,
            lifetime: 3,
            colour: WALL_HIT_COLOUR,
        };
        assert!(p.tick());
        assert!(p.tick());
        assert!(!p.tick());
        assert_eq!((p.x, p.y), (303.0, 303.0));
    }

    #[test]
    fn test_particle_dies_at_the_border() {
        let mut p = Particle {
            x: 1.5,
            y: 300.0,
            velocity: (-1.0, 0.0),
            side: 5,
            lifetime: 10,
            colour: WALL_HIT_COLOUR,
        };
        assert!(p.tick());
        assert!(!p.tick());

        let mut p = Particle {
            x: 300.0,
            y: 743.0,
            velocity: (0.0, 2.0),
            side: 5,
            lifetime: 10,
            colour: WALL_HIT_COLOUR,
        };
        assert!(!p.tick());
    }

    #[test]
    fn test_banner_slides_in_and_stops() {
        let mut banner = Banner::new(BannerKind::Win);
        assert_eq!(banner.x, -750);
        for _ in 0..14 {
            assert!(banner.tick());
            assert!(!banner.settled());
        }
        banner.tick();
        assert!(banner.settled());
        banner.tick();
        assert_eq!(banner.x, 0);
    }

    #[test]
    fn test_scene_tick_drops_expired_particles() {
        let mut scene = Scene::new();
        let mut rng = SmallRng::seed_from_u64(11);
        scene.add_particles(Particle::burst(Position::new(15, 15), 10, EAT_COLOUR, &mut rng));
        scene.add_banner(BannerKind::GameOver);
        scene.add_banner(BannerKind::Win);
        assert_eq!(scene.transients().len(), 11);
        for _ in 0..15 {
            scene.tick();
        }
        assert_eq!(scene.transients().len(), 1);
        assert!(scene.has_banner());
        assert_eq!(
            scene.transients()[0],
            SceneEntity::Banner(Banner {
                kind: BannerKind::GameOver,
                x: 0
            })
        );
    }

    #[test]
    fn test_draw_list_order() {
        let board = Board::from_grid(&LevelGrid::parse("#..@").unwrap());
        let snake = SnakeState::new(
            vec![Position::new(1, 0), Position::new(2, 0)],
            crate::types::Direction::Right,
        )
        .unwrap();
        let layout = render(&board, &snake);
        let mut scene = Scene::new();
        scene.add_banner(BannerKind::Win);
        let mut rng = SmallRng::seed_from_u64(1);
        scene.add_particles(Particle::burst(Position::new(3, 0), 2, EAT_COLOUR, &mut rng));

        let list = scene.draw_list(&layout);
        assert_eq!(list.len(), 4 + 1 + 2 + 2 + 1);
        assert_eq!(list[0], SceneEntity::Tile(TileSprite::Wall, Position::new(0, 0)));
        assert_eq!(list[4], SceneEntity::Apple(Position::new(3, 0)));
        assert!(matches!(list[6], SceneEntity::SnakeSegment(SnakeSprite::Head(_), _)));
        assert!(matches!(list[7], SceneEntity::Particle(_)));
        assert!(matches!(list[9], SceneEntity::Banner(_)));
        assert_eq!(list[6].origin(), (50, 0));
    }
}
