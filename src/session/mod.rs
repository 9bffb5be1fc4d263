//! One played level, from start to restart or exit.
//!
//! A [`GameSession`] owns the board, the snake, the transient scene and the
//! random source for the lifetime of a level. The shell calls
//! [`GameSession::handle`] for every key press and [`GameSession::tick`] once
//! per simulation interval, then draws the returned [`Frame`].
use std::mem;
use std::time::{Duration, Instant};

use num_format::{Locale, ToFormattedString};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info, instrument, warn};

use crate::board::Board;
use crate::config::Config;
use crate::layout::{self, Layout};
use crate::ledger::Ledger;
use crate::level::{LevelError, LevelGrid, LevelId, LevelSource};
use crate::scene::{
    self, BannerKind, Particle, Scene, SceneEntity, EAT_COLOUR, EAT_PARTICLES, WALL_HIT_COLOUR,
    WALL_PARTICLES,
};
use crate::snake::{DeathCause, Outcome, SnakeState, SnakeStatus};
use crate::spawner;
use crate::types::{CellKind, CellQueryableBoard, Direction, SimulatorInstruments, SoundCue};

/// A key press while a level is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionInput {
    /// head this way from the next tick on
    Steer(Direction),
    #[allow(missing_docs)]
    TogglePause,
    /// start the level over
    Restart,
    /// leave for the main menu
    Escape,
}

/// What the shell should do after an input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionSignal {
    /// keep running this session
    Continue,
    /// drop the session and show the main menu
    ExitToMenu,
}

/// Everything the shell needs to draw one tick
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    #[allow(missing_docs)]
    pub layout: Layout,
    /// apples eaten so far
    pub score: u32,
    /// best score on record for this level, `None` if the ledger could not say
    pub best: Option<u32>,
    #[allow(missing_docs)]
    pub status: SnakeStatus,
    #[allow(missing_docs)]
    pub paused: bool,
    /// particles and the end of game banner
    pub transients: Vec<SceneEntity>,
    /// sounds triggered since the previous frame
    pub cues: Vec<SoundCue>,
}

impl Frame {
    #[allow(missing_docs)]
    pub fn outcome(&self) -> Outcome {
        self.status.into()
    }

    /// e.g. `Score: 1,024`
    pub fn score_label(&self) -> String {
        format!("Score: {}", self.score.to_formatted_string(&Locale::en))
    }

    /// e.g. `Best: 12`, or `Best: -` when unknown
    pub fn best_label(&self) -> String {
        match self.best {
            Some(best) => format!("Best: {}", best.to_formatted_string(&Locale::en)),
            None => "Best: -".to_owned(),
        }
    }

    /// every entity to draw, back to front
    pub fn draw_list(&self) -> Vec<SceneEntity> {
        scene::compose(&self.layout, &self.transients)
    }
}

/// A running level
#[derive(Debug)]
pub struct GameSession {
    id: LevelId,
    grid: LevelGrid,
    board: Board,
    snake: SnakeState,
    heading: Direction,
    paused: bool,
    scene: Scene,
    rng: SmallRng,
    tick_interval: Duration,
    cues: Vec<SoundCue>,
}

impl GameSession {
    /// Loads the level and places the starting snake and the first apple.
    /// Fails if the level cannot be loaded or the starting cells are not free.
    pub fn start<S: LevelSource + ?Sized>(
        source: &S,
        id: LevelId,
        config: &Config,
    ) -> Result<Self, LevelError> {
        let grid = source.load(id)?;
        let board = Board::from_grid(&grid);
        let snake = SnakeState::starting();
        for segment in snake.body().iter() {
            if board.wrap(*segment) != *segment || !board.is_passable(*segment) {
                return Err(LevelError::BlockedStart {
                    position: *segment,
                });
            }
        }

        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let mut session = GameSession {
            id,
            grid,
            heading: snake.direction(),
            board,
            snake,
            paused: false,
            scene: Scene::new(),
            rng,
            tick_interval: config.tick_rates.interval(id.difficulty()),
            cues: Vec::new(),
        };
        session.place_first_apple();
        info!(level = %id, "session started");
        Ok(session)
    }

    #[allow(missing_docs)]
    pub fn id(&self) -> LevelId {
        self.id
    }

    #[allow(missing_docs)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[allow(missing_docs)]
    pub fn snake(&self) -> &SnakeState {
        &self.snake
    }

    #[allow(missing_docs)]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// how long the shell should wait between two calls to [`GameSession::tick`]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    fn place_first_apple(&mut self) {
        if !spawner::ensure_apple(&mut self.board, &self.snake, &mut self.rng) {
            warn!(level = %self.id, "no free cell for an apple");
        }
    }

    /// Throws the current attempt away and sets the level up again
    pub fn restart(&mut self) {
        debug!(level = %self.id, score = self.snake.score(), "restarting");
        self.board = Board::from_grid(&self.grid);
        self.snake = SnakeState::starting();
        self.heading = self.snake.direction();
        self.paused = false;
        self.scene.clear();
        self.place_first_apple();
        self.cues.push(SoundCue::GameMusic);
    }

    /// Applies one key press. Steering and pausing only work while the snake
    /// is alive; restart and escape work at any time.
    pub fn handle(&mut self, input: SessionInput) -> SessionSignal {
        match input {
            SessionInput::Steer(direction) => {
                if self.snake.is_alive() {
                    self.heading = direction;
                }
            }
            SessionInput::TogglePause => {
                if self.snake.is_alive() {
                    self.paused = !self.paused;
                }
            }
            SessionInput::Restart => self.restart(),
            SessionInput::Escape => return SessionSignal::ExitToMenu,
        }
        SessionSignal::Continue
    }

    /// Runs one tick: unless paused, advances the snake, updates the effects
    /// and records the score. Then lays out the frame. Ledger problems are
    /// logged and otherwise ignored.
    #[instrument(level = "trace", skip_all)]
    pub fn tick<I: SimulatorInstruments + ?Sized>(
        &mut self,
        ledger: &mut Ledger,
        instruments: &I,
    ) -> Frame {
        if !self.paused {
            let start = Instant::now();
            if self.snake.is_alive() {
                self.simulate();
            }
            instruments.observe_simulation(start.elapsed());
            self.scene.tick();

            let (difficulty, level) = (self.id.difficulty(), self.id.number());
            if let Err(e) = ledger.write_best(difficulty, level, self.snake.score()) {
                warn!(level = %self.id, error = %e, "could not record score");
            }
        }

        // paused ticks only look at the copy already in memory
        let difficulty = self.id.difficulty();
        let level = self.id.number();
        let best = match ledger.read_best(difficulty, level) {
            Ok(best) => Some(best),
            Err(e) => {
                warn!(level = %self.id, error = %e, "could not read best score");
                None
            }
        };

        Frame {
            layout: layout::render(&self.board, &self.snake),
            score: self.snake.score(),
            best,
            status: self.snake.status(),
            paused: self.paused,
            transients: self.scene.transients().to_vec(),
            cues: mem::take(&mut self.cues),
        }
    }

    fn simulate(&mut self) {
        self.snake.turn(self.heading);
        let direction = self.snake.direction();
        let score = self.snake.score();
        let outcome = self.snake.advance(direction, &mut self.board, &mut self.rng);

        if self.snake.score() > score {
            let head = self.snake.head();
            self.scene
                .add_particles(Particle::burst(head, EAT_PARTICLES, EAT_COLOUR, &mut self.rng));
            self.cues.push(SoundCue::Eat);
        }

        match outcome {
            Outcome::Continue => {}
            Outcome::GameOver(cause) => {
                if cause == DeathCause::WallCollision {
                    let wall = self
                        .board
                        .wrap(self.snake.head().add_vec(direction.to_vector()));
                    debug_assert_eq!(self.board.cell_at(wall), CellKind::Wall);
                    self.scene.add_particles(Particle::burst(
                        wall,
                        WALL_PARTICLES,
                        WALL_HIT_COLOUR,
                        &mut self.rng,
                    ));
                }
                self.end(BannerKind::GameOver);
            }
            Outcome::Win => self.end(BannerKind::Win),
        }
    }

    fn end(&mut self, kind: BannerKind) {
        self.scene.add_banner(kind);
        self.cues.push(SoundCue::StopMusic);
        self.cues.push(SoundCue::GameOver);
    }
}
