#![warn(missing_debug_implementations, missing_docs)]
//! Simulation core for Twisty Zapper, a single player grid snake game.
//!
//! The crate owns everything that decides *what* is on screen: level parsing,
//! the toroidal board, the snake state machine, apple spawning, the sprite
//! layout pass, and the persisted best-score ledger. Windowing, input polling,
//! audio playback and texture loading belong to the host shell, which drives a
//! [`session::GameSession`] once per frame and draws the returned
//! [`session::Frame`].
//!
//! ```
//! use twisty_zapper::level::{BundledLevels, LevelId};
//! use twisty_zapper::session::{GameSession, SessionInput};
//! use twisty_zapper::ledger::Ledger;
//! use twisty_zapper::config::Config;
//! use twisty_zapper::types::{Difficulty, Direction, NoopInstruments};
//!
//! let config = Config::default();
//! let id = LevelId::new(Difficulty::Easy, 0).unwrap();
//! let mut session = GameSession::start(&BundledLevels, id, &config).unwrap();
//! let mut ledger = Ledger::blank();
//!
//! session.handle(SessionInput::Steer(Direction::Down));
//! let frame = session.tick(&mut ledger, &NoopInstruments);
//! assert_eq!(frame.score, 0);
//! ```

pub mod board;
pub mod config;
pub mod layout;
pub mod ledger;
pub mod level;
pub mod menu;
pub mod scene;
pub mod session;
pub mod skin;
pub mod snake;
pub mod spawner;
pub mod types;
