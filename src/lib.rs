//! game-2048: a sliding-tile merge puzzle engine
//!
//! This crate provides:
//! - An N×N `Board` with pure move logic (`shift`, `make_move`, `is_terminal`, ...)
//! - A `TileSource` seam so tile spawns can be seeded or scripted
//! - A `Game` session that tracks score and the in-progress/over status
//! - A TOML-backed `GameConfig` (grid size, win tile, four-spawn chance)
//!
//! Quick start:
//! ```
//! use game_2048::{Game, GameConfig, GameStatus};
//! use game_2048::engine::Move;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic session with a seeded RNG
//! let mut game = Game::new(GameConfig::default(), StdRng::seed_from_u64(42)).unwrap();
//! assert_eq!(game.board().tiles().count(), 2);
//!
//! for dir in [Move::Left, Move::Up, Move::Right, Move::Down] {
//!     let outcome = game.apply_move(dir).unwrap();
//!     assert!(outcome.score >= outcome.score_delta);
//! }
//! assert_eq!(game.status(), GameStatus::InProgress);
//! ```
//!
//! Note: `Board` methods are usable without a `Game` when you only need the
//! transition function; pass any `rand::Rng` (or your own `TileSource`).
//!
pub mod config;
pub mod engine;
pub mod error;
pub mod game;

pub use config::GameConfig;
pub use error::GameError;
pub use game::{Game, GameStatus, MoveOutcome};
