//! Engine module: square merge-puzzle board, directional moves, tile
//! spawning and terminal detection.
//!
//! - `Board` is the N×N state with the ergonomic methods.
//! - Free functions mirror the methods when convenient (e.g., `shift`).
//! - Every direction is reduced to one left collapse on rows; see `ops`.
//! - Randomness comes in through [`TileSource`], never a global generator.

mod ops;
pub mod spawn;
pub mod state;

pub use spawn::{SpawnRule, TileSource};
pub use state::{Board, Move, MoveResult, Score, Tile};

pub use ops::{collapse_row, count_empty, highest_tile, is_terminal, shift};

/// Grid dimension used when nothing else is configured.
pub const DEFAULT_SIZE: usize = 4;
/// Smallest playable grid.
pub const MIN_SIZE: usize = 2;
/// Largest grid whose best reachable tile, 2^(N*N+1), still fits in a `u64`.
pub const MAX_SIZE: usize = 7;
