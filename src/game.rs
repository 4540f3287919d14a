//! A single game session: one board, its running score and status.
//!
//! `Game` is the state machine on top of the pure engine. It starts a new
//! board with two tiles, applies one move at a time, keeps the cumulative
//! score and flips to [`GameStatus::Over`] once the board is terminal. Moves
//! are refused while over; only [`Game::restart`] gets out of that state.

use log::{debug, info, warn};

use crate::config::GameConfig;
use crate::engine::{Board, Move, Score, TileSource};
use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Over,
}

/// What one accepted move did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub moved: bool,
    pub score_delta: Score,
    /// Cumulative score after the move.
    pub score: Score,
    pub status: GameStatus,
}

pub struct Game<S: TileSource> {
    config: GameConfig,
    board: Board,
    score: Score,
    status: GameStatus,
    moves: u64,
    source: S,
}

impl<S: TileSource> Game<S> {
    /// Validate `config` and deal a fresh board.
    ///
    /// ```
    /// use game_2048::{Game, GameConfig, GameStatus};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let game = Game::new(GameConfig::default(), StdRng::seed_from_u64(7)).unwrap();
    /// assert_eq!(game.board().tiles().count(), 2);
    /// assert_eq!(game.score(), 0);
    /// assert_eq!(game.status(), GameStatus::InProgress);
    /// ```
    pub fn new(config: GameConfig, source: S) -> Result<Self, GameError> {
        config.validate()?;
        let board = Board::new(config.size)?;
        let mut game = Game { config, board, score: 0, status: GameStatus::InProgress, moves: 0, source };
        game.restart();
        Ok(game)
    }

    /// Start over: empty board plus two tiles at distinct cells, score 0.
    pub fn restart(&mut self) {
        let rule = self.config.spawn_rule();
        // Second spawn draws among the cells still empty after the first.
        let board = Board::from_cells_unchecked(self.config.size, vec![0; self.config.size * self.config.size])
            .with_spawned_tile(rule, &mut self.source)
            .with_spawned_tile(rule, &mut self.source);
        self.board = board;
        self.score = 0;
        self.moves = 0;
        self.status = self.status_of_board();
        info!("new {0}x{0} game", self.config.size);
    }

    /// Apply one directional move.
    ///
    /// A move that changes nothing is accepted but leaves board and score
    /// alone. Fails with [`GameError::GameOver`] once the game has ended.
    pub fn apply_move(&mut self, dir: Move) -> Result<MoveOutcome, GameError> {
        if self.status == GameStatus::Over {
            warn!("rejected {dir}: game is over");
            return Err(GameError::GameOver);
        }
        let result = self.board.make_move_with(dir, self.config.spawn_rule(), &mut self.source);
        if result.moved {
            self.board = result.board;
            self.score += result.score_delta;
            self.moves += 1;
            self.status = self.status_of_board();
            debug!("move {} {dir}: +{} (score {})", self.moves, result.score_delta, self.score);
            if self.status == GameStatus::Over {
                info!(
                    "game over after {} moves: score {}, highest tile {}",
                    self.moves,
                    self.score,
                    self.board.highest_tile()
                );
            }
        } else {
            debug!("move {dir} changed nothing");
        }
        Ok(MoveOutcome { moved: result.moved, score_delta: result.score_delta, score: self.score, status: self.status })
    }

    fn status_of_board(&self) -> GameStatus {
        if self.board.is_terminal() { GameStatus::Over } else { GameStatus::InProgress }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }

    /// Number of accepted moves that changed the board.
    #[inline]
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// True once any tile has reached the configured win tile.
    #[inline]
    pub fn has_won(&self) -> bool {
        self.board.highest_tile() >= self.config.win_tile
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Replace the board mid-session. Score and move count are kept.
    pub fn load_board(&mut self, board: Board) -> Result<(), GameError> {
        if board.size() != self.config.size {
            return Err(GameError::MalformedBoard(format!(
                "board is {0}x{0}, game is configured for {1}x{1}",
                board.size(),
                self.config.size
            )));
        }
        self.board = board;
        self.status = self.status_of_board();
        Ok(())
    }
}
