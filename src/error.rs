use std::io;

/// Errors surfaced by the engine, the game session and config loading.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("invalid direction: {0:?}")]
    InvalidDirection(String),
    #[error("malformed board: {0}")]
    MalformedBoard(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("game is over; restart to keep playing")]
    GameOver,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
