use thiserror::Error;

use crate::GameMode;

/// `Result<_, PpError>`
pub type PpResult<T> = Result<T, PpError>;

/// Anything that could go wrong during a difficulty or performance calculation.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PpError {
    /// Only osu!standard maps can be calculated.
    #[error("unsupported game mode {0:?}")]
    UnsupportedMode(GameMode),
    /// Neither a beatmap nor the given value was provided.
    #[error("missing parameter `{0}`")]
    MissingParameter(&'static str),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
