//! Error types for data loading
//!
//! The session itself never fails: illegal requests are ignored. Only the
//! data it is built from (levels, config, settings) can be rejected.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("level set is empty")]
    NoLevels,

    #[error("level {index} ({name}) has no bricks")]
    EmptyLevel { index: usize, name: String },

    #[error("brick {brick} in level {index} needs at least one hit")]
    InvalidBrick { index: usize, brick: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
