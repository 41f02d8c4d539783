//! Session phases and round-scoped entity types

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Main menu, waiting for the play request
    Menu,
    /// Round setup: counters reset, player spawned
    Init,
    /// Active gameplay
    Play,
    /// Level cleared, "level complete" panel up
    LevelCompleted,
    /// Instantiating the next level (or ending the run)
    LoadLevel,
    /// Run ended
    GameOver,
    /// Game is paused
    Pause,
}

impl GamePhase {
    /// Every phase, in table order
    pub const ALL: [GamePhase; 7] = [
        GamePhase::Menu,
        GamePhase::Init,
        GamePhase::Play,
        GamePhase::LevelCompleted,
        GamePhase::LoadLevel,
        GamePhase::GameOver,
        GamePhase::Pause,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "Menu",
            GamePhase::Init => "Init",
            GamePhase::Play => "Play",
            GamePhase::LevelCompleted => "LevelCompleted",
            GamePhase::LoadLevel => "LoadLevel",
            GamePhase::GameOver => "GameOver",
            GamePhase::Pause => "Pause",
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub id: u32,
    pub pos: Vec2,
}

impl Paddle {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            pos: PADDLE_SPAWN,
        }
    }
}

/// A ball entity. Movement belongs to the physics collaborator; the
/// session only decides when one exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    /// Spawn above the paddle, launched straight up
    pub fn new(id: u32) -> Self {
        Self {
            id,
            pos: BALL_SPAWN,
            vel: Vec2::Y * BALL_START_SPEED,
        }
    }
}

/// Result of a ball striking a brick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickHit {
    /// Brick survived with this many hits left
    Damaged { hits_left: u8 },
    /// Brick broke and awards its points
    Destroyed { points: u32 },
}

/// A brick inside a level container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub pos: Vec2,
    /// Hits remaining before the brick breaks
    pub hits: u8,
    pub points: u32,
}

impl Brick {
    pub fn hit(&mut self) -> BrickHit {
        self.hits = self.hits.saturating_sub(1);
        if self.hits == 0 {
            BrickHit::Destroyed {
                points: self.points,
            }
        } else {
            BrickHit::Damaged {
                hits_left: self.hits,
            }
        }
    }
}
