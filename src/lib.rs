//! Brick Breaker - game session core
//!
//! Core modules:
//! - `sim`: Session state machine, scoreboard, round entities, timers
//! - `bus`: Publish/subscribe channels for decoupled observers
//! - `ui`: Display sinks the session drives (panels, HUD labels)
//! - `audio`: Sound cue collaborator driven by notifications
//! - `settings`: Music/SFX preferences with change notification
//! - `highscore`: Highscore label observer
//! - `config`: Runtime session configuration

pub mod audio;
pub mod bus;
pub mod config;
pub mod error;
pub mod highscore;
pub mod settings;
pub mod sim;
pub mod ui;

pub use config::SessionConfig;
pub use error::{GameError, Result};
pub use settings::{Settings, SettingsStore};
pub use sim::{FrameInput, GamePhase, GameSession};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz frame loop)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Balls granted at the start of every run
    pub const STARTING_BALLS: u8 = 3;
    /// Seconds the "level complete" panel stays up before the next level loads
    pub const LEVEL_COMPLETE_DELAY: f32 = 2.0;

    /// Paddle spawn position (bottom of the playfield)
    pub const PADDLE_SPAWN: Vec2 = Vec2::new(0.0, -17.0);
    /// Ball spawn position (just above the paddle)
    pub const BALL_SPAWN: Vec2 = Vec2::new(0.0, -12.0);
    /// Ball launch speed
    pub const BALL_START_SPEED: f32 = 20.0;
}
