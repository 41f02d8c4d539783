//! Game session simulation
//!
//! Everything that decides "what is happening right now" lives here:
//! - Single-threaded, driven by one `tick` per frame
//! - One authoritative phase, changed only through the transition table
//! - At most one transition in flight
//! - No rendering, audio or physics dependencies

pub mod level;
pub mod lifecycle;
mod phases;
pub mod scoreboard;
pub mod session;
pub mod state;
pub mod tick;
pub mod timer;

pub use level::{BrickDef, LevelDefinition, LevelInstance, LevelSet};
pub use lifecycle::RoundEntities;
pub use phases::AutoTransition;
pub use scoreboard::Scoreboard;
pub use session::GameSession;
pub use state::{Ball, Brick, BrickHit, GamePhase, Paddle};
pub use tick::FrameInput;
pub use timer::{FrameClock, TimerHandle, TimerQueue};
