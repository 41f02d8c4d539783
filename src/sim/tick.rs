//! Per-frame session update
//!
//! One call per rendered frame. The frame clock advances first, then the
//! current phase polls its exit conditions, then every transition that is
//! due (including ones just requested with zero delay) is applied.

use super::phases;
use super::session::GameSession;

/// Discrete key presses seen this frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Pause toggle key
    pub pause: bool,
    /// Any key at all (includes the pause key)
    pub any_key: bool,
}

impl GameSession {
    /// Advance the session by one frame of `dt` real seconds.
    ///
    /// Still runs while paused: game time stops but the session keeps
    /// polling for the resume key and its own scheduled transitions keep
    /// counting down on real frame time.
    pub fn tick(&mut self, input: &FrameInput, dt: f32) {
        self.clock.advance(dt);
        (phases::hooks(self.phase).update)(self, input);
        self.apply_due_transitions();
    }
}
