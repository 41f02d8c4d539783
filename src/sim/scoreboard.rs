//! Session counters
//!
//! Every setter pushes the freshly formatted value to the score display,
//! if one is attached. Highscore publication is left to the session, which
//! owns the notification bus.

use crate::ui::{HudLabel, ScoreDisplay};

pub struct Scoreboard {
    score: u64,
    /// Zero-based level index (displayed one-based)
    level: u32,
    balls: u8,
    highscore: u64,
    display: Option<Box<dyn ScoreDisplay>>,
}

impl std::fmt::Debug for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scoreboard")
            .field("score", &self.score)
            .field("level", &self.level)
            .field("balls", &self.balls)
            .field("highscore", &self.highscore)
            .field("display", &self.display.is_some())
            .finish()
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Scoreboard {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 0,
            balls: 0,
            highscore: 0,
            display: None,
        }
    }

    /// Attach (or detach) the display and push current values to it
    pub fn set_display(&mut self, display: Option<Box<dyn ScoreDisplay>>) {
        self.display = display;
        self.show(HudLabel::Score);
        self.show(HudLabel::Balls);
        self.show(HudLabel::Level);
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn balls(&self) -> u8 {
        self.balls
    }

    pub fn highscore(&self) -> u64 {
        self.highscore
    }

    pub fn set_score(&mut self, score: u64) {
        self.score = score;
        self.show(HudLabel::Score);
    }

    pub fn add_score(&mut self, points: u64) {
        self.set_score(self.score.saturating_add(points));
    }

    pub fn set_level(&mut self, level: u32) {
        self.level = level;
        self.show(HudLabel::Level);
    }

    /// Step to the next level, never past `level_count`
    pub fn advance_level(&mut self, level_count: u32) {
        self.set_level((self.level + 1).min(level_count));
    }

    pub fn set_balls(&mut self, balls: u8) {
        self.balls = balls;
        self.show(HudLabel::Balls);
    }

    /// Take one ball away. Returns false (and changes nothing) at zero.
    pub fn lose_ball(&mut self) -> bool {
        if self.balls == 0 {
            return false;
        }
        self.set_balls(self.balls - 1);
        true
    }

    /// Start-of-run values
    pub fn reset(&mut self, starting_balls: u8) {
        self.set_score(0);
        self.set_level(0);
        self.set_balls(starting_balls);
    }

    /// `highscore = max(highscore, score)`; returns the new highscore
    pub fn record_highscore(&mut self) -> u64 {
        self.highscore = self.highscore.max(self.score);
        self.highscore
    }

    fn show(&mut self, label: HudLabel) {
        let value = match label {
            HudLabel::Score => self.score,
            HudLabel::Balls => u64::from(self.balls),
            HudLabel::Level => u64::from(self.level) + 1,
            HudLabel::Highscore => self.highscore,
        };
        if let Some(display) = self.display.as_mut() {
            display.show_text(label, &label.format(value));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::ui::HudState;

    fn with_hud() -> (Scoreboard, Rc<RefCell<HudState>>) {
        let hud = Rc::new(RefCell::new(HudState::new()));
        let mut board = Scoreboard::new();
        board.set_display(Some(Box::new(hud.clone())));
        (board, hud)
    }

    #[test]
    fn test_setters_update_display() {
        let (mut board, hud) = with_hud();
        board.reset(3);
        board.add_score(40);
        board.advance_level(5);
        board.lose_ball();

        let hud = hud.borrow();
        assert_eq!(hud.label(HudLabel::Score), Some("SCORE: 40"));
        assert_eq!(hud.label(HudLabel::Level), Some("LEVEL: 2"));
        assert_eq!(hud.label(HudLabel::Balls), Some("BALLS: 2"));
    }

    #[test]
    fn test_no_display_is_fine() {
        let mut board = Scoreboard::new();
        board.reset(3);
        board.add_score(10);
        assert_eq!(board.score(), 10);
    }

    #[test]
    fn test_balls_floor_at_zero() {
        let mut board = Scoreboard::new();
        board.set_balls(1);
        assert!(board.lose_ball());
        assert!(!board.lose_ball());
        assert_eq!(board.balls(), 0);
    }

    #[test]
    fn test_level_clamped_to_count() {
        let mut board = Scoreboard::new();
        board.advance_level(2);
        board.advance_level(2);
        board.advance_level(2);
        assert_eq!(board.level(), 2);
    }

    #[test]
    fn test_highscore_is_max() {
        let mut board = Scoreboard::new();
        board.set_score(50);
        assert_eq!(board.record_highscore(), 50);
        board.reset(3);
        board.set_score(20);
        assert_eq!(board.record_highscore(), 50);
        board.set_score(70);
        assert_eq!(board.record_highscore(), 70);
    }
}
