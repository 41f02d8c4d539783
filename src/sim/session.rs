//! The game session: authoritative phase, counters and round entities
//!
//! All mutation happens on the frame-loop thread. Requests made between
//! frames are applied at the end of the next [`GameSession::tick`];
//! requests made while a transition is in flight are rejected.

use crate::bus::NotificationBus;
use crate::config::SessionConfig;
use crate::ui::{Panel, ScoreDisplay, Screen};

use super::level::LevelSet;
use super::lifecycle::RoundEntities;
use super::phases::{self, AutoTransition};
use super::scoreboard::Scoreboard;
use super::state::{BrickHit, GamePhase};
use super::timer::{FrameClock, TimerHandle, TimerQueue};

pub struct GameSession {
    pub(super) phase: GamePhase,
    /// In-flight guard: set on request, cleared after the transition applies
    pub(super) transitioning: bool,
    pub(super) pending: Option<TimerHandle>,
    pub(super) timers: TimerQueue<GamePhase>,
    pub(super) clock: FrameClock,
    pub(super) paused: bool,
    pub(super) scoreboard: Scoreboard,
    pub(super) entities: RoundEntities,
    pub(super) levels: LevelSet,
    pub(super) config: SessionConfig,
    pub(super) bus: NotificationBus,
    pub(super) screen: Option<Box<dyn Screen>>,
}

impl GameSession {
    /// Build an idle session. Nothing is shown until [`GameSession::start`].
    pub fn new(levels: LevelSet, config: SessionConfig) -> Self {
        Self {
            phase: GamePhase::Menu,
            transitioning: false,
            pending: None,
            timers: TimerQueue::new(),
            clock: FrameClock::new(),
            paused: false,
            scoreboard: Scoreboard::new(),
            entities: RoundEntities::new(),
            levels,
            config,
            bus: NotificationBus::default(),
            screen: None,
        }
    }

    /// Enter the menu. Observers subscribed beforehand see the first
    /// StateChanged and HighscoreUpdated notifications.
    pub fn start(&mut self) {
        log::info!("Session starting with {} levels", self.levels.len());
        if self.request_transition(GamePhase::Menu, 0.0).is_some() {
            self.apply_due_transitions();
        }
    }

    pub fn set_screen(&mut self, screen: Option<Box<dyn Screen>>) {
        self.screen = screen;
    }

    pub fn set_score_display(&mut self, display: Option<Box<dyn ScoreDisplay>>) {
        self.scoreboard.set_display(display);
    }

    /// Schedule a move to `target` after `delay` seconds of frame time.
    ///
    /// Returns None, changing nothing, if a transition is already in
    /// flight. The returned handle can cancel the transition before it
    /// applies.
    pub fn request_transition(&mut self, target: GamePhase, delay: f32) -> Option<TimerHandle> {
        if self.transitioning {
            log::debug!(
                "Transition {} -> {} rejected: another transition is in flight",
                self.phase,
                target
            );
            return None;
        }
        let handle = self.timers.schedule(self.clock.real_time(), delay, target);
        self.transitioning = true;
        self.pending = Some(handle);
        if delay > 0.0 {
            log::debug!("Transition {} -> {} scheduled in {:.2}s", self.phase, target, delay);
        }
        Some(handle)
    }

    /// Cancel the in-flight transition identified by `handle`.
    ///
    /// Cancelling the level-complete delay skips it: the next level loads
    /// on the following frame.
    pub fn cancel_transition(&mut self, handle: TimerHandle) -> bool {
        if self.pending != Some(handle) {
            return false;
        }
        if let Some(target) = self.timers.cancel(handle) {
            log::debug!("Transition {} -> {} cancelled", self.phase, target);
        }
        self.pending = None;
        self.transitioning = false;
        true
    }

    /// Menu "play" button
    pub fn play_clicked(&mut self) -> bool {
        if self.phase != GamePhase::Menu {
            return false;
        }
        self.request_transition(GamePhase::Init, 0.0).is_some()
    }

    /// No-op unless playing
    pub fn pause_requested(&mut self) -> bool {
        if self.phase != GamePhase::Play {
            return false;
        }
        self.request_transition(GamePhase::Pause, 0.0).is_some()
    }

    /// No-op unless paused
    pub fn resume_requested(&mut self) -> bool {
        if self.phase != GamePhase::Pause {
            return false;
        }
        self.request_transition(GamePhase::Play, 0.0).is_some()
    }

    /// Record the current score, then start a fresh run. Rejected, with
    /// the highscore untouched, while another transition is in flight.
    pub fn restart_requested(&mut self) -> bool {
        if self.transitioning {
            log::debug!("Restart rejected: another transition is in flight");
            return false;
        }
        self.record_highscore();
        self.request_transition(GamePhase::Init, 0.0).is_some()
    }

    /// The physics collaborator lost the live ball. Only counts during
    /// Play, and only if a ball is live.
    pub fn ball_lost(&mut self) -> bool {
        if self.phase != GamePhase::Play {
            return false;
        }
        if !self.entities.despawn_ball() {
            log::debug!("Ball lost reported with no live ball");
            return false;
        }
        self.scoreboard.lose_ball();
        log::info!("Ball lost, {} remaining", self.scoreboard.balls());
        true
    }

    /// The physics collaborator reports a ball striking brick `id`.
    /// Only counts during Play.
    pub fn brick_hit(&mut self, id: u32) -> Option<BrickHit> {
        if self.phase != GamePhase::Play {
            return None;
        }
        let Some(hit) = self.entities.level_mut().and_then(|level| level.hit_brick(id)) else {
            log::debug!("Hit on unknown brick {}", id);
            return None;
        };
        if let BrickHit::Destroyed { points } = hit {
            self.scoreboard.add_score(u64::from(points));
        }
        Some(hit)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    pub fn pending_transition(&self) -> Option<TimerHandle> {
        self.pending
    }

    pub fn score(&self) -> u64 {
        self.scoreboard.score()
    }

    /// Zero-based level index
    pub fn level(&self) -> u32 {
        self.scoreboard.level()
    }

    pub fn balls(&self) -> u8 {
        self.scoreboard.balls()
    }

    pub fn highscore(&self) -> u64 {
        self.scoreboard.highscore()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Scale applied to time-driven effects (0 while paused)
    pub fn time_scale(&self) -> f32 {
        self.clock.time_scale()
    }

    /// Game-time delta of the last tick, for time-driven collaborators.
    /// Zero while paused.
    pub fn delta_time(&self) -> f32 {
        self.clock.delta()
    }

    pub fn game_time(&self) -> f64 {
        self.clock.game_time()
    }

    pub fn real_time(&self) -> f64 {
        self.clock.real_time()
    }

    pub fn level_count(&self) -> u32 {
        u32::try_from(self.levels.len()).unwrap_or(u32::MAX)
    }

    pub fn entities(&self) -> &RoundEntities {
        &self.entities
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn bus(&self) -> &NotificationBus {
        &self.bus
    }

    pub(super) fn record_highscore(&mut self) {
        let highscore = self.scoreboard.record_highscore();
        self.bus.highscore_updated.publish(&highscore);
    }

    pub(super) fn show_panel(&mut self, panel: Panel, visible: bool) {
        if let Some(screen) = self.screen.as_mut() {
            screen.set_panel_visible(panel, visible);
        }
    }

    pub(super) fn show_cursor(&mut self, visible: bool) {
        if let Some(screen) = self.screen.as_mut() {
            screen.set_cursor_visible(visible);
        }
    }

    /// Apply every transition due on the frame clock. Zero-delay follow-ups
    /// chained by entry actions apply in the same pass.
    pub(super) fn apply_due_transitions(&mut self) {
        while let Some((handle, target)) = self.timers.pop_due(self.clock.real_time()) {
            if self.pending != Some(handle) {
                log::warn!("Dropping stale transition to {}", target);
                continue;
            }
            let follow_up = self.apply_transition(target);
            self.bus.state_changed.publish(&target);
            self.pending = None;
            self.transitioning = false;

            if let Some(AutoTransition { target, delay }) = follow_up {
                self.request_transition(target, delay);
            }
        }
    }

    fn apply_transition(&mut self, target: GamePhase) -> Option<AutoTransition> {
        let from = self.phase;
        (phases::hooks(from).exit)(self);
        self.phase = target;
        log::info!("State {} -> {}", from, target);
        (phases::hooks(target).enter)(self)
    }
}
