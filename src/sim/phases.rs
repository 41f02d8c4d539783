//! Transition table
//!
//! Each phase maps to three hooks: `enter` runs after the phase becomes
//! current and may chain an automatic follow-up transition, `exit` undoes
//! the entry's visible side effects, and `update` runs once per frame while
//! the phase is current.

use crate::ui::Panel;

use super::session::GameSession;
use super::state::GamePhase;
use super::tick::FrameInput;

/// Follow-up transition requested by an entry action
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoTransition {
    pub target: GamePhase,
    pub delay: f32,
}

impl AutoTransition {
    fn now(target: GamePhase) -> Option<Self> {
        Some(Self { target, delay: 0.0 })
    }
}

pub struct PhaseHooks {
    pub enter: fn(&mut GameSession) -> Option<AutoTransition>,
    pub exit: fn(&mut GameSession),
    pub update: fn(&mut GameSession, &FrameInput),
}

/// Indexed by `GamePhase as usize`, same order as [`GamePhase::ALL`]
static TABLE: [PhaseHooks; 7] = [
    // Menu
    PhaseHooks {
        enter: enter_menu,
        exit: exit_menu,
        update: idle,
    },
    // Init
    PhaseHooks {
        enter: enter_init,
        exit: nothing,
        update: idle,
    },
    // Play
    PhaseHooks {
        enter: enter_play,
        exit: nothing,
        update: update_play,
    },
    // LevelCompleted
    PhaseHooks {
        enter: enter_level_completed,
        exit: exit_level_completed,
        update: update_level_completed,
    },
    // LoadLevel
    PhaseHooks {
        enter: enter_load_level,
        exit: nothing,
        update: idle,
    },
    // GameOver
    PhaseHooks {
        enter: enter_game_over,
        exit: exit_game_over,
        update: update_game_over,
    },
    // Pause
    PhaseHooks {
        enter: enter_pause,
        exit: exit_pause,
        update: update_pause,
    },
];

pub fn hooks(phase: GamePhase) -> &'static PhaseHooks {
    &TABLE[phase as usize]
}

fn nothing(_: &mut GameSession) {}

fn idle(_: &mut GameSession, _: &FrameInput) {}

fn enter_menu(s: &mut GameSession) -> Option<AutoTransition> {
    s.show_cursor(true);
    // Late highscore observers catch up here
    s.bus.highscore_updated.publish(&s.scoreboard.highscore());
    s.show_panel(Panel::Menu, true);
    None
}

fn exit_menu(s: &mut GameSession) {
    s.show_panel(Panel::Menu, false);
}

fn enter_init(s: &mut GameSession) -> Option<AutoTransition> {
    s.show_cursor(false);
    s.show_panel(Panel::Play, true);

    s.scoreboard.reset(s.config.starting_balls);

    s.entities.despawn_all();
    s.entities.spawn_player();

    AutoTransition::now(GamePhase::LoadLevel)
}

fn enter_load_level(s: &mut GameSession) -> Option<AutoTransition> {
    let index = s.scoreboard.level();
    match s.levels.get(index as usize) {
        Some(definition) => {
            s.entities.spawn_level(index, definition);
            AutoTransition::now(GamePhase::Play)
        }
        None => {
            log::info!("All {} levels cleared", s.levels.len());
            AutoTransition::now(GamePhase::GameOver)
        }
    }
}

fn enter_play(_: &mut GameSession) -> Option<AutoTransition> {
    None
}

fn update_play(s: &mut GameSession, input: &FrameInput) {
    if !s.entities.has_ball() {
        if s.scoreboard.balls() > 0 {
            s.entities.spawn_ball();
        } else {
            s.request_transition(GamePhase::GameOver, 0.0);
        }
    }

    if s.entities.level_cleared() && !s.transitioning {
        s.request_transition(GamePhase::LevelCompleted, 0.0);
    }

    if input.pause {
        s.pause_requested();
    }
}

fn enter_level_completed(s: &mut GameSession) -> Option<AutoTransition> {
    s.entities.despawn_ball();
    s.entities.despawn_level();

    let count = s.level_count();
    s.scoreboard.advance_level(count);

    s.show_panel(Panel::LevelCompleted, true);

    Some(AutoTransition {
        target: GamePhase::LoadLevel,
        delay: s.config.level_complete_delay,
    })
}

/// Only does anything if the delay was cancelled
fn update_level_completed(s: &mut GameSession, _: &FrameInput) {
    if !s.transitioning {
        s.request_transition(GamePhase::LoadLevel, 0.0);
    }
}

fn exit_level_completed(s: &mut GameSession) {
    s.show_panel(Panel::LevelCompleted, false);
}

fn enter_game_over(s: &mut GameSession) -> Option<AutoTransition> {
    s.record_highscore();
    log::info!("Game over: score {}, highscore {}", s.scoreboard.score(), s.scoreboard.highscore());
    s.show_panel(Panel::GameOver, true);
    None
}

fn exit_game_over(s: &mut GameSession) {
    s.show_panel(Panel::Play, false);
    s.show_panel(Panel::GameOver, false);
}

fn update_game_over(s: &mut GameSession, input: &FrameInput) {
    if input.any_key {
        s.request_transition(GamePhase::Menu, 0.0);
    }
}

fn enter_pause(s: &mut GameSession) -> Option<AutoTransition> {
    s.show_cursor(true);
    s.paused = true;
    s.clock.set_time_scale(0.0);
    s.show_panel(Panel::Pause, true);
    None
}

fn exit_pause(s: &mut GameSession) {
    s.show_cursor(false);
    s.paused = false;
    s.clock.set_time_scale(1.0);
    s.show_panel(Panel::Pause, false);
}

fn update_pause(s: &mut GameSession, input: &FrameInput) {
    if input.pause {
        s.resume_requested();
    }
}
