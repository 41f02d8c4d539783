//! Brick Breaker headless entry point
//!
//! Rendering and physics are not wired in; a seeded autoplayer stands in
//! for both and drives the session through the fixed-timestep loop.
//!
//! Usage: `brick-breaker [seed] [runs]`

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use brick_breaker::audio::{AudioHandle, AudioManager, LogAudioSink, SoundEffect};
use brick_breaker::consts::*;
use brick_breaker::highscore::HighscoreLabel;
use brick_breaker::sim::{FrameInput, GamePhase, GameSession, LevelSet};
use brick_breaker::ui::{HudLabel, HudState};
use brick_breaker::{SessionConfig, SettingsStore};

/// Hard stop so a stuck session cannot spin forever
const MAX_FRAMES: u64 = 2_000_000;

/// Stand-in for player input and the physics collaborator
struct AutoPlayer {
    rng: Pcg32,
    /// Frames spent in the current phase
    idle: u32,
    last_phase: GamePhase,
}

impl AutoPlayer {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            idle: 0,
            last_phase: GamePhase::Menu,
        }
    }

    /// Decide this step's input and report physics events to the session
    fn step(&mut self, session: &mut GameSession, audio: &AudioHandle) -> FrameInput {
        let phase = session.phase();
        if phase != self.last_phase {
            self.last_phase = phase;
            self.idle = 0;
        }
        self.idle += 1;

        let mut input = FrameInput::default();
        match phase {
            GamePhase::Menu if self.idle > 30 => {
                session.play_clicked();
            }
            GamePhase::Play if session.entities().has_ball() => {
                let roll: f32 = self.rng.random();
                if roll < 0.04 {
                    let target = session.entities().level().and_then(|level| {
                        let bricks = level.bricks();
                        (!bricks.is_empty()).then(|| bricks[self.rng.random_range(0..bricks.len())].id)
                    });
                    if let Some(hit) = target.and_then(|id| session.brick_hit(id)) {
                        audio.play(SoundEffect::for_brick_hit(hit));
                    }
                } else if roll < 0.045 {
                    if session.ball_lost() {
                        audio.play(SoundEffect::BallLost);
                    }
                } else if roll < 0.0455 {
                    input.pause = true;
                    input.any_key = true;
                }
            }
            GamePhase::Pause if self.idle > 90 => {
                input.pause = true;
                input.any_key = true;
            }
            GamePhase::GameOver if self.idle > 120 => {
                input.any_key = true;
            }
            _ => {}
        }
        input
    }

    /// Jittered frame time, like a real display loop
    fn frame_dt(&mut self) -> f32 {
        self.rng.random_range(0.010..0.030)
    }
}

fn run(seed: u64, runs: u32) -> brick_breaker::Result<()> {
    let levels = LevelSet::builtin()?;
    let mut session = GameSession::new(levels, SessionConfig::default());

    let hud = Rc::new(RefCell::new(HudState::new()));
    session.set_screen(Some(Box::new(hud.clone())));
    session.set_score_display(Some(Box::new(hud.clone())));

    let mut settings = SettingsStore::default();
    let audio = AudioManager::new(Box::new(LogAudioSink), settings.settings()).attach(session.bus(), &settings);
    let highscore = HighscoreLabel::attach(&session);

    let finished = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&finished);
    let _runs_sub = session.bus().state_changed.subscribe(move |phase| {
        if *phase == GamePhase::GameOver {
            counter.set(counter.get() + 1);
        }
    });

    let mut player = AutoPlayer::new(seed);
    session.start();

    let mut accumulator = 0.0f32;
    let mut frames = 0u64;
    while frames < MAX_FRAMES {
        if finished.get() >= runs && session.phase() == GamePhase::Menu {
            break;
        }
        // Second run plays without music
        if finished.get() == 1 && settings.music_on() {
            settings.set_music_on(false);
        }

        accumulator += player.frame_dt().min(0.1);
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = player.step(&mut session, &audio);
            session.tick(&input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }
        frames += 1;
    }

    if frames >= MAX_FRAMES {
        log::warn!("Stopped after {} frames in {}", frames, session.phase());
    }

    let hud = hud.borrow();
    log::info!(
        "{} runs finished in {:.1}s ({} frames): {} | last {}",
        finished.get(),
        session.real_time(),
        frames,
        highscore.text(),
        hud.label(HudLabel::Score).unwrap_or("SCORE: -"),
    );
    println!("{}", highscore.text());
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Brick Breaker (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5eed);
    let runs = args.next().and_then(|s| s.parse().ok()).unwrap_or(3);

    if let Err(e) = run(seed, runs) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
