//! Audio cue routing
//!
//! Playback itself belongs to an [`AudioSink`]. The manager decides which
//! cue or music track should be playing from session notifications and the
//! player's music/SFX settings.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::bus::{NotificationBus, Subscription};
use crate::settings::{Settings, SettingsStore};
use crate::sim::{BrickHit, GamePhase};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits brick (doesn't break)
    BrickHit,
    /// Brick breaks
    BrickBreak,
    /// Ball fell past the paddle
    BallLost,
    /// Level cleared
    LevelComplete,
    /// Game over
    GameOver,
}

impl SoundEffect {
    pub fn for_brick_hit(hit: BrickHit) -> Self {
        match hit {
            BrickHit::Damaged { .. } => SoundEffect::BrickHit,
            BrickHit::Destroyed { .. } => SoundEffect::BrickBreak,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Menu,
    Gameplay,
}

impl MusicTrack {
    /// Track that belongs to `phase`
    pub fn for_phase(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Menu | GamePhase::GameOver => MusicTrack::Menu,
            _ => MusicTrack::Gameplay,
        }
    }
}

/// Playback backend
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);

    /// Switch music; None stops it
    fn set_music(&mut self, track: Option<MusicTrack>);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogAudioSink;

impl AudioSink for LogAudioSink {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("♪ {:?}", effect);
    }

    fn set_music(&mut self, track: Option<MusicTrack>) {
        match track {
            Some(track) => log::info!("Music: {:?}", track),
            None => log::info!("Music stopped"),
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    music_on: bool,
    sfx_on: bool,
    /// Track the current phase wants, whether or not music is on
    track: Option<MusicTrack>,
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>, settings: &Settings) -> Self {
        Self {
            sink,
            music_on: settings.music_on,
            sfx_on: settings.sfx_on,
            track: None,
        }
    }

    /// Subscribe to session and settings notifications. The manager stays
    /// attached for as long as the returned handle lives.
    pub fn attach(self, bus: &NotificationBus, store: &SettingsStore) -> AudioHandle {
        let manager = Rc::new(RefCell::new(self));
        let subscriptions = vec![
            bus.state_changed
                .subscribe(forward(&manager, |m, phase: &GamePhase| m.on_state_changed(*phase))),
            store
                .music_toggled()
                .subscribe(forward(&manager, |m, on: &bool| m.set_music_on(*on))),
            store
                .sfx_toggled()
                .subscribe(forward(&manager, |m, on: &bool| m.set_sfx_on(*on))),
        ];
        AudioHandle {
            manager,
            _subscriptions: subscriptions,
        }
    }

    pub fn play(&mut self, effect: SoundEffect) {
        if self.sfx_on {
            self.sink.play(effect);
        }
    }

    pub fn set_sfx_on(&mut self, on: bool) {
        self.sfx_on = on;
    }

    pub fn set_music_on(&mut self, on: bool) {
        if on == self.music_on {
            return;
        }
        self.music_on = on;
        self.sink.set_music(if on { self.track } else { None });
    }

    pub fn on_state_changed(&mut self, phase: GamePhase) {
        match phase {
            GamePhase::LevelCompleted => self.play(SoundEffect::LevelComplete),
            GamePhase::GameOver => self.play(SoundEffect::GameOver),
            _ => {}
        }

        let track = Some(MusicTrack::for_phase(phase));
        if track != self.track {
            self.track = track;
            if self.music_on {
                self.sink.set_music(track);
            }
        }
    }
}

fn forward<T: 'static>(
    manager: &Rc<RefCell<AudioManager>>,
    f: impl Fn(&mut AudioManager, &T) + 'static,
) -> impl FnMut(&T) + 'static {
    let weak: Weak<RefCell<AudioManager>> = Rc::downgrade(manager);
    move |value: &T| {
        if let Some(manager) = weak.upgrade() {
            f(&mut *manager.borrow_mut(), value);
        }
    }
}

/// Attached audio manager; dropping it unsubscribes
pub struct AudioHandle {
    manager: Rc<RefCell<AudioManager>>,
    _subscriptions: Vec<Subscription>,
}

impl AudioHandle {
    pub fn play(&self, effect: SoundEffect) {
        self.manager.borrow_mut().play(effect);
    }
}
