//! Highscore label observer
//!
//! Subscribes to highscore updates when created, pulls the current value
//! immediately (the bus does not replay), and unsubscribes when dropped.

use std::cell::RefCell;
use std::rc::Rc;

use crate::bus::Subscription;
use crate::sim::GameSession;
use crate::ui::HudLabel;

pub struct HighscoreLabel {
    text: Rc<RefCell<String>>,
    _subscription: Subscription,
}

impl HighscoreLabel {
    pub fn attach(session: &GameSession) -> Self {
        let text = Rc::new(RefCell::new(HudLabel::Highscore.format(session.highscore())));
        let sink = Rc::clone(&text);
        let subscription = session.bus().highscore_updated.subscribe(move |highscore| {
            *sink.borrow_mut() = HudLabel::Highscore.format(*highscore);
        });
        Self {
            text,
            _subscription: subscription,
        }
    }

    /// Current label text, e.g. `HIGHSCORE: 120`
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }
}
