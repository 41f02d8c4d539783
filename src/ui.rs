//! Display sinks driven by the session
//!
//! The session never renders anything. It toggles panels and pushes
//! formatted label text through these traits; a missing sink simply means
//! no visible update.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

/// UI panels toggled by phase entry/exit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Panel {
    Menu,
    Play,
    LevelCompleted,
    GameOver,
    Pause,
}

/// HUD text labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HudLabel {
    Score,
    Balls,
    Level,
    Highscore,
}

impl HudLabel {
    pub fn caption(&self) -> &'static str {
        match self {
            HudLabel::Score => "SCORE",
            HudLabel::Balls => "BALLS",
            HudLabel::Level => "LEVEL",
            HudLabel::Highscore => "HIGHSCORE",
        }
    }

    /// `CAPTION: value`
    pub fn format(&self, value: u64) -> String {
        format!("{}: {}", self.caption(), value)
    }
}

/// Panel and cursor visibility
pub trait Screen {
    fn set_panel_visible(&mut self, panel: Panel, visible: bool);

    fn set_cursor_visible(&mut self, _visible: bool) {}
}

/// Text labels for the scoreboard counters
pub trait ScoreDisplay {
    fn show_text(&mut self, label: HudLabel, text: &str);
}

impl<T: Screen + ?Sized> Screen for Rc<RefCell<T>> {
    fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
        self.borrow_mut().set_panel_visible(panel, visible);
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.borrow_mut().set_cursor_visible(visible);
    }
}

impl<T: ScoreDisplay + ?Sized> ScoreDisplay for Rc<RefCell<T>> {
    fn show_text(&mut self, label: HudLabel, text: &str) {
        self.borrow_mut().show_text(label, text);
    }
}

/// Headless HUD model: remembers what a real UI would be showing
#[derive(Debug, Clone, Default)]
pub struct HudState {
    panels: BTreeSet<Panel>,
    labels: BTreeMap<HudLabel, String>,
    cursor_visible: bool,
    /// Number of times each panel was shown
    shown: BTreeMap<Panel, u32>,
}

impl HudState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.panels.contains(&panel)
    }

    pub fn visible_panels(&self) -> Vec<Panel> {
        self.panels.iter().copied().collect()
    }

    pub fn label(&self, label: HudLabel) -> Option<&str> {
        self.labels.get(&label).map(String::as_str)
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn times_shown(&self, panel: Panel) -> u32 {
        self.shown.get(&panel).copied().unwrap_or(0)
    }
}

impl Screen for HudState {
    fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
        if visible {
            if self.panels.insert(panel) {
                *self.shown.entry(panel).or_default() += 1;
                log::debug!("Panel {:?} shown", panel);
            }
        } else if self.panels.remove(&panel) {
            log::debug!("Panel {:?} hidden", panel);
        }
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }
}

impl ScoreDisplay for HudState {
    fn show_text(&mut self, label: HudLabel, text: &str) {
        self.labels.insert(label, text.to_string());
    }
}
