//! Game settings and preferences
//!
//! The session never reads these; audio and UI collaborators subscribe to
//! the toggle channels instead.

use serde::{Deserialize, Serialize};

use crate::bus::Channel;
use crate::error::Result;

/// Persistable user preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Background music
    pub music_on: bool,
    /// Sound effects
    pub sfx_on: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_on: true,
            sfx_on: true,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Settings with change notification
pub struct SettingsStore {
    settings: Settings,
    music_toggled: Channel<bool>,
    sfx_toggled: Channel<bool>,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl SettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            music_toggled: Channel::new(),
            sfx_toggled: Channel::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn music_on(&self) -> bool {
        self.settings.music_on
    }

    /// Set and notify, even if the value did not change
    pub fn set_music_on(&mut self, on: bool) {
        self.settings.music_on = on;
        log::info!("Music {}", if on { "on" } else { "off" });
        self.music_toggled.publish(&on);
    }

    pub fn sfx_on(&self) -> bool {
        self.settings.sfx_on
    }

    /// Set and notify, even if the value did not change
    pub fn set_sfx_on(&mut self, on: bool) {
        self.settings.sfx_on = on;
        log::info!("SFX {}", if on { "on" } else { "off" });
        self.sfx_toggled.publish(&on);
    }

    pub fn music_toggled(&self) -> &Channel<bool> {
        &self.music_toggled
    }

    pub fn sfx_toggled(&self) -> &Channel<bool> {
        &self.sfx_toggled
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_defaults_on() {
        let settings = Settings::default();
        assert!(settings.music_on);
        assert!(settings.sfx_on);
    }

    #[test]
    fn test_json_missing_fields_default() {
        let settings = Settings::from_json(r#"{ "music_on": false }"#).unwrap();
        assert!(!settings.music_on);
        assert!(settings.sfx_on);
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_toggle_notifies() {
        let mut store = SettingsStore::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = store.sfx_toggled().subscribe(move |on| sink.borrow_mut().push(*on));

        store.set_sfx_on(false);
        store.set_sfx_on(false);
        store.set_music_on(false);
        assert!(!store.sfx_on());
        assert!(!store.music_on());
        assert_eq!(*seen.borrow(), vec![false, false]);
    }
}
