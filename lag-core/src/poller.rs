use std::collections::BTreeSet;

use strum::IntoEnumIterator;

use crate::{
    clock::Clock,
    key::{KeyEvent, KeySymbol},
};

/// Per-tick keyboard state as seen by the poller.
pub trait InputSource {
    /// Whether `key` went from released to pressed during this tick.
    fn is_key_down(&self, key: KeySymbol) -> bool;

    /// The first key in scan order that went down during this tick.
    fn first_key_down(&self) -> Option<KeySymbol> {
        KeySymbol::iter().find(|key| self.is_key_down(*key))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    Press,
    Repeat,
    Release,
}

/// An [`InputSource`] built from raw key transitions.
///
/// Hosts that never report releases should use [`KeyboardState::without_releases`],
/// otherwise a key would count as held forever after its first press.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    reports_releases: bool,
    held: BTreeSet<KeySymbol>,
    down: BTreeSet<KeySymbol>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self {
            reports_releases: true,
            ..Default::default()
        }
    }

    pub fn without_releases() -> Self {
        Self {
            reports_releases: false,
            ..Default::default()
        }
    }

    pub fn set_reports_releases(&mut self, reports_releases: bool) {
        self.reports_releases = reports_releases;
        self.release_all();
    }

    pub fn apply(&mut self, key: KeySymbol, transition: KeyTransition) {
        match transition {
            KeyTransition::Press => {
                if !self.reports_releases || self.held.insert(key) {
                    self.down.insert(key);
                }
            }
            KeyTransition::Repeat => {}
            KeyTransition::Release => {
                self.held.remove(&key);
            }
        }
    }

    /// Treats every held key as released, for when releases may have been missed.
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Forgets this tick's key-down transitions.
    pub fn end_tick(&mut self) {
        self.down.clear();
    }
}

impl InputSource for KeyboardState {
    fn is_key_down(&self, key: KeySymbol) -> bool {
        self.down.contains(&key)
    }

    fn first_key_down(&self) -> Option<KeySymbol> {
        self.down.first().copied()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputPoller;

impl InputPoller {
    pub fn new() -> Self {
        Self
    }

    /// At most one event per tick; extra keys pressed in the same tick are dropped.
    pub fn poll(&self, input: &impl InputSource, clock: &impl Clock) -> Option<KeyEvent> {
        let key = input.first_key_down()?;
        Some(KeyEvent::new(key, clock.now()))
    }
}
