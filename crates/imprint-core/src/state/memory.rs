// Imprint Last-Key Memory
// The key repeat-style handlers act on

use crate::{Key, ModMask};

/// Most recent rememberable key and the modifiers held with it.
///
/// Trigger keys never land here: a trigger must see the key typed before
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LastKeyMemory {
    key: Key,
    mods: ModMask,
}

impl LastKeyMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn mods(&self) -> ModMask {
        self.mods
    }

    /// Overwrite the slot unconditionally.
    ///
    /// Handlers use this to leave a designated repeat key behind.
    pub fn set(&mut self, key: Key, mods: ModMask) {
        log::trace!("memory <- {} ({})", key, mods);
        self.key = key;
        self.mods = mods;
    }

    /// Whether a pressed key may replace the remembered one.
    ///
    /// Modifiers, navigation, deletion, the expander triggers and the
    /// mode toggles leave memory untouched.
    pub fn accepts(key: Key) -> bool {
        !(key == Key::None
            || key.is_modifier()
            || key.is_navigation()
            || key.is_deletion()
            || key.is_magic_trigger()
            || key.is_alt_repeat()
            || matches!(
                key,
                Key::CapsWordToggle | Key::SentenceCaseOn | Key::SentenceCaseToggle
            ))
    }

    /// Remember `key` if the policy accepts it; returns whether it did
    pub fn observe(&mut self, key: Key, mods: ModMask) -> bool {
        if Self::accepts(key) {
            self.set(key, mods);
            true
        } else {
            false
        }
    }
}
