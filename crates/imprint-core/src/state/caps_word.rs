// Imprint Caps Word
// Shift every letter until a word-breaking key is pressed

use crate::{Key, KeyEvent};

/// What the gate decided for one press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapsWordVerdict {
    /// Gate is off; nothing to do
    Inactive,
    /// Gate stays on. `shift` asks for a weak shift on the key's output
    Continue { shift: bool },
    /// The press turned the gate off; process the key normally
    Ended,
}

/// Caps word gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapsWord {
    active: bool,
}

impl CapsWord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Turn on; returns true if the state changed
    pub fn activate(&mut self) -> bool {
        let changed = !self.active;
        if changed {
            log::debug!("caps word on");
        }
        self.active = true;
        changed
    }

    /// Turn off; returns true if the state changed
    pub fn deactivate(&mut self) -> bool {
        let changed = self.active;
        if changed {
            log::debug!("caps word off");
        }
        self.active = false;
        changed
    }

    /// Flip the gate and return the new state
    pub fn toggle(&mut self) -> bool {
        if self.active {
            self.deactivate();
        } else {
            self.activate();
        }
        self.active
    }

    /// Keys that keep caps word alive
    pub fn is_whitelisted(key: Key) -> bool {
        key.is_letter_class()
            || key.is_digit()
            || matches!(
                key,
                Key::Backspace | Key::Delete | Key::Underscore | Key::Colon
            )
    }

    /// Run a press through the gate.
    ///
    /// Modifier key presses never break the word. A press carrying a
    /// non-shift modifier, or of a key outside the whitelist, turns the
    /// gate off.
    pub fn on_press(&mut self, event: &KeyEvent) -> CapsWordVerdict {
        if !self.active {
            return CapsWordVerdict::Inactive;
        }
        if event.is_modifier_key() {
            return CapsWordVerdict::Continue { shift: false };
        }
        if event.mods.has_non_shift() || !Self::is_whitelisted(event.key) {
            self.deactivate();
            return CapsWordVerdict::Ended;
        }
        CapsWordVerdict::Continue {
            shift: event.key.is_letter_class(),
        }
    }
}
