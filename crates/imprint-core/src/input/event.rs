// Imprint Input Layer - Key Events
// Immutable snapshot of one physical key transition

use std::fmt;

use crate::{Action, Key, ModMask};

/// One key transition as delivered by the host firmware.
///
/// `mods` is the set of modifiers held when the transition happened, not
/// counting the event key's own bit. `time_ms` comes from a monotonic clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub action: Action,
    pub mods: ModMask,
    pub time_ms: u64,
}

impl KeyEvent {
    pub fn new(key: Key, action: Action, mods: ModMask, time_ms: u64) -> Self {
        Self {
            key,
            action,
            mods,
            time_ms,
        }
    }

    /// Key-down event
    pub fn press(key: Key, mods: ModMask, time_ms: u64) -> Self {
        Self::new(key, Action::Press, mods, time_ms)
    }

    /// Key-up event
    pub fn release(key: Key, mods: ModMask, time_ms: u64) -> Self {
        Self::new(key, Action::Release, mods, time_ms)
    }

    pub fn is_press(&self) -> bool {
        self.action.is_pressed()
    }

    pub fn is_release(&self) -> bool {
        self.action.is_released()
    }

    /// A press or release of a modifier key itself
    pub fn is_modifier_key(&self) -> bool {
        self.key.is_modifier()
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (mods={}, t={}ms)",
            self.key, self.action, self.mods, self.time_ms
        )
    }
}
