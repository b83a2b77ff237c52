// Imprint Transform - Tap/Hold
// Per-key press timers for dual-purpose and mod-tap keys

use std::collections::HashMap;

use crate::{Key, ModMask};

/// Default tapping term in milliseconds
pub const DEFAULT_TAPPING_TERM_MS: u64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapHold {
    Tap,
    Hold,
}

/// What was true when a dual-purpose key went down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressRecord {
    pub time_ms: u64,
    pub mods: ModMask,
    /// Sentence case asked for a capital at press time
    pub capitalise: bool,
}

impl PressRecord {
    /// First emitted letter should be upper case
    pub fn wants_capital(&self) -> bool {
        self.capitalise || self.mods.any_shift()
    }
}

/// Letters emitted by a dual-purpose key: both on tap, `first` on hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualKey {
    pub first: Key,
    pub second: Key,
}

impl DualKey {
    /// Pair for a dual-purpose key
    pub fn for_key(key: Key) -> Option<DualKey> {
        match key {
            Key::Qu => Some(DualKey {
                first: Key::Q,
                second: Key::U,
            }),
            _ => None,
        }
    }

    /// Keys to emit for a resolution, in order
    pub fn emitted(&self, resolution: TapHold) -> impl Iterator<Item = Key> {
        let count = match resolution {
            TapHold::Tap => 2,
            TapHold::Hold => 1,
        };
        [self.first, self.second].into_iter().take(count)
    }
}

/// Home-row mod-tap: types `tap` when tapped, holds `modifier` otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModTap {
    pub key: Key,
    pub tap: Key,
    pub modifier: Key,
}

impl ModTap {
    pub fn for_key(key: Key) -> Option<ModTap> {
        let (tap, modifier) = match key {
            Key::HrmN => (Key::N, Key::LeftAlt),
            Key::HrmS => (Key::S, Key::LeftGui),
            Key::HrmH => (Key::H, Key::LeftShift),
            Key::HrmD => (Key::D, Key::LeftCtrl),
            Key::HrmA => (Key::A, Key::RightShift),
            Key::HrmE => (Key::E, Key::RightGui),
            Key::HrmI => (Key::I, Key::RightAlt),
            Key::HrmW => (Key::W, Key::RightCtrl),
            Key::HrmComm => (Key::Comma, Key::RightGui),
            _ => return None,
        };
        Some(ModTap { key, tap, modifier })
    }

    /// Bit of the held modifier
    pub fn mask(&self) -> ModMask {
        ModMask::from_key(self.modifier).unwrap_or(ModMask::NONE)
    }
}

/// Press timestamps for every dual-purpose key currently down.
///
/// Keys are timed independently, so interleaved presses of two dual keys
/// resolve correctly.
#[derive(Debug, Clone)]
pub struct TapHoldTimers {
    tapping_term_ms: u64,
    pressed: HashMap<Key, PressRecord>,
}

impl TapHoldTimers {
    pub fn new(tapping_term_ms: u64) -> Self {
        Self {
            tapping_term_ms,
            pressed: HashMap::new(),
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains_key(&key)
    }

    /// Record a press; a stale record for the same key is overwritten
    pub fn on_press(&mut self, key: Key, time_ms: u64, mods: ModMask, capitalise: bool) {
        self.pressed.insert(
            key,
            PressRecord {
                time_ms,
                mods,
                capitalise,
            },
        );
    }

    /// True once `key` has been down for the whole tapping term
    pub fn is_past_term(&self, key: Key, now_ms: u64) -> bool {
        self.pressed
            .get(&key)
            .map(|record| now_ms.saturating_sub(record.time_ms) >= self.tapping_term_ms)
            .unwrap_or(false)
    }

    /// Settle a key as held before its release; its release then finds no
    /// record
    pub fn take(&mut self, key: Key) -> Option<PressRecord> {
        self.pressed.remove(&key)
    }

    /// Resolve a release.
    ///
    /// `elapsed < tapping_term` is a tap. A release with no recorded press
    /// resolves as a hold.
    pub fn on_release(&mut self, key: Key, time_ms: u64) -> (TapHold, Option<PressRecord>) {
        let Some(record) = self.pressed.remove(&key) else {
            log::debug!("{} released without a press, treating as hold", key);
            return (TapHold::Hold, None);
        };
        let elapsed = time_ms.saturating_sub(record.time_ms);
        let resolution = if elapsed < self.tapping_term_ms {
            TapHold::Tap
        } else {
            TapHold::Hold
        };
        log::trace!("{} held {}ms -> {:?}", key, elapsed, resolution);
        (resolution, Some(record))
    }
}

impl Default for TapHoldTimers {
    fn default() -> Self {
        Self::new(DEFAULT_TAPPING_TERM_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_is_closed_open() {
        let mut timers = TapHoldTimers::new(200);
        timers.on_press(Key::Qu, 1000, ModMask::NONE, false);
        assert_eq!(timers.on_release(Key::Qu, 1199).0, TapHold::Tap);

        timers.on_press(Key::Qu, 1000, ModMask::NONE, false);
        assert_eq!(timers.on_release(Key::Qu, 1200).0, TapHold::Hold);

        timers.on_press(Key::Qu, 1000, ModMask::NONE, false);
        assert_eq!(timers.on_release(Key::Qu, 5000).0, TapHold::Hold);
    }

    #[test]
    fn test_release_without_press_is_hold() {
        let mut timers = TapHoldTimers::default();
        assert_eq!(timers.on_release(Key::Qu, 10), (TapHold::Hold, None));
    }

    #[test]
    fn test_interleaved_keys_have_independent_timers() {
        let mut timers = TapHoldTimers::new(200);
        timers.on_press(Key::Qu, 0, ModMask::NONE, false);
        timers.on_press(Key::A, 150, ModMask::NONE, false);
        assert_eq!(timers.on_release(Key::Qu, 250).0, TapHold::Hold);
        assert_eq!(timers.on_release(Key::A, 300).0, TapHold::Tap);
        assert!(!timers.is_pressed(Key::A));
    }

    #[test]
    fn test_record_keeps_press_state() {
        let mut timers = TapHoldTimers::default();
        timers.on_press(Key::Qu, 0, ModMask::LSHIFT, false);
        let (_, record) = timers.on_release(Key::Qu, 10);
        assert!(record.unwrap().wants_capital());
    }

    #[test]
    fn test_term_expiry_while_down() {
        let mut timers = TapHoldTimers::new(200);
        timers.on_press(Key::HrmD, 100, ModMask::NONE, false);
        assert!(!timers.is_past_term(Key::HrmD, 299));
        assert!(timers.is_past_term(Key::HrmD, 300));
        assert!(!timers.is_past_term(Key::HrmS, 300));

        assert!(timers.take(Key::HrmD).is_some());
        assert!(!timers.is_pressed(Key::HrmD));
        assert_eq!(timers.on_release(Key::HrmD, 320), (TapHold::Hold, None));
    }

    #[test]
    fn test_mod_tap_definitions() {
        let d = ModTap::for_key(Key::HrmD).unwrap();
        assert_eq!((d.tap, d.modifier), (Key::D, Key::LeftCtrl));
        assert_eq!(d.mask(), ModMask::LCTRL);
        assert_eq!(ModTap::for_key(Key::HrmComm).unwrap().tap, Key::Comma);
        assert_eq!(ModTap::for_key(Key::D), None);
    }

    #[test]
    fn test_dual_key_pairs() {
        let qu = DualKey::for_key(Key::Qu).unwrap();
        assert_eq!((qu.first, qu.second), (Key::Q, Key::U));
        assert_eq!(DualKey::for_key(Key::Q), None);
        assert_eq!(qu.emitted(TapHold::Tap).collect::<Vec<_>>(), [Key::Q, Key::U]);
        assert_eq!(qu.emitted(TapHold::Hold).collect::<Vec<_>>(), [Key::Q]);
    }
}
