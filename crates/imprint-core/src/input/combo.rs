// Imprint Input Layer - Combos
// Two-key chords resolved before the transform engine sees the events

use smallvec::SmallVec;

use crate::{Key, KeyEvent};

/// Events released by the detector for one input event
pub type ResolvedEvents = SmallVec<[KeyEvent; 4]>;

/// A two-key chord and the key it stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboDef {
    pub keys: [Key; 2],
    pub output: Key,
}

impl ComboDef {
    pub fn new(first: Key, second: Key, output: Key) -> Self {
        Self {
            keys: [first, second],
            output,
        }
    }

    pub fn contains(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// True if `a` and `b` are this chord's two keys, in either order
    fn matches(&self, a: Key, b: Key) -> bool {
        a != b && self.contains(a) && self.contains(b)
    }
}

/// Holds back a chord member's press until its partner arrives or the
/// combo term runs out.
///
/// Only one press is ever held. A chord that fires is replaced by a tap of
/// its output key and the releases of both members are swallowed.
#[derive(Debug, Clone)]
pub struct ComboDetector {
    combos: Vec<ComboDef>,
    term_ms: u64,
    /// Press waiting for a partner
    pending: Option<KeyEvent>,
    /// Keys of fired chords whose release is still outstanding
    consumed: SmallVec<[Key; 4]>,
}

impl ComboDetector {
    pub fn new(combos: Vec<ComboDef>, term_ms: u64) -> Self {
        Self {
            combos,
            term_ms,
            pending: None,
            consumed: SmallVec::new(),
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn is_member(&self, key: Key) -> bool {
        self.combos.iter().any(|combo| combo.contains(key))
    }

    fn find(&self, held: Key, pressed: Key) -> Option<&ComboDef> {
        self.combos.iter().find(|combo| combo.matches(held, pressed))
    }

    /// Feed one event; returns the events the engine should process, in order
    pub fn feed(&mut self, event: KeyEvent) -> ResolvedEvents {
        let mut out = ResolvedEvents::new();

        if event.is_release() {
            if let Some(pos) = self.consumed.iter().position(|k| *k == event.key) {
                self.consumed.swap_remove(pos);
                return out;
            }
        }

        if let Some(held) = self.pending.take() {
            let within_term = event.time_ms.saturating_sub(held.time_ms) < self.term_ms;
            if event.is_press() && within_term {
                if let Some(combo) = self.find(held.key, event.key).copied() {
                    log::debug!(
                        "combo {}+{} -> {}",
                        combo.keys[0],
                        combo.keys[1],
                        combo.output
                    );
                    self.consumed.push(held.key);
                    self.consumed.push(event.key);
                    out.push(KeyEvent::press(combo.output, event.mods, event.time_ms));
                    out.push(KeyEvent::release(combo.output, event.mods, event.time_ms));
                    return out;
                }
            }
            out.push(held);
        }

        if event.is_press() && !event.mods.has_non_shift() && self.is_member(event.key) {
            log::trace!("holding {} for combo", event.key);
            self.pending = Some(event);
        } else {
            out.push(event);
        }
        out
    }

    /// Release a held press whose combo term has expired
    pub fn tick(&mut self, now_ms: u64) -> Option<KeyEvent> {
        let expired = self
            .pending
            .as_ref()
            .map(|held| now_ms.saturating_sub(held.time_ms) >= self.term_ms)
            .unwrap_or(false);
        if expired {
            self.pending.take()
        } else {
            None
        }
    }
}

impl Default for ComboDetector {
    fn default() -> Self {
        Self::new(Vec::new(), 50)
    }
}
