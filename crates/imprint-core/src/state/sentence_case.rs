// Imprint Sentence Case
// One-shot capitalisation of the first letter after a sentence ends

use crate::{Key, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SentenceState {
    #[default]
    Idle,
    /// A terminator was typed; the next letter is capitalised
    Primed,
}

/// How an event moves the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceClass {
    Letter,
    Terminator,
    Space,
    Quote,
    /// Pure modifier presses and releases; no state change
    Ignore,
    Reset,
}

/// Sentence-case tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceCase {
    enabled: bool,
    state: SentenceState,
}

impl SentenceCase {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            state: SentenceState::Idle,
        }
    }

    pub fn state(&self) -> SentenceState {
        self.state
    }

    pub fn is_primed(&self) -> bool {
        self.state == SentenceState::Primed
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self) {
        if !self.enabled {
            log::debug!("sentence case enabled");
        }
        self.enabled = true;
    }

    /// Turn the feature off; pending capitalisation is dropped
    pub fn disable(&mut self) {
        if self.enabled {
            log::debug!("sentence case disabled");
        }
        self.enabled = false;
        self.state = SentenceState::Idle;
    }

    /// Flip the feature and return the new setting
    pub fn toggle(&mut self) -> bool {
        if self.enabled {
            self.disable();
        } else {
            self.enable();
        }
        self.enabled
    }

    /// Arm capitalisation directly, for terminators typed by a macro
    pub fn prime(&mut self) {
        if self.enabled {
            self.state = SentenceState::Primed;
        }
    }

    /// Classify an event.
    ///
    /// Any modifier other than shift and right-alt forces `Reset`. Shifted
    /// `/` and `1` are the layout's `?` and `!` and count as terminators.
    pub fn classify(event: &KeyEvent) -> SentenceClass {
        if event.is_release() || event.is_modifier_key() {
            return SentenceClass::Ignore;
        }
        if !event.mods.is_shift_or_ralt_only() {
            return SentenceClass::Reset;
        }

        let key = event.key;
        if key.is_letter_class() {
            return SentenceClass::Letter;
        }
        match key {
            Key::Dot | Key::Exclaim | Key::Question => SentenceClass::Terminator,
            Key::Slash | Key::Num1 if event.mods.any_shift() => SentenceClass::Terminator,
            Key::Space => SentenceClass::Space,
            Key::Quote | Key::DoubleQuote | Key::QuotePair => SentenceClass::Quote,
            _ => SentenceClass::Reset,
        }
    }

    /// Advance on one event; returns true if this letter is to be capitalised
    pub fn on_event(&mut self, event: &KeyEvent) -> bool {
        let class = Self::classify(event);
        if !self.enabled {
            return false;
        }

        match class {
            SentenceClass::Ignore | SentenceClass::Space | SentenceClass::Quote => false,
            SentenceClass::Terminator => {
                if !self.is_primed() {
                    log::debug!("sentence case primed by {}", event.key);
                }
                self.state = SentenceState::Primed;
                false
            }
            SentenceClass::Letter => {
                let capitalise = self.is_primed();
                self.state = SentenceState::Idle;
                capitalise
            }
            SentenceClass::Reset => {
                self.state = SentenceState::Idle;
                false
            }
        }
    }
}

impl Default for SentenceCase {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModMask;

    fn press(key: Key) -> KeyEvent {
        KeyEvent::press(key, ModMask::NONE, 0)
    }

    #[test]
    fn test_classification() {
        assert_eq!(SentenceCase::classify(&press(Key::T)), SentenceClass::Letter);
        assert_eq!(
            SentenceCase::classify(&press(Key::MagicRight)),
            SentenceClass::Letter
        );
        assert_eq!(
            SentenceCase::classify(&press(Key::Dot)),
            SentenceClass::Terminator
        );
        assert_eq!(SentenceCase::classify(&press(Key::Space)), SentenceClass::Space);
        assert_eq!(
            SentenceCase::classify(&press(Key::DoubleQuote)),
            SentenceClass::Quote
        );
        assert_eq!(
            SentenceCase::classify(&press(Key::QuotePair)),
            SentenceClass::Quote
        );
        assert_eq!(
            SentenceCase::classify(&press(Key::AltRep2)),
            SentenceClass::Letter
        );
        assert_eq!(SentenceCase::classify(&press(Key::Comma)), SentenceClass::Reset);
        assert_eq!(
            SentenceCase::classify(&press(Key::Backspace)),
            SentenceClass::Reset
        );
    }

    #[test]
    fn test_modifier_purity() {
        let shifted = KeyEvent::press(Key::T, ModMask::LSHIFT | ModMask::RALT, 0);
        assert_eq!(SentenceCase::classify(&shifted), SentenceClass::Letter);

        let ctrl = KeyEvent::press(Key::T, ModMask::LCTRL, 0);
        assert_eq!(SentenceCase::classify(&ctrl), SentenceClass::Reset);

        let shift_press = KeyEvent::press(Key::LeftShift, ModMask::NONE, 0);
        assert_eq!(SentenceCase::classify(&shift_press), SentenceClass::Ignore);

        let release = KeyEvent::release(Key::T, ModMask::NONE, 0);
        assert_eq!(SentenceCase::classify(&release), SentenceClass::Ignore);
    }

    #[test]
    fn test_shifted_punctuation_terminates() {
        let question = KeyEvent::press(Key::Slash, ModMask::LSHIFT, 0);
        assert_eq!(SentenceCase::classify(&question), SentenceClass::Terminator);
        assert_eq!(SentenceCase::classify(&press(Key::Slash)), SentenceClass::Reset);
    }

    #[test]
    fn test_terminator_space_letter() {
        let mut sentence = SentenceCase::default();
        assert!(!sentence.on_event(&press(Key::Dot)));
        assert_eq!(sentence.state(), SentenceState::Primed);
        assert!(!sentence.on_event(&press(Key::Space)));
        assert_eq!(sentence.state(), SentenceState::Primed);
        assert!(sentence.on_event(&press(Key::T)));
        assert_eq!(sentence.state(), SentenceState::Idle);
        assert!(!sentence.on_event(&press(Key::H)));
    }

    #[test]
    fn test_letters_alone_never_capitalise() {
        let mut sentence = SentenceCase::default();
        assert!(!sentence.on_event(&press(Key::A)));
        assert!(!sentence.on_event(&press(Key::B)));
    }

    #[test]
    fn test_reset_clears_priming() {
        let mut sentence = SentenceCase::default();
        sentence.on_event(&press(Key::Exclaim));
        sentence.on_event(&press(Key::Num3));
        assert_eq!(sentence.state(), SentenceState::Idle);
        assert!(!sentence.on_event(&press(Key::A)));
    }

    #[test]
    fn test_disabled_never_primes() {
        let mut sentence = SentenceCase::new(false);
        sentence.on_event(&press(Key::Dot));
        assert_eq!(sentence.state(), SentenceState::Idle);
        assert!(!sentence.on_event(&press(Key::A)));

        sentence.enable();
        sentence.on_event(&press(Key::Dot));
        assert!(sentence.is_primed());
        assert!(!sentence.toggle());
        assert_eq!(sentence.state(), SentenceState::Idle);
        sentence.prime();
        assert_eq!(sentence.state(), SentenceState::Idle);
    }
}
