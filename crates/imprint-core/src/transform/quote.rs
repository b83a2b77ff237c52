// Imprint Transform - Quote Pairing
// Apostrophe inside a word, a pair of double quotes anywhere else

use crate::output::{Output, Outputs};
use crate::{Key, KeyEvent};

/// Tracks whether the cursor sits inside a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuoteHelper {
    within_word: bool,
}

impl QuoteHelper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn within_word(&self) -> bool {
        self.within_word
    }

    /// Update from a non-trigger press. Modifier presses and releases are
    /// not words or breaks.
    pub fn observe(&mut self, event: &KeyEvent) {
        if event.is_press() && !event.is_modifier_key() {
            self.within_word = event.key.is_letter_class();
        }
    }

    /// Update from text typed by a macro: the cursor is inside a word when
    /// the last character is a letter
    pub fn observe_text(&mut self, text: &str) {
        if let Some(last) = text.chars().last() {
            self.within_word = last.is_alphabetic();
        }
    }

    /// Handle a trigger press
    pub fn trigger(&mut self) -> Outputs {
        let mut out = Outputs::new();
        if self.within_word {
            out.push(Output::tap(Key::Quote));
        } else {
            out.push(Output::text("\"\"", false));
            out.push(Output::tap(Key::Left));
        }
        self.within_word = false;
        out
    }
}
