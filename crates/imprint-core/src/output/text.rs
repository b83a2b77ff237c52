// Imprint Output - Text Buffer
// Renders outputs into the text a host editor would show

use std::fmt;

use crate::output::{KeyEmitter, Output};
use crate::{Action, Key, ModMask};

/// Single-line editor model with a cursor.
///
/// Tracks the modifiers forwarded to it so that shifted keys type their
/// shifted character. Keys pressed with ctrl, alt or gui held are treated as
/// shortcuts and type nothing.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    chars: Vec<char>,
    cursor: usize,
    held: ModMask,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn held_mods(&self) -> ModMask {
        self.held
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    fn insert(&mut self, ch: char) {
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
    }

    /// Apply one key press with `mods` held
    fn press(&mut self, key: Key, mods: ModMask) {
        match key {
            Key::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.chars.remove(self.cursor);
                }
            }
            Key::Delete => {
                if self.cursor < self.chars.len() {
                    self.chars.remove(self.cursor);
                }
            }
            Key::Left => self.cursor = self.cursor.saturating_sub(1),
            Key::Right => self.cursor = (self.cursor + 1).min(self.chars.len()),
            Key::Home | Key::Up | Key::PageUp => self.cursor = 0,
            Key::End | Key::Down | Key::PageDown => self.cursor = self.chars.len(),
            _ if mods.has_non_shift() => {}
            _ => {
                if let Some(ch) = key.to_char(mods.any_shift()) {
                    self.insert(ch);
                }
            }
        }
    }
}

impl KeyEmitter for TextBuffer {
    fn emit(&mut self, output: &Output) {
        match output {
            Output::Forward {
                key,
                action,
                extra_mods,
            } => {
                if let Some(bit) = ModMask::from_key(*key) {
                    match action {
                        Action::Press => self.held |= bit,
                        Action::Release => self.held -= bit,
                    }
                } else if action.is_pressed() {
                    self.press(*key, self.held | *extra_mods);
                }
            }
            Output::Tap { key, mods } => self.press(*key, *mods),
            Output::Text { text, shifted } => {
                for ch in text.chars() {
                    self.insert(if *shifted { ch.to_ascii_uppercase() } else { ch });
                }
            }
        }
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ch) in self.chars.iter().enumerate() {
            if i == self.cursor {
                write!(f, "|")?;
            }
            write!(f, "{}", ch)?;
        }
        if self.cursor == self.chars.len() {
            write!(f, "|")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarded_keys_type_characters() {
        let mut buffer = TextBuffer::new();
        buffer.emit(&Output::forward(Key::H, Action::Press));
        buffer.emit(&Output::forward(Key::H, Action::Release));
        buffer.emit(&Output::forward(Key::LeftShift, Action::Press));
        buffer.emit(&Output::forward(Key::Num1, Action::Press));
        buffer.emit(&Output::forward(Key::LeftShift, Action::Release));
        buffer.emit(&Output::forward(Key::I, Action::Press));
        assert_eq!(buffer.text(), "h!i");
    }

    #[test]
    fn test_extra_mods_shift_one_key() {
        let mut buffer = TextBuffer::new();
        buffer.emit(&Output::Forward {
            key: Key::T,
            action: Action::Press,
            extra_mods: ModMask::LSHIFT,
        });
        buffer.emit(&Output::forward(Key::O, Action::Press));
        assert_eq!(buffer.text(), "To");
    }

    #[test]
    fn test_tap_replaces_held_mods() {
        let mut buffer = TextBuffer::new();
        buffer.emit(&Output::forward(Key::RightShift, Action::Press));
        buffer.emit(&Output::tap(Key::U));
        assert_eq!(buffer.text(), "u");
        assert_eq!(buffer.held_mods(), ModMask::RSHIFT);
    }

    #[test]
    fn test_shortcuts_type_nothing() {
        let mut buffer = TextBuffer::new();
        buffer.emit(&Output::forward(Key::LeftCtrl, Action::Press));
        buffer.emit(&Output::forward(Key::C, Action::Press));
        assert_eq!(buffer.text(), "");
    }

    #[test]
    fn test_cursor_editing() {
        let mut buffer = TextBuffer::new();
        buffer.emit(&Output::text("\"\"", false));
        buffer.emit(&Output::tap(Key::Left));
        buffer.emit(&Output::text("hi", true));
        assert_eq!(buffer.text(), "\"HI\"");
        assert_eq!(buffer.to_string(), "\"HI|\"");

        buffer.emit(&Output::tap(Key::Backspace));
        buffer.emit(&Output::tap(Key::Delete));
        assert_eq!(buffer.text(), "\"H");
        buffer.emit(&Output::tap(Key::Home));
        assert_eq!(buffer.cursor(), 0);
        buffer.emit(&Output::tap(Key::Backspace));
        assert_eq!(buffer.text(), "\"H");
    }
}
