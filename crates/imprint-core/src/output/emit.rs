// Imprint Output - Emission
// What the engine asks the host to send, and the sink that sends it

use std::borrow::Cow;
use std::fmt;
use std::thread;
use std::time::Duration;

use smallvec::SmallVec;

use crate::{Action, Key, ModMask};

/// One emission request produced by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Send the input transition on to the host. `extra_mods` are held
    /// for this transition only, on top of whatever the user holds.
    Forward {
        key: Key,
        action: Action,
        extra_mods: ModMask,
    },
    /// Press and release `key` with exactly `mods` held. The user's own
    /// modifiers are lifted for the duration and restored afterwards.
    Tap { key: Key, mods: ModMask },
    /// Type `text` character by character, every letter upper-cased when
    /// `shifted` is set.
    Text {
        text: Cow<'static, str>,
        shifted: bool,
    },
}

impl Output {
    pub fn forward(key: Key, action: Action) -> Self {
        Output::Forward {
            key,
            action,
            extra_mods: ModMask::NONE,
        }
    }

    pub fn tap(key: Key) -> Self {
        Output::Tap {
            key,
            mods: ModMask::NONE,
        }
    }

    pub fn text(text: impl Into<Cow<'static, str>>, shifted: bool) -> Self {
        Output::Text {
            text: text.into(),
            shifted,
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Forward {
                key,
                action,
                extra_mods,
            } if extra_mods.is_empty() => write!(f, "forward {} {}", key, action),
            Output::Forward {
                key,
                action,
                extra_mods,
            } => write!(f, "forward {} {} +{}", key, action, extra_mods),
            Output::Tap { key, mods } if mods.is_empty() => write!(f, "tap {}", key),
            Output::Tap { key, mods } => write!(f, "tap {}+{}", mods, key),
            Output::Text { text, shifted } => {
                write!(f, "text {:?}{}", text, if *shifted { " (shifted)" } else { "" })
            }
        }
    }
}

/// Outputs produced for one input event
pub type Outputs = SmallVec<[Output; 4]>;

/// Synchronous sink for engine outputs
pub trait KeyEmitter {
    fn emit(&mut self, output: &Output);

    fn emit_all(&mut self, outputs: &[Output]) {
        for output in outputs {
            self.emit(output);
        }
    }
}

impl<E: KeyEmitter + ?Sized> KeyEmitter for &mut E {
    fn emit(&mut self, output: &Output) {
        (**self).emit(output);
    }
}

/// Wraps an emitter and paces text output one character at a time
#[derive(Debug)]
pub struct Throttled<E> {
    inner: E,
    char_delay_ms: u64,
}

impl<E: KeyEmitter> Throttled<E> {
    pub fn new(inner: E, char_delay_ms: u64) -> Self {
        Self {
            inner,
            char_delay_ms,
        }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: KeyEmitter> KeyEmitter for Throttled<E> {
    fn emit(&mut self, output: &Output) {
        match output {
            Output::Text { text, shifted } if self.char_delay_ms > 0 => {
                let delay = Duration::from_millis(self.char_delay_ms);
                for (i, ch) in text.chars().enumerate() {
                    if i > 0 {
                        thread::sleep(delay);
                    }
                    let mut buf = [0u8; 4];
                    let single: &str = ch.encode_utf8(&mut buf);
                    self.inner
                        .emit(&Output::text(single.to_owned(), *shifted));
                }
            }
            _ => self.inner.emit(output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<Output>);

    impl KeyEmitter for Recorder {
        fn emit(&mut self, output: &Output) {
            self.0.push(output.clone());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Output::tap(Key::Backspace).to_string(), "tap BACKSPACE");
        assert_eq!(
            Output::Forward {
                key: Key::T,
                action: Action::Press,
                extra_mods: ModMask::LSHIFT
            }
            .to_string(),
            "forward T press +LEFT_SHIFT"
        );
        assert_eq!(
            Output::text("ll ", true).to_string(),
            "text \"ll \" (shifted)"
        );
    }

    #[test]
    fn test_throttled_splits_text() {
        let mut throttled = Throttled::new(Recorder::default(), 1);
        throttled.emit(&Output::text("ab", false));
        throttled.emit(&Output::tap(Key::Left));
        let seen = throttled.into_inner().0;
        assert_eq!(
            seen,
            vec![
                Output::text("a", false),
                Output::text("b", false),
                Output::tap(Key::Left)
            ]
        );
    }

    #[test]
    fn test_unthrottled_passes_text_whole() {
        let mut throttled = Throttled::new(Recorder::default(), 0);
        throttled.emit(&Output::text("the ", true));
        assert_eq!(throttled.inner().0, vec![Output::text("the ", true)]);
    }
}
