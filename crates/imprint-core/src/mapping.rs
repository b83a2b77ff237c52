// Imprint Mapping Tables
// Magic expanders, alternate-repeat completions and word macros

use std::fmt;
use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::Key;

/// Which magic key is doing the expanding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MagicSide {
    Left,
    Right,
}

impl MagicSide {
    /// The trigger key for a side
    pub fn trigger(self) -> Key {
        match self {
            MagicSide::Left => Key::MagicLeft,
            MagicSide::Right => Key::MagicRight,
        }
    }

    pub fn from_trigger(key: Key) -> Option<MagicSide> {
        match key {
            Key::MagicLeft => Some(MagicSide::Left),
            Key::MagicRight => Some(MagicSide::Right),
            _ => None,
        }
    }
}

impl fmt::Display for MagicSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MagicSide::Left => write!(f, "left"),
            MagicSide::Right => write!(f, "right"),
        }
    }
}

/// One magic expansion.
///
/// `backspaces` characters of already-typed text are deleted before `text`
/// is typed. `repeat` is what memory holds afterwards (space when unset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpanderEntry {
    pub text: &'static str,
    pub repeat: Option<Key>,
    pub backspaces: u8,
}

impl ExpanderEntry {
    pub const fn new(text: &'static str) -> Self {
        Self {
            text,
            repeat: None,
            backspaces: 0,
        }
    }

    pub const fn with_repeat(mut self, key: Key) -> Self {
        self.repeat = Some(key);
        self
    }

    /// Delete `count` characters first; at most two
    pub const fn with_backspaces(mut self, count: u8) -> Self {
        self.backspaces = if count > 2 { 2 } else { count };
        self
    }

    /// Key memory is set to after this entry fires
    pub fn repeat_key(&self) -> Key {
        self.repeat.unwrap_or(Key::Space)
    }
}

/// Static lookup from the remembered key to a magic expansion
#[derive(Debug, Clone)]
pub struct ExpanderTable {
    name: &'static str,
    entries: IndexMap<Key, ExpanderEntry>,
}

impl ExpanderTable {
    pub fn from_entries(
        name: &'static str,
        entries: impl IntoIterator<Item = (Key, ExpanderEntry)>,
    ) -> Self {
        Self {
            name,
            entries: entries.into_iter().collect(),
        }
    }

    /// Left magic key: common word tails plus the sentence punctuation cycle
    pub fn left() -> &'static ExpanderTable {
        static LEFT: OnceLock<ExpanderTable> = OnceLock::new();
        LEFT.get_or_init(|| {
            Self::from_entries(
                "magic-left",
                [
                    (Key::A, ExpanderEntry::new("nd ")),
                    (Key::E, ExpanderEntry::new("ver ")),
                    (Key::H, ExpanderEntry::new("ere ")),
                    (Key::I, ExpanderEntry::new("'m ")),
                    (Key::O, ExpanderEntry::new("ur ")),
                    (Key::T, ExpanderEntry::new("hat ")),
                    (Key::W, ExpanderEntry::new("ith ")),
                    (Key::Y, ExpanderEntry::new("es ")),
                    (Key::N, ExpanderEntry::new("ess ").with_repeat(Key::E)),
                    (Key::L, ExpanderEntry::new("ess ").with_repeat(Key::N)),
                    (Key::M, ExpanderEntry::new("ent ").with_repeat(Key::S)),
                    // "word " -> "word. " -> "word? "
                    (
                        Key::Space,
                        ExpanderEntry::new(". ")
                            .with_backspaces(1)
                            .with_repeat(Key::MagicPeriod),
                    ),
                    (
                        Key::MagicPeriod,
                        ExpanderEntry::new("? ").with_backspaces(2),
                    ),
                ],
            )
        })
    }

    /// Right magic key: word completions for the remembered first letter
    pub fn right() -> &'static ExpanderTable {
        static RIGHT: OnceLock<ExpanderTable> = OnceLock::new();
        RIGHT.get_or_init(|| {
            Self::from_entries(
                "magic-right",
                [
                    (Key::A, ExpanderEntry::new("ll ")),
                    (Key::B, ExpanderEntry::new("ecause ")),
                    (Key::C, ExpanderEntry::new("ould ")),
                    (Key::D, ExpanderEntry::new("oes ")),
                    (Key::E, ExpanderEntry::new("very ")),
                    (Key::F, ExpanderEntry::new("rom ")),
                    (Key::G, ExpanderEntry::new("ood ")),
                    (Key::H, ExpanderEntry::new("ave ")),
                    (Key::I, ExpanderEntry::new("ng ")),
                    (Key::J, ExpanderEntry::new("ust ")),
                    (Key::K, ExpanderEntry::new("now ")),
                    (Key::M, ExpanderEntry::new("ent ")),
                    (Key::N, ExpanderEntry::new("ion ").with_repeat(Key::S)),
                    (Key::P, ExpanderEntry::new("eople ")),
                    (Key::Q, ExpanderEntry::new("uestion ")),
                    (Key::S, ExpanderEntry::new("ion ").with_repeat(Key::S)),
                    (Key::T, ExpanderEntry::new("ion ").with_repeat(Key::S)),
                    (Key::W, ExpanderEntry::new("hich ")),
                    (Key::Y, ExpanderEntry::new("ou ")),
                    (Key::Space, ExpanderEntry::new("the ").with_repeat(Key::N)),
                ],
            )
        })
    }

    pub fn for_side(side: MagicSide) -> &'static ExpanderTable {
        match side {
            MagicSide::Left => Self::left(),
            MagicSide::Right => Self::right(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn lookup(&self, key: Key) -> Option<&ExpanderEntry> {
        self.entries.get(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in definition order
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &ExpanderEntry)> {
        self.entries.iter()
    }
}

/// Static lookup from the remembered key to a literal completion.
///
/// No repeat chaining and no backspaces.
#[derive(Debug, Clone)]
pub struct AltRepeatTable {
    name: &'static str,
    entries: IndexMap<Key, &'static str>,
}

impl AltRepeatTable {
    pub fn from_entries(
        name: &'static str,
        entries: impl IntoIterator<Item = (Key, &'static str)>,
    ) -> Self {
        Self {
            name,
            entries: entries.into_iter().collect(),
        }
    }

    /// Same-finger-bigram avoidance, bound to `ALTREP1`
    pub fn sfb() -> &'static AltRepeatTable {
        static SFB: OnceLock<AltRepeatTable> = OnceLock::new();
        SFB.get_or_init(|| {
            Self::from_entries(
                "altrep-sfb",
                [
                    (Key::A, "o"),
                    (Key::O, "a"),
                    (Key::E, "u"),
                    (Key::U, "e"),
                    (Key::I, "a"),
                    (Key::R, "l"),
                    (Key::L, "r"),
                    (Key::N, "t"),
                    (Key::T, "h"),
                    (Key::S, "t"),
                ],
            )
        })
    }

    /// Word completion, bound to `ALTREP2`
    pub fn completion() -> &'static AltRepeatTable {
        static COMPLETION: OnceLock<AltRepeatTable> = OnceLock::new();
        COMPLETION.get_or_init(|| {
            Self::from_entries(
                "altrep-completion",
                [
                    (Key::M, "ent"),
                    (Key::T, "ion"),
                    (Key::S, "ion"),
                    (Key::N, "ess"),
                    (Key::L, "ess"),
                    (Key::I, "on"),
                    (Key::R, "ight"),
                    (Key::W, "ith"),
                    (Key::H, "ere"),
                    (Key::A, "nd"),
                ],
            )
        })
    }

    /// Table for an alternate-repeat trigger key
    pub fn for_trigger(key: Key) -> Option<&'static AltRepeatTable> {
        match key {
            Key::AltRep1 => Some(Self::sfb()),
            Key::AltRep2 => Some(Self::completion()),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn expand(&self, remembered: Key) -> Option<&'static str> {
        self.entries.get(&remembered).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &&'static str)> {
        self.entries.iter()
    }
}

/// Fragment typed by a word macro key and the key memory holds afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordMacro {
    pub text: &'static str,
    pub repeat: Key,
}

/// `M_*` word macro keys
#[derive(Debug, Clone)]
pub struct WordMacroTable {
    entries: IndexMap<Key, WordMacro>,
}

impl WordMacroTable {
    pub fn get() -> &'static WordMacroTable {
        static WORDS: OnceLock<WordMacroTable> = OnceLock::new();
        WORDS.get_or_init(|| {
            let entries = [
                (Key::MThe, "the ", Key::N),
                (Key::MIon, "ion ", Key::S),
                (Key::MTion, "tion ", Key::S),
                (Key::MSion, "sion ", Key::S),
                (Key::MMent, "ment ", Key::S),
                (Key::MNess, "ness ", Key::E),
                (Key::MLess, "less ", Key::N),
                (Key::MEnce, "ence ", Key::S),
                (Key::MAnce, "ance ", Key::S),
            ];
            WordMacroTable {
                entries: entries
                    .into_iter()
                    .map(|(key, text, repeat)| (key, WordMacro { text, repeat }))
                    .collect(),
            }
        })
    }

    pub fn lookup(&self, key: Key) -> Option<&WordMacro> {
        self.entries.get(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &WordMacro)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_right_table_entries() {
        let right = ExpanderTable::right();
        let a = right.lookup(Key::A).unwrap();
        assert_eq!(a.text, "ll ");
        assert_eq!(a.repeat_key(), Key::Space);
        assert_eq!(a.backspaces, 0);

        let space = right.lookup(Key::Space).unwrap();
        assert_eq!(space.text, "the ");
        assert_eq!(space.repeat_key(), Key::N);
    }

    #[test]
    fn test_left_table_punctuation_cycle() {
        let left = ExpanderTable::left();
        let period = left.lookup(Key::Space).unwrap();
        assert_eq!(period.backspaces, 1);
        assert_eq!(period.repeat_key(), Key::MagicPeriod);

        let question = left.lookup(period.repeat_key()).unwrap();
        assert_eq!(question.text, "? ");
        assert_eq!(question.backspaces, 2);
    }

    #[test]
    fn test_backspaces_are_capped() {
        assert_eq!(ExpanderEntry::new("x").with_backspaces(5).backspaces, 2);
    }

    #[test]
    fn test_tables_never_contain_triggers() {
        for table in [ExpanderTable::left(), ExpanderTable::right()] {
            for (key, _) in table.iter() {
                assert!(!key.is_magic_trigger(), "{} has {key}", table.name());
                assert!(!key.is_alt_repeat(), "{} has {key}", table.name());
            }
        }
    }

    #[test]
    fn test_miss_returns_none() {
        assert!(ExpanderTable::right().lookup(Key::Z).is_none());
        assert!(ExpanderTable::left().lookup(Key::Comma).is_none());
        assert_eq!(AltRepeatTable::sfb().expand(Key::Z), None);
    }

    #[test]
    fn test_alt_repeat_tables_are_distinct() {
        assert_eq!(AltRepeatTable::sfb().expand(Key::T), Some("h"));
        assert_eq!(AltRepeatTable::completion().expand(Key::T), Some("ion"));
        assert_eq!(AltRepeatTable::sfb().len(), 10);
        assert_eq!(AltRepeatTable::completion().len(), 10);
        assert!(AltRepeatTable::for_trigger(Key::AltRep1).is_some());
        assert!(AltRepeatTable::for_trigger(Key::MagicLeft).is_none());
    }

    #[test]
    fn test_every_word_macro_key_has_an_entry() {
        let words = WordMacroTable::get();
        for key in Key::iter().filter(|k| k.is_word_macro()) {
            assert!(words.lookup(key).is_some(), "{key}");
        }
        assert_eq!(words.lookup(Key::MThe).unwrap().repeat, Key::N);
        assert_eq!(words.lookup(Key::MNess).unwrap().text, "ness ");
    }

    #[test]
    fn test_magic_side_trigger_round_trip() {
        for side in [MagicSide::Left, MagicSide::Right] {
            assert_eq!(MagicSide::from_trigger(side.trigger()), Some(side));
        }
        assert_eq!(MagicSide::from_trigger(Key::A), None);
    }
}
