// Imprint Key Type
// Closed set of logical keys the pipeline understands

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// A logical key identifier.
///
/// Physical keys, shifted punctuation the layout exposes directly, and the
/// synthetic keys that only exist inside the keymap (magic triggers, word
/// macros, toggles). Names parse case-insensitively (`"a"`, `"SPACE"`,
/// `"MAGIC_RIGHT"`) and display in their canonical upper-case form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Key {
    /// No key. Used as the initial memory value and as "no repeat key".
    #[strum(to_string = "NO", serialize = "NONE")]
    None,

    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    #[strum(to_string = "KEY_1", serialize = "1")]
    Num1,
    #[strum(to_string = "KEY_2", serialize = "2")]
    Num2,
    #[strum(to_string = "KEY_3", serialize = "3")]
    Num3,
    #[strum(to_string = "KEY_4", serialize = "4")]
    Num4,
    #[strum(to_string = "KEY_5", serialize = "5")]
    Num5,
    #[strum(to_string = "KEY_6", serialize = "6")]
    Num6,
    #[strum(to_string = "KEY_7", serialize = "7")]
    Num7,
    #[strum(to_string = "KEY_8", serialize = "8")]
    Num8,
    #[strum(to_string = "KEY_9", serialize = "9")]
    Num9,
    #[strum(to_string = "KEY_0", serialize = "0")]
    Num0,

    #[strum(to_string = "MINUS", serialize = "-")]
    Minus,
    #[strum(to_string = "UNDERSCORE", serialize = "_", serialize = "UNDS")]
    Underscore,
    #[strum(to_string = "EQUAL", serialize = "=")]
    Equal,
    #[strum(to_string = "COMMA", serialize = ",")]
    Comma,
    #[strum(to_string = "DOT", serialize = ".")]
    Dot,
    #[strum(to_string = "SLASH", serialize = "/")]
    Slash,
    #[strum(to_string = "QUESTION", serialize = "?", serialize = "QUES")]
    Question,
    #[strum(to_string = "EXCLAIM", serialize = "!", serialize = "EXLM")]
    Exclaim,
    #[strum(to_string = "SEMICOLON", serialize = ";", serialize = "SCLN")]
    Semicolon,
    #[strum(to_string = "COLON", serialize = ":", serialize = "COLN")]
    Colon,
    #[strum(to_string = "APOSTROPHE", serialize = "'", serialize = "QUOT")]
    Quote,
    #[strum(to_string = "DOUBLE_QUOTE", serialize = "\"", serialize = "DQUO")]
    DoubleQuote,
    #[strum(to_string = "GRAVE", serialize = "`")]
    Grave,
    #[strum(to_string = "LEFT_BRACE", serialize = "[")]
    LeftBracket,
    #[strum(to_string = "RIGHT_BRACE", serialize = "]")]
    RightBracket,
    #[strum(to_string = "BACKSLASH", serialize = "\\")]
    Backslash,

    #[strum(to_string = "SPACE", serialize = "SPC")]
    Space,
    #[strum(to_string = "ENTER", serialize = "ENT", serialize = "RETURN")]
    Enter,
    Tab,
    #[strum(to_string = "ESCAPE", serialize = "ESC")]
    Escape,
    #[strum(to_string = "BACKSPACE", serialize = "BSPC")]
    Backspace,
    #[strum(to_string = "DELETE", serialize = "DEL")]
    Delete,

    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,

    #[strum(to_string = "LEFT_SHIFT", serialize = "LSFT")]
    LeftShift,
    #[strum(to_string = "RIGHT_SHIFT", serialize = "RSFT")]
    RightShift,
    #[strum(to_string = "LEFT_CTRL", serialize = "LCTL")]
    LeftCtrl,
    #[strum(to_string = "RIGHT_CTRL", serialize = "RCTL")]
    RightCtrl,
    #[strum(to_string = "LEFT_ALT", serialize = "LALT")]
    LeftAlt,
    #[strum(to_string = "RIGHT_ALT", serialize = "RALT")]
    RightAlt,
    #[strum(to_string = "LEFT_GUI", serialize = "LGUI")]
    LeftGui,
    #[strum(to_string = "RIGHT_GUI", serialize = "RGUI")]
    RightGui,

    /// Left-hand magic string trigger
    MagicLeft,
    /// Right-hand magic string trigger
    MagicRight,
    /// Alternate repeat, same-finger-bigram avoidance
    #[strum(to_string = "ALTREP1", serialize = "ALT_REP1")]
    AltRep1,
    /// Alternate repeat, word completion
    #[strum(to_string = "ALTREP2", serialize = "ALT_REP2")]
    AltRep2,
    /// Dual-purpose "qu" key
    Qu,
    /// h/v switcher (vowel picks v)
    HvSwitch,
    /// h/v switcher with the vowel rule reversed
    HvSwitchReverse,
    /// Apostrophe inside a word, empty quote pair elsewhere
    QuotePair,
    #[strum(to_string = "CAPS_WORD_TOGGLE", serialize = "CW_TOGG")]
    CapsWordToggle,
    SentenceCaseOn,
    SentenceCaseToggle,
    /// Synthetic repeat key left behind by the left magic ". " entry
    MagicPeriod,

    MThe,
    MIon,
    MTion,
    MSion,
    MMent,
    MNess,
    MLess,
    MEnce,
    MAnce,

    /// Home-row mod-taps: the letter on tap, the modifier on hold
    HrmN,
    HrmS,
    HrmH,
    HrmD,
    HrmA,
    HrmE,
    HrmI,
    HrmW,
    HrmComm,
}

impl Key {
    /// Canonical name of this key
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// A plain letter key, `A` through `Z`
    pub fn is_letter(self) -> bool {
        matches!(
            self,
            Key::A
                | Key::B
                | Key::C
                | Key::D
                | Key::E
                | Key::F
                | Key::G
                | Key::H
                | Key::I
                | Key::J
                | Key::K
                | Key::L
                | Key::M
                | Key::N
                | Key::O
                | Key::P
                | Key::Q
                | Key::R
                | Key::S
                | Key::T
                | Key::U
                | Key::V
                | Key::W
                | Key::X
                | Key::Y
                | Key::Z
        )
    }

    /// Letter-class keys: plain letters and every synthetic key whose output
    /// starts with a letter.
    ///
    /// Sentence case, caps word and the quote helper all classify through
    /// this one predicate.
    pub fn is_letter_class(self) -> bool {
        self.is_letter()
            || self.is_magic_trigger()
            || self.is_alt_repeat()
            || self.is_word_macro()
            || self.is_letter_macro()
    }

    /// Synthetic keys that type a single letter (or a letter pair)
    pub fn is_letter_macro(self) -> bool {
        matches!(self, Key::Qu | Key::HvSwitch | Key::HvSwitchReverse)
    }

    /// Left or right magic string trigger
    pub fn is_magic_trigger(self) -> bool {
        matches!(self, Key::MagicLeft | Key::MagicRight)
    }

    /// Alternate repeat triggers
    pub fn is_alt_repeat(self) -> bool {
        matches!(self, Key::AltRep1 | Key::AltRep2)
    }

    /// Magic word keys (`M_THE`, `M_ION`, ...)
    pub fn is_word_macro(self) -> bool {
        matches!(
            self,
            Key::MThe
                | Key::MIon
                | Key::MTion
                | Key::MSion
                | Key::MMent
                | Key::MNess
                | Key::MLess
                | Key::MEnce
                | Key::MAnce
        )
    }

    /// Home-row mod-tap keys
    pub fn is_mod_tap(self) -> bool {
        matches!(
            self,
            Key::HrmN
                | Key::HrmS
                | Key::HrmH
                | Key::HrmD
                | Key::HrmA
                | Key::HrmE
                | Key::HrmI
                | Key::HrmW
                | Key::HrmComm
        )
    }

    /// Keys that exist only inside the keymap and never reach the host
    pub fn is_synthetic(self) -> bool {
        (self.is_letter_class() && !self.is_letter())
            || self.is_mod_tap()
            || matches!(
                self,
                Key::None
                    | Key::QuotePair
                    | Key::CapsWordToggle
                    | Key::SentenceCaseOn
                    | Key::SentenceCaseToggle
                    | Key::MagicPeriod
            )
    }

    pub fn is_digit(self) -> bool {
        matches!(
            self,
            Key::Num1
                | Key::Num2
                | Key::Num3
                | Key::Num4
                | Key::Num5
                | Key::Num6
                | Key::Num7
                | Key::Num8
                | Key::Num9
                | Key::Num0
        )
    }

    pub fn is_vowel(self) -> bool {
        matches!(self, Key::A | Key::E | Key::I | Key::O | Key::U)
    }

    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Key::LeftShift
                | Key::RightShift
                | Key::LeftCtrl
                | Key::RightCtrl
                | Key::LeftAlt
                | Key::RightAlt
                | Key::LeftGui
                | Key::RightGui
        )
    }

    pub fn is_navigation(self) -> bool {
        matches!(
            self,
            Key::Left
                | Key::Right
                | Key::Up
                | Key::Down
                | Key::Home
                | Key::End
                | Key::PageUp
                | Key::PageDown
        )
    }

    pub fn is_deletion(self) -> bool {
        matches!(self, Key::Backspace | Key::Delete)
    }

    /// Character a host would produce for this key on a US layout
    pub fn to_char(self, shifted: bool) -> Option<char> {
        if self.is_letter() {
            let name = self.name();
            let ch = name.chars().next()?;
            return Some(if shifted {
                ch
            } else {
                ch.to_ascii_lowercase()
            });
        }

        let (plain, shift) = match self {
            Key::Num1 => ('1', '!'),
            Key::Num2 => ('2', '@'),
            Key::Num3 => ('3', '#'),
            Key::Num4 => ('4', '$'),
            Key::Num5 => ('5', '%'),
            Key::Num6 => ('6', '^'),
            Key::Num7 => ('7', '&'),
            Key::Num8 => ('8', '*'),
            Key::Num9 => ('9', '('),
            Key::Num0 => ('0', ')'),
            Key::Minus => ('-', '_'),
            Key::Underscore => ('_', '_'),
            Key::Equal => ('=', '+'),
            Key::Comma => (',', '<'),
            Key::Dot => ('.', '>'),
            Key::Slash => ('/', '?'),
            Key::Question => ('?', '?'),
            Key::Exclaim => ('!', '!'),
            Key::Semicolon => (';', ':'),
            Key::Colon => (':', ':'),
            Key::Quote => ('\'', '"'),
            Key::DoubleQuote => ('"', '"'),
            Key::Grave => ('`', '~'),
            Key::LeftBracket => ('[', '{'),
            Key::RightBracket => (']', '}'),
            Key::Backslash => ('\\', '|'),
            Key::Space => (' ', ' '),
            Key::Enter => ('\n', '\n'),
            Key::Tab => ('\t', '\t'),
            _ => return None,
        };
        Some(if shifted { shift } else { plain })
    }
}

impl Default for Key {
    fn default() -> Self {
        Key::None
    }
}
