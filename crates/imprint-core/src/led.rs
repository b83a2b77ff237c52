// Imprint LED Feedback
// Layer and caps-word colour schemes reported to the RGB collaborator

use strum_macros::{Display, EnumIter, EnumString, FromRepr};

/// Keymap layers, by index.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, FromRepr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[repr(u8)]
pub enum Layer {
    #[default]
    Base = 0,
    Sym = 1,
    Nav = 2,
    Num = 3,
    Func = 4,
    Mouse = 5,
    Empty6 = 6,
    Empty7 = 7,
    Empty8 = 8,
    Game = 9,
}

impl Layer {
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Layer> {
        Layer::from_repr(index)
    }
}

/// Colour scheme shown by the RGB matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum LedScheme {
    Purple,
    Magenta,
    Coral,
    Orange,
    Cyan,
    Green,
    Blue,
    /// Animated up/down gradient
    CapsWord,
}

/// Hue, saturation, value on the 0..=255 scale the matrix driver uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl LedScheme {
    /// Solid colour for the scheme; `None` for animated schemes
    pub fn hsv(self) -> Option<Hsv> {
        let (h, s, v) = match self {
            LedScheme::Purple => (191, 255, 255),
            LedScheme::Magenta => (213, 255, 255),
            LedScheme::Coral => (11, 176, 255),
            LedScheme::Orange => (21, 255, 255),
            LedScheme::Cyan => (128, 255, 255),
            LedScheme::Green => (85, 255, 255),
            LedScheme::Blue => (170, 255, 255),
            LedScheme::CapsWord => return None,
        };
        Some(Hsv { h, s, v })
    }
}

/// Scheme for the highest active layer while caps word is off
pub fn scheme_for_layer(layer: Layer) -> LedScheme {
    match layer {
        Layer::Base => LedScheme::Purple,
        Layer::Sym => LedScheme::Magenta,
        Layer::Nav => LedScheme::Coral,
        Layer::Num => LedScheme::Orange,
        Layer::Func => LedScheme::Cyan,
        Layer::Mouse => LedScheme::Green,
        Layer::Game => LedScheme::Blue,
        Layer::Empty6 | Layer::Empty7 | Layer::Empty8 => LedScheme::Purple,
    }
}

/// Receiver of LED scheme changes. Fire and forget.
pub trait LedNotifier {
    fn show(&mut self, scheme: LedScheme);
}

/// Notifier that drops every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLed;

impl LedNotifier for NoLed {
    fn show(&mut self, _scheme: LedScheme) {}
}
