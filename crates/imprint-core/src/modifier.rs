// Imprint Modifier Mask
// Bitset of held modifier keys, laid out like the HID report modifier byte

use std::fmt;

use bitflags::bitflags;

use crate::Key;

bitflags! {
    /// Snapshot of held modifier keys.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModMask: u8 {
        const LCTRL = 1 << 0;
        const LSHIFT = 1 << 1;
        const LALT = 1 << 2;
        const LGUI = 1 << 3;
        const RCTRL = 1 << 4;
        const RSHIFT = 1 << 5;
        const RALT = 1 << 6;
        const RGUI = 1 << 7;

        const SHIFT = Self::LSHIFT.bits() | Self::RSHIFT.bits();
        const CTRL = Self::LCTRL.bits() | Self::RCTRL.bits();
        const ALT = Self::LALT.bits() | Self::RALT.bits();
        const GUI = Self::LGUI.bits() | Self::RGUI.bits();
    }
}

impl ModMask {
    pub const NONE: ModMask = ModMask::empty();

    /// Either shift key is held
    pub fn any_shift(self) -> bool {
        self.intersects(Self::SHIFT)
    }

    /// Any modifier other than shift is held
    pub fn has_non_shift(self) -> bool {
        !self.difference(Self::SHIFT).is_empty()
    }

    /// Nothing but shift and right-alt (AltGr) is held
    pub fn is_shift_or_ralt_only(self) -> bool {
        self.difference(Self::SHIFT | Self::RALT).is_empty()
    }

    /// The modifier bit a modifier key controls
    pub fn from_key(key: Key) -> Option<ModMask> {
        let mask = match key {
            Key::LeftCtrl => Self::LCTRL,
            Key::LeftShift => Self::LSHIFT,
            Key::LeftAlt => Self::LALT,
            Key::LeftGui => Self::LGUI,
            Key::RightCtrl => Self::RCTRL,
            Key::RightShift => Self::RSHIFT,
            Key::RightAlt => Self::RALT,
            Key::RightGui => Self::RGUI,
            _ => return None,
        };
        Some(mask)
    }

    /// Look up a modifier by alias (`"Shift"`, `"S"`, `"RAlt"`, `"Ctrl"`, ...).
    ///
    /// Unsided aliases resolve to the left-hand key.
    pub fn from_alias(alias: &str) -> Option<ModMask> {
        let mask = match alias.to_ascii_lowercase().as_str() {
            "s" | "shift" | "lshift" | "ls" => Self::LSHIFT,
            "rs" | "rshift" => Self::RSHIFT,
            "c" | "ctrl" | "control" | "lctrl" | "lc" => Self::LCTRL,
            "rc" | "rctrl" => Self::RCTRL,
            "a" | "alt" | "lalt" | "la" | "opt" => Self::LALT,
            "ra" | "ralt" | "altgr" => Self::RALT,
            "g" | "gui" | "lgui" | "super" | "win" | "cmd" | "meta" => Self::LGUI,
            "rg" | "rgui" => Self::RGUI,
            _ => return None,
        };
        Some(mask)
    }

    /// Modifier keys whose bits are set, left side first
    pub fn keys(self) -> impl Iterator<Item = Key> {
        const ORDER: [(ModMask, Key); 8] = [
            (ModMask::LCTRL, Key::LeftCtrl),
            (ModMask::LSHIFT, Key::LeftShift),
            (ModMask::LALT, Key::LeftAlt),
            (ModMask::LGUI, Key::LeftGui),
            (ModMask::RCTRL, Key::RightCtrl),
            (ModMask::RSHIFT, Key::RightShift),
            (ModMask::RALT, Key::RightAlt),
            (ModMask::RGUI, Key::RightGui),
        ];
        ORDER
            .into_iter()
            .filter(move |(mask, _)| self.contains(*mask))
            .map(|(_, key)| key)
    }
}

impl fmt::Display for ModMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let names: Vec<&'static str> = self.keys().map(Key::name).collect();
        write!(f, "{}", names.join("+"))
    }
}
