// Imprint Transform - Vowel Macro
// One key that types V after a vowel and H after anything else

use crate::{Key, ModMask};

/// Emitted after a vowel (or after a consonant in reverse mode)
pub const VOWEL_CHOICE: Key = Key::V;
/// Emitted after a consonant (or after a vowel in reverse mode)
pub const CONSONANT_CHOICE: Key = Key::H;

/// Pick the key for an `HV_SWITCH` press.
///
/// With a non-shift modifier held the choice is fixed: `H` for the plain
/// key, `V` for the reverse key. That keeps shortcuts like Ctrl+H and
/// Ctrl+V reachable.
pub fn choose(reverse: bool, remembered: Key, mods: ModMask) -> Key {
    if mods.has_non_shift() {
        return if reverse {
            VOWEL_CHOICE
        } else {
            CONSONANT_CHOICE
        };
    }
    if remembered.is_vowel() ^ reverse {
        VOWEL_CHOICE
    } else {
        CONSONANT_CHOICE
    }
}

/// Modifiers to tap the chosen key with
pub fn tap_mods(mods: ModMask, uppercase: bool) -> ModMask {
    if mods.has_non_shift() {
        mods
    } else if uppercase {
        mods | ModMask::LSHIFT
    } else {
        mods
    }
}
