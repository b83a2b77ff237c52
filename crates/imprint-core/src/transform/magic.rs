// Imprint Transform - Magic Expanders
// Typing fragments chosen by the previously typed key

use std::borrow::Cow;

use crate::mapping::{ExpanderEntry, ExpanderTable, MagicSide};
use crate::output::{Output, Outputs};
use crate::{Key, ModMask};

/// Look up the expansion for a magic press.
///
/// A remembered key typed with ctrl, alt or gui held has no expansion.
pub fn expand(
    side: MagicSide,
    remembered: Key,
    remembered_mods: ModMask,
) -> Option<&'static ExpanderEntry> {
    if remembered_mods.has_non_shift() {
        return None;
    }
    ExpanderTable::for_side(side).lookup(remembered)
}

/// How a typed fragment is cased
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FragmentCase {
    /// Caps word is on; the whole fragment is shifted
    pub shifted: bool,
    /// Sentence case is primed; only the first character is capitalised
    pub capitalise: bool,
}

/// Backspaces, then `text`
pub fn type_fragment(out: &mut Outputs, text: &'static str, backspaces: u8, case: FragmentCase) {
    for _ in 0..backspaces {
        out.push(Output::tap(Key::Backspace));
    }
    let text = if case.capitalise && !case.shifted {
        capitalise_first(text)
    } else {
        Cow::Borrowed(text)
    };
    out.push(Output::text(text, case.shifted));
}

fn capitalise_first(text: &'static str) -> Cow<'static, str> {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            let mut owned = String::with_capacity(text.len());
            owned.push(first.to_ascii_uppercase());
            owned.push_str(chars.as_str());
            Cow::Owned(owned)
        }
        _ => Cow::Borrowed(text),
    }
}
