// Imprint Key Script
// Textual event source: whitespace-separated key taps with timing
//
// Grammar, one token at a time:
//   A  SPACE  MAGIC_RIGHT    tap the key
//   S-A  C-S-TAB             tap with modifiers held (S, C, A, G, RS, RA, ...)
//   QU@250                   hold the key for 250ms before releasing
//   L+M                      press both keys together (a chord)
//   ~300                     let 300ms pass
//   layer=nav                report a layer change
//   # comment                ignored to the end of the line

use std::str::FromStr;

use regex::Regex;
use smallvec::SmallVec;

use crate::led::Layer;
use crate::{Key, KeyEvent, ModMask};

/// How long a plain tap holds its key
pub const DEFAULT_HOLD_MS: u64 = 20;
/// Time between one token's release and the next token's press
pub const DEFAULT_GAP_MS: u64 = 20;
/// Offset between the presses of a chord
const CHORD_STAGGER_MS: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("unknown key '{key}' in token {token}")]
    UnknownKey { token: usize, key: String },

    #[error("invalid hold time in token {token}: '{text}'")]
    InvalidHold { token: usize, text: String },

    #[error("unknown modifier '{modifier}' in token {token}")]
    UnknownModifier { token: usize, modifier: String },

    #[error("unknown layer '{layer}' in token {token}")]
    UnknownLayer { token: usize, layer: String },

    #[error("token pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// One step of a parsed script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    Event(KeyEvent),
    Layer(Layer),
}

/// Parse a script into timed events, starting the clock at zero
pub fn parse_script(script: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    let token_re = Regex::new(r"^((?:[A-Za-z]{1,5}-)*)(.+?)(?:@(\d+))?$")?;
    let pause_re = Regex::new(r"^~(\d+)$")?;

    let mut steps = Vec::new();
    let mut now = 0u64;

    let tokens = script
        .lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .flat_map(str::split_whitespace);

    for (index, token) in tokens.enumerate() {
        let position = index + 1;

        if let Some(caps) = pause_re.captures(token) {
            now += parse_ms(position, &caps[1])?;
            continue;
        }

        if let Some(name) = token.strip_prefix("layer=") {
            let layer = Layer::from_str(name).map_err(|_| ScriptError::UnknownLayer {
                token: position,
                layer: name.to_string(),
            })?;
            steps.push(ScriptStep::Layer(layer));
            continue;
        }

        let Some(caps) = token_re.captures(token) else {
            return Err(ScriptError::UnknownKey {
                token: position,
                key: token.to_string(),
            });
        };

        let mut mods = ModMask::NONE;
        let mut modifier_keys: SmallVec<[Key; 4]> = SmallVec::new();
        for alias in caps[1].split('-').filter(|s| !s.is_empty()) {
            let mask = ModMask::from_alias(alias).ok_or_else(|| ScriptError::UnknownModifier {
                token: position,
                modifier: alias.to_string(),
            })?;
            modifier_keys.extend(mask.keys());
            mods |= mask;
        }

        let body = &caps[2];
        if body.contains('@') {
            return Err(ScriptError::InvalidHold {
                token: position,
                text: token.to_string(),
            });
        }
        let hold = match caps.get(3) {
            Some(m) => parse_ms(position, m.as_str())?,
            None => DEFAULT_HOLD_MS,
        };

        let keys = parse_chord(position, body)?;

        let mut held = ModMask::NONE;
        for key in &modifier_keys {
            steps.push(ScriptStep::Event(KeyEvent::press(*key, held, now)));
            if let Some(bit) = ModMask::from_key(*key) {
                held |= bit;
            }
        }

        let start = now;
        for (i, key) in keys.iter().enumerate() {
            let t = start + i as u64 * CHORD_STAGGER_MS;
            steps.push(ScriptStep::Event(KeyEvent::press(*key, mods, t)));
        }
        let release_at = start + (keys.len() as u64 - 1) * CHORD_STAGGER_MS + hold;
        for key in &keys {
            steps.push(ScriptStep::Event(KeyEvent::release(*key, mods, release_at)));
        }

        for key in modifier_keys.iter().rev() {
            if let Some(bit) = ModMask::from_key(*key) {
                held -= bit;
            }
            steps.push(ScriptStep::Event(KeyEvent::release(*key, held, release_at)));
        }

        now = release_at + DEFAULT_GAP_MS;
    }

    Ok(steps)
}

/// The events of a parsed script, without layer changes
pub fn events(steps: &[ScriptStep]) -> impl Iterator<Item = KeyEvent> + '_ {
    steps.iter().filter_map(|step| match step {
        ScriptStep::Event(event) => Some(*event),
        ScriptStep::Layer(_) => None,
    })
}

fn parse_chord(position: usize, body: &str) -> Result<SmallVec<[Key; 2]>, ScriptError> {
    // A lone "+" is not a chord separator
    let parts: SmallVec<[&str; 2]> = if body.len() > 1 {
        body.split('+').collect()
    } else {
        SmallVec::from_slice(&[body])
    };
    parts
        .into_iter()
        .map(|name| {
            Key::from_str(name).map_err(|_| ScriptError::UnknownKey {
                token: position,
                key: name.to_string(),
            })
        })
        .collect()
}

fn parse_ms(position: usize, digits: &str) -> Result<u64, ScriptError> {
    digits.parse().map_err(|_| ScriptError::InvalidHold {
        token: position,
        text: digits.to_string(),
    })
}
