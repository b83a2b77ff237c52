// Imprint Core Library
// Key-event transformation pipeline for the Imprint keymap

pub mod action;
pub mod config;
pub mod input;
pub mod key;
pub mod led;
pub mod mapping;
pub mod modifier;
pub mod output;
pub mod script;
pub mod state;
pub mod transform;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use input::{ComboDef, ComboDetector, KeyEvent};
pub use key::Key;
pub use led::{scheme_for_layer, Layer, LedNotifier, LedScheme};
pub use mapping::{AltRepeatTable, ExpanderEntry, ExpanderTable, MagicSide, WordMacroTable};
pub use modifier::ModMask;
pub use output::{KeyEmitter, Output, Outputs, TextBuffer};
pub use script::{parse_script, ScriptError, ScriptStep};
pub use state::{CapsWord, LastKeyMemory, SentenceCase, SentenceState};
pub use transform::{Engine, EngineConfig, TapHold};
