// Imprint Transform Module
// Handlers that rewrite key events into output keystrokes and text

pub mod engine;
pub mod magic;
pub mod quote;
pub mod tap_hold;
pub mod vowel;

pub use engine::{Engine, EngineConfig};
pub use quote::QuoteHelper;
pub use tap_hold::{DualKey, ModTap, PressRecord, TapHold, TapHoldTimers};
