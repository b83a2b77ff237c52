// Imprint Pipeline State
// Session state observed and mutated by the transform engine

mod caps_word;
mod memory;
mod sentence_case;

pub use caps_word::{CapsWord, CapsWordVerdict};
pub use memory::LastKeyMemory;
pub use sentence_case::{SentenceCase, SentenceClass, SentenceState};
