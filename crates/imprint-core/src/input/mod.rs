// Imprint Input Layer
// Key events and chord resolution ahead of the transform engine

mod combo;
mod event;

pub use combo::{ComboDef, ComboDetector, ResolvedEvents};
pub use event::KeyEvent;
