// Imprint Output Layer
// Emission requests and the sinks that consume them

mod emit;
mod text;

pub use emit::{KeyEmitter, Output, Outputs, Throttled};
pub use text::TextBuffer;
