// Neokeys Input Layer
// Key events, the controller clock and recorded event traces

mod event;
mod trace;

pub use event::{KeyEvent, Timestamp};
pub use trace::{parse_trace, read_trace, TraceError};
