// Neokeys Input Layer - Event Traces
// Plain-text recordings of key events, one per line: `<ms> <press|release> <keycode>`

use std::path::Path;

use crate::config::{parse_keycode, ComboParseError};
use crate::input::KeyEvent;
use crate::Action;

/// Errors that can occur while reading a trace
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected `<ms> <press|release> <keycode>`")]
    MissingField { line: usize },

    #[error("line {line}: invalid timestamp '{value}'")]
    InvalidTime { line: usize, value: String },

    #[error("line {line}: invalid action '{value}'")]
    InvalidAction { line: usize, value: String },

    #[error("line {line}: {source}")]
    InvalidKeycode {
        line: usize,
        #[source]
        source: ComboParseError,
    },
}

/// Parse a trace.
///
/// Blank lines and `#` comments are skipped. Timestamps may exceed the 16-bit timer range; they
/// wrap the same way the controller clock does.
pub fn parse_trace(input: &str) -> Result<Vec<KeyEvent>, TraceError> {
    let mut events = Vec::new();

    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        let mut fields = content.split_whitespace();
        let (Some(time), Some(action), Some(keycode), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(TraceError::MissingField { line });
        };

        let ms: u64 = time.parse().map_err(|_| TraceError::InvalidTime {
            line,
            value: time.to_string(),
        })?;
        let action: Action = action
            .parse()
            .map_err(|value| TraceError::InvalidAction { line, value })?;
        let keycode =
            parse_keycode(keycode).map_err(|source| TraceError::InvalidKeycode { line, source })?;

        events.push(KeyEvent::new(keycode, action, (ms % 65_536) as u16));
    }

    Ok(events)
}

/// Read and parse a trace file
pub fn read_trace(path: &Path) -> Result<Vec<KeyEvent>, TraceError> {
    let content = std::fs::read_to_string(path)?;
    parse_trace(&content)
}
