// Neokeys Output Layer
// Output commands, the transport trait and forced-modifier emission

mod combo;
mod emit;

pub use combo::{calculate_combo_actions, ComboActionSequence};
pub use emit::Emitter;

use std::fmt;

use crate::{Key, Modifier};

/// A single instruction to the output transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputCommand {
    Press(Key),
    Release(Key),
    SetModifier(Modifier),
    ClearModifier(Modifier),
}

impl fmt::Display for OutputCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputCommand::Press(key) => write!(f, "press {}", key),
            OutputCommand::Release(key) => write!(f, "release {}", key),
            OutputCommand::SetModifier(modifier) => write!(f, "set {}", modifier),
            OutputCommand::ClearModifier(modifier) => write!(f, "clear {}", modifier),
        }
    }
}

/// Destination for output commands.
///
/// Commands are fire-and-forget and must be delivered in the order they are sent.
pub trait Output {
    fn send(&mut self, command: OutputCommand);

    /// Press and release `key`
    fn tap(&mut self, key: Key) {
        self.send(OutputCommand::Press(key));
        self.send(OutputCommand::Release(key));
    }
}

/// Recording transport
impl Output for Vec<OutputCommand> {
    fn send(&mut self, command: OutputCommand) {
        self.push(command);
    }
}
