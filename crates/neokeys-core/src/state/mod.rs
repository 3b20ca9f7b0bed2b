// Neokeys Runtime State
// Modifier, layer and lock-indicator state owned by or driven from the engine

mod indicator;
mod layers;
mod modifiers;

pub use indicator::{CapsLockLed, LockIndicator};
pub use layers::{Layer, LayerSet, LayerState};
pub use modifiers::ModifierTracker;
