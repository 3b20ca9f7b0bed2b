// Neokeys Transform Module
// Event processing: tap-hold resolution, caps lock combination, remapping and the engine

mod capslock;
mod engine;
mod remap;
mod tap_hold;

pub use capslock::CapsLockCombo;
pub use engine::{EngineConfig, EngineContext, InputEngine};
pub use remap::Remapper;
pub use tap_hold::{DualKeyState, SourceSet, TapHoldResolver, TapHoldResult};

/// Whether the engine consumed an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventOutcome {
    /// All output for the event was produced; do not process it again
    Handled,
    /// Hand the event to default processing unchanged
    Continue,
}

impl EventOutcome {
    pub fn is_handled(self) -> bool {
        self == EventOutcome::Handled
    }
}
