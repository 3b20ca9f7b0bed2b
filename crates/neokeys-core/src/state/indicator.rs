// Neokeys Lock Indicator
// Fire-and-forget sink for lock-key state

/// Sink for lock-key state such as Caps Lock.
///
/// The engine only reads back whether the indicator is on, to decide which way to toggle.
pub trait LockIndicator {
    fn caps_lock_on(&self) -> bool;
    fn set_caps_lock(&mut self, on: bool);
}

/// In-memory indicator that remembers its state and counts changes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapsLockLed {
    on: bool,
    changes: u32,
}

impl CapsLockLed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the state was set
    pub fn changes(&self) -> u32 {
        self.changes
    }
}

impl LockIndicator for CapsLockLed {
    fn caps_lock_on(&self) -> bool {
        self.on
    }

    fn set_caps_lock(&mut self, on: bool) {
        self.on = on;
        self.changes += 1;
    }
}
