// Neokeys Caps Lock Combination
// Toggles caps lock when both shift keys are down together

use crate::modifier::{Modifier, ModifierSet};
use crate::state::LockIndicator;

/// Tracks the two shift keys and fires once per rising edge of "both held"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapsLockCombo {
    held: ModifierSet,
}

impl CapsLockCombo {
    pub fn new() -> Self {
        Self::default()
    }

    fn both_held(&self) -> bool {
        self.held.contains(Modifier::LShift) && self.held.contains(Modifier::RShift)
    }

    /// Feed a modifier transition.
    ///
    /// Returns `true` when this event completed the combination and caps lock was toggled, in
    /// the direction opposite to what the indicator currently shows.
    pub fn on_modifier_event<I: LockIndicator + ?Sized>(
        &mut self,
        modifier: Modifier,
        pressed: bool,
        indicator: &mut I,
    ) -> bool {
        if !matches!(modifier, Modifier::LShift | Modifier::RShift) {
            return false;
        }

        let was_held = self.both_held();
        if pressed {
            self.held.insert(modifier);
        } else {
            self.held.remove(modifier);
        }

        if !was_held && self.both_held() {
            let on = !indicator.caps_lock_on();
            indicator.set_caps_lock(on);
            log::debug!("caps lock {}", if on { "on" } else { "off" });
            return true;
        }
        false
    }

    pub fn is_armed(&self) -> bool {
        self.both_held()
    }
}
