// Neokeys Emitter
// Sends output actions with forced modifiers that never leak past the tap

use crate::mapping::OutputAction;
use crate::output::{calculate_combo_actions, Output};
use crate::state::ModifierTracker;
use crate::Combo;

/// Emits output actions through a modifier tracker and an output transport.
///
/// After every call the reported modifier state is exactly what it was before.
pub struct Emitter<'a, O: Output + ?Sized> {
    tracker: &'a mut ModifierTracker,
    out: &'a mut O,
}

impl<'a, O: Output + ?Sized> Emitter<'a, O> {
    pub fn new(tracker: &'a mut ModifierTracker, out: &'a mut O) -> Self {
        Self { tracker, out }
    }

    /// Tap a single combo: force missing modifiers, press and release the key, then revert
    /// exactly what was forced.
    pub fn tap_combo(&mut self, combo: Combo) {
        let plan = calculate_combo_actions(combo, self.tracker.reported());
        let forced = self.tracker.force(&mut *self.out, plan.modifiers_to_press);
        self.out.tap(plan.main_key);
        self.tracker.release_forced(&mut *self.out, forced);
    }

    /// Emit an action; sequence steps complete one after another
    pub fn emit(&mut self, action: &OutputAction) {
        log::trace!("emitting {}", action);
        for combo in action.strokes() {
            self.tap_combo(combo);
        }
    }
}
