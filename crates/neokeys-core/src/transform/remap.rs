// Neokeys Remapper
// Shift-aware remapping of logical keycodes to output actions

use crate::input::KeyEvent;
use crate::mapping::{OutputAction, RemapTables, ShiftState};
use crate::modifier::ModifierClass;
use crate::output::{Emitter, Output};
use crate::state::ModifierTracker;
use crate::transform::EventOutcome;
use crate::Keycode;

/// Picks the shifted or unshifted table for each press and emits the hit
#[derive(Debug, Clone, Default)]
pub struct Remapper {
    tables: RemapTables,
}

impl Remapper {
    pub fn new(tables: RemapTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &RemapTables {
        &self.tables
    }

    pub fn lookup(&self, keycode: Keycode, state: ShiftState) -> Option<&OutputAction> {
        self.tables.lookup(keycode, state)
    }

    /// Remap a key event.
    ///
    /// Releases always continue. A shifted hit is emitted with every reported modifier cleared
    /// and the snapshot restored afterwards; an unshifted hit keeps the held modifiers. A miss
    /// touches nothing.
    pub fn on_key_event<O: Output + ?Sized>(
        &self,
        event: &KeyEvent,
        tracker: &mut ModifierTracker,
        out: &mut O,
    ) -> EventOutcome {
        if !event.is_pressed() {
            return EventOutcome::Continue;
        }

        let state = ShiftState::from_shifted(tracker.is_class_active(ModifierClass::Shift));
        let Some(action) = self.lookup(event.keycode, state) else {
            return EventOutcome::Continue;
        };
        log::debug!("{} ({}) -> {}", event.keycode, state, action);

        match state {
            ShiftState::Shifted => {
                let snapshot = tracker.snapshot();
                tracker.clear(&mut *out);
                Emitter::new(&mut *tracker, &mut *out).emit(action);
                tracker.restore(&mut *out, snapshot);
            }
            ShiftState::Unshifted => {
                Emitter::new(tracker, out).emit(action);
            }
        }
        EventOutcome::Handled
    }
}
