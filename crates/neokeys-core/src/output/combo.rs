// Neokeys Combo Sending Calculation
// Modifier arithmetic for deciding which modifiers a combo tap must force

use crate::{Combo, Key, ModifierSet};

/// Sequence of actions to send for a combo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboActionSequence {
    /// Modifiers to set before the key and clear after it
    pub modifiers_to_press: ModifierSet,
    /// The main key of the combo
    pub main_key: Key,
}

impl ComboActionSequence {
    /// Check if this sequence requires any modifier changes
    pub fn needs_modifier_changes(&self) -> bool {
        !self.modifiers_to_press.is_empty()
    }

    /// Get the total number of output commands in this sequence
    pub fn total_actions(&self) -> usize {
        self.modifiers_to_press.len() * 2 + 2
    }
}

/// Calculate which modifiers have to be forced to send `combo` given the modifiers currently
/// reported to the output.
///
/// A left-hand modifier names its class: it is already satisfied when either side of that class
/// is held. A right-hand modifier (e.g. AltGr) is only satisfied by that exact key, since hosts
/// treat the right Alt differently. Modifiers that are held but not part of the combo are left
/// alone.
pub fn calculate_combo_actions(combo: Combo, reported: ModifierSet) -> ComboActionSequence {
    let modifiers_to_press = combo
        .modifiers()
        .iter()
        .filter(|modifier| {
            if modifier.is_left() {
                !reported.intersects_class(modifier.class())
            } else {
                !reported.contains(*modifier)
            }
        })
        .collect();

    ComboActionSequence {
        modifiers_to_press,
        main_key: combo.key(),
    }
}
