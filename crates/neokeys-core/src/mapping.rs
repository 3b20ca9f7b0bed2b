// Neokeys Mapping Structures
// OutputAction, RemapTable, DualKey and ModifierHoldMap

use std::fmt;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::state::Layer;
use crate::{Combo, Key, Keycode, ModifierSet};

/// What a remap entry or a resolved tap sends to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputAction {
    /// Tap one key
    SingleTap(Key),
    /// Tap one key with modifiers forced for the duration of the tap
    SingleTapWithModifiers(Key, ModifierSet),
    /// Tap several combos in order
    Sequence(SmallVec<[Combo; 4]>),
}

impl OutputAction {
    /// Build the smallest action that sends `combo`
    pub fn from_combo(combo: Combo) -> Self {
        if combo.modifiers().is_empty() {
            OutputAction::SingleTap(combo.key())
        } else {
            OutputAction::SingleTapWithModifiers(combo.key(), combo.modifiers())
        }
    }

    /// Build an action from a list of combos, collapsing a single step
    pub fn from_combos(combos: impl IntoIterator<Item = Combo>) -> Option<Self> {
        let combos: SmallVec<[Combo; 4]> = combos.into_iter().collect();
        match combos.len() {
            0 => None,
            1 => Some(Self::from_combo(combos[0])),
            _ => Some(OutputAction::Sequence(combos)),
        }
    }

    /// The combos this action taps, in order
    pub fn strokes(&self) -> SmallVec<[Combo; 4]> {
        match self {
            OutputAction::SingleTap(key) => smallvec::smallvec![Combo::plain(*key)],
            OutputAction::SingleTapWithModifiers(key, mods) => {
                smallvec::smallvec![Combo::from_set(*mods, *key)]
            }
            OutputAction::Sequence(combos) => combos.clone(),
        }
    }
}

impl From<Key> for OutputAction {
    fn from(key: Key) -> Self {
        OutputAction::SingleTap(key)
    }
}

impl From<Combo> for OutputAction {
    fn from(combo: Combo) -> Self {
        OutputAction::from_combo(combo)
    }
}

impl fmt::Display for OutputAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strokes: Vec<String> = self.strokes().iter().map(|c| c.to_string()).collect();
        write!(f, "{}", strokes.join(", "))
    }
}

/// Which remap table applies to a press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftState {
    Unshifted,
    Shifted,
}

impl ShiftState {
    pub fn from_shifted(shifted: bool) -> Self {
        if shifted {
            ShiftState::Shifted
        } else {
            ShiftState::Unshifted
        }
    }
}

impl fmt::Display for ShiftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftState::Unshifted => write!(f, "unshifted"),
            ShiftState::Shifted => write!(f, "shifted"),
        }
    }
}

/// Finite keycode to action table; a missing entry is a distinct outcome, not a default
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemapTable {
    entries: IndexMap<Keycode, OutputAction>,
}

impl RemapTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry, returning the previous action
    pub fn insert(&mut self, keycode: Keycode, action: OutputAction) -> Option<OutputAction> {
        self.entries.insert(keycode, action)
    }

    pub fn get(&self, keycode: Keycode) -> Option<&OutputAction> {
        self.entries.get(&keycode)
    }

    pub fn contains(&self, keycode: Keycode) -> bool {
        self.entries.contains_key(&keycode)
    }

    pub fn remove(&mut self, keycode: Keycode) -> Option<OutputAction> {
        self.entries.shift_remove(&keycode)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Keycode, &OutputAction)> {
        self.entries.iter()
    }
}

impl FromIterator<(Keycode, OutputAction)> for RemapTable {
    fn from_iter<I: IntoIterator<Item = (Keycode, OutputAction)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(Keycode, OutputAction)> for RemapTable {
    fn extend<I: IntoIterator<Item = (Keycode, OutputAction)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

/// The shifted and unshifted remap tables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemapTables {
    pub shifted: RemapTable,
    pub unshifted: RemapTable,
}

impl RemapTables {
    pub fn new(shifted: RemapTable, unshifted: RemapTable) -> Self {
        Self { shifted, unshifted }
    }

    pub fn table(&self, state: ShiftState) -> &RemapTable {
        match state {
            ShiftState::Shifted => &self.shifted,
            ShiftState::Unshifted => &self.unshifted,
        }
    }

    pub fn lookup(&self, keycode: Keycode, state: ShiftState) -> Option<&OutputAction> {
        self.table(state).get(keycode)
    }

    /// Keycodes that only one of the two tables knows, with the table that has them
    pub fn one_sided(&self) -> Vec<(Keycode, ShiftState)> {
        let shifted_only = self
            .shifted
            .iter()
            .filter(|(k, _)| !self.unshifted.contains(**k))
            .map(|(k, _)| (*k, ShiftState::Shifted));
        let unshifted_only = self
            .unshifted
            .iter()
            .filter(|(k, _)| !self.shifted.contains(**k))
            .map(|(k, _)| (*k, ShiftState::Unshifted));
        shifted_only.chain(unshifted_only).collect()
    }
}

/// One key that can assert a dual-function layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualSource {
    pub keycode: Keycode,
    /// Sent when the key is released within the tapping term; `None` makes it a pure hold
    pub tap: Option<OutputAction>,
    /// Sent instead of `tap` when another source of the same layer is still held
    pub companion_tap: Option<OutputAction>,
}

impl DualSource {
    /// A source that only holds the layer
    pub fn hold(keycode: impl Into<Keycode>) -> Self {
        Self {
            keycode: keycode.into(),
            tap: None,
            companion_tap: None,
        }
    }

    /// A source that also taps
    pub fn timed(keycode: impl Into<Keycode>, tap: OutputAction) -> Self {
        Self {
            keycode: keycode.into(),
            tap: Some(tap),
            companion_tap: None,
        }
    }

    pub fn with_companion(mut self, action: OutputAction) -> Self {
        self.companion_tap = Some(action);
        self
    }

    /// Check if release timing matters for this source
    pub fn is_timed(&self) -> bool {
        self.tap.is_some()
    }
}

/// A layer driven by one or more dual-function keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualKey {
    name: String,
    layer: Layer,
    sources: SmallVec<[DualSource; 2]>,
}

impl DualKey {
    pub fn new(
        name: impl Into<String>,
        layer: Layer,
        sources: impl IntoIterator<Item = DualSource>,
    ) -> Self {
        Self {
            name: name.into(),
            layer,
            sources: sources.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn sources(&self) -> &[DualSource] {
        &self.sources
    }
}

/// Keys that hold a fixed modifier set while they are down
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierHoldMap {
    entries: IndexMap<Keycode, ModifierSet>,
}

impl ModifierHoldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, keycode: Keycode, modifiers: ModifierSet) {
        self.entries.insert(keycode, modifiers);
    }

    pub fn get(&self, keycode: Keycode) -> Option<ModifierSet> {
        self.entries.get(&keycode).copied()
    }

    pub fn remove(&mut self, keycode: Keycode) -> Option<ModifierSet> {
        self.entries.shift_remove(&keycode)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Keycode, &ModifierSet)> {
        self.entries.iter()
    }
}
