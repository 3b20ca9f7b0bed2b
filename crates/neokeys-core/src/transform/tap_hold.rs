// Neokeys Tap-Hold Resolver
// Decides whether a dual-function key was held for its layer or tapped for its own output

use std::collections::HashMap;
use std::fmt;

use crate::input::Timestamp;
use crate::mapping::{DualKey, OutputAction};
use crate::state::{Layer, LayerState};
use crate::Keycode;

/// Bitmask of the sources currently asserting one dual-function layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceSet(u8);

impl SourceSet {
    pub const EMPTY: SourceSet = SourceSet(0);
    /// Sources per dual key that fit in the mask
    pub const CAPACITY: usize = 8;

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, source: usize) -> bool {
        source < Self::CAPACITY && self.0 & (1 << source) != 0
    }

    pub fn insert(&mut self, source: usize) {
        if source < Self::CAPACITY {
            self.0 |= 1 << source;
        }
    }

    pub fn remove(&mut self, source: usize) {
        if source < Self::CAPACITY {
            self.0 &= !(1 << source);
        }
    }
}

impl fmt::Display for SourceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010b}", self.0)
    }
}

/// Runtime state of one dual-function layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DualKeyState {
    /// Sources currently held
    pub sources: SourceSet,
    /// When the timed source went down
    pub pressed_at: Option<Timestamp>,
}

impl DualKeyState {
    pub fn is_idle(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Result of feeding a dual-function key event to the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapHoldResult {
    /// Source pressed, layer engaged
    Pressed(Layer),
    /// Source released without a tap; `true` when the layer was retracted
    Released { layer_off: bool },
    /// Released within the tapping term; emit the action
    Tap(OutputAction),
}

/// Tracks every configured dual-function key.
///
/// Layers are switched on at press time, so holding works with no timer; the tap decision is
/// made lazily at release by comparing the elapsed time against the tapping term.
#[derive(Debug, Clone)]
pub struct TapHoldResolver {
    keys: Vec<DualKey>,
    states: Vec<DualKeyState>,
    /// keycode -> (key index, source index)
    triggers: HashMap<Keycode, (usize, usize)>,
    tapping_term: u16,
}

impl TapHoldResolver {
    /// Tapping term used by `new`
    pub const DEFAULT_TAPPING_TERM: u16 = 150;

    pub fn new() -> Self {
        Self::with_tapping_term(Self::DEFAULT_TAPPING_TERM)
    }

    pub fn with_tapping_term(tapping_term_ms: u16) -> Self {
        Self {
            keys: Vec::new(),
            states: Vec::new(),
            triggers: HashMap::new(),
            tapping_term: tapping_term_ms,
        }
    }

    /// Register a dual key; sources already bound to another key keep their first binding.
    ///
    /// Only the first source with a tap action is timed, since a dual key keeps a single press
    /// timestamp. Further timed sources are ignored.
    pub fn add_dual_key(&mut self, key: DualKey) {
        let index = self.keys.len();
        let mut timed_seen = false;
        for (source, dual_source) in key.sources().iter().enumerate() {
            if source >= SourceSet::CAPACITY {
                log::warn!(
                    "dual key '{}' has more than {} sources, ignoring {}",
                    key.name(),
                    SourceSet::CAPACITY,
                    dual_source.keycode
                );
                continue;
            }
            if self.triggers.contains_key(&dual_source.keycode) {
                log::warn!(
                    "{} is already a dual key source, ignoring it for '{}'",
                    dual_source.keycode,
                    key.name()
                );
                continue;
            }
            if dual_source.is_timed() {
                if timed_seen {
                    log::warn!(
                        "dual key '{}' already has a timed source, ignoring {}",
                        key.name(),
                        dual_source.keycode
                    );
                    continue;
                }
                timed_seen = true;
            }
            self.triggers.insert(dual_source.keycode, (index, source));
        }
        self.keys.push(key);
        self.states.push(DualKeyState::default());
    }

    pub fn tapping_term(&self) -> u16 {
        self.tapping_term
    }

    /// Check if a keycode is a dual key source
    pub fn is_trigger(&self, keycode: Keycode) -> bool {
        self.triggers.contains_key(&keycode)
    }

    /// Check if every dual key is idle
    pub fn is_idle(&self) -> bool {
        self.states.iter().all(DualKeyState::is_idle)
    }

    /// A source went down: engage the layer and start timing if the source taps
    pub fn on_dual_key_press<L: LayerState + ?Sized>(
        &mut self,
        keycode: Keycode,
        now: Timestamp,
        layers: &mut L,
    ) -> Option<TapHoldResult> {
        let (index, source) = *self.triggers.get(&keycode)?;
        let key = &self.keys[index];
        let state = &mut self.states[index];

        state.sources.insert(source);
        if key.sources()[source].is_timed() {
            state.pressed_at = Some(now);
        }
        layers.activate(key.layer());
        log::debug!(
            "{} engaged by {} (sources {})",
            key.layer(),
            keycode,
            state.sources
        );
        Some(TapHoldResult::Pressed(key.layer()))
    }

    /// A source went up: retract the layer once no source remains, then decide on a tap
    pub fn on_dual_key_release<L: LayerState + ?Sized>(
        &mut self,
        keycode: Keycode,
        now: Timestamp,
        layers: &mut L,
    ) -> Option<TapHoldResult> {
        let (index, source) = *self.triggers.get(&keycode)?;
        let key = &self.keys[index];
        let state = &mut self.states[index];

        state.sources.remove(source);
        let layer_off = state.sources.is_empty();
        if layer_off {
            layers.deactivate(key.layer());
            log::debug!("{} released by {}", key.layer(), keycode);
        }

        let dual_source = &key.sources()[source];
        let Some(tap) = dual_source.tap.as_ref() else {
            return Some(TapHoldResult::Released { layer_off });
        };
        let Some(pressed_at) = state.pressed_at.take() else {
            return Some(TapHoldResult::Released { layer_off });
        };

        let elapsed = now.elapsed_since(pressed_at);
        if elapsed > self.tapping_term {
            log::trace!("{} held for {}ms, no tap", keycode, elapsed);
            return Some(TapHoldResult::Released { layer_off });
        }

        // Another source still asserting the layer selects the companion output
        let action = match (&dual_source.companion_tap, state.sources.is_empty()) {
            (Some(companion), false) => companion,
            _ => tap,
        };
        log::debug!("{} tapped after {}ms: {}", keycode, elapsed, action);
        Some(TapHoldResult::Tap(action.clone()))
    }
}

impl Default for TapHoldResolver {
    fn default() -> Self {
        Self::new()
    }
}
