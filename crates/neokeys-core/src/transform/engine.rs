// Neokeys Input Engine
// The per-event pipeline: modifier tracking, modifier-hold keys, tap-hold, caps lock combo, remap

use crate::input::KeyEvent;
use crate::layout::neo2;
use crate::mapping::{DualKey, ModifierHoldMap, RemapTables};
use crate::output::{Emitter, Output};
use crate::state::{LayerState, LockIndicator, ModifierTracker};
use crate::transform::{
    CapsLockCombo, EventOutcome, Remapper, TapHoldResolver, TapHoldResult,
};

/// Configuration for the input engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Longest press (inclusive) that still counts as a tap
    pub tapping_term_ms: u16,
    pub dual_keys: Vec<DualKey>,
    pub modifier_holds: ModifierHoldMap,
    pub remap: RemapTables,
    /// Toggle caps lock when both shift keys are held
    pub caps_lock_combo: bool,
}

impl EngineConfig {
    /// No dual keys, no holds, empty tables: every event continues
    pub fn empty() -> Self {
        Self {
            tapping_term_ms: TapHoldResolver::DEFAULT_TAPPING_TERM,
            dual_keys: Vec::new(),
            modifier_holds: ModifierHoldMap::new(),
            remap: RemapTables::default(),
            caps_lock_combo: false,
        }
    }

    /// The built-in Neo2 layout
    pub fn neo2() -> Self {
        Self {
            tapping_term_ms: neo2::TAPPING_TERM_MS,
            dual_keys: neo2::dual_keys(),
            modifier_holds: neo2::modifier_holds(),
            remap: neo2::remap_tables(),
            caps_lock_combo: true,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::neo2()
    }
}

/// The collaborators an event is processed against
pub struct EngineContext<'a, O: ?Sized, L: ?Sized, I: ?Sized> {
    pub output: &'a mut O,
    pub layers: &'a mut L,
    pub indicator: &'a mut I,
}

impl<'a, O: ?Sized, L: ?Sized, I: ?Sized> EngineContext<'a, O, L, I> {
    pub fn new(output: &'a mut O, layers: &'a mut L, indicator: &'a mut I) -> Self {
        Self {
            output,
            layers,
            indicator,
        }
    }
}

/// Single owned instance of the input core.
///
/// Events must be fed in order, one at a time; each runs to completion before `process`
/// returns.
#[derive(Debug, Clone)]
pub struct InputEngine {
    tracker: ModifierTracker,
    resolver: TapHoldResolver,
    caps_lock: Option<CapsLockCombo>,
    modifier_holds: ModifierHoldMap,
    remapper: Remapper,
}

impl InputEngine {
    pub fn new(config: EngineConfig) -> Self {
        let mut resolver = TapHoldResolver::with_tapping_term(config.tapping_term_ms);
        for dual_key in config.dual_keys {
            resolver.add_dual_key(dual_key);
        }

        Self {
            tracker: ModifierTracker::new(),
            resolver,
            caps_lock: config.caps_lock_combo.then(CapsLockCombo::new),
            modifier_holds: config.modifier_holds,
            remapper: Remapper::new(config.remap),
        }
    }

    pub fn tracker(&self) -> &ModifierTracker {
        &self.tracker
    }

    pub fn resolver(&self) -> &TapHoldResolver {
        &self.resolver
    }

    pub fn remapper(&self) -> &Remapper {
        &self.remapper
    }

    /// Process a single key event
    ///
    /// `Handled` means the engine produced all output for this event and it must not be
    /// processed again downstream. `Continue` hands it to default processing.
    pub fn process<O, L, I>(
        &mut self,
        event: &KeyEvent,
        ctx: &mut EngineContext<'_, O, L, I>,
    ) -> EventOutcome
    where
        O: Output + ?Sized,
        L: LayerState + ?Sized,
        I: LockIndicator + ?Sized,
    {
        log::trace!("processing {}", event);
        let pressed = event.is_pressed();

        if let Some(modifier) = event.keycode.modifier() {
            self.tracker.on_modifier_event(modifier, pressed);
            if let Some(caps_lock) = self.caps_lock.as_mut() {
                caps_lock.on_modifier_event(modifier, pressed, &mut *ctx.indicator);
            }
        }

        if let Some(modifiers) = self.modifier_holds.get(event.keycode) {
            if pressed {
                self.tracker.register(&mut *ctx.output, modifiers);
            } else {
                self.tracker.unregister(&mut *ctx.output, modifiers);
            }
            return EventOutcome::Continue;
        }

        let tap_hold = if pressed {
            self.resolver
                .on_dual_key_press(event.keycode, event.time, &mut *ctx.layers)
        } else {
            self.resolver
                .on_dual_key_release(event.keycode, event.time, &mut *ctx.layers)
        };
        match tap_hold {
            Some(TapHoldResult::Tap(action)) => {
                Emitter::new(&mut self.tracker, &mut *ctx.output).emit(&action);
                return EventOutcome::Handled;
            }
            Some(_) => return EventOutcome::Continue,
            None => {}
        }

        self.remapper
            .on_key_event(event, &mut self.tracker, &mut *ctx.output)
    }
}

impl Default for InputEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputCommand;
    use crate::state::{CapsLockLed, LayerSet};
    use crate::{CustomKey, Key, Modifier, ModifierSet};

    struct Harness {
        engine: InputEngine,
        out: Vec<OutputCommand>,
        layers: LayerSet,
        led: CapsLockLed,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                engine: InputEngine::default(),
                out: Vec::new(),
                layers: LayerSet::new(),
                led: CapsLockLed::new(),
            }
        }

        fn feed(&mut self, event: KeyEvent) -> EventOutcome {
            let mut ctx = EngineContext::new(&mut self.out, &mut self.layers, &mut self.led);
            self.engine.process(&event, &mut ctx)
        }
    }

    #[test]
    fn test_modifier_hold_key() {
        let mut h = Harness::new();
        assert_eq!(
            h.feed(KeyEvent::press(CustomKey::YeldirAc, 0)),
            EventOutcome::Continue
        );
        assert_eq!(
            h.engine.tracker().reported(),
            ModifierSet::from(Modifier::LAlt).with(Modifier::LCtrl)
        );

        h.feed(KeyEvent::release(CustomKey::YeldirAc, 50));
        assert!(h.engine.tracker().reported().is_empty());
        assert_eq!(
            h.out,
            vec![
                OutputCommand::SetModifier(Modifier::LCtrl),
                OutputCommand::SetModifier(Modifier::LAlt),
                OutputCommand::ClearModifier(Modifier::LCtrl),
                OutputCommand::ClearModifier(Modifier::LAlt),
            ]
        );
    }

    #[test]
    fn test_dual_key_press_continues() {
        let mut h = Harness::new();
        assert_eq!(
            h.feed(KeyEvent::press(CustomKey::Neo2RMod3, 0)),
            EventOutcome::Continue
        );
        assert!(h.layers.is_active(neo2::NEO_3));
        assert_eq!(
            h.feed(KeyEvent::release(CustomKey::Neo2RMod3, 20)),
            EventOutcome::Handled
        );
        assert_eq!(
            h.out,
            vec![OutputCommand::Press(Key::Y), OutputCommand::Release(Key::Y)]
        );
    }

    #[test]
    fn test_caps_lock_combo_through_engine() {
        let mut h = Harness::new();
        h.feed(KeyEvent::press(Key::LShift, 0));
        assert_eq!(h.feed(KeyEvent::press(Key::RShift, 5)), EventOutcome::Continue);
        assert!(h.led.caps_lock_on());
    }

    #[test]
    fn test_caps_lock_combo_disabled() {
        let mut config = EngineConfig::neo2();
        config.caps_lock_combo = false;
        let mut h = Harness::new();
        h.engine = InputEngine::new(config);
        h.feed(KeyEvent::press(Key::LShift, 0));
        h.feed(KeyEvent::press(Key::RShift, 5));
        assert_eq!(h.led.changes(), 0);
    }

    #[test]
    fn test_empty_config_passes_everything() {
        let mut h = Harness::new();
        h.engine = InputEngine::new(EngineConfig::empty());
        for event in [
            KeyEvent::press(CustomKey::Neo2N1, 0),
            KeyEvent::press(CustomKey::Neo2RMod3, 1),
            KeyEvent::release(CustomKey::Neo2RMod3, 2),
        ] {
            assert_eq!(h.feed(event), EventOutcome::Continue);
        }
        assert!(h.out.is_empty());
    }
}
