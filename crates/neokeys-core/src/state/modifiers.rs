// Neokeys Modifier Tracker
// Live modifier state: what is physically held versus what the output currently reports

use crate::modifier::{Modifier, ModifierClass, ModifierSet};
use crate::output::{Output, OutputCommand};

/// Tracks held modifiers for a single engine instance.
///
/// Three sets are kept apart:
/// - `physical`: modifier keys currently down on the keyboard
/// - `registered`: modifiers held on behalf of modifier-hold keys (e.g. Alt+Ctrl macro keys)
/// - `reported`: modifiers the output transport currently has set
///
/// Forcing and clearing only ever touch `reported`, so the physical set survives any
/// synthesized emission bit-for-bit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierTracker {
    physical: ModifierSet,
    registered: ModifierSet,
    reported: ModifierSet,
}

impl ModifierTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a physical modifier transition.
    ///
    /// The event itself continues downstream, which sets or clears the modifier on the
    /// output, so the reported set follows along.
    pub fn on_modifier_event(&mut self, modifier: Modifier, pressed: bool) {
        if pressed {
            self.physical.insert(modifier);
            self.reported.insert(modifier);
        } else {
            self.physical.remove(modifier);
            self.reported.remove(modifier);
        }
    }

    /// Check whether either side of `class` is currently active
    pub fn is_class_active(&self, class: ModifierClass) -> bool {
        self.reported.intersects_class(class)
    }

    /// Physically held modifiers
    pub fn physical(&self) -> ModifierSet {
        self.physical
    }

    /// Modifiers currently reported to the output
    pub fn reported(&self) -> ModifierSet {
        self.reported
    }

    /// Capture the reported modifier state
    pub fn snapshot(&self) -> ModifierSet {
        self.reported
    }

    /// Bring the reported state back to `snapshot`, issuing only the commands needed
    pub fn restore<O: Output + ?Sized>(&mut self, out: &mut O, snapshot: ModifierSet) {
        for modifier in self.reported.difference(snapshot).iter() {
            out.send(OutputCommand::ClearModifier(modifier));
        }
        for modifier in snapshot.difference(self.reported).iter() {
            out.send(OutputCommand::SetModifier(modifier));
        }
        self.reported = snapshot;
    }

    /// Clear every reported modifier
    pub fn clear<O: Output + ?Sized>(&mut self, out: &mut O) {
        self.restore(out, ModifierSet::EMPTY);
    }

    /// Set `modifiers` on the output for a synthesized emission.
    ///
    /// Returns the bits that were actually added; pass them to [`Self::release_forced`].
    pub fn force<O: Output + ?Sized>(&mut self, out: &mut O, modifiers: ModifierSet) -> ModifierSet {
        let added = modifiers.difference(self.reported);
        for modifier in added.iter() {
            out.send(OutputCommand::SetModifier(modifier));
        }
        self.reported = self.reported.union(added);
        added
    }

    /// Revert exactly the modifiers a previous [`Self::force`] added
    pub fn release_forced<O: Output + ?Sized>(&mut self, out: &mut O, forced: ModifierSet) {
        for modifier in forced.iter() {
            out.send(OutputCommand::ClearModifier(modifier));
        }
        self.reported = self.reported.difference(forced);
    }

    /// Hold `modifiers` until [`Self::unregister`] is called with the same set
    pub fn register<O: Output + ?Sized>(&mut self, out: &mut O, modifiers: ModifierSet) {
        self.registered = self.registered.union(modifiers);
        self.force(out, modifiers);
    }

    /// Drop held modifiers again, leaving any that are physically down
    pub fn unregister<O: Output + ?Sized>(&mut self, out: &mut O, modifiers: ModifierSet) {
        self.registered = self.registered.difference(modifiers);
        let release = modifiers
            .difference(self.physical)
            .difference(self.registered);
        for modifier in release.iter() {
            if self.reported.contains(modifier) {
                out.send(OutputCommand::ClearModifier(modifier));
            }
        }
        self.reported = self.reported.difference(release);
    }
}
