// Neokeys Combo Type
// A single output key together with the modifiers that must be held while it is tapped

use std::fmt;

use crate::modifier::{Modifier, ModifierSet};
use crate::Key;

/// A key tapped with a set of forced modifiers, e.g. `LShift-RAlt-SLASH`.
///
/// Because the modifiers live in a bitmask, equality and hashing are order-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Combo {
    modifiers: ModifierSet,
    key: Key,
}

impl Combo {
    /// Create a new Combo from modifiers and a key
    pub fn new(modifiers: impl IntoIterator<Item = Modifier>, key: Key) -> Self {
        Self {
            modifiers: modifiers.into_iter().collect(),
            key,
        }
    }

    /// A bare key with no forced modifiers
    pub fn plain(key: Key) -> Self {
        Self {
            modifiers: ModifierSet::EMPTY,
            key,
        }
    }

    /// Create a Combo from a single modifier and key
    pub fn from_single(modifier: Modifier, key: Key) -> Self {
        Self {
            modifiers: ModifierSet::from(modifier),
            key,
        }
    }

    pub fn from_set(modifiers: ModifierSet, key: Key) -> Self {
        Self { modifiers, key }
    }

    /// Get the modifiers for this combo
    pub fn modifiers(&self) -> ModifierSet {
        self.modifiers
    }

    /// Get the key for this combo
    pub fn key(&self) -> Key {
        self.key
    }

    /// Add a modifier to this combo
    pub fn with_modifier(&self, modifier: Modifier) -> Self {
        Self {
            modifiers: self.modifiers.with(modifier),
            key: self.key,
        }
    }
}

impl From<Key> for Combo {
    fn from(key: Key) -> Self {
        Combo::plain(key)
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in self.modifiers.iter() {
            write!(f, "{}-", modifier)?;
        }
        write!(f, "{}", self.key)
    }
}
