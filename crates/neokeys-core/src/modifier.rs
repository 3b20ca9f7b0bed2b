// Neokeys Modifier System
// Physical modifiers, modifier bitmasks and the logical modifier classes built on top of them

use std::fmt;

use crate::Key;

/// One of the eight physical modifier keys.
///
/// The discriminant is the bit position in the HID report modifier byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Modifier {
    LCtrl = 0,
    LShift = 1,
    LAlt = 2,
    LGui = 3,
    RCtrl = 4,
    RShift = 5,
    RAlt = 6,
    RGui = 7,
}

/// All physical modifiers in bit order
pub const ALL_MODIFIERS: [Modifier; 8] = [
    Modifier::LCtrl,
    Modifier::LShift,
    Modifier::LAlt,
    Modifier::LGui,
    Modifier::RCtrl,
    Modifier::RShift,
    Modifier::RAlt,
    Modifier::RGui,
];

impl Modifier {
    /// Get the modifier bit mask (bit 0 = LCtrl, bit 7 = RGui)
    pub fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// The key that drives this modifier
    pub fn key(self) -> Key {
        match self {
            Modifier::LCtrl => Key::LCtrl,
            Modifier::LShift => Key::LShift,
            Modifier::LAlt => Key::LAlt,
            Modifier::LGui => Key::LGui,
            Modifier::RCtrl => Key::RCtrl,
            Modifier::RShift => Key::RShift,
            Modifier::RAlt => Key::RAlt,
            Modifier::RGui => Key::RGui,
        }
    }

    /// Get modifier by key
    pub fn from_key(key: Key) -> Option<Modifier> {
        match key {
            Key::LCtrl => Some(Modifier::LCtrl),
            Key::LShift => Some(Modifier::LShift),
            Key::LAlt => Some(Modifier::LAlt),
            Key::LGui => Some(Modifier::LGui),
            Key::RCtrl => Some(Modifier::RCtrl),
            Key::RShift => Some(Modifier::RShift),
            Key::RAlt => Some(Modifier::RAlt),
            Key::RGui => Some(Modifier::RGui),
            _ => None,
        }
    }

    /// The logical class this modifier belongs to
    pub fn class(self) -> ModifierClass {
        match self {
            Modifier::LCtrl | Modifier::RCtrl => ModifierClass::Ctrl,
            Modifier::LShift | Modifier::RShift => ModifierClass::Shift,
            Modifier::LAlt | Modifier::RAlt => ModifierClass::Alt,
            Modifier::LGui | Modifier::RGui => ModifierClass::Gui,
        }
    }

    /// Check if this is a left-hand modifier
    pub fn is_left(self) -> bool {
        (self as u8) < 4
    }

    /// Get the first alias (string representation)
    pub fn primary_alias(self) -> &'static str {
        match self {
            Modifier::LCtrl => "LCtrl",
            Modifier::LShift => "LShift",
            Modifier::LAlt => "LAlt",
            Modifier::LGui => "LGui",
            Modifier::RCtrl => "RCtrl",
            Modifier::RShift => "RShift",
            Modifier::RAlt => "RAlt",
            Modifier::RGui => "RGui",
        }
    }

    /// Get modifier by alias.
    ///
    /// Generic names ("Shift", "Ctrl", ...) resolve to the left-hand key, which is what gets
    /// registered when a modifier has to be synthesized. "AltGr" is the right Alt key.
    pub fn from_alias(alias: &str) -> Option<Modifier> {
        let modifier = match alias.trim().to_ascii_lowercase().as_str() {
            "lctrl" | "lctl" | "lc" | "l_control" | "ctrl" | "control" | "c" => Modifier::LCtrl,
            "lshift" | "lsft" | "l_shift" | "shift" | "s" => Modifier::LShift,
            "lalt" | "la" | "l_alt" | "alt" | "a" | "opt" | "option" => Modifier::LAlt,
            "lgui" | "lmeta" | "lsuper" | "lwin" | "l_meta" | "gui" | "meta" | "super"
            | "win" | "cmd" => Modifier::LGui,
            "rctrl" | "rctl" | "rc" | "r_control" => Modifier::RCtrl,
            "rshift" | "rsft" | "r_shift" => Modifier::RShift,
            "ralt" | "ra" | "r_alt" | "altgr" => Modifier::RAlt,
            "rgui" | "rmeta" | "rsuper" | "rwin" | "r_meta" => Modifier::RGui,
            _ => return None,
        };
        Some(modifier)
    }

    /// Parse an alias, reporting the unknown name on failure
    pub fn parse(alias: &str) -> Result<Modifier, ModifierError> {
        Self::from_alias(alias).ok_or_else(|| ModifierError::UnknownAlias(alias.to_string()))
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primary_alias())
    }
}

/// Logical modifier classes: a class is active when either side is held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierClass {
    None,
    Shift,
    Ctrl,
    Alt,
    Gui,
}

impl ModifierClass {
    /// Bits of both physical keys in this class
    pub fn mask(self) -> ModifierSet {
        let bits = match self {
            ModifierClass::None => 0,
            ModifierClass::Shift => Modifier::LShift.bit() | Modifier::RShift.bit(),
            ModifierClass::Ctrl => Modifier::LCtrl.bit() | Modifier::RCtrl.bit(),
            ModifierClass::Alt => Modifier::LAlt.bit() | Modifier::RAlt.bit(),
            ModifierClass::Gui => Modifier::LGui.bit() | Modifier::RGui.bit(),
        };
        ModifierSet::from_bits(bits)
    }
}

/// Bitmask over the eight physical modifiers, in HID report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModifierSet(u8);

impl ModifierSet {
    pub const EMPTY: ModifierSet = ModifierSet(0);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    pub fn insert(&mut self, modifier: Modifier) {
        self.0 |= modifier.bit();
    }

    pub fn remove(&mut self, modifier: Modifier) {
        self.0 &= !modifier.bit();
    }

    /// Builder-style insert
    pub fn with(mut self, modifier: Modifier) -> Self {
        self.insert(modifier);
        self
    }

    /// Check whether any modifier of `class` is in the set
    pub fn intersects_class(self, class: ModifierClass) -> bool {
        self.0 & class.mask().0 != 0
    }

    pub fn union(self, other: ModifierSet) -> ModifierSet {
        ModifierSet(self.0 | other.0)
    }

    pub fn difference(self, other: ModifierSet) -> ModifierSet {
        ModifierSet(self.0 & !other.0)
    }

    /// Iterate modifiers in bit order
    pub fn iter(self) -> impl Iterator<Item = Modifier> {
        ALL_MODIFIERS.into_iter().filter(move |m| self.contains(*m))
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }
}

impl From<Modifier> for ModifierSet {
    fn from(modifier: Modifier) -> Self {
        ModifierSet(modifier.bit())
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut set = ModifierSet::EMPTY;
        for modifier in iter {
            set.insert(modifier);
        }
        set
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|m| m.primary_alias()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

/// Errors that can occur when working with modifiers
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModifierError {
    #[error("unknown modifier: '{0}'")]
    UnknownAlias(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_bits_follow_hid_order() {
        assert_eq!(Modifier::LCtrl.bit(), 0x01);
        assert_eq!(Modifier::LShift.bit(), 0x02);
        assert_eq!(Modifier::RShift.bit(), 0x20);
        assert_eq!(Modifier::RGui.bit(), 0x80);
    }

    #[test]
    fn test_modifier_from_key() {
        assert_eq!(Modifier::from_key(Key::LShift), Some(Modifier::LShift));
        assert_eq!(Modifier::from_key(Key::RAlt), Some(Modifier::RAlt));
        assert_eq!(Modifier::from_key(Key::A), None);
        for modifier in ALL_MODIFIERS {
            assert_eq!(Modifier::from_key(modifier.key()), Some(modifier));
        }
    }

    #[test]
    fn test_modifier_from_alias() {
        assert_eq!(Modifier::from_alias("Shift"), Some(Modifier::LShift));
        assert_eq!(Modifier::from_alias("RShift"), Some(Modifier::RShift));
        assert_eq!(Modifier::from_alias("ctrl"), Some(Modifier::LCtrl));
        assert_eq!(Modifier::from_alias("AltGr"), Some(Modifier::RAlt));
        assert_eq!(Modifier::from_alias("Hyper"), None);
    }

    #[test]
    fn test_modifier_parse_error() {
        assert_eq!(
            Modifier::parse("Hyper"),
            Err(ModifierError::UnknownAlias("Hyper".to_string()))
        );
    }

    #[test]
    fn test_class_masks_combine_both_sides() {
        let shift = ModifierClass::Shift.mask();
        assert!(shift.contains(Modifier::LShift));
        assert!(shift.contains(Modifier::RShift));
        assert_eq!(shift.len(), 2);
        assert!(ModifierClass::None.mask().is_empty());
    }

    #[test]
    fn test_set_insert_remove() {
        let mut set = ModifierSet::EMPTY;
        set.insert(Modifier::RAlt);
        set.insert(Modifier::LShift);
        assert!(set.contains(Modifier::RAlt));
        assert!(set.intersects_class(ModifierClass::Shift));
        assert!(!set.intersects_class(ModifierClass::Ctrl));

        set.remove(Modifier::LShift);
        assert!(!set.intersects_class(ModifierClass::Shift));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Modifier::RAlt]);
    }

    #[test]
    fn test_set_display() {
        let set = ModifierSet::from(Modifier::LShift).with(Modifier::RAlt);
        assert_eq!(set.to_string(), "[LShift, RAlt]");
    }
}
