// Neokeys Key Types
// HID usage codes for physical output keys and the logical keycodes fed into the engine

use std::fmt;
use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use crate::modifier::{Modifier, ModifierSet};

/// USB HID keycodes.
/// See USB HID Usage Tables, Section 10 (Keyboard/Keypad Page 0x07).
///
/// These are layout-agnostic: the host interprets them based on the active input language, so
/// `Key::Y` produces "z" on a German host. Names follow the US legends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum Key {
    // Letters
    A = 0x04,
    B = 0x05,
    C = 0x06,
    D = 0x07,
    E = 0x08,
    F = 0x09,
    G = 0x0A,
    H = 0x0B,
    I = 0x0C,
    J = 0x0D,
    K = 0x0E,
    L = 0x0F,
    M = 0x10,
    N = 0x11,
    O = 0x12,
    P = 0x13,
    Q = 0x14,
    R = 0x15,
    S = 0x16,
    T = 0x17,
    U = 0x18,
    V = 0x19,
    W = 0x1A,
    X = 0x1B,
    Y = 0x1C,
    Z = 0x1D,

    // Numbers
    #[strum(to_string = "1", serialize = "KEY_1", serialize = "N1")]
    N1 = 0x1E,
    #[strum(to_string = "2", serialize = "KEY_2", serialize = "N2")]
    N2 = 0x1F,
    #[strum(to_string = "3", serialize = "KEY_3", serialize = "N3")]
    N3 = 0x20,
    #[strum(to_string = "4", serialize = "KEY_4", serialize = "N4")]
    N4 = 0x21,
    #[strum(to_string = "5", serialize = "KEY_5", serialize = "N5")]
    N5 = 0x22,
    #[strum(to_string = "6", serialize = "KEY_6", serialize = "N6")]
    N6 = 0x23,
    #[strum(to_string = "7", serialize = "KEY_7", serialize = "N7")]
    N7 = 0x24,
    #[strum(to_string = "8", serialize = "KEY_8", serialize = "N8")]
    N8 = 0x25,
    #[strum(to_string = "9", serialize = "KEY_9", serialize = "N9")]
    N9 = 0x26,
    #[strum(to_string = "0", serialize = "KEY_0", serialize = "N0")]
    N0 = 0x27,

    // Control keys
    #[strum(to_string = "ENTER", serialize = "ENT", serialize = "RETURN")]
    Enter = 0x28,
    #[strum(to_string = "ESC", serialize = "ESCAPE")]
    Escape = 0x29,
    #[strum(to_string = "BACKSPACE", serialize = "BSPC")]
    Backspace = 0x2A,
    #[strum(to_string = "TAB")]
    Tab = 0x2B,
    #[strum(to_string = "SPACE", serialize = "SPC")]
    Space = 0x2C,
    #[strum(to_string = "MINUS", serialize = "MINS")]
    Minus = 0x2D,
    #[strum(to_string = "EQUAL", serialize = "EQL")]
    Equal = 0x2E,
    #[strum(to_string = "LEFT_BRACE", serialize = "LBRACKET", serialize = "LBRC")]
    LBracket = 0x2F,
    #[strum(to_string = "RIGHT_BRACE", serialize = "RBRACKET", serialize = "RBRC")]
    RBracket = 0x30,
    #[strum(to_string = "BACKSLASH", serialize = "BSLS")]
    Backslash = 0x31,
    /// Non-US # and ~ (ISO key left of Enter)
    #[strum(to_string = "NONUS_HASH", serialize = "NUHS")]
    NonUsHash = 0x32,
    #[strum(to_string = "SEMICOLON", serialize = "SCLN")]
    Semicolon = 0x33,
    #[strum(to_string = "APOSTROPHE", serialize = "QUOTE", serialize = "QUOT")]
    Quote = 0x34,
    #[strum(to_string = "GRAVE", serialize = "GRV")]
    Grave = 0x35,
    #[strum(to_string = "COMMA", serialize = "COMM")]
    Comma = 0x36,
    #[strum(to_string = "DOT")]
    Dot = 0x37,
    #[strum(to_string = "SLASH", serialize = "SLSH")]
    Slash = 0x38,
    #[strum(to_string = "CAPSLOCK", serialize = "CAPS")]
    CapsLock = 0x39,

    // Function keys
    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,

    // Navigation
    #[strum(to_string = "PRINT", serialize = "PRTSCR", serialize = "SYSRQ")]
    PrintScreen = 0x46,
    #[strum(to_string = "SCROLLLOCK")]
    ScrollLock = 0x47,
    #[strum(to_string = "PAUSE")]
    Pause = 0x48,
    #[strum(to_string = "INSERT", serialize = "INS")]
    Insert = 0x49,
    #[strum(to_string = "HOME")]
    Home = 0x4A,
    #[strum(to_string = "PAGE_UP", serialize = "PGUP")]
    PageUp = 0x4B,
    #[strum(to_string = "DELETE", serialize = "DEL")]
    Delete = 0x4C,
    #[strum(to_string = "END")]
    End = 0x4D,
    #[strum(to_string = "PAGE_DOWN", serialize = "PGDN")]
    PageDown = 0x4E,
    #[strum(to_string = "RIGHT")]
    Right = 0x4F,
    #[strum(to_string = "LEFT")]
    Left = 0x50,
    #[strum(to_string = "DOWN")]
    Down = 0x51,
    #[strum(to_string = "UP")]
    Up = 0x52,

    /// Non-US \ and | (ISO key left of Z, produces < > on German layouts)
    #[strum(to_string = "KEY_102ND", serialize = "NUBS")]
    NonUsBackslash = 0x64,

    // Media
    #[strum(to_string = "MUTE")]
    Mute = 0x7F,
    #[strum(to_string = "VOLUMEUP", serialize = "VOLU")]
    VolumeUp = 0x80,
    #[strum(to_string = "VOLUMEDOWN", serialize = "VOLD")]
    VolumeDown = 0x81,

    // Modifiers (reported in the modifier byte, not in the keycode array)
    #[strum(to_string = "LEFT_CTRL", serialize = "LCTRL", serialize = "LCTL")]
    LCtrl = 0xE0,
    #[strum(to_string = "LEFT_SHIFT", serialize = "LSHIFT", serialize = "LSFT")]
    LShift = 0xE1,
    #[strum(to_string = "LEFT_ALT", serialize = "LALT")]
    LAlt = 0xE2,
    #[strum(to_string = "LEFT_META", serialize = "LGUI", serialize = "LSUPER")]
    LGui = 0xE3,
    #[strum(to_string = "RIGHT_CTRL", serialize = "RCTRL", serialize = "RCTL")]
    RCtrl = 0xE4,
    #[strum(to_string = "RIGHT_SHIFT", serialize = "RSHIFT", serialize = "RSFT")]
    RShift = 0xE5,
    #[strum(to_string = "RIGHT_ALT", serialize = "RALT", serialize = "ALTGR")]
    RAlt = 0xE6,
    #[strum(to_string = "RIGHT_META", serialize = "RGUI", serialize = "RSUPER")]
    RGui = 0xE7,
}

impl Key {
    /// Get the raw HID usage code
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a key by its HID usage code
    pub fn from_code(code: u8) -> Option<Key> {
        Key::iter().find(|key| key.code() == code)
    }

    /// Get the name of this key
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Check if this keycode is a modifier (LCtrl..RGui)
    pub fn is_modifier(self) -> bool {
        (0xE0..=0xE7).contains(&self.code())
    }

    /// The physical modifier this key drives, if any
    pub fn modifier(self) -> Option<Modifier> {
        Modifier::from_key(self)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Try to parse a key name (case-insensitive) to a key
pub fn key_from_name(name: &str) -> Option<Key> {
    Key::from_str(name.trim()).ok()
}

/// Keycodes that only exist inside the keymap.
///
/// The host never sees these; the engine turns them into layer changes, modifier holds or
/// remapped output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum CustomKey {
    /// Left layer-3 key: pure hold, no tap fallback
    #[strum(to_string = "NEO2_LMOD3")]
    Neo2LMod3,
    /// Right layer-3 key: hold for layer 3, tap for "y" (or "@" while the left one is held)
    #[strum(to_string = "NEO2_RMOD3")]
    Neo2RMod3,
    /// Holds Alt+Ctrl while pressed
    #[strum(to_string = "YELDIR_AC")]
    YeldirAc,
    /// Ctrl+Tab
    #[strum(to_string = "YELDIR_CTLTAB")]
    YeldirCtlTab,
    /// Ctrl+Shift+Tab
    #[strum(to_string = "YELDIR_CTLSTAB")]
    YeldirCtlSTab,
    #[strum(to_string = "NEO2_1")]
    Neo2N1,
    #[strum(to_string = "NEO2_2")]
    Neo2N2,
    #[strum(to_string = "NEO2_3")]
    Neo2N3,
    #[strum(to_string = "NEO2_4")]
    Neo2N4,
    #[strum(to_string = "NEO2_5")]
    Neo2N5,
    #[strum(to_string = "NEO2_6")]
    Neo2N6,
    #[strum(to_string = "NEO2_7")]
    Neo2N7,
    #[strum(to_string = "NEO2_8")]
    Neo2N8,
    #[strum(to_string = "NEO2_9")]
    Neo2N9,
    #[strum(to_string = "NEO2_0")]
    Neo2N0,
    #[strum(to_string = "NEO2_MINUS")]
    Neo2Minus,
    #[strum(to_string = "NEO2_COMMA")]
    Neo2Comma,
    #[strum(to_string = "NEO2_DOT")]
    Neo2Dot,
    #[strum(to_string = "NEO2_SHARP_S")]
    Neo2SharpS,
}

impl CustomKey {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// A logical keycode as delivered by the event source.
///
/// `Modded` mirrors keymap entries like `S(KC_EQL)`: a key that the layout always sends together
/// with a fixed set of modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keycode {
    Basic(Key),
    Modded(Key, ModifierSet),
    Custom(CustomKey),
}

impl Keycode {
    /// The physical modifier behind this keycode, if it is a plain modifier key
    pub fn modifier(self) -> Option<Modifier> {
        match self {
            Keycode::Basic(key) => key.modifier(),
            _ => None,
        }
    }
}

impl From<Key> for Keycode {
    fn from(key: Key) -> Self {
        Keycode::Basic(key)
    }
}

impl From<CustomKey> for Keycode {
    fn from(custom: CustomKey) -> Self {
        Keycode::Custom(custom)
    }
}

impl fmt::Display for Keycode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Keycode::Basic(key) => write!(f, "{}", key),
            Keycode::Modded(key, mods) => {
                for modifier in mods.iter() {
                    write!(f, "{}-", modifier.primary_alias())?;
                }
                write!(f, "{}", key)
            }
            Keycode::Custom(custom) => write!(f, "{}", custom.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::A.code(), 0x04);
        assert_eq!(Key::N0.code(), 0x27);
        assert_eq!(Key::RGui.code(), 0xE7);
    }

    #[test]
    fn test_key_from_code() {
        assert_eq!(Key::from_code(0x1C), Some(Key::Y));
        assert_eq!(Key::from_code(0xE1), Some(Key::LShift));
        assert_eq!(Key::from_code(0x01), None);
    }

    #[test]
    fn test_key_from_name_aliases() {
        assert_eq!(key_from_name("y"), Some(Key::Y));
        assert_eq!(key_from_name("ESCAPE"), Some(Key::Escape));
        assert_eq!(key_from_name("esc"), Some(Key::Escape));
        assert_eq!(key_from_name("2"), Some(Key::N2));
        assert_eq!(key_from_name("KEY_2"), Some(Key::N2));
        assert_eq!(key_from_name("lsft"), Some(Key::LShift));
        assert_eq!(key_from_name("AltGr"), Some(Key::RAlt));
        assert_eq!(key_from_name("NOT_A_KEY"), None);
    }

    #[test]
    fn test_key_display_uses_primary_name() {
        assert_eq!(Key::N1.to_string(), "1");
        assert_eq!(Key::LShift.to_string(), "LEFT_SHIFT");
        assert_eq!(Key::Slash.name(), "SLASH");
    }

    #[test]
    fn test_is_modifier() {
        assert!(Key::LCtrl.is_modifier());
        assert!(Key::RGui.is_modifier());
        assert!(!Key::A.is_modifier());
        assert!(!Key::NonUsBackslash.is_modifier());
    }

    #[test]
    fn test_custom_key_names() {
        assert_eq!(CustomKey::Neo2RMod3.name(), "NEO2_RMOD3");
        assert_eq!(CustomKey::from_str("neo2_sharp_s"), Ok(CustomKey::Neo2SharpS));
        assert_eq!(CustomKey::from_str("NEO2_1"), Ok(CustomKey::Neo2N1));
    }

    #[test]
    fn test_keycode_modifier() {
        assert_eq!(Keycode::from(Key::RShift).modifier(), Some(Modifier::RShift));
        assert_eq!(Keycode::from(Key::A).modifier(), None);
        assert_eq!(Keycode::from(CustomKey::YeldirAc).modifier(), None);
    }

    #[test]
    fn test_keycode_display() {
        let modded = Keycode::Modded(Key::Equal, ModifierSet::from(Modifier::LShift));
        assert_eq!(modded.to_string(), "LShift-EQUAL");
        assert_eq!(Keycode::from(CustomKey::YeldirAc).to_string(), "YELDIR_AC");
    }
}
