// Neokeys Config API - Combo String Parser
// Parses combo strings like "LShift-RAlt-SLASH" and logical keycode names

use crate::{Combo, CustomKey, Key, Keycode, Modifier, ModifierSet};
use std::str::FromStr;

/// Errors that can occur during combo parsing
#[derive(Debug, Clone, PartialEq)]
pub enum ComboParseError {
    /// Empty input string
    EmptyInput,
    /// Key name not recognized
    UnknownKey(String),
    /// Modifier alias not recognized
    UnknownModifier(String),
    /// Input ends with hyphen (e.g., "Ctrl-")
    TrailingHyphen,
    /// Custom keycodes cannot carry modifiers (e.g., "Shift-NEO2_1")
    ModifiedCustomKey(String),
}

impl std::fmt::Display for ComboParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComboParseError::EmptyInput => write!(f, "combo string cannot be empty"),
            ComboParseError::UnknownKey(name) => write!(f, "unknown key name: '{}'", name),
            ComboParseError::UnknownModifier(name) => write!(f, "unknown modifier: '{}'", name),
            ComboParseError::TrailingHyphen => write!(f, "combo string cannot end with hyphen"),
            ComboParseError::ModifiedCustomKey(name) => {
                write!(f, "custom keycode '{}' cannot take modifiers", name)
            }
        }
    }
}

impl std::error::Error for ComboParseError {}

/// Split a combo expression into its modifier prefix and the trailing key name
fn split_combo(exp: &str) -> Result<(ModifierSet, &str), ComboParseError> {
    let trimmed = exp.trim();
    if trimmed.is_empty() {
        return Err(ComboParseError::EmptyInput);
    }

    if trimmed.ends_with('-') {
        return Err(ComboParseError::TrailingHyphen);
    }

    // The last part is always the key, everything before it a modifier.
    // Duplicates collapse in the bitmask.
    let (prefix, key_str) = match trimmed.rsplit_once('-') {
        Some((prefix, key_str)) => (Some(prefix), key_str),
        None => (None, trimmed),
    };

    let mut modifiers = ModifierSet::EMPTY;
    if let Some(prefix) = prefix {
        for modifier_str in prefix.split('-') {
            let modifier = Modifier::from_alias(modifier_str)
                .ok_or_else(|| ComboParseError::UnknownModifier(modifier_str.to_string()))?;
            modifiers.insert(modifier);
        }
    }

    Ok((modifiers, key_str))
}

/// Parse a combo string like "LShift-RAlt-SLASH" into modifiers and key
///
/// # Examples
/// ```
/// use neokeys_core::config::parse_combo_string;
/// use neokeys_core::{Key, Modifier};
/// let combo = parse_combo_string("AltGr-z").unwrap();
/// assert!(combo.modifiers().contains(Modifier::RAlt));
/// assert_eq!(combo.key(), Key::Z);
/// ```
pub fn parse_combo_string(exp: &str) -> Result<Combo, ComboParseError> {
    let (modifiers, key_str) = split_combo(exp)?;
    let key = crate::key::key_from_name(key_str)
        .ok_or_else(|| ComboParseError::UnknownKey(key_str.to_string()))?;
    Ok(Combo::from_set(modifiers, key))
}

/// Parse a logical keycode: a custom keycode name ("NEO2_RMOD3"), a plain key ("LSHIFT"),
/// or a key the layout always sends with modifiers ("Shift-EQUAL")
pub fn parse_keycode(exp: &str) -> Result<Keycode, ComboParseError> {
    let (modifiers, key_str) = split_combo(exp)?;

    if let Ok(custom) = CustomKey::from_str(key_str.trim()) {
        if !modifiers.is_empty() {
            return Err(ComboParseError::ModifiedCustomKey(key_str.to_string()));
        }
        return Ok(Keycode::Custom(custom));
    }

    let key = crate::key::key_from_name(key_str)
        .ok_or_else(|| ComboParseError::UnknownKey(key_str.to_string()))?;
    if modifiers.is_empty() {
        Ok(Keycode::Basic(key))
    } else {
        Ok(Keycode::Modded(key, modifiers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_key() {
        let combo = parse_combo_string("y").unwrap();
        assert!(combo.modifiers().is_empty());
        assert_eq!(combo.key(), Key::Y);
    }

    #[test]
    fn test_parse_single_modifier() {
        let combo = parse_combo_string("Shift-2").unwrap();
        assert_eq!(combo.modifiers(), ModifierSet::from(Modifier::LShift));
        assert_eq!(combo.key(), Key::N2);
    }

    #[test]
    fn test_parse_multiple_modifiers() {
        let combo = parse_combo_string("LShift-RAlt-SLASH").unwrap();
        assert_eq!(combo.modifiers().len(), 2);
        assert!(combo.modifiers().contains(Modifier::RAlt));
        assert_eq!(combo.key(), Key::Slash);
    }

    #[test]
    fn test_parse_empty_string() {
        assert_eq!(parse_combo_string(""), Err(ComboParseError::EmptyInput));
        assert_eq!(parse_combo_string("   "), Err(ComboParseError::EmptyInput));
    }

    #[test]
    fn test_parse_trailing_hyphen() {
        assert_eq!(parse_combo_string("Ctrl-"), Err(ComboParseError::TrailingHyphen));
    }

    #[test]
    fn test_parse_unknown_key() {
        let result = parse_combo_string("Ctrl-NotARealKey");
        assert!(matches!(result, Err(ComboParseError::UnknownKey(_))));
    }

    #[test]
    fn test_parse_unknown_modifier() {
        let result = parse_combo_string("Hyper-A");
        assert_eq!(result, Err(ComboParseError::UnknownModifier("Hyper".to_string())));
    }

    #[test]
    fn test_parse_duplicate_modifiers() {
        let combo = parse_combo_string("Ctrl-Ctrl-TAB").unwrap();
        assert_eq!(combo.modifiers().len(), 1);
    }

    #[test]
    fn test_parse_with_whitespace() {
        let combo = parse_combo_string("  Ctrl-TAB  ").unwrap();
        assert_eq!(combo, Combo::from_single(Modifier::LCtrl, Key::Tab));
    }

    #[test]
    fn test_parse_keycode_variants() {
        assert_eq!(parse_keycode("NEO2_RMOD3"), Ok(Keycode::Custom(CustomKey::Neo2RMod3)));
        assert_eq!(parse_keycode("RSHIFT"), Ok(Keycode::Basic(Key::RShift)));
        assert_eq!(
            parse_keycode("Shift-EQUAL"),
            Ok(Keycode::Modded(Key::Equal, ModifierSet::from(Modifier::LShift)))
        );
    }

    #[test]
    fn test_parse_keycode_rejects_modified_custom() {
        assert_eq!(
            parse_keycode("Shift-NEO2_1"),
            Err(ComboParseError::ModifiedCustomKey("NEO2_1".to_string()))
        );
    }
}
