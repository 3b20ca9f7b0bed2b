// Neokeys Config Parser - TOML with Serde
// Parses layout overrides, dual keys and timing from TOML files

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::{parse_combo_string, parse_keycode};
use crate::mapping::{DualKey, DualSource, OutputAction};
use crate::state::{Layer, LayerSet};
use crate::transform::{EngineConfig, SourceSet};
use crate::{Keycode, Modifier, ModifierSet};

/// Longest accepted tapping term: half the 16-bit timer range, so a wrapped reading never
/// looks like a short press
pub const MAX_TAPPING_TERM_MS: u64 = 32_767;

/// Configuration parser errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid keycode: {0}")]
    InvalidKeycode(String),

    #[error("Invalid modifier: {0}")]
    InvalidModifier(String),

    #[error("Invalid combo string: {0}")]
    InvalidCombo(String),

    #[error("Invalid dual key '{name}': {reason}")]
    InvalidDualKey { name: String, reason: String },

    #[error("Tapping term out of range: {0}ms (expected 1..={max})", max = MAX_TAPPING_TERM_MS)]
    TappingTermOutOfRange(u64),
}

/// Main configuration structure (root TOML table)
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigToml {
    /// General settings
    #[serde(default)]
    pub general: Option<GeneralConfig>,

    /// Timing configuration
    #[serde(default)]
    pub timing: Option<TimingConfig>,

    /// Dual-function (tap/hold) layer keys
    #[serde(default)]
    pub dual_key: Vec<DualKeyTomlEntry>,

    /// Keys holding a modifier set while down
    #[serde(default)]
    pub modifier_hold: BTreeMap<String, Vec<String>>,

    /// Remap table overrides
    #[serde(default)]
    pub remap: RemapConfig,
}

/// General settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Built-in layout the overrides apply to
    #[serde(default)]
    pub layout: LayoutName,
    /// Toggle caps lock with both shift keys
    pub caps_lock_combo: Option<bool>,
}

/// Built-in layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutName {
    #[default]
    Neo2,
    /// Start from empty tables
    None,
}

/// Timing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingConfig {
    /// Longest press that still counts as a tap (milliseconds, inclusive)
    pub tapping_term_ms: Option<u64>,
}

/// Dual-function layer key
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DualKeyTomlEntry {
    /// Name identifier; an entry named like a built-in dual key replaces it
    pub name: String,

    /// Layer held while any source is down
    pub layer: u8,

    /// Keys asserting the layer
    pub sources: Vec<DualSourceToml>,
}

/// One source of a dual key
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DualSourceToml {
    /// Keycode of the source
    pub key: String,

    /// Output when tapped
    pub tap: Option<ActionToml>,

    /// Output when tapped while another source is held
    pub companion_tap: Option<ActionToml>,
}

/// Remap table overrides, keyed by logical keycode
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RemapConfig {
    #[serde(default)]
    pub shifted: BTreeMap<String, ActionToml>,

    #[serde(default)]
    pub unshifted: BTreeMap<String, ActionToml>,
}

/// Output side of an entry (supports various formats)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ActionToml {
    /// Single combo as string
    Single(String),

    /// List of combos (for sequences); empty removes the entry
    Multiple(Vec<String>),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub layout: LayoutName,
    pub caps_lock_combo: Option<bool>,
    pub tapping_term_ms: Option<u16>,
    pub dual_keys: Vec<DualKey>,
    /// Modifier-hold overrides; an empty set removes the key
    pub modifier_holds: Vec<(Keycode, ModifierSet)>,
    /// Shifted overrides; `None` removes the entry
    pub shifted: Vec<(Keycode, Option<OutputAction>)>,
    /// Unshifted overrides; `None` removes the entry
    pub unshifted: Vec<(Keycode, Option<OutputAction>)>,
}

impl Config {
    /// Parse a TOML configuration file
    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let toml_config: ConfigToml =
            toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))?;
        toml_config.to_config()
    }

    /// `~/.config/neokeys/neokeys.toml` (or the platform equivalent)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("neokeys").join("neokeys.toml"))
    }

    /// Load the config at the default path, if there is one
    pub fn load_default() -> Result<Option<Self>, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => {
                log::debug!("loading config from {}", path.display());
                Self::from_toml_path(&path).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Apply the overrides on top of the chosen layout
    pub fn to_engine_config(&self) -> EngineConfig {
        let mut engine = match self.layout {
            LayoutName::Neo2 => EngineConfig::neo2(),
            LayoutName::None => EngineConfig::empty(),
        };

        if let Some(term) = self.tapping_term_ms {
            engine.tapping_term_ms = term;
        }
        if let Some(caps) = self.caps_lock_combo {
            engine.caps_lock_combo = caps;
        }

        for dual_key in &self.dual_keys {
            match engine.dual_keys.iter_mut().find(|k| k.name() == dual_key.name()) {
                Some(existing) => *existing = dual_key.clone(),
                None => engine.dual_keys.push(dual_key.clone()),
            }
        }

        for (keycode, modifiers) in &self.modifier_holds {
            if modifiers.is_empty() {
                engine.modifier_holds.remove(*keycode);
            } else {
                engine.modifier_holds.insert(*keycode, *modifiers);
            }
        }

        for (keycode, action) in &self.shifted {
            match action {
                Some(action) => engine.remap.shifted.insert(*keycode, action.clone()),
                None => engine.remap.shifted.remove(*keycode),
            };
        }
        for (keycode, action) in &self.unshifted {
            match action {
                Some(action) => engine.remap.unshifted.insert(*keycode, action.clone()),
                None => engine.remap.unshifted.remove(*keycode),
            };
        }

        log::debug!(
            "engine config: {} dual keys, {} shifted / {} unshifted remaps",
            engine.dual_keys.len(),
            engine.remap.shifted.len(),
            engine.remap.unshifted.len()
        );
        engine
    }
}

impl ConfigToml {
    /// Convert parsed TOML to internal Config structure
    fn to_config(&self) -> Result<Config, ConfigError> {
        let mut config = Config::default();

        if let Some(general) = &self.general {
            config.layout = general.layout;
            config.caps_lock_combo = general.caps_lock_combo;
        }

        if let Some(term) = self.timing.as_ref().and_then(|t| t.tapping_term_ms) {
            if term == 0 || term > MAX_TAPPING_TERM_MS {
                return Err(ConfigError::TappingTermOutOfRange(term));
            }
            config.tapping_term_ms = Some(term as u16);
        }

        for entry in &self.dual_key {
            config.dual_keys.push(entry.to_dual_key()?);
        }

        for (key_str, modifier_strs) in &self.modifier_hold {
            let keycode = parse_keycode_entry(key_str)?;
            let mut modifiers = ModifierSet::EMPTY;
            for modifier_str in modifier_strs {
                let modifier = Modifier::parse(modifier_str)
                    .map_err(|e| ConfigError::InvalidModifier(e.to_string()))?;
                modifiers.insert(modifier);
            }
            config.modifier_holds.push((keycode, modifiers));
        }

        for (key_str, output) in &self.remap.shifted {
            config
                .shifted
                .push((parse_keycode_entry(key_str)?, output.to_action()?));
        }
        for (key_str, output) in &self.remap.unshifted {
            config
                .unshifted
                .push((parse_keycode_entry(key_str)?, output.to_action()?));
        }

        Ok(config)
    }
}

impl DualKeyTomlEntry {
    fn to_dual_key(&self) -> Result<DualKey, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidDualKey {
            name: self.name.clone(),
            reason,
        };

        if self.layer == 0 || self.layer >= LayerSet::MAX_LAYERS {
            return Err(invalid(format!(
                "layer {} is not in 1..{}",
                self.layer,
                LayerSet::MAX_LAYERS
            )));
        }
        if self.sources.is_empty() || self.sources.len() > SourceSet::CAPACITY {
            return Err(invalid(format!(
                "expected 1 to {} sources, found {}",
                SourceSet::CAPACITY,
                self.sources.len()
            )));
        }

        let mut sources = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            let keycode = parse_keycode_entry(&source.key)?;
            if sources.iter().any(|s: &DualSource| s.keycode == keycode) {
                return Err(invalid(format!("{} is listed twice", keycode)));
            }
            let tap = match &source.tap {
                Some(tap) => tap.to_action()?,
                None => None,
            };
            let companion_tap = match &source.companion_tap {
                Some(companion) => companion.to_action()?,
                None => None,
            };
            if tap.is_none() && companion_tap.is_some() {
                return Err(invalid(format!(
                    "{} has a companion_tap but no tap",
                    keycode
                )));
            }
            sources.push(DualSource {
                keycode,
                tap,
                companion_tap,
            });
        }

        // One press timestamp per dual key
        if sources.iter().filter(|s| s.is_timed()).count() > 1 {
            return Err(invalid("only one source may have a tap".to_string()));
        }

        Ok(DualKey::new(&self.name, Layer(self.layer), sources))
    }
}

impl ActionToml {
    /// `None` for an empty list
    fn to_action(&self) -> Result<Option<OutputAction>, ConfigError> {
        let parts: Vec<&str> = match self {
            ActionToml::Single(s) => vec![s.as_str()],
            ActionToml::Multiple(list) => list.iter().map(String::as_str).collect(),
        };

        let mut combos = Vec::with_capacity(parts.len());
        for part in parts {
            let combo = parse_combo_string(part)
                .map_err(|e| ConfigError::InvalidCombo(format!("'{}': {}", part, e)))?;
            combos.push(combo);
        }
        Ok(OutputAction::from_combos(combos))
    }
}

fn parse_keycode_entry(name: &str) -> Result<Keycode, ConfigError> {
    parse_keycode(name).map_err(|e| ConfigError::InvalidKeycode(format!("'{}': {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::neo2;
    use crate::{CustomKey, Key};

    #[test]
    fn test_empty_config_is_builtin_neo2() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.layout, LayoutName::Neo2);
        assert_eq!(config.to_engine_config(), EngineConfig::neo2());
    }

    #[test]
    fn test_layout_none() {
        let config = Config::from_toml_str(
            r#"
            [general]
            layout = "none"
            caps_lock_combo = true
            "#,
        )
        .unwrap();
        let engine = config.to_engine_config();
        assert!(engine.remap.shifted.is_empty());
        assert!(engine.dual_keys.is_empty());
        assert!(engine.caps_lock_combo);
    }

    #[test]
    fn test_tapping_term() {
        let config = Config::from_toml_str("[timing]\ntapping_term_ms = 200").unwrap();
        assert_eq!(config.to_engine_config().tapping_term_ms, 200);

        assert!(matches!(
            Config::from_toml_str("[timing]\ntapping_term_ms = 0"),
            Err(ConfigError::TappingTermOutOfRange(0))
        ));
        assert!(matches!(
            Config::from_toml_str("[timing]\ntapping_term_ms = 40000"),
            Err(ConfigError::TappingTermOutOfRange(40000))
        ));
        let max = format!("[timing]\ntapping_term_ms = {}", MAX_TAPPING_TERM_MS);
        assert_eq!(
            Config::from_toml_str(&max).unwrap().tapping_term_ms,
            Some(32_767)
        );
    }

    #[test]
    fn test_dual_key_replaces_builtin() {
        let config = Config::from_toml_str(
            r#"
            [[dual_key]]
            name = "neo3"
            layer = 1
            sources = [
                { key = "NEO2_RMOD3", tap = "z" },
            ]
            "#,
        )
        .unwrap();
        let engine = config.to_engine_config();
        assert_eq!(engine.dual_keys.len(), 1);
        let source = &engine.dual_keys[0].sources()[0];
        assert_eq!(source.tap, Some(OutputAction::SingleTap(Key::Z)));
        assert_eq!(engine.dual_keys[0].layer(), neo2::NEO_3);
    }

    #[test]
    fn test_dual_key_validation() {
        let no_sources = r#"
            [[dual_key]]
            name = "empty"
            layer = 2
            sources = []
        "#;
        assert!(matches!(
            Config::from_toml_str(no_sources),
            Err(ConfigError::InvalidDualKey { .. })
        ));

        let base_layer = r#"
            [[dual_key]]
            name = "base"
            layer = 0
            sources = [{ key = "SPACE" }]
        "#;
        assert!(matches!(
            Config::from_toml_str(base_layer),
            Err(ConfigError::InvalidDualKey { .. })
        ));

        let companion_only = r#"
            [[dual_key]]
            name = "odd"
            layer = 2
            sources = [{ key = "SPACE", companion_tap = "a" }]
        "#;
        assert!(matches!(
            Config::from_toml_str(companion_only),
            Err(ConfigError::InvalidDualKey { .. })
        ));
    }

    #[test]
    fn test_dual_key_rejects_two_timed_sources() {
        let two_taps = r#"
            [[dual_key]]
            name = "neo3"
            layer = 1
            sources = [
                { key = "NEO2_LMOD3", tap = "x" },
                { key = "NEO2_RMOD3", tap = "z" },
            ]
        "#;
        match Config::from_toml_str(two_taps) {
            Err(ConfigError::InvalidDualKey { name, reason }) => {
                assert_eq!(name, "neo3");
                assert!(reason.contains("only one source"));
            }
            other => panic!("expected InvalidDualKey, got {:?}", other),
        }
    }

    #[test]
    fn test_remap_overrides() {
        let config = Config::from_toml_str(
            r#"
            [remap.shifted]
            NEO2_1 = "AltGr-1"

            [remap.unshifted]
            GRAVE = []
            NEO2_COMMA = ["COMMA", "SPACE"]
            "#,
        )
        .unwrap();
        let engine = config.to_engine_config();
        assert_eq!(
            engine.remap.shifted.get(CustomKey::Neo2N1.into()),
            Some(&OutputAction::SingleTapWithModifiers(
                Key::N1,
                ModifierSet::from(Modifier::RAlt)
            ))
        );
        assert!(!engine.remap.unshifted.contains(Key::Grave.into()));
        assert!(matches!(
            engine.remap.unshifted.get(CustomKey::Neo2Comma.into()),
            Some(OutputAction::Sequence(_))
        ));
    }

    #[test]
    fn test_modifier_hold() {
        let config = Config::from_toml_str(
            r#"
            [modifier_hold]
            YELDIR_AC = []
            F13 = ["Ctrl", "Shift"]
            "#,
        );
        // F13 is not a known key
        assert!(matches!(config, Err(ConfigError::InvalidKeycode(_))));

        let config = Config::from_toml_str(
            r#"
            [modifier_hold]
            YELDIR_AC = []
            CAPSLOCK = ["Ctrl", "Shift"]
            "#,
        )
        .unwrap();
        let engine = config.to_engine_config();
        assert_eq!(engine.modifier_holds.get(CustomKey::YeldirAc.into()), None);
        assert_eq!(
            engine.modifier_holds.get(Key::CapsLock.into()),
            Some(ModifierSet::from(Modifier::LCtrl).with(Modifier::LShift))
        );
    }

    #[test]
    fn test_invalid_entries() {
        assert!(matches!(
            Config::from_toml_str("[remap.shifted]\nNEO2_1 = \"Hyper-1\""),
            Err(ConfigError::InvalidCombo(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[modifier_hold]\nYELDIR_AC = [\"Hyper\"]"),
            Err(ConfigError::InvalidModifier(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[unknown]\nkey = 1"),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_from_toml_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("neokeys.toml");
        std::fs::write(&path, "[timing]\ntapping_term_ms = 120\n").unwrap();

        let config = Config::from_toml_path(&path).unwrap();
        assert_eq!(config.tapping_term_ms, Some(120));

        let missing = Config::from_toml_path(dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
