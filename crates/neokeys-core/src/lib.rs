// Neokeys Core Library
// Input core of a keyboard controller: modifier tracking, tap-hold layers and shift-aware remapping

pub mod action;
pub mod combo;
pub mod config;
pub mod input;
pub mod key;
pub mod layout;
pub mod mapping;
pub mod modifier;
pub mod output;
pub mod state;
pub mod transform;

pub use action::Action;
pub use combo::Combo;
pub use config::{parse_combo_string, parse_keycode, ComboParseError};
pub use input::{KeyEvent, Timestamp};
pub use key::{CustomKey, Key, Keycode};
pub use mapping::{DualKey, DualSource, ModifierHoldMap, OutputAction, RemapTable, RemapTables, ShiftState};
pub use modifier::{Modifier, ModifierClass, ModifierError, ModifierSet};
pub use output::{calculate_combo_actions, ComboActionSequence, Emitter, Output, OutputCommand};
pub use state::{CapsLockLed, Layer, LayerSet, LayerState, LockIndicator, ModifierTracker};
pub use transform::{
    CapsLockCombo, DualKeyState, EngineConfig, EngineContext, EventOutcome, InputEngine,
    Remapper, SourceSet, TapHoldResolver, TapHoldResult,
};

#[cfg(feature = "toml-config")]
pub use config::{Config, ConfigError};
