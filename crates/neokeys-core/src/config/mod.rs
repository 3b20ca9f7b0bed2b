// Neokeys Config API
// Combo string parsing and TOML configuration loading

pub mod combo_parser;

#[cfg(feature = "toml-config")]
pub mod parser;

pub use combo_parser::{parse_combo_string, parse_keycode, ComboParseError};

#[cfg(feature = "toml-config")]
pub use parser::{Config, ConfigError, LayoutName};
