// Checks that the shipped example config and trace load and behave like the built-in layout

#[cfg(feature = "toml-config")]
mod tests {
    use std::path::PathBuf;

    use neokeys_core::config::{Config, LayoutName};
    use neokeys_core::input::read_trace;
    use neokeys_core::{
        CapsLockLed, EngineConfig, EngineContext, InputEngine, Key, LayerSet, LockIndicator,
        OutputCommand,
    };

    fn repo_file(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config").join(name)
    }

    #[test]
    fn example_config_parses_and_matches_builtin() {
        let config = Config::from_toml_path(repo_file("neokeys.example.toml"))
            .expect("failed to parse example config");

        assert_eq!(config.layout, LayoutName::Neo2);
        assert_eq!(config.tapping_term_ms, Some(150));
        assert_eq!(config.dual_keys.len(), 1);

        // The example only restates built-in entries
        assert_eq!(config.to_engine_config(), EngineConfig::neo2());
    }

    #[test]
    fn demo_trace_replays() {
        let events = read_trace(&repo_file("demo.trace")).expect("failed to read demo trace");
        let config = Config::from_toml_path(repo_file("neokeys.example.toml"))
            .expect("failed to parse example config");

        let mut engine = InputEngine::new(config.to_engine_config());
        let mut out: Vec<OutputCommand> = Vec::new();
        let mut layers = LayerSet::new();
        let mut led = CapsLockLed::new();
        for event in &events {
            let mut ctx = EngineContext::new(&mut out, &mut layers, &mut led);
            engine.process(event, &mut ctx);
        }

        let pressed: Vec<Key> = out
            .iter()
            .filter_map(|c| match c {
                OutputCommand::Press(key) => Some(*key),
                _ => None,
            })
            .collect();
        assert_eq!(pressed, vec![Key::Y, Key::N2, Key::E]);
        assert_eq!(led.changes(), 2);
        assert!(!led.caps_lock_on());
        assert!(engine.resolver().is_idle());
    }
}
