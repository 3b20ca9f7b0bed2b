// Neokeys CLI
// Replays recorded key event traces through the input engine and prints the output stream

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use neokeys_core::config::Config;
use neokeys_core::input::read_trace;
use neokeys_core::{
    CapsLockLed, EngineConfig, EngineContext, InputEngine, KeyEvent, LayerSet, LayerState,
    LockIndicator, OutputCommand,
};

/// Neo2 keyboard input core: trace replay and config checking
#[derive(Parser, Debug)]
#[command(name = "neokeys")]
#[command(version)]
#[command(about = "Replay key event traces through the Neo2 input core", long_about = None)]
struct Args {
    /// TOML configuration file (defaults to ~/.config/neokeys/neokeys.toml if present)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Validate config and exit
    #[arg(long)]
    check_config: bool,

    /// Trace file with one `<ms> <press|release> <keycode>` event per line
    #[arg(value_name = "TRACE")]
    trace: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_toml_path(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => {
            let config = Config::load_default().context("failed to load default config")?;
            if config.is_none() {
                log::info!("no config file found, using the built-in Neo2 layout");
            }
            Ok(config.unwrap_or_default())
        }
    }
}

fn check_config(engine_config: &EngineConfig) {
    for (keycode, state) in engine_config.remap.one_sided() {
        log::warn!("{} is only remapped when {}", keycode, state);
    }
    println!("Configuration is valid");
    println!("  tapping term: {}ms", engine_config.tapping_term_ms);
    println!("  dual keys: {}", engine_config.dual_keys.len());
    println!("  modifier holds: {}", engine_config.modifier_holds.len());
    println!(
        "  remaps: {} shifted, {} unshifted",
        engine_config.remap.shifted.len(),
        engine_config.remap.unshifted.len()
    );
}

fn replay(engine_config: EngineConfig, events: &[KeyEvent]) {
    let mut engine = InputEngine::new(engine_config);
    let mut layers = LayerSet::new();
    let mut led = CapsLockLed::new();

    for event in events {
        let mut out: Vec<OutputCommand> = Vec::new();
        let outcome = {
            let mut ctx = EngineContext::new(&mut out, &mut layers, &mut led);
            engine.process(event, &mut ctx)
        };

        println!("{} -> {:?} (top {})", event, outcome, layers.topmost());
        for command in &out {
            println!("    {}", command);
        }
    }

    println!(
        "caps lock {}, modifiers {}",
        if led.caps_lock_on() { "on" } else { "off" },
        engine.tracker().reported()
    );
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(args.config.as_deref())?;
    let engine_config = config.to_engine_config();

    if args.check_config {
        check_config(&engine_config);
        return Ok(());
    }

    let Some(trace_path) = args.trace.as_deref() else {
        bail!("a trace file is required unless --check-config is given");
    };
    let events = read_trace(trace_path)
        .with_context(|| format!("failed to read trace {}", trace_path.display()))?;
    log::debug!("replaying {} events", events.len());

    replay(engine_config, &events);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["neokeys", "--config", "/tmp/test.toml", "demo.trace"]);

        assert_eq!(args.config, Some(PathBuf::from("/tmp/test.toml")));
        assert_eq!(args.trace, Some(PathBuf::from("demo.trace")));
        assert!(!args.verbose);
        assert!(!args.check_config);
    }

    #[test]
    fn test_check_config_without_trace() {
        let args = Args::parse_from(["neokeys", "--check-config", "-v"]);
        assert!(args.check_config);
        assert!(args.verbose);
        assert!(args.trace.is_none());
    }
}
