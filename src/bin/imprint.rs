// Imprint CLI
// Replays a key script through the pipeline and prints what the host would see

use std::io::{self, Read};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use parking_lot::Mutex;

use imprint_core::mapping::{AltRepeatTable, ExpanderTable, WordMacroTable};
use imprint_core::output::{KeyEmitter, Throttled};
use imprint_core::{
    parse_script, Config, Engine, Layer, LedNotifier, LedScheme, Output, ScriptStep, TextBuffer,
};

/// Imprint keymap pipeline simulator
#[derive(Parser, Debug)]
#[command(name = "imprint")]
#[command(version)]
#[command(about = "Replay key scripts through the Imprint transform pipeline", long_about = None)]
struct Args {
    /// TOML configuration file (defaults to the user config directory)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Validate config and exit
    #[arg(long)]
    check_config: bool,

    /// Print the magic, alternate-repeat and word macro tables
    #[arg(long)]
    list_tables: bool,

    /// Layer active when the script starts (name or index)
    #[arg(long, value_parser = parse_layer)]
    layer: Option<Layer>,

    /// Print every emitted output
    #[arg(long)]
    outputs: bool,

    /// Key script tokens; read from stdin when empty
    script: Vec<String>,
}

fn parse_layer(s: &str) -> Result<Layer, String> {
    if let Ok(index) = s.parse::<u8>() {
        return Layer::from_index(index).ok_or_else(|| format!("no layer {}", index));
    }
    Layer::from_str(s).map_err(|_| format!("unknown layer '{}'", s))
}

/// LED notifier that keeps every scheme for the final report
#[derive(Clone, Default)]
struct SharedLeds(Arc<Mutex<Vec<LedScheme>>>);

impl LedNotifier for SharedLeds {
    fn show(&mut self, scheme: LedScheme) {
        log::debug!("led -> {}", scheme);
        self.0.lock().push(scheme);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn load_config(args: &Args) -> Result<Config> {
    match &args.config {
        Some(path) => Config::from_toml_path(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Config::load_default().context("failed to load default config"),
    }
}

fn read_script(args: &Args) -> Result<String> {
    if !args.script.is_empty() {
        return Ok(args.script.join(" "));
    }
    let mut script = String::new();
    io::stdin()
        .read_to_string(&mut script)
        .context("failed to read key script from stdin")?;
    Ok(script)
}

fn list_tables() {
    for table in [ExpanderTable::left(), ExpanderTable::right()] {
        println!("[{}]", table.name());
        for (key, entry) in table.iter() {
            let backspaces = "⌫".repeat(entry.backspaces as usize);
            println!(
                "  {:<14} {}{:?} -> {}",
                key.name(),
                backspaces,
                entry.text,
                entry.repeat_key()
            );
        }
    }
    for table in [AltRepeatTable::sfb(), AltRepeatTable::completion()] {
        println!("[{}]", table.name());
        for (key, text) in table.iter() {
            println!("  {:<14} {:?}", key.name(), text);
        }
    }
    println!("[word-macros]");
    for (key, word) in WordMacroTable::get().iter() {
        println!("  {:<14} {:?} -> {}", key.name(), word.text, word.repeat);
    }
}

fn run(args: &Args, config: &Config) -> Result<()> {
    let script = read_script(args)?;
    let steps = parse_script(&script).context("invalid key script")?;

    let leds = SharedLeds::default();
    let mut engine = Engine::new(config.engine_config()).with_led(leds.clone());
    if let Some(layer) = args.layer {
        engine.set_layer(layer);
    }

    let mut emitter = Throttled::new(TextBuffer::new(), config.send_string_delay_ms);
    let mut emit = |outputs: &[Output]| {
        for output in outputs {
            if args.outputs {
                println!("{}", output);
            }
            emitter.emit(output);
        }
    };

    let mut last_ms = 0;
    for step in steps {
        match step {
            ScriptStep::Event(event) => {
                emit(engine.tick(event.time_ms).as_slice());
                emit(engine.process_event(event).as_slice());
                last_ms = event.time_ms;
            }
            ScriptStep::Layer(layer) => engine.set_layer(layer),
        }
    }
    emit(engine.tick(last_ms + config.combo_term_ms).as_slice());

    println!("{}", emitter.inner());
    let schemes: Vec<String> = leds.0.lock().iter().map(|s| s.to_string()).collect();
    println!("leds: {}", schemes.join(" -> "));
    if engine.caps_word_active() {
        println!("caps word: on");
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    log::debug!("config: {:?}", config);

    if args.check_config {
        println!("Configuration is valid");
        return Ok(());
    }

    if args.list_tables {
        list_tables();
        return Ok(());
    }

    run(&args, &config)
}
