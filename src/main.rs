//! Stackslide -- a stacking puzzle engine driven over stdin/stdout.
//!
//! Reads one command per line (`state`, `reset`, `move <id> <dir>`,
//! `validate <id> <row> <col>`, `history`, `solve`, `quit`) and writes one
//! JSON reply per line. Logs go to stderr.
//!
//! The config file is taken from `--config <path>` or `STACKSLIDE_CONFIG`.

use std::env;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use stackslide::config::{EngineConfig, CONFIG_ENV};
use stackslide::engine::Engine;
use stackslide::error::ConfigError;
use stackslide::protocol::{Flow, Session};

/// Returns the `--config` argument, if given.
fn config_arg() -> Option<PathBuf> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

/// An explicit `--config` must exist; the environment path may be missing.
fn load_config() -> Result<EngineConfig, ConfigError> {
    if let Some(path) = config_arg() {
        return EngineConfig::load(&path);
    }
    match env::var_os(CONFIG_ENV) {
        Some(path) => EngineConfig::load_or_default(&PathBuf::from(path)),
        None => Ok(EngineConfig::default()),
    }
}

/// Runs the main protocol loop, reading commands from stdin
/// and writing replies to stdout.
fn main() {
    stackslide::init_logging();

    let config = match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("{}", e);
            process::exit(2);
        }
    };
    let engine = match Engine::with_config(&config) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("invalid starting layout: {}", e);
            process::exit(2);
        }
    };

    let mut session = Session::new(engine, Duration::from_millis(config.solve_delay_ms));
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        match session.handle_line(&line, &mut out) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                log::error!("failed to write reply: {}", e);
                process::exit(1);
            }
        }
    }
}
