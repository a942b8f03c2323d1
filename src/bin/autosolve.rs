//! Scripted solve CLI.
//!
//! Plays the fixed solution against a fresh board and writes the resulting
//! move history as CSV.
//!
//! Usage:
//!   cargo run --bin autosolve -- [OPTIONS]
//!
//! Options:
//!   --config FILE   Engine config (default: $STACKSLIDE_CONFIG or built-in)
//!   --delay MS      Pause between steps in ms (default: config value)
//!   --output FILE   CSV output path (default: stdout)
//!   --quiet         Suppress per-step and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use stackslide::config::{EngineConfig, CONFIG_ENV};
use stackslide::engine::Engine;
use stackslide::solve;

#[derive(Debug, Default)]
struct Args {
    /// Path given with `--config`; must exist.
    config: Option<PathBuf>,
    /// Path from the environment; missing files fall back to defaults.
    env_config: Option<PathBuf>,
    delay_ms: Option<u64>,
    output: Option<PathBuf>,
    quiet: bool,
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let v = args.get(i).ok_or("missing --config value")?;
                parsed.config = Some(PathBuf::from(v));
            }
            "--delay" => {
                i += 1;
                let v = args.get(i).ok_or("missing --delay value")?;
                parsed.delay_ms = Some(v.parse().map_err(|_| format!("invalid --delay value: {}", v))?);
            }
            "--output" => {
                i += 1;
                let v = args.get(i).ok_or("missing --output value")?;
                parsed.output = Some(PathBuf::from(v));
            }
            "--quiet" => parsed.quiet = true,
            other => return Err(format!("unknown argument: {}", other)),
        }
        i += 1;
    }

    parsed.env_config = env::var_os(CONFIG_ENV).map(PathBuf::from);
    Ok(parsed)
}

fn run(args: Args) -> Result<bool, Box<dyn std::error::Error>> {
    let config = match (&args.config, &args.env_config) {
        (Some(path), _) => EngineConfig::load(path)?,
        (None, Some(path)) => EngineConfig::load_or_default(path)?,
        (None, None) => EngineConfig::default(),
    };
    let mut engine = Engine::with_config(&config)?;
    let delay = Duration::from_millis(args.delay_ms.unwrap_or(config.solve_delay_ms));

    let summary = solve::replay(&mut engine, delay, |i, step, outcome| {
        if !args.quiet {
            let status = match outcome.rejection() {
                Some(reason) => format!("rejected: {}", reason),
                None => "ok".to_string(),
            };
            eprintln!("{:>2}. {} {:<5} {}", i + 1, step.token, step.direction, status);
        }
    });

    let csv = engine.export_history_csv();
    match &args.output {
        Some(path) => {
            let mut w = BufWriter::new(File::create(path)?);
            write!(w, "{}", csv)?;
            w.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut w = stdout.lock();
            write!(w, "{}", csv)?;
            w.flush()?;
        }
    }

    if !args.quiet {
        eprintln!(
            "{} steps, {} rejected, {}",
            summary.steps,
            summary.rejected,
            if summary.won { "solved" } else { "not solved" }
        );
    }
    Ok(summary.won)
}

fn main() {
    stackslide::init_logging();

    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    match run(args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            log::error!("{}", e);
            process::exit(2);
        }
    }
}
