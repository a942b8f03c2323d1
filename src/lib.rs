//! Stackslide engine library.
//!
//! A single-board stacking puzzle: Red, Green and Blue tokens move one cell
//! at a time under stacking rules until every token sits in the rightmost
//! column. Exposes the board representation, rule engine, history, and the
//! text protocol used by the binaries.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod layout;
pub mod protocol;
pub mod rules;
pub mod solve;

pub use engine::{Engine, MoveOutcome, SharedEngine};

/// Initialises `env_logger` on stderr, defaulting to `warn` unless
/// `RUST_LOG` says otherwise.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .try_init();
}
