//! Text protocol.
//!
//! A thin request layer over the engine: one command per input line, one
//! JSON reply per line (the `history` reply is a CSV block closed by `end`).

pub mod parser;
pub mod response;
pub mod session;

pub use parser::{parse_command, Command};
pub use response::{
    write_json, ErrorResponse, MoveResponse, MoveResult, SolveStepResponse, SolveSummaryResponse,
    ValidationResponse,
};
pub use session::{Flow, Session, HISTORY_END};
