//! JSON response payloads.
//!
//! Each response is a single line of JSON. Rule rejections are ordinary
//! move results with `success: false`; only malformed requests produce an
//! `error` payload.

use std::io::{self, Write};

use serde::Serialize;

use crate::board::{BoardSnapshot, Direction};
use crate::engine::MoveOutcome;
use crate::rules::MoveRejection;

/// Outcome of a move as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub won: Option<bool>,
}

impl From<MoveOutcome> for MoveResult {
    fn from(outcome: MoveOutcome) -> Self {
        MoveResult {
            success: outcome.is_success(),
            message: outcome.rejection().map(|r| r.to_string()),
            won: outcome.won(),
        }
    }
}

/// Reply to `move`: the result plus the board after it.
#[derive(Debug, Clone, Serialize)]
pub struct MoveResponse {
    pub result: MoveResult,
    pub state: BoardSnapshot,
}

/// Reply to `validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<Result<(), MoveRejection>> for ValidationResponse {
    fn from(verdict: Result<(), MoveRejection>) -> Self {
        ValidationResponse {
            valid: verdict.is_ok(),
            message: verdict.err().map(|r| r.to_string()),
        }
    }
}

/// One line per scripted step during `solve`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveStepResponse {
    pub step: usize,
    pub circle_id: String,
    pub direction: Direction,
    pub result: MoveResult,
}

/// Final line of `solve`.
#[derive(Debug, Clone, Serialize)]
pub struct SolveSummaryResponse {
    pub steps: usize,
    pub rejected: usize,
    pub won: bool,
    pub state: BoardSnapshot,
}

/// Reply to a request that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Writes `value` as one line of JSON and flushes.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    out.write_all(b"\n")?;
    out.flush()
}
