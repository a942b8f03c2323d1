//! Request handling for one text-protocol session.
//!
//! Each handler performs one engine operation and writes its reply to the
//! given writer. Malformed lines get an error reply and never reach the
//! engine.

use std::io::{self, Write};
use std::time::Duration;

use super::parser::{parse_command, Command};
use super::response::{
    write_json, ErrorResponse, MoveResponse, MoveResult, SolveStepResponse, SolveSummaryResponse,
    ValidationResponse,
};
use crate::board::{Direction, Position};
use crate::engine::Engine;
use crate::solve;

/// Line that terminates the CSV block of a `history` reply.
pub const HISTORY_END: &str = "end";

/// Whether the session loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the engine for the lifetime of a session.
pub struct Session {
    engine: Engine,
    solve_delay: Duration,
}

impl Session {
    pub fn new(engine: Engine, solve_delay: Duration) -> Self {
        Session {
            engine,
            solve_delay,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Parses and handles one input line.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        match parse_command(line) {
            Ok(Some(cmd)) => self.handle(cmd, out),
            Ok(None) => Ok(Flow::Continue),
            Err(e) => {
                log::warn!("rejected request '{}': {}", line.trim(), e);
                write_json(out, &ErrorResponse { error: e.to_string() })?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Dispatches a parsed command.
    pub fn handle<W: Write>(&mut self, cmd: Command, out: &mut W) -> io::Result<Flow> {
        match cmd {
            Command::State => self.handle_state(out)?,
            Command::Reset => {
                self.engine.reset();
                self.handle_state(out)?;
            }
            Command::Move { token, direction } => self.handle_move(token.as_str(), direction, out)?,
            Command::Validate { token, row, col } => {
                let verdict = self.engine.validate_move(token.as_str(), Position::new(row, col));
                write_json(out, &ValidationResponse::from(verdict))?;
            }
            Command::History => self.handle_history(out)?,
            Command::Solve => self.handle_solve(out)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn handle_state<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_json(out, &self.engine.describe_state())
    }

    fn handle_move<W: Write>(&mut self, id: &str, direction: Direction, out: &mut W) -> io::Result<()> {
        let outcome = self.engine.move_token(id, direction);
        if outcome.won() == Some(true) {
            log::info!("puzzle solved by moving {} {}", id, direction);
        }
        write_json(
            out,
            &MoveResponse {
                result: MoveResult::from(outcome),
                state: self.engine.describe_state(),
            },
        )
    }

    fn handle_history<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let csv = self.engine.export_history_csv();
        out.write_all(csv.as_bytes())?;
        if !csv.ends_with('\n') {
            out.write_all(b"\n")?;
        }
        writeln!(out, "{}", HISTORY_END)?;
        out.flush()
    }

    fn handle_solve<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let mut write_err = None;
        let summary = solve::replay(&mut self.engine, self.solve_delay, |i, step, outcome| {
            if write_err.is_some() {
                return;
            }
            let reply = SolveStepResponse {
                step: i + 1,
                circle_id: step.token.to_string(),
                direction: step.direction,
                result: MoveResult::from(*outcome),
            };
            if let Err(e) = write_json(out, &reply) {
                write_err = Some(e);
            }
        });
        if let Some(e) = write_err {
            return Err(e);
        }
        write_json(
            out,
            &SolveSummaryResponse {
                steps: summary.steps,
                rejected: summary.rejected,
                won: summary.won,
                state: self.engine.describe_state(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn session() -> Session {
        Session::new(Engine::new(), Duration::ZERO)
    }

    fn run(session: &mut Session, line: &str) -> (Flow, Vec<String>) {
        let mut out = Vec::new();
        let flow = session.handle_line(line, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        (flow, text.lines().map(str::to_string).collect())
    }

    fn json(line: &str) -> Value {
        serde_json::from_str(line).unwrap()
    }

    #[test]
    fn state_reports_grid_and_circles() {
        let mut s = session();
        let (flow, lines) = run(&mut s, "state");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(lines.len(), 1);
        let v = json(&lines[0]);
        assert_eq!(v["rows"], 5);
        assert_eq!(v["cols"], 3);
        assert_eq!(v["grid"][4][0][0], "c1");
        assert_eq!(v["circles"]["c1"]["color"], "Red");
        assert_eq!(v["circles"]["c1"]["id"], "c1");
    }

    #[test]
    fn move_replies_with_result_and_state() {
        let mut s = session();
        let (_, lines) = run(&mut s, "move c1 UP");
        let v = json(&lines[0]);
        assert_eq!(v["result"]["success"], true);
        assert_eq!(v["result"]["won"], false);
        assert_eq!(v["state"]["grid"][3][0][1], "c1");
    }

    #[test]
    fn rejected_move_is_not_an_error_reply() {
        let mut s = session();
        let (_, lines) = run(&mut s, "move c1 DOWN");
        let v = json(&lines[0]);
        assert!(v.get("error").is_none());
        assert_eq!(v["result"]["success"], false);
        assert_eq!(v["result"]["message"], "Out of bounds");
    }

    #[test]
    fn malformed_request_gets_error_and_skips_engine() {
        let mut s = session();
        let (flow, lines) = run(&mut s, "move c1");
        assert_eq!(flow, Flow::Continue);
        assert!(json(&lines[0])["error"].as_str().unwrap().contains("direction"));
        let (_, lines) = run(&mut s, "move c1 NORTH");
        assert!(json(&lines[0])["error"].as_str().unwrap().contains("NORTH"));
        assert!(s.engine().history().is_empty());
    }

    #[test]
    fn validate_does_not_record() {
        let mut s = session();
        let (_, lines) = run(&mut s, "validate c2 3 1");
        assert_eq!(
            json(&lines[0]),
            serde_json::json!({"valid": false, "message": "Cannot place anything on top of Red"})
        );
        assert!(s.engine().history().is_empty());
    }

    #[test]
    fn history_block_ends_with_marker() {
        let mut s = session();
        run(&mut s, "move c1 DOWN");
        run(&mut s, "move c1 UP");
        let (_, lines) = run(&mut s, "history");
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Timestamp,CircleID"));
        assert!(lines[1].contains(",false,\"Out of bounds\""));
        assert!(lines[2].contains(",true,\"\""));
        assert_eq!(lines[3], HISTORY_END);
    }

    #[test]
    fn reset_clears_history() {
        let mut s = session();
        run(&mut s, "move c1 UP");
        let (_, lines) = run(&mut s, "reset");
        assert_eq!(json(&lines[0])["grid"][4][0][0], "c1");
        assert!(s.engine().history().is_empty());
    }

    #[test]
    fn solve_streams_steps_then_summary() {
        let mut s = session();
        let (_, lines) = run(&mut s, "solve");
        assert_eq!(lines.len(), solve::SOLUTION.len() + 1);
        let first = json(&lines[0]);
        assert_eq!(first["step"], 1);
        assert_eq!(first["circleId"], "c3");
        assert_eq!(first["direction"], "LEFT");
        let summary = json(lines.last().unwrap());
        assert_eq!(summary["won"], true);
        assert_eq!(summary["rejected"], 0);
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut s = session();
        let (flow, lines) = run(&mut s, "quit");
        assert_eq!(flow, Flow::Quit);
        assert!(lines.is_empty());
    }

    #[test]
    fn blank_line_is_ignored() {
        let mut s = session();
        let (flow, lines) = run(&mut s, "   ");
        assert_eq!(flow, Flow::Continue);
        assert!(lines.is_empty());
    }
}
