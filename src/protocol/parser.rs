//! Command parser.
//!
//! Parses incoming request lines into structured `Command` variants that the
//! session loop dispatches on. Directions are checked here, so an unknown
//! direction never reaches the engine.

use crate::board::{Direction, TokenId};
use crate::error::CommandError;

/// A parsed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Report the current board.
    State,

    /// Restore the starting layout and clear the history.
    Reset,

    /// Move a token one step: `move <id> <direction>`.
    Move { token: TokenId, direction: Direction },

    /// Check a move without applying it: `validate <id> <row> <col>`.
    Validate { token: TokenId, row: i32, col: i32 },

    /// Dump the move history as CSV.
    History,

    /// Play the scripted solution from a fresh board.
    Solve,

    /// End the session.
    Quit,
}

/// Parses a single line of input.
///
/// Returns `Ok(None)` for blank lines. Keywords are matched case-insensitively;
/// token ids are taken verbatim.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(keyword) = tokens.first() else {
        return Ok(None);
    };

    let cmd = match keyword.to_ascii_lowercase().as_str() {
        "state" => Command::State,
        "reset" => Command::Reset,
        "history" => Command::History,
        "solve" => Command::Solve,
        "quit" => Command::Quit,
        "move" => parse_move(&tokens)?,
        "validate" => parse_validate(&tokens)?,
        _ => return Err(CommandError::UnknownCommand(keyword.to_string())),
    };
    Ok(Some(cmd))
}

/// Parses `move <id> <direction>`.
fn parse_move(tokens: &[&str]) -> Result<Command, CommandError> {
    let token = tokens.get(1).ok_or(CommandError::MissingArgument {
        command: "move",
        argument: "circle id",
    })?;
    let dir = tokens.get(2).ok_or(CommandError::MissingArgument {
        command: "move",
        argument: "direction",
    })?;
    let direction =
        Direction::from_name(dir).ok_or_else(|| CommandError::UnknownDirection(dir.to_string()))?;
    Ok(Command::Move {
        token: TokenId::from(*token),
        direction,
    })
}

/// Parses `validate <id> <row> <col>`.
fn parse_validate(tokens: &[&str]) -> Result<Command, CommandError> {
    let token = tokens.get(1).ok_or(CommandError::MissingArgument {
        command: "validate",
        argument: "circle id",
    })?;
    let row = parse_coordinate(tokens.get(2), "row")?;
    let col = parse_coordinate(tokens.get(3), "col")?;
    Ok(Command::Validate {
        token: TokenId::from(*token),
        row,
        col,
    })
}

fn parse_coordinate(raw: Option<&&str>, argument: &'static str) -> Result<i32, CommandError> {
    let raw = raw.ok_or(CommandError::MissingArgument {
        command: "validate",
        argument,
    })?;
    raw.parse::<i32>()
        .map_err(|_| CommandError::InvalidCoordinate(raw.to_string()))
}
