//! Move validation and win detection.
//!
//! Checks run in a fixed order and the first failure wins: bounds, token
//! existence, straight-line movement, top-of-stack, then stacking
//! compatibility against the destination's current top token.

use crate::board::{Board, Color, Position};

/// Why a move was refused. The `Display` text is the user-facing reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum MoveRejection {
    #[error("Out of bounds")]
    OutOfBounds,

    #[error("Circle not found")]
    TokenNotFound,

    #[error("Diagonal movement not allowed")]
    NotStraight,

    #[error("Can only move the TOP circle")]
    NotOnTop,

    #[error("Cannot place anything on top of Red")]
    RedBelow,

    #[error("Only Red can be placed on Blue")]
    BlueBelow,
}

/// Checks whether the token `id` may move to `target`.
pub fn validate_move(board: &Board, id: &str, target: Position) -> Result<(), MoveRejection> {
    if !board.contains(target) {
        return Err(MoveRejection::OutOfBounds);
    }

    let (Some(from), Some(moving)) = (board.position_of(id), board.token(id)) else {
        return Err(MoveRejection::TokenNotFound);
    };

    if !from.is_straight_line_to(target) {
        return Err(MoveRejection::NotStraight);
    }

    if board.top(from).map(|t| t.id.as_str()) != Some(id) {
        return Err(MoveRejection::NotOnTop);
    }

    if let Some(below) = board.top(target) {
        check_support(below.color, moving.color)?;
    }

    Ok(())
}

/// Applies the stacking table for a token of color `above` landing on one of
/// color `below`.
pub fn check_support(below: Color, above: Color) -> Result<(), MoveRejection> {
    if below.supports(above) {
        return Ok(());
    }
    match below {
        Color::Red => Err(MoveRejection::RedBelow),
        Color::Blue => Err(MoveRejection::BlueBelow),
        Color::Green => Ok(()),
    }
}

/// Returns true if every token is in the rightmost column.
pub fn is_won(board: &Board) -> bool {
    board.all_in_column(board.cols() as i32 - 1)
}
