//! Board representation.
//!
//! Contains the token, coordinate, and grid-of-stacks types the rule engine
//! operates on.

pub mod position;
pub mod state;
pub mod token;

pub use position::{Direction, Position, ALL_DIRECTIONS};
pub use state::{Board, BoardSnapshot};
pub use token::{Color, Token, TokenId, ALL_COLORS};
