//! Grid coordinates and movement directions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A (row, col) coordinate, 0-indexed from the top-left cell.
///
/// Coordinates are signed so that a target computed one step past the grid
/// edge can still be represented and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    /// Returns the neighbouring coordinate one step in `direction`.
    pub const fn step(self, direction: Direction) -> Position {
        let (dr, dc) = direction.delta();
        Position {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// Returns true if exactly one of row and column differs from `other`.
    pub const fn is_straight_line_to(self, other: Position) -> bool {
        (self.row == other.row) != (self.col == other.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four orthogonal move directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    /// Returns the (row, col) unit delta. Up decreases the row.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Returns the wire name (`UP`, `DOWN`, `LEFT`, `RIGHT`).
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }

    /// Parses a direction from its wire name, ignoring case.
    pub fn from_name(name: &str) -> Option<Direction> {
        ALL_DIRECTIONS
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
