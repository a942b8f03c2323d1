//! Starting layouts.
//!
//! A layout is an ordered list of placements. Order matters: placements that
//! share a cell are stacked in the order given, first at the bottom.

use serde::{Deserialize, Serialize};

use crate::board::{Color, Position, TokenId};

/// Default grid height.
pub const DEFAULT_ROWS: usize = 5;

/// Default grid width. The goal column is `DEFAULT_COLS - 1`.
pub const DEFAULT_COLS: usize = 3;

/// One token placement: `(id, color, row, col)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub id: TokenId,
    pub color: Color,
    pub row: i32,
    pub col: i32,
}

impl Placement {
    pub fn new(id: &str, color: Color, row: i32, col: i32) -> Self {
        Placement {
            id: TokenId::from(id),
            color,
            row,
            col,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

/// The canonical starting layout: a 3x3 block in the bottom three rows of
/// the default grid, one token per cell, leaving rows 0 and 1 empty.
///
/// ```text
/// row 2:  c7 Blue   c8 Green  c9 Red
/// row 3:  c4 Blue   c5 Red    c6 Green
/// row 4:  c1 Red    c2 Green  c3 Blue
/// ```
pub fn default_layout() -> Vec<Placement> {
    use Color::{Blue, Green, Red};
    vec![
        Placement::new("c1", Red, 4, 0),
        Placement::new("c2", Green, 4, 1),
        Placement::new("c3", Blue, 4, 2),
        Placement::new("c4", Blue, 3, 0),
        Placement::new("c5", Red, 3, 1),
        Placement::new("c6", Green, 3, 2),
        Placement::new("c7", Blue, 2, 0),
        Placement::new("c8", Green, 2, 1),
        Placement::new("c9", Red, 2, 2),
    ]
}
