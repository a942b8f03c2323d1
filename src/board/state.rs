//! Board state representation.
//!
//! The board is a dense grid of stacks. Each cell holds token ids from
//! bottom to top; a token's height is its index in that stack. A registry
//! maps ids to tokens and a parallel map records which cell holds each id.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use super::position::Position;
use super::token::{Color, Token, TokenId};
use crate::error::LayoutError;
use crate::layout::Placement;

/// A grid of token stacks plus the token registry and position map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Row-major cells; each is a stack ordered bottom to top.
    cells: Vec<Vec<TokenId>>,
    tokens: BTreeMap<TokenId, Token>,
    positions: HashMap<TokenId, Position>,
}

/// Read-only copy of the board, in the shape the protocol sends out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    /// `grid[row][col]` is the stack at that cell, bottom first.
    pub grid: Vec<Vec<Vec<TokenId>>>,
    pub circles: BTreeMap<TokenId, Token>,
    pub rows: usize,
    pub cols: usize,
}

impl Board {
    /// Creates a board of the given size with no tokens.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Board {
            rows,
            cols,
            cells: vec![Vec::new(); rows * cols],
            tokens: BTreeMap::new(),
            positions: HashMap::new(),
        }
    }

    /// Builds a board by pushing each placement onto its cell in order.
    ///
    /// Stacking rules are not checked. Fails if a placement lies outside the
    /// grid or reuses an id.
    pub fn from_layout(rows: usize, cols: usize, layout: &[Placement]) -> Result<Self, LayoutError> {
        let mut board = Board::empty(rows, cols);
        for p in layout {
            board.place(p.id.clone(), p.color, p.position())?;
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns true if `pos` lies inside the grid.
    pub fn contains(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    fn index(&self, pos: Position) -> Option<usize> {
        let row = usize::try_from(pos.row).ok()?;
        let col = usize::try_from(pos.col).ok()?;
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    /// Pushes a new token onto the stack at `pos`.
    pub fn place(&mut self, id: TokenId, color: Color, pos: Position) -> Result<(), LayoutError> {
        let idx = self.index(pos).ok_or_else(|| LayoutError::OutOfBounds {
            id: id.clone(),
            position: pos,
            rows: self.rows,
            cols: self.cols,
        })?;
        if self.tokens.contains_key(&id) {
            return Err(LayoutError::DuplicateId(id));
        }
        self.cells[idx].push(id.clone());
        self.positions.insert(id.clone(), pos);
        self.tokens.insert(id.clone(), Token { id, color });
        Ok(())
    }

    /// Returns the stack at `pos`, bottom first, or None outside the grid.
    pub fn stack(&self, pos: Position) -> Option<&[TokenId]> {
        self.index(pos).map(|idx| self.cells[idx].as_slice())
    }

    /// Returns the topmost token at `pos`, if any.
    pub fn top(&self, pos: Position) -> Option<&Token> {
        let id = self.stack(pos)?.last()?;
        self.tokens.get(id)
    }

    pub fn token(&self, id: &str) -> Option<&Token> {
        self.tokens.get(id)
    }

    pub fn position_of(&self, id: &str) -> Option<Position> {
        self.positions.get(id).copied()
    }

    /// Returns the index of the token within its cell's stack (0 = bottom).
    pub fn height_of(&self, id: &str) -> Option<usize> {
        let pos = self.position_of(id)?;
        self.stack(pos)?.iter().position(|t| t.as_str() == id)
    }

    /// Iterates over all registered tokens in id order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if every token sits in column `col`.
    pub fn all_in_column(&self, col: i32) -> bool {
        self.positions.values().all(|p| p.col == col)
    }

    /// Moves the top token of its cell onto the stack at `to`.
    ///
    /// Returns false and leaves the board unchanged if the token is unknown,
    /// not on top of its stack, or `to` is outside the grid.
    pub(crate) fn relocate(&mut self, id: &str, to: Position) -> bool {
        let (Some(from), Some(to_idx)) = (self.position_of(id), self.index(to)) else {
            return false;
        };
        let Some(from_idx) = self.index(from) else {
            return false;
        };
        if self.cells[from_idx].last().map(TokenId::as_str) != Some(id) {
            return false;
        }
        let Some(token) = self.cells[from_idx].pop() else {
            return false;
        };
        self.cells[to_idx].push(token.clone());
        self.positions.insert(token, to);
        true
    }

    /// Checks that the grid and the position map agree: every registered id
    /// appears exactly once, in the cell its position entry names, and no
    /// cell holds an unregistered id.
    pub fn is_consistent(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.tokens.len());
        for (idx, stack) in self.cells.iter().enumerate() {
            let pos = Position::new((idx / self.cols) as i32, (idx % self.cols) as i32);
            for id in stack {
                if !self.tokens.contains_key(id) || self.positions.get(id) != Some(&pos) {
                    return false;
                }
                if !seen.insert(id) {
                    return false;
                }
            }
        }
        seen.len() == self.tokens.len() && self.positions.len() == self.tokens.len()
    }

    /// Returns a serialisable copy of the grid and registry.
    pub fn snapshot(&self) -> BoardSnapshot {
        let grid = if self.cols == 0 {
            vec![Vec::new(); self.rows]
        } else {
            self.cells
                .chunks(self.cols)
                .map(|row| row.to_vec())
                .collect()
        };
        BoardSnapshot {
            grid,
            circles: self.tokens.clone(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(id: &str, color: Color, row: i32, col: i32) -> Placement {
        Placement::new(id, color, row, col)
    }

    #[test]
    fn empty_board_has_no_tokens() {
        let board = Board::empty(5, 3);
        assert_eq!(board.token_count(), 0);
        assert_eq!(board.stack(Position::new(4, 2)), Some(&[][..]));
        assert!(board.is_consistent());
    }

    #[test]
    fn contains_rejects_negative_and_overflow() {
        let board = Board::empty(5, 3);
        assert!(board.contains(Position::new(0, 0)));
        assert!(board.contains(Position::new(4, 2)));
        assert!(!board.contains(Position::new(-1, 0)));
        assert!(!board.contains(Position::new(0, -1)));
        assert!(!board.contains(Position::new(5, 0)));
        assert!(!board.contains(Position::new(0, 3)));
    }

    #[test]
    fn layout_order_decides_stack_order() {
        let board = Board::from_layout(
            5,
            3,
            &[
                placement("g", Color::Green, 4, 0),
                placement("b", Color::Blue, 4, 0),
                placement("r", Color::Red, 4, 0),
            ],
        )
        .unwrap();
        let stack: Vec<&str> = board
            .stack(Position::new(4, 0))
            .unwrap()
            .iter()
            .map(TokenId::as_str)
            .collect();
        assert_eq!(stack, ["g", "b", "r"]);
        assert_eq!(board.top(Position::new(4, 0)).unwrap().color, Color::Red);
        assert_eq!(board.height_of("g"), Some(0));
        assert_eq!(board.height_of("r"), Some(2));
        assert!(board.is_consistent());
    }

    #[test]
    fn place_rejects_out_of_bounds() {
        let err = Board::from_layout(5, 3, &[placement("x", Color::Red, 5, 0)]).unwrap_err();
        assert!(matches!(err, LayoutError::OutOfBounds { .. }));
    }

    #[test]
    fn place_rejects_duplicate_id() {
        let err = Board::from_layout(
            5,
            3,
            &[
                placement("x", Color::Red, 0, 0),
                placement("x", Color::Blue, 1, 1),
            ],
        )
        .unwrap_err();
        assert_eq!(err, LayoutError::DuplicateId(TokenId::from("x")));
    }

    #[test]
    fn relocate_moves_only_top_token() {
        let mut board = Board::from_layout(
            5,
            3,
            &[
                placement("g", Color::Green, 4, 0),
                placement("r", Color::Red, 4, 0),
            ],
        )
        .unwrap();
        assert!(!board.relocate("g", Position::new(4, 1)));
        assert!(board.relocate("r", Position::new(4, 1)));
        assert_eq!(board.position_of("r"), Some(Position::new(4, 1)));
        assert_eq!(board.top(Position::new(4, 0)).unwrap().id.as_str(), "g");
        assert!(!board.relocate("r", Position::new(4, 3)));
        assert!(!board.relocate("missing", Position::new(0, 0)));
        assert!(board.is_consistent());
    }

    #[test]
    fn duplicate_id_hiding_a_missing_token_is_inconsistent() {
        let mut board = Board::from_layout(
            2,
            2,
            &[
                placement("a", Color::Green, 0, 0),
                placement("b", Color::Red, 1, 1),
            ],
        )
        .unwrap();
        assert!(board.is_consistent());

        board.cells[0].push(TokenId::from("a"));
        board.cells[3].clear();
        assert!(!board.is_consistent());
    }

    #[test]
    fn snapshot_shapes_grid_by_rows() {
        let board = Board::from_layout(2, 3, &[placement("c1", Color::Blue, 1, 2)]).unwrap();
        let snap = board.snapshot();
        assert_eq!(snap.rows, 2);
        assert_eq!(snap.cols, 3);
        assert_eq!(snap.grid.len(), 2);
        assert!(snap.grid.iter().all(|row| row.len() == 3));
        assert_eq!(snap.grid[1][2], vec![TokenId::from("c1")]);
        assert_eq!(snap.circles[&TokenId::from("c1")].color, Color::Blue);
    }

    #[test]
    fn all_in_column() {
        let board = Board::from_layout(
            5,
            3,
            &[
                placement("a", Color::Green, 0, 2),
                placement("b", Color::Red, 4, 2),
            ],
        )
        .unwrap();
        assert!(board.all_in_column(2));
        assert!(!board.all_in_column(1));
    }
}
