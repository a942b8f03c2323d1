//! Engine state management.
//!
//! Owns the board and the move history and exposes the operations the
//! request layer drives: initialize, describe, validate, move, and history
//! export. Every move attempt is validated, recorded, and only then applied.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use crate::board::{Board, BoardSnapshot, Direction, Position, TokenId};
use crate::config::EngineConfig;
use crate::error::LayoutError;
use crate::history::{History, MoveRecord};
use crate::layout::{default_layout, Placement, DEFAULT_COLS, DEFAULT_ROWS};
use crate::rules::{self, MoveRejection};

/// Result of a single `move` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The token moved. `won` reports the win condition after the move.
    Moved { won: bool },
    Rejected(MoveRejection),
}

impl MoveOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }

    /// Win flag for accepted moves; None for rejections.
    pub fn won(&self) -> Option<bool> {
        match self {
            MoveOutcome::Moved { won } => Some(*won),
            MoveOutcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<MoveRejection> {
        match self {
            MoveOutcome::Moved { .. } => None,
            MoveOutcome::Rejected(r) => Some(*r),
        }
    }
}

/// Holds the mutable state of one game.
#[derive(Debug, Clone)]
pub struct Engine {
    board: Board,
    history: History,
    /// Board produced by the starting layout; `reset` restores it.
    initial: Board,
}

impl Engine {
    /// Creates an engine on the default grid with the built-in layout.
    pub fn new() -> Self {
        let initial = match Board::from_layout(DEFAULT_ROWS, DEFAULT_COLS, &default_layout()) {
            Ok(board) => board,
            Err(e) => unreachable!("built-in layout does not fit the default grid: {}", e),
        };
        Engine {
            board: initial.clone(),
            history: History::new(),
            initial,
        }
    }

    /// Creates an engine with the configured dimensions and starting layout.
    pub fn with_config(config: &EngineConfig) -> Result<Self, LayoutError> {
        let initial = Board::from_layout(config.rows, config.cols, &config.starting_layout())?;
        Ok(Engine {
            board: initial.clone(),
            history: History::new(),
            initial,
        })
    }

    /// Replaces the board with `layout` and clears the history.
    ///
    /// Placements sharing a cell are stacked in order. Stacking rules are not
    /// checked. On error the previous state is kept.
    pub fn initialize(&mut self, layout: &[Placement]) -> Result<(), LayoutError> {
        let board = Board::from_layout(self.board.rows(), self.board.cols(), layout)?;
        log::debug!("initialized board with {} tokens", board.token_count());
        self.board = board;
        self.history.clear();
        Ok(())
    }

    /// Restores the starting layout and clears the history.
    pub fn reset(&mut self) {
        self.board = self.initial.clone();
        self.history.clear();
        log::info!("game reset");
    }

    /// Returns a snapshot of the grid, the token colors, and the dimensions.
    pub fn describe_state(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Checks whether `id` may move to `target` without changing anything.
    pub fn validate_move(&self, id: &str, target: Position) -> Result<(), MoveRejection> {
        rules::validate_move(&self.board, id, target)
    }

    /// Attempts to move `id` one step in `direction`.
    ///
    /// The attempt is always appended to the history. Rejected moves leave
    /// the board untouched.
    pub fn move_token(&mut self, id: &str, direction: Direction) -> MoveOutcome {
        let from = self.board.position_of(id);
        let to = from.map(|p| p.step(direction));

        let verdict = to
            .ok_or(MoveRejection::TokenNotFound)
            .and_then(|target| self.validate_move(id, target).map(|()| target));

        self.history.push(MoveRecord {
            token: TokenId::from(id),
            from,
            to,
            timestamp: Utc::now(),
            rejection: verdict.err(),
        });

        match verdict {
            Ok(target) => {
                let moved = self.board.relocate(id, target);
                debug_assert!(moved, "validated move of '{}' could not be applied", id);
                let won = self.is_won();
                log::debug!("{} moved {} to {} (won: {})", id, direction, target, won);
                MoveOutcome::Moved { won }
            }
            Err(rejection) => {
                log::debug!("{} {} rejected: {}", id, direction, rejection);
                MoveOutcome::Rejected(rejection)
            }
        }
    }

    /// Returns true if every token is in the rightmost column.
    pub fn is_won(&self) -> bool {
        rules::is_won(&self.board)
    }

    /// Serialises the move history as CSV.
    pub fn export_history_csv(&self) -> String {
        self.history.to_csv()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// An engine shared between threads.
///
/// Every operation takes the lock for its full duration, so concurrent
/// `move` and `initialize` calls are applied one at a time.
#[derive(Debug, Clone, Default)]
pub struct SharedEngine {
    inner: Arc<Mutex<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        SharedEngine {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Locks the engine. A poisoned lock is recovered: engine operations
    /// complete before any state is changed, so the state is still valid.
    pub fn lock(&self) -> MutexGuard<'_, Engine> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn initialize(&self, layout: &[Placement]) -> Result<(), LayoutError> {
        self.lock().initialize(layout)
    }

    pub fn reset(&self) {
        self.lock().reset()
    }

    pub fn describe_state(&self) -> BoardSnapshot {
        self.lock().describe_state()
    }

    pub fn move_token(&self, id: &str, direction: Direction) -> MoveOutcome {
        self.lock().move_token(id, direction)
    }

    pub fn export_history_csv(&self) -> String {
        self.lock().export_history_csv()
    }
}
