//! Scripted solution replay.
//!
//! Plays a fixed, pre-computed move list for the built-in layout through the
//! ordinary `move` operation. There is no search: on any other layout the
//! script simply produces rejected moves.

use std::thread;
use std::time::Duration;

use crate::board::Direction;
use crate::engine::{Engine, MoveOutcome};

/// One scripted step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolutionStep {
    pub token: &'static str,
    pub direction: Direction,
}

const fn step(token: &'static str, direction: Direction) -> SolutionStep {
    SolutionStep { token, direction }
}

/// Winning 23-move sequence for the built-in layout. Builds three
/// Green-Blue-Red stacks in the right column, bottom row first.
pub const SOLUTION: [SolutionStep; 23] = {
    use Direction::{Down, Left, Right, Up};
    [
        step("c3", Left),
        step("c6", Down),
        step("c9", Left),
        step("c9", Left),
        step("c8", Right),
        step("c9", Down),
        step("c7", Right),
        step("c7", Right),
        step("c9", Up),
        step("c9", Right),
        step("c9", Right),
        step("c3", Right),
        step("c1", Right),
        step("c1", Right),
        step("c5", Left),
        step("c2", Up),
        step("c2", Right),
        step("c5", Down),
        step("c5", Right),
        step("c4", Right),
        step("c4", Right),
        step("c5", Up),
        step("c5", Right),
    ]
};

/// Totals from a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaySummary {
    pub steps: usize,
    pub rejected: usize,
    pub won: bool,
}

/// Resets the engine and plays [`SOLUTION`], pausing `delay` between steps.
///
/// `on_step` sees each step's index, the step, and its outcome. Rejected
/// steps are counted and the script carries on.
pub fn replay<F>(engine: &mut Engine, delay: Duration, mut on_step: F) -> ReplaySummary
where
    F: FnMut(usize, &SolutionStep, &MoveOutcome),
{
    engine.reset();
    let mut summary = ReplaySummary::default();

    for (i, s) in SOLUTION.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            thread::sleep(delay);
        }
        let outcome = engine.move_token(s.token, s.direction);
        if let MoveOutcome::Rejected(reason) = outcome {
            log::warn!("scripted step {} ({} {}) rejected: {}", i + 1, s.token, s.direction, reason);
            summary.rejected += 1;
        }
        summary.steps += 1;
        summary.won = engine.is_won();
        on_step(i, s, &outcome);
    }

    log::info!(
        "replayed {} steps, {} rejected, won: {}",
        summary.steps,
        summary.rejected,
        summary.won
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Position};
    use crate::layout::Placement;

    #[test]
    fn solution_wins_from_default_layout() {
        let mut engine = Engine::new();
        let mut wins = Vec::new();
        let summary = replay(&mut engine, Duration::ZERO, |_, _, outcome| {
            assert!(outcome.is_success(), "{:?}", outcome);
            wins.push(outcome.won() == Some(true));
        });

        assert_eq!(summary.steps, SOLUTION.len());
        assert_eq!(summary.rejected, 0);
        assert!(summary.won);
        assert_eq!(wins.iter().filter(|w| **w).count(), 1);
        assert_eq!(wins.last(), Some(&true));
        assert_eq!(engine.history().len(), SOLUTION.len());
    }

    #[test]
    fn solution_builds_green_blue_red_stacks() {
        let mut engine = Engine::new();
        replay(&mut engine, Duration::ZERO, |_, _, _| {});
        let board = engine.board();
        for row in 2..5 {
            let colors: Vec<Color> = board
                .stack(Position::new(row, 2))
                .unwrap()
                .iter()
                .map(|id| board.token(id.as_str()).unwrap().color)
                .collect();
            assert_eq!(colors, [Color::Green, Color::Blue, Color::Red], "row {}", row);
        }
    }

    #[test]
    fn replay_resets_first() {
        let mut engine = Engine::new();
        engine.move_token("c1", Direction::Up);
        let summary = replay(&mut engine, Duration::ZERO, |_, _, _| {});
        assert!(summary.won);
        assert_eq!(engine.history().len(), SOLUTION.len());
    }

    #[test]
    fn replay_on_foreign_layout_counts_rejections() {
        let config = crate::config::EngineConfig {
            layout: Some(vec![Placement::new("c1", Color::Green, 0, 0)]),
            ..Default::default()
        };
        let mut engine = Engine::with_config(&config).unwrap();
        let summary = replay(&mut engine, Duration::ZERO, |_, _, _| {});
        assert_eq!(summary.steps, SOLUTION.len());
        assert!(summary.rejected > 0);
        // Only c1's two Right steps apply.
        assert_eq!(summary.rejected, SOLUTION.len() - 2);
        assert_eq!(engine.board().position_of("c1"), Some(Position::new(0, 2)));
    }
}
