//! # tour
//!
//! Warnsdorff's rule, one move at a time: from the knight's current square,
//! jump to the unvisited square that itself has the fewest unvisited onward
//! squares. Ties go to whichever comes first in `moves::KNIGHT_OFFSETS`.
//!
//! There is no backtracking. When the knight has nowhere left to go the tour
//! is simply stuck, and the partial path is the result. From a corner of the
//! 8x8 board this never happens, but from some squares it does (E6 is one).
//!
//! ```text
//!             step()                 step() fills the last square
//!  Running ----------> Running  ----------------------------------> Complete
//!     |                   |
//!     | cancel()          | step() finds no candidate
//!     v                   v
//!  Cancelled            Stuck
//! ```
use crate::board::{BoardState, Position};
use crate::error::TourError;
use crate::moves;
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourStatus {
    Running,
    Complete,
    Stuck,
    Cancelled,
}

/// What the knight did on one step, with copies of the board and path as
/// they stand afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    pub position: Position,
    pub path: Vec<Position>,
    pub board: BoardState,
    /// visit order of `position`; 0 is the start square
    pub step: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// the knight moved and there are still squares left
    Moved(StepResult),
    /// the knight moved onto the last unvisited square
    Complete(StepResult),
    /// no onward move; nothing was committed
    Stuck,
    /// the tour had already ended before this call
    Finished(TourStatus),
}

/// How a tour ended, with the path as far as it got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourOutcome {
    Complete(Vec<Position>),
    Stuck(Vec<Position>),
    Cancelled(Vec<Position>),
}

impl TourOutcome {
    pub fn path(&self) -> &[Position] {
        match self {
            TourOutcome::Complete(p) | TourOutcome::Stuck(p) | TourOutcome::Cancelled(p) => p,
        }
    }

    /// Some(true) for a full tour, Some(false) when stuck, and None for a
    /// cancelled tour, which never got a verdict
    pub fn success(&self) -> Option<bool> {
        match self {
            TourOutcome::Complete(_) => Some(true),
            TourOutcome::Stuck(_) => Some(false),
            TourOutcome::Cancelled(_) => None,
        }
    }
}

/// Owns the board and the growing path for a single tour.
#[derive(Debug, Clone)]
pub struct TourBuilder {
    board: BoardState,
    path: Vec<Position>,
    status: TourStatus,
}

impl TourBuilder {
    /// start a tour on an n x n board with the knight on `start`
    pub fn new(size: usize, start: Position) -> Result<Self, TourError> {
        let board = BoardState::initialize(size, start)?;
        // a 1x1 board is toured before the first move
        let status = if size * size == 1 {
            TourStatus::Complete
        } else {
            TourStatus::Running
        };
        info!(start = %start.algebraic(), size, "tour started");
        Ok(TourBuilder {
            board,
            path: vec![start],
            status,
        })
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn path(&self) -> &[Position] {
        &self.path
    }

    pub fn status(&self) -> TourStatus {
        self.status
    }

    /// where the knight is standing now
    pub fn tail(&self) -> Position {
        // path always holds at least the start square
        self.path[self.path.len() - 1]
    }

    /// the current state as a step result, e.g. for drawing the start square
    pub fn snapshot(&self) -> StepResult {
        StepResult {
            position: self.tail(),
            path: self.path.clone(),
            board: self.board.clone(),
            step: self.path.len() - 1,
        }
    }

    /// Make one Warnsdorff move.
    pub fn step(&mut self) -> Step {
        if self.status != TourStatus::Running {
            return Step::Finished(self.status);
        }

        let pos = self.tail();
        let candidates = moves::candidates(pos, &self.board);
        trace!(from = %pos.algebraic(), ?candidates, "candidates");

        let chosen = match moves::select(&candidates) {
            Some(c) => c,
            None => {
                self.status = TourStatus::Stuck;
                info!(
                    at = %pos.algebraic(),
                    visited = self.path.len(),
                    "tour stuck, no onward move"
                );
                return Step::Stuck;
            }
        };

        let order = self.path.len();
        self.board.commit(chosen.square, order);
        self.path.push(chosen.square);
        debug!(
            step = order,
            square = %chosen.square.algebraic(),
            degree = chosen.degree,
            choices = candidates.len(),
            "knight moved"
        );

        let size = self.board.size();
        if self.path.len() == size * size {
            self.status = TourStatus::Complete;
            info!(squares = self.path.len(), "tour complete");
            Step::Complete(self.snapshot())
        } else {
            Step::Moved(self.snapshot())
        }
    }

    /// Stop a running tour. A tour that has already finished keeps its
    /// status.
    pub fn cancel(&mut self) {
        if self.status == TourStatus::Running {
            self.status = TourStatus::Cancelled;
            info!(visited = self.path.len(), "tour cancelled");
        }
    }

    /// the result of the tour, once it has stopped running
    pub fn outcome(&self) -> Option<TourOutcome> {
        let path = self.path.clone();
        match self.status {
            TourStatus::Running => None,
            TourStatus::Complete => Some(TourOutcome::Complete(path)),
            TourStatus::Stuck => Some(TourOutcome::Stuck(path)),
            TourStatus::Cancelled => Some(TourOutcome::Cancelled(path)),
        }
    }
}

/// Run a whole tour with no playback at all.
pub fn solve(size: usize, start: Position) -> Result<TourOutcome, TourError> {
    let mut tour = TourBuilder::new(size, start)?;
    loop {
        if let Some(outcome) = tour.outcome() {
            return Ok(outcome);
        }
        tour.step();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BOARD_SIZE;
    use crate::moves::is_knight_move;
    use std::collections::HashSet;

    fn assert_valid_path(path: &[Position]) {
        let unique: HashSet<_> = path.iter().collect();
        assert_eq!(unique.len(), path.len(), "path revisits a square");
        for pair in path.windows(2) {
            assert!(
                is_knight_move(pair[0], pair[1]),
                "{:?} -> {:?} is not a knight move",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_a8_completes() -> Result<(), TourError> {
        let outcome = solve(BOARD_SIZE, Position::new(0, 0))?;
        assert_eq!(outcome.success(), Some(true));
        assert_eq!(outcome.path().len(), 64);
        assert_eq!(outcome.path()[0], Position::new(0, 0));
        assert_valid_path(outcome.path());
        Ok(())
    }

    #[test]
    fn test_a8_opening_moves() -> Result<(), TourError> {
        let outcome = solve(BOARD_SIZE, Position::new(0, 0))?;
        let opening: Vec<_> = outcome.path()[..6].iter().map(|p| p.algebraic()).collect();
        assert_eq!(opening, ["A8", "B6", "C8", "A7", "B5", "A3"]);
        assert_eq!(outcome.path()[63], Position::new(5, 6));
        Ok(())
    }

    #[test]
    fn test_board_matches_path() -> Result<(), TourError> {
        let mut tour = TourBuilder::new(BOARD_SIZE, Position::new(0, 0))?;
        while tour.status() == TourStatus::Running {
            tour.step();
        }
        for (i, pos) in tour.path().iter().enumerate() {
            assert_eq!(tour.board().order(*pos), Some(i));
        }
        assert_eq!(tour.board().visited_count(), 64);
        Ok(())
    }

    #[test]
    fn test_deterministic() -> Result<(), TourError> {
        for start in [Position::new(0, 0), Position::new(3, 3), Position::new(2, 4)] {
            assert_eq!(solve(BOARD_SIZE, start)?, solve(BOARD_SIZE, start)?);
        }
        Ok(())
    }

    #[test]
    fn test_e6_gets_stuck() -> Result<(), TourError> {
        let start: Position = "E6".parse()?;
        let outcome = solve(BOARD_SIZE, start)?;
        assert_eq!(outcome.success(), Some(false));
        assert_eq!(outcome.path().len(), 60);
        assert_eq!(outcome.path()[59], Position::new(3, 0));
        assert_valid_path(outcome.path());
        Ok(())
    }

    #[test]
    fn test_stuck_keeps_partial_path() -> Result<(), TourError> {
        let mut tour = TourBuilder::new(BOARD_SIZE, Position::new(2, 4))?;
        let mut last = tour.snapshot();
        loop {
            match tour.step() {
                Step::Moved(r) => last = r,
                Step::Stuck => break,
                other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(tour.status(), TourStatus::Stuck);
        assert_eq!(tour.path(), last.path.as_slice());
        assert_eq!(tour.board(), &last.board);
        // stuck is terminal
        assert_eq!(tour.step(), Step::Finished(TourStatus::Stuck));
        assert_eq!(tour.path().len(), 60);
        Ok(())
    }

    #[test]
    fn test_boxed_in_start_is_stuck_at_once() -> Result<(), TourError> {
        // every jump from the centre of a 3x3 board leaves the board
        let mut tour = TourBuilder::new(3, Position::new(1, 1))?;
        assert_eq!(tour.step(), Step::Stuck);
        assert_eq!(
            tour.outcome(),
            Some(TourOutcome::Stuck(vec![Position::new(1, 1)]))
        );
        Ok(())
    }

    #[test]
    fn test_small_board_stuck_before_centre() -> Result<(), TourError> {
        let outcome = solve(3, Position::new(0, 0))?;
        assert_eq!(outcome.success(), Some(false));
        assert_eq!(outcome.path().len(), 8);
        assert!(!outcome.path().contains(&Position::new(1, 1)));
        assert_valid_path(outcome.path());
        Ok(())
    }

    #[test]
    fn test_single_square_board_is_complete() -> Result<(), TourError> {
        let mut tour = TourBuilder::new(1, Position::new(0, 0))?;
        assert_eq!(tour.status(), TourStatus::Complete);
        assert_eq!(tour.step(), Step::Finished(TourStatus::Complete));
        Ok(())
    }

    #[test]
    fn test_step_results_count_up() -> Result<(), TourError> {
        let mut tour = TourBuilder::new(BOARD_SIZE, Position::new(0, 0))?;
        for expected in 1..=10 {
            match tour.step() {
                Step::Moved(r) => {
                    assert_eq!(r.step, expected);
                    assert_eq!(r.path.len(), expected + 1);
                    assert_eq!(r.position, r.path[expected]);
                    assert_eq!(r.board.order(r.position), Some(expected));
                }
                other => panic!("unexpected {:?}", other),
            }
        }
        Ok(())
    }

    #[test]
    fn test_last_step_is_complete() -> Result<(), TourError> {
        let mut tour = TourBuilder::new(BOARD_SIZE, Position::new(0, 0))?;
        let mut moved = 0;
        let last = loop {
            match tour.step() {
                Step::Moved(_) => moved += 1,
                Step::Complete(r) => break r,
                other => panic!("unexpected {:?}", other),
            }
        };
        assert_eq!(moved, 62);
        assert_eq!(last.step, 63);
        assert_eq!(tour.step(), Step::Finished(TourStatus::Complete));
        Ok(())
    }

    #[test]
    fn test_cancel_stops_tour() -> Result<(), TourError> {
        let mut tour = TourBuilder::new(BOARD_SIZE, Position::new(0, 0))?;
        for _ in 0..5 {
            tour.step();
        }
        tour.cancel();
        assert_eq!(tour.step(), Step::Finished(TourStatus::Cancelled));
        let outcome = tour.outcome().expect("cancelled tour has an outcome");
        assert_eq!(outcome.success(), None);
        assert_eq!(outcome.path().len(), 6);
        Ok(())
    }

    #[test]
    fn test_cancel_after_finish_is_ignored() -> Result<(), TourError> {
        let mut tour = TourBuilder::new(3, Position::new(1, 1))?;
        tour.step();
        tour.cancel();
        assert_eq!(tour.status(), TourStatus::Stuck);
        Ok(())
    }

    #[test]
    fn test_running_tour_has_no_outcome() -> Result<(), TourError> {
        let tour = TourBuilder::new(BOARD_SIZE, Position::new(0, 0))?;
        assert_eq!(tour.outcome(), None);
        assert_eq!(tour.snapshot().step, 0);
        Ok(())
    }

    #[test]
    fn test_invalid_start() {
        assert!(matches!(
            TourBuilder::new(BOARD_SIZE, Position::new(8, 0)),
            Err(TourError::InvalidStart { .. })
        ));
    }
}
