//! Knight move generation for Warnsdorff's rule.
//!
//! The offset list below is walked in its declared order everywhere. That
//! order is what makes ties between equally-constrained squares resolve the
//! same way on every run, so it must never be shuffled or re-sorted.

use crate::board::{BoardState, Position};

/// (d_row, d_col) for the eight knight jumps
pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// An onward move the knight could make, with its Warnsdorff degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub square: Position,
    pub degree: usize,
}

/// true when `a` and `b` are exactly one knight jump apart
pub fn is_knight_move(a: Position, b: Position) -> bool {
    let dr = (a.row - b.row).abs();
    let dc = (a.col - b.col).abs();
    dr * dc == 2
}

/// squares a knight on `pos` could jump to, in offset order, whether or not
/// they are on the board
fn jumps(pos: Position) -> impl Iterator<Item = Position> {
    KNIGHT_OFFSETS
        .into_iter()
        .map(move |(dr, dc)| pos.offset(dr, dc))
}

/// Number of on-board, unvisited squares one knight jump from `pos`.
///
/// Computed against the board as it is now, never cached.
pub fn degree(pos: Position, board: &BoardState) -> usize {
    jumps(pos).filter(|&sq| board.is_unvisited(sq)).count()
}

/// Legal onward moves from `pos`, in offset order, each tagged with the
/// degree it would have if the knight moved there.
pub fn candidates(pos: Position, board: &BoardState) -> Vec<Candidate> {
    jumps(pos)
        .filter(|&sq| board.is_unvisited(sq))
        .map(|square| Candidate {
            square,
            degree: degree(square, board),
        })
        .collect()
}

/// The candidate with the fewest onward moves; the first one in offset order
/// wins a tie.
pub fn select(candidates: &[Candidate]) -> Option<Candidate> {
    // min_by_key returns the first of several equal minima
    candidates.iter().copied().min_by_key(|c| c.degree)
}
