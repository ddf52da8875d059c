use crate::board::Position;
use crate::tour::TourOutcome;
use std::io;

/// (1-based step number, square in chess notation) for every square on the path
pub fn transcript(path: &[Position]) -> Vec<(usize, String)> {
    path.iter()
        .enumerate()
        .map(|(i, pos)| (i + 1, pos.algebraic()))
        .collect()
}

/// Print how the tour went: every step of a completed tour, or a single line
/// for one that got stuck or was cancelled.
pub fn write_report(
    out: &mut impl io::Write,
    outcome: &TourOutcome,
    squares: usize,
) -> Result<(), io::Error> {
    match outcome {
        TourOutcome::Complete(path) => {
            writeln!(out, "Knight's Tour Completed!")?;
            for (step, square) in transcript(path) {
                writeln!(out, "Step {}: {}", step, square)?;
            }
        }
        TourOutcome::Stuck(_) => writeln!(out, "No solution found")?,
        TourOutcome::Cancelled(path) => writeln!(
            out,
            "Tour cancelled after {} of {} squares",
            path.len(),
            squares
        )?,
    }
    Ok(())
}
