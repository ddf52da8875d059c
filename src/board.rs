use crate::error::TourError;
use std::str::FromStr;

/// the board the tour is played on; the playable program only ever uses this
pub const BOARD_SIZE: usize = 8;

/// A square, as (row, col) with row 0 at the top (rank 8) and col 0 on the
/// left (file A). Signed so that knight offsets can step off the board and be
/// checked afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    /// the square a (d_row, d_col) jump away, which may be off the board
    #[inline]
    pub fn offset(self, d_row: i32, d_col: i32) -> Self {
        Position::new(self.row + d_row, self.col + d_col)
    }

    /// light squares are (row + col) even, as on a real board where A8 is light
    pub fn is_light(self) -> bool {
        (self.row + self.col) % 2 == 0
    }

    /// chess notation on the 8x8 board: file letter A-H left to right, rank
    /// 1-8 bottom to top, so (0, 0) is "A8" and (7, 7) is "H1"
    pub fn algebraic(self) -> String {
        let file = (b'A' + self.col as u8) as char;
        format!("{}{}", file, BOARD_SIZE as i32 - self.row)
    }
}

impl FromStr for Position {
    type Err = TourError;

    /// parses "A8", "e6", ... into a board position
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TourError::InvalidSquare(s.to_string());
        let mut chars = s.trim().chars();
        let file = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
        let rank: i32 = chars.as_str().parse().map_err(|_| invalid())?;

        let size = BOARD_SIZE as i32;
        if !('A'..='H').contains(&file) || !(1..=size).contains(&rank) {
            return Err(invalid());
        }
        Ok(Position::new(size - rank, file as i32 - 'A' as i32))
    }
}

/// Occupancy grid for the tour. Each cell is either unvisited or holds the
/// 0-based order in which the knight landed on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    size: usize,
    cells: Vec<Option<usize>>,
}

impl BoardState {
    /// an n x n board with nothing visited yet
    pub fn empty(size: usize) -> Self {
        BoardState {
            size,
            cells: vec![None; size * size],
        }
    }

    /// a fresh board with the knight standing on `start` as visit 0
    pub fn initialize(size: usize, start: Position) -> Result<Self, TourError> {
        let mut board = BoardState::empty(size);
        if !board.is_inside(start) {
            return Err(TourError::InvalidStart {
                row: start.row,
                col: start.col,
                size,
            });
        }
        board.commit(start, 0);
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_inside(&self, pos: Position) -> bool {
        let n = self.size as i32;
        (0..n).contains(&pos.row) && (0..n).contains(&pos.col)
    }

    /// off-board squares count as not unvisited; they can never be landed on
    #[inline]
    pub fn is_unvisited(&self, pos: Position) -> bool {
        self.is_inside(pos) && self.cells[self.index(pos)].is_none()
    }

    /// the visit order of `pos`, if the knight has been there
    pub fn order(&self, pos: Position) -> Option<usize> {
        if self.is_inside(pos) {
            self.cells[self.index(pos)]
        } else {
            None
        }
    }

    /// record that the knight landed on `pos` as visit number `order`
    pub fn commit(&mut self, pos: Position, order: usize) {
        // the tour builder only ever offers in-board, unvisited squares
        assert!(self.is_inside(pos), "cannot commit off-board square {:?}", pos);
        assert!(
            self.is_unvisited(pos),
            "square {:?} is already visited",
            pos
        );
        let i = self.index(pos);
        self.cells[i] = Some(order);
    }

    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// every square on the board in row-major order
    pub fn squares(&self) -> impl Iterator<Item = Position> {
        let n = self.size as i32;
        (0..n).flat_map(move |row| (0..n).map(move |col| Position::new(row, col)))
    }

    fn index(&self, pos: Position) -> usize {
        pos.row as usize * self.size + pos.col as usize
    }
}
