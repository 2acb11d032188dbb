//! Players and board coordinates.

use std::fmt;

/// One of the two colors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// The opposing color.
    pub fn other(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "black"),
            Player::White => write!(f, "white"),
        }
    }
}

/// A 1-based (row, col) coordinate.
///
/// A point knows its axis neighbors and diagonal corners by offset
/// arithmetic only; whether those fall on a board is decided by the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Self {
        debug_assert!(row >= 1 && col >= 1, "points are 1-based: ({row}, {col})");
        Self { row, col }
    }

    /// Axis neighbors in compass order: North, South, West, East.
    ///
    /// North/West may land on row or column 0, which is never on a board.
    #[inline]
    pub fn neighbors(self) -> [Point; 4] {
        [
            at(self.row - 1, self.col),
            at(self.row + 1, self.col),
            at(self.row, self.col - 1),
            at(self.row, self.col + 1),
        ]
    }

    /// Diagonal corners: NW, NE, SW, SE.
    #[inline]
    pub fn corners(self) -> [Point; 4] {
        [
            at(self.row - 1, self.col - 1),
            at(self.row - 1, self.col + 1),
            at(self.row + 1, self.col - 1),
            at(self.row + 1, self.col + 1),
        ]
    }
}

/// Unchecked constructor for offset points, which may sit on row or column 0.
const fn at(row: usize, col: usize) -> Point {
    Point { row, col }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
