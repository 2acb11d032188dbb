//! Zobrist hashing for board positions.
//!
//! Every (point, occupant) pair gets a fixed pseudo-random 64-bit value. The
//! hash of a board is the XOR of the values for the occupant of every point,
//! empty points included, so placing or removing a stone is two XORs.
//!
//! The table is built once per process from [`ZOBRIST_SEED`] and is
//! read-only afterwards.

use std::sync::LazyLock;

use crate::constants::{MAX_BOARD_SIZE, OCCUPANT_STATES, ZOBRIST_SEED};
use crate::point::{Player, Point};

/// Random values indexed by `[row - 1][col - 1][occupant]`.
pub struct ZobristTable {
    values: [[[u64; OCCUPANT_STATES]; MAX_BOARD_SIZE]; MAX_BOARD_SIZE],
}

impl ZobristTable {
    fn new(seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut values = [[[0u64; OCCUPANT_STATES]; MAX_BOARD_SIZE]; MAX_BOARD_SIZE];
        for row in values.iter_mut() {
            for cell in row.iter_mut() {
                for v in cell.iter_mut() {
                    *v = rng.u64(..);
                }
            }
        }
        Self { values }
    }

    /// Value for `occupant` (`None` = empty) at `point`.
    #[inline]
    pub fn value(&self, point: Point, occupant: Option<Player>) -> u64 {
        let state = match occupant {
            None => 0,
            Some(Player::Black) => 1,
            Some(Player::White) => 2,
        };
        self.values[point.row - 1][point.col - 1][state]
    }

    /// Hash of an empty `rows` x `cols` board.
    pub fn empty_board(&self, rows: usize, cols: usize) -> u64 {
        let mut h = 0u64;
        for row in 1..=rows {
            for col in 1..=cols {
                h ^= self.value(Point::new(row, col), None);
            }
        }
        h
    }
}

static TABLE: LazyLock<ZobristTable> = LazyLock::new(|| ZobristTable::new(ZOBRIST_SEED));

/// The process-wide table.
pub fn table() -> &'static ZobristTable {
    &TABLE
}

/// Shorthand for `table().value(point, occupant)`.
#[inline]
pub fn hash_of(point: Point, occupant: Option<Player>) -> u64 {
    TABLE.value(point, occupant)
}
