//! Random self-play on a [`Board`].
//!
//! A playout alternates colors, starting with Black, and plays uniformly
//! random moves that are neither self-capture nor filling one of the
//! mover's own eyes. A player with no such move passes; two passes in a row
//! or the move limit end the game. There is no ko rule at this layer, so
//! the move limit is what guarantees termination.

use crate::board::{Board, InvariantError};
use crate::point::{Player, Point};

/// Summary of one finished playout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayoutStats {
    /// Stones placed.
    pub moves: usize,
    pub passes: usize,
    /// Stones removed by captures.
    pub captures: usize,
    pub black_stones: usize,
    pub white_stones: usize,
    pub final_hash: u64,
}

/// Check if a point is "eyeish": every on-board neighbor is a `player` stone.
pub fn is_eyeish(board: &Board, player: Player, point: Point) -> bool {
    board
        .neighbors(point)
        .iter()
        .all(|&n| board.player_at(n) == Some(player))
}

/// Check if a point is a true eye for `player`.
///
/// An eyeish point is a true eye unless too many diagonals hold opponent
/// stones: one is tolerated at the edge, none in the center.
pub fn is_eye(board: &Board, player: Player, point: Point) -> bool {
    if !is_eyeish(board, player, point) {
        return false;
    }
    let corners = board.corners(point);
    let at_edge = corners.len() < 4;
    let false_count = corners
        .iter()
        .filter(|&&c| board.player_at(c) == Some(player.other()))
        .count();
    let tolerance = if at_edge { 1 } else { 0 };
    false_count <= tolerance
}

/// Choose a random move for `player`, or `None` to pass.
///
/// Scans the board from a random starting index so every candidate has a
/// fair chance.
pub fn choose_random_move(
    board: &Board,
    player: Player,
    rng: &mut fastrand::Rng,
) -> Option<Point> {
    let (rows, cols) = (board.rows(), board.cols());
    let area = rows * cols;
    let start = rng.usize(..area);
    (0..area)
        .map(|i| {
            let idx = (start + i) % area;
            Point::new(idx / cols + 1, idx % cols + 1)
        })
        .find(|&pt| {
            board.player_at(pt).is_none()
                && !is_eye(board, player, pt)
                && !board.is_self_capture(player, pt)
        })
}

/// Play random moves on `board` until two consecutive passes or
/// `max_moves` placements.
///
/// With `check` set, board invariants are validated after every move and
/// the first violation is returned.
pub fn play_random_game(
    board: &mut Board,
    rng: &mut fastrand::Rng,
    max_moves: usize,
    check: bool,
) -> Result<PlayoutStats, InvariantError> {
    let mut stats = PlayoutStats::default();
    let mut player = Player::Black;
    let mut consecutive_passes = 0;

    while consecutive_passes < 2 && stats.moves < max_moves {
        match choose_random_move(board, player, rng) {
            Some(pt) => {
                let placement = board
                    .place_stone(player, pt)
                    .expect("random candidates are empty points");
                stats.captures += placement.captures();
                stats.moves += 1;
                consecutive_passes = 0;
            }
            None => {
                stats.passes += 1;
                consecutive_passes += 1;
            }
        }
        if check {
            board.assert_valid()?;
        }
        player = player.other();
    }

    for group in board.groups() {
        match group.owner() {
            Player::Black => stats.black_stones += group.len(),
            Player::White => stats.white_stones += group.len(),
        }
    }
    stats.final_hash = board.hash();
    Ok(stats)
}
