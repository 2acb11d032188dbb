//! Board state: stone placement, groups, liberties, captures, hashing.
//!
//! Every occupied point maps to the shared [`Group`] it belongs to. Groups
//! are immutable, so an update builds a new group and writes it back for
//! each of its stones. Liberties are maintained incrementally; nothing here
//! flood-fills the board on a move.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::adjacency::{AdjacencyCache, AdjacencyTable};
use crate::constants::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::group::Group;
use crate::point::{Player, Point};
use crate::zobrist;

/// Why a placement was rejected. The board is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceError {
    #[error("point {point} is already occupied by {owner}")]
    Occupied { point: Point, owner: Player },
}

/// Outcome of a successful placement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    /// Points cleared by captures, in removal order.
    pub captured: Vec<Point>,
}

impl Placement {
    pub fn captures(&self) -> usize {
        self.captured.len()
    }
}

/// A broken board invariant, reported by [`Board::assert_valid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("stone at {0} is off the board")]
    OffBoard(Point),
    #[error("stone at {0} is not a member of the group stored for it")]
    NotInOwnGroup(Point),
    #[error("stone at {0} is mapped to a different group than its siblings")]
    StaleGroup(Point),
    #[error("adjacent {owner} stones at {a} and {b} belong to different groups")]
    Unmerged { owner: Player, a: Point, b: Point },
    #[error("group containing {0} is not connected")]
    Disconnected(Point),
    #[error("group containing {at} has liberties {actual:?}, expected {expected:?}")]
    Liberties {
        at: Point,
        actual: Vec<Point>,
        expected: Vec<Point>,
    },
    #[error("stored hash {stored:#018x} differs from recomputed {recomputed:#018x}")]
    Hash { stored: u64, recomputed: u64 },
}

/// What sits next to a candidate point, from the mover's perspective.
enum NeighborState {
    Empty,
    Friendly(Arc<Group>),
    Hostile(Arc<Group>),
}

/// A rectangular Go board.
#[derive(Clone, Debug)]
pub struct Board {
    rows: usize,
    cols: usize,
    grid: HashMap<Point, Arc<Group>>,
    hash: u64,
    table: Arc<AdjacencyTable>,
}

impl Board {
    /// An empty `rows` x `cols` board using the process-wide adjacency cache.
    ///
    /// # Panics
    ///
    /// If either side is outside `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_cache(rows, cols, AdjacencyCache::global())
    }

    /// An empty board whose adjacency table comes from `cache`.
    pub fn with_cache(rows: usize, cols: usize, cache: &AdjacencyCache) -> Self {
        let sizes = MIN_BOARD_SIZE..=MAX_BOARD_SIZE;
        assert!(
            sizes.contains(&rows) && sizes.contains(&cols),
            "unsupported board size {rows}x{cols}"
        );
        let table = cache.table(rows, cols);
        debug_assert_eq!((table.rows(), table.cols()), (rows, cols));
        Self {
            rows,
            cols,
            grid: HashMap::new(),
            hash: zobrist::table().empty_board(rows, cols),
            table,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_on_grid(&self, point: Point) -> bool {
        (1..=self.rows).contains(&point.row) && (1..=self.cols).contains(&point.col)
    }

    fn check_on_grid(&self, point: Point) {
        assert!(
            self.is_on_grid(point),
            "point {point} is off the {}x{} board",
            self.rows,
            self.cols
        );
    }

    /// Color of the stone at `point`, if any.
    pub fn player_at(&self, point: Point) -> Option<Player> {
        self.check_on_grid(point);
        self.grid.get(&point).map(|g| g.owner())
    }

    /// The group occupying `point`, if any.
    pub fn group_at(&self, point: Point) -> Option<&Group> {
        self.check_on_grid(point);
        self.grid.get(&point).map(Arc::as_ref)
    }

    /// On-board neighbors of `point` in North, South, West, East order.
    pub fn neighbors(&self, point: Point) -> &[Point] {
        self.check_on_grid(point);
        self.table.neighbors_of(point)
    }

    /// On-board diagonal corners of `point` in NW, NE, SW, SE order.
    pub fn corners(&self, point: Point) -> &[Point] {
        self.check_on_grid(point);
        self.table.corners_of(point)
    }

    /// Current Zobrist hash of the whole board.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Number of stones on the board.
    pub fn stone_count(&self) -> usize {
        self.grid.len()
    }

    /// Every distinct group on the board, in no particular order.
    pub fn groups(&self) -> Vec<&Group> {
        let mut seen = HashSet::new();
        self.grid
            .values()
            .filter(|g| seen.insert(Arc::as_ptr(*g)))
            .map(Arc::as_ref)
            .collect()
    }

    fn classify(&self, player: Player, neighbor: Point) -> NeighborState {
        match self.grid.get(&neighbor) {
            None => NeighborState::Empty,
            Some(g) if g.owner() == player => NeighborState::Friendly(Arc::clone(g)),
            Some(g) => NeighborState::Hostile(Arc::clone(g)),
        }
    }

    /// Place a stone for `player` at `point`, resolving merges and captures.
    ///
    /// A placement that leaves the new group without liberties still
    /// succeeds; use [`Board::is_self_capture`] first if that matters.
    ///
    /// # Errors
    ///
    /// [`PlaceError::Occupied`] if a stone is already there. Nothing changes.
    ///
    /// # Panics
    ///
    /// If `point` is off the board.
    pub fn place_stone(&mut self, player: Player, point: Point) -> Result<Placement, PlaceError> {
        self.check_on_grid(point);
        if let Some(existing) = self.grid.get(&point) {
            let owner = existing.owner();
            warn!(%point, %player, %owner, "illegal placement on occupied point");
            return Err(PlaceError::Occupied { point, owner });
        }

        // Scan first, mutate after.
        let table = Arc::clone(&self.table);
        let mut liberties = Vec::with_capacity(4);
        let mut friendly: Vec<Arc<Group>> = Vec::new();
        let mut hostile: Vec<Arc<Group>> = Vec::new();
        for &neighbor in table.neighbors_of(point) {
            match self.classify(player, neighbor) {
                NeighborState::Empty => liberties.push(neighbor),
                NeighborState::Friendly(g) => push_unique(&mut friendly, g),
                NeighborState::Hostile(g) => push_unique(&mut hostile, g),
            }
        }

        let merged = friendly
            .iter()
            .fold(Group::singleton(player, point, liberties), |acc, g| acc.merged_with(g));
        self.replace_group(merged);

        self.hash ^= zobrist::hash_of(point, None) ^ zobrist::hash_of(point, Some(player));

        let mut captured = Vec::new();
        for group in hostile {
            let reduced = group.without_liberty(point);
            if reduced.liberty_count() == 0 {
                self.remove_group(&reduced, &mut captured);
            } else {
                self.replace_group(reduced);
            }
        }

        if !captured.is_empty() {
            debug!(%point, %player, stones = captured.len(), "captured");
        }
        trace!(%point, %player, hash = self.hash, "placed stone");
        Ok(Placement { captured })
    }

    /// Would placing here leave the mover's group with no liberties?
    ///
    /// An empty neighbor, or an opposing neighbor group in atari (which the
    /// move captures), rules it out. Otherwise it is self-capture exactly
    /// when every friendly neighbor group is down to its last liberty. A
    /// point with no neighbors at all (1x1 board) counts as self-capture.
    pub fn is_self_capture(&self, player: Player, point: Point) -> bool {
        self.check_on_grid(point);
        let mut friendly = Vec::new();
        for &neighbor in self.table.neighbors_of(point) {
            match self.classify(player, neighbor) {
                NeighborState::Empty => return false,
                NeighborState::Hostile(g) if g.liberty_count() == 1 => return false,
                NeighborState::Hostile(_) => {}
                NeighborState::Friendly(g) => friendly.push(g),
            }
        }
        friendly.iter().all(|g| g.liberty_count() == 1)
    }

    /// Would placing here capture at least one opposing group?
    pub fn will_capture(&self, player: Player, point: Point) -> bool {
        self.check_on_grid(point);
        self.table
            .neighbors_of(point)
            .iter()
            .any(|&neighbor| match self.classify(player, neighbor) {
                NeighborState::Hostile(g) => g.liberty_count() == 1,
                NeighborState::Empty | NeighborState::Friendly(_) => false,
            })
    }

    /// Store `group` as the group of each of its stones.
    fn replace_group(&mut self, group: Group) {
        let group = Arc::new(group);
        for &stone in group.stones() {
            self.grid.insert(stone, Arc::clone(&group));
        }
    }

    /// Clear every stone of `group`, handing the freed points back as
    /// liberties to the groups around them.
    fn remove_group(&mut self, group: &Group, captured: &mut Vec<Point>) {
        let table = Arc::clone(&self.table);
        let owner = group.owner();
        let mut stones: Vec<Point> = group.stones().iter().copied().collect();
        stones.sort_unstable();
        for stone in stones {
            for &neighbor in table.neighbors_of(stone) {
                // Any other-colored neighbor is a surviving group; same-colored
                // ones are stones of this group not cleared yet.
                let Some(adjacent) = self.grid.get(&neighbor) else {
                    continue;
                };
                if adjacent.owner() != owner {
                    let regranted = adjacent.with_liberty(stone);
                    self.replace_group(regranted);
                }
            }
            self.grid.remove(&stone);
            self.hash ^= zobrist::hash_of(stone, Some(owner)) ^ zobrist::hash_of(stone, None);
            captured.push(stone);
        }
    }

    /// Zobrist hash computed from scratch over every point.
    pub fn recompute_hash(&self) -> u64 {
        let table = zobrist::table();
        let mut h = 0u64;
        for row in 1..=self.rows {
            for col in 1..=self.cols {
                let p = Point::new(row, col);
                h ^= table.value(p, self.player_at(p));
            }
        }
        h
    }

    /// Check every structural invariant of the board.
    ///
    /// Groups must partition the stones into maximal connected same-color
    /// components, liberty sets must be exactly the adjacent empty points,
    /// and the running hash must match a full recomputation.
    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        for (&point, group) in &self.grid {
            if !self.is_on_grid(point) {
                return Err(InvariantError::OffBoard(point));
            }
            if !group.contains(point) {
                return Err(InvariantError::NotInOwnGroup(point));
            }
            for &stone in group.stones() {
                match self.grid.get(&stone) {
                    Some(other) if Arc::ptr_eq(other, group) => {}
                    _ => return Err(InvariantError::StaleGroup(stone)),
                }
            }
            for &neighbor in self.table.neighbors_of(point) {
                if let Some(other) = self.grid.get(&neighbor) {
                    if other.owner() == group.owner() && !Arc::ptr_eq(other, group) {
                        return Err(InvariantError::Unmerged {
                            owner: group.owner(),
                            a: point,
                            b: neighbor,
                        });
                    }
                }
            }
        }

        for group in self.groups() {
            let Some(&start) = group.stones().iter().min() else {
                continue;
            };

            let mut reached = HashSet::from([start]);
            let mut stack = vec![start];
            while let Some(p) = stack.pop() {
                for &n in self.table.neighbors_of(p) {
                    if group.contains(n) && reached.insert(n) {
                        stack.push(n);
                    }
                }
            }
            if reached.len() != group.len() {
                return Err(InvariantError::Disconnected(start));
            }

            let expected: HashSet<Point> = group
                .stones()
                .iter()
                .flat_map(|&s| self.table.neighbors_of(s).iter().copied())
                .filter(|n| !self.grid.contains_key(n))
                .collect();
            if &expected != group.liberties() {
                let mut actual: Vec<Point> = group.liberties().iter().copied().collect();
                let mut expected: Vec<Point> = expected.into_iter().collect();
                actual.sort_unstable();
                expected.sort_unstable();
                return Err(InvariantError::Liberties {
                    at: start,
                    actual,
                    expected,
                });
            }
        }

        let recomputed = self.recompute_hash();
        if recomputed != self.hash {
            return Err(InvariantError::Hash {
                stored: self.hash,
                recomputed,
            });
        }
        Ok(())
    }
}

/// Equal when the sizes match and every point holds an equal group.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.grid == other.grid
    }
}

impl Eq for Board {}

fn push_unique(groups: &mut Vec<Arc<Group>>, group: Arc<Group>) {
    if !groups.iter().any(|g| Arc::ptr_eq(g, &group)) {
        groups.push(group);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: usize, col: usize) -> Point {
        Point::new(row, col)
    }

    fn play(board: &mut Board, player: Player, moves: &[(usize, usize)]) {
        for &(row, col) in moves {
            board
                .place_stone(player, p(row, col))
                .unwrap_or_else(|e| panic!("setup move failed: {e}"));
        }
    }

    #[test]
    fn test_empty_board() {
        let board = Board::new(9, 9);
        assert_eq!(board.stone_count(), 0);
        assert_eq!(board.player_at(p(5, 5)), None);
        assert!(board.group_at(p(5, 5)).is_none());
        assert_eq!(board.hash(), board.recompute_hash());
        assert_eq!(board.assert_valid(), Ok(()));
    }

    #[test]
    fn test_single_stone_liberties() {
        let mut board = Board::new(9, 9);
        board.place_stone(Player::Black, p(5, 5)).unwrap();
        let g = board.group_at(p(5, 5)).unwrap();
        assert_eq!(g.owner(), Player::Black);
        assert_eq!(g.liberty_count(), 4);

        board.place_stone(Player::Black, p(1, 1)).unwrap();
        assert_eq!(board.group_at(p(1, 1)).unwrap().liberty_count(), 2);
    }

    #[test]
    fn test_adjacent_stones_merge() {
        let mut board = Board::new(9, 9);
        play(&mut board, Player::Black, &[(5, 5), (5, 6)]);
        let g = board.group_at(p(5, 5)).unwrap();
        assert_eq!(g.len(), 2);
        assert!(g.contains(p(5, 6)));
        assert_eq!(g.liberty_count(), 6);
        assert_eq!(board.group_at(p(5, 6)), Some(g));
        assert_eq!(board.assert_valid(), Ok(()));
    }

    #[test]
    fn test_opponent_stone_takes_liberty() {
        let mut board = Board::new(9, 9);
        board.place_stone(Player::Black, p(5, 5)).unwrap();
        board.place_stone(Player::White, p(5, 6)).unwrap();
        assert_eq!(board.group_at(p(5, 5)).unwrap().liberty_count(), 3);
        assert_eq!(board.group_at(p(5, 6)).unwrap().liberty_count(), 3);
    }

    #[test]
    fn test_corner_capture() {
        let mut board = Board::new(9, 9);
        board.place_stone(Player::Black, p(1, 1)).unwrap();
        board.place_stone(Player::White, p(1, 2)).unwrap();
        let placement = board.place_stone(Player::White, p(2, 1)).unwrap();

        assert_eq!(placement.captured, vec![p(1, 1)]);
        assert_eq!(board.player_at(p(1, 1)), None);
        assert!(board.group_at(p(1, 2)).unwrap().liberties().contains(&p(1, 1)));
        assert!(board.group_at(p(2, 1)).unwrap().liberties().contains(&p(1, 1)));
        assert_eq!(board.assert_valid(), Ok(()));
    }

    #[test]
    fn test_occupied_point_rejected() {
        let mut board = Board::new(9, 9);
        board.place_stone(Player::Black, p(3, 3)).unwrap();
        let before = board.clone();

        let err = board.place_stone(Player::White, p(3, 3)).unwrap_err();
        assert_eq!(
            err,
            PlaceError::Occupied {
                point: p(3, 3),
                owner: Player::Black
            }
        );
        assert_eq!(board, before);
        assert_eq!(board.hash(), before.hash());
    }

    #[test]
    #[should_panic(expected = "off the 9x9 board")]
    fn test_off_board_panics() {
        let mut board = Board::new(9, 9);
        let _ = board.place_stone(Player::Black, p(10, 1));
    }

    #[test]
    #[should_panic(expected = "off the 5x5 board")]
    fn test_player_at_off_board_panics() {
        let _ = Board::new(5, 5).player_at(p(9, 9));
    }

    #[test]
    #[should_panic(expected = "off the 5x5 board")]
    fn test_group_at_off_board_panics() {
        let _ = Board::new(5, 5).group_at(p(9, 9));
    }

    #[test]
    #[should_panic(expected = "off the 5x5 board")]
    fn test_neighbors_off_board_panics() {
        let _ = Board::new(5, 5).neighbors(p(6, 1));
    }

    #[test]
    #[should_panic(expected = "off the 5x5 board")]
    fn test_corners_off_board_panics() {
        let _ = Board::new(5, 5).corners(p(1, 6));
    }

    #[test]
    #[should_panic(expected = "off the 5x5 board")]
    fn test_is_self_capture_off_board_panics() {
        let _ = Board::new(5, 5).is_self_capture(Player::Black, p(9, 9));
    }

    #[test]
    #[should_panic(expected = "off the 5x5 board")]
    fn test_will_capture_off_board_panics() {
        let _ = Board::new(5, 5).will_capture(Player::White, p(9, 9));
    }

    #[test]
    #[should_panic(expected = "unsupported board size")]
    fn test_oversized_board_panics() {
        let _ = Board::new(MAX_BOARD_SIZE + 1, 9);
    }

    #[test]
    fn test_will_capture() {
        let mut board = Board::new(5, 5);
        board.place_stone(Player::Black, p(1, 1)).unwrap();
        board.place_stone(Player::White, p(1, 2)).unwrap();
        assert!(board.will_capture(Player::White, p(2, 1)));
        assert!(!board.will_capture(Player::Black, p(2, 1)));
        assert!(!board.will_capture(Player::White, p(4, 4)));
    }

    #[test]
    fn test_self_capture_in_corner() {
        let mut board = Board::new(5, 5);
        play(&mut board, Player::White, &[(1, 2), (2, 1)]);
        assert!(board.is_self_capture(Player::Black, p(1, 1)));
        assert!(!board.is_self_capture(Player::White, p(1, 1)));
    }

    #[test]
    fn test_filling_own_last_liberty_is_self_capture() {
        // Black (1,2) has one liberty left at (1,1); White walls it in.
        let mut board = Board::new(5, 5);
        play(&mut board, Player::Black, &[(1, 2)]);
        play(&mut board, Player::White, &[(2, 1), (2, 2), (1, 3)]);
        assert!(board.is_self_capture(Player::Black, p(1, 1)));
    }

    #[test]
    fn test_capture_rescues_self_capture() {
        // Black at (1,1) would have no liberties, but it captures both white stones.
        let mut board = Board::new(5, 5);
        play(&mut board, Player::White, &[(1, 2), (2, 1)]);
        play(&mut board, Player::Black, &[(1, 3), (2, 2), (3, 1)]);
        assert!(board.will_capture(Player::Black, p(1, 1)));
        assert!(!board.is_self_capture(Player::Black, p(1, 1)));

        let placement = board.place_stone(Player::Black, p(1, 1)).unwrap();
        assert_eq!(placement.captures(), 2);
        assert_eq!(board.group_at(p(1, 1)).unwrap().liberty_count(), 2);
        assert_eq!(board.assert_valid(), Ok(()));
    }

    #[test]
    fn test_mechanical_self_capture_leaves_zero_liberties() {
        let mut board = Board::new(5, 5);
        play(&mut board, Player::White, &[(1, 2), (2, 1)]);
        board.place_stone(Player::Black, p(1, 1)).unwrap();
        assert_eq!(board.group_at(p(1, 1)).unwrap().liberty_count(), 0);
    }

    #[test]
    fn test_single_point_board() {
        let mut board = Board::new(1, 1);
        assert!(board.neighbors(p(1, 1)).is_empty());
        assert!(board.is_self_capture(Player::Black, p(1, 1)));
        assert!(!board.will_capture(Player::Black, p(1, 1)));
        board.place_stone(Player::Black, p(1, 1)).unwrap();
        assert_eq!(board.group_at(p(1, 1)).unwrap().liberty_count(), 0);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut board = Board::new(9, 9);
        board.place_stone(Player::Black, p(3, 3)).unwrap();
        let mut copy = board.clone();
        assert_eq!(copy, board);

        copy.place_stone(Player::White, p(3, 4)).unwrap();
        assert_eq!(board.player_at(p(3, 4)), None);
        assert_eq!(board.group_at(p(3, 3)).unwrap().liberty_count(), 4);
        assert_eq!(copy.group_at(p(3, 3)).unwrap().liberty_count(), 3);
        assert_ne!(copy, board);
        assert_ne!(copy.hash(), board.hash());
    }

    #[test]
    fn test_equality_ignores_cache_identity() {
        let cache = AdjacencyCache::new();
        let mut a = Board::new(5, 5);
        let mut b = Board::with_cache(5, 5, &cache);
        a.place_stone(Player::Black, p(2, 2)).unwrap();
        b.place_stone(Player::Black, p(2, 2)).unwrap();
        assert_eq!(a, b);
        assert_ne!(Board::new(5, 5), Board::new(5, 6));
    }

    #[test]
    fn test_groups_are_distinct() {
        let mut board = Board::new(9, 9);
        play(&mut board, Player::Black, &[(1, 1), (1, 2), (5, 5)]);
        play(&mut board, Player::White, &[(9, 9)]);
        assert_eq!(board.groups().len(), 3);
        assert_eq!(board.stone_count(), 4);
    }
}
