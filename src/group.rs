//! Groups (strings) of connected same-color stones.
//!
//! A [`Group`] is an immutable value. Every change produces a new group, and
//! the board swaps the new value in for all of the group's stones.

use std::collections::HashSet;

use crate::point::{Player, Point};

/// A maximal connected set of same-color stones and its liberties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    owner: Player,
    stones: HashSet<Point>,
    liberties: HashSet<Point>,
}

impl Group {
    /// A group holding a single freshly placed stone.
    pub fn singleton(
        owner: Player,
        stone: Point,
        liberties: impl IntoIterator<Item = Point>,
    ) -> Self {
        let liberties: HashSet<Point> = liberties.into_iter().collect();
        debug_assert!(!liberties.contains(&stone));
        Self {
            owner,
            stones: HashSet::from([stone]),
            liberties,
        }
    }

    pub fn owner(&self) -> Player {
        self.owner
    }

    pub fn stones(&self) -> &HashSet<Point> {
        &self.stones
    }

    pub fn liberties(&self) -> &HashSet<Point> {
        &self.liberties
    }

    pub fn liberty_count(&self) -> usize {
        self.liberties.len()
    }

    /// Number of stones.
    pub fn len(&self) -> usize {
        self.stones.len()
    }

    /// True if the group has no stones.
    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.stones.contains(&point)
    }

    /// Copy of this group with `point` no longer a liberty.
    pub fn without_liberty(&self, point: Point) -> Group {
        let mut liberties = self.liberties.clone();
        liberties.remove(&point);
        Group {
            owner: self.owner,
            stones: self.stones.clone(),
            liberties,
        }
    }

    /// Copy of this group with `point` added as a liberty.
    pub fn with_liberty(&self, point: Point) -> Group {
        let mut liberties = self.liberties.clone();
        liberties.insert(point);
        Group {
            owner: self.owner,
            stones: self.stones.clone(),
            liberties,
        }
    }

    /// Union of two groups of the same owner.
    ///
    /// Points that are stones of either group are dropped from the combined
    /// liberties.
    ///
    /// # Panics
    ///
    /// If the owners differ. The board only ever merges friendly groups.
    pub fn merged_with(&self, other: &Group) -> Group {
        assert_eq!(self.owner, other.owner, "cannot merge groups of different owners");
        let stones: HashSet<Point> = self.stones.union(&other.stones).copied().collect();
        let liberties = self
            .liberties
            .union(&other.liberties)
            .filter(|p| !stones.contains(p))
            .copied()
            .collect();
        Group {
            owner: self.owner,
            stones,
            liberties,
        }
    }
}
