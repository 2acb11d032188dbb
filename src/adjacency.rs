//! Precomputed neighbor and corner tables, memoized per board size.
//!
//! Looking up a point's on-board neighbors is on the hot path of every
//! move, so each board size gets its table built once and every board of
//! that size shares it through an [`Arc`].

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use tracing::debug;

use crate::point::Point;

/// In-bounds neighbors and corners for every point of one board size.
#[derive(Debug)]
pub struct AdjacencyTable {
    rows: usize,
    cols: usize,
    neighbors: Vec<Vec<Point>>,
    corners: Vec<Vec<Point>>,
}

impl AdjacencyTable {
    /// Build the table for a `rows` x `cols` board.
    pub fn new(rows: usize, cols: usize) -> Self {
        let on_grid = |p: &Point| (1..=rows).contains(&p.row) && (1..=cols).contains(&p.col);
        let mut neighbors = Vec::with_capacity(rows * cols);
        let mut corners = Vec::with_capacity(rows * cols);
        for row in 1..=rows {
            for col in 1..=cols {
                let p = Point::new(row, col);
                neighbors.push(p.neighbors().into_iter().filter(on_grid).collect());
                corners.push(p.corners().into_iter().filter(on_grid).collect());
            }
        }
        Self {
            rows,
            cols,
            neighbors,
            corners,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn idx(&self, point: Point) -> usize {
        (point.row - 1) * self.cols + (point.col - 1)
    }

    /// On-board axis neighbors of `point`, in North, South, West, East order.
    #[inline]
    pub fn neighbors_of(&self, point: Point) -> &[Point] {
        &self.neighbors[self.idx(point)]
    }

    /// On-board diagonal corners of `point`, in NW, NE, SW, SE order.
    #[inline]
    pub fn corners_of(&self, point: Point) -> &[Point] {
        &self.corners[self.idx(point)]
    }
}

/// Memoizes one [`AdjacencyTable`] per `(rows, cols)`.
///
/// Tables are built while holding the lock, so concurrent requests for a
/// new size build it exactly once.
#[derive(Default)]
pub struct AdjacencyCache {
    tables: Mutex<HashMap<(usize, usize), Arc<AdjacencyTable>>>,
}

impl AdjacencyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by [`Board::new`](crate::board::Board::new).
    pub fn global() -> &'static AdjacencyCache {
        static GLOBAL: OnceLock<AdjacencyCache> = OnceLock::new();
        GLOBAL.get_or_init(AdjacencyCache::new)
    }

    /// Table for `rows` x `cols`, building it on first request.
    pub fn table(&self, rows: usize, cols: usize) -> Arc<AdjacencyTable> {
        let mut tables = self.tables.lock();
        tables
            .entry((rows, cols))
            .or_insert_with(|| {
                debug!(rows, cols, "building adjacency table");
                Arc::new(AdjacencyTable::new(rows, cols))
            })
            .clone()
    }

    /// Number of distinct sizes built so far.
    pub fn len(&self) -> usize {
        self.tables.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.lock().is_empty()
    }
}
