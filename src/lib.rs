//! go-board: an incremental board-state engine for the game of Go.
//!
//! The board tracks stones, connected groups and their liberties, resolves
//! captures on every placement, and maintains a Zobrist hash of the whole
//! position. Rules above that level (turn order, ko, scoring) belong to the
//! caller.
//!
//! ## Modules
//!
//! - [`constants`] - Supported board sizes and hashing parameters
//! - [`point`] - Players and 1-based coordinates
//! - [`zobrist`] - Process-wide Zobrist table
//! - [`group`] - Immutable groups of connected stones
//! - [`adjacency`] - Neighbor/corner tables memoized per board size
//! - [`board`] - Stone placement, captures, self-capture lookahead
//! - [`playout`] - Random self-play used for stress testing
//!
//! ## Example
//!
//! ```
//! use go_board::board::Board;
//! use go_board::point::{Player, Point};
//!
//! let mut board = Board::new(5, 5);
//! board.place_stone(Player::Black, Point::new(1, 1)).unwrap();
//! board.place_stone(Player::White, Point::new(1, 2)).unwrap();
//!
//! assert!(board.will_capture(Player::White, Point::new(2, 1)));
//! let placement = board.place_stone(Player::White, Point::new(2, 1)).unwrap();
//! assert_eq!(placement.captured, vec![Point::new(1, 1)]);
//! assert_eq!(board.player_at(Point::new(1, 1)), None);
//! ```

pub mod adjacency;
pub mod board;
pub mod constants;
pub mod group;
pub mod playout;
pub mod point;
pub mod zobrist;
