//! Constants for board dimensions and hashing.
//!
//! Boards are sized at runtime, but every size must fall inside the range
//! covered by the precomputed Zobrist table.

// =============================================================================
// Board Geometry
// =============================================================================

/// Smallest supported board side. A 1x1 board has no neighbors at all.
pub const MIN_BOARD_SIZE: usize = 1;

/// Largest supported board side (rows or columns).
pub const MAX_BOARD_SIZE: usize = 25;

/// Board size used when the caller does not pick one.
pub const DEFAULT_BOARD_SIZE: usize = 19;

// =============================================================================
// Zobrist Hashing
// =============================================================================

/// Seed for the Zobrist table generator.
///
/// A fixed seed keeps hashes reproducible across runs, so positions hashed
/// by one process can be compared with positions hashed by another.
pub const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Number of occupant states per point: empty, black, white.
pub const OCCUPANT_STATES: usize = 3;
