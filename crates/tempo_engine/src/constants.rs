//! # Engine Constants - Evaluation Values & Search Parameters
//!
//! ## Overview
//!
//! This module centralizes the constant values used by the evaluator, the move
//! orderer and the search: piece values (in centipawns), mobility weights,
//! pawn-structure terms, ordering bonuses, piece-square tables and the score
//! scale for mates.
//!
//! ## Centipawn Valuation System
//!
//! - **Pawn**: 100
//! - **Knight**: 300
//! - **Bishop**: 320 (slightly above the knight; the bishop pair is not scored separately)
//! - **Rook**: 500
//! - **Queen**: 950
//! - **King**: 10,000 (never traded; keeps MVV-LVA from ever preferring a king "capture")
//!
//! Slot 0 of every per-kind table is "no piece", so tables are indexed directly
//! by [`PieceKind::index`](crate::types::PieceKind::index).
//!
//! ## Score Scale
//!
//! Mate scores are `-MATE_SCORE + ply * MATE_PLY_STEP`. With a step of 1,000
//! a mate found one ply deeper scores 1,000 worse for the mating side, which
//! dwarfs any positional term and makes the search prefer the shortest mate.
//! `INFINITY` is far outside any reachable score and is safe to negate.
//!
//! ## Move Ordering Scale
//!
//! Ordering scores are additive and only their relative order matters:
//!
//! | Term                    | Score            |
//! |-------------------------|------------------|
//! | Root best move          | 10,000,000       |
//! | Capture base            | 100,000 + MVV-LVA|
//! | Castling                | 10,000           |
//! | Killer                  | 8,000            |
//! | Countermove             | 6,000            |
//! | History                 | accumulated d²   |

/// Piece values in centipawns, indexed by piece kind (0 = none)
pub const PIECE_VALUES: [i32; 7] = [0, 100, 300, 320, 500, 950, 10_000];

/// Mobility weight per attacked square while pieces are plentiful
pub const MOBILITY_WEIGHTS_EARLY: [i32; 7] = [0, 0, 4, 5, 1, 1, 0];

/// Mobility weight per attacked square in the endgame
pub const MOBILITY_WEIGHTS_LATE: [i32; 7] = [0, 0, 2, 3, 5, 3, 1];

// Endgame detection (counts include kings and pawns)
pub const ENDGAME_NO_QUEENS_MAX_PIECES: u32 = 16;
pub const ENDGAME_MAX_PIECES: u32 = 10;
pub const LATE_MOBILITY_MAX_PIECES: u32 = 12;

// Pawn structure
pub const DOUBLED_PAWN_PENALTY: i32 = 15;
pub const ISOLATED_PAWN_PENALTY: i32 = 15;
pub const PASSED_PAWN_BONUS_PER_RANK: i32 = 15;

// Castling, only scored inside this ply window
pub const CASTLING_PLY_MIN: u32 = 16;
pub const CASTLING_PLY_MAX: u32 = 30;
pub const KINGSIDE_CASTLED_BONUS: i32 = 50;
pub const QUEENSIDE_CASTLED_BONUS: i32 = 40;

// Mop-up
pub const MOP_UP_MAX_PIECES: u32 = 7;
pub const MOP_UP_DISTANCE_BASE: i32 = 14;
pub const MOP_UP_DISTANCE_WEIGHT: i32 = 5;

// Search
pub const MATE_SCORE: i32 = 100_000;
pub const MATE_PLY_STEP: i32 = 1_000;
pub const INFINITY: i32 = 1_000_000_000;
pub const DRAW_SCORE: i32 = 0;
pub const MAX_DEPTH: u32 = 200;
pub const MAX_PLY: usize = 64;
// A mate at the deepest ply must still outrank any material balance
const _: () = assert!(MATE_SCORE - MAX_PLY as i32 * MATE_PLY_STEP > 2 * PIECE_VALUES[6]);
pub const IID_MIN_DEPTH: i32 = 3;
pub const NULL_MOVE_MIN_DEPTH: i32 = 2;
pub const NULL_MOVE_REDUCTION: i32 = 2;
pub const NULL_MOVE_MIN_PIECES: u32 = 8;
pub const LMR_MIN_MOVE_INDEX: usize = 2;
pub const LMR_MIN_DEPTH: i32 = 2;
pub const DEFAULT_NODE_CHECK_INTERVAL: u64 = 2048;

// Time management
pub const ALLOTTED_TIME_DIVISOR: u64 = 4;
pub const THRESHOLD_DIVISOR: u64 = 10;

// Transposition table
pub const DEFAULT_TT_ENTRIES: usize = 16_000_000;

// Move ordering
pub const ROOT_BEST_SCORE: i32 = 10_000_000;
pub const CAPTURE_BASE: i32 = 100_000;
pub const CASTLE_BONUS: i32 = 10_000;
pub const KILLER_BONUS: i32 = 8_000;
pub const COUNTERMOVE_BONUS: i32 = 6_000;
pub const ORDERING_PST_MAX_PIECES: u32 = 12;
pub const KING_SAFETY_RADIUS: u8 = 2;
pub const KING_SAFETY_SCALE: i32 = 10_000;

/// Piece-Square Tables for ordering quiet moves late in the game.
/// Values are in centipawns, from white's perspective, A1 first.

pub const PAWN_PST: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10,-20,-20, 10, 10,  5,
     5, -5,-10,  0,  0,-10, -5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5,  5, 10, 25, 25, 10,  5,  5,
    10, 10, 20, 30, 30, 20, 10, 10,
    50, 50, 50, 50, 50, 50, 50, 50,
     0,  0,  0,  0,  0,  0,  0,  0,
];

pub const KNIGHT_PST: [i32; 64] = [
   -50,-40,-30,-30,-30,-30,-40,-50,
   -40,-20,  0,  5,  5,  0,-20,-40,
   -30,  5, 10, 15, 15, 10,  5,-30,
   -30,  0, 15, 20, 20, 15,  0,-30,
   -30,  5, 15, 20, 20, 15,  5,-30,
   -30,  0, 10, 15, 15, 10,  0,-30,
   -40,-20,  0,  0,  0,  0,-20,-40,
   -50,-40,-30,-30,-30,-30,-40,-50,
];

pub const BISHOP_PST: [i32; 64] = [
   -20,-10,-10,-10,-10,-10,-10,-20,
   -10,  5,  0,  0,  0,  0,  5,-10,
   -10, 10, 10, 10, 10, 10, 10,-10,
   -10,  0, 10, 10, 10, 10,  0,-10,
   -10,  5,  5, 10, 10,  5,  5,-10,
   -10,  0,  5, 10, 10,  5,  0,-10,
   -10,  0,  0,  0,  0,  0,  0,-10,
   -20,-10,-10,-10,-10,-10,-10,-20,
];

pub const ROOK_PST: [i32; 64] = [
     0,  0,  0,  5,  5,  0,  0,  0,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     5, 10, 10, 10, 10, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

pub const QUEEN_PST: [i32; 64] = [
   -20,-10,-10, -5, -5,-10,-10,-20,
   -10,  0,  0,  0,  0,  0,  0,-10,
   -10,  5,  5,  5,  5,  5,  0,-10,
     0,  0,  5,  5,  5,  5,  0, -5,
    -5,  0,  5,  5,  5,  5,  0, -5,
   -10,  0,  5,  5,  5,  5,  0,-10,
   -10,  0,  0,  0,  0,  0,  0,-10,
   -20,-10,-10, -5, -5,-10,-10,-20,
];

/// King table for the low-material phase the ordering PST is used in:
/// centralize the king.
pub const KING_PST_ENDGAME: [i32; 64] = [
   -50,-30,-30,-30,-30,-30,-30,-50,
   -30,-30,  0,  0,  0,  0,-30,-30,
   -30,-10, 20, 30, 30, 20,-10,-30,
   -30,-10, 30, 40, 40, 30,-10,-30,
   -30,-10, 30, 40, 40, 30,-10,-30,
   -30,-10, 20, 30, 30, 20,-10,-30,
   -30,-20,-10,  0,  0,-10,-20,-30,
   -50,-40,-30,-20,-20,-30,-40,-50,
];
