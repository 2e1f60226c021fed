//! Position collaborator interface
//!
//! The engine does not own a board representation. Everything it needs from
//! the rules side (move generation, make/unmake, check/draw detection, hashing
//! and attack sets) goes through [`Position`]. The search holds a single
//! `&mut` to one position and walks the tree with `make_move`/`unmake_move`;
//! calls always nest last-in-first-out, matching the recursion.
//!
//! [`ShakmatyBoard`](crate::board::ShakmatyBoard) is the implementation that
//! ships with the crate.

use crate::types::{Move, PieceKind, Side, Square};

/// Rules-side view of a chess position used by the search and evaluator
pub trait Position {
    /// All legal moves for the side to move
    fn legal_moves(&self) -> Vec<Move>;

    /// Legal capturing moves for the side to move
    fn capture_moves(&self) -> Vec<Move>;

    /// Play `mv`, which must come from `legal_moves`/`capture_moves` of the
    /// current position
    fn make_move(&mut self, mv: Move);

    /// Take back `mv`, which must be the most recent unmatched `make_move`
    fn unmake_move(&mut self, mv: Move);

    /// Pass the turn to the opponent. Returns `false` (and changes nothing)
    /// when a null move is not possible, e.g. while in check.
    fn try_null_move(&mut self) -> bool;

    /// Take back the most recent successful `try_null_move`
    fn undo_null_move(&mut self);

    fn is_in_check(&self) -> bool;

    fn is_checkmate(&self) -> bool;

    /// Stalemate, insufficient material, fifty-move rule or repetition
    fn is_draw(&self) -> bool;

    /// 64-bit Zobrist hash of the position
    fn hash(&self) -> u64;

    /// Is `square` attacked by the side not to move?
    fn is_square_attacked_by_opponent(&self, square: Square) -> bool;

    /// Attack set of the piece standing on `square` (empty if none)
    fn attacks_from(&self, square: Square) -> u64;

    /// Bitboard of `side`'s pieces of `kind`
    fn pieces(&self, side: Side, kind: PieceKind) -> u64;

    /// Bitboard of all occupied squares
    fn occupied(&self) -> u64;

    fn king_square(&self, side: Side) -> Option<Square>;

    /// Half-moves played since the initial position (0 before White's first move)
    fn ply_count(&self) -> u32;

    fn side_to_move(&self) -> Side;

    /// Number of pieces on the board, kings and pawns included
    fn piece_count(&self) -> u32 {
        self.occupied().count_ones()
    }
}
