//! # Core value types shared by search, ordering and evaluation
//!
//! ## Squares
//!
//! Squares are plain `u8` indices 0-63 with A1 = 0, H1 = 7, A8 = 56, H8 = 63.
//! `file = square % 8`, `rank = square / 8`. Mirroring a square vertically
//! (the view from the black side) is `square ^ 56`.
//!
//! ## The `Move` value
//!
//! A [`Move`] is produced by the position collaborator and never mutated by the
//! engine. Besides the piece kinds and squares it carries a compact 16-bit
//! identity:
//!
//! ```text
//! bits  0..6   origin square
//! bits  6..12  destination square
//! bits 12..15  promotion kind (0 = none)
//! ```
//!
//! Equality and hashing go through this identity only, so two `Move` values
//! describing the same from/to/promotion triple compare equal even if one
//! was created before a capture changed what stands on the destination.
//! Killer and countermove tables rely on that.
//!
//! For castling the destination is the king's target square (g1/c1/g8/c8),
//! independent of how the collaborator encodes castling internally.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::constants::PIECE_VALUES;

/// Board square index (0-63, A1 = 0)
pub type Square = u8;

#[inline]
pub const fn file_of(square: Square) -> u8 {
    square % 8
}

#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square / 8
}

#[inline]
pub const fn make_square(file: u8, rank: u8) -> Square {
    rank * 8 + file
}

/// Vertical mirror (A1 <-> A8)
#[inline]
pub const fn mirror(square: Square) -> Square {
    square ^ 56
}

/// Chebyshev (king-step) distance between two squares
pub fn chebyshev_distance(a: Square, b: Square) -> u8 {
    let df = file_of(a).abs_diff(file_of(b));
    let dr = rank_of(a).abs_diff(rank_of(b));
    df.max(dr)
}

/// Manhattan distance between two squares
pub fn manhattan_distance(a: Square, b: Square) -> u8 {
    file_of(a).abs_diff(file_of(b)) + rank_of(a).abs_diff(rank_of(b))
}

/// Algebraic name of a square, e.g. `e4`
pub fn square_name(square: Square) -> String {
    let file = (b'a' + file_of(square)) as char;
    let rank = (b'1' + rank_of(square)) as char;
    format!("{file}{rank}")
}

/// Parse an algebraic square name (`a1`..`h8`)
pub fn parse_square(name: &str) -> Option<Square> {
    let bytes = name.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let file = bytes[0].checked_sub(b'a').filter(|f| *f < 8)?;
    let rank = bytes[1].checked_sub(b'1').filter(|r| *r < 8)?;
    Some(make_square(file, rank))
}

/// Side to move / piece owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::White, Side::Black];

    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// +1 for White, -1 for Black
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }
}

/// Piece kind without colour. Discriminants index the value tables
/// (slot 0 is reserved for "none").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Material value in centipawns
    #[inline]
    pub fn value(self) -> i32 {
        PIECE_VALUES[self.index()]
    }

    /// Lowercase letter used in coordinate notation promotions
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

/// Immutable move value produced by the position collaborator
#[derive(Debug, Clone, Copy)]
pub struct Move {
    piece: PieceKind,
    capture: Option<PieceKind>,
    promotion: Option<PieceKind>,
    from: Square,
    to: Square,
    castle: bool,
    id: u16,
}

impl Move {
    /// Quiet move of `piece` from `from` to `to`
    pub fn new(piece: PieceKind, from: Square, to: Square) -> Self {
        Move {
            piece,
            capture: None,
            promotion: None,
            from,
            to,
            castle: false,
            id: Self::encode(from, to, None),
        }
    }

    pub fn with_capture(mut self, captured: PieceKind) -> Self {
        self.capture = Some(captured);
        self
    }

    pub fn with_promotion(mut self, promoted: PieceKind) -> Self {
        self.promotion = Some(promoted);
        self.id = Self::encode(self.from, self.to, Some(promoted));
        self
    }

    /// Castling move; `to` must be the king's destination square
    pub fn castling(from: Square, to: Square) -> Self {
        Move {
            castle: true,
            ..Move::new(PieceKind::King, from, to)
        }
    }

    fn encode(from: Square, to: Square, promotion: Option<PieceKind>) -> u16 {
        let promo = promotion.map_or(0, |p| p as u16);
        (from as u16 & 0x3f) | ((to as u16 & 0x3f) << 6) | (promo << 12)
    }

    #[inline]
    pub fn piece(&self) -> PieceKind {
        self.piece
    }

    #[inline]
    pub fn capture(&self) -> Option<PieceKind> {
        self.capture
    }

    #[inline]
    pub fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }

    #[inline]
    pub fn from(&self) -> Square {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Square {
        self.to
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        self.castle
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Neither a capture nor a promotion
    #[inline]
    pub fn is_quiet(&self) -> bool {
        self.capture.is_none() && self.promotion.is_none()
    }

    /// Stable 16-bit identity (from | to << 6 | promotion << 12)
    #[inline]
    pub fn id(&self) -> u16 {
        self.id
    }

    /// Coordinate notation, e.g. `e2e4`, `e7e8q`
    pub fn coordinate(&self) -> String {
        let mut text = format!("{}{}", square_name(self.from), square_name(self.to));
        if let Some(promotion) = self.promotion {
            text.push(promotion.letter());
        }
        text
    }

    /// Does this move match a coordinate string such as `e2e4`?
    pub fn matches_coordinate(&self, text: &str) -> bool {
        self.coordinate() == text
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.coordinate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_helpers() {
        assert_eq!(parse_square("a1"), Some(0));
        assert_eq!(parse_square("h8"), Some(63));
        assert_eq!(parse_square("e4"), Some(28));
        assert_eq!(parse_square("i1"), None);
        assert_eq!(parse_square("a9"), None);
        assert_eq!(square_name(28), "e4");
        assert_eq!(mirror(parse_square("e2").unwrap()), parse_square("e7").unwrap());
    }

    #[test]
    fn test_distances() {
        let e4 = parse_square("e4").unwrap();
        let g6 = parse_square("g6").unwrap();
        assert_eq!(chebyshev_distance(e4, g6), 2);
        assert_eq!(manhattan_distance(e4, g6), 4);
    }

    #[test]
    fn test_move_identity_ignores_capture_annotation() {
        //! The same from/to pair is one move even if captured piece differs
        let quiet = Move::new(PieceKind::Knight, 6, 21);
        let capture = Move::new(PieceKind::Knight, 6, 21).with_capture(PieceKind::Pawn);
        assert_eq!(quiet, capture);
        assert_eq!(quiet.id(), capture.id());
    }

    #[test]
    fn test_promotions_are_distinct_moves() {
        let queen = Move::new(PieceKind::Pawn, 52, 60).with_promotion(PieceKind::Queen);
        let knight = Move::new(PieceKind::Pawn, 52, 60).with_promotion(PieceKind::Knight);
        assert_ne!(queen, knight);
        assert_eq!(queen.coordinate(), "e7e8q");
        assert!(!queen.is_quiet());
    }

    #[test]
    fn test_castling_move_flags() {
        let castle = Move::castling(4, 6);
        assert!(castle.is_castle());
        assert_eq!(castle.piece(), PieceKind::King);
        assert_eq!(castle.to_string(), "e1g1");
    }
}
