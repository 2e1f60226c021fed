//! # BitSet - 64-square bitboards
//!
//! The collaborator hands the evaluator raw `u64` bitboards (piece sets and
//! attack sets). This module wraps them so the evaluator can walk the set
//! squares without repeating shift arithmetic everywhere.
//!
//! The board is mapped to bits 0-63 where:
//! - Bit 0 = A1 (bottom-left for white)
//! - Bit 7 = H1 (bottom-right for white)
//! - Bit 56 = A8 (top-left for white)
//! - Bit 63 = H8 (top-right for white)
//!
//! Iteration repeatedly takes `trailing_zeros()` and clears the lowest bit.

use crate::types::Square;

/// Bitboard over the 64 squares of the board
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BitSet(pub u64);

impl BitSet {
    /// Iterate the set squares from A1 towards H8
    pub fn squares(self) -> Squares {
        Squares(self.0)
    }
}

impl IntoIterator for BitSet {
    type Item = Square;
    type IntoIter = Squares;

    fn into_iter(self) -> Squares {
        self.squares()
    }
}

/// Iterator over the squares of a [`BitSet`], lowest bit first
pub struct Squares(u64);

impl Iterator for Squares {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let square = self.0.trailing_zeros() as Square;
        self.0 &= self.0 - 1;
        Some(square)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Squares {}
