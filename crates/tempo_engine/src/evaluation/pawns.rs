//! Pawn structure: doubled, isolated and passed pawns

use crate::bitset::BitSet;
use crate::constants::*;
use crate::position::Position;
use crate::types::{file_of, rank_of, PieceKind, Side, Square};

const FILE_A: u64 = 0x0101_0101_0101_0101;

#[inline]
fn file_mask(file: u8) -> u64 {
    FILE_A << file
}

/// Files `file - 1 ..= file + 1`, clipped at the board edge
fn adjacent_files_mask(file: u8) -> u64 {
    let mut mask = file_mask(file);
    if file > 0 {
        mask |= file_mask(file - 1);
    }
    if file < 7 {
        mask |= file_mask(file + 1);
    }
    mask
}

/// Squares an enemy pawn must not occupy for a pawn of `side` on `square`
/// to be passed: its own and both adjacent files, strictly in front of it
pub fn passed_pawn_mask(side: Side, square: Square) -> u64 {
    let rank = rank_of(square);
    let ahead = match side {
        Side::White if rank < 7 => u64::MAX << ((rank + 1) * 8),
        Side::Black if rank > 0 => u64::MAX >> ((8 - rank) * 8),
        _ => 0,
    };
    adjacent_files_mask(file_of(square)) & ahead
}

/// Pawn-structure score of `side` (positive is good for `side`)
pub fn evaluate_pawns<P: Position + ?Sized>(pos: &P, side: Side) -> i32 {
    let own = pos.pieces(side, PieceKind::Pawn);
    let enemy = pos.pieces(side.opponent(), PieceKind::Pawn);
    let mut score = 0;
    let mut files_seen = 0u8;

    for square in BitSet(own) {
        let file = file_of(square);
        let flag = 1u8 << file;

        // Every pawn after the first on a file counts as doubled
        if files_seen & flag != 0 {
            score -= DOUBLED_PAWN_PENALTY;
        }
        files_seen |= flag;

        if passed_pawn_mask(side, square) & enemy == 0 {
            let advanced = match side {
                Side::White => rank_of(square),
                Side::Black => 7 - rank_of(square),
            };
            score += PASSED_PAWN_BONUS_PER_RANK * i32::from(advanced);
        }
    }

    for square in BitSet(own) {
        let flag = 1u16 << file_of(square);
        let neighbours = ((flag << 1) | (flag >> 1)) as u8;
        if files_seen & neighbours == 0 {
            score -= ISOLATED_PAWN_PENALTY;
        }
    }

    score
}
