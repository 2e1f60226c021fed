//! Material and mobility
//!
//! Material is piece count × value. Mobility counts the squares each piece
//! attacks (own-occupied squares included) and weights them per piece kind.
//! Two weight sets exist: early weights favour minor pieces, late weights
//! favour rooks and queens once the board has thinned out.

use crate::bitset::BitSet;
use crate::constants::*;
use crate::position::Position;
use crate::types::{PieceKind, Side};

/// Material of `side` in centipawns
pub fn evaluate_material<P: Position + ?Sized>(pos: &P, side: Side) -> i32 {
    PieceKind::ALL
        .iter()
        .map(|&kind| pos.pieces(side, kind).count_ones() as i32 * kind.value())
        .sum()
}

/// No queens and at most 16 pieces, or at most 10 pieces
pub fn is_endgame<P: Position + ?Sized>(pos: &P) -> bool {
    let total = pos.piece_count();
    let no_queens = Side::BOTH
        .iter()
        .all(|&side| pos.pieces(side, PieceKind::Queen) == 0);
    (no_queens && total <= ENDGAME_NO_QUEENS_MAX_PIECES) || total <= ENDGAME_MAX_PIECES
}

/// Weight table in effect for this position
pub fn mobility_weights<P: Position + ?Sized>(pos: &P) -> &'static [i32; 7] {
    if is_endgame(pos) || pos.piece_count() <= LATE_MOBILITY_MAX_PIECES {
        &MOBILITY_WEIGHTS_LATE
    } else {
        &MOBILITY_WEIGHTS_EARLY
    }
}

/// Weighted attacked-square count of `side`
pub fn evaluate_mobility<P: Position + ?Sized>(pos: &P, side: Side, weights: &[i32; 7]) -> i32 {
    let mut score = 0;
    for kind in PieceKind::ALL {
        let weight = weights[kind.index()];
        if weight == 0 {
            continue;
        }
        for square in BitSet(pos.pieces(side, kind)) {
            score += pos.attacks_from(square).count_ones() as i32 * weight;
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ShakmatyBoard;

    fn board(fen: &str) -> ShakmatyBoard {
        ShakmatyBoard::from_fen(fen).unwrap()
    }

    #[test]
    fn test_starting_position_material_balance() {
        let pos = ShakmatyBoard::new();
        let white = evaluate_material(&pos, Side::White);
        let black = evaluate_material(&pos, Side::Black);
        assert_eq!(white, black, "Starting position should have equal material");
        assert_eq!(white, 8 * 100 + 2 * 300 + 2 * 320 + 2 * 500 + 950 + 10_000);
    }

    #[test]
    fn test_missing_queen() {
        let pos = board("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        let diff = evaluate_material(&pos, Side::White) - evaluate_material(&pos, Side::Black);
        assert_eq!(diff, 950);
    }

    #[test]
    fn test_weights_switch_when_board_thins() {
        assert_eq!(mobility_weights(&ShakmatyBoard::new()), &MOBILITY_WEIGHTS_EARLY);

        // Queens on, 12 pieces: late by piece count alone
        let pos = board("4k3/ppppq3/8/8/8/8/PPPPQ3/4K3 w - - 0 1");
        assert!(!is_endgame(&pos));
        assert_eq!(pos.piece_count(), 12);
        assert_eq!(mobility_weights(&pos), &MOBILITY_WEIGHTS_LATE);

        // No queens and at most 16 pieces: endgame
        let pos = board("r3k2r/pppp4/8/8/8/8/PPPP4/R3K2R w - - 0 1");
        assert_eq!(pos.piece_count(), 14);
        assert!(is_endgame(&pos));
    }

    #[test]
    fn test_start_position_mobility() {
        //! Each side: two knights with 3 squares each (weight 4), two bishops
        //! with 2 each (weight 5), two rooks with 2 each (weight 1), queen
        //! with 5 (weight 1). King weight is zero early.
        let pos = ShakmatyBoard::new();
        let white = evaluate_mobility(&pos, Side::White, &MOBILITY_WEIGHTS_EARLY);
        let black = evaluate_mobility(&pos, Side::Black, &MOBILITY_WEIGHTS_EARLY);
        assert_eq!(white, black);
        assert_eq!(white, 2 * 3 * 4 + 2 * 2 * 5 + 2 * 2 + 5);
    }
}
