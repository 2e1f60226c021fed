//! King placement terms: castling bonus and endgame mop-up

use crate::constants::*;
use crate::position::Position;
use crate::types::{file_of, make_square, manhattan_distance, mirror, rank_of, Side, Square};

const G1: Square = make_square(6, 0);
const C1: Square = make_square(2, 0);

/// Reward a castled king, White-oriented. Only scored between plies 16 and
/// 30 inclusive; before that the king has rarely had time to castle and
/// after that the bonus would just freeze the king in place.
pub fn castling_bonus<P: Position + ?Sized>(pos: &P) -> i32 {
    let ply = pos.ply_count();
    if !(CASTLING_PLY_MIN..=CASTLING_PLY_MAX).contains(&ply) {
        return 0;
    }

    Side::BOTH
        .iter()
        .map(|&side| {
            let Some(king) = pos.king_square(side) else {
                return 0;
            };
            // Compare in White's frame
            let king = if side == Side::White { king } else { mirror(king) };
            let bonus = match king {
                G1 => KINGSIDE_CASTLED_BONUS,
                C1 => QUEENSIDE_CASTLED_BONUS,
                _ => 0,
            };
            bonus * side.sign()
        })
        .sum()
}

/// Distance from the four centre squares, 0 (d4/e4/d5/e5) to 6 (corners)
pub fn centre_distance(square: Square) -> i32 {
    let file = i32::from(file_of(square));
    let rank = i32::from(rank_of(square));
    (3 - file).max(file - 4) + (3 - rank).max(rank - 4)
}

/// Drive the losing king to the edge in sparse endgames
///
/// `eval` is the White-oriented score so far. A strictly positive score makes
/// White the strong side, strictly negative makes it Black. The strong side
/// gets credit for closing the king distance and for how far the losing king
/// sits from the centre.
pub fn mop_up<P: Position + ?Sized>(pos: &P, eval: i32) -> i32 {
    if eval == 0 || pos.piece_count() > MOP_UP_MAX_PIECES {
        return 0;
    }
    let strong = if eval > 0 { Side::White } else { Side::Black };
    let (Some(strong_king), Some(weak_king)) =
        (pos.king_square(strong), pos.king_square(strong.opponent()))
    else {
        return 0;
    };

    let distance = i32::from(manhattan_distance(strong_king, weak_king));
    let bonus =
        (MOP_UP_DISTANCE_BASE - distance) * MOP_UP_DISTANCE_WEIGHT + centre_distance(weak_king);
    bonus * strong.sign()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ShakmatyBoard;
    use crate::types::parse_square;

    fn board(fen: &str) -> ShakmatyBoard {
        ShakmatyBoard::from_fen(fen).unwrap()
    }

    #[test]
    fn test_centre_distance_is_symmetric() {
        for square in 0..64u8 {
            assert_eq!(centre_distance(square), centre_distance(mirror(square)));
        }
        assert_eq!(centre_distance(parse_square("e4").unwrap()), 0);
        assert_eq!(centre_distance(parse_square("a1").unwrap()), 6);
        assert_eq!(centre_distance(parse_square("h8").unwrap()), 6);
        assert_eq!(centre_distance(parse_square("e8").unwrap()), 3);
    }

    #[test]
    fn test_castling_bonus_window() {
        //! Fullmove 9 with White to move is ply 16; fullmove 16 with Black to
        //! move is ply 31.
        let inside = board("2kr3r/8/8/8/8/8/8/5RK1 w - - 0 9");
        assert_eq!(castling_bonus(&inside), KINGSIDE_CASTLED_BONUS - QUEENSIDE_CASTLED_BONUS);

        let before = board("2kr3r/8/8/8/8/8/8/5RK1 b - - 0 8");
        assert_eq!(castling_bonus(&before), 0);

        let after = board("2kr3r/8/8/8/8/8/8/5RK1 b - - 0 16");
        assert_eq!(castling_bonus(&after), 0);
    }

    #[test]
    fn test_mop_up_sign_follows_strong_side() {
        let pos = board("8/8/8/4k3/8/4K3/8/R7 w - - 0 1");
        // Kings two ranks apart; e5 is a centre square, e3 is one rank off it
        assert_eq!(mop_up(&pos, 500), (14 - 2) * 5);
        assert_eq!(mop_up(&pos, -500), -((14 - 2) * 5 + 1));
        assert_eq!(mop_up(&pos, 0), 0);
    }

    #[test]
    fn test_mop_up_needs_sparse_board() {
        let pos = ShakmatyBoard::new();
        assert_eq!(mop_up(&pos, 500), 0);
    }
}
