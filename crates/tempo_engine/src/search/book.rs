//! Two-ply opening book
//!
//! White's first move is fixed. Black's first move is a central pawn push,
//! switched to a fallback push when the reply's destination is attacked.
//! Anything the book suggests must be in the legal move list, so a book that
//! does not fit the position (a custom start position, say) just falls
//! through to the search.

use tracing::debug;

use crate::config::BookConfig;
use crate::position::Position;
use crate::types::{parse_square, Move, Side};

fn find_legal(legal: &[Move], text: &str) -> Option<Move> {
    let found = legal.iter().copied().find(|mv| mv.matches_coordinate(text));
    if found.is_none() {
        debug!("[BOOK] Book move {} is not legal here, searching instead", text);
    }
    found
}

/// Book move for this position, if any
pub fn book_move<P: Position + ?Sized>(
    pos: &P,
    config: &BookConfig,
    legal: &[Move],
) -> Option<Move> {
    if !config.enabled {
        return None;
    }

    match (pos.ply_count(), pos.side_to_move()) {
        (0, Side::White) => find_legal(legal, &config.white_first),
        (1, Side::Black) => {
            let target = config.black_reply.get(2..4).and_then(parse_square)?;
            let text = if pos.is_square_attacked_by_opponent(target) {
                &config.black_fallback
            } else {
                &config.black_reply
            };
            find_legal(legal, text)
        }
        _ => None,
    }
}
