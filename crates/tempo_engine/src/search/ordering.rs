//! Move ordering for alpha-beta pruning
//!
//! Orders moves so that the likely best ones are searched first, which is
//! what makes alpha-beta cut. Every move gets an additive integer score and
//! the list is stable-sorted descending, so equal scores keep the order the
//! position collaborator produced them in.
//!
//! In the main search the score uses everything the engine has learned
//! ([`OrderContext`]): the root best move of the previous iteration, history,
//! killers and countermoves, plus piece-square and king-proximity bonuses
//! once the board is sparse. Quiescence orders its captures context-free.

use std::cmp::Reverse;

use super::heuristics::HeuristicTables;
use crate::constants::*;
use crate::position::Position;
use crate::types::{chebyshev_distance, mirror, Move, PieceKind, Side, Square};

/// Search state the orderer reads
pub struct OrderContext<'a> {
    pub tables: &'a HeuristicTables,
    pub ply: usize,
    /// Move that led to this node, for the countermove lookup
    pub previous: Option<Move>,
    /// Previous iteration's best move; only set at the root for depth > 1
    pub root_best: Option<Move>,
}

fn piece_square_bonus(piece: PieceKind, side: Side, to: Square) -> i32 {
    let index = match side {
        Side::White => to,
        Side::Black => mirror(to),
    } as usize;
    match piece {
        PieceKind::Pawn => PAWN_PST[index],
        PieceKind::Knight => KNIGHT_PST[index],
        PieceKind::Bishop => BISHOP_PST[index],
        PieceKind::Rook => ROOK_PST[index],
        PieceKind::Queen => QUEEN_PST[index],
        PieceKind::King => KING_PST_ENDGAME[index],
    }
}

/// Position facts shared by every move in one list
struct Snapshot {
    side: Side,
    sparse: bool,
    own_king: Option<Square>,
}

impl Snapshot {
    fn new<P: Position + ?Sized>(pos: &P) -> Self {
        let side = pos.side_to_move();
        Snapshot {
            side,
            sparse: pos.piece_count() <= ORDERING_PST_MAX_PIECES,
            own_king: pos.king_square(side),
        }
    }
}

fn score_with<P: Position + ?Sized>(
    pos: &P,
    snapshot: &Snapshot,
    mv: Move,
    ctx: Option<&OrderContext<'_>>,
) -> i32 {
    if let Some(ctx) = ctx {
        if ctx.root_best == Some(mv) {
            return ROOT_BEST_SCORE;
        }
    }

    let piece = mv.piece();
    let mut score = 0;

    if let Some(victim) = mv.capture() {
        // MVV-LVA
        score += CAPTURE_BASE + victim.value() - piece.value();
    } else if let Some(ctx) = ctx {
        score += ctx.tables.history.get(piece, mv.to());

        if ctx.previous.and_then(|prev| ctx.tables.countermoves.get(prev)) == Some(mv) {
            score += COUNTERMOVE_BONUS;
        }
        if !mv.is_promotion() && ctx.tables.killers.is_killer(ctx.ply, mv) {
            score += KILLER_BONUS;
        }

        if snapshot.sparse {
            score += piece_square_bonus(piece, snapshot.side, mv.to());
            if let Some(king) = snapshot.own_king {
                if chebyshev_distance(mv.to(), king) <= KING_SAFETY_RADIUS {
                    score += KING_SAFETY_SCALE / piece.value();
                }
            }
        }
    }

    if let Some(promoted) = mv.promotion() {
        score += promoted.value();
    }
    if mv.is_castle() {
        score += CASTLE_BONUS;
    }
    if pos.is_square_attacked_by_opponent(mv.to()) {
        score -= piece.value();
    }

    score
}

/// Ordering score of a single move
pub fn score_move<P: Position + ?Sized>(pos: &P, mv: Move, ctx: Option<&OrderContext<'_>>) -> i32 {
    score_with(pos, &Snapshot::new(pos), mv, ctx)
}

/// Sort `moves` best-first. `None` gives the context-free ordering used by
/// quiescence.
pub fn order_moves<P: Position + ?Sized>(
    pos: &P,
    moves: &mut [Move],
    ctx: Option<&OrderContext<'_>>,
) {
    let snapshot = Snapshot::new(pos);
    // sort_by_cached_key is stable
    moves.sort_by_cached_key(|&mv| Reverse(score_with(pos, &snapshot, mv, ctx)));
}
