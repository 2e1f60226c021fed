//! Quiescence search to avoid horizon effect
//!
//! At the end of the main search only captures are followed, until the
//! position is quiet. The side to move may always "stand pat" on the static
//! evaluation instead of capturing. Every capture removes material, so the
//! recursion is bounded by the number of pieces on the board.

use super::alphabeta::Searcher;
use super::limits::Interrupted;
use super::ordering::order_moves;
use crate::position::Position;

impl<P: Position + ?Sized> Searcher<'_, P> {
    /// Capture-only search, fail-hard within (`alpha`, `beta`)
    pub fn quiescence(&mut self, mut alpha: i32, beta: i32) -> Result<i32, Interrupted> {
        self.visit()?;
        self.stats.qnodes += 1;

        let stand_pat = self.evaluator.evaluate_relative(&*self.pos);
        if stand_pat >= beta {
            return Ok(beta);
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut captures = self.pos.capture_moves();
        order_moves(&*self.pos, &mut captures, None);

        for mv in captures {
            self.pos.make_move(mv);
            let result = self.quiescence(-beta, -alpha);
            self.pos.unmake_move(mv);
            let score = -result?;

            if score >= beta {
                return Ok(beta);
            }
            if score > alpha {
                alpha = score;
            }
        }

        Ok(alpha)
    }
}
