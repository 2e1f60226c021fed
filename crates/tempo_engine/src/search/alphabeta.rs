//! Alpha-beta search with negamax
//!
//! [`Searcher`] bundles everything one decision needs: the position (borrowed
//! mutably and walked with make/unmake), the transposition table, the
//! heuristic tables, the evaluator, the limits and the running statistics.
//! [`Frame`] carries the per-call values down the recursion.
//!
//! Recursion depth is bounded: plies at or beyond `MAX_PLY` drop straight into
//! quiescence, so even check and single-reply extensions that keep the
//! remaining depth constant cannot grow the stack without limit.
//!
//! ## Interruption
//!
//! Every function here returns `Result<i32, Interrupted>`. A child result is
//! bound to a local, the move is unmade, and only then is the result checked
//! with `?`. Make/unmake therefore stays strictly LIFO when the search
//! unwinds, and nothing is written to the tables on the way out.

use super::heuristics::HeuristicTables;
use super::limits::{Interrupted, Limits};
use super::ordering::{order_moves, OrderContext};
use crate::constants::*;
use crate::evaluation::Evaluator;
use crate::position::Position;
use crate::tt::{Bound, TranspositionTable};
use crate::types::Move;

/// Node and cutoff counters for one decision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// All nodes, quiescence included
    pub nodes: u64,
    pub qnodes: u64,
    pub tt_hits: u64,
    pub beta_cutoffs: u64,
    pub null_cutoffs: u64,
}

/// Per-call search parameters
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub depth: i32,
    pub ply: usize,
    pub alpha: i32,
    pub beta: i32,
    pub previous: Option<Move>,
}

impl Frame {
    /// Full-window root call
    pub fn root(depth: i32) -> Self {
        Frame {
            depth,
            ply: 0,
            alpha: -INFINITY,
            beta: INFINITY,
            previous: None,
        }
    }

    fn child(&self, depth: i32, mv: Option<Move>, alpha: i32, beta: i32) -> Self {
        Frame {
            depth,
            ply: self.ply + 1,
            alpha,
            beta,
            previous: mv,
        }
    }
}

/// Score for the side to move being checkmated at `ply`
///
/// The recursion never goes past `MAX_PLY`, so the score stays far below any
/// static evaluation.
#[inline]
pub fn mated_score(ply: usize) -> i32 {
    -MATE_SCORE + ply.min(MAX_PLY) as i32 * MATE_PLY_STEP
}

/// Search context for one decision
pub struct Searcher<'a, P: Position + ?Sized> {
    pub(crate) pos: &'a mut P,
    pub(crate) tt: &'a mut TranspositionTable,
    pub(crate) tables: &'a mut HeuristicTables,
    pub(crate) evaluator: &'a mut Evaluator,
    pub(crate) limits: &'a Limits,
    pub(crate) null_move_min_pieces: u32,
    /// Best root move found so far; survives an interrupted iteration
    pub(crate) root_best: Option<Move>,
    pub(crate) stats: SearchStats,
}

impl<'a, P: Position + ?Sized> Searcher<'a, P> {
    pub fn new(
        pos: &'a mut P,
        tt: &'a mut TranspositionTable,
        tables: &'a mut HeuristicTables,
        evaluator: &'a mut Evaluator,
        limits: &'a Limits,
        null_move_min_pieces: u32,
    ) -> Self {
        Searcher {
            pos,
            tt,
            tables,
            evaluator,
            limits,
            null_move_min_pieces,
            root_best: None,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn root_best(&self) -> Option<Move> {
        self.root_best
    }

    /// Count a node and poll the limits
    #[inline]
    pub(crate) fn visit(&mut self) -> Result<(), Interrupted> {
        self.stats.nodes += 1;
        self.limits.poll(self.stats.nodes)
    }

    /// Legal moves of the current node, best first
    pub(crate) fn ordered_moves(
        &self,
        ply: usize,
        previous: Option<Move>,
        root_best: Option<Move>,
    ) -> Vec<Move> {
        let mut moves = self.pos.legal_moves();
        if moves.len() > 1 {
            let ctx = OrderContext {
                tables: &*self.tables,
                ply,
                previous,
                root_best,
            };
            order_moves(&*self.pos, &mut moves, Some(&ctx));
        }
        moves
    }

    /// Negamax alpha-beta. Returns a score from the side to move's point of
    /// view, fail-hard within (`alpha`, `beta`).
    pub fn search(&mut self, frame: Frame) -> Result<i32, Interrupted> {
        self.visit()?;

        let Frame {
            depth, ply, beta, ..
        } = frame;
        let mut alpha = frame.alpha;

        if self.pos.is_checkmate() {
            return Ok(mated_score(ply));
        }
        // The root is searched even when the game position already counts as
        // a draw (a repetition on the board, say): a move still has to be picked
        if ply != 0 && self.pos.is_draw() {
            return Ok(DRAW_SCORE);
        }

        let hash = self.pos.hash();
        if ply != 0 {
            if let Some(score) = self.tt.lookup(hash, depth, alpha, beta) {
                self.stats.tt_hits += 1;
                return Ok(score);
            }
        }

        // Internal iterative deepening: a shallow pass seeds the tables
        // (and the root best move) before the full-depth search
        if depth >= IID_MIN_DEPTH && !self.tt.contains(hash) {
            self.search(Frame {
                depth: depth / 2,
                ..frame
            })?;
        }

        let in_check = self.pos.is_in_check();
        let mut extend = i32::from(in_check);

        if depth <= 0 || ply >= MAX_PLY {
            return self.quiescence(alpha, beta);
        }

        if depth >= NULL_MOVE_MIN_DEPTH
            && !in_check
            && self.pos.piece_count() > self.null_move_min_pieces
            && self.pos.try_null_move()
        {
            let reduced = frame.child(depth - NULL_MOVE_REDUCTION, None, -beta, -beta + 1);
            let result = self.search(reduced);
            self.pos.undo_null_move();
            let score = -result?;
            if score >= beta {
                self.stats.null_cutoffs += 1;
                self.tt.store(hash, depth, Bound::LowerBound, score);
                return Ok(beta);
            }
        }

        let root_best = if ply == 0 && depth > 1 { self.root_best } else { None };
        let moves = self.ordered_moves(ply, frame.previous, root_best);
        if moves.is_empty() {
            // Not mate, so stalemate
            return Ok(DRAW_SCORE);
        }
        if moves.len() == 1 {
            // Single reply
            extend = 1;
        }

        let mut bound = Bound::UpperBound;
        for (index, mv) in moves.into_iter().enumerate() {
            self.pos.make_move(mv);
            let result = self.search_move(&frame, mv, index, extend, alpha);
            self.pos.unmake_move(mv);
            let score = result?;

            if score >= beta {
                if mv.is_quiet() {
                    self.tables.record_cutoff(mv, frame.previous, ply, depth);
                }
                self.stats.beta_cutoffs += 1;
                self.tt.store(hash, depth, Bound::LowerBound, score);
                return Ok(beta);
            }

            if score > alpha {
                alpha = score;
                bound = Bound::Exact;
                if ply == 0 {
                    self.root_best = Some(mv);
                }
            }
        }

        self.tt.store(hash, depth, bound, alpha);
        Ok(alpha)
    }

    /// Search the child reached by `mv` (already made), with late-move
    /// reduction for everything after the first two moves
    fn search_move(
        &mut self,
        frame: &Frame,
        mv: Move,
        index: usize,
        extend: i32,
        alpha: i32,
    ) -> Result<i32, Interrupted> {
        let depth = frame.depth;
        let window = |depth| frame.child(depth, Some(mv), -frame.beta, -alpha);

        if index >= LMR_MIN_MOVE_INDEX && depth >= LMR_MIN_DEPTH {
            let reduced = -self.search(window(depth - 2 + extend))?;
            if reduced <= alpha {
                return Ok(reduced);
            }
        }
        Ok(-self.search(window(depth - 1 + extend))?)
    }
}
