//! Iterative deepening search
//!
//! Runs full-window searches at depth 1, 2, 3, ... until the soft time
//! threshold has passed, the configured depth cap is reached, or an iteration
//! is interrupted. Each completed iteration seeds the next through the
//! transposition table, the heuristic tables and the root best move, which
//! the orderer tries first.
//!
//! The move returned is the last root best move recorded, including one
//! recorded by an iteration that was later interrupted. Depth 1 always
//! starts, whatever the clock says; if even that produced nothing, the first
//! move of the ordered root list is played.

use std::fmt;

use tracing::{info, warn};

use super::alphabeta::{Frame, SearchStats, Searcher};
use super::limits::Interrupted;
use crate::position::Position;
use crate::types::Move;

/// How a decision was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
    /// Only one legal move; nothing was searched
    Forced,
    /// Taken from the opening book
    Book,
    /// Chosen by iterative deepening
    Searched,
}

/// Outcome of one decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub best_move: Move,
    pub kind: DecisionKind,
    /// Deepest fully completed iteration
    pub depth: u32,
    /// Root score of the deepest completed iteration, side to move's view
    pub score: Option<i32>,
    pub stats: SearchStats,
    pub elapsed_ms: u64,
    /// The last iteration started was cut off by the clock or the stop flag
    pub interrupted: bool,
}

impl SearchReport {
    /// Report for a decision made without searching
    pub fn immediate(best_move: Move, kind: DecisionKind) -> Self {
        SearchReport {
            best_move,
            kind,
            depth: 0,
            score: None,
            stats: SearchStats::default(),
            elapsed_ms: 0,
            interrupted: false,
        }
    }
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bestmove {} ({:?}) depth {} score {} nodes {} qnodes {} tthits {} cutoffs {} \
             time {}ms{}",
            self.best_move,
            self.kind,
            self.depth,
            self.score.map_or_else(|| "-".to_string(), |s| s.to_string()),
            self.stats.nodes,
            self.stats.qnodes,
            self.stats.tt_hits,
            self.stats.beta_cutoffs,
            self.elapsed_ms,
            if self.interrupted { " (interrupted)" } else { "" }
        )
    }
}

/// Deepen until the limits say stop; `None` only if the root has no moves
pub fn iterative_deepening<P: Position + ?Sized>(
    searcher: &mut Searcher<'_, P>,
    max_depth: u32,
) -> Option<SearchReport> {
    let clock = searcher.limits.clock;
    let mut completed = 0;
    let mut score = None;
    let mut interrupted = false;

    for depth in 1..=max_depth {
        if depth > 1 && clock.soft_expired() {
            break;
        }

        match searcher.search(Frame::root(depth as i32)) {
            Ok(value) => {
                completed = depth;
                score = Some(value);
                info!(
                    "[SEARCH] depth {} time {}ms nodes {} pv {} score {}",
                    depth,
                    clock.elapsed_ms(),
                    searcher.stats.nodes,
                    searcher
                        .root_best
                        .map_or_else(|| "-".to_string(), |mv| mv.coordinate()),
                    value
                );
            }
            Err(Interrupted) => {
                interrupted = true;
                warn!(
                    "[SEARCH] Depth {} interrupted after {}ms ({} nodes)",
                    depth,
                    clock.elapsed_ms(),
                    searcher.stats.nodes
                );
                break;
            }
        }
    }

    let best_move = match searcher.root_best {
        Some(mv) => mv,
        None => {
            warn!("[SEARCH] No root move recorded, playing first ordered move");
            searcher.ordered_moves(0, None, None).into_iter().next()?
        }
    };

    Some(SearchReport {
        best_move,
        kind: DecisionKind::Searched,
        depth: completed,
        score,
        stats: searcher.stats,
        elapsed_ms: clock.elapsed_ms(),
        interrupted,
    })
}
