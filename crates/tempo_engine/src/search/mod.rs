//! Alpha-beta search with iterative deepening
//!
//! This module implements the engine's search using:
//! - Negamax alpha-beta with a transposition table
//! - Internal iterative deepening, null-move pruning, late-move reduction
//! - Check and single-reply extensions
//! - Quiescence search over captures
//! - Move ordering from history, killer and countermove tables
//! - Iterative deepening under a time budget with cooperative cancellation
//!
//! ## Module Organization
//!
//! - `alphabeta` - Searcher context and the negamax recursion
//! - `quiescence` - Capture-only search at the leaves
//! - `ordering` - Move scoring and sorting
//! - `heuristics` - History, killer and countermove tables
//! - `limits` - Time budget, clock and stop flag
//! - `book` - Two-ply opening book
//! - `iterative` - Iterative deepening driver and search report

mod alphabeta;
mod book;
mod heuristics;
mod iterative;
mod limits;
mod ordering;
mod quiescence;

pub use alphabeta::{mated_score, Frame, SearchStats, Searcher};
pub use book::book_move;
pub use heuristics::{CountermoveTable, HeuristicTables, HistoryTable, KillerTable};
pub use iterative::{iterative_deepening, DecisionKind, SearchReport};
pub use limits::{Interrupted, Limits, SearchClock, StopFlag, TimeBudget};
pub use ordering::{order_moves, score_move, OrderContext};
