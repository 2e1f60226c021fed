//! Public API for the engine
//!
//! [`Engine`] is the long-lived session object. It owns the transposition
//! table, the heuristic tables, the evaluator and the configuration, and
//! keeps them across decisions so that each search starts from what the
//! previous ones learned. A host creates one engine per game (or calls
//! [`Engine::new_game`] between games) and calls [`Engine::choose_move`] each
//! time it is the engine's turn.
//!
//! ```no_run
//! use tempo_engine::{Engine, EngineConfig, ShakmatyBoard, TimeBudget};
//!
//! let mut engine = Engine::new(EngineConfig::default())?;
//! let mut board = ShakmatyBoard::new();
//! let mv = engine.choose_move(&mut board, TimeBudget::from_millis(60_000))?;
//! println!("{mv}");
//! # Ok::<(), tempo_engine::EngineError>(())
//! ```

use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::evaluation::Evaluator;
use crate::position::Position;
use crate::search::{
    book_move, iterative_deepening, DecisionKind, HeuristicTables, Limits, SearchClock,
    SearchReport, Searcher, StopFlag, TimeBudget,
};
use crate::tt::TranspositionTable;
use crate::types::Move;

/// Move-choosing engine with state that persists across decisions
pub struct Engine {
    config: EngineConfig,
    tt: TranspositionTable,
    tables: HeuristicTables,
    evaluator: Evaluator,
    stop: StopFlag,
}

impl Engine {
    /// Validate `config` and allocate the transposition table
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        info!(
            "[ENGINE] Starting with {} TT slots, max depth {}",
            config.tt.entries, config.search.max_depth
        );
        Ok(Engine {
            tt: TranspositionTable::new(&config.tt),
            tables: HeuristicTables::default(),
            evaluator: Evaluator::new(&config.eval),
            stop: StopFlag::new(),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn transposition_table(&self) -> &TranspositionTable {
        &self.tt
    }

    pub fn heuristics(&self) -> &HeuristicTables {
        &self.tables
    }

    /// Handle for stopping a decision from another thread. A raised flag
    /// stops the decision in progress, or the next one if none is running,
    /// and is lowered again when that decision returns.
    pub fn stop_handle(&self) -> StopFlag {
        self.stop.clone()
    }

    /// Forget everything learned in the previous game
    pub fn new_game(&mut self) {
        self.tt.clear();
        self.tables.clear();
        info!("[ENGINE] New game: transposition and heuristic tables cleared");
    }

    /// Pick a move for the side to move in `pos`
    ///
    /// `pos` is used as scratch space during the search and is returned to
    /// its original state before this returns.
    ///
    /// # Errors
    ///
    /// [`EngineError::NoLegalMoves`] if the side to move is checkmated or
    /// stalemated.
    pub fn choose_move<P: Position + ?Sized>(
        &mut self,
        pos: &mut P,
        budget: TimeBudget,
    ) -> EngineResult<Move> {
        Ok(self.think(pos, budget)?.best_move)
    }

    /// Like [`choose_move`](Self::choose_move), with the full search report
    pub fn think<P: Position + ?Sized>(
        &mut self,
        pos: &mut P,
        budget: TimeBudget,
    ) -> EngineResult<SearchReport> {
        let legal = pos.legal_moves();
        match legal.as_slice() {
            [] => return Err(EngineError::NoLegalMoves),
            [only] => {
                debug!("[ENGINE] Forced move {}", only);
                return Ok(SearchReport::immediate(*only, DecisionKind::Forced));
            }
            _ => {}
        }

        if let Some(mv) = book_move(&*pos, &self.config.book, &legal) {
            debug!("[BOOK] Playing book move {}", mv);
            return Ok(SearchReport::immediate(mv, DecisionKind::Book));
        }

        self.tables.begin_decision(self.config.search.history_policy);
        self.tt.reset_stats();

        let clock = SearchClock::start(budget, &self.config.search);
        let limits = Limits::new(clock, self.stop.clone(), self.config.search.node_check_interval);
        let report = {
            let mut searcher = Searcher::new(
                pos,
                &mut self.tt,
                &mut self.tables,
                &mut self.evaluator,
                &limits,
                self.config.search.null_move_min_pieces,
            );
            iterative_deepening(&mut searcher, self.config.search.max_depth)
        };
        self.stop.reset();

        let report = report.ok_or(EngineError::NoLegalMoves)?;
        info!("[ENGINE] {} hashfull {}", report, self.tt.hashfull());
        Ok(report)
    }
}
