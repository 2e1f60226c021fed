//! # tempo_engine
//!
//! Chooses a move for the side to move in a chess position within a time
//! budget: iterative-deepening negamax with a transposition table, quiescence
//! search, history/killer/countermove ordering and a hand-tuned static
//! evaluator.
//!
//! Rules (move generation, check and draw detection, hashing) come from a
//! [`Position`] implementation; [`ShakmatyBoard`] is the one shipped here.

pub mod api;
pub mod bitset;
pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod evaluation;
pub mod position;
pub mod search;
pub mod tt;
pub mod types;

pub use api::Engine;
pub use board::ShakmatyBoard;
pub use config::{
    BookConfig, EngineConfig, EvalConfig, HistoryPolicy, Jitter, Replacement, SearchConfig,
    TtConfig,
};
pub use error::{EngineError, EngineResult};
pub use position::Position;
pub use search::{DecisionKind, SearchReport, SearchStats, StopFlag, TimeBudget};
pub use types::{Move, PieceKind, Side, Square};
