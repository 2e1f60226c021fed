//! Static position evaluation
//!
//! Scores a position in centipawns, positive favouring White. The score is a
//! sum of independent terms, each computed for both sides with sign ±1:
//!
//! - Material: piece count × piece value
//! - Mobility: attacked squares × per-kind weight (early or late weights)
//! - Pawn structure: doubled, isolated and passed pawns
//! - Castling: king on g1/c1 (g8/c8), only between plies 16 and 30
//! - Mop-up: with seven or fewer pieces, pull the strong king towards the
//!   weak one and push the weak king away from the centre
//!
//! Finally a jitter of -1, 0 or +1 is added so that otherwise equal moves are
//! not always resolved the same way. Jitter can be disabled, seeded, or
//! seeded from OS entropy; see [`Jitter`].
//!
//! ## Module Organization
//!
//! - `material` - Material count and mobility
//! - `pawns` - Pawn-structure terms
//! - `king` - Castling bonus and mop-up

mod king;
mod material;
mod pawns;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{EvalConfig, Jitter};
use crate::position::Position;
use crate::types::Side;

pub use king::{castling_bonus, centre_distance, mop_up};
pub use material::{evaluate_material, evaluate_mobility, is_endgame, mobility_weights};
pub use pawns::{evaluate_pawns, passed_pawn_mask};

/// Deterministic part of the evaluation, White-oriented
pub fn evaluate_static<P: Position + ?Sized>(pos: &P) -> i32 {
    let weights = mobility_weights(pos);
    let mut eval = 0;

    for side in Side::BOTH {
        let side_score = evaluate_material(pos, side)
            + evaluate_mobility(pos, side, weights)
            + evaluate_pawns(pos, side);
        eval += side_score * side.sign();
    }

    eval += castling_bonus(pos);
    eval += mop_up(pos, eval);
    eval
}

/// Static evaluator with its tie-break noise source
pub struct Evaluator {
    rng: Option<StdRng>,
}

impl Evaluator {
    pub fn new(config: &EvalConfig) -> Self {
        let rng = match config.jitter {
            Jitter::Disabled => None,
            Jitter::Seeded(seed) => Some(StdRng::seed_from_u64(seed)),
            Jitter::Entropy => Some(StdRng::from_os_rng()),
        };
        Evaluator { rng }
    }

    /// Full evaluation, White-oriented
    pub fn evaluate<P: Position + ?Sized>(&mut self, pos: &P) -> i32 {
        evaluate_static(pos) + self.jitter()
    }

    /// Full evaluation from the side to move's point of view
    pub fn evaluate_relative<P: Position + ?Sized>(&mut self, pos: &P) -> i32 {
        self.evaluate(pos) * pos.side_to_move().sign()
    }

    fn jitter(&mut self) -> i32 {
        match self.rng.as_mut() {
            Some(rng) => rng.random_range(-1..=1),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ShakmatyBoard;

    fn quiet() -> Evaluator {
        Evaluator::new(&EvalConfig {
            jitter: Jitter::Disabled,
        })
    }

    #[test]
    fn test_starting_position_is_balanced() {
        let pos = ShakmatyBoard::new();
        assert_eq!(quiet().evaluate(&pos), 0);
    }

    #[test]
    fn test_relative_flips_for_black() {
        let white = ShakmatyBoard::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        let black = ShakmatyBoard::from_fen("4k3/8/8/8/8/8/8/3QK3 b - - 0 1").unwrap();
        let mut eval = quiet();
        let score = eval.evaluate(&white);
        assert!(score > 900);
        assert_eq!(eval.evaluate_relative(&white), score);
        assert_eq!(eval.evaluate_relative(&black), -eval.evaluate(&black));
    }

    #[test]
    fn test_jitter_stays_within_one() {
        let pos = ShakmatyBoard::new();
        let mut eval = Evaluator::new(&EvalConfig {
            jitter: Jitter::Seeded(11),
        });
        for _ in 0..200 {
            assert!((-1..=1).contains(&eval.evaluate(&pos)));
        }
    }

    #[test]
    fn test_seeded_jitter_is_reproducible() {
        let pos = ShakmatyBoard::new();
        let config = EvalConfig {
            jitter: Jitter::Seeded(42),
        };
        let mut a = Evaluator::new(&config);
        let mut b = Evaluator::new(&config);
        let first: Vec<i32> = (0..32).map(|_| a.evaluate(&pos)).collect();
        let second: Vec<i32> = (0..32).map(|_| b.evaluate(&pos)).collect();
        assert_eq!(first, second);
    }
}
