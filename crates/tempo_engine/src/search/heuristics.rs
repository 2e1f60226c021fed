//! History, killer and countermove tables
//!
//! The three tables are written only when a quiet move causes a beta cutoff
//! in a search that ran to completion, and read by the move orderer. They are
//! owned by the [`Engine`](crate::api::Engine) and survive between decisions
//! subject to [`HeuristicTables::begin_decision`]:
//!
//! - history is aged according to the configured [`HistoryPolicy`]
//! - killers are cleared (they are indexed by ply, which means nothing across
//!   two different root positions)
//! - countermoves are kept
//!
//! [`HeuristicTables::clear`] resets everything for a new game.

use crate::config::HistoryPolicy;
use crate::constants::MAX_PLY;
use crate::types::{Move, PieceKind, Square};

/// (moving piece kind, destination) → accumulated cutoff score
pub struct HistoryTable {
    scores: [[i32; 64]; 7],
}

impl Default for HistoryTable {
    fn default() -> Self {
        HistoryTable {
            scores: [[0; 64]; 7],
        }
    }
}

impl HistoryTable {
    #[inline]
    pub fn get(&self, piece: PieceKind, to: Square) -> i32 {
        self.scores[piece.index()][to as usize]
    }

    /// Reward a cutoff at `depth` with `depth²`, saturating
    pub fn reward(&mut self, piece: PieceKind, to: Square, depth: i32) {
        let slot = &mut self.scores[piece.index()][to as usize];
        *slot = slot.saturating_add(depth.saturating_mul(depth));
    }

    pub fn age(&mut self, policy: HistoryPolicy) {
        match policy {
            HistoryPolicy::Keep => {}
            HistoryPolicy::Halve => self
                .scores
                .iter_mut()
                .flatten()
                .for_each(|score| *score /= 2),
            HistoryPolicy::Clear => self.clear(),
        }
    }

    pub fn clear(&mut self) {
        self.scores = [[0; 64]; 7];
    }
}

/// Two most recent cutoff moves per ply, most recent first
pub struct KillerTable {
    slots: Vec<[Option<Move>; 2]>,
}

impl Default for KillerTable {
    fn default() -> Self {
        KillerTable {
            slots: vec![[None; 2]; MAX_PLY],
        }
    }
}

impl KillerTable {
    pub fn get(&self, ply: usize) -> [Option<Move>; 2] {
        self.slots.get(ply).copied().unwrap_or([None; 2])
    }

    pub fn is_killer(&self, ply: usize, mv: Move) -> bool {
        self.get(ply).contains(&Some(mv))
    }

    /// Push `mv` to the front of the slot. Re-recording the current first
    /// killer is a no-op so the two entries never hold the same move.
    pub fn record(&mut self, ply: usize, mv: Move) {
        let Some(slot) = self.slots.get_mut(ply) else {
            return;
        };
        if slot[0] == Some(mv) {
            return;
        }
        slot[1] = slot[0];
        slot[0] = Some(mv);
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = [None; 2]);
    }
}

/// (previous move origin, previous move destination) → refutation
pub struct CountermoveTable {
    replies: Vec<Option<Move>>,
}

impl Default for CountermoveTable {
    fn default() -> Self {
        CountermoveTable {
            replies: vec![None; 64 * 64],
        }
    }
}

impl CountermoveTable {
    #[inline]
    fn index(previous: Move) -> usize {
        previous.from() as usize * 64 + previous.to() as usize
    }

    pub fn get(&self, previous: Move) -> Option<Move> {
        self.replies[Self::index(previous)]
    }

    pub fn record(&mut self, previous: Move, reply: Move) {
        self.replies[Self::index(previous)] = Some(reply);
    }

    pub fn clear(&mut self) {
        self.replies.iter_mut().for_each(|reply| *reply = None);
    }
}

/// All ordering heuristics learned by the search
#[derive(Default)]
pub struct HeuristicTables {
    pub history: HistoryTable,
    pub killers: KillerTable,
    pub countermoves: CountermoveTable,
}

impl HeuristicTables {
    /// Prepare for a new decision on an unrelated root position
    pub fn begin_decision(&mut self, policy: HistoryPolicy) {
        self.history.age(policy);
        self.killers.clear();
    }

    /// Record a beta cutoff caused by the quiet move `mv`
    pub fn record_cutoff(&mut self, mv: Move, previous: Option<Move>, ply: usize, depth: i32) {
        self.killers.record(ply, mv);
        if let Some(previous) = previous {
            self.countermoves.record(previous, mv);
        }
        self.history.reward(mv.piece(), mv.to(), depth);
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.killers.clear();
        self.countermoves.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_square;

    fn sq(name: &str) -> Square {
        parse_square(name).unwrap()
    }

    fn knight(from: &str, to: &str) -> Move {
        Move::new(PieceKind::Knight, sq(from), sq(to))
    }

    #[test]
    fn test_history_accumulates_depth_squared() {
        let mut history = HistoryTable::default();
        history.reward(PieceKind::Knight, sq("f3"), 3);
        history.reward(PieceKind::Knight, sq("f3"), 2);
        assert_eq!(history.get(PieceKind::Knight, sq("f3")), 13);
        assert_eq!(history.get(PieceKind::Bishop, sq("f3")), 0);
    }

    #[test]
    fn test_history_aging_policies() {
        let mut history = HistoryTable::default();
        history.reward(PieceKind::Pawn, sq("e4"), 4);

        history.age(HistoryPolicy::Keep);
        assert_eq!(history.get(PieceKind::Pawn, sq("e4")), 16);
        history.age(HistoryPolicy::Halve);
        assert_eq!(history.get(PieceKind::Pawn, sq("e4")), 8);
        history.age(HistoryPolicy::Clear);
        assert_eq!(history.get(PieceKind::Pawn, sq("e4")), 0);
    }

    #[test]
    fn test_killers_most_recent_first_without_duplicates() {
        let mut killers = KillerTable::default();
        let a = knight("g1", "f3");
        let b = knight("b1", "c3");

        killers.record(4, a);
        killers.record(4, a);
        assert_eq!(killers.get(4), [Some(a), None]);

        killers.record(4, b);
        assert_eq!(killers.get(4), [Some(b), Some(a)]);
        assert!(killers.is_killer(4, a));
        assert!(!killers.is_killer(5, a));
    }

    #[test]
    fn test_killers_ignore_out_of_range_ply() {
        let mut killers = KillerTable::default();
        killers.record(MAX_PLY + 3, knight("g1", "f3"));
        assert_eq!(killers.get(MAX_PLY + 3), [None, None]);
    }

    #[test]
    fn test_begin_decision_keeps_countermoves() {
        let mut tables = HeuristicTables::default();
        let previous = knight("g8", "f6");
        let reply = knight("g1", "f3");
        tables.record_cutoff(reply, Some(previous), 1, 3);

        tables.begin_decision(HistoryPolicy::Halve);
        assert_eq!(tables.countermoves.get(previous), Some(reply));
        assert_eq!(tables.killers.get(1), [None, None]);
        assert_eq!(tables.history.get(PieceKind::Knight, sq("f3")), 4);

        tables.clear();
        assert_eq!(tables.countermoves.get(previous), None);
        assert_eq!(tables.history.get(PieceKind::Knight, sq("f3")), 0);
    }
}
