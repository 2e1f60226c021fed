//! Transposition table
//!
//! A fixed-size array of slots indexed by `hash % entries`. There is no
//! chaining and no probing: a store lands in exactly one slot and, under the
//! default [`Replacement::Always`] policy, overwrites whatever was there.
//!
//! A lookup is only trusted when the stored 64-bit hash equals the requested hash,
//! so two positions sharing a slot never read each other's scores. Two
//! different positions with the *same* 64-bit hash still alias; with random
//! Zobrist keys the chance of that for any given pair is 2^-64, which the
//! engine accepts rather than guards against.
//!
//! Memory: one slot is 16 bytes (`Option<TtEntry>` uses the [`Bound`] niche),
//! so the default 16,000,000 slots take ~256 MB.

use tracing::debug;

use crate::config::{Replacement, TtConfig};

/// How a stored score relates to the true minimax value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The score is the exact value
    Exact,
    /// Fail-high: true value >= score
    LowerBound,
    /// Fail-low: true value <= score
    UpperBound,
}

/// One cached search result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtEntry {
    pub hash: u64,
    pub score: i32,
    pub depth: u8,
    pub bound: Bound,
}

impl TtEntry {
    /// Can this entry answer a search of `depth` with window (`alpha`, `beta`)?
    #[inline]
    pub fn usable(&self, depth: i32, alpha: i32, beta: i32) -> bool {
        if i32::from(self.depth) < depth {
            return false;
        }
        match self.bound {
            Bound::Exact => true,
            Bound::LowerBound => self.score >= beta,
            Bound::UpperBound => self.score <= alpha,
        }
    }
}

/// Lookup statistics, reset per decision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TtStats {
    pub lookups: u64,
    pub hits: u64,
    pub stores: u64,
    pub overwrites: u64,
}

/// Fixed-size transposition table
pub struct TranspositionTable {
    entries: Vec<Option<TtEntry>>,
    replacement: Replacement,
    stats: TtStats,
}

impl TranspositionTable {
    /// Allocate `config.entries` empty slots (at least one)
    pub fn new(config: &TtConfig) -> Self {
        let size = config.entries.max(1);
        debug!(
            "[TT] Allocating {} slots ({} MB)",
            size,
            size * std::mem::size_of::<Option<TtEntry>>() / (1024 * 1024)
        );
        TranspositionTable {
            entries: vec![None; size],
            replacement: config.replacement,
            stats: TtStats::default(),
        }
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash % self.entries.len() as u64) as usize
    }

    /// Number of slots
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Entry stored for exactly this hash, regardless of depth or bound
    pub fn get(&self, hash: u64) -> Option<TtEntry> {
        self.entries[self.index(hash)].filter(|entry| entry.hash == hash)
    }

    /// Is there any entry for this exact position?
    pub fn contains(&self, hash: u64) -> bool {
        self.get(hash).is_some()
    }

    /// Stored score if the entry for `hash` is deep enough and its bound is
    /// usable inside (`alpha`, `beta`)
    pub fn lookup(&mut self, hash: u64, depth: i32, alpha: i32, beta: i32) -> Option<i32> {
        self.stats.lookups += 1;
        let entry = self.get(hash)?;
        if entry.usable(depth, alpha, beta) {
            self.stats.hits += 1;
            Some(entry.score)
        } else {
            None
        }
    }

    /// Store a result according to the replacement policy
    pub fn store(&mut self, hash: u64, depth: i32, bound: Bound, score: i32) {
        let index = self.index(hash);
        let entry = TtEntry {
            hash,
            score,
            depth: depth.clamp(0, i32::from(u8::MAX)) as u8,
            bound,
        };

        let slot = &mut self.entries[index];
        if let Some(existing) = slot {
            if existing.hash != hash {
                if self.replacement == Replacement::DepthPreferred && existing.depth > entry.depth
                {
                    return;
                }
                self.stats.overwrites += 1;
            }
        }
        *slot = Some(entry);
        self.stats.stores += 1;
    }

    /// Empty every slot
    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(|slot| *slot = None);
        self.stats = TtStats::default();
    }

    pub fn stats(&self) -> TtStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = TtStats::default();
    }

    /// Slots in use, per mille, sampled from the first 1000 slots
    pub fn hashfull(&self) -> u32 {
        let sample = self.entries.len().min(1000);
        let used = self.entries[..sample].iter().filter(|s| s.is_some()).count();
        (used * 1000 / sample.max(1)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: usize, replacement: Replacement) -> TranspositionTable {
        TranspositionTable::new(&TtConfig {
            entries,
            replacement,
        })
    }

    #[test]
    fn test_slot_is_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<Option<TtEntry>>(), 16);
    }

    #[test]
    fn test_exact_entry_returns_stored_score() {
        let mut tt = table(1024, Replacement::Always);
        tt.store(0xDEAD_BEEF, 5, Bound::Exact, 42);

        // Any depth <= stored depth and any window
        for depth in 0..=5 {
            assert_eq!(tt.lookup(0xDEAD_BEEF, depth, -100, 100), Some(42));
            assert_eq!(tt.lookup(0xDEAD_BEEF, depth, 50, 60), Some(42));
        }
        assert_eq!(tt.lookup(0xDEAD_BEEF, 6, -100, 100), None);
    }

    #[test]
    fn test_lower_bound_needs_score_at_least_beta() {
        let mut tt = table(1024, Replacement::Always);
        tt.store(7, 3, Bound::LowerBound, 200);

        assert_eq!(tt.lookup(7, 3, 0, 150), Some(200));
        assert_eq!(tt.lookup(7, 3, 0, 200), Some(200));
        assert_eq!(tt.lookup(7, 3, 0, 250), None);
    }

    #[test]
    fn test_upper_bound_needs_score_at_most_alpha() {
        let mut tt = table(1024, Replacement::Always);
        tt.store(9, 3, Bound::UpperBound, -50);

        assert_eq!(tt.lookup(9, 2, -40, 100), Some(-50));
        assert_eq!(tt.lookup(9, 2, -50, 100), Some(-50));
        assert_eq!(tt.lookup(9, 2, -60, 100), None);
    }

    #[test]
    fn test_aliased_slot_requires_exact_hash() {
        let mut tt = table(16, Replacement::Always);
        tt.store(3, 4, Bound::Exact, 10);
        // 19 % 16 == 3: same slot, different position
        assert_eq!(tt.lookup(19, 1, -100, 100), None);
        assert!(!tt.contains(19));
        assert!(tt.contains(3));
    }

    #[test]
    fn test_always_replacement_overwrites() {
        let mut tt = table(16, Replacement::Always);
        tt.store(3, 10, Bound::Exact, 10);
        tt.store(19, 1, Bound::Exact, 20);
        assert!(!tt.contains(3));
        assert_eq!(tt.get(19).map(|e| e.score), Some(20));
        assert_eq!(tt.stats().overwrites, 1);
    }

    #[test]
    fn test_depth_preferred_keeps_deeper_entry() {
        let mut tt = table(16, Replacement::DepthPreferred);
        tt.store(3, 10, Bound::Exact, 10);
        tt.store(19, 1, Bound::Exact, 20);
        assert!(tt.contains(3));
        assert!(!tt.contains(19));

        // Same position always refreshes
        tt.store(3, 2, Bound::UpperBound, 5);
        assert_eq!(tt.get(3).map(|e| e.bound), Some(Bound::UpperBound));
    }

    #[test]
    fn test_clear_empties_table() {
        let mut tt = table(64, Replacement::Always);
        for hash in 0..64u64 {
            tt.store(hash, 1, Bound::Exact, hash as i32);
        }
        assert_eq!(tt.hashfull(), 1000);
        tt.clear();
        assert_eq!(tt.hashfull(), 0);
        assert!(!tt.contains(5));
    }

    #[test]
    fn test_depth_is_clamped_to_byte() {
        let mut tt = table(8, Replacement::Always);
        tt.store(1, 500, Bound::Exact, 0);
        assert_eq!(tt.get(1).map(|e| e.depth), Some(255));
    }
}
