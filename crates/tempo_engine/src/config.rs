//! Engine configuration
//!
//! Every tunable the engine reads at runtime lives in [`EngineConfig`]. The
//! structure deserializes from JSON with `#[serde(default)]` on every level,
//! so a settings file only needs the keys it wants to change:
//!
//! ```json
//! { "tt": { "entries": 1048576 }, "eval": { "jitter": { "seeded": 7 } } }
//! ```
//!
//! Load failures are reported as [`EngineError`] rather than silently falling
//! back to defaults; callers that want the fallback use
//! `EngineConfig::load(path).unwrap_or_default()`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::*;
use crate::error::{EngineError, EngineResult};
use crate::types::parse_square;

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub tt: TtConfig,
    pub eval: EvalConfig,
    pub book: BookConfig,
}

/// Search limits and heuristic switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Deepest iteration the driver will start (1..=200)
    pub max_depth: u32,
    /// Poll the clock and stop flag every this many nodes
    pub node_check_interval: u64,
    /// Hard limit per decision = remaining time / this
    pub allotted_divisor: u64,
    /// No new iteration starts after allotted / this has elapsed
    pub threshold_divisor: u64,
    /// Null-move pruning needs strictly more pieces than this on the board
    pub null_move_min_pieces: u32,
    /// What happens to history scores between two decisions
    pub history_policy: HistoryPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: MAX_DEPTH,
            node_check_interval: DEFAULT_NODE_CHECK_INTERVAL,
            allotted_divisor: ALLOTTED_TIME_DIVISOR,
            threshold_divisor: THRESHOLD_DIVISOR,
            null_move_min_pieces: NULL_MOVE_MIN_PIECES,
            history_policy: HistoryPolicy::Halve,
        }
    }
}

/// History aging between independent move decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryPolicy {
    Keep,
    Halve,
    Clear,
}

/// Transposition table sizing and replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TtConfig {
    /// Number of slots; the index is `hash % entries`
    pub entries: usize,
    pub replacement: Replacement,
}

impl Default for TtConfig {
    fn default() -> Self {
        TtConfig {
            entries: DEFAULT_TT_ENTRIES,
            replacement: Replacement::Always,
        }
    }
}

/// Slot replacement policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Replacement {
    /// Unconditional overwrite
    Always,
    /// Keep an entry for a different position if it was searched deeper
    DepthPreferred,
}

/// Evaluator options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    pub jitter: Jitter,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            jitter: Jitter::Entropy,
        }
    }
}

/// Tie-break noise added to every static evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jitter {
    /// No noise; evaluation is deterministic
    Disabled,
    /// Reproducible noise from a fixed seed
    Seeded(u64),
    /// Noise seeded from the operating system
    Entropy,
}

/// The two hardcoded opening plies, in coordinate notation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    pub enabled: bool,
    /// White's first move
    pub white_first: String,
    /// Black's first move when its destination is not attacked
    pub black_reply: String,
    /// Black's first move otherwise
    pub black_fallback: String,
}

impl Default for BookConfig {
    fn default() -> Self {
        BookConfig {
            enabled: true,
            white_first: "e2e4".to_string(),
            black_reply: "e7e5".to_string(),
            black_fallback: "d7d5".to_string(),
        }
    }
}

impl EngineConfig {
    /// Small, deterministic configuration: 2^16 TT slots, no jitter, no book
    pub fn for_tests() -> Self {
        EngineConfig {
            tt: TtConfig {
                entries: 1 << 16,
                ..TtConfig::default()
            },
            eval: EvalConfig {
                jitter: Jitter::Disabled,
            },
            book: BookConfig {
                enabled: false,
                ..BookConfig::default()
            },
            ..EngineConfig::default()
        }
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        info!("[CONFIG] Loaded engine configuration from {:?}", path);
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json_string(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check value ranges
    pub fn validate(&self) -> EngineResult<()> {
        let fail = |message: String| Err(EngineError::Config { message });

        if self.tt.entries == 0 {
            return fail("tt.entries must be greater than zero".to_string());
        }
        if self.search.max_depth == 0 || self.search.max_depth > MAX_DEPTH {
            return fail(format!(
                "search.max_depth must be within 1..={MAX_DEPTH}, got {}",
                self.search.max_depth
            ));
        }
        if self.search.node_check_interval == 0 {
            return fail("search.node_check_interval must be greater than zero".to_string());
        }
        if self.search.allotted_divisor == 0 || self.search.threshold_divisor == 0 {
            return fail("search time divisors must be greater than zero".to_string());
        }
        for (key, text) in [
            ("book.white_first", &self.book.white_first),
            ("book.black_reply", &self.book.black_reply),
            ("book.black_fallback", &self.book.black_fallback),
        ] {
            if !is_coordinate_move(text) {
                return fail(format!("{key} is not a coordinate move: '{text}'"));
            }
        }
        Ok(())
    }
}

fn is_coordinate_move(text: &str) -> bool {
    text.len() == 4
        && text.is_char_boundary(2)
        && parse_square(&text[..2]).is_some()
        && parse_square(&text[2..]).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tt.entries, DEFAULT_TT_ENTRIES);
        assert_eq!(config.tt.replacement, Replacement::Always);
        assert_eq!(config.search.max_depth, 200);
        assert_eq!(config.eval.jitter, Jitter::Entropy);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "tt": { "entries": 1024 }, "eval": { "jitter": { "seeded": 7 } } }"#;
        let config = EngineConfig::from_json_str(json).unwrap();
        assert_eq!(config.tt.entries, 1024);
        assert_eq!(config.tt.replacement, Replacement::Always);
        assert_eq!(config.eval.jitter, Jitter::Seeded(7));
        assert_eq!(config.search, SearchConfig::default());
        assert!(config.book.enabled);
    }

    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig::for_tests();
        let json = config.to_json_string().unwrap();
        assert_eq!(EngineConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_zero_table() {
        let err = EngineConfig::from_json_str(r#"{ "tt": { "entries": 0 } }"#).unwrap_err();
        assert!(matches!(err, EngineError::Config { .. }));
    }

    #[test]
    fn test_rejects_depth_over_cap() {
        let err = EngineConfig::from_json_str(r#"{ "search": { "max_depth": 201 } }"#).unwrap_err();
        assert!(matches!(err, EngineError::Config { .. }));
    }

    #[test]
    fn test_rejects_bad_book_move() {
        let err =
            EngineConfig::from_json_str(r#"{ "book": { "white_first": "e2-e4" } }"#).unwrap_err();
        assert!(matches!(err, EngineError::Config { .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = EngineConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, EngineError::ConfigParse(_)));
    }
}
