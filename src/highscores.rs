//! Best-result table
//!
//! Persisted to LocalStorage, tracks the top 10 completed games ordered by
//! fewest moves, ties broken by fastest time.

use serde::{Deserialize, Serialize};

/// Maximum number of results to keep
pub const MAX_RESULTS: usize = 10;

/// A single completed-game result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    /// Drags that changed a piece's position
    pub moves: u32,
    /// Whole seconds from first drag to win
    pub seconds: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

impl ResultEntry {
    /// Ranking key: fewer moves beat more moves, then faster beats slower
    fn rank_key(&self) -> (u32, u64) {
        (self.moves, self.seconds)
    }
}

/// Best-result leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BestResults {
    pub entries: Vec<ResultEntry>,
}

impl BestResults {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "slide_escape_results";

    /// Create an empty table
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a result qualifies for the table
    pub fn qualifies(&self, moves: u32, seconds: u64) -> bool {
        if moves == 0 {
            return false;
        }
        if self.entries.len() < MAX_RESULTS {
            return true;
        }
        self.entries
            .last()
            .map(|e| (moves, seconds) < e.rank_key())
            .unwrap_or(true)
    }

    /// Rank a result would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, moves: u32, seconds: u64) -> Option<usize> {
        if !self.qualifies(moves, seconds) {
            return None;
        }
        let rank = self
            .entries
            .iter()
            .position(|e| (moves, seconds) < e.rank_key());
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a result (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn add_result(&mut self, moves: u32, seconds: u64, timestamp: f64) -> Option<usize> {
        if !self.qualifies(moves, seconds) {
            return None;
        }

        let entry = ResultEntry {
            moves,
            seconds,
            timestamp,
        };

        let pos = self
            .entries
            .iter()
            .position(|e| entry.rank_key() < e.rank_key());
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_RESULTS);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best result so far (if any)
    pub fn top_result(&self) -> Option<ResultEntry> {
        self.entries.first().copied()
    }

    /// Load results from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(results) = serde_json::from_str::<BestResults>(&json) {
                    log::info!("Loaded {} best results", results.entries.len());
                    return results;
                }
            }
        }

        log::info!("No best results found, starting fresh");
        Self::new()
    }

    /// Save results to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Best results saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
