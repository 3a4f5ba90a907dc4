//! High score leaderboard
//!
//! Tracks the top 10 survival times (whole seconds). Entries live in a
//! [`ScoreStore`] under the keys `highscore1` .. `highscore10`; other keys in
//! the store are left alone.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::persistence::{ScoreStore, StoreEdit, StoreError};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Key namespace inside the store
pub const KEY_PREFIX: &str = "highscore";

/// Which survival times rank higher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RankOrder {
    /// Surviving longer is better
    #[default]
    LongestFirst,
    /// Finishing sooner is better
    ShortestFirst,
}

impl RankOrder {
    /// Does `a` rank strictly above `b`?
    pub fn beats(self, a: u64, b: u64) -> bool {
        match self {
            RankOrder::LongestFirst => a > b,
            RankOrder::ShortestFirst => a < b,
        }
    }

    pub fn sort(self, values: &mut [u64]) {
        match self {
            RankOrder::LongestFirst => values.sort_unstable_by(|a, b| b.cmp(a)),
            RankOrder::ShortestFirst => values.sort_unstable(),
        }
    }
}

/// Parse `highscore<N>` keys; anything else is outside the table
fn parse_slot(key: &str) -> Option<u32> {
    key.strip_prefix(KEY_PREFIX)?.parse().ok()
}

fn slot_key(rank: usize) -> String {
    format!("{KEY_PREFIX}{rank}")
}

/// High score leaderboard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScores {
    /// Elapsed seconds, best first
    pub entries: Vec<u64>,
    order: RankOrder,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new(order: RankOrder) -> Self {
        Self {
            entries: Vec::new(),
            order,
        }
    }

    pub fn order(&self) -> RankOrder {
        self.order
    }

    /// Build a table from raw store entries, ignoring foreign or malformed ones
    pub fn from_store_entries(all: &BTreeMap<String, i64>, order: RankOrder) -> Self {
        let mut entries: Vec<u64> = all
            .iter()
            .filter(|(key, _)| parse_slot(key).is_some())
            .filter_map(|(_, value)| u64::try_from(*value).ok())
            .collect();
        order.sort(&mut entries);
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries, order }
    }

    /// Check if a time qualifies for the leaderboard
    pub fn qualifies(&self, secs: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries
            .last()
            .map(|&worst| self.order.beats(secs, worst))
            .unwrap_or(true)
    }

    /// Get the rank a time would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, secs: u64) -> Option<usize> {
        if !self.qualifies(secs) {
            return None;
        }
        let rank = self.entries.iter().position(|&e| self.order.beats(secs, e));
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a time to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, secs: u64) -> Option<usize> {
        let rank = self.potential_rank(secs)?;
        self.entries.insert(rank - 1, secs);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Edit that replaces the whole namespace in `all` with this table
    pub fn store_edit(&self, all: &BTreeMap<String, i64>) -> StoreEdit {
        let mut edit = StoreEdit::new();
        for key in all.keys().filter(|key| parse_slot(key).is_some()) {
            edit.remove(key.clone());
        }
        for (i, &secs) in self.entries.iter().enumerate() {
            edit.put(slot_key(i + 1), i64::try_from(secs).unwrap_or(i64::MAX));
        }
        edit
    }

    /// Load the table from a store. Failures give an empty table.
    pub fn load(store: &dyn ScoreStore, order: RankOrder) -> Self {
        match store.load_all() {
            Ok(all) => {
                let scores = Self::from_store_entries(&all, order);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(err) => {
                log::warn!("High scores unavailable, starting fresh: {err}");
                Self::new(order)
            }
        }
    }

    /// Merge `secs` into the stored table and rewrite the namespace.
    ///
    /// Reads the store fresh so entries written by someone else are kept.
    /// On error `self` is left unchanged.
    pub fn record(
        &mut self,
        store: &mut dyn ScoreStore,
        secs: u64,
    ) -> Result<Option<usize>, StoreError> {
        let all = store.load_all()?;
        let mut merged = Self::from_store_entries(&all, self.order);
        let rank = merged.add_score(secs);
        store.commit(&merged.store_edit(&all))?;
        log::info!("High scores saved ({} entries)", merged.entries.len());
        *self = merged;
        Ok(rank)
    }
}

/// Format a survival time for display
pub fn format_secs(secs: u64) -> String {
    format!("{secs} sec")
}
