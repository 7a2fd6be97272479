//! Bounded calculation history with best-effort persistence.
//!
//! Completed calculations are kept most-recent-first, capped at
//! [`HISTORY_CAP`] entries, and persisted as a JSON array of
//! `"<expression> = <result>"` strings under the `history` storage key.

use std::fmt;

use tracing::warn;

use crate::storage::Storage;

const STORAGE_KEY: &str = "history";

/// Maximum number of entries kept; the oldest are discarded first.
pub const HISTORY_CAP: usize = 20;

/// One completed calculation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HistoryEntry {
    /// The expression as it was entered, display glyphs included.
    pub expression: String,
    /// The formatted result.
    pub result: String,
}

impl HistoryEntry {
    pub fn new(expression: String, result: String) -> Self {
        Self { expression, result }
    }

    /// Parse the persisted `"<expression> = <result>"` form.
    fn parse(line: &str) -> Option<Self> {
        let (expression, result) = line.split_once(" = ")?;
        Some(Self::new(expression.to_string(), result.to_string()))
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.expression, self.result)
    }
}

/// The bounded, most-recent-first history list.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the persisted list.
    ///
    /// A missing or malformed value yields an empty history; entries
    /// without the separator are dropped rather than guessed at.
    pub fn load(storage: &dyn Storage) -> Self {
        let Some(raw) = storage.load(STORAGE_KEY) else {
            return Self::new();
        };
        let lines: Vec<String> = match serde_json::from_str(&raw) {
            Ok(lines) => lines,
            Err(err) => {
                warn!(%err, "discarding malformed history");
                return Self::new();
            }
        };
        let entries = lines
            .iter()
            .filter_map(|line| HistoryEntry::parse(line))
            .take(HISTORY_CAP)
            .collect();
        Self { entries }
    }

    /// Persist the current list. Failures are logged, not propagated.
    pub fn save(&self, storage: &mut dyn Storage) {
        let lines: Vec<String> = self.entries.iter().map(HistoryEntry::to_string).collect();
        match serde_json::to_string(&lines) {
            Ok(raw) => {
                if let Err(err) = storage.save(STORAGE_KEY, &raw) {
                    warn!(%err, "failed to persist history");
                }
            }
            Err(err) => warn!(%err, "failed to encode history"),
        }
    }

    /// Record a completed calculation as the most recent entry.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAP);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Entries, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn entry(expression: &str, result: &str) -> HistoryEntry {
        HistoryEntry::new(expression.to_string(), result.to_string())
    }

    #[test]
    fn test_push_is_most_recent_first() {
        let mut history = History::new();
        history.push(entry("1+1", "2"));
        history.push(entry("2+2", "4"));
        assert_eq!(history.get(0), Some(&entry("2+2", "4")));
        assert_eq!(history.get(1), Some(&entry("1+1", "2")));
    }

    #[test]
    fn test_cap_discards_oldest() {
        let mut history = History::new();
        for i in 0..25 {
            history.push(entry(&format!("{i}+0"), &i.to_string()));
        }
        assert_eq!(history.len(), HISTORY_CAP);
        assert_eq!(history.get(0), Some(&entry("24+0", "24")));
        assert_eq!(
            history.get(HISTORY_CAP - 1),
            Some(&entry("5+0", "5")),
            "entries 0..=4 must have been discarded"
        );
    }

    #[test]
    fn test_display_form() {
        assert_eq!(entry("5×3", "15").to_string(), "5×3 = 15");
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut storage = MemoryStorage::new();
        let mut history = History::new();
        history.push(entry("5+3", "8"));
        history.push(entry("8÷2", "4"));
        history.save(&mut storage);

        let loaded = History::load(&storage);
        assert_eq!(loaded, history);
    }

    #[test]
    fn test_load_missing_is_empty() {
        let storage = MemoryStorage::new();
        assert!(History::load(&storage).is_empty());
    }

    #[test]
    fn test_load_malformed_is_empty() {
        let mut storage = MemoryStorage::new();
        storage.save("history", "not json").unwrap();
        assert!(History::load(&storage).is_empty());
    }

    #[test]
    fn test_load_drops_entries_without_separator() {
        let mut storage = MemoryStorage::new();
        storage
            .save("history", r#"["5+3 = 8", "garbage", "1×2 = 2"]"#)
            .unwrap();
        let loaded = History::load(&storage);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get(0), Some(&entry("5+3", "8")));
        assert_eq!(loaded.get(1), Some(&entry("1×2", "2")));
    }

    #[test]
    fn test_clear_empties_the_list() {
        let mut history = History::new();
        history.push(entry("1+1", "2"));
        history.clear();
        assert!(history.is_empty());
    }
}
