//! High-score persistence
//!
//! The simulation only ever sees the [`ScoreStore`] trait. The shipped
//! implementation keeps a ranked top-10 table in a JSON file; a store
//! that cannot be read falls back to the seed table rather than
//! surfacing an error to the game.

#![allow(dead_code)] // The memory store backs tests and headless embedders

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::game::constants::scores::{SEED_SCORE_STEP, TABLE_CAPACITY};

/// One ranked entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub name: String,
    pub score: u32,
}

/// Errors a backing store can hit while reading the table
#[derive(Debug, thiserror::Error)]
pub enum ScoreStoreError {
    #[error("score file unreadable: {0}")]
    Io(#[from] std::io::Error),
    #[error("score file corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Ranked top-N storage consumed by the state machine
pub trait ScoreStore {
    /// The current table, sorted by score descending
    fn load(&mut self) -> Vec<HighScore>;

    /// Insert a score per the ranking rule and persist synchronously
    fn save_score(&mut self, name: &str, score: u32);
}

/// The placeholder table used when the store is empty or unreadable:
/// capacity entries with ascending scores
pub fn seed_table() -> Vec<HighScore> {
    let mut table: Vec<HighScore> = (1..=TABLE_CAPACITY as u32)
        .map(|i| HighScore {
            name: format!("Default {}", i),
            score: i * SEED_SCORE_STEP,
        })
        .collect();
    sort_descending(&mut table);
    table
}

fn sort_descending(table: &mut [HighScore]) {
    table.sort_by(|a, b| b.score.cmp(&a.score));
}

/// The ranking rule: grow freely until the table is full, then a new
/// score only displaces the current minimum if it beats it.
pub fn insert_ranked(table: &mut Vec<HighScore>, name: &str, score: u32) {
    if table.len() < TABLE_CAPACITY {
        table.push(HighScore {
            name: name.to_string(),
            score,
        });
    } else if let Some(lowest) = table.last_mut() {
        if score > lowest.score {
            *lowest = HighScore {
                name: name.to_string(),
                score,
            };
        }
    }
    sort_descending(table);
}

/// JSON-file-backed store
#[derive(Debug)]
pub struct JsonScoreStore {
    path: PathBuf,
    table: Vec<HighScore>,
}

impl JsonScoreStore {
    /// Open the store at `path`, seeding it when the file is missing,
    /// empty or corrupt.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let table = match read_table(&path) {
            Ok(mut table) if !table.is_empty() => {
                sort_descending(&mut table);
                table.truncate(TABLE_CAPACITY);
                table
            }
            Ok(_) => {
                warn!(path = %path.display(), "score file empty, reseeding");
                seed_table()
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "score file unusable, reseeding");
                seed_table()
            }
        };

        let store = Self { path, table };
        store.persist();
        store
    }

    fn persist(&self) {
        let json = match serde_json::to_string_pretty(&self.table) {
            Ok(json) => json,
            Err(err) => {
                warn!(%err, "could not serialize score table");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, json) {
            warn!(path = %self.path.display(), %err, "could not write score file");
        }
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(&mut self) -> Vec<HighScore> {
        self.table.clone()
    }

    fn save_score(&mut self, name: &str, score: u32) {
        insert_ranked(&mut self.table, name, score);
        self.persist();
    }
}

fn read_table(path: &Path) -> Result<Vec<HighScore>, ScoreStoreError> {
    let data = fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&data)?)
}

/// In-memory store for tests and headless runs
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    table: Vec<HighScore>,
}

impl MemoryScoreStore {
    pub fn seeded() -> Self {
        Self {
            table: seed_table(),
        }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&mut self) -> Vec<HighScore> {
        self.table.clone()
    }

    fn save_score(&mut self, name: &str, score: u32) {
        insert_ranked(&mut self.table, name, score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_table() -> Vec<HighScore> {
        seed_table()
    }

    #[test]
    fn test_seed_table_full_and_sorted() {
        let table = seed_table();
        assert_eq!(table.len(), TABLE_CAPACITY);
        for pair in table.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(table[0].score, TABLE_CAPACITY as u32 * SEED_SCORE_STEP);
    }

    #[test]
    fn test_insert_grows_until_capacity() {
        let mut table = Vec::new();
        insert_ranked(&mut table, "a", 50);
        insert_ranked(&mut table, "b", 150);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].score, 150);
        assert_eq!(table[1].score, 50);
    }

    #[test]
    fn test_low_score_does_not_displace_full_table() {
        let mut table = full_table();
        let before = table.clone();
        insert_ranked(&mut table, "too-low", 1);
        assert_eq!(table, before);
    }

    #[test]
    fn test_score_beating_minimum_replaces_exactly_it() {
        let mut table = full_table();
        let old_min = table.last().unwrap().score;
        insert_ranked(&mut table, "newcomer", old_min + 1);

        assert_eq!(table.len(), TABLE_CAPACITY);
        assert!(table.iter().any(|e| e.name == "newcomer"));
        assert!(table.iter().all(|e| e.score != old_min));
        for pair in table.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_equal_to_minimum_is_rejected() {
        let mut table = full_table();
        let old_min = table.last().unwrap().score;
        insert_ranked(&mut table, "equal", old_min);
        assert!(table.iter().all(|e| e.name != "equal"));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryScoreStore::default();
        store.save_score("ace", 4200);
        let table = store.load();
        assert_eq!(table.len(), 1);
        assert_eq!(table[0], HighScore { name: "ace".to_string(), score: 4200 });
    }

    #[test]
    fn test_json_store_seeds_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");

        let mut store = JsonScoreStore::open(&path);
        let table = store.load();

        assert_eq!(table.len(), TABLE_CAPACITY);
        assert!(path.exists());
    }

    #[test]
    fn test_json_store_seeds_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "not json at all {{{").unwrap();

        let mut store = JsonScoreStore::open(&path);
        assert_eq!(store.load().len(), TABLE_CAPACITY);
    }

    #[test]
    fn test_json_store_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");

        {
            let mut store = JsonScoreStore::open(&path);
            store.save_score("ace", 999_999);
        }

        let mut reopened = JsonScoreStore::open(&path);
        let table = reopened.load();
        assert_eq!(table[0].name, "ace");
        assert_eq!(table[0].score, 999_999);
    }

    #[test]
    fn test_json_store_keeps_table_at_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");

        let mut store = JsonScoreStore::open(&path);
        for i in 0..20 {
            store.save_score("grinder", 20_000 + i);
        }
        assert_eq!(store.load().len(), TABLE_CAPACITY);
    }
}
