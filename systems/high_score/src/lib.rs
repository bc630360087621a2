#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! High score persistence behind a minimal key-value store abstraction.

use std::collections::BTreeMap;

use heavy_machine_gun_core::Event;
use thiserror::Error;

/// Key under which the best score is stored.
pub const HIGH_SCORE_KEY: &str = "heavy-machine-gun.high-score";

/// Failures reported by a key-value store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing medium could not be read or written.
    #[error("high score storage is unavailable")]
    Io(#[from] std::io::Error),
    /// The stored data could not be interpreted.
    #[error("high score storage is malformed: {0}")]
    Malformed(String),
}

/// Persistent storage for single integer values.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, if any.
    fn get_u64(&self, key: &str) -> Result<Option<u64>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_u64(&mut self, key: &str, value: u64) -> Result<(), StoreError>;
}

/// Volatile store used by tests and sessions without persistence.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, u64>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_u64(&self, key: &str) -> Result<Option<u64>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn set_u64(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        let _ = self.values.insert(key.to_owned(), value);
        Ok(())
    }
}

/// Tracks the best score and persists improvements when a game ends.
#[derive(Debug)]
pub struct HighScore<S> {
    store: S,
    best: u64,
}

impl<S: KeyValueStore> HighScore<S> {
    /// Loads the stored best score. An unreadable store starts from zero.
    pub fn load(store: S) -> Self {
        let best = match store.get_u64(HIGH_SCORE_KEY) {
            Ok(value) => value.unwrap_or(0),
            Err(error) => {
                tracing::warn!(%error, "high score could not be loaded");
                0
            }
        };
        Self { store, best }
    }

    /// Best score known to this session.
    #[must_use]
    pub fn best(&self) -> u64 {
        self.best
    }

    /// Provides read access to the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persists the final score of every finished game that beats the best score.
    ///
    /// The in-memory best is updated even when persisting fails.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Event>) -> Result<(), StoreError> {
        let mut result = Ok(());
        for event in events {
            let Event::GameOver { final_score } = event else {
                continue;
            };
            if *final_score <= self.best {
                continue;
            }

            let previous = self.best;
            self.best = *final_score;
            tracing::info!(previous, score = self.best, "new high score");
            out.push(Event::HighScoreUpdated {
                previous,
                score: self.best,
            });
            if let Err(error) = self.store.set_u64(HIGH_SCORE_KEY, self.best) {
                result = Err(error);
            }
        }
        result
    }
}
