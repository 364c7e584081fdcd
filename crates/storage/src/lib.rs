use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;
use rand::Rng;
use shared::domain::{GameId, GameRecord};
use thiserror::Error;
use tracing::debug;

mod words;

pub use words::{WordList, WordListError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("game {0} not found")]
    NotFound(GameId),
    #[error("game {0} already exists")]
    DuplicateId(GameId),
    #[error("game {id} is at version {current}, expected {expected}")]
    VersionConflict {
        id: GameId,
        expected: u64,
        current: u64,
    },
}

/// In-memory home of every game record.
///
/// Clones share the same map. All reads and writes go through one lock, so a
/// `compare_and_swap` is a single indivisible read-compare-write and `get`
/// only ever sees fully written records.
#[derive(Clone, Default)]
pub struct GameStore {
    games: Arc<Mutex<HashMap<GameId, GameRecord>>>,
}

impl GameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws a base-36 id from `[0, i32::MAX)` that no stored game uses yet.
    pub fn generate_id(&self) -> GameId {
        let mut rng = rand::thread_rng();
        let games = self.games.lock();
        loop {
            let candidate = GameId(to_base36(rng.gen_range(0..i32::MAX as u32)));
            if !games.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    pub fn create(&self, record: GameRecord) -> Result<(), StoreError> {
        let mut games = self.games.lock();
        if games.contains_key(&record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }
        debug!(game_id = %record.id, "stored new game");
        games.insert(record.id.clone(), record);
        Ok(())
    }

    pub fn get(&self, id: &GameId) -> Result<GameRecord, StoreError> {
        self.games
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    pub fn compare_and_swap(
        &self,
        id: &GameId,
        expected_version: u64,
        new_record: GameRecord,
    ) -> Result<GameRecord, StoreError> {
        let mut games = self.games.lock();
        let current = games
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        if current.version != expected_version {
            return Err(StoreError::VersionConflict {
                id: id.clone(),
                expected: expected_version,
                current: current.version,
            });
        }
        *current = new_record.clone();
        debug!(game_id = %id, version = new_record.version, "swapped game record");
        Ok(new_record)
    }
}

fn to_base36(mut value: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
