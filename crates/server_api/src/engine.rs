use std::sync::Arc;

use shared::domain::{
    contains_letter, word_contains_letter, GameId, GameRecord, GameStatus, GUESSES_ALLOWED,
};
use storage::{GameStore, StoreError, WordList};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("game {0} does not exist")]
    InvalidGame(GameId),
    #[error("game {0} has finished")]
    GameFinished(GameId),
    #[error("game {id} is at version {current}, guess was made against {expected}")]
    VersionConflict {
        id: GameId,
        expected: u64,
        current: u64,
    },
    #[error("game id {0} is already taken")]
    DuplicateId(GameId),
}

impl From<StoreError> for EngineError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::InvalidGame(id),
            StoreError::DuplicateId(id) => Self::DuplicateId(id),
            StoreError::VersionConflict {
                id,
                expected,
                current,
            } => Self::VersionConflict {
                id,
                expected,
                current,
            },
        }
    }
}

/// Applies the rules of the game on top of the store.
#[derive(Clone)]
pub struct GameEngine {
    store: GameStore,
    words: Arc<WordList>,
}

impl GameEngine {
    pub fn new(store: GameStore, words: Arc<WordList>) -> Self {
        Self { store, words }
    }

    pub(crate) fn store(&self) -> &GameStore {
        &self.store
    }

    pub fn create_new_game(&self) -> Result<GameRecord, EngineError> {
        let secret = self.words.pick_random();
        let record = GameRecord::new(self.store.generate_id(), secret, GUESSES_ALLOWED);
        self.store.create(record.clone())?;
        info!(game_id = %record.id, letters = record.secret_len(), "created game");
        Ok(record)
    }

    pub fn get_state(&self, id: &GameId) -> Result<GameRecord, EngineError> {
        Ok(self.store.get(id)?)
    }

    /// Applies one guess made against `expected_version`.
    ///
    /// A letter that was already guessed (in any case) returns the stored
    /// record untouched without looking at `expected_version`.
    pub fn apply_guess(
        &self,
        id: &GameId,
        letter: char,
        expected_version: u64,
    ) -> Result<GameRecord, EngineError> {
        let current = self.store.get(id)?;
        if current.status.is_finished() {
            return Err(EngineError::GameFinished(id.clone()));
        }
        if current.has_guessed(letter) {
            debug!(game_id = %id, %letter, "letter already guessed");
            return Ok(current);
        }

        let next = next_record(&current, letter);
        match self.store.compare_and_swap(id, expected_version, next) {
            Ok(committed) => {
                debug!(
                    game_id = %id,
                    version = committed.version,
                    status = ?committed.status,
                    remaining = committed.remaining,
                    "guess applied"
                );
                Ok(committed)
            }
            Err(err) => {
                if let StoreError::VersionConflict {
                    current: stored_version,
                    ..
                } = &err
                {
                    warn!(
                        game_id = %id,
                        expected_version,
                        stored_version,
                        "stale guess rejected"
                    );
                }
                Err(err.into())
            }
        }
    }
}

fn next_record(current: &GameRecord, letter: char) -> GameRecord {
    let mut next = current.clone();
    next.guesses.push(letter);
    next.version = current.version + 1;

    if word_contains_letter(&current.secret, letter) {
        next.status = if all_matched(&current.secret, &next.guesses) {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        };
    } else {
        next.remaining = current.remaining.saturating_sub(1);
        next.status = if next.remaining == 0 {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        };
    }
    next
}

fn all_matched(secret: &str, guesses: &[char]) -> bool {
    secret.chars().all(|c| contains_letter(guesses, c))
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
