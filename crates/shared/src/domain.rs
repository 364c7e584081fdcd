use std::fmt;

use serde::{Deserialize, Serialize};

/// Guesses a fresh game starts with.
pub const GUESSES_ALLOWED: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl GameId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GameId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for GameId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    New,
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Authoritative state of one game. The secret stays behind the engine and
/// store; anything player-facing goes through the redacted view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub id: GameId,
    pub secret: String,
    pub guesses: Vec<char>,
    pub remaining: u32,
    pub version: u64,
    pub status: GameStatus,
}

impl GameRecord {
    pub fn new(id: GameId, secret: impl Into<String>, remaining: u32) -> Self {
        Self {
            id,
            secret: secret.into(),
            guesses: Vec::new(),
            remaining,
            version: 0,
            status: GameStatus::New,
        }
    }

    /// Number of letters in the secret, counted on the raw word.
    pub fn secret_len(&self) -> usize {
        self.secret.chars().count()
    }

    pub fn has_guessed(&self, letter: char) -> bool {
        contains_letter(&self.guesses, letter)
    }
}

/// Case-folds a single character for comparison.
pub fn fold_letter(letter: char) -> char {
    letter.to_lowercase().next().unwrap_or(letter)
}

pub fn contains_letter(letters: &[char], letter: char) -> bool {
    let folded = fold_letter(letter);
    letters.iter().any(|candidate| fold_letter(*candidate) == folded)
}

pub fn word_contains_letter(word: &str, letter: char) -> bool {
    let folded = fold_letter(letter);
    word.chars().any(|candidate| fold_letter(candidate) == folded)
}
