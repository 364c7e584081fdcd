use std::{fs, io, path::Path};

use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("word list is empty")]
    Empty,
}

/// Immutable pool of candidate secrets, built once at startup. Words keep the
/// casing they were read with; the engine folds case when comparing.
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    pub fn from_words<I, S>(words: I) -> Result<Self, WordListError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kept = Vec::new();
        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            // A space is the hidden-letter placeholder and cannot be guessed.
            if word.chars().any(char::is_whitespace) {
                warn!(word, "skipping word list entry containing whitespace");
                continue;
            }
            kept.push(word.to_string());
        }
        let words = kept;
        if words.is_empty() {
            return Err(WordListError::Empty);
        }
        Ok(Self { words })
    }

    /// Reads one word per line. Blank lines and `#` comments are skipped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WordListError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| WordListError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let list = Self::from_words(raw.lines())?;
        info!(path = %path.display(), words = list.len(), "loaded word list");
        Ok(list)
    }

    pub fn pick_random(&self) -> &str {
        self.words
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
