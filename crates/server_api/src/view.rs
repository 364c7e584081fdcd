use shared::{
    domain::{contains_letter, word_contains_letter, GameRecord},
    protocol::{GameResponse, GameStateView},
};

const HIDDEN: char = ' ';

/// What a player may see of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactedView {
    pub matched_letters: String,
    pub failed_guesses: Vec<char>,
}

pub fn redact(record: &GameRecord) -> RedactedView {
    let matched_letters = record
        .secret
        .chars()
        .map(|c| {
            if contains_letter(&record.guesses, c) {
                c
            } else {
                HIDDEN
            }
        })
        .collect();
    let failed_guesses = record
        .guesses
        .iter()
        .copied()
        .filter(|guess| !word_contains_letter(&record.secret, *guess))
        .collect();
    RedactedView {
        matched_letters,
        failed_guesses,
    }
}

pub fn game_response(record: &GameRecord) -> GameResponse {
    let view = redact(record);
    GameResponse {
        game_id: record.id.clone(),
        number_of_letters: record.secret_len(),
        state: GameStateView {
            guesses_remaining: record.remaining,
            next_guess_id: record.version,
            failed_guesses: view.failed_guesses,
            matching_letters: view.matched_letters,
            status: record.status,
        },
    }
}
