use serde::{Deserialize, Serialize};

use crate::domain::{GameId, GameStatus};

pub const GAMES_ROUTE: &str = "/api/hangman/games";

pub fn game_route(game_id: &GameId) -> String {
    format!("{GAMES_ROUTE}/{game_id}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub game_id: GameId,
    pub number_of_letters: usize,
    pub state: GameStateView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateView {
    pub guesses_remaining: u32,
    pub next_guess_id: u64,
    pub failed_guesses: Vec<char>,
    pub matching_letters: String,
    pub status: GameStatus,
}

/// Query string of a guess submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessQuery {
    pub guess: String,
    #[serde(rename = "guessId")]
    pub guess_id: u64,
}
