use std::sync::Arc;

use shared::{
    domain::GameId,
    error::{ApiError, ErrorCode},
    protocol::GameResponse,
};
use storage::{GameStore, WordList};

pub mod engine;
pub mod view;

pub use engine::{EngineError, GameEngine};
pub use view::{game_response, redact, RedactedView};

#[derive(Clone)]
pub struct ApiContext {
    pub engine: GameEngine,
}

impl ApiContext {
    pub fn new(store: GameStore, words: WordList) -> Self {
        Self {
            engine: GameEngine::new(store, Arc::new(words)),
        }
    }
}

pub fn new_game(ctx: &ApiContext) -> Result<GameResponse, ApiError> {
    let record = ctx.engine.create_new_game().map_err(api_error)?;
    Ok(game_response(&record))
}

pub fn game_state(ctx: &ApiContext, game_id: &GameId) -> Result<GameResponse, ApiError> {
    let record = ctx.engine.get_state(game_id).map_err(api_error)?;
    Ok(game_response(&record))
}

pub fn submit_guess(
    ctx: &ApiContext,
    game_id: &GameId,
    guess: &str,
    guess_id: u64,
) -> Result<GameResponse, ApiError> {
    let letter = single_letter(guess)?;
    let record = ctx
        .engine
        .apply_guess(game_id, letter, guess_id)
        .map_err(api_error)?;
    Ok(game_response(&record))
}

fn single_letter(guess: &str) -> Result<char, ApiError> {
    let mut chars = guess.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if !letter.is_whitespace() => Ok(letter),
        _ => Err(ApiError::new(
            ErrorCode::Validation,
            "guess must be exactly one character",
        )),
    }
}

fn api_error(err: EngineError) -> ApiError {
    let code = match &err {
        EngineError::InvalidGame(_) => ErrorCode::NotFound,
        EngineError::GameFinished(_) => ErrorCode::GameFinished,
        EngineError::VersionConflict { .. } => ErrorCode::VersionConflict,
        EngineError::DuplicateId(_) => ErrorCode::Internal,
    };
    ApiError::new(code, err.to_string())
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
