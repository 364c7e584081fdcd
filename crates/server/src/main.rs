use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use server_api::{game_state, new_game, submit_guess, ApiContext};
use shared::{
    domain::GameId,
    error::{ApiError, ErrorCode},
    protocol::{game_route, GameResponse, GuessQuery, GAMES_ROUTE},
};
use storage::{GameStore, WordList};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings();
    let filter = EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let words = WordList::load(&settings.word_list_path)
        .with_context(|| format!("loading word list '{}'", settings.word_list_path))?;
    let api = ApiContext::new(GameStore::new(), words);

    let state = AppState { api };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(GAMES_ROUTE, post(http_new_game))
        .route(
            &format!("{GAMES_ROUTE}/:game_id"),
            get(http_game_state).put(http_guess),
        )
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_new_game(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let game = new_game(&state.api).map_err(reject)?;
    let location = game_route(&game.game_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(game),
    ))
}

async fn http_game_state(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
) -> ApiResult<Json<GameResponse>> {
    let game = game_state(&state.api, &GameId(game_id)).map_err(reject)?;
    Ok(Json(game))
}

async fn http_guess(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
    query: Result<Query<GuessQuery>, QueryRejection>,
) -> ApiResult<Json<GameResponse>> {
    let Query(q) = query.map_err(|rejection| {
        reject(ApiError::new(ErrorCode::Validation, rejection.body_text()))
    })?;
    let game = submit_guess(&state.api, &GameId(game_id), &q.guess, q.guess_id).map_err(reject)?;
    Ok(Json(game))
}

fn reject(err: ApiError) -> (StatusCode, Json<ApiError>) {
    (status_for(err.code), Json(err))
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::VersionConflict | ErrorCode::GameFinished => StatusCode::CONFLICT,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
