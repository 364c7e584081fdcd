use anyhow::{anyhow, Context, Result};
use clap::Parser;
use reqwest::Client;
use shared::{
    domain::GameId,
    error::{ApiError, ApiException, ErrorCode},
    protocol::{game_route, GameResponse, GAMES_ROUTE},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    server_url: String,
    /// Join an existing game instead of starting a new one.
    #[arg(long)]
    game_id: Option<String>,
}

struct HangmanClient {
    http: Client,
    base_url: String,
}

impl HangmanClient {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn new_game(&self) -> Result<GameResponse> {
        let response = self.http.post(self.url(GAMES_ROUTE)).send().await?;
        decode(response).await
    }

    async fn game(&self, game_id: &GameId) -> Result<GameResponse> {
        let response = self.http.get(self.url(&game_route(game_id))).send().await?;
        decode(response).await
    }

    async fn guess(&self, game_id: &GameId, letter: char, guess_id: u64) -> Result<GameResponse> {
        debug!(%game_id, %letter, guess_id, "submitting guess");
        let response = self
            .http
            .put(self.url(&game_route(game_id)))
            .query(&[("guess", letter.to_string()), ("guessId", guess_id.to_string())])
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode(response: reqwest::Response) -> Result<GameResponse> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<GameResponse>()
            .await
            .context("malformed game response");
    }
    match response.json::<ApiError>().await {
        Ok(err) => Err(ApiException::from(err).into()),
        Err(_) => Err(anyhow!("server answered {status}")),
    }
}

fn error_code(err: &anyhow::Error) -> Option<ErrorCode> {
    err.downcast_ref::<ApiException>().map(|e| e.code)
}

fn render(game: &GameResponse) -> String {
    let word: Vec<String> = game
        .state
        .matching_letters
        .chars()
        .map(|c| if c == ' ' { "_".to_string() } else { c.to_string() })
        .collect();
    let failed: String = game.state.failed_guesses.iter().collect();
    format!(
        "{}   misses: [{}]   guesses left: {}   ({:?})",
        word.join(" "),
        failed,
        game.state.guesses_remaining,
        game.state.status
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let args = Args::parse();

    let client = HangmanClient::new(args.server_url);
    let mut game = match args.game_id {
        Some(id) => client.game(&GameId(id)).await?,
        None => client.new_game().await?,
    };
    println!("game {} ({} letters)", game.game_id, game.number_of_letters);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while !game.state.status.is_finished() {
        println!("{}", render(&game));
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let Some(letter) = line.trim().chars().next() else {
            continue;
        };

        match client
            .guess(&game.game_id, letter, game.state.next_guess_id)
            .await
        {
            Ok(next) => game = next,
            Err(err) if error_code(&err) == Some(ErrorCode::VersionConflict) => {
                println!("someone else guessed first; refreshing");
                game = client.game(&game.game_id).await?;
            }
            Err(err) if error_code(&err) == Some(ErrorCode::GameFinished) => {
                game = client.game(&game.game_id).await?;
            }
            Err(err) => return Err(err),
        }
    }

    println!("{}", render(&game));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{domain::GameStatus, protocol::GameStateView};

    fn game(matching: &str, failed: &[char]) -> GameResponse {
        GameResponse {
            game_id: GameId::from("k2f9a"),
            number_of_letters: matching.chars().count(),
            state: GameStateView {
                guesses_remaining: 8,
                next_guess_id: 3,
                failed_guesses: failed.to_vec(),
                matching_letters: matching.to_string(),
                status: GameStatus::InProgress,
            },
        }
    }

    #[test]
    fn render_shows_blanks_and_misses() {
        assert_eq!(
            render(&game("c t", &['x', 'q'])),
            "c _ t   misses: [xq]   guesses left: 8   (InProgress)"
        );
    }

    #[test]
    fn urls_ignore_trailing_slash() {
        let client = HangmanClient::new("http://localhost:8080/");
        assert_eq!(
            client.url(&game_route(&GameId::from("abc"))),
            "http://localhost:8080/api/hangman/games/abc"
        );
    }

    #[test]
    fn api_errors_keep_their_code() {
        let err: anyhow::Error =
            ApiException::from(ApiError::new(ErrorCode::VersionConflict, "stale")).into();
        assert_eq!(error_code(&err), Some(ErrorCode::VersionConflict));
        assert_eq!(error_code(&anyhow!("boom")), None);
    }
}
