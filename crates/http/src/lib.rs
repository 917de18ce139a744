//! The HTTP front door for the Connect Four solver: a single JSON endpoint that ranks moves
//! for a board posted by a front-end client.
//!
//! The service holds one [`Solver`] behind an `Arc<Mutex<_>>`, shared across every request, so
//! that search memoization and a warm-started opening book accumulate across the process's
//! lifetime instead of being rebuilt per request. Each request's search runs on a blocking
//! worker task with a cooperative wall-clock deadline (see [`SEARCH_DEADLINE`]); a request that
//! outruns the deadline gets a uniformly random legal move immediately, while the worker is left
//! to finish in the background and populate the shared table for next time.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use connect_four_ai::{Position, PositionParsingError, Solver};
use rand::seq::IteratorRandom;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Wall-clock budget given to a single request's search before it falls back to a random move.
pub const SEARCH_DEADLINE: Duration = Duration::from_secs(7);

/// Default port the service binds to when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 8112;

/// The JSON body of a `POST /api/connect4-move` request.
#[derive(Debug, Deserialize)]
pub struct BoardRequest {
    /// 6 rows x 7 columns, top-to-bottom. Cells are `0` empty, `1`/`2` a player's stone, or
    /// `-1` for a cell the caller has chosen not to reveal.
    board: Vec<Vec<i8>>,
    /// 0-indexed columns the caller considers legal to play.
    valid_moves: Vec<usize>,
    current_player: u8,
    is_new_game: bool,
}

/// The JSON body of a successful response: the chosen 0-indexed column.
#[derive(Debug, Serialize)]
pub struct MoveResponse {
    #[serde(rename = "move")]
    column: usize,
}

/// Errors that end a request before a move can be chosen.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("invalid request body: {0}")]
    MalformedJson(#[from] serde_json::Error),
    #[error("{0}")]
    IllegalBoard(#[from] PositionParsingError),
    #[error("valid_moves is empty")]
    NoValidMoves,
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        warn!(error = %self, "rejecting malformed board request");
        (StatusCode::BAD_REQUEST, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    solver: Arc<Mutex<Solver>>,
}

impl AppState {
    pub fn new(solver: Arc<Mutex<Solver>>) -> AppState {
        AppState { solver }
    }
}

/// Builds the service's router: one route, wrapped in a [`TraceLayer`] span per request.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/connect4-move", post(connect4_move))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Binds `addr` and serves the router until the process is killed.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "connect four http service listening");
    axum::serve(listener, app).await
}

async fn connect4_move(
    State(state): State<AppState>,
    body: axum::body::Bytes,
) -> Result<Json<MoveResponse>, BoardError> {
    let request: BoardRequest = serde_json::from_slice(&body)?;

    if request.valid_moves.is_empty() {
        return Err(BoardError::NoValidMoves);
    }

    // The empty-board opening is a known shortcut: it matches `find_best_move`'s own
    // special case, and skipping the solver avoids waking up the shared table for it.
    if request.is_new_game && request.current_player == 1 {
        return Ok(Json(MoveResponse { column: Position::WIDTH / 2 }));
    }

    let position = Position::from_board(&request.board, request.current_player)?;
    let valid_moves = request.valid_moves;

    let solver = Arc::clone(&state.solver);
    let search = tokio::task::spawn_blocking(move || {
        let mut solver = solver.lock().unwrap();
        solver.analyze(&position)
    });

    let ranked: Vec<usize> = match tokio::time::timeout(SEARCH_DEADLINE, search).await {
        Ok(Ok(groups)) => groups.into_iter().flatten().collect(),
        Ok(Err(join_error)) => {
            warn!(error = %join_error, "search worker panicked");
            Vec::new()
        }
        Err(_) => {
            warn!(deadline = ?SEARCH_DEADLINE, "search exceeded the request deadline; falling back to a random move");
            Vec::new()
        }
    };

    let chosen = ranked
        .into_iter()
        .find(|col| valid_moves.contains(col) && !position.overlaps_hidden(*col))
        .or_else(|| random_fallback(&position, &valid_moves))
        .ok_or(BoardError::NoValidMoves)?;

    Ok(Json(MoveResponse { column: chosen }))
}

/// Picks a uniformly random column from `valid_moves`, preferring ones that don't land on a
/// hidden cell but falling back to any of them if every valid move does.
fn random_fallback(position: &Position, valid_moves: &[usize]) -> Option<usize> {
    let mut rng = rand::rng();
    let in_range = || valid_moves.iter().copied().filter(|&col| col < Position::WIDTH);
    in_range()
        .filter(|&col| !position.overlaps_hidden(col))
        .choose(&mut rng)
        .or_else(|| in_range().choose(&mut rng))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_fallback_avoids_hidden_landing_squares_when_an_alternative_exists() {
        let mut board = vec![vec![0i8; 7]; 6];
        board[5][3] = -1;
        let position = Position::from_board(&board, 1).unwrap();

        for _ in 0..50 {
            let chosen = random_fallback(&position, &(0..7).collect::<Vec<usize>>()).unwrap();
            assert_ne!(chosen, 3);
        }
    }

    #[test]
    fn random_fallback_falls_back_to_a_hidden_square_if_its_the_only_option() {
        let mut board = vec![vec![0i8; 7]; 6];
        board[5][3] = -1;
        let position = Position::from_board(&board, 1).unwrap();

        assert_eq!(random_fallback(&position, &[3]), Some(3));
    }

    #[test]
    fn random_fallback_returns_none_for_an_empty_move_list() {
        assert_eq!(random_fallback(&Position::new(), &[]), None);
    }
}
