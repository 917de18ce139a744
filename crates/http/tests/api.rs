//! Integration tests exercising the move endpoint over a real HTTP request/response cycle.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use connect_four_ai_http::{router, AppState};
use connect_four_ai::Solver;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

fn test_state() -> AppState {
    AppState::new(Arc::new(Mutex::new(Solver::new())))
}

fn empty_board() -> serde_json::Value {
    json!({
        "board": vec![vec![0i8; 7]; 6],
        "valid_moves": (0..7).collect::<Vec<usize>>(),
        "current_player": 1,
        "is_new_game": true,
    })
}

async fn post_board(app: axum::Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/connect4-move")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn new_game_returns_the_centre_column_without_searching() {
    let app = router(test_state());
    let (status, body) = post_board(app, empty_board()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["move"], 3);
}

#[tokio::test]
async fn malformed_body_returns_400_with_an_error_field() {
    let app = router(test_state());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/connect4-move")
                .header("content-type", "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn side_to_move_mismatch_returns_400() {
    let mut board = vec![vec![0i8; 7]; 6];
    board[5][3] = 1;
    let request = json!({
        "board": board,
        "valid_moves": (0..7).collect::<Vec<usize>>(),
        "current_player": 1,
        "is_new_game": false,
    });

    let app = router(test_state());
    let (status, body) = post_board(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("side-to-move"));
}

#[tokio::test]
async fn hidden_cell_in_the_best_column_is_never_returned() {
    // A single hidden stone sits in the centre column; every other column is wide open, so
    // whatever the solver ranks first it must still avoid the hidden landing square there.
    let mut board = vec![vec![0i8; 7]; 6];
    board[5][3] = -1;
    let request = json!({
        "board": board,
        "valid_moves": (0..7).collect::<Vec<usize>>(),
        "current_player": 1,
        "is_new_game": false,
    });

    let app = router(test_state());
    let (status, body) = post_board(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(body["move"], 3);
}

#[tokio::test]
async fn excluded_valid_moves_are_never_returned() {
    let request = json!({
        "board": vec![vec![0i8; 7]; 6],
        "valid_moves": vec![0, 1, 2],
        "current_player": 1,
        "is_new_game": false,
    });

    let app = router(test_state());
    let (status, body) = post_board(app, request).await;
    assert_eq!(status, StatusCode::OK);
    let col = body["move"].as_u64().unwrap();
    assert!(col <= 2);
}

#[tokio::test]
async fn empty_valid_moves_returns_400() {
    let request = json!({
        "board": vec![vec![0i8; 7]; 6],
        "valid_moves": Vec::<usize>::new(),
        "current_player": 1,
        "is_new_game": false,
    });

    let app = router(test_state());
    let (status, body) = post_board(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("valid_moves"));
}
