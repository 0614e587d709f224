//! Tests for the REST API.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use strictly_2048::{Game, Grid};
use strictly_2048_server::{
    router, GameService, GameStore, GameView, MoveResponse, SessionManager,
};
use tower::ServiceExt;

fn app_with_store(store: SessionManager) -> Router {
    router(GameService::new(Arc::new(store)))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.expect("request failed");
    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body failed")
        .to_bytes()
        .to_vec();
    (status, body)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("valid request")
}

#[tokio::test]
async fn test_start_game() {
    let app = app_with_store(SessionManager::new());
    let (status, body) = send(app, post_json("/game/start", "")).await;
    assert_eq!(status, StatusCode::OK);

    let view: GameView = serde_json::from_slice(&body).expect("valid game view");
    assert_eq!(view.id, 1);
    assert_eq!(view.board.tile_count(), 2);
    assert_eq!(view.score, 0);
    assert!(!view.game_over);
    assert!(!view.game_clear);

    let raw: Value = serde_json::from_slice(&body).expect("valid json");
    assert!(raw.get("gameOver").is_some());
    assert!(raw.get("gameClear").is_some());
}

#[tokio::test]
async fn test_move_merges_and_reports_score() {
    let store = SessionManager::new();
    let grid = Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).expect("valid grid");
    let created = store
        .create_game(&Game::from_parts(grid, 0, false, false))
        .expect("create failed");
    let app = app_with_store(store.clone());

    let uri = format!("/game/{}/move", created.id);
    let (status, body) = send(app, post_json(&uri, r#"{"direction":"LEFT"}"#)).await;
    assert_eq!(status, StatusCode::OK);

    let response: MoveResponse = serde_json::from_slice(&body).expect("valid move response");
    assert_eq!(response.earned_score, 4);
    assert_eq!(response.score, 4);
    assert!(response.moved);
    assert_eq!(response.board.get(0, 0), Some(4));
    assert_eq!(response.board.tile_count(), 2);

    let raw: Value = serde_json::from_slice(&body).expect("valid json");
    assert_eq!(raw["earnedScore"], 4);

    let stored = store.load_game(created.id).expect("load failed").expect("game exists");
    assert_eq!(stored.game.score(), 4);
    assert_eq!(stored.game.grid(), &response.board);
}

#[tokio::test]
async fn test_get_game_and_board() {
    let store = SessionManager::new();
    let grid = Grid::from_rows([[0; 4], [0, 8, 0, 0], [0; 4], [0, 0, 0, 2]]).expect("valid grid");
    let created = store
        .create_game(&Game::from_parts(grid, 20, false, false))
        .expect("create failed");

    let (status, body) = send(app_with_store(store.clone()), get(&format!("/game/{}", created.id))).await;
    assert_eq!(status, StatusCode::OK);
    let view: GameView = serde_json::from_slice(&body).expect("valid game view");
    assert_eq!(view.board, grid);
    assert_eq!(view.score, 20);

    let (status, body) = send(app_with_store(store), get(&format!("/game/{}/board", created.id))).await;
    assert_eq!(status, StatusCode::OK);
    let raw: Value = serde_json::from_slice(&body).expect("valid json");
    assert_eq!(raw, serde_json::json!([[0, 0, 0, 0], [0, 8, 0, 0], [0, 0, 0, 0], [0, 0, 0, 2]]));
}

#[tokio::test]
async fn test_unknown_game_is_not_found() {
    let store = SessionManager::new();

    let (status, body) = send(app_with_store(store.clone()), get("/game/404")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let raw: Value = serde_json::from_slice(&body).expect("valid json");
    assert!(raw["error"].as_str().expect("error message").contains("404"));

    let (status, _) = send(
        app_with_store(store),
        post_json("/game/404/move", r#"{"direction":"UP"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_direction_is_rejected() {
    let store = SessionManager::new();
    let grid = Grid::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).expect("valid grid");
    let created = store
        .create_game(&Game::from_parts(grid, 0, false, false))
        .expect("create failed");

    let uri = format!("/game/{}/move", created.id);
    let (status, _) = send(app_with_store(store.clone()), post_json(&uri, r#"{"direction":"DIAGONAL"}"#)).await;
    assert!(status.is_client_error());

    let stored = store.load_game(created.id).expect("load failed").expect("game exists");
    assert_eq!(stored.game.grid(), &grid);
}

#[tokio::test]
async fn test_no_op_move_keeps_grid() {
    let store = SessionManager::new();
    let grid = Grid::from_rows([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]).expect("valid grid");
    let created = store
        .create_game(&Game::from_parts(grid, 0, false, false))
        .expect("create failed");

    let uri = format!("/game/{}/move", created.id);
    let (status, body) = send(app_with_store(store), post_json(&uri, r#"{"direction":"LEFT"}"#)).await;
    assert_eq!(status, StatusCode::OK);

    let response: MoveResponse = serde_json::from_slice(&body).expect("valid move response");
    assert!(!response.moved);
    assert_eq!(response.earned_score, 0);
    assert_eq!(response.board, grid);
    assert!(!response.game_over);
}
