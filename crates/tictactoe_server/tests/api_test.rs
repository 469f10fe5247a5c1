//! Tests for the REST API.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tictactoe_server::{SessionManager, router};
use tower::ServiceExt;

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_create_game_without_body() {
    let app = router(SessionManager::new());
    let (status, body) = send(&app, Method::POST, "/api/games", None).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["game_id"], "game-1");
    assert_eq!(body["status"], "in_progress");
    assert_eq!(body["game_state"], -1.0);
    assert_eq!(body["cells"].as_array().unwrap().len(), 9);
    assert_eq!(body["cells"][0], "Empty");
}

#[tokio::test]
async fn test_create_game_with_id_and_conflict() {
    let app = router(SessionManager::new());
    let (status, body) =
        send(&app, Method::POST, "/api/games", Some(json!({ "game_id": "abc" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["game_id"], "abc");

    let (status, body) =
        send(&app, Method::POST, "/api/games", Some(json!({ "game_id": "abc" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_malformed_create_body() {
    let app = router(SessionManager::new());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/games")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_move_and_reply() {
    let app = router(SessionManager::new());
    send(&app, Method::POST, "/api/games", None).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/games/game-1/moves",
        Some(json!({ "move": 4 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["move"], 0);
    assert_eq!(body["game_state"], -1.0);
    assert_eq!(body["status"], "in_progress");
    assert_eq!(body["cells"][4], "PlayerOne");
    assert_eq!(body["cells"][0], "PlayerTwo");

    let (status, view) = send(&app, Method::GET, "/api/games/game-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["cells"], body["cells"]);
}

#[tokio::test]
async fn test_engine_win_reported() {
    let app = router(SessionManager::new());
    send(&app, Method::POST, "/api/games", None).await;

    let mut last = Value::Null;
    for position in [0, 1, 8] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/games/game-1/moves",
            Some(json!({ "move": position })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        last = body;
    }

    assert_eq!(last["move"], 6);
    assert_eq!(last["status"], "player_two_won");
    assert!(last["game_state"].as_f64().unwrap() <= -10.0);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/games/game-1/moves",
        Some(json!({ "move": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_move_errors() {
    let app = router(SessionManager::new());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/games/nope/moves",
        Some(json!({ "move": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not been initialized"));

    send(&app, Method::POST, "/api/games", None).await;
    send(&app, Method::POST, "/api/games/game-1/moves", Some(json!({ "move": 4 }))).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/games/game-1/moves",
        Some(json!({ "move": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already occupied"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/games/game-1/moves",
        Some(json!({ "move": 12 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unparseable_move_bodies() {
    let app = router(SessionManager::new());
    send(&app, Method::POST, "/api/games", None).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/games/game-1/moves",
        Some(json!({ "move": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Bad request"));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/games/game-1/moves",
        Some(json!({ "position": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    for raw in ["{not json", ""] {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/games/game-1/moves")
            .body(Body::from(raw))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].as_str().unwrap().starts_with("Bad request"));
    }

    // Rejected bodies leave the board alone.
    let (status, body) = send(&app, Method::GET, "/api/games/game-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "in_progress");
    assert!(body["cells"].as_array().unwrap().iter().all(|c| c == "Empty"));
}

#[tokio::test]
async fn test_move_without_content_type() {
    let app = router(SessionManager::new());
    send(&app, Method::POST, "/api/games", None).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/games/game-1/moves")
        .body(Body::from(json!({ "move": 4 }).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["move"], 0);
}

#[tokio::test]
async fn test_list_and_delete() {
    let app = router(SessionManager::new());
    send(&app, Method::POST, "/api/games", None).await;
    send(&app, Method::POST, "/api/games", None).await;

    let (status, body) = send(&app, Method::GET, "/api/games", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["game-1", "game-2"]));

    let (status, _) = send(&app, Method::DELETE, "/api/games/game-1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, "/api/games/game-1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
