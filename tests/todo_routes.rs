use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use todo_server::test_helpers::{empty_mock, memory_db, mock_router, test_router};

async fn app() -> Router {
    let db = memory_db().await.expect("open in-memory database");
    test_router(db)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if body.is_empty() {
        return (status, Value::Null);
    }
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn seed_groceries(app: &Router) {
    let (status, _) = send(
        app,
        with_json("POST", "/lists", json!({ "id": 1, "name": "Groceries" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        with_json("POST", "/lists/1/todos", json!({ "id": 1, "text": "Milk" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app().await;
    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({ "ok": true }));
}

#[tokio::test]
async fn list_and_todo_crud_flow() {
    let app = app().await;

    let (status, body) = send(&app, get("/lists")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, list) = send(
        &app,
        with_json("POST", "/lists", json!({ "id": 1, "name": "Groceries" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(list["status"], 201);
    assert_eq!(list["data"], json!({ "id": 1, "name": "Groceries" }));

    let (status, todo) = send(
        &app,
        with_json("POST", "/lists/1/todos", json!({ "id": 1, "text": "Milk" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        todo["data"],
        json!({ "id": 1, "text": "Milk", "checked": false, "list_id": 1 })
    );

    let (status, todo) = send(
        &app,
        with_json("PATCH", "/todos/1", json!({ "checked": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(todo["data"]["checked"], true);

    let (status, todo) = send(&app, get("/todos/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(todo["data"]["checked"], true);
    assert_eq!(todo["data"]["text"], "Milk");

    let (status, detail) = send(&app, get("/lists/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["data"]["list"]["name"], "Groceries");
    assert_eq!(detail["data"]["todos"].as_array().unwrap().len(), 1);

    let (status, renamed) = send(
        &app,
        with_json("PATCH", "/lists/1", json!({ "name": "Weekly shop" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["data"]["name"], "Weekly shop");

    let (status, count) = send(&app, get("/lists/1/todos/count")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count["data"]["count"], 1);

    let (status, body) = send(&app, delete("/todos/1")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, todos) = send(&app, get("/lists/1/todos")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(todos["data"], json!([]));
}

#[tokio::test]
async fn orphan_todo_is_a_conflict() {
    let app = app().await;

    let (status, body) = send(
        &app,
        with_json("POST", "/lists/999/todos", json!({ "id": 2, "text": "Orphan" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);
    assert_eq!(body["message"], "List 999 does not exist");
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn duplicate_ids_are_conflicts() {
    let app = app().await;
    seed_groceries(&app).await;

    let (status, body) = send(
        &app,
        with_json("POST", "/lists", json!({ "id": 1, "name": "Again" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "List with id 1 already exists");

    let (status, _) = send(
        &app,
        with_json("POST", "/lists/1/todos", json!({ "id": 1, "text": "Eggs" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn deleting_a_list_cascades_to_its_todos() {
    let app = app().await;
    seed_groceries(&app).await;

    let (status, _) = send(&app, delete("/lists/1")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, get("/todos/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, get("/lists/1/todos")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "List not found (id=1)");

    let (status, count) = send(&app, get("/lists/count")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count["data"]["count"], 0);
}

#[tokio::test]
async fn moving_a_todo_to_a_missing_list_is_a_conflict() {
    let app = app().await;
    seed_groceries(&app).await;

    let (status, body) = send(
        &app,
        with_json("PATCH", "/todos/1", json!({ "list_id": 999 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "List 999 does not exist");

    let (_, todo) = send(&app, get("/todos/1")).await;
    assert_eq!(todo["data"]["list_id"], 1);
}

#[tokio::test]
async fn invalid_input_is_a_bad_request() {
    let app = app().await;
    seed_groceries(&app).await;

    let (status, body) = send(&app, with_json("POST", "/lists", json!({ "name": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Name required");

    let (status, body) = send(&app, with_json("PATCH", "/todos/1", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (status, body) = send(&app, with_json("POST", "/lists", json!({ "title": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"], Value::Null);

    let (status, body) = send(&app, get("/todos/not-a-number")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn unknown_routes_use_the_json_envelope() {
    let app = app().await;
    let (status, body) = send(&app, get("/nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["message"], "Not Found");
}

#[tokio::test]
async fn database_failures_hide_their_cause() {
    let app = mock_router(empty_mock());
    let (status, body) = send(&app, get("/lists")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);
    assert_eq!(
        body["message"],
        "Find failed. Please check the logs for more details"
    );
}
