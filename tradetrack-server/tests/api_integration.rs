use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt; // for `oneshot`
use tradetrack_core::{EmployeeDirectory, MatchConfig, TimeEntryStore};
use tradetrack_server::{build_router, persistence, AppState, REQUEST_ID_HEADER};

const DIM: usize = 4;

fn matching() -> MatchConfig {
    MatchConfig::new(DIM, 0.5)
}

/// Router over empty stores persisting into a fresh temp directory.
fn test_app() -> (Router, TempDir) {
    let dir = tempdir().unwrap();
    let state = AppState::new(dir.path().to_path_buf(), matching());
    (build_router(state), dir)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json_body) => builder
            .header("content-type", "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(app: &Router, id: &str, name: &str, embedding: Value) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/employees",
        Some(json!({"employee_id": id, "name": name, "embedding": embedding})),
    )
    .await
}

#[tokio::test]
async fn test_health() {
    let (app, _dir) = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["employees"], 0);
}

#[tokio::test]
async fn test_register_and_get_employee() {
    let (app, _dir) = test_app();
    let (status, body) = register(&app, "E1", "Alice Smith", json!([3.0, 4.0, 0.0, 0.0])).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!({"employee_id": "E1", "name": "Alice Smith", "role": "Employee"}));

    let (status, body) = send(&app, Method::GET, "/employees/E1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Alice Smith");
    assert!(body["data"].get("embedding").is_none());

    let (status, body) = send(&app, Method::GET, "/employees/E2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "EMPLOYEE_NOT_FOUND");
}

#[tokio::test]
async fn test_register_duplicate_and_invalid() {
    let (app, _dir) = test_app();
    register(&app, "E1", "Alice", json!([1.0, 0.0, 0.0, 0.0])).await;

    let (status, body) = register(&app, "E1", "Mallory", json!([0.0, 1.0, 0.0, 0.0])).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "EMPLOYEE_ALREADY_EXISTS");
    let (_, body) = send(&app, Method::GET, "/employees/E1", None).await;
    assert_eq!(body["data"]["name"], "Alice");

    let (status, body) = register(&app, "E2", "Zero", json!([0.0, 0.0, 0.0, 0.0])).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_VECTOR");

    let (status, body) = register(&app, "E3", "Short", json!([1.0, 0.0])).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "WRONG_DIMENSION");

    let (status, body) = register(&app, "", "Nobody", json!([1.0, 0.0, 0.0, 0.0])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_verify_endpoint() {
    let (app, _dir) = test_app();
    register(&app, "E1", "Alice", json!([1.0, 0.0, 0.0, 0.0])).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/employees/verify",
        Some(json!({"employee_id": "E1", "embedding": [2.0, 0.1, 0.0, 0.0]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["employee_id"], "E1");
    assert_eq!(body["data"]["threshold"], 0.5);
    assert!(body["data"]["score"].as_f64().unwrap() > 0.99);

    let (status, body) = send(
        &app,
        Method::POST,
        "/employees/verify",
        Some(json!({"employee_id": "E1", "embedding": [0.0, 1.0, 0.0, 0.0]})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "FACE_CONFIDENCE_TOO_LOW");
    assert_eq!(body["message"], "Face could not be verified");

    // Malformed queries look the same as a failed match.
    let (status, body) = send(
        &app,
        Method::POST,
        "/employees/verify",
        Some(json!({"employee_id": "E1", "embedding": [0.0, 0.0, 0.0, 0.0]})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "FACE_CONFIDENCE_TOO_LOW");
}

#[tokio::test]
async fn test_match_endpoint() {
    let (app, _dir) = test_app();
    let (status, body) = send(&app, Method::POST, "/employees/match", Some(json!({"embedding": [1.0, 0.0, 0.0, 0.0]}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NO_EMPLOYEES");

    register(&app, "E1", "Alice", json!([1.0, 0.0, 0.0, 0.0])).await;
    register(&app, "E2", "Bob", json!([0.0, 1.0, 0.0, 0.0])).await;

    let (status, body) = send(&app, Method::POST, "/employees/match", Some(json!({"embedding": [0.1, 0.9, 0.0, 0.0]}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["employee_id"], "E2");
    assert_eq!(body["data"]["name"], "Bob");
    assert_eq!(body["data"]["role"], "Employee");

    let (status, _) = send(&app, Method::POST, "/employees/match", Some(json!({"embedding": [0.0, 0.0, 1.0, 0.0]}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_search_update_and_delete() {
    let (app, _dir) = test_app();
    register(&app, "E1", "Alice Smith", json!([1.0, 0.0, 0.0, 0.0])).await;
    register(&app, "E2", "Albert Jones", json!([0.0, 1.0, 0.0, 0.0])).await;

    let (status, body) = send(&app, Method::GET, "/employees/search?prefix=ali", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::GET, "/employees/search?prefix=al", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = send(&app, Method::PATCH, "/employees/E2", Some(json!({"role": "Admin"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "Admin");
    assert_eq!(body["data"]["name"], "Albert Jones");

    let (status, _) = send(&app, Method::PATCH, "/employees/E2", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::DELETE, "/employees/E1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["employee_id"], "E1");

    let (_, body) = send(&app, Method::GET, "/employees", None).await;
    assert_eq!(body["data"], json!([{"employee_id": "E2", "name": "Albert Jones", "role": "Admin"}]));

    let (status, _) = send(&app, Method::DELETE, "/employees/E1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clock_cycle() {
    let (app, _dir) = test_app();
    let (status, body) = send(&app, Method::POST, "/clock/E1/in", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EMPLOYEE_NOT_FOUND");

    register(&app, "E1", "Alice", json!([1.0, 0.0, 0.0, 0.0])).await;

    let (status, body) = send(&app, Method::POST, "/clock/E1/out", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "NOT_CLOCKED_IN");

    let (status, body) = send(&app, Method::POST, "/clock/E1/in", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["employee_id"], "E1");
    assert!(body["data"]["clock_out"].is_null());
    let clock_in_time = body["data"]["clock_in"].clone();

    let (status, body) = send(&app, Method::POST, "/clock/E1/in", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_CLOCKED_IN");

    let (_, body) = send(&app, Method::GET, "/clock/E1/status", None).await;
    assert_eq!(body["data"]["is_clocked_in"], true);
    assert_eq!(body["data"]["clock_in_time"], clock_in_time);

    let (status, body) = send(&app, Method::POST, "/clock/E1/out", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["clock_out"].is_string());

    let (_, body) = send(&app, Method::GET, "/clock/E1/status", None).await;
    assert_eq!(body["data"], json!({"is_clocked_in": false, "clock_in_time": null}));

    let (_, body) = send(&app, Method::GET, "/clock/E1/entries", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_acknowledged_writes_survive_restart() {
    let (app, dir) = test_app();
    let (status, _) = register(&app, "E1", "Alice", json!([1.0, 0.0, 0.0, 0.0])).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, Method::POST, "/clock/E1/in", None).await;
    assert_eq!(status, StatusCode::OK);

    // Reload from disk without any shutdown save.
    let restored = persistence::load_snapshot(dir.path(), matching()).unwrap();
    assert_eq!(restored.directory.len(), 1);
    assert_eq!(restored.directory.get_by_id("E1").unwrap().name, "Alice");
    assert!(restored.time_entries.get_open_entry("E1").unwrap().is_some());

    send(&app, Method::POST, "/clock/E1/out", None).await;
    send(&app, Method::PATCH, "/employees/E1", Some(json!({"name": "Alice B"}))).await;
    let restored = persistence::load_snapshot(dir.path(), matching()).unwrap();
    assert_eq!(restored.directory.get_by_id("E1").unwrap().name, "Alice B");
    assert!(restored.time_entries.get_open_entry("E1").unwrap().is_none());
    assert_eq!(restored.time_entries.entries_for("E1").unwrap().len(), 1);

    send(&app, Method::DELETE, "/employees/E1", None).await;
    let restored = persistence::load_snapshot(dir.path(), matching()).unwrap();
    assert!(restored.directory.is_empty());
    assert_eq!(restored.time_entries.entries_for("E1").unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_snapshot_write_is_internal_error() {
    let dir = tempdir().unwrap();
    // A plain file where the data directory should be.
    let blocked = dir.path().join("data");
    std::fs::write(&blocked, b"").unwrap();
    let app = build_router(AppState::new(blocked, matching()));

    let (status, body) = register(&app, "E1", "Alice", json!([1.0, 0.0, 0.0, 0.0])).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "UNKNOWN_ERROR");
    assert_eq!(body["message"], "Internal server error");
}

#[tokio::test]
async fn test_request_id_is_generated_or_echoed() {
    let (app, _dir) = test_app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let generated = response.headers().get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
    assert_eq!(generated.len(), 36);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(REQUEST_ID_HEADER, "req-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "req-123");
}
