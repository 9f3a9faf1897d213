//! End-to-end tests driving the router in-process.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use catalog::{CatalogIndex, CatalogProvider, DishDetail, parser::parse_catalog_str};
use serde_json::{Value, json};
use server::routes::{ContinueSessionResponse, StepStatus};
use server::{AppState, ServerConfig, TokenTable, build_router, spawn_session_sweeper};
use session::{BatchSampler, SessionManager};
use tower::ServiceExt;

const ALA: &str = "token-ala";
const OLA: &str = "token-ola";

fn test_catalog() -> Arc<CatalogIndex> {
    let mut dishes = vec![
        json!({"id": 1, "name": "A", "cuisineId": 1, "ingredientIds": [1, 2]}),
        json!({"id": 2, "name": "B", "cuisineId": 1, "ingredientIds": [1, 3]}),
        json!({"id": 3, "name": "C", "cuisineId": 1, "ingredientIds": [2]}),
    ];
    dishes.extend((4..=20).map(|id| {
        json!({"id": id, "name": format!("Filler {id}"), "cuisineId": 2, "ingredientIds": [4]})
    }));

    let document = json!({
        "cuisines": [{"id": 1, "name": "POLSKA"}, {"id": 2, "name": "ITALIAN"}],
        "ingredients": [
            {"id": 1, "name": "salt", "color": "#ffffff"},
            {"id": 2, "name": "chili", "color": "#ff0000"},
            {"id": 3, "name": "sugar", "color": "#eeeeee"},
            {"id": 4, "name": "water", "color": "#0000ff"}
        ],
        "dishes": dishes,
    });

    let file = parse_catalog_str(&document.to_string()).unwrap();
    Arc::new(CatalogIndex::from_catalog_file(file).unwrap())
}

fn build_test_state(config: ServerConfig) -> (Arc<AppState>, Arc<CatalogIndex>) {
    let catalog = test_catalog();
    let sessions = SessionManager::new(catalog.clone()).with_sampler(BatchSampler::seeded(42));
    let identity = TokenTable::new().with_token(ALA, "ala").with_token(OLA, "ola");
    let state = AppState::new(catalog.clone(), sessions, Arc::new(identity), config);
    (state, catalog)
}

fn build_test_app() -> (Router, Arc<CatalogIndex>) {
    let (state, catalog) = build_test_state(ServerConfig::default());
    (build_router(state), catalog)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn dish_ids(value: &Value) -> Vec<u64> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let (app, _) = build_test_app();
    let response = app
        .oneshot(request("GET", "/health", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_rejects_missing_or_unknown_token() {
    let (app, _) = build_test_app();

    let (status, _) = send(&app, request("GET", "/cuisine", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, request("POST", "/startSession", Some("nope"), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_list_cuisines() {
    let (app, _) = build_test_app();

    let (status, body) = send(&app, request("GET", "/cuisine", Some(ALA), None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"id": 1, "name": "POLSKA"}, {"id": 2, "name": "ITALIAN"}])
    );
}

#[tokio::test]
async fn test_start_session_by_cuisine() {
    let (app, _) = build_test_app();

    let (status, body) = send(
        &app,
        request("POST", "/startSession", Some(ALA), Some(json!({"cuisine": "polska"}))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let mut ids = dish_ids(&body);
    ids.sort();
    assert_eq!(ids, vec![1, 2, 3]);

    // Full cuisine record, as older clients send it
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/startSession",
            Some(ALA),
            Some(json!({"cuisine": {"id": 2, "name": "ITALIAN"}})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dish_ids(&body).len(), 10);
    assert!(dish_ids(&body).iter().all(|&id| id >= 4));

    // Dishes come back camelCased with resolved relations
    let first = &body[0];
    assert!(first["imageUrl"].is_string());
    assert_eq!(first["cuisine"]["name"], "ITALIAN");
    assert_eq!(first["ingredients"][0]["name"], "water");
}

#[tokio::test]
async fn test_start_session_errors() {
    let (app, _) = build_test_app();

    let (status, _) = send(
        &app,
        request("POST", "/startSession", Some(ALA), Some(json!({"cuisine": "THAI"}))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let bad = Request::builder()
        .method("POST")
        .uri("/startSession")
        .header(header::AUTHORIZATION, format!("Bearer {ALA}"))
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = send(&app, bad).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_continue_without_start_is_conflict() {
    let (app, _) = build_test_app();

    let (status, _) = send(
        &app,
        request("POST", "/continueSession", Some(OLA), Some(json!({}))),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, request("GET", "/sessionResults", Some(OLA), None)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_full_session_flow() {
    let (app, catalog) = build_test_app();
    let detail = |id| serde_json::to_value(catalog.resolve_dish_detail(id).unwrap()).unwrap();

    // Whole catalog: 20 dishes
    let (status, first) = send(&app, request("POST", "/startSession", Some(ALA), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dish_ids(&first).len(), 10);

    let swipes = json!({
        "liked": [detail(1)],
        "disliked": [detail(2)],
        "skipped": (4..=8).map(detail).collect::<Vec<_>>(),
    });
    let (status, body) = send(
        &app,
        request("POST", "/continueSession", Some(ALA), Some(swipes)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let step: ContinueSessionResponse = serde_json::from_value(body).unwrap();
    assert_eq!(step.status, StepStatus::Batch);
    assert_eq!(step.dishes.len(), 10);
    let swiped = [1, 2, 4, 5, 6, 7, 8];
    assert!(step.dishes.iter().all(|d| !swiped.contains(&d.id)));

    // 7 swiped, 13 left: skip 8 more to leave 5
    let swipes = json!({ "skipped": (9..=16).map(detail).collect::<Vec<_>>() });
    let (_, body) = send(
        &app,
        request("POST", "/continueSession", Some(ALA), Some(swipes)),
    )
    .await;
    let step: ContinueSessionResponse = serde_json::from_value(body).unwrap();
    assert_eq!(step.status, StepStatus::Complete);
    let sentinel: Vec<DishDetail> = vec![catalog.resolve_dish_detail(1).unwrap()];
    assert_eq!(step.dishes, sentinel);

    let (status, body) = send(&app, request("GET", "/sessionResults", Some(ALA), None)).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["A", "C"]);

    // History was reset; ranking it again yields nothing
    let (status, body) = send(&app, request("GET", "/sessionResults", Some(ALA), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_sessions_are_per_user() {
    let (app, _) = build_test_app();

    send(&app, request("POST", "/startSession", Some(ALA), None)).await;

    let (status, _) = send(&app, request("GET", "/sessionResults", Some(OLA), None)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, request("GET", "/sessionResults", Some(ALA), None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_sweeper_evicts_idle_sessions() {
    let config = ServerConfig {
        session_ttl: Some(Duration::from_millis(1)),
        sweep_interval: Duration::from_millis(10),
        ..ServerConfig::default()
    };
    let (state, _) = build_test_state(config);
    let app = build_router(Arc::clone(&state));

    let (status, _) = send(&app, request("POST", "/startSession", Some(ALA), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.sessions.store().len(), 1);

    let sweeper = spawn_session_sweeper(Arc::clone(&state)).expect("eviction enabled");
    tokio::time::sleep(Duration::from_millis(200)).await;
    sweeper.abort();

    assert!(state.sessions.store().is_empty());
    let (status, _) = send(
        &app,
        request("POST", "/continueSession", Some(ALA), Some(json!({}))),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_no_sweeper_without_ttl() {
    let config = ServerConfig {
        session_ttl: None,
        ..ServerConfig::default()
    };
    let (state, _) = build_test_state(config);
    assert!(spawn_session_sweeper(state).is_none());
}
