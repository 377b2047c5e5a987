//! CRUD contract tests for the family API.
//!
//! Each test drives a fresh router through `tower::ServiceExt::oneshot`, so
//! no port is bound and tests don't share state.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use family_api::api::{create_router, AppState};
use family_api::family::FamilyStore;

/// Thin client over a shared router.
struct TestApp {
    router: Router,
}

impl TestApp {
    fn empty() -> Self {
        Self {
            router: create_router(AppState::new(FamilyStore::new("Jackson"))),
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(Method::DELETE)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn post(&self, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri("/members")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

#[tokio::test]
async fn create_then_fetch_returns_matching_fields() {
    let app = TestApp::empty();

    let (status, created) = app
        .post(json!({"first_name": "Tommy", "age": 23, "lucky_numbers": [34, 65, 23]}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let id = created["id"].as_u64().unwrap();
    let (status, fetched) = app.get(&format!("/members/{id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(
        fetched,
        json!({"id": id, "first_name": "Tommy", "age": 23, "lucky_numbers": [34, 65, 23]})
    );
}

#[tokio::test]
async fn delete_then_fetch_returns_404() {
    let app = TestApp::empty();
    let (_, created) = app
        .post(json!({"first_name": "Jimmy", "age": 5, "lucky_numbers": [1]}))
        .await;
    let uri = format!("/members/{}", created["id"]);

    let (status, body) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"done": true}));

    let (status, body) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Member not found"}));

    let (status, _) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_payloads_return_400_with_message() {
    let app = TestApp::empty();

    let cases = [
        (
            json!({"age": 5, "lucky_numbers": [1]}),
            "first_name is required",
        ),
        (
            json!({"first_name": "Jimmy", "age": "five", "lucky_numbers": [1]}),
            "age must be an integer",
        ),
        (
            json!({"first_name": "Jimmy", "age": 0, "lucky_numbers": [1]}),
            "age must be > 0",
        ),
        (
            json!({"first_name": "Jimmy", "age": 5, "lucky_numbers": 7}),
            "lucky_numbers must be a list",
        ),
        (
            json!({"first_name": "Jimmy", "age": 5, "lucky_numbers": [1, "x"]}),
            "lucky_numbers must contain only integers",
        ),
        (json!("Jimmy"), "request body must be a JSON object"),
    ];

    for (payload, message) in cases {
        let (status, body) = app.post(payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": message}));
    }

    let (_, members) = app.get("/members").await;
    assert_eq!(members, json!([]));
}

#[tokio::test]
async fn listing_reflects_all_non_deleted_members() {
    let app = TestApp::empty();
    for (name, age) in [("Ann", 40), ("Bob", 41), ("Cid", 9)] {
        let (status, _) = app
            .post(json!({"first_name": name, "age": age, "lucky_numbers": []}))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, _) = app.delete("/members/2").await;
    assert_eq!(status, StatusCode::OK);

    let (status, members) = app.get("/members").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        members,
        json!([
            {"id": 1, "first_name": "Ann", "age": 40, "lucky_numbers": []},
            {"id": 3, "first_name": "Cid", "age": 9, "lucky_numbers": []}
        ])
    );
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let app = TestApp::empty();
    let (_, first) = app
        .post(json!({"first_name": "Ann", "age": 40, "lucky_numbers": []}))
        .await;
    app.delete(&format!("/members/{}", first["id"])).await;

    let (_, second) = app
        .post(json!({"first_name": "Bob", "age": 41, "lucky_numbers": []}))
        .await;

    assert_eq!(first["id"], 1);
    assert_eq!(second["id"], 2);
}

#[tokio::test]
async fn created_member_is_trimmed_and_coerced() {
    let app = TestApp::empty();

    let (status, created) = app
        .post(json!({"first_name": "  Jane ", "age": "35", "lucky_numbers": ["10", 14, 3.0]}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        created,
        json!({"id": 1, "first_name": "Jane", "age": 35, "lucky_numbers": [10, 14, 3]})
    );
}

#[tokio::test]
async fn seeded_family_is_listed() {
    let app = TestApp {
        router: create_router(AppState::new(FamilyStore::with_seed_members("Jackson"))),
    };

    let (status, members) = app.get("/members").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(members.as_array().unwrap().len(), 3);
    assert_eq!(members[0]["first_name"], "John");
}
