#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use quill_db::{create_pool, run_migrations, DbPool, DbRuntimeSettings, MEMORY_PATH};
use quill_server::{api_search::SearchSettings, app, AppState};
use serde_json::Value;
use tower::ServiceExt;

pub fn setup_app_with(search: SearchSettings) -> (Router, DbPool) {
    let pool = create_pool(MEMORY_PATH, DbRuntimeSettings::default()).unwrap();
    {
        let conn = pool.get().unwrap();
        run_migrations(&conn).unwrap();
    }

    let state = AppState {
        pool: pool.clone(),
        search,
    };
    (app(state), pool)
}

pub fn setup_app() -> (Router, DbPool) {
    setup_app_with(SearchSettings::default())
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Seeds the users, articles, and comments the service was first
/// exercised with.
pub async fn seed_sample_content(app: &Router) {
    let users = [(1, "omer"), (2, "amit"), (3, "yuval"), (4, "galit"), (5, "itai")];
    for (id, name) in users {
        let (status, _) =
            post_json(app, "/users", serde_json::json!({"id": id, "name": name})).await;
        assert_eq!(status, StatusCode::OK, "seeding user {id}");
    }

    let articles = [
        (1, "one", "111 111 1111", 1),
        (2, "two", "22 2222 222 2", 2),
        (3, "three", "333 333 333", 3),
        (4, "four", "444 444 444 4", 4),
        (5, "five", "555 5555 555 555", 5),
    ];
    for (id, title, body, author_id) in articles {
        let (status, _) = post_json(
            app,
            "/articles",
            serde_json::json!({"id": id, "title": title, "body": body, "author_id": author_id}),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "seeding article {id}");
    }

    let comments = [(1, "o", "hdhdhd", 1, 1), (2, "o", "hdhdhd", 1, 1), (3, "y", "dfbdfb", 1, 2)];
    for (id, title, body, article_id, user_id) in comments {
        let (status, _) = post_json(
            app,
            "/comments",
            serde_json::json!({
                "id": id,
                "title": title,
                "body": body,
                "article_id": article_id,
                "user_id": user_id
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "seeding comment {id}");
    }
}
