mod common;

use axum::http::StatusCode;
use common::{get, post_json, seed_sample_content, setup_app, setup_app_with};
use quill_server::api_search::SearchSettings;
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn test_space_search_over_sample_content() {
    let (app, _pool) = setup_app();
    seed_sample_content(&app).await;

    let (status, body) = get(&app, "/find_string?search_string=%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"article_id": 1, "offsets": [3, 7]},
            {"article_id": 2, "offsets": [2, 7, 11]},
            {"article_id": 3, "offsets": [3, 7]},
            {"article_id": 4, "offsets": [3, 7, 11]},
            {"article_id": 5, "offsets": [3, 8, 12]},
        ])
    );
}

#[tokio::test]
async fn test_overlapping_matches_are_reported() {
    let (app, _pool) = setup_app();
    seed_sample_content(&app).await;

    let (status, body) = get(&app, "/find_string?search_string=22").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"article_id": 2, "offsets": [0, 3, 4, 5, 8, 9]}]));
}

#[tokio::test]
async fn test_only_matching_articles_are_returned() {
    let (app, _pool) = setup_app();
    seed_sample_content(&app).await;

    let (status, body) = get(&app, "/find_string?search_string=5555").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"article_id": 5, "offsets": [4]}]));
}

#[tokio::test]
async fn test_no_match_is_404() {
    let (app, _pool) = setup_app();
    seed_sample_content(&app).await;

    let (status, body) = get(&app, "/find_string?search_string=zzz").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "string not found in any article");
}

#[tokio::test]
async fn test_search_on_empty_store_is_404() {
    let (app, _pool) = setup_app();

    let (status, _) = get(&app, "/find_string?search_string=a").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_search_string_is_400() {
    let (app, _pool) = setup_app();
    seed_sample_content(&app).await;

    let (status, body) = get(&app, "/find_string?search_string=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "search pattern must not be empty");
}

#[tokio::test]
async fn test_missing_search_string_is_400() {
    let (app, _pool) = setup_app();

    let (status, body) = get(&app, "/find_string").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing search_string parameter");
}

#[tokio::test]
async fn test_oversized_search_string_is_400() {
    let (app, _pool) = setup_app_with(SearchSettings {
        max_pattern_len: 4,
        ..SearchSettings::default()
    });

    let (status, body) = get(&app, "/find_string?search_string=abcde").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "search_string exceeds 4 bytes");
}

#[tokio::test]
async fn test_search_is_case_sensitive() {
    let (app, _pool) = setup_app();
    post_json(&app, "/users", json!({"id": 1, "name": "omer"})).await;
    post_json(
        &app,
        "/articles",
        json!({"id": 1, "title": "t", "body": "Rust rust RUST", "author_id": 1}),
    )
    .await;

    let (status, body) = get(&app, "/find_string?search_string=rust").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"article_id": 1, "offsets": [5]}]));
}

#[tokio::test]
async fn test_offsets_are_character_positions() {
    let (app, _pool) = setup_app();
    post_json(&app, "/users", json!({"id": 1, "name": "omer"})).await;
    post_json(
        &app,
        "/articles",
        json!({"id": 1, "title": "t", "body": "café é", "author_id": 1}),
    )
    .await;

    // "é" percent-encoded as UTF-8.
    let (status, body) = get(&app, "/find_string?search_string=%C3%A9").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"article_id": 1, "offsets": [3, 5]}]));
}

#[tokio::test]
async fn test_zero_timeout_is_504() {
    let (app, _pool) = setup_app_with(SearchSettings {
        timeout: Duration::ZERO,
        ..SearchSettings::default()
    });
    seed_sample_content(&app).await;

    let (status, body) = get(&app, "/find_string?search_string=1").await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"], "search deadline exceeded");
}

#[tokio::test]
async fn test_repeated_searches_are_identical() {
    let (app, _pool) = setup_app();
    seed_sample_content(&app).await;

    let first = get(&app, "/find_string?search_string=4").await;
    let second = get(&app, "/find_string?search_string=4").await;
    assert_eq!(first, second);
    assert_eq!(first.0, StatusCode::OK);
}
