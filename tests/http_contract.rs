//! HTTP contract tests for `HttpApiClient` against a wiremock server.

mod common;

use artfeed::api::{ApiClient, HttpApiClient};
use artfeed::domain::{ArtfeedError, NewPost};
use artfeed::{AppState, Gallery, Phase, ThemeMode};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helper Functions
// ============================================================================

fn client(server: &MockServer) -> HttpApiClient {
    HttpApiClient::new(&server.uri(), Duration::from_secs(5)).expect("valid base url")
}

fn posts_body() -> serde_json::Value {
    json!({
        "success": true,
        "data": [
            { "_id": "1", "name": "Alice", "prompt": "a cat", "photo": "https://img/1.png" },
            { "_id": "2", "name": "Bob", "prompt": "a dog", "photo": "https://img/2.png" }
        ]
    })
}

// ============================================================================
// List posts
// ============================================================================

#[tokio::test]
async fn list_posts_parses_data_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/post"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts_body()))
        .expect(1)
        .mount(&server)
        .await;

    let posts = client(&server).list_posts().await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, "1");
    assert_eq!(posts[0].author_name, "Alice");
    assert_eq!(posts[1].image_uri, "https://img/2.png");
}

#[tokio::test]
async fn list_posts_non_success_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/post"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server).list_posts().await.unwrap_err();
    assert!(matches!(err, ArtfeedError::Network(_)));
}

#[tokio::test]
async fn list_posts_unparsable_body_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/post"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client(&server).list_posts().await.unwrap_err();
    assert!(matches!(err, ArtfeedError::Network(_)));
}

// ============================================================================
// Generate image
// ============================================================================

#[tokio::test]
async fn generate_sends_prompt_and_returns_photo() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/dalle"))
        .and(body_json(json!({ "prompt": "sunset over mountains" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "photo": "data:image/png;base64,AAA" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let photo = client(&server).generate_image("sunset over mountains").await.unwrap();
    assert_eq!(photo, "data:image/png;base64,AAA");
}

#[tokio::test]
async fn generate_without_photo_is_generation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/dalle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = client(&server).generate_image("a cat").await.unwrap_err();
    assert!(matches!(err, ArtfeedError::Generation(_)));
}

#[tokio::test]
async fn generate_non_success_is_generation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/dalle"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
        .mount(&server)
        .await;

    let err = client(&server).generate_image("a cat").await.unwrap_err();
    assert!(matches!(err, ArtfeedError::Generation(_)));
}

// ============================================================================
// Create post
// ============================================================================

#[tokio::test]
async fn create_post_sends_name_prompt_photo() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/post"))
        .and(body_json(json!({ "name": "Alice", "prompt": "a cat", "photo": "data:x" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let post = NewPost {
        name: "Alice".into(),
        prompt: "a cat".into(),
        photo: "data:x".into(),
    };
    client(&server).create_post(&post).await.unwrap();
}

#[tokio::test]
async fn create_post_non_success_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/post"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let post = NewPost {
        name: "Alice".into(),
        prompt: "a cat".into(),
        photo: "data:x".into(),
    };
    let err = client(&server).create_post(&post).await.unwrap_err();
    assert!(matches!(err, ArtfeedError::Network(_)));
}

// ============================================================================
// Image download
// ============================================================================

#[tokio::test]
async fn gallery_downloads_remote_post_image() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/post"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "_id": "65a1", "name": "Alice", "prompt": "a cat", "photo": format!("{}/images/65a1", server.uri()) }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/images/65a1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0xFF, 0xD8, 0xFF], "image/jpeg"))
        .expect(1)
        .mount(&server)
        .await;

    let api: Arc<dyn ApiClient> = Arc::new(client(&server));
    let mut gallery = Gallery::new(api, AppState::new(ThemeMode::Light, common::DEBOUNCE));
    gallery.load().await.unwrap();
    let dir = tempfile::tempdir().unwrap();

    let written = gallery.download_post("65a1", dir.path()).await.unwrap();

    assert_eq!(written, dir.path().join("download-65a1.jpg"));
    assert_eq!(std::fs::read(&written).unwrap(), [0xFF, 0xD8, 0xFF]);
}

#[tokio::test]
async fn fetch_image_non_success_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/images/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_image(&format!("{}/images/gone", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, ArtfeedError::Network(_)));
}

// ============================================================================
// End to end through the gallery
// ============================================================================

#[tokio::test]
async fn gallery_generates_shares_and_reloads() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/post"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts_body()))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/dalle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "photo": "data:image/png;base64,AAA" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/post"))
        .and(body_json(json!({
            "name": "Alice",
            "prompt": "sunset",
            "photo": "data:image/png;base64,AAA"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let api: Arc<dyn ApiClient> = Arc::new(client(&server));
    let mut gallery = Gallery::new(api, AppState::new(ThemeMode::Light, common::DEBOUNCE));

    gallery.load().await.unwrap();
    assert_eq!(common::ids(gallery.state().feed.posts()), ["2", "1"]);

    gallery.request_generation("sunset").unwrap();
    gallery.settle().await.unwrap();
    assert_eq!(gallery.state().generation.phase, Phase::Succeeded);

    gallery.request_submission("Alice").unwrap();
    gallery.settle().await.unwrap();
    assert_eq!(gallery.state().submission.phase, Phase::Succeeded);
    assert_eq!(gallery.last_notification(), Some("Shared successfully!"));
}
