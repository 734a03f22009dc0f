//! Shared test helpers for exercising FrameDownloader against a wiremock
//! service double.

use crate::config::{ApiConfig, Config, LoginConfig, TransferConfig};
use crate::downloader::FrameDownloader;
use crate::types::Event;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Build a config pointed at the mock server, with pacing zeroed out so
/// tests never sleep.
pub(crate) fn test_config(server: &MockServer) -> Config {
    Config {
        login: LoginConfig {
            email: "user@example.com".into(),
            password: "hunter2".into(),
        },
        api: ApiConfig {
            base_url: server.uri(),
            image_base_url: server.uri(),
        },
        transfer: TransferConfig {
            image_timeout_secs: 5,
            throttle_delay_secs: 0,
            failure_backoff_secs: 0,
        },
        ..Default::default()
    }
}

/// Helper to create a FrameDownloader wired to the mock server.
pub(crate) fn test_downloader(server: &MockServer) -> FrameDownloader {
    FrameDownloader::new(test_config(server)).unwrap()
}

/// A complete asset element the way the listing endpoint returns it.
pub(crate) fn asset(id: &str, taken_at: &str, file_name: &str) -> serde_json::Value {
    json!({
        "user_id": "u1",
        "file_name": file_name,
        "taken_at": taken_at,
        "id": id,
    })
}

/// Mount a successful login that issues a fixed user id and token.
pub(crate) async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/login.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "current_user": {
                    "id": "u1",
                    "auth_token": "token-abc"
                }
            }
        })))
        .mount(server)
        .await;
}

/// Mount the asset listing for a frame.
pub(crate) async fn mount_listing(server: &MockServer, frame_id: &str, assets: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path(format!("/frames/{frame_id}/assets.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "assets": assets })))
        .mount(server)
        .await;
}

/// Mount an image fetch for one stored filename under the fixed test user.
pub(crate) async fn mount_image(server: &MockServer, file_name: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!("/u1/{file_name}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}

/// Drain all events buffered on a subscriber after a run has finished.
pub(crate) fn drain_events(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
