//! Common test utilities

use std::collections::HashMap;

use axum::Router;
use pluggy_relay::{build_router, AppState, Config};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Configuration pointing at a mock Pluggy server
pub fn test_config(server: &MockServer, extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("PLUGGY_CLIENT_ID".to_string(), "test-client".to_string()),
        ("PLUGGY_CLIENT_SECRET".to_string(), "test-secret".to_string()),
        ("PLUGGY_BASE_URL".to_string(), server.uri()),
    ]);
    for (key, value) in extra {
        vars.insert(key.to_string(), value.to_string());
    }

    Config::from_vars(|key| vars.get(key).cloned()).expect("Invalid test config")
}

/// Router wired to a mock Pluggy server
pub fn test_app(server: &MockServer, extra: &[(&str, &str)]) -> Router {
    let state = AppState::new(test_config(server, extra)).expect("Failed to build state");
    build_router(state)
}

/// Mount a successful POST /auth, expected `times` times
pub async fn mount_auth(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "apiKey": "test-api-key" })))
        .expect(times)
        .mount(server)
        .await;
}
