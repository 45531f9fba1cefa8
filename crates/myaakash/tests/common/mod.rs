//! Shared fixtures for the mock service tests.

#![allow(dead_code)]

use myaakash::{ClientConfig, ServiceUrl};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PSID: &str = "00001234567";
pub const PASSWORD: &str = "secret123";
pub const USER_ID: &str = "u-4242";

/// Point every service at its own prefix on one mock server.
pub fn mock_config(server: &MockServer) -> ClientConfig {
    let url = |prefix: &str| ServiceUrl::new(format!("{}{}", server.uri(), prefix)).unwrap();

    ClientConfig::default()
        .with_session_api(url("/sess"))
        .with_lms_api(url("/lms"))
        .with_channel_apis(url("/channel/v1"), url("/channel/v2"))
        .with_exam_api(url("/exam-platform"))
}

pub fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"message": "OK", "data": data}))
}

pub fn rejected(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"message": message}))
}

pub fn grant(access: &str, refresh: &str) -> Value {
    json!({
        "access_token": access,
        "refresh_token": refresh,
        "aakash_login_value": format!("login-{}", access),
        "web_session_key": "web_session_8f2a",
        "web_session_value": format!("web-{}", access),
        "user_id": USER_ID
    })
}

pub fn profile() -> Value {
    json!({
        "first_name": "Asha",
        "psid": PSID,
        "user_id": USER_ID,
        "dob": "2007-04-01",
        "courses": [{"course_id": "C-11", "course_name": "NEET 2026"}],
        "phone": "9876543210",
        "mail": "asha@example.com"
    })
}

/// Mount a successful password login for `access` and a profile endpoint
/// that accepts that access token.
pub async fn mount_login(server: &MockServer, access: &str) {
    Mock::given(method("POST"))
        .and(path("/sess/user/session"))
        .and(body_json(json!({
            "password": PASSWORD,
            "profile": "student",
            "psid_or_mobile": PSID
        })))
        .respond_with(ok(grant(access, &format!("{}-refresh", access))))
        .mount(server)
        .await;

    mount_profile(server, access).await;
}

pub async fn mount_profile(server: &MockServer, access: &str) {
    Mock::given(method("GET"))
        .and(path("/sess/user"))
        .and(header("access-token", access))
        .respond_with(ok(profile()))
        .mount(server)
        .await;
}
