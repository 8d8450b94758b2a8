//! Integration tests for the /upload route
//!
//! Exercise the route itself (multipart parsing, field names, auth) rather
//! than the relay service in isolation: a real database backs the account,
//! a wiremock server stands in for the media host and analysis API.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use terralens_backend::config::AppConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_against(server: &MockServer) -> AppConfig {
    let mut config = common::test_config();
    config.media.upload_url = format!("{}/media/upload", server.uri());
    config.media.destroy_url = format!("{}/media/destroy", server.uri());
    config.media.api_key = "test-key".to_string();
    config.media.api_secret = "test-secret".to_string();
    config.analysis.base_url = server.uri();
    config
}

async fn register_and_token(app: &common::TestApp) -> String {
    let email = format!("uploader_{}@example.com", uuid::Uuid::new_v4());
    let body = json!({ "name": "Ann", "email": email, "password": "secret1" });
    let (status, _) = app.post("/register", &body.to_string()).await;
    assert_eq!(status, StatusCode::CREATED);

    let form = format!("username={}&password=secret1", email);
    let (status, response) = app.post_form("/token", &form).await;
    assert_eq!(status, StatusCode::OK);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    response["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_upload_missing_image2_is_400_before_any_upstream_call() {
    let server = MockServer::start().await;

    // No stage of the pipeline may be reached
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = common::TestApp::with_config(config_against(&server)).await;
    let token = register_and_token(&app).await;

    let (status, body) = app
        .post_multipart("/upload", &token, &[("image1", b"pixels-a")])
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("image2"));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_upload_unknown_fields_do_not_satisfy_required_ones() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = common::TestApp::with_config(config_against(&server)).await;
    let token = register_and_token(&app).await;

    // Unknown fields are ignored; both required names are absent
    let (status, _) = app
        .post_multipart(
            "/upload",
            &token,
            &[("attachment", b"pixels-a"), ("image_b", b"pixels-b")],
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_upload_end_to_end_returns_analysis_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/media/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "secure_url": "https://media.test/uploaded.png",
            "public_id": "uploaded"
        })))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/process_urls"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "image_a_url": "https://cdn.test/a.png",
            "image_b_url": "https://cdn.test/b.png",
            "result_url": "https://cdn.test/mask.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let analysis_body = json!({
        "summary": "new construction along the riverbank",
        "change_percent": 4.2
    });

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let app = common::TestApp::with_config(config_against(&server)).await;
    let token = register_and_token(&app).await;

    let (status, body) = app
        .post_multipart(
            "/upload",
            &token,
            &[("image1", b"pixels-a"), ("image2", b"pixels-b")],
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, analysis_body);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_upload_relay_failure_returns_500_with_generic_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/media/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "secure_url": "https://media.test/uploaded.png",
            "public_id": "uploaded"
        })))
        .mount(&server)
        .await;

    let upstream_detail = "traceback: alignment solver diverged";
    Mock::given(method("POST"))
        .and(path("/process_urls"))
        .respond_with(ResponseTemplate::new(500).set_body_string(upstream_detail))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/media/destroy"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let app = common::TestApp::with_config(config_against(&server)).await;
    let token = register_and_token(&app).await;

    let (status, body) = app
        .post_multipart(
            "/upload",
            &token,
            &[("image1", b"pixels-a"), ("image2", b"pixels-b")],
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    // Upstream text stays in the logs, never in the response
    assert!(!body.contains(upstream_detail));
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["error"]["code"], "PROCESSING_FAILED");
}
