use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use relay_core::{config::MailConfig, create_app, AppConfig, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BREVO_PATH: &str = "/v3/smtp/email";

fn mail_config(server: &MockServer, api_key: Option<&str>) -> MailConfig {
    MailConfig {
        provider_url: format!("{}{}", server.uri(), BREVO_PATH),
        api_key: api_key.map(str::to_string),
        recipient_email: "owner@example.org".to_string(),
        recipient_name: "Owner".to_string(),
        ..MailConfig::default()
    }
}

fn setup_app(server: &MockServer, api_key: Option<&str>) -> Router {
    let mut config = AppConfig::default();
    config.mail = mail_config(server, api_key);

    let state = AppState::from_config(&config).unwrap();
    create_app(state)
}

async fn post_json(app: Router, body: String) -> (StatusCode, Value) {
    post_body(app, body, Some("application/json")).await
}

async fn post_body(app: Router, body: String, content_type: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(Method::POST).uri("/api/send-email");
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(Body::from(body)).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, value)
}

async fn mount_unreachable_provider(server: &MockServer) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_valid_submission_is_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(BREVO_PATH))
        .and(header("api-key", "xkeysib-test"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "messageId": "<1@smtp>" })))
        .expect(1)
        .mount(&server)
        .await;

    let app = setup_app(&server, Some("xkeysib-test"));
    let body = json!({ "name": "Ana", "email": "ana@x.com", "message": "Hi\nThere" }).to_string();

    let (status, value) = post_json(app, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({ "success": true, "message": "Email envoyé avec succès" }));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let outbound: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(outbound["sender"], json!({ "name": "Ana", "email": "ana@x.com" }));
    assert_eq!(outbound["to"], json!([{ "name": "Owner", "email": "owner@example.org" }]));
    assert_eq!(outbound["subject"], "Nouveau message de contact de Ana");

    let html = outbound["htmlContent"].as_str().unwrap();
    assert!(html.contains("Ana"));
    assert!(html.contains("ana@x.com"));
    assert!(html.contains("Hi<br>There"));
}

#[tokio::test]
async fn test_missing_fields_are_rejected_without_provider_call() {
    let server = MockServer::start().await;
    mount_unreachable_provider(&server).await;

    let bodies = [
        json!({ "email": "ana@x.com", "message": "Hi" }),
        json!({ "name": "Ana", "message": "Hi" }),
        json!({ "name": "Ana", "email": "ana@x.com" }),
        json!({ "name": "", "email": "ana@x.com", "message": "Hi" }),
        json!({ "name": "Ana", "email": "ana@x.com", "message": null }),
        json!({}),
    ];

    for body in bodies {
        let app = setup_app(&server, Some("xkeysib-test"));
        let (status, value) = post_json(app, body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(value, json!({ "error": "Nom, email et message sont requis" }));
    }
}

#[tokio::test]
async fn test_malformed_email_is_rejected_without_provider_call() {
    let server = MockServer::start().await;
    mount_unreachable_provider(&server).await;

    for email in ["ana", "ana@x", "ana@.com@", "a na@x.com", "ana@x."] {
        let app = setup_app(&server, Some("xkeysib-test"));
        let body = json!({ "name": "Ana", "email": email, "message": "Hi" }).to_string();

        let (status, value) = post_json(app, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "email: {}", email);
        assert_eq!(value["error"], "Adresse email invalide");
    }
}

#[tokio::test]
async fn test_missing_credential_returns_500_without_provider_call() {
    let server = MockServer::start().await;
    mount_unreachable_provider(&server).await;

    for api_key in [None, Some("undefined"), Some("")] {
        let app = setup_app(&server, api_key);
        let body = json!({ "name": "Ana", "email": "ana@x.com", "message": "Hi" }).to_string();

        let (status, value) = post_json(app, body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(value, json!({ "error": "Clé API Brevo manquante ou invalide" }));
    }
}

#[tokio::test]
async fn test_provider_message_is_returned_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(BREVO_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "invalid_parameter",
            "message": "sender is not valid"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = setup_app(&server, Some("xkeysib-test"));
    let body = json!({ "name": "Ana", "email": "ana@x.com", "message": "Hi" }).to_string();

    let (status, value) = post_json(app, body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value, json!({ "error": "sender is not valid" }));
}

#[tokio::test]
async fn test_provider_failure_without_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = setup_app(&server, Some("xkeysib-test"));
    let body = json!({ "name": "Ana", "email": "ana@x.com", "message": "Hi" }).to_string();

    let (status, value) = post_json(app, body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["error"], "Request failed with status code 500");
}

#[tokio::test]
async fn test_invalid_json_is_a_bad_request() {
    let server = MockServer::start().await;
    mount_unreachable_provider(&server).await;

    for body in ["{not json", "", r#"{"name": 1, "email": "ana@x.com", "message": "Hi"}"#] {
        let app = setup_app(&server, Some("xkeysib-test"));
        let (status, value) = post_json(app, body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {:?}", body);
        assert_eq!(value["error"], "Corps de requête JSON invalide");
    }
}

#[tokio::test]
async fn test_json_body_is_accepted_without_json_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(BREVO_PATH))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&server)
        .await;

    let body = json!({ "name": "Ana", "email": "ana@x.com", "message": "Hi" }).to_string();

    for content_type in [None, Some("text/plain;charset=UTF-8")] {
        let app = setup_app(&server, Some("xkeysib-test"));
        let (status, value) = post_body(app, body.clone(), content_type).await;

        assert_eq!(status, StatusCode::OK, "content type: {:?}", content_type);
        assert_eq!(value["success"], true);
    }
}

#[tokio::test]
async fn test_whitespace_fields_count_as_present() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(BREVO_PATH))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let app = setup_app(&server, Some("xkeysib-test"));
    let body = json!({ "name": " ", "email": "ana@x.com", "message": "Hi" }).to_string();

    let (status, value) = post_json(app, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({ "success": true, "message": "Email envoyé avec succès" }));
}

#[tokio::test]
async fn test_html_in_submission_is_escaped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let app = setup_app(&server, Some("xkeysib-test"));
    let body = json!({
        "name": "Eve",
        "email": "eve@x.com",
        "message": "<img src=x onerror=alert(1)>"
    })
    .to_string();

    let (status, _) = post_json(app, body).await;
    assert_eq!(status, StatusCode::OK);

    let requests = server.received_requests().await.unwrap();
    let outbound: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let html = outbound["htmlContent"].as_str().unwrap();

    assert!(!html.contains("<img"));
    assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
}

#[tokio::test]
async fn test_resubmission_sends_a_second_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&server)
        .await;

    let app = setup_app(&server, Some("xkeysib-test"));
    let body = json!({ "name": "Ana", "email": "ana@x.com", "message": "Hi" }).to_string();

    let (first, _) = post_json(app.clone(), body.clone()).await;
    let (second, _) = post_json(app, body).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
}

#[tokio::test]
async fn test_health_reports_provider_and_counters() {
    let server = MockServer::start().await;
    mount_unreachable_provider(&server).await;

    let app = setup_app(&server, None);
    let (status, _) = post_json(
        app.clone(),
        json!({ "name": "Ana", "email": "bad", "message": "Hi" }).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(value["success"], true);
    assert_eq!(value["data"]["status"], "degraded");
    assert_eq!(value["data"]["provider"], "brevo");
    assert_eq!(value["data"]["provider_configured"], false);
    assert_eq!(value["data"]["relay"]["received"], 1);
    assert_eq!(value["data"]["relay"]["rejected"], 1);
}

#[tokio::test]
async fn test_get_on_send_email_is_not_allowed() {
    let server = MockServer::start().await;
    let app = setup_app(&server, Some("xkeysib-test"));

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/send-email")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
