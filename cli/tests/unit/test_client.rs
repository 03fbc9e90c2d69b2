//! Webhook client tests

use axum::http::Method;
use serde_json::json;

use watchly_api::models::{DeploymentNotification, DeploymentStatus, ProjectSettingsRequest};
use watchly_cli::app::options::{AuthPolicy, AuthScheme, ClientOptions, Endpoint};
use watchly_cli::errors::WatchlyError;
use watchly_cli::http::client::WatchlyClient;

use crate::stub::{StubServer, API_KEY};

#[tokio::test]
async fn test_start_deployment_request_shape() {
    let server = StubServer::start(201, r#"{"id":"dep-1"}"#).await;

    let id = server
        .client()
        .start_deployment("abc123", "https://github.com/acme/shop/actions/runs/9", None)
        .await
        .unwrap();
    assert_eq!(id, "dep-1");

    let request = server.only_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/api/v1/webhooks/deployments/start/abc123");
    assert_eq!(request.authorization.as_deref(), Some("Bearer wk_test_123"));
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    assert_eq!(
        request.json(),
        json!({"url": "https://github.com/acme/shop/actions/runs/9"})
    );
}

#[tokio::test]
async fn test_start_deployment_with_release_tag() {
    let server = StubServer::start(200, r#"{"id":"dep-2","extra":true}"#).await;

    let id = server
        .client()
        .start_deployment("abc123", "https://ci/run/1", Some("v2.0.1"))
        .await
        .unwrap();
    assert_eq!(id, "dep-2");
    assert_eq!(
        server.only_request().json(),
        json!({"url": "https://ci/run/1", "release_tag": "v2.0.1"})
    );
}

#[tokio::test]
async fn test_start_deployment_empty_tag_is_omitted() {
    let server = StubServer::start(200, r#"{"id":"dep-3"}"#).await;

    server
        .client()
        .start_deployment("abc123", "https://ci/run/1", Some(""))
        .await
        .unwrap();
    assert!(server.only_request().json().get("release_tag").is_none());
}

#[tokio::test]
async fn test_start_deployment_server_error() {
    let server = StubServer::start(500, r#"{"id":"should-not-be-used"}"#).await;

    let err = server
        .client()
        .start_deployment("abc123", "https://ci/run/1", None)
        .await
        .unwrap_err();
    assert!(matches!(err, WatchlyError::UnexpectedStatus { .. }));
    assert!(err.status().unwrap().contains("500"));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_start_deployment_rejects_no_content() {
    let server = StubServer::start(204, "").await;

    let err = server
        .client()
        .start_deployment("abc123", "https://ci/run/1", None)
        .await
        .unwrap_err();
    assert!(matches!(err, WatchlyError::UnexpectedStatus { .. }));
}

#[tokio::test]
async fn test_start_deployment_malformed_response() {
    let server = StubServer::start(200, "not json").await;

    let err = server
        .client()
        .start_deployment("abc123", "https://ci/run/1", None)
        .await
        .unwrap_err();
    assert!(matches!(err, WatchlyError::Decode { .. }));
}

#[tokio::test]
async fn test_start_deployment_missing_id() {
    let server = StubServer::start(201, r#"{"identifier":"dep-1"}"#).await;

    let err = server
        .client()
        .start_deployment("abc123", "https://ci/run/1", None)
        .await
        .unwrap_err();
    assert!(matches!(err, WatchlyError::Decode { .. }));
}

#[tokio::test]
async fn test_finish_deployment_body() {
    let server = StubServer::start(204, "").await;

    server
        .client()
        .finish_deployment("abc123", DeploymentStatus::Successful, "2025-05-01T10:00:00Z")
        .await
        .unwrap();

    let request = server.only_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/api/v1/webhooks/deployments/finish/abc123");
    assert_eq!(
        request.body,
        r#"{"status":"successful","completed_at":"2025-05-01T10:00:00Z"}"#
    );
}

#[tokio::test]
async fn test_finish_deployment_client_error() {
    let server = StubServer::start(404, r#"{"error":"not found"}"#).await;

    let err = server
        .client()
        .finish_deployment("abc123", DeploymentStatus::Failed, "2025-05-01T10:00:00Z")
        .await
        .unwrap_err();
    assert!(err.status().unwrap().starts_with("404"));
}

#[tokio::test]
async fn test_freeze_sends_explicit_flag() {
    let server = StubServer::start(200, r#"{"deployment_freeze":true}"#).await;
    server.client().set_deployment_freeze(true).await.unwrap();

    let request = server.only_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.path, "/api/v1/webhooks/projects");
    assert_eq!(request.body, r#"{"deployment_freeze":true}"#);

    let server = StubServer::start(200, "").await;
    server.client().set_deployment_freeze(false).await.unwrap();
    assert_eq!(server.only_request().body, r#"{"deployment_freeze":false}"#);
}

#[tokio::test]
async fn test_update_project_settings_echo() {
    let server = StubServer::start(200, r#"{"deployment_freeze":true}"#).await;
    let echo = server
        .client()
        .update_project_settings(&ProjectSettingsRequest::freeze(true))
        .await
        .unwrap();
    assert_eq!(echo.unwrap().deployment_freeze, Some(true));

    let server = StubServer::start(500, "").await;
    let result = server
        .client()
        .update_project_settings(&ProjectSettingsRequest::freeze(true))
        .await;
    assert!(matches!(result, Err(WatchlyError::UnexpectedStatus { .. })));
}

#[tokio::test]
async fn test_deployments_enabled() {
    let server = StubServer::start(200, r#"{"enabled":true}"#).await;
    assert!(server.client().get_deployments_enabled().await.unwrap());

    let request = server.only_request();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.path, "/api/v1/webhooks/deployments/enabled");
    assert_eq!(request.body, "");

    let server = StubServer::start(200, r#"{"enabled":false}"#).await;
    assert!(!server.client().get_deployments_enabled().await.unwrap());
}

#[tokio::test]
async fn test_deployments_enabled_forbidden_is_error() {
    let server = StubServer::start(403, r#"{"enabled":false}"#).await;

    let err = server.client().get_deployments_enabled().await.unwrap_err();
    assert!(err.status().unwrap().starts_with("403"));
}

fn notification() -> DeploymentNotification {
    DeploymentNotification {
        id: "dep-9".to_string(),
        github_run_id: "1234".to_string(),
        github_job_id: "deploy".to_string(),
        commit_sha: "abc123".to_string(),
        commit_author: "octocat".to_string(),
    }
}

#[tokio::test]
async fn test_legacy_notify() {
    let server = StubServer::start(200, "{}").await;
    server.client().notify_deployment(&notification()).await.unwrap();

    let request = server.only_request();
    assert_eq!(request.path, "/api/v1/webhooks/deployments/finish");
    assert_eq!(
        request.json(),
        json!({
            "id": "dep-9",
            "github_run_id": "1234",
            "github_job_id": "deploy",
            "commit_sha": "abc123",
            "commit_author": "octocat",
        })
    );
}

#[tokio::test]
async fn test_legacy_notify_only_accepts_ok() {
    let server = StubServer::start(201, "{}").await;
    let result = server.client().notify_deployment(&notification()).await;
    assert!(matches!(result, Err(WatchlyError::UnexpectedStatus { .. })));
}

#[tokio::test]
async fn test_query_param_auth() {
    let server = StubServer::start(201, r#"{"id":"dep-1"}"#).await;
    let client = server.client_with_auth(
        AuthPolicy::default().with(Endpoint::DeploymentStart, AuthScheme::QueryParam),
    );

    client
        .start_deployment("abc123", "https://ci/run/1", None)
        .await
        .unwrap();

    let request = server.only_request();
    assert_eq!(request.query, Some(format!("api_key={}", API_KEY)));
    assert!(request.authorization.is_none());
}

#[tokio::test]
async fn test_invalid_input_makes_no_request() {
    let server = StubServer::start(201, r#"{"id":"dep-1"}"#).await;

    let err = server
        .client()
        .start_deployment("", "https://ci/run/1", None)
        .await
        .unwrap_err();
    assert!(matches!(err, WatchlyError::InvalidInput(_)));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_dot_segments_never_reach_other_endpoints() {
    let server = StubServer::start(200, r#"{"id":"x"}"#).await;
    let client = server.client();

    let finish = client
        .finish_deployment("..", DeploymentStatus::Successful, "2025-05-01T10:00:00Z")
        .await;
    assert!(matches!(finish, Err(WatchlyError::InvalidInput(_))));

    let start = client.start_deployment(".", "https://ci/run/1", None).await;
    assert!(matches!(start, Err(WatchlyError::InvalidInput(_))));

    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let options = ClientOptions::with_base_url(&format!("http://{}/api/v1", addr)).unwrap();
    let client = WatchlyClient::new(options, API_KEY.to_string().into()).unwrap();

    let err = client.get_deployments_enabled().await.unwrap_err();
    assert!(matches!(err, WatchlyError::Transport(_)));
}
