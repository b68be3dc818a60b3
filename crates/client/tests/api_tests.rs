//! Integration tests for the dispatch API client.

use assert_matches::assert_matches;
use axum::{
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use mapant_client::api::{ApiError, MapantApi};
use mapant_core::config::WorkerConfig;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test app");
    });

    format!("http://{addr}")
}

fn config_for(base_url: &str) -> WorkerConfig {
    WorkerConfig::new("worker-1".into(), "secret".into(), base_url.into())
}

#[tokio::test]
async fn next_job_posts_with_bearer_auth() {
    // The handler echoes the Authorization header back so the test can
    // assert the bearer composition without shared state.
    let app = Router::new().route(
        "/map-generation/next-job",
        post(|headers: HeaderMap| async move {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();
            Json(serde_json::json!({ "type": "NoJobLeft", "echoed_auth": auth }))
        }),
    );
    let base = serve(app).await;

    let api = MapantApi::new(&config_for(&base));
    let raw = api.next_job().await.expect("poll should succeed");

    assert_eq!(raw["type"], "NoJobLeft");
    assert_eq!(raw["echoed_auth"], "Bearer worker-1.secret");
}

#[tokio::test]
async fn next_job_non_success_status_is_an_error() {
    let app = Router::new().route(
        "/map-generation/next-job",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "dispatch down") }),
    );
    let base = serve(app).await;

    let api = MapantApi::new(&config_for(&base));
    let result = api.next_job().await;

    assert_matches!(result, Err(ApiError::Status { status: 500, ref body }) if body == "dispatch down");
}

#[tokio::test]
async fn next_job_network_failure_is_a_request_error() {
    // Nothing listens on this port.
    let api = MapantApi::new(&config_for("http://127.0.0.1:1"));
    let result = api.next_job().await;

    assert_matches!(result, Err(ApiError::Request(_)));
}
