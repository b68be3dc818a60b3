//! Integration tests for the streaming file transfer.
//!
//! Spins up a local axum server so the download path is exercised over a
//! real HTTP connection.

use assert_matches::assert_matches;
use axum::{http::StatusCode, routing::get, Router};
use mapant_client::transfer::{download, TransferError};

/// Serve `app` on an ephemeral local port and return its base URL.
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

#[tokio::test]
async fn download_round_trips_bytes() {
    let payload: Vec<u8> = (0..=255u8).cycle().take(64 * 1024).collect();
    let served = payload.clone();

    let app = Router::new().route("/tiles/42_7.bin", get(move || async move { served }));
    let base = serve(app).await;

    let dir = tempfile::tempdir().expect("tempdir");
    let dest = dir.path().join("42_7.bin");

    let client = reqwest::Client::new();
    download(&client, &format!("{base}/tiles/42_7.bin"), &dest)
        .await
        .expect("download should succeed");

    let on_disk = std::fs::read(&dest).expect("read downloaded file");
    assert_eq!(on_disk, payload, "downloaded bytes must be identical");
}

#[tokio::test]
async fn download_truncates_existing_destination() {
    let app = Router::new().route("/tile.bin", get(|| async { "fresh" }));
    let base = serve(app).await;

    let dir = tempfile::tempdir().expect("tempdir");
    let dest = dir.path().join("tile.bin");
    std::fs::write(&dest, "stale content that is much longer").expect("seed file");

    let client = reqwest::Client::new();
    download(&client, &format!("{base}/tile.bin"), &dest)
        .await
        .expect("download should succeed");

    assert_eq!(std::fs::read(&dest).expect("read"), b"fresh");
}

#[tokio::test]
async fn download_http_failure_leaves_no_file_behind() {
    let app = Router::new().route(
        "/tiles/42_7.bin",
        get(|| async { (StatusCode::NOT_FOUND, "no such tile") }),
    );
    let base = serve(app).await;

    let dir = tempfile::tempdir().expect("tempdir");
    let dest = dir.path().join("42_7.bin");

    let client = reqwest::Client::new();
    let result = download(&client, &format!("{base}/tiles/42_7.bin"), &dest).await;

    assert_matches!(result, Err(TransferError::HttpFailure { status: 404, .. }));
    assert!(
        !dest.exists(),
        "an HTTP failure must not create the destination file"
    );

    // The directory can be removed, so no handle is left open on it either.
    dir.close().expect("tempdir removal must succeed");
}

#[tokio::test]
async fn download_io_failure_surfaces_as_io() {
    let app = Router::new().route("/tile.bin", get(|| async { "content" }));
    let base = serve(app).await;

    // Destination inside a directory that does not exist.
    let dest = std::path::Path::new("/nonexistent-dir-for-test/tile.bin");

    let client = reqwest::Client::new();
    let result = download(&client, &format!("{base}/tile.bin"), dest).await;

    assert_matches!(result, Err(TransferError::Io(_)));
}
