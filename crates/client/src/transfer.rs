//! Streaming file downloads.
//!
//! Tiles can be arbitrarily large, so [`download`] streams the response
//! body straight to disk chunk by chunk instead of materializing it in
//! memory. The destination file handle lives in the function scope and is
//! released on every exit path, including mid-stream failures.

use std::path::Path;

use futures::StreamExt;
use tokio::io::AsyncWriteExt;

/// Errors from the file transfer layer.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// The server answered with a non-success status.
    #[error("download of {url} failed with status {status}")]
    HttpFailure { status: u16, url: String },

    /// The request or the body stream failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Writing to the destination failed (disk full, permissions, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Download `url` into `dest`, creating the file if absent and truncating
/// it if present.
///
/// The status is checked before the destination is opened, so an HTTP
/// failure never leaves a stray empty file behind.
pub async fn download(
    client: &reqwest::Client,
    url: &str,
    dest: &Path,
) -> Result<(), TransferError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(TransferError::HttpFailure {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let mut stream = response.bytes_stream();
    let mut file = tokio::fs::File::create(dest).await?;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
    }

    file.flush().await?;

    tracing::debug!(url, dest = %dest.display(), "Download complete");

    Ok(())
}
