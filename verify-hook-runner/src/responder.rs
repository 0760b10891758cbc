//! Uploads the response document to the pre-signed `ResponseURL`.

use std::time::Duration;

use anyhow::{bail, Context};
use reqwest::header::CONTENT_TYPE;

const UPLOAD_TIMEOUT_SECS: u64 = 30;

/// PUTs `body` to `url`.
///
/// The URL is a pre-signed S3 URL that was signed without a content type,
/// so the header must be sent empty.
pub async fn upload(url: &str, body: String) -> anyhow::Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(UPLOAD_TIMEOUT_SECS))
        .build()
        .context("failed to build HTTP client")?;

    let length = body.len();
    let response = client
        .put(url)
        .header(CONTENT_TYPE, "")
        .body(body)
        .send()
        .await
        .context("failed to upload response document")?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        bail!("response upload rejected with HTTP {status}: {text}");
    }

    tracing::info!("Response document uploaded ({length} bytes)");
    Ok(())
}
