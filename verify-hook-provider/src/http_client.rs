//! Shared HTTP execution for the AWS service clients
//!
//! Every client signs its own request (the signing inputs differ per
//! protocol: REST/XML, Query, JSON 1.1) and hands the finished
//! `RequestBuilder` to [`HttpUtils`], which sends it, logs it, retries
//! transient failures and decodes the body.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Sends a request and returns `(status, body)`.
    ///
    /// HTTP 429 becomes [`ProviderError::RateLimited`] and 502/503/504 become
    /// [`ProviderError::NetworkError`]; every other status is returned to the
    /// caller, which owns the service-specific error decoding.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        service: &str,
        operation: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{service}] {operation}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    service: service.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    service: service.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{service}] {operation} -> HTTP {status_code}");

        // Read before the body is consumed
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{service}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ProviderError::RateLimited {
                service: service.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{service}] Server error (HTTP {status_code})");
            return Err(ProviderError::NetworkError {
                service: service.to_string(),
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                service: service.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{service}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parses a JSON body (ACM).
    pub fn parse_json<T>(response_text: &str, service: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{service}] JSON parse failed: {e}");
            log::error!("[{service}] Raw response: {}", truncate_for_log(response_text));
            ProviderError::ParseError {
                service: service.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Parses an XML body (Route 53, SES).
    ///
    /// The root element name is not checked; the target type describes its children.
    pub fn parse_xml<T>(response_text: &str, service: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        quick_xml::de::from_str(response_text).map_err(|e| {
            log::error!("[{service}] XML parse failed: {e}");
            log::error!("[{service}] Raw response: {}", truncate_for_log(response_text));
            ProviderError::ParseError {
                service: service.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Sends a request, retrying transient failures with exponential backoff.
    ///
    /// # Retry strategy
    /// - Only `NetworkError`, `Timeout` and `RateLimited` are retried
    /// - Exponential backoff: 100ms, 200ms, 400ms, ... (capped at 10 seconds)
    /// - `retry_after` from a 429 is honoured, capped at 30 seconds
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        service: &str,
        operation: &str,
        max_retries: u32,
    ) -> Result<(u16, String), ProviderError> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, service, operation).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            // RequestBuilder is single-use
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[{service}] Cannot clone request, disabling retry");
                return Self::execute_request(request_builder, service, operation).await;
            };

            match Self::execute_request(req, service, operation).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && is_retryable(&e) => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[{}] {} failed (attempt {}/{}), retrying in {:.1}s: {}",
                        service,
                        operation,
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ProviderError::NetworkError {
            service: service.to_string(),
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }
}

/// Whether an error is worth another attempt.
///
/// AWS throttling codes (`Throttling`, `PriorRequestNotComplete`) reach this
/// point already mapped to `RateLimited` by the service's error mapper.
pub(crate) fn is_retryable(error: &ProviderError) -> bool {
    matches!(
        error,
        ProviderError::NetworkError { .. }
            | ProviderError::Timeout { .. }
            | ProviderError::RateLimited { .. }
    )
}

fn retry_delay(error: &ProviderError, attempt: u32) -> Duration {
    if let ProviderError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

/// 100ms, 200ms, 400ms, 800ms, 1.6s, ... capped at 10 seconds
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}
