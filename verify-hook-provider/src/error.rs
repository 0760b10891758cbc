use serde::{Deserialize, Serialize};

/// Unified error type for all Route 53, SES and ACM operations.
///
/// Each variant includes a `service` field identifying which AWS service produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError): network connectivity issues
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): API throttling
///
/// The built-in HTTP client automatically retries these with exponential backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    ///
    /// This is a transient error and is automatically retried.
    NetworkError {
        /// Service that produced the error.
        service: String,
        /// Error details.
        detail: String,
    },

    /// The request signature or the credentials behind it were rejected.
    InvalidCredentials {
        /// Service that produced the error.
        service: String,
        /// Original error message from the service, if available.
        raw_message: Option<String>,
    },

    /// The signed-in principal lacks permission for the requested operation.
    PermissionDenied {
        /// Service that produced the error.
        service: String,
        /// Original error message from the service, if available.
        raw_message: Option<String>,
    },

    /// The API throttled the request (HTTP 429, `Throttling`, `PriorRequestNotComplete`).
    ///
    /// This is a transient error. Unlike [`QuotaExceeded`](Self::QuotaExceeded),
    /// the request should succeed after waiting.
    RateLimited {
        /// Service that produced the error.
        service: String,
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the service, if available.
        raw_message: Option<String>,
    },

    /// The HTTP request timed out.
    ///
    /// This is a transient error and is automatically retried.
    Timeout {
        /// Service that produced the error.
        service: String,
        /// Error details.
        detail: String,
    },

    /// The hosted zone does not exist (`NoSuchHostedZone`).
    ZoneNotFound {
        /// Service that produced the error.
        service: String,
        /// Zone id that was not found.
        zone_id: String,
        /// Original error message from the service, if available.
        raw_message: Option<String>,
    },

    /// A non-DNS resource (certificate, identity) was not found.
    ResourceNotFound {
        /// Service that produced the error.
        service: String,
        /// Identifier of the missing resource.
        resource: String,
        /// Original error message from the service, if available.
        raw_message: Option<String>,
    },

    /// Route 53 rejected a change batch as a whole (`InvalidChangeBatch`).
    ///
    /// Typical causes: deleting a record set that does not exist, or a
    /// delete whose values differ from the stored record set.
    InvalidChangeBatch {
        /// Service that produced the error.
        service: String,
        /// Zone the batch targeted.
        zone_id: String,
        /// Original error message from the service, if available.
        raw_message: Option<String>,
    },

    /// A request parameter is invalid.
    InvalidParameter {
        /// Service that produced the error.
        service: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// An account limit has been reached.
    ///
    /// Unlike [`RateLimited`](Self::RateLimited), this is not a transient condition.
    QuotaExceeded {
        /// Service that produced the error.
        service: String,
        /// Original error message from the service, if available.
        raw_message: Option<String>,
    },

    /// Failed to parse the service's response.
    ParseError {
        /// Service that produced the error.
        service: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Service that produced the error.
        service: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// An unrecognized error from the service.
    ///
    /// This is a catch-all for error codes not yet mapped to a specific variant.
    Unknown {
        /// Service that produced the error.
        service: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ProviderError {
    /// Whether this is an expected outcome (bad input, missing resource) rather than a fault.
    ///
    /// `true` logs at `warn`, `false` at `error`.
    /// **Update this when adding a variant.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::ZoneNotFound { .. }
                | Self::ResourceNotFound { .. }
                | Self::InvalidChangeBatch { .. }
                | Self::InvalidParameter { .. }
                | Self::QuotaExceeded { .. }
        )
    }

    /// Name of the service that produced this error.
    #[must_use]
    pub fn service(&self) -> &str {
        match self {
            Self::NetworkError { service, .. }
            | Self::InvalidCredentials { service, .. }
            | Self::PermissionDenied { service, .. }
            | Self::RateLimited { service, .. }
            | Self::Timeout { service, .. }
            | Self::ZoneNotFound { service, .. }
            | Self::ResourceNotFound { service, .. }
            | Self::InvalidChangeBatch { service, .. }
            | Self::InvalidParameter { service, .. }
            | Self::QuotaExceeded { service, .. }
            | Self::ParseError { service, .. }
            | Self::SerializationError { service, .. }
            | Self::Unknown { service, .. } => service,
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { service, detail } => {
                write!(f, "[{service}] Network error: {detail}")
            }
            Self::InvalidCredentials {
                service,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{service}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{service}] Invalid credentials")
                }
            }
            Self::PermissionDenied {
                service,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{service}] Permission denied: {msg}")
                } else {
                    write!(f, "[{service}] Permission denied")
                }
            }
            Self::RateLimited {
                service,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{service}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{service}] Rate limited")
                }
            }
            Self::Timeout { service, detail } => {
                write!(f, "[{service}] Request timeout: {detail}")
            }
            Self::ZoneNotFound {
                service,
                zone_id,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{service}] Hosted zone '{zone_id}' not found: {msg}")
                } else {
                    write!(f, "[{service}] Hosted zone '{zone_id}' not found")
                }
            }
            Self::ResourceNotFound {
                service,
                resource,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{service}] Resource '{resource}' not found: {msg}")
                } else {
                    write!(f, "[{service}] Resource '{resource}' not found")
                }
            }
            Self::InvalidChangeBatch {
                service,
                zone_id,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(
                        f,
                        "[{service}] Change batch rejected for zone '{zone_id}': {msg}"
                    )
                } else {
                    write!(f, "[{service}] Change batch rejected for zone '{zone_id}'")
                }
            }
            Self::InvalidParameter {
                service,
                param,
                detail,
            } => {
                write!(f, "[{service}] Invalid parameter '{param}': {detail}")
            }
            Self::QuotaExceeded { service, .. } => {
                write!(f, "[{service}] Quota exceeded")
            }
            Self::ParseError { service, detail } => {
                write!(f, "[{service}] Parse error: {detail}")
            }
            Self::SerializationError { service, detail } => {
                write!(f, "[{service}] Serialization error: {detail}")
            }
            Self::Unknown {
                service,
                raw_message,
                ..
            } => {
                write!(f, "[{service}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
