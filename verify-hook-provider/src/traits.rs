use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    CertificateDetail, CertificateSummary, ChangeBatch, ChangeInfo, HostedZone, Page, RecordType,
};

/// Raw service error before mapping (internal).
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Error code, e.g. `NoSuchHostedZone` or `ThrottlingException`.
    pub code: Option<String>,
    /// Message as returned by the service.
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// What the failed request was about, used when mapping errors (internal).
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Hosted zone id, for `ZoneNotFound` / `InvalidChangeBatch`.
    pub zone_id: Option<String>,
    /// Resource identifier: certificate ARN or identity domain.
    pub resource: Option<String>,
}

impl ErrorContext {
    pub fn zone(zone_id: impl Into<String>) -> Self {
        Self {
            zone_id: Some(zone_id.into()),
            resource: None,
        }
    }

    pub fn resource(resource: impl Into<String>) -> Self {
        Self {
            zone_id: None,
            resource: Some(resource.into()),
        }
    }
}

/// Maps raw service errors onto [`ProviderError`] (internal).
/// Each service client implements it once.
pub(crate) trait ProviderErrorMapper {
    /// Service identifier used in every error.
    fn service_name(&self) -> &'static str;

    /// Maps one raw error.
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// A response that could not be understood.
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            service: self.service_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// A request body that could not be encoded.
    fn serialization_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::SerializationError {
            service: self.service_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Fallback for codes no mapping covers.
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            service: self.service_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Hosted-zone API (Route 53).
#[async_trait]
pub trait HostedZoneApi: Send + Sync {
    /// Service identifier.
    fn id(&self) -> &'static str;

    /// Lists zones ordered by name, starting at the first zone whose name
    /// equals or sorts after `dns_name`.
    ///
    /// This is a nearest-match query: the first zone returned is *not*
    /// guaranteed to be named `dns_name`.
    async fn list_zones_by_name(&self, dns_name: &str, max_items: u32) -> Result<Vec<HostedZone>>;

    /// Fetches one zone by id (with or without the `/hostedzone/` prefix).
    async fn get_zone(&self, zone_id: &str) -> Result<HostedZone>;

    /// Whether the zone answers a query for `name`/`record_type` with data,
    /// i.e. whether `name` is handed off to another zone when asked for `NS`.
    async fn test_name_delegation(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<bool>;

    /// Submits one atomic change batch to a zone.
    async fn submit_change_batch(&self, zone_id: &str, batch: &ChangeBatch) -> Result<ChangeInfo>;
}

/// Email identity API (SES).
#[async_trait]
pub trait EmailIdentityApi: Send + Sync {
    /// Service identifier.
    fn id(&self) -> &'static str;

    /// Starts (or re-reads) domain verification and returns the ownership token.
    async fn verify_domain_identity(&self, domain: &str) -> Result<String>;

    /// Starts (or re-reads) DKIM setup and returns the signing-key tokens.
    async fn verify_domain_dkim(&self, domain: &str) -> Result<Vec<String>>;

    /// Removes the identity.
    async fn delete_identity(&self, domain: &str) -> Result<()>;
}

/// Certificate API (ACM).
#[async_trait]
pub trait CertificateApi: Send + Sync {
    /// Service identifier.
    fn id(&self) -> &'static str;

    /// Lists certificates awaiting validation, one page at a time.
    async fn list_pending_certificates(
        &self,
        next_token: Option<&str>,
    ) -> Result<Page<CertificateSummary>>;

    /// Describes one certificate.
    async fn describe_certificate(&self, arn: &str) -> Result<CertificateDetail>;
}
