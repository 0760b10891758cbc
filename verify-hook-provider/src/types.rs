use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};

// ============ Pagination ============

/// One page of a token-paginated listing.
///
/// AWS list APIs hand back an opaque `NextToken`; the listing is exhausted
/// when it is `None`.
///
/// # Type Parameters
///
/// * `T`: The item type (e.g., [`CertificateSummary`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items in the current page.
    pub items: Vec<T>,
    /// Token to request the next page, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// Creates a page.
    pub fn new(items: Vec<T>, next_token: Option<String>) -> Self {
        Self { items, next_token }
    }

    /// A page with no continuation.
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }

    /// Whether another page follows this one.
    pub fn has_more(&self) -> bool {
        self.next_token.is_some()
    }
}

// ============ Hosted zones ============

/// A Route 53 hosted zone as returned by the API.
///
/// `id` is kept exactly as the service reports it (usually `/hostedzone/Z…`);
/// `name` carries the trailing dot Route 53 always appends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedZone {
    /// Raw zone id, possibly with the `/hostedzone/` prefix.
    pub id: String,
    /// Fully-qualified zone name.
    pub name: String,
    /// Whether the zone is private (VPC-associated).
    pub private_zone: bool,
    /// Number of record sets in the zone, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_count: Option<u64>,
}

// ============ Record sets ============

/// DNS record types this workspace publishes or inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// Text record (ownership tokens).
    Txt,
    /// Canonical name (DKIM keys, certificate validation).
    Cname,
    /// Name server (delegation tests only).
    Ns,
}

impl RecordType {
    /// Wire representation used by Route 53.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Txt => "TXT",
            Self::Cname => "CNAME",
            Self::Ns => "NS",
        }
    }

    /// Parses a record type string, case-insensitively.
    pub fn parse(value: &str, service: &str) -> Result<Self> {
        match value.to_uppercase().as_str() {
            "TXT" => Ok(Self::Txt),
            "CNAME" => Ok(Self::Cname),
            "NS" => Ok(Self::Ns),
            _ => Err(ProviderError::InvalidParameter {
                service: service.to_string(),
                param: "record_type".to_string(),
                detail: format!("unsupported record type: {value}"),
            }),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action applied to a record set inside a change batch.
///
/// There is no `CREATE`: `UPSERT` covers first creation and re-assertion alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    /// Create or overwrite.
    Upsert,
    /// Remove; values must match the stored record set.
    Delete,
}

impl ChangeAction {
    /// Wire representation used by Route 53.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upsert => "UPSERT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A basic (non-alias) resource record set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecordSet {
    /// Fully-qualified record name.
    pub name: String,
    /// Record type.
    pub record_type: RecordType,
    /// TTL in seconds.
    pub ttl: u32,
    /// Record values; TXT values must already be quoted.
    pub values: Vec<String>,
}

/// One change inside a [`ChangeBatch`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    /// What to do with the record set.
    pub action: ChangeAction,
    /// The record set affected.
    pub record_set: ResourceRecordSet,
}

/// An ordered set of changes applied atomically to one hosted zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeBatch {
    /// Free-form comment stored with the change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Changes, in submission order.
    pub changes: Vec<Change>,
}

/// Route 53's receipt for a submitted change batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeInfo {
    /// Change id (`/change/C…` as reported).
    pub id: String,
    /// `PENDING` or `INSYNC`.
    pub status: String,
    /// Submission time.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::datetime"
    )]
    pub submitted_at: Option<DateTime<Utc>>,
}

// ============ Certificates ============

/// Certificate status that marks a request still awaiting validation.
pub const PENDING_VALIDATION: &str = "PENDING_VALIDATION";

/// An entry of the certificate listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateSummary {
    /// Certificate ARN.
    pub arn: String,
    /// Primary domain name of the certificate.
    pub domain_name: String,
    /// Certificate status, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Creation time, when reported.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::datetime"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// The DNS record a certificate authority expects for one validation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRecord {
    /// Record name.
    pub name: String,
    /// Record type (ACM always asks for CNAME).
    pub record_type: String,
    /// Record value.
    pub value: String,
}

/// One domain validation entry of a certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainValidation {
    /// Domain being validated (may be a wildcard).
    pub domain_name: String,
    /// `PENDING_VALIDATION`, `SUCCESS` or `FAILED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_status: Option<String>,
    /// `DNS` or `EMAIL`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_method: Option<String>,
    /// The record to publish; ACM fills it in shortly after the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_record: Option<ValidationRecord>,
}

impl DomainValidation {
    /// Whether this entry is validated through DNS.
    ///
    /// Entries without a reported method are treated as DNS entries.
    pub fn is_dns(&self) -> bool {
        self.validation_method
            .as_deref()
            .is_none_or(|m| m.eq_ignore_ascii_case("DNS"))
    }

    /// Whether this entry is still waiting for its record.
    pub fn is_pending(&self) -> bool {
        self.validation_status
            .as_deref()
            .is_none_or(|s| s == PENDING_VALIDATION)
    }
}

/// Full description of a certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDetail {
    /// Certificate ARN.
    pub arn: String,
    /// Primary domain name.
    pub domain_name: String,
    /// Issuance type, e.g. `AMAZON_ISSUED` or `IMPORTED`.
    pub certificate_type: String,
    /// Certificate status.
    pub status: String,
    /// Validation entries, one per name on the certificate.
    pub validations: Vec<DomainValidation>,
}

// ============ Credentials ============

/// Static AWS credentials used for SigV4 signing.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsCredentials {
    /// Access key id.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Session token for temporary credentials.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

impl AwsCredentials {
    /// Creates credentials without a session token.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }

    /// Attaches a session token.
    #[must_use]
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Reads `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and the optional
    /// `AWS_SESSION_TOKEN` from the environment.
    pub fn from_env() -> Result<Self> {
        let read = |name: &str| {
            std::env::var(name)
                .ok()
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ProviderError::InvalidCredentials {
                    service: "sts".to_string(),
                    raw_message: Some(format!("environment variable {name} is not set")),
                })
        };

        let credentials = Self::new(read("AWS_ACCESS_KEY_ID")?, read("AWS_SECRET_ACCESS_KEY")?);
        Ok(match std::env::var("AWS_SESSION_TOKEN") {
            Ok(token) if !token.is_empty() => credentials.with_session_token(token),
            _ => credentials,
        })
    }
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("session_token", &self.session_token.as_ref().map(|_| "***"))
            .finish()
    }
}
