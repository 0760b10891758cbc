//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use verify_hook_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// The zone listing returned nothing at or after the queried name
    #[error("No hosted zones found for {0}")]
    NoZonesFound(String),

    /// The nearest zone returned by the listing is not the queried name
    #[error("No hosted zone named {query} (nearest match: {found})")]
    NoExactMatch { query: String, found: String },

    /// The label walk ran out of candidates
    #[error("Could not determine the hosted zone for {0}")]
    ZoneNotDeterminable(String),

    /// A record name lies outside the zone it was meant for
    #[error("Hosted zone {zone} is not authoritative for {name}")]
    ZoneNotAuthoritative { zone: String, name: String },

    /// Polling budget exhausted
    #[error("Timed out waiting for {what} after {attempts} lookups")]
    LookupTimedOut { what: String, attempts: u64 },

    /// The resource exists but is of a kind this hook does not handle
    #[error("Unsupported resource type {actual} (expected {expected})")]
    UnsupportedResourceType { actual: String, expected: String },

    /// Submitting a change batch failed
    #[error("Change batch for hosted zone {zone_id} failed: {source}")]
    ProviderTransactionFailed {
        zone_id: String,
        source: ProviderError,
    },

    /// Lifecycle request type is not Create, Update or Delete
    #[error("Invalid request type: {0}")]
    InvalidRequestType(String),

    /// Required resource property absent
    #[error("Missing required property: {0}")]
    MissingProperty(String),

    /// Name that cannot be a DNS name
    #[error("Invalid domain name: {0:?}")]
    InvalidDomainName(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::NoZonesFound(_)
            | Self::NoExactMatch { .. }
            | Self::ZoneNotDeterminable(_)
            | Self::ZoneNotAuthoritative { .. }
            | Self::UnsupportedResourceType { .. }
            | Self::InvalidRequestType(_)
            | Self::MissingProperty(_)
            | Self::InvalidDomainName(_) => true,
            Self::ProviderTransactionFailed { source, .. } => source.is_expected(),
            Self::Provider(e) => e.is_expected(),
            Self::LookupTimedOut { .. } => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
