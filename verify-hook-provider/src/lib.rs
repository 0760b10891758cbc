//! # verify-hook-provider
//!
//! Minimal clients for the three AWS services a domain-verification hook talks to.
//!
//! ## Services
//!
//! | Service | Trait | Protocol |
//! |---------|-------|----------|
//! | [Route 53](https://aws.amazon.com/route53/) | [`HostedZoneApi`] | REST + XML |
//! | [SES](https://aws.amazon.com/ses/) | [`EmailIdentityApi`] | Query + XML |
//! | [ACM](https://aws.amazon.com/certificate-manager/) | [`CertificateApi`] | JSON 1.1 |
//!
//! All requests are signed with AWS Signature Version 4.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for Lambda-style static builds.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use verify_hook_provider::{
//!     AwsCredentials, ChangeAction, ChangeBatch, Change, RecordType, ResourceRecordSet,
//!     create_clients,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let clients = create_clients(&AwsCredentials::from_env()?, "us-east-1", 2);
//!
//!     // 1. Find the zone for a name
//!     let zones = clients.zones.list_zones_by_name("example.com", 1).await?;
//!
//!     // 2. Ask SES for the ownership token
//!     let token = clients.email.verify_domain_identity("example.com").await?;
//!
//!     // 3. Publish it
//!     let batch = ChangeBatch {
//!         comment: None,
//!         changes: vec![Change {
//!             action: ChangeAction::Upsert,
//!             record_set: ResourceRecordSet {
//!                 name: "_amazonses.example.com".to_string(),
//!                 record_type: RecordType::Txt,
//!                 ttl: 60,
//!                 values: vec![format!("\"{token}\"")],
//!             },
//!         }],
//!     };
//!     let info = clients.zones.submit_change_batch(&zones[0].id, &batch).await?;
//!     println!("{} {}", info.id, info.status);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, ProviderError>`](ProviderError):
//!
//! - [`ProviderError::ZoneNotFound`]: hosted zone does not exist
//! - [`ProviderError::InvalidChangeBatch`]: Route 53 rejected a batch
//! - [`ProviderError::RateLimited`]: API throttling (retryable)
//! - [`ProviderError::NetworkError`]: network connectivity issue (retryable)
//!
//! Transient errors (`NetworkError`, `Timeout`, `RateLimited`) are automatically
//! retried with exponential backoff. See [`ProviderError`] for the full list.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory
pub use factory::{AwsClients, create_clients};

// Re-export service traits (internal traits are not exported)
pub use traits::{CertificateApi, EmailIdentityApi, HostedZoneApi};

// Re-export types
pub use types::{
    AwsCredentials, CertificateDetail, CertificateSummary, Change, ChangeAction, ChangeBatch,
    ChangeInfo, DomainValidation, HostedZone, PENDING_VALIDATION, Page, RecordType,
    ResourceRecordSet, ValidationRecord,
};

// Re-export utils module
pub use utils::datetime;

// Re-export concrete clients
pub use providers::common::{normalize_domain_name, strip_resource_prefix};
pub use providers::{
    AcmProvider, AcmProviderBuilder, Route53Provider, Route53ProviderBuilder, SesProvider,
    SesProviderBuilder,
};
