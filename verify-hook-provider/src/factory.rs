//! Client factory.

use std::sync::Arc;

use crate::providers::{AcmProvider, Route53Provider, SesProvider};
use crate::traits::{CertificateApi, EmailIdentityApi, HostedZoneApi};
use crate::types::AwsCredentials;

/// The three service clients a lifecycle hook needs, as shared trait objects.
#[derive(Clone)]
pub struct AwsClients {
    /// Route 53 (global).
    pub zones: Arc<dyn HostedZoneApi>,
    /// SES in the configured region.
    pub email: Arc<dyn EmailIdentityApi>,
    /// ACM in the configured region.
    pub certificates: Arc<dyn CertificateApi>,
}

/// Creates all service clients from one set of credentials.
///
/// # Examples
///
/// ```rust,no_run
/// use verify_hook_provider::{AwsCredentials, create_clients};
///
/// let clients = create_clients(&AwsCredentials::from_env().unwrap(), "us-east-1", 2);
/// ```
pub fn create_clients(credentials: &AwsCredentials, region: &str, max_retries: u32) -> AwsClients {
    AwsClients {
        zones: Arc::new(
            Route53Provider::builder(credentials.clone())
                .max_retries(max_retries)
                .build(),
        ),
        email: Arc::new(
            SesProvider::builder(credentials.clone(), region)
                .max_retries(max_retries)
                .build(),
        ),
        certificates: Arc::new(
            AcmProvider::builder(credentials.clone(), region)
                .max_retries(max_retries)
                .build(),
        ),
    }
}
