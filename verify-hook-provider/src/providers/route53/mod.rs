//! Amazon Route 53 client

mod error;
mod http;
mod provider;
/// Route 53 REST/XML request and response shapes.
pub(crate) mod types;

use reqwest::Client;

use crate::providers::common::{DEFAULT_MAX_RETRIES, create_http_client};
use crate::providers::sigv4::SigV4Signer;
use crate::types::AwsCredentials;

/// Route 53 API host (global service).
pub(crate) const ROUTE53_HOST: &str = "route53.amazonaws.com";
/// Route 53 signs every request for `us-east-1`, whatever the caller's region.
pub(crate) const ROUTE53_SIGNING_REGION: &str = "us-east-1";
/// API version path prefix.
pub(crate) const API_VERSION: &str = "2013-04-01";
/// XML namespace for request bodies.
pub(crate) const XML_NAMESPACE: &str = "https://route53.amazonaws.com/doc/2013-04-01/";

/// Route 53 hosted-zone client.
///
/// # Construction
///
/// ```rust,no_run
/// use verify_hook_provider::{AwsCredentials, Route53Provider};
///
/// let zones = Route53Provider::new(AwsCredentials::new("AKID", "secret"));
/// ```
pub struct Route53Provider {
    pub(crate) client: Client,
    pub(crate) signer: SigV4Signer,
    pub(crate) host: String,
    pub(crate) max_retries: u32,
}

/// Builder for [`Route53Provider`].
pub struct Route53ProviderBuilder {
    credentials: AwsCredentials,
    host: String,
    max_retries: u32,
}

impl Route53ProviderBuilder {
    fn new(credentials: AwsCredentials) -> Self {
        Self {
            credentials,
            host: ROUTE53_HOST.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Set the maximum number of automatic retries for transient errors (default: 2).
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Override the API host (e.g. a FIPS or China-partition endpoint).
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Build the [`Route53Provider`] instance.
    pub fn build(self) -> Route53Provider {
        Route53Provider {
            client: create_http_client(),
            signer: SigV4Signer::new(self.credentials, ROUTE53_SIGNING_REGION, "route53"),
            host: self.host,
            max_retries: self.max_retries,
        }
    }
}

impl Route53Provider {
    /// Creates a client with default settings (2 retries).
    pub fn new(credentials: AwsCredentials) -> Self {
        Self::builder(credentials).build()
    }

    /// Returns a builder for customizing the client.
    pub fn builder(credentials: AwsCredentials) -> Route53ProviderBuilder {
        Route53ProviderBuilder::new(credentials)
    }
}
