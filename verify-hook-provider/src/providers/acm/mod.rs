//! AWS Certificate Manager client (JSON 1.1 protocol)

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::providers::common::{DEFAULT_MAX_RETRIES, create_http_client};
use crate::providers::sigv4::SigV4Signer;
use crate::types::AwsCredentials;

/// `X-Amz-Target` prefix.
pub(crate) const TARGET_PREFIX: &str = "CertificateManager";

/// ACM client for one region.
pub struct AcmProvider {
    pub(crate) client: Client,
    pub(crate) signer: SigV4Signer,
    pub(crate) host: String,
    pub(crate) max_retries: u32,
}

/// Builder for [`AcmProvider`].
pub struct AcmProviderBuilder {
    credentials: AwsCredentials,
    region: String,
    host: Option<String>,
    max_retries: u32,
}

impl AcmProviderBuilder {
    fn new(credentials: AwsCredentials, region: String) -> Self {
        Self {
            credentials,
            region,
            host: None,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Set the maximum number of automatic retries for transient errors (default: 2).
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Override the API host (default: `acm.{region}.amazonaws.com`).
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Build the [`AcmProvider`] instance.
    pub fn build(self) -> AcmProvider {
        let host = self
            .host
            .unwrap_or_else(|| format!("acm.{}.amazonaws.com", self.region));
        AcmProvider {
            client: create_http_client(),
            signer: SigV4Signer::new(self.credentials, self.region, "acm"),
            host,
            max_retries: self.max_retries,
        }
    }
}

impl AcmProvider {
    /// Creates a client for `region` with default settings.
    pub fn new(credentials: AwsCredentials, region: impl Into<String>) -> Self {
        Self::builder(credentials, region).build()
    }

    /// Returns a builder for customizing the client.
    pub fn builder(credentials: AwsCredentials, region: impl Into<String>) -> AcmProviderBuilder {
        AcmProviderBuilder::new(credentials, region.into())
    }
}
