//! Amazon SES (v1 Query API) client

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::providers::common::{DEFAULT_MAX_RETRIES, create_http_client};
use crate::providers::sigv4::SigV4Signer;
use crate::types::AwsCredentials;

/// Query API version.
pub(crate) const API_VERSION: &str = "2010-12-01";

/// SES email identity client for one region.
pub struct SesProvider {
    pub(crate) client: Client,
    pub(crate) signer: SigV4Signer,
    pub(crate) host: String,
    pub(crate) max_retries: u32,
}

/// Builder for [`SesProvider`].
pub struct SesProviderBuilder {
    credentials: AwsCredentials,
    region: String,
    host: Option<String>,
    max_retries: u32,
}

impl SesProviderBuilder {
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

    /// Override the API host (default: `email.{region}.amazonaws.com`).
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Build the [`SesProvider`] instance.
    pub fn build(self) -> SesProvider {
        let host = self
            .host
            .unwrap_or_else(|| format!("email.{}.amazonaws.com", self.region));
        SesProvider {
            client: create_http_client(),
            signer: SigV4Signer::new(self.credentials, self.region, "ses"),
            host,
            max_retries: self.max_retries,
        }
    }
}

impl SesProvider {
    /// Creates a client for `region` with default settings.
    pub fn new(credentials: AwsCredentials, region: impl Into<String>) -> Self {
        Self::builder(credentials, region).build()
    }

    /// Returns a builder for customizing the client.
    pub fn builder(credentials: AwsCredentials, region: impl Into<String>) -> SesProviderBuilder {
        SesProviderBuilder::new(credentials, region.into())
    }
}
