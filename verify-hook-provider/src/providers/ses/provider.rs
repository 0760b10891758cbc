//! SES `EmailIdentityApi` implementation

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::{EmailIdentityApi, ErrorContext, ProviderErrorMapper};

use super::SesProvider;
use super::types::{DeleteIdentityResponse, VerifyDomainDkimResponse, VerifyDomainIdentityResponse};

impl SesProvider {
    /// A successful `VerifyDomainDkim` always carries the signing tokens.
    fn require_dkim_tokens(&self, domain: &str, tokens: Vec<String>) -> Result<Vec<String>> {
        if tokens.is_empty() {
            return Err(self.parse_error(format!("no DKIM tokens returned for {domain}")));
        }
        Ok(tokens)
    }
}

#[async_trait]
impl EmailIdentityApi for SesProvider {
    fn id(&self) -> &'static str {
        "ses"
    }

    async fn verify_domain_identity(&self, domain: &str) -> Result<String> {
        let response: VerifyDomainIdentityResponse = self
            .call(
                "VerifyDomainIdentity",
                &[("Domain", domain)],
                ErrorContext::resource(domain),
            )
            .await?;
        Ok(response.result.verification_token)
    }

    async fn verify_domain_dkim(&self, domain: &str) -> Result<Vec<String>> {
        let response: VerifyDomainDkimResponse = self
            .call(
                "VerifyDomainDkim",
                &[("Domain", domain)],
                ErrorContext::resource(domain),
            )
            .await?;
        self.require_dkim_tokens(domain, response.result.dkim_tokens.members)
    }

    async fn delete_identity(&self, domain: &str) -> Result<()> {
        let _: DeleteIdentityResponse = self
            .call(
                "DeleteIdentity",
                &[("Identity", domain)],
                ErrorContext::resource(domain),
            )
            .await?;
        Ok(())
    }
}
