//! Email sending domain verification
//!
//! Publishes the SES ownership TXT record and the DKIM CNAMEs of a domain.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::services::{
    ChangeBatchPublisher, HandlerOutcome, ResourceHandler, ServiceContext, ZoneResolver,
};
use crate::types::{
    ChangeAction, DomainName, HostedZoneRef, RecordType, ResourceProperties, ZoneRecord,
};

/// `Data` key of the ownership token.
pub const VERIFICATION_TOKEN_ATTRIBUTE: &str = "VerificationToken";

/// Handler for SES sending domains.
pub struct EmailDomainHandler {
    ctx: Arc<ServiceContext>,
    resolver: ZoneResolver,
    publisher: ChangeBatchPublisher,
}

impl EmailDomainHandler {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            resolver: ZoneResolver::new(Arc::clone(&ctx)),
            publisher: ChangeBatchPublisher::new(Arc::clone(&ctx)),
            ctx,
        }
    }

    fn domain(properties: &ResourceProperties) -> CoreResult<DomainName> {
        DomainName::new(ResourceProperties::require(
            properties.domain_name.as_ref(),
            "DomainName",
        )?)
    }

    /// Asks SES for the ownership token and the DKIM tokens in parallel.
    async fn fetch_tokens(&self, domain: &DomainName) -> CoreResult<(String, Vec<String>)> {
        let (token, dkim_tokens) = tokio::try_join!(
            self.ctx.email.verify_domain_identity(domain.as_str()),
            self.ctx.email.verify_domain_dkim(domain.as_str()),
        )?;
        Ok((token, dkim_tokens))
    }

    /// TXT `<prefix>.<domain>` plus one CNAME per DKIM token.
    fn build_records(
        &self,
        zone: &HostedZoneRef,
        domain: &DomainName,
        token: &str,
        dkim_tokens: &[String],
    ) -> CoreResult<Vec<ZoneRecord>> {
        let config = &self.ctx.config;
        let ttl = config.record_ttl();

        let mut records = Vec::with_capacity(dkim_tokens.len() + 1);
        records.push(ZoneRecord::new(
            zone,
            domain.child(config.ownership_prefix())?,
            RecordType::Txt,
            format!("\"{token}\""),
            ttl,
        )?);

        for dkim in dkim_tokens {
            records.push(ZoneRecord::new(
                zone,
                domain.child(&format!("{dkim}.{}", config.dkim_label()))?,
                RecordType::Cname,
                format!("{dkim}.{}", config.dkim_target_suffix()),
                ttl,
            )?);
        }

        Ok(records)
    }
}

#[async_trait]
impl ResourceHandler for EmailDomainHandler {
    fn kind(&self) -> &'static str {
        "email domain"
    }

    async fn create(
        &self,
        properties: &ResourceProperties,
        _time_budget: Option<Duration>,
    ) -> CoreResult<HandlerOutcome> {
        let domain = Self::domain(properties)?;
        let zone = self
            .resolver
            .resolve_target(&domain, properties.zone_hint())
            .await?;

        let (token, dkim_tokens) = self.fetch_tokens(&domain).await?;
        log::info!(
            "{domain}: verification token received, {} DKIM token(s)",
            dkim_tokens.len()
        );

        let records = self.build_records(&zone, &domain, &token, &dkim_tokens)?;
        let change_ids = self.publisher.publish(&records, ChangeAction::Upsert).await?;

        Ok(HandlerOutcome {
            physical_id: domain.to_string(),
            change_ids,
            attributes: BTreeMap::from([(VERIFICATION_TOKEN_ATTRIBUTE.to_string(), token)]),
        })
    }

    async fn delete(
        &self,
        physical_id: &str,
        properties: &ResourceProperties,
        successor: Option<&ResourceProperties>,
    ) -> CoreResult<HandlerOutcome> {
        let domain = match Self::domain(properties) {
            Ok(domain) => domain,
            Err(_) => DomainName::new(physical_id)?,
        };
        let zone = self
            .resolver
            .resolve_target(&domain, properties.zone_hint())
            .await?;

        // a known identity hands back its existing tokens
        let (token, dkim_tokens) = self.fetch_tokens(&domain).await?;
        let records = self.build_records(&zone, &domain, &token, &dkim_tokens)?;
        let change_ids = self.publisher.publish(&records, ChangeAction::Delete).await?;

        let kept = successor
            .and_then(|next| Self::domain(next).ok())
            .is_some_and(|next| next == domain);
        if kept {
            log::info!("{domain}: identity kept by the updated resource");
        } else {
            self.ctx.email.delete_identity(domain.as_str()).await?;
            log::info!("{domain}: identity removed");
        }

        Ok(HandlerOutcome {
            physical_id: physical_id.to_string(),
            change_ids,
            attributes: BTreeMap::new(),
        })
    }
}
