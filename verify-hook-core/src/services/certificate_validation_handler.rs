//! Certificate DNS validation
//!
//! Waits for a pending certificate to show up, then publishes the CNAME of
//! every DNS validation entry into the zone that serves its name.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use futures::future::try_join_all;

use crate::error::{CoreError, CoreResult, ProviderError};
use crate::services::{
    ChangeBatchPublisher, HandlerOutcome, ResourceHandler, ResourcePoller, ServiceContext,
    ZoneResolver,
};
use crate::types::{
    CertificateDetail, CertificateSummary, ChangeAction, DomainName, DomainValidation, Page,
    RecordType, ResourceProperties, ZoneRecord,
};

/// `Data` key of the certificate ARN.
pub const CERTIFICATE_ARN_ATTRIBUTE: &str = "CertificateArn";

/// Handler for `Custom::CertificateValidation` style resources.
pub struct CertificateValidationHandler {
    ctx: Arc<ServiceContext>,
    resolver: ZoneResolver,
    publisher: ChangeBatchPublisher,
}

/// Whether every DNS validation entry already carries its record.
fn records_ready(detail: &CertificateDetail) -> bool {
    detail
        .validations
        .iter()
        .filter(|v| v.is_dns())
        .all(|v| v.resource_record.is_some())
}

impl CertificateValidationHandler {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            resolver: ZoneResolver::new(Arc::clone(&ctx)),
            publisher: ChangeBatchPublisher::new(Arc::clone(&ctx)),
            ctx,
        }
    }

    fn poller(&self, deadline: Option<Duration>) -> ResourcePoller {
        ResourcePoller::new(self.ctx.config.poll_interval(), deadline)
    }

    /// Polls the pending listing until a certificate for `fqdn` appears.
    async fn wait_for_certificate(
        &self,
        fqdn: &DomainName,
        deadline: Option<Duration>,
    ) -> CoreResult<CertificateSummary> {
        let certificates = &self.ctx.certificates;
        self.poller(deadline)
            .poll_until_found(
                &format!("pending certificate for {fqdn}"),
                |token| {
                    let certificates = Arc::clone(certificates);
                    async move { certificates.list_pending_certificates(token.as_deref()).await }
                },
                |summary: &CertificateSummary| {
                    DomainName::new(&summary.domain_name).is_ok_and(|name| name == *fqdn)
                },
            )
            .await
    }

    /// Describes `arn` until its validation records are filled in.
    ///
    /// A certificate of another type is returned as soon as it is seen; the
    /// caller rejects it.
    async fn wait_for_records(
        &self,
        arn: &str,
        deadline: Option<Duration>,
    ) -> CoreResult<CertificateDetail> {
        let certificates = &self.ctx.certificates;
        let trusted = self.ctx.config.trusted_certificate_type();
        self.poller(deadline)
            .poll_until_found(
                &format!("validation records of {arn}"),
                |_| {
                    let certificates = Arc::clone(certificates);
                    let arn = arn.to_string();
                    async move {
                        let detail = certificates.describe_certificate(&arn).await?;
                        Ok::<_, ProviderError>(Page::last(vec![detail]))
                    }
                },
                |detail: &CertificateDetail| {
                    detail.certificate_type != trusted || records_ready(detail)
                },
            )
            .await
    }

    /// One CNAME per DNS validation entry, each in the zone serving its name.
    async fn build_records<'a, I>(
        &self,
        entries: I,
        hint: Option<&str>,
    ) -> CoreResult<Vec<ZoneRecord>>
    where
        I: IntoIterator<Item = &'a DomainValidation>,
    {
        let ttl = self.ctx.config.record_ttl();
        let lookups = entries.into_iter().filter_map(|entry| {
            let record = entry.resource_record.as_ref()?;
            Some(async move {
                // a wildcard entry is served by the zone of its parent
                let name = DomainName::new(&entry.domain_name)?.strip_wildcard();
                let zone = self.resolver.resolve_target(&name, hint).await?;
                let record_type = RecordType::parse(&record.record_type, "acm")?;
                ZoneRecord::new(
                    &zone,
                    DomainName::new(&record.name)?,
                    record_type,
                    record.value.trim_end_matches('.').to_string(),
                    ttl,
                )
            })
        });
        try_join_all(lookups).await
    }
}

#[async_trait]
impl ResourceHandler for CertificateValidationHandler {
    fn kind(&self) -> &'static str {
        "certificate validation"
    }

    async fn create(
        &self,
        properties: &ResourceProperties,
        time_budget: Option<Duration>,
    ) -> CoreResult<HandlerOutcome> {
        let fqdn = DomainName::new(ResourceProperties::require(
            properties.certificate_fqdn.as_ref(),
            "CertificateFQDN",
        )?)?;
        let started = Instant::now();

        let summary = self.wait_for_certificate(&fqdn, time_budget).await?;
        log::info!("{fqdn}: pending certificate {}", summary.arn);

        let remaining = time_budget.map(|budget| budget.saturating_sub(started.elapsed()));
        let detail = self.wait_for_records(&summary.arn, remaining).await?;

        let trusted = self.ctx.config.trusted_certificate_type();
        if detail.certificate_type != trusted {
            return Err(CoreError::UnsupportedResourceType {
                actual: detail.certificate_type,
                expected: trusted.to_string(),
            });
        }

        let pending = detail
            .validations
            .iter()
            .filter(|entry| entry.is_dns() && entry.is_pending());
        let records = self.build_records(pending, properties.zone_hint()).await?;
        log::info!("{fqdn}: {} validation record(s) to publish", records.len());

        let change_ids = self.publisher.publish(&records, ChangeAction::Upsert).await?;

        Ok(HandlerOutcome {
            physical_id: detail.arn.clone(),
            change_ids,
            attributes: BTreeMap::from([(CERTIFICATE_ARN_ATTRIBUTE.to_string(), detail.arn)]),
        })
    }

    async fn delete(
        &self,
        physical_id: &str,
        properties: &ResourceProperties,
        _successor: Option<&ResourceProperties>,
    ) -> CoreResult<HandlerOutcome> {
        let detail = match self.ctx.certificates.describe_certificate(physical_id).await {
            Ok(detail) => detail,
            Err(ProviderError::ResourceNotFound { .. }) => {
                log::warn!("Certificate {physical_id} no longer exists, nothing to remove");
                return Ok(HandlerOutcome {
                    physical_id: physical_id.to_string(),
                    change_ids: Vec::new(),
                    attributes: BTreeMap::new(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let entries = detail.validations.iter().filter(|entry| entry.is_dns());
        let records = self.build_records(entries, properties.zone_hint()).await?;
        let change_ids = self.publisher.publish(&records, ChangeAction::Delete).await?;

        Ok(HandlerOutcome {
            physical_id: physical_id.to_string(),
            change_ids,
            attributes: BTreeMap::new(),
        })
    }
}
