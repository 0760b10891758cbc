//! Test helpers
//!
//! In-memory mocks of the three service APIs and a harness wiring them into a
//! `ServiceContext`.

use std::collections::HashSet;
use std::fmt::Write;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use verify_hook_provider::{
    strip_resource_prefix, CertificateApi, CertificateDetail, CertificateSummary, ChangeBatch,
    ChangeInfo, DomainValidation, EmailIdentityApi, HostedZone, HostedZoneApi, Page, RecordType,
    ValidationRecord, PENDING_VALIDATION,
};

use crate::config::HookConfig;
use crate::error::ProviderError;
use crate::services::ServiceContext;
use crate::types::DomainName;

type ProviderResult<T> = Result<T, ProviderError>;

/// Route 53 style change id for a batch: same zone and changes, same id.
pub fn expected_change_id(zone_id: &str, batch: &ChangeBatch) -> String {
    let mut canonical = strip_resource_prefix(zone_id).to_string();
    for change in &batch.changes {
        let set = &change.record_set;
        let _ = write!(
            canonical,
            "\n{}|{}|{}|{}|{}",
            change.action,
            set.name,
            set.record_type,
            set.ttl,
            set.values.join(",")
        );
    }
    let digest = hex::encode(Sha256::digest(canonical.as_bytes()));
    format!("C{}", digest[..13].to_uppercase())
}

/// Route 53 lists zones ordered by their labels read right to left.
fn listing_key(name: &str) -> Vec<String> {
    name.trim_end_matches('.')
        .split('.')
        .rev()
        .map(str::to_ascii_lowercase)
        .collect()
}

// ===== MockZones =====

pub struct MockZones {
    zones: Vec<HostedZone>,
    /// (zone id, name handed off below that zone)
    delegations: Vec<(String, DomainName)>,
    failing_zones: Mutex<HashSet<String>>,
    listings_fail: AtomicBool,
    submitted: Mutex<Vec<(String, ChangeBatch)>>,
    delegation_tests: AtomicUsize,
    calls: AtomicUsize,
}

impl MockZones {
    pub fn new() -> Self {
        Self {
            zones: Vec::new(),
            delegations: Vec::new(),
            failing_zones: Mutex::new(HashSet::new()),
            listings_fail: AtomicBool::new(false),
            submitted: Mutex::new(Vec::new()),
            delegation_tests: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    /// Adds a public zone; `name` is given the way Route 53 reports it.
    pub fn with_zone(mut self, id: &str, name: &str) -> Self {
        self.zones.push(HostedZone {
            id: format!("/hostedzone/{id}"),
            name: name.to_string(),
            private_zone: false,
            record_count: Some(2),
        });
        self.zones.sort_by_key(|zone| listing_key(&zone.name));
        self
    }

    /// Makes `zone_id` answer NS queries for `name` and everything below it.
    pub fn with_delegation(mut self, zone_id: &str, name: &str) -> Self {
        let name = DomainName::new(name).unwrap();
        self.delegations.push((zone_id.to_string(), name));
        self
    }

    /// Every later batch submitted to `zone_id` is rejected.
    pub fn fail_zone(&self, zone_id: &str) {
        self.failing_zones
            .lock()
            .unwrap()
            .insert(zone_id.to_string());
    }

    /// Every later listing fails with a throttling error.
    pub fn fail_listings(&self) {
        self.listings_fail.store(true, Ordering::SeqCst);
    }

    /// Accepted batches, in submission order, keyed by bare zone id.
    pub fn submitted(&self) -> Vec<(String, ChangeBatch)> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn submissions(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn delegation_tests(&self) -> usize {
        self.delegation_tests.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn zone_not_found(zone_id: &str) -> ProviderError {
        ProviderError::ZoneNotFound {
            service: "route53".to_string(),
            zone_id: zone_id.to_string(),
            raw_message: None,
        }
    }
}

#[async_trait]
impl HostedZoneApi for MockZones {
    fn id(&self) -> &'static str {
        "mock-route53"
    }

    async fn list_zones_by_name(
        &self,
        dns_name: &str,
        max_items: u32,
    ) -> ProviderResult<Vec<HostedZone>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.listings_fail.load(Ordering::SeqCst) {
            return Err(ProviderError::RateLimited {
                service: "route53".to_string(),
                retry_after: None,
                raw_message: Some("Rate exceeded".to_string()),
            });
        }

        let key = listing_key(dns_name);
        Ok(self
            .zones
            .iter()
            .filter(|zone| listing_key(&zone.name) >= key)
            .take(max_items as usize)
            .cloned()
            .collect())
    }

    async fn get_zone(&self, zone_id: &str) -> ProviderResult<HostedZone> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let bare = strip_resource_prefix(zone_id);
        self.zones
            .iter()
            .find(|zone| strip_resource_prefix(&zone.id) == bare)
            .cloned()
            .ok_or_else(|| Self::zone_not_found(bare))
    }

    async fn test_name_delegation(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> ProviderResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.delegation_tests.fetch_add(1, Ordering::SeqCst);
        if record_type != RecordType::Ns {
            return Ok(false);
        }
        let bare = strip_resource_prefix(zone_id);
        let Ok(name) = DomainName::new(name) else {
            return Ok(false);
        };
        Ok(self
            .delegations
            .iter()
            .any(|(zone, delegated)| zone == bare && name.is_at_or_below(delegated)))
    }

    async fn submit_change_batch(
        &self,
        zone_id: &str,
        batch: &ChangeBatch,
    ) -> ProviderResult<ChangeInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let bare = strip_resource_prefix(zone_id);
        if self.failing_zones.lock().unwrap().contains(bare) {
            return Err(ProviderError::InvalidChangeBatch {
                service: "route53".to_string(),
                zone_id: bare.to_string(),
                raw_message: Some("Tried to delete resource record set but it was not found".to_string()),
            });
        }

        self.submitted
            .lock()
            .unwrap()
            .push((bare.to_string(), batch.clone()));
        Ok(ChangeInfo {
            id: format!("/change/{}", expected_change_id(bare, batch)),
            status: "PENDING".to_string(),
            submitted_at: None,
        })
    }
}

// ===== MockEmail =====

pub const IDENTITY_TOKEN: &str = "QTKknzFg2J4ygwa+XvHAxUl1hyHoY0gVfZdfjIedHZ0=";
pub const DKIM_TOKENS: [&str; 3] = [
    "vvjuipp74whm76gqoni7qmwwn4w4qusjiainivf6f",
    "3frqe7jn4obpuxjpwpolz6ipb3k5nvt2nhjpik2oy",
    "wrqplteh7oodxnad7hsl4mixg2uavzneazxv5sxi2",
];

pub struct MockEmail {
    deleted: RwLock<Vec<String>>,
    calls: AtomicUsize,
}

impl MockEmail {
    pub fn new() -> Self {
        Self {
            deleted: RwLock::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub async fn deleted_identities(&self) -> Vec<String> {
        self.deleted.read().await.clone()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailIdentityApi for MockEmail {
    fn id(&self) -> &'static str {
        "mock-ses"
    }

    async fn verify_domain_identity(&self, _domain: &str) -> ProviderResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(IDENTITY_TOKEN.to_string())
    }

    async fn verify_domain_dkim(&self, _domain: &str) -> ProviderResult<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(DKIM_TOKENS.iter().map(ToString::to_string).collect())
    }

    async fn delete_identity(&self, domain: &str) -> ProviderResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.deleted.write().await.push(domain.to_string());
        Ok(())
    }
}

// ===== MockCertificates =====

/// One certificate request, optionally listed after unrelated ones.
///
/// The listing hands out one certificate per page.
#[derive(Default)]
pub struct MockCertificates {
    certificate: Option<CertificateSummary>,
    certificate_type: Option<String>,
    validations: Vec<String>,
    unrelated: Vec<CertificateSummary>,
    /// List calls that still come back without the certificate.
    hidden_for: usize,
    /// Describe calls that still come back without validation records.
    records_missing_for: usize,
    list_calls: AtomicUsize,
    describe_calls: AtomicUsize,
}

impl MockCertificates {
    pub fn new(arn: &str, domain: &str) -> Self {
        Self {
            certificate: Some(summary(arn, domain)),
            ..Default::default()
        }
    }

    pub fn with_validation(mut self, domain: &str) -> Self {
        self.validations.push(domain.to_string());
        self
    }

    pub fn with_unrelated(mut self, arn: &str, domain: &str) -> Self {
        self.unrelated.push(summary(arn, domain));
        self
    }

    pub fn with_type(mut self, certificate_type: &str) -> Self {
        self.certificate_type = Some(certificate_type.to_string());
        self
    }

    pub fn appearing_after(mut self, list_calls: usize) -> Self {
        self.hidden_for = list_calls;
        self
    }

    pub fn records_after(mut self, describe_calls: usize) -> Self {
        self.records_missing_for = describe_calls;
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.list_calls() + self.describe_calls.load(Ordering::SeqCst)
    }
}

fn validation(index: usize, domain: &str, with_record: bool) -> DomainValidation {
    let base = domain.strip_prefix("*.").unwrap_or(domain);
    DomainValidation {
        domain_name: domain.to_string(),
        validation_status: Some(PENDING_VALIDATION.to_string()),
        validation_method: Some("DNS".to_string()),
        resource_record: with_record.then(|| ValidationRecord {
            name: format!("_a{index}f3e.{base}."),
            record_type: "CNAME".to_string(),
            value: format!("_b{index}c7d.acm-validations.aws."),
        }),
    }
}

fn summary(arn: &str, domain: &str) -> CertificateSummary {
    CertificateSummary {
        arn: arn.to_string(),
        domain_name: domain.to_string(),
        status: Some(PENDING_VALIDATION.to_string()),
        created_at: None,
    }
}

#[async_trait]
impl CertificateApi for MockCertificates {
    fn id(&self) -> &'static str {
        "mock-acm"
    }

    async fn list_pending_certificates(
        &self,
        next_token: Option<&str>,
    ) -> ProviderResult<Page<CertificateSummary>> {
        let call = self.list_calls.fetch_add(1, Ordering::SeqCst) + 1;

        let mut listing = self.unrelated.clone();
        if call > self.hidden_for {
            listing.extend(self.certificate.clone());
        }

        let index: usize = next_token.and_then(|t| t.parse().ok()).unwrap_or(0);
        let items: Vec<_> = listing.get(index).cloned().into_iter().collect();
        let next = (index + 1 < listing.len()).then(|| (index + 1).to_string());
        Ok(Page::new(items, next))
    }

    async fn describe_certificate(&self, arn: &str) -> ProviderResult<CertificateDetail> {
        let call = self.describe_calls.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(certificate) = self.certificate.as_ref().filter(|c| c.arn == arn) else {
            return Err(ProviderError::ResourceNotFound {
                service: "acm".to_string(),
                resource: arn.to_string(),
                raw_message: Some(format!("Could not find certificate {arn}")),
            });
        };

        let with_records = call > self.records_missing_for;
        Ok(CertificateDetail {
            arn: certificate.arn.clone(),
            domain_name: certificate.domain_name.clone(),
            certificate_type: self
                .certificate_type
                .clone()
                .unwrap_or_else(|| "AMAZON_ISSUED".to_string()),
            status: PENDING_VALIDATION.to_string(),
            validations: self
                .validations
                .iter()
                .enumerate()
                .map(|(i, domain)| validation(i, domain, with_records))
                .collect(),
        })
    }
}

// ===== TestHarness =====

/// Mocks plus config, wired into a [`ServiceContext`] on demand.
pub struct TestHarness {
    pub zones: Arc<MockZones>,
    pub email: Arc<MockEmail>,
    pub certificates: Arc<MockCertificates>,
    pub config: Arc<HookConfig>,
}

impl TestHarness {
    pub fn new(zones: MockZones) -> Self {
        Self {
            zones: Arc::new(zones),
            email: Arc::new(MockEmail::new()),
            certificates: Arc::new(MockCertificates::default()),
            config: Arc::new(HookConfig::default()),
        }
    }

    pub fn with_certificates(mut self, certificates: MockCertificates) -> Self {
        self.certificates = Arc::new(certificates);
        self
    }

    pub fn with_config(mut self, config: HookConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    pub fn ctx(&self) -> Arc<ServiceContext> {
        Arc::new(ServiceContext::new(
            self.zones.clone(),
            self.email.clone(),
            self.certificates.clone(),
            Arc::clone(&self.config),
        ))
    }
}
