//! Hook configuration
//!
//! Built once at process start and shared as `Arc<HookConfig>`.

use std::time::Duration;

/// TTL of every published record.
pub const DEFAULT_RECORD_TTL: Duration = Duration::from_secs(60);
/// Label prefix of the ownership TXT record.
pub const DEFAULT_OWNERSHIP_PREFIX: &str = "_verifyhost";
/// Label between a DKIM token and the domain.
pub const DEFAULT_DKIM_LABEL: &str = "_domainkey";
/// Suffix DKIM CNAMEs point into.
pub const DEFAULT_DKIM_TARGET_SUFFIX: &str = "dkim.amazonses.com";
/// Sleep between two full certificate listings.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// Only certificates issued by ACM itself carry DNS validation records.
pub const DEFAULT_TRUSTED_CERTIFICATE_TYPE: &str = "AMAZON_ISSUED";
/// Physical id reported when a Create fails before anything was created.
pub const DEFAULT_UNASSIGNED_PHYSICAL_ID: &str = "verify-hook:unassigned";
/// Comment stored with each change batch.
pub const DEFAULT_CHANGE_COMMENT: &str = "Managed by verify-hook";

/// Constants the handlers need, in one immutable place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookConfig {
    record_ttl: Duration,
    ownership_prefix: String,
    dkim_label: String,
    dkim_target_suffix: String,
    poll_interval: Duration,
    trusted_certificate_type: String,
    unassigned_physical_id: String,
    change_comment: String,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            record_ttl: DEFAULT_RECORD_TTL,
            ownership_prefix: DEFAULT_OWNERSHIP_PREFIX.to_string(),
            dkim_label: DEFAULT_DKIM_LABEL.to_string(),
            dkim_target_suffix: DEFAULT_DKIM_TARGET_SUFFIX.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            trusted_certificate_type: DEFAULT_TRUSTED_CERTIFICATE_TYPE.to_string(),
            unassigned_physical_id: DEFAULT_UNASSIGNED_PHYSICAL_ID.to_string(),
            change_comment: DEFAULT_CHANGE_COMMENT.to_string(),
        }
    }
}

impl HookConfig {
    #[must_use]
    pub fn with_record_ttl(mut self, ttl: Duration) -> Self {
        self.record_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_ownership_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.ownership_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_dkim_label(mut self, label: impl Into<String>) -> Self {
        self.dkim_label = label.into();
        self
    }

    #[must_use]
    pub fn with_dkim_target_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.dkim_target_suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[must_use]
    pub fn with_trusted_certificate_type(mut self, certificate_type: impl Into<String>) -> Self {
        self.trusted_certificate_type = certificate_type.into();
        self
    }

    #[must_use]
    pub fn with_unassigned_physical_id(mut self, id: impl Into<String>) -> Self {
        self.unassigned_physical_id = id.into();
        self
    }

    #[must_use]
    pub fn with_change_comment(mut self, comment: impl Into<String>) -> Self {
        self.change_comment = comment.into();
        self
    }

    pub fn record_ttl(&self) -> Duration {
        self.record_ttl
    }

    pub fn ownership_prefix(&self) -> &str {
        &self.ownership_prefix
    }

    pub fn dkim_label(&self) -> &str {
        &self.dkim_label
    }

    pub fn dkim_target_suffix(&self) -> &str {
        &self.dkim_target_suffix
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn trusted_certificate_type(&self) -> &str {
        &self.trusted_certificate_type
    }

    pub fn unassigned_physical_id(&self) -> &str {
        &self.unassigned_physical_id
    }

    pub fn change_comment(&self) -> &str {
        &self.change_comment
    }

    /// Whether `physical_id` is the "never created" sentinel.
    pub fn is_unassigned(&self, physical_id: &str) -> bool {
        physical_id == self.unassigned_physical_id
    }
}
