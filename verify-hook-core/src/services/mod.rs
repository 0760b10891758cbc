//! Service layer

mod certificate_validation_handler;
mod change_batch_publisher;
mod email_domain_handler;
mod lifecycle;
mod resource_poller;
mod zone_resolver;

pub use certificate_validation_handler::{CertificateValidationHandler, CERTIFICATE_ARN_ATTRIBUTE};
pub use change_batch_publisher::ChangeBatchPublisher;
pub use email_domain_handler::{EmailDomainHandler, VERIFICATION_TOKEN_ATTRIBUTE};
pub use lifecycle::{HandlerOutcome, LifecycleOrchestrator, ResourceHandler};
pub use resource_poller::ResourcePoller;
pub use zone_resolver::ZoneResolver;

use std::sync::Arc;

use verify_hook_provider::{AwsClients, CertificateApi, EmailIdentityApi, HostedZoneApi};

use crate::config::HookConfig;

/// Service context holding every dependency.
///
/// The runner builds it with the real clients; tests inject mocks.
pub struct ServiceContext {
    /// Hosted zone API
    pub zones: Arc<dyn HostedZoneApi>,
    /// Email identity API
    pub email: Arc<dyn EmailIdentityApi>,
    /// Certificate API
    pub certificates: Arc<dyn CertificateApi>,
    /// Timing constants
    pub config: Arc<HookConfig>,
}

impl ServiceContext {
    /// Builds a context from explicit clients.
    #[must_use]
    pub fn new(
        zones: Arc<dyn HostedZoneApi>,
        email: Arc<dyn EmailIdentityApi>,
        certificates: Arc<dyn CertificateApi>,
        config: Arc<HookConfig>,
    ) -> Self {
        Self {
            zones,
            email,
            certificates,
            config,
        }
    }

    /// Builds a context from the provider factory client set.
    #[must_use]
    pub fn from_clients(clients: AwsClients, config: Arc<HookConfig>) -> Self {
        Self::new(clients.zones, clients.email, clients.certificates, config)
    }
}
