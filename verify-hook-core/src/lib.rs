//! Verify Hook Core Library
//!
//! Publishes domain-ownership proofs into Route 53 on behalf of a
//! CloudFormation custom resource:
//! - hosted zone resolution for arbitrary names (`ZoneResolver`)
//! - bounded polling of paginated listings (`ResourcePoller`)
//! - per-zone change batches (`ChangeBatchPublisher`)
//! - create / update / delete handling (`LifecycleOrchestrator`) for SES
//!   email domains and ACM DNS validation
//!
//! Service access goes through the traits of `verify-hook-provider`, so the
//! whole crate runs against mocks in tests.

pub mod config;
pub mod error;
pub mod services;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::HookConfig;
pub use error::{CoreError, CoreResult};
pub use services::{
    CertificateValidationHandler, EmailDomainHandler, LifecycleOrchestrator, ResourceHandler,
    ServiceContext,
};
pub use types::{LifecycleEvent, LifecycleResponse, RequestType, ResourceProperties};
