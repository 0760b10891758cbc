//! AWS service clients

/// Shared utilities used by the service clients.
pub mod common;

pub(crate) mod aws_error;
pub(crate) mod sigv4;

mod acm;
mod route53;
mod ses;

pub use acm::{AcmProvider, AcmProviderBuilder};
pub use route53::{Route53Provider, Route53ProviderBuilder};
pub use ses::{SesProvider, SesProviderBuilder};
