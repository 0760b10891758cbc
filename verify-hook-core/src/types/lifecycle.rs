//! Lifecycle events and responses

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// The three lifecycle events an external orchestrator sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

impl RequestType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }
}

impl FromStr for RequestType {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "Create" => Ok(Self::Create),
            "Update" => Ok(Self::Update),
            "Delete" => Ok(Self::Delete),
            other => Err(CoreError::InvalidRequestType(other.to_string())),
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource properties understood by either handler.
///
/// Unknown properties (e.g. CloudFormation's `ServiceToken`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceProperties {
    /// Zone id (`Z…`) or zone name (`example.com`) to publish into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosted_zone_id_or_name: Option<String>,
    /// Email sending domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    /// Primary name of the certificate to validate.
    #[serde(
        rename = "CertificateFQDN",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub certificate_fqdn: Option<String>,
}

impl ResourceProperties {
    /// Zone hint, ignoring blank values.
    pub fn zone_hint(&self) -> Option<&str> {
        self.hosted_zone_id_or_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// A required string property, or `MissingProperty`.
    pub fn require<'a>(value: Option<&'a String>, property: &str) -> CoreResult<&'a str> {
        value
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CoreError::MissingProperty(property.to_string()))
    }
}

/// One invocation of the hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    pub request_type: RequestType,
    pub resource_properties: ResourceProperties,
    /// Present on Update (and on Delete when the orchestrator sends it).
    pub old_resource_properties: Option<ResourceProperties>,
    /// Present on Update and Delete.
    pub physical_resource_id: Option<String>,
    /// Time left before the orchestrator gives up; bounds polling.
    pub remaining_time_budget: Option<Duration>,
}

impl LifecycleEvent {
    pub fn new(request_type: RequestType, resource_properties: ResourceProperties) -> Self {
        Self {
            request_type,
            resource_properties,
            old_resource_properties: None,
            physical_resource_id: None,
            remaining_time_budget: None,
        }
    }

    #[must_use]
    pub fn with_old_properties(mut self, properties: ResourceProperties) -> Self {
        self.old_resource_properties = Some(properties);
        self
    }

    #[must_use]
    pub fn with_physical_id(mut self, id: impl Into<String>) -> Self {
        self.physical_resource_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.remaining_time_budget = Some(budget);
        self
    }
}

/// `Data` returned to the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseData {
    /// One entry per zone touched, `null` where a best-effort delete failed.
    pub change_ids: Vec<Option<String>>,
    /// Change ids of the delete half of an Update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_change_ids: Option<Vec<Option<String>>>,
    /// Handler-specific values (`VerificationToken`, `CertificateArn`).
    #[serde(flatten)]
    pub attributes: BTreeMap<String, String>,
}

/// Successful outcome of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LifecycleResponse {
    pub physical_resource_id: String,
    /// `None` for the unassigned-sentinel Delete.
    pub data: Option<ResponseData>,
}
