//! CloudFormation custom resource envelope
//!
//! Request: <https://docs.aws.amazon.com/AWSCloudFormation/latest/UserGuide/crpg-ref-requests.html>
//! Response: <https://docs.aws.amazon.com/AWSCloudFormation/latest/UserGuide/crpg-ref-responses.html>

use std::time::Duration;

use serde::{Deserialize, Serialize};
use verify_hook_core::error::{CoreError, CoreResult};
use verify_hook_core::types::{LifecycleEvent, LifecycleResponse, ResponseData};
use verify_hook_core::{RequestType, ResourceProperties};

/// Custom resource request as CloudFormation sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CloudFormationRequest {
    pub request_type: String,
    #[serde(rename = "ResponseURL")]
    pub response_url: String,
    pub stack_id: String,
    pub request_id: String,
    #[serde(default)]
    pub resource_type: Option<String>,
    pub logical_resource_id: String,
    #[serde(default)]
    pub physical_resource_id: Option<String>,
    #[serde(default)]
    pub resource_properties: ResourceProperties,
    #[serde(default)]
    pub old_resource_properties: Option<ResourceProperties>,
}

impl CloudFormationRequest {
    /// Converts the envelope into a lifecycle event.
    ///
    /// Unknown request types fail here, before any service is called.
    pub fn to_event(&self, time_budget: Option<Duration>) -> CoreResult<LifecycleEvent> {
        let request_type: RequestType = self.request_type.parse()?;
        let mut event = LifecycleEvent::new(request_type, self.resource_properties.clone());
        if let Some(old) = &self.old_resource_properties {
            event = event.with_old_properties(old.clone());
        }
        if let Some(id) = self.physical_resource_id.as_deref().filter(|id| !id.is_empty()) {
            event = event.with_physical_id(id);
        }
        if let Some(budget) = time_budget {
            event = event.with_time_budget(budget);
        }
        Ok(event)
    }

    fn is_create(&self) -> bool {
        self.request_type == RequestType::Create.as_str()
    }
}

/// `Status` of the response document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseStatus {
    Success,
    Failed,
}

/// Response document uploaded to `ResponseURL`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CloudFormationResponse {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl CloudFormationResponse {
    pub fn success(request: &CloudFormationRequest, response: LifecycleResponse) -> Self {
        Self {
            status: ResponseStatus::Success,
            reason: None,
            physical_resource_id: response.physical_resource_id,
            stack_id: request.stack_id.clone(),
            request_id: request.request_id.clone(),
            logical_resource_id: request.logical_resource_id.clone(),
            data: response.data,
        }
    }

    /// A failed Create never produced a resource, so it reports `unassigned_id`;
    /// CloudFormation then sends that id back on the rollback Delete.
    pub fn failure(request: &CloudFormationRequest, error: &CoreError, unassigned_id: &str) -> Self {
        let physical_resource_id = match request.physical_resource_id.as_deref() {
            Some(id) if !id.is_empty() && !request.is_create() => id.to_string(),
            _ => unassigned_id.to_string(),
        };
        Self {
            status: ResponseStatus::Failed,
            reason: Some(error.to_string()),
            physical_resource_id,
            stack_id: request.stack_id.clone(),
            request_id: request.request_id.clone(),
            logical_resource_id: request.logical_resource_id.clone(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}
