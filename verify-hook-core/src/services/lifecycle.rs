//! Lifecycle orchestration
//!
//! Maps Create / Update / Delete onto a [`ResourceHandler`].

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::HookConfig;
use crate::error::{CoreError, CoreResult};
use crate::types::{LifecycleEvent, LifecycleResponse, RequestType, ResourceProperties, ResponseData};

/// What a handler reports after creating or removing its records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerOutcome {
    pub physical_id: String,
    pub change_ids: Vec<Option<String>>,
    pub attributes: BTreeMap<String, String>,
}

/// Resource-specific steps of the lifecycle.
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    /// Resource kind, for logs.
    fn kind(&self) -> &'static str;

    /// Publishes the records for `properties` (UPSERT).
    ///
    /// `time_budget` bounds any waiting for the resource to appear.
    async fn create(
        &self,
        properties: &ResourceProperties,
        time_budget: Option<Duration>,
    ) -> CoreResult<HandlerOutcome>;

    /// Removes the records of an existing resource (best-effort DELETE).
    ///
    /// `successor` holds the new properties when this is the first half of an Update.
    async fn delete(
        &self,
        physical_id: &str,
        properties: &ResourceProperties,
        successor: Option<&ResourceProperties>,
    ) -> CoreResult<HandlerOutcome>;
}

/// Runs one lifecycle event against a handler.
pub struct LifecycleOrchestrator {
    config: Arc<HookConfig>,
    handler: Arc<dyn ResourceHandler>,
}

impl LifecycleOrchestrator {
    #[must_use]
    pub fn new(config: Arc<HookConfig>, handler: Arc<dyn ResourceHandler>) -> Self {
        Self { config, handler }
    }

    /// Runs one lifecycle event.
    pub async fn handle(&self, event: &LifecycleEvent) -> CoreResult<LifecycleResponse> {
        log::info!("{} {}", event.request_type, self.handler.kind());
        match event.request_type {
            RequestType::Create => self.create(event).await,
            RequestType::Update => self.update(event).await,
            RequestType::Delete => self.delete(event).await,
        }
    }

    async fn create(&self, event: &LifecycleEvent) -> CoreResult<LifecycleResponse> {
        let outcome = self
            .handler
            .create(&event.resource_properties, event.remaining_time_budget)
            .await?;

        Ok(LifecycleResponse {
            physical_resource_id: outcome.physical_id,
            data: Some(ResponseData {
                change_ids: outcome.change_ids,
                previous_change_ids: None,
                attributes: outcome.attributes,
            }),
        })
    }

    async fn update(&self, event: &LifecycleEvent) -> CoreResult<LifecycleResponse> {
        let old_properties = event
            .old_resource_properties
            .as_ref()
            .ok_or_else(|| CoreError::MissingProperty("OldResourceProperties".to_string()))?;

        let previous = match event.physical_resource_id.as_deref() {
            Some(id) if !self.config.is_unassigned(id) => {
                let removed = self
                    .handler
                    .delete(id, old_properties, Some(&event.resource_properties))
                    .await?;
                removed.change_ids
            }
            _ => {
                log::info!("No previous resource to remove before update");
                Vec::new()
            }
        };

        let created = self
            .handler
            .create(&event.resource_properties, event.remaining_time_budget)
            .await?;

        Ok(LifecycleResponse {
            physical_resource_id: created.physical_id,
            data: Some(ResponseData {
                change_ids: created.change_ids,
                previous_change_ids: Some(previous),
                attributes: created.attributes,
            }),
        })
    }

    async fn delete(&self, event: &LifecycleEvent) -> CoreResult<LifecycleResponse> {
        let physical_id = match event.physical_resource_id.as_deref() {
            Some(id) if !self.config.is_unassigned(id) => id,
            other => {
                log::info!("Nothing was created, delete is a no-op");
                return Ok(LifecycleResponse {
                    physical_resource_id: other
                        .unwrap_or(self.config.unassigned_physical_id())
                        .to_string(),
                    data: None,
                });
            }
        };

        let outcome = self
            .handler
            .delete(physical_id, &event.resource_properties, None)
            .await?;

        Ok(LifecycleResponse {
            physical_resource_id: physical_id.to_string(),
            data: Some(ResponseData {
                change_ids: outcome.change_ids,
                previous_change_ids: None,
                attributes: outcome.attributes,
            }),
        })
    }
}
