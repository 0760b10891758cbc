//! Change batch publishing
//!
//! One change batch per zone, submitted concurrently. UPSERT is all or
//! nothing; DELETE keeps going and reports `None` for the zones that failed.

use std::sync::Arc;

use verify_hook_provider::{strip_resource_prefix, ChangeBatch};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{ChangeAction, ZoneId, ZoneRecord};

/// Publishes zone records as per-zone change batches.
pub struct ChangeBatchPublisher {
    ctx: Arc<ServiceContext>,
}

impl ChangeBatchPublisher {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Groups records by zone in first-appearance order, dropping exact duplicates.
    pub fn group_by_zone(records: &[ZoneRecord]) -> Vec<(ZoneId, Vec<&ZoneRecord>)> {
        let mut groups: Vec<(ZoneId, Vec<&ZoneRecord>)> = Vec::new();
        for record in records {
            if let Some((_, members)) = groups.iter_mut().find(|(zone, _)| zone == record.zone_id()) {
                if !members.contains(&record) {
                    members.push(record);
                }
                continue;
            }
            groups.push((record.zone_id().clone(), vec![record]));
        }
        groups
    }

    /// Publishes `records` and returns one change id per zone, in group order.
    pub async fn publish(
        &self,
        records: &[ZoneRecord],
        action: ChangeAction,
    ) -> CoreResult<Vec<Option<String>>> {
        let groups = Self::group_by_zone(records);
        if groups.is_empty() {
            return Ok(Vec::new());
        }

        let submissions: Vec<_> = groups
            .iter()
            .map(|(zone_id, members)| {
                let zones = Arc::clone(&self.ctx.zones);
                let batch = ChangeBatch {
                    comment: Some(self.ctx.config.change_comment().to_string()),
                    changes: members.iter().map(|r| r.to_change(action)).collect(),
                };
                async move {
                    log::info!(
                        "Submitting {action} of {} record(s) to zone {zone_id}",
                        batch.changes.len()
                    );
                    zones.submit_change_batch(zone_id.as_str(), &batch).await
                }
            })
            .collect();

        let results = futures::future::join_all(submissions).await;

        let mut change_ids = Vec::with_capacity(results.len());
        for ((zone_id, _), result) in groups.iter().zip(results) {
            match result {
                Ok(info) => {
                    let id = strip_resource_prefix(&info.id).to_string();
                    log::info!("Zone {zone_id}: change {id} ({})", info.status);
                    change_ids.push(Some(id));
                }
                Err(e) if action == ChangeAction::Delete => {
                    log::warn!("Zone {zone_id}: {action} failed, continuing: {e}");
                    change_ids.push(None);
                }
                Err(e) => {
                    return Err(CoreError::ProviderTransactionFailed {
                        zone_id: zone_id.to_string(),
                        source: e,
                    });
                }
            }
        }

        Ok(change_ids)
    }
}
