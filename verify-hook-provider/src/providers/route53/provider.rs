//! Route 53 `HostedZoneApi` 实现

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::providers::common::strip_resource_prefix;
use crate::traits::{ErrorContext, HostedZoneApi};
use crate::types::{ChangeBatch, ChangeInfo, HostedZone, RecordType};

use super::Route53Provider;
use super::types::{
    ChangeInfoXml, ChangeResourceRecordSetsResponse, GetHostedZoneResponse, HostedZoneXml,
    ListHostedZonesByNameResponse, TestDnsAnswerResponse,
};

/// Route 53 单页最多返回 100 个托管区
const MAX_ITEMS_LIMIT: u32 = 100;

impl From<HostedZoneXml> for HostedZone {
    fn from(zone: HostedZoneXml) -> Self {
        Self {
            id: zone.id,
            name: zone.name,
            private_zone: zone.config.is_some_and(|c| c.private_zone),
            record_count: zone.resource_record_set_count,
        }
    }
}

impl Route53Provider {
    /// 转换变更回执；`SubmittedAt` 无法解析时置空
    fn convert_change_info(info: ChangeInfoXml) -> ChangeInfo {
        let submitted_at = info.submitted_at.as_deref().and_then(|s| {
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| log::debug!("Unparseable SubmittedAt {s:?}: {e}"))
                .ok()
        });
        ChangeInfo {
            id: info.id,
            status: info.status,
            submitted_at,
        }
    }
}

#[async_trait]
impl HostedZoneApi for Route53Provider {
    fn id(&self) -> &'static str {
        "route53"
    }

    async fn list_zones_by_name(&self, dns_name: &str, max_items: u32) -> Result<Vec<HostedZone>> {
        let max_items = max_items.clamp(1, MAX_ITEMS_LIMIT).to_string();
        let response: ListHostedZonesByNameResponse = self
            .get(
                "hostedzonesbyname",
                &[("dnsname", dns_name), ("maxitems", &max_items)],
                ErrorContext::resource(dns_name),
            )
            .await?;

        Ok(response
            .hosted_zones
            .zones
            .into_iter()
            .map(HostedZone::from)
            .collect())
    }

    async fn get_zone(&self, zone_id: &str) -> Result<HostedZone> {
        let zone_id = strip_resource_prefix(zone_id);
        let response: GetHostedZoneResponse = self
            .get(
                &format!("hostedzone/{zone_id}"),
                &[],
                ErrorContext::zone(zone_id),
            )
            .await?;
        Ok(response.hosted_zone.into())
    }

    async fn test_name_delegation(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<bool> {
        let zone_id = strip_resource_prefix(zone_id);
        let response: TestDnsAnswerResponse = self
            .get(
                "testdnsanswer",
                &[
                    ("hostedzoneid", zone_id),
                    ("recordname", name),
                    ("recordtype", record_type.as_str()),
                ],
                ErrorContext::zone(zone_id),
            )
            .await?;

        let answered =
            response.response_code == "NOERROR" && !response.record_data.entries.is_empty();
        log::debug!(
            "TestDNSAnswer {name} {record_type} in {zone_id}: {} ({} entries)",
            response.response_code,
            response.record_data.entries.len()
        );
        Ok(answered)
    }

    async fn submit_change_batch(&self, zone_id: &str, batch: &ChangeBatch) -> Result<ChangeInfo> {
        let zone_id = strip_resource_prefix(zone_id);
        let response: ChangeResourceRecordSetsResponse = self
            .post_change_batch(zone_id, batch, ErrorContext::zone(zone_id))
            .await?;
        Ok(Self::convert_change_info(response.change_info))
    }
}
