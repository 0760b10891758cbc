//! Records to publish

use std::time::Duration;

use verify_hook_provider::{Change, ChangeAction, RecordType, ResourceRecordSet};

use super::domain::{DomainName, HostedZoneRef, ZoneId};
use crate::error::{CoreError, CoreResult};

/// One record bound to the zone it will be written into.
///
/// Only [`ZoneRecord::new`] builds one, and it refuses names outside the zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZoneRecord {
    zone_id: ZoneId,
    name: DomainName,
    record_type: RecordType,
    value: String,
    ttl: Duration,
}

impl ZoneRecord {
    pub fn new(
        zone: &HostedZoneRef,
        name: DomainName,
        record_type: RecordType,
        value: impl Into<String>,
        ttl: Duration,
    ) -> CoreResult<Self> {
        if !name.is_at_or_below(&zone.name) {
            return Err(CoreError::ZoneNotAuthoritative {
                zone: zone.name.to_string(),
                name: name.to_string(),
            });
        }
        Ok(Self {
            zone_id: zone.id.clone(),
            name,
            record_type,
            value: value.into(),
            ttl,
        })
    }

    pub fn zone_id(&self) -> &ZoneId {
        &self.zone_id
    }

    pub fn name(&self) -> &DomainName {
        &self.name
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The provider change that applies `action` to this record.
    pub fn to_change(&self, action: ChangeAction) -> Change {
        Change {
            action,
            record_set: ResourceRecordSet {
                name: self.name.to_string(),
                record_type: self.record_type,
                ttl: u32::try_from(self.ttl.as_secs()).unwrap_or(u32::MAX),
                values: vec![self.value.clone()],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> HostedZoneRef {
        HostedZoneRef::new(
            ZoneId::new("/hostedzone/Z1"),
            DomainName::new("example.com").unwrap(),
        )
    }

    #[test]
    fn record_outside_zone_is_rejected() {
        let err = ZoneRecord::new(
            &zone(),
            DomainName::new("_verifyhost.other.com").unwrap(),
            RecordType::Txt,
            "\"t\"",
            Duration::from_secs(60),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::ZoneNotAuthoritative { .. }));
    }

    #[test]
    fn change_carries_ttl_and_value() {
        let record = ZoneRecord::new(
            &zone(),
            DomainName::new("_verifyhost.example.com").unwrap(),
            RecordType::Txt,
            "\"token\"",
            Duration::from_secs(60),
        )
        .unwrap();
        assert_eq!(record.zone_id().as_str(), "Z1");

        let change = record.to_change(ChangeAction::Delete);
        assert_eq!(change.action, ChangeAction::Delete);
        assert_eq!(change.record_set.name, "_verifyhost.example.com");
        assert_eq!(change.record_set.ttl, 60);
        assert_eq!(change.record_set.values, vec!["\"token\"".to_string()]);
    }
}
