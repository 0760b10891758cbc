//! Hosted zone resolution
//!
//! Finds the hosted zone that is authoritative for a name, walking the label
//! hierarchy when the name is not itself a zone.

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{DomainName, HostedZoneRef, RecordType, ZoneId};

/// Resolves names to the hosted zone that serves them.
pub struct ZoneResolver {
    ctx: Arc<ServiceContext>,
}

impl ZoneResolver {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Resolves the zone whose name is exactly `name`.
    ///
    /// The listing is a nearest-match query, so the first zone it returns is
    /// only accepted when its name equals `name` (with or without the trailing dot).
    pub async fn resolve_zone_by_exact_name(&self, name: &DomainName) -> CoreResult<HostedZoneRef> {
        let zones = self.ctx.zones.list_zones_by_name(name.as_str(), 1).await?;

        let Some(zone) = zones.into_iter().next() else {
            return Err(CoreError::NoZonesFound(name.to_string()));
        };

        let found = zone.name.strip_suffix('.').unwrap_or(&zone.name);
        if !found.eq_ignore_ascii_case(name.as_str()) {
            return Err(CoreError::NoExactMatch {
                query: name.to_string(),
                found: zone.name,
            });
        }

        let zone_ref = HostedZoneRef::new(ZoneId::new(&zone.id), name.clone());
        log::debug!("Zone {} is named {}", zone_ref.id, zone_ref.name);
        Ok(zone_ref)
    }

    /// Fetches a zone by id.
    pub async fn get_zone_by_exact_id(&self, zone_id: &str) -> CoreResult<HostedZoneRef> {
        let zone = self.ctx.zones.get_zone(zone_id).await?;
        HostedZoneRef::try_from(&zone)
    }

    /// Finds the most specific zone that actually serves `fqdn`.
    ///
    /// Candidates are tried root first (`com`, `example.com`, `b.example.com`, ...).
    /// A hosted candidate wins unless it delegates `fqdn` further down.
    pub async fn resolve_zone_by_fqdn(&self, fqdn: &DomainName) -> CoreResult<HostedZoneRef> {
        for candidate in fqdn.candidates_root_first() {
            let zone = match self.resolve_zone_by_exact_name(&candidate).await {
                Ok(zone) => zone,
                Err(CoreError::NoZonesFound(_) | CoreError::NoExactMatch { .. }) => {
                    log::debug!("{candidate} is not a hosted zone");
                    continue;
                }
                Err(e) => return Err(e),
            };

            // a zone apex always has its own NS records
            if candidate == *fqdn {
                return Ok(zone);
            }

            let delegated = self
                .ctx
                .zones
                .test_name_delegation(zone.id.as_str(), fqdn.as_str(), RecordType::Ns)
                .await?;
            if !delegated {
                log::debug!("{fqdn} is served by zone {} ({})", zone.name, zone.id);
                return Ok(zone);
            }

            log::debug!("{fqdn} is delegated below {candidate}, continuing");
        }

        Err(CoreError::ZoneNotDeterminable(fqdn.to_string()))
    }

    /// Resolves the zone a resource's records go into.
    ///
    /// `hint` is the resource's `HostedZoneIdOrName`: a value containing a dot
    /// is a zone name, anything else a zone id. The hinted zone must be at or
    /// above `name` and must not delegate `name` to another zone.
    pub async fn resolve_target(
        &self,
        name: &DomainName,
        hint: Option<&str>,
    ) -> CoreResult<HostedZoneRef> {
        let zone = match hint {
            Some(hint) if hint.contains('.') => {
                self.resolve_zone_by_exact_name(&DomainName::new(hint)?)
                    .await?
            }
            Some(hint) => self.get_zone_by_exact_id(hint).await?,
            None => return self.resolve_zone_by_fqdn(name).await,
        };

        let not_authoritative = || CoreError::ZoneNotAuthoritative {
            zone: zone.name.to_string(),
            name: name.to_string(),
        };

        if !name.is_at_or_below(&zone.name) {
            return Err(not_authoritative());
        }

        if *name != zone.name {
            let delegated = self
                .ctx
                .zones
                .test_name_delegation(zone.id.as_str(), name.as_str(), RecordType::Ns)
                .await?;
            if delegated {
                log::warn!("{name} is delegated below hinted zone {}", zone.name);
                return Err(not_authoritative());
            }
        }

        Ok(zone)
    }
}
