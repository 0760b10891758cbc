//! Domain name and hosted zone identity types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use verify_hook_provider::{strip_resource_prefix, HostedZone};

use crate::error::{CoreError, CoreResult};

/// A DNS name without its trailing dot, ASCII-lowercased.
///
/// `example.com.` and `Example.COM` both become `example.com`, so equality
/// and ordering never depend on how the caller spelled the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainName(String);

impl DomainName {
    /// Parses and normalizes a name. Empty names and empty labels are rejected.
    pub fn new(name: &str) -> CoreResult<Self> {
        let trimmed = name.trim();
        let normalized = trimmed.strip_suffix('.').unwrap_or(trimmed);
        if normalized.is_empty()
            || normalized.split('.').any(str::is_empty)
            || normalized.chars().any(char::is_whitespace)
        {
            return Err(CoreError::InvalidDomainName(name.to_string()));
        }
        Ok(Self(normalized.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Labels from left (most specific) to right (top level).
    pub fn labels(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.0.split('.')
    }

    /// Candidate zone names from the top-level label down to the name itself:
    /// `a.b.example.com` yields `com`, `example.com`, `b.example.com`, `a.b.example.com`.
    pub fn candidates_root_first(&self) -> Vec<DomainName> {
        let mut candidates = Vec::new();
        let mut current = String::new();
        for label in self.labels().rev() {
            current = if current.is_empty() {
                label.to_string()
            } else {
                format!("{label}.{current}")
            };
            candidates.push(Self(current.clone()));
        }
        candidates
    }

    /// Whether this name equals `ancestor` or lies beneath it.
    pub fn is_at_or_below(&self, ancestor: &DomainName) -> bool {
        self.0 == ancestor.0
            || self
                .0
                .strip_suffix(ancestor.as_str())
                .is_some_and(|head| head.ends_with('.'))
    }

    /// Drops a leading `*.` wildcard label.
    #[must_use]
    pub fn strip_wildcard(&self) -> Self {
        match self.0.strip_prefix("*.") {
            Some(rest) => Self(rest.to_string()),
            None => self.clone(),
        }
    }

    /// Prepends one or more labels (`"_domainkey"` + `example.com`).
    pub fn child(&self, labels: &str) -> CoreResult<Self> {
        Self::new(&format!("{labels}.{}", self.0))
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DomainName {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for DomainName {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        Self::new(&value)
    }
}

impl From<DomainName> for String {
    fn from(name: DomainName) -> Self {
        name.0
    }
}

/// A hosted zone id with any `/hostedzone/` prefix removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    pub fn new(raw: &str) -> Self {
        Self(strip_resource_prefix(raw.trim()).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the resolver hands back: the zone id plus the zone's own name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostedZoneRef {
    pub id: ZoneId,
    pub name: DomainName,
}

impl HostedZoneRef {
    pub fn new(id: ZoneId, name: DomainName) -> Self {
        Self { id, name }
    }
}

impl TryFrom<&HostedZone> for HostedZoneRef {
    type Error = CoreError;

    fn try_from(zone: &HostedZone) -> CoreResult<Self> {
        Ok(Self::new(ZoneId::new(&zone.id), DomainName::new(&zone.name)?))
    }
}
