//! Filters applied to the Pi-hole domain list.

use crate::{DropdockError, ManagedDomain, Result};
use std::str::FromStr;

/// Fields of [`ManagedDomain`] that can be filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainFilterField {
    /// `comment`
    Comment,
    /// `id`
    Id,
    /// `domain` (also accepted as `name`)
    Domain,
    /// `enabled`
    Enabled,
}

impl DomainFilterField {
    /// All filterable fields
    pub const ALL: [Self; 4] = [Self::Comment, Self::Id, Self::Domain, Self::Enabled];

    /// Canonical field name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Id => "id",
            Self::Domain => "domain",
            Self::Enabled => "enabled",
        }
    }
}

impl std::fmt::Display for DomainFilterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DomainFilterField {
    type Err = DropdockError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "comment" => Ok(Self::Comment),
            "id" => Ok(Self::Id),
            "domain" | "name" => Ok(Self::Domain),
            "enabled" => Ok(Self::Enabled),
            other => Err(DropdockError::Validation(format!(
                "invalid filter field {other:?}, must be one of: comment, id, domain, enabled"
            ))),
        }
    }
}

/// Equality filter on a single domain field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainFilter {
    /// Entries whose comment equals the value
    Comment(String),
    /// The entry with this ID
    Id(u32),
    /// Entries whose stored value equals the value
    Domain(String),
    /// Entries with this enabled state
    Enabled(bool),
}

impl DomainFilter {
    /// Build a filter from a field name and a textual value
    pub fn parse(field: &str, value: &str) -> Result<Self> {
        let field: DomainFilterField = field.parse()?;
        let filter = match field {
            DomainFilterField::Comment => Self::Comment(value.to_string()),
            DomainFilterField::Domain => Self::Domain(value.to_string()),
            DomainFilterField::Id => Self::Id(value.parse().map_err(|_| {
                DropdockError::Validation(format!("filter value for id must be an integer, got {value:?}"))
            })?),
            DomainFilterField::Enabled => Self::Enabled(value.parse().map_err(|_| {
                DropdockError::Validation(format!(
                    "filter value for enabled must be true or false, got {value:?}"
                ))
            })?),
        };
        Ok(filter)
    }

    /// The field this filter compares
    #[must_use]
    pub const fn field(&self) -> DomainFilterField {
        match self {
            Self::Comment(_) => DomainFilterField::Comment,
            Self::Id(_) => DomainFilterField::Id,
            Self::Domain(_) => DomainFilterField::Domain,
            Self::Enabled(_) => DomainFilterField::Enabled,
        }
    }

    /// Returns true if the entry matches
    #[must_use]
    pub fn matches(&self, entry: &ManagedDomain) -> bool {
        match self {
            Self::Comment(comment) => entry.comment.as_deref() == Some(comment.as_str()),
            Self::Id(id) => entry.id == Some(*id),
            Self::Domain(domain) => entry.domain == *domain,
            Self::Enabled(enabled) => entry.enabled == *enabled,
        }
    }
}
