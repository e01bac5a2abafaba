use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a domain entry allows or denies matching queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainType {
    /// Allow list entry
    Allow,
    /// Deny list entry
    Deny,
}

impl std::fmt::Display for DomainType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::Deny => write!(f, "deny"),
        }
    }
}

/// How Pi-hole interprets the stored domain value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainKind {
    /// Literal domain
    Exact,
    /// Regular expression
    Regex,
}

impl std::fmt::Display for DomainKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Regex => write!(f, "regex"),
        }
    }
}

/// Domain entry as stored by Pi-hole
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedDomain {
    /// Stored value; the regex pattern for regex entries
    pub domain: String,

    /// Unicode rendering of the value
    #[serde(default)]
    pub unicode: Option<String>,

    /// Allow or deny
    #[serde(rename = "type")]
    pub domain_type: DomainType,

    /// Exact or regex
    pub kind: DomainKind,

    /// Free-form comment, used as the ownership tag
    #[serde(default)]
    pub comment: Option<String>,

    /// IDs of the groups the entry belongs to
    #[serde(default)]
    pub groups: Vec<u32>,

    /// Whether the entry is active
    #[serde(default)]
    pub enabled: bool,

    /// Pi-hole assigned ID
    #[serde(default)]
    pub id: Option<u32>,

    /// Creation time (Unix seconds)
    #[serde(default)]
    pub date_added: Option<i64>,

    /// Last modification time (Unix seconds)
    #[serde(default)]
    pub date_modified: Option<i64>,
}

impl ManagedDomain {
    /// Returns true if the entry carries the given ownership tag
    #[must_use]
    pub fn is_tagged(&self, tag: &str) -> bool {
        self.comment.as_deref() == Some(tag)
    }

    /// When the entry was created
    #[must_use]
    pub fn added_at(&self) -> Option<DateTime<Utc>> {
        self.date_added.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }

    /// When the entry was last modified
    #[must_use]
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.date_modified.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}

/// Response of `GET /domains`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainList {
    /// All domain entries
    #[serde(default)]
    pub domains: Vec<ManagedDomain>,
}

/// Body of `POST /domains/deny/regex`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddDomainsRequest {
    /// Patterns to insert in one batch
    pub domain: Vec<String>,

    /// Ownership tag
    pub comment: String,

    /// Whether the new entries are active
    pub enabled: bool,

    /// Group IDs assigned to every new entry
    pub groups: Vec<u32>,
}

/// Response of a batch insert
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddDomainsResponse {
    /// Entries as stored after the insert
    #[serde(default)]
    pub domains: Vec<ManagedDomain>,

    /// Per-item outcome
    #[serde(default)]
    pub processed: Option<Processed>,
}

impl AddDomainsResponse {
    /// Items Pi-hole refused to insert
    #[must_use]
    pub fn rejected(&self) -> &[ProcessedItem] {
        self.processed
            .as_ref()
            .map(|p| p.errors.as_slice())
            .unwrap_or_default()
    }
}

/// Per-item outcome of a batch insert
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Processed {
    /// Items inserted
    #[serde(default)]
    pub success: Vec<ProcessedItem>,

    /// Items rejected
    #[serde(default)]
    pub errors: Vec<ProcessedItem>,
}

/// Single item of a batch outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedItem {
    /// The submitted value
    pub item: String,

    /// Reason for rejection, if any
    #[serde(default)]
    pub error: Option<String>,
}
