use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pi-hole client group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group name
    pub name: String,

    /// Free-form comment
    #[serde(default)]
    pub comment: Option<String>,

    /// Whether the group is active
    pub enabled: bool,

    /// Pi-hole assigned ID
    pub id: u32,

    /// Creation time (Unix seconds)
    #[serde(default)]
    pub date_added: Option<i64>,

    /// Last modification time (Unix seconds)
    #[serde(default)]
    pub date_modified: Option<i64>,
}

impl Group {
    /// When the group was created
    #[must_use]
    pub fn added_at(&self) -> Option<DateTime<Utc>> {
        self.date_added.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}

/// Response of `GET /groups` and `GET /groups/{name}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupList {
    /// Matching groups
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl GroupList {
    /// Keep only the groups that are currently enabled
    #[must_use]
    pub fn enabled_groups(self) -> Vec<Group> {
        self.groups.into_iter().filter(|g| g.enabled).collect()
    }
}
