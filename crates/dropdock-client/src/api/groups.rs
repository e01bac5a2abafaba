//! Group API endpoints.

use super::segment;
use crate::PiholeClient;
use dropdock_core::{Group, GroupList, Result};
use tracing::debug;

/// Group API endpoints
pub struct GroupsApi<'a> {
    client: &'a PiholeClient,
}

impl<'a> GroupsApi<'a> {
    pub(crate) const fn new(client: &'a PiholeClient) -> Self {
        Self { client }
    }

    /// List groups.
    ///
    /// With `names`, one request is made per name and the results are
    /// concatenated in order; names are not deduplicated. Without, all
    /// groups are returned by a single request.
    pub async fn list(&self, names: Option<&[String]>) -> Result<Vec<Group>> {
        let Some(names) = names else {
            let list: GroupList = self.client.get("/groups").await?;
            debug!(count = list.groups.len(), "Fetched all groups");
            return Ok(list.groups);
        };

        let mut groups = Vec::new();
        for name in names {
            let list: GroupList = self
                .client
                .get(&format!("/groups/{}", segment(name)))
                .await?;
            debug!(name = %name, count = list.groups.len(), "Fetched group");
            groups.extend(list.groups);
        }
        Ok(groups)
    }
}
