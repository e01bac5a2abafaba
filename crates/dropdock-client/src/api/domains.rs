//! Domain list API endpoints.

use super::segment;
use crate::PiholeClient;
use dropdock_core::{
    AddDomainsRequest, AddDomainsResponse, DomainFilter, DomainList, ManagedDomain, Result,
};
use tracing::{debug, warn};

/// Domain list API endpoints
pub struct DomainsApi<'a> {
    client: &'a PiholeClient,
}

impl<'a> DomainsApi<'a> {
    pub(crate) const fn new(client: &'a PiholeClient) -> Self {
        Self { client }
    }

    /// Fetch every domain entry, optionally keeping only those matching
    /// `filter`. Filtering happens locally after a single request.
    pub async fn list(&self, filter: Option<&DomainFilter>) -> Result<Vec<ManagedDomain>> {
        let list: DomainList = self.client.get("/domains").await?;
        let total = list.domains.len();

        let domains: Vec<ManagedDomain> = match filter {
            Some(filter) => list
                .domains
                .into_iter()
                .filter(|d| filter.matches(d))
                .collect(),
            None => list.domains,
        };

        debug!(total, matched = domains.len(), ?filter, "Fetched domains");
        Ok(domains)
    }

    /// Like [`list`](Self::list) with a filter given by field name.
    ///
    /// The field and value are validated before any request is made.
    pub async fn list_by(&self, field: &str, value: &str) -> Result<Vec<ManagedDomain>> {
        let filter = DomainFilter::parse(field, value)?;
        self.list(Some(&filter)).await
    }

    /// Delete one entry, addressed by its type, kind and stored value
    pub async fn delete(&self, entry: &ManagedDomain) -> Result<()> {
        let path = format!(
            "/domains/{}/{}/{}",
            entry.domain_type,
            entry.kind,
            segment(&entry.domain)
        );
        self.client.delete(&path).await
    }

    /// Insert regex deny entries in a single request.
    ///
    /// Every entry is enabled, tagged with `tag` and assigned to `group_ids`.
    /// Items Pi-hole refuses are logged and returned in the response; they
    /// do not fail the call.
    pub async fn add(
        &self,
        patterns: &[String],
        tag: &str,
        group_ids: &[u32],
    ) -> Result<AddDomainsResponse> {
        let request = AddDomainsRequest {
            domain: patterns.to_vec(),
            comment: tag.to_string(),
            enabled: true,
            groups: group_ids.to_vec(),
        };

        let response: AddDomainsResponse =
            self.client.post("/domains/deny/regex", &request).await?;

        for rejected in response.rejected() {
            warn!(
                item = %rejected.item,
                error = rejected.error.as_deref().unwrap_or("unknown"),
                "Pi-hole rejected domain"
            );
        }

        Ok(response)
    }
}
