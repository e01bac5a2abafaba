//! The Pi-hole operations reconciliation depends on.

use async_trait::async_trait;
use dropdock_client::PiholeClient;
use dropdock_core::{AddDomainsResponse, DomainFilter, Group, ManagedDomain, Result};

/// Deny-list operations used by the reconciler
#[async_trait]
pub trait DenyListApi: Send + Sync {
    /// List groups, all of them or those with the given names
    async fn list_groups(&self, names: Option<&[String]>) -> Result<Vec<Group>>;

    /// List domain entries, optionally filtered
    async fn list_domains(&self, filter: Option<&DomainFilter>) -> Result<Vec<ManagedDomain>>;

    /// Delete one entry
    async fn delete_domain(&self, entry: &ManagedDomain) -> Result<()>;

    /// Insert regex deny entries in one batch
    async fn add_domains(
        &self,
        patterns: &[String],
        tag: &str,
        group_ids: &[u32],
    ) -> Result<AddDomainsResponse>;
}

#[async_trait]
impl DenyListApi for PiholeClient {
    async fn list_groups(&self, names: Option<&[String]>) -> Result<Vec<Group>> {
        self.groups().list(names).await
    }

    async fn list_domains(&self, filter: Option<&DomainFilter>) -> Result<Vec<ManagedDomain>> {
        self.domains().list(filter).await
    }

    async fn delete_domain(&self, entry: &ManagedDomain) -> Result<()> {
        self.domains().delete(entry).await
    }

    async fn add_domains(
        &self,
        patterns: &[String],
        tag: &str,
        group_ids: &[u32],
    ) -> Result<AddDomainsResponse> {
        self.domains().add(patterns, tag, group_ids).await
    }
}
