//! Lookup of the entries dropdock owns.

use crate::DenyListApi;
use dropdock_core::{DomainFilter, ManagedDomain, Result};
use tracing::info;

/// Fetch the entries tagged with `tag`.
///
/// Entries with any other comment are never returned, whatever the
/// underlying API does with the filter.
pub async fn managed_entries<A>(api: &A, tag: &str) -> Result<Vec<ManagedDomain>>
where
    A: DenyListApi + ?Sized,
{
    let filter = DomainFilter::Comment(tag.to_string());
    let entries: Vec<ManagedDomain> = api
        .list_domains(Some(&filter))
        .await?
        .into_iter()
        .filter(|entry| entry.is_tagged(tag))
        .collect();

    info!(count = entries.len(), tag, "Found managed domains in Pi-hole");
    Ok(entries)
}
