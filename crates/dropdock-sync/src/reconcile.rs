//! Diffing the feed against managed Pi-hole entries and applying the result.
//!
//! Patterns are the unit of comparison: a feed entry is represented by its
//! [`DropEntry::block_pattern`], a managed entry by its stored value. The
//! outcome depends only on the two pattern sets at the time of the run, so
//! a run against an unchanged feed is a no-op.

use crate::{managed_entries, resolve_target_groups, DenyListApi};
use dropdock_core::{DropEntry, Group, ManagedDomain, Result, MANAGED_TAG};
use std::collections::HashSet;
use tracing::{error, info};

/// Changes needed to bring the managed entries in line with the feed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Managed entries whose pattern is no longer in the feed
    pub to_delete: Vec<ManagedDomain>,

    /// Feed patterns not yet managed, in feed order without duplicates
    pub to_add: Vec<String>,
}

impl SyncPlan {
    /// Compute the plan.
    ///
    /// `managed` must already be restricted to entries carrying the
    /// ownership tag. Entries present on both sides are left alone even if
    /// their groups or enabled state differ.
    #[must_use]
    pub fn compute(feed: &[DropEntry], managed: &[ManagedDomain]) -> Self {
        let feed_patterns: Vec<String> = feed.iter().map(DropEntry::block_pattern).collect();
        let feed_set: HashSet<&str> = feed_patterns.iter().map(String::as_str).collect();
        let managed_set: HashSet<&str> = managed.iter().map(|m| m.domain.as_str()).collect();

        let to_delete = managed
            .iter()
            .filter(|m| !feed_set.contains(m.domain.as_str()))
            .cloned()
            .collect();

        let mut seen = HashSet::new();
        let to_add = feed_patterns
            .iter()
            .filter(|p| !managed_set.contains(p.as_str()) && seen.insert(p.as_str()))
            .cloned()
            .collect();

        Self { to_delete, to_add }
    }

    /// Returns true if nothing needs to change
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_delete.is_empty() && self.to_add.is_empty()
    }
}

/// Outcome of a reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Entries deleted
    pub deleted: usize,

    /// Patterns submitted in the add batch
    pub added: usize,

    /// Patterns Pi-hole refused within the batch
    pub rejected: usize,

    /// Names of the groups new entries were assigned to
    pub target_groups: Vec<String>,

    /// Whether mutations were skipped
    pub dry_run: bool,
}

/// Drives one reconciliation against a [`DenyListApi`]
pub struct Reconciler<'a, A: ?Sized> {
    api: &'a A,
    group_names: Option<Vec<String>>,
    dry_run: bool,
}

impl<'a, A> Reconciler<'a, A>
where
    A: DenyListApi + ?Sized,
{
    /// Create a reconciler targeting every enabled group
    #[must_use]
    pub const fn new(api: &'a A) -> Self {
        Self {
            api,
            group_names: None,
            dry_run: false,
        }
    }

    /// Restrict target groups to these names
    #[must_use]
    pub fn groups(mut self, names: Option<Vec<String>>) -> Self {
        self.group_names = names;
        self
    }

    /// Compute and log the plan without changing Pi-hole
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Reconcile Pi-hole with `feed`, which must contain only valid domains
    pub async fn run(&self, feed: &[DropEntry]) -> Result<SyncReport> {
        let groups = resolve_target_groups(self.api, self.group_names.as_deref()).await?;
        let managed = managed_entries(self.api, MANAGED_TAG).await?;

        let plan = SyncPlan::compute(feed, &managed);
        info!(
            delete = plan.to_delete.len(),
            add = plan.to_add.len(),
            "Computed sync plan"
        );

        if self.dry_run {
            for entry in &plan.to_delete {
                info!(domain = %entry.domain, "Dry run: would delete stale domain");
            }
            for pattern in &plan.to_add {
                info!(domain = %pattern, "Dry run: would add domain");
            }
            return Ok(SyncReport {
                deleted: plan.to_delete.len(),
                added: plan.to_add.len(),
                rejected: 0,
                target_groups: group_names(&groups),
                dry_run: true,
            });
        }

        self.apply(&plan, &groups).await
    }

    /// Delete stale entries one at a time, then add new patterns in one
    /// batch. The first failure aborts the run.
    pub async fn apply(&self, plan: &SyncPlan, groups: &[Group]) -> Result<SyncReport> {
        info!(count = plan.to_delete.len(), "Deleting stale domains from Pi-hole");
        for entry in &plan.to_delete {
            self.api.delete_domain(entry).await.map_err(|e| {
                error!(domain = %entry.domain, error = %e, "Failed to delete stale domain");
                e
            })?;
            info!(domain = %entry.domain, "Deleted stale domain from Pi-hole");
        }

        let target_groups = group_names(groups);
        let mut rejected = 0;

        if plan.to_add.is_empty() {
            info!("No new domains to add to Pi-hole");
        } else {
            let group_ids: Vec<u32> = groups.iter().map(|g| g.id).collect();
            let response = self
                .api
                .add_domains(&plan.to_add, MANAGED_TAG, &group_ids)
                .await
                .map_err(|e| {
                    error!(count = plan.to_add.len(), error = %e, "Failed to add domains");
                    e
                })?;
            rejected = response.rejected().len();
            info!(
                count = plan.to_add.len(),
                rejected,
                groups = %target_groups.join(", "),
                "Added domains to Pi-hole"
            );
        }

        Ok(SyncReport {
            deleted: plan.to_delete.len(),
            added: plan.to_add.len(),
            rejected,
            target_groups,
            dry_run: false,
        })
    }
}

fn group_names(groups: &[Group]) -> Vec<String> {
    groups.iter().map(|g| g.name.clone()).collect()
}
