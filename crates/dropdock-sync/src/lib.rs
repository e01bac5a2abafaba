//! Spamhaus DROP to Pi-hole reconciliation.
//!
//! The flow of one run:
//!
//! 1. [`FeedClient::fetch`] pulls the DROP feed and [`filter_valid`] keeps
//!    entries with a usable domain.
//! 2. [`Reconciler::run`] resolves the target groups, looks up the entries
//!    dropdock already manages, computes a [`SyncPlan`] and applies it:
//!    stale entries are deleted one by one, new patterns are added in one
//!    batch.
//!
//! Every step talks to Pi-hole through [`DenyListApi`], implemented for
//! [`dropdock_client::PiholeClient`].

#![doc(html_root_url = "https://docs.rs/dropdock-sync/0.3.0")]

mod api;
pub mod feed;
mod groups;
mod managed;
mod reconcile;

pub use api::DenyListApi;
pub use feed::{filter_valid, parse_feed, FeedClient, DEFAULT_FEED_URL};
pub use groups::{parse_group_names, resolve_target_groups};
pub use managed::managed_entries;
pub use reconcile::{Reconciler, SyncPlan, SyncReport};
