//! Core types and errors for dropdock.
//!
//! This crate provides the foundational types shared by the dropdock crates:
//!
//! - **Feed records**: [`DropEntry`] with domain validation and conversion to
//!   a Pi-hole regex pattern
//! - **Pi-hole types**: [`ManagedDomain`], [`Group`], session and batch types
//! - **Filtering**: [`DomainFilter`], a closed set of filterable domain fields
//! - **Errors**: [`DropdockError`] and the [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use dropdock_core::DropEntry;
//!
//! let entry = DropEntry::new("ncryptd.net");
//! assert!(entry.is_valid_domain());
//! assert_eq!(entry.block_pattern(), r"(\.|^)ncryptd\.net$");
//! ```

#![doc(html_root_url = "https://docs.rs/dropdock-core/0.3.0")]

mod error;
pub mod types;

pub use error::{DropdockError, Result};
pub use types::*;

/// Comment that marks a Pi-hole deny entry as owned by dropdock.
///
/// Only entries carrying exactly this comment are ever compared against the
/// feed or deleted.
pub const MANAGED_TAG: &str = "_SHDROPLIST";
