//! HTTP client for the Pi-hole v6 API.
//!
//! This crate provides [`PiholeClient`], which owns a single authenticated
//! session. Build it, call [`PiholeClient::authenticate`], then use the
//! typed endpoint groups:
//!
//! ```rust,ignore
//! use dropdock_client::PiholeClient;
//!
//! let mut client = PiholeClient::builder()
//!     .base_url("https://pi.hole/api")
//!     .password("hunter2")
//!     .build()?;
//! client.authenticate().await?;
//!
//! let groups = client.groups().list(None).await?;
//! let domains = client.domains().list(None).await?;
//! ```

#![doc(html_root_url = "https://docs.rs/dropdock-client/0.3.0")]

mod client;
pub mod api;

pub use client::{Method, PiholeClient, PiholeClientBuilder, DEFAULT_BASE_URL, SESSION_HEADER};
pub use dropdock_core::{DropdockError, Result};
