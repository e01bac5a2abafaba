//! # dropdock-cli
//!
//! Command-line entry point for dropdock.
//!
//! One invocation performs one full run: fetch the Spamhaus ASN-DROP feed,
//! keep the valid domains, and reconcile them with the Pi-hole deny entries
//! tagged `_SHDROPLIST`. Every setting can come from a flag or from the
//! environment (`PIHOLE_URL`, `PIHOLE_PW`, `PIHOLE_GROUPS`, `LOG_LEVEL`,
//! `LOG_FILE`, `LOG_MAX_BYTES`, `LOG_BACKUP_COUNT`), including a `.env` file
//! in the working directory.

pub mod cli;
pub mod logging;

pub use cli::run;
