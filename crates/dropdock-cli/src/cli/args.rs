//! Command-line argument definitions using clap.

use clap::Parser;
use dropdock_client::DEFAULT_BASE_URL;
use dropdock_sync::{parse_group_names, DEFAULT_FEED_URL};
use std::path::PathBuf;

use crate::logging::LogSettings;

/// Sync the Spamhaus ASN-DROP domain list into Pi-hole's deny list
///
/// Domains from the feed are added as regex deny entries tagged
/// `_SHDROPLIST`; tagged entries that left the feed are removed.
/// Entries without the tag are never touched.
#[derive(Parser)]
#[command(name = "dropdock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pi-hole API base URL
    #[arg(long, env = "PIHOLE_URL", default_value = DEFAULT_BASE_URL)]
    pub pihole_url: String,

    /// Pi-hole web interface or application password
    #[arg(long, env = "PIHOLE_PW", hide_env_values = true)]
    pub password: Option<String>,

    /// Verify the Pi-hole TLS certificate (off by default, Pi-hole ships a self-signed one)
    #[arg(long, env = "PIHOLE_VERIFY_TLS")]
    pub verify_tls: bool,

    /// Comma-separated group names new entries are assigned to (default: all enabled groups)
    #[arg(long, env = "PIHOLE_GROUPS")]
    pub groups: Option<String>,

    /// DROP feed URL
    #[arg(long, env = "DROPDOCK_FEED_URL", default_value = DEFAULT_FEED_URL)]
    pub feed_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log file path
    #[arg(long, env = "LOG_FILE", default_value = "dropdock.log")]
    pub log_file: PathBuf,

    /// Rotate the log file once it reaches this many bytes (0 disables rotation)
    #[arg(long, env = "LOG_MAX_BYTES", default_value_t = 10_485_760)]
    pub log_max_bytes: u64,

    /// Number of rotated log files to keep (0 disables rotation)
    #[arg(long, env = "LOG_BACKUP_COUNT", default_value_t = 5)]
    pub log_backup_count: u32,

    /// Compute and log the changes without applying them
    #[arg(long, env = "DROPDOCK_DRY_RUN")]
    pub dry_run: bool,
}

impl Cli {
    /// Parsed target group names, `None` when every group is a target
    pub fn group_names(&self) -> Option<Vec<String>> {
        self.groups
            .as_deref()
            .map(parse_group_names)
            .filter(|names| !names.is_empty())
    }

    /// Logging configuration
    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            level: self.log_level.clone(),
            file: self.log_file.clone(),
            max_bytes: self.log_max_bytes,
            backup_count: self.log_backup_count,
        }
    }
}

impl std::fmt::Debug for Cli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cli")
            .field("pihole_url", &self.pihole_url)
            .field("password", &self.password.as_ref().map(|_| "****"))
            .field("verify_tls", &self.verify_tls)
            .field("groups", &self.groups)
            .field("feed_url", &self.feed_url)
            .field("log_level", &self.log_level)
            .field("log_file", &self.log_file)
            .field("log_max_bytes", &self.log_max_bytes)
            .field("log_backup_count", &self.log_backup_count)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}
