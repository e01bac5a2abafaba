//! CLI argument parsing and run orchestration.

pub mod args;

use anyhow::Result;
use args::Cli;
use clap::Parser;
use dropdock_client::PiholeClient;
use dropdock_sync::{filter_valid, FeedClient, Reconciler, SyncReport};
use tracing::{debug, error, info, warn};

use crate::logging;

/// Run the CLI application.
///
/// Variables from a `.env` file in the working directory are loaded first;
/// variables already set in the environment take precedence.
pub async fn run() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _guard = logging::init(&cli.log_settings())?;
    if let Ok(path) = &dotenv {
        debug!(path = %path.display(), "Loaded environment file");
    }
    info!(pihole_url = %cli.pihole_url, dry_run = cli.dry_run, "Starting dropdock");

    match sync(&cli).await {
        Ok(report) => {
            info!(
                deleted = report.deleted,
                added = report.added,
                rejected = report.rejected,
                dry_run = report.dry_run,
                "Finished dropdock run"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "dropdock run failed");
            Err(e.into())
        }
    }
}

/// Fetch the feed and reconcile it with Pi-hole
async fn sync(cli: &Cli) -> dropdock_core::Result<SyncReport> {
    let feed = FeedClient::new(&cli.feed_url)?;
    info!(feed_url = %feed.url(), "Pulling Spamhaus DROP feed");
    let entries = filter_valid(feed.fetch().await?);

    let mut builder = PiholeClient::builder()
        .base_url(&cli.pihole_url)
        .verify_certificates(cli.verify_tls);
    if let Some(password) = &cli.password {
        builder = builder.password(password);
    }
    let mut client = builder.build()?;
    client.authenticate().await?;

    let result = Reconciler::new(&client)
        .groups(cli.group_names())
        .dry_run(cli.dry_run)
        .run(&entries)
        .await;

    if let Err(e) = client.logout().await {
        warn!(error = %e, "Failed to close Pi-hole session");
    }

    result
}
