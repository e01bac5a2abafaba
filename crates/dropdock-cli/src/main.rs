//! dropdock - Spamhaus DROP to Pi-hole sync
//!
//! Runs one reconciliation and exits; schedule it with cron or a timer.

use anyhow::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dropdock_cli::run().await
}
