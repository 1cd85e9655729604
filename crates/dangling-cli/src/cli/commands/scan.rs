//! `dangling-scan scan` - reconcile hosted zones against live resources.

use anyhow::Result;
use dangling::{CancelSignal, InventoryScope, ScanConfig};
use std::time::Duration;
use tracing::warn;

use super::Context;
use crate::cli::args::ScanArgs;
use crate::output;

pub async fn execute(ctx: Context, args: ScanArgs) -> Result<()> {
    let client = ctx.client()?;
    let config = scan_config(&ctx, &args);
    let reconciler = dangling::reconciler(client, config)?;

    let cancel = CancelSignal::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted; finishing zones already in progress");
            on_interrupt.cancel();
        }
    });

    let mut summary = reconciler.run_with_cancel(cancel).await?.sorted();
    if args.only_dangling {
        summary = output::only_dangling(summary);
    }

    println!("{}", output::render_summary(&summary, ctx.output_format)?);
    Ok(())
}

/// Merge scan flags over the config file
fn scan_config(ctx: &Context, args: &ScanArgs) -> ScanConfig {
    let mut config = ScanConfig::new()
        .timeout(ctx.timeout())
        .skip_private_zones(args.skip_private || ctx.config.skip_private_zones)
        .zones(args.zones.iter().cloned());

    if let Some(concurrency) = args.concurrency.or(ctx.config.concurrency) {
        config = config.concurrency(concurrency);
    }
    if !args.no_notify {
        if let Some(url) = args.notify_url.as_ref().or(ctx.config.notify_url.as_ref()) {
            config = config.notify_endpoint(url.clone());
        }
    }
    if let Some(secs) = args.deadline {
        config = config.deadline(Duration::from_secs(secs));
    }
    if args.per_zone_inventory {
        config = config.inventory_scope(InventoryScope::PerZone);
    }

    config
}
