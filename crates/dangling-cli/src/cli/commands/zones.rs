//! `dangling-scan zones` - list hosted zones.

use anyhow::Result;
use dangling::{DanglingError, ZoneDirectory};

use super::Context;
use crate::output;

pub async fn execute(ctx: Context) -> Result<()> {
    let client = ctx.client()?;

    let zones = client
        .list_zones()
        .await
        .map_err(|e| DanglingError::FatalDirectoryFailure(e.to_string()))?;

    println!("{}", output::render_zones(&zones, ctx.output_format)?);
    Ok(())
}
