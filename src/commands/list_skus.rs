use anyhow::{Context, Result};

use crate::client::{DirectoryClient, GraphClient};
use crate::core::config::Config;
use crate::ui::sku_table;

/// Dumps raw SKU records for operator inspection. Bypasses the report
/// pipeline: no filtering, no thresholds.
pub fn execute(config: &Config, as_json: bool) -> Result<()> {
    let credentials = config.credentials()?;
    let client = GraphClient::connect(&credentials, config.graph_settings())
        .context("Failed to connect to the directory")?;

    let skus = client
        .list_account_skus()
        .context("Failed to list SKUs")?;

    if as_json {
        println!("{}", sku_table::format_sku_json(&skus)?);
    } else {
        print!("{}", sku_table::format_sku_table(&skus));
    }

    Ok(())
}
