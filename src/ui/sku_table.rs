use colored::*;

use crate::core::catalog;
use crate::core::metrics;
use crate::core::types::SkuRecord;
use crate::error::Result;

/// Raw SKU dump for operators picking include/exclude ids
pub fn format_sku_table(skus: &[SkuRecord]) -> String {
    if skus.is_empty() {
        return format!("{}\n", "No SKUs reported by the tenant.".yellow());
    }

    let id_width = skus
        .iter()
        .map(|s| s.id.chars().count())
        .max()
        .unwrap_or(0)
        .max("SKU ID".len());
    let names: Vec<String> = skus.iter().map(|s| catalog::resolve(&s.id)).collect();
    let name_width = names
        .iter()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut out = String::new();
    let header = format!(
        "{:<id_w$}  {:<name_w$}  {:>10}  {:>10}  {:>10}  {:>10}",
        "SKU ID",
        "NAME",
        "ACTIVE",
        "CONSUMED",
        "WARNING",
        "FREE",
        id_w = id_width,
        name_w = name_width,
    );
    out.push_str(&format!("{}\n", header.bold().cyan()));
    out.push_str(&format!("{}\n", "-".repeat(header.chars().count())));

    for (sku, name) in skus.iter().zip(&names) {
        let derived = metrics::derive(sku);
        out.push_str(&format!(
            "{:<id_w$}  {:<name_w$}  {:>10}  {:>10}  {:>10}  {:>10}\n",
            sku.id,
            name,
            derived.total,
            derived.consumed,
            derived.warning,
            derived.free,
            id_w = id_width,
            name_w = name_width,
        ));
    }

    out.push_str(&format!("\n{} SKU(s)\n", skus.len()));
    out
}

/// Same records as pretty-printed JSON
pub fn format_sku_json(skus: &[SkuRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(skus)?)
}
