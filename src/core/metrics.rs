//! Numbers derived from raw SKU and sync fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::SkuRecord;

/// Per-SKU license counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// `active - consumed`, negative when upstream over-reports consumption
    pub free: i64,
    pub total: u64,
    pub consumed: u64,
    pub warning: u64,
}

impl DerivedMetrics {
    /// Free units as a percentage of active units. `0.0` when there are no
    /// active units.
    pub fn available_pct(&self) -> f64 {
        percent_of(self.free as f64, self.total)
    }

    /// Units in warning state as a percentage of active units. `0.0` when
    /// there are no active units.
    pub fn warning_pct(&self) -> f64 {
        percent_of(self.warning as f64, self.total)
    }
}

pub fn derive(sku: &SkuRecord) -> DerivedMetrics {
    let free = sku.active_units as i128 - sku.consumed_units as i128;
    DerivedMetrics {
        free: free.clamp(i64::MIN as i128, i64::MAX as i128) as i64,
        total: sku.active_units,
        consumed: sku.consumed_units,
        warning: sku.warning_units,
    }
}

/// Hours elapsed between `last` and `now`, rounded to two decimals.
///
/// A timestamp in the future yields a negative age.
pub fn hours_since(last: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let elapsed = now.signed_duration_since(last);
    round2(elapsed.num_milliseconds() as f64 / 3_600_000.0)
}

/// Rounds half away from zero to two decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn percent_of(part: f64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part / whole as f64 * 100.0)
}
