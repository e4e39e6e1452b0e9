//! Assembly of the ordered channel list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::catalog;
use super::metrics::{self, DerivedMetrics};
use super::types::{SkuRecord, SyncStatus};

pub const PROVISIONING_ERRORS_CHANNEL: &str = "Provisioning Errors";
pub const DIR_SYNC_CHANNEL: &str = "Last DirSync (hours)";
pub const PASSWORD_SYNC_CHANNEL: &str = "Last Password Sync (hours)";

/// Units understood by the monitoring host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    Count,
    Percent,
    TimeHours,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Count => "Count",
            Unit::Percent => "Percent",
            Unit::TimeHours => "TimeHours",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MetricValue {
    Int(i64),
    Float(f64),
}

impl MetricValue {
    pub fn is_float(&self) -> bool {
        matches!(self, MetricValue::Float(_))
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MetricValue::Int(v) => write!(f, "{}", v),
            // `+ 0.0` folds negative zero into zero
            MetricValue::Float(v) => write!(f, "{:.2}", v + 0.0),
        }
    }
}

/// Channel limits evaluated by the monitoring host
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Thresholds {
    pub min_warning: Option<f64>,
    pub min_error: Option<f64>,
    pub max_warning: Option<f64>,
    /// Whether the host should evaluate the limits at all
    pub enabled: bool,
}

impl Thresholds {
    pub fn max_warning(value: f64) -> Self {
        Self {
            max_warning: Some(value),
            enabled: true,
            ..Default::default()
        }
    }

    pub fn min(warning: f64, error: f64) -> Self {
        Self {
            min_warning: Some(warning),
            min_error: Some(error),
            enabled: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub channel: String,
    pub value: MetricValue,
    pub unit: Option<Unit>,
    pub thresholds: Option<Thresholds>,
    /// Text shown by the host when a limit trips
    pub message: Option<String>,
}

impl MetricRecord {
    pub fn count<S: Into<String>>(channel: S, value: i64) -> Self {
        Self {
            channel: channel.into(),
            value: MetricValue::Int(value),
            unit: Some(Unit::Count),
            thresholds: None,
            message: None,
        }
    }

    pub fn float<S: Into<String>>(channel: S, value: f64, unit: Unit) -> Self {
        Self {
            channel: channel.into(),
            value: MetricValue::Float(value),
            unit: Some(unit),
            thresholds: None,
            message: None,
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    pub fn with_message<S: Into<String>>(mut self, message: S) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Ordered channel list. Order is stable for identical input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Report {
    pub records: Vec<MetricRecord>,
}

impl Report {
    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.channel.as_str())
    }

    pub fn get(&self, channel: &str) -> Option<&MetricRecord> {
        self.records.iter().find(|r| r.channel == channel)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Which derived per-SKU numbers are surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportProfile {
    /// Free and total counts
    #[default]
    Absolute,
    /// Absolute plus consumed and warning-state counts
    Detailed,
    /// Available and warning units as a share of total units
    Percent,
}

impl FromStr for ReportProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "absolute" => Ok(ReportProfile::Absolute),
            "detailed" => Ok(ReportProfile::Detailed),
            "percent" => Ok(ReportProfile::Percent),
            other => Err(format!(
                "unknown profile '{}' (expected absolute, detailed or percent)",
                other
            )),
        }
    }
}

impl fmt::Display for ReportProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportProfile::Absolute => "absolute",
            ReportProfile::Detailed => "detailed",
            ReportProfile::Percent => "percent",
        };
        f.write_str(name)
    }
}

/// Limit values attached to generated channels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub free_min_warning: f64,
    pub free_min_error: f64,
    pub available_pct_min_warning: f64,
    pub available_pct_min_error: f64,
    pub sync_max_age_hours: f64,
    /// Any count at or above one trips this
    pub provisioning_max_warning: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            free_min_warning: 5.0,
            free_min_error: 1.0,
            available_pct_min_warning: 5.0,
            available_pct_min_error: 1.0,
            sync_max_age_hours: 12.0,
            provisioning_max_warning: 0.5,
        }
    }
}

/// Builds the report from filtered SKUs and sync state. Performs no I/O.
pub fn build(
    skus: &[SkuRecord],
    sync: &SyncStatus,
    profile: ReportProfile,
    limits: &ThresholdConfig,
    now: DateTime<Utc>,
) -> Report {
    let mut records = Vec::with_capacity(3 + skus.len() * 4);

    records.push(provisioning_record(sync, limits));

    if sync.dir_sync_enabled {
        match sync.last_dir_sync_time {
            Some(last) => records.push(
                MetricRecord::float(DIR_SYNC_CHANNEL, metrics::hours_since(last, now), Unit::TimeHours)
                    .with_thresholds(Thresholds::max_warning(limits.sync_max_age_hours)),
            ),
            None => log::warn!("Directory sync enabled but no last sync time reported"),
        }
    }

    if sync.password_sync_enabled {
        match sync.last_password_sync_time {
            Some(last) => records.push(
                MetricRecord::float(
                    PASSWORD_SYNC_CHANNEL,
                    metrics::hours_since(last, now),
                    Unit::TimeHours,
                )
                .with_thresholds(Thresholds::max_warning(limits.sync_max_age_hours)),
            ),
            None => log::warn!("Password sync enabled but no last sync time reported"),
        }
    }

    let mut seen_names = HashSet::new();
    for sku in skus {
        let name = unique_name(sku, &mut seen_names);
        let derived = metrics::derive(sku);
        push_sku_records(&mut records, &name, &derived, profile, limits);
    }

    Report { records }
}

fn provisioning_record(sync: &SyncStatus, limits: &ThresholdConfig) -> MetricRecord {
    let count = sync.provisioning_errors.len() as i64;
    let record = MetricRecord::count(PROVISIONING_ERRORS_CHANNEL, count)
        .with_thresholds(Thresholds::max_warning(limits.provisioning_max_warning));

    if count == 0 {
        return record;
    }

    let names: Vec<&str> = sync
        .provisioning_errors
        .iter()
        .map(|e| e.display_name.as_str())
        .collect();
    record.with_message(format!("Provisioning errors for: {}", names.join(", ")))
}

/// Friendly name for `sku`, disambiguated with the product code, then the
/// full id, then a counter when several SKUs resolve to the same name.
fn unique_name(sku: &SkuRecord, seen: &mut HashSet<String>) -> String {
    let name = catalog::resolve(&sku.id);
    let by_id = format!("{} ({})", name, sku.id);
    let candidates = [
        name.clone(),
        format!("{} ({})", name, sku.product_code()),
        by_id.clone(),
    ];
    for candidate in candidates {
        if seen.insert(candidate.clone()) {
            return candidate;
        }
    }

    let mut n = 2;
    loop {
        let candidate = format!("{} #{}", by_id, n);
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

fn push_sku_records(
    records: &mut Vec<MetricRecord>,
    name: &str,
    derived: &DerivedMetrics,
    profile: ReportProfile,
    limits: &ThresholdConfig,
) {
    match profile {
        ReportProfile::Absolute | ReportProfile::Detailed => {
            records.push(
                MetricRecord::count(format!("{} - Free Licenses", name), derived.free)
                    .with_thresholds(Thresholds::min(limits.free_min_warning, limits.free_min_error)),
            );
        }
        ReportProfile::Percent => {
            records.push(
                MetricRecord::float(
                    format!("{} - Available Licenses (%)", name),
                    derived.available_pct(),
                    Unit::Percent,
                )
                .with_thresholds(Thresholds::min(
                    limits.available_pct_min_warning,
                    limits.available_pct_min_error,
                )),
            );
        }
    }

    records.push(MetricRecord::count(
        format!("{} - Total Licenses", name),
        clamp_to_i64(derived.total),
    ));

    match profile {
        ReportProfile::Absolute => {}
        ReportProfile::Detailed => {
            records.push(MetricRecord::count(
                format!("{} - Consumed Licenses", name),
                clamp_to_i64(derived.consumed),
            ));
            records.push(MetricRecord::count(
                format!("{} - Warning Licenses", name),
                clamp_to_i64(derived.warning),
            ));
        }
        ReportProfile::Percent => {
            records.push(MetricRecord::float(
                format!("{} - Warning Licenses (%)", name),
                derived.warning_pct(),
                Unit::Percent,
            ));
        }
    }
}

fn clamp_to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
