//! One fetch-transform cycle against a directory.

use chrono::{DateTime, Utc};

use super::filter::SkuFilter;
use super::report::{self, Report, ReportProfile, ThresholdConfig};
use super::types::SyncStatus;
use crate::client::DirectoryClient;
use crate::error::{ProbeError, Result};

pub const NO_SKUS_IN_TENANT: &str = "No Skus found in tenant";

#[derive(Debug, Clone, Default)]
pub struct ProbeOptions {
    pub filter: SkuFilter,
    pub profile: ReportProfile,
    pub thresholds: ThresholdConfig,
}

/// Fetches, filters and builds the report.
///
/// Any failure aborts before a report exists, so callers never hold a
/// partial result.
pub fn run(client: &dyn DirectoryClient, options: &ProbeOptions, now: DateTime<Utc>) -> Result<Report> {
    let all = client.list_account_skus()?;
    if all.is_empty() {
        return Err(ProbeError::no_matching_skus(NO_SKUS_IN_TENANT));
    }

    let selected = options.filter.apply(&all)?;

    let company = client.get_company_info().map_err(|e| match e {
        kept @ (ProbeError::AuthenticationFailure(_)
        | ProbeError::UpstreamUnavailable(_)
        | ProbeError::CompanyInfoUnavailable(_)) => kept,
        other => ProbeError::company_info(other.to_string()),
    })?;

    let provisioning_errors = if client.has_provisioning_errors()? {
        client.list_provisioning_errors()?
    } else {
        Vec::new()
    };
    log::info!(
        "{} SKUs selected, dirsync={}, password sync={}, {} provisioning errors",
        selected.len(),
        company.dir_sync_enabled,
        company.password_sync_enabled,
        provisioning_errors.len()
    );

    let sync = SyncStatus::from_company_info(company, provisioning_errors);

    Ok(report::build(&selected, &sync, options.profile, &options.thresholds, now))
}
