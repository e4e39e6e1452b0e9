use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One licensed product in the tenant subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuRecord {
    /// Namespaced id, `tenant:PRODUCT_CODE`
    pub id: String,
    pub active_units: u64,
    /// Upstream may report more consumed than active units
    pub consumed_units: u64,
    pub warning_units: u64,
}

impl SkuRecord {
    pub fn new<S: Into<String>>(id: S, active: u64, consumed: u64, warning: u64) -> Self {
        Self {
            id: id.into(),
            active_units: active,
            consumed_units: consumed,
            warning_units: warning,
        }
    }

    /// Product code with the tenant namespace stripped
    pub fn product_code(&self) -> &str {
        strip_tenant_prefix(&self.id)
    }
}

/// Returns the part of `id` after the first `:`, or `id` itself when there is none.
pub fn strip_tenant_prefix(id: &str) -> &str {
    match id.split_once(':') {
        Some((_, code)) => code,
        None => id,
    }
}

/// Tenant-level sync metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub dir_sync_enabled: bool,
    pub last_dir_sync_time: Option<DateTime<Utc>>,
    pub password_sync_enabled: bool,
    pub last_password_sync_time: Option<DateTime<Utc>>,
}

/// A directory object the sync engine failed to provision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningError {
    pub display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub dir_sync_enabled: bool,
    pub last_dir_sync_time: Option<DateTime<Utc>>,
    pub password_sync_enabled: bool,
    pub last_password_sync_time: Option<DateTime<Utc>>,
    pub provisioning_errors: Vec<ProvisioningError>,
}

impl SyncStatus {
    pub fn from_company_info(info: CompanyInfo, provisioning_errors: Vec<ProvisioningError>) -> Self {
        Self {
            dir_sync_enabled: info.dir_sync_enabled,
            last_dir_sync_time: info.last_dir_sync_time,
            password_sync_enabled: info.password_sync_enabled,
            last_password_sync_time: info.last_password_sync_time,
            provisioning_errors,
        }
    }
}
