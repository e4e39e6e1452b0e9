//! Upstream directory access.
//!
//! The probe pipeline only sees [`DirectoryClient`]. The Microsoft Graph
//! implementation lives in [`graph`], token acquisition in [`auth`].

pub mod auth;
pub mod graph;

pub use auth::Credentials;
pub use graph::GraphClient;

use crate::core::types::{CompanyInfo, ProvisioningError, SkuRecord};
use crate::error::Result;

/// Read-only view of a tenant directory
pub trait DirectoryClient {
    /// All SKUs in the tenant subscription, in upstream order
    fn list_account_skus(&self) -> Result<Vec<SkuRecord>>;

    /// Tenant-level directory and password sync state
    fn get_company_info(&self) -> Result<CompanyInfo>;

    fn has_provisioning_errors(&self) -> Result<bool> {
        Ok(!self.list_provisioning_errors()?.is_empty())
    }

    fn list_provisioning_errors(&self) -> Result<Vec<ProvisioningError>>;
}
