// Probe domain logic: catalog, selection, derivation, report assembly

pub mod catalog;
pub mod config;
pub mod filter;
pub mod metrics;
pub mod probe;
pub mod report;
pub mod types;

// Re-export commonly used items
pub use config::Config;
pub use filter::SkuFilter;
pub use probe::{run, ProbeOptions};
pub use report::{MetricRecord, MetricValue, Report, ReportProfile, ThresholdConfig, Unit};
pub use types::{CompanyInfo, ProvisioningError, SkuRecord, SyncStatus};
