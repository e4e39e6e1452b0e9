use licprobe::client::DirectoryClient;
use licprobe::core::{CompanyInfo, ProvisioningError, SkuRecord};
use licprobe::{ProbeError, Result};

/// Which upstream call should fail, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Nothing,
    Skus,
    CompanyInfo,
    ProvisioningErrors,
}

pub struct FakeDirectory {
    pub skus: Vec<SkuRecord>,
    pub company: CompanyInfo,
    pub errors: Vec<ProvisioningError>,
    pub fail_at: FailAt,
    pub failure: fn(String) -> ProbeError,
}

impl FakeDirectory {
    pub fn with_skus(skus: Vec<SkuRecord>) -> Self {
        Self {
            skus,
            company: CompanyInfo::default(),
            errors: Vec::new(),
            fail_at: FailAt::Nothing,
            failure: ProbeError::UpstreamError,
        }
    }

    fn check(&self, stage: FailAt) -> Result<()> {
        if self.fail_at == stage {
            return Err((self.failure)(format!("{:?} failed", stage)));
        }
        Ok(())
    }
}

impl DirectoryClient for FakeDirectory {
    fn list_account_skus(&self) -> Result<Vec<SkuRecord>> {
        self.check(FailAt::Skus)?;
        Ok(self.skus.clone())
    }

    fn get_company_info(&self) -> Result<CompanyInfo> {
        self.check(FailAt::CompanyInfo)?;
        Ok(self.company.clone())
    }

    fn list_provisioning_errors(&self) -> Result<Vec<ProvisioningError>> {
        self.check(FailAt::ProvisioningErrors)?;
        Ok(self.errors.clone())
    }
}

pub fn sku(id: &str, active: u64, consumed: u64) -> SkuRecord {
    SkuRecord::new(id, active, consumed, 0)
}

/// Channel names in document order
pub fn channels(document: &str) -> Vec<String> {
    document
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            line.strip_prefix("<Channel>")
                .and_then(|rest| rest.strip_suffix("</Channel>"))
                .map(str::to_string)
        })
        .collect()
}

/// Value printed for `channel`, if present
pub fn value_of(document: &str, channel: &str) -> Option<String> {
    let mut lines = document.lines().map(str::trim);
    let needle = format!("<Channel>{}</Channel>", channel);
    lines.find(|l| *l == needle)?;
    lines
        .next()
        .and_then(|l| l.strip_prefix("<Value>"))
        .and_then(|l| l.strip_suffix("</Value>"))
        .map(str::to_string)
}
